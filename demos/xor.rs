use rand::SeedableRng;
use rand::rngs::StdRng;
use tabular_nn::{LayerKind, Matrix, Model};

fn main() {
    let mut model = Model::new(0.1);
    model.add(LayerKind::Input, 2);
    model.add(LayerKind::Sigmoid, 8);
    model.add(LayerKind::Output, 2);
    model.init_params(&mut StdRng::seed_from_u64(42));

    let inputs = Matrix::from_data(vec![
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.0, 1.0],
        vec![0.0, 0.0],
    ]);
    let expected_outputs = Matrix::from_data(vec![
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
    ]);

    let stats = model.train(&inputs, &expected_outputs, 5000);
    for s in stats.iter().step_by(1000) {
        println!("Epoch {}: loss = {:.6}", s.epoch, s.train_loss);
    }

    let predicted = model.predict(&inputs);
    for (input, class) in inputs.data.iter().zip(predicted) {
        println!("Input: {:?} -> Class: {}", input, class);
    }
}
