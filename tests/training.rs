use rand::rngs::StdRng;
use rand::SeedableRng;

use tabular_nn::{
    train_test_split, Accuracy, Dataset, LayerKind, Matrix, MinMaxScaler, Model, ModelSpec,
    Scaler,
};

fn tiny() -> (Matrix, Matrix) {
    let x = Matrix::from_data(vec![vec![0.2, 0.9], vec![0.8, 0.1]]);
    let y = Matrix::from_data(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    (x, y)
}

fn run_tiny(seed: u64, lr: f64, epochs: usize) -> (Vec<f64>, Vec<usize>) {
    let (x, y) = tiny();
    let mut model = Model::new(lr);
    model.add(LayerKind::Input, 2);
    model.add(LayerKind::Sigmoid, 5);
    model.add(LayerKind::Output, 2);
    model.init_params(&mut StdRng::seed_from_u64(seed));

    let losses = model.train(&x, &y, epochs).into_iter().map(|s| s.train_loss).collect();
    (losses, model.predict(&x))
}

#[test]
fn fixed_seed_training_is_reproducible() {
    let (losses_a, pred_a) = run_tiny(2024, 0.05, 200);
    let (losses_b, pred_b) = run_tiny(2024, 0.05, 200);
    assert_eq!(losses_a, losses_b);
    assert_eq!(pred_a, pred_b);
    assert_eq!(losses_a.len(), 200);
}

#[test]
fn tiny_dataset_is_learned() {
    let (losses, predicted) = run_tiny(7, 0.1, 1000);
    assert!(losses.last().unwrap() < losses.first().unwrap());
    assert_eq!(predicted, vec![0, 1]);
}

#[test]
fn relu_stack_trains_without_blowing_up() {
    let spec: ModelSpec = serde_json::from_str(
        r#"{"learning_rate": 0.01, "layers": [
            {"kind": "input", "size": 2},
            {"kind": "relu", "size": 6},
            {"kind": "sigmoid", "size": 4},
            {"kind": "output", "size": 2}
        ]}"#,
    )
    .unwrap();
    let mut model = Model::from_spec(&spec).unwrap();
    model.init_params(&mut StdRng::seed_from_u64(11));

    let (x, y) = tiny();
    let stats = model.train(&x, &y, 50);
    assert!(stats.iter().all(|s| s.train_loss.is_finite()));
    assert_eq!(model.predict(&x).len(), 2);
}

#[test]
fn end_to_end_pipeline_on_separable_data() {
    // Two well-separated clusters, labelled by which side of x0 = 50 they fall on.
    let mut text = String::new();
    for i in 0..40 {
        let label = i % 2;
        let x0 = if label == 0 { 10.0 + i as f64 } else { 90.0 - i as f64 };
        let x1 = 5.0 + (i % 7) as f64;
        text.push_str(&format!("{x0} {x1} {label}\n"));
    }
    let dataset = Dataset::parse(&text).unwrap();

    let mut rng = StdRng::seed_from_u64(99);
    let mut split = train_test_split(&dataset, 0.75, true, &mut rng);
    assert_eq!(split.x_train.rows, 30);
    assert_eq!(split.y_train.cols, 2);

    let mut scaler = MinMaxScaler::new();
    scaler.fit(&split.x_train);
    scaler.transform(&mut split.x_train);
    scaler.transform(&mut split.x_test);

    let spec = ModelSpec::single_hidden(2, 8, 2, 0.05);
    let mut model = Model::from_spec(&spec).unwrap();
    model.init_params(&mut rng);
    let stats = model.train(&split.x_train, &split.y_train, 300);
    assert!(stats.last().unwrap().train_loss < stats.first().unwrap().train_loss);

    let acc = Accuracy::compute(&model.predict(&split.x_test), &split.y_test);
    assert_eq!(acc.total, 10);
    assert!(acc.ratio() >= 0.8, "accuracy {acc}");
}
