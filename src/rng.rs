use rand::rngs::StdRng;
use rand::SeedableRng;

/// The single generator threaded through splitting and weight init.
///
/// A seed of `0` asks for a non-deterministic generator.
pub fn seeded(seed: u64) -> StdRng {
    if seed == 0 {
        StdRng::from_entropy()
    } else {
        StdRng::seed_from_u64(seed)
    }
}
