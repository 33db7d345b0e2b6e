use rand::distributions::{Distribution, Standard};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Fixed random seed to support repeatable testing
const SEED: [u8; 32] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 15, 14, 13, 12, 11, 10, 9, 8, 7, 6,
    5, 4, 3, 2, 1,
];

/// Get a random number generator with a const seed for repeatable testing
pub fn rng_fixed_seed() -> StdRng {
    StdRng::from_seed(SEED)
}

/// Generate `n` random numbers in [0, 1) using provided generator
pub fn randn<T>(rng: &mut StdRng, n: usize) -> Vec<T>
where
    Standard: Distribution<T>,
{
    std::iter::repeat_with(|| rng.gen::<T>()).take(n).collect()
}

/// Generate `n` random numbers in [lo, hi) with `nan_every`-th entries set to NaN
#[cfg(feature = "plot")]
pub fn noisy_series(rng: &mut StdRng, n: usize, lo: f64, hi: f64, nan_every: usize) -> Vec<f64> {
    randn::<f64>(rng, n)
        .into_iter()
        .enumerate()
        .map(|(i, x)| {
            if nan_every > 0 && i % nan_every == nan_every - 1 {
                f64::NAN
            } else {
                lo + x * (hi - lo)
            }
        })
        .collect()
}
