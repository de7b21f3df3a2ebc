//! Variation operators on [`HeuristicWeights`].
//!
//! These are the building blocks [`genetic`](crate::genetic) uses to create
//! and vary individuals:
//!
//! - [`random_uniform`] draws every gene uniformly from a closed range
//! - [`cx_blend`] mixes two parents gene by gene (blend crossover)
//! - [`mutate_gaussian`] adds normal noise to some of the genes
//!
//! Weights are never clamped or normalized. Scaling all four weights by a
//! positive constant does not change which placement wins, so the search
//! space has redundant directions; the optimizer does not try to remove them.

use std::ops::RangeInclusive;

use rand::Rng;
use rand_distr::{Distribution as _, Normal};
use tetrevo_evaluator::weights::HeuristicWeights;

/// Draws a weight vector whose genes are independent and uniform in `range`.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng as _;
/// use rand_pcg::Pcg32;
/// use tetrevo_training::weights;
///
/// let mut rng = Pcg32::seed_from_u64(0);
/// let w = weights::random_uniform(&mut rng, -1.0..=1.0);
/// assert!(w.as_array().iter().all(|g| (-1.0..=1.0).contains(g)));
/// ```
pub fn random_uniform<R>(rng: &mut R, range: RangeInclusive<f64>) -> HeuristicWeights
where
    R: Rng + ?Sized,
{
    HeuristicWeights::new(std::array::from_fn(|_| rng.random_range(range.clone())))
}

/// Blend crossover, applied in place to both parents.
///
/// For every gene a fresh `γ = (1 + 2α)·u - α` is drawn with `u` uniform in
/// `[0, 1)`, and the genes `a`, `b` become `(1 - γ)·a + γ·b` and
/// `γ·a + (1 - γ)·b`. With `α = 0` the children stay between the parents;
/// larger `α` lets them overshoot by up to `α` times the parents' distance.
/// The sum of the two genes is preserved.
pub fn cx_blend<R>(
    first: &mut HeuristicWeights,
    second: &mut HeuristicWeights,
    alpha: f64,
    rng: &mut R,
) where
    R: Rng + ?Sized,
{
    for (a, b) in first.as_mut_array().iter_mut().zip(second.as_mut_array()) {
        let gamma = (1.0 + 2.0 * alpha) * rng.random::<f64>() - alpha;
        let (x1, x2) = (*a, *b);
        *a = (1.0 - gamma) * x1 + gamma * x2;
        *b = gamma * x1 + (1.0 - gamma) * x2;
    }
}

/// Gaussian mutation, applied in place.
///
/// Each gene independently, with probability `gene_prob`, gets a sample of
/// `noise` added to it.
pub fn mutate_gaussian<R>(
    weights: &mut HeuristicWeights,
    noise: &Normal<f64>,
    gene_prob: f64,
    rng: &mut R,
) where
    R: Rng + ?Sized,
{
    for w in weights.as_mut_array() {
        if rng.random_bool(gene_prob) {
            *w += noise.sample(rng);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    #[test]
    fn test_random_uniform_is_reproducible() {
        let a = random_uniform(&mut Pcg32::seed_from_u64(11), -1.0..=1.0);
        let b = random_uniform(&mut Pcg32::seed_from_u64(11), -1.0..=1.0);
        assert_eq!(a, b);
    }

    #[test]
    fn test_random_uniform_degenerate_range() {
        let w = random_uniform(&mut Pcg32::seed_from_u64(0), 0.5..=0.5);
        assert_eq!(w.as_array(), &[0.5; 4]);
    }

    #[test]
    fn test_cx_blend_preserves_gene_sums() {
        let mut rng = Pcg32::seed_from_u64(3);
        let a = HeuristicWeights::new([1.0, -2.0, 0.5, 4.0]);
        let b = HeuristicWeights::new([-1.0, 3.0, 0.25, 4.0]);
        let (mut c1, mut c2) = (a, b);
        cx_blend(&mut c1, &mut c2, 0.4, &mut rng);
        for i in 0..4 {
            let before = a.as_array()[i] + b.as_array()[i];
            let after = c1.as_array()[i] + c2.as_array()[i];
            assert!((before - after).abs() < 1e-12);
        }
        // Equal genes stay equal whatever gamma is.
        assert!((c1.as_array()[3] - 4.0).abs() < 1e-12);
        assert!((c2.as_array()[3] - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_cx_blend_overshoot_is_bounded_by_alpha() {
        let mut rng = Pcg32::seed_from_u64(8);
        for _ in 0..200 {
            let mut c1 = HeuristicWeights::new([0.0; 4]);
            let mut c2 = HeuristicWeights::new([1.0; 4]);
            cx_blend(&mut c1, &mut c2, 0.4, &mut rng);
            for g in c1.as_array().iter().chain(c2.as_array()) {
                assert!((-0.4..=1.4).contains(g), "{g}");
            }
        }
    }

    #[test]
    fn test_mutate_gaussian_probability_extremes() {
        let mut rng = Pcg32::seed_from_u64(5);
        let noise = Normal::new(0.0, 0.3).unwrap();
        let original = HeuristicWeights::new([1.0, 2.0, 3.0, 4.0]);

        let mut untouched = original;
        mutate_gaussian(&mut untouched, &noise, 0.0, &mut rng);
        assert_eq!(untouched, original);

        let mut mutated = original;
        mutate_gaussian(&mut mutated, &noise, 1.0, &mut rng);
        for (m, o) in mutated.as_array().iter().zip(original.as_array()) {
            assert_ne!(m, o);
        }
    }
}
