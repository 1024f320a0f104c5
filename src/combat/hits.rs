//! Hit-count distributions.
//!
//! Each unit in a volley hits independently with its own probability, so the
//! number of hits follows a Poisson-binomial distribution. It is built by
//! folding units in one at a time over a vector indexed by partial hit count,
//! which is O(n^2) instead of enumerating every hitting subset.

/// Probability mass function over the number of hits in one volley.
#[derive(Debug, Clone, PartialEq)]
pub struct HitDistribution {
    probs: Vec<f64>,
}

impl HitDistribution {
    /// Computes the exact distribution for the given per-unit hit probabilities.
    pub fn new(hit_probs: &[f64]) -> Self {
        let mut probs = Vec::with_capacity(hit_probs.len() + 1);
        probs.push(1.0);
        for &p in hit_probs {
            let miss = 1.0 - p;
            probs.push(0.0);
            for k in (0..probs.len()).rev() {
                let carried = if k > 0 { probs[k - 1] * p } else { 0.0 };
                probs[k] = probs[k] * miss + carried;
            }
        }
        HitDistribution { probs }
    }

    /// Probability of exactly `hits` hits; zero outside `0..=n`.
    pub fn probability(&self, hits: usize) -> f64 {
        self.probs.get(hits).copied().unwrap_or(0.0)
    }

    /// Largest possible number of hits (the number of firing units).
    pub fn max_hits(&self) -> usize {
        self.probs.len() - 1
    }

    /// Iterates over `(hits, probability)` for every hit count with nonzero probability.
    pub fn outcomes(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.probs
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, p)| p > 0.0)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.probs
    }

    /// Expected number of hits.
    pub fn mean(&self) -> f64 {
        self.probs
            .iter()
            .enumerate()
            .map(|(k, p)| k as f64 * p)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    /// Sums every hitting subset explicitly.
    fn by_enumeration(ps: &[f64]) -> Vec<f64> {
        let n = ps.len();
        let mut out = vec![0.0; n + 1];
        for mask in 0u32..(1 << n) {
            let mut prob = 1.0;
            for (i, &p) in ps.iter().enumerate() {
                prob *= if mask & (1 << i) != 0 { p } else { 1.0 - p };
            }
            out[mask.count_ones() as usize] += prob;
        }
        out
    }

    #[test]
    fn single_unit() {
        let d = HitDistribution::new(&[0.25]);
        assert_eq!(d.as_slice(), &[0.75, 0.25]);
        assert_eq!(d.max_hits(), 1);
    }

    #[test]
    fn no_units_means_no_hits() {
        let d = HitDistribution::new(&[]);
        assert_eq!(d.probability(0), 1.0);
        assert_eq!(d.max_hits(), 0);
    }

    #[test]
    fn zero_outside_support() {
        let d = HitDistribution::new(&[0.5, 0.5]);
        assert_eq!(d.probability(3), 0.0);
        assert_eq!(d.probability(100), 0.0);
    }

    #[test]
    fn sums_to_one() {
        let cases: [&[f64]; 4] = [
            &[1.0 / 6.0; 12],
            &[1.0 / 6.0, 2.0 / 6.0, 3.0 / 6.0, 4.0 / 6.0],
            &[0.0, 1.0, 0.5],
            &[0.999, 0.001, 0.3, 0.7, 0.2, 0.9, 0.4],
        ];
        for ps in cases {
            let total: f64 = HitDistribution::new(ps).as_slice().iter().sum();
            assert!((total - 1.0).abs() < EPS, "{:?} sums to {}", ps, total);
        }
    }

    #[test]
    fn matches_subset_enumeration() {
        let ps = [1.0 / 6.0, 2.0 / 6.0, 3.0 / 6.0, 1.0 / 6.0, 4.0 / 6.0];
        let d = HitDistribution::new(&ps);
        for (k, expected) in by_enumeration(&ps).into_iter().enumerate() {
            assert!((d.probability(k) - expected).abs() < EPS, "k = {}", k);
        }
    }

    #[test]
    fn identical_units_are_binomial() {
        let d = HitDistribution::new(&[0.5; 4]);
        let expected = [1.0, 4.0, 6.0, 4.0, 1.0].map(|c| c / 16.0);
        for (k, e) in expected.iter().enumerate() {
            assert!((d.probability(k) - e).abs() < EPS);
        }
        assert!((d.mean() - 2.0).abs() < EPS);
    }

    #[test]
    fn certain_hits_and_misses() {
        let d = HitDistribution::new(&[1.0, 0.0, 1.0]);
        assert_eq!(d.probability(2), 1.0);
        let outcomes: Vec<_> = d.outcomes().collect();
        assert_eq!(outcomes, vec![(2, 1.0)]);
    }
}
