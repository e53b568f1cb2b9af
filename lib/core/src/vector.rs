use serde::{Deserialize, Serialize};

/// A dense vector of encoded votes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vector {
    data: Vec<f64>,
}

impl Vector {
    #[inline]
    #[must_use]
    pub fn new(data: Vec<f64>) -> Self {
        Self { data }
    }

    #[inline]
    #[must_use]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Cosine similarity, 0 when either side has zero norm
    #[inline]
    pub fn cosine_similarity(&self, other: &Vector) -> f64 {
        cosine_similarity(&self.data, &other.data)
    }
}

#[inline]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

#[inline]
pub fn squared_l2(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

/// `(a . b) / sqrt(|a|^2 |b|^2)`, clamped to [-1, 1].
///
/// One square root over the product keeps integer codes exact: identical
/// vote vectors score exactly 1. Mismatched dimensions and zero-norm inputs
/// yield 0.
#[inline]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }

    let norms = dot(a, a) * dot(b, b);
    if norms == 0.0 {
        return 0.0;
    }

    (dot(a, b) / norms.sqrt()).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let v1 = Vector::new(vec![1.0, -1.0]);
        let v2 = Vector::new(vec![1.0, -1.0]);
        assert_eq!(v1.cosine_similarity(&v2), 1.0);

        let v3 = Vector::new(vec![1.0, 0.0]);
        let v4 = Vector::new(vec![0.0, 1.0]);
        assert_eq!(v3.cosine_similarity(&v4), 0.0);

        let v5 = Vector::new(vec![-1.0, 1.0]);
        assert_eq!(v1.cosine_similarity(&v5), -1.0);
    }

    #[test]
    fn test_identical_vectors_score_exactly_one() {
        for data in [
            vec![1.0, 1.0],
            vec![1.0, 1.0, 1.0],
            vec![1.0, -1.0, 0.0, 1.0, 1.0],
            vec![-1.0; 7],
        ] {
            let v = Vector::new(data);
            assert_eq!(v.cosine_similarity(&v.clone()), 1.0, "{:?}", v);
        }
    }

    #[test]
    fn test_zero_norm_yields_zero() {
        let zero = Vector::new(vec![0.0, 0.0, 0.0]);
        let v = Vector::new(vec![1.0, 0.0, -1.0]);
        assert_eq!(zero.cosine_similarity(&v), 0.0);
        assert_eq!(v.cosine_similarity(&zero), 0.0);
    }

    #[test]
    fn test_scale_invariance() {
        let u = [1.0, -1.0, 0.0, 1.0];
        let r = [1.0, 1.0, -1.0, 0.0];
        let scaled: Vec<f64> = u.iter().map(|x| x * 7.5).collect();
        assert!((cosine_similarity(&u, &r) - cosine_similarity(&scaled, &r)).abs() < 1e-12);
    }

    #[test]
    fn test_squared_l2() {
        assert_eq!(squared_l2(&[0.0, 0.0], &[3.0, 4.0]), 25.0);
    }
}
