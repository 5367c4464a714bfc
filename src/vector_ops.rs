use crate::config::{Number, EPSILON};
use wide::f32x8;

/// Compute cosine similarity between two vectors using SIMD operations.
/// Returns the raw cosine clamped to [-1, 1], or `None` on length mismatch.
pub fn compute_cosine_similarity_simd(a: &[Number], b: &[Number]) -> Option<Number> {
    if a.len() != b.len() {
        return None;
    }

    let mut dot_product = f32x8::splat(0.0);
    let mut mag_a = f32x8::splat(0.0);
    let mut mag_b = f32x8::splat(0.0);

    let len = a.len();
    let simd_len = len - (len % 8);

    // SIMD loop
    for i in (0..simd_len).step_by(8) {
        let va = f32x8::new([
            a[i],
            a[i + 1],
            a[i + 2],
            a[i + 3],
            a[i + 4],
            a[i + 5],
            a[i + 6],
            a[i + 7],
        ]);
        let vb = f32x8::new([
            b[i],
            b[i + 1],
            b[i + 2],
            b[i + 3],
            b[i + 4],
            b[i + 5],
            b[i + 6],
            b[i + 7],
        ]);
        dot_product += va * vb;
        mag_a += va * va;
        mag_b += vb * vb;
    }

    let mut scalar_dot_product = dot_product.reduce_add();
    let mut scalar_mag_a = mag_a.reduce_add();
    let mut scalar_mag_b = mag_b.reduce_add();

    // Handle remaining elements
    for i in simd_len..len {
        scalar_dot_product += a[i] * b[i];
        scalar_mag_a += a[i] * a[i];
        scalar_mag_b += b[i] * b[i];
    }

    let denominator = (scalar_mag_a * scalar_mag_b).sqrt();
    if denominator < EPSILON {
        Some(0.0)
    } else {
        Some((scalar_dot_product / denominator).clamp(-1.0, 1.0))
    }
}

pub fn normalize_vector(vector: &mut [Number]) {
    let magnitude: Number = vector.iter().map(|&x| x * x).sum::<Number>().sqrt();
    if magnitude > EPSILON {
        for x in vector.iter_mut() {
            *x /= magnitude;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_vectors_score_one() {
        let a = vec![0.5; 12];
        let sim = compute_cosine_similarity_simd(&a, &a).unwrap();
        assert!((sim - 1.0).abs() < 1e-5);
    }

    #[test]
    fn orthogonal_vectors_score_zero() {
        let a = vec![1.0, 0.0, 0.0, 0.0];
        let b = vec![0.0, 1.0, 0.0, 0.0];
        let sim = compute_cosine_similarity_simd(&a, &b).unwrap();
        assert!(sim.abs() < 1e-6);
    }

    #[test]
    fn opposite_vectors_score_negative_one() {
        let a = vec![1.0, 2.0, 3.0];
        let b = vec![-1.0, -2.0, -3.0];
        let sim = compute_cosine_similarity_simd(&a, &b).unwrap();
        assert!((sim + 1.0).abs() < 1e-5);
    }

    #[test]
    fn length_mismatch_is_none() {
        assert!(compute_cosine_similarity_simd(&[1.0, 2.0], &[1.0]).is_none());
    }

    #[test]
    fn zero_magnitude_scores_zero() {
        let a = vec![0.0; 8];
        let b = vec![1.0; 8];
        assert_eq!(compute_cosine_similarity_simd(&a, &b), Some(0.0));
    }

    #[test]
    fn normalize_produces_unit_length() {
        let mut v = vec![3.0, 4.0];
        normalize_vector(&mut v);
        let magnitude: Number = v.iter().map(|&x| x * x).sum::<Number>().sqrt();
        assert!((magnitude - 1.0).abs() < 1e-6);
    }
}
