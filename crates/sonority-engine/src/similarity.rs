//! Cosine similarity between feature vectors.

/// Dot product over the common length of `a` and `b`.
#[must_use]
pub fn dot(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Euclidean norm.
#[must_use]
pub fn magnitude(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Cosine similarity `a·b / (‖a‖·‖b‖)`.
///
/// Defined as `0.0` when either magnitude is zero, so an all-zero row never
/// produces NaN. The result is clamped to `[-1, 1]` to absorb rounding.
#[must_use]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let magnitude_a = magnitude(a);
    let magnitude_b = magnitude(b);
    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return 0.0;
    }

    let similarity = dot(a, b) / (magnitude_a * magnitude_b);
    if similarity.is_nan() {
        // Only reachable with non-finite inputs.
        0.0
    } else {
        similarity.clamp(-1.0, 1.0)
    }
}
