//! Exact cosine ranking shared by every index backend.

use std::cmp::Ordering;

/// Cosine distance `1 - cos(a, b)`, in `[0, 2]`.
///
/// A zero vector has no direction: its similarity to anything is 0, so the
/// distance is 1.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f64 {
    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 1.0;
    }
    let cos = (dot / (norm_a.sqrt() * norm_b.sqrt())).clamp(-1.0, 1.0);
    1.0 - cos
}

/// Ascending distance, then ascending `rule_id`.
pub fn compare(a_distance: f64, a_id: &str, b_distance: f64, b_id: &str) -> Ordering {
    a_distance
        .total_cmp(&b_distance)
        .then_with(|| a_id.cmp(b_id))
}

/// Sort `items` by distance then id and keep the first `k`.
pub fn top_k<T, D, I>(mut items: Vec<T>, k: usize, distance: D, id: I) -> Vec<T>
where
    D: Fn(&T) -> f64,
    I: Fn(&T) -> &str,
{
    items.sort_by(|a, b| compare(distance(a), id(a), distance(b), id(b)));
    items.truncate(k);
    items
}
