use crate::foundation::core::GeoPoint;

/// Maximum per-axis difference for a ring's first and last point to count as equal.
pub const CLOSURE_EPSILON_DEG: f64 = 1e-6;

/// A ring of at least four points whose first and last coincide within `1e-6°`.
pub fn is_closed_polygon(points: &[GeoPoint]) -> bool {
    if points.len() < 4 {
        return false;
    }
    let (first, last) = (points[0], points[points.len() - 1]);
    (first.lat - last.lat).abs() < CLOSURE_EPSILON_DEG
        && (first.lon - last.lon).abs() < CLOSURE_EPSILON_DEG
}

/// Uniform-stride downsampling that always keeps the first and last point.
///
/// The stride starts at `ceil(n / cap)` and grows until the output fits in `cap` (never below
/// two points). No smoothing: every output point is an input point, in order.
pub fn downsample<T: Clone>(points: &[T], cap: usize) -> Vec<T> {
    let n = points.len();
    if n <= cap {
        return points.to_vec();
    }
    let cap = cap.max(2);
    let mut step = n.div_ceil(cap);
    while strided_len(n, step) > cap {
        step += 1;
    }

    let mut out = Vec::with_capacity(strided_len(n, step));
    out.push(points[0].clone());
    out.extend(points[..n - 1].iter().skip(step).step_by(step).cloned());
    out.push(points[n - 1].clone());
    out
}

/// Count of `[0] + [step, 2*step, ... < n-1] + [n-1]`.
fn strided_len(n: usize, step: usize) -> usize {
    let interior = if n > step + 1 {
        (n - 2 - step) / step + 1
    } else {
        0
    };
    interior + 2
}

/// Keep every `ceil(n / cap)`-th item starting at index 0.
pub fn limit_collection<T>(items: Vec<T>, cap: usize) -> Vec<T> {
    let n = items.len();
    if n <= cap {
        return items;
    }
    if cap == 0 {
        return Vec::new();
    }
    let step = n.div_ceil(cap);
    items.into_iter().step_by(step).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/features/simplify.rs"]
mod tests;
