/// Euclidean norm, accumulated in f64 so near-unit vectors stay near unit
/// after normalization even at higher dimensions.
pub fn l2_norm(v: &[f32]) -> f32 {
    let mut sum = 0.0f64;
    for x in v {
        sum += f64::from(*x) * f64::from(*x);
    }
    sum.sqrt() as f32
}

/// Scale `v` to unit length in place. Zero vectors are left untouched.
pub fn l2_normalize(v: &mut [f32]) {
    let norm = l2_norm(v);
    if norm == 0.0 {
        return;
    }
    for x in v.iter_mut() {
        *x /= norm;
    }
}

pub fn dot(a: &[f32], b: &[f32]) -> f32 {
    let mut sum = 0.0f32;
    for (x, y) in a.iter().zip(b.iter()) {
        sum += x * y;
    }
    sum
}
