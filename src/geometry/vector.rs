//! Small `[f64; 3]` vector helpers shared by the mesh algorithms.

pub type Vec3 = [f64; 3];

#[inline]
pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

#[inline]
pub fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

#[inline]
pub fn scale(a: Vec3, s: f64) -> Vec3 {
    [a[0] * s, a[1] * s, a[2] * s]
}

#[inline]
pub fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
pub fn norm(a: Vec3) -> f64 {
    dot(a, a).sqrt()
}

#[inline]
pub fn distance2(a: Vec3, b: Vec3) -> f64 {
    let d = sub(a, b);
    dot(d, d)
}

#[inline]
pub fn distance(a: Vec3, b: Vec3) -> f64 {
    distance2(a, b).sqrt()
}

/// `a + t * (b - a)`.
#[inline]
pub fn lerp(a: Vec3, b: Vec3, t: f64) -> Vec3 {
    add(a, scale(sub(b, a), t))
}

/// Unit vector along `a`, or `None` for a (near) zero vector.
pub fn normalize(a: Vec3) -> Option<Vec3> {
    let n = norm(a);
    (n > f64::EPSILON).then(|| scale(a, 1.0 / n))
}

/// Arithmetic mean of `points`; the origin for an empty input.
pub fn centroid<I>(points: I) -> Vec3
where
    I: IntoIterator<Item = Vec3>,
{
    let mut sum = [0.0; 3];
    let mut count = 0usize;
    for p in points {
        sum = add(sum, p);
        count += 1;
    }
    if count == 0 {
        return sum;
    }
    scale(sum, 1.0 / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cross_of_axes() {
        assert_eq!(cross([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
    }

    #[test]
    fn centroid_of_square() {
        let c = centroid([
            [0.0, 0.0, 0.0],
            [2.0, 0.0, 0.0],
            [2.0, 2.0, 0.0],
            [0.0, 2.0, 0.0],
        ]);
        assert_eq!(c, [1.0, 1.0, 0.0]);
        assert_eq!(centroid(std::iter::empty()), [0.0; 3]);
    }

    #[test]
    fn normalize_rejects_zero() {
        assert!(normalize([0.0; 3]).is_none());
        let n = normalize([3.0, 0.0, 4.0]).unwrap();
        assert!((norm(n) - 1.0).abs() < 1e-15);
    }
}
