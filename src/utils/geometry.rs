// src/utils/geometry.rs

use nalgebra::Vector3;

/// Angle between two vectors in radians, or `None` if either has zero length.
///
/// The normalized dot product is clamped to [-1, 1] before `acos`, so
/// rounding on (anti)parallel vectors yields 0 or PI instead of NaN.
pub fn angle_between(u: &Vector3<f64>, v: &Vector3<f64>) -> Option<f64> {
  let denom = u.norm() * v.norm();
  if denom == 0.0 {
    return None;
  }
  Some((u.dot(v) / denom).clamp(-1.0, 1.0).acos())
}
