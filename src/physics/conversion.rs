// src/physics/conversion.rs
//
// Fractional -> Cartesian conversion for an arbitrary (triclinic) cell.
//
// The cell is rebuilt from its parameters (|a|, |b|, |c|, alpha, beta, gamma)
// in the standard setting: a along +x, b in the xy-plane, c with +z.
// The resulting Cartesian frame is therefore that standard frame, not
// necessarily the frame the lattice rows were written in.

use crate::error::{LatticeDefect, Result};
use crate::model::Lattice;
use crate::utils::geometry::angle_between;
use nalgebra::{Matrix3, Vector3};

/// Below this, sin(gamma) is treated as zero (a parallel to b).
const SIN_GAMMA_TOL: f64 = 1e-12;
/// Rounding slack on the volume radicand; anything more negative is a bad cell.
const RADICAND_TOL: f64 = 1e-12;

/// Cell parameters derived from three lattice vectors. Angles are in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatticeGeometry {
  pub lengths: [f64; 3],
  /// angle(b, c)
  pub alpha: f64,
  /// angle(a, c)
  pub beta: f64,
  /// angle(a, b)
  pub gamma: f64,
  /// sqrt(1 - cos²α - cos²β - cos²γ + 2 cosα cosβ cosγ)
  pub v: f64,
}

impl LatticeGeometry {
  pub fn from_lattice(lattice: &Lattice) -> Result<Self, LatticeDefect> {
    for (label, vec) in lattice.labelled() {
      if !vec.iter().all(|x| x.is_finite()) {
        return Err(LatticeDefect::NonFinite(label));
      }
      if vec.norm() == 0.0 {
        return Err(LatticeDefect::ZeroLength(label));
      }
    }

    let angle = |u: &Vector3<f64>, w: &Vector3<f64>, label: char| {
      angle_between(u, w).ok_or(LatticeDefect::ZeroLength(label))
    };
    let alpha = angle(&lattice.b, &lattice.c, 'b')?;
    let beta = angle(&lattice.a, &lattice.c, 'a')?;
    let gamma = angle(&lattice.a, &lattice.b, 'a')?;

    Self::from_parameters(
      [lattice.a.norm(), lattice.b.norm(), lattice.c.norm()],
      [alpha, beta, gamma],
    )
  }

  /// Build from cell lengths and angles `[alpha, beta, gamma]` (radians).
  pub fn from_parameters(lengths: [f64; 3], angles: [f64; 3]) -> Result<Self, LatticeDefect> {
    for (label, len) in ['a', 'b', 'c'].into_iter().zip(lengths) {
      if !len.is_finite() {
        return Err(LatticeDefect::NonFinite(label));
      }
      if len <= 0.0 {
        return Err(LatticeDefect::ZeroLength(label));
      }
    }

    let [alpha, beta, gamma] = angles;
    let (ca, cb, cg) = (alpha.cos(), beta.cos(), gamma.cos());
    let v_square = 1.0 - ca * ca - cb * cb - cg * cg + 2.0 * ca * cb * cg;
    // NaN fails this too
    if !(v_square >= -RADICAND_TOL) {
      return Err(LatticeDefect::NegativeRadicand);
    }

    Ok(Self {
      lengths,
      alpha,
      beta,
      gamma,
      v: v_square.max(0.0).sqrt(),
    })
  }

  pub fn alpha_deg(&self) -> f64 {
    self.alpha.to_degrees()
  }

  pub fn beta_deg(&self) -> f64 {
    self.beta.to_degrees()
  }

  pub fn gamma_deg(&self) -> f64 {
    self.gamma.to_degrees()
  }

  /// Cell volume, |a| |b| |c| v.
  pub fn volume(&self) -> f64 {
    self.lengths.iter().product::<f64>() * self.v
  }
}

/// Maps fractional coordinates to Cartesian ones. Built once per lattice.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConversionMatrix(Matrix3<f64>);

impl ConversionMatrix {
  pub fn from_geometry(geom: &LatticeGeometry) -> Result<Self, LatticeDefect> {
    let [a, b, c] = geom.lengths;
    let (ca, cb, cg) = (geom.alpha.cos(), geom.beta.cos(), geom.gamma.cos());
    let sg = geom.gamma.sin();
    if sg.abs() <= SIN_GAMMA_TOL {
      return Err(LatticeDefect::ParallelAxes);
    }

    let col1 = Vector3::new(a, 0.0, 0.0);
    let col2 = Vector3::new(b * cg, b * sg, 0.0);
    let col3 = Vector3::new(c * cb, c * (ca - cb * cg) / sg, c * geom.v / sg);

    Ok(Self(Matrix3::from_columns(&[col1, col2, col3])))
  }

  pub fn from_lattice(lattice: &Lattice) -> Result<Self, LatticeDefect> {
    Self::from_geometry(&LatticeGeometry::from_lattice(lattice)?)
  }

  pub fn matrix(&self) -> &Matrix3<f64> {
    &self.0
  }

  pub fn apply(&self, frac: [f64; 3]) -> [f64; 3] {
    let cart = self.0 * Vector3::from(frac);
    [cart.x, cart.y, cart.z]
  }
}

/// Convert one fractional point `(x, y, z)` in the cell spanned by `a`, `b`, `c`.
pub fn convert(
  a: [f64; 3],
  b: [f64; 3],
  c: [f64; 3],
  x: f64,
  y: f64,
  z: f64,
) -> Result<[f64; 3]> {
  let matrix = ConversionMatrix::from_lattice(&Lattice::new(a, b, c))?;
  Ok(matrix.apply([x, y, z]))
}
