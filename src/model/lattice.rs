// src/model/lattice.rs

use crate::error::{Error, Result};
use nalgebra::Vector3;

/// The three basis vectors of a unit cell, as read from the POSCAR header.
#[derive(Clone, Debug, PartialEq)]
pub struct Lattice {
  pub a: Vector3<f64>,
  pub b: Vector3<f64>,
  pub c: Vector3<f64>,
}

impl Lattice {
  pub fn new(a: [f64; 3], b: [f64; 3], c: [f64; 3]) -> Self {
    Self {
      a: Vector3::from(a),
      b: Vector3::from(b),
      c: Vector3::from(c),
    }
  }

  /// Parse three lattice rows; `first_line` is the 1-based line number of the `a` row.
  pub fn from_rows(rows: [&str; 3], first_line: usize) -> Result<Self> {
    Ok(Self {
      a: parse_row(rows[0], first_line)?,
      b: parse_row(rows[1], first_line + 1)?,
      c: parse_row(rows[2], first_line + 2)?,
    })
  }

  pub fn scaled(&self, k: f64) -> Self {
    Self {
      a: self.a * k,
      b: self.b * k,
      c: self.c * k,
    }
  }

  /// Vectors paired with their axis label, for diagnostics.
  pub fn labelled(&self) -> [(char, &Vector3<f64>); 3] {
    [('a', &self.a), ('b', &self.b), ('c', &self.c)]
  }
}

/// Parse one lattice row. Every token must be a real number; the first three are used.
pub fn parse_row(line: &str, line_no: usize) -> Result<Vector3<f64>> {
  let values = line
    .split_whitespace()
    .map(|tok| {
      tok
        .parse::<f64>()
        .map_err(|_| Error::parse(line_no, format!("invalid lattice component {:?}", tok)))
    })
    .collect::<Result<Vec<f64>>>()?;

  if values.len() < 3 {
    return Err(Error::parse(
      line_no,
      format!("expected 3 lattice components, found {}", values.len()),
    ));
  }
  Ok(Vector3::new(values[0], values[1], values[2]))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_parse_row() {
    let v = parse_row("  3.1  -0.5 1e-1 ", 3).unwrap();
    assert_eq!(v, Vector3::new(3.1, -0.5, 0.1));
  }

  #[test]
  fn test_parse_row_errors_name_the_line() {
    match parse_row("1.0 x 0.0", 4) {
      Err(Error::Parse { line, .. }) => assert_eq!(line, 4),
      other => panic!("unexpected {:?}", other),
    }
    match parse_row("1.0 2.0", 5) {
      Err(Error::Parse { line, message }) => {
        assert_eq!(line, 5);
        assert!(message.contains("found 2"));
      }
      other => panic!("unexpected {:?}", other),
    }
  }

  #[test]
  fn test_from_rows_and_scaled() {
    let lat = Lattice::from_rows(["2 0 0", "0 3 0", "0 0 4"], 3).unwrap();
    assert_eq!(lat, Lattice::new([2.0, 0.0, 0.0], [0.0, 3.0, 0.0], [0.0, 0.0, 4.0]));

    let half = lat.scaled(0.5);
    assert_eq!(half.c, Vector3::new(0.0, 0.0, 2.0));
  }
}
