// src/io/poscar.rs
//
// Streaming Direct -> Cartesian rewrite of a POSCAR file.
//
// Layout:
//   1     comment
//   2     scale factor (passed through, not applied)
//   3-5   lattice rows
//   6     element symbols (optional)
//   6/7   atom counts
//   rest  mode markers, coordinate rows, anything else

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use crate::config::OutputFormat;
use crate::error::{Error, Result};
use crate::model::Lattice;
use crate::physics::conversion::{ConversionMatrix, LatticeGeometry};

/// Kinds of line in the fixed-position header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLine {
  Comment,
  ScaleFactor,
  LatticeRow(usize),
  ElementRow,
  CountRow,
}

impl HeaderLine {
  fn describe(self) -> String {
    match self {
      HeaderLine::Comment => "comment line".to_string(),
      HeaderLine::ScaleFactor => "scale factor".to_string(),
      HeaderLine::LatticeRow(i) => format!("lattice vector {}", i + 1),
      HeaderLine::ElementRow => "element symbols".to_string(),
      HeaderLine::CountRow => "atom counts".to_string(),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
  SelectiveDynamics,
  Cartesian,
  Direct,
}

/// A line after the header, classified by its first non-space character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyLine<'a> {
  Marker(Marker),
  Coordinate(Vec<&'a str>),
  Unrecognized,
}

/// Whether upcoming coordinate rows still need converting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordinateMode {
  #[default]
  Fractional,
  Cartesian,
}

pub fn classify(line: &str) -> BodyLine<'_> {
  let first = line.chars().find(|&ch| ch != ' ').map(|ch| ch.to_ascii_lowercase());
  match first {
    Some('s') => BodyLine::Marker(Marker::SelectiveDynamics),
    Some('c') => BodyLine::Marker(Marker::Cartesian),
    Some('d') => BodyLine::Marker(Marker::Direct),
    Some(ch) if ch.is_ascii_digit() => BodyLine::Coordinate(line.split_whitespace().collect()),
    _ => BodyLine::Unrecognized,
  }
}

/// True if the line (spaces removed) is all digits, i.e. the atom-count row.
///
/// POSCAR lets the element-symbol row be omitted, so the line after the
/// lattice is either symbols or counts. Only this peek tells them apart.
pub fn is_count_row(line: &str) -> bool {
  let mut digits = line.chars().filter(|&ch| ch != ' ').peekable();
  digits.peek().is_some() && digits.all(|ch| ch.is_ascii_digit())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
  pub converted: usize,
  pub markers: usize,
  pub passed_through: usize,
}

/// Per-file conversion state. The matrix is fixed once the header is read.
pub struct Transcoder {
  matrix: ConversionMatrix,
  format: OutputFormat,
}

impl Transcoder {
  pub fn new(lattice: &Lattice, format: OutputFormat) -> Result<Self> {
    let geom = LatticeGeometry::from_lattice(lattice)?;
    log::debug!(
      "cell: a={:.6} b={:.6} c={:.6} alpha={:.4} beta={:.4} gamma={:.4} volume={:.6}",
      geom.lengths[0],
      geom.lengths[1],
      geom.lengths[2],
      geom.alpha_deg(),
      geom.beta_deg(),
      geom.gamma_deg(),
      geom.volume()
    );
    let matrix = ConversionMatrix::from_geometry(&geom)?;
    log::trace!("conversion matrix: {}", matrix.matrix());
    Ok(Self { matrix, format })
  }

  /// Handle one body line. Returns the mode for the next line and the text to emit.
  pub fn step<'a>(
    &self,
    mode: CoordinateMode,
    line: &'a str,
    line_no: usize,
  ) -> Result<(CoordinateMode, Cow<'a, str>)> {
    let out = match classify(line) {
      BodyLine::Marker(Marker::SelectiveDynamics) => (mode, Cow::Borrowed(line)),
      BodyLine::Marker(Marker::Cartesian) => (CoordinateMode::Cartesian, Cow::Borrowed(line)),
      // Everything from here on is emitted converted, so label it as such
      BodyLine::Marker(Marker::Direct) => (CoordinateMode::Fractional, Cow::Borrowed("Cartesian")),
      BodyLine::Coordinate(fields) if mode == CoordinateMode::Fractional => {
        (mode, Cow::Owned(self.convert_row(&fields, line_no)?))
      }
      BodyLine::Coordinate(_) | BodyLine::Unrecognized => (mode, Cow::Borrowed(line)),
    };
    Ok(out)
  }

  fn convert_row(&self, fields: &[&str], line_no: usize) -> Result<String> {
    if fields.len() < 3 {
      return Err(Error::parse(
        line_no,
        format!("expected 3 coordinates, found {}", fields.len()),
      ));
    }

    let mut frac = [0.0; 3];
    for (slot, tok) in frac.iter_mut().zip(fields) {
      *slot = tok
        .parse()
        .map_err(|_| Error::parse(line_no, format!("invalid coordinate {:?}", tok)))?;
    }

    let cart = self.matrix.apply(frac);
    let (w, p) = (self.format.width, self.format.precision);
    let mut row = format!(
      "{:>w$.p$} {:>w$.p$} {:>w$.p$}",
      cart[0],
      cart[1],
      cart[2],
      w = w,
      p = p
    );
    // Selective dynamics flags
    if fields.len() > 3 {
      row.push(' ');
      row.push_str(&fields[3..].join(" "));
    }
    Ok(row)
  }
}

struct LineReader<R> {
  inner: std::io::Lines<R>,
  line_no: usize,
}

impl<R: BufRead> LineReader<R> {
  fn next_line(&mut self) -> Result<Option<String>> {
    match self.inner.next() {
      Some(line) => {
        self.line_no += 1;
        Ok(Some(line?.trim().to_string()))
      }
      None => Ok(None),
    }
  }

  fn require(&mut self, what: HeaderLine) -> Result<String> {
    self.next_line()?.ok_or_else(|| {
      Error::parse(
        self.line_no + 1,
        format!("unexpected end of file, expected {}", what.describe()),
      )
    })
  }
}

/// Rewrite a POSCAR stream with Direct coordinates converted to Cartesian.
///
/// Nothing is written if the header is truncated or the lattice is
/// degenerate. A malformed coordinate row aborts mid-stream; lines before
/// it have already been written.
pub fn transcode<R: BufRead, W: Write>(
  reader: R,
  mut writer: W,
  format: &OutputFormat,
) -> Result<Summary> {
  let mut lines = LineReader {
    inner: reader.lines(),
    line_no: 0,
  };

  let mut header = vec![
    lines.require(HeaderLine::Comment)?,
    lines.require(HeaderLine::ScaleFactor)?,
  ];
  for i in 0..3 {
    header.push(lines.require(HeaderLine::LatticeRow(i))?);
  }
  let lattice = Lattice::from_rows([header[2].as_str(), header[3].as_str(), header[4].as_str()], 3)?;

  let after_lattice = lines.require(HeaderLine::ElementRow)?;
  let has_symbols = !is_count_row(&after_lattice);
  header.push(after_lattice);
  if has_symbols {
    header.push(lines.require(HeaderLine::CountRow)?);
  } else {
    log::info!("no element symbol line; atom counts directly follow the lattice");
  }

  let transcoder = Transcoder::new(&lattice, format.clone())?;
  for line in &header {
    writeln!(writer, "{}", line)?;
  }

  let mut summary = Summary::default();
  let mut mode = CoordinateMode::default();
  while let Some(line) = lines.next_line()? {
    let (next, out) = transcoder.step(mode, &line, lines.line_no)?;
    match classify(&line) {
      BodyLine::Marker(_) => summary.markers += 1,
      BodyLine::Coordinate(_) if mode == CoordinateMode::Fractional => summary.converted += 1,
      _ => summary.passed_through += 1,
    }
    writeln!(writer, "{}", out)?;
    mode = next;
  }
  writer.flush()?;

  Ok(summary)
}

pub fn transcode_file<W: Write>(path: &Path, writer: W, format: &OutputFormat) -> Result<Summary> {
  let file = File::open(path).map_err(|source| Error::File {
    path: path.to_path_buf(),
    source,
  })?;
  log::info!("reading {}", path.display());
  transcode(BufReader::new(file), writer, format)
}
