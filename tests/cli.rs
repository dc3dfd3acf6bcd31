use std::io::Write;
use std::process::Command;

const POSCAR: &str = "\
Si2 test cell
1.0
  2.0 0.0 0.0
  0.0 3.0 0.0
  0.0 0.0 4.0
Si
2
Selective dynamics
Direct
0.5 0.5 0.5 T T F
0.0 0.25 0.75 F F F
";

fn bin() -> Command {
  Command::new(env!("CARGO_BIN_EXE_poscar-f2c"))
}

fn write_temp(text: &str) -> tempfile::NamedTempFile {
  let mut file = tempfile::NamedTempFile::new().unwrap();
  file.write_all(text.as_bytes()).unwrap();
  file
}

#[test]
fn no_arguments_exits_one_silently() {
  let out = bin().output().unwrap();
  assert_eq!(out.status.code(), Some(1));
  assert!(out.stdout.is_empty());
  assert!(out.stderr.is_empty());
}

#[test]
fn converts_file_to_stdout() {
  let poscar = write_temp(POSCAR);
  let config = write_temp("{}");

  let out = bin()
    .arg("--config")
    .arg(config.path())
    .arg(poscar.path())
    .output()
    .unwrap();
  assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

  let stdout = String::from_utf8(out.stdout).unwrap();
  let lines: Vec<&str> = stdout.lines().collect();
  let row = |x: f64, y: f64, z: f64| format!("{:>19.9} {:>19.9} {:>19.9}", x, y, z);

  assert_eq!(lines.len(), 11);
  assert_eq!(lines[0], "Si2 test cell");
  assert_eq!(lines[2], "2.0 0.0 0.0");
  assert_eq!(lines[7], "Selective dynamics");
  assert_eq!(lines[8], "Cartesian");
  assert_eq!(lines[9], format!("{} T T F", row(1.0, 1.5, 2.0)));
  assert_eq!(lines[10], format!("{} F F F", row(0.0, 0.75, 3.0)));
}

#[test]
fn missing_input_file_fails() {
  let dir = tempfile::tempdir().unwrap();
  let config = write_temp("{}");
  let out = bin()
    .arg("--config")
    .arg(config.path())
    .arg(dir.path().join("POSCAR"))
    .output()
    .unwrap();
  assert_eq!(out.status.code(), Some(1));
  assert!(out.stdout.is_empty());
}

#[test]
fn degenerate_lattice_fails_without_output() {
  let poscar = write_temp("bad\n1.0\n1 0 0\n2 0 0\n0 0 1\nX\n1\nDirect\n0 0 0\n");
  let config = write_temp("{}");
  let out = bin()
    .arg("--config")
    .arg(config.path())
    .arg(poscar.path())
    .output()
    .unwrap();
  assert_eq!(out.status.code(), Some(1));
  assert!(out.stdout.is_empty());
  assert!(String::from_utf8_lossy(&out.stderr).contains("parallel"));
}
