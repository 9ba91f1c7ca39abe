//! End-to-end tests for the configuration and obstacle-list inputs.

use std::io::Write;

use vertex_core::Disk;
use vertex_io::{disks_from_file, spacing_from_input2d, VertexIoError};

#[test]
fn spacing_from_input2d_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input2d");

    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "// IBAMR cylinder flow").unwrap();
    writeln!(file, "N = 64").unwrap();
    writeln!(file, "MAX_LEVELS = 5").unwrap();
    writeln!(file, "REF_RATIO = 4").unwrap();
    writeln!(file, "CartesianGeometry {{").unwrap();
    writeln!(file, "   domain_boxes = [ (0,0) , (N , N/2) ]").unwrap();
    writeln!(file, "   x_lo = -8.0, -8.0").unwrap();
    writeln!(file, "   x_up = 24.0, 8.0").unwrap();
    writeln!(file, "}}").unwrap();
    drop(file);

    let spacing = spacing_from_input2d(&path).unwrap();
    // Lx = 32, nx0 = 64, finest factor = 4^4 = 256: dx = 32/(64*256).
    assert!((spacing.dx() - 32.0 / 16384.0).abs() < 1e-15);
    assert!((spacing.dy() - 16.0 / 8192.0).abs() < 1e-15);
    // This configuration is isotropic at the finest level.
    assert!((spacing.dx() - spacing.dy()).abs() < 1e-15);
}

#[test]
fn input2d_missing_key_names_the_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("input2d");
    std::fs::write(&path, "N = 8\nMAX_LEVELS = 1\n").unwrap();

    let result = spacing_from_input2d(&path);
    assert!(matches!(
        result,
        Err(VertexIoError::ConfigKey { name }) if name == "REF_RATIO"
    ));
}

#[test]
fn disks_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cylinders.json");
    std::fs::write(
        &path,
        r#"[{"x": 0.0, "y": 0.0, "r": 0.5}, {"x": 2.0, "y": 1.0, "r": 0.25}]"#,
    )
    .unwrap();

    let disks = disks_from_file(&path).unwrap();
    assert_eq!(
        disks,
        vec![
            Disk::new(0.0, 0.0, 0.5).unwrap(),
            Disk::new(2.0, 1.0, 0.25).unwrap(),
        ]
    );
}

#[test]
fn disks_from_csv_file_with_reordered_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cylinders.csv");
    std::fs::write(&path, "r,x,y\n0.5,0.0,0.0\n0.25,2.0,1.0\n").unwrap();

    let disks = disks_from_file(&path).unwrap();
    assert_eq!(disks.len(), 2);
    assert_eq!(disks[0], Disk::new(0.0, 0.0, 0.5).unwrap());
    assert_eq!(disks[1], Disk::new(2.0, 1.0, 0.25).unwrap());
}

#[test]
fn disks_from_csv_bad_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cylinders.csv");
    std::fs::write(&path, "x,y,r\n1.0,2.0\n").unwrap();

    assert!(matches!(
        disks_from_file(&path),
        Err(VertexIoError::Format { .. })
    ));
}

#[test]
fn unsupported_extension_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cylinders.yaml");
    std::fs::write(&path, "x: 1").unwrap();

    assert!(matches!(
        disks_from_file(&path),
        Err(VertexIoError::Format { .. })
    ));
}
