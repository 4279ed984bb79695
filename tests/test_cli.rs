use std::ffi::OsStr;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

const NEUROJACCARD: &str = env!("CARGO_BIN_EXE_neurojaccard");

/// Serialize a uchar MGH volume with a single frame. Values are in file (first axis fastest) order.
fn mgh_bytes_u8(dims: [i32; 3], values: &[u8]) -> Vec<u8> {
    let mut bytes: Vec<u8> = Vec::new();
    for v in [1, dims[0], dims[1], dims[2], 1, 0, 0].iter() {
        bytes.extend_from_slice(&(*v as i32).to_be_bytes());
    }
    bytes.extend_from_slice(&0i16.to_be_bytes());
    bytes.resize(284, 0);
    bytes.extend_from_slice(values);
    bytes
}

fn write_mask<P: AsRef<Path>>(path: P, values: &[u8]) {
    std::fs::write(path, mgh_bytes_u8([2, 2, 1], values)).unwrap();
}

fn run<S: AsRef<OsStr>>(args: &[S]) -> Output {
    Command::new(NEUROJACCARD).args(args).output().unwrap()
}

#[test]
fn the_score_is_printed_with_six_decimals() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.mgh");
    let b = dir.path().join("b.mgh");
    write_mask(&a, &[1, 0, 1, 0]);
    write_mask(&b, &[1, 0, 0, 1]);

    let out = run(&[&a, &b]);
    assert!(out.status.success());
    assert_eq!("0.333333\n", String::from_utf8_lossy(&out.stdout));
}

#[test]
fn two_empty_masks_print_zero() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.mgh");
    let b = dir.path().join("b.mgh");
    write_mask(&a, &[0, 0, 0, 0]);
    write_mask(&b, &[0, 0, 0, 0]);

    let out = run(&[&a, &b]);
    assert!(out.status.success());
    assert_eq!("0.000000\n", String::from_utf8_lossy(&out.stdout));
}

#[test]
fn identical_masks_print_one() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.mgh");
    write_mask(&a, &[3, 0, 0, 200]);

    let out = run(&[&a, &a]);
    assert!(out.status.success());
    assert_eq!("1.000000\n", String::from_utf8_lossy(&out.stdout));
}

#[test]
fn wrong_argument_counts_print_usage_and_exit_with_1() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.mgh");
    write_mask(&a, &[1, 1, 1, 1]);

    for args in [vec![], vec![a.as_path()], vec![a.as_path(), a.as_path(), a.as_path()]].iter() {
        let out = run(&args[..]);
        assert_eq!(Some(1), out.status.code());
        assert!(String::from_utf8_lossy(&out.stdout).starts_with("Usage:"));
    }
}

#[test]
fn help_and_version_flags_print_usage_and_exit_with_1() {
    for flag in ["--help", "-h", "--version", "-V"].iter() {
        let out = run(&[flag]);
        assert_eq!(Some(1), out.status.code());
        assert_eq!("Usage: neurojaccard mask1.nii.gz mask2.nii.gz\n", String::from_utf8_lossy(&out.stdout));
        assert!(out.stderr.is_empty());
    }
}

#[test]
fn verbose_logging_keeps_stdout_to_the_score() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.mgh");
    write_mask(&a, &[1, 1, 0, 0]);

    let out = Command::new(NEUROJACCARD).arg("-vv").arg(&a).arg(&a).output().unwrap();
    assert!(out.status.success());
    assert_eq!("1.000000\n", String::from_utf8_lossy(&out.stdout));
}

#[test]
fn unreadable_files_fail_without_a_score() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.mgh");
    let missing = dir.path().join("missing.nii.gz");
    write_mask(&a, &[1, 1, 1, 1]);

    let out = run(&[&a, &missing]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(!out.stderr.is_empty());
}

#[test]
fn masks_on_different_grids_fail() {
    let dir = tempdir().unwrap();
    let a = dir.path().join("a.mgh");
    let b = dir.path().join("b.mgh");
    write_mask(&a, &[1, 1, 1, 1]);
    std::fs::write(&b, mgh_bytes_u8([3, 1, 1], &[1, 1, 1])).unwrap();

    let out = run(&[&a, &b]);
    assert!(!out.status.success());
    assert!(out.stdout.is_empty());
    assert!(String::from_utf8_lossy(&out.stderr).contains("Mask shapes differ"));
}
