extern crate assert_cmd;
extern crate mandelbmp;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use mandelbmp::BitmapHeader;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

fn mandelbmp() -> Command {
    Command::cargo_bin("mandelbmp").unwrap()
}

#[test]
fn help_lists_the_region_flags() {
    mandelbmp()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--xleft")
                .and(predicate::str::contains("--yupper"))
                .from_utf8(),
        );
}

#[test]
fn renders_a_small_bitmap() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("small.bmp");
    mandelbmp()
        .args(&["--width", "40", "--height", "30", "--threads", "4"])
        .arg("--output")
        .arg(&out)
        .assert()
        .success();
    let bytes = fs::read(&out).unwrap();
    let header = BitmapHeader::parse(&bytes).unwrap();
    assert_eq!((header.width, header.height), (40, 30));
    assert_eq!(header.file_size as usize, bytes.len());
}

#[test]
fn negative_edges_are_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("zoom.bmp");
    mandelbmp()
        .args(&["--width", "16", "--height", "16"])
        .args(&["--xleft", "-1.0", "--xright", "-0.5", "--ylower", "-0.25"])
        .arg("-o")
        .arg(&out)
        .assert()
        .success();
    assert!(out.exists());
}

#[test]
fn ambiguous_region_warns_and_still_renders() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("ambiguous.bmp");
    mandelbmp()
        .args(&["--width", "8", "--height", "8", "--xleft", "-1.0"])
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("ambiguous").from_utf8());
    assert!(out.exists());
}

#[test]
fn out_of_range_width_warns_and_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("fallback.bmp");
    mandelbmp()
        .args(&["--width", "20000", "--height", "4", "--threads", "2"])
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("outside").from_utf8());
    let header = BitmapHeader::parse(&fs::read(&out).unwrap()).unwrap();
    assert_eq!(header.width, 1920);
    assert_eq!(header.height, 4);
}

#[test]
fn unopenable_output_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("no").join("such").join("dir.bmp");
    mandelbmp()
        .args(&["--width", "8", "--height", "8"])
        .arg("-o")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Render failure").from_utf8());
}

#[test]
fn negative_thread_count_warns_and_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("threads.bmp");
    mandelbmp()
        .args(&["--width", "8", "--height", "4", "--threads", "-2"])
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("threads '-2'").from_utf8());
    assert!(out.exists());
}

#[test]
fn negative_threshold_warns_and_falls_back() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("threshold.bmp");
    mandelbmp()
        .args(&["--width", "8", "--height", "4", "--threshold", "-1"])
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("threshold '-1'").from_utf8());
    assert!(out.exists());
}

#[test]
fn unknown_verbosity_warns_and_still_renders() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("loud.bmp");
    mandelbmp()
        .args(&["--width", "8", "--height", "4", "--verbosity", "loud"])
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("verbosity 'loud'").from_utf8());
    assert!(out.exists());
}

#[test]
fn missing_region_warns_about_the_default() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("default.bmp");
    mandelbmp()
        .args(&["--width", "8", "--height", "4"])
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("0 of 4 region edges").from_utf8());
}
