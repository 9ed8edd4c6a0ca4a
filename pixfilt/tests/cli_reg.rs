//! Command-line regression test
//!
//! Runs the `pixfilt` binary end to end:
//!   (1) Missing arguments print the filter list and exit 1
//!   (2) Lookup, option, read, decode and write failures map to their exit codes
//!   (3) A successful run writes a decodable PNG
//!   (4) `-i` overwrites the input in place

use std::process::{Command, Output};

use pixfilt::io::{read_image, write_image};
use pixfilt::{Pixel, Size};
use pixfilt_test::{RegParams, fixtures, scratch_path};

fn pixfilt(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pixfilt"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("spawn pixfilt")
}

fn code(output: &Output) -> f64 {
    output.status.code().unwrap_or(-1) as f64
}

#[test]
fn cli_reg_usage() {
    let mut rp = RegParams::new("cli_usage");

    let out = pixfilt(&[]);
    rp.compare_values(1.0, code(&out), 0.0);
    let stderr = String::from_utf8_lossy(&out.stderr);
    let expected = [
        "skidmark",
        "distance <euclidean|manhattan|chebyshev>",
        "slices <int> (default 36)",
    ];
    for line in expected {
        rp.compare_values(1.0, if stderr.contains(line) { 1.0 } else { 0.0 }, 0.0);
    }

    let out = pixfilt(&["only-input.png"]);
    rp.compare_values(1.0, code(&out), 0.0);

    assert!(rp.cleanup(), "cli_usage regression test failed");
}

#[test]
fn cli_reg_failures() {
    let mut rp = RegParams::new("cli_failures");

    let input = scratch_path("cli_reg_fail_in.png").expect("scratch");
    write_image(&fixtures::gradient(4, 4), &input).expect("write input");
    let output = scratch_path("cli_reg_fail_out.png").expect("scratch");

    let out = pixfilt(&[input.as_str(), output.as_str(), "emboss"]);
    rp.compare_values(2.0, code(&out), 0.0);
    let stderr = String::from_utf8_lossy(&out.stderr);
    rp.compare_values(1.0, if stderr.contains("Error: ") { 1.0 } else { 0.0 }, 0.0);

    let out = pixfilt(&[input.as_str(), output.as_str(), "median", "radius", "-3"]);
    rp.compare_values(3.0, code(&out), 0.0);

    let out = pixfilt(&[input.as_str(), output.as_str(), "skidmark", "blend", "max"]);
    rp.compare_values(3.0, code(&out), 0.0);

    let out = pixfilt(&[input.as_str(), output.as_str(), "median", "radius", "4294967295"]);
    rp.compare_values(3.0, code(&out), 0.0);

    let out = pixfilt(&[input.as_str(), output.as_str(), "skidmark", "slices", "100000"]);
    rp.compare_values(3.0, code(&out), 0.0);

    let out = pixfilt(&["/nonexistent/pixfilt/in.png", output.as_str(), "median"]);
    rp.compare_values(4.0, code(&out), 0.0);

    let garbage = scratch_path("cli_reg_garbage.png").expect("scratch");
    std::fs::write(&garbage, b"\x00\x01\x02 not an image").expect("write garbage");
    let out = pixfilt(&[garbage.as_str(), output.as_str(), "median"]);
    rp.compare_values(5.0, code(&out), 0.0);

    let out = pixfilt(&[input.as_str(), "/nonexistent/pixfilt/out.png", "kuwahara", "radius", "1"]);
    rp.compare_values(7.0, code(&out), 0.0);

    for path in [&input, &output, &garbage] {
        let _ = std::fs::remove_file(path);
    }
    assert!(rp.cleanup(), "cli_failures regression test failed");
}

#[test]
fn cli_reg_success() {
    let mut rp = RegParams::new("cli_success");

    let input = scratch_path("cli_reg_ok_in.png").expect("scratch");
    let output = scratch_path("cli_reg_ok_out.png").expect("scratch");
    let src = fixtures::gradient(10, 8);
    write_image(&src, &input).expect("write input");

    let out = pixfilt(&[
        input.as_str(),
        output.as_str(),
        "skidmark",
        "slices",
        "6",
        "blend",
        "sum",
    ]);
    rp.compare_values(0.0, code(&out), 0.0);
    let result = read_image(&output).expect("read output");
    rp.compare_values(1.0, if result.size() == Size::new(10, 6) { 1.0 } else { 0.0 }, 0.0);

    let out = pixfilt(&["--quiet", input.as_str(), output.as_str(), "median", "radius", "0"]);
    rp.compare_values(0.0, code(&out), 0.0);
    let result = read_image(&output).expect("read output");
    rp.compare_images(&src, &result);

    for path in [&input, &output] {
        let _ = std::fs::remove_file(path);
    }
    assert!(rp.cleanup(), "cli_success regression test failed");
}

#[test]
fn cli_reg_in_place() {
    let mut rp = RegParams::new("cli_in_place");

    let color = Pixel::rgb(90, 30, 200);
    let input = scratch_path("cli_reg_inplace.png").expect("scratch");
    write_image(&fixtures::single_opaque(5, 5, 2, 2, color), &input).expect("write input");

    let out = pixfilt(&[input.as_str(), "-i", "dilate", "smooth", "no"]);
    rp.compare_values(0.0, code(&out), 0.0);

    let result = read_image(&input).expect("read result");
    rp.compare_images(&fixtures::solid(5, 5, color), &result);

    let _ = std::fs::remove_file(&input);
    assert!(rp.cleanup(), "cli_in_place regression test failed");
}
