//! Integration tests for vic-gen
//!
//! Generates test PNGs, runs the binary, and asserts on the emitted text.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::process::Output;

use tempfile::tempdir;

fn write_indexed_png(path: &Path, width: u32, height: u32, indices: &[u8]) {
    let file = File::create(path).expect("Failed to create PNG");
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Indexed);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_palette(vec![0, 0, 0, 255, 255, 255, 255, 0, 0]);
    let mut writer = encoder.write_header().expect("Failed to write PNG header");
    writer
        .write_image_data(indices)
        .expect("Failed to write PNG data");
}

fn write_rgb_png(path: &Path, width: u32, height: u32) {
    let file = File::create(path).expect("Failed to create PNG");
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header().expect("Failed to write PNG header");
    writer
        .write_image_data(&vec![0u8; (width * height * 3) as usize])
        .expect("Failed to write PNG data");
}

fn run_vic_gen(args: &[&str]) -> Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_vic-gen"))
        .args(args)
        .output()
        .expect("Failed to run vic-gen")
}

fn stdout_of(output: &Output) -> String {
    assert!(
        output.status.success(),
        "vic-gen failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).expect("Output is not UTF-8")
}

/// One 8x8 glyph with a checkerboard top row packs to %10101010.
#[test]
fn charset_packs_checkerboard_glyph() {
    let dir = tempdir().expect("Failed to create temp dir");
    let png_path = dir.path().join("font.png");

    let mut indices = vec![0u8; 8 * 8];
    for x in 0..8 {
        indices[x] = u8::from(x % 2 == 0);
    }
    write_indexed_png(&png_path, 8, 8, &indices);

    let text = stdout_of(&run_vic_gen(&["charset", png_path.to_str().unwrap()]));

    assert!(text.starts_with("; generated code by `vic-gen charset`, do not edit\n"));
    assert!(text.contains("; 0\n"));
    assert!(text.contains(".byte %10101010\n"));
    assert!(text.contains(".byte %00000000\n"));
    // Charset blocks carry no labels.
    assert!(!text.contains(':'));
}

/// A two-sprite sheet yields contiguous labels from the start index and a
/// padded 64-byte stride per block.
#[test]
fn sprites_emit_contiguous_labels_and_padding() {
    let dir = tempdir().expect("Failed to create temp dir");
    let png_path = dir.path().join("sprites.png");

    // 48x21: two sprites side by side, all visible.
    write_indexed_png(&png_path, 48, 21, &vec![1u8; 48 * 21]);

    let text = stdout_of(&run_vic_gen(&[
        "sprites",
        png_path.to_str().unwrap(),
        "--start-index",
        "10",
    ]));

    assert!(text.contains("sprites_data_10:"));
    assert!(text.contains("sprites_data_11:"));
    assert!(!text.contains("sprites_data_12:"));
    assert!(text.contains(".byte %11111111, %11111111, %11111111 ; row 0\n"));
    assert!(text.contains(" ; row 20\n"));
    // One binary pad byte per block.
    assert_eq!(text.matches(".byte %00000000\n").count(), 2);
}

#[test]
fn sprites_reject_non_hardware_dimensions() {
    let dir = tempdir().expect("Failed to create temp dir");
    let png_path = dir.path().join("sprites.png");
    write_indexed_png(&png_path, 48, 21, &vec![1u8; 48 * 21]);

    let output = run_vic_gen(&[
        "sprites",
        png_path.to_str().unwrap(),
        "--width",
        "16",
        "--height",
        "16",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("24x21"), "stderr: {}", stderr);
}

/// Non-paletted input aborts with no block output.
#[test]
fn charset_rejects_rgb_png() {
    let dir = tempdir().expect("Failed to create temp dir");
    let png_path = dir.path().join("rgb.png");
    write_rgb_png(&png_path, 8, 8);

    let output = run_vic_gen(&["charset", png_path.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(!String::from_utf8_lossy(&output.stdout).contains(".byte"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("palette"));
}

/// A tile grid that does not divide the image fails instead of truncating.
#[test]
fn charset_rejects_uneven_tile_grid() {
    let dir = tempdir().expect("Failed to create temp dir");
    let png_path = dir.path().join("font.png");
    write_indexed_png(&png_path, 12, 8, &vec![0u8; 12 * 8]);

    let output = run_vic_gen(&["charset", png_path.to_str().unwrap()]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("out of bounds"));
}

#[test]
fn tile_map_unrolls_rows_and_columns() {
    let text = stdout_of(&run_vic_gen(&[
        "tile-map", "--rows", "2", "--columns", "3",
    ]));

    assert!(text.contains("    ; row 0\n"));
    assert!(text.contains("    ; row 1\n"));
    assert_eq!(text.matches("ldx tmp1").count(), 2);
    assert_eq!(text.matches("inx").count(), 4);
    assert_eq!(text.matches("lda tile_map + TILE_MAP_WIDTH *").count(), 6);
    assert!(text.contains("    sta screen + SCREEN_WIDTH *  1 +  2\n"));
}

#[test]
fn screen_rows_bake_y_offset_into_destination() {
    let text = stdout_of(&run_vic_gen(&["screen-rows", "screen_1", "12", "3"]));

    assert_eq!(text.matches("lda ").count(), 3);
    assert!(text.contains("    lda tile_map + TILE_MAP_WIDTH *  0, x\n"));
    assert!(text.contains("    sta screen_1 + SCREEN_WIDTH * 12, y\n"));
    assert!(text.contains("    sta screen_1 + SCREEN_WIDTH * 14, y\n"));
    assert!(!text.contains("SCREEN_WIDTH * 15"));
}

/// Degenerate row count still produces a valid, banner-only file.
#[test]
fn zero_rows_emit_banner_only() {
    let text = stdout_of(&run_vic_gen(&["screen-rows", "screen_0", "0", "0"]));
    assert_eq!(text.lines().count(), 1);
    assert!(text.contains("do not edit"));
}

#[test]
fn sprite_state_flushes_every_sprite() {
    let text = stdout_of(&run_vic_gen(&["sprite-state"]));

    assert!(text.starts_with("; generated code by `vic-gen sprite-state`, do not edit\n"));
    assert!(text.contains("    ; sprite 0\n"));
    assert!(text.contains("    ; sprite 7\n"));
    assert!(text.contains("sta VIC_SPRITE_7_Y"));
    assert!(text.contains("sta screen_0+SPRITE_IX_OFST+3"));
    assert!(text.contains("sta VIC_SPRITE_COLR+7"));
}

/// -o writes the same text to a file instead of stdout.
#[test]
fn output_flag_writes_file() {
    let dir = tempdir().expect("Failed to create temp dir");
    let out_path = dir.path().join("sprites_update.s");

    let output = run_vic_gen(&["sprite-state", "-o", out_path.to_str().unwrap()]);
    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let text = std::fs::read_to_string(&out_path).expect("Failed to read output file");
    assert!(text.contains("    ; sprite 0\n"));
}
