//! Integration tests for the enhance-iqa CLI.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use enhance_iqa::consts::FEATURE_LEN;
use enhance_iqa::NaturalnessModel;

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_enhance-iqa"))
        .args(["--color", "never"])
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run enhance-iqa")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("temp paths are UTF-8")
}

/// Create an RGB PNG whose pixels come from `f(x, y)`.
fn create_png(path: &Path, width: u32, height: u32, f: impl Fn(u32, u32) -> [u8; 3]) {
    let mut data = Vec::new();

    // PNG signature
    data.extend_from_slice(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]);

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.extend_from_slice(&[
        8, // bit depth
        2, // color type (RGB)
        0, // compression
        0, // filter
        0, // interlace
    ]);
    write_png_chunk(&mut data, b"IHDR", &ihdr);

    let row_size = 1 + width as usize * 3;
    let mut raw = Vec::with_capacity(height as usize * row_size);
    for y in 0..height {
        raw.push(0); // filter type: none
        for x in 0..width {
            raw.extend_from_slice(&f(x, y));
        }
    }
    write_png_chunk(&mut data, b"IDAT", &zlib_store(&raw));
    write_png_chunk(&mut data, b"IEND", &[]);

    fs::write(path, data).expect("Failed to write PNG");
}

fn write_png_chunk(data: &mut Vec<u8>, chunk_type: &[u8; 4], chunk_data: &[u8]) {
    data.extend_from_slice(&(chunk_data.len() as u32).to_be_bytes());
    data.extend_from_slice(chunk_type);
    data.extend_from_slice(chunk_data);

    let mut crc_data = Vec::with_capacity(4 + chunk_data.len());
    crc_data.extend_from_slice(chunk_type);
    crc_data.extend_from_slice(chunk_data);
    data.extend_from_slice(&crc32(&crc_data).to_be_bytes());
}

fn crc32(data: &[u8]) -> u32 {
    let mut crc = 0xFFFFFFFFu32;
    for &byte in data {
        crc ^= u32::from(byte);
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ 0xEDB88320;
            } else {
                crc >>= 1;
            }
        }
    }
    !crc
}

/// Zlib stream made of stored (uncompressed) deflate blocks.
fn zlib_store(data: &[u8]) -> Vec<u8> {
    let mut out = vec![0x78, 0x01];

    let mut remaining = data;
    loop {
        let chunk_size = remaining.len().min(65535);
        let is_final = chunk_size == remaining.len();

        out.push(u8::from(is_final)); // BFINAL + BTYPE=00 (stored)
        out.extend_from_slice(&(chunk_size as u16).to_le_bytes());
        out.extend_from_slice(&(!(chunk_size as u16)).to_le_bytes());
        out.extend_from_slice(&remaining[..chunk_size]);
        remaining = &remaining[chunk_size..];
        if is_final {
            break;
        }
    }

    out.extend_from_slice(&adler32(data).to_be_bytes());
    out
}

fn adler32(data: &[u8]) -> u32 {
    let mut a = 1u32;
    let mut b = 0u32;
    for &byte in data {
        a = (a + u32::from(byte)) % 65521;
        b = (b + a) % 65521;
    }
    (b << 16) | a
}

fn temp_dir() -> PathBuf {
    use std::sync::atomic::{AtomicU64, Ordering};
    static COUNTER: AtomicU64 = AtomicU64::new(0);
    let id = COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!(
        "enhance-iqa-cli-test-{}-{id}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("Failed to create temp dir");
    dir
}

fn scene(x: u32, y: u32) -> [u8; 3] {
    let v = ((x * 3 + y * 2 + (x * y) % 17) % 200) as u8;
    [v, v / 2, v / 3]
}

fn mirrored_scene(width: u32) -> impl Fn(u32, u32) -> [u8; 3] {
    move |x, y| scene(width - 1 - x, y)
}

fn write_model(path: &Path) {
    let mean = vec![0.5; FEATURE_LEN];
    let covariance: Vec<Vec<f64>> = (0..FEATURE_LEN)
        .map(|i| {
            (0..FEATURE_LEN)
                .map(|j| if i == j { 1.0 } else { 0.0 })
                .collect()
        })
        .collect();
    NaturalnessModel::new(&mean, &covariance)
        .expect("valid model")
        .save(path)
        .expect("writable temp dir");
}

#[test]
fn test_identical_images() {
    let dir = temp_dir();
    let img = dir.join("a.png");
    create_png(&img, 64, 48, scene);

    let output = run(&[path_str(&img), path_str(&img)]);
    assert!(output.status.success(), "{output:?}");
    assert!(stdout(&output).contains("Lightness order score: 0.0000"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_score_format() {
    let dir = temp_dir();
    let img = dir.join("a.png");
    create_png(&img, 32, 32, scene);

    let output = run(&["-s", path_str(&img), path_str(&img)]);
    assert!(output.status.success());
    assert_eq!(stdout(&output).trim(), "0.000000");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_json_output_with_model() {
    let dir = temp_dir();
    let original = dir.join("original.png");
    let enhanced = dir.join("enhanced.png");
    let model = dir.join("model.json");
    create_png(&original, 100, 100, scene);
    create_png(&enhanced, 100, 100, mirrored_scene(100));
    write_model(&model);

    let output = run(&[
        "--json",
        "--model",
        path_str(&model),
        path_str(&original),
        path_str(&enhanced),
    ]);
    assert!(output.status.success(), "{output:?}");

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");
    assert_eq!(json["width"], 100);
    assert_eq!(json["params"]["patch_size"], 96);
    assert_eq!(json["naturalness"]["patches_total"], 1);
    assert!(json["naturalness"]["score"].as_f64().expect("number") >= 0.0);
    assert!(json["lightness_order"]["score"].as_f64().expect("number") > 0.0);
    assert_eq!(json["lightness_order"]["grid_step"], 2);
    assert!(json.get("threshold_exceeded").is_none());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_single_image_needs_model() {
    let dir = temp_dir();
    let img = dir.join("a.png");
    create_png(&img, 32, 32, scene);

    let output = run(&[path_str(&img)]);
    assert_eq!(output.status.code(), Some(2));

    let model = dir.join("model.json");
    write_model(&model);
    let output = run(&["--model", path_str(&model), "--patch-size", "16", path_str(&img)]);
    assert!(output.status.success(), "{output:?}");
    let text = stdout(&output);
    assert!(text.contains("Naturalness score:"));
    assert!(!text.contains("Lightness order"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_threshold_exceeded() {
    let dir = temp_dir();
    let original = dir.join("original.png");
    let enhanced = dir.join("enhanced.png");
    create_png(&original, 64, 64, scene);
    create_png(&enhanced, 64, 64, mirrored_scene(64));

    let output = run(&[
        "--max-lightness-order",
        "0",
        path_str(&original),
        path_str(&enhanced),
    ]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("exceeds threshold"));

    let output = run(&[
        "--max-lightness-order",
        "1000000",
        path_str(&original),
        path_str(&enhanced),
    ]);
    assert!(output.status.success());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_threshold_without_its_metric_is_an_error() {
    let dir = temp_dir();
    let original = dir.join("original.png");
    let enhanced = dir.join("enhanced.png");
    let model = dir.join("model.json");
    create_png(&original, 64, 64, scene);
    create_png(&enhanced, 64, 64, mirrored_scene(64));
    write_model(&model);

    // naturalness is not computed without a model
    let output = run(&[
        "--max-naturalness",
        "0.0001",
        path_str(&original),
        path_str(&enhanced),
    ]);
    assert_eq!(output.status.code(), Some(2), "{output:?}");
    assert!(stdout(&output).is_empty());

    // lightness order is not computed without an enhanced image
    let output = run(&[
        "--model",
        path_str(&model),
        "--patch-size",
        "16",
        "--max-lightness-order",
        "1000000",
        path_str(&original),
    ]);
    assert_eq!(output.status.code(), Some(2), "{output:?}");

    // with the metric available the same gate passes
    let output = run(&[
        "--model",
        path_str(&model),
        "--patch-size",
        "16",
        "--max-lightness-order",
        "1000000",
        path_str(&original),
        path_str(&enhanced),
    ]);
    assert!(output.status.success(), "{output:?}");

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_errors_exit_2() {
    let dir = temp_dir();
    let a = dir.join("a.png");
    let b = dir.join("b.png");
    create_png(&a, 32, 32, scene);
    create_png(&b, 32, 24, scene);

    // dimension mismatch
    assert_eq!(run(&[path_str(&a), path_str(&b)]).status.code(), Some(2));
    // missing file
    let missing = dir.join("missing.png");
    assert_eq!(
        run(&[path_str(&a), path_str(&missing)]).status.code(),
        Some(2)
    );
    // missing model
    let no_model = dir.join("none.json");
    assert_eq!(
        run(&["--model", path_str(&no_model), path_str(&a), path_str(&a)])
            .status
            .code(),
        Some(2)
    );
    // invalid patch size
    assert_eq!(
        run(&["--patch-size", "1", path_str(&a), path_str(&a)])
            .status
            .code(),
        Some(2)
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_batch_mode() {
    let dir = temp_dir();
    let originals = dir.join("originals");
    let enhanced = dir.join("enhanced");
    fs::create_dir_all(&originals).expect("Failed to create dir");
    fs::create_dir_all(&enhanced).expect("Failed to create dir");

    for name in ["one.png", "two.png"] {
        create_png(&originals.join(name), 40, 30, scene);
        create_png(&enhanced.join(name), 40, 30, scene);
    }
    // no counterpart, skipped
    create_png(&originals.join("three.png"), 40, 30, scene);

    let output = run(&[path_str(&originals), path_str(&enhanced)]);
    assert!(output.status.success(), "{output:?}");
    let text = stdout(&output);
    assert!(text.contains("one.png"));
    assert!(text.contains("two.png"));
    assert!(!text.contains("three.png"));
    assert!(text.contains("Summary:"));

    let output = run(&["--batch", "--json", path_str(&originals), path_str(&enhanced)]);
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).expect("valid JSON");
    assert_eq!(json["summary"]["total"], 2);
    assert_eq!(json["summary"]["passed"], 2);
    assert_eq!(json["summary"]["lightness_order"]["max"], 0.0);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn test_batch_keep_going() {
    let dir = temp_dir();
    let originals = dir.join("originals");
    let enhanced = dir.join("enhanced");
    fs::create_dir_all(&originals).expect("Failed to create dir");
    fs::create_dir_all(&enhanced).expect("Failed to create dir");

    create_png(&originals.join("good.png"), 32, 32, scene);
    create_png(&enhanced.join("good.png"), 32, 32, scene);
    create_png(&originals.join("bad.png"), 32, 32, scene);
    fs::write(enhanced.join("bad.png"), b"not a png").expect("Failed to write file");

    let output = run(&[path_str(&originals), path_str(&enhanced)]);
    assert_eq!(output.status.code(), Some(2));

    let output = run(&["--keep-going", path_str(&originals), path_str(&enhanced)]);
    assert_eq!(output.status.code(), Some(2));
    let text = stdout(&output);
    assert!(text.contains("good.png"));
    assert!(text.contains("ERROR"));

    let _ = fs::remove_dir_all(&dir);
}
