//! enhance-iqa CLI - Quality metrics for image enhancement
//!
//! Scores an enhanced image for naturalness and for lightness-order
//! preservation against its original.

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{ArgAction, ColorChoice, Parser, ValueEnum};
use colored::{Color, ColoredString, Colorize};
use enhance_iqa::gray::rgba_from_bytes;
use enhance_iqa::{
    ImgVec, LightnessOrderParams, LightnessOrderResult, Metric, NaturalnessModel,
    NaturalnessParams, NaturalnessResult, QualityAssessor, Rating, RatingScale, TracingObserver,
    RGBA8,
};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

/// Naturalness and lightness-order quality metrics for enhanced images
///
/// Naturalness (needs --model) measures how far an image's natural-scene
/// statistics are from a reference model. Lightness order compares an
/// enhanced image against its original and counts how often the relative
/// brightness of sampled locations was reordered. Lower is better for both.
///
/// Naturalness bands:      < 3 excellent, < 4 good, < 6 fair, else poor
/// Lightness-order bands:  < 35 excellent, < 50 good, < 65 fair, else poor
#[derive(Parser, Debug)]
#[command(name = "enhance-iqa")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    Lightness order of an enhancement:
        enhance-iqa original.png enhanced.png

    Both metrics with quality ratings:
        enhance-iqa -q --model natural.json original.png enhanced.png

    Naturalness of a single image:
        enhance-iqa --model natural.json photo.png

    CI mode - fail if a score exceeds its threshold:
        enhance-iqa --model natural.json --max-naturalness 4 --max-lightness-order 50 a.png b.png

    Compare all PNGs in two directories:
        enhance-iqa --batch originals/ enhanced/

    Output JSON for scripting:
        enhance-iqa --json --model natural.json original.png enhanced.png

EXIT CODES:
    0 - Success (scores within thresholds if specified)
    1 - A score exceeded its threshold
    2 - Error (file not found, invalid image, invalid model, etc.)")]
struct Cli {
    /// Original image or directory (before enhancement)
    #[arg(value_name = "ORIGINAL")]
    original: PathBuf,

    /// Enhanced image or directory; omit to score ORIGINAL's naturalness only
    #[arg(value_name = "ENHANCED")]
    enhanced: Option<PathBuf>,

    /// Naturalness model (JSON); naturalness is skipped without one
    #[arg(short, long, value_name = "FILE")]
    model: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Output JSON (shorthand for --format json)
    #[arg(long, conflicts_with = "format")]
    json: bool,

    /// Show quality ratings with colors (shorthand for --format quality)
    #[arg(short, long, conflicts_with = "format")]
    quality: bool,

    /// Quiet mode - only output the score numbers
    #[arg(long, short = 's', action = ArgAction::SetTrue)]
    quiet: bool,

    /// Maximum acceptable naturalness score (exit code 1 if exceeded, needs --model)
    #[arg(long, value_name = "SCORE")]
    max_naturalness: Option<f64>,

    /// Maximum acceptable lightness-order score (exit code 1 if exceeded, needs ENHANCED)
    #[arg(long, value_name = "SCORE")]
    max_lightness_order: Option<f64>,

    /// Batch mode: compare matching files in two directories
    #[arg(long, short = 'b')]
    batch: bool,

    /// File extensions to include in batch mode (comma-separated)
    #[arg(
        long,
        default_value = "png,jpg,jpeg,webp,gif,bmp,tif,tiff",
        value_delimiter = ','
    )]
    extensions: Vec<String>,

    /// Continue on errors in batch mode
    #[arg(long)]
    keep_going: bool,

    /// Show summary statistics in batch mode
    #[arg(long)]
    summary: bool,

    /// Naturalness patch edge length in pixels
    #[arg(long, default_value = "96", value_name = "PIXELS")]
    patch_size: usize,

    /// Lightness-order local maximum window radius
    #[arg(long, default_value = "7", value_name = "RADIUS")]
    window: usize,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto")]
    color: ColorChoice,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Plain text output with scores
    Text,
    /// JSON output with all metrics
    Json,
    /// Include quality rating interpretation (with colors)
    Quality,
    /// Minimal - just the score numbers, naturalness first
    Score,
}

#[derive(Serialize)]
struct JsonOutput {
    original: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    enhanced: Option<String>,
    width: u32,
    height: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    naturalness: Option<JsonNaturalness>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lightness_order: Option<JsonLightnessOrder>,
    params: JsonParams,
    #[serde(skip_serializing_if = "Option::is_none")]
    threshold_exceeded: Option<bool>,
}

#[derive(Serialize)]
struct JsonNaturalness {
    score: f64,
    quality_rating: String,
    quality_description: String,
    patches_used: usize,
    patches_total: usize,
}

#[derive(Serialize)]
struct JsonLightnessOrder {
    score: f64,
    quality_rating: String,
    quality_description: String,
    mismatches: u64,
    grid_step: usize,
    grid_rows: usize,
    grid_cols: usize,
}

#[derive(Serialize)]
struct JsonParams {
    patch_size: usize,
    window: usize,
}

#[derive(Serialize)]
struct BatchJsonOutput {
    results: Vec<JsonOutput>,
    summary: BatchSummary,
}

#[derive(Serialize)]
struct BatchSummary {
    total: usize,
    passed: usize,
    failed: usize,
    errors: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    naturalness: Option<ScoreStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lightness_order: Option<ScoreStats>,
}

#[derive(Serialize, Clone, Copy)]
struct ScoreStats {
    min: f64,
    max: f64,
    mean: f64,
}

impl ScoreStats {
    fn from_scores(scores: &[f64]) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }
        Some(Self {
            min: scores.iter().copied().fold(f64::INFINITY, f64::min),
            max: scores.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            mean: scores.iter().sum::<f64>() / scores.len() as f64,
        })
    }
}

/// Scores for one original/enhanced pair.
struct Assessment {
    naturalness: Option<NaturalnessResult>,
    lightness_order: Option<LightnessOrderResult>,
    width: u32,
    height: u32,
}

struct ComparisonResult {
    original: PathBuf,
    enhanced: PathBuf,
    result: Result<Assessment, String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_colors(&cli);
    setup_logging(cli.verbose);

    let assessor = match build_assessor(&cli) {
        Ok(assessor) => assessor,
        Err(e) => {
            report_error(&cli, &e);
            return ExitCode::from(2);
        }
    };

    let both_dirs = cli.original.is_dir() && cli.enhanced.as_deref().is_some_and(Path::is_dir);
    if cli.batch || both_dirs {
        run_batch(&cli, &assessor)
    } else {
        run_single(&cli, &assessor)
    }
}

fn setup_colors(cli: &Cli) {
    match cli.color {
        ColorChoice::Always => colored::control::set_override(true),
        ColorChoice::Never => colored::control::set_override(false),
        ColorChoice::Auto => {
            // Disable colors if not a terminal
            if !io::stdout().is_terminal() {
                colored::control::set_override(false);
            }
        }
    }
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn report_error(cli: &Cli, message: &str) {
    if !cli.quiet {
        eprintln!("{}: {}", "error".red().bold(), message);
    }
}

fn build_assessor(cli: &Cli) -> Result<QualityAssessor, String> {
    if cli.max_naturalness.is_some() && cli.model.is_none() {
        return Err("--max-naturalness needs --model to compute naturalness".to_string());
    }
    if cli.max_lightness_order.is_some() && cli.enhanced.is_none() {
        return Err(
            "--max-lightness-order needs an ENHANCED image to compute lightness order".to_string(),
        );
    }

    let naturalness_params = NaturalnessParams::new().with_patch_size(cli.patch_size);
    naturalness_params
        .validate()
        .map_err(|e| e.to_string())?;
    let lightness_params = LightnessOrderParams::new().with_window(cli.window);
    lightness_params.validate().map_err(|e| e.to_string())?;

    let mut assessor = QualityAssessor::new()
        .with_naturalness_params(naturalness_params)
        .with_lightness_params(lightness_params)
        .with_observer(Arc::new(TracingObserver));

    if let Some(path) = &cli.model {
        let model = NaturalnessModel::load(path).map_err(|e| e.to_string())?;
        tracing::info!(path = %path.display(), "naturalness model loaded");
        assessor = assessor.with_model(model);
    }

    if cli.enhanced.is_none() && assessor.model().is_none() {
        return Err(
            "nothing to compute: give an ENHANCED image for lightness order or --model for naturalness"
                .to_string(),
        );
    }
    Ok(assessor)
}

fn run_single(cli: &Cli, assessor: &QualityAssessor) -> ExitCode {
    match assess(assessor, &cli.original, cli.enhanced.as_deref()) {
        Ok(assessment) => {
            if let Err(e) = output_single_result(cli, &assessment) {
                report_error(cli, &e);
                return ExitCode::from(2);
            }

            if threshold_exceeded(cli, &assessment) {
                return ExitCode::from(1);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            report_error(cli, &e);
            ExitCode::from(2)
        }
    }
}

fn run_batch(cli: &Cli, assessor: &QualityAssessor) -> ExitCode {
    let Some(enhanced_dir) = cli.enhanced.as_deref() else {
        report_error(cli, "batch mode needs an ENHANCED directory");
        return ExitCode::from(2);
    };
    if !cli.original.is_dir() {
        report_error(
            cli,
            &format!("original path '{}' is not a directory", cli.original.display()),
        );
        return ExitCode::from(2);
    }
    if !enhanced_dir.is_dir() {
        report_error(
            cli,
            &format!("enhanced path '{}' is not a directory", enhanced_dir.display()),
        );
        return ExitCode::from(2);
    }

    let pairs = match find_matching_files(&cli.original, enhanced_dir, &cli.extensions) {
        Ok(pairs) => pairs,
        Err(e) => {
            report_error(cli, &e);
            return ExitCode::from(2);
        }
    };

    if pairs.is_empty() {
        eprintln!(
            "{}: no matching image files found",
            "warning".yellow().bold()
        );
        return ExitCode::from(2);
    }

    let mut results: Vec<ComparisonResult> = Vec::new();
    let mut had_errors = false;
    let mut any_exceeded = false;

    for (original, enhanced) in &pairs {
        let assessment = assess(assessor, original, Some(enhanced));

        match &assessment {
            Err(e) => {
                had_errors = true;
                tracing::warn!(file = %original.display(), error = %e, "comparison failed");
                if !cli.keep_going {
                    report_error(cli, &format!("{}: {}", original.display(), e));
                    return ExitCode::from(2);
                }
            }
            Ok(a) => any_exceeded |= threshold_exceeded(cli, a),
        }

        results.push(ComparisonResult {
            original: original.clone(),
            enhanced: enhanced.clone(),
            result: assessment,
        });
    }

    if let Err(e) = output_batch_results(cli, &results) {
        report_error(cli, &e);
        return ExitCode::from(2);
    }

    if any_exceeded {
        ExitCode::from(1)
    } else if had_errors {
        ExitCode::from(2)
    } else {
        ExitCode::SUCCESS
    }
}

fn find_matching_files(
    original_dir: &Path,
    enhanced_dir: &Path,
    extensions: &[String],
) -> Result<Vec<(PathBuf, PathBuf)>, String> {
    let extensions: Vec<String> = extensions.iter().map(|e| e.to_lowercase()).collect();

    let entries = std::fs::read_dir(original_dir).map_err(|e| {
        format!(
            "failed to read directory '{}': {e}",
            original_dir.display()
        )
    })?;

    let mut pairs = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| format!("failed to read directory entry: {e}"))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        if !extensions.contains(&ext) {
            continue;
        }

        let Some(file_name) = path.file_name() else {
            continue;
        };
        let enhanced = enhanced_dir.join(file_name);
        if enhanced.exists() {
            pairs.push((path, enhanced));
        } else {
            tracing::debug!(file = %path.display(), "no enhanced counterpart, skipping");
        }
    }

    pairs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(pairs)
}

fn load_rgba(path: &Path) -> Result<(ImgVec<RGBA8>, u32, u32), String> {
    let decoded = image::open(path)
        .map_err(|e| format!("failed to load '{}': {e}", path.display()))?
        .to_rgba8();
    let (width, height) = decoded.dimensions();
    let img = rgba_from_bytes(decoded.as_raw(), width as usize, height as usize)
        .map_err(|e| format!("'{}': {e}", path.display()))?;
    Ok((img, width, height))
}

/// Naturalness is computed on the enhanced image (or the only image) when a
/// model is loaded; lightness order whenever an enhanced image is given.
fn assess(
    assessor: &QualityAssessor,
    original_path: &Path,
    enhanced_path: Option<&Path>,
) -> Result<Assessment, String> {
    let (original, width, height) = load_rgba(original_path)?;
    let enhanced = enhanced_path.map(load_rgba).transpose()?;

    let lightness_order = enhanced
        .as_ref()
        .map(|(enhanced, _, _)| assessor.lightness_order(original.as_ref(), enhanced.as_ref()))
        .transpose()
        .map_err(|e| format!("lightness order failed: {e}"))?;

    let naturalness = if assessor.model().is_some() {
        let target = enhanced.as_ref().map_or(&original, |(img, _, _)| img);
        Some(
            assessor
                .naturalness(target.as_ref())
                .map_err(|e| format!("naturalness failed: {e}"))?,
        )
    } else {
        None
    };

    Ok(Assessment {
        naturalness,
        lightness_order,
        width,
        height,
    })
}

fn naturalness_exceeded(cli: &Cli, assessment: &Assessment) -> bool {
    match (cli.max_naturalness, &assessment.naturalness) {
        (Some(max), Some(n)) => n.score > max,
        _ => false,
    }
}

fn lightness_order_exceeded(cli: &Cli, assessment: &Assessment) -> bool {
    match (cli.max_lightness_order, &assessment.lightness_order) {
        (Some(max), Some(l)) => l.score > max,
        _ => false,
    }
}

fn threshold_exceeded(cli: &Cli, assessment: &Assessment) -> bool {
    naturalness_exceeded(cli, assessment) || lightness_order_exceeded(cli, assessment)
}

fn has_threshold(cli: &Cli) -> bool {
    cli.max_naturalness.is_some() || cli.max_lightness_order.is_some()
}

fn get_format(cli: &Cli) -> OutputFormat {
    if cli.json {
        OutputFormat::Json
    } else if cli.quality {
        OutputFormat::Quality
    } else if cli.quiet {
        OutputFormat::Score
    } else {
        cli.format
    }
}

fn rating_color(rating: Rating) -> Color {
    let [r, g, b] = rating.color();
    Color::TrueColor { r, g, b }
}

/// Score text colored by its rating, plus the rating itself.
fn rated(metric: Metric, score: f64) -> (ColoredString, Rating, &'static str) {
    let scale = RatingScale::for_metric(metric);
    let rating = scale.rate(score);
    let text = format!("{score:.4}").color(rating_color(rating));
    (text, rating, scale.describe(rating))
}

fn metric_title(metric: Metric) -> &'static str {
    match metric {
        Metric::Naturalness => "Naturalness",
        Metric::LightnessOrder => "Lightness order",
    }
}

fn json_output(
    cli: &Cli,
    original: &Path,
    enhanced: Option<&Path>,
    assessment: &Assessment,
) -> JsonOutput {
    let naturalness = assessment.naturalness.as_ref().map(|n| {
        let scale = RatingScale::NATURALNESS;
        let rating = scale.rate(n.score);
        JsonNaturalness {
            score: n.score,
            quality_rating: rating.to_string(),
            quality_description: scale.describe(rating).to_string(),
            patches_used: n.patches_used,
            patches_total: n.patches_total,
        }
    });
    let lightness_order = assessment.lightness_order.as_ref().map(|l| {
        let scale = RatingScale::LIGHTNESS_ORDER;
        let rating = scale.rate(l.score);
        JsonLightnessOrder {
            score: l.score,
            quality_rating: rating.to_string(),
            quality_description: scale.describe(rating).to_string(),
            mismatches: l.mismatches,
            grid_step: l.grid.step,
            grid_rows: l.grid.rows,
            grid_cols: l.grid.cols,
        }
    });

    JsonOutput {
        original: original.display().to_string(),
        enhanced: enhanced.map(|p| p.display().to_string()),
        width: assessment.width,
        height: assessment.height,
        naturalness,
        lightness_order,
        params: JsonParams {
            patch_size: cli.patch_size,
            window: cli.window,
        },
        threshold_exceeded: has_threshold(cli).then(|| threshold_exceeded(cli, assessment)),
    }
}

/// Computed scores, naturalness first.
fn scores(assessment: &Assessment) -> Vec<(Metric, f64)> {
    let mut out = Vec::with_capacity(2);
    if let Some(n) = &assessment.naturalness {
        out.push((Metric::Naturalness, n.score));
    }
    if let Some(l) = &assessment.lightness_order {
        out.push((Metric::LightnessOrder, l.score));
    }
    out
}

fn output_single_result(cli: &Cli, assessment: &Assessment) -> Result<(), String> {
    let format = get_format(cli);

    let limits = |metric: Metric| match metric {
        Metric::Naturalness => cli.max_naturalness,
        Metric::LightnessOrder => cli.max_lightness_order,
    };
    let entries: Vec<(Metric, f64, Option<f64>)> = scores(assessment)
        .into_iter()
        .map(|(metric, score)| (metric, score, limits(metric)))
        .collect();

    match format {
        OutputFormat::Score => {
            for (_, score, _) in &entries {
                println!("{score:.6}");
            }
        }
        OutputFormat::Text => {
            for &(metric, score, limit) in &entries {
                let (score_str, _, _) = rated(metric, score);
                match limit {
                    Some(max) if score > max => println!(
                        "{} score: {} (exceeds threshold {})",
                        metric_title(metric),
                        score_str,
                        max
                    ),
                    _ => println!("{} score: {}", metric_title(metric), score_str),
                }
            }
        }
        OutputFormat::Quality => {
            for &(metric, score, limit) in &entries {
                let (score_str, rating, description) = rated(metric, score);
                println!(
                    "{} score: {} ({})",
                    metric_title(metric),
                    score_str,
                    rating.label().color(rating_color(rating)).bold()
                );
                println!("  Quality: {description}");

                if let Some(max) = limit {
                    if score > max {
                        println!(
                            "  {}",
                            format!("Threshold exceeded: {score:.4} > {max}").red().bold()
                        );
                    } else {
                        println!(
                            "  {}",
                            format!("Threshold passed: {score:.4} <= {max}").green()
                        );
                    }
                }
            }
        }
        OutputFormat::Json => {
            let output = json_output(cli, &cli.original, cli.enhanced.as_deref(), assessment);
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| format!("failed to serialize JSON: {e}"))?;
            println!("{json}");
        }
    }

    Ok(())
}

fn output_batch_results(cli: &Cli, results: &[ComparisonResult]) -> Result<(), String> {
    let format = get_format(cli);

    let mut naturalness_scores: Vec<f64> = Vec::new();
    let mut lightness_scores: Vec<f64> = Vec::new();
    let mut passed = 0;
    let mut failed = 0;
    let mut errors = 0;

    for cr in results {
        match &cr.result {
            Ok(a) => {
                if let Some(n) = &a.naturalness {
                    naturalness_scores.push(n.score);
                }
                if let Some(l) = &a.lightness_order {
                    lightness_scores.push(l.score);
                }
                if threshold_exceeded(cli, a) {
                    failed += 1;
                } else {
                    passed += 1;
                }
            }
            Err(_) => errors += 1,
        }
    }

    let naturalness_stats = ScoreStats::from_scores(&naturalness_scores);
    let lightness_stats = ScoreStats::from_scores(&lightness_scores);

    match format {
        OutputFormat::Json => {
            let json_results = results
                .iter()
                .filter_map(|cr| {
                    cr.result
                        .as_ref()
                        .ok()
                        .map(|a| json_output(cli, &cr.original, Some(&cr.enhanced), a))
                })
                .collect();

            let batch_output = BatchJsonOutput {
                results: json_results,
                summary: BatchSummary {
                    total: results.len(),
                    passed,
                    failed,
                    errors,
                    naturalness: naturalness_stats,
                    lightness_order: lightness_stats,
                },
            };

            let json = serde_json::to_string_pretty(&batch_output)
                .map_err(|e| format!("failed to serialize JSON: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Score => {
            for cr in results {
                if let Ok(a) = &cr.result {
                    let line: Vec<String> = scores(a)
                        .iter()
                        .map(|(_, score)| format!("{score:.6}"))
                        .collect();
                    println!("{}", line.join(" "));
                }
            }
        }
        OutputFormat::Text | OutputFormat::Quality => {
            let name_width = results
                .iter()
                .map(|cr| cr.original.file_name().unwrap_or_default().len())
                .max()
                .unwrap_or(20);

            for cr in results {
                let filename = cr
                    .original
                    .file_name()
                    .and_then(|s| s.to_str())
                    .unwrap_or("?");

                match &cr.result {
                    Ok(a) => {
                        let columns: Vec<String> = scores(a)
                            .iter()
                            .map(|&(metric, score)| {
                                let (score_str, _, _) = rated(metric, score);
                                format!("{}={:>8}", short_name(metric), score_str)
                            })
                            .collect();

                        let status = if has_threshold(cli) {
                            if threshold_exceeded(cli, a) {
                                "FAIL".red().bold()
                            } else {
                                "PASS".green().bold()
                            }
                        } else {
                            worst_rating(a).map_or_else(
                                || "-".normal(),
                                |r| r.label().color(rating_color(r)).bold(),
                            )
                        };

                        println!(
                            "{:width$}  {}  {}",
                            filename,
                            columns.join("  "),
                            status,
                            width = name_width
                        );
                    }
                    Err(e) => {
                        println!(
                            "{:width$}  {:>8}  {}",
                            filename,
                            "-".dimmed(),
                            format!("ERROR: {e}").red(),
                            width = name_width
                        );
                    }
                }
            }

            if cli.summary || results.len() > 1 {
                println!();
                println!("{}", "Summary:".bold());
                println!(
                    "  Total: {}  Passed: {}  Failed: {}  Errors: {}",
                    results.len(),
                    passed.to_string().green(),
                    if failed > 0 {
                        failed.to_string().red()
                    } else {
                        failed.to_string().normal()
                    },
                    if errors > 0 {
                        errors.to_string().red()
                    } else {
                        errors.to_string().normal()
                    }
                );
                for (metric, stats) in [
                    (Metric::Naturalness, naturalness_stats),
                    (Metric::LightnessOrder, lightness_stats),
                ] {
                    if let Some(s) = stats {
                        println!(
                            "  {}: min={:.4}  max={:.4}  mean={:.4}",
                            metric_title(metric),
                            s.min,
                            s.max,
                            s.mean
                        );
                    }
                }
            }
        }
    }

    let _ = io::stdout().flush();

    Ok(())
}

fn short_name(metric: Metric) -> &'static str {
    match metric {
        Metric::Naturalness => "N",
        Metric::LightnessOrder => "LOE",
    }
}

fn worst_rating(assessment: &Assessment) -> Option<Rating> {
    scores(assessment)
        .iter()
        .map(|&(metric, score)| RatingScale::for_metric(metric).rate(score))
        .max()
}
