//! Example: drag a displacement brush along a line and smooth the result.
//!
//! Paints `--steps` strokes between two points into a zero two-channel
//! displacement field, then runs a Gaussian smoother over both channel planes
//! with the slice engine. Writes a JSON profile of the row through the
//! stroke path before and after smoothing.
//!
//! Run from the workspace root:
//!   cargo run -p surface-fields --example brush_stroke -- --help
//!   cargo run -p surface-fields --example brush_stroke

use std::time::Instant;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use serde::Serialize;
use surface_fields::{
    BorderMode, DisplacementBrush, GaussianSmoother, Interval, NdField, Point2i, SliceConfig,
    Vec2d, process_slices,
};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Paint a displacement stroke and smooth it slice by slice")]
struct Args {
    #[arg(long, default_value_t = 128)]
    width: usize,

    #[arg(long, default_value_t = 64)]
    height: usize,

    /// Number of brush applications along the path
    #[arg(long, default_value_t = 24)]
    steps: usize,

    /// Brush sigma on both plane axes
    #[arg(long, default_value_t = 3.0)]
    brush_sigma: f64,

    /// Displacement added per application, horizontal channel
    #[arg(long, default_value_t = 0.25)]
    dx: f64,

    /// Displacement added per application, vertical channel
    #[arg(long, default_value_t = -0.5)]
    dy: f64,

    /// Sigma of the post-smoothing pass
    #[arg(long, default_value_t = 1.5)]
    smooth_sigma: f32,

    /// Output JSON path
    #[arg(long, default_value = "brush_stroke.json")]
    out: String,
}

// ── JSON DTOs ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ProfileDto {
    x: i64,
    dx: f64,
    dy: f64,
    dx_smoothed: f64,
    dy_smoothed: f64,
}

#[derive(Serialize)]
struct Report {
    width: usize,
    height: usize,
    steps: usize,
    row: i64,
    paint_ms: f64,
    smooth_ms: f64,
    profile: Vec<ProfileDto>,
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    ensure!(args.steps > 0, "steps must be > 0");

    let iv = Interval::from_dims(&[args.width, args.height, 2]).context("field dimensions")?;
    let mut field = NdField::new_fill(iv.clone(), 0.0f64);
    let brush = DisplacementBrush::new([args.brush_sigma; 2]).context("brush sigma")?;

    let row = (args.height / 2) as i64;
    let x0 = (args.width / 4) as i64;
    let x1 = (3 * args.width / 4) as i64;
    let delta = Vec2d::new(args.dx, args.dy);

    let t0 = Instant::now();
    for i in 0..args.steps {
        let t = if args.steps == 1 {
            0.0
        } else {
            i as f64 / (args.steps - 1) as f64
        };
        let x = x0 + ((x1 - x0) as f64 * t).round() as i64;
        brush
            .apply(&mut field, Point2i::new(x, row), delta)
            .with_context(|| format!("stroke {i}"))?;
    }
    let paint_ms = t0.elapsed().as_secs_f64() * 1e3;

    let mut smoother = GaussianSmoother::new(args.smooth_sigma).context("smoothing sigma")?;
    let cfg = SliceConfig {
        padding: smoother.radius(),
        ..SliceConfig::default()
    };
    let mut smoothed = NdField::new_fill(iv, 0.0f64);

    let t0 = Instant::now();
    process_slices(
        &field.extended(BorderMode::Reflect101),
        &mut smoothed,
        &cfg,
        |plane| smoother.apply(plane, &BorderMode::Clamp),
    )
    .context("smoothing channels")?;
    let smooth_ms = t0.elapsed().as_secs_f64() * 1e3;

    println!(
        "painted {} strokes in {paint_ms:.2} ms, smoothed in {smooth_ms:.2} ms",
        args.steps
    );

    let read = |f: &NdField<f64>, x: i64, c: i64| f.get(&[x, row, c]).copied().unwrap_or(0.0);
    let profile = (0..args.width as i64)
        .map(|x| ProfileDto {
            x,
            dx: read(&field, x, 0),
            dy: read(&field, x, 1),
            dx_smoothed: read(&smoothed, x, 0),
            dy_smoothed: read(&smoothed, x, 1),
        })
        .collect();

    let report = Report {
        width: args.width,
        height: args.height,
        steps: args.steps,
        row,
        paint_ms,
        smooth_ms,
        profile,
    };

    let out_file =
        std::fs::File::create(&args.out).with_context(|| format!("creating {}", args.out))?;
    serde_json::to_writer_pretty(out_file, &report)
        .with_context(|| format!("writing JSON to {}", args.out))?;

    println!("profile written to {}", args.out);
    Ok(())
}
