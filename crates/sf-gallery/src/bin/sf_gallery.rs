use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use image::GrayImage;
use serde::{Deserialize, Serialize};
use sf_brush::DisplacementBrush;
use sf_core::{BorderMode, Interval, NdField, Point2i, Vec2d};
use sf_kernel::GaussianSmoother;
use sf_slice::{ClampRange, SliceConfig, SliceProcessor};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "sf_gallery")]
#[command(about = "Run surface-fields engines on external fixtures")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Paint Gaussian strokes into a zero displacement field.
    #[command(name = "brush")]
    Brush(BrushArgs),
    /// Smooth a stack of grayscale slices plane by plane.
    #[command(name = "smooth-stack")]
    SmoothStack(SmoothArgs),
}

#[derive(Args, Debug, Clone)]
struct BrushArgs {
    #[arg(long, default_value_t = 256)]
    width: usize,
    #[arg(long, default_value_t = 256)]
    height: usize,
    /// JSON file with `{"strokes": [{"x", "y", "dx", "dy", "sigma_x", "sigma_y"}]}`.
    #[arg(long, required = true)]
    strokes: PathBuf,
    #[arg(long, default_value = "docs/fig/raw")]
    out: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BorderArg {
    Clamp,
    Reflect101,
    Zero,
}

#[derive(Args, Debug, Clone)]
struct SmoothArgs {
    /// Equal-size grayscale images, one per slice along axis 2.
    #[arg(long, required = true, num_args = 1..)]
    input: Vec<PathBuf>,
    #[arg(long, default_value_t = 2.0)]
    sigma: f32,
    /// Halo in pixels; defaults to the kernel radius.
    #[arg(long)]
    padding: Option<usize>,
    #[arg(long, value_enum, default_value_t = BorderArg::Reflect101)]
    border: BorderArg,
    #[arg(long, default_value_t = 0.0)]
    min: f32,
    #[arg(long, default_value_t = 255.0)]
    max: f32,
    #[arg(long, default_value = "docs/fig/raw")]
    out: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StrokeDto {
    x: i64,
    y: i64,
    dx: f64,
    dy: f64,
    sigma_x: f64,
    sigma_y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StrokeFile {
    strokes: Vec<StrokeDto>,
}

#[derive(Debug, Clone, Serialize)]
struct FieldStats {
    min: f64,
    max: f64,
    touched: usize,
}

#[derive(Debug, Clone, Serialize)]
struct MetaBrush {
    width: usize,
    height: usize,
    strokes: Vec<StrokeDto>,
    dx: FieldStats,
    dy: FieldStats,
    max_magnitude: f64,
}

#[derive(Debug, Clone, Serialize)]
struct MetaSmooth {
    width: usize,
    height: usize,
    slices: usize,
    sigma: f32,
    kernel_radius: usize,
    padding: usize,
    border: &'static str,
    clamp: [f32; 2],
    inputs: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Brush(args) => run_brush(args),
        Command::SmoothStack(args) => run_smooth_stack(args),
    }
}

fn run_brush(args: BrushArgs) -> Result<()> {
    ensure_file_exists(&args.strokes, "strokes")?;
    let strokes: StrokeFile = read_json(&args.strokes)?;
    let case_dir = prepare_case_dir(&args.out, "brush")?;

    let iv = Interval::from_dims(&[args.width, args.height, 2])
        .context("field dimensions must be non-zero")?;
    let mut field = NdField::new_fill(iv, 0.0f64);

    for (i, s) in strokes.strokes.iter().enumerate() {
        let brush = DisplacementBrush::new([s.sigma_x, s.sigma_y])
            .with_context(|| format!("stroke {i}: invalid sigma"))?;
        brush
            .apply(&mut field, Point2i::new(s.x, s.y), Vec2d::new(s.dx, s.dy))
            .with_context(|| format!("applying stroke {i}"))?;
        info!(stroke = i, x = s.x, y = s.y, "stroke applied");
    }

    let (w, h) = (args.width, args.height);
    let plane_len = w * h;
    let dx = &field.data()[..plane_len];
    let dy = &field.data()[plane_len..];
    let magnitude: Vec<f64> = dx
        .iter()
        .zip(dy)
        .map(|(&x, &y)| Vec2d::new(x, y).norm())
        .collect();

    save_luma_raw(case_dir.join("dx.png"), w, h, f64_to_u8_vis(dx))?;
    save_luma_raw(case_dir.join("dy.png"), w, h, f64_to_u8_vis(dy))?;
    save_luma_raw(case_dir.join("magnitude.png"), w, h, f64_to_u8_vis(&magnitude))?;

    write_json(
        case_dir.join("meta.json"),
        &MetaBrush {
            width: w,
            height: h,
            strokes: strokes.strokes,
            dx: stats(dx),
            dy: stats(dy),
            max_magnitude: magnitude.iter().copied().fold(0.0, f64::max),
        },
    )?;

    Ok(())
}

fn run_smooth_stack(args: SmoothArgs) -> Result<()> {
    let case_dir = prepare_case_dir(&args.out, "smooth_stack")?;

    let slices = args
        .input
        .iter()
        .map(|p| load_input_u8(p))
        .collect::<Result<Vec<_>>>()?;
    let (w, h) = slices[0].dimensions();
    for (img, path) in slices.iter().zip(&args.input) {
        if img.dimensions() != (w, h) {
            bail!(
                "slice {} has dimensions {:?}, expected ({w}, {h}).",
                path.display(),
                img.dimensions()
            );
        }
    }

    let mut data = Vec::with_capacity(w as usize * h as usize * slices.len());
    for img in &slices {
        data.extend_from_slice(img.as_raw());
    }
    let input = NdField::from_dims(&[w as usize, h as usize, slices.len()], data)
        .context("constructing input volume")?;
    let mut output = NdField::new_fill(input.interval().clone(), 0u8);

    let mut smoother = GaussianSmoother::new(args.sigma).context("invalid sigma")?;
    let padding = args.padding.unwrap_or(smoother.radius());
    let cfg = SliceConfig {
        padding,
        clamp: ClampRange::new(args.min, args.max).context("invalid clamp range")?,
    };
    let border = match args.border {
        BorderArg::Clamp => BorderMode::Clamp,
        BorderArg::Reflect101 => BorderMode::Reflect101,
        BorderArg::Zero => BorderMode::Constant(0u8),
    };
    let plane_border = BorderMode::Clamp;
    let source = input.extended(border);

    SliceProcessor::new()
        .process(&source, &mut output, &cfg, |plane| {
            smoother.apply(plane, &plane_border)
        })
        .context("processing slices")?;

    let plane_len = w as usize * h as usize;
    for (k, chunk) in output.data().chunks(plane_len).enumerate() {
        save_luma_raw(
            case_dir.join(format!("slice_{k}.png")),
            w as usize,
            h as usize,
            chunk.to_vec(),
        )?;
    }

    write_json(
        case_dir.join("meta.json"),
        &MetaSmooth {
            width: w as usize,
            height: h as usize,
            slices: slices.len(),
            sigma: smoother.sigma(),
            kernel_radius: smoother.radius(),
            padding,
            border: source.border().label(),
            clamp: [cfg.clamp.min(), cfg.clamp.max()],
            inputs: args.input.iter().map(|p| p.display().to_string()).collect(),
        },
    )?;

    info!(slices = slices.len(), dir = %case_dir.display(), "smoothed stack written");
    Ok(())
}

fn prepare_case_dir(out: &Path, case_name: &str) -> Result<PathBuf> {
    let case_dir = out.join(case_name);
    fs::create_dir_all(&case_dir)
        .with_context(|| format!("creating output directory {}", case_dir.display()))?;
    Ok(case_dir)
}

fn load_input_u8(path: &Path) -> Result<GrayImage> {
    ensure_file_exists(path, "input")?;
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    Ok(dyn_img.to_luma8())
}

fn save_luma_raw(path: PathBuf, width: usize, height: usize, data: Vec<u8>) -> Result<()> {
    let gray = GrayImage::from_raw(width as u32, height as u32, data)
        .context("constructing GrayImage from raw bytes")?;
    gray.save(&path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn f64_to_u8_vis(data: &[f64]) -> Vec<u8> {
    if data.is_empty() {
        return Vec::new();
    }

    let (min_v, max_v) = data
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));

    if (max_v - min_v).abs() < 1e-12 {
        return vec![0u8; data.len()];
    }

    let scale = 255.0 / (max_v - min_v);
    data.iter()
        .map(|&v| ((v - min_v) * scale).round().clamp(0.0, 255.0) as u8)
        .collect()
}

fn stats(data: &[f64]) -> FieldStats {
    FieldStats {
        min: data.iter().copied().fold(f64::INFINITY, f64::min),
        max: data.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        touched: data.iter().filter(|&&v| v != 0.0).count(),
    }
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}
