use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use mediathumb::{
    FfmpegLogLevel, ImageThumbnailer, ResizeFilter, Size, Thumbnail, ThumbnailError,
    ThumbnailOptions, VideoFrameExtractor,
};
use serde_json::json;

const CLI_AFTER_HELP: &str = "Examples:\n  mediathumb image photo.jpg --max-dimension 320 --out thumb.png\n  mediathumb video clip.mp4 --out still.jpg --max-width 640 --max-height 480 --json\n  mediathumb check-video clip.mov\n  mediathumb batch a.jpg b.png c.webp --out-dir thumbs --progress\n  mediathumb completions zsh > _mediathumb";

#[derive(Debug, Parser)]
#[command(
    name = "mediathumb",
    version,
    about = "Generate bounded preview thumbnails from images and videos",
    after_help = CLI_AFTER_HELP
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Parser, Clone, Default)]
struct GlobalOptions {
    /// Show additional output.
    #[arg(long)]
    verbose: bool,

    /// Allow overwriting existing output files.
    #[arg(long)]
    overwrite: bool,

    /// FFmpeg log level (quiet, fatal, error, warning, info, debug).
    #[arg(long)]
    log_level: Option<String>,

    /// Resize kernel (nearest, triangle).
    #[arg(long)]
    filter: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Thumbnail a still image.
    #[command(
        about = "Thumbnail an image",
        after_help = "Examples:\n  mediathumb image photo.jpg --max-dimension 500 --out thumb.png"
    )]
    Image {
        /// Input image path.
        input: PathBuf,
        /// Output image path; the format follows the extension.
        #[arg(long)]
        out: PathBuf,
        /// Length of the longer thumbnail side in pixels.
        #[arg(long, default_value_t = 512.0)]
        max_dimension: f64,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Capture a still frame from a video.
    #[command(
        about = "Thumbnail a video",
        after_help = "Examples:\n  mediathumb video clip.mp4 --out still.jpg\n  mediathumb video clip.mp4 --out still.jpg --max-width 320 --max-height 320"
    )]
    Video {
        /// Input video path.
        input: PathBuf,
        /// Output image path; the format follows the extension.
        #[arg(long)]
        out: PathBuf,
        /// Bounding width in pixels (capped at 1024).
        #[arg(long, default_value_t = 1024.0)]
        max_width: f64,
        /// Bounding height in pixels (capped at 1024).
        #[arg(long, default_value_t = 1024.0)]
        max_height: f64,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Check whether a video can be thumbnailed.
    #[command(about = "Validate a video")]
    CheckVideo {
        /// Input video path.
        input: PathBuf,
    },

    /// Thumbnail many images into a directory.
    #[command(
        about = "Thumbnail a batch of images",
        after_help = "Examples:\n  mediathumb batch *.jpg --out-dir thumbs --max-dimension 256 --progress"
    )]
    Batch {
        /// Input image paths.
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Output directory; each thumbnail is written as `<file name>.png`.
        #[arg(long)]
        out_dir: PathBuf,
        /// Length of the longer thumbnail side in pixels.
        #[arg(long, default_value_t = 256.0)]
        max_dimension: f64,
        /// Show a progress bar.
        #[arg(long)]
        progress: bool,
    },

    /// Generate shell completion scripts.
    #[command(about = "Generate shell completion script")]
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn parse_filter(value: &str) -> Option<ResizeFilter> {
    match value.to_ascii_lowercase().as_str() {
        "nearest" => Some(ResizeFilter::Nearest),
        "triangle" | "bilinear" | "linear" => Some(ResizeFilter::Triangle),
        _ => None,
    }
}

/// PNG file names for a batch, keeping the source extension so `a.jpg` and
/// `a.png` do not collide. Repeated names get a numeric suffix.
fn output_names(inputs: &[PathBuf]) -> Vec<String> {
    let mut taken = HashSet::new();
    inputs
        .iter()
        .map(|input| {
            let base = input
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "thumbnail".to_string());
            let mut name = format!("{base}.png");
            let mut suffix = 1;
            while !taken.insert(name.clone()) {
                name = format!("{base}-{suffix}.png");
                suffix += 1;
            }
            name
        })
        .collect()
}

#[cfg(feature = "rayon")]
fn thumbnail_batch(
    thumbnailer: &ImageThumbnailer,
    inputs: &[PathBuf],
    max_dimension: f64,
) -> impl Iterator<Item = Result<Thumbnail, ThumbnailError>> {
    thumbnailer.thumbnail_many(inputs, max_dimension).into_iter()
}

#[cfg(not(feature = "rayon"))]
fn thumbnail_batch(
    thumbnailer: &ImageThumbnailer,
    inputs: &[PathBuf],
    max_dimension: f64,
) -> impl Iterator<Item = Result<Thumbnail, ThumbnailError>> {
    inputs
        .iter()
        .map(move |input| thumbnailer.thumbnail(input, max_dimension))
}

fn ensure_writable_path(path: &Path, overwrite: bool) -> Result<(), Box<dyn std::error::Error>> {
    if path.exists() {
        if overwrite {
            eprintln!(
                "{} {}",
                "warning:".yellow().bold(),
                format!("overwriting {}", path.display()).yellow()
            );
        } else {
            return Err(format!(
                "output already exists: {} (use --overwrite to replace)",
                path.display()
            )
            .into());
        }
    }
    Ok(())
}

fn thumbnail_options(
    global: &GlobalOptions,
) -> Result<ThumbnailOptions, Box<dyn std::error::Error>> {
    let mut options = ThumbnailOptions::new();
    if let Some(filter) = &global.filter {
        let parsed = parse_filter(filter).ok_or(format!("unsupported --filter: {filter}"))?;
        options = options.with_resize_filter(parsed);
    }
    Ok(options)
}

fn apply_global_options(global: &GlobalOptions) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(level) = &global.log_level {
        let parsed: FfmpegLogLevel = level.parse()?;
        mediathumb::set_ffmpeg_log_level(parsed);
    }
    Ok(())
}

fn report(
    thumbnail: &Thumbnail,
    input: &Path,
    out: &Path,
    as_json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if as_json {
        let source = thumbnail.source_size();
        let payload = json!({
            "input": input.display().to_string(),
            "output": out.display().to_string(),
            "width": thumbnail.width(),
            "height": thumbnail.height(),
            "source_width": source.width,
            "source_height": source.height,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!(
            "{} {} ({}×{})",
            "saved".green().bold(),
            out.display(),
            thumbnail.width(),
            thumbnail.height()
        );
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    apply_global_options(&cli.global)?;
    let options = thumbnail_options(&cli.global)?;

    match cli.command {
        Commands::Image {
            input,
            out,
            max_dimension,
            json,
        } => {
            ensure_writable_path(&out, cli.global.overwrite)?;
            let thumbnail = ImageThumbnailer::new()
                .with_options(options)
                .thumbnail(&input, max_dimension)?;
            thumbnail.image().save(&out)?;
            report(&thumbnail, &input, &out, json)?;
        }
        Commands::Video {
            input,
            out,
            max_width,
            max_height,
            json,
        } => {
            ensure_writable_path(&out, cli.global.overwrite)?;
            let thumbnail = VideoFrameExtractor::new()
                .with_options(options)
                .thumbnail_with_max_size(&input, Size::new(max_width, max_height))?;
            thumbnail.image().save(&out)?;
            report(&thumbnail, &input, &out, json)?;
        }
        Commands::CheckVideo { input } => {
            if VideoFrameExtractor::new().is_valid_video(&input) {
                println!("{} {}", "valid".green().bold(), input.display());
            } else {
                println!("{} {}", "invalid".red().bold(), input.display());
                std::process::exit(1);
            }
        }
        Commands::Batch {
            inputs,
            out_dir,
            max_dimension,
            progress,
        } => {
            fs::create_dir_all(&out_dir)?;
            let thumbnailer = ImageThumbnailer::new().with_options(options);

            let bar = if progress {
                let bar = ProgressBar::new(inputs.len() as u64);
                bar.set_style(
                    ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")?
                        .progress_chars("##-"),
                );
                Some(bar)
            } else {
                None
            };

            let outputs: Vec<PathBuf> = output_names(&inputs)
                .into_iter()
                .map(|name| out_dir.join(name))
                .collect();
            let results = thumbnail_batch(&thumbnailer, &inputs, max_dimension);

            let mut failures = 0usize;
            for ((input, out), result) in inputs.iter().zip(&outputs).zip(results) {
                let outcome = ensure_writable_path(out, cli.global.overwrite).and_then(|()| {
                    let thumbnail = result?;
                    thumbnail.image().save(out)?;
                    Ok(())
                });

                match outcome {
                    Ok(()) => {
                        if cli.global.verbose {
                            eprintln!("saved {} -> {}", input.display(), out.display());
                        }
                    }
                    Err(error) => {
                        failures += 1;
                        let message = format!("{}: {error}", input.display());
                        match &bar {
                            Some(bar) => bar.println(format!("{} {message}", "error:".red().bold())),
                            None => eprintln!("{} {message}", "error:".red().bold()),
                        }
                    }
                }

                if let Some(bar) = &bar {
                    bar.inc(1);
                }
            }

            if let Some(bar) = bar {
                bar.finish_with_message("done");
            }

            println!(
                "{} {} of {} images into {}",
                "thumbnailed".green().bold(),
                inputs.len() - failures,
                inputs.len(),
                out_dir.display()
            );
            if failures > 0 {
                return Err(format!("{failures} images failed").into());
            }
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "mediathumb", &mut std::io::stdout());
        }
    }

    Ok(())
}

fn main() {
    if let Err(error) = run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
