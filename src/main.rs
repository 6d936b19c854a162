use clap::{Parser, Subcommand};
use square_thumb::error::ErrorCode;
use square_thumb::types::{ResizeRequest, ResizeResponse, SourceRef};
use square_thumb::{config, output, pipeline, storage, validate};
use std::path::PathBuf;
use std::process::ExitCode;

/// Release builds report the crate version; dev builds report the git hash
/// stamped by build.rs.
fn version_string() -> &'static str {
    if env!("ON_RELEASE_TAG") == "true" {
        return env!("CARGO_PKG_VERSION");
    }
    match env!("GIT_HASH") {
        "" => "dev (no git)",
        // Leaked exactly once, at startup
        hash => Box::leak(format!("dev-{hash}").into_boxed_str()),
    }
}

/// Shared flags for commands that take a source image.
#[derive(clap::Args, Clone)]
struct SourceArgs {
    /// Source image file
    file: PathBuf,

    /// Resize mode: 'fit' pads to a square, 'crop' center-crops (default: fit)
    #[arg(long)]
    mode: Option<String>,
}

#[derive(Parser)]
#[command(name = "square-thumb")]
#[command(about = "Square thumbnail converter")]
#[command(long_about = "\
Square thumbnail converter

Converts an image into a fixed-size square rendition and writes it next to
the configured output directory. Two modes:

  fit    scale so the longer edge matches the target, center on a padded
         square canvas (default)
  crop   cut a centered square from the source and scale it to the target;
         sources smaller than the target are stretched whole

Output files are named {stem}_{size}x{size}.{ext}, with a _crop marker in
crop mode, e.g. cat.jpg → resized/cat_512x512_crop.jpg.

Settings come from config.toml in the working directory (see 'square-thumb
gen-config'); a missing file means stock defaults.

Exit status:
  0  converted
  2  bad request (validation, unsupported format, too large, undecodable)
  3  source file not found
  1  anything else (I/O, processing, internal)")]
#[command(version = version_string())]
struct Cli {
    /// Settings file; missing file falls back to stock defaults
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert an image to a square thumbnail
    Resize {
        #[command(flatten)]
        source: SourceArgs,

        /// Target square edge in pixels, overriding the configured size
        #[arg(long)]
        size: Option<u32>,

        /// Print the result envelope as JSON instead of progress lines
        #[arg(long)]
        json: bool,

        /// Include internal failure details in error output
        #[arg(long)]
        verbose: bool,
    },
    /// Run the request checks without converting anything
    Check {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Command::Resize {
            source,
            size,
            json,
            verbose,
        } => {
            let settings = match config::load_settings(&cli.config) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("config error: {e}");
                    return ExitCode::FAILURE;
                }
            };
            let store = storage::FsStore::new();
            let request = ResizeRequest {
                file_path: source.file,
                mode: source.mode,
                target_size: size,
                output_format: None,
            };

            let response = if json {
                pipeline::run_guarded(&store, &settings, &request, None, verbose)
            } else {
                let (tx, rx) = std::sync::mpsc::channel();
                let printer = std::thread::spawn(move || {
                    for event in rx {
                        output::print_stage_event(&event);
                    }
                });
                let response =
                    pipeline::run_guarded(&store, &settings, &request, Some(&tx), verbose);
                drop(tx);
                printer.join().unwrap();
                response
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&response).unwrap());
            } else {
                output::print_response(&response);
            }
            exit_code(&response)
        }
        Command::Check { source } => {
            let settings = match config::load_settings(&cli.config) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("config error: {e}");
                    return ExitCode::FAILURE;
                }
            };
            let store = storage::FsStore::new();
            let request = ResizeRequest {
                file_path: source.file,
                mode: source.mode,
                target_size: None,
                output_format: None,
            };

            match validate::validate(
                &request,
                SourceRef::Path(&request.file_path),
                &settings,
                &store,
            ) {
                Ok(()) => {
                    println!("ok: {} passes all checks", request.file_path.display());
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    let response = ResizeResponse::failure(&err);
                    output::print_response(&response);
                    exit_code(&response)
                }
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            ExitCode::SUCCESS
        }
    }
}

/// Map the response onto an exit status, 4xx/5xx style.
fn exit_code(response: &ResizeResponse) -> ExitCode {
    match response.error_code {
        None => ExitCode::SUCCESS,
        Some(ErrorCode::FileNotFound) => ExitCode::from(3),
        Some(code) if code.is_request_error() => ExitCode::from(2),
        Some(_) => ExitCode::FAILURE,
    }
}
