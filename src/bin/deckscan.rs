//! CLI binary for deckscan.
//!
//! A thin shim over the library crate that maps CLI flags to the stage
//! configs and prints a summary.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use deckscan::{convert_documents, detect_logos, ConvertConfig, DetectConfig};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Render every deck in ./data to per-slide PNGs in ./slides
  deckscan convert

  # Custom folders and resolution
  deckscan convert --input decks --output rendered --dpi 150

  # Detect logos in every slide image, writing output/logos.txt
  export AZURE_OPENAI_API_KEY=...
  export AZURE_OPENAI_ENDPOINT=https://myresource.openai.azure.com
  export AZURE_OPENAI_DEPLOYMENT_ID=gpt-4o
  deckscan detect

  # Full run as JSON
  deckscan convert --json && deckscan detect --json

ENVIRONMENT VARIABLES:
  AZURE_OPENAI_API_KEY        Azure OpenAI API key (detect)
  AZURE_OPENAI_ENDPOINT       Azure OpenAI resource endpoint (detect)
  AZURE_OPENAI_DEPLOYMENT_ID  Vision-capable deployment id (detect)

SETUP:
  The convert stage needs LibreOffice (`soffice`) and poppler (`pdftoppm`)
  on PATH. On Debian/Ubuntu: apt install libreoffice poppler-utils.
"#;

/// Detect company logos in slide decks using Vision LLMs.
#[derive(Parser, Debug)]
#[command(
    name = "deckscan",
    version,
    about = "Detect company logos in slide decks using Vision LLMs",
    long_about = "Two-stage batch pipeline: `convert` renders .pptx decks to per-slide PNG \
images via LibreOffice and pdftoppm; `detect` sends each image to an Azure OpenAI \
vision deployment and logs the logos it reports.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "DECKSCAN_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "DECKSCAN_QUIET")]
    quiet: bool,

    /// Print the structured batch report as JSON instead of a summary.
    #[arg(long, global = true, env = "DECKSCAN_JSON")]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render every .pptx in the input directory to per-slide PNG images.
    Convert {
        /// Directory containing .pptx files.
        #[arg(short, long, env = "DECKSCAN_INPUT", default_value = "data")]
        input: PathBuf,

        /// Directory the {base}_slideN.png images are written to.
        #[arg(short, long, env = "DECKSCAN_OUTPUT", default_value = "slides")]
        output: PathBuf,

        /// Rasterisation resolution in DPI (72–600).
        #[arg(long, env = "DECKSCAN_DPI", default_value_t = 300,
              value_parser = clap::value_parser!(u32).range(72..=600))]
        dpi: u32,

        /// LibreOffice binary (some distributions use `libreoffice`).
        #[arg(long, env = "DECKSCAN_SOFFICE", default_value = "soffice")]
        soffice: String,

        /// Poppler pdftoppm binary.
        #[arg(long, env = "DECKSCAN_PDFTOPPM", default_value = "pdftoppm")]
        pdftoppm: String,
    },

    /// Detect logos in every .png slide image, appending to a text log.
    Detect {
        /// Directory containing slide PNG files.
        #[arg(short, long, env = "DECKSCAN_SLIDES", default_value = "slides")]
        slides: PathBuf,

        /// Detection log path (truncated at the start of every run).
        #[arg(short, long, env = "DECKSCAN_LOG", default_value = "output/logos.txt")]
        log: PathBuf,

        /// Azure OpenAI resource endpoint.
        #[arg(long, env = "AZURE_OPENAI_ENDPOINT")]
        endpoint: String,

        /// Azure OpenAI API key.
        #[arg(long, env = "AZURE_OPENAI_API_KEY", hide_env_values = true)]
        api_key: String,

        /// Azure OpenAI deployment id of a vision-capable model.
        #[arg(long, env = "AZURE_OPENAI_DEPLOYMENT_ID")]
        deployment: String,

        /// REST API version query parameter.
        #[arg(long, env = "AZURE_OPENAI_API_VERSION",
              default_value = deckscan::config::DEFAULT_API_VERSION)]
        api_version: String,

        /// Per-request timeout in seconds.
        #[arg(long, env = "DECKSCAN_API_TIMEOUT", default_value_t = 60)]
        timeout: u64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Convert {
            input,
            output,
            dpi,
            soffice,
            pdftoppm,
        } => {
            let config = ConvertConfig::builder()
                .input_dir(input)
                .output_dir(output)
                .dpi(dpi)
                .soffice_bin(soffice)
                .pdftoppm_bin(pdftoppm)
                .build()
                .context("Invalid configuration")?;

            let out = convert_documents(&config).await.context("Conversion failed")?;

            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&out).context("Failed to serialise output")?
                );
            } else if !cli.quiet {
                let s = &out.stats;
                eprintln!(
                    "{} {}/{} document(s)  {} slide image(s)  {}ms",
                    if s.failed_documents == 0 {
                        green("✔")
                    } else {
                        cyan("⚠")
                    },
                    bold(&s.converted_documents.to_string()),
                    s.total_documents,
                    s.total_slides,
                    s.total_duration_ms,
                );
                for doc in out.documents.iter().filter(|d| d.error.is_some()) {
                    if let Some(ref e) = doc.error {
                        eprintln!("  {} {}  {}", red("✗"), doc.document, red(&e.to_string()));
                    }
                }
            }
        }

        Command::Detect {
            slides,
            log,
            endpoint,
            api_key,
            deployment,
            api_version,
            timeout,
        } => {
            let config = DetectConfig::builder()
                .slides_dir(slides)
                .log_path(log)
                .endpoint(endpoint)
                .api_key(api_key)
                .deployment_id(deployment)
                .api_version(api_version)
                .timeout_secs(timeout)
                .build()
                .context("Invalid configuration")?;

            let out = detect_logos(&config).await.context("Detection failed")?;

            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&out).context("Failed to serialise output")?
                );
            } else if !cli.quiet {
                let s = &out.stats;
                eprintln!(
                    "{} {}/{} slide(s)  {}ms  →  {}",
                    if s.failed_slides == 0 {
                        green("✔")
                    } else {
                        cyan("⚠")
                    },
                    bold(&s.processed_slides.to_string()),
                    s.total_slides,
                    s.total_duration_ms,
                    bold(&out.log_path.display().to_string()),
                );
                for slide in out.slides.iter().filter(|r| r.error.is_some()) {
                    if let Some(ref e) = slide.error {
                        eprintln!("  {} {}", red("✗"), red(&e.to_string()));
                    }
                }
            }
        }
    }

    Ok(())
}
