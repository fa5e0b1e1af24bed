//! Configuration types for the two pipeline stages.
//!
//! Each stage takes an explicit config struct built through a validating
//! builder — there is no module-level state. Keeping every knob in one
//! struct makes it trivial to log a run's configuration and to diff two
//! runs to understand why their outputs differ.

use crate::error::DeckscanError;
use std::fmt;
use std::path::PathBuf;

/// Default Azure OpenAI REST API version used by the detector.
pub const DEFAULT_API_VERSION: &str = "2023-10-01-preview";

// ── Converter ────────────────────────────────────────────────────────────

/// Configuration for the presentation-to-PNG converter stage.
///
/// Built via [`ConvertConfig::builder()`] or [`ConvertConfig::default()`].
///
/// # Example
/// ```rust
/// use deckscan::ConvertConfig;
///
/// let config = ConvertConfig::builder()
///     .input_dir("data")
///     .output_dir("slides")
///     .dpi(300)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Directory scanned (non-recursively) for `.pptx` files. Default: `data`.
    pub input_dir: PathBuf,

    /// Directory the renamed `{base}_slideN.png` images land in. Default: `slides`.
    ///
    /// Created if absent. Re-running overwrites images with colliding names;
    /// stale images from a previous run are NOT removed.
    pub output_dir: PathBuf,

    /// Rasterisation resolution passed to pdftoppm via `-r`. Range: 72–600. Default: 300.
    ///
    /// 300 DPI keeps small logo marks legible to the vision model. Lower it
    /// for very large decks where upload size matters more than detail.
    pub dpi: u32,

    /// LibreOffice binary name or path. Default: `soffice`.
    ///
    /// Some distributions ship the headless binary as `libreoffice` instead.
    pub soffice_bin: String,

    /// Poppler pdftoppm binary name or path. Default: `pdftoppm`.
    pub pdftoppm_bin: String,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("data"),
            output_dir: PathBuf::from("slides"),
            dpi: 300,
            soffice_bin: "soffice".to_string(),
            pdftoppm_bin: "pdftoppm".to_string(),
        }
    }
}

impl ConvertConfig {
    /// Create a new builder for `ConvertConfig`.
    pub fn builder() -> ConvertConfigBuilder {
        ConvertConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConvertConfig`].
#[derive(Debug)]
pub struct ConvertConfigBuilder {
    config: ConvertConfig,
}

impl ConvertConfigBuilder {
    pub fn input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.input_dir = dir.into();
        self
    }

    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    pub fn dpi(mut self, dpi: u32) -> Self {
        self.config.dpi = dpi;
        self
    }

    pub fn soffice_bin(mut self, bin: impl Into<String>) -> Self {
        self.config.soffice_bin = bin.into();
        self
    }

    pub fn pdftoppm_bin(mut self, bin: impl Into<String>) -> Self {
        self.config.pdftoppm_bin = bin.into();
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConvertConfig, DeckscanError> {
        let c = &self.config;
        if c.dpi < 72 || c.dpi > 600 {
            return Err(DeckscanError::InvalidConfig(format!(
                "DPI must be 72–600, got {}",
                c.dpi
            )));
        }
        if c.soffice_bin.is_empty() || c.pdftoppm_bin.is_empty() {
            return Err(DeckscanError::InvalidConfig(
                "Tool binary names must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}

// ── Detector ─────────────────────────────────────────────────────────────

/// Configuration for the logo-detection stage.
///
/// Credentials are plain fields here; the CLI fills them from the
/// `AZURE_OPENAI_*` environment variables. Library callers pass them
/// explicitly.
#[derive(Clone)]
pub struct DetectConfig {
    /// Directory scanned (non-recursively) for `.png` slide images. Default: `slides`.
    pub slides_dir: PathBuf,

    /// Detection log path. Default: `output/logos.txt`.
    ///
    /// Truncated at the start of every run, then appended to with one
    /// `{filename}: {reply}` line per successfully processed image.
    pub log_path: PathBuf,

    /// Azure OpenAI resource endpoint, e.g. `https://myresource.openai.azure.com`.
    pub endpoint: String,

    /// Azure OpenAI API key, sent as the `api-key` header.
    pub api_key: String,

    /// Azure OpenAI deployment id of a vision-capable model.
    pub deployment_id: String,

    /// REST API version query parameter. Default: [`DEFAULT_API_VERSION`].
    pub api_version: String,

    /// Per-request timeout in seconds. Default: 60.
    ///
    /// Vision calls on a full-resolution slide usually return in a few
    /// seconds; a hung connection should not stall the whole batch.
    pub timeout_secs: u64,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            slides_dir: PathBuf::from("slides"),
            log_path: PathBuf::from("output/logos.txt"),
            endpoint: String::new(),
            api_key: String::new(),
            deployment_id: String::new(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout_secs: 60,
        }
    }
}

impl fmt::Debug for DetectConfig {
    // api_key never appears in logs
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DetectConfig")
            .field("slides_dir", &self.slides_dir)
            .field("log_path", &self.log_path)
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("deployment_id", &self.deployment_id)
            .field("api_version", &self.api_version)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl DetectConfig {
    /// Create a new builder for `DetectConfig`.
    pub fn builder() -> DetectConfigBuilder {
        DetectConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`DetectConfig`].
#[derive(Debug)]
pub struct DetectConfigBuilder {
    config: DetectConfig,
}

impl DetectConfigBuilder {
    pub fn slides_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.slides_dir = dir.into();
        self
    }

    pub fn log_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.log_path = path.into();
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    pub fn deployment_id(mut self, id: impl Into<String>) -> Self {
        self.config.deployment_id = id.into();
        self
    }

    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.config.api_version = version.into();
        self
    }

    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.config.timeout_secs = secs.max(1);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<DetectConfig, DeckscanError> {
        let c = &self.config;
        if c.endpoint.is_empty() {
            return Err(DeckscanError::InvalidConfig(
                "Azure endpoint must be set (AZURE_OPENAI_ENDPOINT)".into(),
            ));
        }
        if c.api_key.is_empty() {
            return Err(DeckscanError::InvalidConfig(
                "API key must be set (AZURE_OPENAI_API_KEY)".into(),
            ));
        }
        if c.deployment_id.is_empty() {
            return Err(DeckscanError::InvalidConfig(
                "Deployment id must be set (AZURE_OPENAI_DEPLOYMENT_ID)".into(),
            ));
        }
        if c.api_version.is_empty() {
            return Err(DeckscanError::InvalidConfig(
                "API version must not be empty".into(),
            ));
        }
        Ok(self.config)
    }
}
