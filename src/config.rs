//! Command-line configuration for exif-inspect.
//!
//! Options can be given as flags or through environment variables with the
//! `EXIF_INSPECT_` prefix:
//!
//! - `EXIF_INSPECT_PRETTY` - Pretty-print the JSON output (default: false)
//! - `EXIF_INSPECT_METADATA_ONLY` - Print only decoded metadata (default: false)
//!
//! Log filtering follows `RUST_LOG` when set.

use std::path::PathBuf;

use clap::Parser;

/// Inspect image files and print a JSON report with their EXIF metadata.
#[derive(Parser, Debug, Clone)]
#[command(name = "exif-inspect")]
#[command(version, about)]
pub struct Config {
    /// Files to inspect.
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long, env = "EXIF_INSPECT_PRETTY", default_value_t = false)]
    pub pretty: bool,

    /// Print only the decoded metadata for each file.
    #[arg(long, env = "EXIF_INSPECT_METADATA_ONLY", default_value_t = false)]
    pub metadata_only: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.paths.is_empty() {
            return Err("At least one file path is required".to_string());
        }

        if let Some(empty) = self.paths.iter().find(|path| path.as_os_str().is_empty()) {
            return Err(format!("Invalid empty path: {:?}", empty));
        }

        Ok(())
    }

    /// Log filter directive for the chosen verbosity.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "exif_inspect=debug"
        } else {
            "exif_inspect=info"
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
