//! Configuration settings
//!
//! Optional `cvtex.toml` file. Every key has a default, so an empty file
//! (or no file) reproduces the built-in paths.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Config file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "cvtex.toml";

/// Top-level settings structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    /// Input and output locations
    pub paths: PathSettings,
}

impl Settings {
    /// Parse settings from a TOML string
    pub fn from_toml_str(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}

/// Where records are read from and the document is written to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// Directory holding the record files
    pub input_dir: PathBuf,
    /// Directory the document is written into; must already exist
    pub output_dir: PathBuf,
    /// Name of the generated file
    pub output_file: String,
    /// Record file extension
    pub extension: String,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("../CV_json"),
            output_dir: PathBuf::from("../CV_tex"),
            output_file: "isso_custom.tex".to_string(),
            extension: cvtex_data::DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl PathSettings {
    /// Full path of the generated document
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file)
    }

    /// Settings reading from `input_dir` and writing into `output_dir`
    pub fn with_dirs(input_dir: impl AsRef<Path>, output_dir: impl AsRef<Path>) -> Self {
        Self {
            input_dir: input_dir.as_ref().to_path_buf(),
            output_dir: output_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }
}
