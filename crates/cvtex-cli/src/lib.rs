//! cvtex CLI - Command-line interface library
//!
//! Loads a directory of resume record files and writes an `altacv` LaTeX
//! document built from them.
//!
//! # Library Usage
//!
//! ```ignore
//! use cvtex_cli::{generate_command, PathSettings};
//!
//! let paths = PathSettings::with_dirs("records", "build");
//! let written = generate_command(&paths)?;
//! ```
//!
//! # Binary Usage
//!
//! ```bash
//! # Read ../CV_json, write ../CV_tex/isso_custom.tex
//! cvtex
//!
//! # Custom locations
//! cvtex --input records --output build --file-name cv.tex
//!
//! # Inspect what the loader made of the record files
//! cvtex --dump-records
//! ```

pub mod app;
pub mod config;

// Re-export main entry point and types
pub use app::{dump_command, generate_command, load_records, records_json, run_cli, Cli};
pub use config::{PathSettings, Settings, CONFIG_FILE_NAME};
