//! # cvtex-data
//!
//! Record loading for cvtex: read the per-section record files of a resume
//! and evaluate them into ordered mappings.
//!
//! ## Record files
//!
//! Each file holds one assignment of a mapping literal:
//!
//! ```text
//! # Work history
//! experience = {
//!     "acme": {
//!         "title": "Engineer",
//!         "highlights": [
//!             "Shipped the **billing** rewrite"
//!             "Mentored two juniors"
//!         ],
//!     },
//! }
//! ```
//!
//! Files are hand-written, so loading is forgiving: whole-line comments are
//! dropped and missing commas between strings on consecutive lines are put
//! back before evaluation. A file that still fails to load is logged and
//! treated as empty.
//!
//! ## Example
//!
//! ```rust,ignore
//! use cvtex_data::RecordDir;
//!
//! let dir = RecordDir::new("../CV_json")?;
//! let records = dir.load_all();
//! println!("{} jobs", records.experience.len());
//! ```

pub mod error;
pub mod literal;
pub mod loader;
pub mod repair;

// Re-exports
pub use error::{DataError, Result};
pub use literal::parse_literal;
pub use loader::{RecordDir, RecordLoader, DEFAULT_EXTENSION};
