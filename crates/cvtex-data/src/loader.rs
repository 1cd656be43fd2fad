//! Record file loading.
//!
//! A record file holds a single `name = {...}` assignment. Loading strips
//! whole-line comments, repairs missing commas, extracts the mapping literal
//! and evaluates it. Top-level tuple values are joined into one string.

use std::fs;
use std::path::{Path, PathBuf};

use cvtex_ast::{Mapping, RecordSet, Section, Value};

use crate::error::{DataError, Result};
use crate::literal::parse_literal;
use crate::repair::prepare;

/// Default extension of record files
pub const DEFAULT_EXTENSION: &str = "json";

/// Loads record files into mappings
pub struct RecordLoader;

impl RecordLoader {
    /// Evaluate the text of a record file.
    ///
    /// `origin` names the source in error messages.
    pub fn parse_str(content: &str, origin: &str) -> Result<Mapping> {
        let literal =
            prepare(content).ok_or_else(|| DataError::MissingAssignment(origin.to_string()))?;

        match parse_literal(&literal)? {
            Value::Map(mut mapping) => {
                join_tuples(&mut mapping);
                Ok(mapping)
            }
            other => Err(DataError::NotAMapping(kind_name(&other).to_string())),
        }
    }

    /// Read and evaluate a record file
    pub fn try_load(path: impl AsRef<Path>) -> Result<Mapping> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        Self::parse_str(&content, &path.display().to_string())
    }

    /// Read and evaluate a record file, logging any failure and returning
    /// an empty mapping instead
    pub fn load(path: impl AsRef<Path>) -> Mapping {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(mapping) => {
                tracing::debug!("Loaded {} ({} entries)", path.display(), mapping.len());
                mapping
            }
            Err(e) => {
                tracing::error!("Error loading {}: {}", path.display(), e);
                Mapping::new()
            }
        }
    }
}

/// Replace each top-level tuple with the concatenation of its items
fn join_tuples(mapping: &mut Mapping) {
    for value in mapping.values_mut() {
        if let Value::Tuple(items) = value {
            let joined: String = items.iter().map(Value::to_text).collect();
            *value = Value::Str(joined);
        }
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Str(_) => "a string",
        Value::Int(_) => "an integer",
        Value::Float(_) => "a float",
        Value::Bool(_) => "a boolean",
        Value::None => "None",
        Value::List(_) => "a list",
        Value::Tuple(_) => "a tuple",
        Value::Map(_) => "a mapping",
    }
}

/// A directory of per-section record files
#[derive(Debug, Clone)]
pub struct RecordDir {
    /// Directory holding the record files
    root: PathBuf,
    /// Record file extension, without the dot
    extension: String,
}

impl RecordDir {
    /// Open a record directory; it must exist
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        Self::with_extension(root, DEFAULT_EXTENSION)
    }

    /// Open a record directory whose files use a custom extension
    pub fn with_extension(root: impl AsRef<Path>, extension: &str) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(DataError::FileNotFound(root.display().to_string()));
        }
        Ok(Self {
            root: root.to_path_buf(),
            extension: extension.trim_start_matches('.').to_string(),
        })
    }

    /// Path of the record file for a section
    pub fn path_for(&self, section: Section) -> PathBuf {
        let mut path = self.root.join(section.file_stem());
        if !self.extension.is_empty() {
            path.set_extension(&self.extension);
        }
        path
    }

    /// Load every section whose file exists. Missing files and files that
    /// fail to load leave the section empty.
    pub fn load_all(&self) -> RecordSet {
        let mut records = RecordSet::new();
        for section in Section::ALL {
            let path = self.path_for(section);
            if path.exists() {
                records.set(section, RecordLoader::load(&path));
            } else {
                tracing::debug!("No record file for {:?} at {}", section, path.display());
            }
        }
        records
    }
}
