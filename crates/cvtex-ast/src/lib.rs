//! cvtex-ast - Record values and resume sections
//!
//! This crate provides the types shared by the cvtex loader and renderer:
//! the literal [`Value`] tree a record file evaluates to, the ordered
//! [`Mapping`] at its root, and the typed [`Resume`] view built from the
//! per-section records.

pub mod resume;
pub mod value;

pub use resume::{
    Category, Contact, Diploma, Experience, Language, Profile, RecordSet, Resume, Section,
    SideProject, DEFAULT_ROLE, URL_NOT_PUBLIC,
};
pub use value::{Mapping, Value};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
