//! cvtex-latex - LaTeX generation for resumes
//!
//! This crate renders a [`cvtex_ast::Resume`] into a standalone document
//! for the `altacv` class.
//!
//! # Architecture
//!
//! Rendering happens in three layers:
//!
//! 1. **Escaping** - Makes record text safe for LaTeX, leaving text that
//!    already carries markup commands mostly alone
//! 2. **Sections** - One fragment per resume section, with the spacing
//!    rules between entries
//! 3. **Document** - The fixed preamble and the two-column layout that
//!    places each fragment
//!
//! # Example
//!
//! ```ignore
//! use cvtex_ast::{RecordSet, Resume};
//! use cvtex_latex::render_document;
//!
//! let resume = Resume::from_records(&RecordSet::new());
//! let tex = render_document(&resume);
//! std::fs::write("cv.tex", tex)?;
//! ```

pub mod document;
pub mod escape;
pub mod sections;

pub use document::DocumentAssembler;
pub use escape::{escape_latex, is_preformatted, markdown_bold};
pub use sections::{EntrySpacing, SectionFormatter};

/// Render a resume to a complete LaTeX document
pub fn render_document(resume: &cvtex_ast::Resume) -> String {
    let tex = DocumentAssembler::assemble(resume);
    tracing::debug!(
        "Rendered {} experience entries, {} side projects ({} bytes)",
        resume.experience.len(),
        resume.side_projects.len(),
        tex.len()
    );
    tex
}
