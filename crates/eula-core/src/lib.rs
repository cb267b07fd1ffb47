//! License-agreement document model and text engine
//!
//! This crate owns everything that happens to clause text before it is
//! laid out on a page: the clause template model, placeholder
//! substitution, and extraction of inline enumerated sub-clauses into
//! structured lists with regenerated markers. Rendering lives in
//! `eula-pdf`.

pub mod error;
pub mod marker;
pub mod segment;
pub mod template;
pub mod variables;

pub use error::TemplateError;
pub use marker::{classify_marker, render_marker, ListScheme};
pub use segment::{extract_segments, ListItem, Segment};
pub use template::{default_sections, ClauseSection, SectionList};
pub use variables::{format_long_date, Variables};
