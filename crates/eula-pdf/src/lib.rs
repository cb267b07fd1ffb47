//! PDF rendering for license agreements
//!
//! Takes the clause sections and variables from `eula-core` and produces
//! a paginated, justified A4 document: font metrics for measurement,
//! greedy wrap and justification, cursor-driven page flow, document
//! assembly with running headers and footers, and `lopdf` serialization.

pub mod assembler;
pub mod error;
pub mod layout;
pub mod metrics;
pub mod pageflow;
pub mod render;

pub use assembler::{decorate_pages, generate_eula, layout_document, suggested_filename};
pub use error::RenderError;
pub use metrics::{FontKind, FontMetrics};
pub use pageflow::{Block, PageBuilder, PageContent, PageGeometry};
pub use render::render_pdf;
