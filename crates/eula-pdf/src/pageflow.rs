//! Page geometry and the top-down layout cursor
//!
//! Layout works in top-down coordinates (y grows toward the bottom of
//! the page, like the cursor moves); the renderer flips to PDF's
//! bottom-up space at draw time. `PageBuilder` accumulates drawable
//! blocks per page and breaks to a fresh page whenever the next chunk
//! of content would cross the bottom margin.

use tracing::debug;

use crate::metrics::FontKind;

/// A4 portrait with a 20 mm margin, all in points.
#[derive(Debug, Clone, Copy)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    pub line_height: f64,
}

impl Default for PageGeometry {
    fn default() -> Self {
        PageGeometry {
            width: 595.0,
            height: 842.0,
            margin: 56.0,
            line_height: 17.0,
        }
    }
}

impl PageGeometry {
    /// Horizontal space between the margins.
    pub fn usable_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    /// Lowest y the cursor may reach before a page break.
    pub fn bottom_limit(&self) -> f64 {
        self.height - self.margin
    }
}

/// One drawable primitive, positioned in top-down page coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Text {
        x: f64,
        /// Baseline position from the top of the page.
        y: f64,
        font: FontKind,
        size: f64,
        text: String,
    },
    /// Horizontal rule at baseline `y`.
    Rule { x1: f64, x2: f64, y: f64 },
}

/// Everything drawn on a single page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageContent {
    pub blocks: Vec<Block>,
}

/// Cursor-driven page accumulator.
pub struct PageBuilder {
    geom: PageGeometry,
    pages: Vec<PageContent>,
    y: f64,
}

impl PageBuilder {
    pub fn new(geom: PageGeometry) -> Self {
        PageBuilder {
            geom,
            pages: vec![PageContent::default()],
            y: geom.margin,
        }
    }

    pub fn geometry(&self) -> PageGeometry {
        self.geom
    }

    /// Current cursor position from the top of the page.
    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Break to a new page unless `height` more points fit above the
    /// bottom margin. Returns true when a break happened.
    pub fn ensure_room(&mut self, height: f64) -> bool {
        if self.y + height > self.geom.bottom_limit() {
            debug!(
                page = self.pages.len(),
                y = self.y,
                needed = height,
                "breaking to new page"
            );
            self.pages.push(PageContent::default());
            self.y = self.geom.margin;
            true
        } else {
            false
        }
    }

    /// Move the cursor down.
    pub fn advance(&mut self, dy: f64) {
        self.y += dy;
    }

    /// Add a block to the current page.
    pub fn push(&mut self, block: Block) {
        if let Some(page) = self.pages.last_mut() {
            page.blocks.push(block);
        }
    }

    pub fn into_pages(self) -> Vec<PageContent> {
        self.pages
    }
}
