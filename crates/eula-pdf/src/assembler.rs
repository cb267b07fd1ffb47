//! Document assembly
//!
//! Three phases, each pure over its inputs:
//!
//! 1. `layout_document` walks the clause sections and produces positioned
//!    pages: title block, per-clause heading and body (prose justified,
//!    enumerated items indented), then the signature block.
//! 2. `decorate_pages` adds the running header and footer to every page
//!    after the first, once the total page count is known.
//! 3. `render_pdf` (in `render`) serializes the pages to PDF bytes.
//!
//! `generate_eula` chains all three.

use tracing::{debug, info};

use eula_core::{extract_segments, render_marker, ClauseSection, ListScheme, Segment, Variables};

use crate::error::RenderError;
use crate::layout::{place_words, wrap_words};
use crate::metrics::FontKind;
use crate::pageflow::{Block, PageBuilder, PageContent, PageGeometry};
use crate::render::render_pdf;

const TITLE_SIZE: f64 = 18.0;
const HEADING_SIZE: f64 = 13.0;
const BODY_SIZE: f64 = 11.0;
const SIGNATURE_HEADING_SIZE: f64 = 12.0;
const RUNNING_SIZE: f64 = 10.0;

/// Left inset for enumerated list items, about 6 mm.
const LIST_INDENT: f64 = 17.0;
const PARAGRAPH_SPACING: f64 = 6.0;
const LIST_SPACING: f64 = 6.0;
/// Gap between the two signature columns.
const COLUMN_GAP: f64 = 28.0;
/// Baseline offset of the running header from the page top, and of the
/// footer from the page bottom.
const RUNNING_OFFSET: f64 = 28.0;

/// Produce the full EULA as PDF bytes.
pub fn generate_eula(sections: &[ClauseSection], vars: &Variables) -> Result<Vec<u8>, RenderError> {
    let geom = PageGeometry::default();
    let mut pages = layout_document(sections, vars, geom);
    decorate_pages(&mut pages, vars, geom);
    info!(pages = pages.len(), sections = sections.len(), "assembled document");
    render_pdf(&pages, vars, geom)
}

/// Download filename the document is offered under.
pub fn suggested_filename(vars: &Variables) -> String {
    format!("{}_EULA.pdf", vars.product_name)
}

/// Phase one: flow the agreement onto pages.
pub fn layout_document(
    sections: &[ClauseSection],
    vars: &Variables,
    geom: PageGeometry,
) -> Vec<PageContent> {
    let mut b = PageBuilder::new(geom);

    write_title_block(&mut b, vars);

    for section in sections {
        let content = vars.substitute(&section.content);
        debug!(section = %section.id, "laying out clause");

        // Keep the heading attached to at least a few lines of body.
        b.ensure_room(geom.line_height * 4.0);
        write_heading(&mut b, &section.title);

        for segment in extract_segments(&content) {
            match segment {
                Segment::Prose { text } => write_paragraph(&mut b, &text),
                Segment::List { scheme, items } => {
                    for (i, item) in items.iter().enumerate() {
                        write_list_item(&mut b, scheme, i, &item.text);
                    }
                    b.advance(LIST_SPACING);
                }
            }
        }
    }

    write_signature_block(&mut b, vars);
    b.into_pages()
}

/// Phase two: running header and footer on every page after the first.
pub fn decorate_pages(pages: &mut [PageContent], vars: &Variables, geom: PageGeometry) {
    let total = pages.len();
    let bold = FontKind::Bold.metrics();
    let regular = FontKind::Regular.metrics();

    for (index, page) in pages.iter_mut().enumerate().skip(1) {
        let header = "End User License Agreement";
        let header_w = bold.text_width(header, RUNNING_SIZE);
        page.blocks.push(Block::Text {
            x: (geom.width - header_w) / 2.0,
            y: RUNNING_OFFSET,
            font: FontKind::Bold,
            size: RUNNING_SIZE,
            text: header.to_string(),
        });

        let footer_y = geom.height - RUNNING_OFFSET;
        if !vars.provider_name.is_empty() {
            page.blocks.push(Block::Text {
                x: geom.margin,
                y: footer_y,
                font: FontKind::Regular,
                size: RUNNING_SIZE,
                text: vars.provider_name.clone(),
            });
        }

        let page_label = format!("Page {} of {}", index + 1, total);
        let label_w = regular.text_width(&page_label, RUNNING_SIZE);
        page.blocks.push(Block::Text {
            x: (geom.width - label_w) / 2.0,
            y: footer_y,
            font: FontKind::Regular,
            size: RUNNING_SIZE,
            text: page_label,
        });

        if !vars.provider_email.is_empty() {
            let email_w = regular.text_width(&vars.provider_email, RUNNING_SIZE);
            page.blocks.push(Block::Text {
                x: geom.width - geom.margin - email_w,
                y: footer_y,
                font: FontKind::Regular,
                size: RUNNING_SIZE,
                text: vars.provider_email.clone(),
            });
        }
    }
}

fn write_title_block(b: &mut PageBuilder, vars: &Variables) {
    let geom = b.geometry();
    let title = "END USER LICENSE AGREEMENT (EULA)";
    let title_w = FontKind::Bold.metrics().text_width(title, TITLE_SIZE);
    let y = b.y();
    b.push(Block::Text {
        x: (geom.width - title_w) / 2.0,
        y,
        font: FontKind::Bold,
        size: TITLE_SIZE,
        text: title.to_string(),
    });
    b.advance(geom.line_height * 2.0);

    let date = vars.formatted_license_date();
    let meta_lines = [
        ("Service:", &vars.product_name),
        ("Provider:", &vars.provider_name),
        ("Contact:", &vars.provider_email),
        ("Effective Date:", &date),
    ];
    for (label, value) in meta_lines {
        if value.is_empty() {
            continue;
        }
        let y = b.y();
        b.push(Block::Text {
            x: geom.margin,
            y,
            font: FontKind::Regular,
            size: BODY_SIZE,
            text: format!("{} {}", label, value),
        });
        b.advance(geom.line_height);
    }
    b.advance(PARAGRAPH_SPACING);
}

fn write_heading(b: &mut PageBuilder, title: &str) {
    let geom = b.geometry();
    let y = b.y();
    b.push(Block::Text {
        x: geom.margin,
        y,
        font: FontKind::Bold,
        size: HEADING_SIZE,
        text: title.to_string(),
    });
    b.advance(geom.line_height * 1.6);
}

/// Justified body paragraph across the full usable width.
fn write_paragraph(b: &mut PageBuilder, text: &str) {
    let geom = b.geometry();
    let usable = geom.usable_width();
    let metrics = FontKind::Regular.metrics();
    let measure = |s: &str| metrics.text_width(s, BODY_SIZE);

    for line in wrap_words(text, &measure, usable, usable) {
        b.ensure_room(geom.line_height);
        let y = b.y();
        for placement in place_words(&line, usable, &measure) {
            b.push(Block::Text {
                x: geom.margin + placement.x,
                y,
                font: FontKind::Regular,
                size: BODY_SIZE,
                text: placement.text,
            });
        }
        b.advance(geom.line_height);
    }
    b.advance(PARAGRAPH_SPACING);
}

/// One enumerated item, left-aligned at the list indent with its
/// regenerated marker.
fn write_list_item(b: &mut PageBuilder, scheme: ListScheme, index: usize, text: &str) {
    let geom = b.geometry();
    let budget = geom.usable_width() - LIST_INDENT;
    let metrics = FontKind::Regular.metrics();
    let measure = |s: &str| metrics.text_width(s, BODY_SIZE);

    let full = format!("{} {}", render_marker(scheme, index), text);
    for line in wrap_words(&full, &measure, budget, budget) {
        b.ensure_room(geom.line_height);
        let y = b.y();
        b.push(Block::Text {
            x: geom.margin + LIST_INDENT,
            y,
            font: FontKind::Regular,
            size: BODY_SIZE,
            text: line.text(),
        });
        b.advance(geom.line_height);
    }
}

/// Two-column signature block, kept on one page, followed by the
/// agreement date line.
fn write_signature_block(b: &mut PageBuilder, vars: &Variables) {
    let geom = b.geometry();
    let line = geom.line_height;
    b.ensure_room(line * 10.0);

    let y = b.y();
    b.push(Block::Text {
        x: geom.margin,
        y,
        font: FontKind::Bold,
        size: SIGNATURE_HEADING_SIZE,
        text: "Signatures".to_string(),
    });
    b.advance(line * 1.5);

    let col_width = (geom.usable_width() - COLUMN_GAP) / 2.0;
    let top = b.y();
    let columns = [
        (geom.margin, "Licensee (Recipient):", &vars.recipient_name),
        (
            geom.margin + col_width + COLUMN_GAP,
            "Provider (Licensor):",
            &vars.provider_name,
        ),
    ];
    for (x, role, name) in columns {
        b.push(Block::Text {
            x,
            y: top,
            font: FontKind::Bold,
            size: BODY_SIZE,
            text: role.to_string(),
        });
        b.push(Block::Text {
            x,
            y: top + line,
            font: FontKind::Regular,
            size: BODY_SIZE,
            text: format!("Name: {}", name),
        });
        let rule_y = top + line * 2.2;
        b.push(Block::Rule {
            x1: x,
            x2: x + col_width,
            y: rule_y,
        });
        b.push(Block::Text {
            x,
            y: rule_y + 14.0,
            font: FontKind::Regular,
            size: RUNNING_SIZE,
            text: "Signature".to_string(),
        });
    }
    b.advance(line * 2.2 + 14.0 + line);

    b.ensure_room(line);
    let date = vars.formatted_license_date();
    let shown = if date.is_empty() {
        "____________________".to_string()
    } else {
        date
    };
    let y = b.y();
    b.push(Block::Text {
        x: geom.margin,
        y,
        font: FontKind::Regular,
        size: BODY_SIZE,
        text: format!("Agreement Date: {}", shown),
    });
    b.advance(line);
}

#[cfg(test)]
mod tests {
    use super::*;
    use eula_core::default_sections;
    use pretty_assertions::assert_eq;

    fn sample_vars() -> Variables {
        Variables {
            provider_name: "Acme Pty Ltd".into(),
            provider_email: "legal@acme.example".into(),
            product_name: "AcmeCloud".into(),
            recipient_name: "Jordan Smith".into(),
            license_date: "2024-04-05".into(),
            country: "Australia".into(),
            state: "Victoria".into(),
            ..Default::default()
        }
    }

    fn page_text(page: &PageContent) -> String {
        page.blocks
            .iter()
            .filter_map(|block| match block {
                Block::Text { text, .. } => Some(text.as_str()),
                Block::Rule { .. } => None,
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_full_template_spans_multiple_pages() {
        let sections = default_sections();
        let pages = layout_document(sections.as_slice(), &sample_vars(), PageGeometry::default());
        assert!(pages.len() > 1, "eleven clauses cannot fit one A4 page");
        // Every page carries content.
        for page in &pages {
            assert!(!page.blocks.is_empty());
        }
    }

    #[test]
    fn test_title_and_meta_on_first_page() {
        let sections = default_sections();
        let pages = layout_document(sections.as_slice(), &sample_vars(), PageGeometry::default());
        let first = page_text(&pages[0]);
        assert!(first.contains("END USER LICENSE AGREEMENT (EULA)"));
        assert!(first.contains("Service: AcmeCloud"));
        assert!(first.contains("Effective Date: April 5, 2024"));
    }

    #[test]
    fn test_meta_lines_skipped_when_blank() {
        let sections = default_sections();
        let pages = layout_document(sections.as_slice(), &Variables::default(), PageGeometry::default());
        let first = page_text(&pages[0]);
        assert!(!first.contains("Service:"));
        assert!(!first.contains("Contact:"));
    }

    #[test]
    fn test_signature_block_present_with_rules() {
        let sections = default_sections();
        let vars = sample_vars();
        let pages = layout_document(sections.as_slice(), &vars, PageGeometry::default());
        let last = pages.last().unwrap();
        let text = page_text(last);
        assert!(text.contains("Signatures"));
        assert!(text.contains("Name: Jordan Smith"));
        assert!(text.contains("Agreement Date: April 5, 2024"));

        let rules = last
            .blocks
            .iter()
            .filter(|b| matches!(b, Block::Rule { .. }))
            .count();
        assert_eq!(rules, 2);
    }

    #[test]
    fn test_heading_keeps_first_body_lines_on_same_page() {
        // At this width a 50-char word fills a line alone, so each filler
        // word is one wrapped line. After the first section the cursor
        // sits where the second heading alone would still fit, but a
        // heading plus two body lines would not.
        let geom = PageGeometry {
            width: 595.0,
            height: 300.0,
            margin: 50.0,
            line_height: 20.0,
        };
        let filler = vec!["x".repeat(50); 3].join(" ");
        let sections = vec![
            ClauseSection::custom("first", "1. FIRST", filler.clone()),
            ClauseSection::custom("second", "2. SECOND", filler),
        ];
        let pages = layout_document(&sections, &Variables::default(), geom);
        assert_eq!(pages.len(), 3); // clauses on two pages, signatures on a third

        assert!(!page_text(&pages[0]).contains("2. SECOND"));
        assert!(matches!(
            &pages[1].blocks[0],
            Block::Text { size, text, .. }
                if *size == HEADING_SIZE && text.as_str() == "2. SECOND"
        ));
        let body_lines = pages[1]
            .blocks
            .iter()
            .filter(|b| matches!(b, Block::Text { size, .. } if *size == BODY_SIZE))
            .count();
        assert!(body_lines >= 2, "heading moved without its body");
    }

    #[test]
    fn test_unset_date_renders_blank_line() {
        let sections = default_sections();
        let mut vars = sample_vars();
        vars.license_date = String::new();
        let pages = layout_document(sections.as_slice(), &vars, PageGeometry::default());
        let text = page_text(pages.last().unwrap());
        assert!(text.contains("Agreement Date: ____________________"));
    }

    #[test]
    fn test_decoration_skips_first_page() {
        let sections = default_sections();
        let vars = sample_vars();
        let mut pages = layout_document(sections.as_slice(), &vars, PageGeometry::default());
        let total = pages.len();
        decorate_pages(&mut pages, &vars, PageGeometry::default());

        assert!(!page_text(&pages[0]).contains("Page 1 of"));
        for (i, page) in pages.iter().enumerate().skip(1) {
            let text = page_text(page);
            assert!(text.contains("End User License Agreement"));
            assert!(text.contains(&format!("Page {} of {}", i + 1, total)));
            assert!(text.contains("Acme Pty Ltd"));
            assert!(text.contains("legal@acme.example"));
        }
    }

    #[test]
    fn test_footer_omits_blank_provider_fields() {
        let sections = default_sections();
        let vars = Variables::default();
        let mut pages = layout_document(sections.as_slice(), &vars, PageGeometry::default());
        decorate_pages(&mut pages, &vars, PageGeometry::default());
        let text = page_text(&pages[1]);
        assert!(text.contains("Page 2 of"));
        assert!(!text.contains('@'));
    }

    #[test]
    fn test_enumerated_items_are_indented() {
        let sections = vec![ClauseSection::custom(
            "restrictions",
            "Restrictions",
            "You must not: (a) copy the software; (b) resell it; (c) reverse engineer it.",
        )];
        let vars = Variables::default();
        let geom = PageGeometry::default();
        let pages = layout_document(&sections, &vars, geom);
        let indented: Vec<&Block> = pages[0]
            .blocks
            .iter()
            .filter(|b| match b {
                Block::Text { x, text, .. } => {
                    *x == geom.margin + LIST_INDENT && text.starts_with('(')
                }
                _ => false,
            })
            .collect();
        assert_eq!(indented.len(), 3);
    }

    #[test]
    fn test_marker_regenerated_from_position() {
        // Source labels skip (b); output renumbers contiguously.
        let sections = vec![ClauseSection::custom(
            "scope",
            "Scope",
            "You may: (a) install the software; (c) make one backup copy.",
        )];
        let pages = layout_document(&sections, &Variables::default(), PageGeometry::default());
        let text = page_text(&pages[0]);
        assert!(text.contains("(a) install the software"));
        assert!(text.contains("(b) make one backup copy"));
        assert!(!text.contains("(c)"));
    }

    #[test]
    fn test_suggested_filename() {
        assert_eq!(suggested_filename(&sample_vars()), "AcmeCloud_EULA.pdf");
        assert_eq!(suggested_filename(&Variables::default()), "_EULA.pdf");
    }

    #[test]
    fn test_generate_eula_produces_pdf_bytes() {
        let sections = default_sections();
        let bytes = generate_eula(sections.as_slice(), &sample_vars()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
