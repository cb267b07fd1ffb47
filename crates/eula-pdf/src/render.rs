//! PDF serialization
//!
//! Turns positioned pages into a PDF file with `lopdf`: one content
//! stream per page, the two base-14 Helvetica faces as shared page
//! resources, and a document Info dictionary built from the agreement
//! variables. Layout y grows downward; PDF y grows upward, so baselines
//! are flipped here.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use eula_core::Variables;

use crate::error::RenderError;
use crate::metrics::FontKind;
use crate::pageflow::{Block, PageContent, PageGeometry};

pub fn render_pdf(
    pages: &[PageContent],
    vars: &Variables,
    geom: PageGeometry,
) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => FontKind::Regular.base_font(),
    });
    let font_bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => FontKind::Bold.base_font(),
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FontKind::Regular.resource_name() => font_regular,
            FontKind::Bold.resource_name() => font_bold,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = Content {
            operations: page_operations(page, geom),
        };
        let encoded = content
            .encode()
            .map_err(|e| RenderError::ContentError(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(geom.width as f32),
                Object::Real(geom.height as f32),
            ],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    let info_id = info_dictionary(&mut doc, vars);
    doc.trailer.set("Info", info_id);

    doc.compress();
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| RenderError::SaveError(e.to_string()))?;
    Ok(buffer)
}

fn page_operations(page: &PageContent, geom: PageGeometry) -> Vec<Operation> {
    let mut ops = Vec::new();
    for block in &page.blocks {
        match block {
            Block::Text {
                x,
                y,
                font,
                size,
                text,
            } => {
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![
                        Object::Name(font.resource_name().as_bytes().to_vec()),
                        Object::Real(*size as f32),
                    ],
                ));
                ops.push(Operation::new(
                    "Td",
                    vec![
                        Object::Real(*x as f32),
                        Object::Real((geom.height - *y) as f32),
                    ],
                ));
                ops.push(Operation::new("Tj", vec![Object::string_literal(text.clone())]));
                ops.push(Operation::new("ET", vec![]));
            }
            Block::Rule { x1, x2, y } => {
                let flipped = (geom.height - *y) as f32;
                ops.push(Operation::new("q", vec![]));
                ops.push(Operation::new("w", vec![Object::Real(1.0)]));
                ops.push(Operation::new(
                    "m",
                    vec![Object::Real(*x1 as f32), Object::Real(flipped)],
                ));
                ops.push(Operation::new(
                    "l",
                    vec![Object::Real(*x2 as f32), Object::Real(flipped)],
                ));
                ops.push(Operation::new("S", vec![]));
                ops.push(Operation::new("Q", vec![]));
            }
        }
    }
    ops
}

fn info_dictionary(doc: &mut Document, vars: &Variables) -> lopdf::ObjectId {
    let creator = if vars.provider_website.is_empty() {
        vars.provider_name.clone()
    } else {
        vars.provider_website.clone()
    };
    doc.add_object(dictionary! {
        "Title" => Object::string_literal(format!("{} EULA", vars.product_name)),
        "Subject" => Object::string_literal(
            format!("End User License Agreement for {}", vars.product_name),
        ),
        "Author" => Object::string_literal(vars.provider_name.clone()),
        "Creator" => Object::string_literal(creator),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn text_block(y: f64, text: &str) -> Block {
        Block::Text {
            x: 56.0,
            y,
            font: FontKind::Regular,
            size: 11.0,
            text: text.to_string(),
        }
    }

    fn sample_vars() -> Variables {
        Variables {
            product_name: "AcmeCloud".into(),
            provider_name: "Acme Pty Ltd".into(),
            provider_website: "https://acme.example".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_renders_one_pdf_page_per_content_page() {
        let pages = vec![
            PageContent {
                blocks: vec![text_block(56.0, "first page")],
            },
            PageContent {
                blocks: vec![text_block(56.0, "second page")],
            },
        ];
        let bytes = render_pdf(&pages, &sample_vars(), PageGeometry::default()).unwrap();

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 2);
    }

    #[test]
    fn test_text_survives_round_trip() {
        let pages = vec![PageContent {
            blocks: vec![text_block(100.0, "Hello agreement")],
        }];
        let bytes = render_pdf(&pages, &sample_vars(), PageGeometry::default()).unwrap();

        let doc = Document::load_mem(&bytes).unwrap();
        let extracted = doc.extract_text(&[1]).unwrap();
        assert!(extracted.contains("Hello agreement"));
    }

    #[test]
    fn test_metadata_from_variables() {
        let pages = vec![PageContent {
            blocks: vec![text_block(56.0, "x")],
        }];
        let bytes = render_pdf(&pages, &sample_vars(), PageGeometry::default()).unwrap();

        let doc = Document::load_mem(&bytes).unwrap();
        let info_id = doc
            .trailer
            .get(b"Info")
            .and_then(|obj| obj.as_reference())
            .unwrap();
        let info = doc.get_object(info_id).and_then(|obj| obj.as_dict()).unwrap();

        let get = |key: &[u8]| {
            String::from_utf8(info.get(key).unwrap().as_str().unwrap().to_vec()).unwrap()
        };
        assert_eq!(get(b"Title"), "AcmeCloud EULA");
        assert_eq!(get(b"Subject"), "End User License Agreement for AcmeCloud");
        assert_eq!(get(b"Author"), "Acme Pty Ltd");
        assert_eq!(get(b"Creator"), "https://acme.example");
    }

    #[test]
    fn test_creator_falls_back_to_provider_name() {
        let vars = Variables {
            provider_name: "Acme Pty Ltd".into(),
            ..Default::default()
        };
        let pages = vec![PageContent {
            blocks: vec![text_block(56.0, "x")],
        }];
        let bytes = render_pdf(&pages, &vars, PageGeometry::default()).unwrap();

        let doc = Document::load_mem(&bytes).unwrap();
        let info_id = doc
            .trailer
            .get(b"Info")
            .and_then(|obj| obj.as_reference())
            .unwrap();
        let info = doc.get_object(info_id).and_then(|obj| obj.as_dict()).unwrap();
        assert_eq!(info.get(b"Creator").unwrap().as_str().unwrap(), b"Acme Pty Ltd");
    }

    #[test]
    fn test_rule_emits_stroke_operators() {
        let pages = vec![PageContent {
            blocks: vec![Block::Rule {
                x1: 56.0,
                x2: 256.0,
                y: 400.0,
            }],
        }];
        let ops = page_operations(&pages[0], PageGeometry::default());
        let names: Vec<&str> = ops.iter().map(|op| op.operator.as_str()).collect();
        assert_eq!(names, vec!["q", "w", "m", "l", "S", "Q"]);
    }

    #[test]
    fn test_baseline_flip() {
        let ops = page_operations(
            &PageContent {
                blocks: vec![text_block(100.0, "x")],
            },
            PageGeometry::default(),
        );
        let td = ops.iter().find(|op| op.operator == "Td").unwrap();
        assert_eq!(td.operands[1], Object::Real(742.0));
    }
}
