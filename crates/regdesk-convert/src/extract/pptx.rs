//! PPTX slide-text extraction.

use regdesk_core::result::AppResult;
use regdesk_core::traits::TextExtractor;

use super::ooxml::{self, TextTags};

const DRAWING_TAGS: TextTags = TextTags {
    paragraph: b"a:p",
    text: b"a:t",
    tab: b"a:tab",
    line_break: b"a:br",
};

/// Extracts the text of every slide, in slide order, under a heading per slide.
#[derive(Debug, Default, Clone, Copy)]
pub struct PptxExtractor;

impl TextExtractor for PptxExtractor {
    fn name(&self) -> &'static str {
        "pptx"
    }

    fn extract(&self, bytes: &[u8]) -> AppResult<String> {
        let mut archive = ooxml::open(bytes)?;

        let mut slides: Vec<(u32, String)> = archive
            .file_names()
            .filter_map(|name| slide_number(name).map(|n| (n, name.to_string())))
            .collect();
        slides.sort_by_key(|(n, _)| *n);

        let mut sections = Vec::with_capacity(slides.len());
        for (n, name) in slides {
            let xml = ooxml::read_part(&mut archive, &name)?;
            let body = ooxml::paragraphs(&xml, DRAWING_TAGS)?.join("\n");
            if body.is_empty() {
                sections.push(format!("## Slide {n}"));
            } else {
                sections.push(format!("## Slide {n}\n\n{body}"));
            }
        }
        Ok(sections.join("\n\n"))
    }
}

/// `ppt/slides/slide12.xml` -> 12.
fn slide_number(name: &str) -> Option<u32> {
    name.strip_prefix("ppt/slides/slide")?
        .strip_suffix(".xml")?
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::docx::tests::package;

    fn slide(text: &str) -> String {
        format!(
            r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:spTree><p:sp><p:txBody><a:p><a:r><a:t>{text}</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#
        )
    }

    #[test]
    fn test_slides_in_numeric_order() {
        let s10 = slide("Tenth");
        let s2 = slide("Second");
        let bytes = package(&[
            ("ppt/slides/slide10.xml", &s10),
            ("ppt/slides/slide2.xml", &s2),
            ("ppt/slides/_rels/slide2.xml.rels", "<Relationships/>"),
        ]);

        let text = PptxExtractor.extract(&bytes).unwrap();
        assert_eq!(text, "## Slide 2\n\nSecond\n\n## Slide 10\n\nTenth");
    }

    #[test]
    fn test_slide_number() {
        assert_eq!(slide_number("ppt/slides/slide3.xml"), Some(3));
        assert_eq!(slide_number("ppt/slides/_rels/slide3.xml.rels"), None);
        assert_eq!(slide_number("ppt/slideLayouts/slideLayout1.xml"), None);
    }
}
