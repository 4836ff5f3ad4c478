//! Helpers shared by the Office Open XML extractors.

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;

use regdesk_core::error::{AppError, ErrorKind};
use regdesk_core::result::AppResult;

/// Element names that delimit paragraphs and carry text in one XML part.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TextTags {
    pub paragraph: &'static [u8],
    pub text: &'static [u8],
    pub tab: &'static [u8],
    pub line_break: &'static [u8],
}

/// Open an OOXML package.
pub(crate) fn open(bytes: &[u8]) -> AppResult<ZipArchive<Cursor<&[u8]>>> {
    ZipArchive::new(Cursor::new(bytes)).map_err(|e| {
        AppError::with_source(ErrorKind::Unsupported, "File is not a valid Office document", e)
    })
}

/// Largest decompressed size accepted for one package part.
pub(crate) const MAX_PART_BYTES: u64 = 16 * 1024 * 1024;

/// Whether the package contains a part called `name`.
pub(crate) fn has_part(archive: &ZipArchive<Cursor<&[u8]>>, name: &str) -> bool {
    archive.file_names().any(|n| n == name)
}

/// Read one part of the package as a string, up to [`MAX_PART_BYTES`].
pub(crate) fn read_part(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    name: &str,
) -> AppResult<String> {
    read_part_limited(archive, name, MAX_PART_BYTES)
}

/// Read one part, refusing parts that inflate beyond `limit` bytes.
///
/// The declared size is checked first; the read itself is bounded too
/// since the header of a crafted archive can understate it.
pub(crate) fn read_part_limited(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    name: &str,
    limit: u64,
) -> AppResult<String> {
    let part = archive.by_name(name).map_err(|e| {
        AppError::with_source(
            ErrorKind::Unsupported,
            format!("Office document has no {name}"),
            e,
        )
    })?;
    if part.size() > limit {
        return Err(part_too_large(name, limit));
    }

    let mut xml = String::new();
    part.take(limit + 1)
        .read_to_string(&mut xml)
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Unsupported,
                format!("Unreadable document part {name}"),
                e,
            )
        })?;
    if xml.len() as u64 > limit {
        return Err(part_too_large(name, limit));
    }
    Ok(xml)
}

fn part_too_large(name: &str, limit: u64) -> AppError {
    AppError::unsupported(format!(
        "Document part {name} exceeds {} MB when decompressed",
        limit.div_ceil(1024 * 1024)
    ))
}

/// Map a quick-xml failure to an `Unsupported` error.
pub(crate) fn malformed(err: impl std::error::Error + Send + Sync + 'static) -> AppError {
    AppError::with_source(ErrorKind::Unsupported, "Malformed document XML", err)
}

/// Collect the non-empty paragraphs of an XML part.
pub(crate) fn paragraphs(xml: &str, tags: TextTags) -> AppResult<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut out = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        let event = reader.read_event().map_err(malformed)?;
        match event {
            Event::Start(e) if e.name().as_ref() == tags.text => in_text = true,
            Event::End(e) if e.name().as_ref() == tags.text => in_text = false,
            Event::Text(t) if in_text => {
                let text = t.unescape().map_err(malformed)?;
                current.push_str(&text);
            }
            Event::Empty(e) if e.name().as_ref() == tags.tab => current.push('\t'),
            Event::Empty(e) if e.name().as_ref() == tags.line_break => current.push('\n'),
            Event::End(e) if e.name().as_ref() == tags.paragraph => {
                let para = current.trim_end();
                if !para.is_empty() {
                    out.push(para.to_string());
                }
                current.clear();
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::docx::tests::package;

    #[test]
    fn test_read_part_within_limit() {
        let bytes = package(&[("word/document.xml", "<w:document/>")]);
        let mut archive = open(&bytes).unwrap();
        let xml = read_part_limited(&mut archive, "word/document.xml", 1024).unwrap();
        assert_eq!(xml, "<w:document/>");
    }

    #[test]
    fn test_read_part_rejects_oversized_inflation() {
        let body = format!("<w:t>{}</w:t>", "a".repeat(64 * 1024));
        let bytes = package(&[("word/document.xml", &body)]);

        let mut archive = open(&bytes).unwrap();
        let err = read_part_limited(&mut archive, "word/document.xml", 1024).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Unsupported);
        assert!(err.message.contains("word/document.xml"));
    }

    #[test]
    fn test_has_part() {
        let bytes = package(&[("xl/workbook.xml", "<workbook/>")]);
        let archive = open(&bytes).unwrap();
        assert!(has_part(&archive, "xl/workbook.xml"));
        assert!(!has_part(&archive, "xl/sharedStrings.xml"));
    }
}
