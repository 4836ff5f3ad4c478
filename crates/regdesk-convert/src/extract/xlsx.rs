//! XLSX extraction: one markdown table per worksheet.

use std::io::Cursor;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use zip::ZipArchive;

use regdesk_core::error::AppError;
use regdesk_core::result::AppResult;
use regdesk_core::traits::TextExtractor;

use super::ooxml::{self, malformed};

const WORKBOOK_PART: &str = "xl/workbook.xml";
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";

/// Renders every worksheet as a markdown table under a heading with the
/// sheet name. The first row is used as the table header.
#[derive(Debug, Default, Clone, Copy)]
pub struct XlsxExtractor;

impl TextExtractor for XlsxExtractor {
    fn name(&self) -> &'static str {
        "xlsx"
    }

    fn extract(&self, bytes: &[u8]) -> AppResult<String> {
        let mut archive = ooxml::open(bytes)?;

        let mut sheets: Vec<(u32, String)> = archive
            .file_names()
            .filter_map(|name| sheet_number(name).map(|n| (n, name.to_string())))
            .collect();
        if sheets.is_empty() {
            return Err(AppError::unsupported("Workbook has no worksheets"));
        }
        sheets.sort_by_key(|(n, _)| *n);

        let names = optional_part(&mut archive, WORKBOOK_PART)?
            .map(|xml| sheet_names(&xml))
            .transpose()?
            .unwrap_or_default();
        let strings = optional_part(&mut archive, SHARED_STRINGS_PART)?
            .map(|xml| shared_strings(&xml))
            .transpose()?
            .unwrap_or_default();

        let mut sections = Vec::with_capacity(sheets.len());
        for (i, (n, part)) in sheets.into_iter().enumerate() {
            let title = names
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("Sheet {n}"));
            let xml = ooxml::read_part(&mut archive, &part)?;
            let rows = sheet_rows(&xml, &strings)?;
            if rows.is_empty() {
                sections.push(format!("## {title}"));
            } else {
                sections.push(format!("## {title}\n\n{}", table(&rows)));
            }
        }
        Ok(sections.join("\n\n"))
    }
}

fn optional_part(
    archive: &mut ZipArchive<Cursor<&[u8]>>,
    name: &str,
) -> AppResult<Option<String>> {
    if ooxml::has_part(archive, name) {
        ooxml::read_part(archive, name).map(Some)
    } else {
        Ok(None)
    }
}

/// `xl/worksheets/sheet3.xml` -> 3.
fn sheet_number(name: &str) -> Option<u32> {
    name.strip_prefix("xl/worksheets/sheet")?
        .strip_suffix(".xml")?
        .parse()
        .ok()
}

/// Sheet names in workbook order.
fn sheet_names(xml: &str) -> AppResult<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut names = Vec::new();
    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sheet" => {
                names.push(attribute(&e, b"name")?.unwrap_or_default());
            }
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(names)
}

/// The shared string table, indexed as cells of type `s` reference it.
///
/// Phonetic runs (`rPh`) are skipped.
fn shared_strings(xml: &str) -> AppResult<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut strings = Vec::new();
    let mut current = String::new();
    let mut in_text = false;
    let mut in_phonetic = false;

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"si" => current.clear(),
                b"rPh" => in_phonetic = true,
                b"t" => in_text = !in_phonetic,
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"si" => strings.push(std::mem::take(&mut current)),
                b"rPh" => in_phonetic = false,
                b"t" => in_text = false,
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"si" => strings.push(String::new()),
            Event::Text(t) if in_text => current.push_str(&t.unescape().map_err(malformed)?),
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(strings)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellType {
    Shared,
    Boolean,
    Literal,
}

/// Rows of one worksheet with cells placed by column reference.
/// Rows with no text are dropped.
fn sheet_rows(xml: &str, strings: &[String]) -> AppResult<Vec<Vec<String>>> {
    let mut reader = Reader::from_str(xml);
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut cell: Option<(usize, CellType)> = None;
    let mut value = String::new();
    let mut in_value = false;

    loop {
        match reader.read_event().map_err(malformed)? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"row" => row.clear(),
                b"c" => {
                    let column = attribute(&e, b"r")?
                        .and_then(|r| column_index(&r))
                        .unwrap_or(row.len());
                    let kind = match attribute(&e, b"t")?.as_deref() {
                        Some("s") => CellType::Shared,
                        Some("b") => CellType::Boolean,
                        _ => CellType::Literal,
                    };
                    cell = Some((column, kind));
                    value.clear();
                }
                b"v" | b"t" => in_value = cell.is_some(),
                _ => {}
            },
            Event::End(e) => match e.local_name().as_ref() {
                b"row" => {
                    if row.iter().any(|c| !c.is_empty()) {
                        rows.push(std::mem::take(&mut row));
                    }
                }
                b"c" => {
                    if let Some((column, kind)) = cell.take() {
                        let text = match kind {
                            CellType::Shared => value
                                .trim()
                                .parse::<usize>()
                                .ok()
                                .and_then(|i| strings.get(i).cloned())
                                .unwrap_or_default(),
                            CellType::Boolean if value.trim() == "1" => "TRUE".to_string(),
                            CellType::Boolean => "FALSE".to_string(),
                            CellType::Literal => value.clone(),
                        };
                        if row.len() <= column {
                            row.resize(column + 1, String::new());
                        }
                        row[column] = text;
                    }
                }
                b"v" | b"t" => in_value = false,
                _ => {}
            },
            Event::Text(t) if in_value => value.push_str(&t.unescape().map_err(malformed)?),
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(rows)
}

/// Unescaped value of the attribute with local name `key`.
fn attribute(e: &BytesStart<'_>, key: &[u8]) -> AppResult<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(malformed)?;
        if attr.key.local_name().as_ref() == key {
            return Ok(Some(attr.unescape_value().map_err(malformed)?.into_owned()));
        }
    }
    Ok(None)
}

/// Zero-based column of a cell reference: `A1` -> 0, `AB7` -> 27.
fn column_index(reference: &str) -> Option<usize> {
    let letters: Vec<u8> = reference
        .bytes()
        .take_while(|b| b.is_ascii_alphabetic())
        .map(|b| b.to_ascii_uppercase())
        .collect();
    if letters.is_empty() {
        return None;
    }
    let column = letters
        .iter()
        .fold(0usize, |acc, b| acc * 26 + usize::from(b - b'A' + 1));
    Some(column - 1)
}

fn table(rows: &[Vec<String>]) -> String {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let line = |row: &Vec<String>| {
        let cells: Vec<String> = (0..width)
            .map(|i| row.get(i).map(|c| escape_cell(c)).unwrap_or_default())
            .collect();
        format!("| {} |", cells.join(" | "))
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    for (i, row) in rows.iter().enumerate() {
        lines.push(line(row));
        if i == 0 {
            lines.push(format!("| {} |", vec!["---"; width].join(" | ")));
        }
    }
    lines.join("\n")
}

fn escape_cell(text: &str) -> String {
    text.trim().replace('|', "\\|").replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::docx::tests::package;

    const WORKBOOK: &str = r#"<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Risks" sheetId="1" r:id="rId1"/><sheet name="Owners" sheetId="2" r:id="rId2"/></sheets></workbook>"#;

    const SHARED: &str = r#"<sst xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" count="3" uniqueCount="3">
<si><t>Risk</t></si>
<si><r><t>Sco</t></r><r><t>re</t></r></si>
<si><t>Compliance</t><rPh><t>ignored</t></rPh></si>
</sst>"#;

    const RISKS: &str = r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>
<row r="1"><c r="A1" t="s"><v>0</v></c><c r="B1" t="s"><v>1</v></c></row>
<row r="2"><c r="A2" t="inlineStr"><is><t>Fraud | KYC</t></is></c><c r="B2"><v>12</v></c></row>
<row r="3"><c r="A3"/></row>
<row r="4"><c r="C4" t="b"><v>1</v></c></row>
</sheetData></worksheet>"#;

    const OWNERS: &str = r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>
<row r="1"><c r="A1" t="s"><v>2</v></c></row>
</sheetData></worksheet>"#;

    #[test]
    fn test_sheets_as_tables() {
        let bytes = package(&[
            (WORKBOOK_PART, WORKBOOK),
            (SHARED_STRINGS_PART, SHARED),
            ("xl/worksheets/sheet2.xml", OWNERS),
            ("xl/worksheets/sheet1.xml", RISKS),
        ]);

        let text = XlsxExtractor.extract(&bytes).unwrap();
        assert_eq!(
            text,
            "## Risks\n\n\
             | Risk | Score |  |\n\
             | --- | --- | --- |\n\
             | Fraud \\| KYC | 12 |  |\n\
             |  |  | TRUE |\n\n\
             ## Owners\n\n\
             | Compliance |\n\
             | --- |"
        );
    }

    #[test]
    fn test_without_workbook_or_shared_strings() {
        let sheet = r#"<worksheet><sheetData><row><c><v>42</v></c><c><v>7</v></c></row></sheetData></worksheet>"#;
        let bytes = package(&[("xl/worksheets/sheet1.xml", sheet)]);

        let text = XlsxExtractor.extract(&bytes).unwrap();
        assert_eq!(text, "## Sheet 1\n\n| 42 | 7 |\n| --- | --- |");
    }

    #[test]
    fn test_rejects_workbook_without_sheets() {
        let bytes = package(&[(WORKBOOK_PART, WORKBOOK)]);
        assert!(XlsxExtractor.extract(&bytes).is_err());
    }

    #[test]
    fn test_column_index() {
        assert_eq!(column_index("A1"), Some(0));
        assert_eq!(column_index("c4"), Some(2));
        assert_eq!(column_index("AB7"), Some(27));
        assert_eq!(column_index("12"), None);
    }
}
