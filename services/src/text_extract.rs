//! Plain-text extraction from uploaded documents.
//!
//! Supported: `.docx` (paragraph text from `word/document.xml`), `.txt` and `.md`.

use std::io::{Cursor, Read};
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ServiceError, ServiceResult};

static PARAGRAPH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<w:p[ >].*?</w:p>").expect("valid paragraph regex"));
static TEXT_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<w:t(?: [^>]*)?>(.*?)</w:t>").expect("valid text run regex"));
static ENTITY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(lt|gt|quot|apos|amp|#[0-9]+|#[xX][0-9a-fA-F]+);").expect("valid entity regex")
});

/// Document kinds the platform can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Docx,
    PlainText,
}

impl DocumentKind {
    pub fn from_file_name(name: &str) -> Option<Self> {
        let ext = Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())?;
        match ext.as_str() {
            "docx" => Some(Self::Docx),
            "txt" | "md" => Some(Self::PlainText),
            _ => None,
        }
    }
}

/// Extracts text from `bytes`, choosing the reader by `file_name`'s extension.
///
/// Unknown extensions (PDF included) fail with `Unsupported file type`; a
/// document with no text fails too.
pub fn extract_text(file_name: &str, bytes: &[u8]) -> ServiceResult<String> {
    let kind = DocumentKind::from_file_name(file_name)
        .ok_or_else(|| ServiceError::bad_request("Unsupported file type"))?;
    let text = match kind {
        DocumentKind::Docx => docx_text(bytes)?,
        DocumentKind::PlainText => String::from_utf8_lossy(bytes).trim().to_string(),
    };
    if text.is_empty() {
        return Err(ServiceError::bad_request("No text could be extracted from the file."));
    }
    Ok(text)
}

fn docx_text(bytes: &[u8]) -> ServiceResult<String> {
    let unreadable = |e: zip::result::ZipError| ServiceError::BadRequest(format!("Unreadable .docx file: {e}"));

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(unreadable)?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(unreadable)?
        .read_to_string(&mut xml)
        .map_err(|e| ServiceError::BadRequest(format!("Unreadable .docx file: {e}")))?;

    let paragraphs: Vec<String> = PARAGRAPH
        .find_iter(&xml)
        .map(|p| {
            TEXT_RUN
                .captures_iter(p.as_str())
                .filter_map(|c| c.get(1))
                .map(|m| unescape_xml(m.as_str()))
                .collect::<String>()
        })
        .filter(|p| !p.trim().is_empty())
        .collect();
    Ok(paragraphs.join("\n"))
}

/// Decodes the predefined entities and numeric character references in one pass.
///
/// References that do not name a valid character are kept verbatim.
fn unescape_xml(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &regex::Captures| {
            let name = &caps[1];
            let decoded = match name {
                "lt" => Some('<'),
                "gt" => Some('>'),
                "quot" => Some('"'),
                "apos" => Some('\''),
                "amp" => Some('&'),
                _ => match name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                    Some(hex) => u32::from_str_radix(hex, 16).ok(),
                    None => name[1..].parse::<u32>().ok(),
                }
                .and_then(char::from_u32),
            };
            decoded.map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

#[cfg(test)]
pub(crate) fn docx_fixture(paragraphs: &[&str]) -> Vec<u8> {
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    let body: String = paragraphs
        .iter()
        .map(|p| format!(r#"<w:p><w:r><w:t xml:space="preserve">{p}</w:t></w:r></w:p>"#))
        .collect();
    let xml = format!(r#"<?xml version="1.0"?><w:document><w:body>{body}</w:body></w:document>"#);

    let mut buf = Cursor::new(Vec::new());
    {
        let mut writer = zip::ZipWriter::new(&mut buf);
        writer
            .start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap();
    }
    buf.into_inner()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn docx_paragraphs_become_lines() {
        let bytes = docx_fixture(&["Case study: LuxeFashions", "Q1 &amp; Q2", ""]);
        let text = extract_text("paper.DOCX", &bytes).unwrap();
        assert_eq!(text, "Case study: LuxeFashions\nQ1 & Q2");
    }

    #[test]
    fn numeric_character_references_are_decoded() {
        assert_eq!(unescape_xml("Luxe&#8217;s &#x201C;plan&#x201d;"), "Luxe\u{2019}s \u{201C}plan\u{201D}");
        assert_eq!(unescape_xml("&amp;lt; stays &lt;"), "&lt; stays <");
        assert_eq!(unescape_xml("&#xD800; &#99999999999; &nbsp;"), "&#xD800; &#99999999999; &nbsp;");

        let bytes = docx_fixture(&["Don&#8217;t panic &#38; plan"]);
        assert_eq!(extract_text("paper.docx", &bytes).unwrap(), "Don\u{2019}t panic & plan");
    }

    #[test]
    fn plain_text_is_trimmed() {
        assert_eq!(extract_text("notes.md", b"  # Title\n").unwrap(), "# Title");
    }

    #[test]
    fn unsupported_and_empty_documents_are_rejected() {
        let err = extract_text("paper.pdf", b"%PDF-1.4").unwrap_err();
        assert_eq!(err.to_string(), "Unsupported file type");
        assert!(extract_text("noext", b"text").is_err());
        assert!(matches!(extract_text("blank.txt", b"   "), Err(ServiceError::BadRequest(_))));
        assert!(matches!(extract_text("broken.docx", b"not a zip"), Err(ServiceError::BadRequest(_))));
    }
}
