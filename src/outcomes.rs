//! Learning-outcome extraction from syllabus PDFs
//!
//! Syllabi come in Polish or English. Both carry a learning outcomes table
//! whose rows start with an outcome code (`PEU_W01`, `PEU U2`, ...) and whose
//! next column starts with a programme code (`K2_IZ...`). Only the text between
//! the two codes is kept.

use std::path::{Path, PathBuf};

use regex::Regex;
use tracing::{error, info, warn};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyllabusLanguage {
    Polish,
    English,
}

impl SyllabusLanguage {
    const fn section_marker(self) -> &'static str {
        match self {
            SyllabusLanguage::Polish => "Przedmiotowe efekty uczenia się",
            SyllabusLanguage::English => "Subject's learning outcomes",
        }
    }

    const fn section_end(self) -> &'static str {
        match self {
            SyllabusLanguage::Polish => {
                "\nTreści programowe zapewniające uzyskanie efektów uczenia się"
            }
            SyllabusLanguage::English => "\nProgram content ensuring learning outcomes",
        }
    }

    const fn row_pattern(self) -> &'static str {
        match self {
            SyllabusLanguage::Polish => r"(?s)PEU[ _]?[WUK]\d+\s*(.*?)\s*K2[ _]?IZ",
            SyllabusLanguage::English => r"(?s)PEU_\w+\d+\s*(.*?)\s*K2[ _]?IZ",
        }
    }

    /// Polish is checked first
    pub fn detect(text: &str) -> Option<Self> {
        [SyllabusLanguage::Polish, SyllabusLanguage::English]
            .into_iter()
            .find(|lang| text.contains(lang.section_marker()))
    }
}

/// Text of every learning outcomes section, in document order
fn sections<'a>(text: &'a str, lang: SyllabusLanguage) -> Vec<&'a str> {
    let marker = lang.section_marker();
    let end_heading = lang.section_end();
    let mut sections = Vec::new();
    let mut pos = 0;

    while let Some(found) = text[pos..].find(marker) {
        let start = pos + found + marker.len();
        let end = text[start..]
            .find(end_heading)
            .map_or(text.len(), |offset| start + offset);
        sections.push(&text[start..end]);
        pos = end;
    }

    sections
}

fn clean_row(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c| c == '"' || c == ',')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Outcome rows of a syllabus in `lang`, joined by blank lines
pub fn extract_outcomes(text: &str, lang: SyllabusLanguage) -> Result<String> {
    let row = Regex::new(lang.row_pattern()).map_err(|e| Error::Config(e.to_string()))?;

    let rows: Vec<String> = sections(text, lang)
        .into_iter()
        .flat_map(|section| {
            row.captures_iter(section)
                .filter_map(|caps| caps.get(1).map(|m| clean_row(m.as_str())))
                .collect::<Vec<_>>()
        })
        .filter(|row| !row.is_empty())
        .collect();

    Ok(rows.join("\n\n"))
}

/// Outcomes of a syllabus of either language; unrecognized documents are kept whole
pub fn filter_syllabus(text: &str) -> Result<String> {
    match SyllabusLanguage::detect(text) {
        Some(lang) => {
            info!(?lang, "detected syllabus language");
            extract_outcomes(text, lang)
        }
        None => {
            warn!("could not determine syllabus language, keeping full text");
            Ok(text.to_string())
        }
    }
}

pub fn pdf_text(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    pdf_extract::extract_text_from_mem(&bytes).map_err(|e| Error::Pdf {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

#[derive(Debug, Default)]
pub struct ConversionSummary {
    pub written: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

/// Convert every PDF in `input_dir` to `<stem>.md` in `output_dir`
pub fn convert_directory(input_dir: &Path, output_dir: &Path) -> Result<ConversionSummary> {
    convert_directory_with(input_dir, output_dir, pdf_text)
}

/// Same as [`convert_directory`] with a custom text extractor
pub fn convert_directory_with<F>(
    input_dir: &Path,
    output_dir: &Path,
    extract_text: F,
) -> Result<ConversionSummary>
where
    F: Fn(&Path) -> Result<String>,
{
    let mut summary = ConversionSummary::default();

    if !input_dir.exists() {
        warn!(dir = %input_dir.display(), "input directory not found, creating it");
        std::fs::create_dir_all(input_dir)?;
        info!("add syllabus PDFs to the input directory and run again");
        return Ok(summary);
    }
    std::fs::create_dir_all(output_dir)?;

    let mut pdfs: Vec<PathBuf> = std::fs::read_dir(input_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .collect();
    pdfs.sort();

    for pdf in pdfs {
        info!(file = %pdf.display(), "processing syllabus");
        let stem = pdf.file_stem().unwrap_or_default().to_string_lossy();
        let target = output_dir.join(format!("{}.md", stem));
        let converted = extract_text(&pdf)
            .and_then(|text| filter_syllabus(&text))
            .and_then(|markdown| std::fs::write(&target, markdown).map_err(Error::from));

        match converted {
            Ok(()) => {
                info!(target = %target.display(), "converted syllabus");
                summary.written.push(target);
            }
            Err(e) => {
                error!(file = %pdf.display(), error = %e, "failed to process syllabus");
                summary.failed.push(pdf);
            }
        }
    }

    Ok(summary)
}
