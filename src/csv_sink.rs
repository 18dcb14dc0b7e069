//! CSV output for assembled job records

use std::io::Write;
use std::path::Path;

use crate::error::{Error, Result};
use crate::extractors::Record;

/// Write `records` under a header row of `headers` (schema field names, then `url`)
pub fn write_records<W: Write>(
    writer: W,
    headers: &[&str],
    records: &[Record],
    delimiter: char,
) -> Result<()> {
    if !delimiter.is_ascii() {
        return Err(Error::Config(format!(
            "delimiter must be a single ASCII character, got {:?}",
            delimiter
        )));
    }
    let delimiter = delimiter as u8;

    let mut out = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(writer);

    out.write_record(headers)?;
    for record in records {
        out.write_record(record.values().map(|(_, value)| value).chain([record.url()]))?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_records_to_path(
    path: &Path,
    headers: &[&str],
    records: &[Record],
    delimiter: char,
) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    write_records(std::io::BufWriter::new(file), headers, records, delimiter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::{HtmlDocument, RecordAssembler};

    fn sample_records() -> Vec<Record> {
        let assembler = RecordAssembler::default();
        let first = HtmlDocument::parse(
            r#"<h1 data-test="text-positionName">Analyst, BI</h1>
               <h2 data-test="text-employerName">Acme</h2>"#,
        );
        let second = HtmlDocument::parse(r#"<h1 data-test="text-positionName">Tester</h1>"#);
        vec![
            assembler.assemble(&first, "https://jobs.test/o/1").unwrap(),
            assembler.assemble(&second, "https://jobs.test/o/2").unwrap(),
        ]
    }

    #[test]
    fn test_header_and_rows_in_order() {
        let headers = RecordAssembler::default().headers();
        let mut buf = Vec::new();
        write_records(&mut buf, &headers, &sample_records(), ',').unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("title,company,location,"));
        assert!(lines[0].ends_with(",url"));
        assert!(lines[1].starts_with("\"Analyst, BI\",Acme,"));
        assert!(lines[1].ends_with("https://jobs.test/o/1"));
        assert!(lines[2].starts_with("Tester,,"));
    }

    #[test]
    fn test_rows_have_header_width() {
        let headers = RecordAssembler::default().headers();
        let mut buf = Vec::new();
        write_records(&mut buf, &headers, &sample_records(), ';').unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .from_reader(buf.as_slice());
        for row in reader.records() {
            assert_eq!(row.unwrap().len(), headers.len());
        }
    }

    #[test]
    fn test_write_to_nested_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("jobs.csv");
        let headers = RecordAssembler::default().headers();

        write_records_to_path(&path, &headers, &sample_records(), ',').unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("Tester"));
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        for delimiter in ['€', 'é'] {
            let mut out = Vec::new();
            let err = write_records(&mut out, &["a"], &[], delimiter).unwrap_err();
            assert!(matches!(err, Error::Config(_)));
            assert!(out.is_empty());
        }
    }
}
