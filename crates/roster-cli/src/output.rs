//! Roster writers for the supported output formats.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};
use serde::Serialize;
use tracing::info;

use roster_core::{ContactRecord, OutputKind, Roster, ROSTER_COLUMNS};

/// Outcome of one input document, as listed in reports.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub path: String,
    pub status: DocumentStatus,
    pub records: usize,
    pub pages: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub processing_time_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Success,
    Failed,
}

#[derive(Serialize)]
struct RunReport<'a> {
    generated_at: String,
    documents: &'a [DocumentReport],
    roster: &'a [ContactRecord],
}

/// Write the roster to `path` in the given format.
pub fn write_roster(
    kind: OutputKind,
    path: &Path,
    roster: &Roster,
    documents: &[DocumentReport],
) -> anyhow::Result<()> {
    match kind {
        OutputKind::Xlsx => write_xlsx(path, roster)?,
        OutputKind::Csv => write_csv(File::create(path)?, roster)?,
        OutputKind::Json => {
            let mut file = File::create(path)?;
            file.write_all(to_json(roster, documents)?.as_bytes())?;
        }
        OutputKind::Text => {
            let mut file = File::create(path)?;
            file.write_all(render_text(roster).as_bytes())?;
        }
    }

    info!("Wrote {} records to {}", roster.len(), path.display());
    Ok(())
}

fn write_xlsx(path: &Path, roster: &Roster) -> anyhow::Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Roster")?;

    let header = Format::new().set_bold();
    for (col, title) in ROSTER_COLUMNS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *title, &header)?;
    }

    for (idx, record) in roster.iter().enumerate() {
        let row = idx as u32 + 1;
        let cells = [
            (&record.name, record.name_page),
            (&record.email, record.email_page),
            (&record.phone, record.phone_page),
        ];
        for (field, (text, page)) in cells.iter().enumerate() {
            let col = field as u16 * 2;
            worksheet.write_string(row, col, text.as_str())?;
            if let Some(page) = page {
                worksheet.write_number(row, col + 1, *page as f64)?;
            }
        }
    }

    worksheet.set_column_width(0, 28)?;
    worksheet.set_column_width(2, 32)?;
    worksheet.set_column_width(4, 20)?;

    workbook.save(path)?;
    Ok(())
}

/// Write the roster as CSV with a header row.
pub fn write_csv<W: Write>(writer: W, roster: &Roster) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(ROSTER_COLUMNS)?;
    for record in roster.iter() {
        wtr.write_record(&record.row())?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render the roster and the per-document outcomes as a JSON report.
pub fn to_json(roster: &Roster, documents: &[DocumentReport]) -> anyhow::Result<String> {
    let report = RunReport {
        generated_at: chrono::Utc::now().to_rfc3339(),
        documents,
        roster: roster.records(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Render the roster as an aligned plain-text table.
pub fn render_text(roster: &Roster) -> String {
    let rows: Vec<[String; 6]> = roster.iter().map(ContactRecord::row).collect();

    let mut widths = ROSTER_COLUMNS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = pad_line(ROSTER_COLUMNS.iter().copied(), &widths);
    out.push('\n');
    for row in &rows {
        out.push_str(&pad_line(row.iter().map(String::as_str), &widths));
        out.push('\n');
    }
    out
}

fn pad_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect();
    padded.join("  ").trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use roster_core::dedup_roster;

    fn roster() -> Roster {
        dedup_roster(vec![
            ContactRecord {
                name: "Jane Doe".to_string(),
                email: "jane@x.com".to_string(),
                phone: "555-000-1111".to_string(),
                name_page: Some(1),
                email_page: Some(1),
                phone_page: Some(2),
            },
            ContactRecord {
                name: "Al Bo".to_string(),
                email: "al@x.com".to_string(),
                name_page: Some(1),
                email_page: Some(1),
                ..Default::default()
            },
        ])
    }

    #[test]
    fn test_csv_header_and_rows() {
        let mut buf = Vec::new();
        write_csv(&mut buf, &roster()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "Name,Name_Found_On_Page,Email,Email_Found_On_Page,Phone,Phone_Found_On_Page\n\
             Al Bo,1,al@x.com,1,,\n\
             Jane Doe,1,jane@x.com,1,555-000-1111,2\n"
        );
    }

    #[test]
    fn test_text_table_is_aligned() {
        let text = render_text(&roster());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Name      Name_Found_On_Page"));
        assert!(lines[1].starts_with("Al Bo     1"));
        assert!(lines[2].starts_with("Jane Doe  1"));
    }

    #[test]
    fn test_json_report() {
        let documents = vec![DocumentReport {
            path: "cv.pdf".to_string(),
            status: DocumentStatus::Failed,
            records: 0,
            pages: 0,
            warnings: Vec::new(),
            error: Some("PDF is encrypted".to_string()),
            processing_time_ms: 0,
        }];
        let json: serde_json::Value =
            serde_json::from_str(&to_json(&roster(), &documents).unwrap()).unwrap();
        assert_eq!(json["documents"][0]["status"], "failed");
        assert_eq!(json["roster"][1]["name"], "Jane Doe");
        assert!(json["generated_at"].is_string());
    }

    #[test]
    fn test_write_xlsx_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.xlsx");
        write_roster(OutputKind::Xlsx, &path, &roster(), &[]).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }
}
