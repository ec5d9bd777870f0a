//! CSV ground-truth tables

use crate::error::BenchError;
use citeprobe_domain::{GroundTruthRecord, GroundTruthSource};
use csv::{ReaderBuilder, StringRecord};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Ground-truth tables stored as `<dir>/<identifier>.csv`
///
/// Each table has a header row with a `Title` column and an optional `URL`
/// column (matched case-insensitively); other columns are ignored. Export
/// banners above the header are skipped with `skip_rows`.
#[derive(Debug, Clone)]
pub struct CsvGroundTruth {
    dir: PathBuf,
    skip_rows: usize,
}

impl CsvGroundTruth {
    /// Read tables from `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            skip_rows: 0,
        }
    }

    /// Skip `rows` lines before the header row
    pub fn with_skip_rows(mut self, rows: usize) -> Self {
        self.skip_rows = rows;
        self
    }

    /// Directory tables are read from
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the table for `identifier`
    pub fn table_path(&self, identifier: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", identifier))
    }

    /// Parse a table from CSV text
    pub fn parse(&self, text: &str) -> Result<Vec<GroundTruthRecord>, BenchError> {
        let body = skip_lines(text, self.skip_rows);
        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(body.as_bytes());

        let headers = reader.headers()?.clone();
        let title_column = column(&headers, "title")
            .ok_or_else(|| BenchError::GroundTruth("Missing Title column".to_string()))?;
        let url_column = column(&headers, "url");

        let mut records = Vec::new();
        for row in reader.records() {
            let row = row?;
            let title = match row.get(title_column) {
                Some(title) if !title.is_empty() => title,
                _ => continue,
            };
            let url = url_column
                .and_then(|idx| row.get(idx))
                .filter(|url| !url.is_empty())
                .map(str::to_string);
            records.push(GroundTruthRecord::new(title, url));
        }

        Ok(records)
    }
}

fn skip_lines(text: &str, count: usize) -> &str {
    let mut rest = text;
    for _ in 0..count {
        match rest.find('\n') {
            Some(end) => rest = &rest[end + 1..],
            None => return "",
        }
    }
    rest
}

fn column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.eq_ignore_ascii_case(name))
}

impl GroundTruthSource for CsvGroundTruth {
    type Error = BenchError;

    fn load_ground_truth(&self, identifier: &str) -> Result<Vec<GroundTruthRecord>, Self::Error> {
        let path = self.table_path(identifier);
        let text = fs::read_to_string(&path).map_err(|e| {
            BenchError::GroundTruth(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let records = self.parse(&text)?;
        debug!("Loaded {} ground-truth records from {}", records.len(), path.display());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_title_and_url() {
        let table = CsvGroundTruth::new(".").parse(
            "Title,URL,Year\n\
             First paper,https://europepmc.org/article/PMC/PMC100,2020\n\
             Second paper,,2021\n",
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table[0].title, "First paper");
        assert_eq!(
            table[0].url.as_deref(),
            Some("https://europepmc.org/article/PMC/PMC100")
        );
        assert_eq!(table[1].url, None);
        assert_eq!(table[1].match_count, 0);
    }

    #[test]
    fn test_headers_are_case_insensitive() {
        let table = CsvGroundTruth::new(".")
            .parse("url,TITLE\nhttps://x.org,A title\n")
            .unwrap();
        assert_eq!(table[0].title, "A title");
        assert_eq!(table[0].url.as_deref(), Some("https://x.org"));
    }

    #[test]
    fn test_skip_rows_and_blank_titles() {
        let table = CsvGroundTruth::new(".")
            .with_skip_rows(2)
            .parse("Export banner\nGenerated 2023\nTitle\nKept\n\"\"\n  \nAlso kept\n")
            .unwrap();
        let titles: Vec<&str> = table.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Kept", "Also kept"]);
    }

    #[test]
    fn test_missing_title_column() {
        let result = CsvGroundTruth::new(".").parse("Name,URL\nx,y\n");
        assert!(matches!(result, Err(BenchError::GroundTruth(_))));
    }

    #[test]
    fn test_quoted_commas() {
        let table = CsvGroundTruth::new(".")
            .parse("Title\n\"CD4, a marker\"\n")
            .unwrap();
        assert_eq!(table[0].title, "CD4, a marker");
    }

    #[test]
    fn test_skip_past_end() {
        assert_eq!(skip_lines("one\ntwo", 5), "");
        assert_eq!(skip_lines("one\ntwo", 1), "two");
    }
}
