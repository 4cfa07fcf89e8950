// ============================================================
// CSV CODEC
// ============================================================
// Parse uploaded CSV files into datasets and serialize enriched
// datasets back out for download

use crate::domain::dataset::{Cell, Row, TabularDataset};
use crate::domain::error::{AppError, Result};
use csv::{ReaderBuilder, WriterBuilder};
use std::path::Path;

/// CSV reader/writer for tabular datasets
pub struct CsvCodec {
    /// Delimiter character (default: comma)
    delimiter: u8,
}

impl Default for CsvCodec {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvCodec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Parse a CSV file with automatic delimiter detection
    pub fn read_file_auto_detect(path: &Path) -> Result<TabularDataset> {
        let content = read_with_encoding_fallback(path)?;
        let delimiter = Self::detect_delimiter(&content);
        Self::new().with_delimiter(delimiter).parse_content(&content)
    }

    /// Parse CSV content from a string. The first record is the header
    /// row; it must be non-empty.
    pub fn parse_content(&self, content: &str) -> Result<TabularDataset> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .flexible(true) // Allow rows with different lengths
            .from_reader(content.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?
            .clone();

        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(AppError::EmptyDataset);
        }

        let mut rows = Vec::new();
        for (index, result) in reader.records().enumerate() {
            let record = result.map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV row {}: {}", index + 1, e))
            })?;

            let cells = headers
                .iter()
                .enumerate()
                .map(|(idx, header)| Cell::new(header, record.get(idx).unwrap_or("")))
                .collect();
            rows.push(Row::new(cells));
        }

        Ok(TabularDataset::new(rows))
    }

    /// Serialize a dataset; the first row's columns define the header
    pub fn to_string(&self, dataset: &TabularDataset) -> Result<String> {
        let columns = dataset.columns();
        if columns.is_empty() {
            return Err(AppError::EmptyDataset);
        }

        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .from_writer(Vec::new());

        writer
            .write_record(&columns)
            .map_err(|e| AppError::ParseError(format!("Failed to write CSV header: {}", e)))?;

        for row in dataset.rows() {
            let record: Vec<&str> = columns
                .iter()
                .map(|column| row.get(column).unwrap_or(""))
                .collect();
            writer
                .write_record(&record)
                .map_err(|e| AppError::ParseError(format!("Failed to write CSV row: {}", e)))?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| AppError::ParseError(format!("Failed to flush CSV output: {}", e)))?;
        Ok(String::from_utf8_lossy(&bytes).to_string())
    }

    /// Serialize a dataset to a file
    pub fn write_file(&self, dataset: &TabularDataset, path: &Path) -> Result<()> {
        let content = self.to_string(dataset)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Detect delimiter from content (comma, semicolon, tab, pipe)
    pub fn detect_delimiter(content: &str) -> u8 {
        let candidates = [b',', b';', b'\t', b'|'];

        let mut best_delimiter = b',';
        let mut best_score = 0.0f32;

        for &delimiter in &candidates {
            let sample_lines: Vec<_> = content.lines().take(10).collect();

            if sample_lines.is_empty() {
                continue;
            }

            let mut field_counts = Vec::new();
            for line in &sample_lines {
                let count = line.chars().filter(|&c| c as u8 == delimiter).count();
                field_counts.push(count);
            }

            // Score by consistency (low standard deviation) and frequency
            if !field_counts.is_empty() {
                let avg = field_counts.iter().sum::<usize>() as f32 / field_counts.len() as f32;
                let variance = field_counts
                    .iter()
                    .map(|&x| (x as f32 - avg).powi(2))
                    .sum::<f32>()
                    / field_counts.len() as f32;

                let score = avg / (1.0 + variance.sqrt());

                if score > best_score {
                    best_score = score;
                    best_delimiter = delimiter;
                }
            }
        }

        best_delimiter
    }
}

/// Read a file as UTF-8, replacing invalid sequences rather than failing
fn read_with_encoding_fallback(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)
        .map_err(|e| AppError::IoError(format!("Failed to read file: {}", e)))?;
    Ok(String::from_utf8_lossy(&bytes).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_CSV: &str = "\
Username,AddressStreet,City
alice,123 Main St,Springfield
bob,9 Elm Rd,Shelbyville";

    #[test]
    fn test_parse_simple_csv() {
        let dataset = CsvCodec::new().parse_content(SAMPLE_CSV).unwrap();

        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.columns(), vec!["Username", "AddressStreet", "City"]);
        assert_eq!(dataset.rows()[0].get("AddressStreet"), Some("123 Main St"));
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(CsvCodec::detect_delimiter("a,b,c\nd,e,f"), b',');
        assert_eq!(CsvCodec::detect_delimiter("a;b;c\nd;e;f"), b';');
    }

    #[test]
    fn test_empty_content_reports_empty_file() {
        let err = CsvCodec::new().parse_content("").unwrap_err();
        assert!(matches!(err, AppError::EmptyDataset));
    }

    #[test]
    fn test_round_trip_preserves_column_order() {
        let codec = CsvCodec::new();
        let dataset = codec.parse_content(SAMPLE_CSV).unwrap();
        let out = codec.to_string(&dataset).unwrap();
        assert!(out.starts_with("Username,AddressStreet,City\n"));
        assert!(out.contains("alice,123 Main St,Springfield"));
    }

    #[test]
    fn test_short_record_padded_with_blanks() {
        let dataset = CsvCodec::new().parse_content("A,B,C\n1,2").unwrap();
        assert_eq!(dataset.rows()[0].get("C"), Some(""));
    }
}
