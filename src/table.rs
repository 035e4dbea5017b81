//! In-memory tabular dataset.
//!
//! A `Table` is a header row plus string cells, loaded from and stored to
//! CSV. Enrichment stages only ever append columns; row order is preserved
//! from load to store.

use anyhow::{anyhow, Context, Result};
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(headers: Vec<String>) -> Self {
        Self {
            headers,
            rows: Vec::new(),
        }
    }

    /// Load a table from a CSV file. Ragged rows are padded (or truncated)
    /// to the header width so every cell access is in bounds.
    pub fn load_csv(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("open {}", path.display()))?;
        let headers: Vec<String> = reader
            .headers()
            .with_context(|| format!("read headers from {}", path.display()))?
            .iter()
            .map(str::to_string)
            .collect();
        let width = headers.len();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.with_context(|| format!("read row from {}", path.display()))?;
            let mut row: Vec<String> = record.iter().map(str::to_string).collect();
            row.resize(width, String::new());
            rows.push(row);
        }
        Ok(Self { headers, rows })
    }

    /// Write the table back out as CSV, headers first.
    pub fn store_csv(&self, path: &Path) -> Result<()> {
        let mut writer =
            csv::Writer::from_path(path).with_context(|| format!("create {}", path.display()))?;
        writer
            .write_record(&self.headers)
            .context("write CSV headers")?;
        for row in &self.rows {
            writer.write_record(row).context("write CSV row")?;
        }
        writer
            .flush()
            .with_context(|| format!("flush {}", path.display()))?;
        Ok(())
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> &str {
        &self.rows[row][col]
    }

    /// Exact (case-sensitive) header lookup.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// First column whose lowercased name contains every given fragment.
    /// Used to locate loosely-named columns like `cuisine_path` variants.
    pub fn find_column(&self, fragments: &[&str]) -> Option<usize> {
        self.headers.iter().position(|h| {
            let lower = h.to_lowercase();
            fragments.iter().all(|f| lower.contains(f))
        })
    }

    /// All columns whose lowercased name contains any of the fragments.
    pub fn columns_containing(&self, fragments: &[&str]) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .filter(|(_, h)| {
                let lower = h.to_lowercase();
                fragments.iter().any(|f| lower.contains(f))
            })
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Append a column. The value vector must cover every row.
    pub fn add_column(&mut self, name: &str, values: Vec<String>) -> Result<()> {
        if values.len() != self.rows.len() {
            return Err(anyhow!(
                "column {} has {} values for {} rows",
                name,
                values.len(),
                self.rows.len()
            ));
        }
        self.headers.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
        Ok(())
    }

    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        let mut table = Table::new(vec!["recipe_name".to_string(), "ingredients".to_string()]);
        table.push_row(vec!["Pancakes".to_string(), "flour; egg".to_string()]);
        table.push_row(vec!["Toast".to_string()]);
        table
    }

    #[test]
    fn push_row_pads_to_header_width() {
        let table = sample();
        assert_eq!(table.cell(1, 1), "");
    }

    #[test]
    fn add_column_rejects_length_mismatch() {
        let mut table = sample();
        assert!(table.add_column("course", vec!["main".to_string()]).is_err());
        assert!(table
            .add_column("course", vec!["main".to_string(), "main".to_string()])
            .is_ok());
        assert_eq!(table.cell(0, 2), "main");
    }

    #[test]
    fn find_column_matches_all_fragments() {
        let table = Table::new(vec!["Cuisine_Path".to_string(), "title".to_string()]);
        assert_eq!(table.find_column(&["cuisine", "path"]), Some(0));
        assert_eq!(table.find_column(&["cuisine", "type"]), None);
    }

    #[test]
    fn csv_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("recipes.csv");
        sample().store_csv(&path).expect("store");
        let loaded = Table::load_csv(&path).expect("load");
        assert_eq!(loaded.row_count(), 2);
        assert_eq!(loaded.cell(0, 1), "flour; egg");
        assert_eq!(loaded.headers(), sample().headers());
    }
}
