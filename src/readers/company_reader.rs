use crate::error::{ProcessingError, Result};
use crate::models::CompanyRecord;
use crate::utils::constants::{
    COL_CITY, COL_COMPANY, COL_CONTACT_EMAIL, COL_COUNTRY, COL_CUSTOMER, COL_LATITUDE,
    COL_LONGITUDE, COL_NOTES, COL_ROLE, COL_VOLUME, REQUIRED_COLUMNS, UNKNOWN_ROLE,
};
use crate::utils::coordinates::parse_coordinate_pair;
use std::collections::HashMap;
use std::path::Path;

/// Per-load tally of cells that failed coercion. Bad cells become absent
/// values, never dropped rows, so the counters are the only trace of them.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub total_rows: usize,
    pub volume_warnings: usize,
    pub coordinate_warnings: usize,
    pub customer_flag_warnings: usize,
    pub rows_missing_company: usize,
}

impl LoadReport {
    pub fn has_warnings(&self) -> bool {
        self.volume_warnings > 0
            || self.coordinate_warnings > 0
            || self.customer_flag_warnings > 0
            || self.rows_missing_company > 0
    }

    pub fn generate_summary(&self) -> String {
        let mut summary = format!("Loaded {} rows", self.total_rows);
        if self.volume_warnings > 0 {
            summary.push_str(&format!("\n  {} unparseable volume cells", self.volume_warnings));
        }
        if self.coordinate_warnings > 0 {
            summary.push_str(&format!(
                "\n  {} rows with unusable coordinates",
                self.coordinate_warnings
            ));
        }
        if self.customer_flag_warnings > 0 {
            summary.push_str(&format!(
                "\n  {} unrecognized customer flags (treated as No)",
                self.customer_flag_warnings
            ));
        }
        if self.rows_missing_company > 0 {
            summary.push_str(&format!(
                "\n  {} rows without a company name",
                self.rows_missing_company
            ));
        }
        summary
    }
}

enum VolumeCell {
    Present(f64),
    Empty,
    Unusable,
}

/// Reads and normalizes the company dataset.
///
/// Normalization is lossless: every source row yields a record, with dirty
/// cells degraded to absent values. Only a missing required column aborts
/// the load.
pub struct CompanyReader;

impl CompanyReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_companies(&self, path: &Path) -> Result<(Vec<CompanyRecord>, LoadReport)> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

        let columns = Self::map_columns(reader.headers()?);
        Self::check_schema(&columns)?;

        let mut records = Vec::new();
        let mut report = LoadReport::default();

        for row_result in reader.records() {
            let row = row_result?;
            records.push(self.normalize_row(&row, &columns, &mut report));
            report.total_rows += 1;
        }

        Ok((records, report))
    }

    /// Map trimmed, case-folded header names to their column index. On a
    /// duplicate header the first occurrence wins.
    fn map_columns(headers: &csv::StringRecord) -> HashMap<String, usize> {
        let mut columns = HashMap::new();
        for (index, name) in headers.iter().enumerate() {
            columns.entry(name.trim().to_lowercase()).or_insert(index);
        }
        columns
    }

    fn check_schema(columns: &HashMap<String, usize>) -> Result<()> {
        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|name| !columns.contains_key(&name.to_lowercase()))
            .map(|name| name.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ProcessingError::Schema { missing })
        }
    }

    /// Fetch a cell by canonical column name; absent columns and short rows
    /// read as empty.
    fn cell<'a>(
        row: &'a csv::StringRecord,
        columns: &HashMap<String, usize>,
        name: &str,
    ) -> &'a str {
        columns
            .get(&name.to_lowercase())
            .and_then(|&index| row.get(index))
            .map(str::trim)
            .unwrap_or("")
    }

    fn normalize_row(
        &self,
        row: &csv::StringRecord,
        columns: &HashMap<String, usize>,
        report: &mut LoadReport,
    ) -> CompanyRecord {
        let cell = |name: &str| Self::cell(row, columns, name);

        let company = cell(COL_COMPANY).to_string();
        if company.is_empty() {
            report.rows_missing_company += 1;
        }

        let role = match cell(COL_ROLE) {
            "" => UNKNOWN_ROLE.to_string(),
            role => role.to_string(),
        };

        let mut record = CompanyRecord::new(
            company,
            role,
            cell(COL_COUNTRY).to_string(),
            cell(COL_CITY).to_string(),
        );

        record.volume = match Self::parse_volume(cell(COL_VOLUME)) {
            VolumeCell::Present(volume) => Some(volume),
            VolumeCell::Empty => None,
            VolumeCell::Unusable => {
                report.volume_warnings += 1;
                None
            }
        };

        let lat_raw = cell(COL_LATITUDE);
        let lon_raw = cell(COL_LONGITUDE);
        match parse_coordinate_pair(lat_raw, lon_raw) {
            Some((latitude, longitude)) => record.set_coordinates(latitude, longitude),
            None => {
                // Count only when there was something to lose
                if !lat_raw.is_empty() || !lon_raw.is_empty() {
                    report.coordinate_warnings += 1;
                }
            }
        }

        let (is_customer, recognized) = Self::parse_customer_flag(cell(COL_CUSTOMER));
        record.is_customer = is_customer;
        if !recognized {
            report.customer_flag_warnings += 1;
        }

        record.contact_email = Self::optional_cell(cell(COL_CONTACT_EMAIL));
        record.notes = Self::optional_cell(cell(COL_NOTES));

        record
    }

    fn optional_cell(value: &str) -> Option<String> {
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

    /// Coerce a volume cell, accepting thousands separators (`"50,000"`).
    /// Negative and non-finite values are unusable, not clamped.
    fn parse_volume(raw: &str) -> VolumeCell {
        if raw.is_empty() {
            return VolumeCell::Empty;
        }

        let cleaned: String = raw.chars().filter(|c| *c != ',' && *c != ' ').collect();
        match cleaned.parse::<f64>() {
            Ok(volume) if volume.is_finite() && volume >= 0.0 => VolumeCell::Present(volume),
            _ => VolumeCell::Unusable,
        }
    }

    /// Derive the customer flag from a free-text Y/N cell.
    ///
    /// Returns `(value, recognized)`. Unrecognized non-empty text degrades to
    /// false rather than failing the load; a partially-dirty import should
    /// not crash the session.
    fn parse_customer_flag(raw: &str) -> (bool, bool) {
        match raw.trim().to_lowercase().as_str() {
            "y" | "yes" | "1" | "true" => (true, true),
            "n" | "no" | "0" | "false" | "" => (false, true),
            _ => (false, false),
        }
    }
}

impl Default for CompanyReader {
    fn default() -> Self {
        Self::new()
    }
}
