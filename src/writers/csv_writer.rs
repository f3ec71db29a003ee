use crate::error::Result;
use crate::models::CompanyRecord;
use crate::utils::constants::{
    COL_CITY, COL_COMPANY, COL_CONTACT_EMAIL, COL_COUNTRY, COL_CUSTOMER, COL_LATITUDE,
    COL_LONGITUDE, COL_NOTES, COL_ROLE, COL_VOLUME,
};
use std::path::Path;

/// Writes a record set back out with the canonical source column layout, so
/// exports round-trip through the reader.
pub struct CsvWriter;

impl CsvWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write all records to `path`, creating parent directories as needed.
    /// Returns the number of rows written.
    pub fn write_records(&self, records: &[CompanyRecord], path: &Path) -> Result<usize> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record([
            COL_COMPANY,
            COL_ROLE,
            COL_COUNTRY,
            COL_CITY,
            COL_LATITUDE,
            COL_LONGITUDE,
            COL_VOLUME,
            COL_CUSTOMER,
            COL_CONTACT_EMAIL,
            COL_NOTES,
        ])?;

        for record in records {
            let latitude = optional_number(record.latitude);
            let longitude = optional_number(record.longitude);
            let volume = optional_number(record.volume);

            writer.write_record([
                record.company.as_str(),
                record.role.as_str(),
                record.country.as_str(),
                record.city.as_str(),
                latitude.as_str(),
                longitude.as_str(),
                volume.as_str(),
                if record.is_customer { "Y" } else { "N" },
                record.contact_email.as_deref().unwrap_or(""),
                record.notes.as_deref().unwrap_or(""),
            ])?;
        }

        writer.flush()?;
        Ok(records.len())
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Absent values serialize as empty cells, never as zero
fn optional_number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
