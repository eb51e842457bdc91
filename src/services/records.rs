// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Nursery sheet loading (CSV or XLSX) into facility records.
//!
//! Loading is lenient: a required column the sheet does not carry is filled
//! with "N/A" for every row instead of failing the load. Rows whose
//! coordinates can't be used are kept but never placed on the map.

use crate::models::facility::{CellValue, FacilityRecord, REQUIRED_COLUMNS};
use crate::services::source::{DataSource, SourceError};
use calamine::{Data, Reader, Xlsx};
use std::io::{Cursor, Read};

/// First bytes of a ZIP archive; every XLSX workbook starts with them.
const ZIP_SIGNATURE: &[u8] = b"PK\x03\x04";

/// Sheet row number (1-based, header is row 1) and its cells.
type SheetRow = (usize, Vec<CellValue>);

/// Validated nursery records, in sheet order.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<FacilityRecord>,
    missing_columns: Vec<&'static str>,
}

impl RecordStore {
    /// Fetch and parse the nursery sheet.
    pub async fn load(source: &DataSource, http: &reqwest::Client) -> Result<Self, DataLoadError> {
        tracing::info!(source = %source, "Loading nursery records");
        let bytes = source.fetch_bytes(http).await?;
        let store = Self::from_bytes(&bytes)?;
        tracing::info!(
            count = store.len(),
            locatable = store.locatable_count(),
            "Loaded nursery records"
        );
        Ok(store)
    }

    /// Parse a sheet, sniffing XLSX from the ZIP signature and treating
    /// anything else as CSV.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DataLoadError> {
        if bytes.starts_with(ZIP_SIGNATURE) {
            Self::from_xlsx(bytes)
        } else {
            Self::from_csv(bytes)
        }
    }

    /// Parse a CSV sheet with a header row.
    pub fn from_csv<R: Read>(reader: R) -> Result<Self, DataLoadError> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .map_err(|e| DataLoadError::Parse(e.to_string()))?
            .iter()
            .map(normalize_header)
            .collect();

        let mut rows: Vec<SheetRow> = Vec::new();
        for (i, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| DataLoadError::Parse(e.to_string()))?;
            if record.iter().all(|s| s.trim().is_empty()) {
                continue;
            }
            rows.push((i + 2, record.iter().map(CellValue::from_text).collect()));
        }

        Ok(Self::from_table(&headers, rows))
    }

    /// Parse the first worksheet of an XLSX workbook.
    pub fn from_xlsx(bytes: &[u8]) -> Result<Self, DataLoadError> {
        let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(Cursor::new(bytes))
            .map_err(|e: calamine::XlsxError| DataLoadError::Parse(e.to_string()))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or(DataLoadError::EmptyWorkbook)?
            .map_err(|e| DataLoadError::Parse(e.to_string()))?;

        let mut sheet_rows = range.rows();
        let headers: Vec<String> = sheet_rows
            .next()
            .map(|row| row.iter().map(|c| normalize_header(&c.to_string())).collect())
            .unwrap_or_default();

        let rows: Vec<SheetRow> = sheet_rows
            .enumerate()
            .filter(|(_, row)| !row.iter().all(is_blank_xlsx_cell))
            .map(|(i, row)| (i + 2, row.iter().map(xlsx_cell).collect()))
            .collect();

        Ok(Self::from_table(&headers, rows))
    }

    /// Wrap already-built records (fixtures, benchmarks).
    pub fn from_records(records: Vec<FacilityRecord>) -> Self {
        Self {
            records,
            missing_columns: Vec::new(),
        }
    }

    /// Build records from non-blank rows. Blankness is decided on the raw
    /// cells, so a literal "N/A" row is still a record.
    fn from_table(headers: &[String], rows: Vec<SheetRow>) -> Self {
        let mut columns = [None; REQUIRED_COLUMNS.len()];
        let mut missing_columns = Vec::new();
        for (slot, column) in columns.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = headers.iter().position(|h| h == column);
            if slot.is_none() {
                tracing::warn!(column, "Required column missing, filling with N/A");
                missing_columns.push(column);
            }
        }
        let [name, longitude, latitude, capacity, plants_available, contact] = columns;
        let has_coordinates = longitude.is_some() && latitude.is_some();

        let mut records = Vec::with_capacity(rows.len());
        for (line, row) in &rows {
            let record = FacilityRecord {
                name: cell(row, name).to_string(),
                longitude: cell(row, longitude),
                latitude: cell(row, latitude),
                capacity: cell(row, capacity),
                plants_available: cell(row, plants_available),
                contact: cell(row, contact).to_string(),
            };

            if has_coordinates && record.coordinate().is_none() {
                tracing::warn!(
                    row = *line,
                    name = %record.name,
                    latitude = %record.latitude,
                    longitude = %record.longitude,
                    "Nursery has unusable coordinates, it will not be mapped"
                );
            }
            records.push(record);
        }

        Self {
            records,
            missing_columns,
        }
    }

    pub fn records(&self) -> &[FacilityRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records with usable coordinates.
    pub fn locatable_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.coordinate().is_some())
            .count()
    }

    /// Required columns the sheet did not carry.
    pub fn missing_columns(&self) -> &[&'static str] {
        &self.missing_columns
    }
}

fn cell(row: &[CellValue], idx: Option<usize>) -> CellValue {
    idx.and_then(|i| row.get(i))
        .cloned()
        .unwrap_or_else(CellValue::not_available)
}

fn normalize_header(raw: &str) -> String {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .to_string()
}

fn is_blank_xlsx_cell(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn xlsx_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::not_available(),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::String(s) => CellValue::from_text(s),
        other => CellValue::from_text(&other.to_string()),
    }
}

/// Errors from loading the nursery sheet. Any of these means no map can
/// be shown.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DataLoadError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Failed to parse nursery sheet: {0}")]
    Parse(String),

    #[error("Workbook has no worksheets")]
    EmptyWorkbook,
}
