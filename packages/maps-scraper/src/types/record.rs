//! Station records and the per-term batch that exports them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ExportResult;
use crate::export::{ensure_dir, output_path, write_csv, write_xlsx};
use crate::types::config::DEFAULT_OUTPUT_DIR;
use crate::types::popular_times::PopularTimeSlot;
use crate::types::table::{Table, Tabular};

/// Separator used when folding several sub-elements into one field.
pub const JOIN_SEPARATOR: &str = ", ";

/// One EV charging station as extracted from a listing.
///
/// Built in one step once every field is resolved; there is no partially
/// filled state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Place title, empty when the detail pane had none
    pub name: String,

    /// First address line, empty when absent
    pub address: String,

    /// Connector types joined with [`JOIN_SEPARATOR`]
    pub type_of_guns: String,

    /// Connector power ratings joined with [`JOIN_SEPARATOR`]
    pub power_in_kw: String,
}

impl Record {
    /// Build a record from raw scraped parts.
    ///
    /// Each sub-element text is trimmed on its own before joining. The two
    /// sequences are joined independently, so when their lengths differ the
    /// joined strings no longer line up position by position.
    pub fn from_parts<T, P>(
        name: Option<String>,
        address: Option<String>,
        gun_types: &[T],
        power_ratings: &[P],
    ) -> Self
    where
        T: AsRef<str>,
        P: AsRef<str>,
    {
        Self {
            name: name.unwrap_or_default(),
            address: address.unwrap_or_default(),
            type_of_guns: join_trimmed(gun_types),
            power_in_kw: join_trimmed(power_ratings),
        }
    }

    /// Positional `"type - power"` pairs built from the raw scraped lists.
    ///
    /// Each label is trimmed like in [`Record::from_parts`]. Zips the two
    /// sequences, so an unmatched tail on either side is dropped. Not part of
    /// the exported table.
    pub fn pair_chargers<T, P>(gun_types: &[T], power_ratings: &[P]) -> Vec<String>
    where
        T: AsRef<str>,
        P: AsRef<str>,
    {
        gun_types
            .iter()
            .zip(power_ratings)
            .map(|(gun, kw)| format!("{} - {}", gun.as_ref().trim(), kw.as_ref().trim()))
            .collect()
    }
}

impl Tabular for Record {
    const COLUMNS: &'static [&'static str] = &["name", "address", "type_of_guns", "power_in_kw"];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.address.clone(),
            self.type_of_guns.clone(),
            self.power_in_kw.clone(),
        ]
    }
}

fn join_trimmed<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(|p| p.as_ref().trim())
        .collect::<Vec<_>>()
        .join(JOIN_SEPARATOR)
}

/// Ordered records for one search term plus where to save them.
#[derive(Debug, Clone)]
pub struct RecordBatch {
    records: Vec<Record>,
    save_at: PathBuf,
}

impl Default for RecordBatch {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_DIR)
    }
}

impl RecordBatch {
    /// Create an empty batch that saves into `save_at`.
    pub fn new(save_at: impl Into<PathBuf>) -> Self {
        Self {
            records: Vec::new(),
            save_at: save_at.into(),
        }
    }

    /// Append a record. Discovery order is preserved.
    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    /// Records in discovery order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Output directory.
    pub fn save_at(&self) -> &Path {
        &self.save_at
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Tabular view with columns in field declaration order.
    pub fn dataframe(&self) -> Table {
        Record::to_table(&self.records)
    }

    /// Write `{save_at}/{filename}.xlsx`, creating the directory if needed.
    pub fn save_to_excel(&self, filename: &str) -> ExportResult<PathBuf> {
        ensure_dir(&self.save_at)?;
        let path = output_path(&self.save_at, filename, "xlsx");
        write_xlsx(&self.dataframe(), &path)?;
        info!("Saved {} records to {}", self.len(), path.display());
        Ok(path)
    }

    /// Write `{save_at}/{filename}.csv`, creating the directory if needed.
    pub fn save_to_csv(&self, filename: &str) -> ExportResult<PathBuf> {
        ensure_dir(&self.save_at)?;
        let path = output_path(&self.save_at, filename, "csv");
        write_csv(&self.dataframe(), &path)?;
        info!("Saved {} records to {}", self.len(), path.display());
        Ok(path)
    }

    /// Save popular-times data as CSV and XLSX next to the batch exports.
    ///
    /// Independent of the records held by this batch. Returns
    /// `(csv_path, xlsx_path)`.
    pub fn save_popular_times(
        &self,
        filename: &str,
        popular_times: &[PopularTimeSlot],
    ) -> ExportResult<(PathBuf, PathBuf)> {
        ensure_dir(&self.save_at)?;
        let table = PopularTimeSlot::to_table(popular_times);

        let csv_path = output_path(&self.save_at, filename, "csv");
        let excel_path = output_path(&self.save_at, filename, "xlsx");
        write_csv(&table, &csv_path)?;
        write_xlsx(&table, &excel_path)?;

        Ok((csv_path, excel_path))
    }
}

impl Extend<Record> for RecordBatch {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        self.records.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn station(name: &str) -> Record {
        Record::from_parts(Some(name.to_string()), None, &["CCS"], &["50kW"])
    }

    #[test]
    fn test_aggregated_fields_trim_each_part() {
        let record = Record::from_parts(None, None, &["Type2 - ", " Type1"], &[" 22kW", "7kW "]);
        assert_eq!(record.type_of_guns, "Type2 -, Type1");
        assert_eq!(record.power_in_kw, "22kW, 7kW");
    }

    #[test]
    fn test_empty_parts_give_empty_strings() {
        let none: [&str; 0] = [];
        let record = Record::from_parts(None, None, &none, &none);
        assert_eq!(record, Record::default());
        assert!(Record::pair_chargers(&none, &none).is_empty());
    }

    #[test]
    fn test_mismatched_lengths_keep_all_values() {
        let record = Record::from_parts(None, None, &["A", "B"], &["10kW"]);
        assert_eq!(record.type_of_guns, "A, B");
        assert_eq!(record.power_in_kw, "10kW");
        assert_eq!(Record::pair_chargers(&["A", "B"], &["10kW"]), vec!["A - 10kW"]);
    }

    #[test]
    fn test_pairing_keeps_labels_containing_the_separator() {
        let types = ["CCS, Combo 2", "Type 2"];
        let powers = ["150kW", "22kW"];

        let record = Record::from_parts(None, None, &types, &powers);
        assert_eq!(record.type_of_guns, "CCS, Combo 2, Type 2");
        assert_eq!(
            Record::pair_chargers(&types, &powers),
            vec!["CCS, Combo 2 - 150kW", "Type 2 - 22kW"]
        );
    }

    #[test]
    fn test_pairing_keeps_blank_labels() {
        let record = Record::from_parts(None, None, &[" "], &["50kW"]);
        assert_eq!(record.type_of_guns, "");
        assert_eq!(Record::pair_chargers(&[" "], &["50kW"]), vec![" - 50kW"]);
    }

    #[test]
    fn test_dataframe_columns_are_fixed() {
        let empty = RecordBatch::new("unused");
        let frame = empty.dataframe();
        assert_eq!(frame.columns(), ["name", "address", "type_of_guns", "power_in_kw"]);
        assert!(frame.is_empty());

        let mut batch = RecordBatch::new("unused");
        batch.push(station("One"));
        batch.push(Record::default());
        let frame = batch.dataframe();
        assert_eq!(frame.columns(), empty.dataframe().columns());
        assert_eq!(frame.rows()[0], vec!["One", "", "CCS", "50kW"]);
        assert_eq!(frame.rows()[1], vec!["", "", "", ""]);
    }

    #[test]
    fn test_batch_preserves_order_and_duplicates() {
        let mut batch = RecordBatch::default();
        batch.extend([station("B"), station("A"), station("B")]);
        let names: Vec<_> = batch.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["B", "A", "B"]);
        assert_eq!(batch.save_at(), Path::new("output"));
    }

    #[test]
    fn test_save_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("out");
        let mut batch = RecordBatch::new(&target);
        batch.push(station("One"));

        let csv = batch.save_to_csv("google_maps_data_x").unwrap();
        let xlsx = batch.save_to_excel("google_maps_data_x").unwrap();

        assert_eq!(csv, target.join("google_maps_data_x.csv"));
        assert_eq!(xlsx, target.join("google_maps_data_x.xlsx"));
        assert!(csv.is_file());
        assert!(xlsx.is_file());
    }

    #[test]
    fn test_save_popular_times_writes_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let batch = RecordBatch::new(dir.path());
        let slots = vec![
            PopularTimeSlot::new("Monday", 8, 35),
            PopularTimeSlot::new("Monday", 9, 60),
        ];

        let (csv, xlsx) = batch.save_popular_times("popular", &slots).unwrap();
        assert!(xlsx.is_file());
        let text = std::fs::read_to_string(csv).unwrap();
        assert_eq!(text, "day,hour,busyness\nMonday,8,35\nMonday,9,60\n");
    }
}
