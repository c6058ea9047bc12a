//! CSV-file invoice log.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use csv::ByteRecord;

use subtrack_core::Money;
use subtrack_invoicing::InvoiceLogEntry;

use super::store::{InvoiceLogError, InvoiceLogStore};

/// Column order of the log file.
pub const LOG_HEADER: [&str; 9] = [
    "created_at",
    "store_key",
    "store_name",
    "school_name",
    "delivery_date",
    "subtotal",
    "total",
    "invoice_number",
    "document_path",
];

/// Invoice log kept as a single CSV file with a header row.
///
/// Rows are read by position and tolerate missing trailing cells, so files
/// written before `document_path` existed still load.
#[derive(Debug, Clone)]
pub struct CsvInvoiceLogStore {
    path: PathBuf,
}

impl CsvInvoiceLogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn create_parent_dir(&self) -> Result<(), InvoiceLogError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => Ok(fs::create_dir_all(parent)?),
            _ => Ok(()),
        }
    }

    fn write_table(&self, entries: &[InvoiceLogEntry]) -> Result<(), InvoiceLogError> {
        self.create_parent_dir()?;
        let mut writer = csv::Writer::from_path(&self.path)?;
        writer.write_record(LOG_HEADER)?;
        for entry in entries {
            writer.write_record(to_record(entry))?;
        }
        writer.flush()?;
        Ok(())
    }
}

impl InvoiceLogStore for CsvInvoiceLogStore {
    fn ensure_initialized(&self) -> Result<(), InvoiceLogError> {
        if self.path.exists() {
            return Ok(());
        }
        tracing::debug!("creating invoice log at {:?}", self.path);
        self.write_table(&[])
    }

    fn append(&self, entry: &InvoiceLogEntry) -> Result<(), InvoiceLogError> {
        self.ensure_initialized()?;
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.write_record(to_record(entry))?;
        writer.flush()?;
        Ok(())
    }

    fn load(&self) -> Result<Vec<InvoiceLogEntry>, InvoiceLogError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;

        // Byte records: a row with invalid UTF-8 is decoded lossily instead of
        // failing the whole read.
        let mut entries = Vec::new();
        for record in reader.byte_records() {
            entries.push(from_record(&record?));
        }
        Ok(entries)
    }

    fn replace_all(&self, entries: &[InvoiceLogEntry]) -> Result<(), InvoiceLogError> {
        self.write_table(entries)
    }
}

fn to_record(entry: &InvoiceLogEntry) -> [String; 9] {
    [
        entry.created_at.clone(),
        entry.store_key.clone(),
        entry.store_name.clone(),
        entry.school_name.clone(),
        entry.delivery_date.clone(),
        entry.subtotal.to_string(),
        entry.total.to_string(),
        entry.invoice_number.clone(),
        entry.document_path.clone().unwrap_or_default(),
    ]
}

fn from_record(record: &ByteRecord) -> InvoiceLogEntry {
    let cell = |i: usize| {
        record
            .get(i)
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .unwrap_or_default()
    };
    let invoice_number = cell(7);
    let document_path = cell(8);

    InvoiceLogEntry {
        created_at: cell(0),
        store_key: cell(1),
        store_name: cell(2),
        school_name: cell(3),
        delivery_date: cell(4),
        subtotal: money_cell(&cell(5), "subtotal", &invoice_number),
        total: money_cell(&cell(6), "total", &invoice_number),
        document_path: (!document_path.is_empty()).then_some(document_path),
        invoice_number,
    }
}

/// Malformed amounts read as zero so one bad row never aborts a read.
fn money_cell(raw: &str, column: &str, invoice_number: &str) -> Money {
    match raw.parse::<Money>() {
        Ok(amount) => amount,
        Err(_) => {
            tracing::warn!(
                invoice_number,
                column,
                value = raw,
                "malformed amount in invoice log row; using 0.00"
            );
            Money::ZERO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(created_at: &str, number: &str, cents: i64) -> InvoiceLogEntry {
        InvoiceLogEntry {
            created_at: created_at.to_string(),
            store_key: "S01".to_string(),
            store_name: "SubTrack, Downtown".to_string(),
            school_name: "Lincoln Elementary".to_string(),
            delivery_date: "01-15-2025".to_string(),
            subtotal: Money::from_cents(cents),
            total: Money::from_cents(cents),
            invoice_number: number.to_string(),
            document_path: Some("documents/invoice_A.txt".to_string()),
        }
    }

    #[test]
    fn ensure_initialized_writes_header_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvInvoiceLogStore::new(dir.path().join("nested/invoice_log.csv"));

        store.ensure_initialized().unwrap();
        store.append(&entry("2025-01-01T10:00:00", "A", 100)).unwrap();
        store.ensure_initialized().unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.starts_with("created_at,store_key,store_name,school_name,delivery_date,subtotal,total,invoice_number,document_path\n"));
        assert_eq!(text.lines().count(), 2);
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn rows_survive_a_write_read_cycle_with_quoting() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvInvoiceLogStore::new(dir.path().join("invoice_log.csv"));
        let original = entry("2025-01-01T10:00:00", "A", 1780);

        store.append(&original).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded, vec![original]);
        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains(",17.80,17.80,"));
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvInvoiceLogStore::new(dir.path().join("absent.csv"));
        assert!(store.load().unwrap().is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn malformed_amounts_and_short_rows_are_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoice_log.csv");
        fs::write(
            &path,
            "created_at,store_key,store_name,school_name,delivery_date,subtotal,total,invoice_number,document_path\n\
             2025-01-01T10:00:00,S01,Downtown,Lincoln,01-15-2025,abc,,LIN001-01-15-2025,\n\
             2025-01-02T10:00:00,S01,Downtown,Lincoln,01-16-2025,5.00,5.00,LIN001-01-16-2025\n",
        )
        .unwrap();

        let loaded = CsvInvoiceLogStore::new(&path).load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].subtotal, Money::ZERO);
        assert_eq!(loaded[0].total, Money::ZERO);
        assert_eq!(loaded[0].document_path, None);
        assert_eq!(loaded[1].total, Money::from_cents(500));
        assert_eq!(loaded[1].document_path, None);
    }

    #[test]
    fn invalid_utf8_row_does_not_hide_other_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("invoice_log.csv");
        let mut bytes = b"created_at,store_key,store_name,school_name,delivery_date,subtotal,total,invoice_number,document_path\n\
            2025-01-01T10:00:00,S01,Downtown,Lincoln,01-15-2025,5.00,5.00,LIN001-01-15-2025,\n"
            .to_vec();
        bytes.extend_from_slice(b"2025-02-01T10:00:00,S01,Downtown,Caf\xe9 School,02-01-2025,7.00,7.00,GEN000-02-01-2025,\n");
        fs::write(&path, bytes).unwrap();

        let loaded = CsvInvoiceLogStore::new(&path).load().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].school_name, "Caf\u{FFFD} School");
        assert_eq!(loaded[1].total, Money::from_cents(700));
    }

    #[test]
    fn truncate_leaves_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let store = CsvInvoiceLogStore::new(dir.path().join("invoice_log.csv"));
        store.append(&entry("2025-01-01T10:00:00", "A", 100)).unwrap();

        store.truncate().unwrap();

        assert!(store.load().unwrap().is_empty());
        let text = fs::read_to_string(store.path()).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
