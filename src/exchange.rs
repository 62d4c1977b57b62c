//! Delimited exchange file packaging
//!
//! One header line, one data row per exported menu, standard CSV quoting.
//! The writer holds an exclusive advisory lock for the duration of the
//! write and releases it before the handle closes.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use chrono::Utc;
use fs2::FileExt;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{debug, instrument};

use crate::codec::MenuExchangeRecord;
use crate::errors::{ExchangeError, ExchangeResult};
use crate::record::Payload;

/// Write one exchange record under `dir`, headers first, values in header
/// order. Returns the created file path.
#[instrument(level = "debug", skip(record))]
pub fn write_exchange_file(
    dir: &Path,
    file_id: &str,
    headers: &[&str],
    record: &MenuExchangeRecord,
) -> ExchangeResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(download_file_name(file_id));
    debug!("writing exchange file: {}", path.display());

    let file = File::create(&path)?;
    file.lock_exclusive()?;

    let mut writer = csv::Writer::from_writer(&file);
    writer.write_record(headers)?;
    let row: Vec<String> = headers
        .iter()
        .map(|header| cell_text(record.get(header)))
        .collect();
    writer.write_record(&row)?;
    writer.flush()?;
    drop(writer);

    file.unlock()?;
    Ok(path)
}

/// Read the first record of an exchange file back into a flat field map.
#[instrument(level = "debug")]
pub fn read_exchange_file(path: &Path) -> ExchangeResult<MenuExchangeRecord> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let row = reader
        .records()
        .next()
        .ok_or_else(|| ExchangeError::EmptyFile(path.to_path_buf()))??;

    let mut fields = Payload::new();
    for (header, cell) in headers.iter().zip(row.iter()) {
        fields.insert(header.to_string(), Value::String(cell.to_string()));
    }
    Ok(MenuExchangeRecord { fields })
}

/// Collision-resistant download name: the exchange identifier plus a hash
/// of the current time. The hash is a uniqueness token, not a checksum.
pub fn download_file_name(file_id: &str) -> String {
    let now = Utc::now();
    let stamp = format!("{}.{}", now.timestamp(), now.timestamp_subsec_nanos());
    format!("{}-{}.csv", file_id, hex::encode(Sha256::digest(stamp.as_bytes())))
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}
