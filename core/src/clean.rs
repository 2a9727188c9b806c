// core/src/clean.rs
//! Cleaning of raw test-drive sensor logs into a `(time, average_velocity)` series.
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use log::{debug, warn};

use crate::error::DataError;
use crate::models::VelocitySample;

/// The first rows of every log are recorded before the logger settles.
pub const LEADING_ROWS_DISCARDED: usize = 45;

const TIME_COLUMN: &str = "Time";
const VELOCITY_COLUMN: &str = "Velocity";

fn column_index(headers: &csv::StringRecord, name: &'static str) -> Result<usize, DataError> {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .ok_or(DataError::MissingColumn(name))
}

fn parse_field(
    record: &csv::StringRecord,
    idx: usize,
    row: usize,
    column: &'static str,
) -> Result<f64, DataError> {
    let raw = record.get(idx).unwrap_or("").trim();
    raw.parse::<f64>().map_err(|_| DataError::Parse {
        row,
        column,
        value: raw.to_string(),
    })
}

/// Reads a delimited log with at least `Time` and `Velocity` columns, drops the
/// leading rows and zero-bases the time column on the first kept row.
pub fn clean_log<R: Read>(reader: R) -> Result<Vec<VelocitySample>, DataError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let t_idx = column_index(&headers, TIME_COLUMN)?;
    let v_idx = column_index(&headers, VELOCITY_COLUMN)?;

    let mut out = Vec::new();
    let mut t0: Option<f64> = None;

    for (row, record) in rdr.records().enumerate() {
        let record = record?;
        if row < LEADING_ROWS_DISCARDED {
            continue;
        }
        let t = parse_field(&record, t_idx, row, TIME_COLUMN)?;
        let v = parse_field(&record, v_idx, row, VELOCITY_COLUMN)?;
        let start = *t0.get_or_insert(t);
        out.push(VelocitySample { time: t - start, average_velocity: v });
    }

    if out.is_empty() {
        warn!("clean_log: no rows left after discarding the first {LEADING_ROWS_DISCARDED}");
    } else {
        debug!("clean_log: kept {} rows", out.len());
    }
    Ok(out)
}

pub fn clean_file<P: AsRef<Path>>(path: P) -> Result<Vec<VelocitySample>, DataError> {
    let file = File::open(path.as_ref())?;
    clean_log(file)
}

/// Writes a cleaned series with the header `time,average_velocity`.
pub fn write_cleaned<W: Write>(writer: W, samples: &[VelocitySample]) -> Result<(), DataError> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    wtr.write_record(["time", "average_velocity"])?;
    for s in samples {
        wtr.serialize(s)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Velocity column of a cleaned series, ready to be used as a profile.
pub fn velocities(samples: &[VelocitySample]) -> Vec<f64> {
    samples.iter().map(|s| s.average_velocity).collect()
}
