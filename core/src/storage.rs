use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{info, warn};
use serde::Deserialize;

use crate::error::{DataError, StorageError};
use crate::models::{PathProfile, VehicleParams};

/// Reads vehicle parameters from disk (JSON).
/// If the file does not exist the default vehicle is returned.
/// Missing fields take their documented defaults.
pub fn load_vehicle(path: &str) -> Result<VehicleParams, StorageError> {
    if !Path::new(path).exists() {
        warn!("vehicle config {} not found, using defaults", path);
        return Ok(VehicleParams::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|source| StorageError::Io {
        path: path.to_string(),
        source,
    })?;
    let mut de = serde_json::Deserializer::from_str(&contents);
    let params: VehicleParams = serde_path_to_error::deserialize(&mut de).map_err(|e| {
        StorageError::Parse {
            path: path.to_string(),
            at: e.path().to_string(),
            message: e.inner().to_string(),
        }
    })?;
    info!("vehicle config loaded from {} (mass={} kg)", path, params.mass);
    Ok(params)
}

/// Writes vehicle parameters to disk as pretty-printed JSON.
pub fn save_vehicle(params: &VehicleParams, path: &str) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(params)?;
    std::fs::write(path, json).map_err(|source| StorageError::Io {
        path: path.to_string(),
        source,
    })?;
    info!("vehicle config saved to {}", path);
    Ok(())
}

#[derive(Debug, Deserialize)]
struct ProfileRow {
    #[serde(alias = "v", alias = "v_ms")]
    velocity: f64,
    #[serde(alias = "elev", alias = "altitude_m")]
    elevation: f64,
}

/// Reads a `velocity,elevation` CSV into a profile.
pub fn read_profile_csv<R: Read>(reader: R) -> Result<PathProfile, DataError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut profile = PathProfile::default();
    for row in rdr.deserialize::<ProfileRow>() {
        let row = row?;
        profile.velocities.push(row.velocity);
        profile.elevations.push(row.elevation);
    }
    Ok(profile)
}

pub fn load_profile_csv(path: &str) -> Result<PathProfile, DataError> {
    let profile = read_profile_csv(File::open(path)?)?;
    info!("profile loaded from {} ({} samples)", path, profile.len());
    Ok(profile)
}
