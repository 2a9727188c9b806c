// core/src/error.rs
use thiserror::Error;

/// Errors from the vehicle model itself. Every variant is local to one call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VehicleError {
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    /// b² − 4ac < 0: the force ceiling cannot sustain any velocity here.
    #[error("no achievable velocity under max force {max_force} N (discriminant {discriminant})")]
    InfeasibleVelocity { max_force: f64, discriminant: f64 },

    #[error("division by zero: {0}")]
    DivisionByZero(&'static str),

    #[error("undefined result: {0}")]
    UndefinedResult(String),

    #[error("profile length mismatch: {velocities} velocities vs {elevations} elevations")]
    ProfileLengthMismatch { velocities: usize, elevations: usize },

    #[error("profile needs at least 2 samples, got {0}")]
    ProfileTooShort(usize),
}

/// Errors from reading/cleaning tabular sensor logs.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("missing column `{0}`")]
    MissingColumn(&'static str),

    #[error("row {row}: cannot parse `{value}` in column `{column}`")]
    Parse {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// Errors from loading/saving vehicle configs.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error in {path} at `{at}`: {message}")]
    Parse {
        path: String,
        at: String,
        message: String,
    },

    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}
