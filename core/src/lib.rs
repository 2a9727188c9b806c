pub mod clean;
pub mod error;
pub mod models;
pub mod physics;
pub mod report;
pub mod smoothing;
pub mod storage;

#[cfg(feature = "python")]
pub mod py;

pub use clean::{clean_file, clean_log, write_cleaned, LEADING_ROWS_DISCARDED};
pub use error::{DataError, StorageError, VehicleError};
pub use models::{
    Conditions, ForceBreakdown, PathProfile, SegmentResult, VehicleParams, VelocitySample,
};
pub use physics::{grade_angle, RoundTo, VehicleModel};
pub use report::{print_energy_report, report_from_files, EnergyReport};
pub use smoothing::smooth_elevation;
pub use storage::{load_profile_csv, load_vehicle, read_profile_csv, save_vehicle};

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn vehicle_energy_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<py::PyCar>()?;
    m.add_function(wrap_pyfunction!(py::clean, m)?)?;
    Ok(())
}
