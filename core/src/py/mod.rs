// Python bindings, built with `--features python`.
//
// Keyword names and defaults follow the original Python `Car` class so
// existing scripts can switch over without changes.
#![allow(non_snake_case)]

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::clean::clean_file;
use crate::models::{Conditions, VehicleParams};
use crate::physics::{
    VehicleModel, DEFAULT_CDA, DEFAULT_CRR, DEFAULT_MASS_KG, DEFAULT_MAX_FORCE_N,
    DEFAULT_SEGMENT_M, DEFAULT_TIMESTEP_S, G, RHO,
};

fn value_error<E: std::fmt::Display>(e: E) -> PyErr {
    PyValueError::new_err(e.to_string())
}

#[pyclass(name = "Car")]
pub struct PyCar {
    inner: VehicleModel,
}

#[pymethods]
impl PyCar {
    #[new]
    #[pyo3(signature = (
        m = DEFAULT_MASS_KG,
        Crr = DEFAULT_CRR,
        CdA = DEFAULT_CDA,
        rho = RHO,
        g = G,
        max_force = DEFAULT_MAX_FORCE_N
    ))]
    fn new(m: f64, Crr: f64, CdA: f64, rho: f64, g: f64, max_force: f64) -> PyResult<Self> {
        let params = VehicleParams {
            mass: m,
            rolling_resistance_coefficient: Crr,
            drag_coefficient: CdA,
            air_density: rho,
            gravity: g,
            max_force,
        };
        let inner = VehicleModel::new(params).map_err(value_error)?;
        Ok(Self { inner })
    }

    #[getter]
    fn m(&self) -> f64 {
        self.inner.params().mass
    }

    #[getter]
    fn max_force(&self) -> f64 {
        self.inner.max_force()
    }

    #[pyo3(signature = (v, vwind = 0.0, v_old = None, theta = 0.0, timestep = DEFAULT_TIMESTEP_S))]
    fn force_req(
        &self,
        v: f64,
        vwind: f64,
        v_old: Option<f64>,
        theta: f64,
        timestep: f64,
    ) -> PyResult<f64> {
        let cond = Conditions { vwind, theta, timestep };
        self.inner.force_required(v, v_old, &cond).map_err(value_error)
    }

    #[pyo3(signature = (v_old, vwind = 0.0, theta = 0.0, timestep = DEFAULT_TIMESTEP_S))]
    fn max_velocity(&self, v_old: f64, vwind: f64, theta: f64, timestep: f64) -> PyResult<f64> {
        let cond = Conditions { vwind, theta, timestep };
        self.inner.max_velocity(v_old, &cond).map_err(value_error)
    }

    #[pyo3(signature = (v_profile, e_profile, distance = DEFAULT_SEGMENT_M, wind = 0.0))]
    fn energy_used(
        &self,
        v_profile: Vec<f64>,
        e_profile: Vec<f64>,
        distance: f64,
        wind: f64,
    ) -> PyResult<f64> {
        self.inner
            .energy_used(&v_profile, &e_profile, distance, wind)
            .map_err(value_error)
    }
}

/// Cleaned `(time, average_velocity)` rows of a sensor log.
#[pyfunction]
pub fn clean(file: &str) -> PyResult<Vec<(f64, f64)>> {
    let samples = clean_file(file).map_err(value_error)?;
    Ok(samples.iter().map(|s| (s.time, s.average_velocity)).collect())
}
