use serde::{Deserialize, Serialize};

use crate::physics::{
    DEFAULT_CDA, DEFAULT_CRR, DEFAULT_MASS_KG, DEFAULT_MAX_FORCE_N, DEFAULT_TIMESTEP_S, G, RHO,
};

/// Physical parameters of a vehicle. Accepts the short names used in the
/// original tooling (`m`, `Crr`, `CdA`, `rho`, `g`) as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleParams {
    #[serde(default = "default_mass", alias = "m")]
    pub mass: f64, // kg
    #[serde(default = "default_crr", alias = "Crr", alias = "crr")]
    pub rolling_resistance_coefficient: f64,
    #[serde(default = "default_cda", alias = "CdA", alias = "cda")]
    pub drag_coefficient: f64, // m² (CdA)
    #[serde(default = "default_rho", alias = "rho")]
    pub air_density: f64, // kg/m³
    #[serde(default = "default_g", alias = "g")]
    pub gravity: f64, // m/s²
    #[serde(default = "default_max_force")]
    pub max_force: f64, // N
}

fn default_mass() -> f64 { DEFAULT_MASS_KG }
fn default_crr() -> f64 { DEFAULT_CRR }
fn default_cda() -> f64 { DEFAULT_CDA }
fn default_rho() -> f64 { RHO }
fn default_g() -> f64 { G }
fn default_max_force() -> f64 { DEFAULT_MAX_FORCE_N }

impl Default for VehicleParams {
    fn default() -> Self {
        Self {
            mass: DEFAULT_MASS_KG,
            rolling_resistance_coefficient: DEFAULT_CRR,
            drag_coefficient: DEFAULT_CDA,
            air_density: RHO,
            gravity: G,
            max_force: DEFAULT_MAX_FORCE_N,
        }
    }
}

/// Call-time conditions shared by `force_required` and `max_velocity`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    /// Wind relative to the car, positive with the car's direction of travel.
    #[serde(default)]
    pub vwind: f64,
    /// Climb angle in radians, positive uphill.
    #[serde(default)]
    pub theta: f64,
    /// Seconds between the previous and the current velocity.
    #[serde(default = "default_timestep")]
    pub timestep: f64,
}

fn default_timestep() -> f64 { DEFAULT_TIMESTEP_S }

impl Default for Conditions {
    fn default() -> Self {
        Self { vwind: 0.0, theta: 0.0, timestep: DEFAULT_TIMESTEP_S }
    }
}

impl Conditions {
    pub fn with_wind(mut self, vwind: f64) -> Self {
        self.vwind = vwind;
        self
    }

    pub fn with_theta(mut self, theta: f64) -> Self {
        self.theta = theta;
        self
    }

    pub fn with_timestep(mut self, timestep: f64) -> Self {
        self.timestep = timestep;
        self
    }
}

/// Force components (N) behind one `force_required` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ForceBreakdown {
    pub friction: f64,
    pub drag: f64,
    pub gravity: f64,
    pub accel: f64,
    pub total: f64,
}

/// One step between profile samples `index` and `index + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentResult {
    pub index: usize,
    pub theta: f64,    // rad
    pub v_avg: f64,    // m/s
    pub timestep: f64, // s
    pub force: ForceBreakdown,
}

/// Velocities (m/s) and elevations (m) sampled every `distance` metres.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PathProfile {
    pub velocities: Vec<f64>,
    pub elevations: Vec<f64>,
}

impl PathProfile {
    pub fn new(velocities: Vec<f64>, elevations: Vec<f64>) -> Self {
        Self { velocities, elevations }
    }

    /// Constant-speed profile over the given elevations.
    pub fn constant_speed(v_ms: f64, elevations: Vec<f64>) -> Self {
        Self { velocities: vec![v_ms; elevations.len()], elevations }
    }

    pub fn len(&self) -> usize {
        self.velocities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.velocities.is_empty()
    }
}

/// One row of a cleaned sensor log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocitySample {
    pub time: f64,             // s, zero-based
    pub average_velocity: f64, // m/s
}
