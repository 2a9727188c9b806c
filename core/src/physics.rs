// core/src/physics.rs
use log::{debug, warn};

use crate::error::VehicleError;
use crate::models::{Conditions, ForceBreakdown, PathProfile, SegmentResult, VehicleParams};

pub const G: f64 = 9.81;                  // gravitation (m/s²)
pub const RHO: f64 = 1.225;               // air density at 25 °C (kg/m³)
pub const DEFAULT_MASS_KG: f64 = 720.0;
pub const DEFAULT_CRR: f64 = 0.0015;
pub const DEFAULT_CDA: f64 = 0.15;        // m²
pub const DEFAULT_MAX_FORCE_N: f64 = 300.0;
pub const DEFAULT_TIMESTEP_S: f64 = 30.0;
pub const DEFAULT_SEGMENT_M: f64 = 100.0; // profile sample spacing

// --- RoundTo trait (public, used by the report) ---
pub trait RoundTo {
    fn round_to(self, dp: u32) -> f64;
}

impl RoundTo for f64 {
    #[inline]
    fn round_to(self, dp: u32) -> f64 {
        if dp == 0 { return self.round(); }
        let factor = 10_f64.powi(dp as i32);
        (self * factor).round() / factor
    }
}

fn require_finite(name: &'static str, value: f64) -> Result<f64, VehicleError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(VehicleError::InvalidParameter { name, value, reason: "must be finite" })
    }
}

fn require_positive(name: &'static str, value: f64) -> Result<f64, VehicleError> {
    require_finite(name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(VehicleError::InvalidParameter { name, value, reason: "must be > 0" })
    }
}

fn require_non_negative(name: &'static str, value: f64) -> Result<f64, VehicleError> {
    require_finite(name, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(VehicleError::InvalidParameter { name, value, reason: "must be >= 0" })
    }
}

/// Zero is reported as a division by zero, anything else non-positive as a bad parameter.
fn require_timestep(timestep: f64) -> Result<f64, VehicleError> {
    if timestep == 0.0 {
        return Err(VehicleError::DivisionByZero("timestep is zero"));
    }
    require_positive("timestep", timestep)
}

/// Climb angle (rad) over `distance` horizontal metres.
#[inline]
pub fn grade_angle(elevation_gain: f64, distance: f64) -> f64 {
    (elevation_gain / distance).atan()
}

/// Point-mass car: rolling resistance, aerodynamic drag, grade and inertia
/// balanced against a propulsion force ceiling.
///
/// Immutable after construction, so a model can be shared freely between threads.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleModel {
    params: VehicleParams,
}

impl Default for VehicleModel {
    fn default() -> Self {
        Self { params: VehicleParams::default() }
    }
}

impl VehicleModel {
    pub fn new(params: VehicleParams) -> Result<Self, VehicleError> {
        require_positive("mass", params.mass)?;
        require_non_negative("rolling_resistance_coefficient", params.rolling_resistance_coefficient)?;
        require_non_negative("drag_coefficient", params.drag_coefficient)?;
        require_positive("air_density", params.air_density)?;
        require_positive("gravity", params.gravity)?;
        require_positive("max_force", params.max_force)?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &VehicleParams {
        &self.params
    }

    pub fn max_force(&self) -> f64 {
        self.params.max_force
    }

    /// ½·ρ·CdA
    #[inline]
    fn half_rho_cda(&self) -> f64 {
        0.5 * self.params.air_density * self.params.drag_coefficient
    }

    #[inline]
    fn friction(&self, theta: f64) -> f64 {
        let p = &self.params;
        p.mass * p.gravity * theta.cos() * p.rolling_resistance_coefficient
    }

    #[inline]
    fn grade_force(&self, theta: f64) -> f64 {
        let p = &self.params;
        p.mass * p.gravity * theta.sin()
    }

    /// Force components needed to go from `v_old` to `v` within `cond.timestep`.
    /// `v_old = None` means the speed is unchanged (no acceleration term).
    pub fn force_breakdown(
        &self,
        v: f64,
        v_old: Option<f64>,
        cond: &Conditions,
    ) -> Result<ForceBreakdown, VehicleError> {
        require_finite("v", v)?;
        let v_old = require_finite("v_old", v_old.unwrap_or(v))?;
        require_finite("vwind", cond.vwind)?;
        require_finite("theta", cond.theta)?;
        let timestep = require_timestep(cond.timestep)?;

        let friction = self.friction(cond.theta);
        let drag = self.half_rho_cda() * (v + cond.vwind).powi(2);
        let gravity = self.grade_force(cond.theta);
        let accel = self.params.mass * (v - v_old) / timestep;

        Ok(ForceBreakdown {
            friction,
            drag,
            gravity,
            accel,
            total: accel + friction + drag + gravity,
        })
    }

    /// Net propulsive force (N).
    pub fn force_required(
        &self,
        v: f64,
        v_old: Option<f64>,
        cond: &Conditions,
    ) -> Result<f64, VehicleError> {
        Ok(self.force_breakdown(v, v_old, cond)?.total)
    }

    /// Highest velocity reachable from `v_old` within `cond.timestep` when the
    /// motors deliver exactly `max_force`.
    ///
    /// Solves `a·v² + b·v + c = 0` for the `+sqrt` root. With zero drag area the
    /// equation is linear and is solved as such.
    pub fn max_velocity(&self, v_old: f64, cond: &Conditions) -> Result<f64, VehicleError> {
        require_finite("v_old", v_old)?;
        require_finite("vwind", cond.vwind)?;
        require_finite("theta", cond.theta)?;
        let timestep = require_timestep(cond.timestep)?;

        let p = &self.params;
        let a = self.half_rho_cda();
        let b = p.mass / timestep + cond.vwind * p.air_density * p.drag_coefficient;
        // a·vwind² keeps the balance identical to force_required when there is wind
        let c = self.friction(cond.theta) + self.grade_force(cond.theta) + a * cond.vwind.powi(2)
            - p.max_force
            - p.mass * v_old / timestep;
        debug!("max_velocity: a={a} b={b} c={c}");

        if a == 0.0 {
            // b = m/timestep > 0 here
            return Ok(-c / b);
        }

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            warn!(
                "max_velocity infeasible: v_old={v_old} theta={} max_force={}",
                cond.theta, p.max_force
            );
            return Err(VehicleError::InfeasibleVelocity { max_force: p.max_force, discriminant });
        }

        Ok((-b + discriminant.sqrt()) / (2.0 * a))
    }

    /// Per-segment breakdown of a velocity/elevation profile sampled every
    /// `distance` metres.
    pub fn segments(
        &self,
        v_profile: &[f64],
        e_profile: &[f64],
        distance: f64,
        wind: f64,
    ) -> Result<Vec<SegmentResult>, VehicleError> {
        if v_profile.len() != e_profile.len() {
            return Err(VehicleError::ProfileLengthMismatch {
                velocities: v_profile.len(),
                elevations: e_profile.len(),
            });
        }
        if v_profile.len() < 2 {
            return Err(VehicleError::ProfileTooShort(v_profile.len()));
        }
        let distance = require_positive("distance", distance)?;

        let mut out = Vec::with_capacity(v_profile.len() - 1);
        for (i, (v, e)) in v_profile.windows(2).zip(e_profile.windows(2)).enumerate() {
            let (v_old, v_new) = (v[0], v[1]);
            let theta = grade_angle(e[1] - e[0], distance);
            let v_avg = (v_new + v_old) / 2.0;
            if !(v_avg > 0.0) {
                return Err(VehicleError::UndefinedResult(format!(
                    "segment {i}: average velocity {v_avg} m/s gives no finite timestep"
                )));
            }
            let timestep = distance / v_avg;

            let cond = Conditions { vwind: wind, theta, timestep };
            let force = self.force_breakdown(v_new, Some(v_old), &cond)?;
            out.push(SegmentResult { index: i, theta, v_avg, timestep, force });
        }
        debug!("segments: {} over {} m spacing", out.len(), distance);
        Ok(out)
    }

    /// Sum of per-segment required forces along the profile.
    ///
    /// The accumulated value is a sum of forces (N), not joules; multiply by
    /// `distance` or use [`VehicleModel::work_done`] for energy.
    pub fn energy_used(
        &self,
        v_profile: &[f64],
        e_profile: &[f64],
        distance: f64,
        wind: f64,
    ) -> Result<f64, VehicleError> {
        let segments = self.segments(v_profile, e_profile, distance, wind)?;
        Ok(segments.iter().map(|s| s.force.total).sum())
    }

    /// Mechanical work (J) along the profile: Σ force · distance.
    pub fn work_done(
        &self,
        v_profile: &[f64],
        e_profile: &[f64],
        distance: f64,
        wind: f64,
    ) -> Result<f64, VehicleError> {
        Ok(self.energy_used(v_profile, e_profile, distance, wind)? * distance)
    }

    pub fn profile_energy(
        &self,
        profile: &PathProfile,
        distance: f64,
        wind: f64,
    ) -> Result<f64, VehicleError> {
        self.energy_used(&profile.velocities, &profile.elevations, distance, wind)
    }

    #[inline]
    pub fn exceeds_max_force(&self, force: f64) -> bool {
        force > self.params.max_force
    }
}
