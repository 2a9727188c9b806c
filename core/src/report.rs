use anyhow::Context;
use log::warn;
use serde::Serialize;

use crate::error::VehicleError;
use crate::models::{PathProfile, SegmentResult};
use crate::physics::{RoundTo, VehicleModel};
use crate::smoothing::smooth_elevation;
use crate::storage::{load_profile_csv, load_vehicle};

/// Energy summary for one profile run.
#[derive(Debug, Clone, Serialize)]
pub struct EnergyReport {
    pub distance_m: f64,
    pub wind_ms: f64,
    pub elevation_smoothed: bool,
    pub segments: Vec<SegmentResult>,
    /// Sum of per-segment forces (N), as `VehicleModel::energy_used`.
    pub energy_used: f64,
    /// Σ force · distance (J).
    pub work_done_j: f64,
    pub peak_force: f64,
    /// Segments whose required force is above the motors' ceiling.
    pub over_limit: Vec<usize>,
}

impl EnergyReport {
    pub fn compute(
        model: &VehicleModel,
        profile: &PathProfile,
        distance: f64,
        wind: f64,
        smooth: bool,
    ) -> Result<Self, VehicleError> {
        let elevations = if smooth {
            smooth_elevation(&profile.elevations)
        } else {
            profile.elevations.clone()
        };

        let segments = model.segments(&profile.velocities, &elevations, distance, wind)?;
        let energy_used: f64 = segments.iter().map(|s| s.force.total).sum();
        let peak_force = segments
            .iter()
            .map(|s| s.force.total)
            .fold(f64::NEG_INFINITY, f64::max);
        let over_limit: Vec<usize> = segments
            .iter()
            .filter(|s| model.exceeds_max_force(s.force.total))
            .map(|s| s.index)
            .collect();

        if !over_limit.is_empty() {
            warn!(
                "{} of {} segments need more than {} N",
                over_limit.len(),
                segments.len(),
                model.max_force()
            );
        }

        Ok(Self {
            distance_m: distance,
            wind_ms: wind,
            elevation_smoothed: smooth,
            segments,
            energy_used,
            work_done_j: energy_used * distance,
            peak_force,
            over_limit,
        })
    }
}

pub fn print_energy_report(report: &EnergyReport) {
    let forces: Vec<f64> = report.segments.iter().map(|s| s.force.total.round_to(2)).collect();

    println!("--- Energy Report ---");
    println!("Segments: {} x {} m (wind {} m/s)", report.segments.len(), report.distance_m, report.wind_ms);
    println!("Segment force (N): {:?}", &forces[..5.min(forces.len())]);
    println!("Energy used (sum N): {:.2}", report.energy_used);
    println!("Work done: {:.1} kJ", report.work_done_j / 1000.0);
    println!("Peak force: {:.1} N", report.peak_force);
    if !report.over_limit.is_empty() {
        println!("Over max force: {:?}", report.over_limit);
    }
}

/// Loads a vehicle config and a profile CSV and computes the report.
pub fn report_from_files(
    vehicle_json: &str,
    profile_csv: &str,
    distance: f64,
    wind: f64,
) -> anyhow::Result<EnergyReport> {
    let params = load_vehicle(vehicle_json)
        .with_context(|| format!("loading vehicle config {vehicle_json}"))?;
    let model = VehicleModel::new(params).context("invalid vehicle config")?;
    let profile = load_profile_csv(profile_csv)
        .with_context(|| format!("loading profile {profile_csv}"))?;
    let report = EnergyReport::compute(&model, &profile, distance, wind, false)
        .with_context(|| format!("computing energy for {profile_csv}"))?;
    Ok(report)
}
