use std::f64::consts::FRAC_PI_2;

use vehicle_energy_core::models::{Conditions, VehicleParams};
use vehicle_energy_core::physics::VehicleModel;
use vehicle_energy_core::VehicleError;

fn flat_steady_force(p: &VehicleParams, v: f64) -> f64 {
    p.mass * p.gravity * p.rolling_resistance_coefficient
        + 0.5 * p.air_density * p.drag_coefficient * v * v
}

#[test]
fn defaults_match_reference_car() {
    let model = VehicleModel::default();
    let p = model.params();
    assert_eq!(p.mass, 720.0);
    assert_eq!(p.rolling_resistance_coefficient, 0.0015);
    assert_eq!(p.drag_coefficient, 0.15);
    assert_eq!(p.air_density, 1.225);
    assert_eq!(p.gravity, 9.81);
    assert_eq!(p.max_force, 300.0);
    assert_eq!(VehicleModel::new(VehicleParams::default()).unwrap(), model);
}

#[test]
fn force_breakdown_at_10_ms_on_flat_road() {
    let model = VehicleModel::default();
    let cond = Conditions::default();
    let f = model.force_breakdown(10.0, Some(10.0), &cond).unwrap();

    assert!((f.friction - 10.5948).abs() < 1e-9, "friction {}", f.friction);
    assert!((f.drag - 9.1875).abs() < 1e-9, "drag {}", f.drag);
    assert_eq!(f.gravity, 0.0);
    assert_eq!(f.accel, 0.0);
    assert!((f.total - 19.7823).abs() < 1e-9);
    assert!((f.total - 19.79).abs() < 0.01);
}

#[test]
fn omitted_v_old_means_no_acceleration() {
    let model = VehicleModel::default();
    let cond = Conditions::default();
    let implicit = model.force_required(12.0, None, &cond).unwrap();
    let explicit = model.force_required(12.0, Some(12.0), &cond).unwrap();
    assert_eq!(implicit, explicit);
    assert!((implicit - flat_steady_force(model.params(), 12.0)).abs() < 1e-9);
}

#[test]
fn flat_steady_force_formula_holds_across_speeds() {
    let model = VehicleModel::default();
    for v in [0.0, 1.0, 5.5, 10.0, 25.0, 40.0] {
        let f = model.force_required(v, None, &Conditions::default()).unwrap();
        assert!((f - flat_steady_force(model.params(), v)).abs() < 1e-9, "v={v}");
    }
}

#[test]
fn force_is_monotonic_in_velocity() {
    let model = VehicleModel::default();
    let cond = Conditions::default().with_theta(0.05).with_wind(2.0);
    let mut prev = f64::NEG_INFINITY;
    for i in 0..60 {
        let v = i as f64 * 0.5;
        let f = model.force_required(v, Some(5.0), &cond).unwrap();
        assert!(f > prev, "force not increasing at v={v}");
        prev = f;
    }
}

#[test]
fn acceleration_and_climb_add_force() {
    let model = VehicleModel::default();
    let base = model.force_required(10.0, Some(10.0), &Conditions::default()).unwrap();

    let accel = model.force_required(11.0, Some(10.0), &Conditions::default()).unwrap();
    let drag_delta = 0.5 * 1.225 * 0.15 * (121.0 - 100.0);
    assert!((accel - base - (720.0 / 30.0 + drag_delta)).abs() < 1e-9);

    let climb = model
        .force_required(10.0, None, &Conditions::default().with_theta(0.1))
        .unwrap();
    assert!(climb > base);

    let descent = model
        .force_required(10.0, None, &Conditions::default().with_theta(-0.1))
        .unwrap();
    assert!(descent < 0.0, "steep descent should need negative force, got {descent}");
}

#[test]
fn headwind_and_tailwind() {
    let model = VehicleModel::default();
    let calm = model.force_required(10.0, None, &Conditions::default()).unwrap();
    let with = model.force_required(10.0, None, &Conditions::default().with_wind(5.0)).unwrap();
    let against = model.force_required(10.0, None, &Conditions::default().with_wind(-5.0)).unwrap();
    // (v + vwind)² with vwind signed as in the model
    assert!(with > calm);
    assert!(against < calm);
}

#[test]
fn zero_timestep_is_rejected() {
    let model = VehicleModel::default();
    let cond = Conditions::default().with_timestep(0.0);
    assert!(matches!(
        model.force_required(10.0, Some(9.0), &cond),
        Err(VehicleError::DivisionByZero(_))
    ));
    assert!(matches!(model.max_velocity(9.0, &cond), Err(VehicleError::DivisionByZero(_))));
}

#[test]
fn non_finite_inputs_are_rejected() {
    let model = VehicleModel::default();
    assert!(matches!(
        model.force_required(f64::NAN, None, &Conditions::default()),
        Err(VehicleError::InvalidParameter { name: "v", .. })
    ));
    assert!(matches!(
        model.force_required(10.0, None, &Conditions::default().with_theta(f64::INFINITY)),
        Err(VehicleError::InvalidParameter { name: "theta", .. })
    ));
}

#[test]
fn construction_rejects_out_of_domain_parameters() {
    let bad = [
        VehicleParams { mass: 0.0, ..Default::default() },
        VehicleParams { mass: -1.0, ..Default::default() },
        VehicleParams { rolling_resistance_coefficient: -0.001, ..Default::default() },
        VehicleParams { drag_coefficient: -0.1, ..Default::default() },
        VehicleParams { air_density: 0.0, ..Default::default() },
        VehicleParams { gravity: 0.0, ..Default::default() },
        VehicleParams { max_force: 0.0, ..Default::default() },
        VehicleParams { mass: f64::NAN, ..Default::default() },
        VehicleParams { max_force: f64::INFINITY, ..Default::default() },
    ];
    for p in bad {
        assert!(
            matches!(VehicleModel::new(p), Err(VehicleError::InvalidParameter { .. })),
            "accepted {p:?}"
        );
    }

    // zero coefficients are allowed
    let p = VehicleParams {
        rolling_resistance_coefficient: 0.0,
        drag_coefficient: 0.0,
        ..Default::default()
    };
    assert!(VehicleModel::new(p).is_ok());
}

#[test]
fn max_velocity_round_trips_to_max_force() {
    let model = VehicleModel::default();
    let cases = [
        (0.0, Conditions::default()),
        (10.0, Conditions::default()),
        (10.0, Conditions::default().with_theta(0.02)),
        (15.0, Conditions::default().with_timestep(5.0)),
        (8.0, Conditions::default().with_wind(3.0)),
        (8.0, Conditions::default().with_wind(-2.0).with_theta(-0.01)),
    ];
    for (v_old, cond) in cases {
        let v = model.max_velocity(v_old, &cond).unwrap();
        let f = model.force_required(v, Some(v_old), &cond).unwrap();
        assert!((f - 300.0).abs() < 1e-6, "v_old={v_old} cond={cond:?} v={v} f={f}");
        assert!(v > v_old, "full force on flat-ish road should accelerate");
    }
}

#[test]
fn max_velocity_matches_quadratic_formula() {
    let model = VehicleModel::default();
    let (m, rho, cda, g, crr, fmax, dt) = (720.0, 1.225, 0.15, 9.81, 0.0015, 300.0, 30.0);
    let v_old = 10.0;
    let a: f64 = 0.5 * rho * cda;
    let b: f64 = m / dt;
    let c: f64 = m * g * crr - fmax - m * v_old / dt;
    let expected = (-b + (b * b - 4.0 * a * c).sqrt()) / (2.0 * a);

    let v = model.max_velocity(v_old, &Conditions::default()).unwrap();
    assert!((v - expected).abs() < 1e-9);
}

#[test]
fn vertical_climb_with_tiny_motor_is_infeasible() {
    let params = VehicleParams { max_force: 1.0, mass: 720.0, ..Default::default() };
    let model = VehicleModel::new(params).unwrap();
    let cond = Conditions::default().with_theta(FRAC_PI_2);
    for v_old in [0.0, 10.0] {
        match model.max_velocity(v_old, &cond) {
            Err(VehicleError::InfeasibleVelocity { max_force, discriminant }) => {
                assert_eq!(max_force, 1.0);
                assert!(discriminant < 0.0);
            }
            other => panic!("expected InfeasibleVelocity, got {other:?}"),
        }
    }
}

#[test]
fn zero_drag_area_solves_linearly() {
    let params = VehicleParams { drag_coefficient: 0.0, ..Default::default() };
    let model = VehicleModel::new(params).unwrap();
    let cond = Conditions::default();

    let v = model.max_velocity(10.0, &cond).unwrap();
    // m·(v − v_old)/dt + m·g·Crr = Fmax
    let expected = 10.0 + (300.0 - 720.0 * 9.81 * 0.0015) * 30.0 / 720.0;
    assert!((v - expected).abs() < 1e-9);
    assert!((model.force_required(v, Some(10.0), &cond).unwrap() - 300.0).abs() < 1e-9);
}

#[test]
fn model_is_shareable_between_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<VehicleModel>();

    let model = VehicleModel::default();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                model.force_required(i as f64, None, &Conditions::default()).unwrap()
            })
        })
        .collect();
    for (i, h) in handles.into_iter().enumerate() {
        let f = h.join().unwrap();
        assert!((f - flat_steady_force(model.params(), i as f64)).abs() < 1e-9);
    }
}
