use approx::assert_relative_eq;
use nalgebra::Vector2;

use crate::body::{Body, BodyId, BodyKind};
use crate::config::{IntegratorKind, SimulationConfig};
use crate::error::NBodyError;
use crate::outgassing::OutgassingConfig;
use crate::retirement::RetirementPolicy;
use crate::system::System;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn comet() -> Body {
    Body::comet()
        .mass(1.0)
        .and_then(|b| b.position(0.3, 0.3))
        .and_then(|b| b.velocity(0.0, -0.14))
        .unwrap()
        .build()
}

/// The star and comet the browser demo starts with
fn make_test_system(config: SimulationConfig) -> System {
    init_logging();
    let mut system = System::with_config(config).unwrap();
    system.add(Body::star().build());
    system.add(comet());
    system
}

#[test]
fn test_new_system_is_empty() {
    let system = System::new();

    assert_eq!(system.count(), 0);
    assert!(system.is_empty());
    assert_eq!(system.time(), 0.0);
    assert_eq!(system.steps(), 0);
    assert_eq!(*system.config(), SimulationConfig::default());
}

#[test]
fn test_invalid_config_rejected() {
    let config = SimulationConfig {
        g: f64::NAN,
        ..SimulationConfig::default()
    };
    assert!(matches!(
        System::with_config(config),
        Err(NBodyError::InvalidParameter { name: "g", .. })
    ));
}

#[test]
fn test_count_after_adds() {
    let mut system = System::new();
    for n in 0..10 {
        assert_eq!(system.add(Body::particle().build()), n);
    }
    assert_eq!(system.count(), 10);
}

#[test]
fn test_add_assigns_sequential_ids() {
    let system = make_test_system(SimulationConfig::default());

    assert_eq!(system.body(0).unwrap().id(), BodyId(0));
    assert_eq!(system.body(1).unwrap().id(), BodyId(1));
    assert_eq!(system.find(BodyId(1)).map(|b| b.kind()), Some(BodyKind::Comet));
    assert!(system.find(BodyId(2)).is_none());
}

#[test]
fn test_body_returns_constructed_values() {
    let system = make_test_system(SimulationConfig::default());
    let body = system.body(1).unwrap();
    let built = comet();

    assert_eq!(body.kind(), built.kind());
    assert_eq!(body.mass(), built.mass());
    assert_eq!(body.position(), built.position());
    assert_eq!(body.velocity(), built.velocity());
}

#[test]
fn test_body_out_of_range() {
    let system = make_test_system(SimulationConfig::default());

    assert_eq!(
        system.body(2).unwrap_err(),
        NBodyError::IndexOutOfRange { index: 2, count: 2 }
    );
    assert!(System::new().body(0).is_err());
}

#[test]
fn test_repeated_reads_identical() {
    let mut system = make_test_system(SimulationConfig::default());
    system.tick();

    let first = *system.body(1).unwrap();
    let second = *system.body(1).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_star_and_comet_single_tick() {
    let mut system = make_test_system(SimulationConfig::default());
    let dt = system.config().dt;
    let star_before = *system.body(0).unwrap();
    let comet_before = *system.body(1).unwrap();

    system.tick();

    let star_after = system.body(0).unwrap();
    let comet_after = system.body(1).unwrap();

    // Comet drifts by v dt plus a correction toward the star
    let drift = comet_before.velocity() * dt;
    let correction = (comet_after.position() - comet_before.position()) - drift;
    let toward_star = star_before.position() - comet_before.position();
    assert!(correction.dot(&toward_star) > 0.0);
    assert!(correction.magnitude() < 0.01 * drift.magnitude());

    // Semi-implicit Euler: correction is a dt²
    let r2: f64 = 0.18 + 1.0e-6;
    let a = 1.0e-5 * 1000.0 / (r2 * r2.sqrt()) * 0.3;
    assert_relative_eq!(correction.x, -a * dt * dt, max_relative = 1e-9);
    assert_relative_eq!(correction.y, -a * dt * dt, max_relative = 1e-9);

    // Star moves the opposite way, a thousand times less
    let star_shift = star_after.position() - star_before.position();
    assert!(star_shift.dot(&correction) < 0.0);
    assert_relative_eq!(
        star_shift.magnitude() * 1000.0,
        correction.magnitude(),
        max_relative = 1e-9
    );
}

#[test]
fn test_tick_advances_clock_and_ages() {
    let mut system = make_test_system(SimulationConfig::default());

    let time = system.run(3);

    assert_relative_eq!(time, 0.03, epsilon = 1e-15);
    assert_eq!(system.steps(), 3);
    assert!(system.iter().all(|b| b.age() == 3));
}

#[test]
fn test_momentum_conserved() {
    let mut system = make_test_system(SimulationConfig::default());
    system.add(
        Body::planet()
            .position(-0.6, 0.1)
            .and_then(|b| b.velocity(0.01, 0.12))
            .unwrap()
            .build(),
    );
    let initial = system.total_momentum();

    system.run(1000);

    let drift = (system.total_momentum() - initial).magnitude();
    assert!(drift < 1e-10, "Momentum drift: {:.2e}", drift);
}

#[test]
fn test_energy_stays_close_with_leapfrog() {
    let config = SimulationConfig {
        integrator: IntegratorKind::Leapfrog,
        ..SimulationConfig::default()
    };
    let mut system = make_test_system(config);
    let initial = system.total_energy();

    system.run(500);

    let error = (system.total_energy() - initial).abs() / initial.abs();
    assert!(error < 1e-2, "Energy error: {:.2e}", error);
}

#[test]
fn test_angular_momentum_conserved() {
    let mut system = make_test_system(SimulationConfig::default());
    let initial = system.total_angular_momentum();

    system.run(500);

    let error = (system.total_angular_momentum() - initial).abs() / initial.abs();
    assert!(error < 1e-9, "Angular momentum error: {:.2e}", error);
}

#[test]
fn test_identical_systems_are_bit_identical() {
    let config = SimulationConfig {
        outgassing: Some(OutgassingConfig {
            seed: 9,
            ..OutgassingConfig::default()
        }),
        radiation_pressure: 1.0e-3,
        ..SimulationConfig::default()
    };
    let mut a = make_test_system(config);
    let mut b = make_test_system(config);

    a.run(300);
    b.run(300);

    assert_eq!(a.count(), b.count());
    assert_eq!(a.bodies(), b.bodies());
}

#[test]
fn test_center_of_mass() {
    let mut system = System::new();
    assert!(system.center_of_mass().is_none());

    system.add(Body::planet().mass(1.0).unwrap().build());
    system.add(
        Body::planet()
            .mass(3.0)
            .and_then(|b| b.position(4.0, 0.0))
            .unwrap()
            .build(),
    );

    let com = system.center_of_mass().unwrap();
    assert_relative_eq!(com.x, 3.0);
    assert_relative_eq!(com.y, 0.0);
    assert_relative_eq!(system.total_mass(), 4.0);
}

#[test]
fn test_tracer_in_system() {
    let mut system = make_test_system(SimulationConfig::default());
    let star_before = system.body(0).unwrap().position();
    system.add(
        Body::particle()
            .tracer()
            .and_then(|b| b.position(-0.5, 0.0))
            .unwrap()
            .build(),
    );
    let momentum = system.total_momentum();

    system.tick();

    // Tracer is pulled toward the star
    assert!(system.body(2).unwrap().vx() > 0.0);
    // The star only feels the comet, so its momentum change is balanced
    assert!((system.total_momentum() - momentum).magnitude() < 1e-15);
    assert!(system.body(0).unwrap().position() != star_before);
}

#[test]
fn test_outgassing_appends_dust() {
    let config = SimulationConfig {
        outgassing: Some(OutgassingConfig::default()),
        ..SimulationConfig::default()
    };
    let mut system = System::with_config(config).unwrap();
    system.add(Body::star().build());
    system.add(
        Body::comet()
            .position(0.05, 0.0)
            .and_then(|b| b.velocity(0.0, 0.4))
            .unwrap()
            .build(),
    );

    system.tick();

    // Close enough that shedding is certain
    assert_eq!(system.count(), 3);
    assert_eq!(system.body(0).unwrap().kind(), BodyKind::Star);
    assert_eq!(system.body(1).unwrap().kind(), BodyKind::Comet);
    let dust = system.body(2).unwrap();
    assert_eq!(dust.kind(), BodyKind::Particle);
    assert_eq!(dust.parent(), Some(BodyId(1)));
    assert_eq!(dust.id(), BodyId(2));
    assert_eq!(dust.age(), 0);
}

#[test]
fn test_retirement_in_tick() {
    let config = SimulationConfig {
        retirement: Some(RetirementPolicy {
            escape_radius: Some(2.0),
            particle_lifetime: Some(2),
        }),
        ..SimulationConfig::default()
    };
    let mut system = System::with_config(config).unwrap();
    system.add(Body::star().build());
    system.add(
        Body::comet()
            .position(1.9, 0.0)
            .and_then(|b| b.velocity(20.0, 0.0))
            .unwrap()
            .build(),
    );
    system.add(Body::particle().position(0.0, 1.0).unwrap().build());

    system.tick();

    // Comet left, particle slid down one index
    assert_eq!(system.count(), 2);
    assert_eq!(system.body(1).unwrap().kind(), BodyKind::Particle);

    system.tick();
    assert_eq!(system.count(), 2);

    system.tick();
    assert_eq!(system.count(), 1);
    assert_eq!(system.body(0).unwrap().kind(), BodyKind::Star);
}

#[test]
fn test_manual_retire() {
    let mut system = make_test_system(SimulationConfig::default());
    let policy = RetirementPolicy {
        escape_radius: Some(0.1),
        particle_lifetime: None,
    };

    let removed = system.retire(&policy);

    assert_eq!(removed.len(), 1);
    assert_eq!(removed[0].kind(), BodyKind::Comet);
    assert_eq!(system.count(), 1);
}

#[test]
fn test_zero_velocity_body_is_fine() {
    let mut system = System::new();
    system.add(Body::comet().velocity(0.0, 0.0).unwrap().build());
    system.tick();

    // Alone, nothing pulls it
    assert_eq!(system.body(0).unwrap().velocity(), Vector2::zeros());
}

#[test]
fn test_dust_count_levels_off() {
    // High enough rate that the comet sheds every tick
    let config = SimulationConfig {
        outgassing: Some(OutgassingConfig {
            rate: 1.0e3,
            dust_lifetime: 20,
            ..OutgassingConfig::default()
        }),
        ..SimulationConfig::default()
    };
    let mut system = make_test_system(config);

    system.run(100);
    assert_eq!(system.count(), 2 + 21);

    system.run(400);
    assert_eq!(system.count(), 2 + 21);
    assert!(system.iter().all(|b| b.parent().is_none() || b.age() <= 20));
    assert_eq!(system.body(0).unwrap().kind(), BodyKind::Star);
    assert_eq!(system.body(1).unwrap().kind(), BodyKind::Comet);
}
