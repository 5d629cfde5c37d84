mod common;

use common::CatalogFixture;
use evafit_lib::{resolve_weapon, Error, Guidance, WeaponClass};

#[test]
fn charge_damage_is_added_and_multiplied() {
    let fixture = CatalogFixture::new();
    let catalog = fixture.catalog();
    let autocannon = catalog.get_by_name("200mm AutoCannon I").expect("present");
    let fusion = catalog
        .get_by_name("Republic Fleet Fusion S")
        .expect("present");

    let stats = resolve_weapon(autocannon, Some(fusion)).expect("resolves");
    assert_eq!(stats.class, WeaponClass::Projectile);
    // (20 kinetic + 80 explosive) * 3.0 damage multiplier.
    assert!((stats.volley.kinetic - 60.0).abs() < 1e-9);
    assert!((stats.volley.explosive - 240.0).abs() < 1e-9);
    assert!((stats.volley.total() - 300.0).abs() < 1e-9);
    // 3000 ms cycle.
    assert!((stats.cycle_time - 3.0).abs() < 1e-12);
    assert!((stats.dps.total() - 100.0).abs() < 1e-9);
    assert_eq!(stats.capacitor_per_cycle, 0.0);
}

#[test]
fn unloaded_turret_resolves_to_zero_dps_without_error() {
    let fixture = CatalogFixture::new();
    let catalog = fixture.catalog();
    let autocannon = catalog.get_by_name("200mm AutoCannon I").expect("present");

    let stats = resolve_weapon(autocannon, None).expect("resolves");
    assert!(stats.volley.is_zero());
    assert_eq!(stats.dps.total(), 0.0);
    assert!(stats.cycle_time > 0.0);
}

#[test]
fn missing_cycle_time_is_a_visible_failure() {
    let fixture = CatalogFixture::new();
    let catalog = fixture.catalog();
    let broken = catalog
        .get_by_name("Civilian Gatling Railgun")
        .expect("present");

    let err = resolve_weapon(broken, None).unwrap_err();
    match err {
        Error::MissingAttribute { item, attribute } => {
            assert_eq!(item, "Civilian Gatling Railgun");
            assert_eq!(attribute, "speed");
        }
        other => panic!("expected MissingAttribute, got {other:?}"),
    }
}

#[test]
fn missile_guidance_comes_from_the_loaded_rocket() {
    let fixture = CatalogFixture::new();
    let catalog = fixture.catalog();
    let launcher = catalog.get_by_name("Rocket Launcher I").expect("present");
    let rocket = catalog.get_by_name("Mjolnir Rocket").expect("present");

    let stats = resolve_weapon(launcher, Some(rocket)).expect("resolves");
    assert_eq!(stats.class, WeaponClass::Missile);
    assert!((stats.volley.em - 25.0).abs() < 1e-12);
    assert!((stats.dps.total() - 6.25).abs() < 1e-9);
    match stats.guidance {
        Guidance::Missile {
            explosion_radius,
            explosion_velocity,
        } => {
            assert_eq!(explosion_radius, 20.0);
            assert_eq!(explosion_velocity, 150.0);
        }
        other => panic!("expected missile guidance, got {other:?}"),
    }
}

#[test]
fn hybrid_turret_reports_capacitor_drain() {
    let fixture = CatalogFixture::new();
    let catalog = fixture.catalog();
    let railgun = catalog.get_by_name("125mm Railgun I").expect("present");
    let antimatter = catalog.get_by_name("Antimatter Charge S").expect("present");

    let stats = resolve_weapon(railgun, Some(antimatter)).expect("resolves");
    assert_eq!(stats.class, WeaponClass::Hybrid);
    // (5 thermal + 7 kinetic) * 2.0 over 2 s.
    assert!((stats.dps.total() - 12.0).abs() < 1e-9);
    // 1.2 GJ per 2 s cycle.
    assert!((stats.capacitor_per_second() - 0.6).abs() < 1e-12);
}

#[test]
fn resolving_a_support_module_as_a_weapon_fails() {
    let fixture = CatalogFixture::new();
    let catalog = fixture.catalog();
    let gyro = catalog.get_by_name("Gyrostabilizer I").expect("present");

    assert!(matches!(
        resolve_weapon(gyro, None),
        Err(Error::NotAWeapon { .. })
    ));
}
