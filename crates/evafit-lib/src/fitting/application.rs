//! Damage application: the fraction of nominal damage that actually lands.
//!
//! Turret-class weapons multiply two independent factors, a Gaussian-shaped
//! range falloff and a tracking-versus-angular-velocity hit factor. Missiles
//! never miss; they deal reduced damage to targets smaller or faster than
//! their explosion cloud. Application factors are range/signature/tracking
//! driven, not damage-type driven, so the landed fraction applies uniformly
//! across all four damage types.

use crate::error::{Error, Result};
use crate::fitting::profile::{DamageProfile, TargetProfile};
use crate::fitting::weapon::{Guidance, WeaponStats};

/// Hit-probability floor for turrets: a wrecking shot always has a chance.
pub const TURRET_MINIMUM_HIT_FACTOR: f64 = 0.01;

/// Range factor for a turret: 1.0 inside optimal, then
/// `0.5 ^ ((range - optimal) / falloff)^2`.
///
/// Never negative, asymptotically approaching zero. A weapon with no falloff
/// simply stops landing damage past optimal.
pub fn turret_range_factor(range: f64, optimal: f64, falloff: f64) -> f64 {
    if range <= optimal {
        return 1.0;
    }
    if falloff <= 0.0 {
        return 0.0;
    }
    let over = (range - optimal) / falloff;
    0.5_f64.powf(over * over)
}

/// Tracking hit factor for a turret against a target profile, clamped to
/// `[0.01, 1.0]`.
///
/// Angular velocity is `transverse_velocity / range`; a target at range zero
/// is a guaranteed hit.
pub fn turret_hit_factor(
    transverse_velocity: f64,
    range: f64,
    tracking_speed: f64,
    signature_radius: f64,
) -> Result<f64> {
    if !signature_radius.is_finite() || signature_radius <= 0.0 {
        return Err(Error::DegenerateInput {
            message: format!(
                "signature_radius must be finite and positive, got {signature_radius}"
            ),
        });
    }
    if range <= 0.0 {
        return Ok(1.0);
    }

    let angular_velocity = transverse_velocity / range;
    let ratio = angular_velocity / (tracking_speed * signature_radius);
    let factor = 0.5_f64.powf(ratio * ratio);
    Ok(factor.clamp(TURRET_MINIMUM_HIT_FACTOR, 1.0))
}

/// Applied-damage fraction for a missile explosion against a target.
///
/// `sig = min(1, signature / explosion_radius)` and
/// `vel = min(1, explosion_velocity / target_velocity)` (1.0 for a target at
/// rest); the landed fraction is `sig * (sig + vel * (1 - sig))`, which is
/// exactly 1.0 against a target at least as large and slow as the cloud.
pub fn missile_application_factor(
    signature_radius: f64,
    target_velocity: f64,
    explosion_radius: f64,
    explosion_velocity: f64,
) -> Result<f64> {
    if !signature_radius.is_finite() || signature_radius <= 0.0 {
        return Err(Error::DegenerateInput {
            message: format!(
                "signature_radius must be finite and positive, got {signature_radius}"
            ),
        });
    }

    // A zero-size cloud only arises for an unloaded launcher, whose damage
    // is zero; report full application rather than dividing by the radius.
    let signature_factor = if explosion_radius > 0.0 {
        (signature_radius / explosion_radius).min(1.0)
    } else {
        1.0
    };

    let velocity_factor = if target_velocity <= 0.0 {
        1.0
    } else {
        (explosion_velocity / target_velocity).min(1.0)
    };

    Ok(signature_factor * (signature_factor + velocity_factor * (1.0 - signature_factor)))
}

/// Landed fraction of nominal damage for a resolved weapon against a target.
pub fn application_factor(weapon: &WeaponStats, target: &TargetProfile) -> Result<f64> {
    match weapon.guidance {
        Guidance::Turret { tracking_speed } => {
            let range = turret_range_factor(target.range, weapon.optimal_range, weapon.falloff);
            let hit = turret_hit_factor(
                target.transverse_velocity,
                target.range,
                tracking_speed,
                target.signature_radius,
            )?;
            Ok(range * hit)
        }
        Guidance::Missile {
            explosion_radius,
            explosion_velocity,
        } => missile_application_factor(
            target.signature_radius,
            target.transverse_velocity,
            explosion_radius,
            explosion_velocity,
        ),
    }
}

/// Per-second damage that lands on the target, before its resistances.
pub fn apply_damage(weapon: &WeaponStats, target: &TargetProfile) -> Result<DamageProfile> {
    let factor = application_factor(weapon, target)?;
    Ok(weapon.dps.scaled(factor))
}
