//! Weapon stats resolution.
//!
//! Turns a weapon's attribute set (and, when loaded, its charge's) into a
//! normalized per-shot and per-second damage profile plus firing-cycle and
//! guidance characteristics. Stats are derived at resolution time and
//! recomputed whenever the fitting changes; they are never persisted.

use serde::Serialize;

use crate::catalog::TypeRecord;
use crate::dogma::{attr, attribute_label, WeaponClass};
use crate::error::{Error, Result};
use crate::fitting::profile::DamageProfile;

/// How a weapon connects damage to a target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Guidance {
    /// Turret-class weapons hit or miss based on tracking versus angular
    /// velocity, and fall off with range.
    Turret { tracking_speed: f64 },
    /// Missiles always connect but deal reduced damage to small or fast
    /// targets relative to their explosion cloud.
    Missile {
        explosion_radius: f64,
        explosion_velocity: f64,
    },
}

/// Resolved, charge-inclusive weapon characteristics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeaponStats {
    pub name: String,
    pub class: WeaponClass,
    /// Damage per firing cycle.
    pub volley: DamageProfile,
    /// Damage per second: volley over cycle time.
    pub dps: DamageProfile,
    /// Firing cycle time in seconds.
    pub cycle_time: f64,
    pub guidance: Guidance,
    /// Full-damage range in meters.
    pub optimal_range: f64,
    /// Extra range over which turret damage tapers off, in meters.
    pub falloff: f64,
    /// Capacitor drawn per firing cycle.
    pub capacitor_per_cycle: f64,
}

impl WeaponStats {
    /// Capacitor drain per second while firing continuously.
    pub fn capacitor_per_second(&self) -> f64 {
        self.capacitor_per_cycle / self.cycle_time
    }
}

/// Resolve a weapon (and its loaded charge, if any) into [`WeaponStats`].
///
/// Charge damage attributes are added to the weapon's own: charges supply
/// the bulk of turret damage and all missile damage, so omitting them would
/// understate output severely. The weapon's damage multiplier then scales
/// the combined base.
///
/// # Errors
/// - [`Error::NotAWeapon`] when the type is not classified as a weapon.
/// - [`Error::MissingAttribute`] when no cycle-time attribute is present;
///   a misleading default is worse than a visible failure.
/// - [`Error::DegenerateInput`] for a non-positive cycle time.
pub fn resolve_weapon(weapon: &TypeRecord, charge: Option<&TypeRecord>) -> Result<WeaponStats> {
    let class = weapon
        .classification
        .weapon_class()
        .ok_or_else(|| Error::NotAWeapon {
            name: weapon.name.clone(),
        })?;

    let cycle_ms = weapon
        .attributes
        .get(attr::RATE_OF_FIRE)
        .or_else(|| weapon.attributes.get(attr::DURATION))
        .ok_or_else(|| Error::MissingAttribute {
            item: weapon.name.clone(),
            attribute: attribute_label(attr::RATE_OF_FIRE),
        })?;
    if !cycle_ms.is_finite() || cycle_ms <= 0.0 {
        return Err(Error::DegenerateInput {
            message: format!(
                "cycle time must be finite and positive for '{}', got {cycle_ms} ms",
                weapon.name
            ),
        });
    }
    let cycle_time = cycle_ms / 1000.0;

    let base = combined_base_damage(weapon, charge);
    let multiplier = weapon.attributes.get_or(attr::DAMAGE_MULTIPLIER, 1.0);
    let volley = base.scaled(multiplier);
    volley.validate_damage()?;

    let guidance = match class {
        WeaponClass::Missile => {
            // Explosion parameters live on the missile itself. An unloaded
            // launcher resolves to a zero-size cloud; its damage is zero
            // regardless, and application treats the zero cloud as fully
            // applied instead of dividing by it.
            let missile = charge.map(|c| &c.attributes);
            Guidance::Missile {
                explosion_radius: missile
                    .and_then(|a| a.get(attr::AOE_CLOUD_SIZE))
                    .unwrap_or(0.0),
                explosion_velocity: missile
                    .and_then(|a| a.get(attr::AOE_VELOCITY))
                    .unwrap_or(0.0),
            }
        }
        _ => Guidance::Turret {
            tracking_speed: weapon.attributes.get_or(attr::TRACKING_SPEED, 0.0),
        },
    };

    Ok(WeaponStats {
        name: weapon.name.clone(),
        class,
        volley,
        dps: volley.scaled(1.0 / cycle_time),
        cycle_time,
        guidance,
        optimal_range: weapon.attributes.get_or(attr::OPTIMAL_RANGE, 0.0),
        falloff: weapon.attributes.get_or(attr::FALLOFF, 0.0),
        capacitor_per_cycle: weapon.attributes.get_or(attr::CAPACITOR_NEED, 0.0),
    })
}

fn combined_base_damage(weapon: &TypeRecord, charge: Option<&TypeRecord>) -> DamageProfile {
    let read = |id| {
        weapon.attributes.get_or(id, 0.0)
            + charge.map(|c| c.attributes.get_or(id, 0.0)).unwrap_or(0.0)
    };
    DamageProfile::new(
        read(attr::EM_DAMAGE),
        read(attr::THERMAL_DAMAGE),
        read(attr::KINETIC_DAMAGE),
        read(attr::EXPLOSIVE_DAMAGE),
    )
}
