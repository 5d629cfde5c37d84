//! Dogma attribute dictionary and classification tables.
//!
//! The static data export describes every item as a bag of numeric attributes
//! keyed by small integer identifiers. This module is the single place those
//! identifiers are given names: a typed constant per attribute the engine
//! reads, a process-wide id-to-name dictionary for display, and the group
//! tables used to classify items once at catalog ingestion.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::error::{Error, Result};

/// Numeric identifier for a type (hull, module, or charge).
pub type TypeId = i64;

/// Numeric identifier for a dogma attribute.
pub type AttributeId = i64;

/// Typed constants for the attribute identifiers the engine reads.
///
/// Identifiers follow the vendor-published export.
pub mod attr {
    use super::AttributeId;

    pub const MASS: AttributeId = 4;
    pub const CAPACITOR_NEED: AttributeId = 6;
    pub const STRUCTURE_HP: AttributeId = 9;
    pub const POWERGRID_OUTPUT: AttributeId = 11;
    pub const LOW_SLOTS: AttributeId = 12;
    pub const MED_SLOTS: AttributeId = 13;
    pub const HIGH_SLOTS: AttributeId = 14;
    pub const POWERGRID_USAGE: AttributeId = 30;
    pub const MAX_VELOCITY: AttributeId = 37;
    pub const CPU_OUTPUT: AttributeId = 48;
    pub const CPU_USAGE: AttributeId = 50;
    /// Firing cycle time for turrets and launchers, in milliseconds.
    pub const RATE_OF_FIRE: AttributeId = 51;
    pub const OPTIMAL_RANGE: AttributeId = 54;
    /// Capacitor recharge time, in milliseconds.
    pub const RECHARGE_RATE: AttributeId = 55;
    pub const DAMAGE_MULTIPLIER: AttributeId = 64;
    pub const AGILITY: AttributeId = 70;
    pub const SHIELD_CAPACITY_BONUS: AttributeId = 72;
    /// Activation cycle time for non-weapon modules, in milliseconds.
    pub const DURATION: AttributeId = 73;
    pub const HULL_KINETIC_RESONANCE: AttributeId = 109;
    pub const HULL_THERMAL_RESONANCE: AttributeId = 110;
    pub const HULL_EXPLOSIVE_RESONANCE: AttributeId = 111;
    pub const HULL_EM_RESONANCE: AttributeId = 113;
    pub const EM_DAMAGE: AttributeId = 114;
    pub const EXPLOSIVE_DAMAGE: AttributeId = 116;
    pub const KINETIC_DAMAGE: AttributeId = 117;
    pub const THERMAL_DAMAGE: AttributeId = 118;
    pub const FALLOFF: AttributeId = 158;
    /// Turret tracking speed, in radians per second.
    pub const TRACKING_SPEED: AttributeId = 160;
    pub const MAX_LOCKED_TARGETS: AttributeId = 192;
    /// Cycle-time multiplier contributed by rate-of-fire modules (< 1 is a
    /// bonus).
    pub const RATE_OF_FIRE_MULTIPLIER: AttributeId = 204;
    pub const SHIELD_CAPACITY: AttributeId = 263;
    pub const ARMOR_HP: AttributeId = 265;
    pub const ARMOR_EM_RESONANCE: AttributeId = 267;
    pub const ARMOR_EXPLOSIVE_RESONANCE: AttributeId = 268;
    pub const ARMOR_KINETIC_RESONANCE: AttributeId = 269;
    pub const ARMOR_THERMAL_RESONANCE: AttributeId = 270;
    pub const SHIELD_EM_RESONANCE: AttributeId = 271;
    pub const SHIELD_EXPLOSIVE_RESONANCE: AttributeId = 272;
    pub const SHIELD_KINETIC_RESONANCE: AttributeId = 273;
    pub const SHIELD_THERMAL_RESONANCE: AttributeId = 274;
    pub const CAPACITOR_CAPACITY: AttributeId = 482;
    pub const SIGNATURE_RADIUS: AttributeId = 552;
    pub const SCAN_RESOLUTION: AttributeId = 564;
    /// Missile explosion velocity, in meters per second.
    pub const AOE_VELOCITY: AttributeId = 653;
    /// Missile explosion radius, in meters.
    pub const AOE_CLOUD_SIZE: AttributeId = 654;
    pub const TRACKING_SPEED_MULTIPLIER: AttributeId = 767;
    pub const RIG_SLOTS: AttributeId = 1137;
    pub const ARMOR_HP_BONUS: AttributeId = 1159;
}

/// Attribute id to canonical name, for display and diagnostics.
static ATTRIBUTE_NAMES: Lazy<HashMap<AttributeId, &'static str>> = Lazy::new(|| {
    let entries: &[(AttributeId, &'static str)] = &[
        (attr::MASS, "mass"),
        (attr::CAPACITOR_NEED, "capacitorNeed"),
        (attr::STRUCTURE_HP, "hp"),
        (attr::POWERGRID_OUTPUT, "powerOutput"),
        (attr::LOW_SLOTS, "lowSlots"),
        (attr::MED_SLOTS, "medSlots"),
        (attr::HIGH_SLOTS, "hiSlots"),
        (attr::POWERGRID_USAGE, "power"),
        (attr::MAX_VELOCITY, "maxVelocity"),
        (attr::CPU_OUTPUT, "cpuOutput"),
        (attr::CPU_USAGE, "cpu"),
        (attr::RATE_OF_FIRE, "speed"),
        (attr::OPTIMAL_RANGE, "maxRange"),
        (attr::RECHARGE_RATE, "rechargeRate"),
        (attr::DAMAGE_MULTIPLIER, "damageMultiplier"),
        (attr::AGILITY, "agility"),
        (attr::SHIELD_CAPACITY_BONUS, "capacityBonus"),
        (attr::DURATION, "duration"),
        (attr::HULL_KINETIC_RESONANCE, "kineticDamageResonance"),
        (attr::HULL_THERMAL_RESONANCE, "thermalDamageResonance"),
        (attr::HULL_EXPLOSIVE_RESONANCE, "explosiveDamageResonance"),
        (attr::HULL_EM_RESONANCE, "emDamageResonance"),
        (attr::EM_DAMAGE, "emDamage"),
        (attr::EXPLOSIVE_DAMAGE, "explosiveDamage"),
        (attr::KINETIC_DAMAGE, "kineticDamage"),
        (attr::THERMAL_DAMAGE, "thermalDamage"),
        (attr::FALLOFF, "falloff"),
        (attr::TRACKING_SPEED, "trackingSpeed"),
        (attr::MAX_LOCKED_TARGETS, "maxLockedTargets"),
        (attr::RATE_OF_FIRE_MULTIPLIER, "speedMultiplier"),
        (attr::SHIELD_CAPACITY, "shieldCapacity"),
        (attr::ARMOR_HP, "armorHP"),
        (attr::ARMOR_EM_RESONANCE, "armorEmDamageResonance"),
        (attr::ARMOR_EXPLOSIVE_RESONANCE, "armorExplosiveDamageResonance"),
        (attr::ARMOR_KINETIC_RESONANCE, "armorKineticDamageResonance"),
        (attr::ARMOR_THERMAL_RESONANCE, "armorThermalDamageResonance"),
        (attr::SHIELD_EM_RESONANCE, "shieldEmDamageResonance"),
        (attr::SHIELD_EXPLOSIVE_RESONANCE, "shieldExplosiveDamageResonance"),
        (attr::SHIELD_KINETIC_RESONANCE, "shieldKineticDamageResonance"),
        (attr::SHIELD_THERMAL_RESONANCE, "shieldThermalDamageResonance"),
        (attr::CAPACITOR_CAPACITY, "capacitorCapacity"),
        (attr::SIGNATURE_RADIUS, "signatureRadius"),
        (attr::SCAN_RESOLUTION, "scanResolution"),
        (attr::AOE_VELOCITY, "aoeVelocity"),
        (attr::AOE_CLOUD_SIZE, "aoeCloudSize"),
        (attr::TRACKING_SPEED_MULTIPLIER, "trackingSpeedMultiplier"),
        (attr::RIG_SLOTS, "rigSlots"),
        (attr::ARMOR_HP_BONUS, "armorHPBonusAdd"),
    ];
    entries.iter().copied().collect()
});

/// Resolve the canonical name of an attribute, if the dictionary knows it.
pub fn attribute_name(id: AttributeId) -> Option<&'static str> {
    ATTRIBUTE_NAMES.get(&id).copied()
}

/// Display label for an attribute: the dictionary name, or the raw id.
pub fn attribute_label(id: AttributeId) -> String {
    match attribute_name(id) {
        Some(name) => name.to_string(),
        None => format!("#{id}"),
    }
}

/// Immutable set of dogma attributes for one item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeSet {
    values: HashMap<AttributeId, f64>,
}

impl AttributeSet {
    pub fn new(values: HashMap<AttributeId, f64>) -> Self {
        Self { values }
    }

    /// Look up an attribute value.
    pub fn get(&self, id: AttributeId) -> Option<f64> {
        self.values.get(&id).copied()
    }

    /// Look up an attribute value, defaulting multiplicative attributes to
    /// their neutral element when absent.
    pub fn get_or(&self, id: AttributeId, default: f64) -> f64 {
        self.get(id).unwrap_or(default)
    }

    /// Look up a required attribute, failing with [`Error::MissingAttribute`]
    /// when absent. `item` names the owning type for the error message.
    pub fn require(&self, id: AttributeId, item: &str) -> Result<f64> {
        self.get(id).ok_or_else(|| Error::MissingAttribute {
            item: item.to_string(),
            attribute: attribute_label(id),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterate over (id, value) pairs in ascending id order.
    pub fn iter_sorted(&self) -> Vec<(AttributeId, f64)> {
        let mut entries: Vec<(AttributeId, f64)> =
            self.values.iter().map(|(k, v)| (*k, *v)).collect();
        entries.sort_by_key(|(id, _)| *id);
        entries
    }
}

impl FromIterator<(AttributeId, f64)> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = (AttributeId, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Weapon family, determining which damage application model applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponClass {
    Projectile,
    Hybrid,
    Energy,
    Missile,
}

impl WeaponClass {
    pub fn is_turret(self) -> bool {
        !matches!(self, WeaponClass::Missile)
    }
}

/// Slot a module occupies on the hull.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    High,
    Medium,
    Low,
    Rig,
}

/// Item classification, resolved once at catalog ingestion from group and
/// category metadata. Aggregation dispatches on this tag and never re-derives
/// it from names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Hull,
    Weapon(WeaponClass),
    Support(SlotKind),
    Charge,
    /// Published but outside the categories the engine models.
    Other,
}

impl Classification {
    pub fn weapon_class(self) -> Option<WeaponClass> {
        match self {
            Classification::Weapon(class) => Some(class),
            _ => None,
        }
    }

    /// Slot occupied when fitted; weapons always occupy a high slot.
    pub fn slot(self) -> Option<SlotKind> {
        match self {
            Classification::Weapon(_) => Some(SlotKind::High),
            Classification::Support(slot) => Some(slot),
            _ => None,
        }
    }

    pub fn is_module(self) -> bool {
        matches!(self, Classification::Weapon(_) | Classification::Support(_))
    }
}

/// Category identifiers from the export.
pub mod category {
    pub const SHIP: i64 = 6;
    pub const MODULE: i64 = 7;
    pub const CHARGE: i64 = 8;
    pub const SUBSYSTEM: i64 = 32;
}

/// Turret and launcher group identifiers from the export.
static WEAPON_GROUPS: Lazy<HashMap<i64, WeaponClass>> = Lazy::new(|| {
    let entries: &[(i64, WeaponClass)] = &[
        (53, WeaponClass::Energy),
        (55, WeaponClass::Projectile),
        (74, WeaponClass::Hybrid),
        // Launcher groups all share the missile application model.
        (506, WeaponClass::Missile),
        (507, WeaponClass::Missile),
        (508, WeaponClass::Missile),
        (509, WeaponClass::Missile),
        (510, WeaponClass::Missile),
        (511, WeaponClass::Missile),
        (771, WeaponClass::Missile),
    ];
    entries.iter().copied().collect()
});

/// Support-module group to slot, ported from the original ingestion tables.
static SUPPORT_GROUP_SLOTS: Lazy<HashMap<i64, SlotKind>> = Lazy::new(|| {
    let entries: &[(i64, SlotKind)] = &[
        // High slots (non-weapon utility).
        (76, SlotKind::High),
        (85, SlotKind::High),
        // Medium slots.
        (38, SlotKind::Medium),
        (40, SlotKind::Medium),
        (49, SlotKind::Medium),
        (56, SlotKind::Medium),
        (57, SlotKind::Medium),
        (61, SlotKind::Medium),
        (65, SlotKind::Medium),
        (71, SlotKind::Medium),
        (77, SlotKind::Medium),
        (78, SlotKind::Medium),
        (88, SlotKind::Medium),
        // Low slots.
        (42, SlotKind::Low),
        (43, SlotKind::Low),
        (46, SlotKind::Low),
        (54, SlotKind::Low),
        (59, SlotKind::Low),
        (60, SlotKind::Low),
        (62, SlotKind::Low),
        (67, SlotKind::Low),
        (98, SlotKind::Low),
        // Rigs.
        (782, SlotKind::Rig),
        (786, SlotKind::Rig),
        (787, SlotKind::Rig),
    ];
    entries.iter().copied().collect()
});

/// Classify a type from its group and category identifiers.
pub fn classify(group_id: i64, category_id: i64) -> Classification {
    match category_id {
        category::SHIP => Classification::Hull,
        category::CHARGE => Classification::Charge,
        category::MODULE | category::SUBSYSTEM => {
            if let Some(class) = WEAPON_GROUPS.get(&group_id) {
                Classification::Weapon(*class)
            } else if let Some(slot) = SUPPORT_GROUP_SLOTS.get(&group_id) {
                Classification::Support(*slot)
            } else {
                // Modules in groups the slot table does not know still count
                // as support; they contribute modifiers and resource usage
                // but cannot be slot-validated.
                Classification::Support(SlotKind::Low)
            }
        }
        _ => Classification::Other,
    }
}
