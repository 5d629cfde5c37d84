//! Fitting aggregation: hull + modules in, combat profile out.
//!
//! The aggregator orchestrates weapon resolution, stacking-penalized
//! modifier reduction, damage application, and capacitor analysis into a
//! single [`FittingReport`]. It is a pure function of its inputs and holds
//! no cross-call state; concurrent report requests are independent.

use serde::Serialize;

use crate::dogma::{attr, AttributeId, SlotKind, WeaponClass};
use crate::error::{Error, Result};
use crate::fitting::application::apply_damage;
use crate::fitting::capacitor::{analyze_capacitor, CapacitorReport};
use crate::fitting::loadout::{FittedModule, Fitting};
use crate::fitting::profile::{DamageProfile, TargetProfile};
use crate::fitting::stacking::{
    reduce_contributions, ModifierContribution, StackingCategory,
};
use crate::fitting::weapon::{resolve_weapon, Guidance, WeaponStats};

/// Support-module attributes that feed the stacking groups.
const STACKED_MODIFIER_ATTRIBUTES: [(AttributeId, StackingCategory); 3] = [
    (attr::DAMAGE_MULTIPLIER, StackingCategory::Damage),
    (attr::RATE_OF_FIRE_MULTIPLIER, StackingCategory::RateOfFire),
    (attr::TRACKING_SPEED_MULTIPLIER, StackingCategory::Tracking),
];

/// Per-weapon line in the offense report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeaponBreakdown {
    pub name: String,
    pub class: WeaponClass,
    pub quantity: u32,
    /// Total volley across all copies.
    pub volley: f64,
    /// Total nominal DPS across all copies.
    pub dps: f64,
    /// Total applied DPS across all copies, when a target was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_dps: Option<f64>,
}

/// Damage output section of the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OffenseReport {
    /// Nominal damage per volley, by damage type.
    pub volley: DamageProfile,
    pub volley_total: f64,
    /// Nominal damage per second, by damage type.
    pub dps: DamageProfile,
    pub dps_total: f64,
    /// Range/tracking/resistance-applied DPS, when a target was supplied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_dps: Option<DamageProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_dps_total: Option<f64>,
    pub weapons: Vec<WeaponBreakdown>,
}

/// One defensive layer: raw buffer, resistances, and effective hit points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayerReport {
    pub hp: f64,
    /// Resistances in [0, 1), derived from the layer's resonance attributes.
    pub resistances: DamageProfile,
    /// HP adjusted for resistances against the incoming damage mix; equals
    /// `hp` when no mix was supplied.
    pub ehp: f64,
}

/// Defensive section of the report: shield, armor, and structure layers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DefenseReport {
    pub shield: LayerReport,
    pub armor: LayerReport,
    pub hull: LayerReport,
    pub total_hp: f64,
    pub total_ehp: f64,
}

/// Usage of one continuous fitting resource (CPU or powergrid).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResourceUsage {
    pub used: f64,
    pub output: f64,
}

impl ResourceUsage {
    pub fn fits(&self) -> bool {
        self.used <= self.output
    }

    /// Amount over capacity; zero when the resource fits.
    pub fn overage(&self) -> f64 {
        (self.used - self.output).max(0.0)
    }

    /// Usage as a percentage of output (0 when the hull provides none).
    pub fn usage_percent(&self) -> f64 {
        if self.output > 0.0 {
            self.used / self.output * 100.0
        } else {
            0.0
        }
    }
}

/// Occupancy of one slot row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlotUsage {
    pub used: u32,
    pub available: u32,
}

impl SlotUsage {
    pub fn fits(&self) -> bool {
        self.used <= self.available
    }
}

/// Slot occupancy across the hull's slot rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlotReport {
    pub high: SlotUsage,
    pub medium: SlotUsage,
    pub low: SlotUsage,
    pub rig: SlotUsage,
}

impl SlotReport {
    pub fn fits(&self) -> bool {
        self.high.fits() && self.medium.fits() && self.low.fits() && self.rig.fits()
    }
}

/// Resource section of the report. Over-capacity is a fitting-validity
/// state, not an error: invalid fittings are allowed and the caller decides
/// what to do with them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResourceReport {
    pub cpu: ResourceUsage,
    pub powergrid: ResourceUsage,
    pub slots: SlotReport,
    /// True when CPU, powergrid, and every slot row fit.
    pub valid: bool,
}

/// Attribute-direct navigation and sensor figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NavigationReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_velocity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agility: Option<f64>,
    /// Seconds to align, `ln(4) * agility * mass / 1e6`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_time: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scan_resolution: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_locked_targets: Option<u32>,
}

/// The full combat profile for one fitting. Created, computed, and returned
/// within a single aggregation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FittingReport {
    pub fitting_name: String,
    pub hull_name: String,
    pub offense: OffenseReport,
    pub defense: DefenseReport,
    pub resources: ResourceReport,
    pub capacitor: CapacitorReport,
    pub navigation: NavigationReport,
}

/// Compute the combat profile for a fitting.
///
/// With no `target`, offense reports nominal, unapplied figures. With no
/// `incoming` damage mix, defense reports raw, unresisted hit points.
pub fn aggregate_fitting(
    fitting: &Fitting,
    target: Option<&TargetProfile>,
    incoming: Option<&DamageProfile>,
) -> Result<FittingReport> {
    if let Some(target) = target {
        target.validate()?;
    }
    if let Some(incoming) = incoming {
        incoming.validate_damage()?;
    }

    let (weapons, support): (Vec<&FittedModule>, Vec<&FittedModule>) = fitting
        .modules
        .iter()
        .partition(|fitted| fitted.module.classification.weapon_class().is_some());

    let multipliers = reduce_support_modifiers(&support);
    let resolved = weapons
        .iter()
        .map(|fitted| {
            resolve_weapon(&fitted.module, fitted.charge.as_ref())
                .and_then(|stats| apply_multipliers(stats, &multipliers))
                .map(|stats| (stats, fitted.quantity))
        })
        .collect::<Result<Vec<_>>>()?;

    let offense = aggregate_offense(&resolved, target)?;
    let defense = aggregate_defense(fitting, &support, incoming);
    let resources = aggregate_resources(fitting);
    let capacitor = aggregate_capacitor(fitting, &resolved, &support)?;
    let navigation = aggregate_navigation(fitting);

    Ok(FittingReport {
        fitting_name: fitting.name.clone(),
        hull_name: fitting.hull.name.clone(),
        offense,
        defense,
        resources,
        capacitor,
        navigation,
    })
}

/// Reduced same-category multipliers contributed by the support modules.
#[derive(Debug, Clone, Copy, PartialEq)]
struct EffectiveMultipliers {
    damage: f64,
    rate_of_fire: f64,
    tracking: f64,
}

fn reduce_support_modifiers(support: &[&FittedModule]) -> EffectiveMultipliers {
    let mut contributions = Vec::new();
    for fitted in support {
        for (attribute, category) in STACKED_MODIFIER_ATTRIBUTES {
            if let Some(multiplier) = fitted.module.attributes.get(attribute) {
                // Each physical copy is penalized individually.
                for _ in 0..fitted.quantity {
                    contributions.push(ModifierContribution {
                        category,
                        multiplier,
                        source: fitted.module.id,
                    });
                }
            }
        }
    }

    let reduced = reduce_contributions(&contributions);
    let get = |category: StackingCategory| reduced.get(&category).copied().unwrap_or(1.0);
    EffectiveMultipliers {
        damage: get(StackingCategory::Damage),
        rate_of_fire: get(StackingCategory::RateOfFire),
        tracking: get(StackingCategory::Tracking),
    }
}

/// Apply the reduced support multipliers to one weapon's resolved stats.
fn apply_multipliers(stats: WeaponStats, multipliers: &EffectiveMultipliers) -> Result<WeaponStats> {
    let cycle_time = stats.cycle_time * multipliers.rate_of_fire;
    if !cycle_time.is_finite() || cycle_time <= 0.0 {
        return Err(Error::DegenerateInput {
            message: format!(
                "modified cycle time must be positive for '{}', got {cycle_time}",
                stats.name
            ),
        });
    }

    let volley = stats.volley.scaled(multipliers.damage);
    let guidance = match stats.guidance {
        Guidance::Turret { tracking_speed } => Guidance::Turret {
            tracking_speed: tracking_speed * multipliers.tracking,
        },
        missile @ Guidance::Missile { .. } => missile,
    };

    Ok(WeaponStats {
        volley,
        dps: volley.scaled(1.0 / cycle_time),
        cycle_time,
        guidance,
        ..stats
    })
}

fn aggregate_offense(
    weapons: &[(WeaponStats, u32)],
    target: Option<&TargetProfile>,
) -> Result<OffenseReport> {
    let mut volley = DamageProfile::ZERO;
    let mut dps = DamageProfile::ZERO;
    let mut applied = target.map(|_| DamageProfile::ZERO);
    let mut breakdowns = Vec::with_capacity(weapons.len());

    for (stats, copies) in weapons {
        let quantity = *copies as f64;

        volley = volley.add(&stats.volley.scaled(quantity));
        dps = dps.add(&stats.dps.scaled(quantity));

        let weapon_applied = match target {
            Some(target) => {
                let landed = apply_damage(stats, target)?
                    .resisted(&target.resistances)
                    .scaled(quantity);
                if let Some(total) = applied.as_mut() {
                    *total = total.add(&landed);
                }
                Some(landed.total())
            }
            None => None,
        };

        breakdowns.push(WeaponBreakdown {
            name: stats.name.clone(),
            class: stats.class,
            quantity: *copies,
            volley: stats.volley.total() * quantity,
            dps: stats.dps.total() * quantity,
            applied_dps: weapon_applied,
        });
    }

    Ok(OffenseReport {
        volley,
        volley_total: volley.total(),
        dps,
        dps_total: dps.total(),
        applied_dps: applied,
        applied_dps_total: applied.map(|profile| profile.total()),
        weapons: breakdowns,
    })
}

/// Resistance profile of one layer from its resonance attributes.
///
/// The export stores resonances (1 - resistance); absent resonances mean no
/// resistance, so they default to 1.0.
fn layer_resistances(
    fitting: &Fitting,
    em: AttributeId,
    thermal: AttributeId,
    kinetic: AttributeId,
    explosive: AttributeId,
) -> DamageProfile {
    let resist = |id| 1.0 - fitting.hull.attributes.get_or(id, 1.0);
    DamageProfile::new(
        resist(em),
        resist(thermal),
        resist(kinetic),
        resist(explosive),
    )
}

fn layer_report(hp: f64, resistances: DamageProfile, incoming: Option<&DamageProfile>) -> LayerReport {
    let ehp = match incoming.and_then(|mix| mix.shares()) {
        Some(shares) => {
            // Weighted mean vulnerability of the incoming mix; resistances
            // below 1.0 keep this strictly positive.
            let vulnerability = shares.em * (1.0 - resistances.em)
                + shares.thermal * (1.0 - resistances.thermal)
                + shares.kinetic * (1.0 - resistances.kinetic)
                + shares.explosive * (1.0 - resistances.explosive);
            hp / vulnerability
        }
        None => hp,
    };
    LayerReport {
        hp,
        resistances,
        ehp,
    }
}

fn aggregate_defense(
    fitting: &Fitting,
    support: &[&FittedModule],
    incoming: Option<&DamageProfile>,
) -> DefenseReport {
    let flat_bonus = |id: AttributeId| -> f64 {
        support
            .iter()
            .map(|fitted| fitted.module.attributes.get_or(id, 0.0) * fitted.quantity as f64)
            .sum()
    };

    let shield_hp = fitting.hull.attributes.get_or(attr::SHIELD_CAPACITY, 0.0)
        + flat_bonus(attr::SHIELD_CAPACITY_BONUS);
    let armor_hp =
        fitting.hull.attributes.get_or(attr::ARMOR_HP, 0.0) + flat_bonus(attr::ARMOR_HP_BONUS);
    let hull_hp = fitting.hull.attributes.get_or(attr::STRUCTURE_HP, 0.0);

    let shield = layer_report(
        shield_hp,
        layer_resistances(
            fitting,
            attr::SHIELD_EM_RESONANCE,
            attr::SHIELD_THERMAL_RESONANCE,
            attr::SHIELD_KINETIC_RESONANCE,
            attr::SHIELD_EXPLOSIVE_RESONANCE,
        ),
        incoming,
    );
    let armor = layer_report(
        armor_hp,
        layer_resistances(
            fitting,
            attr::ARMOR_EM_RESONANCE,
            attr::ARMOR_THERMAL_RESONANCE,
            attr::ARMOR_KINETIC_RESONANCE,
            attr::ARMOR_EXPLOSIVE_RESONANCE,
        ),
        incoming,
    );
    let hull = layer_report(
        hull_hp,
        layer_resistances(
            fitting,
            attr::HULL_EM_RESONANCE,
            attr::HULL_THERMAL_RESONANCE,
            attr::HULL_KINETIC_RESONANCE,
            attr::HULL_EXPLOSIVE_RESONANCE,
        ),
        incoming,
    );

    DefenseReport {
        shield,
        armor,
        hull,
        total_hp: shield.hp + armor.hp + hull.hp,
        total_ehp: shield.ehp + armor.ehp + hull.ehp,
    }
}

fn aggregate_resources(fitting: &Fitting) -> ResourceReport {
    let used = |id: AttributeId| -> f64 {
        fitting
            .modules
            .iter()
            .map(|fitted| fitted.module.attributes.get_or(id, 0.0) * fitted.quantity as f64)
            .sum()
    };

    let cpu = ResourceUsage {
        used: used(attr::CPU_USAGE),
        output: fitting.hull.attributes.get_or(attr::CPU_OUTPUT, 0.0),
    };
    let powergrid = ResourceUsage {
        used: used(attr::POWERGRID_USAGE),
        output: fitting.hull.attributes.get_or(attr::POWERGRID_OUTPUT, 0.0),
    };

    let mut counts = [0u32; 4];
    for fitted in &fitting.modules {
        if let Some(slot) = fitted.module.classification.slot() {
            let index = match slot {
                SlotKind::High => 0,
                SlotKind::Medium => 1,
                SlotKind::Low => 2,
                SlotKind::Rig => 3,
            };
            counts[index] += fitted.quantity;
        }
    }
    let available = |id: AttributeId| fitting.hull.attributes.get_or(id, 0.0).max(0.0) as u32;
    let slots = SlotReport {
        high: SlotUsage {
            used: counts[0],
            available: available(attr::HIGH_SLOTS),
        },
        medium: SlotUsage {
            used: counts[1],
            available: available(attr::MED_SLOTS),
        },
        low: SlotUsage {
            used: counts[2],
            available: available(attr::LOW_SLOTS),
        },
        rig: SlotUsage {
            used: counts[3],
            available: available(attr::RIG_SLOTS),
        },
    };

    ResourceReport {
        valid: cpu.fits() && powergrid.fits() && slots.fits(),
        cpu,
        powergrid,
        slots,
    }
}

fn aggregate_capacitor(
    fitting: &Fitting,
    weapons: &[(WeaponStats, u32)],
    support: &[&FittedModule],
) -> Result<CapacitorReport> {
    let capacity = fitting.hull.require(attr::CAPACITOR_CAPACITY)?;
    let recharge_time = fitting.hull.require(attr::RECHARGE_RATE)? / 1000.0;

    let mut drain = 0.0;
    for (stats, copies) in weapons {
        drain += stats.capacitor_per_second() * *copies as f64;
    }
    for fitted in support {
        let need = fitted.module.attributes.get(attr::CAPACITOR_NEED);
        let duration_ms = fitted.module.attributes.get(attr::DURATION);
        if let (Some(need), Some(duration_ms)) = (need, duration_ms) {
            if duration_ms > 0.0 {
                drain += need / (duration_ms / 1000.0) * fitted.quantity as f64;
            }
        }
    }

    analyze_capacitor(drain, capacity, recharge_time)
}

fn aggregate_navigation(fitting: &Fitting) -> NavigationReport {
    let attrs = &fitting.hull.attributes;
    let agility = attrs.get(attr::AGILITY);
    let mass = attrs.get(attr::MASS);
    let align_time = match (agility, mass) {
        (Some(agility), Some(mass)) => Some(4.0_f64.ln() * agility * mass / 1_000_000.0),
        _ => None,
    };

    NavigationReport {
        max_velocity: attrs.get(attr::MAX_VELOCITY),
        agility,
        align_time,
        signature_radius: attrs.get(attr::SIGNATURE_RADIUS),
        scan_resolution: attrs.get(attr::SCAN_RESOLUTION),
        max_locked_targets: attrs.get(attr::MAX_LOCKED_TARGETS).map(|value| value as u32),
    }
}
