//! Fitting simulation: loadout assembly and combat-profile computation.
//!
//! This module is organized into focused submodules:
//!
//! - [`profile`] - Damage and target profiles
//! - [`loadout`] - Fitting definitions and catalog-backed assembly
//! - [`weapon`] - Weapon stats resolution
//! - [`stacking`] - Diminishing-returns stacking of same-category bonuses
//! - [`application`] - Range/tracking/signature damage application
//! - [`capacitor`] - Capacitor stability analysis
//! - [`aggregate`] - The report aggregator tying the above together
//!
//! Raw attributes flow one way through the pipeline: per-module resolved
//! stats, stacking-penalized aggregate modifiers, applied damage and
//! resource figures, final report. Every step is a deterministic function
//! of its inputs.
//!
//! # Example
//!
//! ```no_run
//! use evafit_lib::{aggregate_fitting, Fitting, FittingDefinition, TypeCatalog};
//!
//! let catalog = TypeCatalog::load(std::path::Path::new("static_data.db")).unwrap();
//! let definition =
//!     FittingDefinition::from_json_file(std::path::Path::new("fit.json")).unwrap();
//! let fitting = Fitting::assemble(&catalog, &definition).unwrap();
//! let report = aggregate_fitting(&fitting, None, None).unwrap();
//! println!("{} DPS", report.offense.dps_total);
//! ```

pub mod aggregate;
pub mod application;
pub mod capacitor;
pub mod loadout;
pub mod profile;
pub mod stacking;
pub mod weapon;

pub use aggregate::{
    aggregate_fitting, DefenseReport, FittingReport, LayerReport, NavigationReport,
    OffenseReport, ResourceReport, ResourceUsage, SlotReport, SlotUsage, WeaponBreakdown,
};
pub use application::{
    application_factor, apply_damage, missile_application_factor, turret_hit_factor,
    turret_range_factor, TURRET_MINIMUM_HIT_FACTOR,
};
pub use capacitor::{analyze_capacitor, CapacitorReport, PEAK_RECHARGE_FACTOR};
pub use loadout::{Fitting, FittingDefinition, FittedModule, ModuleEntry};
pub use profile::{DamageProfile, TargetProfile};
pub use stacking::{
    combine_stacked, reduce_contributions, stacking_factor, ModifierContribution,
    StackingCategory, STACKING_PENALTY_DIVISOR,
};
pub use weapon::{resolve_weapon, Guidance, WeaponStats};
