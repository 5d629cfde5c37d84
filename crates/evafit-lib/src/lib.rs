//! EVA Fit library entry points.
//!
//! This crate exposes helpers to load the static data catalog, assemble a
//! ship fitting from a definition, and compute its combat profile: damage
//! output, effective hit points, resource usage, and capacitor stability.
//! Higher-level consumers (CLI, UI shells) should only depend on the items
//! exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod catalog;
pub mod dogma;
pub mod error;
pub mod fitting;

pub use catalog::{TypeCatalog, TypeRecord};
pub use dogma::{
    attribute_label, attribute_name, classify, AttributeId, AttributeSet, Classification,
    SlotKind, TypeId, WeaponClass,
};
pub use error::{Error, Result};
pub use fitting::{
    aggregate_fitting, analyze_capacitor, apply_damage, combine_stacked, resolve_weapon,
    CapacitorReport, DamageProfile, DefenseReport, Fitting, FittingDefinition, FittingReport,
    Guidance, ModuleEntry, OffenseReport, ResourceReport, StackingCategory, TargetProfile,
    WeaponStats,
};
