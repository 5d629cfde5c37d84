//! Fitting definitions and assembly.
//!
//! A [`FittingDefinition`] is the caller-facing description of a loadout:
//! a hull name plus module entries, as found in a fitting JSON file. A
//! [`Fitting`] is the assembled form with every name resolved against the
//! catalog and classification checked, ready for aggregation.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{TypeCatalog, TypeRecord};
use crate::dogma::Classification;
use crate::error::{Error, Result};

/// One module line in a fitting definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleEntry {
    /// Module type name.
    #[serde(rename = "type")]
    pub type_name: String,
    /// Loaded charge type name, for weapons that take one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charge: Option<String>,
    /// Number of identical copies fitted.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

/// Caller-facing loadout description, serialized as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittingDefinition {
    pub name: String,
    /// Hull type name.
    pub ship: String,
    #[serde(default)]
    pub modules: Vec<ModuleEntry>,
}

impl FittingDefinition {
    /// Parse a definition from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a definition from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

/// A module resolved against the catalog, with its loaded charge.
#[derive(Debug, Clone, PartialEq)]
pub struct FittedModule {
    pub module: TypeRecord,
    pub charge: Option<TypeRecord>,
    pub quantity: u32,
}

/// A fully resolved loadout: hull plus fitted modules.
#[derive(Debug, Clone, PartialEq)]
pub struct Fitting {
    pub name: String,
    pub hull: TypeRecord,
    pub modules: Vec<FittedModule>,
}

impl Fitting {
    /// Assemble a fitting by resolving every name in `definition` against
    /// the catalog.
    ///
    /// Classification is checked here, once: the ship entry must be a hull,
    /// module entries must be modules, charges must be charges. Aggregation
    /// can then dispatch on tags without re-validating.
    pub fn assemble(catalog: &TypeCatalog, definition: &FittingDefinition) -> Result<Self> {
        let hull = catalog.resolve_name(&definition.ship)?.clone();
        if hull.classification != Classification::Hull {
            return Err(Error::NotAHull { name: hull.name });
        }

        let mut modules = Vec::with_capacity(definition.modules.len());
        for entry in &definition.modules {
            if entry.quantity == 0 {
                return Err(Error::DegenerateInput {
                    message: format!("quantity for '{}' must be at least 1", entry.type_name),
                });
            }

            let module = catalog.resolve_name(&entry.type_name)?.clone();
            if !module.classification.is_module() {
                return Err(Error::NotAModule { name: module.name });
            }

            let charge = match &entry.charge {
                Some(name) => {
                    let charge = catalog.resolve_name(name)?.clone();
                    if charge.classification != Classification::Charge {
                        return Err(Error::NotACharge { name: charge.name });
                    }
                    Some(charge)
                }
                None => None,
            };

            modules.push(FittedModule {
                module,
                charge,
                quantity: entry.quantity,
            });
        }

        Ok(Self {
            name: definition.name.clone(),
            hull,
            modules,
        })
    }
}
