//! Subcommand handlers.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use evafit_lib::{
    aggregate_fitting, DamageProfile, Fitting, FittingDefinition, TargetProfile, TypeCatalog,
};

use crate::output;

/// Target flags collected from the command line. A target exists only when a
/// signature radius was supplied; range and velocity default to zero.
#[derive(Debug, Clone, Copy)]
pub struct TargetArgs {
    pub signature: Option<f64>,
    pub range: f64,
    pub velocity: f64,
}

impl TargetArgs {
    fn to_profile(self) -> Option<TargetProfile> {
        self.signature.map(|signature_radius| TargetProfile {
            signature_radius,
            transverse_velocity: self.velocity,
            range: self.range,
            resistances: DamageProfile::ZERO,
        })
    }
}

/// Handle the types subcommand: search the catalog by name fragment.
pub fn handle_types(data: Option<&Path>, query: &str) -> Result<()> {
    let catalog = load_catalog(data)?;
    let matches = catalog.search(query);
    if matches.is_empty() {
        println!("No types matching '{query}'.");
        return Ok(());
    }

    println!("Types matching '{query}' ({}):", matches.len());
    for record in matches {
        println!("{:>8}  {}", record.id, record.name);
    }
    Ok(())
}

/// Handle the hulls subcommand: list hull types.
pub fn handle_hulls(data: Option<&Path>) -> Result<()> {
    let catalog = load_catalog(data)?;
    let hulls = catalog.hulls();
    if hulls.is_empty() {
        println!("No hulls available in catalog.");
        return Ok(());
    }

    println!("Available hulls ({}):", hulls.len());
    for hull in hulls {
        println!("{:>8}  {}", hull.id, hull.name);
    }
    Ok(())
}

/// Handle the show subcommand: dump one type's attributes.
pub fn handle_show(data: Option<&Path>, type_name: &str) -> Result<()> {
    let catalog = load_catalog(data)?;
    let record = catalog.resolve_name(type_name)?;
    print!("{}", output::render_type(record));
    Ok(())
}

/// Handle the report subcommand: aggregate a fitting file into a report.
pub fn handle_report(
    data: Option<&Path>,
    fitting_path: &Path,
    target: TargetArgs,
    incoming: Option<&str>,
    json: bool,
) -> Result<()> {
    let catalog = load_catalog(data)?;
    let definition = FittingDefinition::from_json_file(fitting_path)
        .with_context(|| format!("failed to read fitting from {}", fitting_path.display()))?;
    let fitting = Fitting::assemble(&catalog, &definition)?;

    let target_profile = target.to_profile();
    let incoming_profile = incoming.map(parse_damage_mix).transpose()?;

    let report = aggregate_fitting(
        &fitting,
        target_profile.as_ref(),
        incoming_profile.as_ref(),
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", output::render_report(&report));
    }
    Ok(())
}

/// Parse an `em,thermal,kinetic,explosive` damage mix.
fn parse_damage_mix(text: &str) -> Result<DamageProfile> {
    let parts: Vec<&str> = text.split(',').map(str::trim).collect();
    if parts.len() != 4 {
        anyhow::bail!("damage mix must have four comma-separated values, got '{text}'");
    }
    let mut values = [0.0_f64; 4];
    for (slot, part) in values.iter_mut().zip(&parts) {
        *slot = part
            .parse()
            .with_context(|| format!("invalid damage value '{part}'"))?;
    }
    Ok(DamageProfile::new(values[0], values[1], values[2], values[3]))
}

/// Resolve the static data path from the flag or EVAFIT_STATIC_DATA.
fn resolve_data_path(data: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = data {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = std::env::var("EVAFIT_STATIC_DATA") {
        return Ok(PathBuf::from(env_path));
    }
    anyhow::bail!("no static data export given; pass --data or set EVAFIT_STATIC_DATA")
}

fn load_catalog(data: Option<&Path>) -> Result<TypeCatalog> {
    let path = resolve_data_path(data)?;
    TypeCatalog::load(&path)
        .with_context(|| format!("failed to load static data from {}", path.display()))
}
