//! Text rendering for catalog types and fitting reports.

use std::fmt::Write;

use evafit_lib::{attribute_label, FittingReport, TypeRecord};

/// Render one catalog type with dictionary-resolved attribute names.
pub fn render_type(record: &TypeRecord) -> String {
    let mut buffer = String::new();
    let _ = writeln!(
        buffer,
        "{} ({}), group {}, {:?}",
        record.name, record.id, record.group_id, record.classification
    );
    for (id, value) in record.attributes.iter_sorted() {
        let _ = writeln!(buffer, "  {:<32} {}", attribute_label(id), value);
    }
    buffer
}

/// Render a fitting report as text.
pub fn render_report(report: &FittingReport) -> String {
    let mut buffer = String::new();
    let _ = writeln!(buffer, "{} — {}", report.fitting_name, report.hull_name);

    let offense = &report.offense;
    let _ = writeln!(
        buffer,
        "\nOffense: {:.1} DPS ({:.1} volley)",
        offense.dps_total, offense.volley_total
    );
    if let Some(applied) = offense.applied_dps_total {
        let _ = writeln!(buffer, "Applied: {:.1} DPS against target", applied);
    }
    for weapon in &offense.weapons {
        match weapon.applied_dps {
            Some(applied) => {
                let _ = writeln!(
                    buffer,
                    "  {}x {:<28} {:>7.1} DPS ({:.1} applied)",
                    weapon.quantity, weapon.name, weapon.dps, applied
                );
            }
            None => {
                let _ = writeln!(
                    buffer,
                    "  {}x {:<28} {:>7.1} DPS",
                    weapon.quantity, weapon.name, weapon.dps
                );
            }
        }
    }

    let defense = &report.defense;
    let _ = writeln!(
        buffer,
        "\nDefense: {:.0} EHP ({:.0} raw)",
        defense.total_ehp, defense.total_hp
    );
    for (label, layer) in [
        ("Shield", &defense.shield),
        ("Armor", &defense.armor),
        ("Hull", &defense.hull),
    ] {
        let _ = writeln!(
            buffer,
            "  {:<7} {:>8.0} HP  (em {:.0}% th {:.0}% kin {:.0}% ex {:.0}%)",
            label,
            layer.hp,
            layer.resistances.em * 100.0,
            layer.resistances.thermal * 100.0,
            layer.resistances.kinetic * 100.0,
            layer.resistances.explosive * 100.0,
        );
    }

    let resources = &report.resources;
    let _ = writeln!(
        buffer,
        "\nFitting: {}",
        if resources.valid { "ok" } else { "INVALID" }
    );
    let _ = writeln!(
        buffer,
        "  CPU       {:>7.1} / {:<7.1} ({:.0}%)",
        resources.cpu.used,
        resources.cpu.output,
        resources.cpu.usage_percent()
    );
    let _ = writeln!(
        buffer,
        "  Powergrid {:>7.1} / {:<7.1} ({:.0}%)",
        resources.powergrid.used,
        resources.powergrid.output,
        resources.powergrid.usage_percent()
    );
    let slots = &resources.slots;
    let _ = writeln!(
        buffer,
        "  Slots     high {}/{}, med {}/{}, low {}/{}, rig {}/{}",
        slots.high.used,
        slots.high.available,
        slots.medium.used,
        slots.medium.available,
        slots.low.used,
        slots.low.available,
        slots.rig.used,
        slots.rig.available,
    );

    let capacitor = &report.capacitor;
    match capacitor.seconds_to_empty {
        None => {
            let _ = writeln!(
                buffer,
                "\nCapacitor: stable ({:.1} GJ/s drain, {:.1} GJ/s recharge)",
                capacitor.drain_per_second, capacitor.recharge_per_second
            );
        }
        Some(ttl) => {
            let _ = writeln!(
                buffer,
                "\nCapacitor: empties in {:.0} s ({:.1} GJ/s drain, {:.1} GJ/s recharge)",
                ttl, capacitor.drain_per_second, capacitor.recharge_per_second
            );
        }
    }

    let navigation = &report.navigation;
    if let Some(velocity) = navigation.max_velocity {
        let _ = write!(buffer, "\nNavigation: {:.0} m/s", velocity);
        if let Some(align) = navigation.align_time {
            let _ = write!(buffer, ", aligns in {:.1} s", align);
        }
        if let Some(signature) = navigation.signature_radius {
            let _ = write!(buffer, ", {:.0} m signature", signature);
        }
        let _ = writeln!(buffer);
    }

    buffer
}
