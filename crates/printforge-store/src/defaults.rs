//! Default reference data seeded on first use.

use printforge_models::{ConstantId, CostConstant, Machine, MachineId, Material, MaterialId,
    PrintType};

/// Ids of the system rate constants. These are always hidden from
/// consumable selection.
pub const SYSTEM_CONSTANT_IDS: [&str; 4] = ["electricity", "labor", "overhead", "markup"];

fn material(id: &str, name: &str, cost_per_unit: f64, unit: &str, print_type: PrintType) -> Material {
    Material {
        id: MaterialId::from(id),
        name: name.to_string(),
        cost_per_unit,
        unit: unit.to_string(),
        print_type,
    }
}

fn machine(id: &str, name: &str, hourly_cost: f64, watts: f64, print_type: PrintType) -> Machine {
    Machine {
        id: MachineId::from(id),
        name: name.to_string(),
        hourly_cost,
        power_consumption_watts: Some(watts),
        print_type,
    }
}

/// Starter material catalog covering common FDM filaments and resins.
pub fn default_materials() -> Vec<Material> {
    vec![
        material("fdm-pla", "PLA", 25.0, "kg", PrintType::Fdm),
        material("fdm-pla-plus", "PLA+", 28.0, "kg", PrintType::Fdm),
        material("fdm-abs", "ABS", 28.0, "kg", PrintType::Fdm),
        material("fdm-petg", "PETG", 30.0, "kg", PrintType::Fdm),
        material("fdm-tpu", "TPU", 45.0, "kg", PrintType::Fdm),
        material("fdm-nylon", "Nylon", 50.0, "kg", PrintType::Fdm),
        material("fdm-pc", "Polycarbonate (PC)", 55.0, "kg", PrintType::Fdm),
        material("resin-standard", "Standard Resin", 35.0, "liter", PrintType::Resin),
        material("resin-water-washable", "Water Washable Resin", 45.0, "liter", PrintType::Resin),
        material("resin-abs-like", "ABS-Like Resin", 50.0, "liter", PrintType::Resin),
        material("resin-tough", "Tough Resin", 55.0, "liter", PrintType::Resin),
        material("resin-8k", "8K High-Detail Resin", 50.0, "liter", PrintType::Resin),
    ]
}

/// Starter machine catalog.
pub fn default_machines() -> Vec<Machine> {
    vec![
        machine("fdm-ender3", "Ender 3", 2.0, 350.0, PrintType::Fdm),
        machine("fdm-prusa-mk4", "Prusa MK4", 6.0, 150.0, PrintType::Fdm),
        machine("fdm-bambu-a1", "Bambu Lab A1", 6.0, 200.0, PrintType::Fdm),
        machine("fdm-bambu-p1s", "Bambu Lab P1S", 8.0, 350.0, PrintType::Fdm),
        machine("fdm-bambu-x1c", "Bambu Lab X1 Carbon", 10.0, 400.0, PrintType::Fdm),
        machine("fdm-voron-24", "Voron 2.4", 7.0, 400.0, PrintType::Fdm),
        machine("resin-elegoo-mars3", "Elegoo Mars 3", 3.0, 45.0, PrintType::Resin),
        machine("resin-elegoo-saturn3", "Elegoo Saturn 3", 5.0, 60.0, PrintType::Resin),
        machine("resin-anycubic", "Anycubic Photon Mono", 4.0, 50.0, PrintType::Resin),
        machine("resin-phrozen-mini8k", "Phrozen Sonic Mini 8K", 5.0, 50.0, PrintType::Resin),
    ]
}

/// System rates plus a starter set of paint consumables.
pub fn default_constants() -> Vec<CostConstant> {
    vec![
        CostConstant {
            id: ConstantId::from("electricity"),
            name: "Electricity Rate".to_string(),
            value: 0.12,
            unit: "$/kWh".to_string(),
            is_visible: false,
            description: Some("Cost per kilowatt-hour".to_string()),
        },
        CostConstant {
            id: ConstantId::from("labor"),
            name: "Labor Rate".to_string(),
            value: 15.0,
            unit: "$/hr".to_string(),
            is_visible: false,
            description: Some("Hourly labor cost".to_string()),
        },
        CostConstant {
            id: ConstantId::from("overhead"),
            name: "Overhead Rate".to_string(),
            value: 10.0,
            unit: "%".to_string(),
            is_visible: false,
            description: Some("Overhead percentage".to_string()),
        },
        CostConstant {
            id: ConstantId::from("markup"),
            name: "Default Markup".to_string(),
            value: 30.0,
            unit: "%".to_string(),
            is_visible: false,
            description: Some("Default profit margin".to_string()),
        },
        CostConstant {
            id: ConstantId::from("paint-acrylic-standard"),
            name: "Acrylic Paint (Standard)".to_string(),
            value: 0.10,
            unit: "$/ml".to_string(),
            is_visible: true,
            description: Some("Standard hobby painting. Usage Rate: 0.02ml/cm2".to_string()),
        },
        CostConstant {
            id: ConstantId::from("paint-spray-primer"),
            name: "Spray Primer".to_string(),
            value: 0.08,
            unit: "$/ml".to_string(),
            is_visible: true,
            description: Some("Base coat primer. Usage Rate: 0.03ml/cm2".to_string()),
        },
        CostConstant {
            id: ConstantId::from("paint-clear-coat"),
            name: "Clear Coat Varnish".to_string(),
            value: 0.12,
            unit: "$/ml".to_string(),
            is_visible: true,
            description: Some("Protective finish. Usage Rate: 0.02ml/cm2".to_string()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_constants_hidden() {
        let constants = default_constants();
        for id in SYSTEM_CONSTANT_IDS {
            let constant = constants
                .iter()
                .find(|c| c.id.as_str() == id)
                .expect("system constant seeded");
            assert!(!constant.is_visible, "{} should be hidden", id);
        }
    }

    #[test]
    fn test_default_catalogs_cover_both_print_types() {
        assert!(default_materials()
            .iter()
            .any(|m| m.print_type == PrintType::Fdm));
        assert!(default_materials()
            .iter()
            .any(|m| m.print_type == PrintType::Resin));
        assert!(default_machines()
            .iter()
            .any(|m| m.print_type == PrintType::Resin));
    }
}
