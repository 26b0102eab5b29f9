//! Reference data: materials, machines, cost constants, customers.
//!
//! These are read-mostly records edited through the settings commands and
//! consumed by the calculators.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{ConstantId, CustomerId, MachineId, MaterialId};

/// Printing technology a material or machine belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrintType {
    #[serde(rename = "FDM")]
    Fdm,
    #[serde(rename = "Resin")]
    Resin,
}

impl fmt::Display for PrintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrintType::Fdm => f.write_str("FDM"),
            PrintType::Resin => f.write_str("Resin"),
        }
    }
}

impl FromStr for PrintType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fdm" => Ok(PrintType::Fdm),
            "resin" => Ok(PrintType::Resin),
            other => Err(format!("unknown print type: {}", other)),
        }
    }
}

/// A printable material with its cost per purchasing unit.
///
/// FDM materials are priced per kilogram, resin per liter; the `unit`
/// label is display-only and the calculators convert grams/milliliters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: MaterialId,
    pub name: String,
    pub cost_per_unit: f64,
    pub unit: String,
    pub print_type: PrintType,
}

impl Material {
    /// Creates a material with a fresh id.
    pub fn new(
        name: impl Into<String>,
        cost_per_unit: f64,
        unit: impl Into<String>,
        print_type: PrintType,
    ) -> Self {
        Self {
            id: MaterialId::new(),
            name: name.into(),
            cost_per_unit,
            unit: unit.into(),
            print_type,
        }
    }
}

/// A printer with its running cost and power draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    pub id: MachineId,
    pub name: String,
    pub hourly_cost: f64,

    /// Power draw in watts; `None` when unknown (electricity cost is
    /// then treated as zero).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_consumption_watts: Option<f64>,

    pub print_type: PrintType,
}

impl Machine {
    /// Creates a machine with a fresh id.
    pub fn new(
        name: impl Into<String>,
        hourly_cost: f64,
        power_consumption_watts: Option<f64>,
        print_type: PrintType,
    ) -> Self {
        Self {
            id: MachineId::new(),
            name: name.into(),
            hourly_cost,
            power_consumption_watts,
            print_type,
        }
    }
}

/// A named rate or consumable charge used by the calculators.
///
/// System constants (electricity, labor, overhead, markup) are kept
/// hidden so they never show up in consumable pickers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostConstant {
    pub id: ConstantId,
    pub name: String,
    pub value: f64,
    pub unit: String,

    #[serde(default = "default_visible")]
    pub is_visible: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_visible() -> bool {
    true
}

impl CostConstant {
    /// Creates a visible constant with a fresh id.
    pub fn new(name: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            id: ConstantId::new(),
            name: name.into(),
            value,
            unit: unit.into(),
            is_visible: true,
            description: None,
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Marks the constant as hidden from consumable selection.
    pub fn hidden(mut self) -> Self {
        self.is_visible = false;
        self
    }
}

/// A customer the shop quotes for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Creates a customer with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CustomerId::new(),
            name: name.into(),
            email: None,
            phone: None,
            company: None,
            notes: None,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_type_serialization() {
        assert_eq!(serde_json::to_string(&PrintType::Fdm).unwrap(), "\"FDM\"");
        assert_eq!(
            serde_json::to_string(&PrintType::Resin).unwrap(),
            "\"Resin\""
        );
    }

    #[test]
    fn test_print_type_from_str() {
        assert_eq!("fdm".parse::<PrintType>().unwrap(), PrintType::Fdm);
        assert_eq!("Resin".parse::<PrintType>().unwrap(), PrintType::Resin);
        assert!("SLS".parse::<PrintType>().is_err());
    }

    #[test]
    fn test_material_roundtrip() {
        let material = Material::new("PLA", 25.0, "kg", PrintType::Fdm);
        let json = serde_json::to_string(&material).unwrap();
        let back: Material = serde_json::from_str(&json).unwrap();
        assert_eq!(material, back);
    }

    #[test]
    fn test_machine_without_power_draw() {
        let machine = Machine::new("Ender 3", 2.0, None, PrintType::Fdm);
        let json = serde_json::to_string(&machine).unwrap();
        assert!(!json.contains("power_consumption_watts"));
    }

    #[test]
    fn test_constant_visibility_defaults_on() {
        let json = r#"{"id":"labor","name":"Labor Rate","value":15.0,"unit":"$/hr"}"#;
        let constant: CostConstant = serde_json::from_str(json).unwrap();
        assert!(constant.is_visible);
    }

    #[test]
    fn test_constant_hidden_builder() {
        let constant = CostConstant::new("Labor Rate", 15.0, "$/hr").hidden();
        assert!(!constant.is_visible);
    }
}
