//! Static registry of Value Assessment Drivers (VADs).
//!
//! Each driver is one measurable benefit category with a fixed variable
//! schema. The registry is declared at compile time and never mutated;
//! declaration order here is the canonical ordering for every downstream
//! consumer (selection sets, input tables, formula dispatch).
//!
//! Formulas dispatch on the stable [`VadId`], never on the display name, so
//! relabeling a driver in the palette cannot change which formula runs.

use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Stable identifier of a Value Assessment Driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VadId {
    /// Lower HVAC electricity consumption.
    ReducedElectricity,
    /// Cheaper maintenance via the predictive plan.
    ReducedMaintenance,
    /// More patrons through better air quality.
    IncreasedTicketSales,
    /// Fewer shows lost to HVAC failure.
    AvoidedRevenueLoss,
    /// Higher end-of-life recyclability of units.
    IncreasedRecyclability,
    /// Lower embodied carbon in the installed units.
    EmbodiedCarbonReduction,
}

impl VadId {
    /// All drivers in catalog declaration order.
    pub const ALL: [Self; 6] = [
        Self::ReducedElectricity,
        Self::ReducedMaintenance,
        Self::IncreasedTicketSales,
        Self::AvoidedRevenueLoss,
        Self::IncreasedRecyclability,
        Self::EmbodiedCarbonReduction,
    ];

    /// Stable key used in serialized state and input tables.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::ReducedElectricity => "reduced_electricity",
            Self::ReducedMaintenance => "reduced_maintenance",
            Self::IncreasedTicketSales => "increased_ticket_sales",
            Self::AvoidedRevenueLoss => "avoided_revenue_loss",
            Self::IncreasedRecyclability => "increased_recyclability",
            Self::EmbodiedCarbonReduction => "embodied_carbon_reduction",
        }
    }

    /// Human-readable name shown in the palette and on rendered blocks.
    ///
    /// Cosmetic only; never used for dispatch.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::ReducedElectricity => "Reduced Electricity Consumption",
            Self::ReducedMaintenance => "Reduced Maintenance Cost",
            Self::IncreasedTicketSales => "Increased Ticket Sales",
            Self::AvoidedRevenueLoss => "Avoided Revenue Loss",
            Self::IncreasedRecyclability => "Increase in Recyclability",
            Self::EmbodiedCarbonReduction => "Lower Material Input Emissions",
        }
    }

    /// Resolves a stable key back to its driver, if known.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.key() == key)
    }

    /// Resolves a display name back to its driver, if known.
    ///
    /// Kept for layouts serialized before blocks carried stable ids.
    #[must_use]
    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.display_name() == name)
    }

    /// Parses a stable key, failing on unknown drivers.
    pub fn parse(key: &str) -> Result<Self> {
        Self::from_key(key).ok_or_else(|| anyhow::anyhow!("Unknown driver '{key}'"))
    }
}

impl fmt::Display for VadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One variable in a driver's formula schema.
///
/// User-input variables are filled by the viewer on the Inputs screen and
/// addressed by `field_index`; built-in variables supply the fixed constants
/// their formula combines them with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DriverVariable {
    /// Variable label shown in the builder and on input widgets.
    pub label: &'static str,
    /// Default (and, for built-ins, authoritative) value.
    pub default_value: f64,
    /// Unit of measure.
    pub unit: &'static str,
    /// Whether the viewer supplies this value.
    pub user_input: bool,
    /// Dense index into the driver's input fields; `None` for built-ins.
    pub field_index: Option<u32>,
}

const fn user(label: &'static str, default_value: f64, unit: &'static str, idx: u32) -> DriverVariable {
    DriverVariable {
        label,
        default_value,
        unit,
        user_input: true,
        field_index: Some(idx),
    }
}

const fn builtin(label: &'static str, default_value: f64, unit: &'static str) -> DriverVariable {
    DriverVariable {
        label,
        default_value,
        unit,
        user_input: false,
        field_index: None,
    }
}

const REDUCED_ELECTRICITY: &[DriverVariable] = &[
    user("Current Annual HVAC kWh Consumption", 1_020_000.0, "kWh", 0),
    builtin("UAHU Energy Reduction Percentage", 50.0, "%"),
    builtin("Cost per kWh", 0.15, "$"),
];

const REDUCED_MAINTENANCE: &[DriverVariable] = &[
    user("Cost of Current Maintenance Contract per year", 12_000.0, "$", 0),
    builtin("Cost of UAHU Predictive Maintenance Plan per year", 5_000.0, "$"),
];

const INCREASED_TICKET_SALES: &[DriverVariable] = &[
    user("Annual Patrons", 150_000.0, "Number", 0),
    builtin("Projected Patronage Increase %", 1.0, "%"),
    user("Average Ticket Profit", 12.0, "$", 1),
];

const AVOIDED_REVENUE_LOSS: &[DriverVariable] = &[
    user("Revenue per Show", 18_000.0, "$", 0),
    user("Number of At-Risk Shows Annually", 52.0, "Number", 1),
    builtin("Average show failure probability", 3.0, "%"),
    builtin("UAHU show failure probability", 1.0, "%"),
];

const INCREASED_RECYCLABILITY: &[DriverVariable] = &[
    user("Number of HVAC units required", 10.0, "Number", 0),
    builtin("Average Recyclability rate", 40.0, "%"),
    builtin("Recyclability rate of UAHU", 60.0, "%"),
    builtin("Cost saved by recyclability", 5_000.0, "$"),
];

const EMBODIED_CARBON_REDUCTION: &[DriverVariable] = &[
    user("Number of HVAC units required", 10.0, "Number", 0),
    builtin("Average emissions of HVAC", 5_000.0, "kgCO2e"),
    builtin("Emission reduction rate of UAHU", 30.0, "%"),
    builtin("Cost of Carbon (Tax or Credit price)", 0.08, "$"),
];

/// Returns the variable schema for a driver, in declaration order.
#[must_use]
pub const fn variables(id: VadId) -> &'static [DriverVariable] {
    match id {
        VadId::ReducedElectricity => REDUCED_ELECTRICITY,
        VadId::ReducedMaintenance => REDUCED_MAINTENANCE,
        VadId::IncreasedTicketSales => INCREASED_TICKET_SALES,
        VadId::AvoidedRevenueLoss => AVOIDED_REVENUE_LOSS,
        VadId::IncreasedRecyclability => INCREASED_RECYCLABILITY,
        VadId::EmbodiedCarbonReduction => EMBODIED_CARBON_REDUCTION,
    }
}

/// Returns the built-in constants for a driver, in declaration order.
///
/// These are the fixed values a formula combines user fields with.
#[must_use]
pub fn builtin_defaults(id: VadId) -> Vec<f64> {
    variables(id)
        .iter()
        .filter(|v| !v.user_input)
        .map(|v| v.default_value)
        .collect()
}

/// Unit choices offered on every input field.
pub const UNIT_OPTIONS: &[&str] = &["$", "Number", "%", "kWh"];

/// Input widget kind for a driver field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    /// Numeric entry.
    Number,
    /// Free text entry.
    Text,
}

/// Configuration of one input field on the Inputs screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputFieldConfig {
    /// Dense field index within the driver.
    pub field_index: u32,
    /// Field label.
    pub label: &'static str,
    /// Widget kind.
    pub input_type: InputType,
    /// Placeholder shown in an empty widget.
    pub placeholder: &'static str,
    /// Unit choices for the field's unit dropdown.
    pub unit_options: &'static [&'static str],
    /// Unit preselected for the field.
    pub default_unit: &'static str,
}

/// Returns the input field configuration for a driver, ordered by field index.
///
/// Derived from the user-input entries of the variable schema so the Inputs
/// screen and the formulas can never disagree about field wiring.
#[must_use]
pub fn input_fields(id: VadId) -> Vec<InputFieldConfig> {
    let mut fields: Vec<InputFieldConfig> = variables(id)
        .iter()
        .filter_map(|v| {
            v.field_index.map(|idx| InputFieldConfig {
                field_index: idx,
                label: v.label,
                input_type: InputType::Number,
                placeholder: "Enter value",
                unit_options: UNIT_OPTIONS,
                default_unit: v.unit,
            })
        })
        .collect();
    fields.sort_by_key(|f| f.field_index);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trip() {
        for id in VadId::ALL {
            assert_eq!(VadId::from_key(id.key()), Some(id));
            assert_eq!(VadId::parse(id.key()).unwrap(), id);
        }
        assert_eq!(VadId::from_key("free_pizza"), None);
        assert!(VadId::parse("free_pizza").is_err());
    }

    #[test]
    fn test_display_name_round_trip() {
        for id in VadId::ALL {
            assert_eq!(VadId::from_display_name(id.display_name()), Some(id));
        }
        assert_eq!(VadId::from_display_name("Reduced Pizza Costs"), None);
    }

    #[test]
    fn test_serde_uses_stable_keys() {
        let json = serde_json::to_string(&VadId::ReducedElectricity).unwrap();
        assert_eq!(json, "\"reduced_electricity\"");
        let back: VadId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, VadId::ReducedElectricity);
    }

    #[test]
    fn test_field_indices_are_dense_from_zero() {
        for id in VadId::ALL {
            let fields = input_fields(id);
            assert!(!fields.is_empty(), "{id} has no input fields");
            for (i, field) in fields.iter().enumerate() {
                assert_eq!(field.field_index as usize, i, "{id} field indices have gaps");
            }
        }
    }

    #[test]
    fn test_every_driver_has_builtin_constants() {
        for id in VadId::ALL {
            assert!(!builtin_defaults(id).is_empty(), "{id} has no built-ins");
        }
    }

    #[test]
    fn test_default_units_come_from_schema() {
        let fields = input_fields(VadId::ReducedElectricity);
        assert_eq!(fields[0].default_unit, "kWh");

        let fields = input_fields(VadId::AvoidedRevenueLoss);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].default_unit, "$");
        assert_eq!(fields[1].default_unit, "Number");
    }
}
