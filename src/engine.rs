//! Calculation engine for driver formulas and aggregate metrics.
//!
//! [`calculate`] is a pure function: no I/O, no mutation of its input, and
//! deterministic for a given input table. Formulas dispatch on [`VadId`];
//! every fixed constant a formula uses is the default value of a built-in
//! (non-user-input) variable in the catalog, so the registry stays the
//! single source of truth for both field wiring and constants.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{self, VadId};
use crate::constants::INVESTMENT_RATE;
use crate::models::inputs::{FieldInput, InputTable};

/// Per-driver totals plus derived headline metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvalResults {
    /// Annual value per driver, keyed by the input table's driver keys.
    pub drivers: BTreeMap<String, f64>,
    /// Sum of all per-driver totals.
    pub total_annual_value: f64,
    /// Assumed investment: a fixed fraction of the total annual value.
    pub total_investment: f64,
    /// Total annual value minus investment.
    pub net_benefit: f64,
    /// Net benefit divided by investment; `0` when the investment is `0`.
    pub roi: f64,
}

/// Pluggable evaluation backend.
///
/// The in-process [`LocalEngine`] is one implementation; a remote evaluation
/// service is an equally valid substitute as long as it honors the same
/// input/output shape.
pub trait Evaluator {
    /// Evaluates an input table into per-driver and aggregate results.
    fn evaluate(&self, inputs: &InputTable) -> EvalResults;
}

/// Evaluator backed by the in-process formula table.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalEngine;

impl Evaluator for LocalEngine {
    fn evaluate(&self, inputs: &InputTable) -> EvalResults {
        calculate(inputs)
    }
}

/// Computes per-driver totals and aggregates for an input table.
///
/// Keys that resolve to a known driver run that driver's formula; anything
/// else falls back to summing the numeric value of every field. Unparsable
/// field values contribute zero and never error.
#[must_use]
pub fn calculate(inputs: &InputTable) -> EvalResults {
    let mut drivers = BTreeMap::new();

    for (key, fields) in inputs {
        let total = match VadId::from_key(key) {
            Some(id) => driver_total(id, fields),
            None => fields.values().map(|f| f.value.as_number()).sum(),
        };
        drivers.insert(key.clone(), total);
    }

    let total_annual_value: f64 = drivers.values().filter(|v| v.is_finite()).sum();
    let total_investment = total_annual_value * INVESTMENT_RATE;
    let net_benefit = total_annual_value - total_investment;
    let roi = if total_investment == 0.0 {
        0.0
    } else {
        net_benefit / total_investment
    };

    EvalResults {
        drivers,
        total_annual_value,
        total_investment,
        net_benefit,
        roi,
    }
}

/// Reads a user field by index, coerced to a number. Missing fields are zero.
fn field(fields: &BTreeMap<u32, FieldInput>, index: u32) -> f64 {
    fields.get(&index).map_or(0.0, |f| f.value.as_number())
}

/// Reads the nth built-in constant of a driver's schema.
fn builtin(id: VadId, n: usize) -> f64 {
    catalog::variables(id)
        .iter()
        .filter(|v| !v.user_input)
        .nth(n)
        .map_or(0.0, |v| v.default_value)
}

/// Annual value of one driver, per its formula.
fn driver_total(id: VadId, fields: &BTreeMap<u32, FieldInput>) -> f64 {
    match id {
        VadId::ReducedElectricity => {
            let consumption_kwh = field(fields, 0);
            let reduction_pct = builtin(id, 0);
            let cost_per_kwh = builtin(id, 1);
            consumption_kwh * (reduction_pct / 100.0) * cost_per_kwh
        }
        VadId::ReducedMaintenance => {
            let current_contract = field(fields, 0);
            let predictive_plan = builtin(id, 0);
            (current_contract - predictive_plan).max(0.0)
        }
        VadId::IncreasedTicketSales => {
            let patrons = field(fields, 0);
            let avg_ticket_profit = field(fields, 1);
            let increase_pct = builtin(id, 0);
            patrons * (increase_pct / 100.0) * avg_ticket_profit
        }
        VadId::AvoidedRevenueLoss => {
            let revenue_per_show = field(fields, 0);
            let at_risk_shows = field(fields, 1);
            let avg_failure_pct = builtin(id, 0);
            let uahu_failure_pct = builtin(id, 1);
            revenue_per_show * at_risk_shows * ((avg_failure_pct - uahu_failure_pct) / 100.0)
        }
        VadId::IncreasedRecyclability => {
            let hvac_units = field(fields, 0);
            let cost_saved_per_unit = builtin(id, 2);
            hvac_units * cost_saved_per_unit
        }
        VadId::EmbodiedCarbonReduction => {
            let hvac_units = field(fields, 0);
            let avg_emissions_kg = builtin(id, 0);
            let reduction_pct = builtin(id, 1);
            let carbon_cost_per_kg = builtin(id, 2);
            hvac_units * avg_emissions_kg * (reduction_pct / 100.0) * carbon_cost_per_kg
        }
    }
}
