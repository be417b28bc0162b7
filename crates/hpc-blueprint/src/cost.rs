//! Local cost estimate
//!
//! A quick price table computed from catalog prices, independent of the
//! external cost service. Quantity depends on the component category:
//! compute is priced per `cpuCount`, storage per `size`, everything else per
//! unit.

use crate::instance::ConfiguredInstance;
use hpc_catalog::Category;
use std::fmt::Write as _;

/// One priced row
#[derive(Debug, Clone, PartialEq)]
pub struct CostLine {
    /// Instance id
    pub instance_id: String,
    /// Component display name
    pub name: String,
    /// Derived quantity
    pub quantity: f64,
    /// Cost unit of the definition
    pub unit: String,
    /// Price per unit
    pub cost_per_unit: f64,
    /// `cost_per_unit * quantity`
    pub total: f64,
}

/// Priced rows plus their sum
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostSummary {
    /// Rows in store order
    pub lines: Vec<CostLine>,
    /// Sum of all row totals
    pub total: f64,
}

impl CostSummary {
    /// Render as a plain-text table
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{:<40} {:>12}", "Component", "Total Cost");
        for line in &self.lines {
            let _ = writeln!(out, "{:<40} {:>12}", line.name, format!("${:.2}", line.total));
            let _ = writeln!(
                out,
                "  {} x ${:.2} / {}",
                group_thousands(line.quantity),
                line.cost_per_unit,
                line.unit
            );
        }
        let _ = writeln!(
            out,
            "{:<40} {:>12}",
            "Estimated Total",
            format!("${:.2} / hr", self.total)
        );
        out.push_str("This is an estimate. Actual costs may vary.\n");
        out
    }
}

/// Price every instance with the category-dependent quantity rule
#[must_use]
pub fn estimate(instances: &[ConfiguredInstance]) -> CostSummary {
    let lines: Vec<CostLine> = instances
        .iter()
        .map(|instance| {
            let def = instance.definition();
            let quantity = quantity_of(instance);
            CostLine {
                instance_id: instance.id().to_string(),
                name: def.name.clone(),
                quantity,
                unit: def.cost_unit.clone(),
                cost_per_unit: def.unit_cost,
                total: def.unit_cost * quantity,
            }
        })
        .collect();
    let total = lines.iter().map(|l| l.total).sum();
    CostSummary { lines, total }
}

fn quantity_of(instance: &ConfiguredInstance) -> f64 {
    let key = match instance.definition().category {
        Category::Compute => "cpuCount",
        Category::Storage => "size",
        Category::Network => return 1.0,
    };
    instance
        .value(key)
        .and_then(hpc_catalog::OptionValue::as_f64)
        .filter(|q| q.is_finite() && *q != 0.0)
        .unwrap_or(1.0)
}

/// `65536` → `65,536`; fractional quantities keep their natural digits
fn group_thousands(quantity: f64) -> String {
    let text = quantity.to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(d) => ("-", d),
        None => ("", int_part),
    };

    let mut grouped = String::new();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}
