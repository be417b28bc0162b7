//! Component definitions
//!
//! A [`ComponentDefinition`] describes one provisionable resource type and the
//! options a user may configure on it. Definitions are immutable once
//! registered; configured instances share them by reference.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Resource category of a component
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Virtual machines and accelerators
    Compute,
    /// Block and file storage
    Storage,
    /// Networking
    Network,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 3] = [Category::Compute, Category::Storage, Category::Network];

    /// Lowercase name used in module source paths
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compute => "compute",
            Self::Storage => "storage",
            Self::Network => "network",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input widget kind of an option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    /// Free text
    Text,
    /// Free number
    Number,
    /// One of a fixed list of choices
    Select,
    /// Number within a range, moved in steps
    Slider,
}

/// A current or default option value
///
/// Numbers render with their natural decimal text (`8`, `0.33`), text
/// renders verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    /// Numeric value
    Number(f64),
    /// Text value
    Text(String),
}

impl OptionValue {
    /// Numeric interpretation (text is parsed)
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }

    /// Text payload, if this is a text value
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Number(_) => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for OptionValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for OptionValue {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// One entry of a select option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Stored value
    pub value: String,
    /// Display label
    pub label: String,
}

impl Choice {
    /// Create a choice
    #[inline]
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A configurable option of a component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionSpec {
    /// Option id, unique within its component
    pub id: String,
    /// Display label
    pub label: String,
    /// Widget kind
    pub kind: OptionKind,
    /// Default value seeded into new instances
    pub default: OptionValue,
    /// Help text
    pub description: String,
    /// Allowed values (select only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<Choice>,
    /// Lower bound (slider)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Upper bound (slider)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Step size (slider)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    /// Display unit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl OptionSpec {
    fn base(
        id: impl Into<String>,
        label: impl Into<String>,
        kind: OptionKind,
        default: OptionValue,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            default,
            description: String::new(),
            choices: Vec::new(),
            min: None,
            max: None,
            step: None,
            unit: None,
        }
    }

    /// Free text option
    #[must_use]
    pub fn text(id: impl Into<String>, label: impl Into<String>, default: &str) -> Self {
        Self::base(id, label, OptionKind::Text, OptionValue::from(default))
    }

    /// Free number option
    #[must_use]
    pub fn number(id: impl Into<String>, label: impl Into<String>, default: f64) -> Self {
        Self::base(id, label, OptionKind::Number, OptionValue::Number(default))
    }

    /// Select option; the default is stored as text like the choice values
    #[must_use]
    pub fn select(
        id: impl Into<String>,
        label: impl Into<String>,
        default: &str,
        choices: Vec<Choice>,
    ) -> Self {
        let mut spec = Self::base(id, label, OptionKind::Select, OptionValue::from(default));
        spec.choices = choices;
        spec
    }

    /// Slider option over `[min, max]` in `step` increments
    #[must_use]
    pub fn slider(
        id: impl Into<String>,
        label: impl Into<String>,
        default: f64,
        min: f64,
        max: f64,
        step: f64,
    ) -> Self {
        let mut spec = Self::base(id, label, OptionKind::Slider, OptionValue::Number(default));
        spec.min = Some(min);
        spec.max = Some(max);
        spec.step = Some(step);
        spec
    }

    /// With help text
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// With display unit
    #[inline]
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Interpret raw user input for this option
    ///
    /// Number and slider options take a finite number when the input parses as
    /// one. Everything else, including text and select input that happens to
    /// look numeric, is kept verbatim as text.
    #[must_use]
    pub fn parse_input(&self, input: &str) -> OptionValue {
        match self.kind {
            OptionKind::Number | OptionKind::Slider => match input.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => OptionValue::Number(n),
                _ => OptionValue::Text(input.to_string()),
            },
            OptionKind::Text | OptionKind::Select => OptionValue::Text(input.to_string()),
        }
    }

    /// Check a candidate value against this option's declared constraints
    ///
    /// Returns `None` when the value fits. Callers decide what to do with an
    /// issue; the configuration store itself stores values untouched.
    #[must_use]
    pub fn check_value(&self, value: &OptionValue) -> Option<ValueIssue> {
        match self.kind {
            OptionKind::Text => None,
            OptionKind::Number => match value.as_f64() {
                Some(_) => None,
                None => Some(ValueIssue::NotNumeric(value.to_string())),
            },
            OptionKind::Select => {
                let text = value.to_string();
                if self.choices.iter().any(|c| c.value == text) {
                    None
                } else {
                    Some(ValueIssue::UnknownChoice(text))
                }
            }
            OptionKind::Slider => {
                let Some(n) = value.as_f64() else {
                    return Some(ValueIssue::NotNumeric(value.to_string()));
                };
                if let Some(min) = self.min.filter(|min| n < *min) {
                    return Some(ValueIssue::BelowMin { value: n, min });
                }
                if let Some(max) = self.max.filter(|max| n > *max) {
                    return Some(ValueIssue::AboveMax { value: n, max });
                }
                match (self.min, self.step) {
                    (Some(min), Some(step)) if step > 0.0 => {
                        let steps = (n - min) / step;
                        if (steps - steps.round()).abs() > 1e-9 {
                            Some(ValueIssue::OffStep { value: n, step })
                        } else {
                            None
                        }
                    }
                    _ => None,
                }
            }
        }
    }
}

/// Why a value does not fit its option
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValueIssue {
    /// Numeric option given non-numeric input
    #[error("'{0}' is not a number")]
    NotNumeric(String),

    /// Select value outside the declared choices
    #[error("'{0}' is not one of the declared choices")]
    UnknownChoice(String),

    /// Slider value below its minimum
    #[error("{value} is below the minimum {min}")]
    BelowMin {
        /// Offending value
        value: f64,
        /// Declared minimum
        min: f64,
    },

    /// Slider value above its maximum
    #[error("{value} is above the maximum {max}")]
    AboveMax {
        /// Offending value
        value: f64,
        /// Declared maximum
        max: f64,
    },

    /// Slider value between steps
    #[error("{value} is not a multiple of the step {step}")]
    OffStep {
        /// Offending value
        value: f64,
        /// Declared step
        step: f64,
    },
}

/// A catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentDefinition {
    /// Definition id, e.g. `c2-standard-8`
    pub id: String,
    /// Display name
    pub name: String,
    /// Resource category
    pub category: Category,
    /// Help text
    pub description: String,
    /// Price per cost unit
    pub unit_cost: f64,
    /// What `unit_cost` is charged per, e.g. `vCPU/hr`
    pub cost_unit: String,
    /// Configurable options in declaration order
    pub options: Vec<OptionSpec>,
}

impl ComponentDefinition {
    /// Create a definition with no options and zero cost
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: Category) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
            description: String::new(),
            unit_cost: 0.0,
            cost_unit: String::new(),
            options: Vec::new(),
        }
    }

    /// With help text
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// With price
    #[inline]
    #[must_use]
    pub fn with_cost(mut self, unit_cost: f64, cost_unit: impl Into<String>) -> Self {
        self.unit_cost = unit_cost;
        self.cost_unit = cost_unit.into();
        self
    }

    /// Append an option
    #[inline]
    #[must_use]
    pub fn with_option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    /// Look up an option by id
    #[must_use]
    pub fn option(&self, id: &str) -> Option<&OptionSpec> {
        self.options.iter().find(|o| o.id == id)
    }

    /// Module source path: `<category>/<id>`
    #[must_use]
    pub fn source_path(&self) -> String {
        format!("{}/{}", self.category, self.id)
    }
}
