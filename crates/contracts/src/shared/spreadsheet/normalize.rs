//! Numeric normalization of raw workbook cells.
//!
//! Accepted input variants:
//!
//! | Cell content       | Parsed value | `explicit_percent` |
//! |--------------------|--------------|--------------------|
//! | number `0.96`      | 0.96         | false              |
//! | text `"0.96"`      | 0.96         | false              |
//! | text `"96,9"`      | 96.9         | false              |
//! | text `"1.234,5"`   | 1234.5       | false              |
//! | text `"1,234.5"`   | 1234.5       | false              |
//! | text `"96,9%"`     | 96.9         | true               |
//! | empty / bool / bad | none         |                    |

use serde::{Deserialize, Serialize};

use crate::shared::kpi::round2;

/// Library-neutral cell content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Empty,
    Number(f64),
    Text(String),
    Bool(bool),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedNumber {
    pub value: f64,
    /// The text carried a `%` sign, so `value` is already a percentage.
    pub explicit_percent: bool,
}

/// How a parsed number is turned into a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalizationRule {
    /// Money or any plain quantity, taken as-is.
    Amount,
    /// Whole units; fractional parts are truncated.
    Count,
    /// Decimal ratio (`0.96` = 96 %). Explicit percent text is divided by 100.
    Ratio,
    /// Percentage number, taken as-is.
    Percent,
    /// Either a fraction or a percentage. Values strictly between 0 and 1
    /// without an explicit `%` are read as fractions and scaled by 100.
    FractionOrPercent,
}

fn parse_text(raw: &str) -> Option<ParsedNumber> {
    let mut s: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\u{a0}')
        .collect();

    let explicit_percent = s.ends_with('%');
    if explicit_percent {
        s.pop();
    }

    let has_comma = s.contains(',');
    let has_dot = s.contains('.');
    let normalized = match (has_comma, has_dot) {
        (true, true) => {
            // whichever separator comes last is the decimal one
            if s.rfind(',') > s.rfind('.') {
                s.replace('.', "").replace(',', ".")
            } else {
                s.replace(',', "")
            }
        }
        (true, false) => s.replace(',', "."),
        _ => s,
    };

    let value: f64 = normalized.parse().ok()?;
    if !value.is_finite() {
        return None;
    }
    Some(ParsedNumber {
        value,
        explicit_percent,
    })
}

pub fn parse_number(cell: &CellValue) -> Option<ParsedNumber> {
    match cell {
        CellValue::Number(v) if v.is_finite() => Some(ParsedNumber {
            value: *v,
            explicit_percent: false,
        }),
        CellValue::Text(t) => parse_text(t),
        _ => None,
    }
}

impl NormalizationRule {
    pub fn apply(self, parsed: ParsedNumber) -> f64 {
        let ParsedNumber {
            value,
            explicit_percent,
        } = parsed;
        match self {
            NormalizationRule::Amount | NormalizationRule::Percent => value,
            NormalizationRule::Count => value.trunc(),
            NormalizationRule::Ratio => {
                if explicit_percent {
                    value / 100.0
                } else {
                    value
                }
            }
            NormalizationRule::FractionOrPercent => {
                if !explicit_percent && value > 0.0 && value < 1.0 {
                    round2(value * 100.0)
                } else {
                    value
                }
            }
        }
    }
}

/// Parses and normalizes a cell in one step.
pub fn normalize(cell: &CellValue, rule: NormalizationRule) -> Option<f64> {
    parse_number(cell).map(|p| rule.apply(p))
}
