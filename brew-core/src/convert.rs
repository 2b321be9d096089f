//! Metric quantities to display strings.
//!
//! The computed amounts are always milliliters of water and grams of coffee;
//! the selected [`Units`] only decide how they are shown.

use crate::method::Units;

const FL_OZ_PER_ML: f64 = 0.033814;
const ML_PER_CUP: f64 = 236.588;
const GRAMS_PER_OZ: f64 = 28.35;
const OZ_PER_GRAM: f64 = 0.035274;
const LBS_PER_GRAM: f64 = 0.00220462;

/// Which quantity is being formatted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AmountKind {
    Water,
    Coffee,
}

/// Primary and secondary display strings for one amount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayPair {
    pub primary: String,
    pub secondary: String,
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    (value * scale).round() / scale
}

/// Round, then print in shortest form (`1.0` -> `"1"`, `0.240` -> `"0.24"`).
pub fn format_amount(value: f64, decimals: u32) -> String {
    // `+ 0.0` folds a negative zero into zero
    format!("{}", round_to(value, decimals) + 0.0)
}

/// Format `amount` (ml for water, g for coffee) in the requested units.
pub fn convert(amount: f64, kind: AmountKind, units: Units) -> DisplayPair {
    let (primary, secondary) = match (kind, units) {
        (AmountKind::Water, Units::Metric) => (
            format!("{} ml", format_amount(amount, 1)),
            format!("{} L", format_amount(amount / 1000.0, 2)),
        ),
        (AmountKind::Water, Units::Imperial) => (
            format!("{} fl oz", format_amount(amount * FL_OZ_PER_ML, 1)),
            format!("{} cups", format_amount(amount / ML_PER_CUP, 1)),
        ),
        (AmountKind::Coffee, Units::Metric) => (
            format!("{} g", format_amount(amount, 1)),
            format!("{} oz", format_amount(amount / GRAMS_PER_OZ, 1)),
        ),
        (AmountKind::Coffee, Units::Imperial) => (
            format!("{} oz", format_amount(amount * OZ_PER_GRAM, 1)),
            format!("{} lbs", format_amount(amount * LBS_PER_GRAM, 2)),
        ),
    };
    DisplayPair { primary, secondary }
}
