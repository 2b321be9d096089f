use crate::convert::{format_amount, round_to};
use crate::method::{BrewMethod, Strength, Units};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SERVINGS: u32 = 2;

/// Number of cups (or shots), never below one.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(from = "i64", into = "u32")]
pub struct Servings(u32);

impl Servings {
    /// Clamp any integer into `1..=u32::MAX`.
    pub fn new(n: i64) -> Self {
        Servings(n.clamp(1, u32::MAX as i64) as u32)
    }

    /// Direct text entry: floor, then clamp. Unparseable text counts as one serving.
    pub fn parse(text: &str) -> Self {
        match text.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Servings::new(v.floor() as i64),
            Ok(v) if v == f64::INFINITY => Servings(u32::MAX),
            _ => Servings(1),
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    pub fn increment(self) -> Self {
        Servings(self.0.saturating_add(1))
    }

    pub fn decrement(self) -> Self {
        Servings(self.0.saturating_sub(1).max(1))
    }
}

impl Default for Servings {
    fn default() -> Self {
        Servings(DEFAULT_SERVINGS)
    }
}

impl From<i64> for Servings {
    fn from(n: i64) -> Self {
        Servings::new(n)
    }
}

impl From<Servings> for u32 {
    fn from(s: Servings) -> Self {
        s.0
    }
}

/// Free-text custom ratio. Only finite values above zero count.
pub fn parse_ratio(text: &str) -> Option<f64> {
    let v = text.trim().parse::<f64>().ok()?;
    (v.is_finite() && v > 0.0).then_some(v)
}

/// Everything the user has selected so far.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    pub brew_method: Option<BrewMethod>,
    pub strength: Option<Strength>,
    pub units: Option<Units>,
    #[serde(default)]
    pub servings: Servings,
    /// Raw text as typed; see [`parse_ratio`].
    #[serde(default)]
    pub custom_ratio: Option<String>,
}

impl CalculationInput {
    pub fn with_method(mut self, method: BrewMethod) -> Self {
        self.brew_method = Some(method);
        self
    }

    pub fn with_strength(mut self, strength: Strength) -> Self {
        self.strength = Some(strength);
        self
    }

    pub fn with_units(mut self, units: Units) -> Self {
        self.units = Some(units);
        self
    }

    pub fn with_servings(mut self, servings: Servings) -> Self {
        self.servings = servings;
        self
    }

    pub fn with_custom_ratio(mut self, text: impl Into<String>) -> Self {
        self.custom_ratio = Some(text.into());
        self
    }
}

/// Water in ml, coffee in g, ratio as water parts per coffee part.
/// All zero while the input is incomplete.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub water: f64,
    pub coffee: f64,
    pub ratio: f64,
}

impl CalculationResult {
    pub fn is_complete(&self) -> bool {
        self.water > 0.0
    }

    /// `1:15`, `1:1.8`
    pub fn ratio_label(&self) -> String {
        format!("1:{}", format_amount(self.ratio, 2))
    }
}

/// Compute water and coffee for the current selection.
///
/// Ratio precedence: a valid custom ratio, then the table value.
pub fn calculate(input: &CalculationInput) -> CalculationResult {
    let (Some(method), Some(strength), Some(_units)) =
        (input.brew_method, input.strength, input.units)
    else {
        return CalculationResult::default();
    };

    let water = method.water_per_serving_ml() * input.servings.get() as f64;
    let ratio = input
        .custom_ratio
        .as_deref()
        .and_then(parse_ratio)
        .unwrap_or_else(|| method.ratio(strength));
    let coffee = if ratio > 0.0 {
        round_to(water / ratio, 1)
    } else {
        0.0
    };

    CalculationResult {
        water,
        coffee,
        ratio,
    }
}

/// Human-readable recipe for clipboard or share sheets. `None` while incomplete.
pub fn share_text(input: &CalculationInput, result: &CalculationResult) -> Option<String> {
    let method = input.brew_method?;
    if !result.is_complete() {
        return None;
    }
    Some(format!(
        "Perfect {} recipe: {}g coffee + {}ml water = {} perfect cup(s)! ☕",
        method.name(),
        format_amount(result.coffee, 1),
        format_amount(result.water, 1),
        input.servings.get()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn full(method: BrewMethod, strength: Strength, servings: i64) -> CalculationInput {
        CalculationInput::default()
            .with_method(method)
            .with_strength(strength)
            .with_units(Units::Metric)
            .with_servings(Servings::new(servings))
    }

    #[test]
    fn table_ratio_is_used_exactly() {
        for method in BrewMethod::ALL {
            for strength in Strength::ALL {
                let r = calculate(&full(method, strength, 2));
                assert_eq!(r.ratio, method.ratio(strength));
            }
        }
    }

    #[test]
    fn water_scales_with_servings() {
        for servings in [1, 2, 3, 7, 12] {
            let espresso = calculate(&full(BrewMethod::Espresso, Strength::Medium, servings));
            assert_relative_eq!(espresso.water, 30.0 * servings as f64);
            let chemex = calculate(&full(BrewMethod::Chemex, Strength::Weak, servings));
            assert_relative_eq!(chemex.water, 240.0 * servings as f64);
        }
    }

    #[test]
    fn coffee_is_water_over_ratio_rounded() {
        for method in BrewMethod::ALL {
            for strength in Strength::ALL {
                let r = calculate(&full(method, strength, 3));
                assert_relative_eq!(r.coffee, round_to(r.water / r.ratio, 1), epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn strong_espresso_single() {
        let r = calculate(&full(BrewMethod::Espresso, Strength::Strong, 1));
        assert_relative_eq!(r.ratio, 1.8);
        assert_relative_eq!(r.water, 30.0);
        assert_relative_eq!(r.coffee, 16.7, epsilon = 1e-9);
    }

    #[test]
    fn medium_pour_over_for_four_imperial() {
        let input = full(BrewMethod::PourOver, Strength::Medium, 4).with_units(Units::Imperial);
        let r = calculate(&input);
        assert_relative_eq!(r.ratio, 15.0);
        assert_relative_eq!(r.water, 960.0);
        assert_relative_eq!(r.coffee, 64.0);
    }

    #[test]
    fn incomplete_input_is_all_zero() {
        let no_method = CalculationInput::default()
            .with_strength(Strength::Strong)
            .with_units(Units::Metric)
            .with_custom_ratio("10");
        assert_eq!(calculate(&no_method), CalculationResult::default());

        let no_units = CalculationInput::default()
            .with_method(BrewMethod::V60)
            .with_strength(Strength::Weak);
        assert_eq!(calculate(&no_units), CalculationResult::default());
        assert!(!calculate(&no_units).is_complete());
    }

    #[test]
    fn custom_ratio_overrides_only_when_valid() {
        let base = full(BrewMethod::PourOver, Strength::Medium, 2);

        let custom = calculate(&base.clone().with_custom_ratio("16.5"));
        assert_relative_eq!(custom.ratio, 16.5);
        assert_relative_eq!(custom.coffee, 29.1, epsilon = 1e-9);

        for junk in ["abc", "", "0", "-4", "NaN", "inf", "  "] {
            let r = calculate(&base.clone().with_custom_ratio(junk));
            assert_eq!(r.ratio, 15.0, "custom ratio {junk:?}");
        }
    }

    #[test]
    fn parse_ratio_is_total() {
        assert_eq!(parse_ratio(" 17 "), Some(17.0));
        assert_eq!(parse_ratio("1e1"), Some(10.0));
        assert_eq!(parse_ratio("abc"), None);
        assert_eq!(parse_ratio("0.0"), None);
        assert_eq!(parse_ratio("-infinity"), None);
    }

    #[test]
    fn servings_never_drop_below_one() {
        assert_eq!(Servings::default().get(), 2);
        assert_eq!(Servings::new(0).get(), 1);
        assert_eq!(Servings::new(-5).get(), 1);
        assert_eq!(Servings::new(1).decrement().get(), 1);
        assert_eq!(Servings::new(3).decrement().get(), 2);
        assert_eq!(Servings::new(3).increment().get(), 4);
        assert_eq!(Servings::parse("2.7").get(), 2);
        assert_eq!(Servings::parse("-3").get(), 1);
        assert_eq!(Servings::parse("0.5").get(), 1);
        assert_eq!(Servings::parse("lots").get(), 1);
    }

    #[test]
    fn servings_deserialize_clamped() {
        let s: Servings = serde_json::from_str("0").unwrap();
        assert_eq!(s.get(), 1);
        assert_eq!(serde_json::to_string(&Servings::new(4)).unwrap(), "4");
    }

    #[test]
    fn ratio_label_drops_trailing_zeros() {
        let r = calculate(&full(BrewMethod::Espresso, Strength::Strong, 1));
        assert_eq!(r.ratio_label(), "1:1.8");
        let r = calculate(&full(BrewMethod::Chemex, Strength::Medium, 1));
        assert_eq!(r.ratio_label(), "1:16");
    }

    #[test]
    fn share_text_format() {
        let input = full(BrewMethod::Espresso, Strength::Strong, 1);
        let result = calculate(&input);
        assert_eq!(
            share_text(&input, &result).unwrap(),
            "Perfect Espresso recipe: 16.7g coffee + 30ml water = 1 perfect cup(s)! ☕"
        );

        let incomplete = CalculationInput::default().with_method(BrewMethod::V60);
        assert_eq!(share_text(&incomplete, &calculate(&incomplete)), None);
    }
}
