//! Which choice the user still has to make before a result can be shown.

use crate::calculator::CalculationInput;
use crate::method::{BrewMethod, Strength, Units};

/// The three required choices, independent of any view.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub method: Option<BrewMethod>,
    pub strength: Option<Strength>,
    pub units: Option<Units>,
}

impl From<&CalculationInput> for Selection {
    fn from(input: &CalculationInput) -> Self {
        Selection {
            method: input.brew_method,
            strength: input.strength,
            units: input.units,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    ChooseMethod,
    ChooseStrength,
    ChooseUnits,
    Ready,
}

impl Step {
    pub fn prompt(self) -> &'static str {
        match self {
            Step::ChooseMethod => "Choose a brew method (--method)",
            Step::ChooseStrength => "Choose a strength: weak, medium or strong (--strength)",
            Step::ChooseUnits => "Choose units: metric or imperial (--units)",
            Step::Ready => "Recipe ready",
        }
    }
}

/// Earliest missing choice wins; revisiting an earlier step never resets later ones.
pub fn next_step(selection: &Selection) -> Step {
    if selection.method.is_none() {
        Step::ChooseMethod
    } else if selection.strength.is_none() {
        Step::ChooseStrength
    } else if selection.units.is_none() {
        Step::ChooseUnits
    } else {
        Step::Ready
    }
}
