//! Coffee-to-water ratio engine: ratio table, unit display, calculation and saved recipes.

pub mod calculator;
pub mod convert;
pub mod error;
pub mod method;
pub mod progress;
pub mod recipes;
pub mod store;

pub use calculator::{
    CalculationInput, CalculationResult, DEFAULT_SERVINGS, Servings, calculate, parse_ratio,
    share_text,
};
pub use convert::{AmountKind, DisplayPair, convert, format_amount, round_to};
pub use error::{BrewError, Result};
pub use method::{BrewMethod, RatioSet, Strength, Units};
pub use progress::{Selection, Step, next_step};
pub use recipes::{MAX_SAVED_RECIPES, RECIPES_KEY, RecipeBook, SavedRecipe, recipe_key};
pub use store::{FileStore, KeyValueStore, MemoryStore, STORE_DIR_ENV};
