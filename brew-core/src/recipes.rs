//! Saved recipes: a capped, de-duplicated, newest-first list kept under one store key.

use crate::calculator::{CalculationInput, CalculationResult};
use crate::error::{BrewError, Result};
use crate::method::{BrewMethod, Strength, Units};
use crate::store::KeyValueStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

pub const RECIPES_KEY: &str = "coffee-recipes";
pub const MAX_SAVED_RECIPES: usize = 50;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedRecipe {
    pub id: String,
    pub method: BrewMethod,
    pub method_name: String,
    pub strength: Strength,
    pub servings: u32,
    pub units: Units,
    pub ratio: f64,
    pub water: f64,
    pub coffee: f64,
    /// Epoch milliseconds.
    pub saved_at: i64,
}

/// Dedup key: `method-strength-servings-units`.
pub fn recipe_key(method: BrewMethod, strength: Strength, servings: u32, units: Units) -> String {
    format!("{method}-{strength}-{servings}-{units}")
}

pub struct RecipeBook<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> RecipeBook<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Newest first. Missing or unparseable data reads as an empty list.
    pub fn load(&self) -> Result<Vec<SavedRecipe>> {
        let Some(raw) = self.store.get(RECIPES_KEY)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str(&raw) {
            Ok(list) => Ok(list),
            Err(e) => {
                warn!(error = %e, "ignoring unparseable saved recipes");
                Ok(Vec::new())
            }
        }
    }

    pub fn get(&self, id: &str) -> Result<Option<SavedRecipe>> {
        Ok(self.load()?.into_iter().find(|r| r.id == id))
    }

    pub fn save(
        &mut self,
        input: &CalculationInput,
        result: &CalculationResult,
    ) -> Result<SavedRecipe> {
        self.save_at(input, result, chrono::Utc::now().timestamp_millis())
    }

    /// Upsert by dedup key, prepend, keep the newest [`MAX_SAVED_RECIPES`], write once.
    pub fn save_at(
        &mut self,
        input: &CalculationInput,
        result: &CalculationResult,
        saved_at: i64,
    ) -> Result<SavedRecipe> {
        let method = input.brew_method.ok_or(BrewError::Incomplete("brew method"))?;
        let strength = input.strength.ok_or(BrewError::Incomplete("strength"))?;
        let units = input.units.ok_or(BrewError::Incomplete("units"))?;
        let servings = input.servings.get();

        let recipe = SavedRecipe {
            id: recipe_key(method, strength, servings, units),
            method,
            method_name: method.name().to_string(),
            strength,
            servings,
            units,
            ratio: result.ratio,
            water: result.water,
            coffee: result.coffee,
            saved_at,
        };

        let mut list = self.load()?;
        list.retain(|r| r.id != recipe.id);
        list.insert(0, recipe.clone());
        list.truncate(MAX_SAVED_RECIPES);

        self.write(&list)?;
        debug!(id = %recipe.id, total = list.len(), "saved recipe");
        Ok(recipe)
    }

    /// Returns whether a recipe with `id` existed.
    pub fn remove(&mut self, id: &str) -> Result<bool> {
        let mut list = self.load()?;
        let before = list.len();
        list.retain(|r| r.id != id);
        if list.len() == before {
            return Ok(false);
        }
        self.write(&list)?;
        debug!(id, "removed recipe");
        Ok(true)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(RECIPES_KEY)?;
        debug!("cleared saved recipes");
        Ok(())
    }

    fn write(&mut self, list: &[SavedRecipe]) -> Result<()> {
        let json = serde_json::to_string(list)?;
        self.store.set(RECIPES_KEY, &json)
    }
}
