use anyhow::{Context, Result};
use brew_core::{
    AmountKind, BrewMethod, CalculationInput, CalculationResult, FileStore, KeyValueStore,
    RecipeBook, STORE_DIR_ENV, SavedRecipe, Selection, Servings, Step, Strength, Units, calculate,
    convert, format_amount, next_step, parse_ratio, share_text,
};
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::{Attribute, Cell, ContentArrangement, Table, presets::UTF8_FULL};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "brew-ratio",
    about = "Coffee-to-water ratio calculator with saved recipes.",
    version
)]
struct Cli {
    /// Directory holding saved recipes
    #[arg(long, global = true, env = STORE_DIR_ENV)]
    store_dir: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Work out water and coffee for a brew
    Calc(CalcArgs),
    /// List brew methods and their ratios
    Methods,
    /// List saved recipes, newest first
    Saved,
    /// Delete one saved recipe by id
    Forget {
        /// Recipe id, e.g. pour-over-medium-2-metric
        id: String,
    },
    /// Delete all saved recipes
    Clear,
}

/// Brew method CLI enum mirrors brew-core (derive for Clap).
#[derive(Copy, Clone, Debug, ValueEnum)]
enum MethodFlag {
    PourOver,
    FrenchPress,
    Espresso,
    Aeropress,
    Chemex,
    ColdBrew,
    MokaPot,
    V60,
}

impl From<MethodFlag> for BrewMethod {
    fn from(m: MethodFlag) -> Self {
        match m {
            MethodFlag::PourOver => BrewMethod::PourOver,
            MethodFlag::FrenchPress => BrewMethod::FrenchPress,
            MethodFlag::Espresso => BrewMethod::Espresso,
            MethodFlag::Aeropress => BrewMethod::Aeropress,
            MethodFlag::Chemex => BrewMethod::Chemex,
            MethodFlag::ColdBrew => BrewMethod::ColdBrew,
            MethodFlag::MokaPot => BrewMethod::MokaPot,
            MethodFlag::V60 => BrewMethod::V60,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum StrengthFlag {
    Weak,
    Medium,
    Strong,
}

impl From<StrengthFlag> for Strength {
    fn from(s: StrengthFlag) -> Self {
        match s {
            StrengthFlag::Weak => Strength::Weak,
            StrengthFlag::Medium => Strength::Medium,
            StrengthFlag::Strong => Strength::Strong,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum UnitsFlag {
    Metric,
    Imperial,
}

impl From<UnitsFlag> for Units {
    fn from(u: UnitsFlag) -> Self {
        match u {
            UnitsFlag::Metric => Units::Metric,
            UnitsFlag::Imperial => Units::Imperial,
        }
    }
}

#[derive(clap::Args, Debug)]
struct CalcArgs {
    /// Brew method
    #[arg(long, value_enum)]
    method: Option<MethodFlag>,

    /// Brew strength
    #[arg(long, value_enum)]
    strength: Option<StrengthFlag>,

    /// Display units
    #[arg(long, value_enum)]
    units: Option<UnitsFlag>,

    /// Number of cups (shots for espresso); floored, minimum 1
    #[arg(long, allow_hyphen_values = true)]
    servings: Option<String>,

    /// Custom ratio (water parts per coffee part); ignored unless a positive number
    #[arg(long, allow_hyphen_values = true)]
    ratio: Option<String>,

    /// Load a profile JSON before applying CLI overrides
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Save the current effective selection to a profile JSON
    #[arg(long)]
    save_profile: Option<PathBuf>,

    /// Save the recipe to the recipe store
    #[arg(long)]
    save: bool,

    /// Print a shareable one-line recipe
    #[arg(long)]
    share: bool,
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
struct Profile {
    #[serde(default)]
    method: Option<BrewMethod>,
    #[serde(default)]
    strength: Option<Strength>,
    #[serde(default)]
    units: Option<Units>,
    #[serde(default)]
    servings: Option<Servings>,
    #[serde(default)]
    ratio: Option<String>,
}

impl From<&CalcArgs> for Profile {
    fn from(a: &CalcArgs) -> Self {
        Profile {
            method: a.method.map(Into::into),
            strength: a.strength.map(Into::into),
            units: a.units.map(Into::into),
            servings: a.servings.as_deref().map(Servings::parse),
            ratio: a.ratio.clone(),
        }
    }
}

impl Profile {
    /// CLI values win; the profile fills whatever was not given.
    fn merged_over(self, base: Profile) -> Profile {
        macro_rules! take {
            ($field:ident) => {
                self.$field.or(base.$field)
            };
        }

        Profile {
            method: take!(method),
            strength: take!(strength),
            units: take!(units),
            servings: take!(servings),
            ratio: take!(ratio),
        }
    }

    fn to_input(&self) -> CalculationInput {
        CalculationInput {
            brew_method: self.method,
            strength: self.strength,
            units: self.units,
            servings: self.servings.unwrap_or_default(),
            custom_ratio: self.ratio.clone(),
        }
    }
}

fn load_profile(path: &Path) -> Result<Profile> {
    let txt = fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile: {}", path.display()))?;
    serde_json::from_str(&txt).with_context(|| format!("Invalid profile JSON: {}", path.display()))
}

fn save_profile(path: &Path, profile: &Profile) -> Result<()> {
    let json = serde_json::to_string_pretty(profile)?;
    fs::write(path, json).with_context(|| format!("Failed to save profile: {}", path.display()))
}

fn header(titles: &[&str]) -> Vec<Cell> {
    titles
        .iter()
        .map(|t| Cell::new(t).add_attribute(Attribute::Bold))
        .collect()
}

fn new_table(titles: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header(titles));
    table
}

fn result_table(input: &CalculationInput, result: &CalculationResult) -> Option<Table> {
    let (method, strength, units) = (input.brew_method?, input.strength?, input.units?);
    let water = convert(result.water, AmountKind::Water, units);
    let coffee = convert(result.coffee, AmountKind::Coffee, units);

    let mut table = new_table(&["Item", "Amount", "Also"]);
    table.add_row(vec![
        Cell::new("Method"),
        Cell::new(format!("{} {}", method.icon(), method.name())),
        Cell::new(method.brew_time()),
    ]);
    table.add_row(vec![
        Cell::new("Strength"),
        Cell::new(strength.id()),
        Cell::new(format!("{} serving(s)", input.servings.get())),
    ]);
    table.add_row(vec![
        Cell::new("Ratio"),
        Cell::new(result.ratio_label()),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Water"),
        Cell::new(water.primary),
        Cell::new(water.secondary),
    ]);
    table.add_row(vec![
        Cell::new("Coffee"),
        Cell::new(coffee.primary),
        Cell::new(coffee.secondary),
    ]);
    Some(table)
}

fn methods_table() -> Table {
    let mut table = new_table(&["Method", "Id", "Time", "Weak", "Medium", "Strong", "Notes"]);
    for m in BrewMethod::ALL {
        let r = m.ratios();
        table.add_row(vec![
            Cell::new(format!("{} {}", m.icon(), m.name())),
            Cell::new(m.id()),
            Cell::new(m.brew_time()),
            Cell::new(format!("1:{}", format_amount(r.weak, 2))),
            Cell::new(format!("1:{}", format_amount(r.medium, 2))),
            Cell::new(format!("1:{}", format_amount(r.strong, 2))),
            Cell::new(m.description()),
        ]);
    }
    table
}

fn fmt_saved_at(ms: i64) -> String {
    match DateTime::from_timestamp_millis(ms) {
        Some(t) => t.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None => "-".to_string(),
    }
}

fn saved_table(recipes: &[SavedRecipe]) -> Table {
    let mut table = new_table(&["Id", "Method", "Ratio", "Water", "Coffee", "Saved"]);
    for r in recipes {
        let water = convert(r.water, AmountKind::Water, r.units);
        let coffee = convert(r.coffee, AmountKind::Coffee, r.units);
        table.add_row(vec![
            Cell::new(&r.id),
            Cell::new(&r.method_name),
            Cell::new(format!("1:{}", format_amount(r.ratio, 2))),
            Cell::new(water.primary),
            Cell::new(coffee.primary),
            Cell::new(fmt_saved_at(r.saved_at)),
        ]);
    }
    table
}

fn progress_line(step: Step, selection: &Selection) -> String {
    let done = [
        selection.method.is_some(),
        selection.strength.is_some(),
        selection.units.is_some(),
    ]
    .iter()
    .filter(|d| **d)
    .count();
    format!("[{done}/3] {}", step.prompt())
}

fn run_calc<S: KeyValueStore>(args: &CalcArgs, book: &mut RecipeBook<S>) -> Result<()> {
    let mut effective = Profile::from(args);
    if let Some(path) = &args.profile {
        effective = effective.merged_over(load_profile(path)?);
    }

    if let Some(path) = &args.save_profile {
        save_profile(path, &effective)?;
        println!("Profile saved to {}", path.display());
    }

    let input = effective.to_input();
    let result = calculate(&input);
    debug!(?input, ?result, "calculated");

    let selection = Selection::from(&input);
    let step = next_step(&selection);
    if step != Step::Ready {
        println!("{}", progress_line(step, &selection));
        println!("Water: 0 ml | Coffee: 0 g");
    } else if let Some(table) = result_table(&input, &result) {
        println!("\n=== Brew recipe ===");
        println!("{table}");
        if let Some(text) = &input.custom_ratio {
            if parse_ratio(text).is_none() {
                println!("Custom ratio '{text}' ignored; using the table ratio.");
            }
        }
    }

    if args.share {
        match share_text(&input, &result) {
            Some(text) => println!("\n{text}"),
            None => println!("\nNothing to share yet."),
        }
    }

    if args.save {
        // Local failure only: report once, keep the computed result.
        match book.save(&input, &result) {
            Ok(r) => println!("Saved recipe {}", r.id),
            Err(e) => eprintln!("Could not save recipe: {e}"),
        }
    }
    Ok(())
}

fn run_saved<S: KeyValueStore>(book: &RecipeBook<S>) -> Result<()> {
    let recipes = book.load().context("Failed to read saved recipes")?;
    if recipes.is_empty() {
        println!("No saved recipes.");
    } else {
        println!("{}", saved_table(&recipes));
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let store = FileStore::new(cli.store_dir.clone().unwrap_or_else(FileStore::default_dir));
    info!(dir = %store.dir().display(), "using recipe store");
    let mut book = RecipeBook::new(store);

    match &cli.command {
        Command::Calc(args) => run_calc(args, &mut book)?,
        Command::Methods => println!("{}", methods_table()),
        Command::Saved => run_saved(&book)?,
        Command::Forget { id } => {
            if book.remove(id).context("Failed to update saved recipes")? {
                println!("Removed {id}");
            } else {
                println!("No saved recipe with id {id}");
            }
        }
        Command::Clear => {
            book.clear().context("Failed to clear saved recipes")?;
            println!("Saved recipes cleared.");
        }
    }
    Ok(())
}

/* ===========================
Unit tests
=========================== */
