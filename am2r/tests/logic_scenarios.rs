use std::path::Path;

use am2r::logic::Logic;
use am2r_game::{Capacity, GameData, Item};
use am2r_logic::{AmmoLogic, Inventory, LogicDifficulty, LogicOptions, MissileLauncher};
use anyhow::{bail, Context, Result};
use hashbrown::HashMap;
use serde::Deserialize;

const PLAYER: usize = 1;

#[derive(Debug, Deserialize)]
struct ScenariosList {
    scenarios: Vec<Scenario>,
}

#[derive(Debug, Deserialize)]
struct Scenario {
    name: String,
    #[serde(default)]
    options: ScenarioOptions,
    #[serde(default)]
    items: HashMap<Item, Capacity>,
    entrance: Option<String>,
    location: Option<String>,
    #[serde(default)]
    fail: bool,
}

// Overrides applied on top of the default options.
#[derive(Default, Debug, Deserialize)]
struct ScenarioOptions {
    ammo_logic: Option<AmmoLogic>,
    missile_launcher: Option<MissileLauncher>,
    remove_morph_ball: Option<bool>,
    remove_power_grip: Option<bool>,
    logic_difficulty: Option<LogicDifficulty>,
    expected_ammo_multiplier: Option<u32>,
    super_launcher: Option<bool>,
    metroids_required: Option<Capacity>,
}

fn get_options(scenario: &Scenario) -> LogicOptions {
    let o = &scenario.options;
    let default = LogicOptions::default();
    LogicOptions {
        ammo_logic: o.ammo_logic.unwrap_or(default.ammo_logic),
        missile_launcher: o.missile_launcher.unwrap_or(default.missile_launcher),
        remove_morph_ball: o.remove_morph_ball.unwrap_or(default.remove_morph_ball),
        remove_power_grip: o.remove_power_grip.unwrap_or(default.remove_power_grip),
        logic_difficulty: o.logic_difficulty.unwrap_or(default.logic_difficulty),
        expected_ammo_multiplier: o
            .expected_ammo_multiplier
            .unwrap_or(default.expected_ammo_multiplier),
        super_launcher: o.super_launcher.unwrap_or(default.super_launcher),
        metroids_required: o.metroids_required.unwrap_or(default.metroids_required),
    }
}

fn test_scenario(game_data: &GameData, scenario: &Scenario) -> Result<()> {
    let logic = Logic::new(game_data, get_options(scenario))?;
    let inventory = Inventory::for_player(PLAYER, scenario.items.clone());
    let passed = match (&scenario.entrance, &scenario.location) {
        (Some(entrance), None) => logic.can_enter(&inventory, PLAYER, entrance)?,
        (None, Some(location)) => logic.can_reach_location(&inventory, PLAYER, location)?,
        _ => bail!("scenario '{}' needs exactly one of entrance or location", scenario.name),
    };
    if passed == scenario.fail {
        bail!(
            "scenario '{}': expected {}, got {}",
            scenario.name,
            if scenario.fail { "fail" } else { "pass" },
            if passed { "pass" } else { "fail" }
        );
    }
    Ok(())
}

#[test]
fn test_logic_scenarios() -> Result<()> {
    let game_data = GameData::load_default()?;
    let scenarios_path =
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/scenarios/scenarios.json");
    let scenarios_str = std::fs::read_to_string(&scenarios_path)
        .context(format!("loading {}", scenarios_path.display()))?;
    let scenarios_list: ScenariosList = serde_json::from_str(&scenarios_str)
        .context(format!("parsing {}", scenarios_path.display()))?;
    for scenario in &scenarios_list.scenarios {
        println!("Scenario: {:?}", scenario);
        test_scenario(&game_data, scenario)?;
    }
    Ok(())
}
