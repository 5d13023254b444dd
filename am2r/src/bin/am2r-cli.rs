use am2r::logic::Logic;
use am2r::settings::load_logic_options;
use am2r_game::{Capacity, GameData, Item, PlayerId};
use am2r_logic::{Inventory, LogicOptions};
use anyhow::{Context, Result};
use clap::Parser;
use hashbrown::HashMap;
use log::{info, warn};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Parser)]
struct Args {
    /// Logic options JSON; defaults are used when omitted.
    #[arg(long)]
    options: Option<PathBuf>,

    /// Read the options file in the host's numeric form.
    #[arg(long)]
    host_options: bool,

    /// Collected items, as `{"items": {"Missile": 3, "Bombs": 1}}`.
    #[arg(long)]
    inventory: Option<PathBuf>,

    #[arg(long, default_value_t = 1)]
    player: PlayerId,

    /// World description replacing the bundled one.
    #[arg(long)]
    world: Option<PathBuf>,

    /// Write the active rule tables as JSON.
    #[arg(long)]
    dump_rules: Option<PathBuf>,

    /// Report a single entrance or location instead of listing everything.
    #[arg(long)]
    check: Option<String>,
}

#[derive(Deserialize)]
struct InventoryFile {
    #[serde(default)]
    items: HashMap<Item, Capacity>,
}

fn load_inventory(path: &Path, player: PlayerId) -> Result<Inventory> {
    let inventory_str = std::fs::read_to_string(path)
        .with_context(|| format!("unable to read {}", path.display()))?;
    let mut des = serde_json::Deserializer::from_str(&inventory_str);
    let inventory_file: InventoryFile = serde_path_to_error::deserialize(&mut des)
        .with_context(|| format!("unable to parse {}", path.display()))?;
    for (item, &count) in &inventory_file.items {
        if item.is_unique() && count > 1 {
            warn!("{item} is unique but the inventory holds {count}");
        }
    }
    Ok(Inventory::for_player(player, inventory_file.items))
}

fn check(
    logic: &Logic,
    game_data: &GameData,
    inventory: &Inventory,
    player: PlayerId,
    name: &str,
) -> Result<()> {
    if let Some(entrance) = game_data.get_entrance(name) {
        let open = logic.can_enter(inventory, player, name)?;
        println!(
            "{name}: {} (from {} to {})",
            if open { "open" } else { "closed" },
            game_data.region_isv.keys[entrance.from],
            game_data.region_isv.keys[entrance.to]
        );
    } else {
        let reachable = logic.can_reach_location(inventory, player, name)?;
        println!(
            "{name}: {}",
            if reachable { "reachable" } else { "unreachable" }
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = Args::parse();
    let game_data = match &args.world {
        Some(path) => GameData::load(path)?,
        None => GameData::load_default()?,
    };
    let options = match &args.options {
        Some(path) => load_logic_options(path, args.host_options)?,
        None => LogicOptions::default(),
    };
    let inventory = match &args.inventory {
        Some(path) => load_inventory(path, args.player)?,
        None => Inventory::new(),
    };

    let logic = Logic::new(&game_data, options)?;

    if let Some(path) = &args.dump_rules {
        let dump_str = serde_json::to_string_pretty(&logic.dump(&game_data))?;
        std::fs::write(path, dump_str)
            .with_context(|| format!("unable to write {}", path.display()))?;
        info!("Wrote rule tables to {}", path.display());
    }

    if let Some(name) = &args.check {
        return check(&logic, &game_data, &inventory, args.player, name);
    }

    let entrances = logic.accessible_entrances(&game_data, &inventory, args.player);
    let locations = logic.accessible_locations(&game_data, &inventory, args.player);
    info!(
        "{}/{} entrances and {}/{} locations pass their own rule",
        entrances.len(),
        game_data.entrance_isv.len(),
        locations.len(),
        game_data.location_isv.len()
    );

    println!("Entrances:");
    let groups = logic.accessible_entrances_by_region(&game_data, &inventory, args.player);
    for (region, destinations) in groups {
        println!("  {region} -> {}", destinations.join(", "));
    }
    println!("Locations:");
    for name in &locations {
        println!("  {name}");
    }
    Ok(())
}
