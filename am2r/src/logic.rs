use crate::rules::{set_location_rules, set_region_rules};
use am2r_game::{GameData, PlayerId, Requirement};
use am2r_logic::requirement::apply_requirement;
use am2r_logic::{ItemState, LogicDifficulty, LogicOptions};
use anyhow::{bail, ensure, Context, Result};
use hashbrown::HashMap;
use log::{debug, info, warn};
use serde::Serialize;

/// Access rules keyed by entrance name (`"{from} -> {to}"`) and location name.
#[derive(Clone, Debug, Default)]
pub struct RuleRegistry {
    pub entrance_rules: HashMap<String, Requirement>,
    pub location_rules: HashMap<String, Requirement>,
}

impl RuleRegistry {
    pub fn set_entrance(&mut self, name: &str, req: Requirement) -> Result<()> {
        if self.entrance_rules.contains_key(name) {
            bail!("duplicate rule for entrance '{name}'");
        }
        self.entrance_rules.insert(name.to_string(), req);
        Ok(())
    }

    pub fn set_location(&mut self, name: &str, req: Requirement) -> Result<()> {
        if self.location_rules.contains_key(name) {
            bail!("duplicate rule for location '{name}'");
        }
        self.location_rules.insert(name.to_string(), req);
        Ok(())
    }

    /// Checks that the rules cover exactly the entrances and locations of the world.
    pub fn validate(&self, game_data: &GameData) -> Result<()> {
        for name in &game_data.entrance_isv.keys {
            ensure!(
                self.entrance_rules.contains_key(name),
                "missing rule for entrance '{name}'"
            );
        }
        for name in &game_data.location_isv.keys {
            ensure!(
                self.location_rules.contains_key(name),
                "missing rule for location '{name}'"
            );
        }
        for name in self.entrance_rules.keys() {
            ensure!(
                game_data.entrance_isv.index_by_key.contains_key(name),
                "rule for unknown entrance '{name}'"
            );
        }
        for name in self.location_rules.keys() {
            ensure!(
                game_data.location_isv.index_by_key.contains_key(name),
                "rule for unknown location '{name}'"
            );
        }
        Ok(())
    }
}

pub fn build_rules(difficulty: LogicDifficulty, game_data: &GameData) -> Result<RuleRegistry> {
    let mut registry = RuleRegistry::default();
    set_region_rules(&mut registry)?;
    set_location_rules(difficulty, &mut registry, game_data)?;
    registry
        .validate(game_data)
        .with_context(|| format!("invalid {difficulty:?} rule tables"))?;
    debug!(
        "{difficulty:?} rules: {} entrances, {} locations",
        registry.entrance_rules.len(),
        registry.location_rules.len()
    );
    Ok(registry)
}

#[derive(Serialize)]
pub struct RuleEntry {
    pub name: String,
    pub requirement: Requirement,
}

#[derive(Serialize)]
pub struct RuleDump {
    pub logic_difficulty: LogicDifficulty,
    pub entrances: Vec<RuleEntry>,
    pub locations: Vec<RuleEntry>,
}

/// Rule tables for one difficulty tier, bound to the options of a generation run.
#[derive(Clone, Debug)]
pub struct Logic {
    pub options: LogicOptions,
    pub rules: RuleRegistry,
}

impl Logic {
    pub fn new(game_data: &GameData, options: LogicOptions) -> Result<Logic> {
        // Every tier must cover the same world, not just the selected one.
        for difficulty in LogicDifficulty::ALL {
            if difficulty != options.logic_difficulty {
                build_rules(difficulty, game_data)?;
            }
        }
        let rules = build_rules(options.logic_difficulty, game_data)?;

        let ungated = rules
            .location_rules
            .values()
            .filter(|r| **r == Requirement::Free)
            .count();
        info!(
            "{:?} logic: {} entrance rules, {} location rules ({} ungated)",
            options.logic_difficulty,
            rules.entrance_rules.len(),
            rules.location_rules.len(),
            ungated
        );
        if options.logic_difficulty == LogicDifficulty::Easy {
            warn!("Easy location rules are provisional and have not been independently reviewed");
        }
        Ok(Logic { options, rules })
    }

    pub fn can_enter(
        &self,
        state: &dyn ItemState,
        player: PlayerId,
        entrance: &str,
    ) -> Result<bool> {
        let req = self
            .rules
            .entrance_rules
            .get(entrance)
            .with_context(|| format!("no rule for entrance '{entrance}'"))?;
        Ok(apply_requirement(req, state, player, &self.options))
    }

    pub fn can_reach_location(
        &self,
        state: &dyn ItemState,
        player: PlayerId,
        location: &str,
    ) -> Result<bool> {
        let req = self
            .rules
            .location_rules
            .get(location)
            .with_context(|| format!("no rule for location '{location}'"))?;
        Ok(apply_requirement(req, state, player, &self.options))
    }

    /// Entrances whose own rule holds, in world order. Region reachability is not considered.
    pub fn accessible_entrances(
        &self,
        game_data: &GameData,
        state: &dyn ItemState,
        player: PlayerId,
    ) -> Vec<String> {
        accessible(&game_data.entrance_isv.keys, &self.rules.entrance_rules, |req| {
            apply_requirement(req, state, player, &self.options)
        })
    }

    /// Locations whose own rule holds, in world order. Region reachability is not considered.
    pub fn accessible_locations(
        &self,
        game_data: &GameData,
        state: &dyn ItemState,
        player: PlayerId,
    ) -> Vec<String> {
        accessible(&game_data.location_isv.keys, &self.rules.location_rules, |req| {
            apply_requirement(req, state, player, &self.options)
        })
    }

    /// Accessible entrances grouped by source region, as destination region names.
    /// Regions with no open entrance are left out.
    pub fn accessible_entrances_by_region(
        &self,
        game_data: &GameData,
        state: &dyn ItemState,
        player: PlayerId,
    ) -> Vec<(String, Vec<String>)> {
        let mut groups = Vec::new();
        for (region_id, region) in game_data.region_isv.keys.iter().enumerate() {
            let open: Vec<String> = game_data
                .entrances_from(region_id)
                .filter(|e| {
                    self.rules
                        .entrance_rules
                        .get(&e.name)
                        .is_some_and(|req| apply_requirement(req, state, player, &self.options))
                })
                .map(|e| game_data.region_isv.keys[e.to].clone())
                .collect();
            if !open.is_empty() {
                groups.push((region.clone(), open));
            }
        }
        groups
    }

    pub fn dump(&self, game_data: &GameData) -> RuleDump {
        let entries = |names: &[String], rules: &HashMap<String, Requirement>| -> Vec<RuleEntry> {
            names
                .iter()
                .filter_map(|name| {
                    rules.get(name).map(|req| RuleEntry {
                        name: name.clone(),
                        requirement: req.clone(),
                    })
                })
                .collect()
        };
        RuleDump {
            logic_difficulty: self.options.logic_difficulty,
            entrances: entries(&game_data.entrance_isv.keys, &self.rules.entrance_rules),
            locations: entries(&game_data.location_isv.keys, &self.rules.location_rules),
        }
    }
}

fn accessible(
    names: &[String],
    rules: &HashMap<String, Requirement>,
    holds: impl Fn(&Requirement) -> bool,
) -> Vec<String> {
    names
        .iter()
        .filter(|name| rules.get(*name).is_some_and(&holds))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use am2r_game::Item;
    use am2r_logic::Inventory;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_logic_is_send_sync() {
        assert_send_sync::<Logic>();
    }

    #[test]
    fn test_validate_missing_and_unknown() {
        let game_data = GameData::load_default().unwrap();
        let mut registry = build_rules(LogicDifficulty::Normal, &game_data).unwrap();
        registry.location_rules.remove("Omega Nest: Druid");
        let err = registry.validate(&game_data).unwrap_err();
        assert!(err.to_string().contains("Omega Nest: Druid"));

        let mut registry = build_rules(LogicDifficulty::Normal, &game_data).unwrap();
        registry
            .set_entrance("Main Caves -> Nowhere", Requirement::Free)
            .unwrap();
        assert!(registry.validate(&game_data).is_err());
    }

    #[test]
    fn test_unknown_identifier_is_error() {
        let game_data = GameData::load_default().unwrap();
        let logic = Logic::new(&game_data, LogicOptions::default()).unwrap();
        let inventory = Inventory::new();
        assert!(logic.can_enter(&inventory, 1, "Main Caves -> Nowhere").is_err());
        assert!(logic
            .can_reach_location(&inventory, 1, "Main Caves: Nowhere")
            .is_err());
    }

    #[test]
    fn test_accessible_lists() {
        let game_data = GameData::load_default().unwrap();
        let options = LogicOptions {
            remove_morph_ball: true,
            ..Default::default()
        };
        let logic = Logic::new(&game_data, options).unwrap();
        let mut inventory = Inventory::new();

        let entrances = logic.accessible_entrances(&game_data, &inventory, 1);
        assert!(entrances.contains(&"Main Caves -> GFS Thoth".to_string()));
        assert!(!entrances.contains(&"Main Caves -> Hydro Station".to_string()));

        inventory.collect(1, Item::MorphBall);
        let entrances = logic.accessible_entrances(&game_data, &inventory, 1);
        assert!(entrances.contains(&"Main Caves -> Hydro Station".to_string()));
        // World order is preserved.
        assert_eq!(entrances[0], "Main Caves -> First Alpha");

        let locations = logic.accessible_locations(&game_data, &inventory, 1);
        assert!(locations.contains(&"Main Caves: Spiky Maze".to_string()));
        assert!(!locations.contains(&"Golden Temple: Hidden Energy Tank".to_string()));
    }

    #[test]
    fn test_entrances_by_region() {
        let game_data = GameData::load_default().unwrap();
        let options = LogicOptions {
            remove_morph_ball: true,
            ..Default::default()
        };
        let logic = Logic::new(&game_data, options).unwrap();
        let mut inventory = Inventory::new();

        let groups = logic.accessible_entrances_by_region(&game_data, &inventory, 1);
        let (region, destinations) = &groups[0];
        assert_eq!(region, "Main Caves");
        assert!(destinations.contains(&"GFS Thoth".to_string()));
        assert!(!destinations.contains(&"Hydro Station".to_string()));

        inventory.collect(1, Item::MorphBall);
        let groups = logic.accessible_entrances_by_region(&game_data, &inventory, 1);
        assert!(groups[0].1.contains(&"Hydro Station".to_string()));
        let flat = logic.accessible_entrances(&game_data, &inventory, 1);
        let grouped: usize = groups.iter().map(|(_, d)| d.len()).sum();
        assert_eq!(grouped, flat.len());
        for (region, destinations) in &groups {
            assert!(!destinations.is_empty());
            for to in destinations {
                let name = format!("{region} -> {to}");
                assert!(flat.contains(&name), "{name}");
                let entrance = game_data.get_entrance(&name).unwrap();
                assert_eq!(game_data.region_isv.keys[entrance.from], *region);
            }
        }
    }

    #[test]
    fn test_dump_order() {
        let game_data = GameData::load_default().unwrap();
        let logic = Logic::new(&game_data, LogicOptions::default()).unwrap();
        let dump = logic.dump(&game_data);
        assert_eq!(dump.entrances.len(), 52);
        assert_eq!(dump.locations.len(), 134);
        assert_eq!(dump.locations[0].name, "Main Caves: Spider Ball Challenge Upper");
        assert_eq!(dump.logic_difficulty, LogicDifficulty::Normal);
    }
}
