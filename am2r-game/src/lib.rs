use anyhow::{bail, ensure, Context, Result};
use hashbrown::HashMap;
use log::info;
use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};
use std::borrow::ToOwned;
use std::hash::Hash;
use std::path::Path;
use strum_macros::{Display, EnumIter, EnumString};

pub type Capacity = i32; // Data type used to represent item counts, ammo, energy and damage.
pub type PlayerId = usize; // Player slot number assigned by the multiworld host
pub type RegionId = usize; // Index into GameData.region_isv.keys

const DEFAULT_WORLD_JSON: &str = include_str!("../../data/world.json");

#[derive(Default, Clone, Debug)]
pub struct IndexedVec<T: Hash + Eq> {
    pub keys: Vec<T>,
    pub index_by_key: HashMap<T, usize>,
}

impl<T: Hash + Eq> IndexedVec<T> {
    pub fn add<U: ToOwned<Owned = T> + ?Sized>(&mut self, name: &U) -> usize {
        if !self.index_by_key.contains_key(&name.to_owned()) {
            let idx = self.keys.len();
            self.index_by_key.insert(name.to_owned(), self.keys.len());
            self.keys.push(name.to_owned());
            idx
        } else {
            self.index_by_key[&name.to_owned()]
        }
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumIter,
    EnumString,
    TryFromPrimitive,
    Serialize,
    Deserialize,
    PartialOrd,
    Ord,
)]
#[repr(usize)]
// Display and serialized names must match the item names used by the multiworld host.
pub enum Item {
    Missile,
    #[strum(serialize = "Super Missile")]
    #[serde(rename = "Super Missile")]
    SuperMissile,
    #[strum(serialize = "Power Bomb")]
    #[serde(rename = "Power Bomb")]
    PowerBomb,
    #[strum(serialize = "Energy Tank")]
    #[serde(rename = "Energy Tank")]
    EnergyTank,
    #[strum(serialize = "Missile Launcher")]
    #[serde(rename = "Missile Launcher")]
    MissileLauncher,
    #[strum(serialize = "Super Missile Launcher")]
    #[serde(rename = "Super Missile Launcher")]
    SuperMissileLauncher,
    #[strum(serialize = "Power Bomb Launcher")]
    #[serde(rename = "Power Bomb Launcher")]
    PowerBombLauncher,
    #[strum(serialize = "Morph Ball")]
    #[serde(rename = "Morph Ball")]
    MorphBall,
    #[strum(serialize = "Power Grip")]
    #[serde(rename = "Power Grip")]
    PowerGrip,
    Bombs,
    #[strum(serialize = "Spider Ball")]
    #[serde(rename = "Spider Ball")]
    SpiderBall,
    #[strum(serialize = "Spring Ball")]
    #[serde(rename = "Spring Ball")]
    SpringBall,
    #[strum(serialize = "Space Jump")]
    #[serde(rename = "Space Jump")]
    SpaceJump,
    #[strum(serialize = "Hi Jump")]
    #[serde(rename = "Hi Jump")]
    HiJump,
    #[strum(serialize = "Speed Booster")]
    #[serde(rename = "Speed Booster")]
    SpeedBooster,
    #[strum(serialize = "Screw Attack")]
    #[serde(rename = "Screw Attack")]
    ScrewAttack,
    #[strum(serialize = "Varia Suit")]
    #[serde(rename = "Varia Suit")]
    VariaSuit,
    #[strum(serialize = "Gravity Suit")]
    #[serde(rename = "Gravity Suit")]
    GravitySuit,
    #[strum(serialize = "Charge Beam")]
    #[serde(rename = "Charge Beam")]
    ChargeBeam,
    #[strum(serialize = "Wave Beam")]
    #[serde(rename = "Wave Beam")]
    WaveBeam,
    #[strum(serialize = "Spazer Beam")]
    #[serde(rename = "Spazer Beam")]
    SpazerBeam,
    #[strum(serialize = "Plasma Beam")]
    #[serde(rename = "Plasma Beam")]
    PlasmaBeam,
    #[strum(serialize = "Ice Beam")]
    #[serde(rename = "Ice Beam")]
    IceBeam,
    #[strum(serialize = "EMP")]
    #[serde(rename = "EMP")]
    Emp,
    Metroid,
}

impl Item {
    pub fn is_unique(self) -> bool {
        ![
            Item::Missile,
            Item::SuperMissile,
            Item::PowerBomb,
            Item::EnergyTank,
            Item::Metroid,
        ]
        .contains(&self)
    }
}

/// Access requirement attached to an entrance or a location.
///
/// Leaf variants other than `Item`/`ItemCount` correspond one-to-one to the ability
/// predicates in `am2r_logic::helpers`; their meaning depends on the options in effect
/// when the requirement is evaluated.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Requirement {
    Free,
    Never,
    Item(Item),
    ItemCount(Item, Capacity),
    Missiles(Capacity),
    Supers(Capacity),
    PowerBombs(Capacity),
    RedDoor,
    Ammo(Capacity),
    Energy(Capacity),
    Morph,
    Grip,
    MorphUppies,
    Bomb(Capacity),
    InfiniteBombJump,
    Fly,
    HighJump,
    SpiderBall,
    SpringBall,
    Ballspark,
    Schmove,
    SpiderOrFly,
    Metroids,
    OuchJump(Capacity),
    WallJump,
    BallAccess,
    And(Vec<Requirement>),
    Or(Vec<Requirement>),
}

impl Requirement {
    pub fn make_and(reqs: Vec<Requirement>) -> Requirement {
        let mut out_reqs: Vec<Requirement> = vec![];
        for req in reqs {
            if let Requirement::Never = req {
                return Requirement::Never;
            } else if let Requirement::Free = req {
                continue;
            } else if let Requirement::And(and_reqs) = req {
                out_reqs.extend(and_reqs);
            } else {
                out_reqs.push(req);
            }
        }
        match out_reqs.len() {
            0 => Requirement::Free,
            1 => out_reqs.remove(0),
            _ => Requirement::And(out_reqs),
        }
    }

    pub fn make_or(reqs: Vec<Requirement>) -> Requirement {
        let mut out_reqs: Vec<Requirement> = vec![];
        for req in reqs {
            if let Requirement::Never = req {
                continue;
            } else if let Requirement::Free = req {
                return Requirement::Free;
            } else if let Requirement::Or(or_reqs) = req {
                out_reqs.extend(or_reqs);
            } else {
                out_reqs.push(req);
            }
        }
        match out_reqs.len() {
            0 => Requirement::Never,
            1 => out_reqs.remove(0),
            _ => Requirement::Or(out_reqs),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Entrance {
    pub name: String,
    pub from: RegionId,
    pub to: RegionId,
}

#[derive(Deserialize)]
struct WorldJson {
    start_region: String,
    regions: Vec<String>,
    entrances: Vec<EntranceJson>,
    locations: Vec<String>,
}

#[derive(Deserialize)]
struct EntranceJson {
    from: String,
    to: String,
}

#[derive(Clone, Debug, Default)]
pub struct GameData {
    pub start_region: RegionId,
    pub region_isv: IndexedVec<String>,
    pub entrance_isv: IndexedVec<String>,
    pub entrances: Vec<Entrance>,
    pub location_isv: IndexedVec<String>,
}

pub fn entrance_name(from: &str, to: &str) -> String {
    format!("{from} -> {to}")
}

impl GameData {
    /// Loads the world description bundled with the crate (`data/world.json`).
    pub fn load_default() -> Result<GameData> {
        Self::from_json_str(DEFAULT_WORLD_JSON).context("unable to parse bundled world data")
    }

    pub fn load(path: &Path) -> Result<GameData> {
        let world_str = std::fs::read_to_string(path)
            .with_context(|| format!("unable to read {}", path.display()))?;
        Self::from_json_str(&world_str).with_context(|| format!("unable to parse {}", path.display()))
    }

    pub fn from_json_str(world_str: &str) -> Result<GameData> {
        let world: WorldJson = serde_json::from_str(world_str)?;
        let mut game_data = GameData::default();

        for region in &world.regions {
            if game_data.region_isv.index_by_key.contains_key(region) {
                bail!("duplicate region '{region}'");
            }
            game_data.region_isv.add(region);
        }
        game_data.start_region = *game_data
            .region_isv
            .index_by_key
            .get(&world.start_region)
            .with_context(|| format!("unknown start region '{}'", world.start_region))?;

        for e in &world.entrances {
            let from = *game_data
                .region_isv
                .index_by_key
                .get(&e.from)
                .with_context(|| format!("entrance from unknown region '{}'", e.from))?;
            let to = *game_data
                .region_isv
                .index_by_key
                .get(&e.to)
                .with_context(|| format!("entrance to unknown region '{}'", e.to))?;
            let name = entrance_name(&e.from, &e.to);
            ensure!(
                !game_data.entrance_isv.index_by_key.contains_key(&name),
                "duplicate entrance '{name}'"
            );
            game_data.entrance_isv.add(&name);
            game_data.entrances.push(Entrance { name, from, to });
        }

        for location in &world.locations {
            ensure!(
                !game_data.location_isv.index_by_key.contains_key(location),
                "duplicate location '{location}'"
            );
            game_data.location_isv.add(location);
        }

        info!(
            "Loaded world data: {} regions, {} entrances, {} locations",
            game_data.region_isv.len(),
            game_data.entrance_isv.len(),
            game_data.location_isv.len()
        );
        Ok(game_data)
    }

    pub fn get_entrance(&self, name: &str) -> Option<&Entrance> {
        self.entrance_isv
            .index_by_key
            .get(name)
            .map(|&idx| &self.entrances[idx])
    }

    pub fn entrances_from(&self, region_id: RegionId) -> impl Iterator<Item = &Entrance> {
        self.entrances.iter().filter(move |e| e.from == region_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_item_names() {
        assert_eq!(Item::from_str("Super Missile Launcher").unwrap(), Item::SuperMissileLauncher);
        assert_eq!(Item::from_str("EMP").unwrap(), Item::Emp);
        assert_eq!(Item::HiJump.to_string(), "Hi Jump");
        assert!(Item::from_str("Grapple Beam").is_err());
        assert_eq!(
            serde_json::to_string(&Item::MorphBall).unwrap(),
            "\"Morph Ball\""
        );
    }

    #[test]
    fn test_make_and_or() {
        let r = Requirement::make_and(vec![
            Requirement::Free,
            Requirement::Morph,
            Requirement::make_and(vec![Requirement::Fly, Requirement::Bomb(1)]),
        ]);
        assert_eq!(
            r,
            Requirement::And(vec![
                Requirement::Morph,
                Requirement::Fly,
                Requirement::Bomb(1)
            ])
        );
        assert_eq!(
            Requirement::make_and(vec![Requirement::Morph, Requirement::Never]),
            Requirement::Never
        );
        assert_eq!(Requirement::make_and(vec![]), Requirement::Free);
        assert_eq!(
            Requirement::make_or(vec![Requirement::Never, Requirement::Morph]),
            Requirement::Morph
        );
        assert_eq!(
            Requirement::make_or(vec![Requirement::Morph, Requirement::Free]),
            Requirement::Free
        );
        assert_eq!(Requirement::make_or(vec![]), Requirement::Never);
    }

    #[test]
    fn test_load_default_world() {
        let game_data = GameData::load_default().unwrap();
        assert_eq!(game_data.entrances.len(), 52);
        assert_eq!(game_data.location_isv.len(), 134);
        assert_eq!(game_data.region_isv.keys[game_data.start_region], "Main Caves");

        let e = game_data.get_entrance("The Lab -> Research Station").unwrap();
        assert_eq!(game_data.region_isv.keys[e.from], "The Lab");
        assert_eq!(game_data.region_isv.keys[e.to], "Research Station");
        assert_eq!(game_data.entrances_from(game_data.start_region).count(), 7);
    }

    #[test]
    fn test_reject_bad_world() {
        let unknown_region = r#"{
            "start_region": "A",
            "regions": ["A"],
            "entrances": [{"from": "A", "to": "B"}],
            "locations": []
        }"#;
        assert!(GameData::from_json_str(unknown_region).is_err());

        let duplicate_location = r#"{
            "start_region": "A",
            "regions": ["A"],
            "entrances": [],
            "locations": ["X", "X"]
        }"#;
        assert!(GameData::from_json_str(duplicate_location).is_err());
    }
}
