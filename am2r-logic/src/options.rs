use am2r_game::Capacity;
use num_enum::TryFromPrimitive;
use serde::{Deserialize, Serialize};

#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TryFromPrimitive,
)]
#[repr(u8)]
pub enum AmmoLogic {
    /// 5 missiles and 2 supers per pack.
    #[default]
    Normal = 0,
    /// Fusion-style ammo: 2 missiles and 1 super per pack.
    Hard = 1,
}

#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TryFromPrimitive,
)]
#[repr(u8)]
pub enum MissileLauncher {
    /// The launcher and its 30 missiles are available from the start.
    #[default]
    Vanilla = 0,
    /// No launcher; missiles come only from packs.
    Packs = 1,
    /// The `Missile Launcher` item must be found before missiles can be fired.
    Launcher = 2,
}

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    TryFromPrimitive,
)]
#[repr(u8)]
pub enum LogicDifficulty {
    Easy = 0,
    #[default]
    Normal = 1,
    Hard = 2,
}

impl LogicDifficulty {
    pub const ALL: [LogicDifficulty; 3] = [
        LogicDifficulty::Easy,
        LogicDifficulty::Normal,
        LogicDifficulty::Hard,
    ];
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogicOptions {
    pub ammo_logic: AmmoLogic,
    pub missile_launcher: MissileLauncher,
    pub remove_morph_ball: bool,
    pub remove_power_grip: bool,
    pub logic_difficulty: LogicDifficulty,
    /// Percentage applied to enemy health when checking ammo sufficiency.
    pub expected_ammo_multiplier: u32,
    pub super_launcher: bool,
    pub metroids_required: Capacity,
}

impl Default for LogicOptions {
    fn default() -> Self {
        LogicOptions {
            ammo_logic: AmmoLogic::Normal,
            missile_launcher: MissileLauncher::Vanilla,
            remove_morph_ball: false,
            remove_power_grip: false,
            logic_difficulty: LogicDifficulty::Normal,
            expected_ammo_multiplier: 100,
            super_launcher: false,
            // Every Metroid in the game.
            metroids_required: 46,
        }
    }
}
