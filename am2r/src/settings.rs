use std::path::Path;

use am2r_game::Capacity;
use am2r_logic::{AmmoLogic, LogicDifficulty, LogicOptions, MissileLauncher};
use anyhow::{anyhow, ensure, Context, Result};
use serde::{Deserialize, Serialize};

/// Options in the multiworld host's raw form: enums as integers, toggles as 0/1.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HostOptions {
    pub ammo_logic: u8,
    pub missile_launcher: u8,
    pub remove_morph_ball: u8,
    pub remove_power_grip: u8,
    pub logic_difficulty: u8,
    pub expected_ammo_multiplier: u32,
    pub super_launcher: u8,
    pub metroids_required: Capacity,
}

fn toggle(name: &str, value: u8) -> Result<bool> {
    ensure!(value <= 1, "invalid {name}: {value}");
    Ok(value == 1)
}

impl HostOptions {
    pub fn to_logic_options(&self) -> Result<LogicOptions> {
        let ammo_logic = AmmoLogic::try_from(self.ammo_logic)
            .map_err(|e| anyhow!("invalid ammo_logic: {}", e.number))?;
        let missile_launcher = MissileLauncher::try_from(self.missile_launcher)
            .map_err(|e| anyhow!("invalid missile_launcher: {}", e.number))?;
        let logic_difficulty = LogicDifficulty::try_from(self.logic_difficulty)
            .map_err(|e| anyhow!("invalid logic_difficulty: {}", e.number))?;
        let options = LogicOptions {
            ammo_logic,
            missile_launcher,
            remove_morph_ball: toggle("remove_morph_ball", self.remove_morph_ball)?,
            remove_power_grip: toggle("remove_power_grip", self.remove_power_grip)?,
            logic_difficulty,
            expected_ammo_multiplier: self.expected_ammo_multiplier,
            super_launcher: toggle("super_launcher", self.super_launcher)?,
            metroids_required: self.metroids_required,
        };
        validate_logic_options(&options)?;
        Ok(options)
    }
}

/// Largest accepted `expected_ammo_multiplier`, in percent.
pub const MAX_AMMO_MULTIPLIER: u32 = 1000;

pub fn validate_logic_options(options: &LogicOptions) -> Result<()> {
    ensure!(
        options.expected_ammo_multiplier <= MAX_AMMO_MULTIPLIER,
        "invalid expected_ammo_multiplier: {} (at most {MAX_AMMO_MULTIPLIER})",
        options.expected_ammo_multiplier
    );
    ensure!(
        options.metroids_required >= 0,
        "invalid metroids_required: {}",
        options.metroids_required
    );
    Ok(())
}

pub fn parse_logic_options(options_json: &str) -> Result<LogicOptions> {
    let mut des = serde_json::Deserializer::from_str(options_json);
    let options = serde_path_to_error::deserialize(&mut des)?;
    validate_logic_options(&options)?;
    Ok(options)
}

pub fn parse_host_options(options_json: &str) -> Result<LogicOptions> {
    let mut des = serde_json::Deserializer::from_str(options_json);
    let host_options: HostOptions = serde_path_to_error::deserialize(&mut des)?;
    host_options.to_logic_options()
}

pub fn load_logic_options(path: &Path, host_format: bool) -> Result<LogicOptions> {
    let options_str = std::fs::read_to_string(path)
        .with_context(|| format!("unable to read {}", path.display()))?;
    let options = if host_format {
        parse_host_options(&options_str)
    } else {
        parse_logic_options(&options_str)
    };
    options.with_context(|| format!("unable to parse options in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_options() {
        let options = parse_logic_options(
            r#"{
                "ammo_logic": "Hard",
                "missile_launcher": "Launcher",
                "remove_morph_ball": true,
                "remove_power_grip": false,
                "logic_difficulty": "Easy",
                "expected_ammo_multiplier": 150,
                "super_launcher": true,
                "metroids_required": 20
            }"#,
        )
        .unwrap();
        assert_eq!(options.ammo_logic, AmmoLogic::Hard);
        assert_eq!(options.missile_launcher, MissileLauncher::Launcher);
        assert_eq!(options.logic_difficulty, LogicDifficulty::Easy);
        assert!(options.remove_morph_ball);
        assert_eq!(options.metroids_required, 20);
    }

    #[test]
    fn test_parse_error_has_path() {
        let err = parse_logic_options(
            r#"{
                "ammo_logic": "Normal",
                "missile_launcher": "Sometimes",
                "remove_morph_ball": false,
                "remove_power_grip": false,
                "logic_difficulty": "Normal",
                "expected_ammo_multiplier": 100,
                "super_launcher": false,
                "metroids_required": 46
            }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("missile_launcher"));
    }

    #[test]
    fn test_host_options() {
        let options = parse_host_options(
            r#"{
                "ammo_logic": 1,
                "missile_launcher": 2,
                "remove_morph_ball": 0,
                "remove_power_grip": 1,
                "logic_difficulty": 2,
                "expected_ammo_multiplier": 100,
                "super_launcher": 0,
                "metroids_required": 46
            }"#,
        )
        .unwrap();
        assert_eq!(
            options,
            LogicOptions {
                ammo_logic: AmmoLogic::Hard,
                missile_launcher: MissileLauncher::Launcher,
                remove_morph_ball: false,
                remove_power_grip: true,
                logic_difficulty: LogicDifficulty::Hard,
                expected_ammo_multiplier: 100,
                super_launcher: false,
                metroids_required: 46,
            }
        );
    }

    #[test]
    fn test_host_options_out_of_range() {
        let host = HostOptions {
            ammo_logic: 0,
            missile_launcher: 3,
            remove_morph_ball: 0,
            remove_power_grip: 0,
            logic_difficulty: 1,
            expected_ammo_multiplier: 100,
            super_launcher: 0,
            metroids_required: 46,
        };
        let err = host.to_logic_options().unwrap_err();
        assert!(err.to_string().contains("missile_launcher"));

        let host = HostOptions {
            missile_launcher: 0,
            logic_difficulty: 5,
            ..host
        };
        assert!(host.to_logic_options().is_err());

        let host = HostOptions {
            logic_difficulty: 1,
            super_launcher: 2,
            ..host
        };
        assert!(host.to_logic_options().is_err());
    }

    #[test]
    fn test_ammo_multiplier_range() {
        let host_json = |multiplier: u64| {
            format!(
                r#"{{
                    "ammo_logic": 0,
                    "missile_launcher": 0,
                    "remove_morph_ball": 0,
                    "remove_power_grip": 0,
                    "logic_difficulty": 1,
                    "expected_ammo_multiplier": {multiplier},
                    "super_launcher": 0,
                    "metroids_required": 46
                }}"#
            )
        };
        assert!(parse_host_options(&host_json(1000)).is_ok());
        let err = parse_host_options(&host_json(300_000_000)).unwrap_err();
        assert!(err.to_string().contains("expected_ammo_multiplier"));
        assert!(parse_host_options(&host_json(3_000_000_000)).is_err());
        // Beyond u32, rejected while deserializing.
        assert!(parse_host_options(&host_json(30_000_000_000)).is_err());

        let named = LogicOptions {
            expected_ammo_multiplier: 3_000_000_000,
            ..Default::default()
        };
        let named_json = serde_json::to_string(&named).unwrap();
        assert!(parse_logic_options(&named_json).is_err());
        let named = LogicOptions {
            metroids_required: -1,
            ..Default::default()
        };
        assert!(parse_logic_options(&serde_json::to_string(&named).unwrap()).is_err());
        assert!(validate_logic_options(&LogicOptions::default()).is_ok());
    }
}
