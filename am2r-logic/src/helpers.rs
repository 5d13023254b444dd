use crate::{AmmoLogic, ItemState, LogicDifficulty, LogicOptions, MissileLauncher};
use am2r_game::{Capacity, Item, PlayerId};

const LAUNCHER_MISSILES: Capacity = 30;
const SUPER_MISSILE_DAMAGE: i64 = 5;

fn ceil_div(num: Capacity, denom: Capacity) -> Capacity {
    (num + denom - 1) / denom
}

pub fn suit_damage_factor(state: &dyn ItemState, player: PlayerId) -> Capacity {
    let varia = state.has(Item::VariaSuit, player);
    let gravity = state.has(Item::GravitySuit, player);
    if gravity && varia {
        4
    } else if gravity || varia {
        2
    } else {
        1
    }
}

// Used for breakables, red doors and missile blocks.
pub fn has_missiles(
    state: &dyn ItemState,
    player: PlayerId,
    options: &LogicOptions,
    packs: Capacity,
) -> bool {
    let packs = match options.ammo_logic {
        // ceil(packs * 2.5): a pack only holds 2 missiles.
        AmmoLogic::Hard => (packs * 5 + 1) / 2,
        AmmoLogic::Normal => packs,
    };
    match options.missile_launcher {
        MissileLauncher::Vanilla => true,
        MissileLauncher::Packs => state.has_count(Item::Missile, player, packs),
        MissileLauncher::Launcher => {
            // The launcher counts as one pack.
            state.has(Item::MissileLauncher, player)
                && state.has_count(Item::Missile, player, packs - 1)
        }
    }
}

// Used for super blocks and Metroids.
pub fn has_supers(
    state: &dyn ItemState,
    player: PlayerId,
    options: &LogicOptions,
    packs: Capacity,
) -> bool {
    let packs = match options.ammo_logic {
        AmmoLogic::Hard => packs * 2,
        AmmoLogic::Normal => packs,
    };
    if options.missile_launcher != MissileLauncher::Vanilla {
        state.has(Item::SuperMissileLauncher, player)
            && state.has_count(Item::SuperMissile, player, packs - 1)
    } else {
        state.has_count(Item::SuperMissile, player, packs)
    }
}

pub fn red_door(state: &dyn ItemState, player: PlayerId, options: &LogicOptions) -> bool {
    has_missiles(state, player, options, 1) || has_supers(state, player, options, 1)
}

/// Whether the player carries enough missile damage to kill an enemy with the given health,
/// measured in missiles (not packs). One super missile deals the damage of five missiles.
pub fn has_ammo(
    state: &dyn ItemState,
    player: PlayerId,
    options: &LogicOptions,
    health: Capacity,
) -> bool {
    let mut missile_packs = state.count(Item::Missile, player);
    let mut super_packs = state.count(Item::SuperMissile, player);
    let mut missiles: Capacity = 0;
    // Widened so that no multiplier can overflow the target.
    let target =
        (i64::from(health) * i64::from(options.expected_ammo_multiplier) + 99).div_euclid(100);

    match options.missile_launcher {
        MissileLauncher::Vanilla => missiles += LAUNCHER_MISSILES,
        MissileLauncher::Packs => {}
        MissileLauncher::Launcher => {
            if state.has(Item::MissileLauncher, player) {
                missiles += LAUNCHER_MISSILES;
            } else {
                // Packs can't be fired without the launcher.
                missile_packs = 0;
            }
        }
    }

    if options.super_launcher {
        if state.has(Item::SuperMissileLauncher, player) {
            super_packs += 1;
        } else {
            super_packs = 0;
        }
    }

    let (missiles_per_pack, supers_per_pack) = match options.ammo_logic {
        AmmoLogic::Normal => (5, 2),
        AmmoLogic::Hard => (2, 1),
    };
    let missiles = i64::from(missiles) + missiles_per_pack * i64::from(missile_packs);
    let supers = supers_per_pack * i64::from(super_packs);

    missiles + supers * SUPER_MISSILE_DAMAGE >= target
}

pub fn has_powerbombs(
    state: &dyn ItemState,
    player: PlayerId,
    options: &LogicOptions,
    packs: Capacity,
) -> bool {
    let packs = match options.ammo_logic {
        AmmoLogic::Hard => packs * 2,
        AmmoLogic::Normal => packs,
    };
    if !can_morph(state, player, options) {
        return false;
    }
    if options.missile_launcher != MissileLauncher::Vanilla {
        state.has(Item::PowerBombLauncher, player)
            && state.has_count(Item::PowerBomb, player, packs - 1)
    } else {
        state.has_count(Item::PowerBomb, player, packs)
    }
}

pub fn has_energy(
    state: &dyn ItemState,
    player: PlayerId,
    options: &LogicOptions,
    required: Capacity,
) -> bool {
    let mut required = required;
    if options.logic_difficulty == LogicDifficulty::Easy {
        required *= 2;
    }
    let required = ceil_div(required, suit_damage_factor(state, player));
    state.has_count(Item::EnergyTank, player, required)
}

pub fn can_morph(state: &dyn ItemState, player: PlayerId, options: &LogicOptions) -> bool {
    !options.remove_morph_ball || state.has(Item::MorphBall, player)
}

pub fn has_grip(state: &dyn ItemState, player: PlayerId, options: &LogicOptions) -> bool {
    !options.remove_power_grip || state.has(Item::PowerGrip, player)
}

// Climbing the many 2-3 block tall vertical morph tunnels.
pub fn can_morph_uppies(state: &dyn ItemState, player: PlayerId, options: &LogicOptions) -> bool {
    can_morph(state, player, options)
        && (has_grip(state, player, options)
            || state.has(Item::Bombs, player)
            || state.has(Item::SpiderBall, player)
            || state.has(Item::SpringBall, player))
}

pub fn can_bomb(
    state: &dyn ItemState,
    player: PlayerId,
    options: &LogicOptions,
    packs: Capacity,
) -> bool {
    can_morph(state, player, options)
        && (state.has(Item::Bombs, player) || has_powerbombs(state, player, options, packs))
}

/// Infinite bomb jump.
pub fn can_ibj(state: &dyn ItemState, player: PlayerId, options: &LogicOptions) -> bool {
    options.logic_difficulty != LogicDifficulty::Easy
        && state.has(Item::Bombs, player)
        && can_morph(state, player, options)
}

pub fn can_fly(state: &dyn ItemState, player: PlayerId, options: &LogicOptions) -> bool {
    state.has(Item::SpaceJump, player) || can_ibj(state, player, options)
}

pub fn can_hi(state: &dyn ItemState, player: PlayerId, options: &LogicOptions) -> bool {
    state.has(Item::HiJump, player) || can_fly(state, player, options)
}

pub fn has_spider(state: &dyn ItemState, player: PlayerId, options: &LogicOptions) -> bool {
    state.has(Item::SpiderBall, player) && can_morph(state, player, options)
}

pub fn has_spring(state: &dyn ItemState, player: PlayerId, options: &LogicOptions) -> bool {
    state.has(Item::SpringBall, player) && can_morph(state, player, options)
}

pub fn can_ballspark(state: &dyn ItemState, player: PlayerId, options: &LogicOptions) -> bool {
    state.has(Item::SpeedBooster, player) && has_spring(state, player, options)
}

/// General vertical mobility.
pub fn can_schmove(state: &dyn ItemState, player: PlayerId, options: &LogicOptions) -> bool {
    has_spider(state, player, options)
        || can_fly(state, player, options)
        || state.has(Item::HiJump, player)
}

pub fn can_spider(state: &dyn ItemState, player: PlayerId, options: &LogicOptions) -> bool {
    has_spider(state, player, options) || can_fly(state, player, options)
}

pub fn has_metroids(state: &dyn ItemState, player: PlayerId, options: &LogicOptions) -> bool {
    state.has_count(Item::Metroid, player, options.metroids_required)
}

pub fn can_ouch_jump(
    state: &dyn ItemState,
    player: PlayerId,
    options: &LogicOptions,
    energy: Capacity,
) -> bool {
    options.logic_difficulty != LogicDifficulty::Easy
        && has_energy(state, player, options, energy)
}

pub fn can_wall_jump(state: &dyn ItemState, player: PlayerId, options: &LogicOptions) -> bool {
    options.logic_difficulty != LogicDifficulty::Easy && can_schmove(state, player, options)
}

/// Breaking into the ball-only passages: bombs, or enough missiles or supers to clear the blocks.
pub fn can_ball(state: &dyn ItemState, player: PlayerId, options: &LogicOptions) -> bool {
    can_bomb(state, player, options, 1)
        || has_missiles(state, player, options, 2)
        || has_supers(state, player, options, 3)
}
