use crate::helpers::*;
use crate::{ItemState, LogicOptions};
use am2r_game::{PlayerId, Requirement};

struct EvalContext<'a> {
    state: &'a dyn ItemState,
    player: PlayerId,
    options: &'a LogicOptions,
}

/// Evaluates a requirement against one player's collected items under the given options.
pub fn apply_requirement(
    req: &Requirement,
    state: &dyn ItemState,
    player: PlayerId,
    options: &LogicOptions,
) -> bool {
    let cx = EvalContext {
        state,
        player,
        options,
    };
    eval(req, &cx)
}

fn eval(req: &Requirement, cx: &EvalContext) -> bool {
    let (state, player, options) = (cx.state, cx.player, cx.options);
    match req {
        Requirement::Free => true,
        Requirement::Never => false,
        Requirement::Item(item) => state.has(*item, player),
        Requirement::ItemCount(item, count) => state.has_count(*item, player, *count),
        Requirement::Missiles(packs) => has_missiles(state, player, options, *packs),
        Requirement::Supers(packs) => has_supers(state, player, options, *packs),
        Requirement::PowerBombs(packs) => has_powerbombs(state, player, options, *packs),
        Requirement::RedDoor => red_door(state, player, options),
        Requirement::Ammo(health) => has_ammo(state, player, options, *health),
        Requirement::Energy(required) => has_energy(state, player, options, *required),
        Requirement::Morph => can_morph(state, player, options),
        Requirement::Grip => has_grip(state, player, options),
        Requirement::MorphUppies => can_morph_uppies(state, player, options),
        Requirement::Bomb(packs) => can_bomb(state, player, options, *packs),
        Requirement::InfiniteBombJump => can_ibj(state, player, options),
        Requirement::Fly => can_fly(state, player, options),
        Requirement::HighJump => can_hi(state, player, options),
        Requirement::SpiderBall => has_spider(state, player, options),
        Requirement::SpringBall => has_spring(state, player, options),
        Requirement::Ballspark => can_ballspark(state, player, options),
        Requirement::Schmove => can_schmove(state, player, options),
        Requirement::SpiderOrFly => can_spider(state, player, options),
        Requirement::Metroids => has_metroids(state, player, options),
        Requirement::OuchJump(energy) => can_ouch_jump(state, player, options, *energy),
        Requirement::WallJump => can_wall_jump(state, player, options),
        Requirement::BallAccess => can_ball(state, player, options),
        Requirement::And(reqs) => reqs.iter().all(|r| eval(r, cx)),
        Requirement::Or(reqs) => reqs.iter().any(|r| eval(r, cx)),
    }
}
