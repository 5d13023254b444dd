use crate::logic::RuleRegistry;
use am2r_game::{entrance_name, GameData, Item, Requirement};
use am2r_game::Requirement as R;
use am2r_logic::LogicDifficulty;
use anyhow::Result;

fn and<const N: usize>(reqs: [Requirement; N]) -> Requirement {
    Requirement::make_and(reqs.into())
}

fn or<const N: usize>(reqs: [Requirement; N]) -> Requirement {
    Requirement::make_or(reqs.into())
}

fn item(item: Item) -> Requirement {
    R::Item(item)
}

// Locations that only require reaching their region, under both easy and normal logic.
// This covers the GFS Thoth/Tower/Distribution Center/Deep Caves pickups and every Metroid.
const UNGATED_LOCATIONS: [&str; 77] = [
    "GFS Thoth: Research Camp",
    "GFS Thoth: Hornoad Room",
    "GFS Thoth: Outside the Front of the Ship",
    "Genesis: Boss",
    "The Tower: Beside Hydro Pipe",
    "The Tower: Right Side of Tower",
    "The Tower: In the Ceiling",
    "The Tower: Dark Maze",
    "The Tower: After Dark Maze",
    "The Tower: Plasma Beam",
    "The Tower: After Tester",
    "The Tower: Outside Reactor",
    "The Tower: Geothermal Reactor",
    "The Tower: Post Reactor Chozo",
    "The Tower: Post Reactor Shinespark",
    "Distribution Center: Main Room Shinespark",
    "Distribution Center: Underwater Speed Hallway",
    "Distribution Center: After EMP Activation",
    "Distribution Center: Spider Ball Crumble Spiky \"Maze\"",
    "Distribution Center: Before Spiky Trial",
    "Distribution Center: Spiky Trial Shinespark",
    "Distribution Center: After Spiky Trial",
    "Distribution Center: Screw Attack",
    "Distribution Center: Exterior Post-Gravity",
    "Distribution Center: Spectator Jail",
    "Distribution Center: Before Gravity",
    "Distribution Center: Gravity Suit",
    "Serris: Ice Beam",
    "Deep Caves: Drivel Ballspark",
    "Deep Caves: Ramulken Lava Pool",
    "Deep Caves: After Omega",
    "The Forgotten Alpha",
    "Golden Temple: Friendly Spider",
    "Golden Temple Nest: Moe",
    "Golden Temple Nest: Larry",
    "Golden Temple Nest: Curly",
    "Main Caves: Freddy Fazbear",
    "Hydro Station: Turbine Terror",
    "Hydro Station: The Lookout",
    "Hydro Station: Recent Guardian",
    "Hydro Nest: EnderMahan",
    "Hydro Nest: Carnage Awful",
    "Hydro Nest: Venom Awesome",
    "Hydro Nest: Something More, Something Awesome",
    "Industrial Nest: Mimolette",
    "Industrial Nest: The Big Cheese",
    "Industrial Nest: Mohwir",
    "Industrial Nest: Chirn",
    "Industrial Nest: BHHarbinger",
    "Industrial Nest: The Abyssal Creature",
    "Industrial Complex: Sisyphus",
    "Industrial Complex: And then there's this Asshole",
    "Inside Industrial: Guardian of Doom Treadmill",
    "Inside Industrial: Rawsome1234 by the Lava Lake",
    "Dual Alphas: Marco",
    "Dual Alphas: Polo",
    "Mines: Unga",
    "Mines: Gunga",
    "The Tower: Patricia",
    "The Tower: Variable \"GUH\"",
    "Ruler of The Tower: Slagathor",
    "The Tower: Mr.Sandman",
    "The Tower: Anakin",
    "The Tower: Xander",
    "EMP: Sir Zeta Commander of the Alpha Squadron",
    "Alpha Squadron: Timmy",
    "Alpha Squadron: Tommy",
    "Alpha Squadron: Terry",
    "Alpha Squadron: Telly",
    "Alpha Squadron: Martin",
    "Underwater: Gamma Bros Mario",
    "Underwater: Gamma Bros Luigi",
    "Deep Caves: Lil' Bro",
    "Deep Caves: Big Sis",
    "Omega Nest: Lucina",
    "Omega Nest: Epsilon",
    "Omega Nest: Druid",
];

const EASY_UNGATED_LOCATIONS: [&str; 44] = [
    "Golden Temple: Armory Left",
    "Golden Temple: Armory Lower",
    "Golden Temple: 3-Orb Hallway Left",
    "Golden Temple: 3-Orb Hallway Right",
    "Golden Temple: Spider Ball",
    "Golden Temple: Exterior Ceiling",
    "Golden Temple: EMP Room",
    "Guardian: Up Above",
    "Guardian: Behind The Door",
    "Hydro Station: Cliff",
    "Hydro Station: Side Morph Tunnel",
    "Hydro Station: Turbine Room",
    "Hydro Station: Not so Secret Tunnel",
    "Hydro Station: Water Pressure Pre-Varia",
    "Hydro Station: Varia Suit",
    "Hydro Station: EMP Room",
    "Arachnus: Boss",
    "Hydro Station: Wave Beam",
    "Hydro Station: Below Tower Pipe Upper",
    "Hydro Station: Below Tower Pipe Lower",
    "Hydro Station: Dead End",
    "Hydro Station: Hi-Jump Boots",
    "Hydro Station: Behind Hi-Jump Boots Upper",
    "Hydro Station: Behind Hi-Jump Boots Lower",
    "Hydro Nest: Below the Walkway",
    "Hydro Nest: Speed Ceiling",
    "Hydro Nest: Behind The Wall",
    "Industrial Complex: Above Save",
    "Industrial Complex: EMP Room",
    "Industrial Complex Nest: Nest Shinespark",
    "Industrial Complex: In the Sand",
    "Industrial Complex: Complex Side After Tunnel",
    "Industrial Complex: Complex Side Tunnel",
    "Industrial Complex: Behind the Green Door",
    "Industrial Complex: Save Room",
    "Industrial Complex: Spazer Beam",
    "Industrial Complex: Sisyphus Spark",
    "Industrial Complex: Speed Booster",
    "Torizo Ascended: Boss",
    "Industrial Complex: Conveyor Belt Room",
    "Industrial Complex: Doom Treadmill",
    "Industrial Complex: Complex Hub Shinespark",
    "Industrial Complex: Complex Hub in the Floor",
    "Industrial Complex: Skippy Reward",
];

const NORMAL_UNGATED_LOCATIONS: [&str; 5] = [
    "Golden Temple: Armory Left",
    "Golden Temple: Armory Lower",
    "Hydro Station: Hi-Jump Boots",
    "Industrial Complex: Above Save",
    "Industrial Complex: In the Sand",
];

pub fn set_region_rules(registry: &mut RuleRegistry) -> Result<()> {
    let screw = || item(Item::ScrewAttack);
    let speed = || item(Item::SpeedBooster);
    let gravity = || item(Item::GravitySuit);
    let space_jump = || item(Item::SpaceJump);
    let ice_beam = || and([item(Item::IceBeam), R::Ammo(1)]);
    let pbs_or_supers = || or([and([R::Morph, R::PowerBombs(1)]), R::Supers(1)]);

    let rules: Vec<(&str, &str, Requirement)> = vec![
        ("Main Caves", "First Alpha", R::Free),
        ("Main Caves", "Guardian", R::Free),
        ("Main Caves", "Hydro Station", R::Morph),
        ("Main Caves", "Mines", and([R::Supers(1), R::Morph])),
        ("Main Caves", "Industrial Complex Nest", R::Morph),
        ("Main Caves", "GFS Thoth", R::Free),
        ("Main Caves", "Lower Main Caves", R::MorphUppies),
        ("Lower Main Caves", "The Tower", R::Free),
        (
            "Lower Main Caves",
            "Underwater Distribution Center",
            and([pbs_or_supers(), ice_beam()]),
        ),
        ("Lower Main Caves", "Deep Caves", pbs_or_supers()),
        ("GFS Thoth", "Genesis", and([R::Morph, R::PowerBombs(2)])),
        ("Guardian", "After Guardian", R::Free),
        ("After Guardian", "Golden Temple", R::Free),
        ("After Guardian", "Golden Temple Nest", R::Free),
        (
            "Hydro Station",
            "Hydro Nest",
            or([
                and([R::Morph, item(Item::HiJump), R::Grip]),
                R::Fly,
                and([R::OuchJump(0), R::Grip]),
            ]),
        ),
        (
            "Hydro Station",
            "Arachnus",
            and([R::Morph, R::RedDoor, R::Bomb(1), R::MorphUppies]),
        ),
        ("Hydro Station", "Inner Hydro Station", or([R::Bomb(1), screw()])),
        ("Hydro Station", "The Tower", and([R::Morph, screw()])),
        ("Hydro Station", "The Lab", and([R::Morph, screw(), R::Metroids])),
        (
            "Industrial Complex Nest",
            "Pre Industrial Complex",
            or([
                and([R::Bomb(1), R::MorphUppies]),
                and([item(Item::HiJump), speed()]),
            ]),
        ),
        (
            "Pre Industrial Complex",
            "Complex Sand",
            and([
                R::Morph,
                or([
                    and([
                        or([
                            R::SpiderOrFly,
                            R::Fly,
                            and([R::OuchJump(1), item(Item::HiJump)]),
                        ]),
                        R::Ammo(1),
                    ]),
                    and([R::Morph, item(Item::Bombs)]),
                ]),
            ]),
        ),
        (
            "Pre Industrial Complex",
            "Torizo Ascended",
            and([R::Schmove, R::RedDoor]),
        ),
        ("Complex Sand", "Speed Industrial Complex", R::Schmove),
        ("Speed Industrial Complex", "Industrial Complex", speed()),
        ("The Tower", "Tester Lower", and([R::Bomb(2), R::WallJump])),
        ("The Tower", "Tester Upper", and([R::Bomb(2), R::WallJump])),
        ("The Tower", "Geothermal", R::Free),
        ("Tester Lower", "Tester", R::Free),
        ("Tester Upper", "Tester", R::Free),
        (
            "Underwater Distribution Center",
            "Underwater Distro Connection",
            or([
                and([gravity(), speed()]),
                and([
                    ice_beam(),
                    or([and([gravity(), speed()]), R::Supers(1)]),
                ]),
            ]),
        ),
        ("Underwater Distribution Center", "EMP", R::Free),
        ("Underwater Distribution Center", "Serris", R::Free),
        (
            "EMP",
            "Post EMP",
            and([R::Bomb(2), speed(), item(Item::Emp), R::BallAccess]),
        ),
        ("Post EMP", "Pipe Hell BL", R::Bomb(2)),
        ("Pipe Hell BL", "Pipe Hell L", screw()),
        ("Pipe Hell BR", "Pipe Hell R", screw()),
        ("Pipe Hell BR", "Pipe Hell L", R::Morph),
        ("Pipe Hell L", "Pipe Hell R", R::Bomb(1)),
        (
            "Pipe Hell R",
            "Screw Attack",
            and([screw(), R::Schmove, R::BallAccess]),
        ),
        ("Pipe Hell R", "Underwater Distro Connection", R::MorphUppies),
        ("Serris", "Ice Beam", and([ice_beam(), R::Morph])),
        ("Fast Travel", "Golden Temple", and([R::Morph, screw()])),
        ("Fast Travel", "Complex Sand", and([R::Morph, screw()])),
        ("Fast Travel", "The Tower", and([R::Morph, screw()])),
        (
            "Fast Travel",
            "Gravity",
            and([R::Morph, gravity(), space_jump()]),
        ),
        ("Pipe Hell L", "Fast Travel", screw()),
        ("Fast Travel", "Underwater Distribution Center", R::BallAccess),
        (
            "Gravity",
            "Pipe Hell Outside",
            and([R::Morph, gravity(), space_jump()]),
        ),
        ("Pipe Hell Outside", "Pipe Hell R", R::BallAccess),
        (
            "Deep Caves",
            "Omega Nest",
            and([
                or([R::PowerBombs(1), screw()]),
                ice_beam(),
                R::MorphUppies,
                R::Bomb(1),
            ]),
        ),
        (
            "Omega Nest",
            "The Lab",
            and([
                or([R::WallJump, speed()]),
                R::Bomb(1),
                R::Fly,
                R::Metroids,
            ]),
        ),
        (
            "The Lab",
            "Research Station",
            and([item(Item::IceBeam), R::Ammo(10), space_jump(), R::Bomb(1)]),
        ),
    ];

    for (from, to, req) in rules {
        registry.set_entrance(&entrance_name(from, to), req)?;
    }
    Ok(())
}

fn set_ungated(registry: &mut RuleRegistry, names: &[&str]) -> Result<()> {
    for &name in names {
        registry.set_location(name, R::Free)?;
    }
    Ok(())
}

fn set_gated(registry: &mut RuleRegistry, rules: Vec<(&str, Requirement)>) -> Result<()> {
    for (name, req) in rules {
        registry.set_location(name, req)?;
    }
    Ok(())
}

pub fn set_location_rules_easy(registry: &mut RuleRegistry) -> Result<()> {
    let speed = || item(Item::SpeedBooster);
    let rules = vec![
        (
            "Main Caves: Spider Ball Challenge Upper",
            and([
                R::Bomb(2),
                or([R::Fly, and([R::SpiderBall, item(Item::Bombs)])]),
            ]),
        ),
        ("Main Caves: Spider Ball Challenge Lower", R::Bomb(2)),
        ("Main Caves: Hi-Jump Challenge", and([R::Bomb(1), R::HighJump])),
        ("Main Caves: Spiky Maze", R::Morph),
        ("Main Caves: Shinespark Before The Pit", speed()),
        ("Main Caves: Shinespark After The Pit", speed()),
        ("Golden Temple: Bombs", R::RedDoor),
        ("Golden Temple: Below Bombs", and([R::Bomb(1), R::RedDoor])),
        ("Golden Temple: Hidden Energy Tank", R::Bomb(1)),
        ("Golden Temple: Charge Beam", R::RedDoor),
        ("Golden Temple: Armory Upper", R::MorphUppies),
        (
            "Golden Temple: Armory False Wall",
            and([R::Bomb(2), R::MorphUppies]),
        ),
        ("Golden Temple: 3-Orb Hallway Middle", R::MorphUppies),
    ];
    set_gated(registry, rules)?;
    set_ungated(registry, &EASY_UNGATED_LOCATIONS)?;
    set_ungated(registry, &UNGATED_LOCATIONS)
}

pub fn set_location_rules_normal(registry: &mut RuleRegistry) -> Result<()> {
    let speed = || item(Item::SpeedBooster);
    let screw = || item(Item::ScrewAttack);
    let emp = || item(Item::Emp);
    let spider_or_fly = || or([R::SpiderOrFly, R::Fly]);
    // Hydro Nest is flooded until Gravity.
    let survive_water = || or([R::Energy(1), item(Item::GravitySuit)]);

    let rules = vec![
        (
            "Main Caves: Spider Ball Challenge Upper",
            and([R::Fly, R::Bomb(1)]),
        ),
        ("Main Caves: Spider Ball Challenge Lower", R::Bomb(2)),
        ("Main Caves: Hi-Jump Challenge", and([R::Bomb(1), R::HighJump])),
        ("Main Caves: Spiky Maze", R::Morph),
        ("Main Caves: Shinespark Before The Pit", speed()),
        ("Main Caves: Shinespark After The Pit", speed()),
        ("Golden Temple: Bombs", R::RedDoor),
        ("Golden Temple: Below Bombs", and([R::RedDoor, R::Bomb(1)])),
        ("Golden Temple: Hidden Energy Tank", R::Bomb(1)),
        ("Golden Temple: Charge Beam", and([R::RedDoor, R::Morph])),
        ("Golden Temple: Armory Upper", R::MorphUppies),
        ("Golden Temple: Armory False Wall", R::Bomb(2)),
        ("Golden Temple: 3-Orb Hallway Left", R::Morph),
        ("Golden Temple: 3-Orb Hallway Middle", R::MorphUppies),
        ("Golden Temple: 3-Orb Hallway Right", R::Morph),
        ("Golden Temple: Spider Ball", R::Morph),
        ("Golden Temple: Exterior Ceiling", spider_or_fly()),
        (
            "Golden Temple: EMP Room",
            and([
                emp(),
                R::BallAccess,
                R::Ballspark,
                screw(),
                R::Supers(1),
                R::Bomb(2),
            ]),
        ),
        ("Guardian: Up Above", and([spider_or_fly(), R::Bomb(1)])),
        (
            "Guardian: Behind The Door",
            and([spider_or_fly(), R::PowerBombs(1)]),
        ),
        ("Hydro Station: Cliff", R::Morph),
        ("Hydro Station: Side Morph Tunnel", R::Morph),
        ("Hydro Station: Turbine Room", R::Bomb(1)),
        (
            "Hydro Station: Not so Secret Tunnel",
            and([spider_or_fly(), R::Morph]),
        ),
        ("Hydro Station: Water Pressure Pre-Varia", R::Bomb(2)),
        ("Hydro Station: Varia Suit", and([R::Bomb(2), R::RedDoor])),
        (
            "Hydro Station: EMP Room",
            and([emp(), R::BallAccess, speed(), R::Supers(1)]),
        ),
        ("Arachnus: Boss", R::Bomb(2)),
        ("Hydro Station: Wave Beam", R::Bomb(2)),
        (
            "Hydro Station: Below Tower Pipe Upper",
            and([R::Bomb(1), R::Schmove]),
        ),
        ("Hydro Station: Below Tower Pipe Lower", R::Bomb(2)),
        ("Hydro Station: Dead End", R::Bomb(1)),
        (
            "Hydro Station: Behind Hi-Jump Boots Upper",
            and([R::Bomb(2), R::Schmove]),
        ),
        ("Hydro Station: Behind Hi-Jump Boots Lower", R::Bomb(1)),
        (
            "Hydro Nest: Below the Walkway",
            and([R::Bomb(2), survive_water()]),
        ),
        ("Hydro Nest: Speed Ceiling", and([speed(), survive_water()])),
        (
            "Hydro Nest: Behind The Wall",
            and([speed(), R::PowerBombs(1), survive_water()]),
        ),
        (
            "Industrial Complex: EMP Room",
            and([emp(), R::PowerBombs(1), R::Supers(1)]),
        ),
        (
            "Industrial Complex Nest: Nest Shinespark",
            and([speed(), R::Bomb(1), R::Schmove]),
        ),
        (
            "Industrial Complex: Complex Side After Tunnel",
            and([R::Schmove, R::Morph, R::RedDoor]),
        ),
        (
            "Industrial Complex: Complex Side Tunnel",
            and([R::Schmove, R::Bomb(1), R::RedDoor]),
        ),
        (
            "Industrial Complex: Behind the Green Door",
            and([R::Supers(1), R::PowerBombs(1), speed()]),
        ),
        ("Industrial Complex: Save Room", R::Schmove),
        ("Industrial Complex: Spazer Beam", R::RedDoor),
        ("Industrial Complex: Sisyphus Spark", speed()),
        (
            "Industrial Complex: Speed Booster",
            and([R::RedDoor, or([speed(), R::Bomb(2)])]),
        ),
        ("Torizo Ascended: Boss", R::Schmove),
        ("Industrial Complex: Conveyor Belt Room", R::Morph),
        ("Industrial Complex: Doom Treadmill", R::Bomb(1)),
        (
            "Industrial Complex: Complex Hub Shinespark",
            and([R::Bomb(1), R::MorphUppies]),
        ),
        (
            "Industrial Complex: Complex Hub in the Floor",
            and([R::Bomb(1), R::MorphUppies, R::Supers(1)]),
        ),
        (
            "Industrial Complex: Skippy Reward",
            and([R::Bomb(1), R::MorphUppies, R::Supers(4)]),
        ),
    ];
    set_gated(registry, rules)?;
    set_ungated(registry, &NORMAL_UNGATED_LOCATIONS)?;
    set_ungated(registry, &UNGATED_LOCATIONS)
}

/// Hard logic places no requirement on any location; region access still applies.
pub fn set_location_rules_hard(registry: &mut RuleRegistry, game_data: &GameData) -> Result<()> {
    for name in &game_data.location_isv.keys {
        registry.set_location(name, R::Free)?;
    }
    Ok(())
}

pub fn set_location_rules(
    difficulty: LogicDifficulty,
    registry: &mut RuleRegistry,
    game_data: &GameData,
) -> Result<()> {
    match difficulty {
        LogicDifficulty::Easy => set_location_rules_easy(registry),
        LogicDifficulty::Normal => set_location_rules_normal(registry),
        LogicDifficulty::Hard => set_location_rules_hard(registry, game_data),
    }
}
