//! Built-in teams so the arena runs with zero external files.

use arena_engine::{EffectKind, ElementType};

use crate::spec::{AttackSpec, FighterSpec, TeamSpec};

fn attack(name: &str, cost: u8, damage: u32, description: &str) -> AttackSpec {
    AttackSpec {
        name: name.into(),
        energy_cost: cost,
        damage,
        effect: None,
        description: description.into(),
    }
}

fn attack_with(
    name: &str,
    cost: u8,
    damage: u32,
    effect: (EffectKind, u32),
    description: &str,
) -> AttackSpec {
    AttackSpec {
        effect: Some(effect),
        ..attack(name, cost, damage, description)
    }
}

fn fighter(
    name: &str,
    element: ElementType,
    max_hp: u32,
    weakness: ElementType,
    retreat_cost: u8,
    catchphrase: &str,
    attacks: Vec<AttackSpec>,
) -> FighterSpec {
    FighterSpec {
        name: name.into(),
        element,
        max_hp,
        weakness,
        retreat_cost,
        catchphrase: catchphrase.into(),
        attacks,
    }
}

/// The fallback team assigned to participants that register without one.
pub fn default_team() -> TeamSpec {
    TeamSpec {
        team_name: "Default Team".into(),
        personality: "A balanced fighter.".into(),
        fighters: vec![fighter(
            "Starter",
            ElementType::Normal,
            100,
            ElementType::Fighting,
            1,
            "Let's go!",
            vec![
                attack("Strike", 1, 30, "Basic attack."),
                attack("Power Hit", 2, 60, "Strong attack."),
            ],
        )],
    }
}

/// All built-in teams, one per broad element theme.
pub fn builtin_teams() -> Vec<TeamSpec> {
    vec![
        TeamSpec {
            team_name: "Cinder Court".into(),
            personality: "Reckless aggression, all tempo, no patience.".into(),
            fighters: vec![
                fighter(
                    "Emberclaw",
                    ElementType::Fire,
                    100,
                    ElementType::Water,
                    1,
                    "Everything burns eventually.",
                    vec![
                        attack("Flame Rake", 1, 30, "Raking claws wreathed in fire."),
                        attack_with(
                            "Cinder Storm",
                            3,
                            50,
                            (EffectKind::Burn, 10),
                            "A whirl of stinging sparks.",
                        ),
                    ],
                ),
                fighter(
                    "Ashwing",
                    ElementType::Fire,
                    80,
                    ElementType::Water,
                    1,
                    "Catch me first.",
                    vec![
                        attack("Dive Scorch", 1, 25, "A strafing burn from above."),
                        attack("Pyre Dance", 2, 45, "Spiraling trails of flame."),
                    ],
                ),
                fighter(
                    "Magmarok",
                    ElementType::Fire,
                    130,
                    ElementType::Water,
                    3,
                    "Slow is fine. Lava is slow.",
                    vec![attack("Molten Slam", 2, 55, "A crushing, glowing fist.")],
                ),
            ],
        },
        TeamSpec {
            team_name: "Tidal Vanguard".into(),
            personality: "Patient, defensive, punishes overreach.".into(),
            fighters: vec![
                fighter(
                    "Tidecaller",
                    ElementType::Water,
                    100,
                    ElementType::Grass,
                    1,
                    "The tide decides.",
                    vec![
                        attack("Riptide", 1, 25, "A dragging current."),
                        attack_with(
                            "Renewing Spring",
                            2,
                            15,
                            (EffectKind::Heal, 25),
                            "Soothing waters close old wounds.",
                        ),
                    ],
                ),
                fighter(
                    "Frostmaw",
                    ElementType::Water,
                    110,
                    ElementType::Electric,
                    2,
                    "Cold teeth, colder heart.",
                    vec![
                        attack("Glacier Bite", 2, 45, "Jaws of packed ice."),
                        attack_with(
                            "Numbing Spray",
                            1,
                            20,
                            (EffectKind::Paralyze, 0),
                            "A chilling mist.",
                        ),
                    ],
                ),
                fighter(
                    "Coralhide",
                    ElementType::Water,
                    120,
                    ElementType::Grass,
                    2,
                    "Break yourself on me.",
                    vec![attack_with(
                        "Reef Guard",
                        1,
                        15,
                        (EffectKind::Shield, 10),
                        "A wall of living coral.",
                    )],
                ),
            ],
        },
        TeamSpec {
            team_name: "Verdant Circle".into(),
            personality: "Attrition and regrowth; wins long games.".into(),
            fighters: vec![
                fighter(
                    "Thornweaver",
                    ElementType::Grass,
                    90,
                    ElementType::Fire,
                    1,
                    "Every cut feeds the roots.",
                    vec![
                        attack("Bramble Lash", 1, 25, "A whipping vine of thorns."),
                        attack_with(
                            "Sap Siphon",
                            2,
                            20,
                            (EffectKind::Heal, 20),
                            "Drains vitality back into the weave.",
                        ),
                    ],
                ),
                fighter(
                    "Oakenshield",
                    ElementType::Grass,
                    140,
                    ElementType::Fire,
                    3,
                    "Stand behind me.",
                    vec![attack("Timber Crush", 2, 50, "A falling-tree blow.")],
                ),
                fighter(
                    "Sporeling",
                    ElementType::Grass,
                    70,
                    ElementType::Fire,
                    1,
                    "Achoo!",
                    vec![
                        attack("Spore Puff", 1, 20, "A cloud of itching spores."),
                        attack("Fungal Burst", 2, 40, "A sudden bloom of force."),
                    ],
                ),
            ],
        },
        TeamSpec {
            team_name: "Storm Chorus".into(),
            personality: "Glass cannons chasing the perfect opening.".into(),
            fighters: vec![
                fighter(
                    "Voltrix",
                    ElementType::Electric,
                    80,
                    ElementType::Fighting,
                    1,
                    "Blink and you missed it.",
                    vec![
                        attack("Arc Snap", 1, 30, "A crackling discharge."),
                        attack_with(
                            "Overcharge",
                            3,
                            60,
                            (EffectKind::EnergyBoost, 1),
                            "Everything, all at once.",
                        ),
                    ],
                ),
                fighter(
                    "Thunderhoof",
                    ElementType::Electric,
                    110,
                    ElementType::Fighting,
                    2,
                    "Hear that? Too late.",
                    vec![attack("Stampede Bolt", 2, 45, "A charging strike of lightning.")],
                ),
                fighter(
                    "Nimbus",
                    ElementType::Psychic,
                    90,
                    ElementType::Dark,
                    1,
                    "I dreamed this fight already.",
                    vec![
                        attack("Mind Spike", 1, 25, "A needle of pure thought."),
                        attack("Null Pulse", 2, 40, "A silent concussive wave."),
                    ],
                ),
            ],
        },
    ]
}
