//! Monster names that slays and brands may refer to.
//!
//! Monster data is compiled elsewhere; slay and brand records only need to
//! know whether a race flag or a monster base exists.

/// Answers whether monster race flags and monster bases exist.
pub trait MonsterVocabulary {
    fn is_race_flag(&self, name: &str) -> bool;
    fn is_monster_base(&self, name: &str) -> bool;
}

/// Race flags known to the default vocabulary.
pub const RACE_FLAGS: &[&str] = &[
    "UNIQUE", "QUESTOR", "MALE", "FEMALE", "GROUP_AI", "NAME_COMMA", "ORC", "TROLL", "GIANT",
    "DRAGON", "DEMON", "UNDEAD", "EVIL", "ANIMAL", "METAL", "NONLIVING", "HURT_LIGHT",
    "HURT_ROCK", "HURT_FIRE", "HURT_COLD", "IM_ACID", "IM_ELEC", "IM_FIRE", "IM_COLD", "IM_POIS",
    "IM_NETHER", "IM_WATER", "IM_PLASMA", "IM_NEXUS", "IM_DISEN", "NO_FEAR", "NO_STUN",
    "NO_CONF", "NO_SLEEP", "NO_HOLD",
];

/// Monster bases known to the default vocabulary.
pub const MONSTER_BASES: &[&str] = &[
    "ant", "bat", "bird", "canine", "centipede", "demon", "dragon", "eye", "feline", "ghost",
    "giant", "golem", "hybrid", "hydra", "icky", "jelly", "kobold", "lich", "mold", "mummy",
    "naga", "orc", "person", "quylthulg", "reptile", "rodent", "snake", "spider", "troll",
    "vampire", "vortex", "wight", "worm", "yeek", "zombie",
];

/// Vocabulary backed by static name lists.
#[derive(Clone, Copy, Debug)]
pub struct StaticMonsters {
    race_flags: &'static [&'static str],
    bases: &'static [&'static str],
}

impl StaticMonsters {
    pub const fn new(race_flags: &'static [&'static str], bases: &'static [&'static str]) -> Self {
        Self { race_flags, bases }
    }
}

impl Default for StaticMonsters {
    fn default() -> Self {
        Self::new(RACE_FLAGS, MONSTER_BASES)
    }
}

impl MonsterVocabulary for StaticMonsters {
    fn is_race_flag(&self, name: &str) -> bool {
        self.race_flags.contains(&name)
    }

    fn is_monster_base(&self, name: &str) -> bool {
        self.bases.contains(&name)
    }
}
