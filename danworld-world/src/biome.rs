use danworld_util::strip_namespace;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;
use serde::{Deserialize, Serialize};

/// Biome classification with its fixed on-disk code.
///
/// The discriminants are the codes, assigned alphabetically once and never renumbered.
/// New variants must only ever be appended.
#[derive(FromPrimitive, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Biome {
    Badlands = 0,
    BambooJungle = 1,
    BasaltDeltas = 2,
    Beach = 3,
    BirchForest = 4,
    CherryGrove = 5,
    ColdOcean = 6,
    CrimsonForest = 7,
    DarkForest = 8,
    DeepColdOcean = 9,
    DeepDark = 10,
    DeepFrozenOcean = 11,
    DeepLukewarmOcean = 12,
    DeepOcean = 13,
    Desert = 14,
    DripstoneCaves = 15,
    EndBarrens = 16,
    EndHighlands = 17,
    EndMidlands = 18,
    ErodedBadlands = 19,
    FlowerForest = 20,
    Forest = 21,
    FrozenOcean = 22,
    FrozenPeaks = 23,
    FrozenRiver = 24,
    Grove = 25,
    IceSpikes = 26,
    JaggedPeaks = 27,
    Jungle = 28,
    LukewarmOcean = 29,
    LushCaves = 30,
    MangroveSwamp = 31,
    Meadow = 32,
    MushroomFields = 33,
    NetherWastes = 34,
    Ocean = 35,
    OldGrowthBirchForest = 36,
    OldGrowthPineTaiga = 37,
    OldGrowthSpruceTaiga = 38,
    Plains = 39,
    River = 40,
    Savanna = 41,
    SavannaPlateau = 42,
    SmallEndIslands = 43,
    SnowyBeach = 44,
    SnowyPlains = 45,
    SnowySlopes = 46,
    SnowyTaiga = 47,
    SoulSandValley = 48,
    SparseJungle = 49,
    StonyPeaks = 50,
    StonyShore = 51,
    SunflowerPlains = 52,
    Swamp = 53,
    Taiga = 54,
    TheEnd = 55,
    TheVoid = 56,
    WarmOcean = 57,
    WarpedForest = 58,
    WindsweptForest = 59,
    WindsweptGravellyHills = 60,
    WindsweptHills = 61,
    WindsweptSavanna = 62,
    WoodedBadlands = 63,
}

const NAMES: [&str; 64] = [
    "badlands",
    "bamboo_jungle",
    "basalt_deltas",
    "beach",
    "birch_forest",
    "cherry_grove",
    "cold_ocean",
    "crimson_forest",
    "dark_forest",
    "deep_cold_ocean",
    "deep_dark",
    "deep_frozen_ocean",
    "deep_lukewarm_ocean",
    "deep_ocean",
    "desert",
    "dripstone_caves",
    "end_barrens",
    "end_highlands",
    "end_midlands",
    "eroded_badlands",
    "flower_forest",
    "forest",
    "frozen_ocean",
    "frozen_peaks",
    "frozen_river",
    "grove",
    "ice_spikes",
    "jagged_peaks",
    "jungle",
    "lukewarm_ocean",
    "lush_caves",
    "mangrove_swamp",
    "meadow",
    "mushroom_fields",
    "nether_wastes",
    "ocean",
    "old_growth_birch_forest",
    "old_growth_pine_taiga",
    "old_growth_spruce_taiga",
    "plains",
    "river",
    "savanna",
    "savanna_plateau",
    "small_end_islands",
    "snowy_beach",
    "snowy_plains",
    "snowy_slopes",
    "snowy_taiga",
    "soul_sand_valley",
    "sparse_jungle",
    "stony_peaks",
    "stony_shore",
    "sunflower_plains",
    "swamp",
    "taiga",
    "the_end",
    "the_void",
    "warm_ocean",
    "warped_forest",
    "windswept_forest",
    "windswept_gravelly_hills",
    "windswept_hills",
    "windswept_savanna",
    "wooded_badlands",
];

impl Biome {
    /// Substituted for custom biomes and anything the table does not know
    pub const DEFAULT: Biome = Biome::Plains;

    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Unknown codes decode to [`Biome::DEFAULT`]
    pub fn from_code(code: u8) -> Self {
        Self::from_u8(code).unwrap_or(Self::DEFAULT)
    }

    pub fn name(self) -> &'static str {
        NAMES[self as usize]
    }

    /// Accepts `minecraft:snowy_taiga` as well as `SNOWY_TAIGA`. Custom biomes fall back to
    /// [`Biome::DEFAULT`].
    pub fn from_name(name: &str) -> Self {
        let name = strip_namespace(name);
        NAMES
            .iter()
            .position(|candidate| candidate.eq_ignore_ascii_case(name))
            .and_then(Self::from_usize)
            .unwrap_or(Self::DEFAULT)
    }
}

impl Default for Biome {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::Biome;

    #[test]
    fn codes_are_fixed() {
        assert_eq!(Biome::Badlands.code(), 0);
        assert_eq!(Biome::Plains.code(), 39);
        assert_eq!(Biome::TheVoid.code(), 56);
        assert_eq!(Biome::WoodedBadlands.code(), 63);
    }

    #[test]
    fn every_code_maps_back() {
        for code in 0..64u8 {
            let biome = Biome::from_code(code);
            assert_eq!(biome.code(), code);
            assert_eq!(Biome::from_name(biome.name()), biome);
        }
    }

    #[test]
    fn unknown_falls_back_to_plains() {
        assert_eq!(Biome::from_code(64), Biome::Plains);
        assert_eq!(Biome::from_code(255), Biome::Plains);
        assert_eq!(Biome::from_name("custom"), Biome::Plains);
        assert_eq!(Biome::from_name("mymod:crystal_caves"), Biome::Plains);
    }

    #[test]
    fn names_ignore_case_and_namespace() {
        assert_eq!(Biome::from_name("minecraft:snowy_taiga"), Biome::SnowyTaiga);
        assert_eq!(Biome::from_name("DEEP_DARK"), Biome::DeepDark);
    }
}
