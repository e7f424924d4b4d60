use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const STANDARD_BOARD_SIZE: i8 = 8;
pub const INTERNATIONAL_BOARD_SIZE: i8 = 10;
pub const CANADIAN_BOARD_SIZE: i8 = 12;

/// The national rule sets that are supported.
///
/// The discriminants are the numeric identifiers used by configuration
/// files and user interfaces.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Variant {
    #[default]
    American = 0,
    International = 1,
    Brazilian = 2,
    Canadian = 3,
    Pool = 4,
    Spanish = 5,
    Russian = 6,
    Italian = 7,
    Suicide = 8,
    Ghanaian = 9,
}

pub static ALL_VARIANTS: [Variant; 10] = [
    Variant::American,
    Variant::International,
    Variant::Brazilian,
    Variant::Canadian,
    Variant::Pool,
    Variant::Spanish,
    Variant::Russian,
    Variant::Italian,
    Variant::Suicide,
    Variant::Ghanaian,
];

/// How a game of a given variant is won.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VictoryCondition {
    /// Capture or block all enemy pieces.
    CaptureAll,
    /// Like [`VictoryCondition::CaptureAll`], but three kings against one king
    /// must win within a fixed number of moves or the game is drawn.
    PoolSpecial,
    /// Currently evaluated like [`VictoryCondition::CaptureAll`].
    RussianSpecial,
    /// The first player to lose all their pieces wins.
    SuicideSpecial,
    /// The first player reduced to a single piece loses.
    GhanaianSpecial,
}

/// The complete set of rule flags for one variant.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleSet {
    pub variant: Variant,
    /// The number of squares along one side of the board.
    ///
    /// The rules engine is only meant for the sizes of the built-in
    /// variants: 8, 10 or 12.
    pub board_size: i8,
    /// Kings may move and capture over any distance along a clear diagonal.
    pub can_kings_fly: bool,
    pub can_pawns_jump_backwards: bool,
    pub light_player_first: bool,
    /// The playable squares are on the other checker color.
    pub mirrored_board: bool,
    pub must_capture: bool,
    /// Only captures that start the longest available capture chain are legal.
    pub must_capture_maximum: bool,
    pub victory_condition: VictoryCondition,
}

pub const AMERICAN: RuleSet = RuleSet {
    variant: Variant::American,
    board_size: STANDARD_BOARD_SIZE,
    can_kings_fly: false,
    can_pawns_jump_backwards: false,
    light_player_first: false,
    mirrored_board: false,
    must_capture: true,
    must_capture_maximum: false,
    victory_condition: VictoryCondition::CaptureAll,
};

pub const INTERNATIONAL: RuleSet = RuleSet {
    variant: Variant::International,
    board_size: INTERNATIONAL_BOARD_SIZE,
    can_kings_fly: true,
    can_pawns_jump_backwards: true,
    light_player_first: true,
    mirrored_board: false,
    must_capture: true,
    must_capture_maximum: true,
    victory_condition: VictoryCondition::CaptureAll,
};

pub const BRAZILIAN: RuleSet = RuleSet {
    variant: Variant::Brazilian,
    board_size: STANDARD_BOARD_SIZE,
    can_kings_fly: true,
    can_pawns_jump_backwards: true,
    light_player_first: true,
    mirrored_board: false,
    must_capture: true,
    must_capture_maximum: true,
    victory_condition: VictoryCondition::CaptureAll,
};

pub const CANADIAN: RuleSet = RuleSet {
    variant: Variant::Canadian,
    board_size: CANADIAN_BOARD_SIZE,
    can_kings_fly: true,
    can_pawns_jump_backwards: true,
    light_player_first: true,
    mirrored_board: false,
    must_capture: true,
    must_capture_maximum: false,
    victory_condition: VictoryCondition::CaptureAll,
};

pub const POOL: RuleSet = RuleSet {
    variant: Variant::Pool,
    board_size: STANDARD_BOARD_SIZE,
    can_kings_fly: true,
    can_pawns_jump_backwards: true,
    light_player_first: false,
    mirrored_board: false,
    must_capture: true,
    must_capture_maximum: false,
    victory_condition: VictoryCondition::PoolSpecial,
};

pub const SPANISH: RuleSet = RuleSet {
    variant: Variant::Spanish,
    board_size: STANDARD_BOARD_SIZE,
    can_kings_fly: true,
    can_pawns_jump_backwards: false,
    light_player_first: true,
    mirrored_board: true,
    must_capture: true,
    must_capture_maximum: true,
    victory_condition: VictoryCondition::CaptureAll,
};

pub const RUSSIAN: RuleSet = RuleSet {
    variant: Variant::Russian,
    board_size: STANDARD_BOARD_SIZE,
    can_kings_fly: true,
    can_pawns_jump_backwards: true,
    light_player_first: true,
    mirrored_board: false,
    must_capture: true,
    must_capture_maximum: false,
    victory_condition: VictoryCondition::RussianSpecial,
};

// TODO: Italian pawns may not capture kings, and the capture taking the most
// kings has priority. Neither is modelled yet.
pub const ITALIAN: RuleSet = RuleSet {
    variant: Variant::Italian,
    board_size: STANDARD_BOARD_SIZE,
    can_kings_fly: true,
    can_pawns_jump_backwards: false,
    light_player_first: true,
    mirrored_board: true,
    must_capture: true,
    must_capture_maximum: true,
    victory_condition: VictoryCondition::CaptureAll,
};

pub const SUICIDE: RuleSet = RuleSet {
    variant: Variant::Suicide,
    board_size: STANDARD_BOARD_SIZE,
    can_kings_fly: true,
    can_pawns_jump_backwards: true,
    light_player_first: true,
    mirrored_board: false,
    must_capture: true,
    must_capture_maximum: true,
    victory_condition: VictoryCondition::SuicideSpecial,
};

pub const GHANAIAN: RuleSet = RuleSet {
    variant: Variant::Ghanaian,
    board_size: INTERNATIONAL_BOARD_SIZE,
    can_kings_fly: true,
    can_pawns_jump_backwards: true,
    light_player_first: true,
    mirrored_board: true,
    must_capture: true,
    must_capture_maximum: false,
    victory_condition: VictoryCondition::GhanaianSpecial,
};

/// Looks up the rules for a numeric variant identifier.
///
/// Never fails: unknown and negative identifiers get the American rules.
pub fn resolve(variant_id: i32) -> RuleSet {
    Variant::from_id(variant_id)
        .unwrap_or(Variant::American)
        .rules()
}

impl Variant {
    pub fn from_id(variant_id: i32) -> Option<Variant> {
        u8::try_from(variant_id)
            .ok()
            .and_then(|id| ALL_VARIANTS.get(id as usize))
            .copied()
    }

    pub fn id(self) -> i32 {
        self as i32
    }

    pub fn rules(self) -> RuleSet {
        match self {
            Variant::American => AMERICAN,
            Variant::International => INTERNATIONAL,
            Variant::Brazilian => BRAZILIAN,
            Variant::Canadian => CANADIAN,
            Variant::Pool => POOL,
            Variant::Spanish => SPANISH,
            Variant::Russian => RUSSIAN,
            Variant::Italian => ITALIAN,
            Variant::Suicide => SUICIDE,
            Variant::Ghanaian => GHANAIAN,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::American => "american",
            Variant::International => "international",
            Variant::Brazilian => "brazilian",
            Variant::Canadian => "canadian",
            Variant::Pool => "pool",
            Variant::Spanish => "spanish",
            Variant::Russian => "russian",
            Variant::Italian => "italian",
            Variant::Suicide => "suicide",
            Variant::Ghanaian => "ghanaian",
        }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        AMERICAN
    }
}

impl From<Variant> for RuleSet {
    fn from(variant: Variant) -> Self {
        variant.rules()
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The error type for the [`FromStr`] instance of [`Variant`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl std::error::Error for UnknownVariant {}

impl std::fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown checkers variant '{}'", self.0)
    }
}

/// Accepts either the lowercase name or the numeric identifier.
impl FromStr for Variant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(id) = s.parse::<i32>() {
            return Variant::from_id(id).ok_or_else(|| UnknownVariant(s.to_string()));
        }
        ALL_VARIANTS
            .iter()
            .copied()
            .find(|variant| variant.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl RuleSet {
    /// Is one capture currently enough, or must the longest chain be taken?
    pub(crate) fn ranks_captures(&self) -> bool {
        self.must_capture && self.must_capture_maximum
    }
}
