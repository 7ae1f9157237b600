//! Value domain shared by behavior programs and the simulation.
//!
//! At runtime every value is a bare `u32` word; these enums give the words
//! their meaning. The validator tracks which [`ValueKind`] each stack slot
//! holds so the interpreter can reinterpret words without checks.

/// Movement direction of the snake head.
///
/// Encoded clockwise starting at `Up`. [`DIRECTION_COUNT`] doubles as the
/// "no previous direction" marker handed to programs before the first move.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
#[repr(u32)]
pub enum Direction {
    #[default]
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

/// Number of [`Direction`] values.
pub const DIRECTION_COUNT: u32 = 4;

impl Direction {
    /// Decodes a runtime word; `None` for out-of-range words.
    pub fn from_word(word: u32) -> Option<Self> {
        Self::from_repr(word)
    }

    pub const fn word(self) -> u32 {
        self as u32
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }

    /// Grid step for one move; `y` grows downward.
    pub const fn delta(self) -> (i64, i64) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }
}

/// Speed modifier applied to the snake.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
#[repr(u32)]
pub enum Acceleration {
    #[default]
    Default = 0,
    Down = 1,
    Up = 2,
}

/// Number of [`Acceleration`] values.
pub const ACCELERATION_COUNT: u32 = 3;

impl Acceleration {
    pub fn from_word(word: u32) -> Option<Self> {
        Self::from_repr(word)
    }

    pub const fn word(self) -> u32 {
        self as u32
    }

    /// Swaps `Down` and `Up`; `Default` stays.
    pub const fn opposite(self) -> Self {
        match self {
            Acceleration::Default => Acceleration::Default,
            Acceleration::Down => Acceleration::Up,
            Acceleration::Up => Acceleration::Down,
        }
    }
}

/// A tube with two exits, named by its sides.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
#[repr(u32)]
pub enum DoubleDirection {
    UpRight = 0,
    UpDown = 1,
    UpLeft = 2,
    RightDown = 3,
    RightLeft = 4,
    DownLeft = 5,
}

/// Number of [`DoubleDirection`] values.
pub const DOUBLE_DIRECTION_COUNT: u32 = 6;

impl DoubleDirection {
    pub fn from_word(word: u32) -> Option<Self> {
        Self::from_repr(word)
    }

    pub const fn word(self) -> u32 {
        self as u32
    }

    /// The two open sides of the tube.
    pub const fn exits(self) -> (Direction, Direction) {
        use Direction::*;
        match self {
            DoubleDirection::UpRight => (Up, Right),
            DoubleDirection::UpDown => (Up, Down),
            DoubleDirection::UpLeft => (Up, Left),
            DoubleDirection::RightDown => (Right, Down),
            DoubleDirection::RightLeft => (Right, Left),
            DoubleDirection::DownLeft => (Down, Left),
        }
    }

    pub fn is_exit(self, direction: Direction) -> bool {
        let (first, second) = self.exits();
        first == direction || second == direction
    }
}

/// Two tubes sharing one cell.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
    strum::FromRepr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
#[repr(u32)]
pub enum CombinedDirection {
    /// Up–Right and Down–Left.
    UpRightDownLeft = 0,
    /// Up–Down and Right–Left.
    Cross = 1,
    /// Up–Left and Right–Down.
    UpLeftRightDown = 2,
}

/// Number of [`CombinedDirection`] values.
pub const COMBINED_DIRECTION_COUNT: u32 = 3;

impl CombinedDirection {
    pub fn from_word(word: u32) -> Option<Self> {
        Self::from_repr(word)
    }

    pub const fn word(self) -> u32 {
        self as u32
    }

    pub const fn tubes(self) -> [DoubleDirection; 2] {
        match self {
            CombinedDirection::UpRightDownLeft => {
                [DoubleDirection::UpRight, DoubleDirection::DownLeft]
            }
            CombinedDirection::Cross => [DoubleDirection::UpDown, DoubleDirection::RightLeft],
            CombinedDirection::UpLeftRightDown => {
                [DoubleDirection::UpLeft, DoubleDirection::RightDown]
            }
        }
    }

    /// Direction the snake leaves the cell in after entering while moving `moving`.
    ///
    /// The snake enters through side `moving.opposite()` and leaves through
    /// the other side of the tube that owns that side.
    pub fn exit(self, moving: Direction) -> Direction {
        let entry = moving.opposite();
        for tube in self.tubes() {
            let (first, second) = tube.exits();
            if first == entry {
                return second;
            }
            if second == entry {
                return first;
            }
        }
        // every side belongs to exactly one tube
        moving
    }
}

/// Static type of a stack slot, tracked only while validating.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueKind {
    Integer,
    Direction,
    Acceleration,
    DoubleDirection,
    CombinedDirection,
}

/// Interpretation of the per-cell parameter word a program reads.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParameterKind {
    #[default]
    NoParameter,
    Acceleration,
    Direction,
    DoubleDirection,
    CombinedDirection,
}

impl ParameterKind {
    /// Whether `word` decodes to a value of this kind.
    pub fn accepts(self, word: u32) -> bool {
        match self {
            ParameterKind::NoParameter => true,
            ParameterKind::Acceleration => word < ACCELERATION_COUNT,
            ParameterKind::Direction => word < DIRECTION_COUNT,
            ParameterKind::DoubleDirection => word < DOUBLE_DIRECTION_COUNT,
            ParameterKind::CombinedDirection => word < COMBINED_DIRECTION_COUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn counts_match_variants() {
        assert_eq!(Direction::iter().count() as u32, DIRECTION_COUNT);
        assert_eq!(Acceleration::iter().count() as u32, ACCELERATION_COUNT);
        assert_eq!(DoubleDirection::iter().count() as u32, DOUBLE_DIRECTION_COUNT);
        assert_eq!(
            CombinedDirection::iter().count() as u32,
            COMBINED_DIRECTION_COUNT
        );
    }

    #[test]
    fn opposites_are_involutions() {
        for direction in Direction::iter() {
            assert_ne!(direction.opposite(), direction);
            assert_eq!(direction.opposite().opposite(), direction);
        }
        for acceleration in Acceleration::iter() {
            assert_eq!(acceleration.opposite().opposite(), acceleration);
        }
        assert_eq!(Acceleration::Default.opposite(), Acceleration::Default);
    }

    #[test]
    fn tube_exits() {
        assert_eq!(
            DoubleDirection::UpDown.exits(),
            (Direction::Up, Direction::Down)
        );
        assert!(DoubleDirection::RightDown.is_exit(Direction::Down));
        assert!(!DoubleDirection::RightDown.is_exit(Direction::Up));
    }

    #[test]
    fn combined_tubes_cover_every_side_once() {
        for combined in CombinedDirection::iter() {
            for side in Direction::iter() {
                let owners = combined
                    .tubes()
                    .iter()
                    .filter(|tube| tube.is_exit(side))
                    .count();
                assert_eq!(owners, 1, "{combined} side {side}");
            }
        }
    }

    #[test]
    fn combined_exit_routes() {
        assert_eq!(CombinedDirection::Cross.exit(Direction::Left), Direction::Left);
        // moving Down enters through the Up side, Up–Right tube leads Right
        assert_eq!(
            CombinedDirection::UpRightDownLeft.exit(Direction::Down),
            Direction::Right
        );
        assert_eq!(
            CombinedDirection::UpRightDownLeft.exit(Direction::Left),
            Direction::Up
        );
        assert_eq!(
            CombinedDirection::UpLeftRightDown.exit(Direction::Right),
            Direction::Up
        );
        assert_eq!(
            CombinedDirection::UpLeftRightDown.exit(Direction::Up),
            Direction::Right
        );
    }

    #[test]
    fn words_round_trip_through_repr() {
        assert_eq!(Direction::from_word(2), Some(Direction::Down));
        assert_eq!(Direction::from_word(DIRECTION_COUNT), None);
        assert_eq!(Acceleration::from_word(2), Some(Acceleration::Up));
        assert!(ParameterKind::DoubleDirection.accepts(5));
        assert!(!ParameterKind::DoubleDirection.accepts(6));
        assert!(ParameterKind::NoParameter.accepts(u32::MAX));
        assert_eq!(<&'static str>::from(ValueKind::DoubleDirection), "DoubleDirection");
    }
}
