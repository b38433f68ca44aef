//! The difficulty presets offered to the player.
//!
//! The engine itself knows nothing about them: a preset only chooses the field's dimensions and mines amount and gives
//! the game a label to carry into the leaderboard.

use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// All the presets share the same field size.
pub const PRESET_ROWS_AMOUNT: u8 = 10;
pub const PRESET_COLUMNS_AMOUNT: u8 = 10;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("unknown difficulty `{0}`, expected one of: easy, medium, hard")]
pub struct UnknownDifficulty(String);

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// The label stored along with the results.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn mines_amount(self) -> u16 {
        match self {
            Difficulty::Easy => 5,
            Difficulty::Medium => 8,
            Difficulty::Hard => 12,
        }
    }

    /// The field's rows and columns amounts respectively.
    pub fn size(self) -> (u8, u8) {
        (PRESET_ROWS_AMOUNT, PRESET_COLUMNS_AMOUNT)
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|difficulty| difficulty.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownDifficulty(s.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::{Difficulty, UnknownDifficulty};

    #[test]
    fn presets_use_a_ten_by_ten_field() {
        for difficulty in Difficulty::ALL {
            assert_eq!(difficulty.size(), (10, 10));
        }

        assert_eq!(Difficulty::Easy.mines_amount(), 5);
        assert_eq!(Difficulty::Medium.mines_amount(), 8);
        assert_eq!(Difficulty::Hard.mines_amount(), 12);
    }

    #[test]
    fn difficulties_are_parsed_case_insensitively() {
        assert_eq!("easy".parse(), Ok(Difficulty::Easy));
        assert_eq!("MEDIUM".parse(), Ok(Difficulty::Medium));
        assert_eq!(" Hard ".parse(), Ok(Difficulty::Hard));
        assert_eq!(
            "expert".parse::<Difficulty>(),
            Err(UnknownDifficulty("expert".to_string()))
        );
    }
}
