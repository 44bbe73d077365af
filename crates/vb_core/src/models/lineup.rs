use serde::{Deserialize, Serialize};

use crate::error::{MatchError, Result};

/// Court rotation slot. Position 1 is the server (back-right); slots follow
/// the standard volleyball rotation order through the front and back rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[serde(rename_all = "lowercase")]
pub enum Position {
    P1,
    P2,
    P3,
    P4,
    P5,
    P6,
}

impl Position {
    pub const ALL: [Position; 6] =
        [Position::P1, Position::P2, Position::P3, Position::P4, Position::P5, Position::P6];

    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn from_number(number: u8) -> Result<Position> {
        match number {
            1 => Ok(Position::P1),
            2 => Ok(Position::P2),
            3 => Ok(Position::P3),
            4 => Ok(Position::P4),
            5 => Ok(Position::P5),
            6 => Ok(Position::P6),
            other => Err(MatchError::InvalidPosition(other)),
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Position::P1 => 0,
            Position::P2 => 1,
            Position::P3 => 2,
            Position::P4 => 3,
            Position::P5 => 4,
            Position::P6 => 5,
        }
    }
}

/// Assignment of jersey numbers to the six court positions.
///
/// Numbers may be empty while a lineup is being entered; during active play
/// no two positions may share a non-empty number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lineup {
    slots: [String; 6],
}

impl Lineup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_numbers(numbers: [&str; 6]) -> Self {
        Self { slots: numbers.map(|n| n.to_string()) }
    }

    pub fn number_at(&self, position: Position) -> &str {
        &self.slots[position.index()]
    }

    pub fn set_number(&mut self, position: Position, number: impl Into<String>) {
        self.slots[position.index()] = number.into();
    }

    /// Whether a non-empty jersey number is currently on court.
    pub fn contains(&self, number: &str) -> bool {
        !number.is_empty() && self.slots.iter().any(|n| n == number)
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|n| !n.trim().is_empty())
    }

    /// No two positions may share a non-empty jersey number.
    pub fn validate_unique(&self) -> Result<()> {
        for (i, number) in self.slots.iter().enumerate() {
            if number.is_empty() {
                continue;
            }
            if self.slots[..i].iter().any(|earlier| earlier == number) {
                return Err(MatchError::DuplicateJerseyNumber(number.clone()));
            }
        }
        Ok(())
    }

    /// The standard clockwise rotation applied when a team gains serve:
    /// new\[1\]=old\[2\], new\[2\]=old\[3\], new\[3\]=old\[4\], new\[4\]=old\[5\],
    /// new\[5\]=old\[6\], new\[6\]=old\[1\]. Pure; the input lineup is untouched.
    pub fn rotate(&self) -> Lineup {
        let mut rotated = self.clone();
        for i in 0..6 {
            rotated.slots[i] = self.slots[(i + 1) % 6].clone();
        }
        rotated
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, &str)> {
        Position::ALL.iter().map(move |&p| (p, self.number_at(p)))
    }

    pub fn numbers(&self) -> &[String; 6] {
        &self.slots
    }
}

impl From<[String; 6]> for Lineup {
    fn from(slots: [String; 6]) -> Self {
        Self { slots }
    }
}


#[cfg(all(test, feature = "proptest"))]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_lineup() -> impl Strategy<Value = Lineup> {
        proptest::array::uniform6("[0-9]{1,2}").prop_map(|numbers: [String; 6]| {
            Lineup::from(numbers)
        })
    }

    proptest! {
        /// Property: rotation applied six times returns the original lineup.
        #[test]
        fn prop_rotate_six_is_identity(lineup in arb_lineup()) {
            let mut rotated = lineup.clone();
            for _ in 0..6 {
                rotated = rotated.rotate();
            }
            prop_assert_eq!(rotated, lineup);
        }

        /// Property: rotation preserves the multiset of jersey numbers.
        #[test]
        fn prop_rotate_preserves_numbers(lineup in arb_lineup()) {
            let mut before: Vec<String> = lineup.numbers().to_vec();
            let mut after: Vec<String> = lineup.rotate().numbers().to_vec();
            before.sort();
            after.sort();
            prop_assert_eq!(before, after);
        }
    }
}
