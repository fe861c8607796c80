use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of a single square.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SquareStatus {
    /// Covered and unflagged.
    Covered,
    /// Covered and flagged.
    Flagged,
    /// Uncovered and holding a mine.
    Mine,
    /// Uncovered and mine-free.
    Uncovered,
}

impl SquareStatus {
    pub const fn is_covered(self) -> bool {
        matches!(self, Self::Covered | Self::Flagged)
    }
}

/// One board position. Mine presence and neighbor count are fixed at creation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SquareData")]
pub struct Square {
    contains_mine: bool,
    is_covered: bool,
    is_flagged: bool,
    neighboring_mine_count: u8,
}

impl Square {
    pub(crate) const fn new(contains_mine: bool, neighboring_mine_count: u8) -> Self {
        Self {
            contains_mine,
            is_covered: true,
            is_flagged: false,
            neighboring_mine_count,
        }
    }

    pub const fn contains_mine(&self) -> bool {
        self.contains_mine
    }

    pub const fn is_covered(&self) -> bool {
        self.is_covered
    }

    pub const fn is_flagged(&self) -> bool {
        self.is_flagged
    }

    pub const fn neighboring_mine_count(&self) -> u8 {
        self.neighboring_mine_count
    }

    pub const fn status(&self) -> SquareStatus {
        if self.is_flagged {
            SquareStatus::Flagged
        } else if self.is_covered {
            SquareStatus::Covered
        } else if self.contains_mine {
            SquareStatus::Mine
        } else {
            SquareStatus::Uncovered
        }
    }

    /// Uncovers the square and drops any flag. Returns whether it held a mine.
    pub(crate) fn uncover(&mut self) -> bool {
        self.is_covered = false;
        self.is_flagged = false;
        self.contains_mine
    }

    pub(crate) fn toggle_flag(&mut self) {
        debug_assert!(self.is_covered, "flag toggled on an uncovered square");
        self.is_flagged = !self.is_flagged;
    }
}

#[derive(Deserialize)]
struct SquareData {
    contains_mine: bool,
    is_covered: bool,
    is_flagged: bool,
    neighboring_mine_count: u8,
}

/// Flags only sit on covered squares and no square has more than eight neighbors.
impl TryFrom<SquareData> for Square {
    type Error = GameError;

    fn try_from(data: SquareData) -> Result<Self> {
        if data.is_flagged && !data.is_covered {
            return Err(GameError::InvalidSnapshot);
        }
        if usize::from(data.neighboring_mine_count) > DIRECTIONS.len() {
            return Err(GameError::InvalidSnapshot);
        }

        Ok(Self {
            contains_mine: data.contains_mine,
            is_covered: data.is_covered,
            is_flagged: data.is_flagged,
            neighboring_mine_count: data.neighboring_mine_count,
        })
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status() {
            SquareStatus::Covered => f.write_str("?"),
            SquareStatus::Flagged => f.write_str("F"),
            SquareStatus::Mine => f.write_str("B"),
            SquareStatus::Uncovered => write!(f, "{}", self.neighboring_mine_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn starts_covered_and_unflagged() {
        let square = Square::new(false, 3);

        assert!(square.is_covered());
        assert!(!square.is_flagged());
        assert_eq!(square.status(), SquareStatus::Covered);
        assert_eq!(square.to_string(), "?");
    }

    #[test]
    fn uncover_clears_flag_and_reports_mine() {
        let mut mine = Square::new(true, 0);
        mine.toggle_flag();
        assert_eq!(mine.status(), SquareStatus::Flagged);

        assert!(mine.uncover());
        assert!(!mine.is_flagged());
        assert_eq!(mine.status(), SquareStatus::Mine);
        assert_eq!(mine.to_string(), "B");

        let mut safe = Square::new(false, 2);
        assert!(!safe.uncover());
        assert_eq!(safe.status(), SquareStatus::Uncovered);
        assert_eq!(safe.to_string(), "2");
        assert_eq!(safe.neighboring_mine_count(), 2);
    }

    #[test]
    fn double_toggle_restores_square() {
        let original = Square::new(false, 1);
        let mut square = original;

        square.toggle_flag();
        assert_eq!(square.to_string(), "F");
        assert!(square.status().is_covered());
        square.toggle_flag();

        assert_eq!(square, original);
    }

    #[test]
    fn deserialize_rejects_impossible_squares() {
        let covered: Square = serde_json::from_str(
            r#"{"contains_mine":false,"is_covered":true,"is_flagged":true,"neighboring_mine_count":8}"#,
        )
        .unwrap();
        assert_eq!(covered.status(), SquareStatus::Flagged);

        let flagged_uncovered = serde_json::from_str::<Square>(
            r#"{"contains_mine":false,"is_covered":false,"is_flagged":true,"neighboring_mine_count":0}"#,
        );
        assert!(flagged_uncovered.is_err());

        let too_many_neighbors = serde_json::from_str::<Square>(
            r#"{"contains_mine":false,"is_covered":true,"is_flagged":false,"neighboring_mine_count":9}"#,
        );
        assert!(too_many_neighbors.is_err());
    }
}
