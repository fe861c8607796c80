use alloc::collections::VecDeque;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Index;
use core::str::FromStr;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::*;

/// Squares of one game. Mine placement and neighbor counts never change after construction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardData")]
pub struct Board {
    squares: Grid<Square>,
}

#[derive(Deserialize)]
struct BoardData {
    squares: Grid<Square>,
}

/// Neighbor counts must agree with the mine layout.
impl TryFrom<BoardData> for Board {
    type Error = GameError;

    fn try_from(data: BoardData) -> Result<Self> {
        let expected = Self::from_minefield(&data.squares.map(Square::contains_mine));
        let consistent = data
            .squares
            .items()
            .zip(expected.squares.items())
            .all(|(square, fresh)| {
                square.neighboring_mine_count() == fresh.neighboring_mine_count()
            });

        if consistent {
            Ok(Self {
                squares: data.squares,
            })
        } else {
            Err(GameError::InvalidSnapshot)
        }
    }
}

impl Board {
    pub fn generate(generator: impl MinefieldGenerator, limits: SizeLimits) -> Result<Self> {
        let mines = generator.generate(limits)?;
        Ok(Self::from_minefield(&mines))
    }

    /// Seeded random board within the default [`SizeLimits`].
    pub fn random(width: Coord, height: Coord, seed: u64, mine_probability: f64) -> Result<Self> {
        Self::generate(
            RandomMinefieldGenerator::new(width, height, seed, mine_probability),
            SizeLimits::default(),
        )
    }

    /// Board from text rows (top to bottom, [`MINE_MARKER`] for mines) within the default [`SizeLimits`].
    pub fn parse<I, S>(rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::generate(TextMinefield::new(rows), SizeLimits::default())
    }

    /// Covered board with neighbor counts derived from `mines`.
    pub fn from_minefield(mines: &Grid<bool>) -> Self {
        let squares = mines.map_with_position(|position, &contains_mine| {
            let count = mines.around(position).filter(|&p| mines[p]).count();
            Square::new(contains_mine, count as u8)
        });
        Self { squares }
    }

    pub fn width(&self) -> Coord {
        self.squares.width()
    }

    pub fn height(&self) -> Coord {
        self.squares.height()
    }

    pub fn size(&self) -> Coord2 {
        self.squares.size()
    }

    pub fn squares(&self) -> &Grid<Square> {
        &self.squares
    }

    pub fn is_valid_position(&self, position: Coord2) -> bool {
        self.squares.is_valid_position(position)
    }

    pub fn square(&self, position: Coord2) -> Result<&Square> {
        self.squares.get(position)
    }

    pub fn mine_count(&self) -> usize {
        self.squares.items().filter(|s| s.contains_mine()).count()
    }

    pub fn uncovered_count(&self) -> usize {
        self.squares.items().filter(|s| !s.is_covered()).count()
    }

    /// Uncovers a covered square, clearing its flag. Returns whether it held a mine.
    pub fn uncover(&mut self, position: Coord2) -> Result<bool> {
        let square = self.covered_square_mut(position)?;
        Ok(square.uncover())
    }

    pub fn toggle_flag(&mut self, position: Coord2) -> Result<()> {
        self.covered_square_mut(position)?.toggle_flag();
        Ok(())
    }

    /// Uncovers the zero-count region connected to `origin` plus its numbered border.
    ///
    /// Does nothing unless `origin` is an unflagged, mine-free square with no neighboring mines.
    /// Flagged squares are left alone and do not propagate. Zero squares uncovered by earlier moves
    /// propagate without being counted again. Returns how many squares were uncovered.
    pub fn flood_reveal(&mut self, origin: Coord2) -> Result<usize> {
        let origin = self.squares.validate_position(origin)?;
        let start = self.squares[origin];
        if start.neighboring_mine_count() != 0 || start.is_flagged() || start.contains_mine() {
            return Ok(0);
        }

        let mut revealed = 0;
        let mut visited = HashSet::new();
        visited.insert(origin);
        let mut to_visit = VecDeque::from([origin]);

        while let Some(current) = to_visit.pop_front() {
            for neighbor in self.squares.around(current) {
                if !visited.insert(neighbor) {
                    continue;
                }

                let square = &mut self.squares[neighbor];
                if square.is_flagged() || square.contains_mine() {
                    log::trace!("Flood skipped square at {}", neighbor);
                    continue;
                }
                if !square.is_covered() {
                    if square.neighboring_mine_count() == 0 {
                        to_visit.push_back(neighbor);
                    }
                    continue;
                }

                square.uncover();
                revealed += 1;
                log::trace!(
                    "Flood uncovered square at {}, mine count: {}",
                    neighbor,
                    square.neighboring_mine_count()
                );

                if square.neighboring_mine_count() == 0 {
                    to_visit.push_back(neighbor);
                }
            }
        }

        log::debug!("Flood from {} uncovered {} squares", origin, revealed);
        Ok(revealed)
    }

    /// The win condition: every square either holds a mine or is uncovered.
    pub fn are_all_mine_free_squares_uncovered(&self) -> bool {
        self.squares
            .items()
            .all(|square| square.contains_mine() || !square.is_covered())
    }

    pub fn mines(&self) -> HashSet<Coord2> {
        self.positions_where(Square::contains_mine)
    }

    pub fn flags(&self) -> HashSet<Coord2> {
        self.positions_where(Square::is_flagged)
    }

    /// Mine layout as text rows that [`Board::parse`] accepts.
    pub fn layout_rows(&self) -> Vec<String> {
        self.squares
            .rows()
            .map(|row| {
                row.iter()
                    .map(|square| {
                        if square.contains_mine() {
                            MINE_MARKER
                        } else {
                            SAFE_MARKER
                        }
                    })
                    .collect()
            })
            .collect()
    }

    fn positions_where(&self, predicate: impl Fn(&Square) -> bool) -> HashSet<Coord2> {
        self.squares
            .iter()
            .filter(|&(_, square)| predicate(square))
            .map(|(position, _)| position)
            .collect()
    }

    fn covered_square_mut(&mut self, position: Coord2) -> Result<&mut Square> {
        let square = self.squares.get_mut(position)?;
        if square.is_covered() {
            Ok(square)
        } else {
            Err(GameError::AlreadyUncovered)
        }
    }
}

impl Index<Coord2> for Board {
    type Output = Square;

    fn index(&self, position: Coord2) -> &Self::Output {
        &self.squares[position]
    }
}

/// One character per square, rows top to bottom separated by newlines.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.squares.rows().enumerate() {
            if y > 0 {
                f.write_str("\n")?;
            }
            for square in row.iter() {
                write!(f, "{}", square)?;
            }
        }
        Ok(())
    }
}

/// Parses a newline-separated layout; blank lines and surrounding whitespace are ignored.
impl FromStr for Board {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s.lines().map(str::trim).filter(|line| !line.is_empty()))
    }
}
