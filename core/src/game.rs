use core::fmt;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - InProgress -> InProgress
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Moves are accepted
    InProgress,
    /// Game ended and player uncovered every mine-free square
    Won,
    /// Game ended and player uncovered a mine
    Lost,
}

impl GameStatus {
    /// Indicates the game has ended and no moves can be made anymore
    pub const fn is_finished(self) -> bool {
        use GameStatus::*;
        match self {
            InProgress => false,
            Won => true,
            Lost => true,
        }
    }
}

/// Immutable snapshot of a game. Moves return a new snapshot and leave `self` untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "GameData")]
pub enum Game {
    InProgress { board: Board, flooding: bool },
    Won { board: Board },
    Lost { board: Board, mine_hit: Coord2 },
}

#[derive(Deserialize)]
enum GameData {
    InProgress { board: Board, flooding: bool },
    Won { board: Board },
    Lost { board: Board, mine_hit: Coord2 },
}

/// A game in progress has no uncovered mine, a won game has every mine-free
/// square uncovered, and a lost game has exactly one uncovered mine at `mine_hit`.
impl TryFrom<GameData> for Game {
    type Error = GameError;

    fn try_from(data: GameData) -> Result<Self> {
        let game = match data {
            GameData::InProgress { board, flooding } => Self::InProgress { board, flooding },
            GameData::Won { board } => Self::Won { board },
            GameData::Lost { board, mine_hit } => Self::Lost { board, mine_hit },
        };

        let uncovered_mines = game
            .board()
            .squares()
            .items()
            .filter(|square| square.contains_mine() && !square.is_covered())
            .count();
        let reachable = match &game {
            Self::InProgress { .. } => uncovered_mines == 0,
            Self::Won { board } => {
                uncovered_mines == 0 && board.are_all_mine_free_squares_uncovered()
            }
            Self::Lost { board, mine_hit } => {
                uncovered_mines == 1
                    && board
                        .square(*mine_hit)
                        .is_ok_and(|square| square.contains_mine() && !square.is_covered())
            }
        };

        if reachable {
            Ok(game)
        } else {
            Err(GameError::InvalidSnapshot)
        }
    }
}

impl Game {
    /// New game on a random board. Without a seed in `config` a fresh one is drawn.
    pub fn new(config: &GameConfig) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(rand::random);
        log::debug!("Creating game from {:?} with seed {}", config, seed);

        let generator =
            RandomMinefieldGenerator::new(config.width, config.height, seed, config.mine_probability);
        let board = Board::generate(generator, config.limits)?;
        Ok(Self::from_board(board, config.flooding))
    }

    /// New game on a board parsed from text rows, see [`Board::parse`].
    pub fn parse<I, S>(rows: I, flooding: bool) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::from_board(Board::parse(rows)?, flooding))
    }

    pub fn from_board(board: Board, flooding: bool) -> Self {
        Self::InProgress { board, flooding }
    }

    pub fn board(&self) -> &Board {
        match self {
            Self::InProgress { board, .. } | Self::Won { board } | Self::Lost { board, .. } => board,
        }
    }

    pub fn status(&self) -> GameStatus {
        match self {
            Self::InProgress { .. } => GameStatus::InProgress,
            Self::Won { .. } => GameStatus::Won,
            Self::Lost { .. } => GameStatus::Lost,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.status().is_finished()
    }

    /// Flooding setting of a game still in progress.
    pub fn flooding(&self) -> Option<bool> {
        match self {
            Self::InProgress { flooding, .. } => Some(*flooding),
            Self::Won { .. } | Self::Lost { .. } => None,
        }
    }

    /// Position of the mine that ended a lost game.
    pub fn mine_hit(&self) -> Option<Coord2> {
        match self {
            Self::Lost { mine_hit, .. } => Some(*mine_hit),
            Self::InProgress { .. } | Self::Won { .. } => None,
        }
    }

    pub fn uncover_square(&self, position: Coord2) -> Result<Self> {
        let (board, flooding) = self.in_progress()?;
        let position = Self::check_covered(board, position)?;

        let mut next = board.clone();
        if next.uncover(position)? {
            log::debug!("Mine hit at {}, game lost", position);
            return Ok(Self::Lost {
                board: next,
                mine_hit: position,
            });
        }

        if flooding {
            next.flood_reveal(position)?;
        }

        if next.are_all_mine_free_squares_uncovered() {
            log::debug!("Uncovered {}, game won", position);
            Ok(Self::Won { board: next })
        } else {
            log::debug!("Uncovered {}", position);
            Ok(Self::InProgress {
                board: next,
                flooding,
            })
        }
    }

    pub fn toggle_flag(&self, position: Coord2) -> Result<Self> {
        let (board, flooding) = self.in_progress()?;
        let position = Self::check_covered(board, position)?;

        let mut next = board.clone();
        next.toggle_flag(position)?;
        log::debug!("Toggled flag at {}", position);
        Ok(Self::InProgress {
            board: next,
            flooding,
        })
    }

    pub fn is_square_covered(&self, position: Coord2) -> Result<bool> {
        Ok(self.board().square(position)?.is_covered())
    }

    pub fn square_status(&self, position: Coord2) -> Result<SquareStatus> {
        Ok(self.board().square(position)?.status())
    }

    pub fn adjacent_mines(&self, position: Coord2) -> Result<u8> {
        let square = self.board().square(position)?;
        if square.is_covered() {
            Err(GameError::SquareStillCovered)
        } else {
            Ok(square.neighboring_mine_count())
        }
    }

    /// Every mine position, only available once the game has ended.
    pub fn mines(&self) -> Result<HashSet<Coord2>> {
        match self {
            Self::InProgress { .. } => Err(GameError::GameNotFinished),
            Self::Won { board } | Self::Lost { board, .. } => Ok(board.mines()),
        }
    }

    pub fn flags(&self) -> HashSet<Coord2> {
        self.board().flags()
    }

    fn in_progress(&self) -> Result<(&Board, bool)> {
        match self {
            Self::InProgress { board, flooding } => Ok((board, *flooding)),
            Self::Won { .. } | Self::Lost { .. } => Err(GameError::GameAlreadyFinished),
        }
    }

    fn check_covered(board: &Board, position: Coord2) -> Result<Coord2> {
        if board.square(position)?.is_covered() {
            Ok(position)
        } else {
            Err(GameError::AlreadyUncovered)
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.board(), f)
    }
}
