use thiserror::Error;

use crate::Coord;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Grid dimensions must be positive")]
    InvalidDimension,
    #[error("Board size {width}x{height} is outside the allowed range")]
    InvalidBoardSize { width: Coord, height: Coord },
    #[error("Mine probability must be within [0, 1]")]
    InvalidProbability,
    #[error("Board layout has no rows")]
    EmptyInput,
    #[error("Board layout row {row} differs in width from the first row")]
    InconsistentWidth { row: usize },
    #[error("Position is outside the board")]
    OutOfBounds,
    #[error("Square is already uncovered")]
    AlreadyUncovered,
    #[error("Game already ended, no new moves are accepted")]
    GameAlreadyFinished,
    #[error("Square is still covered")]
    SquareStillCovered,
    #[error("Game is not over yet")]
    GameNotFinished,
    #[error("Snapshot is not a reachable game state")]
    InvalidSnapshot,
}

impl GameError {
    /// Whether this error comes from building a board or game, as opposed to an illegal move or query.
    pub const fn is_configuration(self) -> bool {
        use GameError::*;
        match self {
            InvalidDimension => true,
            InvalidBoardSize { .. } => true,
            InvalidProbability => true,
            EmptyInput => true,
            InconsistentWidth { .. } => true,
            InvalidSnapshot => true,
            OutOfBounds => false,
            AlreadyUncovered => false,
            GameAlreadyFinished => false,
            SquareStillCovered => false,
            GameNotFinished => false,
        }
    }
}

pub type Result<T> = core::result::Result<T, GameError>;
