use serde::{Deserialize, Serialize};

use crate::*;
pub use random::*;
pub use text::*;

mod random;
mod text;

/// Smallest accepted board width or height, inclusive.
pub const MINIMUM_BOARD_SIZE: Coord = 5;

/// Largest accepted board width or height, inclusive.
pub const MAXIMUM_BOARD_SIZE: Coord = 20;

/// Inclusive range accepted for both board dimensions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeLimits {
    pub min: Coord,
    pub max: Coord,
}

impl SizeLimits {
    pub const fn new(min: Coord, max: Coord) -> Self {
        Self { min, max }
    }

    pub const fn contains(&self, size: Coord) -> bool {
        self.min <= size && size <= self.max
    }

    pub fn validate(&self, width: Coord, height: Coord) -> Result<()> {
        if self.contains(width) && self.contains(height) {
            Ok(())
        } else {
            Err(GameError::InvalidBoardSize { width, height })
        }
    }
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self::new(MINIMUM_BOARD_SIZE, MAXIMUM_BOARD_SIZE)
    }
}

/// Source of a mine layout, `true` where a mine sits.
pub trait MinefieldGenerator {
    fn generate(self, limits: SizeLimits) -> Result<Grid<bool>>;
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use std::sync::{Mutex, Once};

    static RECORDS: Mutex<Vec<(Level, String)>> = Mutex::new(Vec::new());

    struct Capture;

    impl Log for Capture {
        fn enabled(&self, metadata: &Metadata<'_>) -> bool {
            metadata.level() <= Level::Warn
        }

        fn log(&self, record: &Record<'_>) {
            if self.enabled(record.metadata()) {
                RECORDS
                    .lock()
                    .unwrap()
                    .push((record.level(), record.args().to_string()));
            }
        }

        fn flush(&self) {}
    }

    fn capture_warnings() {
        static INIT: Once = Once::new();
        INIT.call_once(|| {
            log::set_logger(&Capture).unwrap();
            log::set_max_level(LevelFilter::Warn);
        });
    }

    fn warned(message: &str) -> bool {
        RECORDS
            .lock()
            .unwrap()
            .iter()
            .any(|(level, text)| *level == Level::Warn && text == message)
    }

    #[test]
    fn size_limits_are_inclusive() {
        let limits = SizeLimits::default();

        assert!(limits.contains(MINIMUM_BOARD_SIZE));
        assert!(limits.contains(MAXIMUM_BOARD_SIZE));
        assert!(!limits.contains(MAXIMUM_BOARD_SIZE + 1));
        assert_eq!(
            limits.validate(5, 21),
            Err(GameError::InvalidBoardSize {
                width: 5,
                height: 21
            })
        );
    }

    #[test]
    fn degenerate_minefields_are_reported() {
        capture_warnings();

        let empty = RandomMinefieldGenerator::new(5, 5, 7, 0.0)
            .generate(SizeLimits::default())
            .unwrap();
        assert!(empty.items().all(|mine| !mine));
        assert!(warned("Generated minefield has no mines"));

        let full = RandomMinefieldGenerator::new(5, 5, 7, 1.0)
            .generate(SizeLimits::default())
            .unwrap();
        assert!(full.items().all(|mine| *mine));
        assert!(warned("Generated minefield has no mine-free squares"));

        TextMinefield::new([".....", ".....", ".....", ".....", "....."])
            .generate(SizeLimits::default())
            .unwrap();
        assert!(warned("Parsed minefield has no mines"));

        TextMinefield::new(["*****", "*****", "*****", "*****", "*****"])
            .generate(SizeLimits::default())
            .unwrap();
        assert!(warned("Parsed minefield has no mine-free squares"));
    }
}
