use alloc::vec::Vec;

use super::*;

/// Character marking a mine in a text layout; anything else is mine-free.
pub const MINE_MARKER: char = '*';

/// Character written for mine-free squares by [`Board::layout_rows`].
pub const SAFE_MARKER: char = '.';

/// Mine layout read from rows of text, top to bottom, one character per square.
#[derive(Clone, Debug, PartialEq)]
pub struct TextMinefield<I> {
    rows: I,
}

impl<I> TextMinefield<I> {
    pub fn new(rows: I) -> Self {
        Self { rows }
    }
}

impl<I, S> MinefieldGenerator for TextMinefield<I>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    fn generate(self, limits: SizeLimits) -> Result<Grid<bool>> {
        let mut mask: Vec<Vec<bool>> = Vec::new();
        for (index, row) in self.rows.into_iter().enumerate() {
            let row: Vec<bool> = row.as_ref().chars().map(|c| c == MINE_MARKER).collect();
            if let Some(first) = mask.first() {
                if first.len() != row.len() {
                    return Err(GameError::InconsistentWidth { row: index });
                }
            }
            mask.push(row);
        }

        let Some(first) = mask.first() else {
            return Err(GameError::EmptyInput);
        };
        let width = Coord::try_from(first.len()).unwrap_or(Coord::MAX);
        let height = Coord::try_from(mask.len()).unwrap_or(Coord::MAX);
        limits.validate(width, height)?;

        let mines = Grid::new(width, height, |p| mask[p.y as usize][p.x as usize])?;
        let count = mines.items().filter(|&&mine| mine).count();
        log::debug!("Parsed {}x{} minefield with {} mines", width, height, count);
        if count == 0 {
            log::warn!("Parsed minefield has no mines");
        } else if count == mines.len() {
            log::warn!("Parsed minefield has no mine-free squares");
        }

        Ok(mines)
    }
}
