use super::*;

/// Places a mine on each square independently with probability `mine_probability`.
///
/// The same `(width, height, seed, mine_probability)` always yields the same layout.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomMinefieldGenerator {
    width: Coord,
    height: Coord,
    seed: u64,
    mine_probability: f64,
}

impl RandomMinefieldGenerator {
    pub fn new(width: Coord, height: Coord, seed: u64, mine_probability: f64) -> Self {
        Self {
            width,
            height,
            seed,
            mine_probability,
        }
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(self, limits: SizeLimits) -> Result<Grid<bool>> {
        use rand::prelude::*;
        use rand::rngs::StdRng;

        limits.validate(self.width, self.height)?;
        if !(0.0..=1.0).contains(&self.mine_probability) {
            return Err(GameError::InvalidProbability);
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mines = Grid::new(self.width, self.height, |_| {
            rng.random::<f64>() < self.mine_probability
        })?;

        let count = mines.items().filter(|&&mine| mine).count();
        log::debug!(
            "Generated {}x{} minefield with {} mines, seed: {}, probability: {}",
            self.width,
            self.height,
            count,
            self.seed,
            self.mine_probability
        );
        if count == 0 {
            log::warn!("Generated minefield has no mines");
        } else if count == mines.len() {
            log::warn!("Generated minefield has no mine-free squares");
        }

        Ok(mines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(width: Coord, height: Coord, seed: u64, p: f64) -> Result<Grid<bool>> {
        RandomMinefieldGenerator::new(width, height, seed, p).generate(SizeLimits::default())
    }

    #[test]
    fn same_inputs_give_same_layout() {
        for seed in [0, 1, 42, u64::MAX] {
            let a = generate(12, 9, seed, 0.3).unwrap();
            let b = generate(12, 9, seed, 0.3).unwrap();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn different_seeds_usually_differ() {
        let layouts: alloc::vec::Vec<_> = (0..8)
            .map(|seed| generate(20, 20, seed, 0.5).unwrap())
            .collect();

        assert!(layouts.windows(2).any(|pair| pair[0] != pair[1]));
    }

    #[test]
    fn probability_extremes() {
        let empty = generate(5, 5, 7, 0.0).unwrap();
        let full = generate(5, 5, 7, 1.0).unwrap();

        assert!(empty.items().all(|&mine| !mine));
        assert!(full.items().all(|&mine| mine));
    }

    #[test]
    fn rejects_out_of_range_inputs() {
        assert_eq!(
            generate(4, 10, 0, 0.2).unwrap_err(),
            GameError::InvalidBoardSize {
                width: 4,
                height: 10
            }
        );
        assert_eq!(
            generate(10, 21, 0, 0.2).unwrap_err(),
            GameError::InvalidBoardSize {
                width: 10,
                height: 21
            }
        );
        assert_eq!(generate(10, 10, 0, -0.1).unwrap_err(), GameError::InvalidProbability);
        assert_eq!(generate(10, 10, 0, 1.5).unwrap_err(), GameError::InvalidProbability);
        assert_eq!(generate(10, 10, 0, f64::NAN).unwrap_err(), GameError::InvalidProbability);
    }

    #[test]
    fn custom_limits_apply() {
        let limits = SizeLimits::new(6, 8);

        assert!(RandomMinefieldGenerator::new(6, 8, 0, 0.2).generate(limits).is_ok());
        assert!(matches!(
            RandomMinefieldGenerator::new(5, 8, 0, 0.2).generate(limits),
            Err(GameError::InvalidBoardSize { .. })
        ));
    }
}
