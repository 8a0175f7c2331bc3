//! Tests for nearest-color matching and its tie-break rule

#[cfg(test)]
mod tests {
    use photomosaic::algorithm::matcher::{LinearMatcher, TileMatcher, find_best_index};
    use photomosaic::math::Color;
    use photomosaic::spatial::{PixelGrid, Tile};

    fn uniform_tile(color: Color) -> Tile {
        Tile::new(PixelGrid::filled(2, 2, color), false)
    }

    // Tests the closest mean color wins
    // Verified by choosing the farthest tile
    #[test]
    fn test_finds_nearest_tile() {
        let tiles = vec![
            uniform_tile(Color::new(250, 10, 10)),
            uniform_tile(Color::new(10, 250, 10)),
            uniform_tile(Color::new(10, 10, 250)),
        ];

        let mut matcher = LinearMatcher;
        assert_eq!(matcher.find_best(Color::new(255, 0, 0), &tiles), Some(0));
        assert_eq!(matcher.find_best(Color::new(0, 255, 0), &tiles), Some(1));
        assert_eq!(matcher.find_best(Color::new(0, 0, 200), &tiles), Some(2));
    }

    // Tests equally close tiles resolve to the earliest one
    // Verified by using <= in the comparison
    #[test]
    fn test_tie_keeps_first_tile() {
        let tiles = vec![
            uniform_tile(Color::new(90, 100, 100)),
            uniform_tile(Color::new(110, 100, 100)),
            uniform_tile(Color::new(100, 90, 100)),
        ];

        assert_eq!(find_best_index(Color::new(100, 100, 100), &tiles), Some(0));

        let reversed: Vec<Tile> = tiles.into_iter().rev().collect();
        assert_eq!(
            find_best_index(Color::new(100, 100, 100), &reversed),
            Some(0)
        );
    }

    // Tests identical tiles resolve to the earliest one
    // Verified by keeping the last best match
    #[test]
    fn test_identical_tiles_first_wins() {
        let tiles = vec![
            uniform_tile(Color::new(5, 5, 5)),
            uniform_tile(Color::new(50, 50, 50)),
            uniform_tile(Color::new(50, 50, 50)),
        ];

        assert_eq!(find_best_index(Color::new(50, 50, 50), &tiles), Some(1));
    }

    // Tests an empty tile set has no best match
    // Verified by defaulting to index zero
    #[test]
    fn test_empty_tiles() {
        assert_eq!(find_best_index(Color::BLACK, &[]), None);
        assert_eq!(LinearMatcher.find_best(Color::BLACK, &[]), None);
    }
}
