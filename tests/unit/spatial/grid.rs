//! Tests for pixel grid storage, conversion and mean color

#[cfg(test)]
mod tests {
    use image::{Rgb, RgbImage};
    use photomosaic::math::Color;
    use photomosaic::spatial::PixelGrid;

    // Tests grid dimensions follow width and height order
    // Verified by swapping rows and columns in the constructor
    #[test]
    fn test_grid_dimensions() {
        let grid = PixelGrid::filled(5, 3, Color::BLACK);
        assert_eq!(grid.width(), 5);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.dimensions(), (5, 3));
        assert_eq!(grid.get(4, 2), Some(Color::BLACK));
        assert_eq!(grid.get(5, 0), None);
        assert_eq!(grid.get(0, 3), None);
    }

    // Tests set writes only inside the grid
    // Verified by ignoring the bounds result
    #[test]
    fn test_grid_set() {
        let mut grid = PixelGrid::filled(2, 2, Color::BLACK);
        assert!(grid.set(1, 0, Color::new(9, 8, 7)));
        assert!(!grid.set(2, 0, Color::new(1, 1, 1)));
        assert_eq!(grid.get(1, 0), Some(Color::new(9, 8, 7)));
        assert_eq!(grid.get(0, 1), Some(Color::BLACK));
    }

    // Tests conversion from and back to an RGB image preserves pixels
    // Verified by transposing coordinates during conversion
    #[test]
    fn test_rgb_image_conversion() {
        let image = RgbImage::from_fn(3, 2, |x, y| Rgb([x as u8 * 10, y as u8 * 20, 7]));
        let grid = PixelGrid::from_rgb_image(&image);

        assert_eq!(grid.dimensions(), (3, 2));
        assert_eq!(grid.get(2, 1), Some(Color::new(20, 20, 7)));
        assert_eq!(grid.to_rgb_image(), image);
    }

    // Tests mean color truncates the per-channel average
    // Verified by rounding the average
    #[test]
    fn test_mean_color_truncates() {
        let mut grid = PixelGrid::filled(2, 1, Color::new(10, 0, 255));
        grid.set(1, 0, Color::new(11, 1, 254));

        assert_eq!(grid.mean_color(), Color::new(10, 0, 254));
    }

    // Tests mean color of a large bright grid does not overflow
    // Verified by accumulating in u8
    #[test]
    fn test_mean_color_large_grid() {
        let grid = PixelGrid::filled(1024, 1024, Color::new(255, 255, 255));
        assert_eq!(grid.mean_color(), Color::new(255, 255, 255));
    }

    // Tests mean color of an empty grid falls back to black
    // Verified by dividing by zero
    #[test]
    fn test_mean_color_empty_grid() {
        assert_eq!(PixelGrid::filled(0, 0, Color::BLACK).mean_color(), Color::BLACK);
    }

    // Tests map produces a new grid and leaves the original intact
    // Verified by mapping in place
    #[test]
    fn test_map_returns_copy() {
        let grid = PixelGrid::filled(2, 2, Color::new(1, 2, 3));
        let mapped = grid.map(|c| Color::new(c.b, c.g, c.r));

        assert_eq!(mapped.get(1, 1), Some(Color::new(3, 2, 1)));
        assert_eq!(grid.get(1, 1), Some(Color::new(1, 2, 3)));
    }
}
