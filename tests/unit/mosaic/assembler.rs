//! Tests for mosaic assembly from configuration to composed canvas

#[cfg(test)]
mod tests {
    use crate::fixtures::{quadrants, solid, write_image};
    use image::{DynamicImage, Rgb, Rgba, RgbaImage};
    use photomosaic::MosaicError;
    use photomosaic::color::profile::Color;
    use photomosaic::io::progress::{MosaicProgress, SilentProgress};
    use photomosaic::mosaic::assembler::{
        MosaicConfig, compose, create_mosaic, create_mosaic_with_progress,
    };
    use photomosaic::mosaic::tileset::{Tile, TileSet};
    use photomosaic::spatial::grid::GridGeometry;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    const RED: [u8; 3] = [200, 20, 20];
    const GREEN: [u8; 3] = [20, 200, 20];
    const BLUE: [u8; 3] = [20, 20, 200];
    const YELLOW: [u8; 3] = [200, 200, 20];

    #[derive(Default)]
    struct ColumnRecorder {
        started: Option<u32>,
        completed: Vec<u32>,
        finished: bool,
    }

    impl MosaicProgress for ColumnRecorder {
        fn assembly_started(&mut self, columns: u32) {
            self.started = Some(columns);
        }

        fn column_completed(&mut self, column: u32) {
            self.completed.push(column);
        }

        fn finish(&mut self) {
            self.finished = true;
        }
    }

    /// Target of four colored quadrants and one matching tile per color
    fn quadrant_fixture(root: &Path) -> MosaicConfig {
        let tiles_dir = root.join("tiles");
        fs::create_dir(&tiles_dir).unwrap();
        for (name, rgb) in [
            ("blue.png", BLUE),
            ("green.png", GREEN),
            ("red.png", RED),
            ("yellow.png", YELLOW),
        ] {
            write_image(&tiles_dir, name, &solid(2, 2, rgb));
        }
        let target = write_image(root, "target.png", &quadrants([RED, GREEN, BLUE, YELLOW]));

        MosaicConfig::new(target, tiles_dir, (2, 2))
    }

    fn tile(name: &str, rgb: [u8; 3], (width, height): (u32, u32)) -> Tile {
        Tile {
            path: PathBuf::from(name),
            image: solid(width, height, rgb).to_rgb8(),
            color: Color::new(f64::from(rgb[0]), f64::from(rgb[1]), f64::from(rgb[2])),
        }
    }

    // Tests exactly matching tiles reconstruct every quadrant
    // Verified by pasting tiles at swapped offsets
    #[test]
    fn test_quadrants_reconstructed() {
        let temp_dir = TempDir::new().unwrap();
        let config = quadrant_fixture(temp_dir.path());

        let mosaic = create_mosaic(&config).unwrap();

        assert_eq!(mosaic.dimensions(), (4, 4));
        for (x, y, expected) in [(0, 0, RED), (3, 0, GREEN), (1, 3, BLUE), (2, 2, YELLOW)] {
            assert_eq!(mosaic.get_pixel(x, y), &Rgb(expected), "pixel ({x}, {y})");
        }
    }

    // Tests repeated runs give byte-identical canvases
    // Verified by shuffling tile order per run
    #[test]
    fn test_repeat_runs_identical() {
        let temp_dir = TempDir::new().unwrap();
        let config = quadrant_fixture(temp_dir.path());

        let first = create_mosaic(&config).unwrap();
        let second = create_mosaic(&config).unwrap();

        assert_eq!(first.as_raw(), second.as_raw());
    }

    // Tests remainder pixels keep the canvas size but stay unpainted
    // Verified by allocating only the covered area
    #[test]
    fn test_remainder_left_unpainted() {
        let target = solid(5, 3, [100, 100, 100]);
        let geometry = GridGeometry::new((5, 3), (2, 1)).unwrap();
        let tiles = TileSet::from_tiles(vec![tile("gray.png", [100, 100, 100], (2, 3))]);

        let mosaic = compose(&target, &geometry, &tiles, &mut SilentProgress).unwrap();

        assert_eq!(mosaic.dimensions(), (5, 3));
        assert_eq!(mosaic.get_pixel(3, 2), &Rgb([100, 100, 100]));
        assert_eq!(mosaic.get_pixel(4, 0), &Rgb([0, 0, 0]));
        assert_eq!(mosaic.get_pixel(4, 2), &Rgb([0, 0, 0]));
    }

    // Tests composition picks the nearest tile per cell in memory
    // Verified by always using the first tile
    #[test]
    fn test_compose_in_memory() {
        let target = quadrants([RED, RED, BLUE, BLUE]);
        let geometry = GridGeometry::new((4, 4), (2, 2)).unwrap();
        let tiles = TileSet::from_tiles(vec![
            tile("red.png", [190, 30, 30], (2, 2)),
            tile("blue.png", BLUE, (2, 2)),
        ]);
        let mut recorder = ColumnRecorder::default();

        let mosaic = compose(&target, &geometry, &tiles, &mut recorder).unwrap();

        assert_eq!(mosaic.get_pixel(3, 0), &Rgb([190, 30, 30]));
        assert_eq!(mosaic.get_pixel(0, 3), &Rgb(BLUE));
        assert_eq!(recorder.started, Some(2));
        assert_eq!(recorder.completed, vec![0, 1]);
        assert!(recorder.finished);
    }

    // Tests an empty tile directory fails after loading
    // Verified by returning a blank canvas
    #[test]
    fn test_empty_tile_directory() {
        let temp_dir = TempDir::new().unwrap();
        let tiles_dir = temp_dir.path().join("tiles");
        fs::create_dir(&tiles_dir).unwrap();
        let target = write_image(temp_dir.path(), "target.png", &solid(4, 4, RED));

        let result = create_mosaic(&MosaicConfig::new(target, &tiles_dir, (2, 2)));

        match result {
            Err(MosaicError::EmptyTileSet { directory }) => assert_eq!(directory, tiles_dir),
            other => unreachable!("Expected EmptyTileSet, got {other:?}"),
        }
    }

    // Tests a grid finer than the target fails before tiles are read
    // Verified by moving the geometry check after tile loading
    #[test]
    fn test_grid_exceeding_target() {
        let temp_dir = TempDir::new().unwrap();
        let tiles_dir = temp_dir.path().join("tiles");
        fs::create_dir(&tiles_dir).unwrap();
        let target = write_image(temp_dir.path(), "target.png", &solid(3, 3, RED));

        let result = create_mosaic(&MosaicConfig::new(target, tiles_dir, (4, 2)));

        assert!(matches!(
            result,
            Err(MosaicError::InvalidConfiguration { .. })
        ));
    }

    // Tests a target with alpha aborts the whole run
    // Verified by skipping alpha cells instead
    #[test]
    fn test_alpha_target_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = quadrant_fixture(temp_dir.path());
        let transparent = RgbaImage::from_pixel(4, 4, Rgba([200, 20, 20, 255]));
        config.target_image_path = write_image(
            temp_dir.path(),
            "alpha.png",
            &DynamicImage::ImageRgba8(transparent),
        );

        let err = create_mosaic(&config).unwrap_err();

        assert!(matches!(
            err,
            MosaicError::UnsupportedImageFormat { path: Some(_), .. }
        ));
        assert!(err.to_string().contains("alpha.png"));
    }

    // Tests an undecodable target is reported with its path
    // Verified by dropping the path from the load error
    #[test]
    fn test_undecodable_target() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = quadrant_fixture(temp_dir.path());
        let broken = temp_dir.path().join("broken.png");
        fs::write(&broken, "definitely not a png").unwrap();
        config.target_image_path = broken.clone();

        match create_mosaic(&config) {
            Err(MosaicError::ImageLoad { path, .. }) => assert_eq!(path, broken),
            other => unreachable!("Expected ImageLoad, got {other:?}"),
        }
    }

    // Tests configuration is validated before any decoding
    // Verified by removing the zero grid check
    #[test]
    fn test_validate_configuration() {
        let temp_dir = TempDir::new().unwrap();
        let config = quadrant_fixture(temp_dir.path());
        assert!(config.validate().is_ok());

        let zero_grid = MosaicConfig {
            grid_size: (0, 2),
            ..config.clone()
        };
        assert!(matches!(
            zero_grid.validate(),
            Err(MosaicError::InvalidConfiguration {
                parameter: "grid_size",
                ..
            })
        ));

        let missing_target = MosaicConfig {
            target_image_path: temp_dir.path().join("missing.png"),
            ..config
        };
        assert!(missing_target.validate().is_err());
    }

    // Tests progress reaches every column of a file-based run
    // Verified by skipping the final column notification
    #[test]
    fn test_progress_reported() {
        let temp_dir = TempDir::new().unwrap();
        let config = quadrant_fixture(temp_dir.path());
        let mut recorder = ColumnRecorder::default();

        create_mosaic_with_progress(&config, &mut recorder).unwrap();

        assert_eq!(recorder.completed, vec![0, 1]);
        assert!(recorder.finished);
    }
}
