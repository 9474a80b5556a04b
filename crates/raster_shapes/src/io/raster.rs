use std::path::Path;

use image::{DynamicImage, RgbaImage};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};

use crate::{
    error::Result,
    grid::Grid,
    traits::GridSource,
    types::Color,
};

/// How the alpha channel of decoded pixels takes part in color matching
#[derive(
    Debug, Clone, Copy, Default,
    PartialEq, Eq,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AlphaMode {
    /// Every pixel is treated as opaque; only RGB decides matching
    #[default]
    Ignore,
    /// Pixels differing only in alpha are different colors
    Keep,
}

impl AlphaMode {
    fn apply(self, pixel: image::Rgba<u8>) -> Color {
        let [red, green, blue, alpha] = pixel.0;
        match self {
            AlphaMode::Ignore => Color::rgb(red, green, blue),
            AlphaMode::Keep => Color::rgba(red, green, blue, alpha),
        }
    }
}

impl Grid {
    /// One cell per pixel, column `x`, row `y`
    pub fn from_rgba_image(image: &RgbaImage, alpha: AlphaMode) -> Result<Self> {
        let columns = (0..image.width())
            .map(|x| {
                (0..image.height())
                    .map(|y| alpha.apply(*image.get_pixel(x, y)))
                    .collect()
            })
            .collect();
        Grid::from_columns(columns)
    }

    pub fn from_image(image: &DynamicImage, alpha: AlphaMode) -> Result<Self> {
        Grid::from_rgba_image(&image.to_rgba8(), alpha)
    }
}

/// A decoded raster paired with its alpha handling
#[derive(Debug, Clone)]
pub struct RasterSource {
    pub image: RgbaImage,
    pub alpha: AlphaMode,
}

impl RasterSource {
    pub fn new(image: &DynamicImage, alpha: AlphaMode) -> Self {
        Self {
            image: image.to_rgba8(),
            alpha,
        }
    }

    /// Decode any format the `image` crate recognises
    pub fn open<P: AsRef<Path>>(path: P, alpha: AlphaMode) -> Result<Self> {
        let image = image::open(path)?;
        Ok(Self::new(&image, alpha))
    }
}

impl GridSource for RasterSource {
    fn to_grid(&self) -> Result<Grid> {
        Grid::from_rgba_image(&self.image, self.alpha)
    }
}

impl GridSource for RgbaImage {
    fn to_grid(&self) -> Result<Grid> {
        Grid::from_rgba_image(self, AlphaMode::Keep)
    }
}

/// Load an image file straight into a grid
pub fn load_grid<P: AsRef<Path>>(path: P, alpha: AlphaMode) -> Result<Grid> {
    RasterSource::open(path, alpha)?.to_grid()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShapeError;
    use image::Rgba;

    fn two_tone() -> RgbaImage {
        let mut image = RgbaImage::from_pixel(4, 3, Rgba([0, 0, 150, 255]));
        image.put_pixel(3, 0, Rgba([0, 0, 150, 10]));
        image.put_pixel(1, 2, Rgba([220, 50, 0, 255]));
        image
    }

    #[test]
    fn test_pixels_map_to_columns() {
        let grid = Grid::from_rgba_image(&two_tone(), AlphaMode::Ignore).expect("grid");
        assert_eq!(grid.column_count(), 4);
        assert_eq!(grid.row_count(), 3);
        assert_eq!(grid.color(1, 2), Color::rgb(220, 50, 0));
        assert_eq!(grid.color(3, 0), grid.color(0, 0));
    }

    #[test]
    fn test_keep_alpha_separates_colors() {
        let grid = two_tone().to_grid().expect("grid");
        assert_ne!(grid.color(3, 0), grid.color(0, 0));
        assert_eq!(grid.color(3, 0).alpha(), 10);
    }

    #[test]
    fn test_empty_image_is_rejected() {
        let empty = RgbaImage::new(0, 0);
        assert!(matches!(
            Grid::from_rgba_image(&empty, AlphaMode::Ignore),
            Err(ShapeError::EmptyGrid)
        ));
    }

    #[test]
    fn test_png_round_trip() {
        let path = std::env::temp_dir().join("raster_shapes_two_tone.png");
        two_tone().save(&path).expect("write png");
        let grid = load_grid(&path, AlphaMode::Ignore).expect("decode png");
        assert_eq!(grid.color(1, 2), Color::rgb(220, 50, 0));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_missing_file_is_image_error() {
        let result = load_grid("/nonexistent/raster_shapes.png", AlphaMode::Ignore);
        assert!(matches!(result, Err(ShapeError::ImageLoad(_))));
    }
}
