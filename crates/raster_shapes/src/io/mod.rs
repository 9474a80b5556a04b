pub mod geojson;
pub mod raster;
pub mod svg;
pub mod text;

pub use raster::{load_grid, AlphaMode, RasterSource};
pub use text::TextArt;

use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};

use crate::{
    error::{Result, ShapeError},
    types::ExtractedShapes,
};

/// File formats extracted shapes can be written as
#[derive(
    Debug, Clone, Copy, Default,
    PartialEq, Eq,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Svg,
    #[serde(rename = "geojson")]
    #[strum(serialize = "geojson")]
    GeoJson,
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::GeoJson => "geojson",
            OutputFormat::Json => "json",
        }
    }

    /// Pick the format from a file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("svg") => Ok(OutputFormat::Svg),
            Some("geojson") => Ok(OutputFormat::GeoJson),
            Some("json") => Ok(OutputFormat::Json),
            _ => Err(ShapeError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

impl ExtractedShapes {
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn render(&self, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Svg => Ok(self.to_svg()),
            OutputFormat::GeoJson => self.to_geojson_string(),
            OutputFormat::Json => self.to_json_string(),
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P, format: OutputFormat) -> Result<()> {
        std::fs::write(path, self.render(format)?)?;
        Ok(())
    }

    /// Save using the format implied by the file extension
    pub fn save_auto<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let format = OutputFormat::from_path(&path)?;
        self.save(path, format)
    }
}
