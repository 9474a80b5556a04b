use raster_shapes::{
    AlphaMode, Color, ExtractedShapes, Grid, GridSource, OutputFormat, Pipeline, RasterSource,
    ShapeError, TextArt,
};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ShapesCliError {
    #[error(transparent)]
    SerdeError(#[from] serde_json::Error),
    #[error(transparent)]
    TomlDeError(#[from] toml::de::Error),
    #[error(transparent)]
    TomlSerError(#[from] toml::ser::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    ShapeError(#[from] ShapeError),
    #[error("Palette key '{0}' must be a single character")]
    InvalidPaletteKey(String),
    #[error("Unsupported file format. Please use .toml or .json files")]
    UnsupportedFileFormat,
}

/// Where the cells of a conversion job come from
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputSource {
    /// A raster image file (PNG, JPEG, TIFF, ...)
    Image {
        path: String,
        #[serde(default)]
        alpha: AlphaMode,
    },
    /// Rows of characters, each mapped to an RGBA color
    TextArt {
        rows: Vec<String>,
        palette: BTreeMap<String, [u8; 4]>,
    },
    /// The built-in sailboat scene
    Sailboat,
}

impl InputSource {
    /// Decode the input into a fresh grid
    pub fn load_grid(&self) -> Result<Grid, ShapesCliError> {
        match self {
            InputSource::Image { path, alpha } => Ok(RasterSource::open(path, *alpha)?.to_grid()?),
            InputSource::TextArt { rows, palette } => Ok(text_art(rows, palette)?.to_grid()?),
            InputSource::Sailboat => Ok(TextArt::sailboat().to_grid()?),
        }
    }
}

fn text_art(rows: &[String], palette: &BTreeMap<String, [u8; 4]>) -> Result<TextArt, ShapesCliError> {
    palette
        .iter()
        .try_fold(TextArt::new(rows.iter().cloned()), |art, (key, rgba)| {
            let mut chars = key.chars();
            match (chars.next(), chars.next()) {
                (Some(symbol), None) => Ok(art.with_symbol(symbol, Color(*rgba))),
                _ => Err(ShapesCliError::InvalidPaletteKey(key.clone())),
            }
        })
}

fn default_reduce() -> bool {
    true
}

/// One file written by a conversion job
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct OutputTarget {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub format: OutputFormat,
    /// Collapse straight runs and staircases in polygon outlines
    #[serde(default = "default_reduce")]
    pub reduce: bool,
}

impl OutputTarget {
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.format.extension())
    }
}

/// Conversion job configuration
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ConversionJob {
    pub input: InputSource,
    pub output_dir: String,
    pub outputs: Vec<OutputTarget>,
}

impl ConversionJob {
    /// Load ConversionJob configuration from a TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ShapesCliError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load ConversionJob configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self, ShapesCliError> {
        Ok(toml::from_str(content)?)
    }

    /// Load ConversionJob configuration from a JSON file
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ShapesCliError> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Load ConversionJob configuration from JSON string
    pub fn from_json(content: &str) -> Result<Self, ShapesCliError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Auto-detect file format and load configuration
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ShapesCliError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(ShapesCliError::UnsupportedFileFormat),
        }
    }

    /// Job that converts one image into one output file
    pub fn single_image(
        input: &Path,
        output: &Path,
        format: OutputFormat,
        alpha: AlphaMode,
        reduce: bool,
    ) -> Self {
        let name = output
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "shapes".to_string());
        let output_dir = output
            .parent()
            .map(|dir| dir.display().to_string())
            .unwrap_or_default();

        Self {
            input: InputSource::Image {
                path: input.display().to_string(),
                alpha,
            },
            output_dir,
            outputs: vec![OutputTarget {
                name,
                description: None,
                format,
                reduce,
            }],
        }
    }

    /// Save using the format implied by the file extension
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ShapesCliError> {
        let path_ref = path.as_ref();
        match path_ref.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => self.to_toml_file(path),
            Some("json") => self.to_json_file(path),
            _ => Err(ShapesCliError::UnsupportedFileFormat),
        }
    }

    /// Save ConversionJob configuration to a TOML file
    pub fn to_toml_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ShapesCliError> {
        let content = self.to_toml()?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Convert ConversionJob to TOML string
    pub fn to_toml(&self) -> Result<String, ShapesCliError> {
        Ok(toml::to_string_pretty(&self)?)
    }

    /// Save ConversionJob configuration to a JSON file
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ShapesCliError> {
        let content = self.to_json()?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Convert ConversionJob to JSON string
    pub fn to_json(&self) -> Result<String, ShapesCliError> {
        Ok(serde_json::to_string_pretty(&self)?)
    }

    /// JSON schema of the job file
    pub fn schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ConversionJob)
    }

    pub fn output_path(&self, target: &OutputTarget) -> PathBuf {
        Path::new(&self.output_dir).join(target.file_name())
    }

    /// Decode the input once and write every requested output.
    ///
    /// Each output gets its own copy of the grid, since extraction consumes it.
    pub fn run(&self) -> Result<Vec<PathBuf>, ShapesCliError> {
        let grid = self.input.load_grid()?;
        info!(
            columns = grid.column_count(),
            rows = grid.row_count(),
            "Loaded input grid"
        );
        fs::create_dir_all(&self.output_dir)?;

        let mut written = Vec::with_capacity(self.outputs.len());
        for target in &self.outputs {
            let path = self.output_path(target);
            info!("Writing '{}' -> {}", target.name, path.display());

            let shapes = convert(grid.clone(), target.reduce);
            shapes.save(&path, target.format)?;
            written.push(path);
        }
        Ok(written)
    }
}

/// Run the default pipeline on `grid`, optionally without outline reduction
pub fn convert(grid: Grid, reduce: bool) -> ExtractedShapes {
    let shapes = Pipeline::builder().with_reduction(reduce).build().process(grid);
    info!(
        polygons = shapes.polygons.len(),
        lines = shapes.lines.len(),
        "Extracted shapes"
    );
    shapes
}

#[cfg(test)]
mod tests {
    use super::*;

    const JOB_TOML: &str = r#"
output_dir = "out/flags"

[input]
type = "text_art"
rows = ["rrw", "rww"]

[input.palette]
r = [200, 0, 0, 255]
w = [255, 255, 255, 255]

[[outputs]]
name = "flag"
format = "svg"

[[outputs]]
name = "flag_raw"
description = "every outline step kept"
format = "geojson"
reduce = false
"#;

    #[test]
    fn test_job_from_toml() {
        let job = ConversionJob::from_toml(JOB_TOML).expect("valid job");
        assert_eq!(job.output_dir, "out/flags");
        assert_eq!(job.outputs.len(), 2);
        assert!(job.outputs[0].reduce);
        assert!(!job.outputs[1].reduce);
        assert_eq!(job.outputs[1].format, OutputFormat::GeoJson);
        assert_eq!(job.output_path(&job.outputs[1]), Path::new("out/flags/flag_raw.geojson"));

        let grid = job.input.load_grid().expect("grid");
        assert_eq!(grid.column_count(), 3);
        assert_eq!(grid.color(0, 0), Color([200, 0, 0, 255]));
    }

    #[test]
    fn test_toml_and_json_round_trip() {
        let job = ConversionJob::from_toml(JOB_TOML).expect("valid job");
        let from_toml = ConversionJob::from_toml(&job.to_toml().expect("toml")).expect("parse toml");
        let from_json = ConversionJob::from_json(&job.to_json().expect("json")).expect("parse json");
        assert_eq!(from_toml, job);
        assert_eq!(from_json, job);
    }

    #[test]
    fn test_image_input_defaults_to_ignoring_alpha() {
        let job = ConversionJob::from_json(
            r#"{
                "input": { "type": "image", "path": "sprite.png" },
                "output_dir": "out",
                "outputs": [{ "name": "sprite" }]
            }"#,
        )
        .expect("valid job");
        assert_eq!(
            job.input,
            InputSource::Image {
                path: "sprite.png".to_string(),
                alpha: AlphaMode::Ignore
            }
        );
        assert_eq!(job.outputs[0].format, OutputFormat::Svg);
    }

    #[test]
    fn test_invalid_palette_key() {
        let input = InputSource::TextArt {
            rows: vec!["ab".to_string()],
            palette: BTreeMap::from([("ab".to_string(), [0, 0, 0, 255])]),
        };
        assert!(matches!(
            input.load_grid(),
            Err(ShapesCliError::InvalidPaletteKey(key)) if key == "ab"
        ));
    }

    #[test]
    fn test_unsupported_config_extension() {
        assert!(matches!(
            ConversionJob::from_file("job.yaml"),
            Err(ShapesCliError::UnsupportedFileFormat)
        ));
    }

    #[test]
    fn test_single_image_job_saves_and_loads() {
        let job = ConversionJob::single_image(
            Path::new("art/sprite.png"),
            Path::new("out/sprite.geojson"),
            OutputFormat::GeoJson,
            AlphaMode::Keep,
            false,
        );
        assert_eq!(job.output_dir, "out");
        assert_eq!(job.output_path(&job.outputs[0]), Path::new("out/sprite.geojson"));
        assert!(!job.outputs[0].reduce);

        let dir = std::env::temp_dir();
        for file_name in ["shapes_cli_job.toml", "shapes_cli_job.json"] {
            let path = dir.join(file_name);
            job.to_file(&path).expect("job saved");
            assert_eq!(ConversionJob::from_file(&path).expect("job loads"), job);
            let _ = fs::remove_file(path);
        }
        assert!(matches!(
            job.to_file(dir.join("shapes_cli_job.yaml")),
            Err(ShapesCliError::UnsupportedFileFormat)
        ));
    }

    #[test]
    fn test_run_writes_every_output() {
        let output_dir = std::env::temp_dir().join("shapes_cli_run_test");
        let job = ConversionJob {
            input: InputSource::Sailboat,
            output_dir: output_dir.display().to_string(),
            outputs: vec![
                OutputTarget {
                    name: "boat".to_string(),
                    description: None,
                    format: OutputFormat::Svg,
                    reduce: true,
                },
                OutputTarget {
                    name: "boat".to_string(),
                    description: None,
                    format: OutputFormat::Json,
                    reduce: false,
                },
            ],
        };

        let written = job.run().expect("job runs");
        assert_eq!(written.len(), 2);
        let svg = fs::read_to_string(&written[0]).expect("svg written");
        assert!(svg.starts_with("<svg width=\"20\" height=\"14\">"));
        let json = fs::read_to_string(&written[1]).expect("json written");
        let shapes: ExtractedShapes = serde_json::from_str(&json).expect("shapes json");
        assert_eq!(shapes.claimed_cells(), 20 * 14);

        let _ = fs::remove_dir_all(output_dir);
    }

    #[test]
    fn test_schema_names_fields() {
        let schema = serde_json::to_string(&ConversionJob::schema()).expect("schema json");
        assert!(schema.contains("output_dir"));
        assert!(schema.contains("text_art"));
    }
}
