use std::path::Path;

use geojson::{feature::Id, Feature, FeatureCollection, Geometry, JsonObject, Value};
use serde_json::Number;

use crate::{
    error::Result,
    types::{ExtractedShapes, GridPoint, Line, Polygon},
};

fn position(point: GridPoint) -> Vec<f64> {
    vec![point.column as f64, point.row as f64]
}

fn polygon_feature(index: usize, polygon: &Polygon) -> Feature {
    let mut ring: Vec<Vec<f64>> = polygon.vertices.iter().copied().map(position).collect();
    if let Some(first) = ring.first().cloned() {
        ring.push(first);
    }

    let mut properties = JsonObject::new();
    properties.insert("kind".to_string(), "polygon".into());
    properties.insert("color".to_string(), polygon.color.to_hex().into());
    properties.insert("area".to_string(), polygon.area().into());
    properties.insert("cell_count".to_string(), polygon.cell_count().into());
    properties.insert("vertex_count".to_string(), polygon.vertices.len().into());

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(Value::Polygon(vec![ring]))),
        id: Some(Id::Number(Number::from(index))),
        properties: Some(properties),
        foreign_members: None,
    }
}

fn line_feature(index: usize, line: &Line) -> Feature {
    // a dot is a zero-length run; keep it as a point
    let (kind, value) = if line.is_dot() {
        ("dot", Value::Point(position(line.start)))
    } else {
        (
            "line",
            Value::LineString(vec![position(line.start), position(line.end)]),
        )
    };

    let mut properties = JsonObject::new();
    properties.insert("kind".to_string(), kind.into());
    properties.insert("color".to_string(), line.color.to_hex().into());
    properties.insert("cell_count".to_string(), line.cell_count().into());

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: Some(Id::Number(Number::from(index))),
        properties: Some(properties),
        foreign_members: None,
    }
}

impl ExtractedShapes {
    /// Export polygons and lines as one FeatureCollection, polygons first.
    ///
    /// Coordinates are grid coordinates: x is the column, y the row.
    pub fn to_geojson(&self) -> FeatureCollection {
        let polygons = self
            .polygons
            .iter()
            .enumerate()
            .map(|(index, polygon)| polygon_feature(index, polygon));
        let lines = self
            .lines
            .iter()
            .enumerate()
            .map(|(index, line)| line_feature(self.polygons.len() + index, line));

        let mut foreign_members = JsonObject::new();
        foreign_members.insert("grid_columns".to_string(), self.column_count.into());
        foreign_members.insert("grid_rows".to_string(), self.row_count.into());
        foreign_members.insert("polygon_count".to_string(), self.polygons.len().into());
        foreign_members.insert("line_count".to_string(), self.lines.len().into());

        FeatureCollection {
            bbox: None,
            features: polygons.chain(lines).collect(),
            foreign_members: Some(foreign_members),
        }
    }

    /// Export to GeoJSON and serialize to JSON string
    pub fn to_geojson_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_geojson())?)
    }

    /// Save GeoJSON to file
    pub fn save_geojson<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_geojson_string()?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::grid::test_support::grid;
    use crate::Pipeline;
    use geojson::Value;

    #[test]
    fn test_geojson_export() {
        let shapes = Pipeline::default().process(grid(&[
            "BAAAA",
            "AAAAA",
            "CAAAC",
            "CCAAC",
        ]));
        let collection = shapes.to_geojson();
        assert_eq!(collection.features.len(), 4);

        let members = collection.foreign_members.as_ref().expect("metadata");
        assert_eq!(members["grid_columns"], 5);
        assert_eq!(members["polygon_count"], 2);
        assert_eq!(members["line_count"], 2);

        let first = &collection.features[0];
        let Some(Value::Polygon(rings)) = first.geometry.as_ref().map(|g| &g.value) else {
            panic!("expected a polygon geometry");
        };
        assert_eq!(rings[0].len(), shapes.polygons[0].vertices.len() + 1);
        assert_eq!(rings[0].first(), rings[0].last());
        assert_eq!(first.property("kind").and_then(|v| v.as_str()), Some("polygon"));
        assert_eq!(first.property("cell_count").and_then(|v| v.as_u64()), Some(14));

        let dot = &collection.features[2];
        assert!(matches!(dot.geometry.as_ref().map(|g| &g.value), Some(Value::Point(_))));
        let run = &collection.features[3];
        assert!(matches!(run.geometry.as_ref().map(|g| &g.value), Some(Value::LineString(_))));
    }

    #[test]
    fn test_geojson_string_parses_back() {
        let shapes = Pipeline::default().process(grid(&["ab", "ab"]));
        let text = shapes.to_geojson_string().expect("serialize");
        let parsed: geojson::GeoJson = text.parse().expect("valid GeoJSON");
        assert!(matches!(parsed, geojson::GeoJson::FeatureCollection(_)));
    }
}
