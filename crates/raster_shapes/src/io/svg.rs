use std::path::Path;

use crate::{error::Result, types::ExtractedShapes};

impl ExtractedShapes {
    /// Render as SVG: one `<polygon>` per polygon followed by one `<line>`
    /// per line, colored by `#RRGGBB`. The canvas is one unit per cell.
    pub fn to_svg(&self) -> String {
        let mut svg = format!(
            "<svg width=\"{}\" height=\"{}\">\n <g>\n",
            self.column_count, self.row_count
        );

        for polygon in &self.polygons {
            let hex = polygon.color.to_hex();
            svg.push_str(&format!("  <polygon class=\"{hex}\" points=\""));
            for vertex in &polygon.vertices {
                svg.push_str(&format!("{vertex} "));
            }
            svg.push_str(&format!("\" stroke=\"{hex}\" fill=\"{hex}\" />\n"));
        }

        for line in &self.lines {
            let hex = line.color.to_hex();
            svg.push_str(&format!(
                "  <line class=\"{hex}\" x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{hex}\" fill=\"{hex}\" />\n",
                line.start.column, line.start.row, line.end.column, line.end.row
            ));
        }

        svg.push_str(" </g>\n</svg>");
        svg
    }

    /// Save SVG to file
    pub fn save_svg<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_svg())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::grid::Grid;
    use crate::types::Color;
    use crate::Pipeline;

    #[test]
    fn test_svg_text() {
        let a = Color::rgba(1, 1, 1, 1);
        let b = Color::rgba(2, 2, 222, 2);
        let c = Color::rgba(223, 3, 3, 3);
        let grid = Grid::from_rows(vec![
            vec![b, a, a, a, a],
            vec![a, a, a, a, a],
            vec![c, a, a, a, c],
            vec![c, c, a, a, c],
        ])
        .expect("grid");

        let svg = Pipeline::default().process(grid).to_svg();
        let expected = r##"<svg width="5" height="4">
 <g>
  <polygon class="#010101" points="0,1 1,0 4,0 4,1 3,2 3,3 2,3 1,2 " stroke="#010101" fill="#010101" />
  <polygon class="#DF0303" points="0,2 1,3 0,3 " stroke="#DF0303" fill="#DF0303" />
  <line class="#0202DE" x1="0" y1="0" x2="0" y2="0" stroke="#0202DE" fill="#0202DE" />
  <line class="#DF0303" x1="4" y1="2" x2="4" y2="3" stroke="#DF0303" fill="#DF0303" />
 </g>
</svg>"##;
        assert_eq!(svg, expected);
    }

    #[test]
    fn test_save_svg() {
        let grid = Grid::filled(2, 2, Color::rgb(10, 20, 30)).expect("grid");
        let shapes = Pipeline::default().process(grid);
        let path = std::env::temp_dir().join("raster_shapes_save_svg.svg");
        shapes.save_svg(&path).expect("write svg");
        let written = std::fs::read_to_string(&path).expect("read svg");
        assert!(written.starts_with("<svg width=\"2\" height=\"2\">"));
        assert!(written.contains("#0A141E"));
        let _ = std::fs::remove_file(path);
    }
}
