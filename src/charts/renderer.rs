//! Static Map Renderer
//! Draws a state's accident locations as a PNG with plotters.
//!
//! Layout:
//! 1. Title: "FARS {year}: state {state}" centered
//! 2. Base map: longitude/latitude graticule framed by the accident extent
//! 3. One small black dot per accident

use plotters::prelude::*;
use std::error::Error as StdError;
use std::path::Path;
use tracing::{debug, warn};

use crate::charts::state_map::StateMap;
use crate::config::MapConfig;
use crate::error::{Error, Result};

const GRID: RGBColor = RGBColor(200, 200, 200);

/// Something that can draw a prepared state map.
pub trait MapRenderer {
    fn render(&mut self, map: &StateMap) -> Result<()>;
}

/// Writes state maps to a PNG file.
#[derive(Debug, Clone)]
pub struct PngMapRenderer {
    config: MapConfig,
}

impl PngMapRenderer {
    pub fn new(config: MapConfig) -> Self {
        Self { config }
    }

    pub fn output(&self) -> &Path {
        &self.config.output
    }

    fn draw(&self, map: &StateMap) -> std::result::Result<(), Box<dyn StdError>> {
        let (lon_range, lat_range) = map.bounds.padded();
        let size = (self.config.width, self.config.height);

        let root = BitMapBackend::new(&self.config.output, size).into_drawing_area();
        root.fill(&WHITE)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("FARS {}: state {}", map.year, map.state),
                ("sans-serif", 20),
            )
            .margin(10)
            .x_label_area_size(40)
            .y_label_area_size(50)
            .build_cartesian_2d(lon_range, lat_range)?;

        chart
            .configure_mesh()
            .x_desc("Longitude")
            .y_desc("Latitude")
            .light_line_style(GRID.mix(0.4))
            .bold_line_style(GRID)
            .draw()?;

        let radius = self.config.point_radius;
        chart.draw_series(
            map.points
                .iter()
                .map(|&(lon, lat)| Circle::new((lon, lat), radius, BLACK.filled())),
        )?;

        root.present()?;
        Ok(())
    }
}

impl MapRenderer for PngMapRenderer {
    fn render(&mut self, map: &StateMap) -> Result<()> {
        self.draw(map).map_err(|e| Error::render(e.to_string()))?;
        debug!(output = %self.config.output.display(), "wrote state map");

        if self.config.open_viewer {
            if let Err(err) = open::that(&self.config.output) {
                warn!(
                    output = %self.config.output.display(),
                    error = %err,
                    "could not open map viewer"
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::state_map::MapBounds;
    use tempfile::tempdir;

    fn sample_map() -> StateMap {
        StateMap {
            state: 1,
            year: "2013".to_string(),
            bounds: MapBounds {
                min_lon: -88.0,
                max_lon: -86.1,
                min_lat: 32.0,
                max_lat: 34.5,
            },
            points: vec![(-86.1, 34.5), (-88.0, 32.0)],
        }
    }

    #[test]
    #[ignore = "needs system fonts for axis labels"]
    fn test_png_written() {
        let dir = tempdir().unwrap();
        let output = dir.path().join("map.png");
        let mut renderer = PngMapRenderer::new(MapConfig {
            output: output.clone(),
            width: 320,
            height: 240,
            ..MapConfig::default()
        });

        renderer.render(&sample_map()).unwrap();
        assert!(output.metadata().unwrap().len() > 0);
    }

    #[test]
    fn test_unwritable_output_is_render_error() {
        let dir = tempdir().unwrap();
        let mut renderer = PngMapRenderer::new(MapConfig {
            output: dir.path().join("no_such_dir").join("map.png"),
            width: 320,
            height: 240,
            ..MapConfig::default()
        });

        let err = renderer.render(&sample_map()).unwrap_err();
        assert!(matches!(err, Error::Render(_)));
    }
}
