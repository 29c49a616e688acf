//! @ai:module:intent Bar chart rendering for category results and the score summary
//! @ai:module:layer infrastructure
//! @ai:module:public_api ChartRendererTrait, PlottersChartRenderer, ChartDataset, ChartBar, ChartImage, ChartRenderError
//! @ai:module:stateless true

use crate::analysis::CategoryAnalysis;
use crate::catalog::Category;
use crate::config::ChartConfig;
use crate::layout::ImageFormat;
use crate::scoring::{CategoryScores, ScoreBand};
use plotters::coord::Shift;
use plotters::prelude::*;
use serde::Serialize;
use std::future::Future;
use std::path::Path;
use thiserror::Error;

/// @ai:intent Failure to produce a chart image
#[derive(Error, Debug)]
pub enum ChartRenderError {
    #[error("nothing to draw for chart {0}")]
    EmptyDataset(String),

    #[error("drawing failed: {0}")]
    Drawing(String),

    #[error("render task failed: {0}")]
    Task(String),

    #[error("writing chart failed: {0}")]
    Io(#[from] std::io::Error),
}

/// @ai:intent One bar of a chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub label: String,
    pub value: f64,
    pub rgb: (u8, u8, u8),
    /// Reference threshold shown alongside the value in textual summaries.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

/// @ai:intent Everything needed to draw one bar chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDataset {
    /// File-name friendly identifier, e.g. "air" or "summary".
    pub id: String,
    pub title: String,
    pub y_label: String,
    pub bars: Vec<ChartBar>,
    /// Fixed top of the y axis; derived from the data when absent.
    pub y_max: Option<f64>,
}

impl ChartDataset {
    /// @ai:intent Bars for each evaluated metric of a category, colored by risk level
    /// @ai:effects pure
    pub fn for_category(analysis: &CategoryAnalysis) -> Self {
        let bars = analysis
            .results
            .iter()
            .map(|outcome| ChartBar {
                label: outcome.short_label.to_string(),
                value: outcome.result.value,
                rgb: outcome.result.level.rgb(),
                reference: Some(outcome.reference.to_string()),
            })
            .collect();

        Self {
            id: analysis.category.as_str().to_string(),
            title: analysis.category.title().to_string(),
            y_label: "Measured value".to_string(),
            bars,
            y_max: None,
        }
    }

    /// @ai:intent Bars for each scored category, colored by score band
    /// @ai:effects pure
    pub fn summary(scores: &CategoryScores) -> Self {
        let bars = Category::ALL
            .iter()
            .filter_map(|&category| {
                scores.get(category).map(|score| ChartBar {
                    label: category.short_label().to_string(),
                    value: score,
                    rgb: ScoreBand::from_score(score).rgb(),
                    reference: None,
                })
            })
            .collect();

        Self {
            id: "summary".to_string(),
            title: "Category Health Scores".to_string(),
            y_label: "Score".to_string(),
            bars,
            y_max: Some(100.0),
        }
    }

    /// @ai:intent Top of the y axis, always finite and positive
    /// @ai:effects pure
    pub fn y_ceiling(&self) -> f64 {
        if let Some(max) = self.y_max.filter(|m| m.is_finite() && *m > 0.0) {
            return max;
        }
        let highest = self
            .bars
            .iter()
            .map(|b| b.value)
            .filter(|v| v.is_finite())
            .fold(0.0, f64::max);
        if highest > 0.0 {
            highest * 1.1
        } else {
            1.0
        }
    }

    /// @ai:intent One line per bar, used when the image cannot be drawn
    /// @ai:effects pure
    pub fn summary_lines(&self) -> Vec<String> {
        self.bars
            .iter()
            .map(|bar| match &bar.reference {
                Some(reference) => format!("{}: {} (reference {})", bar.label, bar.value, reference),
                None => format!("{}: {:.1}", bar.label, bar.value),
            })
            .collect()
    }
}

/// @ai:intent Raster chart output with its intrinsic size
#[derive(Debug, Clone, PartialEq)]
pub struct ChartImage {
    pub bytes: Vec<u8>,
    pub width_px: u32,
    pub height_px: u32,
    pub format: ImageFormat,
}

/// @ai:intent Trait for chart rendering
pub trait ChartRendererTrait: Send + Sync {
    /// @ai:intent Render a dataset into an image; same dataset gives the same image
    fn render(
        &self,
        dataset: &ChartDataset,
    ) -> impl Future<Output = Result<ChartImage, ChartRenderError>> + Send;
}

/// @ai:intent Renders bar charts with plotters into RGB buffers or PNG files
#[derive(Debug, Clone)]
pub struct PlottersChartRenderer {
    width_px: u32,
    height_px: u32,
    draw_labels: bool,
}

impl PlottersChartRenderer {
    /// @ai:intent Create a renderer with explicit size and label drawing
    /// @ai:effects pure
    pub fn new(width_px: u32, height_px: u32, draw_labels: bool) -> Self {
        Self {
            width_px,
            height_px,
            draw_labels,
        }
    }

    /// @ai:intent Create a renderer from chart configuration
    /// @ai:effects pure
    pub fn from_config(config: &ChartConfig) -> Self {
        Self::new(config.width_px, config.height_px, config.draw_labels)
    }

    /// @ai:intent Render a dataset into a raw RGB buffer
    /// @ai:effects pure
    pub fn render_rgb(&self, dataset: &ChartDataset) -> Result<ChartImage, ChartRenderError> {
        check_drawable(dataset)?;

        let (w, h) = (self.width_px, self.height_px);
        let mut buffer = vec![255u8; w as usize * h as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (w, h)).into_drawing_area();
            draw_bars(&root, dataset, self.draw_labels)
                .map_err(|e| ChartRenderError::Drawing(e.to_string()))?;
        }

        Ok(ChartImage {
            bytes: buffer,
            width_px: w,
            height_px: h,
            format: ImageFormat::Rgb8,
        })
    }

    /// @ai:intent Render a dataset to a PNG file, replacing any previous file atomically
    /// @ai:post on failure `output_path` is untouched and no temporary file remains
    /// @ai:effects fs:write
    pub fn render_to_file(
        &self,
        dataset: &ChartDataset,
        output_path: &Path,
    ) -> Result<(), ChartRenderError> {
        check_drawable(dataset)?;

        let dir = output_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let temp = tempfile::Builder::new()
            .prefix(".chart-")
            .suffix(".png")
            .tempfile_in(dir)?;

        {
            let root =
                BitMapBackend::new(temp.path(), (self.width_px, self.height_px)).into_drawing_area();
            draw_bars(&root, dataset, self.draw_labels)
                .map_err(|e| ChartRenderError::Drawing(e.to_string()))?;
        }

        temp.persist(output_path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl Default for PlottersChartRenderer {
    fn default() -> Self {
        Self::from_config(&ChartConfig::default())
    }
}

impl ChartRendererTrait for PlottersChartRenderer {
    /// @ai:intent Draw on a blocking thread so the async caller is not stalled
    /// @ai:effects cpu
    async fn render(&self, dataset: &ChartDataset) -> Result<ChartImage, ChartRenderError> {
        let renderer = self.clone();
        let dataset = dataset.clone();

        tokio::task::spawn_blocking(move || renderer.render_rgb(&dataset))
            .await
            .map_err(|e| ChartRenderError::Task(e.to_string()))?
    }
}

/// @ai:effects pure
fn check_drawable(dataset: &ChartDataset) -> Result<(), ChartRenderError> {
    if dataset.bars.is_empty() {
        return Err(ChartRenderError::EmptyDataset(dataset.id.clone()));
    }
    Ok(())
}

/// @ai:intent Draw a bar chart on any plotters backend
/// @ai:effects io
fn draw_bars<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    dataset: &ChartDataset,
    draw_labels: bool,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;

    let count = dataset.bars.len() as i32;
    let y_max = dataset.y_ceiling();

    let mut builder = ChartBuilder::on(root);
    builder.margin(20);
    if draw_labels {
        builder
            .caption(&dataset.title, ("sans-serif", 26))
            .x_label_area_size(40)
            .y_label_area_size(60);
    }

    let mut chart = builder.build_cartesian_2d((0..count).into_segmented(), 0f64..y_max)?;

    if draw_labels {
        chart
            .configure_mesh()
            .disable_x_mesh()
            .y_desc(dataset.y_label.as_str())
            .x_labels(dataset.bars.len())
            .x_label_formatter(&|segment| match segment {
                SegmentValue::CenterOf(index) => dataset
                    .bars
                    .get(*index as usize)
                    .map(|bar| bar.label.clone())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .draw()?;
    }

    chart.draw_series(dataset.bars.iter().enumerate().map(|(index, bar)| {
        let index = index as i32;
        let value = if bar.value.is_finite() {
            bar.value.clamp(0.0, y_max)
        } else {
            y_max
        };
        let color = RGBColor(bar.rgb.0, bar.rgb.1, bar.rgb.2);
        let mut rect = Rectangle::new(
            [
                (SegmentValue::Exact(index), 0.0),
                (SegmentValue::Exact(index + 1), value),
            ],
            color.filled(),
        );
        rect.set_margin(0, 0, 8, 8);
        rect
    }))?;

    root.present()?;
    Ok(())
}

/// @ai:intent Mock renderer returning a blank image of fixed size
pub struct MockChartRenderer {
    width_px: u32,
    height_px: u32,
    calls: std::sync::atomic::AtomicUsize,
}

impl MockChartRenderer {
    /// @ai:intent Create a mock renderer producing images of the given size
    /// @ai:effects pure
    pub fn new(width_px: u32, height_px: u32) -> Self {
        Self {
            width_px,
            height_px,
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// @ai:intent Number of render requests received
    /// @ai:effects pure
    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

impl ChartRendererTrait for MockChartRenderer {
    /// @ai:intent Return a white RGB image
    /// @ai:effects state:write
    async fn render(&self, dataset: &ChartDataset) -> Result<ChartImage, ChartRenderError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        check_drawable(dataset)?;
        Ok(ChartImage {
            bytes: vec![255; self.width_px as usize * self.height_px as usize * 3],
            width_px: self.width_px,
            height_px: self.height_px,
            format: ImageFormat::Rgb8,
        })
    }
}

/// @ai:intent Renderer that always fails, for exercising fallbacks
pub struct FailingChartRenderer;

impl ChartRendererTrait for FailingChartRenderer {
    /// @ai:effects pure
    async fn render(&self, dataset: &ChartDataset) -> Result<ChartImage, ChartRenderError> {
        Err(ChartRenderError::Drawing(format!(
            "renderer unavailable for {}",
            dataset.id
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn dataset() -> ChartDataset {
        ChartDataset {
            id: "air".to_string(),
            title: "Air Quality Tests".to_string(),
            y_label: "Measured value".to_string(),
            bars: vec![
                ChartBar {
                    label: "CO2".to_string(),
                    value: 800.0,
                    rgb: (34, 197, 94),
                    reference: Some("<=1000 ppm".to_string()),
                },
                ChartBar {
                    label: "PM 2.5".to_string(),
                    value: 40.0,
                    rgb: (239, 68, 68),
                    reference: None,
                },
            ],
            y_max: None,
        }
    }

    #[tokio::test]
    async fn test_render_rgb_buffer() {
        let renderer = PlottersChartRenderer::new(320, 200, false);
        let image = renderer.render(&dataset()).await.unwrap();

        assert_eq!(image.width_px, 320);
        assert_eq!(image.height_px, 200);
        assert_eq!(image.bytes.len(), 320 * 200 * 3);
        assert_eq!(image.format, ImageFormat::Rgb8);
        // Bars leave colored pixels behind.
        assert!(image.bytes.iter().any(|&b| b != 255));
    }

    #[tokio::test]
    async fn test_render_is_idempotent() {
        let renderer = PlottersChartRenderer::new(200, 120, false);
        let first = renderer.render(&dataset()).await.unwrap();
        let second = renderer.render(&dataset()).await.unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_to_png_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("air.png");

        PlottersChartRenderer::new(200, 120, false)
            .render_to_file(&dataset(), &path)
            .unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], b"\x89PNG");
    }

    #[test]
    fn test_render_to_file_leaves_no_partial_files() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("air.png");
        std::fs::write(&path, b"old").unwrap();

        let renderer = PlottersChartRenderer::new(200, 120, false);
        renderer.render_to_file(&dataset(), &path).unwrap();

        let empty = ChartDataset {
            bars: vec![],
            ..dataset()
        };
        assert!(renderer.render_to_file(&empty, &path).is_err());

        let names: Vec<_> = std::fs::read_dir(temp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["air.png".to_string()]);
        assert_eq!(&std::fs::read(&path).unwrap()[..4], b"\x89PNG");
    }

    #[tokio::test]
    async fn test_empty_dataset_fails() {
        let empty = ChartDataset {
            bars: vec![],
            ..dataset()
        };
        let err = PlottersChartRenderer::new(100, 100, false)
            .render(&empty)
            .await
            .unwrap_err();
        assert!(matches!(err, ChartRenderError::EmptyDataset(id) if id == "air"));
    }

    #[test]
    fn test_y_ceiling() {
        assert!((dataset().y_ceiling() - 880.0).abs() < 1e-9);
        let fixed = ChartDataset {
            y_max: Some(100.0),
            ..dataset()
        };
        assert_eq!(fixed.y_ceiling(), 100.0);
        let flat = ChartDataset {
            bars: vec![],
            ..dataset()
        };
        assert_eq!(flat.y_ceiling(), 1.0);
    }

    #[test]
    fn test_summary_dataset_skips_missing_categories() {
        let scores = CategoryScores {
            air: Some(100.0),
            water: None,
            surface: Some(40.0),
            dust: None,
        };
        let summary = ChartDataset::summary(&scores);
        let labels: Vec<_> = summary.bars.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["Air", "Surface"]);
        assert_eq!(summary.bars[1].rgb, ScoreBand::Poor.rgb());
    }

    #[tokio::test]
    async fn test_mock_and_failing_renderers() {
        let mock = MockChartRenderer::new(10, 5);
        let image = mock.render(&dataset()).await.unwrap();
        assert_eq!(image.bytes.len(), 150);
        assert_eq!(mock.calls(), 1);

        assert!(FailingChartRenderer.render(&dataset()).await.is_err());
    }
}
