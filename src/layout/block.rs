//! @ai:module:intent Content blocks fed to the paginator: wrapped text and raster images
//! @ai:module:layer domain
//! @ai:module:public_api ContentBlock, TextBlock, TextRole, ImageBlock, ImageFormat, FitBox, wrap_text
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};

/// @ai:intent What a text block represents in the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    Title,
    ClientInfo,
    SectionHeading,
    Metric,
    Guidance,
    Placeholder,
    Unavailable,
    ChartFallback,
    OverallScore,
    Recommendation,
}

/// @ai:intent Pre-wrapped lines of text with a fixed line height
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextBlock {
    pub role: TextRole,
    pub lines: Vec<String>,
    pub line_height_pt: f64,
    pub min_height_pt: f64,
    /// Extra room that must remain below this block on the same page,
    /// so headings are not stranded at the bottom.
    pub keep_with_next_pt: f64,
}

impl TextBlock {
    /// @ai:intent Create a text block from already wrapped lines
    /// @ai:effects pure
    pub fn new(role: TextRole, lines: Vec<String>, line_height_pt: f64) -> Self {
        Self {
            role,
            lines,
            line_height_pt,
            min_height_pt: 0.0,
            keep_with_next_pt: 0.0,
        }
    }

    /// @ai:effects pure
    pub fn with_min_height(mut self, min_height_pt: f64) -> Self {
        self.min_height_pt = min_height_pt;
        self
    }

    /// @ai:effects pure
    pub fn keep_with_next(mut self, reserve_pt: f64) -> Self {
        self.keep_with_next_pt = reserve_pt;
        self
    }

    /// @ai:intent Vertical space the block occupies
    /// @ai:post lines * line height, never below the minimum height
    /// @ai:effects pure
    pub fn height_pt(&self) -> f64 {
        (self.lines.len() as f64 * self.line_height_pt).max(self.min_height_pt)
    }

    /// @ai:effects pure
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// @ai:intent Pixel layout of image bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Raw 8-bit RGB triples, row-major.
    Rgb8,
    Png,
}

/// @ai:intent Bounding box an image is scaled down into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitBox {
    pub max_width_pt: f64,
    pub max_height_pt: f64,
}

/// @ai:intent Opaque raster image with its intrinsic pixel size
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageBlock {
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub natural_width_px: u32,
    pub natural_height_px: u32,
    pub format: ImageFormat,
    /// Caption or alt text, e.g. the chart title.
    pub label: String,
    /// Page content area when absent.
    pub fit: Option<FitBox>,
}

impl ImageBlock {
    /// @ai:intent Create an image block
    /// @ai:effects pure
    pub fn new(
        bytes: Vec<u8>,
        natural_width_px: u32,
        natural_height_px: u32,
        format: ImageFormat,
        label: &str,
    ) -> Self {
        Self {
            bytes,
            natural_width_px,
            natural_height_px,
            format,
            label: label.to_string(),
            fit: None,
        }
    }

    /// @ai:effects pure
    pub fn fit_into(mut self, fit: FitBox) -> Self {
        self.fit = Some(fit);
        self
    }

    /// @ai:intent Size in points after fitting, preserving aspect ratio
    /// @ai:pre px_to_pt > 0
    /// @ai:post never larger than the natural size; (0, 0) for an empty image
    /// @ai:effects pure
    pub fn fitted_size(&self, px_to_pt: f64, default_box: FitBox) -> (f64, f64) {
        if self.natural_width_px == 0 || self.natural_height_px == 0 {
            return (0.0, 0.0);
        }

        let natural_w = self.natural_width_px as f64 * px_to_pt;
        let natural_h = self.natural_height_px as f64 * px_to_pt;
        let fit = self.fit.unwrap_or(default_box);

        let scale = (fit.max_width_pt / natural_w)
            .min(fit.max_height_pt / natural_h)
            .min(1.0)
            .max(0.0);

        (natural_w * scale, natural_h * scale)
    }
}

/// @ai:intent A unit of report content placed by the paginator
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text(TextBlock),
    Image(ImageBlock),
}

impl ContentBlock {
    /// @ai:effects pure
    pub fn keep_with_next_pt(&self) -> f64 {
        match self {
            ContentBlock::Text(text) => text.keep_with_next_pt,
            ContentBlock::Image(_) => 0.0,
        }
    }

    /// @ai:effects pure
    pub fn as_text(&self) -> Option<&TextBlock> {
        match self {
            ContentBlock::Text(text) => Some(text),
            ContentBlock::Image(_) => None,
        }
    }

    /// @ai:effects pure
    pub fn as_image(&self) -> Option<&ImageBlock> {
        match self {
            ContentBlock::Image(image) => Some(image),
            ContentBlock::Text(_) => None,
        }
    }
}

impl From<TextBlock> for ContentBlock {
    fn from(block: TextBlock) -> Self {
        ContentBlock::Text(block)
    }
}

impl From<ImageBlock> for ContentBlock {
    fn from(block: ImageBlock) -> Self {
        ContentBlock::Image(block)
    }
}

/// @ai:intent Greedy word wrap by character count
/// @ai:post every line holds at most max_chars characters; words longer than that are split
/// @ai:effects pure
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        let mut line_len = 0;

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > max_chars {
                if line_len > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                let rest = word.split_off(max_chars);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            let needed = if line_len == 0 { word.len() } else { line_len + 1 + word.len() };
            if needed > max_chars && line_len > 0 {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            line.extend(word.iter());
            line_len += word.len();
        }

        if line_len > 0 || paragraph.trim().is_empty() {
            lines.push(line);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE_BOX: FitBox = FitBox {
        max_width_pt: 451.28,
        max_height_pt: 697.89,
    };

    #[test]
    fn test_text_height_respects_minimum() {
        let block = TextBlock::new(TextRole::Metric, vec!["a".into(), "b".into()], 14.0);
        assert_eq!(block.height_pt(), 28.0);
        assert_eq!(block.clone().with_min_height(40.0).height_pt(), 40.0);
    }

    #[test]
    fn test_image_scales_down_into_box() {
        let image = ImageBlock::new(vec![], 800, 600, ImageFormat::Rgb8, "chart").fit_into(FitBox {
            max_width_pt: 200.0,
            max_height_pt: 150.0,
        });
        let (w, h) = image.fitted_size(0.75, PAGE_BOX);
        assert!((w - 200.0).abs() < 1e-9);
        assert!((h - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_image_is_never_upscaled() {
        let image = ImageBlock::new(vec![], 100, 50, ImageFormat::Png, "small");
        assert_eq!(image.fitted_size(0.75, PAGE_BOX), (75.0, 37.5));
    }

    #[test]
    fn test_image_preserves_aspect_ratio() {
        let image = ImageBlock::new(vec![], 2000, 500, ImageFormat::Png, "wide");
        let (w, h) = image.fitted_size(0.75, PAGE_BOX);
        assert!((w / h - 4.0).abs() < 1e-9);
        assert!(w <= PAGE_BOX.max_width_pt + 1e-9);
    }

    #[test]
    fn test_empty_image_has_no_size() {
        let image = ImageBlock::new(vec![], 0, 600, ImageFormat::Png, "empty");
        assert_eq!(image.fitted_size(0.75, PAGE_BOX), (0.0, 0.0));
    }

    #[test]
    fn test_wrap_text() {
        assert_eq!(
            wrap_text("the quick brown fox jumps", 10),
            vec!["the quick", "brown fox", "jumps"]
        );
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_text("", 10), vec![""]);
    }
}
