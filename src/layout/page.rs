//! @ai:module:intent Page geometry and the paginated document model
//! @ai:module:layer domain
//! @ai:module:public_api PageSpec, Page, PlacedBlock, Document
//! @ai:module:stateless true

use crate::layout::block::{ContentBlock, FitBox};
use serde::{Deserialize, Serialize};

/// @ai:intent Fixed page geometry in points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSpec {
    #[serde(default = "default_width")]
    pub width_pt: f64,
    #[serde(default = "default_height")]
    pub height_pt: f64,
    #[serde(default = "default_margin")]
    pub margin_top_pt: f64,
    #[serde(default = "default_margin")]
    pub margin_bottom_pt: f64,
    #[serde(default = "default_margin")]
    pub margin_left_pt: f64,
    #[serde(default = "default_margin")]
    pub margin_right_pt: f64,
    #[serde(default = "default_spacing")]
    pub block_spacing_pt: f64,
    /// Points per image pixel.
    #[serde(default = "default_px_to_pt")]
    pub px_to_pt: f64,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self::a4()
    }
}

fn default_width() -> f64 {
    595.28
}

fn default_height() -> f64 {
    841.89
}

fn default_margin() -> f64 {
    72.0
}

fn default_spacing() -> f64 {
    12.0
}

fn default_px_to_pt() -> f64 {
    0.75
}

impl PageSpec {
    /// @ai:intent A4 portrait with one-inch margins
    /// @ai:effects pure
    pub fn a4() -> Self {
        Self {
            width_pt: default_width(),
            height_pt: default_height(),
            margin_top_pt: default_margin(),
            margin_bottom_pt: default_margin(),
            margin_left_pt: default_margin(),
            margin_right_pt: default_margin(),
            block_spacing_pt: default_spacing(),
            px_to_pt: default_px_to_pt(),
        }
    }

    /// @ai:effects pure
    pub fn with_block_spacing(mut self, spacing_pt: f64) -> Self {
        self.block_spacing_pt = spacing_pt;
        self
    }

    /// @ai:effects pure
    pub fn content_width(&self) -> f64 {
        (self.width_pt - self.margin_left_pt - self.margin_right_pt).max(0.0)
    }

    /// @ai:effects pure
    pub fn usable_height(&self) -> f64 {
        (self.height_pt - self.margin_top_pt - self.margin_bottom_pt).max(0.0)
    }

    /// @ai:intent Lowest y a block may reach, measured from the page top
    /// @ai:effects pure
    pub fn content_bottom(&self) -> f64 {
        self.height_pt - self.margin_bottom_pt
    }

    /// @ai:intent Default bounding box for images: the whole content area
    /// @ai:effects pure
    pub fn content_box(&self) -> FitBox {
        FitBox {
            max_width_pt: self.content_width(),
            max_height_pt: self.usable_height(),
        }
    }

    /// @ai:intent Describe geometry problems that make layout meaningless
    /// @ai:effects pure
    pub fn issues(&self) -> Vec<String> {
        let mut issues = Vec::new();
        if self.content_width() <= 0.0 {
            issues.push("page margins leave no content width".to_string());
        }
        if self.usable_height() <= 0.0 {
            issues.push("page margins leave no usable height".to_string());
        }
        if self.px_to_pt <= 0.0 {
            issues.push("px_to_pt must be positive".to_string());
        }
        if self.block_spacing_pt < 0.0 {
            issues.push("block spacing must not be negative".to_string());
        }
        issues
    }
}

/// @ai:intent A block with its final position; y is measured from the page top
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedBlock {
    pub block: ContentBlock,
    pub x_pt: f64,
    pub y_pt: f64,
    pub width_pt: f64,
    pub height_pt: f64,
    /// Taller than the usable page height; placed alone at the top of a page.
    pub oversized: bool,
}

/// @ai:intent One page of the document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub width_pt: f64,
    pub height_pt: f64,
    pub margin_top_pt: f64,
    pub margin_bottom_pt: f64,
    pub placed_blocks: Vec<PlacedBlock>,
}

impl Page {
    /// @ai:intent Create an empty page with the given geometry
    /// @ai:effects pure
    pub fn new(spec: &PageSpec) -> Self {
        Self {
            width_pt: spec.width_pt,
            height_pt: spec.height_pt,
            margin_top_pt: spec.margin_top_pt,
            margin_bottom_pt: spec.margin_bottom_pt,
            placed_blocks: Vec::new(),
        }
    }

    /// @ai:effects pure
    pub fn is_empty(&self) -> bool {
        self.placed_blocks.is_empty()
    }

    /// @ai:intent Sum of block heights plus the spacing between them
    /// @ai:effects pure
    pub fn used_height(&self, block_spacing_pt: f64) -> f64 {
        let heights: f64 = self.placed_blocks.iter().map(|b| b.height_pt).sum();
        let gaps = self.placed_blocks.len().saturating_sub(1) as f64;
        heights + gaps * block_spacing_pt
    }

    /// @ai:effects pure
    pub fn has_oversized(&self) -> bool {
        self.placed_blocks.iter().any(|b| b.oversized)
    }
}

/// @ai:intent Ordered pages produced by one layout run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub pages: Vec<Page>,
}

impl Document {
    /// @ai:effects pure
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// @ai:intent All placed blocks with their 1-based page numbers, in order
    /// @ai:effects pure
    pub fn placements(&self) -> impl Iterator<Item = (usize, &PlacedBlock)> {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(index, page)| page.placed_blocks.iter().map(move |b| (index + 1, b)))
    }

    /// @ai:effects pure
    pub fn block_count(&self) -> usize {
        self.pages.iter().map(|p| p.placed_blocks.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_geometry() {
        let spec = PageSpec::a4();
        assert!((spec.content_width() - 451.28).abs() < 1e-9);
        assert!((spec.usable_height() - 697.89).abs() < 1e-9);
        assert!((spec.content_bottom() - 769.89).abs() < 1e-9);
        assert!(spec.issues().is_empty());
    }

    #[test]
    fn test_page_spec_defaults_from_partial_toml() {
        let spec: PageSpec = toml::from_str("block_spacing_pt = 0.0").unwrap();
        assert_eq!(spec.block_spacing_pt, 0.0);
        assert_eq!(spec.height_pt, 841.89);
    }

    #[test]
    fn test_degenerate_margins_are_reported() {
        let spec = PageSpec {
            margin_top_pt: 500.0,
            margin_bottom_pt: 500.0,
            ..PageSpec::a4()
        };
        assert_eq!(spec.issues(), vec!["page margins leave no usable height"]);
    }
}
