//! @ai:module:intent Single-pass placement of content blocks onto fixed-size pages
//! @ai:module:layer domain
//! @ai:module:public_api PaginationEngine
//! @ai:module:stateless true

use crate::layout::block::ContentBlock;
use crate::layout::page::{Document, Page, PageSpec, PlacedBlock};

/// @ai:intent Places blocks top to bottom, breaking pages when a block does not fit
#[derive(Debug, Clone, Copy)]
pub struct PaginationEngine {
    spec: PageSpec,
}

impl PaginationEngine {
    /// @ai:intent Create an engine for one page geometry
    /// @ai:effects pure
    pub fn new(spec: PageSpec) -> Self {
        Self { spec }
    }

    /// @ai:effects pure
    pub fn spec(&self) -> &PageSpec {
        &self.spec
    }

    /// @ai:intent Width and height a block will occupy on the page
    /// @ai:effects pure
    pub fn measure(&self, block: &ContentBlock) -> (f64, f64) {
        match block {
            ContentBlock::Text(text) => (self.spec.content_width(), text.height_pt()),
            ContentBlock::Image(image) => {
                image.fitted_size(self.spec.px_to_pt, self.spec.content_box())
            }
        }
    }

    /// @ai:intent Lay out blocks in order into pages
    /// @ai:pre spec has positive usable height
    /// @ai:post block order is preserved; every block is placed exactly once
    /// @ai:post per page, used height stays within the usable height unless a block is oversized
    /// @ai:post the result always has at least one page
    /// @ai:effects pure
    pub fn layout(&self, blocks: Vec<ContentBlock>) -> Document {
        let spec = &self.spec;
        let bottom = spec.content_bottom();
        let usable = spec.usable_height();

        let mut pages = Vec::new();
        let mut current = Page::new(spec);
        let mut cursor_y = spec.margin_top_pt;

        for block in blocks {
            let (width, height) = self.measure(&block);
            let reserve = block.keep_with_next_pt();

            if !current.is_empty() && cursor_y + height + reserve > bottom {
                pages.push(std::mem::replace(&mut current, Page::new(spec)));
                cursor_y = spec.margin_top_pt;
            }

            let oversized = height > usable;
            if oversized {
                tracing::warn!(
                    "Block of {:.1}pt exceeds usable page height {:.1}pt, placing on its own page",
                    height,
                    usable
                );
            }

            current.placed_blocks.push(PlacedBlock {
                block,
                x_pt: spec.margin_left_pt,
                y_pt: cursor_y,
                width_pt: width,
                height_pt: height,
                oversized,
            });
            cursor_y += height + spec.block_spacing_pt;
        }

        if !current.is_empty() || pages.is_empty() {
            pages.push(current);
        }

        tracing::debug!("Laid out {} pages", pages.len());
        Document { pages }
    }
}

impl Default for PaginationEngine {
    fn default() -> Self {
        Self::new(PageSpec::a4())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::block::{FitBox, ImageBlock, ImageFormat, TextBlock, TextRole};
    use pretty_assertions::assert_eq;

    fn text(height_pt: f64) -> ContentBlock {
        TextBlock::new(TextRole::Metric, vec!["line".to_string()], height_pt).into()
    }

    fn chart_200x150() -> ContentBlock {
        ImageBlock::new(vec![0; 800 * 600 * 3], 800, 600, ImageFormat::Rgb8, "chart")
            .fit_into(FitBox {
                max_width_pt: 200.0,
                max_height_pt: 150.0,
            })
            .into()
    }

    fn thirty_lines_and_chart() -> Vec<ContentBlock> {
        let mut blocks: Vec<ContentBlock> = (0..30).map(|_| text(10.0)).collect();
        blocks.push(chart_200x150());
        blocks
    }

    fn assert_within_usable(doc: &Document, spec: &PageSpec) {
        for page in &doc.pages {
            if page.has_oversized() {
                continue;
            }
            assert!(page.used_height(spec.block_spacing_pt) <= spec.usable_height() + 1e-9);
        }
    }

    #[test]
    fn test_thirty_lines_and_chart_with_spacing() {
        // 30 blocks end at 72 + 30*22 = 732; a 150pt image would reach 882 > 769.89.
        let spec = PageSpec::a4();
        let doc = PaginationEngine::new(spec).layout(thirty_lines_and_chart());

        assert_eq!(doc.page_count(), 2);
        assert_eq!(doc.pages[0].placed_blocks.len(), 30);
        assert_eq!(doc.pages[0].placed_blocks[29].y_pt, 710.0);

        let image = &doc.pages[1].placed_blocks[0];
        assert_eq!(image.y_pt, 72.0);
        assert!((image.width_pt - 200.0).abs() < 1e-9);
        assert!((image.height_pt - 150.0).abs() < 1e-9);
        assert_within_usable(&doc, &spec);
    }

    #[test]
    fn test_thirty_lines_and_chart_without_spacing() {
        // 30 blocks end at 372; the image ends at 522 <= 769.89.
        let spec = PageSpec::a4().with_block_spacing(0.0);
        let doc = PaginationEngine::new(spec).layout(thirty_lines_and_chart());

        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.pages[0].placed_blocks[30].y_pt, 372.0);
        assert_within_usable(&doc, &spec);
    }

    #[test]
    fn test_oversized_block_gets_fresh_page() {
        let spec = PageSpec::a4();
        let tall = TextBlock::new(TextRole::Metric, vec!["x".to_string(); 100], 10.0);
        let doc = PaginationEngine::new(spec).layout(vec![text(10.0), tall.into(), text(10.0)]);

        assert_eq!(doc.page_count(), 3);
        let placed = &doc.pages[1].placed_blocks[0];
        assert!(placed.oversized);
        assert_eq!(placed.y_pt, spec.margin_top_pt);
        assert_eq!(doc.pages[2].placed_blocks.len(), 1);
        assert!(!doc.pages[0].placed_blocks[0].oversized);
    }

    #[test]
    fn test_oversized_first_block_stays_on_first_page() {
        let tall = TextBlock::new(TextRole::Metric, vec!["x".to_string(); 100], 10.0);
        let doc = PaginationEngine::default().layout(vec![tall.into()]);
        assert_eq!(doc.page_count(), 1);
        assert!(doc.pages[0].placed_blocks[0].oversized);
    }

    #[test]
    fn test_keep_with_next_moves_heading() {
        let spec = PageSpec::a4().with_block_spacing(0.0);
        let mut blocks: Vec<ContentBlock> = (0..68).map(|_| text(10.0)).collect();
        // Cursor is at 752; the heading alone fits (762) but not with its 40pt reserve.
        let heading = TextBlock::new(TextRole::SectionHeading, vec!["Water".to_string()], 10.0)
            .keep_with_next(40.0);
        blocks.push(heading.into());

        let doc = PaginationEngine::new(spec).layout(blocks);
        assert_eq!(doc.page_count(), 2);
        assert_eq!(
            doc.pages[1].placed_blocks[0].block.as_text().unwrap().role,
            TextRole::SectionHeading
        );
    }

    #[test]
    fn test_layout_is_deterministic() {
        let engine = PaginationEngine::default();
        let first = engine.layout(thirty_lines_and_chart());
        let second = engine.layout(thirty_lines_and_chart());

        let positions = |doc: &Document| -> Vec<(usize, f64, f64, f64, f64)> {
            doc.placements()
                .map(|(page, b)| (page, b.x_pt, b.y_pt, b.width_pt, b.height_pt))
                .collect()
        };
        assert_eq!(positions(&first), positions(&second));
        assert_eq!(first.block_count(), 31);
    }

    #[test]
    fn test_empty_input_yields_one_blank_page() {
        let doc = PaginationEngine::default().layout(vec![]);
        assert_eq!(doc.page_count(), 1);
        assert!(doc.pages[0].is_empty());
    }
}
