//! @ai:module:intent Paginated document layout for report content
//! @ai:module:layer domain
//! @ai:module:public_api PaginationEngine, PageSpec, Document, Page, PlacedBlock, ContentBlock, TextBlock, ImageBlock

pub mod block;
pub mod page;
pub mod paginator;

pub use block::{wrap_text, ContentBlock, FitBox, ImageBlock, ImageFormat, TextBlock, TextRole};
pub use page::{Document, Page, PageSpec, PlacedBlock};
pub use paginator::PaginationEngine;
