//! recipe-search
//!
//! Linear full-text containment matching over recipe blobs, plus
//! pagination. Correction happens upstream, so matching here is literal
//! substring AND across query terms.

pub mod index;
pub mod page;

pub use index::{searchable_blob, TextIndex};
pub use page::{paginate, Page};
