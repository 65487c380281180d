//! Domain model for task normalisation.
//!
//! The task domain models the task record and its enumerated attributes,
//! second-resolution timestamps with archive semantics, the context and
//! folder catalog, the title tokenizer, and the note banner codec, while
//! keeping all infrastructure concerns outside of the domain boundary.

mod banner;
mod context;
mod error;
mod task;
mod timestamp;
mod tokens;

pub use banner::NoteBannerCodec;
pub use context::{Context, ContextCatalog, ContextId};
pub use error::CatalogError;
pub use task::{Priority, Status, Task};
pub use timestamp::Timestamp;
pub use tokens::TitleTokens;
