//! Taskmill: inline task-title normalisation for an externally synced
//! task list.
//!
//! Taskmill turns free-text task titles carrying a compact inline syntax
//! (`Buy a newspaper //next tuesday /top /star /errand`) into structured
//! task attributes, and derives a deterministic fallback ("pseudo") due
//! date whenever the user has not pinned one explicitly.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Services**: Orchestration over domain types, parameterised by a
//!   clock abstraction so every date computation is deterministic in tests
//!
//! Fetching, storing, and transmitting tasks are the surrounding system's
//! concern; this crate is a pure, synchronous transformation from (title
//! text, existing task state, context/folder catalogs) to (normalised task
//! state, changed flag).
//!
//! # Modules
//!
//! - [`task`]: Task normalisation domain, configuration, and services

pub mod task;
