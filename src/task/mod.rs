//! Title-token normalisation for externally synced tasks.
//!
//! This module parses the inline modifier syntax embedded in task titles,
//! resolves keyword and relative dates, assigns pseudo due dates per
//! status and context, and applies an ordered set of cross-field inference
//! rules over a task record. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Externally supplied constants in [`config`]
//! - Orchestration services in [`services`]

pub mod config;
pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
