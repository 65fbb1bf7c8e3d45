//! Sync planning and execution
//!
//! This module provides:
//! - **intersect**: resolve a list of changed files against sync rules
//! - **tag**: find the most recently built tag for an image
//! - **builder**: assemble one [`SyncPlan`] for an artifact and change batch
//! - **executor**: apply a plan to every running container of the image

mod builder;
mod executor;
mod intersect;
mod plan;
mod tag;

pub use builder::PlanBuilder;
pub use executor::{CancelFlag, PlanExecutor};
pub use intersect::intersect;
pub use plan::{PlanOutcome, SyncEntry, SyncMap, SyncPlan};
pub use tag::latest_tag;
