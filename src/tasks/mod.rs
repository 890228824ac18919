//! Background Tasks Module
//!
//! Contains background tasks that run periodically during operation.
//!
//! # Tasks
//! - Purge sweep: removes expired cache entries from both tiers at a fixed interval

mod purge;

pub use purge::spawn_purge_task;
