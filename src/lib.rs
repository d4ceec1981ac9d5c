//! starmap - progress and achievement aggregation for the village learning map
//!
//! Students complete lessons and earn stars; stars open locations on the
//! village map, lessons raise their level, and teachers see the whole class.
//! This crate derives all of those numbers from raw completion rows.
//!
//! ## Pipeline
//!
//! 1. A [`source::SnapshotSource`] fetches every row a view needs in one go.
//! 2. [`progress`] turns rows into aggregates, unlocks, ranks and feeds.
//! 3. [`view`] assembles the student or teacher dashboard, or reports the
//!    data as unavailable when the fetch failed.
//!
//! Nothing here holds a current user: the viewer is passed in as a
//! [`view::ViewContext`] on every call.

pub mod config;
pub mod domain;
pub mod progress;
pub mod source;
pub mod view;

pub use domain::*;
