//! # Domain Models
//!
//! This crate contains pure domain types with minimal dependencies
//! (`serde`, `strum`, `typed-builder`, `chrono`, `utoipa` schemas).
//! Keep it lean: no I/O, networking, or heavy logic, just data and simple helpers.

pub mod application;
pub mod changelog;
pub mod config;
pub mod constants;
pub mod entity;
pub mod error;
pub mod events;
pub mod orgunit;
pub mod panel;
pub mod registry;
pub mod tally;
