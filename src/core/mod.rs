//! Core data types shared by the dataset loader, link parser and viewer.
//!
//! - [`Link`]: one alignment correspondence between a reference region and a
//!   query region, with its percent identity

pub mod link;

pub use link::Link;
