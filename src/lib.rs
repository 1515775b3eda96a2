//! launchtrack library
//!
//! Cache-backed access to the SpaceX v4 API: typed record models, a raw-JSON
//! fetcher, a disk cache store keyed by resource collection, and the
//! repository that ties them together, plus the filtering, statistics, and
//! output layers consumed by the CLI.

pub mod cache;
pub mod cli;
pub mod data;
pub mod filter;
pub mod output;
pub mod repo;
pub mod stats;
