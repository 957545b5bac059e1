//! File formats read and written by the library.
//!
//! Catalogs are stored as TOML and simulation time series as CSV. Both go through the
//! [`traits::DataFile`] interface; the engines themselves never touch the filesystem.

pub mod catalog;
pub mod timeseries;
pub mod traits;
