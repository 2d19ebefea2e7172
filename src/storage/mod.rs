//! # Storage Layer
//!
//! Reading catalogs and configuration from disk.
//!
//! ## Formats
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Catalog | Comma-separated, one course per line | `--catalog`, `$CATALOG_FILE` or `default_catalog` |
//! | Config | TOML | `~/.config/course-catalog/config.toml` or `--config` |
//!
//! ## Catalog Lines
//!
//! ```text
//! CSCI100,Introduction to Computer Science
//! CSCI101,Introduction to Programming in C++,CSCI100
//! CSCI300,Introduction to Algorithms,CSCI200,MATH201
//! ```
//!
//! Nothing is written back; the catalog lives in memory for one run.
//!
//! ## Key Types
//!
//! - [`CatalogLoader`] - Parses catalog text into a [`crate::domain::Catalog`]
//! - [`Config`] - User configuration

mod config;
mod loader;

pub use config::{Config, ConfigError, OutputFormat, DEFAULT_CATALOG_FILE};
pub use loader::{CatalogLoader, DuplicatePolicy, LoadError, NO_PREREQUISITE};
