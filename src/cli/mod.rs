//! # Command-Line Interface
//!
//! User-facing commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `list` | All courses in course number order |
//! | `show <ID>` | One course with prerequisite titles resolved |
//! | `check` | Dangling prerequisites and repeated course numbers |
//! | `shell` | Numbered menu: load, list, find, exit |
//! | `config` | Effective configuration |
//!
//! ## Catalog Selection
//!
//! `--catalog PATH`, then `$CATALOG_FILE`, then `default_catalog` from the
//! config file.
//!
//! ## Output Formats
//!
//! All commands support `--format`:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! catalog --verbose show CSCI300
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod course;
mod output;
mod shell;

pub use app::{run, Cli, Commands, Settings};
pub use course::{course_json, write_course, write_listing};
pub use output::{Output, OutputFormat};
pub use shell::Shell;
