//! Domain models for the course catalog
//!
//! Contains the course record, the ordered container and prerequisite
//! resolution, without any I/O concerns.

mod catalog;
mod course;
mod tree;

pub use catalog::{Catalog, Prerequisite};
pub use course::Course;
pub use tree::{CourseTree, Iter, TreeError};
