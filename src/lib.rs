//! Course Catalog - an in-memory course catalog with prerequisite lookup
//!
//! Courses are loaded from a comma-separated file into an unbalanced binary
//! search tree keyed by course number, which provides ordered listing and
//! exact lookup. Prerequisites are resolved back through the same tree.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{Catalog, Course, CourseTree};
