//! Delimited-text catalog loader
//!
//! One course per line: `number,title[,prerequisite]*`. Fields are trimmed,
//! blank lines are skipped, and the token `None` (or an empty token) in the
//! prerequisite position means "no prerequisite".

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Catalog, Course, CourseTree, TreeError};

/// Token used in catalog files for "no prerequisite"
pub const NO_PREREQUISITE: &str = "None";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Unable to open file {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to lock catalog file {}", path.display())]
    Lock {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read line {line}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },

    #[error("Line {line}: missing {field}")]
    MissingField { line: usize, field: &'static str },

    #[error("Line {line}: {source}")]
    Duplicate {
        line: usize,
        #[source]
        source: TreeError,
    },
}

/// What to do when a course number appears twice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Store every copy; lookups return the first one loaded
    #[default]
    Allow,
    /// Fail the load at the first repeated course number
    Reject,
}

impl DuplicatePolicy {
    pub fn as_str(&self) -> &str {
        match self {
            DuplicatePolicy::Allow => "allow",
            DuplicatePolicy::Reject => "reject",
        }
    }
}

/// Parses catalog text into a [`Catalog`]
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogLoader {
    policy: DuplicatePolicy,
}

impl CatalogLoader {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self { policy }
    }

    /// Parses one line. Returns `Ok(None)` for blank lines.
    ///
    /// `line_num` is 1-based and only used for error reporting.
    pub fn parse_line(line: &str, line_num: usize) -> Result<Option<Course>, LoadError> {
        if line.trim().is_empty() {
            return Ok(None);
        }

        let mut fields = line.split(',').map(str::trim);

        let id = fields.next().unwrap_or_default();
        if id.is_empty() {
            return Err(LoadError::MissingField {
                line: line_num,
                field: "course number",
            });
        }

        let title = fields
            .next()
            .filter(|title| !title.is_empty())
            .ok_or(LoadError::MissingField {
                line: line_num,
                field: "title",
            })?;

        let prerequisites = fields
            .filter(|token| !token.is_empty() && *token != NO_PREREQUISITE)
            .map(str::to_string)
            .collect();

        Ok(Some(Course {
            id: id.to_string(),
            title: title.to_string(),
            prerequisites,
        }))
    }

    /// Reads every line from `reader` into a new catalog
    pub fn read_from<R: BufRead>(&self, reader: R) -> Result<Catalog, LoadError> {
        let mut courses = CourseTree::new();
        let mut records_read = 0;

        for (idx, line) in reader.lines().enumerate() {
            let line_num = idx + 1;
            let line = line.map_err(|source| LoadError::Read {
                line: line_num,
                source,
            })?;

            let Some(course) = Self::parse_line(&line, line_num)? else {
                continue;
            };

            match self.policy {
                DuplicatePolicy::Allow => courses.insert(course),
                DuplicatePolicy::Reject => {
                    courses
                        .insert_unique(course)
                        .map_err(|source| LoadError::Duplicate {
                            line: line_num,
                            source,
                        })?
                }
            }
            records_read += 1;
        }

        Ok(Catalog::new(courses, records_read))
    }

    /// Parses an in-memory catalog document
    pub fn parse_str(&self, content: &str) -> Result<Catalog, LoadError> {
        self.read_from(content.as_bytes())
    }

    /// Loads a catalog file
    pub fn load(&self, path: &Path) -> Result<Catalog, LoadError> {
        let file = File::open(path).map_err(|source| LoadError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        // Shared lock for reading; released when the file is dropped
        file.lock_shared().map_err(|source| LoadError::Lock {
            path: path.to_path_buf(),
            source,
        })?;

        self.read_from(BufReader::new(&file))
    }
}
