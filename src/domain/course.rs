//! Course domain model
//!
//! A course is one catalog entry: a course number, a display title and the
//! course numbers it lists as prerequisites.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Course number, e.g. `CSCI200`. Compared byte-wise, case-sensitive.
    pub id: String,

    /// Display title
    pub title: String,

    /// Course numbers that must be taken first (may name unknown courses)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prerequisites: Vec<String>,
}

impl Course {
    /// Creates a course without prerequisites
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            prerequisites: Vec::new(),
        }
    }

    /// Builder-style helper to attach prerequisites
    pub fn with_prerequisites<I, S>(mut self, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites = prerequisites.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if this course lists any prerequisites
    pub fn has_prerequisites(&self) -> bool {
        !self.prerequisites.is_empty()
    }

    /// Returns true for a record with an empty course number.
    ///
    /// Older callers used such a record to mean "not found". The tree never
    /// hands one out; lookups return `Option` instead.
    pub fn is_sentinel(&self) -> bool {
        self.id.is_empty()
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.id, self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_course_has_no_prerequisites() {
        let course = Course::new("CSCI100", "Introduction to Computer Science");
        assert_eq!(course.id, "CSCI100");
        assert!(!course.has_prerequisites());
        assert!(!course.is_sentinel());
    }

    #[test]
    fn with_prerequisites_keeps_order() {
        let course = Course::new("CSCI300", "Introduction to Algorithms")
            .with_prerequisites(["CSCI200", "MATH201"]);

        assert_eq!(course.prerequisites, vec!["CSCI200", "MATH201"]);
    }

    #[test]
    fn empty_id_is_sentinel() {
        assert!(Course::new("", "").is_sentinel());
    }

    #[test]
    fn display_format() {
        let course = Course::new("CSCI101", "Introduction to Programming in C++");
        assert_eq!(course.to_string(), "CSCI101: Introduction to Programming in C++");
    }

    #[test]
    fn json_omits_empty_prerequisites() {
        let course = Course::new("MATH201", "Discrete Mathematics");
        let json = serde_json::to_value(&course).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": "MATH201", "title": "Discrete Mathematics"})
        );

        let parsed: Course = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, course);
    }
}
