//! Loaded catalog
//!
//! Wraps the course tree with prerequisite resolution. Prerequisites are
//! looked up through the tree on demand, so a reference to a course that was
//! never loaded (or was removed) simply resolves to nothing.

use super::course::Course;
use super::tree::CourseTree;

/// A prerequisite reference resolved against the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prerequisite<'a> {
    /// The course number as listed on the referencing course
    pub id: &'a str,

    /// The referenced course, if the catalog holds it
    pub course: Option<&'a Course>,
}

impl<'a> Prerequisite<'a> {
    /// Title of the referenced course, if known
    pub fn title(&self) -> Option<&'a str> {
        self.course.map(|c| c.title.as_str())
    }

    /// Returns true if the referenced course is not in the catalog
    pub fn is_dangling(&self) -> bool {
        self.course.is_none()
    }
}

/// Courses loaded from one catalog source
#[derive(Debug, Default)]
pub struct Catalog {
    courses: CourseTree,
    records_read: usize,
}

impl Catalog {
    pub fn new(courses: CourseTree, records_read: usize) -> Self {
        Self {
            courses,
            records_read,
        }
    }

    /// The underlying ordered container
    pub fn courses(&self) -> &CourseTree {
        &self.courses
    }

    pub fn courses_mut(&mut self) -> &mut CourseTree {
        &mut self.courses
    }

    /// Number of records accepted from the source
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Looks up a course by number
    pub fn find(&self, id: &str) -> Option<&Course> {
        self.courses.search(id)
    }

    /// Resolves each prerequisite of `course`, in listed order
    pub fn prerequisites_of<'a>(
        &'a self,
        course: &'a Course,
    ) -> impl Iterator<Item = Prerequisite<'a>> + 'a {
        course.prerequisites.iter().map(move |id| Prerequisite {
            id: id.as_str(),
            course: self.courses.search(id),
        })
    }

    /// Every `(course, missing prerequisite)` pair, in course order
    pub fn dangling_prerequisites(&self) -> Vec<(&Course, &str)> {
        self.courses
            .iter()
            .flat_map(|course| {
                self.prerequisites_of(course)
                    .filter(|p| p.is_dangling())
                    .map(move |p| (course, p.id))
            })
            .collect()
    }

    /// Course numbers stored more than once, each reported once
    pub fn duplicate_ids(&self) -> Vec<&str> {
        let mut duplicates: Vec<&str> = Vec::new();
        let mut previous: Option<&str> = None;

        for course in &self.courses {
            let id = course.id.as_str();
            if previous == Some(id) && duplicates.last() != Some(&id) {
                duplicates.push(id);
            }
            previous = Some(id);
        }

        duplicates
    }
}

impl From<CourseTree> for Catalog {
    fn from(courses: CourseTree) -> Self {
        let records_read = courses.len();
        Self::new(courses, records_read)
    }
}
