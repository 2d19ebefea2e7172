//! Ordered course container
//!
//! An unbalanced binary search tree keyed by course number. Each node owns its
//! children through `Option<Box<Node>>`, so no node handle ever leaves the
//! tree; callers see borrowed `&Course` values or owned records from
//! [`CourseTree::remove`].
//!
//! Ties go right: inserting a course number that is already present adds a
//! second node in the right subtree of the first. [`CourseTree::search`]
//! stops at the first match on the way down, so the later copy is only
//! reachable through traversal. Use [`CourseTree::insert_unique`] to refuse
//! duplicates instead.

use std::cmp::Ordering;
use std::iter::FusedIterator;

use thiserror::Error;

use super::course::Course;

#[derive(Debug, Error, PartialEq)]
pub enum TreeError {
    #[error("Course already exists: {0}")]
    DuplicateKey(String),

    #[error("Tree invariant violated: {0}")]
    InvariantViolation(String),
}

type Link = Option<Box<Node>>;

#[derive(Debug)]
struct Node {
    course: Course,
    left: Link,
    right: Link,
}

impl Node {
    fn new(course: Course) -> Box<Self> {
        Box::new(Self {
            course,
            left: None,
            right: None,
        })
    }
}

/// Binary search tree of courses ordered by course number
#[derive(Debug, Default)]
pub struct CourseTree {
    root: Link,
    len: usize,
}

impl CourseTree {
    /// Creates an empty tree
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Returns the number of stored courses (duplicates included)
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree holds no courses
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Inserts a course.
    ///
    /// Smaller course numbers go left, everything else goes right. The tree
    /// is never rebalanced, so sorted input produces a list-shaped tree.
    pub fn insert(&mut self, course: Course) {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = if course.id < node.course.id {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *slot = Some(Node::new(course));
        self.len += 1;
        debug_assert_eq!(self.root.is_none(), self.len == 0);
    }

    /// Inserts a course, refusing course numbers that are already stored
    pub fn insert_unique(&mut self, course: Course) -> Result<(), TreeError> {
        if self.contains(&course.id) {
            return Err(TreeError::DuplicateKey(course.id));
        }
        self.insert(course);
        Ok(())
    }

    /// Looks up a course by exact course number
    pub fn search(&self, id: &str) -> Option<&Course> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            if node.course.id == id {
                return Some(&node.course);
            }
            current = if id < node.course.id.as_str() {
                node.left.as_deref()
            } else {
                node.right.as_deref()
            };
        }
        None
    }

    /// Returns true if a course with this number is stored
    pub fn contains(&self, id: &str) -> bool {
        self.search(id).is_some()
    }

    /// Calls `visit` once for every course, in ascending course number order
    pub fn in_order<F>(&self, mut visit: F)
    where
        F: FnMut(&Course),
    {
        Self::walk(self.root.as_deref(), &mut visit);
    }

    fn walk<F>(node: Option<&Node>, visit: &mut F)
    where
        F: FnMut(&Course),
    {
        if let Some(node) = node {
            Self::walk(node.left.as_deref(), visit);
            visit(&node.course);
            Self::walk(node.right.as_deref(), visit);
        }
    }

    /// Iterates over courses in ascending course number order
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self.root.as_deref(), self.len)
    }

    /// Course with the smallest course number
    pub fn first(&self) -> Option<&Course> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.course)
    }

    /// Course with the largest course number
    pub fn last(&self) -> Option<&Course> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.course)
    }

    /// Number of nodes on the longest root-to-leaf path (0 when empty)
    pub fn height(&self) -> usize {
        let mut stack: Vec<(&Node, usize)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, 1));
        }

        let mut height = 0;
        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);
            if let Some(left) = node.left.as_deref() {
                stack.push((left, depth + 1));
            }
            if let Some(right) = node.right.as_deref() {
                stack.push((right, depth + 1));
            }
        }
        height
    }

    /// Removes the first course found with this number and returns it.
    ///
    /// Removing a course number that is not stored is a no-op.
    pub fn remove(&mut self, id: &str) -> Option<Course> {
        let (root, removed) = Self::remove_node(self.root.take(), id);
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
        }
        debug_assert_eq!(self.root.is_none(), self.len == 0);
        removed
    }

    /// Removes `id` from the subtree and returns the subtree's new root
    fn remove_node(link: Link, id: &str) -> (Link, Option<Course>) {
        let mut node = match link {
            Some(node) => node,
            None => return (None, None),
        };

        match id.cmp(node.course.id.as_str()) {
            Ordering::Less => {
                let (left, removed) = Self::remove_node(node.left.take(), id);
                node.left = left;
                (Some(node), removed)
            }
            Ordering::Greater => {
                let (right, removed) = Self::remove_node(node.right.take(), id);
                node.right = right;
                (Some(node), removed)
            }
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                (None, None) => {
                    let Node { course, .. } = *node;
                    (None, Some(course))
                }
                (Some(child), None) | (None, Some(child)) => {
                    let Node { course, .. } = *node;
                    (Some(child), Some(course))
                }
                (Some(left), Some(right)) => {
                    // The successor has no left child, so detaching it is a splice.
                    let (right, successor) = Self::take_min(right);
                    let removed = std::mem::replace(&mut node.course, successor);
                    node.left = Some(left);
                    node.right = right;
                    (Some(node), Some(removed))
                }
            },
        }
    }

    /// Detaches the leftmost node of a subtree, returning the remaining
    /// subtree and the detached course
    fn take_min(mut node: Box<Node>) -> (Link, Course) {
        match node.left.take() {
            Some(left) => {
                let (rest, min) = Self::take_min(left);
                node.left = rest;
                (Some(node), min)
            }
            None => {
                let Node { course, right, .. } = *node;
                (right, course)
            }
        }
    }

    /// Removes every course, one root at a time
    pub fn clear(&mut self) {
        while let Some(id) = self.root.as_ref().map(|node| node.course.id.clone()) {
            self.remove(&id);
        }
    }

    /// Verifies ordering and node count
    pub fn check_invariants(&self) -> Result<(), TreeError> {
        // (node, inclusive lower bound, exclusive upper bound)
        let mut stack: Vec<(&Node, Option<&str>, Option<&str>)> = Vec::new();
        if let Some(root) = self.root.as_deref() {
            stack.push((root, None, None));
        }

        let mut count = 0;
        while let Some((node, lower, upper)) = stack.pop() {
            let id = node.course.id.as_str();

            if let Some(lower) = lower {
                if id < lower {
                    return Err(TreeError::InvariantViolation(format!(
                        "{} sits in the right subtree of {}",
                        id, lower
                    )));
                }
            }
            if let Some(upper) = upper {
                if id >= upper {
                    return Err(TreeError::InvariantViolation(format!(
                        "{} sits in the left subtree of {}",
                        id, upper
                    )));
                }
            }

            count += 1;
            if let Some(left) = node.left.as_deref() {
                stack.push((left, lower, Some(id)));
            }
            if let Some(right) = node.right.as_deref() {
                stack.push((right, Some(id), upper));
            }
        }

        if count != self.len {
            return Err(TreeError::InvariantViolation(format!(
                "counted {} nodes but length is {}",
                count, self.len
            )));
        }

        Ok(())
    }
}

impl Drop for CourseTree {
    fn drop(&mut self) {
        // Dropping a list-shaped tree through nested boxes would recurse once per node.
        self.clear();
    }
}

impl FromIterator<Course> for CourseTree {
    fn from_iter<I: IntoIterator<Item = Course>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl Extend<Course> for CourseTree {
    fn extend<I: IntoIterator<Item = Course>>(&mut self, iter: I) {
        for course in iter {
            self.insert(course);
        }
    }
}

impl<'a> IntoIterator for &'a CourseTree {
    type Item = &'a Course;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over a [`CourseTree`]
pub struct Iter<'a> {
    stack: Vec<&'a Node>,
    remaining: usize,
}

impl<'a> Iter<'a> {
    fn new(root: Option<&'a Node>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Course;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.course)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(id: &str) -> Course {
        Course::new(id, format!("Title of {}", id))
    }

    fn ids(tree: &CourseTree) -> Vec<String> {
        tree.iter().map(|c| c.id.clone()).collect()
    }

    fn sample_tree() -> CourseTree {
        let mut tree = CourseTree::new();
        tree.insert(Course::new("CS101", "Intro"));
        tree.insert(Course::new("CS201", "DataStructures").with_prerequisites(["CS101"]));
        tree.insert(Course::new("CS102", "Discrete"));
        tree
    }

    #[test]
    fn empty_tree() {
        let tree = CourseTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.height(), 0);
        assert!(tree.search("CS101").is_none());
        assert!(tree.first().is_none());
        assert_eq!(tree.iter().count(), 0);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn insert_tracks_count() {
        let mut tree = CourseTree::new();
        tree.insert(course("CS101"));
        assert!(!tree.is_empty());
        assert_eq!(tree.len(), 1);

        tree.insert(course("CS101"));
        tree.insert(course("CS050"));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.iter().len(), 3);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn traversal_is_sorted() {
        let tree = sample_tree();
        assert_eq!(ids(&tree), vec!["CS101", "CS102", "CS201"]);

        let mut visited = Vec::new();
        tree.in_order(|c| visited.push(c.id.clone()));
        assert_eq!(visited, ids(&tree));
    }

    #[test]
    fn search_finds_exact_match() {
        let tree = sample_tree();

        let found = tree.search("CS201").unwrap();
        assert_eq!(found.title, "DataStructures");
        assert_eq!(found.prerequisites, vec!["CS101"]);

        assert!(tree.search("CS999").is_none());
        assert!(tree.search("").is_none());
        assert!(tree.search("cs201").is_none());
    }

    #[test]
    fn remove_then_resolve_prerequisite() {
        let mut tree = sample_tree();

        let removed = tree.remove("CS101").unwrap();
        assert_eq!(removed.title, "Intro");
        assert_eq!(ids(&tree), vec!["CS102", "CS201"]);

        let cs201 = tree.search("CS201").unwrap();
        assert!(tree.search(&cs201.prerequisites[0]).is_none());
        tree.check_invariants().unwrap();
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut tree = sample_tree();
        assert!(tree.remove("CS999").is_none());
        assert_eq!(tree.len(), 3);
        assert_eq!(ids(&tree), vec!["CS101", "CS102", "CS201"]);

        let mut empty = CourseTree::new();
        assert!(empty.remove("CS101").is_none());
    }

    #[test]
    fn remove_leaf_and_single_child() {
        let mut tree: CourseTree = ["M", "F", "T", "A"].into_iter().map(course).collect();

        // leaf
        assert_eq!(tree.remove("A").unwrap().id, "A");

        // T with a single right child
        tree.insert(course("W"));
        assert_eq!(tree.remove("T").unwrap().id, "T");

        assert_eq!(ids(&tree), vec!["F", "M", "W"]);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn remove_two_children_uses_successor() {
        let mut tree: CourseTree = ["M", "F", "T", "P", "W", "R"]
            .into_iter()
            .map(course)
            .collect();

        let removed = tree.remove("M").unwrap();
        assert_eq!(removed.id, "M");
        assert_eq!(removed.title, "Title of M");

        // P was the leftmost node of M's right subtree
        assert_eq!(tree.root.as_ref().unwrap().course.id, "P");
        assert_eq!(tree.search("P").unwrap().title, "Title of P");
        assert_eq!(ids(&tree), vec!["F", "P", "R", "T", "W"]);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn duplicates_route_right() {
        let mut tree = CourseTree::new();
        tree.insert(Course::new("CS101", "First"));
        tree.insert(Course::new("CS101", "Second"));

        assert_eq!(tree.len(), 2);
        assert_eq!(tree.search("CS101").unwrap().title, "First");
        assert!(tree.root.as_ref().unwrap().right.is_some());

        let titles: Vec<_> = tree.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["First", "Second"]);

        assert_eq!(tree.remove("CS101").unwrap().title, "First");
        assert_eq!(tree.search("CS101").unwrap().title, "Second");
        tree.check_invariants().unwrap();
    }

    #[test]
    fn insert_unique_rejects_duplicates() {
        let mut tree = sample_tree();
        let result = tree.insert_unique(Course::new("CS102", "Other"));

        assert_eq!(result, Err(TreeError::DuplicateKey("CS102".to_string())));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.search("CS102").unwrap().title, "Discrete");

        tree.insert_unique(course("CS300")).unwrap();
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn first_last_and_height() {
        let tree = sample_tree();
        assert_eq!(tree.first().unwrap().id, "CS101");
        assert_eq!(tree.last().unwrap().id, "CS201");
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn sorted_input_degrades_to_list() {
        let tree: CourseTree = (0..50).map(|i| course(&format!("C{:03}", i))).collect();
        assert_eq!(tree.height(), 50);
        assert_eq!(tree.len(), 50);
        tree.check_invariants().unwrap();
    }

    #[test]
    fn clear_empties_tree() {
        let mut tree = sample_tree();
        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.search("CS101").is_none());

        tree.clear();
        assert!(tree.is_empty());
    }

    #[test]
    fn drop_deep_tree() {
        let tree: CourseTree = (0..10_000)
            .map(|i| Course::new(format!("C{:06}", i), ""))
            .collect();
        assert_eq!(tree.len(), 10_000);
        drop(tree);
    }

    #[test]
    fn iter_reports_exact_size() {
        let tree = sample_tree();
        let mut iter = tree.iter();
        assert_eq!(iter.len(), 3);
        iter.next();
        assert_eq!(iter.len(), 2);

        let collected: Vec<_> = (&tree).into_iter().collect();
        assert_eq!(collected.len(), 3);
    }

    #[test]
    fn invariant_check_detects_misplaced_node() {
        let mut tree = sample_tree();
        // Force CS000 into the right subtree of the root
        tree.root.as_mut().unwrap().right.as_mut().unwrap().course.id = "CS000".to_string();

        assert!(matches!(
            tree.check_invariants(),
            Err(TreeError::InvariantViolation(_))
        ));
    }

    #[test]
    fn invariant_check_detects_bad_length() {
        let mut tree = sample_tree();
        tree.len = 7;
        assert!(tree.check_invariants().is_err());
        tree.len = 3;
    }
}
