//! Index from course id to the career paths it can affect.
//!
//! Built once when the catalog loads, so a course completion only touches
//! the paths that actually contain the completed course instead of
//! re-scanning every active path.

use std::collections::HashMap;

use crate::career::CareerPath;
use crate::entity::{CareerPathId, CourseId};

/// In-memory index over career path membership.
pub struct CareerPathIndex {
    /// Secondary index: member course → list of path IDs.
    by_course: HashMap<CourseId, Vec<CareerPathId>>,
    /// Number of paths indexed.
    path_count: usize,
}

impl CareerPathIndex {
    /// Build the index from a set of career paths.
    ///
    /// Inactive paths are indexed too; activity is checked at evaluation
    /// time so a path toggled active later is still found.
    pub fn build(paths: &[CareerPath]) -> Self {
        let mut by_course: HashMap<CourseId, Vec<CareerPathId>> = HashMap::new();
        for path in paths {
            for membership in &path.courses {
                by_course
                    .entry(membership.course_id.clone())
                    .or_default()
                    .push(path.id.clone());
            }
        }
        Self {
            by_course,
            path_count: paths.len(),
        }
    }

    /// IDs of every path that has `course` as a member.
    pub fn paths_for_course(&self, course: &CourseId) -> &[CareerPathId] {
        self.by_course
            .get(course)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of paths indexed.
    pub fn len(&self) -> usize {
        self.path_count
    }

    /// `true` when no paths were indexed.
    pub fn is_empty(&self) -> bool {
        self.path_count == 0
    }
}
