//! Data structures for career paths.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::entity::{CareerPathId, CourseId, DefinitionId};

/// One course inside a career path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseMembership {
    pub course_id: CourseId,
    /// Required members count toward `AllCourses` and `MinCourses`;
    /// optional members are electives.
    pub required: bool,
}

/// A typed aggregate requirement over a path's member courses.
///
/// Closed enum: configuration that does not map onto one of these variants
/// is rejected when the catalog loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Requirement {
    /// Every required member course must be certified.
    AllCourses,
    /// At least `count` required member courses must be certified.
    MinCourses { count: u32 },
    /// Every named course must be certified.
    SpecificCourses { course_ids: Vec<CourseId> },
}

impl Requirement {
    /// Return a stable string representation of the requirement kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllCourses => "all_courses",
            Self::MinCourses { .. } => "min_courses",
            Self::SpecificCourses { .. } => "specific_courses",
        }
    }
}

/// A configured career path: member courses, aggregate requirements, and
/// the credential definitions awarded on completion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerPath {
    pub id: CareerPathId,
    pub title: String,
    /// Ordered member courses.
    pub courses: Vec<CourseMembership>,
    pub requirements: Vec<Requirement>,
    /// Certificate definition awarded when the requirements pass.
    pub certificate_definition: DefinitionId,
    /// Badge definition, if this path awards one.
    pub badge_definition: Option<DefinitionId>,
    pub active: bool,
}

impl CareerPath {
    /// IDs of the required member courses.
    pub fn required_courses(&self) -> impl Iterator<Item = &CourseId> {
        self.courses
            .iter()
            .filter(|m| m.required)
            .map(|m| &m.course_id)
    }

    /// `true` when `course` is a member of this path (required or not).
    pub fn contains_course(&self, course: &CourseId) -> bool {
        self.courses.iter().any(|m| &m.course_id == course)
    }
}

/// Evaluate a path's requirements against the set of courses the learner
/// holds an active certificate for. Pure; all requirements must pass.
pub fn qualifies(path: &CareerPath, certified: &BTreeSet<CourseId>) -> bool {
    path.requirements.iter().all(|req| match req {
        Requirement::AllCourses => path.required_courses().all(|c| certified.contains(c)),
        Requirement::MinCourses { count } => {
            let held = path
                .required_courses()
                .filter(|c| certified.contains(*c))
                .count();
            held >= *count as usize
        }
        Requirement::SpecificCourses { course_ids } => {
            course_ids.iter().all(|c| certified.contains(c))
        }
    })
}
