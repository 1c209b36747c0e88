//! Integration test: career paths aggregate course certificates.
//!
//! A path requiring ALL of {a, b, c} must not award until every member is
//! certified, must award exactly once when the last course lands, and a
//! MIN_COURSES path must count only its own members.

use credenta::{
    BadgeDefinition, CareerPath, CareerPathId, CertificateDefinition, CertificateRepository,
    CompletionRecord, CourseId, CourseMembership, CredentialCatalog, CredentialStatus, Criterion,
    CriterionDefinition, DefinitionId, EntityId, LearnerId, MemoryStore, Orchestrator, Requirement,
};

fn course_definition(course: &str) -> CertificateDefinition {
    CertificateDefinition {
        id: DefinitionId::new(format!("def-{course}")),
        entity: EntityId::Course(CourseId::new(course)),
        criteria: vec![CriterionDefinition::required(
            Criterion::CompletionPercentage {
                min_percentage: 60.0,
            },
        )],
        issuer_name: "Open Academy".into(),
        issuer_title: "Director of Studies".into(),
        expiry_months: None,
        active: true,
    }
}

fn career_definition(path: &str) -> CertificateDefinition {
    CertificateDefinition {
        id: DefinitionId::new(format!("def-{path}")),
        entity: EntityId::Career(CareerPathId::new(path)),
        criteria: Vec::new(),
        issuer_name: "Open Academy".into(),
        issuer_title: "Director of Studies".into(),
        expiry_months: None,
        active: true,
    }
}

fn member(course: &str, required: bool) -> CourseMembership {
    CourseMembership {
        course_id: CourseId::new(course),
        required,
    }
}

fn completion(course: &str) -> CompletionRecord {
    CompletionRecord {
        learner_id: LearnerId::new("u1"),
        course_id: CourseId::new(course),
        completion_percentage: 100.0,
        quiz_scores: Vec::new(),
        lessons_completed: 8,
        total_lessons: 8,
    }
}

#[test]
fn all_courses_path_awards_only_when_every_member_is_certified() {
    let catalog = CredentialCatalog::new(
        vec![
            course_definition("a"),
            course_definition("b"),
            course_definition("c"),
            career_definition("fullstack"),
        ],
        Vec::new(),
        vec![CareerPath {
            id: CareerPathId::new("fullstack"),
            title: "Fullstack Developer".into(),
            courses: vec![member("a", true), member("b", true), member("c", true)],
            requirements: vec![Requirement::AllCourses],
            certificate_definition: DefinitionId::new("def-fullstack"),
            badge_definition: None,
            active: true,
        }],
    )
    .expect("catalog must validate");

    let store = MemoryStore::new();
    let orchestrator = Orchestrator::new(&catalog, &store, &store, &store);

    // ── a and b certified: path still incomplete ────────────────────────
    let outcome = orchestrator.process(&completion("a"), "Ada").unwrap();
    assert!(outcome.career_awards.is_empty());
    let outcome = orchestrator.process(&completion("b"), "Ada").unwrap();
    assert!(outcome.career_awards.is_empty());

    // ── c completes the set: exactly one career certificate ─────────────
    let outcome = orchestrator.process(&completion("c"), "Ada").unwrap();
    assert_eq!(outcome.career_awards.len(), 1);
    let award = &outcome.career_awards[0];
    assert_eq!(award.path_id, CareerPathId::new("fullstack"));
    assert_eq!(award.certificate.status, CredentialStatus::Active);

    // One career certificate total, never a second.
    let career_entity = EntityId::Career(CareerPathId::new("fullstack"));
    let career_certs: Vec<_> =
        CertificateRepository::list_for_learner(&store, &LearnerId::new("u1"))
            .unwrap()
            .into_iter()
            .filter(|c| c.entity == career_entity)
            .collect();
    assert_eq!(career_certs.len(), 1);
}

#[test]
fn min_courses_path_counts_required_members_only() {
    // Path: a and b required, x optional; MIN_COURSES = 2.
    let catalog = CredentialCatalog::new(
        vec![
            course_definition("a"),
            course_definition("b"),
            course_definition("x"),
            career_definition("analyst"),
        ],
        Vec::new(),
        vec![CareerPath {
            id: CareerPathId::new("analyst"),
            title: "Analyst".into(),
            courses: vec![member("a", true), member("b", true), member("x", false)],
            requirements: vec![Requirement::MinCourses { count: 2 }],
            certificate_definition: DefinitionId::new("def-analyst"),
            badge_definition: None,
            active: true,
        }],
    )
    .expect("catalog must validate");

    let store = MemoryStore::new();
    let orchestrator = Orchestrator::new(&catalog, &store, &store, &store);

    // The optional course plus one required course is not enough.
    orchestrator.process(&completion("x"), "Ada").unwrap();
    let outcome = orchestrator.process(&completion("a"), "Ada").unwrap();
    assert!(outcome.career_awards.is_empty());

    // The second required course satisfies the threshold.
    let outcome = orchestrator.process(&completion("b"), "Ada").unwrap();
    assert_eq!(outcome.career_awards.len(), 1);
    assert_eq!(outcome.career_awards[0].path_id, CareerPathId::new("analyst"));
}

#[test]
fn career_badge_definition_awards_badge_with_certificate() {
    let catalog = CredentialCatalog::new(
        vec![course_definition("a"), career_definition("ops")],
        vec![BadgeDefinition {
            id: DefinitionId::new("badge-ops"),
            entity: EntityId::Career(CareerPathId::new("ops")),
            label: "Ops Graduate".into(),
            active: true,
        }],
        vec![CareerPath {
            id: CareerPathId::new("ops"),
            title: "Operations".into(),
            courses: vec![member("a", true)],
            requirements: vec![Requirement::AllCourses],
            certificate_definition: DefinitionId::new("def-ops"),
            badge_definition: Some(DefinitionId::new("badge-ops")),
            active: true,
        }],
    )
    .expect("catalog must validate");

    let store = MemoryStore::new();
    let orchestrator = Orchestrator::new(&catalog, &store, &store, &store);

    let outcome = orchestrator.process(&completion("a"), "Ada").unwrap();
    assert_eq!(outcome.career_awards.len(), 1);
    let award = &outcome.career_awards[0];
    let badge = award.badge.as_ref().expect("career badge must be issued");
    assert_eq!(badge.certificate_id, award.certificate.id);
    assert_eq!(badge.entity, EntityId::Career(CareerPathId::new("ops")));
}
