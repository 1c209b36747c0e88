//! Integration test: revocation is non-cascading by policy.
//!
//! Revoking a course certificate flips that certificate and its
//! verification record to REVOKED — and nothing else. The dependent course
//! badge and any career certificate built on the revoked course survive
//! untouched. Both halves are asserted.

use credenta::{
    BadgeDefinition, BadgeRepository, CareerPath, CareerPathId, CertificateDefinition,
    CertificateRepository, CompletionRecord, CourseId, CourseMembership, CredentialCatalog,
    CredentialStatus, Criterion, CriterionDefinition, DefinitionId, EntityId, LearnerId,
    MemoryStore, Orchestrator, Requirement, RevocationReason, VerificationRegistry,
};

fn course_definition(course: &str) -> CertificateDefinition {
    CertificateDefinition {
        id: DefinitionId::new(format!("def-{course}")),
        entity: EntityId::Course(CourseId::new(course)),
        criteria: vec![CriterionDefinition::required(
            Criterion::CompletionPercentage {
                min_percentage: 50.0,
            },
        )],
        issuer_name: "Open Academy".into(),
        issuer_title: "Director of Studies".into(),
        expiry_months: None,
        active: true,
    }
}

fn make_catalog() -> CredentialCatalog {
    let career_def = CertificateDefinition {
        id: DefinitionId::new("def-data"),
        entity: EntityId::Career(CareerPathId::new("data")),
        criteria: Vec::new(),
        issuer_name: "Open Academy".into(),
        issuer_title: "Director of Studies".into(),
        expiry_months: None,
        active: true,
    };
    let path = CareerPath {
        id: CareerPathId::new("data"),
        title: "Data Analyst".into(),
        courses: vec![
            CourseMembership {
                course_id: CourseId::new("c1"),
                required: true,
            },
            CourseMembership {
                course_id: CourseId::new("c2"),
                required: true,
            },
        ],
        requirements: vec![Requirement::AllCourses],
        certificate_definition: DefinitionId::new("def-data"),
        badge_definition: None,
        active: true,
    };

    CredentialCatalog::new(
        vec![course_definition("c1"), course_definition("c2"), career_def],
        vec![BadgeDefinition {
            id: DefinitionId::new("badge-c1"),
            entity: EntityId::Course(CourseId::new("c1")),
            label: "Course 1 Finisher".into(),
            active: true,
        }],
        vec![path],
    )
    .expect("catalog must validate")
}

fn completion(course: &str) -> CompletionRecord {
    CompletionRecord {
        learner_id: LearnerId::new("u1"),
        course_id: CourseId::new(course),
        completion_percentage: 100.0,
        quiz_scores: Vec::new(),
        lessons_completed: 5,
        total_lessons: 5,
    }
}

#[test]
fn revoking_course_certificate_does_not_cascade() {
    let store = MemoryStore::new();
    let catalog = make_catalog();
    let orchestrator = Orchestrator::new(&catalog, &store, &store, &store);
    let registry = VerificationRegistry::new(&store, &store, &store);

    // Earn both courses; the second completion awards the career path.
    let first = orchestrator.process(&completion("c1"), "Ada").unwrap();
    let course_cert = first.certificate().unwrap().clone();
    let course_badge = first.badge.badge().unwrap().clone();

    let second = orchestrator.process(&completion("c2"), "Ada").unwrap();
    assert_eq!(second.career_awards.len(), 1);
    let career_cert = second.career_awards[0].certificate.clone();

    // Revoke the c1 course certificate.
    registry
        .revoke_certificate(&course_cert.id, RevocationReason::IntegrityViolation)
        .unwrap();

    // First half: the certificate and its record are revoked.
    let stored = CertificateRepository::get(&store, &course_cert.id)
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, CredentialStatus::Revoked);
    let record = registry
        .verify_by_code(&course_cert.verification_code)
        .unwrap()
        .unwrap();
    assert_eq!(record.status, CredentialStatus::Revoked);

    // Second half: the dependent badge and the career certificate built on
    // the revoked course are unchanged.
    let badge = BadgeRepository::get(&store, &course_badge.id).unwrap().unwrap();
    assert_eq!(badge.status, CredentialStatus::Active);
    let career = CertificateRepository::get(&store, &career_cert.id)
        .unwrap()
        .unwrap();
    assert_eq!(career.status, CredentialStatus::Active);
    let career_record = registry
        .verify_by_code(&career_cert.verification_code)
        .unwrap()
        .unwrap();
    assert_eq!(career_record.status, CredentialStatus::Active);
}

#[test]
fn revocation_is_terminal() {
    let store = MemoryStore::new();
    let catalog = make_catalog();
    let orchestrator = Orchestrator::new(&catalog, &store, &store, &store);
    let registry = VerificationRegistry::new(&store, &store, &store);

    let outcome = orchestrator.process(&completion("c1"), "Ada").unwrap();
    let cert = outcome.certificate().unwrap().clone();

    registry
        .revoke_certificate(&cert.id, RevocationReason::ManualRevocation)
        .unwrap();
    // Repeat revocation stays revoked and does not error.
    registry
        .revoke_certificate(&cert.id, RevocationReason::IssuedInError)
        .unwrap();

    let stored = CertificateRepository::get(&store, &cert.id).unwrap().unwrap();
    assert_eq!(stored.status, CredentialStatus::Revoked);
}
