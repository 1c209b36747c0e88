//! Integration test: full end-to-end workflow.
//!
//! Tests the complete lifecycle:
//! 1. Load a validated catalog
//! 2. Process a passing completion event
//! 3. Verify the certificate and badge publicly by code
//! 4. Re-process the identical event (idempotency)
//! 5. Complete the second course and earn the career path
//! 6. Check expiry semantics for a non-expiring definition

use credenta::{
    BadgeDefinition, BadgeStage, CareerPath, CareerPathId, CertificateDefinition,
    CertificateStage, CompletionRecord, CourseId, CourseMembership, CredentialCatalog,
    CredentialStatus, Criterion, CriterionDefinition, DefinitionId, EntityId, EntityKind,
    LearnerId, MemoryStore, Orchestrator, QuizId, QuizScore, Requirement, VerificationRegistry,
};

fn course_definition(course: &str) -> CertificateDefinition {
    CertificateDefinition {
        id: DefinitionId::new(format!("def-{course}")),
        entity: EntityId::Course(CourseId::new(course)),
        criteria: vec![
            CriterionDefinition::required(Criterion::CompletionPercentage {
                min_percentage: 80.0,
            }),
            CriterionDefinition::required(Criterion::QuizScore {
                quiz_id: QuizId::new("q1"),
                min_score: 70.0,
            }),
        ],
        issuer_name: "Open Academy".into(),
        issuer_title: "Director of Studies".into(),
        expiry_months: None,
        active: true,
    }
}

fn career_definition() -> CertificateDefinition {
    CertificateDefinition {
        id: DefinitionId::new("def-backend"),
        entity: EntityId::Career(CareerPathId::new("backend")),
        criteria: Vec::new(),
        issuer_name: "Open Academy".into(),
        issuer_title: "Director of Studies".into(),
        expiry_months: None,
        active: true,
    }
}

fn make_catalog() -> CredentialCatalog {
    let path = CareerPath {
        id: CareerPathId::new("backend"),
        title: "Backend Developer".into(),
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
        certificate_definition: DefinitionId::new("def-backend"),
        badge_definition: None,
        active: true,
    };

    CredentialCatalog::new(
        vec![
            course_definition("c1"),
            course_definition("c2"),
            career_definition(),
        ],
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
        quiz_scores: vec![QuizScore {
            quiz_id: QuizId::new("q1"),
            score: 90.0,
        }],
        lessons_completed: 10,
        total_lessons: 10,
    }
}

#[test]
fn full_workflow_completion_to_career_award() {
    let store = MemoryStore::new();
    let catalog = make_catalog();
    let orchestrator = Orchestrator::new(&catalog, &store, &store, &store);
    let registry = VerificationRegistry::new(&store, &store, &store);

    // ── Step 1: Process a passing completion for c1 ─────────────────────
    let outcome = orchestrator
        .process(&completion("c1"), "Ada Lovelace")
        .expect("processing must succeed");

    let cert = match &outcome.certificate {
        CertificateStage::Issued(c) => c.clone(),
        other => panic!("expected a new certificate, got {other:?}"),
    };
    assert!(cert.verification_code.0.starts_with("vrf_"));
    assert_eq!(cert.status, CredentialStatus::Active);
    assert_eq!(cert.expires_at, None);

    let badge = match &outcome.badge {
        BadgeStage::Issued(b) => b.clone(),
        other => panic!("expected a new badge, got {other:?}"),
    };
    assert_eq!(badge.certificate_id, cert.id);

    // One course down: no career award yet.
    assert!(outcome.career_awards.is_empty());

    // ── Step 2: Public verification by code ─────────────────────────────
    let record = registry
        .verify_by_code(&cert.verification_code)
        .unwrap()
        .expect("certificate record must resolve");
    assert_eq!(record.entity_kind, EntityKind::Course);
    assert_eq!(record.recipient_name, "Ada Lovelace");
    assert_eq!(record.issuer_name, "Open Academy");
    assert_eq!(record.status, CredentialStatus::Active);
    // No expiry configured — never reported expired, however far ahead.
    assert!(!record.is_expired_at(record.issued_at + chrono::Duration::days(365 * 50)));

    let badge_record = registry
        .verify_by_code(&badge.verification_code)
        .unwrap()
        .expect("badge record must resolve");
    assert_eq!(badge_record.status, CredentialStatus::Active);

    // ── Step 3: Identical second call is idempotent ─────────────────────
    let again = orchestrator.process(&completion("c1"), "Ada Lovelace").unwrap();
    match &again.certificate {
        CertificateStage::AlreadyHeld(c) => {
            assert_eq!(c.id, cert.id);
            assert_eq!(c.verification_code, cert.verification_code);
        }
        other => panic!("expected already-held certificate, got {other:?}"),
    }
    assert!(again.career_awards.is_empty());

    // ── Step 4: Completing c2 earns the career path ─────────────────────
    let outcome = orchestrator
        .process(&completion("c2"), "Ada Lovelace")
        .unwrap();
    assert!(matches!(outcome.certificate, CertificateStage::Issued(_)));
    // c2 has no badge definition configured.
    assert!(matches!(outcome.badge, BadgeStage::NotConfigured));

    assert_eq!(outcome.career_awards.len(), 1);
    let award = &outcome.career_awards[0];
    assert_eq!(award.path_id, CareerPathId::new("backend"));
    assert_eq!(
        award.certificate.entity,
        EntityId::Career(CareerPathId::new("backend"))
    );
    // The course badge earned for c1 justifies the award.
    assert_eq!(award.certificate.evidence, vec![badge.id.clone()]);
    // No badge definition on the path.
    assert!(award.badge.is_none());

    // The career certificate verifies publicly like any other.
    let career_record = registry
        .verify_by_code(&award.certificate.verification_code)
        .unwrap()
        .expect("career record must resolve");
    assert_eq!(career_record.entity_kind, EntityKind::Career);

    // ── Step 5: Re-processing c2 awards nothing new ─────────────────────
    let again = orchestrator.process(&completion("c2"), "Ada Lovelace").unwrap();
    assert!(matches!(again.certificate, CertificateStage::AlreadyHeld(_)));
    assert!(again.career_awards.is_empty());
}

#[test]
fn failing_criteria_issue_nothing_and_verify_finds_nothing() {
    let store = MemoryStore::new();
    let catalog = make_catalog();
    let orchestrator = Orchestrator::new(&catalog, &store, &store, &store);

    // 75% against a required 80% threshold.
    let mut record = completion("c1");
    record.completion_percentage = 75.0;

    let outcome = orchestrator.process(&record, "Ada Lovelace").unwrap();
    assert!(outcome.certificate().is_none());
    match &outcome.certificate {
        CertificateStage::CriteriaNotMet(failures) => {
            assert_eq!(failures.len(), 1);
            assert!(failures[0].contains("75.0"));
        }
        other => panic!("expected criteria failure, got {other:?}"),
    }
}
