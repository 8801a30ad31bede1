//! Seed dataset.
//!
//! Reproduces the school's fixture records: seven directory entries
//! (one parent, two students, one admin, three staff) and the recorded
//! term reports for the two Doe children.

use crate::directory::UserDirectory;
use crate::error::DirectoryError;
use crate::gradebook::{Gradebook, SubjectRow, TermReport};
use crate::record::UserRecord;
use flemzin_core::{AcademicYear, ClassLevel, RegistrationId, Result, Role, Stage, Term, TermId};

const JS1: ClassLevel = ClassLevel::new(Stage::Junior, 1);
const JS2: ClassLevel = ClassLevel::new(Stage::Junior, 2);

/// Builds the seeded user directory.
pub fn seed_directory() -> Result<UserDirectory, DirectoryError> {
    UserDirectory::new(vec![
        UserRecord::new(
            "Mr. & Mrs. Doe",
            "parent@flemzin.com",
            Role::Parent,
            RegistrationId::new("PAR-001"),
        )
        .with_guardian_links(vec![
            RegistrationId::new("FZP-12345"),
            RegistrationId::new("FZP-54321"),
        ]),
        UserRecord::new(
            "Alex Doe",
            "student@flemzin.com",
            Role::Student,
            RegistrationId::new("FZP-12345"),
        )
        .with_class_level(JS2),
        UserRecord::new(
            "Jane Doe",
            "jane.doe@flemzin.com",
            Role::Student,
            RegistrationId::new("FZP-54321"),
        )
        .with_class_level(JS1),
        UserRecord::new(
            "Dr. Evelyn Reed",
            "admin@flemzin.com",
            Role::Admin,
            RegistrationId::new("ADM-001"),
        ),
        UserRecord::new(
            "Mr. David Smith",
            "staff@flemzin.com",
            Role::Staff,
            RegistrationId::new("STF-001"),
        ),
        UserRecord::new(
            "Mr. Adekunle",
            "adekunle@flemzin.com",
            Role::Staff,
            RegistrationId::new("STF-002"),
        )
        .with_form_teacher_of(JS2),
        UserRecord::new(
            "Mrs. Davis",
            "davis@flemzin.com",
            Role::Staff,
            RegistrationId::new("STF-003"),
        )
        .with_form_teacher_of(JS1),
    ])
}

/// Builds the seeded gradebook.
#[must_use]
pub fn seed_gradebook() -> Gradebook {
    Gradebook::new(vec![
        alex_js2_first_term(),
        alex_js1_third_term(),
        jane_js1_first_term(),
    ])
}

fn alex_js2_first_term() -> TermReport {
    TermReport::new(
        TermId::new(JS2, Term::First, AcademicYear::starting(2024)),
        "Alex Doe",
        RegistrationId::new("FZP-12345"),
        "Mr. Adekunle",
        "5th",
        30,
        519,
        86.5,
        "Excellent",
        "A very good result. Keep up the great work and continue to strive for \
         excellence in all your subjects. The school is proud of your achievements.",
        "Alex has shown remarkable improvement this term, especially in sciences. \
         With a bit more focus on Mathematics, Alex can be unstoppable. Excellent behavior.",
        vec![
            SubjectRow::new("Mathematics", 18, 17, 50, "A", "Excellent"),
            SubjectRow::new("English Language", 19, 18, 55, "A+", "Excellent"),
            SubjectRow::new("Physics", 15, 13, 50, "B", "Very Good"),
            SubjectRow::new("Chemistry", 16, 15, 50, "A", "Excellent"),
            SubjectRow::new("Biology", 18, 17, 53, "A", "Excellent"),
            SubjectRow::new("Computer Science", 20, 20, 55, "A+", "Excellent"),
        ],
    )
}

fn alex_js1_third_term() -> TermReport {
    TermReport::new(
        TermId::new(JS1, Term::Third, AcademicYear::starting(2023)),
        "Alex Doe",
        RegistrationId::new("FZP-12345"),
        "Mr. Adekunle",
        "8th",
        30,
        490,
        81.6,
        "Very Good",
        "Good performance. There is still room for improvement, especially in \
         English Language. Keep working hard.",
        "Alex is a dedicated student. A little more effort in class participation \
         would be beneficial.",
        vec![
            SubjectRow::new("Mathematics", 17, 15, 50, "A", "Excellent"),
            SubjectRow::new("English Language", 15, 15, 45, "B", "Very Good"),
            SubjectRow::new("Basic Science", 18, 17, 50, "A", "Excellent"),
            SubjectRow::new("Basic Technology", 18, 18, 52, "A", "Excellent"),
            SubjectRow::new("Social Studies", 16, 15, 48, "B", "Very Good"),
            SubjectRow::new("Civic Education", 16, 15, 50, "A", "Excellent"),
        ],
    )
}

fn jane_js1_first_term() -> TermReport {
    TermReport::new(
        TermId::new(JS1, Term::First, AcademicYear::starting(2024)),
        "Jane Doe",
        RegistrationId::new("FZP-54321"),
        "Mrs. Davis",
        "1st",
        28,
        550,
        91.6,
        "Outstanding",
        "An outstanding performance. Jane has set a new standard for her peers. \
         We are incredibly proud of her diligence and academic excellence.",
        "Jane is a brilliant and hardworking student who excels in all areas. \
         Her participation in class is exemplary. A pleasure to teach.",
        vec![
            SubjectRow::new("Mathematics", 20, 19, 58, "A+", "Excellent"),
            SubjectRow::new("English Language", 18, 18, 56, "A+", "Excellent"),
            SubjectRow::new("Basic Science", 19, 19, 54, "A+", "Excellent"),
            SubjectRow::new("Basic Technology", 17, 18, 50, "A", "Excellent"),
            SubjectRow::new("Social Studies", 18, 17, 52, "A", "Excellent"),
            SubjectRow::new("Civic Education", 20, 20, 57, "A+", "Excellent"),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_directory_passes_integrity_checks() {
        let directory = seed_directory().expect("seed directory");
        assert_eq!(directory.len(), 7);
    }

    #[test]
    fn seed_parent_links_to_both_children() {
        let directory = seed_directory().expect("seed directory");
        let dependents = directory
            .resolve_dependents(&RegistrationId::new("PAR-001"))
            .expect("resolve");
        let ids: Vec<&str> = dependents.iter().map(|d| d.reg_id().as_str()).collect();
        // Alex (JS2) outranks Jane (JS1).
        assert_eq!(ids, ["FZP-12345", "FZP-54321"]);
    }

    #[test]
    fn seed_records_resolve_by_email() {
        let directory = seed_directory().expect("seed directory");
        let admin = directory
            .find_by_identity_key("admin@flemzin.com")
            .expect("found");
        assert_eq!(admin.role(), Role::Admin);
        assert_eq!(admin.display_name(), "Dr. Evelyn Reed");
    }

    #[test]
    fn seed_form_teachers_cover_both_junior_classes() {
        let directory = seed_directory().expect("seed directory");
        assert_eq!(
            directory.form_teacher_for(JS2).map(UserRecord::display_name),
            Some("Mr. Adekunle")
        );
        assert_eq!(
            directory.form_teacher_for(JS1).map(UserRecord::display_name),
            Some("Mrs. Davis")
        );
    }

    #[test]
    fn seed_gradebook_terms_come_newest_first() {
        let book = seed_gradebook();
        let terms: Vec<String> = book
            .terms_for(&RegistrationId::new("FZP-12345"))
            .iter()
            .map(TermId::to_string)
            .collect();
        assert_eq!(terms, ["js2-1-2425", "js1-3-2324"]);
        assert_eq!(
            book.terms_for(&RegistrationId::new("FZP-54321")).len(),
            1
        );
    }

    #[test]
    fn seed_report_fields_are_consistent() {
        let book = seed_gradebook();
        let term = "js2-1-2425".parse().expect("term key");
        let report = book
            .report(&RegistrationId::new("FZP-12345"), term)
            .expect("report");
        assert_eq!(report.session_label(), "JS2 First Term, 2024/2025");
        assert_eq!(report.subjects().len(), 6);
        assert_eq!(report.subjects()[5].subject(), "Computer Science");
        assert_eq!(report.subjects()[5].total(), 95);
        let sum: u16 = report.subjects().iter().map(SubjectRow::total).sum();
        assert_eq!(sum, report.total_score());
    }

    #[test]
    fn seed_covers_only_students_with_results() {
        let book = seed_gradebook();
        assert!(book.has_results_for(&RegistrationId::new("FZP-12345")));
        assert!(book.has_results_for(&RegistrationId::new("FZP-54321")));
        assert!(!book.has_results_for(&RegistrationId::new("PAR-001")));
    }
}
