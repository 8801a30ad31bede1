//! The gradebook: read-only term report data per student.
//!
//! Reports are keyed by registration id and term key. The gradebook
//! never mutates after construction; the portal only ever reads it.

use flemzin_core::{ClassLevel, RegistrationId, TermId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// The school's letter-grade scale for overall averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LetterGrade {
    A,
    B,
    C,
    D,
    F,
}

impl LetterGrade {
    /// Grades an average score out of 100.
    #[must_use]
    pub fn from_average(average: f32) -> Self {
        if average >= 80.0 {
            Self::A
        } else if average >= 70.0 {
            Self::B
        } else if average >= 60.0 {
            Self::C
        } else if average >= 50.0 {
            Self::D
        } else {
            Self::F
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::F => "F",
        }
    }

    /// The remark printed next to the grade on report cards.
    #[must_use]
    pub fn remark(&self) -> &'static str {
        match self {
            Self::A => "Excellent",
            Self::B => "Very Good",
            Self::C => "Good",
            Self::D => "Pass",
            Self::F => "Fail",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One subject row on a report card.
///
/// Scores are recorded per assessment; the total is their sum. The
/// grade and remark are the school's recorded judgments for the row
/// (the subject scale awards `A+` above the plain letter bands).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectRow {
    subject: String,
    ca1: u8,
    ca2: u8,
    exam: u8,
    grade: String,
    remark: String,
}

impl SubjectRow {
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        ca1: u8,
        ca2: u8,
        exam: u8,
        grade: impl Into<String>,
        remark: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            ca1,
            ca2,
            exam,
            grade: grade.into(),
            remark: remark.into(),
        }
    }

    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    #[must_use]
    pub fn ca1(&self) -> u8 {
        self.ca1
    }

    #[must_use]
    pub fn ca2(&self) -> u8 {
        self.ca2
    }

    #[must_use]
    pub fn exam(&self) -> u8 {
        self.exam
    }

    /// Total score: first CA + second CA + exam.
    #[must_use]
    pub fn total(&self) -> u16 {
        u16::from(self.ca1) + u16::from(self.ca2) + u16::from(self.exam)
    }

    #[must_use]
    pub fn grade(&self) -> &str {
        &self.grade
    }

    #[must_use]
    pub fn remark(&self) -> &str {
        &self.remark
    }
}

/// One term's full report card for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermReport {
    term: TermId,
    student_name: String,
    reg_id: RegistrationId,
    form_teacher: String,
    /// Position in class as an ordinal, e.g. `5th`.
    position: String,
    class_size: u16,
    total_score: u16,
    average_score: f32,
    /// The school's recorded overall judgment, e.g. `Outstanding`.
    overall_remark: String,
    principal_comment: String,
    teacher_comment: String,
    subjects: Vec<SubjectRow>,
}

impl TermReport {
    #[must_use]
    #[expect(clippy::too_many_arguments)]
    pub fn new(
        term: TermId,
        student_name: impl Into<String>,
        reg_id: RegistrationId,
        form_teacher: impl Into<String>,
        position: impl Into<String>,
        class_size: u16,
        total_score: u16,
        average_score: f32,
        overall_remark: impl Into<String>,
        principal_comment: impl Into<String>,
        teacher_comment: impl Into<String>,
        subjects: Vec<SubjectRow>,
    ) -> Self {
        Self {
            term,
            student_name: student_name.into(),
            reg_id,
            form_teacher: form_teacher.into(),
            position: position.into(),
            class_size,
            total_score,
            average_score,
            overall_remark: overall_remark.into(),
            principal_comment: principal_comment.into(),
            teacher_comment: teacher_comment.into(),
            subjects,
        }
    }

    #[must_use]
    pub fn term(&self) -> TermId {
        self.term
    }

    /// The class the report belongs to, taken from the term key.
    #[must_use]
    pub fn class_level(&self) -> ClassLevel {
        self.term.level()
    }

    /// Report header line, e.g. `JS2 First Term, 2024/2025`.
    #[must_use]
    pub fn session_label(&self) -> String {
        format!(
            "{} {}, {}",
            self.term.level(),
            self.term.term().name(),
            self.term.year().display_long()
        )
    }

    #[must_use]
    pub fn student_name(&self) -> &str {
        &self.student_name
    }

    #[must_use]
    pub fn reg_id(&self) -> &RegistrationId {
        &self.reg_id
    }

    #[must_use]
    pub fn form_teacher(&self) -> &str {
        &self.form_teacher
    }

    #[must_use]
    pub fn position(&self) -> &str {
        &self.position
    }

    #[must_use]
    pub fn class_size(&self) -> u16 {
        self.class_size
    }

    #[must_use]
    pub fn total_score(&self) -> u16 {
        self.total_score
    }

    #[must_use]
    pub fn average_score(&self) -> f32 {
        self.average_score
    }

    /// The letter grade derived from the average score.
    #[must_use]
    pub fn overall_letter(&self) -> LetterGrade {
        LetterGrade::from_average(self.average_score)
    }

    #[must_use]
    pub fn overall_remark(&self) -> &str {
        &self.overall_remark
    }

    #[must_use]
    pub fn principal_comment(&self) -> &str {
        &self.principal_comment
    }

    #[must_use]
    pub fn teacher_comment(&self) -> &str {
        &self.teacher_comment
    }

    #[must_use]
    pub fn subjects(&self) -> &[SubjectRow] {
        &self.subjects
    }
}

/// All term reports, keyed by student and term.
#[derive(Debug, Clone, Default)]
pub struct Gradebook {
    reports: HashMap<RegistrationId, BTreeMap<TermId, TermReport>>,
}

impl Gradebook {
    /// Builds a gradebook from a flat list of reports.
    #[must_use]
    pub fn new(reports: Vec<TermReport>) -> Self {
        let mut map: HashMap<RegistrationId, BTreeMap<TermId, TermReport>> = HashMap::new();
        for report in reports {
            map.entry(report.reg_id().clone())
                .or_default()
                .insert(report.term(), report);
        }
        Self { reports: map }
    }

    /// Returns the report for one student and term, if recorded.
    #[must_use]
    pub fn report(&self, subject: &RegistrationId, term: TermId) -> Option<&TermReport> {
        self.reports.get(subject).and_then(|terms| terms.get(&term))
    }

    /// Returns the student's term keys, most recent first.
    #[must_use]
    pub fn terms_for(&self, subject: &RegistrationId) -> Vec<TermId> {
        self.reports
            .get(subject)
            .map(|terms| terms.keys().rev().copied().collect())
            .unwrap_or_default()
    }

    /// Returns the student's most recent term key, if any.
    #[must_use]
    pub fn latest_term(&self, subject: &RegistrationId) -> Option<TermId> {
        self.reports
            .get(subject)
            .and_then(|terms| terms.keys().next_back())
            .copied()
    }

    /// Returns true if the student has at least one recorded report.
    #[must_use]
    pub fn has_results_for(&self, subject: &RegistrationId) -> bool {
        self.reports
            .get(subject)
            .is_some_and(|terms| !terms.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(key: &str) -> TermId {
        key.parse().expect("term key")
    }

    fn report(term_key: &str, average: f32) -> TermReport {
        TermReport::new(
            term(term_key),
            "Alex Doe",
            RegistrationId::new("FZP-12345"),
            "Mr. Adekunle",
            "5th",
            30,
            519,
            average,
            "Excellent",
            "A very good result.",
            "Remarkable improvement this term.",
            vec![SubjectRow::new("Mathematics", 18, 17, 50, "A", "Excellent")],
        )
    }

    #[test]
    fn letter_grade_bands() {
        assert_eq!(LetterGrade::from_average(86.5), LetterGrade::A);
        assert_eq!(LetterGrade::from_average(80.0), LetterGrade::A);
        assert_eq!(LetterGrade::from_average(79.9), LetterGrade::B);
        assert_eq!(LetterGrade::from_average(65.0), LetterGrade::C);
        assert_eq!(LetterGrade::from_average(50.0), LetterGrade::D);
        assert_eq!(LetterGrade::from_average(49.9), LetterGrade::F);
    }

    #[test]
    fn letter_grade_remarks_match_report_legend() {
        assert_eq!(LetterGrade::A.remark(), "Excellent");
        assert_eq!(LetterGrade::B.remark(), "Very Good");
        assert_eq!(LetterGrade::C.remark(), "Good");
        assert_eq!(LetterGrade::D.remark(), "Pass");
        assert_eq!(LetterGrade::F.remark(), "Fail");
    }

    #[test]
    fn subject_total_sums_assessments() {
        let row = SubjectRow::new("Mathematics", 18, 17, 50, "A", "Excellent");
        assert_eq!(row.total(), 85);
    }

    #[test]
    fn session_label_reads_like_a_report_header() {
        let r = report("js2-1-2425", 86.5);
        assert_eq!(r.session_label(), "JS2 First Term, 2024/2025");
        assert_eq!(r.class_level().to_string(), "JS2");
    }

    #[test]
    fn overall_letter_derives_from_average() {
        assert_eq!(report("js2-1-2425", 86.5).overall_letter(), LetterGrade::A);
        assert_eq!(report("js2-1-2425", 73.0).overall_letter(), LetterGrade::B);
    }

    #[test]
    fn terms_come_most_recent_first() {
        let book = Gradebook::new(vec![
            report("js1-3-2324", 81.6),
            report("js2-1-2425", 86.5),
        ]);
        let terms = book.terms_for(&RegistrationId::new("FZP-12345"));
        assert_eq!(terms, vec![term("js2-1-2425"), term("js1-3-2324")]);
        assert_eq!(
            book.latest_term(&RegistrationId::new("FZP-12345")),
            Some(term("js2-1-2425"))
        );
    }

    #[test]
    fn report_lookup_by_student_and_term() {
        let book = Gradebook::new(vec![report("js2-1-2425", 86.5)]);
        let subject = RegistrationId::new("FZP-12345");
        assert!(book.report(&subject, term("js2-1-2425")).is_some());
        assert!(book.report(&subject, term("js1-1-2425")).is_none());
        assert!(book.report(&RegistrationId::new("FZP-00000"), term("js2-1-2425")).is_none());
    }

    #[test]
    fn unknown_student_has_no_results() {
        let book = Gradebook::new(vec![report("js2-1-2425", 86.5)]);
        assert!(book.has_results_for(&RegistrationId::new("FZP-12345")));
        assert!(!book.has_results_for(&RegistrationId::new("FZP-99999")));
        assert!(book.terms_for(&RegistrationId::new("FZP-99999")).is_empty());
    }
}
