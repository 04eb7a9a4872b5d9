//! Purpose: Validate raw form input before any record reaches the endpoint.
//! Exports: `validate_form`, `FormError`, and the individual field predicates.
//! Role: Pure gate between user input and `RemoteRecordStore::add/update`.
//! Invariants: Checks run in a fixed order and each failing check adds exactly one error.
//! Invariants: Checks are independent; one failure never skips another.

use crate::core::format::parse_record_date;
use crate::core::record::FormInput;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FormError {
    NameRequired,
    StudentIdRequired,
    InvalidEmail,
    InvalidBudget,
    DateOrder,
}

impl FormError {
    pub fn message(self) -> &'static str {
        match self {
            FormError::NameRequired => "Full name is required",
            FormError::StudentIdRequired => "Student ID is required",
            FormError::InvalidEmail => "Valid email address is required",
            FormError::InvalidBudget => "Budget must be a valid positive number",
            FormError::DateOrder => "End date must be after start date",
        }
    }

    /// Wire name of the field the error points at.
    pub fn field(self) -> &'static str {
        match self {
            FormError::NameRequired => "name",
            FormError::StudentIdRequired => "studentId",
            FormError::InvalidEmail => "email",
            FormError::InvalidBudget => "budget",
            FormError::DateOrder => "todate",
        }
    }
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

pub fn validate_form(input: &FormInput) -> Vec<FormError> {
    let mut errors = Vec::new();
    if !is_present(&input.name) {
        errors.push(FormError::NameRequired);
    }
    if !is_present(&input.student_id) {
        errors.push(FormError::StudentIdRequired);
    }
    if !is_valid_email(&input.email) {
        errors.push(FormError::InvalidEmail);
    }
    if !is_valid_budget(&input.budget) {
        errors.push(FormError::InvalidBudget);
    }
    if !is_valid_date_range(&input.from_date, &input.to_date) {
        errors.push(FormError::DateOrder);
    }
    errors
}

pub fn is_present(value: &str) -> bool {
    !value.trim().is_empty()
}

pub fn is_valid_email(email: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"))
        .is_match(email)
}

pub fn is_valid_budget(budget: &str) -> bool {
    budget
        .trim()
        .parse::<f64>()
        .is_ok_and(|value| value.is_finite() && value >= 0.0)
}

/// True only when both dates parse and `end` is strictly later than `start`.
pub fn is_valid_date_range(start: &str, end: &str) -> bool {
    match (parse_record_date(start), parse_record_date(end)) {
        (Some(start), Some(end)) => end > start,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{FormError, is_valid_budget, is_valid_email, validate_form};
    use crate::core::record::FormInput;

    fn valid_form() -> FormInput {
        FormInput {
            name: "Somchai Jaidee".to_string(),
            student_id: "64010123".to_string(),
            email: "somchai@example.ac.th".to_string(),
            budget: "45000".to_string(),
            from_date: "2024-06-01".to_string(),
            to_date: "2024-08-31".to_string(),
            ..FormInput::default()
        }
    }

    #[test]
    fn valid_form_has_no_errors() {
        assert!(validate_form(&valid_form()).is_empty());
    }

    #[test]
    fn missing_name_and_bad_email_report_in_order() {
        let form = FormInput {
            name: "   ".to_string(),
            email: "not-an-email".to_string(),
            ..valid_form()
        };
        let messages = validate_form(&form)
            .into_iter()
            .map(FormError::message)
            .collect::<Vec<_>>();
        assert_eq!(
            messages,
            vec!["Full name is required", "Valid email address is required"]
        );
    }

    #[test]
    fn reversed_dates_fail_ordering() {
        let form = FormInput {
            from_date: "2024-01-01".to_string(),
            to_date: "2023-12-31".to_string(),
            ..valid_form()
        };
        assert_eq!(validate_form(&form), vec![FormError::DateOrder]);
    }

    #[test]
    fn equal_or_unparseable_dates_fail_ordering() {
        let same = FormInput {
            to_date: "2024-06-01".to_string(),
            ..valid_form()
        };
        assert_eq!(validate_form(&same), vec![FormError::DateOrder]);

        let garbage = FormInput {
            from_date: "soon".to_string(),
            ..valid_form()
        };
        assert_eq!(validate_form(&garbage), vec![FormError::DateOrder]);
    }

    #[test]
    fn budget_rules() {
        assert!(!is_valid_budget("-5"));
        assert!(is_valid_budget("0"));
        assert!(is_valid_budget(" 12.50 "));
        assert!(!is_valid_budget(""));
        assert!(!is_valid_budget("12abc"));
        assert!(!is_valid_budget("NaN"));
        assert!(!is_valid_budget("inf"));

        let negative = FormInput {
            budget: "-5".to_string(),
            ..valid_form()
        };
        assert_eq!(validate_form(&negative), vec![FormError::InvalidBudget]);
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("first.last@mail.example.ac.th"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("a@@b.c"));
        assert!(!is_valid_email("@b.c"));
        assert!(!is_valid_email("a@.c"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn empty_form_reports_every_rule_once() {
        let errors = validate_form(&FormInput::default());
        assert_eq!(
            errors,
            vec![
                FormError::NameRequired,
                FormError::StudentIdRequired,
                FormError::InvalidEmail,
                FormError::InvalidBudget,
                FormError::DateOrder,
            ]
        );
    }
}
