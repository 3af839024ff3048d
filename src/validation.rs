//! Draft validation for the add/edit form.
//!
//! `validate` is the single source of truth: the save hint in the form and
//! the submit path both go through `is_submittable`, which is defined in
//! terms of it.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::fields::FormField;
use crate::task::TaskDraft;

pub const TITLE_REQUIRED: &str = "Title is required";
pub const DUE_DATE_REQUIRED: &str = "Due date is required";

/// Field name to message, one entry per failing field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<FormField, &'static str>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: FormField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &'static str)> + '_ {
        self.0.iter().map(|(f, m)| (*f, *m))
    }

    fn insert(&mut self, field: FormField, message: &'static str) {
        self.0.insert(field, message);
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Check a draft and return every failing field.
pub fn validate(draft: &TaskDraft) -> FieldErrors {
    let mut errors = FieldErrors::default();
    if draft.title.trim().is_empty() {
        errors.insert(FormField::Title, TITLE_REQUIRED);
    }
    if draft.due_date.is_none() {
        errors.insert(FormField::DueDate, DUE_DATE_REQUIRED);
    }
    errors
}

/// Whether the draft may be saved.
pub fn is_submittable(draft: &TaskDraft) -> bool {
    validate(draft).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    #[test]
    fn test_empty_title_is_rejected() {
        let draft = TaskDraft::new("", date(2024, 12, 12));
        let errors = validate(&draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(FormField::Title), Some("Title is required"));
        assert!(!is_submittable(&draft));
    }

    #[test]
    fn test_missing_due_date_is_rejected() {
        let draft = TaskDraft::new("Buy milk", None);
        let errors = validate(&draft);
        assert_eq!(errors.get(FormField::DueDate), Some("Due date is required"));
        assert!(!errors.contains(FormField::Title));
    }

    #[test]
    fn test_both_failures_reported() {
        let errors = validate(&TaskDraft::new("   ", None));
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.to_string(),
            "title: Title is required, due_date: Due date is required"
        );
    }

    #[test]
    fn test_description_and_priority_never_validated() {
        let draft = TaskDraft::new("Call mum", date(2025, 1, 2)).with_description("");
        assert!(validate(&draft).is_empty());
        assert!(is_submittable(&draft));
    }

    #[test]
    fn test_errors_serialize_as_map() {
        let errors = validate(&TaskDraft::new("", date(2024, 12, 12)));
        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"{"title":"Title is required"}"#);
    }

    proptest! {
        #[test]
        fn prop_blank_titles_rejected(ws in "[ \t\n]{0,8}", has_due in any::<bool>()) {
            let due = if has_due { date(2024, 12, 12) } else { None };
            let draft = TaskDraft::new(&ws, due);
            prop_assert!(validate(&draft).contains(FormField::Title));
            prop_assert!(!is_submittable(&draft));
        }

        #[test]
        fn prop_submittable_matches_field_presence(title in ".{0,12}", has_due in any::<bool>()) {
            let due = if has_due { date(2024, 12, 12) } else { None };
            let draft = TaskDraft::new(&title, due);
            let expected = !title.trim().is_empty() && has_due;
            prop_assert_eq!(is_submittable(&draft), expected);
            prop_assert_eq!(validate(&draft).is_empty(), expected);
        }
    }
}
