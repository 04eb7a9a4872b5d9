//! Purpose: Shape records into view models for tables and the detail view.
//! Exports: `RecordRow`, `RecordDetail`, `DetailSection`, `table_rows`, `record_detail`.
//! Role: Pure step between fetched records and a `Presenter`; no rendering here.
//! Invariants: Rows keep the positional index of the listing they came from.
//! Invariants: Absent text fields display empty; absent form type displays `inbound`.

use crate::core::format::{format_currency, format_date};
use crate::core::key::RecordKey;
use crate::core::record::ExchangeRecord;
use serde::Serialize;

const MISSING_BUDGET: &str = "N/A";

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordRow {
    pub index: usize,
    pub key: String,
    pub name: String,
    pub student_id: String,
    pub email: String,
    pub major: String,
    pub form_type: String,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct DetailSection {
    pub heading: String,
    pub fields: Vec<(String, String)>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct RecordDetail {
    pub title: String,
    pub index: usize,
    pub key: String,
    pub sections: Vec<DetailSection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl RecordDetail {
    /// Value of the first field labelled `label`, across all sections.
    pub fn field(&self, label: &str) -> Option<&str> {
        self.sections
            .iter()
            .flat_map(|section| section.fields.iter())
            .find(|(name, _)| name == label)
            .map(|(_, value)| value.as_str())
    }
}

pub fn table_rows(records: &[ExchangeRecord]) -> Vec<RecordRow> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| table_row(index, record))
        .collect()
}

pub fn table_row(index: usize, record: &ExchangeRecord) -> RecordRow {
    RecordRow {
        index,
        key: RecordKey::of(record).to_string(),
        name: text(&record.name),
        student_id: text(&record.student_id),
        email: text(&record.email),
        major: major_name(record),
        form_type: record.display_form_type().as_str().to_string(),
    }
}

pub fn record_detail(index: usize, record: &ExchangeRecord) -> RecordDetail {
    let personal = section(
        "Personal Information",
        [
            ("Name", text(&record.name)),
            ("Student ID", text(&record.student_id)),
            ("Email", text(&record.email)),
            ("Phone", text(&record.phone)),
            ("Passport", text(&record.passport_number)),
            ("Residence", text(&record.residence)),
        ],
    );
    let academic = section(
        "Academic Information",
        [
            ("Major", major_name(record)),
            ("Year", text(&record.year)),
            ("Adviser", text(&record.adviser)),
            ("Country", text(&record.country)),
            ("University", text(&record.university)),
            ("Type", record.display_form_type().as_str().to_string()),
        ],
    );
    let budget = record
        .budget
        .map(format_currency)
        .unwrap_or_else(|| MISSING_BUDGET.to_string());
    let duration = format!(
        "{} to {}",
        format_date(record.from_date.as_deref().unwrap_or("")),
        format_date(record.to_date.as_deref().unwrap_or(""))
    );
    let project = section(
        "Project Information",
        [
            ("Project", text(&record.project)),
            ("Funder", text(&record.funder)),
            ("Budget", budget),
            ("Duration", duration),
        ],
    );

    RecordDetail {
        title: format!("Student Details - {}", record.display_name()),
        index,
        key: RecordKey::of(record).to_string(),
        sections: vec![personal, academic, project],
        details: record.details.clone(),
    }
}

fn section<const N: usize>(heading: &str, fields: [(&str, String); N]) -> DetailSection {
    DetailSection {
        heading: heading.to_string(),
        fields: fields
            .into_iter()
            .map(|(label, value)| (label.to_string(), value))
            .collect(),
    }
}

fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn major_name(record: &ExchangeRecord) -> String {
    record
        .major
        .as_ref()
        .map(|major| major.display_name().to_string())
        .unwrap_or_default()
}
