//! Purpose: Define the exchange-program record, its enumerated codes, and raw form input.
//! Exports: `ExchangeRecord`, `FormInput`, `FormType`, `MajorCode`.
//! Role: Single data model shared by the store (wire), validator, and view shaping.
//! Invariants: Wire field names match the endpoint exactly (`studentId`, `fromdate`, ...).
//! Invariants: Decoding never fails on a cell type; blank cells decode as absent.
//! Invariants: Unknown major/form-type codes round-trip unchanged.

use serde::{Deserialize, Serialize, Serializer};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRecord {
    #[serde(default, deserialize_with = "lenient::text", serialize_with = "lenient::write_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", serialize_with = "lenient::write_text")]
    pub student_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", serialize_with = "lenient::write_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", serialize_with = "lenient::write_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", serialize_with = "lenient::write_text")]
    pub passport_number: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", serialize_with = "lenient::write_text")]
    pub residence: Option<String>,
    #[serde(default, deserialize_with = "lenient::major", serialize_with = "lenient::write_major")]
    pub major: Option<MajorCode>,
    #[serde(default, deserialize_with = "lenient::text", serialize_with = "lenient::write_text")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", serialize_with = "lenient::write_text")]
    pub adviser: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", serialize_with = "lenient::write_text")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", serialize_with = "lenient::write_text")]
    pub university: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", serialize_with = "lenient::write_text")]
    pub project: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", serialize_with = "lenient::write_text")]
    pub funder: Option<String>,
    #[serde(default, deserialize_with = "lenient::number", serialize_with = "lenient::write_number")]
    pub budget: Option<f64>,
    #[serde(
        rename = "fromdate",
        default,
        deserialize_with = "lenient::text",
        serialize_with = "lenient::write_text"
    )]
    pub from_date: Option<String>,
    #[serde(
        rename = "todate",
        default,
        deserialize_with = "lenient::text",
        serialize_with = "lenient::write_text"
    )]
    pub to_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::text", serialize_with = "lenient::write_text")]
    pub details: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::form_type",
        serialize_with = "lenient::write_form_type"
    )]
    pub form_type: Option<FormType>,
}

impl ExchangeRecord {
    /// Name for messages and titles; absent names render empty.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Form type shown to users; `inbound` stands in when the cell is blank.
    pub fn display_form_type(&self) -> FormType {
        self.form_type.clone().unwrap_or(FormType::Inbound)
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum FormType {
    Inbound,
    Outbound,
    Other(String),
}

impl FormType {
    pub fn as_str(&self) -> &str {
        match self {
            FormType::Inbound => "inbound",
            FormType::Outbound => "outbound",
            FormType::Other(raw) => raw,
        }
    }
}

impl From<&str> for FormType {
    fn from(raw: &str) -> Self {
        match raw {
            "inbound" => FormType::Inbound,
            "outbound" => FormType::Outbound,
            other => FormType::Other(other.to_string()),
        }
    }
}

impl Serialize for FormType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum MajorCode {
    Civil,
    Industrial,
    Mechanical,
    Electrical,
    Computer,
    Environmental,
    Materials,
    Chemical,
    IntelligentInnovation,
    Other(String),
}

impl MajorCode {
    pub const KNOWN: [MajorCode; 9] = [
        MajorCode::Civil,
        MajorCode::Industrial,
        MajorCode::Mechanical,
        MajorCode::Electrical,
        MajorCode::Computer,
        MajorCode::Environmental,
        MajorCode::Materials,
        MajorCode::Chemical,
        MajorCode::IntelligentInnovation,
    ];

    pub fn code(&self) -> &str {
        match self {
            MajorCode::Civil => "ce",
            MajorCode::Industrial => "ie",
            MajorCode::Mechanical => "me",
            MajorCode::Electrical => "ee",
            MajorCode::Computer => "cpe",
            MajorCode::Environmental => "envi",
            MajorCode::Materials => "mate",
            MajorCode::Chemical => "chem",
            MajorCode::IntelligentInnovation => "iie",
            MajorCode::Other(raw) => raw,
        }
    }

    /// Department name; unknown codes display as the code itself.
    pub fn display_name(&self) -> &str {
        match self {
            MajorCode::Civil => "Civil Engineering",
            MajorCode::Industrial => "Industrial Engineering",
            MajorCode::Mechanical => "Mechanical Engineering",
            MajorCode::Electrical => "Electrical Engineering",
            MajorCode::Computer => "Computer Engineering",
            MajorCode::Environmental => "Environmental Engineering",
            MajorCode::Materials => "Materials Engineering",
            MajorCode::Chemical => "Chemical Engineering",
            MajorCode::IntelligentInnovation => "Intelligent Innovation Engineering",
            MajorCode::Other(raw) => raw,
        }
    }
}

impl From<&str> for MajorCode {
    fn from(raw: &str) -> Self {
        MajorCode::KNOWN
            .into_iter()
            .find(|known| known.code() == raw)
            .unwrap_or_else(|| MajorCode::Other(raw.to_string()))
    }
}

impl Serialize for MajorCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

/// Raw form values exactly as a user entered them; every field is text.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormInput {
    #[serde(deserialize_with = "lenient::form_text")]
    pub name: String,
    #[serde(deserialize_with = "lenient::form_text")]
    pub student_id: String,
    #[serde(deserialize_with = "lenient::form_text")]
    pub email: String,
    #[serde(deserialize_with = "lenient::form_text")]
    pub phone: String,
    #[serde(deserialize_with = "lenient::form_text")]
    pub passport_number: String,
    #[serde(deserialize_with = "lenient::form_text")]
    pub residence: String,
    #[serde(deserialize_with = "lenient::form_text")]
    pub major: String,
    #[serde(deserialize_with = "lenient::form_text")]
    pub year: String,
    #[serde(deserialize_with = "lenient::form_text")]
    pub adviser: String,
    #[serde(deserialize_with = "lenient::form_text")]
    pub country: String,
    #[serde(deserialize_with = "lenient::form_text")]
    pub university: String,
    #[serde(deserialize_with = "lenient::form_text")]
    pub project: String,
    #[serde(deserialize_with = "lenient::form_text")]
    pub funder: String,
    #[serde(deserialize_with = "lenient::form_text")]
    pub budget: String,
    #[serde(rename = "fromdate", deserialize_with = "lenient::form_text")]
    pub from_date: String,
    #[serde(rename = "todate", deserialize_with = "lenient::form_text")]
    pub to_date: String,
    #[serde(deserialize_with = "lenient::form_text")]
    pub details: String,
    #[serde(deserialize_with = "lenient::form_text")]
    pub form_type: String,
}

impl FormInput {
    /// Convert validated form text into a record. Blank fields become absent.
    pub fn to_record(&self) -> ExchangeRecord {
        ExchangeRecord {
            name: non_blank(&self.name),
            student_id: non_blank(&self.student_id),
            email: non_blank(&self.email),
            phone: non_blank(&self.phone),
            passport_number: non_blank(&self.passport_number),
            residence: non_blank(&self.residence),
            major: non_blank(&self.major).map(|code| MajorCode::from(code.as_str())),
            year: non_blank(&self.year),
            adviser: non_blank(&self.adviser),
            country: non_blank(&self.country),
            university: non_blank(&self.university),
            project: non_blank(&self.project),
            funder: non_blank(&self.funder),
            budget: self.budget.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
            from_date: non_blank(&self.from_date),
            to_date: non_blank(&self.to_date),
            details: non_blank(&self.details),
            form_type: non_blank(&self.form_type).map(|raw| FormType::from(raw.as_str())),
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

mod lenient {
    use super::{FormType, MajorCode};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde_json::Value;

    fn scalar_text(value: Value) -> Option<String> {
        match value {
            Value::String(text) if text.trim().is_empty() => None,
            Value::String(text) => Some(text),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub(super) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(value.and_then(scalar_text))
    }

    pub(super) fn form_text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::String(text)) => text,
            Some(other) => scalar_text(other).unwrap_or_default(),
            None => String::new(),
        })
    }

    pub(super) fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(match value {
            Some(Value::Number(number)) => number.as_f64(),
            Some(Value::String(text)) => text.trim().parse::<f64>().ok(),
            _ => None,
        }
        .filter(|v| v.is_finite()))
    }

    pub(super) fn major<'de, D>(deserializer: D) -> Result<Option<MajorCode>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(text(deserializer)?.map(|code| MajorCode::from(code.as_str())))
    }

    pub(super) fn form_type<'de, D>(deserializer: D) -> Result<Option<FormType>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(text(deserializer)?.map(|raw| FormType::from(raw.as_str())))
    }

    // Absent fields go out as empty strings, the way a submitted form carries them.
    pub(super) fn write_text<S>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub(super) fn write_number<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(number) => serializer.serialize_f64(*number),
            None => serializer.serialize_str(""),
        }
    }

    pub(super) fn write_major<S>(value: &Option<MajorCode>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(major) => major.serialize(serializer),
            None => serializer.serialize_str(""),
        }
    }

    pub(super) fn write_form_type<S>(
        value: &Option<FormType>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(form_type) => form_type.serialize(serializer),
            None => serializer.serialize_str(""),
        }
    }
}
