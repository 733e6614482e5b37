use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use strum::{AsRefStr, Display, EnumIter};

/// The reference collections the activity form selects from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, AsRefStr, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResourceKind {
    Bulletins,
    Faculties,
    Semesters,
    Criteria,
}

impl ResourceKind {
    /// Whether the remote endpoint for this kind is cursor-paginated.
    pub fn is_paginated(self) -> bool {
        !matches!(self, Self::Criteria)
    }
}

/// Opaque identifier of a reference record.
///
/// The server emits numeric primary keys; they are kept in their string
/// form since that is what the multipart payload carries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ReferenceId(String);

impl ReferenceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for ReferenceId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<&str> for ReferenceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for ReferenceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Number(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Number(n) => Self::from(n),
            RawId::Text(s) => Self(s),
        })
    }
}

/// Display/selection projection of a reference record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceOption {
    pub id: ReferenceId,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aux_label: Option<String>,
}

/// A domain record that can be offered as a selectable option.
pub trait ReferenceRecord {
    fn to_option(&self) -> ReferenceOption;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bulletin {
    pub id: ReferenceId,
    pub name: String,
}

impl ReferenceRecord for Bulletin {
    fn to_option(&self) -> ReferenceOption {
        ReferenceOption {
            id: self.id.clone(),
            label: self.name.clone(),
            aux_label: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faculty {
    pub id: ReferenceId,
    pub name: String,
}

impl ReferenceRecord for Faculty {
    fn to_option(&self) -> ReferenceOption {
        ReferenceOption {
            id: self.id.clone(),
            label: self.name.clone(),
            aux_label: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Semester {
    pub id: ReferenceId,
    pub original_name: String,
    pub academic_year: String,
}

impl ReferenceRecord for Semester {
    /// Label reads "<semester> - <academic year>".
    fn to_option(&self) -> ReferenceOption {
        ReferenceOption {
            id: self.id.clone(),
            label: format!("{} - {}", self.original_name, self.academic_year),
            aux_label: Some(self.academic_year.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: ReferenceId,
    pub name: String,
    #[serde(default)]
    pub max_point: Option<i32>,
}

impl ReferenceRecord for Criterion {
    fn to_option(&self) -> ReferenceOption {
        ReferenceOption {
            id: self.id.clone(),
            label: self.name.clone(),
            aux_label: self.max_point.map(|p| format!("max {p}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_id_accepts_numbers_and_strings() {
        let numeric: ReferenceId = serde_json::from_str("42").unwrap();
        let text: ReferenceId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(numeric.as_str(), "42");
        assert_eq!(text.as_str(), "abc");
    }

    #[test]
    fn semester_label_combines_name_and_year() {
        let semester: Semester = serde_json::from_value(serde_json::json!({
            "id": 3,
            "original_name": "HK1",
            "academic_year": "2023-2024",
            "start_date": "2023-09-01"
        }))
        .unwrap();

        let option = semester.to_option();
        assert_eq!(option.id, ReferenceId::from(3));
        assert_eq!(option.label, "HK1 - 2023-2024");
    }

    #[test]
    fn resource_kind_names() {
        assert_eq!(ResourceKind::Faculties.to_string(), "faculties");
        assert!(ResourceKind::Bulletins.is_paginated());
        assert!(!ResourceKind::Criteria.is_paginated());
    }
}
