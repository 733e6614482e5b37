//! Editable state of the create-activity form.
//!
//! The model holds values only; validation belongs to whoever triggers
//! submission. Writes replace one field at a time.

use crate::error::{CampusError, Result};
use crate::media::MediaHandle;
use crate::reference::{ReferenceId, ResourceKind};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// Wire format of the date fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Every field of the form, in submission order.
///
/// The string form is the multipart part name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, AsRefStr, IntoStaticStr,
    EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    Name,
    Participant,
    StartDate,
    EndDate,
    Location,
    Point,
    Bulletin,
    Faculty,
    Semester,
    Criterion,
    Image,
    OrganizationalForm,
    Description,
}

impl FormField {
    fn expected(self) -> &'static str {
        match self {
            Self::StartDate | Self::EndDate => "a date",
            Self::Bulletin | Self::Faculty | Self::Semester | Self::Criterion => {
                "a reference selection"
            }
            Self::Image => "an optional media handle",
            Self::OrganizationalForm => "an organizational form",
            _ => "text",
        }
    }
}

/// How the activity is held.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
pub enum OrganizationalForm {
    #[default]
    #[strum(serialize = "Onl")]
    #[serde(rename = "Onl")]
    Online,
    #[strum(serialize = "Off")]
    #[serde(rename = "Off")]
    Offline,
}

/// A value read from or written to a [`FormField`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    Text(String),
    Date(NaiveDate),
    Reference(Option<ReferenceId>),
    Mode(OrganizationalForm),
    Media(Option<MediaHandle>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormModel {
    name: String,
    participant: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    location: String,
    point: String,
    bulletin: Option<ReferenceId>,
    faculty: Option<ReferenceId>,
    semester: Option<ReferenceId>,
    criterion: Option<ReferenceId>,
    image: Option<MediaHandle>,
    organizational_form: OrganizationalForm,
    description: String,
}

impl Default for FormModel {
    fn default() -> Self {
        Self::with_today(Local::now().date_naive())
    }
}

impl FormModel {
    /// Creates an empty form with both dates set to `today`.
    pub fn with_today(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            participant: String::new(),
            start_date: today,
            end_date: today,
            location: String::new(),
            point: String::new(),
            bulletin: None,
            faculty: None,
            semester: None,
            criterion: None,
            image: None,
            organizational_form: OrganizationalForm::default(),
            description: String::new(),
        }
    }

    /// Reads the current value of `field`.
    pub fn get(&self, field: FormField) -> FieldValue {
        match field {
            FormField::Name => FieldValue::Text(self.name.clone()),
            FormField::Participant => FieldValue::Text(self.participant.clone()),
            FormField::Location => FieldValue::Text(self.location.clone()),
            FormField::Point => FieldValue::Text(self.point.clone()),
            FormField::Description => FieldValue::Text(self.description.clone()),
            FormField::StartDate => FieldValue::Date(self.start_date),
            FormField::EndDate => FieldValue::Date(self.end_date),
            FormField::Bulletin => FieldValue::Reference(self.bulletin.clone()),
            FormField::Faculty => FieldValue::Reference(self.faculty.clone()),
            FormField::Semester => FieldValue::Reference(self.semester.clone()),
            FormField::Criterion => FieldValue::Reference(self.criterion.clone()),
            FormField::Image => FieldValue::Media(self.image.clone()),
            FormField::OrganizationalForm => FieldValue::Mode(self.organizational_form),
        }
    }

    /// Replaces the value of `field`.
    ///
    /// Fails with [`CampusError::InvalidField`] if `value` has the wrong
    /// shape for the field; the form is left untouched in that case.
    pub fn set(&mut self, field: FormField, value: FieldValue) -> Result<()> {
        match (field, value) {
            (FormField::Name, FieldValue::Text(v)) => self.name = v,
            (FormField::Participant, FieldValue::Text(v)) => self.participant = v,
            (FormField::Location, FieldValue::Text(v)) => self.location = v,
            (FormField::Point, FieldValue::Text(v)) => self.point = v,
            (FormField::Description, FieldValue::Text(v)) => self.description = v,
            (FormField::StartDate, FieldValue::Date(v)) => self.start_date = v,
            (FormField::EndDate, FieldValue::Date(v)) => self.end_date = v,
            (FormField::Bulletin, FieldValue::Reference(v)) => self.bulletin = v,
            (FormField::Faculty, FieldValue::Reference(v)) => self.faculty = v,
            (FormField::Semester, FieldValue::Reference(v)) => self.semester = v,
            (FormField::Criterion, FieldValue::Reference(v)) => self.criterion = v,
            (FormField::Image, FieldValue::Media(v)) => self.image = v,
            (FormField::OrganizationalForm, FieldValue::Mode(v)) => self.organizational_form = v,
            (field, _) => {
                return Err(CampusError::InvalidField {
                    field: field.into(),
                    expected: field.expected(),
                });
            }
        }
        Ok(())
    }

    /// Selects `id` (or clears the selection) in the field backed by `kind`.
    pub fn select(&mut self, kind: ResourceKind, id: Option<ReferenceId>) {
        let slot = match kind {
            ResourceKind::Bulletins => &mut self.bulletin,
            ResourceKind::Faculties => &mut self.faculty,
            ResourceKind::Semesters => &mut self.semester,
            ResourceKind::Criteria => &mut self.criterion,
        };
        *slot = id;
    }

    pub fn selected(&self, kind: ResourceKind) -> Option<&ReferenceId> {
        match kind {
            ResourceKind::Bulletins => self.bulletin.as_ref(),
            ResourceKind::Faculties => self.faculty.as_ref(),
            ResourceKind::Semesters => self.semester.as_ref(),
            ResourceKind::Criteria => self.criterion.as_ref(),
        }
    }

    /// Stores a newly acquired image, discarding any previous one.
    pub fn set_image(&mut self, image: Option<MediaHandle>) {
        self.image = image;
    }

    pub fn image(&self) -> Option<&MediaHandle> {
        self.image.as_ref()
    }

    pub fn organizational_form(&self) -> OrganizationalForm {
        self.organizational_form
    }

    /// An independent copy of the current values.
    pub fn snapshot(&self) -> FormModel {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn defaults_match_a_fresh_form() {
        let form = FormModel::with_today(day(2024, 3, 1));

        assert_eq!(form.get(FormField::StartDate), FieldValue::Date(day(2024, 3, 1)));
        assert_eq!(form.get(FormField::EndDate), FieldValue::Date(day(2024, 3, 1)));
        assert_eq!(form.organizational_form(), OrganizationalForm::Online);
        assert_eq!(form.get(FormField::Name), FieldValue::text(""));
        assert!(form.image().is_none());
    }

    #[test]
    fn set_replaces_single_field() {
        let mut form = FormModel::with_today(day(2024, 3, 1));

        form.set(FormField::Name, FieldValue::text("Blood drive")).unwrap();
        form.set(FormField::Name, FieldValue::text("Green campus")).unwrap();

        assert_eq!(form.get(FormField::Name), FieldValue::text("Green campus"));
        assert_eq!(form.get(FormField::Location), FieldValue::text(""));
    }

    #[test]
    fn mismatched_value_is_rejected() {
        let mut form = FormModel::with_today(day(2024, 3, 1));

        let err = form
            .set(FormField::StartDate, FieldValue::text("tomorrow"))
            .unwrap_err();

        assert_eq!(
            err,
            CampusError::InvalidField {
                field: "start_date",
                expected: "a date"
            }
        );
        assert_eq!(form.get(FormField::StartDate), FieldValue::Date(day(2024, 3, 1)));
    }

    #[test]
    fn end_date_may_precede_start_date() {
        let mut form = FormModel::with_today(day(2024, 3, 10));

        form.set(FormField::EndDate, FieldValue::Date(day(2024, 3, 1)))
            .unwrap();

        assert_eq!(form.get(FormField::EndDate), FieldValue::Date(day(2024, 3, 1)));
    }

    #[test]
    fn select_writes_the_backing_field() {
        let mut form = FormModel::with_today(day(2024, 3, 1));

        form.select(ResourceKind::Faculties, Some(ReferenceId::from(4)));

        assert_eq!(
            form.get(FormField::Faculty),
            FieldValue::Reference(Some(ReferenceId::from(4)))
        );
        assert_eq!(form.selected(ResourceKind::Faculties), Some(&ReferenceId::from(4)));
        assert_eq!(form.selected(ResourceKind::Bulletins), None);
    }

    #[test]
    fn reacquired_image_supersedes_previous() {
        let mut form = FormModel::with_today(day(2024, 3, 1));

        form.set_image(Some(MediaHandle::new("file:///a.jpg")));
        form.set_image(Some(MediaHandle::new("file:///b.jpg")));

        assert_eq!(form.image(), Some(&MediaHandle::new("file:///b.jpg")));
    }

    #[test]
    fn snapshot_is_detached() {
        let mut form = FormModel::with_today(day(2024, 3, 1));
        let snapshot = form.snapshot();

        form.set(FormField::Point, FieldValue::text("5")).unwrap();

        assert_eq!(snapshot.get(FormField::Point), FieldValue::text(""));
    }

    #[test]
    fn field_names_and_order() {
        let names: Vec<String> = FormField::iter().map(|f| f.to_string()).collect();
        assert_eq!(names.first().map(String::as_str), Some("name"));
        assert!(names.contains(&"organizational_form".to_string()));
        assert_eq!(names.last().map(String::as_str), Some("description"));
    }

    #[test]
    fn organizational_form_wire_values() {
        assert_eq!(OrganizationalForm::Online.to_string(), "Onl");
        assert_eq!("Off".parse::<OrganizationalForm>().unwrap(), OrganizationalForm::Offline);
    }
}
