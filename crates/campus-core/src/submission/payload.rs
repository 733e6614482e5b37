use crate::config::EmptyMediaPolicy;
use crate::form::{DATE_FORMAT, FieldValue, FormField, FormModel};
use crate::media::MediaHandle;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartBody {
    Text(String),
    /// A local file; the transport reads the bytes when sending.
    File(MediaHandle),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipartPart {
    pub name: String,
    pub body: PartBody,
}

/// Transport-neutral multipart body for the create-activity request.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MultipartPayload {
    parts: Vec<MultipartPart>,
}

impl MultipartPayload {
    /// Serializes a form snapshot, one part per field in field order.
    ///
    /// Text and numeric-as-text fields go as-is, dates as `YYYY-MM-DD`,
    /// selections as the identifier's string form (empty when nothing is
    /// selected). The image becomes a file part; without one, `empty_media`
    /// decides whether an empty text part is sent.
    pub fn from_form(form: &FormModel, empty_media: EmptyMediaPolicy) -> Self {
        let mut payload = Self::default();

        for field in FormField::iter() {
            match form.get(field) {
                FieldValue::Text(text) => payload.push_text(field, text),
                FieldValue::Date(date) => {
                    payload.push_text(field, date.format(DATE_FORMAT).to_string())
                }
                FieldValue::Reference(id) => {
                    payload.push_text(field, id.map(|id| id.to_string()).unwrap_or_default())
                }
                FieldValue::Mode(mode) => payload.push_text(field, mode.to_string()),
                FieldValue::Media(Some(handle)) => payload.parts.push(MultipartPart {
                    name: field.to_string(),
                    body: PartBody::File(handle),
                }),
                FieldValue::Media(None) => match empty_media {
                    EmptyMediaPolicy::Omit => {}
                    EmptyMediaPolicy::EmptyText => payload.push_text(field, String::new()),
                },
            }
        }

        payload
    }

    fn push_text(&mut self, field: FormField, text: String) {
        self.parts.push(MultipartPart {
            name: field.to_string(),
            body: PartBody::Text(text),
        });
    }

    pub fn parts(&self) -> &[MultipartPart] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<MultipartPart> {
        self.parts
    }

    pub fn get(&self, name: &str) -> Option<&PartBody> {
        self.parts
            .iter()
            .find(|part| part.name == name)
            .map(|part| &part.body)
    }

    /// Text content of the part called `name`, if it is a text part.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            PartBody::Text(text) => Some(text.as_str()),
            PartBody::File(_) => None,
        }
    }
}
