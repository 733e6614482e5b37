//! Reference data shown as selectable options on the activity form.

pub mod model;

pub use model::{
    Bulletin, Criterion, Faculty, ReferenceId, ReferenceOption, ReferenceRecord, ResourceKind,
    Semester,
};
