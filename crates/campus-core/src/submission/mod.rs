//! Authenticated multipart submission of the activity form.

pub mod payload;
pub mod pipeline;

pub use payload::{MultipartPart, MultipartPayload, PartBody};
pub use pipeline::{
    ActivityEndpoint, CredentialStore, GENERIC_REJECTION, HTTP_201_CREATED, SubmissionOutcome,
    SubmissionPipeline,
};
