//! Domain layer for the campus activity form.
//!
//! Holds the data model, the seams to the outside world (HTTP, device
//! platform, session store, user notices) and the pure parts of the
//! pipeline: page aggregation, media acquisition, form state and
//! submission outcome mapping.

pub mod config;
pub mod error;
pub mod form;
pub mod media;
pub mod notice;
pub mod pagination;
pub mod reference;
pub mod submission;

pub use error::{CampusError, Result};
