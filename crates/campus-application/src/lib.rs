//! Application layer for the campus activity form.
//!
//! Wires the core components to the HTTP infrastructure and owns the
//! per-screen form state.

pub mod bootstrap;
pub mod form_session;
pub mod logging;
pub mod reference_options;

pub use bootstrap::{mount_activity_form, mount_from_user_config};
pub use form_session::{AcquireOutcome, ActivityFormSession, FormHandle, SessionDependencies};
pub use logging::init_tracing;
pub use reference_options::{OptionsState, ReferenceOptions, ReferenceSource};
