//! One mounted create-activity screen.
//!
//! `ActivityFormSession` owns the form state for as long as the screen is
//! mounted and wires the core components together:
//! - reference loads that fill the option sets concurrently
//! - image acquisition that writes into the form
//! - submission of the current snapshot with a user notice
//!
//! Long-running work (loads, acquisition) only holds a [`FormHandle`],
//! a weak reference to the state. Results that arrive after the session
//! is unmounted are dropped instead of being applied.

use crate::reference_options::{
    OptionsState, ReferenceOptions, ReferenceSource, aggregate_options, load_criteria_options,
};
use campus_core::config::EmptyMediaPolicy;
use campus_core::error::Result;
use campus_core::form::{FieldValue, FormField, FormModel};
use campus_core::media::{MediaAcquirer, MediaHandle, MediaPlatform};
use campus_core::notice::Notifier;
use campus_core::reference::{
    Bulletin, Faculty, ReferenceId, ReferenceOption, ResourceKind, Semester,
};
use campus_core::submission::{
    ActivityEndpoint, CredentialStore, SubmissionOutcome, SubmissionPipeline,
};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tokio::sync::Mutex;

/// Mutable state of a mounted form.
#[derive(Debug, Default)]
pub struct FormState {
    pub form: FormModel,
    pub options: ReferenceOptions,
}

/// Weak reference to a session's [`FormState`].
#[derive(Clone)]
pub struct FormHandle {
    state: Weak<Mutex<FormState>>,
}

impl FormHandle {
    /// Whether the owning session is still mounted.
    pub fn is_alive(&self) -> bool {
        self.state.strong_count() > 0
    }

    /// Runs `f` against the state, or returns `None` if the session is gone.
    pub async fn update<F, R>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut FormState) -> R + Send,
        R: Send,
    {
        let state = self.state.upgrade()?;
        let mut guard = state.lock().await;
        Some(f(&mut guard))
    }
}

/// Result of an image acquisition started from the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquireOutcome {
    /// The image was stored in the form.
    Applied(MediaHandle),
    /// Permission denied or picker cancelled; the form is unchanged.
    NoSelection,
    /// An image was picked after the session was unmounted.
    Discarded,
}

/// Collaborators a session is mounted with.
pub struct SessionDependencies<S> {
    pub source: Arc<S>,
    pub media_platform: Arc<dyn MediaPlatform>,
    pub credentials: Arc<dyn CredentialStore>,
    pub endpoint: Arc<dyn ActivityEndpoint>,
    pub notifier: Arc<dyn Notifier>,
    pub empty_media: EmptyMediaPolicy,
}

pub struct ActivityFormSession<S> {
    state: Arc<Mutex<FormState>>,
    source: Arc<S>,
    acquirer: Arc<Mutex<MediaAcquirer>>,
    pipeline: SubmissionPipeline,
    notifier: Arc<dyn Notifier>,
    submitting: AtomicBool,
}

impl<S> ActivityFormSession<S>
where
    S: ReferenceSource + 'static,
{
    /// Mounts a session with a fresh default form.
    pub fn mount(deps: SessionDependencies<S>) -> Self {
        Self::mount_with_form(deps, FormModel::default())
    }

    pub fn mount_with_form(deps: SessionDependencies<S>, form: FormModel) -> Self {
        let acquirer = MediaAcquirer::new(deps.media_platform, deps.notifier.clone());
        let pipeline = SubmissionPipeline::new(deps.credentials, deps.endpoint)
            .with_empty_media(deps.empty_media);

        tracing::debug!("[FormSession] Mounted");
        Self {
            state: Arc::new(Mutex::new(FormState {
                form,
                options: ReferenceOptions::default(),
            })),
            source: deps.source,
            acquirer: Arc::new(Mutex::new(acquirer)),
            pipeline,
            notifier: deps.notifier,
            submitting: AtomicBool::new(false),
        }
    }

    pub fn handle(&self) -> FormHandle {
        FormHandle {
            state: Arc::downgrade(&self.state),
        }
    }

    /// Loads all four option sets.
    ///
    /// The loads run interleaved on the awaiting task and each one writes
    /// its option set as soon as it finishes, so sets become ready in any
    /// order. A failed load marks only its own set as failed.
    pub fn load_reference_data(&self) -> impl Future<Output = ()> + Send + 'static + use<S> {
        let source = self.source.clone();
        let handle = self.handle();

        async move {
            let source = &*source;
            tokio::join!(
                apply_options(
                    &handle,
                    ResourceKind::Bulletins,
                    aggregate_options::<Bulletin>(source, ResourceKind::Bulletins),
                ),
                apply_options(
                    &handle,
                    ResourceKind::Faculties,
                    aggregate_options::<Faculty>(source, ResourceKind::Faculties),
                ),
                apply_options(
                    &handle,
                    ResourceKind::Semesters,
                    aggregate_options::<Semester>(source, ResourceKind::Semesters),
                ),
                apply_options(
                    &handle,
                    ResourceKind::Criteria,
                    load_criteria_options(source),
                ),
            );
        }
    }

    /// Lets the user pick an image and stores it in the form.
    ///
    /// The returned future does not borrow the session; it may outlive it.
    pub fn acquire_image(
        &self,
    ) -> impl Future<Output = Result<AcquireOutcome>> + Send + 'static + use<S> {
        let acquirer = self.acquirer.clone();
        let handle = self.handle();

        async move {
            let selected = acquirer.lock().await.acquire().await?;
            let Some(image) = selected else {
                return Ok(AcquireOutcome::NoSelection);
            };

            let stored = image.clone();
            match handle
                .update(move |state| state.form.set_image(Some(stored)))
                .await
            {
                Some(()) => Ok(AcquireOutcome::Applied(image)),
                None => {
                    tracing::debug!(
                        "[FormSession] Session unmounted, discarding image {}",
                        image.local_uri
                    );
                    Ok(AcquireOutcome::Discarded)
                }
            }
        }
    }

    /// Submits the current form and notifies the user of the outcome.
    ///
    /// Returns `None` without sending anything if a submission from this
    /// session is already in flight.
    pub async fn submit(&self) -> Option<SubmissionOutcome> {
        let Some(_in_flight) = InFlightGuard::acquire(&self.submitting) else {
            tracing::warn!("[FormSession] Submission already in flight, ignoring");
            return None;
        };

        let snapshot = self.state.lock().await.form.snapshot();
        let outcome = self.pipeline.submit(&snapshot).await;
        self.notifier.notify(outcome.notice());
        Some(outcome)
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    pub async fn set_field(&self, field: FormField, value: FieldValue) -> Result<()> {
        self.state.lock().await.form.set(field, value)
    }

    pub async fn select(&self, kind: ResourceKind, id: Option<ReferenceId>) {
        self.state.lock().await.form.select(kind, id);
    }

    pub async fn form_snapshot(&self) -> FormModel {
        self.state.lock().await.form.snapshot()
    }

    pub async fn options_state(&self, kind: ResourceKind) -> OptionsState {
        self.state.lock().await.options.get(kind).clone()
    }

    pub async fn options(&self, kind: ResourceKind) -> Vec<ReferenceOption> {
        self.state.lock().await.options.options(kind).to_vec()
    }

    /// Tears the session down. Pending work keeps running but its results
    /// are no longer applied.
    pub fn unmount(self) {
        tracing::debug!("[FormSession] Unmounted");
    }
}

async fn apply_options<F>(handle: &FormHandle, kind: ResourceKind, load: F)
where
    F: Future<Output = Result<Vec<ReferenceOption>>>,
{
    let result = load.await;
    if let Err(e) = &result {
        tracing::error!("[FormSession] Failed to load {}: {}", kind, e);
    }

    let state = OptionsState::from_result(result);
    if handle
        .update(move |form_state| form_state.options.replace(kind, state))
        .await
        .is_none()
    {
        tracing::debug!("[FormSession] Session unmounted, dropping {} options", kind);
    }
}

/// Marks a submission as in flight until dropped.
struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
