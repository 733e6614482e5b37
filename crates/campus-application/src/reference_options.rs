//! Selectable option sets populated from the reference collections.

use campus_core::error::Result;
use campus_core::pagination::{CollectionAggregator, PageFetcher, SinglePageLoader};
use campus_core::reference::{
    Bulletin, Criterion, Faculty, ReferenceOption, ReferenceRecord, ResourceKind, Semester,
};

/// Everything the form reads reference data from.
///
/// Blanket-implemented for any type that serves the three paginated
/// collections and the criteria list.
pub trait ReferenceSource:
    PageFetcher<Bulletin> + PageFetcher<Faculty> + PageFetcher<Semester> + SinglePageLoader<Criterion>
{
}

impl<S> ReferenceSource for S where
    S: PageFetcher<Bulletin>
        + PageFetcher<Faculty>
        + PageFetcher<Semester>
        + SinglePageLoader<Criterion>
{
}

/// Load state of one option set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OptionsState {
    #[default]
    Loading,
    Ready(Vec<ReferenceOption>),
    Failed(String),
}

impl OptionsState {
    pub fn from_result(result: Result<Vec<ReferenceOption>>) -> Self {
        match result {
            Ok(options) => Self::Ready(options),
            Err(e) => Self::Failed(e.to_string()),
        }
    }

    /// The options, or an empty slice while loading or after a failure.
    pub fn options(&self) -> &[ReferenceOption] {
        match self {
            Self::Ready(options) => options,
            _ => &[],
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// The four option sets of the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReferenceOptions {
    bulletins: OptionsState,
    faculties: OptionsState,
    semesters: OptionsState,
    criteria: OptionsState,
}

impl ReferenceOptions {
    pub fn get(&self, kind: ResourceKind) -> &OptionsState {
        match kind {
            ResourceKind::Bulletins => &self.bulletins,
            ResourceKind::Faculties => &self.faculties,
            ResourceKind::Semesters => &self.semesters,
            ResourceKind::Criteria => &self.criteria,
        }
    }

    /// Replaces the whole option set for `kind`.
    pub fn replace(&mut self, kind: ResourceKind, state: OptionsState) {
        let slot = match kind {
            ResourceKind::Bulletins => &mut self.bulletins,
            ResourceKind::Faculties => &mut self.faculties,
            ResourceKind::Semesters => &mut self.semesters,
            ResourceKind::Criteria => &mut self.criteria,
        };
        *slot = state;
    }

    pub fn options(&self, kind: ResourceKind) -> &[ReferenceOption] {
        self.get(kind).options()
    }
}

/// Aggregates every page of `kind` and projects it to options.
pub async fn aggregate_options<T>(
    fetcher: &dyn PageFetcher<T>,
    kind: ResourceKind,
) -> Result<Vec<ReferenceOption>>
where
    T: ReferenceRecord + Send + 'static,
{
    let collection = CollectionAggregator::new(fetcher).aggregate(kind).await?;
    Ok(collection.iter().map(ReferenceRecord::to_option).collect())
}

/// Loads the criteria list and projects it to options.
pub async fn load_criteria_options(
    loader: &dyn SinglePageLoader<Criterion>,
) -> Result<Vec<ReferenceOption>> {
    let criteria = loader.load(ResourceKind::Criteria).await?;
    tracing::info!("[ReferenceOptions] Loaded {} criteria", criteria.len());
    Ok(criteria.iter().map(ReferenceRecord::to_option).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use campus_core::error::CampusError;
    use campus_core::reference::ReferenceId;

    #[test]
    fn options_are_empty_until_ready() {
        let mut options = ReferenceOptions::default();
        assert_eq!(options.get(ResourceKind::Faculties), &OptionsState::Loading);
        assert!(options.options(ResourceKind::Faculties).is_empty());

        let faculty = ReferenceOption {
            id: ReferenceId::from(1),
            label: "IT".to_string(),
            aux_label: None,
        };
        options.replace(
            ResourceKind::Faculties,
            OptionsState::from_result(Ok(vec![faculty.clone()])),
        );

        assert_eq!(options.options(ResourceKind::Faculties), &[faculty]);
        assert!(options.options(ResourceKind::Bulletins).is_empty());
    }

    #[test]
    fn failed_state_keeps_the_cause() {
        let state = OptionsState::from_result(Err(CampusError::status(502, "semesters")));

        assert!(matches!(state, OptionsState::Failed(ref cause) if cause.contains("502")));
        assert!(!state.is_ready());
        assert!(state.options().is_empty());
    }
}
