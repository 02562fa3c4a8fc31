/// Variant matcher — selects the rules that apply to a live subject's state.

use thiserror::Error;

use crate::core::store::{MetaStore, StoreError};
use crate::schema::model::DescriptionProperty;
use crate::schema::subject::Subject;

/// Number of component slots scanned for drawable/texture state. Components
/// of interest do not currently appear at or above this index.
pub const COMPONENT_SLOTS: usize = 9;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("cannot operate on a null or invalid subject")]
    InvalidSubject,
    #[error("model {0} does not appear in the metadata store")]
    UnknownModel(String),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

/// Matches a subject's live per-component variant state against its model's
/// rule set.
pub struct VariantMatcher<'a> {
    store: &'a MetaStore,
}

impl<'a> VariantMatcher<'a> {
    pub fn new(store: &'a MetaStore) -> Self {
        Self { store }
    }

    /// Return every property that applies to the subject right now:
    /// unconditional properties first, then per-slot conditional matches in
    /// ascending slot order, authoring order preserved within each group.
    ///
    /// The subject is a live external object the host may destroy at any
    /// point, so validity is re-checked before every read. Invalidation
    /// discovered mid-scan degrades to the partial result collected so far
    /// rather than an error; a caller still gets a best-effort description.
    pub fn match_properties(
        &self,
        subject: &dyn Subject,
    ) -> Result<Vec<DescriptionProperty>, MatchError> {
        if !subject.is_valid() {
            log::warn!("cannot operate on a null or invalid subject");
            return Err(MatchError::InvalidSubject);
        }

        // The model name becomes unreadable if the subject dies between the
        // check above and the reads below, so cache it up front.
        let model = subject.model_name().ok_or(MatchError::InvalidSubject)?;

        self.store.ensure_built()?;

        let Some(meta) = self.store.lookup(&model) else {
            log::debug!("{} does not appear in the metadata store", model);
            return Err(MatchError::UnknownModel(model));
        };

        let mut matched: Vec<DescriptionProperty> = meta.unconditional().cloned().collect();

        for component in 0..COMPONENT_SLOTS {
            if !subject.is_valid() {
                log::warn!(
                    "subject became invalid while reading component {}; results incomplete",
                    component
                );
                return Ok(matched);
            }
            let Some(variant) = subject.variation(component) else {
                log::warn!(
                    "subject became invalid while reading component {}; results incomplete",
                    component
                );
                return Ok(matched);
            };
            matched.extend(meta.matching(component, variant).cloned());
        }

        Ok(matched)
    }
}
