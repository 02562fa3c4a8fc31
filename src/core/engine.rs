/// The description engine: Subject → String orchestration.
///
/// Wires together the metadata store, variant matching and the two
/// composition strategies behind one service object, built once at the
/// composition root and passed by reference to callers.

use std::path::PathBuf;

use crate::core::composer::DescriptionComposer;
use crate::core::matcher::{MatchError, VariantMatcher};
use crate::core::store::{MetaStore, StoreError};
use crate::schema::category::CategorySet;
use crate::schema::model::{DescriptionProperty, ModelMeta};
use crate::schema::subject::Subject;

/// The top-level description engine. Built via `DescriptionEngine::builder()`.
pub struct DescriptionEngine {
    store: MetaStore,
}

/// Builder for constructing a `DescriptionEngine`.
pub struct DescriptionEngineBuilder {
    sources: Vec<PathBuf>,
    /// Directly provided models (for testing without files).
    models: Vec<ModelMeta>,
}

impl DescriptionEngine {
    pub fn builder() -> DescriptionEngineBuilder {
        DescriptionEngineBuilder {
            sources: Vec::new(),
            models: Vec::new(),
        }
    }

    /// Every property that applies to the subject right now, or a signal the
    /// subject or its model could not be resolved.
    pub fn matched_properties(
        &self,
        subject: &dyn Subject,
    ) -> Result<Vec<DescriptionProperty>, MatchError> {
        VariantMatcher::new(&self.store).match_properties(subject)
    }

    /// Describe the subject as a police scanner audio token stream, limited
    /// to the desired categories.
    pub fn describe_audio(
        &self,
        subject: &dyn Subject,
        desired: &CategorySet,
    ) -> Result<String, MatchError> {
        let matched = self.matched_properties(subject)?;
        Ok(DescriptionComposer::render_audio(&matched, desired))
    }

    /// Describe the subject as a human-readable phrase, limited to the
    /// desired categories.
    pub fn describe_text(
        &self,
        subject: &dyn Subject,
        desired: &CategorySet,
    ) -> Result<String, MatchError> {
        let matched = self.matched_properties(subject)?;
        Ok(DescriptionComposer::render_text(&matched, desired))
    }

    /// Rescan the configured metadata sources, replacing the current rule
    /// sets.
    pub fn rebuild(&self) -> Result<(), StoreError> {
        self.store.rebuild()
    }

    pub fn store(&self) -> &MetaStore {
        &self.store
    }
}

impl DescriptionEngineBuilder {
    /// Add a metadata source directory.
    pub fn source(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(path.into());
        self
    }

    /// Add several metadata source directories.
    pub fn sources(mut self, paths: impl IntoIterator<Item = PathBuf>) -> Self {
        self.sources.extend(paths);
        self
    }

    /// Provide models directly (for testing without files). Directly provided
    /// models are inserted before any source scan, so they win duplicate
    /// resolution.
    pub fn with_models(mut self, models: impl IntoIterator<Item = ModelMeta>) -> Self {
        self.models.extend(models);
        self
    }

    /// Build the engine. Configured sources are scanned eagerly so a missing
    /// source directory surfaces here rather than at first description.
    pub fn build(self) -> Result<DescriptionEngine, StoreError> {
        let store = MetaStore::new(self.sources.clone());
        for meta in self.models {
            store.insert(meta);
        }
        if !self.sources.is_empty() {
            store.build()?;
        }
        Ok(DescriptionEngine { store })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::category::Category;
    use crate::schema::model::VariantCondition;
    use crate::schema::subject::FixedSubject;

    fn stlat_meta() -> ModelMeta {
        ModelMeta {
            name: "A_M_Y_STLAT_02".to_string(),
            properties: vec![
                DescriptionProperty {
                    category: Category::RaceSex,
                    condition: None,
                    audio: "A_WITHOUT_HESITATION".to_string(),
                    text: "hispanic male".to_string(),
                },
                DescriptionProperty {
                    category: Category::Clothing,
                    condition: Some(VariantCondition { component: 4, drawable: 12, texture: 0 }),
                    audio: "CLOTHING_DARK_JEANS".to_string(),
                    text: "dark jeans".to_string(),
                },
            ],
        }
    }

    #[test]
    fn builder_with_models_skips_the_filesystem() {
        let engine = DescriptionEngine::builder()
            .with_models([stlat_meta()])
            .build()
            .unwrap();
        assert_eq!(engine.store().len(), 1);
    }

    #[test]
    fn builder_surfaces_missing_sources() {
        let result = DescriptionEngine::builder()
            .source("no/such/directory")
            .build();
        assert!(matches!(result, Err(StoreError::SourceNotFound(_))));
    }

    #[test]
    fn describe_text_end_to_end() {
        let engine = DescriptionEngine::builder()
            .with_models([stlat_meta()])
            .build()
            .unwrap();
        let subject = FixedSubject::new("A_M_Y_STLAT_02").with_variant(4, 12, 0);
        let desired = CategorySet::of(&[Category::RaceSex, Category::Clothing]);
        assert_eq!(
            engine.describe_text(&subject, &desired).unwrap(),
            "Hispanic male wearing dark jeans"
        );
    }

    #[test]
    fn describe_audio_end_to_end() {
        let engine = DescriptionEngine::builder()
            .with_models([stlat_meta()])
            .build()
            .unwrap();
        let subject = FixedSubject::new("A_M_Y_STLAT_02").with_variant(4, 12, 0);
        let desired = CategorySet::of(&[Category::RaceSex, Category::Clothing]);
        assert_eq!(
            engine.describe_audio(&subject, &desired).unwrap(),
            "A_WITHOUT_HESITATION A_WITHOUT_HESITATION 200MS_SILENCE WEARING  CLOTHING_DARK_JEANS 200MS_SILENCE"
        );
    }
}
