/// Metadata store — model lookup, source scanning, parsing, and loading.

use rustc_hash::FxHashMap;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};
use thiserror::Error;

use crate::schema::category::Category;
use crate::schema::model::{DescriptionProperty, ModelMeta, VariantCondition};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("metadata source directory not found: {0}")]
    SourceNotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Why a single model record was rejected during parsing. Rejected records
/// are logged and skipped; they never abort a scan.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("model record has an empty name")]
    EmptyName,
    #[error("unknown category '{0}'")]
    UnknownCategory(String),
    #[error("component {component} is missing a drawable/texture pair")]
    PartialCondition { component: usize },
    #[error("drawable/texture given without a component")]
    DanglingVariant,
}

/// Process-wide mapping from upper-cased model identifier to that model's
/// rule set.
///
/// Built by scanning the configured source directories for `.ron` metadata
/// packs. The first definition of a model identifier across all sources wins;
/// later ones are discarded so multiple packs can coexist without one
/// overriding another. Once non-empty the store is never rebuilt
/// automatically; `rebuild` rescans on demand.
pub struct MetaStore {
    sources: Vec<PathBuf>,
    models: RwLock<FxHashMap<String, ModelMeta>>,
    // Serializes build/rebuild so concurrent first lookups observe either an
    // empty store or a fully merged one.
    build_lock: Mutex<()>,
}

impl MetaStore {
    pub fn new(sources: impl IntoIterator<Item = PathBuf>) -> Self {
        Self {
            sources: sources.into_iter().collect(),
            models: RwLock::new(FxHashMap::default()),
            build_lock: Mutex::new(()),
        }
    }

    /// Scan every configured source directory and merge the parsed models
    /// into the store, first definition wins. Each source directory must
    /// exist or the whole build fails with `SourceNotFound`. Re-running is a
    /// no-op for identifiers already present.
    pub fn build(&self) -> Result<(), StoreError> {
        let _guard = self.build_lock.lock().unwrap_or_else(|e| e.into_inner());
        let staged = self.scan()?;
        let mut models = self.models.write().unwrap_or_else(|e| e.into_inner());
        for meta in staged {
            models.entry(meta.name.clone()).or_insert(meta);
        }
        Ok(())
    }

    /// Rescan the sources from scratch and atomically replace the mapping.
    /// On failure the previous mapping is left untouched.
    pub fn rebuild(&self) -> Result<(), StoreError> {
        let _guard = self.build_lock.lock().unwrap_or_else(|e| e.into_inner());
        let staged = self.scan()?;
        let mut fresh = FxHashMap::default();
        for meta in staged {
            fresh.entry(meta.name.clone()).or_insert(meta);
        }
        *self.models.write().unwrap_or_else(|e| e.into_inner()) = fresh;
        Ok(())
    }

    /// Build the store if it is still empty. Once non-empty this does
    /// nothing; call `rebuild` to pick up metadata changes.
    pub fn ensure_built(&self) -> Result<(), StoreError> {
        if self.is_empty() {
            self.build()?;
        }
        Ok(())
    }

    /// Look up a model's rule set, case-insensitively.
    pub fn lookup(&self, model: &str) -> Option<ModelMeta> {
        let key = model.to_uppercase();
        self.models
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&key)
            .cloned()
    }

    /// Insert a model directly, first definition wins. Returns whether the
    /// model was inserted; a duplicate identifier is discarded silently.
    pub fn insert(&self, meta: ModelMeta) -> bool {
        let key = meta.name.to_uppercase();
        let mut models = self.models.write().unwrap_or_else(|e| e.into_inner());
        if models.contains_key(&key) {
            return false;
        }
        models.insert(
            key.clone(),
            ModelMeta {
                name: key,
                properties: meta.properties,
            },
        );
        true
    }

    pub fn len(&self) -> usize {
        self.models.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted list of every loaded model identifier.
    pub fn model_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .models
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    fn scan(&self) -> Result<Vec<ModelMeta>, StoreError> {
        let mut staged = Vec::new();
        for source in &self.sources {
            if !source.is_dir() {
                return Err(StoreError::SourceNotFound(source.clone()));
            }
            let mut files: Vec<PathBuf> = std::fs::read_dir(source)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("ron"))
                .collect();
            files.sort();
            for file in files {
                match load_meta_file(&file) {
                    Ok(models) => staged.extend(models),
                    Err(e) => {
                        log::warn!("skipping metadata file {}: {}", file.display(), e);
                    }
                }
            }
        }
        Ok(staged)
    }

    /// Parse one metadata document. Malformed records inside it are logged
    /// and skipped; only structural damage to the document itself is an
    /// error.
    pub fn parse_ron(input: &str) -> Result<Vec<ModelMeta>, StoreError> {
        // The on-disk format writes variant conditions as bare optionals
        // (`component: 4` rather than `Some(4)`), so the RON `implicit_some`
        // extension must be enabled for records to deserialize. Routing
        // through `ron::Value` is incompatible with that extension, so parse
        // the document straight into the intermediate records.
        let options = ron::Options::default()
            .with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME);
        let raw: Vec<RonModel> = options.from_str(input)?;
        let mut models = Vec::new();
        for record in raw {
            match ModelMeta::try_from(record) {
                Ok(meta) => models.push(meta),
                Err(e) => {
                    log::warn!("skipping model record: {}", e);
                }
            }
        }
        Ok(models)
    }
}

/// Load a metadata pack from a RON file.
pub fn load_meta_file(path: &Path) -> Result<Vec<ModelMeta>, StoreError> {
    let contents = std::fs::read_to_string(path)?;
    MetaStore::parse_ron(&contents)
}

// RON deserialization helpers — the on-disk format carries the category as a
// string and the condition as a flat optional trio, so we go through
// intermediate structs.

#[derive(Debug, Deserialize)]
struct RonProperty {
    category: String,
    #[serde(default)]
    component: Option<usize>,
    #[serde(default)]
    drawable: Option<u32>,
    #[serde(default)]
    texture: Option<u32>,
    audio: String,
    text: String,
}

#[derive(Debug, Deserialize)]
struct RonModel {
    name: String,
    properties: Vec<RonProperty>,
}

impl TryFrom<RonModel> for ModelMeta {
    type Error = RecordError;

    fn try_from(record: RonModel) -> Result<Self, Self::Error> {
        if record.name.trim().is_empty() {
            return Err(RecordError::EmptyName);
        }
        let mut properties = Vec::with_capacity(record.properties.len());
        for raw in record.properties {
            let category = Category::parse(&raw.category)
                .ok_or_else(|| RecordError::UnknownCategory(raw.category.clone()))?;
            let condition = match (raw.component, raw.drawable, raw.texture) {
                (Some(component), Some(drawable), Some(texture)) => Some(VariantCondition {
                    component,
                    drawable,
                    texture,
                }),
                (Some(component), _, _) => {
                    return Err(RecordError::PartialCondition { component });
                }
                (None, None, None) => None,
                (None, _, _) => return Err(RecordError::DanglingVariant),
            };
            properties.push(DescriptionProperty {
                category,
                condition,
                audio: raw.audio,
                text: raw.text,
            });
        }
        Ok(ModelMeta {
            name: record.name.to_uppercase(),
            properties,
        })
    }
}
