use rustc_hash::FxHashMap;

/// The drawable mesh and texture skin indices currently active on one
/// component slot of a live subject.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComponentVariant {
    pub drawable: u32,
    pub texture: u32,
}

/// Accessor capability for the live entity being described.
///
/// The subject is owned by the host and may be destroyed by it between any
/// two calls, so the matcher re-checks `is_valid` before every read and the
/// read methods return `None` when the handle has died underneath it.
pub trait Subject {
    /// Whether the handle still refers to a live entity.
    fn is_valid(&self) -> bool;

    /// The subject's model identifier. Read once and cached before variant
    /// iteration; `None` when the handle can no longer answer.
    fn model_name(&self) -> Option<String>;

    /// The variant currently worn on `component`, or `None` when the handle
    /// can no longer answer.
    fn variation(&self, component: usize) -> Option<ComponentVariant>;
}

/// A simple owned `Subject` for demos, tools and tests. Slots that were never
/// set report the default variant 0/0, like a live entity with default
/// variations.
#[derive(Debug, Clone, Default)]
pub struct FixedSubject {
    model: String,
    variants: FxHashMap<usize, ComponentVariant>,
    valid: bool,
}

impl FixedSubject {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            variants: FxHashMap::default(),
            valid: true,
        }
    }

    /// Set the variant worn on a component slot.
    pub fn with_variant(mut self, component: usize, drawable: u32, texture: u32) -> Self {
        self.variants
            .insert(component, ComponentVariant { drawable, texture });
        self
    }

    /// Mark the subject as destroyed. Subsequent reads fail like a handle the
    /// host has deleted.
    pub fn invalidate(&mut self) {
        self.valid = false;
    }
}

impl Subject for FixedSubject {
    fn is_valid(&self) -> bool {
        self.valid
    }

    fn model_name(&self) -> Option<String> {
        self.valid.then(|| self.model.clone())
    }

    fn variation(&self, component: usize) -> Option<ComponentVariant> {
        self.valid
            .then(|| self.variants.get(&component).copied().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_subject_reports_set_variants() {
        let subject = FixedSubject::new("A_M_Y_STLAT_02").with_variant(4, 12, 0);
        assert!(subject.is_valid());
        assert_eq!(subject.model_name().as_deref(), Some("A_M_Y_STLAT_02"));
        assert_eq!(
            subject.variation(4),
            Some(ComponentVariant { drawable: 12, texture: 0 })
        );
    }

    #[test]
    fn unset_slots_report_default_variant() {
        let subject = FixedSubject::new("A_M_Y_STLAT_02");
        assert_eq!(subject.variation(7), Some(ComponentVariant::default()));
    }

    #[test]
    fn invalidated_subject_refuses_reads() {
        let mut subject = FixedSubject::new("A_M_Y_STLAT_02").with_variant(4, 12, 0);
        subject.invalidate();
        assert!(!subject.is_valid());
        assert_eq!(subject.model_name(), None);
        assert_eq!(subject.variation(4), None);
    }
}
