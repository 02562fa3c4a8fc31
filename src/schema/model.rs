use serde::{Deserialize, Serialize};

use super::category::Category;
use super::subject::ComponentVariant;

/// The variant state a conditional property is gated on: the property applies
/// only while the subject's `component` slot currently wears exactly this
/// drawable/texture pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantCondition {
    pub component: usize,
    pub drawable: u32,
    pub texture: u32,
}

/// One authored fact about a model's appearance: a category, an optional
/// variant condition, an audio token and a text phrase.
///
/// `condition: None` marks an unconditional property that applies regardless
/// of component state, such as a race/sex description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionProperty {
    pub category: Category,
    pub condition: Option<VariantCondition>,
    pub audio: String,
    pub text: String,
}

/// A named model's full rule set. Property order is authoring order from the
/// source metadata and is preserved through matching into display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelMeta {
    pub name: String,
    pub properties: Vec<DescriptionProperty>,
}

impl ModelMeta {
    /// Properties that apply regardless of component state, in authoring order.
    pub fn unconditional(&self) -> impl Iterator<Item = &DescriptionProperty> {
        self.properties.iter().filter(|p| p.condition.is_none())
    }

    /// Properties gated on `component` currently wearing `variant`, in
    /// authoring order.
    pub fn matching(
        &self,
        component: usize,
        variant: ComponentVariant,
    ) -> impl Iterator<Item = &DescriptionProperty> + '_ {
        self.properties.iter().filter(move |p| {
            p.condition
                == Some(VariantCondition {
                    component,
                    drawable: variant.drawable,
                    texture: variant.texture,
                })
        })
    }
}
