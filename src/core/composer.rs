/// Description composer — audio-token and natural-language rendering.
///
/// Both renderers consume a matched property slice and emit category blocks
/// in a fixed order: RaceSex, Build, Hair, Clothing. Categories missing from
/// the desired set are skipped entirely, and an empty match set for a
/// category emits nothing. `Extras` properties are carried through matching
/// but neither renderer speaks them.

use crate::schema::category::{Category, CategorySet};
use crate::schema::model::DescriptionProperty;

/// Scanner lead-in token opening a race/sex readout.
const LEAD_IN: &str = "A_WITHOUT_HESITATION";
/// Short pause between audio cues.
const PAUSE: &str = "200MS_SILENCE";
const WITH: &str = "WITH";
const WEARING: &str = "WEARING";

/// Phrases containing any of these never take the "a " article.
const NO_ARTICLE_WORDS: &[&str] = &[
    "pants", "shorts", "jeans", "sneakers", "shoes", "boots", "tracksuit",
];

/// Phrases containing one of these are title-cased when they open a text
/// description. Matched case-sensitively against the authored phrase.
const TITLE_CASE_MARKERS: &[&str] = &["hispanic", "asian"];

pub struct DescriptionComposer;

impl DescriptionComposer {
    /// Render a space-joined audio cue token string, in police scanner audio
    /// file basename format (e.g. "CLOTHING_LIGHT_SNEAKERS").
    pub fn render_audio(properties: &[DescriptionProperty], desired: &CategorySet) -> String {
        let mut output = String::new();

        if desired.contains(Category::RaceSex) {
            // Only a single RaceSex property is expected, so no loop
            if let Some(property) = first_of(properties, Category::RaceSex) {
                output.push_str(&format!("{} {} ", LEAD_IN, property.audio));
            }
        }

        if desired.contains(Category::Build) {
            for property in of_category(properties, Category::Build) {
                output.push_str(&format!("{} {} ", PAUSE, property.audio));
            }
        }

        if desired.contains(Category::Hair) {
            for property in of_category(properties, Category::Hair) {
                output.push_str(&format!("{} {} {} ", PAUSE, WITH, property.audio));
            }
        }

        if desired.contains(Category::Clothing) {
            let mut clothing = of_category(properties, Category::Clothing).peekable();
            if clothing.peek().is_some() {
                output.push_str(&format!("{} {} ", PAUSE, WEARING));
                for property in clothing {
                    output.push_str(&format!(" {} {} ", property.audio, PAUSE));
                }
            }
        }

        output.trim_end().to_string()
    }

    /// Render a human-readable description, e.g.
    /// "Hispanic male wearing dark jeans".
    pub fn render_text(properties: &[DescriptionProperty], desired: &CategorySet) -> String {
        let mut output = String::new();

        if desired.contains(Category::RaceSex) {
            if let Some(property) = first_of(properties, Category::RaceSex) {
                let marked = TITLE_CASE_MARKERS.iter().any(|m| property.text.contains(m));
                if marked {
                    output.push_str(&title_case(&property.text));
                } else {
                    output.push_str(&property.text);
                }
                output.push(' ');
            }
        }

        if desired.contains(Category::Build) {
            for property in of_category(properties, Category::Build) {
                // Splice onto the preceding phrase: "white male" + ", stocky, "
                if output.ends_with(' ') {
                    output.pop();
                }
                output.push_str(&format!(", {}, ", property.text));
            }
        }

        if desired.contains(Category::Hair) {
            for property in of_category(properties, Category::Hair) {
                output.push_str(&format!("with {} ", property.text));
            }
        }

        if desired.contains(Category::Clothing) {
            let mut clothing = of_category(properties, Category::Clothing).peekable();
            if clothing.peek().is_some() {
                output.push_str("wearing ");
                for property in clothing {
                    if takes_article(&property.text) {
                        output.push_str("a ");
                    }
                    output.push_str(&format!("{}, ", property.text));
                }
            }
        }

        output.trim_end_matches([',', ' ']).to_string()
    }
}

fn of_category<'a>(
    properties: &'a [DescriptionProperty],
    category: Category,
) -> impl Iterator<Item = &'a DescriptionProperty> {
    properties.iter().filter(move |p| p.category == category)
}

fn first_of(properties: &[DescriptionProperty], category: Category) -> Option<&DescriptionProperty> {
    of_category(properties, category).next()
}

/// Whether a clothing phrase takes the indefinite article. Plural and
/// mass-noun garments and phrases already negated ("no shirt") do not.
fn takes_article(phrase: &str) -> bool {
    let lowered = phrase.to_lowercase();
    !NO_ARTICLE_WORDS.iter().any(|w| lowered.contains(w)) && !lowered.starts_with("no")
}

fn title_case(phrase: &str) -> String {
    let mut chars = phrase.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
