/// Scanner Callout demo — cycles every model in the shipped metadata pack,
/// dresses a synthetic subject in authored variants, and prints the text and
/// audio descriptions a host would hand to its notification and scanner
/// systems.
///
/// Run with: cargo run --example scanner_callout

use appearance_engine::core::engine::DescriptionEngine;
use appearance_engine::core::matcher::COMPONENT_SLOTS;
use appearance_engine::schema::category::CategorySet;
use appearance_engine::schema::subject::FixedSubject;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn main() {
    env_logger::init();

    let engine = DescriptionEngine::builder()
        .source("model_meta")
        .build()
        .expect("Failed to load the metadata pack");

    let mut rng = StdRng::seed_from_u64(2026);
    let desired = CategorySet::all();

    for name in engine.store().model_names() {
        let subject = dressed_subject(&engine, &name, &mut rng);

        println!("{}", name);
        match engine.describe_text(&subject, &desired) {
            Ok(text) => println!("  text:  {}", text),
            Err(e) => println!("  ERROR: {}", e),
        }
        match engine.describe_audio(&subject, &desired) {
            Ok(audio) => println!("  audio: {}", audio),
            Err(e) => println!("  ERROR: {}", e),
        }
        println!();
    }
}

/// Dress a subject in one authored variant per gated component slot, so the
/// description exercises the model's conditional rules.
fn dressed_subject(engine: &DescriptionEngine, model: &str, rng: &mut StdRng) -> FixedSubject {
    let mut subject = FixedSubject::new(model);
    let Some(meta) = engine.store().lookup(model) else {
        return subject;
    };
    for component in 0..COMPONENT_SLOTS {
        let authored: Vec<_> = meta
            .properties
            .iter()
            .filter_map(|p| p.condition)
            .filter(|c| c.component == component)
            .collect();
        if let Some(condition) = authored.choose(rng) {
            subject = subject.with_variant(component, condition.drawable, condition.texture);
        }
    }
    subject
}
