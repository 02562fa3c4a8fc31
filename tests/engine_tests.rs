/// Engine integration tests — end-to-end subject-to-description flow over
/// metadata loaded from fixture packs.

use appearance_engine::core::engine::DescriptionEngine;
use appearance_engine::core::matcher::{MatchError, VariantMatcher};
use appearance_engine::core::store::MetaStore;
use appearance_engine::schema::category::{Category, CategorySet};
use appearance_engine::schema::subject::FixedSubject;
use std::path::PathBuf;

fn fixture(dir: &str) -> PathBuf {
    PathBuf::from("tests/fixtures").join(dir)
}

fn build_engine() -> DescriptionEngine {
    DescriptionEngine::builder()
        .source(fixture("model_meta"))
        .build()
        .unwrap()
}

#[test]
fn scanner_audio_for_a_dressed_subject() {
    let engine = build_engine();
    let subject = FixedSubject::new("A_M_Y_STLAT_02").with_variant(4, 12, 0);
    let desired = CategorySet::of(&[Category::RaceSex, Category::Clothing]);
    assert_eq!(
        engine.describe_audio(&subject, &desired).unwrap(),
        "A_WITHOUT_HESITATION A_WITHOUT_HESITATION 200MS_SILENCE WEARING  CLOTHING_DARK_JEANS 200MS_SILENCE"
    );
}

#[test]
fn text_description_for_a_dressed_subject() {
    let engine = build_engine();
    let subject = FixedSubject::new("A_M_Y_STLAT_02").with_variant(4, 12, 0);
    let desired = CategorySet::of(&[Category::RaceSex, Category::Clothing]);
    assert_eq!(
        engine.describe_text(&subject, &desired).unwrap(),
        "Hispanic male wearing dark jeans"
    );
}

#[test]
fn full_mask_reads_every_matched_category() {
    let engine = build_engine();
    let subject = FixedSubject::new("A_F_Y_TOURIST_01")
        .with_variant(2, 1, 0)
        .with_variant(4, 1, 0);
    let text = engine.describe_text(&subject, &CategorySet::all()).unwrap();
    assert_eq!(
        text,
        "white female, slim, with long black hair wearing shorts"
    );
}

#[test]
fn empty_mask_renders_empty_strings() {
    let engine = build_engine();
    let subject = FixedSubject::new("A_M_Y_STLAT_02").with_variant(4, 12, 0);
    assert_eq!(
        engine.describe_text(&subject, &CategorySet::empty()).unwrap(),
        ""
    );
    assert_eq!(
        engine.describe_audio(&subject, &CategorySet::empty()).unwrap(),
        ""
    );
}

#[test]
fn undressed_subject_keeps_only_unconditional_properties() {
    let engine = build_engine();
    // Default variants everywhere: the clothing conditions do not match
    let subject = FixedSubject::new("A_M_Y_STLAT_02");
    assert_eq!(
        engine.describe_text(&subject, &CategorySet::all()).unwrap(),
        "Hispanic male"
    );
}

#[test]
fn invalid_subject_is_distinguishable_from_nothing_to_say() {
    let engine = build_engine();
    let mut subject = FixedSubject::new("A_M_Y_STLAT_02");
    subject.invalidate();
    assert!(matches!(
        engine.describe_text(&subject, &CategorySet::all()),
        Err(MatchError::InvalidSubject)
    ));
}

#[test]
fn unknown_model_is_distinguishable_from_zero_matches() {
    let engine = build_engine();

    let unknown = FixedSubject::new("A_M_Y_NOBODY_99");
    assert!(matches!(
        engine.matched_properties(&unknown),
        Err(MatchError::UnknownModel(name)) if name == "A_M_Y_NOBODY_99"
    ));

    // A known model with no rules is a success with nothing to say
    let blank = FixedSubject::new("A_M_Y_BLANK_01");
    let matched = engine.matched_properties(&blank).unwrap();
    assert!(matched.is_empty());
    assert_eq!(engine.describe_text(&blank, &CategorySet::all()).unwrap(), "");
}

#[test]
fn matching_is_idempotent_for_an_unchanged_subject() {
    let engine = build_engine();
    let subject = FixedSubject::new("A_M_Y_STLAT_02").with_variant(4, 12, 0);
    let first = engine.matched_properties(&subject).unwrap();
    let second = engine.matched_properties(&subject).unwrap();
    assert_eq!(first, second);
}

#[test]
fn matcher_lazily_builds_an_unbuilt_store() {
    let store = MetaStore::new([fixture("model_meta")]);
    assert!(store.is_empty());
    let matcher = VariantMatcher::new(&store);
    let subject = FixedSubject::new("A_M_Y_STLAT_02").with_variant(4, 12, 0);
    let matched = matcher.match_properties(&subject).unwrap();
    assert_eq!(matched.len(), 2);
    assert!(!store.is_empty());
}

#[test]
fn matcher_surfaces_store_failures_during_lazy_build() {
    let store = MetaStore::new([fixture("does_not_exist")]);
    let matcher = VariantMatcher::new(&store);
    let subject = FixedSubject::new("A_M_Y_STLAT_02");
    assert!(matches!(
        matcher.match_properties(&subject),
        Err(MatchError::Store(_))
    ));
}
