//! Appearance Engine — metadata-driven character appearance description for games.
//!
//! Maps a character's live component variant state (which drawable mesh and
//! which texture skin each body-part slot currently wears) to a human-readable
//! or audio-cue description, driven entirely by external RON metadata packs
//! that tie component/drawable/texture combinations to descriptive properties.

pub mod core;
pub mod schema;
