/// Meta Linter — validates appearance metadata pack quality.
///
/// Usage: meta_linter <meta_dir> [<meta_dir> ...]
///
/// Loads every .ron pack in the given directories the way the store would,
/// then reports authoring problems the loader itself tolerates: duplicate
/// model identifiers, models with no properties, more than one unconditional
/// rule per category, and conditions on component slots the matcher never
/// scans.

use appearance_engine::core::matcher::COMPONENT_SLOTS;
use appearance_engine::core::store::load_meta_file;
use appearance_engine::schema::category::Category;
use appearance_engine::schema::model::ModelMeta;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: meta_linter <meta_dir> [<meta_dir> ...]");
        process::exit(0);
    }

    let mut models: Vec<(PathBuf, ModelMeta)> = Vec::new();
    let mut files = 0usize;

    for dir in &args[1..] {
        let dir = Path::new(dir);
        if !dir.is_dir() {
            eprintln!("ERROR: '{}' is not a directory", dir.display());
            process::exit(1);
        }
        let mut paths: Vec<PathBuf> = match std::fs::read_dir(dir) {
            Ok(entries) => entries
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("ron"))
                .collect(),
            Err(e) => {
                eprintln!("ERROR: cannot read '{}': {}", dir.display(), e);
                process::exit(1);
            }
        };
        paths.sort();
        for path in paths {
            match load_meta_file(&path) {
                Ok(loaded) => {
                    files += 1;
                    models.extend(loaded.into_iter().map(|m| (path.clone(), m)));
                }
                Err(e) => {
                    eprintln!("ERROR loading {}: {}", path.display(), e);
                    process::exit(1);
                }
            }
        }
    }

    println!("Loaded {} model records from {} files", models.len(), files);

    let (errors, warnings) = lint_models(&models);

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }
    for error in &errors {
        println!("ERROR: {}", error);
    }
    println!(
        "\n{} error(s), {} warning(s)",
        errors.len(),
        warnings.len()
    );

    if !errors.is_empty() {
        process::exit(1);
    }
}

fn lint_models(models: &[(PathBuf, ModelMeta)]) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Duplicate identifiers: the store silently keeps the first, so authors
    // should know when a later pack is being ignored.
    let mut seen: HashMap<&str, &Path> = HashMap::new();
    for (path, meta) in models {
        if let Some(first) = seen.get(meta.name.as_str()) {
            warnings.push(format!(
                "{}: duplicate model '{}' (first defined in {}; this one is ignored)",
                path.display(),
                meta.name,
                first.display()
            ));
        } else {
            seen.insert(&meta.name, path.as_path());
        }
    }

    for (path, meta) in models {
        if meta.properties.is_empty() {
            warnings.push(format!(
                "{}: model '{}' has no properties",
                path.display(),
                meta.name
            ));
        }

        // Composition renders a single primary unconditional fact per
        // category; extra ones are dead metadata.
        for category in Category::ALL {
            let unconditional = meta
                .properties
                .iter()
                .filter(|p| p.category == category && p.condition.is_none())
                .count();
            if unconditional > 1 {
                errors.push(format!(
                    "{}: model '{}' has {} unconditional {} rules; only the first is rendered",
                    path.display(),
                    meta.name,
                    unconditional,
                    category.name()
                ));
            }
        }

        for property in &meta.properties {
            if let Some(condition) = property.condition {
                if condition.component >= COMPONENT_SLOTS {
                    warnings.push(format!(
                        "{}: model '{}' gates '{}' on component {} which the matcher never scans",
                        path.display(),
                        meta.name,
                        property.text,
                        condition.component
                    ));
                }
            }
            if property.audio.trim().is_empty() {
                warnings.push(format!(
                    "{}: model '{}' property '{}' has an empty audio token",
                    path.display(),
                    meta.name,
                    property.text
                ));
            }
            if property.text.trim().is_empty() {
                warnings.push(format!(
                    "{}: model '{}' has a property with an empty text phrase",
                    path.display(),
                    meta.name
                ));
            }
        }
    }

    (errors, warnings)
}
