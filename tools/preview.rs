/// Preview — interactive description shell for testing metadata packs.
///
/// Usage: preview --meta <dir> [--meta <dir> ...] [--seed <n>]
///
/// Commands:
///   list                          — list loaded models
///   describe <model> [c:d:t ...]  — describe a model wearing the given variants
///   random <model>                — dress a model in random authored variants
///   mask <cat1,cat2,...>          — set the desired categories (or 'all')
///   seed <n>                      — set RNG seed for 'random'
///   help                          — list commands
///   quit                          — exit

use appearance_engine::core::engine::DescriptionEngine;
use appearance_engine::core::matcher::COMPONENT_SLOTS;
use appearance_engine::schema::category::{Category, CategorySet};
use appearance_engine::schema::subject::FixedSubject;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let mut sources: Vec<PathBuf> = Vec::new();
    let mut seed: u64 = 42;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--meta" if i + 1 < args.len() => {
                i += 1;
                sources.push(PathBuf::from(&args[i]));
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = args[i].parse().unwrap_or(42);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if sources.is_empty() {
        eprintln!("No metadata sources given.");
        print_usage();
        std::process::exit(1);
    }

    let engine = match DescriptionEngine::builder().sources(sources).build() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("ERROR: failed to build the engine: {}", e);
            std::process::exit(1);
        }
    };

    println!("Loaded {} models", engine.store().len());
    println!("Seed: {}", seed);
    println!("Type 'help' for commands.\n");

    let mut rng = StdRng::seed_from_u64(seed);
    let mut desired = CategorySet::all();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("preview> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => {
                print_help();
            }
            "list" => {
                for name in engine.store().model_names() {
                    println!("  {}", name);
                }
            }
            "describe" => {
                if parts.len() < 2 {
                    println!("Usage: describe <model> [component:drawable:texture ...]");
                    continue;
                }
                let mut subject = FixedSubject::new(parts[1]);
                let mut bad = false;
                for spec in &parts[2..] {
                    match parse_variant_spec(spec) {
                        Some((component, drawable, texture)) => {
                            subject = subject.with_variant(component, drawable, texture);
                        }
                        None => {
                            println!("Invalid variant spec '{}': expected c:d:t", spec);
                            bad = true;
                            break;
                        }
                    }
                }
                if !bad {
                    print_descriptions(&engine, &subject, &desired);
                }
            }
            "random" => {
                if parts.len() < 2 {
                    println!("Usage: random <model>");
                    continue;
                }
                match random_subject(&engine, parts[1], &mut rng) {
                    Some(subject) => print_descriptions(&engine, &subject, &desired),
                    None => println!("Model '{}' is not loaded.", parts[1]),
                }
            }
            "mask" => {
                if parts.len() < 2 {
                    println!("Usage: mask <cat1,cat2,...> (or 'all')");
                    println!("  Categories: RaceSex, Build, Hair, Clothing, Extras");
                    continue;
                }
                if parts[1] == "all" {
                    desired = CategorySet::all();
                    println!("Mask set to all categories.");
                    continue;
                }
                let mut parsed = CategorySet::empty();
                let mut bad = false;
                for name in parts[1].split(',').filter(|s| !s.is_empty()) {
                    match Category::parse(name) {
                        Some(category) => parsed.insert(category),
                        None => {
                            println!("Unknown category: {}", name);
                            bad = true;
                            break;
                        }
                    }
                }
                if !bad {
                    desired = parsed;
                    println!("Mask updated.");
                }
            }
            "seed" => {
                if parts.len() < 2 {
                    println!("Usage: seed <n>");
                    continue;
                }
                match parts[1].parse::<u64>() {
                    Ok(s) => {
                        rng = StdRng::seed_from_u64(s);
                        println!("Seed set to {}", s);
                    }
                    Err(_) => println!("Invalid seed: {}", parts[1]),
                }
            }
            _ => {
                println!("Unknown command: '{}'. Type 'help' for available commands.", cmd);
            }
        }
    }
}

fn print_usage() {
    println!("Preview — interactive description shell for testing metadata packs.");
    println!();
    println!("Usage: preview --meta <dir> [--meta <dir> ...] [--seed <n>]");
    println!();
    println!("  --meta <dir>  Metadata source directory (repeatable)");
    println!("  --seed <n>    Initial RNG seed for 'random' (default: 42)");
}

fn print_help() {
    println!("Commands:");
    println!("  list                          List loaded models");
    println!("  describe <model> [c:d:t ...]  Describe a model wearing the given variants");
    println!("  random <model>                Dress a model in random authored variants");
    println!("  mask <cat1,cat2,...>          Set desired categories (or 'all')");
    println!("  seed <n>                      Set RNG seed");
    println!("  help                          Show this help");
    println!("  quit                          Exit");
}

fn parse_variant_spec(spec: &str) -> Option<(usize, u32, u32)> {
    let mut parts = spec.split(':');
    let component = parts.next()?.parse().ok()?;
    let drawable = parts.next()?.parse().ok()?;
    let texture = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some((component, drawable, texture))
}

/// Dress a subject by picking, for each component slot the model gates rules
/// on, one of the authored variants at random (or leaving the slot default).
fn random_subject(engine: &DescriptionEngine, model: &str, rng: &mut StdRng) -> Option<FixedSubject> {
    let meta = engine.store().lookup(model)?;
    let mut subject = FixedSubject::new(model);
    for component in 0..COMPONENT_SLOTS {
        let authored: Vec<_> = meta
            .properties
            .iter()
            .filter_map(|p| p.condition)
            .filter(|c| c.component == component)
            .collect();
        if authored.is_empty() || rng.gen_bool(0.25) {
            continue;
        }
        if let Some(condition) = authored.choose(rng) {
            subject = subject.with_variant(component, condition.drawable, condition.texture);
        }
    }
    Some(subject)
}

fn print_descriptions(engine: &DescriptionEngine, subject: &FixedSubject, desired: &CategorySet) {
    match engine.describe_text(subject, desired) {
        Ok(text) => println!("  text:  {}", text),
        Err(e) => println!("  ERROR: {}", e),
    }
    match engine.describe_audio(subject, desired) {
        Ok(audio) => println!("  audio: {}", audio),
        Err(e) => println!("  ERROR: {}", e),
    }
}
