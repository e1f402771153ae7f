//! Dialogue linter: checks every language variant of a dialogue file.
//!
//! Usage: dialogue_linter <resources_root> <file_name> [--dir <name>]

use marshtown::core::dialogue::DEFAULT_DIRECTORY;
use marshtown::core::line::inspect_tags;
use marshtown::core::resources::{FsResources, ResourceLoader};
use marshtown::core::script::Script;
use marshtown::schema::dialogue::DialogueLanguage;
use std::process;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("marshtown=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: dialogue_linter <resources_root> <file_name> [--dir <name>]");
        process::exit(0);
    }

    let root = &args[1];
    let file_name = &args[2];
    let mut directory = DEFAULT_DIRECTORY.to_string();

    let mut i = 3;
    while i < args.len() {
        if args[i] == "--dir" && i + 1 < args.len() {
            i += 1;
            directory = args[i].clone();
        } else {
            eprintln!("Unknown argument: {}", args[i]);
            process::exit(1);
        }
        i += 1;
    }

    let resources = FsResources::new(root);
    let (errors, warnings) = lint_dialogue(&resources, &directory, file_name);

    println!("\n=== Dialogue Lint Report: {} ===\n", file_name);

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn lint_dialogue(
    resources: &dyn ResourceLoader,
    directory: &str,
    file_name: &str,
) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut counts: Vec<(DialogueLanguage, usize)> = Vec::new();

    for language in DialogueLanguage::ALL {
        let Some(text) = resources.load(directory, language.code(), file_name) else {
            warnings.push(format!(
                "No '{}' variant of '{}'",
                language.code(),
                file_name
            ));
            continue;
        };

        let script = Script::parse(&text);
        println!("  Loaded: {} ({} lines)", language.code(), script.len());

        for (index, line) in script.lines().iter().enumerate() {
            for issue in inspect_tags(&line.tags) {
                warnings.push(format!(
                    "[{}] line {}: {}",
                    language.code(),
                    index,
                    issue
                ));
            }
        }
        counts.push((language, script.len()));
    }

    if counts.is_empty() {
        errors.push(format!("'{}' has no variant in any language", file_name));
        return (errors, warnings);
    }

    // The first language found fixes the expected count.
    let expected = counts[0].1;
    if counts.iter().any(|(_, count)| *count != expected) {
        errors.push(format!(
            "'{}' has different number of lines across languages",
            file_name
        ));
        for (language, count) in &counts {
            errors.push(format!("--> {}: {}", language.code(), count));
        }
    }

    (errors, warnings)
}
