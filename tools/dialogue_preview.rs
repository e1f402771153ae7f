//! Dialogue preview: interactive shell for stepping through a dialogue.
//!
//! Usage: dialogue_preview <resources_root> <file_name> [--lang <en|ru>] [--actors <path>]
//!
//! Commands:
//!   next (or empty line)  show the next line
//!   current               show the line at the cursor
//!   skip                  jump to the end
//!   reset                 return to the first line
//!   lang <code>           switch language
//!   help                  list commands
//!   quit                  exit

use marshtown::core::dialogue::{Dialogue, DialogueObserver};
use marshtown::core::line::DialogueLine;
use marshtown::core::resources::FsResources;
use marshtown::schema::dialogue::{DialogueLanguage, DialogueLineType};
use marshtown::schema::tag::StringTag;
use std::io::{self, BufRead, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

struct Announcer;

impl DialogueObserver for Announcer {
    fn on_start(&mut self) {
        println!("--- dialogue started ---");
    }

    fn on_end(&mut self) {
        println!("--- dialogue ended ---");
    }
}

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
        print_usage();
        return;
    }

    let root = args[1].clone();
    let file_name = args[2].clone();
    let mut language = DialogueLanguage::default();
    let mut actors_path = None;

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--lang" if i + 1 < args.len() => {
                i += 1;
                language = DialogueLanguage::from_tag(&args[i]).unwrap_or_else(|| {
                    eprintln!("Unknown language: {}", args[i]);
                    std::process::exit(1);
                });
            }
            "--actors" if i + 1 < args.len() => {
                i += 1;
                actors_path = Some(args[i].clone());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut builder = Dialogue::builder()
        .file_name(&file_name)
        .language(language)
        .resources(FsResources::new(root));
    if let Some(ref path) = actors_path {
        builder = builder.actors_file(path);
    }

    let mut dialogue = match builder.build() {
        Ok(dialogue) => dialogue,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            std::process::exit(1);
        }
    };
    dialogue.add_observer(Box::new(Announcer));

    let languages: Vec<&str> = dialogue.languages().iter().map(|l| l.code()).collect();
    println!(
        "Loaded '{}': {} lines, languages [{}]",
        file_name,
        dialogue.line_count(),
        languages.join(", ")
    );
    println!("Type 'help' for commands.\n");

    dialogue.start();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("[{}/{}]> ", dialogue.current_line_index(), dialogue.line_count());
        stdout.flush().ok();

        let mut input = String::new();
        if stdin.lock().read_line(&mut input).is_err() || input.is_empty() {
            break;
        }
        let parts: Vec<&str> = input.split_whitespace().collect();
        let cmd = parts.first().map(|c| c.to_lowercase()).unwrap_or_default();

        match cmd.as_str() {
            "" | "next" | "n" => match dialogue.next_line() {
                Some(line) => {
                    let line = line.clone();
                    print_line(&dialogue, &line);
                }
                None => println!("(no more lines)"),
            },
            "current" | "c" => match dialogue.current_line() {
                Some(line) => print_line(&dialogue, line),
                None => println!("(no line at cursor)"),
            },
            "skip" => {
                if !dialogue.skip() {
                    println!("This dialogue cannot be skipped.");
                }
            }
            "reset" => dialogue.reset(),
            "lang" => match parts.get(1).and_then(|code| DialogueLanguage::from_tag(code)) {
                Some(lang) => {
                    dialogue.set_language(lang);
                    println!("Language: {}", lang.code());
                }
                None => println!("Usage: lang <en|ru>"),
            },
            "help" => print_commands(),
            "quit" | "exit" | "q" => break,
            other => println!("Unknown command: {}", other),
        }
    }

    dialogue.end();
}

fn print_line(dialogue: &Dialogue, line: &DialogueLine) {
    let speaker = match dialogue.actor_for(line) {
        Some(actor) => actor.display_name.clone(),
        None if line.speaker().is_empty() => String::new(),
        None => line.speaker().to_string(),
    };

    let kind = match line.line_type() {
        DialogueLineType::None => String::new(),
        other => format!("<{}> ", other.as_tag()),
    };

    if speaker.is_empty() {
        println!("{}{}", kind, line.text());
    } else {
        println!("{}{}: {}", kind, speaker, line.text());
    }

    let mut details = Vec::new();
    if line.emotion() != Default::default() {
        details.push(format!("emotion={}", line.emotion().as_tag()));
    }
    if line.position() != Default::default() {
        details.push(format!("position={}", line.position().as_tag()));
    }
    if !line.feels_like().is_empty() {
        details.push(format!("feels like: {}", line.feels_like()));
    }
    if let Some(portrait) = dialogue
        .actor_for(line)
        .and_then(|actor| actor.portrait_for(line.emotion()))
    {
        details.push(format!("portrait={}", portrait));
    }
    if !details.is_empty() {
        println!("    ({})", details.join(", "));
    }
}

fn print_usage() {
    println!("Usage: dialogue_preview <resources_root> <file_name> [--lang <en|ru>] [--actors <path>]");
}

fn print_commands() {
    println!("Commands:");
    println!("  next (or empty line)  show the next line");
    println!("  current               show the line at the cursor");
    println!("  skip                  jump to the end");
    println!("  reset                 return to the first line");
    println!("  lang <code>           switch language");
    println!("  quit                  exit");
}
