//! UniType Terminal Quiz
//!
//! Runs the quiz in a terminal against the file-backed session store:
//! - Resumes an interrupted session from disk
//! - Pages through the shuffled items
//! - Prints the type code, axis breakdown and share path

use anyhow::Result;
use std::io::{self, BufRead, Write};
use tracing::info;

use unitype_core::catalog::TypeCatalog;
use unitype_core::share::share_path;
use unitype_core::utils::logging::{init_logging, DEFAULT_FILTER};
use unitype_core::{Assessment, KeyValueStorage, Quiz, QuizConfig};

const BAR_WIDTH: usize = 20;

// ──────────────────────────────────────────────────────────────────────────────
// INPUT
// ──────────────────────────────────────────────────────────────────────────────

enum Command {
    Answer(i32),
    Keep,
    Back,
    Reset,
    Quit,
}

fn parse_command(line: &str) -> Option<Command> {
    match line.trim() {
        "" => Some(Command::Keep),
        "b" => Some(Command::Back),
        "r" => Some(Command::Reset),
        "q" => Some(Command::Quit),
        other => match other.parse::<i32>() {
            // The scale shown to users is 1-7
            Ok(n) if (1..=7).contains(&n) => Some(Command::Answer(n - 1)),
            _ => None,
        },
    }
}

/// Read one line; `None` on end of input.
fn prompt(label: &str) -> Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

// ──────────────────────────────────────────────────────────────────────────────
// OUTPUT
// ──────────────────────────────────────────────────────────────────────────────

fn print_result(assessment: &Assessment, catalog: Option<&TypeCatalog>) {
    println!("\n{}", "═".repeat(60));
    let descriptor = catalog.and_then(|c| c.get(&assessment.type_code));
    match descriptor {
        Some(d) => println!("🎓 Your type: {} ({})", d.name, assessment.type_code),
        None => println!("🎓 Your type: {}", assessment.type_code),
    }
    if let Some(d) = descriptor.filter(|d| !d.stereotype.is_empty()) {
        println!("   {}", d.stereotype);
    }
    println!("{}", "═".repeat(60));

    for axis in &assessment.axes {
        let (left, right) = axis.axis.pole_labels();
        let marker = usize::from(axis.right_percent) * BAR_WIDTH / 100;
        let bar: String = (0..=BAR_WIDTH)
            .map(|i| if i == marker { '●' } else { '─' })
            .collect();
        println!(
            "{:>14} {} {:<14} {:>3}% {}",
            left, bar, right, axis.dominant_percent, axis.pole_label
        );
    }

    println!("\n🔗 Share: {}", share_path(&assessment.type_code));
}

// ──────────────────────────────────────────────────────────────────────────────
// MAIN ENTRY POINT
// ──────────────────────────────────────────────────────────────────────────────

fn run<S: KeyValueStorage>(
    quiz: &mut Quiz<S, rand::rngs::ThreadRng>,
    catalog: Option<&TypeCatalog>,
) -> Result<()> {
    if quiz.state().is_complete {
        print_result(&quiz.result()?, catalog);
        match prompt("\nPress r to retake, anything else to exit: ")? {
            Some(line) if line.trim() == "r" => quiz.reset(),
            _ => return Ok(()),
        }
    }

    quiz.start();
    println!("Answer 1 (strongly disagree) to 7 (strongly agree).");
    println!("Enter keeps an existing answer, b goes back, r resets, q quits.\n");

    'steps: loop {
        let items: Vec<(String, String)> = quiz
            .current_items()
            .iter()
            .map(|item| (item.id.clone(), item.text.clone()))
            .collect();

        let progress = quiz.progress();
        println!(
            "── Step {}/{} ── {:.0}% answered",
            quiz.current_step() + 1,
            quiz.step_count(),
            progress.fraction() * 100.0
        );

        for (id, text) in &items {
            loop {
                let current = quiz.state().responses.get(id).map(|v| v + 1);
                let label = match current {
                    Some(v) => format!("{} [{}] > ", text, v),
                    None => format!("{} > ", text),
                };
                let Some(line) = prompt(&label)? else {
                    return Ok(());
                };

                match parse_command(&line) {
                    Some(Command::Answer(value)) => {
                        quiz.answer(id, value)?;
                        break;
                    }
                    Some(Command::Keep) if current.is_some() => break,
                    Some(Command::Back) => {
                        quiz.back();
                        continue 'steps;
                    }
                    Some(Command::Reset) => {
                        quiz.reset();
                        quiz.start();
                        continue 'steps;
                    }
                    Some(Command::Quit) => {
                        println!("💾 Progress saved.");
                        return Ok(());
                    }
                    _ => println!("Please enter a number from 1 to 7."),
                }
            }
        }

        if quiz.is_last_step() {
            let assessment = quiz.finish()?;
            print_result(&assessment, catalog);
            return Ok(());
        }
        quiz.next()?;
    }
}

fn main() -> Result<()> {
    let config = QuizConfig::from_env()?;
    init_logging(DEFAULT_FILTER)?;

    println!("\n{}", "═".repeat(60));
    println!("🎓 UniType16 Personality Quiz v{}", env!("CARGO_PKG_VERSION"));
    println!("{}\n", "═".repeat(60));

    let bank = config.load_bank()?;
    let catalog = config.load_catalog()?;
    info!("Loaded {} items, storage key '{}'", bank.len(), config.storage_key);

    let store = config.open_store(bank);
    let mut quiz = Quiz::resume(store, rand::thread_rng(), config.page_size);

    run(&mut quiz, catalog.as_ref())
}
