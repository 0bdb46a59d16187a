use application::rag_service::RagService;
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input};
use indicatif::{ProgressBar, ProgressStyle};
use shared::types::Result;
use std::time::Duration;
use tracing::error;

const PROGRESS_MESSAGE: &str = "Retrieving information and generating response...";

#[derive(Debug, PartialEq, Eq)]
enum Turn<'a> {
    Skip,
    Exit,
    Ask(&'a str),
}

fn is_exit(input: &str) -> bool {
    input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit")
}

/// Any non-empty input is a question and is passed on as typed.
fn classify(input: &str) -> Turn<'_> {
    if input.is_empty() {
        Turn::Skip
    } else if is_exit(input.trim()) {
        Turn::Exit
    } else {
        Turn::Ask(input)
    }
}

fn spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(PROGRESS_MESSAGE);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

/// Question/answer session on the terminal. Questions run one after another.
///
/// A failed question is reported and the session carries on with the next one.
pub async fn run(service: &RagService) -> Result<()> {
    println!("{}", crate::page::TITLE.bold());
    println!("Type 'exit' to quit.");
    let theme = ColorfulTheme::default();

    loop {
        let input: String = Input::with_theme(&theme)
            .with_prompt("Ask your medical question")
            .allow_empty(true)
            .interact_text()?;
        let query = match classify(&input) {
            Turn::Skip => continue,
            Turn::Exit => break,
            Turn::Ask(query) => query,
        };

        let progress = spinner();
        let outcome = service.answer(query).await;
        progress.finish_and_clear();

        match outcome {
            Ok(exchange) => {
                println!("\n{}", "AI Response:".green().bold());
                println!("{}\n", exchange.answer);
            }
            Err(err) => {
                error!(error = %format!("{err:#}"), "Question failed");
                eprintln!("{} {:#}", "Error:".red().bold(), err);
            }
        }
    }
    Ok(())
}
