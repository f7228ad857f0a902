//! Line-oriented terminal front end.
//!
//! Reads one command per line from any `BufRead` and writes plain text to any
//! `Write`, so the same loop drives a real terminal and the tests.

use crate::domain::errors::AdvisorResult;
use crate::domain::models::SessionView;
use crate::domain::services::AdvisorSession;
use random_source::RandomSource;
use std::io::{BufRead, Write};
use tracing::debug;

const HELP: &str = "Enter a number to choose, b = back, r = restart, s = surprise me, c = compare tools, q = quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCommand {
    /// 1-based option number as typed by the user
    Choose(usize),
    Back,
    Restart,
    Surprise,
    Compare,
    Quit,
    Unknown(String),
}

pub fn parse_command(line: &str) -> TerminalCommand {
    let input = line.trim();
    if let Ok(number) = input.parse::<usize>() {
        return TerminalCommand::Choose(number);
    }

    match input.to_ascii_lowercase().as_str() {
        "b" | "back" => TerminalCommand::Back,
        "r" | "restart" => TerminalCommand::Restart,
        "s" | "surprise" => TerminalCommand::Surprise,
        "c" | "compare" => TerminalCommand::Compare,
        "q" | "quit" | "exit" => TerminalCommand::Quit,
        _ => TerminalCommand::Unknown(input.to_string()),
    }
}

/// Runs the questionnaire until the user quits or the input ends.
///
/// Navigation errors are shown to the user and the prompt repeats; only I/O
/// failures end the loop with an error.
pub fn run_terminal<R, W, S>(
    session: &mut AdvisorSession,
    input: R,
    output: &mut W,
    random: &mut S,
) -> AdvisorResult<()>
where
    R: BufRead,
    W: Write,
    S: RandomSource + ?Sized,
{
    writeln!(output, "Journalism AI Advisor")?;
    writeln!(output, "{}", HELP)?;
    writeln!(output)?;

    let mut redraw = true;
    let mut lines = input.lines();

    loop {
        let view = session.view()?;
        if redraw {
            write!(output, "{}", view)?;
            if let SessionView::Recommending(_) = view {
                writeln!(output, "Press r to start again, c to compare the recommended tools, q to quit.")?;
            }
        }
        write!(output, "> ")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };
        let command = parse_command(&line?);
        debug!(session_id = %session.session_id(), command = ?command, "Terminal command");
        redraw = false;

        match command {
            TerminalCommand::Choose(number) => match view {
                SessionView::Asking(step) => {
                    let Some(text) = number.checked_sub(1).and_then(|i| step.options.get(i)) else {
                        writeln!(output, "Please choose a number between 1 and {}.", step.options.len())?;
                        continue;
                    };
                    match session.select_option(text) {
                        Ok(_) => redraw = true,
                        Err(e) => writeln!(output, "Error: {}", e)?,
                    }
                }
                SessionView::Recommending(_) => {
                    writeln!(output, "The questionnaire is complete. Press r to start again.")?;
                }
            },
            TerminalCommand::Back => {
                if !session.state().can_go_back() {
                    writeln!(output, "Already at the first question.")?;
                    continue;
                }
                match session.go_back() {
                    Ok(_) => redraw = true,
                    Err(e) => writeln!(output, "Error: {}", e)?,
                }
            }
            TerminalCommand::Restart => {
                session.restart()?;
                redraw = true;
            }
            TerminalCommand::Surprise => match session.random_workflow(random) {
                Some(tool) => {
                    writeln!(output, "Surprise workflow:")?;
                    writeln!(output, "{}", tool)?;
                }
                None => writeln!(output, "No workflows available.")?,
            },
            TerminalCommand::Compare => {
                let profiles = session.compare_tools();
                if profiles.is_empty() {
                    writeln!(output, "Nothing to compare yet. Finish the questionnaire first.")?;
                }
                for profile in profiles {
                    writeln!(output, "{}", profile)?;
                }
            }
            TerminalCommand::Quit => {
                writeln!(output, "Goodbye.")?;
                break;
            }
            TerminalCommand::Unknown(input) => {
                writeln!(output, "Unrecognized input '{}'. {}", input, HELP)?;
            }
        }
    }

    Ok(())
}
