use ariadne::Source;
use cas_tutor::{generate_explanation, solve_math_problem, Answer};
use rustyline::{error::ReadlineError, DefaultEditor};
use std::io::{self, BufRead, IsTerminal, Write};
use tracing_subscriber::EnvFilter;

const PROMPT: &str = "Enter your math problem: ";

/// Reads a single problem from the terminal with line editing, or from piped stdin. Returns
/// [`None`] if the input ended before a line was entered.
fn read_problem() -> Result<Option<String>, ReadlineError> {
    if io::stdin().is_terminal() {
        let mut rl = DefaultEditor::new()?;
        match rl.readline(PROMPT) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => Ok(None),
            Err(err) => Err(err),
        }
    } else {
        print!("{}", PROMPT);
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let problem = match read_problem() {
        Ok(Some(problem)) => problem,
        Ok(None) => return,
        Err(err) => {
            eprintln!("{}", err);
            return;
        },
    };

    let answer = solve_math_problem(&problem);
    let explanation = generate_explanation(&problem);

    if let Answer::Failed(err) = &answer {
        if let Err(io_err) = err.build_report("input").eprint(("input", Source::from(problem.as_str()))) {
            eprintln!("{}", io_err);
        }
    }

    println!("\nSolution: {}", answer.display());
    println!("\nExplanation: {}", explanation);
}
