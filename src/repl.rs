use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::debug;

use crate::statement::{Statement, prepare};
use crate::table::{ExecuteError, Table};

/// The prompt written before every read, with no trailing newline.
const PROMPT: &str = "db > ";

/// How a session ended. Both variants map to a success exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplOutcome {
    /// `.exit` was entered.
    Exit,
    /// Input ran out before an explicit `.exit`.
    EndOfInput,
}

/// Classification of one trimmed input line: dot-prefixed lines are
/// meta-commands, everything else goes through prepare/execute.
enum Input<'a> {
    Meta(MetaCommand<'a>),
    Statement(&'a str),
}

enum MetaCommand<'a> {
    Exit,
    Unrecognized(&'a str),
}

impl<'a> Input<'a> {
    fn classify(line: &'a str) -> Self {
        if line.starts_with('.') {
            match line {
                ".exit" => Input::Meta(MetaCommand::Exit),
                other => Input::Meta(MetaCommand::Unrecognized(other)),
            }
        } else {
            Input::Statement(line)
        }
    }
}

/// Runs the prompt/read/dispatch loop until `.exit` or end of input.
///
/// Generic over the line source and sink so whole sessions can run
/// in-process under test; `main` passes locked stdin/stdout. Every command is
/// fully processed and flushed before the next prompt appears.
pub fn run(table: &mut Table, input: impl BufRead, output: &mut impl Write) -> Result<ReplOutcome> {
    let mut lines = input.lines();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            debug!("end of input, shutting down");
            return Ok(ReplOutcome::EndOfInput);
        };
        let line = line?;
        let line = line.trim();

        match Input::classify(line) {
            Input::Meta(MetaCommand::Exit) => {
                writeln!(output, "Meta command: .exit")?;
                output.flush()?;
                return Ok(ReplOutcome::Exit);
            }
            Input::Meta(MetaCommand::Unrecognized(command)) => {
                writeln!(output, "Unrecognized command '{command}'.")?;
            }
            Input::Statement(text) => match prepare(text) {
                Ok(statement) => execute_statement(table, statement, output)?,
                Err(err) => writeln!(output, "{err}")?,
            },
        }
        output.flush()?;
    }
}

/// Runs a validated statement against the table. Total over [`Statement`]:
/// per-command failures become status lines here, and only internal pager
/// faults propagate out.
fn execute_statement(
    table: &mut Table,
    statement: Statement,
    output: &mut impl Write,
) -> Result<()> {
    match statement {
        Statement::Insert(row) => match table.insert_row(&row) {
            Ok(()) => writeln!(output, "Executed.")?,
            Err(ExecuteError::TableFull) => writeln!(output, "Error: Table full.")?,
            Err(err @ ExecuteError::Pager(_)) => return Err(err.into()),
        },
        Statement::Select => {
            let rows = table.scan()?;
            debug!(rows = rows.len(), "select scanned the table");
            for row in &rows {
                writeln!(output, "{row}")?;
            }
            writeln!(output, "Executed.")?;
        }
    }
    Ok(())
}
