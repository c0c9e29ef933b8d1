use thiserror::Error;

use crate::row::Row;
use crate::{COLUMN_EMAIL_SIZE, COLUMN_USERNAME_SIZE};

/// A validated statement. Only [`prepare`] constructs these, so execution
/// never has to re-check arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Insert(Row),
    Select,
}

/// Rejections raised while turning raw input into a [`Statement`]. The
/// session loop prints the display string as-is, with no prefix.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrepareError {
    #[error("Syntax error. Could not parse statement.")]
    Syntax,
    #[error("ID must be positive.")]
    NegativeId,
    #[error("String is too long.")]
    StringTooLong,
    #[error("Unrecognized keyword at start of '{0}'.")]
    Unrecognized(String),
}

/// Parses one input line (anything not starting with `.`) into a statement.
/// Storage is never touched here.
///
/// The first whitespace-separated token picks the statement, case
/// sensitively. `insert` takes exactly three arguments; `select` ignores any
/// trailing tokens.
pub fn prepare(input: &str) -> Result<Statement, PrepareError> {
    let mut tokens = input.split_whitespace();
    match tokens.next() {
        Some("insert") => prepare_insert(tokens),
        Some("select") => Ok(Statement::Select),
        _ => Err(PrepareError::Unrecognized(input.to_string())),
    }
}

fn prepare_insert<'a>(mut args: impl Iterator<Item = &'a str>) -> Result<Statement, PrepareError> {
    let (Some(id), Some(username), Some(email), None) =
        (args.next(), args.next(), args.next(), args.next())
    else {
        return Err(PrepareError::Syntax);
    };

    // Checks run in a fixed order so exactly one error surfaces per line:
    // id parses, id is positive, username fits, email fits.
    let id: i32 = id.parse().map_err(|_| PrepareError::Syntax)?;
    if id <= 0 {
        return Err(PrepareError::NegativeId);
    }
    if username.len() > COLUMN_USERNAME_SIZE || email.len() > COLUMN_EMAIL_SIZE {
        return Err(PrepareError::StringTooLong);
    }

    Ok(Statement::Insert(Row {
        id,
        username: username.to_string(),
        email: email.to_string(),
    }))
}
