use thiserror::Error;

/// Parse failure with the 1-based line where it was detected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("line {line}: unterminated quoted string")]
    UnterminatedString { line: u32 },

    #[error("line {line}: unexpected `}}` with no open block")]
    UnexpectedCloseBrace { line: u32 },

    #[error("line {line}: block opened here is never closed")]
    UnclosedBlock { line: u32 },

    #[error("line {line}: operator `{op}` without a key")]
    UnexpectedOperator { op: String, line: u32 },

    #[error("line {line}: `{key}` has an operator but no value")]
    MissingValue { key: String, line: u32 },

    #[error("line {line}: blocks nested deeper than {max}")]
    TooDeep { line: u32, max: usize },
}

impl ScriptError {
    pub fn line(&self) -> u32 {
        match self {
            ScriptError::UnterminatedString { line }
            | ScriptError::UnexpectedCloseBrace { line }
            | ScriptError::UnclosedBlock { line }
            | ScriptError::UnexpectedOperator { line, .. }
            | ScriptError::MissingValue { line, .. }
            | ScriptError::TooDeep { line, .. } => *line,
        }
    }
}
