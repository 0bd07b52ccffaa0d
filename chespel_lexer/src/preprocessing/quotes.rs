//! Quote balance gate. Later stages assume every string literal is closed.
use super::error::PreprocessError;
use crate::utils::Position;

/// Fail if `input` holds an odd number of `"` characters
pub fn validate_quotes(input: &str) -> Result<usize, PreprocessError> {
    let mut count = 0;
    let mut last = Position::start();
    let mut pos = Position::start();

    for ch in input.chars() {
        if ch == '"' {
            count += 1;
            last = pos;
        }
        pos = pos.advance(ch);
    }

    if count % 2 == 0 {
        Ok(count)
    } else {
        Err(PreprocessError::UnbalancedQuotes {
            count,
            line: last.line,
            column: last.column,
        })
    }
}
