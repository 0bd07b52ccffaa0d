//! Optional evaluation-body normalization
//!
//! Blank lines are dropped, indentation must be tabs only, and a line that
//! does not end in `:` or `;` is joined to the next one with a single space.
//! Every output line ends with a newline.

use super::error::PreprocessError;
use super::line_map::LineMap;

/// Normalize an evaluation body whose first line is `start_line` of the file.
///
/// The returned map gives, for each output line, the body line it began on.
pub fn normalize_evaluation(
    body: &str,
    start_line: u32,
) -> Result<(String, LineMap), PreprocessError> {
    let mut output = String::with_capacity(body.len());
    let mut origins = Vec::new();
    let mut continuing = false;

    for (idx, line) in body.lines().enumerate() {
        let line_num = start_line + idx as u32;
        if line.trim().is_empty() {
            continue;
        }

        let indent_len = line.len() - line.trim_start_matches([' ', '\t']).len();
        if let Some(space_idx) = line[..indent_len].find(' ') {
            return Err(PreprocessError::BadIndentation {
                line: line_num,
                column: space_idx as u32 + 1,
            });
        }

        if continuing {
            output.push(' ');
            output.push_str(line.trim_start_matches('\t'));
        } else {
            origins.push(idx as u32 + 1);
            output.push_str(line);
        }

        continuing = !(line.ends_with(':') || line.ends_with(';'));
        if !continuing {
            output.push('\n');
        }
    }

    if continuing {
        output.push('\n');
    }

    Ok((output, LineMap::from_origins(origins)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_joins_continuation_lines() {
        let body = "rule a:\n\tscore 1 +\n\t\t2;\n";
        let (out, map) = normalize_evaluation(body, 2).unwrap();
        assert_eq!(out, "rule a:\n\tscore 1 + 2;\n");
        assert_eq!(map.origin(2), 2);
    }

    #[test]
    fn test_drops_blank_lines() {
        let body = "\nrule a:\n\n\tscore 1;\n\n";
        let (out, map) = normalize_evaluation(body, 10).unwrap();
        assert_eq!(out, "rule a:\n\tscore 1;\n");
        assert_eq!(map.origin(1), 2);
        assert_eq!(map.origin(2), 4);
    }

    #[test]
    fn test_space_indentation_rejected() {
        assert_matches!(
            normalize_evaluation("rule a:\n\t score 1;\n", 5),
            Err(PreprocessError::BadIndentation { line: 6, column: 2 })
        );
        assert_matches!(
            normalize_evaluation("rule a:\n  score 5;\n", 2),
            Err(PreprocessError::BadIndentation { line: 3, column: 1 })
        );
    }

    #[test]
    fn test_unterminated_last_line_gets_newline() {
        let (out, _) = normalize_evaluation("sym x = 1", 1).unwrap();
        assert_eq!(out, "sym x = 1\n");
        let (empty, _) = normalize_evaluation("", 1).unwrap();
        assert_eq!(empty, "");
    }
}
