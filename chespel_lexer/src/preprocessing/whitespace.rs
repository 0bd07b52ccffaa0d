//! Trailing whitespace trimming
//!
//! A run of spaces directly before a line break is dropped. The end of input
//! counts as a line break. Tabs, interior whitespace and the line break
//! itself are kept, so line numbers never change.

pub fn trim_trailing_whitespace(input: &str) -> String {
    let mut output = String::with_capacity(input.len());
    for line in input.split_inclusive('\n') {
        match line.strip_suffix('\n') {
            Some(content) => {
                output.push_str(content.trim_end_matches(' '));
                output.push('\n');
            }
            None => output.push_str(line.trim_end_matches(' ')),
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_before_newline() {
        assert_eq!(trim_trailing_whitespace("rule a:  \n"), "rule a:\n");
        assert_eq!(trim_trailing_whitespace("x  \ny \n"), "x\ny\n");
    }

    #[test]
    fn test_keeps_interior_and_leading() {
        assert_eq!(
            trim_trailing_whitespace("\tscore  1 ;\n   \n"),
            "\tscore  1 ;\n\n"
        );
    }

    #[test]
    fn test_tabs_are_not_trimmed() {
        assert_eq!(trim_trailing_whitespace("x \t\n"), "x \t\n");
        assert_eq!(trim_trailing_whitespace("x\t \n"), "x\t\n");
    }

    #[test]
    fn test_end_of_input_counts_as_line_break() {
        assert_eq!(trim_trailing_whitespace("x  "), "x");
        assert_eq!(trim_trailing_whitespace("a \nb  "), "a\nb");
        assert_eq!(trim_trailing_whitespace(""), "");
    }
}
