//! Printable and serializable views of a pipeline result

use super::result::PipelineResult;
use crate::preprocessing::SourceModules;
use crate::tokens::ModuleName;
use serde::{Deserialize, Serialize};

const SEPARATOR_WIDTH: usize = 40;

/// One `(category, text)` pair with its raw-file location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenEntry {
    pub category: String,
    pub text: String,
    pub line: u32,
    pub column: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleOutput {
    pub name: ModuleName,
    pub tokens: Vec<TokenEntry>,
}

/// Serialized form of a tokenized source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub modules: Vec<ModuleOutput>,
}

impl PipelineOutput {
    pub fn new(file: Option<String>, result: &PipelineResult) -> Self {
        let modules = result
            .modules
            .iter()
            .map(|module| ModuleOutput {
                name: module.name,
                tokens: module
                    .tokens
                    .iter()
                    .map(|token| TokenEntry {
                        category: token.kind.name().to_string(),
                        text: token.text.clone(),
                        line: result
                            .preprocessed
                            .source_line(module.name, token.span.start.line),
                        column: token.span.start.column,
                    })
                    .collect(),
            })
            .collect();

        Self { file, modules }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn separator(title: &str) -> String {
    let label = format!(" {} ", title);
    let side = SEPARATOR_WIDTH.saturating_sub(label.len()) / 2;
    format!("{}{}{}\n", "=".repeat(side), label, "=".repeat(side))
}

/// Every present module body, each between separator lines
pub fn format_module_dump(modules: &SourceModules) -> String {
    let mut output = String::new();
    for module in modules.in_dump_order() {
        output.push_str(&separator(&format!("module {}", module.name)));
        output.push_str(&module.body);
        if !module.body.is_empty() && !module.body.ends_with('\n') {
            output.push('\n');
        }
    }
    if !output.is_empty() {
        output.push_str(&"=".repeat(SEPARATOR_WIDTH));
        output.push('\n');
    }
    output
}

/// One `category "text"` line per token, grouped by module
pub fn format_token_listing(result: &PipelineResult) -> String {
    let mut output = String::new();
    for module in &result.modules {
        output.push_str(&separator(&format!("tokens {}", module.name)));
        for token in &module.tokens {
            let (category, text) = token.as_pair();
            output.push_str(&format!("{:<14} {:?}\n", category, text));
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuntimeConfig;
    use crate::pipeline::run_source;

    const SOURCE: &str = "module search\ndepth\nmodule evaluation\nrule a:\n\tscore 1;\n";

    #[test]
    fn test_module_dump_order_and_separators() {
        let result = run_source(SOURCE, &RuntimeConfig::default()).unwrap();
        let dump = format_module_dump(&result.preprocessed.modules);

        let search = dump.find("module search").unwrap();
        let evaluation = dump.find("module evaluation").unwrap();
        assert!(search < evaluation);
        assert!(dump.contains("rule a:\n\tscore 1;\n"));
        assert!(dump.ends_with(&format!("{}\n", "=".repeat(SEPARATOR_WIDTH))));
    }

    #[test]
    fn test_token_listing() {
        let result = run_source("module evaluation\nscore -5;\n", &RuntimeConfig::default())
            .unwrap();
        let listing = format_token_listing(&result);

        assert!(listing.contains("keyword        \"score\"\n"));
        assert!(listing.contains("number         \"-5\"\n"));
        assert!(listing.contains("semicolon      \";\"\n"));
    }

    #[test]
    fn test_json_uses_raw_lines() {
        let source = "/* a\nb */\nmodule evaluation\nscore 1;\n";
        let result = run_source(source, &RuntimeConfig::default()).unwrap();
        let output = PipelineOutput::new(Some("rules.chp".to_string()), &result);

        let evaluation = &output.modules[0];
        assert_eq!(evaluation.name, ModuleName::Evaluation);
        assert_eq!(evaluation.tokens[0].text, "score");
        assert_eq!(evaluation.tokens[0].line, 4);

        let json = output.to_json().unwrap();
        let parsed: PipelineOutput = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, output);
        assert!(json.contains("\"category\": \"keyword\""));
    }
}
