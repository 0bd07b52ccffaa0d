//! Module segmentation
//!
//! A header is a line whose first word is `module`, followed by exactly one
//! of the four module names. A module's body runs from the line after its
//! header up to the line before the nearest header that follows it, or to
//! the end of the file. The boundary is computed per module, so modules
//! may appear in any order.

use super::error::PreprocessError;
use crate::config::compile_time::preprocessing::MAX_MODULE_BODY_LINES;
use crate::config::runtime::PreprocessingPreferences;
use crate::logging::codes;
use crate::tokens::ModuleName;
use crate::{log_debug, log_warning};
use serde::Serialize;
use std::collections::BTreeMap;

/// One named section of the source
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Module {
    pub name: ModuleName,
    /// Line of the `module <name>` header
    pub header_line: u32,
    /// First line of the body
    pub start_line: u32,
    pub body: String,
}

impl Module {
    pub fn line_count(&self) -> usize {
        self.body.lines().count()
    }

    pub fn is_blank(&self) -> bool {
        self.body.trim().is_empty()
    }
}

/// Modules found in one source, at most one per name
#[derive(Debug, Clone, Default, Serialize)]
pub struct SourceModules {
    modules: BTreeMap<ModuleName, Module>,
}

impl SourceModules {
    pub fn get(&self, name: ModuleName) -> Option<&Module> {
        self.modules.get(&name)
    }

    /// Body of `name`, empty when the module is absent
    pub fn body(&self, name: ModuleName) -> &str {
        self.get(name).map(|m| m.body.as_str()).unwrap_or("")
    }

    pub fn contains(&self, name: ModuleName) -> bool {
        self.modules.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Present modules in search/evaluation/endgame/opening order
    pub fn in_dump_order(&self) -> impl Iterator<Item = &Module> {
        ModuleName::DUMP_ORDER
            .into_iter()
            .filter_map(|name| self.modules.get(&name))
    }

    pub(crate) fn replace_body(&mut self, name: ModuleName, body: String) {
        if let Some(module) = self.modules.get_mut(&name) {
            module.body = body;
        }
    }
}

/// Whether `line` is a header, and if so which module it names
fn parse_header(line: &str, line_num: u32) -> Result<Option<ModuleName>, PreprocessError> {
    let mut words = line.split_whitespace();
    if words.next() != Some("module") {
        return Ok(None);
    }

    let Some(name) = words.next().and_then(ModuleName::from_str) else {
        return Err(PreprocessError::UnnamedModule {
            line: line_num,
            header: line.trim().to_string(),
        });
    };

    let extra: Vec<&str> = words.collect();
    if !extra.is_empty() {
        return Err(PreprocessError::TrailingHeaderText {
            name,
            line: line_num,
            extra: extra.join(" "),
        });
    }
    Ok(Some(name))
}

/// Splits a trimmed source into its modules
pub struct ModuleSplitter {
    preferences: PreprocessingPreferences,
}

impl ModuleSplitter {
    pub fn new() -> Self {
        Self::with_preferences(PreprocessingPreferences::default())
    }

    pub fn with_preferences(preferences: PreprocessingPreferences) -> Self {
        Self { preferences }
    }

    pub fn split(&self, input: &str) -> Result<SourceModules, PreprocessError> {
        let lines: Vec<&str> = input.split_inclusive('\n').collect();

        // (line index, name) of every header, in textual order
        let mut headers: Vec<(usize, ModuleName)> = Vec::new();
        let mut first_seen: BTreeMap<ModuleName, u32> = BTreeMap::new();

        for (idx, line) in lines.iter().enumerate() {
            let line_num = idx as u32 + 1;
            if let Some(name) = parse_header(line, line_num)? {
                if let Some(&first_line) = first_seen.get(&name) {
                    return Err(PreprocessError::DuplicateModule {
                        name,
                        first_line,
                        line: line_num,
                    });
                }
                first_seen.insert(name, line_num);
                headers.push((idx, name));
            }
        }

        if !first_seen.contains_key(&ModuleName::Evaluation) {
            return Err(PreprocessError::MissingEvaluationModule);
        }

        self.check_preamble(&lines, &headers);

        let mut modules = BTreeMap::new();
        for &(header_idx, name) in &headers {
            let end = headers
                .iter()
                .map(|&(other_idx, _)| other_idx)
                .filter(|&other_idx| other_idx > header_idx)
                .min()
                .unwrap_or(lines.len());

            let module = Module {
                name,
                header_line: header_idx as u32 + 1,
                start_line: header_idx as u32 + 2,
                body: lines[header_idx + 1..end].concat(),
            };

            log_debug!("Module located",
                "module" => name,
                "header_line" => module.header_line,
                "body_lines" => end - header_idx - 1
            );

            if module.line_count() > MAX_MODULE_BODY_LINES {
                log_warning!(code = codes::preprocessing::LARGE_MODULE_BODY,
                    "Module body is unusually large",
                    "module" => name,
                    "lines" => module.line_count(),
                    "threshold" => MAX_MODULE_BODY_LINES
                );
            }

            modules.insert(name, module);
        }

        let evaluation_blank = modules
            .get(&ModuleName::Evaluation)
            .is_some_and(Module::is_blank);
        if evaluation_blank {
            log_warning!(code = codes::preprocessing::EMPTY_EVALUATION_MODULE,
                "Evaluation module has an empty body"
            );
        }

        Ok(SourceModules { modules })
    }

    fn check_preamble(&self, lines: &[&str], headers: &[(usize, ModuleName)]) {
        if !self.preferences.warn_on_preamble {
            return;
        }
        let first_header = headers.first().map_or(lines.len(), |&(idx, _)| idx);
        let content_lines = lines[..first_header]
            .iter()
            .filter(|line| !line.trim().is_empty())
            .count();
        if content_lines > 0 {
            log_warning!(code = codes::preprocessing::PREAMBLE_IGNORED,
                "Text before the first module header is ignored",
                "lines" => content_lines
            );
        }
    }
}

impl Default for ModuleSplitter {
    fn default() -> Self {
        Self::new()
    }
}

/// Split with default preferences
pub fn split_modules(input: &str) -> Result<SourceModules, PreprocessError> {
    ModuleSplitter::new().split(input)
}
