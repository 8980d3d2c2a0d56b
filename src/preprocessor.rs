/*
Copyright 2025 Connor Nolan

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

// Macro preprocessor: a textual substitution pass
// that turns `mcro NAME` .. `endmcro` blocks into named bodies and
// replaces every standalone invocation line with the recorded body.
// Macros take no parameters and cannot nest, so the whole pass is a
// two-state machine over the source lines.

use std::collections::HashMap;

use crate::ast::SourceLocation;
use crate::errors::{AssemblyError, AssemblyErrorKind, Diagnostics};
use crate::lexer::{classify_token, looks_like_identifier, MAX_LINE_LENGTH};

const MACRO_KEYWORD: &str = "mcro";
const ENDMACRO_KEYWORD: &str = "endmcro";

struct Macro {
    body: String,
}

enum State {
    Outside,
    Inside { name: String, body: String },
}

/// Expands every macro definition out of `source` and replaces each
/// invocation with the recorded body. Recoverable errors are pushed to
/// `diagnostics` and the pass keeps going so a single file reports every
/// problem in one run, same as the first pass does.
pub fn expand(file: &str, source: &str, diagnostics: &mut Diagnostics) -> String {
    let mut macros: HashMap<String, Macro> = HashMap::new();
    let mut state = State::Outside;
    let mut out = String::new();

    for (idx, raw_line) in source.lines().enumerate() {
        let line_number = idx + 1;
        let location = SourceLocation::new(line_number);

        if raw_line.len() > MAX_LINE_LENGTH {
            diagnostics.push_error(AssemblyError::new(
                file,
                location,
                AssemblyErrorKind::LineTooLong,
            ));
        }

        let trimmed = raw_line.trim();

        match &mut state {
            State::Outside => {
                if let Some(rest) = trimmed.strip_prefix(MACRO_KEYWORD).filter(|r| {
                    r.is_empty() || r.starts_with(|c: char| c.is_whitespace())
                }) {
                    let mut words = rest.split_whitespace();
                    let name = words.next();
                    let extra = words.next();

                    let name = match name {
                        Some(n) => n,
                        None => {
                            diagnostics.push_error(AssemblyError::new(
                                file,
                                location,
                                AssemblyErrorKind::InvalidMacroName { name: String::new() },
                            ));
                            continue;
                        }
                    };

                    if let Some(reason) = invalid_macro_name_reason(name, &macros) {
                        diagnostics.push_error(AssemblyError::new(
                            file,
                            location,
                            reason,
                        ));
                        continue;
                    }
                    if extra.is_some() {
                        diagnostics.push_error(AssemblyError::new(
                            file,
                            location,
                            AssemblyErrorKind::ExtraText {
                                found: extra.unwrap().to_string(),
                            },
                        ));
                        continue;
                    }

                    state = State::Inside {
                        name: name.to_string(),
                        body: String::new(),
                    };
                    continue;
                }

                if trimmed == ENDMACRO_KEYWORD {
                    diagnostics.push_error(AssemblyError::new(file, location, AssemblyErrorKind::MissingMcro));
                    continue;
                }

                if let Some(m) = macros.get(trimmed) {
                    out.push_str(&m.body);
                } else {
                    out.push_str(raw_line);
                    out.push('\n');
                }
            }

            State::Inside { name, body } => {
                if trimmed == ENDMACRO_KEYWORD {
                    macros.insert(
                        name.clone(),
                        Macro {
                            body: std::mem::take(body),
                        },
                    );
                    state = State::Outside;
                    continue;
                }
                if let Some(rest) = trimmed.strip_prefix(ENDMACRO_KEYWORD) {
                    // Exact match was handled above, so reaching here means
                    // trailing text follows the keyword.
                    diagnostics.push_error(AssemblyError::new(
                        file,
                        location,
                        AssemblyErrorKind::ExtraText {
                            found: rest.trim().to_string(),
                        },
                    ));
                    continue;
                }
                if trimmed.strip_prefix(MACRO_KEYWORD).is_some_and(|r| {
                    r.is_empty() || r.starts_with(|c: char| c.is_whitespace())
                }) {
                    // Macros don't nest: a line opening another one before
                    // this one closed means this one never closed.
                    diagnostics.push_error(AssemblyError::new(
                        file,
                        location,
                        AssemblyErrorKind::MissingEndmcro { name: name.clone() },
                    ));
                    state = State::Outside;
                    continue;
                }
                body.push_str(raw_line);
                body.push('\n');
            }
        }
    }

    if let State::Inside { name, .. } = state {
        diagnostics.push_error(AssemblyError::new(
            file,
            SourceLocation::new(source.lines().count()),
            AssemblyErrorKind::MissingEndmcro { name },
        ));
    }

    out
}

fn invalid_macro_name_reason(
    name: &str,
    macros: &HashMap<String, Macro>,
) -> Option<AssemblyErrorKind> {
    if macros.contains_key(name) {
        return Some(AssemblyErrorKind::DuplicateMacro {
            name: name.to_string(),
        });
    }
    if !looks_like_identifier(name)
        || name == MACRO_KEYWORD
        || name == ENDMACRO_KEYWORD
        || !matches!(classify_token(name), crate::lexer::TokenClass::Identifier)
    {
        return Some(AssemblyErrorKind::InvalidMacroName {
            name: name.to_string(),
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str) -> (String, Diagnostics) {
        let mut diag = Diagnostics::default();
        let out = expand("t.as", source, &mut diag);
        (out, diag)
    }

    #[test]
    fn expands_simple_macro_invocation() {
        let source = "mcro PAIR\nmov @r1,@r2\nadd @r1,@r2\nendmcro\nPAIR\nstop\n";
        let (out, diag) = run(source);
        assert!(!diag.has_errors());
        assert_eq!(out, "mov @r1,@r2\nadd @r1,@r2\nstop\n");
    }

    #[test]
    fn non_macro_lines_pass_through_untouched() {
        let (out, diag) = run("mov @r1,@r2\nstop\n");
        assert!(!diag.has_errors());
        assert_eq!(out, "mov @r1,@r2\nstop\n");
    }

    #[test]
    fn unterminated_macro_is_an_error() {
        let (_, diag) = run("mcro X\nmov @r1,@r2\n");
        assert!(diag.has_errors());
        assert_eq!(
            diag.errors[0].kind,
            AssemblyErrorKind::MissingEndmcro { name: "X".into() }
        );
    }

    #[test]
    fn duplicate_macro_name_is_an_error() {
        let source = "mcro X\nstop\nendmcro\nmcro X\nstop\nendmcro\n";
        let (_, diag) = run(source);
        assert_eq!(
            diag.errors[0].kind,
            AssemblyErrorKind::DuplicateMacro { name: "X".into() }
        );
    }

    #[test]
    fn macro_name_colliding_with_opcode_is_rejected() {
        let source = "mcro mov\nstop\nendmcro\n";
        let (_, diag) = run(source);
        assert_eq!(
            diag.errors[0].kind,
            AssemblyErrorKind::InvalidMacroName { name: "mov".into() }
        );
    }

    #[test]
    fn bare_endmcro_with_no_matching_mcro_is_an_error() {
        let (_, diag) = run("endmcro\nstop\n");
        assert_eq!(diag.errors[0].kind, AssemblyErrorKind::MissingMcro);
    }

    #[test]
    fn nested_mcro_while_inside_is_missing_endmcro() {
        let source = "mcro X\nstop\nmcro Y\nstop\nendmcro\n";
        let (_, diag) = run(source);
        assert_eq!(
            diag.errors[0].kind,
            AssemblyErrorKind::MissingEndmcro { name: "X".into() }
        );
    }

    #[test]
    fn line_over_max_length_is_reported() {
        let long_line = "A".repeat(MAX_LINE_LENGTH + 1);
        let (_, diag) = run(&long_line);
        assert_eq!(diag.errors[0].kind, AssemblyErrorKind::LineTooLong);
    }
}
