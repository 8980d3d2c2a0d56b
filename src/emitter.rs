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

// Second pass and emitter: completes every deferred
// data-image entry against the finished symbol table, then renders the
// three text artifacts. File I/O itself stays with the caller — this
// module only produces strings, so it can be exercised without a
// filesystem.

use crate::ast::SourceLocation;
use crate::data_image::Variant;
use crate::encoder::{base64_word, constants::ARE_EXTERNAL, constants::ARE_RELOCATABLE, encode_word};
use crate::errors::{AssemblyError, AssemblyErrorKind, Diagnostics};
use crate::first_pass::FirstPassOutput;
use crate::symbol_table::SymbolKind;

pub struct EmitResult {
    pub object: String,
    pub entries: Option<String>,
    pub externals: Option<String>,
}

/// Resolves every deferred entry in `output`'s code and data images and
/// renders the three artifacts. Returns `None` (after recording
/// diagnostics) if any entry cannot be resolved; the caller is expected
/// to have already confirmed the first pass produced no errors.
pub fn run(file: &str, output: &mut FirstPassOutput, diagnostics: &mut Diagnostics) -> Option<EmitResult> {
    let mut externals_used: Vec<(String, u32)> = Vec::new();

    for entry in output.code.iter_mut() {
        let Some(symbol_id) = entry.symbol else { continue };
        if entry.value.is_some() {
            continue;
        }

        let symbol = output.symbols.get(symbol_id).clone();
        if symbol.kind == SymbolKind::External {
            entry.value = Some(0);
            if entry.variant == Variant::AddressReference {
                entry.are = Some(ARE_EXTERNAL);
                externals_used.push((symbol.name.clone(), entry.address));
            }
        } else if symbol.defined_here {
            entry.value = Some(symbol.address as i32);
            if entry.variant == Variant::AddressReference {
                entry.are = Some(ARE_RELOCATABLE);
            }
        } else {
            diagnostics.push_error(AssemblyError::new(
                file,
                SourceLocation::new(0),
                AssemblyErrorKind::LabelDoesNotExist { name: symbol.name },
            ));
        }
    }

    for entry in output.data.iter_mut() {
        let Some(symbol_id) = entry.symbol else { continue };
        if entry.value.is_some() {
            continue;
        }

        let symbol = output.symbols.get(symbol_id).clone();
        if symbol.defined_here {
            entry.value = Some(symbol.address as i32);
        } else {
            diagnostics.push_error(AssemblyError::new(
                file,
                SourceLocation::new(0),
                AssemblyErrorKind::LabelDoesNotExist { name: symbol.name },
            ));
        }
    }

    if diagnostics.has_errors() {
        return None;
    }

    let mut object = format!("{}\t{}\n", output.code.len(), output.data.len());
    for entry in output.code.iter().chain(output.data.iter()) {
        let word = match encode_word(entry) {
            Ok(w) => w,
            Err(kind) => {
                diagnostics.push_error(AssemblyError::new(file, SourceLocation::new(0), kind));
                return None;
            }
        };
        let [hi, lo] = base64_word(word);
        object.push(hi);
        object.push(lo);
        object.push('\n');
    }

    let mut entry_lines = String::new();
    for symbol in output.symbols.enumerate() {
        if symbol.kind.is_entry() {
            entry_lines.push_str(&format!("{}\t{}\n", symbol.name, symbol.address));
        }
    }

    let mut external_lines = String::new();
    for (name, address) in &externals_used {
        external_lines.push_str(&format!("{name}\t{address}\n"));
    }

    Some(EmitResult {
        object,
        entries: (!entry_lines.is_empty()).then_some(entry_lines),
        externals: (!external_lines.is_empty()).then_some(external_lines),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Diagnostics;
    use crate::first_pass;

    fn run_pipeline(source: &str) -> (Option<EmitResult>, Diagnostics) {
        let mut diag = Diagnostics::default();
        let mut fp = first_pass::run("t.am", source, &mut diag);
        assert!(!diag.has_errors(), "first pass errors: {:?}", diag.errors);
        let result = run("t.am", &mut fp, &mut diag);
        (result, diag)
    }

    #[test]
    fn simple_data_directive_round_trips() {
        let (result, _diag) = run_pipeline(".data 5,-3,17\n");
        let result = result.unwrap();
        let mut lines = result.object.lines();
        assert_eq!(lines.next(), Some("0\t3"));
        assert_eq!(lines.next(), Some("AF"));
        assert_eq!(lines.next(), Some("/9"));
        assert_eq!(lines.next(), Some("AR"));
        assert!(result.entries.is_none());
        assert!(result.externals.is_none());
    }

    #[test]
    fn forward_reference_resolves_to_relocatable() {
        let (result, _diag) = run_pipeline("mov X,@r1\nX: .data 7\n");
        let result = result.unwrap();
        let lines: Vec<&str> = result.object.lines().collect();
        assert_eq!(lines[0], "3\t1");
    }

    #[test]
    fn external_usage_is_recorded() {
        let (result, _diag) = run_pipeline(".extern K\njmp K\n");
        let result = result.unwrap();
        assert!(result.externals.unwrap().starts_with("K\t"));
    }

    #[test]
    fn entry_resolved_from_below() {
        let (result, _diag) = run_pipeline(".entry M\nM: .data 42\n");
        let result = result.unwrap();
        assert!(result.entries.unwrap().starts_with("M\t100"));
    }
}
