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

use std::path::Path;

use asm12::file_reader::MockFileSystem;
use asm12::{assemble_file, AssembleOutcome};

fn assemble_source(source: &str) -> (MockFileSystem, AssembleOutcome) {
    let fs = MockFileSystem::default();
    fs.add_file("prog.as", source);
    let outcome = assemble_file(Path::new("prog"), &fs).unwrap();
    (fs, outcome)
}

fn emitted(source: &str) -> (MockFileSystem, asm12::errors::OutputPaths) {
    let (fs, outcome) = assemble_source(source);
    match outcome {
        AssembleOutcome::Emitted { written, .. } => (fs, written),
        AssembleOutcome::Failed { diagnostics } => {
            panic!("expected clean assembly, got errors: {:?}", diagnostics.errors)
        }
    }
}

fn emitted_with_warnings(
    source: &str,
) -> (MockFileSystem, asm12::errors::OutputPaths, Vec<asm12::errors::AssemblyWarning>) {
    let (fs, outcome) = assemble_source(source);
    match outcome {
        AssembleOutcome::Emitted { written, warnings } => (fs, written, warnings),
        AssembleOutcome::Failed { diagnostics } => {
            panic!("expected clean assembly, got errors: {:?}", diagnostics.errors)
        }
    }
}

#[test]
fn data_literals_produce_expected_object_file() {
    let (fs, _written) = emitted("X: .data 5,-3,17\nstop\n");
    let object = fs.get_file("prog.ob").unwrap();
    let mut lines = object.lines();
    assert_eq!(lines.next(), Some("1\t3"));
    // stop is a single word at address 100, then the three data words follow.
    assert!(lines.next().is_some());
    assert_eq!(lines.next(), Some("AF"));
    assert_eq!(lines.next(), Some("/9"));
    assert_eq!(lines.next(), Some("AR"));
    assert!(lines.next().is_none());
}

#[test]
fn string_directive_appends_null_terminator() {
    let (fs, _written) = emitted("MSG: .string \"hi\"\nstop\n");
    let object = fs.get_file("prog.ob").unwrap();
    let header = object.lines().next().unwrap();
    assert_eq!(header, "1\t3");
}

#[test]
fn two_register_instruction_shares_one_operand_word() {
    let (fs, _written) = emitted("mov @r1,@r2\nstop\n");
    let object = fs.get_file("prog.ob").unwrap();
    let header = object.lines().next().unwrap();
    assert_eq!(header, "3\t0");
}

#[test]
fn forward_label_reference_resolves_to_relocatable_address() {
    let (fs, _written) = emitted("mov X,@r1\nstop\nX: .data 9\n");
    let object = fs.get_file("prog.ob").unwrap();
    assert_eq!(object.lines().next().unwrap(), "4\t1");
}

#[test]
fn external_usage_is_recorded_per_occurrence() {
    let (fs, written) = emitted(".extern LIB\njmp LIB\njmp LIB\nstop\n");
    assert!(written.externals.is_some());
    let externals = fs.get_file("prog.ext").unwrap();
    let count = externals.lines().filter(|l| l.starts_with("LIB\t")).count();
    assert_eq!(count, 2);
}

#[test]
fn entry_symbol_appears_in_entries_file() {
    let (fs, written) = emitted(".entry M\nM: .data 42\n");
    assert!(written.entries.is_some());
    let entries = fs.get_file("prog.ent").unwrap();
    assert!(entries.starts_with("M\t100"));
}

#[test]
fn macro_invocation_is_expanded_before_first_pass() {
    let source = "mcro PAIR\nmov @r1,@r2\nadd @r1,@r2\nendmcro\nPAIR\nstop\n";
    let (fs, _written) = emitted(source);
    let expanded = fs.get_file("prog.am").unwrap();
    assert_eq!(expanded, "mov @r1,@r2\nadd @r1,@r2\nstop\n");
}

#[test]
fn expanded_file_is_kept_on_success() {
    let (_fs, written) = emitted("stop\n");
    assert!(written.expanded.is_some());
    assert!(written.object.is_some());
}

#[test]
fn no_entries_or_externals_files_when_unused() {
    let (_fs, written) = emitted("stop\n");
    assert!(written.entries.is_none());
    assert!(written.externals.is_none());
}

#[test]
fn duplicate_label_fails_the_whole_file() {
    let (_fs, outcome) = assemble_source("X: .data 1\nX: .data 2\n");
    assert!(matches!(outcome, AssembleOutcome::Failed { .. }));
}

#[test]
fn line_over_eighty_characters_is_rejected() {
    let long_comment_line = format!("{}\nstop\n", "A".repeat(81));
    let (_fs, outcome) = assemble_source(&long_comment_line);
    assert!(matches!(outcome, AssembleOutcome::Failed { .. }));
}

#[test]
fn label_over_thirty_one_characters_is_rejected() {
    let source = format!("{}: .data 1\nstop\n", "A".repeat(32));
    let (_fs, outcome) = assemble_source(&source);
    assert!(matches!(outcome, AssembleOutcome::Failed { .. }));
}

#[test]
fn immediate_value_out_of_range_is_rejected() {
    let (_fs, outcome) = assemble_source("mov #2048,@r1\nstop\n");
    assert!(matches!(outcome, AssembleOutcome::Failed { .. }));
}

#[test]
fn boundary_immediate_values_are_accepted() {
    let (_fs, outcome) = assemble_source("mov #2047,@r1\nmov #-2048,@r2\nstop\n");
    assert!(matches!(outcome, AssembleOutcome::Emitted { .. }));
}

#[test]
fn empty_string_directive_emits_only_the_terminator() {
    let (fs, _written) = emitted("S: .string \"\"\nstop\n");
    let object = fs.get_file("prog.ob").unwrap();
    assert_eq!(object.lines().next().unwrap(), "1\t1");
}

#[test]
fn unused_extern_does_not_fail_the_file() {
    let (_fs, outcome) = assemble_source(".extern NEVER_USED\nstop\n");
    assert!(matches!(outcome, AssembleOutcome::Emitted { .. }));
}

#[test]
fn unused_extern_warning_surfaces_on_clean_assembly() {
    let (_fs, _written, warnings) = emitted_with_warnings(".extern NEVER_USED\nstop\n");
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].kind,
        asm12::errors::AssemblyWarningKind::UnusedExtern {
            name: "NEVER_USED".into()
        }
    );
}

#[test]
fn endmcro_without_matching_mcro_fails() {
    let (_fs, outcome) = assemble_source("endmcro\nstop\n");
    assert!(matches!(outcome, AssembleOutcome::Failed { .. }));
}

#[test]
fn failed_assembly_removes_partial_object_file() {
    let fs = MockFileSystem::default();
    fs.add_file("bad.as", "X: .data 1\nX: .data 2\n");
    let outcome = assemble_file(Path::new("bad"), &fs).unwrap();
    assert!(matches!(outcome, AssembleOutcome::Failed { .. }));
    assert!(fs.get_file("bad.ob").is_none());
    assert!(fs.get_file("bad.am").is_none());
}

#[test]
fn illegal_addressing_mode_is_rejected() {
    let (_fs, outcome) = assemble_source("jmp #5\nstop\n");
    assert!(matches!(outcome, AssembleOutcome::Failed { .. }));
}
