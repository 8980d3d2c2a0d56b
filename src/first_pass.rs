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

// First pass: walks the macro-expanded source line by line, builds the
// symbol table, and appends words to the code and data images. Code
// addresses are assigned as they're seen, starting at
// `FIRST_CODE_ADDRESS`; data addresses start at 0 and are relocated by
// the final instruction counter once the whole file has been scanned.

use std::collections::HashSet;

use crate::ast::{
    AddressingMode, DataValue, Directive, Instruction, LineBody, Opcode, Operand, Register,
    SourceLine, SourceLocation,
};
use crate::data_image::{DataImage, Entry};
use crate::encoder::{constants::FIRST_CODE_ADDRESS, instruction_word_count, value_in_range};
use crate::errors::{AssemblyError, AssemblyErrorKind, AssemblyWarning, AssemblyWarningKind, Diagnostics};
use crate::lexer::{classify_token, looks_like_identifier, parse_register, Cursor, Delimiter, MAX_LABEL_LENGTH};
use crate::symbol_table::{SymbolId, SymbolKind, SymbolTable};

pub struct FirstPassOutput {
    pub symbols: SymbolTable,
    pub code: DataImage,
    pub data: DataImage,
}

pub fn run(file: &str, expanded: &str, diagnostics: &mut Diagnostics) -> FirstPassOutput {
    let mut symbols = SymbolTable::new();
    let mut code = DataImage::new();
    let mut data = DataImage::new();
    let mut referenced: HashSet<SymbolId> = HashSet::new();
    let mut entry_requests: Vec<(String, SourceLocation)> = Vec::new();

    for (idx, raw_line) in expanded.lines().enumerate() {
        let location = SourceLocation::new(idx + 1);
        let trimmed = raw_line.trim();
        if trimmed.is_empty() || trimmed.starts_with(';') {
            continue;
        }

        let source_line = match parse_line(file, location, raw_line, diagnostics) {
            Some(line) => line,
            None => continue,
        };

        process_line(
            file,
            &source_line,
            &mut symbols,
            &mut code,
            &mut data,
            &mut referenced,
            &mut entry_requests,
            diagnostics,
        );
    }

    let final_code_address = FIRST_CODE_ADDRESS + code.len() as u32;
    symbols.relocate_data_symbols(final_code_address);
    data.relocate(final_code_address);

    for (name, location) in &entry_requests {
        match symbols.lookup(name) {
            Some(id) if symbols.get(id).defined_here => {}
            _ => diagnostics.push_error(AssemblyError::new(
                file,
                *location,
                AssemblyErrorKind::LabelDoesNotExist { name: name.clone() },
            )),
        }
    }

    for (idx, sym) in symbols.enumerate().enumerate() {
        let id = SymbolId(idx);
        if sym.kind == SymbolKind::External && !referenced.contains(&id) {
            diagnostics.push_warning(AssemblyWarning::new(
                file,
                SourceLocation::new(0),
                AssemblyWarningKind::UnusedExtern {
                    name: sym.name.clone(),
                },
            ));
        }
    }

    FirstPassOutput { symbols, code, data }
}

/// Lexical/syntactic parsing of one non-blank, non-comment line: label
/// extraction, keyword classification, operand parsing, and addressing
/// legality. Semantic bookkeeping (symbol declaration, word emission)
/// happens afterwards in `process_line`.
fn parse_line(
    file: &str,
    location: SourceLocation,
    raw_line: &str,
    diagnostics: &mut Diagnostics,
) -> Option<SourceLine> {
    let mut cursor = Cursor::new(raw_line);
    let (first_word, first_delim) = cursor.next_word();

    let label = if first_delim == Some(Delimiter::Colon) {
        let name = first_word.trim_end_matches(':').to_string();
        if let Err(kind) = validate_label_shape(&name) {
            diagnostics.push_error(AssemblyError::new(file, location, kind));
            return None;
        }
        Some(name)
    } else {
        None
    };

    let (keyword, _) = if label.is_some() {
        cursor.next_word()
    } else {
        (first_word, first_delim)
    };

    if keyword.is_empty() {
        diagnostics.push_error(AssemblyError::new(file, location, AssemblyErrorKind::MissingOperand));
        return None;
    }

    if let Some(directive) = parse_directive_keyword(file, location, &keyword, &mut cursor, diagnostics)? {
        return Some(SourceLine {
            location,
            label,
            body: LineBody::Directive(directive),
        });
    }

    match classify_token(&keyword) {
        crate::lexer::TokenClass::Opcode(op) => {
            let instruction = parse_instruction(file, location, op, &mut cursor, diagnostics)?;
            Some(SourceLine {
                location,
                label,
                body: LineBody::Instruction(instruction),
            })
        }
        _ => {
            let bare = keyword.trim_start_matches('.');
            if matches!(bare, "data" | "string" | "entry" | "extern") {
                diagnostics.push_error(AssemblyError::new(file, location, AssemblyErrorKind::MissingDot));
            } else {
                diagnostics.push_error(AssemblyError::new(
                    file,
                    location,
                    AssemblyErrorKind::InvalidOpcode { word: keyword },
                ));
            }
            None
        }
    }
}

fn validate_label_shape(name: &str) -> Result<(), AssemblyErrorKind> {
    if name.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return Err(AssemblyErrorKind::LabelStartsWithDigit {
            name: name.to_string(),
        });
    }
    if !looks_like_identifier(name) {
        return Err(AssemblyErrorKind::InvalidLabel {
            name: name.to_string(),
            reason: "labels must start with a letter and contain only letters and digits".into(),
        });
    }
    if name.len() > MAX_LABEL_LENGTH {
        return Err(AssemblyErrorKind::InvalidLabel {
            name: name.to_string(),
            reason: format!("exceeds the maximum label length of {MAX_LABEL_LENGTH}"),
        });
    }
    if !matches!(classify_token(name), crate::lexer::TokenClass::Identifier) {
        return Err(AssemblyErrorKind::InvalidLabel {
            name: name.to_string(),
            reason: "collides with a reserved word".into(),
        });
    }
    Ok(())
}

/// Returns `Some(Ok-ish Option<Directive>))`-shaped control flow: `None`
/// propagates a parse failure up to the caller (via `?`), `Some(None)`
/// means `keyword` wasn't a directive at all, `Some(Some(d))` is success.
fn parse_directive_keyword(
    file: &str,
    location: SourceLocation,
    keyword: &str,
    cursor: &mut Cursor,
    diagnostics: &mut Diagnostics,
) -> Option<Option<Directive>> {
    use crate::lexer::DirectiveKeyword::*;
    let Some(kind) = crate::lexer::DirectiveKeyword::from_word(keyword) else {
        return Some(None);
    };

    let directive = match kind {
        Data => parse_data_directive(file, location, cursor, diagnostics)?,
        String => parse_string_directive(file, location, cursor, diagnostics)?,
        Entry => parse_name_directive(file, location, cursor, diagnostics, "entry", Directive::Entry)?,
        Extern => parse_name_directive(file, location, cursor, diagnostics, "extern", Directive::Extern)?,
    };
    Some(Some(directive))
}

fn split_operands(text: &str) -> Result<Vec<String>, AssemblyErrorKind> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    let mut pieces = Vec::new();
    for part in trimmed.split(',') {
        let p = part.trim();
        if p.is_empty() {
            return Err(AssemblyErrorKind::ExtraComma);
        }
        pieces.push(p.to_string());
    }
    Ok(pieces)
}

fn parse_data_directive(
    file: &str,
    location: SourceLocation,
    cursor: &mut Cursor,
    diagnostics: &mut Diagnostics,
) -> Option<Directive> {
    let rest = cursor.rest().to_string();
    if rest.trim().is_empty() {
        diagnostics.push_error(AssemblyError::new(
            file,
            location,
            AssemblyErrorKind::EmptyDirective {
                directive: ".data".into(),
            },
        ));
        return None;
    }

    let pieces = match split_operands(&rest) {
        Ok(p) => p,
        Err(kind) => {
            diagnostics.push_error(AssemblyError::new(file, location, kind));
            return None;
        }
    };

    let mut values = Vec::with_capacity(pieces.len());
    let mut ok = true;
    for piece in &pieces {
        if let Ok(v) = piece.parse::<i32>() {
            if !value_in_range(v) {
                diagnostics.push_error(AssemblyError::new(
                    file,
                    location,
                    AssemblyErrorKind::InvalidOperand { found: piece.clone() },
                ));
                ok = false;
                continue;
            }
            values.push(DataValue::Literal(v));
        } else if looks_like_identifier(piece) {
            values.push(DataValue::LabelRef(piece.clone()));
        } else {
            diagnostics.push_error(AssemblyError::new(
                file,
                location,
                AssemblyErrorKind::InvalidOperand { found: piece.clone() },
            ));
            ok = false;
        }
    }

    if ok {
        Some(Directive::Data(values))
    } else {
        None
    }
}

fn parse_string_directive(
    file: &str,
    location: SourceLocation,
    cursor: &mut Cursor,
    diagnostics: &mut Diagnostics,
) -> Option<Directive> {
    if cursor.rest().trim().is_empty() {
        diagnostics.push_error(AssemblyError::new(
            file,
            location,
            AssemblyErrorKind::EmptyDirective {
                directive: ".string".into(),
            },
        ));
        return None;
    }

    let content = match cursor.scan_quoted_string() {
        Ok(s) => s,
        Err(_) => {
            diagnostics.push_error(AssemblyError::new(file, location, AssemblyErrorKind::MissingQuote));
            return None;
        }
    };

    if !cursor.rest().trim().is_empty() {
        diagnostics.push_error(AssemblyError::new(
            file,
            location,
            AssemblyErrorKind::ExtraText {
                found: cursor.rest().trim().to_string(),
            },
        ));
        return None;
    }

    Some(Directive::String(content))
}

fn parse_name_directive(
    file: &str,
    location: SourceLocation,
    cursor: &mut Cursor,
    diagnostics: &mut Diagnostics,
    label: &str,
    build: impl FnOnce(String) -> Directive,
) -> Option<Directive> {
    let rest = cursor.rest().trim();
    if rest.is_empty() {
        diagnostics.push_warning(AssemblyWarning::new(
            file,
            location,
            AssemblyWarningKind::EmptyDirective {
                directive: format!(".{label}"),
            },
        ));
        return None;
    }

    let mut words = rest.split_whitespace();
    let name = words.next().unwrap().to_string();
    if words.next().is_some() {
        diagnostics.push_error(AssemblyError::new(
            file,
            location,
            AssemblyErrorKind::ExtraText { found: rest.to_string() },
        ));
        return None;
    }
    if !looks_like_identifier(&name) {
        diagnostics.push_error(AssemblyError::new(
            file,
            location,
            AssemblyErrorKind::InvalidLabel {
                name: name.clone(),
                reason: "not a valid label name".into(),
            },
        ));
        return None;
    }

    Some(build(name))
}

fn parse_instruction(
    file: &str,
    location: SourceLocation,
    opcode: Opcode,
    cursor: &mut Cursor,
    diagnostics: &mut Diagnostics,
) -> Option<Instruction> {
    let rest = cursor.rest().to_string();
    let expected = opcode.operand_count();

    if expected == 0 {
        if !rest.trim().is_empty() {
            diagnostics.push_error(AssemblyError::new(
                file,
                location,
                AssemblyErrorKind::ExtraText { found: rest.trim().to_string() },
            ));
            return None;
        }
        return Some(Instruction { opcode, src: None, dest: None });
    }

    let pieces = match split_operands(&rest) {
        Ok(p) => p,
        Err(kind) => {
            diagnostics.push_error(AssemblyError::new(file, location, kind));
            return None;
        }
    };

    if pieces.len() < expected {
        // Enough whitespace-separated tokens are present but the comma
        // between them is missing, e.g. `mov @r1 @r2`; distinguish that
        // from a genuinely missing operand.
        let kind = if rest.split_whitespace().count() >= expected {
            AssemblyErrorKind::MissingComma
        } else {
            AssemblyErrorKind::MissingOperand
        };
        diagnostics.push_error(AssemblyError::new(file, location, kind));
        return None;
    }
    if pieces.len() > expected {
        diagnostics.push_error(AssemblyError::new(file, location, AssemblyErrorKind::TooManyOperands));
        return None;
    }

    let mut operands = Vec::with_capacity(pieces.len());
    let mut ok = true;
    for piece in &pieces {
        match parse_operand(piece) {
            Ok(op) => operands.push(op),
            Err(kind) => {
                diagnostics.push_error(AssemblyError::new(file, location, kind));
                ok = false;
            }
        }
    }
    if !ok {
        return None;
    }

    let (src, dest) = if expected == 2 {
        (Some(operands[0].clone()), Some(operands[1].clone()))
    } else {
        (None, Some(operands[0].clone()))
    };

    if let Err(kind) = check_addressing(opcode, src.as_ref(), dest.as_ref()) {
        diagnostics.push_error(AssemblyError::new(file, location, kind));
        return None;
    }

    Some(Instruction { opcode, src, dest })
}

fn parse_operand(text: &str) -> Result<Operand, AssemblyErrorKind> {
    if let Some(rest) = text.strip_prefix('#') {
        let value: i32 = rest
            .parse()
            .map_err(|_| AssemblyErrorKind::InvalidOperand { found: text.to_string() })?;
        if !value_in_range(value) {
            return Err(AssemblyErrorKind::InvalidOperand { found: text.to_string() });
        }
        return Ok(Operand::Immediate(value));
    }

    if let Some(rest) = text.strip_prefix('*') {
        return parse_bare_register(rest)
            .map(Operand::IndirectRegister)
            .ok_or_else(|| AssemblyErrorKind::InvalidRegister { word: text.to_string() });
    }

    if let Some(reg) = parse_register(text) {
        return Ok(Operand::Register(reg));
    }

    if looks_like_identifier(text) {
        return Ok(Operand::Label(text.to_string()));
    }

    Err(AssemblyErrorKind::InvalidOperand { found: text.to_string() })
}

fn parse_bare_register(s: &str) -> Option<Register> {
    let rest = s.strip_prefix('r')?;
    if rest.len() != 1 {
        return None;
    }
    let digit = rest.chars().next()?.to_digit(10)? as u8;
    Register::from_digit(digit)
}

fn check_addressing(
    opcode: Opcode,
    src: Option<&Operand>,
    dest: Option<&Operand>,
) -> Result<(), AssemblyErrorKind> {
    use AddressingMode::*;

    let (src_allowed, dest_allowed): (&[AddressingMode], &[AddressingMode]) = match opcode {
        Opcode::Mov | Opcode::Add | Opcode::Sub => (
            &[Immediate, Direct, IndirectRegister, Register],
            &[Direct, IndirectRegister, Register],
        ),
        Opcode::Cmp => (
            &[Immediate, Direct, IndirectRegister, Register],
            &[Immediate, Direct, IndirectRegister, Register],
        ),
        Opcode::Lea => (&[Direct], &[Direct, IndirectRegister, Register]),
        Opcode::Not | Opcode::Clr | Opcode::Inc | Opcode::Dec | Opcode::Red => {
            (&[], &[Direct, IndirectRegister, Register])
        }
        Opcode::Jmp | Opcode::Bne | Opcode::Jsr => (&[], &[Direct, IndirectRegister]),
        Opcode::Prn => (&[], &[Immediate, Direct, IndirectRegister, Register]),
        Opcode::Rts | Opcode::Stop => (&[], &[]),
    };

    if let Some(s) = src {
        let mode = AddressingMode::of(s);
        if !src_allowed.contains(&mode) {
            return Err(AssemblyErrorKind::IllegalOperand {
                found: format!("{mode:?}"),
            });
        }
    }
    if let Some(d) = dest {
        let mode = AddressingMode::of(d);
        if !dest_allowed.contains(&mode) {
            return Err(AssemblyErrorKind::IllegalOperand {
                found: format!("{mode:?}"),
            });
        }
    }
    Ok(())
}

fn is_register_family(op: &Operand) -> bool {
    matches!(op, Operand::Register(_) | Operand::IndirectRegister(_))
}

fn register_index(op: &Operand) -> Option<u8> {
    match op {
        Operand::Register(r) | Operand::IndirectRegister(r) => Some(r.index()),
        _ => None,
    }
}

fn process_line(
    file: &str,
    line: &SourceLine,
    symbols: &mut SymbolTable,
    code: &mut DataImage,
    data: &mut DataImage,
    referenced: &mut HashSet<SymbolId>,
    entry_requests: &mut Vec<(String, SourceLocation)>,
    diagnostics: &mut Diagnostics,
) {
    match &line.body {
        LineBody::Directive(Directive::Entry(name)) => {
            if line.label.is_some() {
                push_meaningless_label(file, line, diagnostics);
            }
            match symbols.declare_entry(name) {
                Ok(_) => entry_requests.push((name.clone(), line.location)),
                Err(kind) => diagnostics.push_error(AssemblyError::new(file, line.location, kind)),
            }
        }
        LineBody::Directive(Directive::Extern(name)) => {
            if line.label.is_some() {
                push_meaningless_label(file, line, diagnostics);
            }
            if let Err(kind) = symbols.declare_extern(name) {
                diagnostics.push_error(AssemblyError::new(file, line.location, kind));
            }
        }
        LineBody::Directive(Directive::Data(values)) => {
            if let Some(name) = &line.label {
                declare_and_mark_data(symbols, data, name, line.location, file, diagnostics);
            }
            for value in values {
                let address = data.len() as u32;
                match value {
                    DataValue::Literal(v) => {
                        data.push(Entry::immediate(address, *v));
                    }
                    DataValue::LabelRef(name) => {
                        let id = symbols.reference(name);
                        referenced.insert(id);
                        data.push(Entry::deferred_immediate(address, id));
                    }
                }
            }
        }
        LineBody::Directive(Directive::String(text)) => {
            if let Some(name) = &line.label {
                declare_and_mark_data(symbols, data, name, line.location, file, diagnostics);
            }
            for byte in text.bytes() {
                let address = data.len() as u32;
                data.push(Entry::immediate(address, byte as i32));
            }
            let address = data.len() as u32;
            data.push(Entry::immediate(address, 0));
        }
        LineBody::Instruction(instr) => {
            if let Some(name) = &line.label {
                let address = FIRST_CODE_ADDRESS + code.len() as u32;
                if let Err(kind) = symbols.declare(name, address, SymbolKind::CodeOrData) {
                    diagnostics.push_error(AssemblyError::new(file, line.location, kind));
                }
            }
            emit_instruction(instr, code, symbols, referenced);
        }
    }
}

fn push_meaningless_label(file: &str, line: &SourceLine, diagnostics: &mut Diagnostics) {
    diagnostics.push_warning(AssemblyWarning::new(
        file,
        line.location,
        AssemblyWarningKind::MeaninglessLabel {
            name: line.label.clone().unwrap_or_default(),
        },
    ));
}

fn declare_and_mark_data(
    symbols: &mut SymbolTable,
    data: &DataImage,
    name: &str,
    location: SourceLocation,
    file: &str,
    diagnostics: &mut Diagnostics,
) {
    let address = data.len() as u32;
    match symbols.declare(name, address, SymbolKind::CodeOrData) {
        Ok(id) => symbols.mark_data(id),
        Err(kind) => diagnostics.push_error(AssemblyError::new(file, location, kind)),
    }
}

fn emit_instruction(
    instr: &Instruction,
    code: &mut DataImage,
    symbols: &mut SymbolTable,
    referenced: &mut HashSet<SymbolId>,
) {
    let src_mode = instr.src.as_ref().map(|o| AddressingMode::of(o).bits()).unwrap_or(0);
    let dest_mode = instr.dest.as_ref().map(|o| AddressingMode::of(o).bits()).unwrap_or(0);

    let expected_words = instruction_word_count(instr.src.as_ref(), instr.dest.as_ref());
    let start = code.len();

    let instruction_address = FIRST_CODE_ADDRESS + code.len() as u32;
    code.push(Entry::instruction(
        instruction_address,
        src_mode,
        instr.opcode.bits(),
        dest_mode,
    ));

    match (&instr.src, &instr.dest) {
        (Some(s), Some(d)) if is_register_family(s) && is_register_family(d) => {
            let address = FIRST_CODE_ADDRESS + code.len() as u32;
            code.push(Entry::register_pair(
                address,
                register_index(s).unwrap(),
                register_index(d).unwrap(),
            ));
        }
        _ => {
            if let Some(s) = &instr.src {
                push_operand_word(s, true, code, symbols, referenced);
            }
            if let Some(d) = &instr.dest {
                push_operand_word(d, false, code, symbols, referenced);
            }
        }
    }

    debug_assert_eq!((code.len() - start) as u32, expected_words);
}

fn push_operand_word(
    op: &Operand,
    is_src: bool,
    code: &mut DataImage,
    symbols: &mut SymbolTable,
    referenced: &mut HashSet<SymbolId>,
) {
    let address = FIRST_CODE_ADDRESS + code.len() as u32;
    match op {
        Operand::Register(r) | Operand::IndirectRegister(r) => {
            if is_src {
                code.push(Entry::single_register_src(address, r.index()));
            } else {
                code.push(Entry::single_register_dest(address, r.index()));
            }
        }
        Operand::Label(name) => {
            let id = symbols.reference(name);
            referenced.insert(id);
            code.push(Entry::deferred_address(address, id));
        }
        Operand::Immediate(value) => {
            code.push(Entry::immediate(address, *value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_source(source: &str) -> (FirstPassOutput, Diagnostics) {
        let mut diag = Diagnostics::default();
        let out = run("t.am", source, &mut diag);
        (out, diag)
    }

    #[test]
    fn data_directive_builds_literals() {
        let (out, diag) = run_source("NUM: .data 7,-3,17\nstop\n");
        assert!(!diag.has_errors());
        assert_eq!(out.data.len(), 3);
        let id = out.symbols.lookup("NUM").unwrap();
        assert_eq!(out.symbols.get(id).address, FIRST_CODE_ADDRESS + 1);
    }

    #[test]
    fn string_directive_emits_terminator() {
        let (out, diag) = run_source("MSG: .string \"hi\"\nstop\n");
        assert!(!diag.has_errors());
        assert_eq!(out.data.len(), 3);
    }

    #[test]
    fn forward_label_reference_resolves_after_first_pass() {
        let (out, diag) = run_source("jmp LOOP\nLOOP: stop\n");
        assert!(!diag.has_errors());
        let id = out.symbols.lookup("LOOP").unwrap();
        assert!(out.symbols.get(id).defined_here);
    }

    #[test]
    fn two_register_operands_share_one_word() {
        let (out, diag) = run_source("mov @r1,@r2\nstop\n");
        assert!(!diag.has_errors());
        assert_eq!(out.code.len(), 3);
    }

    #[test]
    fn illegal_addressing_mode_is_rejected() {
        let (_out, diag) = run_source("jmp #5\nstop\n");
        assert!(diag.has_errors());
    }

    #[test]
    fn unused_extern_warns() {
        let (_out, diag) = run_source(".extern FOO\nstop\n");
        assert_eq!(diag.warnings.len(), 1);
        assert_eq!(
            diag.warnings[0].kind,
            AssemblyWarningKind::UnusedExtern { name: "FOO".into() }
        );
    }

    #[test]
    fn entry_without_definition_is_an_error() {
        let (_out, diag) = run_source(".entry MISSING\nstop\n");
        assert!(diag.has_errors());
    }

    #[test]
    fn empty_data_directive_is_an_error() {
        let (_out, diag) = run_source(".data\nstop\n");
        assert_eq!(diag.errors[0].kind, AssemblyErrorKind::EmptyDirective { directive: ".data".into() });
    }

    #[test]
    fn empty_entry_directive_is_a_warning() {
        let (_out, diag) = run_source(".entry\nstop\n");
        assert!(!diag.has_errors());
        assert_eq!(diag.warnings.len(), 1);
    }

    #[test]
    fn space_separated_operands_report_missing_comma() {
        let (_out, diag) = run_source("mov @r1 @r2\nstop\n");
        assert_eq!(diag.errors[0].kind, AssemblyErrorKind::MissingComma);
    }

    #[test]
    fn truly_missing_operand_is_reported_as_such() {
        let (_out, diag) = run_source("mov @r1\nstop\n");
        assert_eq!(diag.errors[0].kind, AssemblyErrorKind::MissingOperand);
    }
}
