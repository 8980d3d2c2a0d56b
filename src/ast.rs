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

// Value types shared by the lexer, preprocessor, and both passes. Plain
// data only; the passes decide what to do with it.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: Option<usize>,
}

impl SourceLocation {
    pub fn new(line: usize) -> Self {
        Self { line, column: None }
    }

    pub fn with_column(line: usize, column: usize) -> Self {
        Self {
            line,
            column: Some(column),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Register {
    R0,
    R1,
    R2,
    R3,
    R4,
    R5,
    R6,
    R7,
}

impl Register {
    pub fn index(self) -> u8 {
        match self {
            Register::R0 => 0,
            Register::R1 => 1,
            Register::R2 => 2,
            Register::R3 => 3,
            Register::R4 => 4,
            Register::R5 => 5,
            Register::R6 => 6,
            Register::R7 => 7,
        }
    }

    pub fn from_digit(d: u8) -> Option<Self> {
        match d {
            0 => Some(Register::R0),
            1 => Some(Register::R1),
            2 => Some(Register::R2),
            3 => Some(Register::R3),
            4 => Some(Register::R4),
            5 => Some(Register::R5),
            6 => Some(Register::R6),
            7 => Some(Register::R7),
            _ => None,
        }
    }
}

/// The sixteen opcode mnemonics, in the order the encoding table assigns
/// them to the 4-bit opcode field (mov = 0 .. stop = 15).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Opcode {
    Mov,
    Cmp,
    Add,
    Sub,
    Not,
    Clr,
    Lea,
    Inc,
    Dec,
    Jmp,
    Bne,
    Red,
    Prn,
    Jsr,
    Rts,
    Stop,
}

impl Opcode {
    pub fn from_mnemonic(s: &str) -> Option<Self> {
        Some(match s {
            "mov" => Opcode::Mov,
            "cmp" => Opcode::Cmp,
            "add" => Opcode::Add,
            "sub" => Opcode::Sub,
            "not" => Opcode::Not,
            "clr" => Opcode::Clr,
            "lea" => Opcode::Lea,
            "inc" => Opcode::Inc,
            "dec" => Opcode::Dec,
            "jmp" => Opcode::Jmp,
            "bne" => Opcode::Bne,
            "red" => Opcode::Red,
            "prn" => Opcode::Prn,
            "jsr" => Opcode::Jsr,
            "rts" => Opcode::Rts,
            "stop" => Opcode::Stop,
            _ => return None,
        })
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Mov => "mov",
            Opcode::Cmp => "cmp",
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Not => "not",
            Opcode::Clr => "clr",
            Opcode::Lea => "lea",
            Opcode::Inc => "inc",
            Opcode::Dec => "dec",
            Opcode::Jmp => "jmp",
            Opcode::Bne => "bne",
            Opcode::Red => "red",
            Opcode::Prn => "prn",
            Opcode::Jsr => "jsr",
            Opcode::Rts => "rts",
            Opcode::Stop => "stop",
        }
    }

    /// Bits stored in the instruction word's 4-bit opcode field.
    pub fn bits(self) -> u8 {
        match self {
            Opcode::Mov => 0,
            Opcode::Cmp => 1,
            Opcode::Add => 2,
            Opcode::Sub => 3,
            Opcode::Not => 4,
            Opcode::Clr => 5,
            Opcode::Lea => 6,
            Opcode::Inc => 7,
            Opcode::Dec => 8,
            Opcode::Jmp => 9,
            Opcode::Bne => 10,
            Opcode::Red => 11,
            Opcode::Prn => 12,
            Opcode::Jsr => 13,
            Opcode::Rts => 14,
            Opcode::Stop => 15,
        }
    }

    /// Number of source+dest operands this opcode expects (0, 1, or 2).
    pub fn operand_count(self) -> usize {
        match self {
            Opcode::Mov | Opcode::Cmp | Opcode::Add | Opcode::Sub | Opcode::Lea => 2,
            Opcode::Not
            | Opcode::Clr
            | Opcode::Inc
            | Opcode::Dec
            | Opcode::Jmp
            | Opcode::Bne
            | Opcode::Red
            | Opcode::Prn
            | Opcode::Jsr => 1,
            Opcode::Rts | Opcode::Stop => 0,
        }
    }
}

/// Addressing mode selector stored (as a 3-bit field) in the instruction
/// word for each operand. These codes are not consecutive small
/// integers; they match the bit assignments this format's encoding
/// table uses.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AddressingMode {
    Immediate,
    Direct,
    IndirectRegister,
    Register,
}

impl AddressingMode {
    pub fn bits(self) -> u8 {
        match self {
            AddressingMode::Immediate => 0,
            AddressingMode::Direct => 1,
            AddressingMode::IndirectRegister => 3,
            AddressingMode::Register => 5,
        }
    }

    pub fn of(op: &Operand) -> AddressingMode {
        match op {
            Operand::Immediate(_) => AddressingMode::Immediate,
            Operand::Label(_) => AddressingMode::Direct,
            Operand::IndirectRegister(_) => AddressingMode::IndirectRegister,
            Operand::Register(_) => AddressingMode::Register,
        }
    }
}

/// An instruction operand as written in source, before address resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// `#N`
    Immediate(i32),
    /// a bare identifier naming a label, used directly
    Label(String),
    /// `*rK` — indirect through a register
    IndirectRegister(Register),
    /// `@rK`
    Register(Register),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataValue {
    Literal(i32),
    /// a bare identifier in a `.data` list, resolved against the symbol
    /// table at emission time.
    LabelRef(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Data(Vec<DataValue>),
    String(String),
    Entry(String),
    Extern(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub src: Option<Operand>,
    pub dest: Option<Operand>,
}

/// One logical line of the expanded source, after label-prefix stripping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineBody {
    Directive(Directive),
    Instruction(Instruction),
}

#[derive(Debug, Clone)]
pub struct SourceLine {
    pub location: SourceLocation,
    pub label: Option<String>,
    pub body: LineBody,
}
