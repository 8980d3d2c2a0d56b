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

// Binary encoding. 12-bit words are stored as plain `u16`s and only
// rendered to a display string (base64) at the very last step, instead
// of building up a heap-allocated fixed-size binary string per word.

pub mod constants;

use crate::ast::{AddressingMode, Operand};
use crate::data_image::{Entry, Variant};
use crate::errors::AssemblyErrorKind;
use constants::*;

/// How many machine words (instruction word + operand words) a two-
/// operand, one-operand, or zero-operand instruction occupies, given the
/// addressing mode of each operand present. Two register-family operands
/// (register or indirect-register) share a single operand word.
pub fn instruction_word_count(src: Option<&Operand>, dest: Option<&Operand>) -> u32 {
    let is_register_family = |op: &Operand| {
        matches!(
            AddressingMode::of(op),
            AddressingMode::Register | AddressingMode::IndirectRegister
        )
    };

    match (src, dest) {
        (Some(s), Some(d)) => {
            if is_register_family(s) && is_register_family(d) {
                2
            } else {
                3
            }
        }
        (Some(_), None) | (None, Some(_)) => 2,
        (None, None) => 1,
    }
}

/// Renders a decimal in `[-2048, 2047]` to its 12-bit two's-complement
/// bit pattern. Callers are expected to have already range-checked.
pub fn twelve_bit_twos_complement(value: i32) -> u16 {
    (value as i16 as u16) & 0x0FFF
}

pub fn value_in_range(value: i32) -> bool {
    (MIN_IMMEDIATE..=MAX_IMMEDIATE).contains(&value)
}

/// Completes one data-image entry into its 12-bit word. Entries carrying
/// a still-unresolved symbol reference must be resolved by the second
/// pass before this is called.
pub fn encode_word(entry: &Entry) -> Result<u16, AssemblyErrorKind> {
    match entry.variant {
        Variant::Instruction {
            src_mode,
            opcode,
            dest_mode,
        } => Ok(((src_mode as u16) << 9)
            | ((opcode as u16) << 5)
            | ((dest_mode as u16) << 2)
            | ARE_ABSOLUTE as u16),

        Variant::RegisterPair => {
            let src = entry.src_reg.ok_or_else(missing_field)?;
            let dest = entry.dest_reg.ok_or_else(missing_field)?;
            Ok(((src as u16) << 7) | ((dest as u16) << 2))
        }

        Variant::SingleRegisterDest => {
            let dest = entry.dest_reg.ok_or_else(missing_field)?;
            Ok((dest as u16) << 2)
        }

        Variant::SingleRegisterSrc => {
            let src = entry.src_reg.ok_or_else(missing_field)?;
            Ok((src as u16) << 7)
        }

        Variant::AddressReference => {
            let address = entry.value.ok_or_else(missing_field)? as u16;
            let are = entry.are.ok_or_else(missing_field)? as u16;
            Ok(((address & 0x03FF) << 2) | are)
        }

        Variant::ImmediateValue => {
            let value = entry.value.ok_or_else(missing_field)?;
            Ok(twelve_bit_twos_complement(value))
        }
    }
}

fn missing_field() -> AssemblyErrorKind {
    AssemblyErrorKind::Internal {
        reason: "data image entry missing a field required for encoding".to_string(),
    }
}

/// Packs a 12-bit word into two base64 characters: the high 6 bits
/// become the first character, the low 6 bits the second.
pub fn base64_word(word: u16) -> [char; 2] {
    let w = word & 0x0FFF;
    let high = ((w >> 6) & 0x3F) as usize;
    let low = (w & 0x3F) as usize;
    [BASE64_ALPHABET[high] as char, BASE64_ALPHABET[low] as char]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base64_packs_high_bits_first() {
        assert_eq!(
            base64_word(twelve_bit_twos_complement(5)),
            ['A', 'F']
        );
        assert_eq!(
            base64_word(twelve_bit_twos_complement(-3)),
            ['/', '9']
        );
        assert_eq!(
            base64_word(twelve_bit_twos_complement(17)),
            ['A', 'R']
        );
    }

    #[test]
    fn twos_complement_round_trips_negative() {
        let bits = twelve_bit_twos_complement(-1);
        assert_eq!(bits, 0x0FFF);
    }

    #[test]
    fn word_count_shares_register_pair() {
        use crate::ast::Register;
        let src = Operand::Register(Register::R3);
        let dest = Operand::Register(Register::R5);
        assert_eq!(instruction_word_count(Some(&src), Some(&dest)), 2);
    }

    #[test]
    fn word_count_two_operands_not_both_register() {
        let src = Operand::Label("X".to_string());
        let dest = Operand::Immediate(1);
        assert_eq!(instruction_word_count(Some(&src), None), 2);
        assert_eq!(instruction_word_count(None, Some(&dest)), 2);
    }

    #[test]
    fn word_count_no_operands() {
        assert_eq!(instruction_word_count(None, None), 1);
    }
}
