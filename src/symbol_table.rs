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

// Symbol table. The table owns every symbol; the
// data image only ever refers to one by its stable `SymbolId`, never by
// name lookup or raw pointer, so a forward reference can be parked
// before its definition is known and completed in place later.

use std::collections::HashMap;

use crate::errors::AssemblyErrorKind;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    CodeOrData,
    Entry,
    External,
    EntryAndCodeOrData,
}

impl SymbolKind {
    pub fn is_entry(self) -> bool {
        matches!(self, SymbolKind::Entry | SymbolKind::EntryAndCodeOrData)
    }
}

#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub address: u32,
    pub defined_here: bool,
    /// Set for symbols declared under `.data`/`.string`: their `address`
    /// is a data-counter offset until `relocate_data_symbols` adds the
    /// final instruction counter to it.
    pub is_data: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId(pub usize);

/// An insertion-ordered set of symbols with name-keyed lookup.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    index: HashMap<String, SymbolId>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0]
    }

    fn get_mut(&mut self, id: SymbolId) -> &mut Symbol {
        &mut self.symbols[id.0]
    }

    pub fn lookup(&self, name: &str) -> Option<SymbolId> {
        self.index.get(name).copied()
    }

    /// Inserts a brand-new symbol with no prior reference. Fails with
    /// `DuplicateLabel` if `name` is already a `defined_here` symbol of
    /// kind `CodeOrData`/`EntryAndCodeOrData`, and with `BothDirectives`
    /// if `name` is already declared `External`.
    pub fn declare(
        &mut self,
        name: &str,
        address: u32,
        kind: SymbolKind,
    ) -> Result<SymbolId, AssemblyErrorKind> {
        if let Some(id) = self.lookup(name) {
            return self.merge_definition(id, address, kind);
        }
        let id = SymbolId(self.symbols.len());
        self.symbols.push(Symbol {
            name: name.to_string(),
            kind,
            address,
            defined_here: true,
            is_data: false,
        });
        self.index.insert(name.to_string(), id);
        Ok(id)
    }

    fn merge_definition(
        &mut self,
        id: SymbolId,
        address: u32,
        new_kind: SymbolKind,
    ) -> Result<SymbolId, AssemblyErrorKind> {
        let existing = self.get(id).clone();

        if existing.kind == SymbolKind::External {
            return Err(AssemblyErrorKind::BothDirectives {
                name: existing.name,
            });
        }
        if existing.defined_here {
            return Err(AssemblyErrorKind::DuplicateLabel {
                name: existing.name,
            });
        }

        // A pending `.entry` reference is being filled in by its
        // definition: combine the kinds instead of overwriting them.
        let merged_kind = match (existing.kind, new_kind) {
            (SymbolKind::Entry, SymbolKind::CodeOrData) => SymbolKind::EntryAndCodeOrData,
            (_, k) => k,
        };

        let sym = self.get_mut(id);
        sym.address = address;
        sym.kind = merged_kind;
        sym.defined_here = true;
        Ok(id)
    }

    /// Looks up `name`, creating a pending (undefined, address 0,
    /// `CodeOrData`) entry if absent. Used for operands and `.data`
    /// label references, which may name a symbol not yet defined.
    pub fn reference(&mut self, name: &str) -> SymbolId {
        if let Some(id) = self.lookup(name) {
            return id;
        }
        let id = SymbolId(self.symbols.len());
        self.symbols.push(Symbol {
            name: name.to_string(),
            kind: SymbolKind::CodeOrData,
            address: 0,
            defined_here: false,
            is_data: false,
        });
        self.index.insert(name.to_string(), id);
        id
    }

    /// Marks `name` as an entry point, merging with any existing
    /// definition. Creates a pending reference if `name` has not been
    /// seen yet.
    pub fn declare_entry(&mut self, name: &str) -> Result<SymbolId, AssemblyErrorKind> {
        let id = self.reference(name);
        let sym = self.get_mut(id);
        sym.kind = match sym.kind {
            SymbolKind::CodeOrData if sym.defined_here => SymbolKind::EntryAndCodeOrData,
            SymbolKind::External => {
                return Err(AssemblyErrorKind::BothDirectives {
                    name: sym.name.clone(),
                });
            }
            SymbolKind::EntryAndCodeOrData | SymbolKind::Entry => sym.kind,
            SymbolKind::CodeOrData => SymbolKind::Entry,
        };
        Ok(id)
    }

    /// Marks `name` as external. Fails with `BothDirectives` if `name`
    /// is already defined locally.
    pub fn declare_extern(&mut self, name: &str) -> Result<SymbolId, AssemblyErrorKind> {
        if let Some(id) = self.lookup(name) {
            let sym = self.get(id).clone();
            if sym.defined_here || sym.kind.is_entry() {
                return Err(AssemblyErrorKind::BothDirectives { name: sym.name });
            }
            let sym = self.get_mut(id);
            sym.kind = SymbolKind::External;
            return Ok(id);
        }
        let id = SymbolId(self.symbols.len());
        self.symbols.push(Symbol {
            name: name.to_string(),
            kind: SymbolKind::External,
            address: 0,
            defined_here: false,
            is_data: false,
        });
        self.index.insert(name.to_string(), id);
        Ok(id)
    }

    /// Iterates symbols in insertion order (deterministic `.ent`/`.ext`
    /// output).
    pub fn enumerate(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    /// Flags `id` as addressed relative to the data counter, not the
    /// instruction counter, so `relocate_data_symbols` knows to shift it.
    pub fn mark_data(&mut self, id: SymbolId) {
        self.get_mut(id).is_data = true;
    }

    /// Adds `offset` (the final instruction counter) to every symbol
    /// marked by `mark_data`, per the course convention of placing the
    /// data image directly after the code image in memory.
    pub fn relocate_data_symbols(&mut self, offset: u32) {
        for sym in self.symbols.iter_mut().filter(|s| s.is_data) {
            sym.address += offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_reference_then_definition_merges() {
        let mut table = SymbolTable::new();
        let id = table.reference("X");
        assert!(!table.get(id).defined_here);
        table.declare("X", 105, SymbolKind::CodeOrData).unwrap();
        assert!(table.get(id).defined_here);
        assert_eq!(table.get(id).address, 105);
    }

    #[test]
    fn duplicate_definition_is_an_error() {
        let mut table = SymbolTable::new();
        table.declare("X", 100, SymbolKind::CodeOrData).unwrap();
        let err = table.declare("X", 101, SymbolKind::CodeOrData).unwrap_err();
        assert_eq!(err, AssemblyErrorKind::DuplicateLabel { name: "X".into() });
    }

    #[test]
    fn entry_before_definition_combines_kind() {
        let mut table = SymbolTable::new();
        table.declare_entry("M").unwrap();
        let id = table.declare("M", 100, SymbolKind::CodeOrData).unwrap();
        assert_eq!(table.get(id).kind, SymbolKind::EntryAndCodeOrData);
    }

    #[test]
    fn extern_conflicts_with_local_definition() {
        let mut table = SymbolTable::new();
        table.declare("K", 100, SymbolKind::CodeOrData).unwrap();
        let err = table.declare_extern("K").unwrap_err();
        assert_eq!(err, AssemblyErrorKind::BothDirectives { name: "K".into() });
    }
}
