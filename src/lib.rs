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

pub mod ast;
pub mod data_image;
pub mod emitter;
pub mod encoder;
pub mod errors;
pub mod file_reader;
pub mod first_pass;
pub mod lexer;
pub mod preprocessor;
pub mod symbol_table;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use errors::{AssemblyError, AssemblyErrorKind, AssemblyWarning, Diagnostics, OutputPaths};
use file_reader::{FileReader, FileWriter};

/// Outcome of assembling one source file: either the set of diagnostics
/// that suppressed emission, or the paths that were written. A clean
/// assembly can still carry warnings (an unused `.extern`, a meaningless
/// label, an empty `.entry`/`.extern`), so `Emitted` carries them too.
pub enum AssembleOutcome {
    Emitted {
        written: OutputPaths,
        warnings: Vec<AssemblyWarning>,
    },
    Failed { diagnostics: Diagnostics },
}

/// Assembles one `.as` source into its `.am`/`.ob`/`.ent`/`.ext`
/// artifacts. `base` is the path without extension; the four artifact
/// paths are derived from it. Runs the preprocessor, first pass, and
/// emitter in strict sequence; each file is assembled independently of
/// every other.
pub fn assemble_file<FS: FileReader + FileWriter>(base: &Path, fs: &FS) -> Result<AssembleOutcome> {
    let source_path = base.with_extension("as");
    let file_label = base.display().to_string();

    let source = fs
        .read_to_string(&source_path)
        .with_context(|| format!("failed to read source file: {}", source_path.display()))?;

    let mut diagnostics = Diagnostics::default();

    let expanded = preprocessor::expand(&file_label, &source, &mut diagnostics);

    let expanded_path = base.with_extension("am");
    fs.write_string(&expanded_path, &expanded)
        .with_context(|| format!("failed to write expanded source: {}", expanded_path.display()))?;

    if diagnostics.has_errors() {
        cleanup(fs, base, &expanded_path);
        return Ok(AssembleOutcome::Failed { diagnostics });
    }

    let mut first_pass_output = first_pass::run(&file_label, &expanded, &mut diagnostics);

    if diagnostics.has_errors() {
        cleanup(fs, base, &expanded_path);
        return Ok(AssembleOutcome::Failed { diagnostics });
    }

    let emitted = emitter::run(&file_label, &mut first_pass_output, &mut diagnostics);

    let Some(result) = emitted else {
        cleanup(fs, base, &expanded_path);
        return Ok(AssembleOutcome::Failed { diagnostics });
    };

    let object_path = base.with_extension("ob");
    fs.write_string(&object_path, &result.object)
        .with_context(|| format!("failed to write object file: {}", object_path.display()))?;

    let mut written = OutputPaths {
        expanded: Some(expanded_path),
        object: Some(object_path),
        entries: None,
        externals: None,
    };

    if let Some(entries) = &result.entries {
        let entries_path = base.with_extension("ent");
        fs.write_string(&entries_path, entries)
            .with_context(|| format!("failed to write entries file: {}", entries_path.display()))?;
        written.entries = Some(entries_path);
    }

    if let Some(externals) = &result.externals {
        let externals_path = base.with_extension("ext");
        fs.write_string(&externals_path, externals)
            .with_context(|| format!("failed to write externals file: {}", externals_path.display()))?;
        written.externals = Some(externals_path);
    }

    Ok(AssembleOutcome::Emitted {
        written,
        warnings: diagnostics.warnings,
    })
}

/// Removes every artifact that might have been partially written for
/// `base` before returning a failure: a file either gets all of its
/// output or none of it.
fn cleanup<FS: FileWriter>(fs: &FS, base: &Path, expanded_path: &Path) {
    let _ = fs.remove_file(expanded_path);
    for ext in ["ob", "ent", "ext"] {
        let _ = fs.remove_file(&base.with_extension(ext));
    }
}

/// Assembles every `base` in turn, printing diagnostics to `stderr`
/// style output via the returned per-file results. The caller (the CLI)
/// decides the process exit status from whether every file emitted
/// cleanly.
pub fn assemble_all<FS: FileReader + FileWriter>(
    bases: &[PathBuf],
    fs: &FS,
) -> Vec<(PathBuf, Result<AssembleOutcome>)> {
    bases
        .iter()
        .map(|base| (base.clone(), assemble_file(base, fs)))
        .collect()
}

pub fn format_error(err: &AssemblyError) -> String {
    err.to_string()
}

pub fn internal_error(reason: impl Into<String>) -> AssemblyErrorKind {
    AssemblyErrorKind::Internal { reason: reason.into() }
}
