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

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use asm12::file_reader::AsmFileSystem;
use asm12::{assemble_all, AssembleOutcome};
use clap::Parser as ClapParser;

#[derive(ClapParser)]
#[clap(version = "0.1.0", author = "Connor Nolan")]
struct Opts {
    /// Source file base names, without the `.as` extension.
    #[clap(required = true)]
    inputs: Vec<PathBuf>,
}

fn main() -> Result<ExitCode> {
    let opts = Opts::parse();
    let fs = AsmFileSystem;

    let results = assemble_all(&opts.inputs, &fs);
    let mut all_clean = true;

    for (base, outcome) in results {
        match outcome {
            Ok(AssembleOutcome::Emitted { written, warnings }) => {
                println!("assembled {}", base.display());
                if let Some(path) = &written.object {
                    println!("  wrote {}", path.display());
                }
                if let Some(path) = &written.entries {
                    println!("  wrote {}", path.display());
                }
                if let Some(path) = &written.externals {
                    println!("  wrote {}", path.display());
                }
                for warn in &warnings {
                    eprintln!("{warn}");
                }
            }
            Ok(AssembleOutcome::Failed { diagnostics }) => {
                all_clean = false;
                for err in &diagnostics.errors {
                    eprintln!("{err}");
                }
                for warn in &diagnostics.warnings {
                    eprintln!("{warn}");
                }
            }
            Err(e) => {
                all_clean = false;
                eprintln!("{}: {e:#}", base.display());
            }
        }
    }

    Ok(if all_clean {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
