// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use clap::Parser;
use log::{info, warn};
use miette::{Context, IntoDiagnostic};
use qirx::{Function, Target, export_block, parse_functions, select_block};
use std::{fmt::Write, fs, path::PathBuf};

/// Exports a basic block of a QIR program as OpenQASM 2.0 or as a circuit.
#[derive(Debug, Parser)]
#[command(name = "qirx", version, arg_required_else_help(true))]
struct Cli {
    /// QIR program in textual LLVM IR form.
    input: PathBuf,

    /// Function containing the block. Defaults to the first function.
    #[arg(long)]
    function: Option<String>,

    /// Label of the block. Defaults to the entry block.
    #[arg(long)]
    block: Option<String>,

    #[arg(short, long, value_enum, default_value_t = Target::OpenQasm2)]
    target: Target,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,

    /// Write the result to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// List the functions and blocks of the program and exit.
    #[arg(long)]
    list: bool,
}

fn main() -> miette::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let text = fs::read_to_string(&cli.input)
        .into_diagnostic()
        .with_context(|| format!("could not read {}", cli.input.display()))?;
    let functions = parse_functions(&text)?;

    if cli.list {
        print!("{}", listing(&functions));
        return Ok(());
    }

    let block = select_block(&functions, cli.function.as_deref(), cli.block.as_deref())?;
    if !block.is_circuit_like() {
        warn!(
            "block `{}` contains instructions outside the quantum instruction set; they are exported as comments",
            block.name
        );
    }
    info!(
        "exporting block `{}` ({} instructions) as {:?}",
        block.name,
        block.instructions.len(),
        cli.target
    );

    let artifact = export_block(block, cli.target)?;
    let rendered = if cli.json {
        artifact.to_json()?
    } else {
        artifact.to_string()
    };

    match cli.output {
        Some(path) => fs::write(&path, rendered)
            .into_diagnostic()
            .with_context(|| format!("could not write {}", path.display()))?,
        None => println!("{rendered}"),
    }
    Ok(())
}

fn listing(functions: &[Function]) -> String {
    let mut out = String::new();
    for function in functions {
        writeln!(out, "{}", function.name).expect("writing to string should succeed");
        for block in &function.blocks {
            let marker = if block.is_circuit_like() { "" } else { " (classical)" };
            writeln!(
                out,
                "  {}: {} instruction(s){marker}",
                block.name,
                block.instructions.len()
            )
            .expect("writing to string should succeed");
        }
    }
    out
}
