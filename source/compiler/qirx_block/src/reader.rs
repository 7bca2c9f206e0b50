// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Reads function bodies out of textual LLVM IR.
//!
//! Only what the exporters need is recognized: function definitions, block
//! labels, call instructions with their operands, and the output binding of
//! any other instruction. Declarations, attributes and metadata outside a
//! function body are ignored; terminators are skipped.


use crate::block::{Block, Function, Instruction, Operand};
use log::trace;
use miette::Diagnostic;
use regex_lite::Regex;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Clone, Debug, Diagnostic, Error, PartialEq)]
pub enum Error {
    #[error("function `{0}` is missing its closing brace")]
    #[diagnostic(code("Qirx.Reader.UnterminatedFunction"))]
    UnterminatedFunction(String),
    #[error("malformed call instruction on line {line}: {text}")]
    #[diagnostic(code("Qirx.Reader.MalformedCall"))]
    #[diagnostic(help("calls are expected in the form `call <type> @<name>(<args>)`"))]
    MalformedCall { line: usize, text: String },
    #[error("malformed instruction on line {line}: {text}")]
    #[diagnostic(code("Qirx.Reader.MalformedInstruction"))]
    MalformedInstruction { line: usize, text: String },
}

static DEFINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^define\b[^@]*@("[^"]+"|[\w.$-]+)\s*\("#).expect("define regex should be valid")
});

static LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\w.$-]+):$").expect("label regex should be valid"));

static CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:%([\w.$-]+)\s*=\s*)?(?:(?:tail|musttail|notail)\s+)?call\s+[^@]*@([\w.$-]+)\s*\((.*)\)[^)]*$")
        .expect("call regex should be valid")
});

static INSTRUCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:%([\w.$-]+)\s*=\s*)?([a-z][\w]*)\b\s*(.*)$")
        .expect("instruction regex should be valid")
});

static INTTOPTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^inttoptr\s*\(\s*i64\s+(\d+)\s+to\s+[^)]*\)$")
        .expect("inttoptr regex should be valid")
});

const TERMINATORS: &[&str] = &["br", "ret", "switch", "unreachable", "indirectbr", "resume"];

/// Name given to a function's first block when it has no label.
const IMPLICIT_ENTRY: &str = "0";

/// Parses every function definition in `text`, in source order.
pub fn parse_functions(text: &str) -> Result<Vec<Function>, Error> {
    let mut functions = Vec::new();
    let mut current: Option<Function> = None;
    let mut in_switch_table = false;

    for (idx, raw_line) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = strip_comment(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        let Some(function) = current.as_mut() else {
            if let Some(captures) = DEFINE.captures(line) {
                current = Some(Function {
                    name: captures[1].trim_matches('"').to_string(),
                    blocks: Vec::new(),
                });
            }
            continue;
        };

        if in_switch_table {
            in_switch_table = !line.contains(']');
            continue;
        }

        if line == "}" {
            functions.extend(current.take());
            continue;
        }

        if let Some(captures) = LABEL.captures(line) {
            function.blocks.push(Block::new(&captures[1], Vec::new()));
            continue;
        }

        let first_word = line.split_whitespace().next().unwrap_or_default();
        if TERMINATORS.contains(&first_word) {
            trace!("skipping terminator on line {line_no}: {line}");
            in_switch_table = first_word == "switch" && line.contains('[') && !line.contains(']');
            continue;
        }

        let instruction = parse_instruction(line, line_no)?;
        if function.blocks.is_empty() {
            function.blocks.push(Block::new(IMPLICIT_ENTRY, Vec::new()));
        }
        if let Some(block) = function.blocks.last_mut() {
            block.instructions.push(instruction);
        }
    }

    match current {
        Some(function) => Err(Error::UnterminatedFunction(function.name)),
        None => Ok(functions),
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find(';') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn parse_instruction(line: &str, line_no: usize) -> Result<Instruction, Error> {
    if line.contains("call ") {
        let captures = CALL.captures(line).ok_or_else(|| Error::MalformedCall {
            line: line_no,
            text: line.to_string(),
        })?;
        let operands = split_top_level(&captures[3])
            .into_iter()
            .map(parse_operand)
            .collect();
        return Ok(Instruction {
            opcode: captures[2].to_string(),
            operands,
            output: captures.get(1).map(|m| m.as_str().to_string()),
        });
    }

    let captures = INSTRUCTION
        .captures(line)
        .ok_or_else(|| Error::MalformedInstruction {
            line: line_no,
            text: line.to_string(),
        })?;
    let operands = split_top_level(&captures[3])
        .into_iter()
        .map(parse_operand)
        .collect();
    Ok(Instruction {
        opcode: captures[2].to_string(),
        operands,
        output: captures.get(1).map(|m| m.as_str().to_string()),
    })
}

/// Splits an argument list on commas that are not nested in brackets.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (pos, c) in text.char_indices() {
        match c {
            '(' | '[' | '{' | '<' => depth += 1,
            ')' | ']' | '}' | '>' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(text[start..pos].trim());
                start = pos + 1;
            }
            _ => {}
        }
    }
    let last = text[start..].trim();
    if !last.is_empty() {
        parts.push(last);
    }
    parts
}

fn parse_operand(text: &str) -> Operand {
    let Some((ty, value)) = text.split_once(char::is_whitespace) else {
        return parse_untyped(text);
    };
    let value = value.trim();
    match ty {
        "%Qubit*" => Operand::Qubit(pointer_id(value)),
        "%Result*" => Operand::Result(pointer_id(value)),
        "ptr" => Operand::Pointer(pointer_id(value)),
        "i1" => match value {
            "true" => Operand::Bool(true),
            "false" => Operand::Bool(false),
            _ => variable_or_raw(value, text),
        },
        "double" | "float" => value
            .parse()
            .map_or_else(|_| variable_or_raw(value, text), Operand::Double),
        _ if is_integer_type(ty) => value
            .parse()
            .map_or_else(|_| variable_or_raw(value, text), Operand::Integer),
        _ => Operand::Raw(text.to_string()),
    }
}

fn parse_untyped(text: &str) -> Operand {
    match text {
        "true" => Operand::Bool(true),
        "false" => Operand::Bool(false),
        _ => {
            if let Ok(i) = text.parse() {
                Operand::Integer(i)
            } else if let Ok(d) = text.parse() {
                Operand::Double(d)
            } else {
                variable_or_raw(text, text)
            }
        }
    }
}

fn variable_or_raw(value: &str, text: &str) -> Operand {
    match value.strip_prefix('%') {
        Some(name) if !name.is_empty() => Operand::Variable(name.to_string()),
        _ => Operand::Raw(text.to_string()),
    }
}

fn is_integer_type(ty: &str) -> bool {
    ty.strip_prefix('i')
        .is_some_and(|width| !width.is_empty() && width.bytes().all(|b| b.is_ascii_digit()))
}

/// The identity of a pointer constant: `null` is 0 and `inttoptr (i64 N to ...)` is N.
fn pointer_id(value: &str) -> Option<u64> {
    if value == "null" {
        return Some(0);
    }
    INTTOPTR
        .captures(value)
        .and_then(|captures| captures[1].parse().ok())
}
