//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.
//! The same arg definition is reused across commands, hidden with
//! `.hide(true)` where a command accepts but ignores it.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Template file, directory of `.vel` files, or `-` for stdin (positional).
pub fn template_path_arg() -> Arg {
    Arg::new("template_path")
        .value_name("TEMPLATE")
        .value_parser(value_parser!(PathBuf))
        .help("Template file, directory of .vel files, or - for stdin")
}

/// Inline fragment text (-q/--fragment), repeatable.
pub fn fragment_arg() -> Arg {
    Arg::new("fragments")
        .short('q')
        .long("fragment")
        .value_name("TEXT")
        .action(ArgAction::Append)
        .help("Inline fragment (repeatable, one source per fragment)")
}

/// Top-level names allowed in strict name resolution (--declare).
pub fn declare_arg() -> Arg {
    Arg::new("declare")
        .long("declare")
        .value_name("NAMES")
        .value_delimiter(',')
        .action(ArgAction::Append)
        .help("Only allow these top-level names (comma-separated, repeatable)")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Treat warnings as errors (--strict).
pub fn strict_arg() -> Arg {
    Arg::new("strict")
        .long("strict")
        .action(ArgAction::SetTrue)
        .help("Treat warnings as errors")
}

/// Print the CST instead of the AST (--raw).
pub fn raw_arg() -> Arg {
    Arg::new("raw")
        .long("raw")
        .action(ArgAction::SetTrue)
        .help("Print the lossless syntax tree, trivia included")
}

/// Output the shape as JSON (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Output the shape as JSON")
}

/// Show nesting depths in the shape dump (--depths).
pub fn depths_arg() -> Arg {
    Arg::new("depths")
        .long("depths")
        .action(ArgAction::SetTrue)
        .help("Show the nesting depth of every non-empty node")
}

/// List loop headers instead of variables (--instructions).
pub fn instructions_arg() -> Arg {
    Arg::new("instructions")
        .long("instructions")
        .action(ArgAction::SetTrue)
        .help("List `for` loop headers instead of variable paths")
}

/// JSON payload to render (-d/--data).
pub fn data_arg() -> Arg {
    Arg::new("data")
        .short('d')
        .long("data")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("JSON data file, or - for stdin")
}

/// Previously saved shape (--shape), used instead of fragments.
pub fn shape_arg() -> Arg {
    Arg::new("shape")
        .long("shape")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Render against a shape saved with `infer --json`")
}

/// Print the render trace to stderr (--trace).
pub fn trace_arg() -> Arg {
    Arg::new("trace")
        .long("trace")
        .action(ArgAction::SetTrue)
        .help("Print a render trace to stderr")
}

/// Output compact JSON (--compact).
pub fn compact_arg() -> Arg {
    Arg::new("compact")
        .long("compact")
        .action(ArgAction::SetTrue)
        .help("Output compact JSON (default: pretty)")
}

/// Parser execution fuel limit (--fuel).
pub fn fuel_arg() -> Arg {
    Arg::new("fuel")
        .long("fuel")
        .value_name("N")
        .default_value("1000000")
        .value_parser(value_parser!(u32))
        .help("Parser execution fuel limit")
}
