//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.
//! Every command accepts the render flags so that a command line can be
//! switched between subcommands unchanged; commands that don't render hide
//! and ignore them.

use clap::Command;

use super::args::*;

/// Template input args shared by every command.
fn with_template_args(cmd: Command) -> Command {
    cmd.arg(template_path_arg())
        .arg(fragment_arg())
        .arg(declare_arg())
        .arg(fuel_arg())
        .arg(color_arg())
}

/// Add hidden render args (for commands that don't render).
fn with_hidden_render_args(cmd: Command) -> Command {
    cmd.arg(data_arg().hide(true))
        .arg(shape_arg().hide(true))
        .arg(trace_arg().hide(true))
        .arg(compact_arg().hide(true))
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("vellum")
        .about("Shape inference and rendering for template fragments")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(ast_command())
        .subcommand(check_command())
        .subcommand(infer_command())
        .subcommand(vars_command())
        .subcommand(render_command())
}

/// Show the syntax tree of every fragment.
pub fn ast_command() -> Command {
    let cmd = Command::new("ast")
        .about("Show the syntax tree of every fragment")
        .override_usage(
            "\
  vellum ast <TEMPLATE>
  vellum ast -q <TEXT>...",
        )
        .after_help(
            r#"EXAMPLES:
  vellum ast invoice.vel              # typed AST
  vellum ast invoice.vel --raw        # lossless CST with trivia
  vellum ast -q 'doc.total'           # inline fragment"#,
        )
        .arg(raw_arg());

    with_hidden_render_args(with_template_args(cmd))
}

/// Validate a template.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate a template")
        .override_usage(
            "\
  vellum check <TEMPLATE>
  vellum check -q <TEXT>...",
        )
        .after_help(
            r#"EXAMPLES:
  vellum check invoice.vel                  # single file
  vellum check templates/                   # every .vel file in a directory
  vellum check -q 'doc.total' --declare doc # strict name resolution"#,
        )
        .arg(strict_arg());

    with_hidden_render_args(with_template_args(cmd))
}

/// Print the inferred data shape.
pub fn infer_command() -> Command {
    let cmd = Command::new("infer")
        .about("Print the data shape a template reads")
        .override_usage(
            "\
  vellum infer <TEMPLATE> [--json]
  vellum infer -q <TEXT>... [--json]",
        )
        .after_help(
            r#"EXAMPLES:
  vellum infer invoice.vel                  # indented dump
  vellum infer invoice.vel --depths         # with nesting depths
  vellum infer invoice.vel --json > shape.json"#,
        )
        .arg(json_arg())
        .arg(depths_arg())
        .arg(compact_arg());

    with_template_args(
        cmd.arg(data_arg().hide(true))
            .arg(shape_arg().hide(true))
            .arg(trace_arg().hide(true)),
    )
}

/// List the data paths a template reads.
pub fn vars_command() -> Command {
    let cmd = Command::new("vars")
        .about("List the data paths a template reads")
        .override_usage(
            "\
  vellum vars <TEMPLATE> [--instructions]
  vellum vars -q <TEXT>...",
        )
        .after_help(
            r#"EXAMPLES:
  vellum vars invoice.vel                   # e.g. invoice.lines.amount
  vellum vars invoice.vel --instructions    # e.g. for line in invoice.lines"#,
        )
        .arg(instructions_arg());

    with_hidden_render_args(with_template_args(cmd))
}

/// Render JSON data against the template's shape.
pub fn render_command() -> Command {
    let cmd = Command::new("render")
        .about("Keep only the parts of a JSON payload the template reads")
        .override_usage(
            "\
  vellum render <TEMPLATE> -d <FILE>
  vellum render -q <TEXT>... -d <FILE>
  vellum render --shape <FILE> -d <FILE>",
        )
        .after_help(
            r#"EXAMPLES:
  vellum render invoice.vel -d data.json           # pretty JSON
  vellum render invoice.vel -d data.json --compact # single line
  vellum render invoice.vel -d - --trace < data.json
  vellum render --shape shape.json -d data.json    # skip inference"#,
        )
        .arg(data_arg())
        .arg(shape_arg())
        .arg(trace_arg())
        .arg(compact_arg());

    with_template_args(cmd)
}
