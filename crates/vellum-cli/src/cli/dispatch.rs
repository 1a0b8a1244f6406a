//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! This module contains:
//! - `*Params` structs that mirror command `*Args` but are populated from clap
//! - `from_matches()` extractors that pull relevant fields (ignoring hidden ones)
//! - `Into<*Args>` impls to bridge dispatch → command handlers

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::ast::AstArgs;
use crate::commands::check::CheckArgs;
use crate::commands::infer::InferArgs;
use crate::commands::render::RenderArgs;
use crate::commands::template_loader::TemplateInput;
use crate::commands::vars::VarsArgs;

/// Template input flags, common to every command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputParams {
    pub template_path: Option<PathBuf>,
    pub fragments: Vec<String>,
    pub declare: Vec<String>,
    pub fuel: u32,
}

impl InputParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            template_path: m.get_one::<PathBuf>("template_path").cloned(),
            fragments: get_many(m, "fragments"),
            declare: get_many(m, "declare"),
            fuel: m.get_one::<u32>("fuel").copied().unwrap_or(1_000_000),
        }
    }
}

impl From<InputParams> for TemplateInput {
    fn from(p: InputParams) -> Self {
        Self {
            path: p.template_path,
            fragments: p.fragments,
            declare: p.declare,
            exec_fuel: p.fuel,
        }
    }
}

pub struct AstParams {
    pub input: InputParams,
    pub raw: bool,
    pub color: ColorChoice,
}

impl AstParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: InputParams::from_matches(m),
            raw: m.get_flag("raw"),
            color: parse_color(m),
        }
    }
}

impl From<AstParams> for AstArgs {
    fn from(p: AstParams) -> Self {
        Self {
            input: p.input.into(),
            raw: p.raw,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub input: InputParams,
    pub strict: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: InputParams::from_matches(m),
            strict: m.get_flag("strict"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            input: p.input.into(),
            strict: p.strict,
            color: p.color.should_colorize(),
        }
    }
}

pub struct InferParams {
    pub input: InputParams,
    pub json: bool,
    pub depths: bool,
    pub compact: bool,
    pub color: ColorChoice,
    // Note: data, shape, trace are parsed but not extracted (unified flags)
}

impl InferParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: InputParams::from_matches(m),
            json: m.get_flag("json"),
            depths: m.get_flag("depths"),
            compact: m.get_flag("compact"),
            color: parse_color(m),
        }
    }
}

impl From<InferParams> for InferArgs {
    fn from(p: InferParams) -> Self {
        Self {
            input: p.input.into(),
            json: p.json,
            depths: p.depths,
            compact: p.compact,
            color: p.color.should_colorize(),
        }
    }
}

pub struct VarsParams {
    pub input: InputParams,
    pub instructions: bool,
    pub color: ColorChoice,
}

impl VarsParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: InputParams::from_matches(m),
            instructions: m.get_flag("instructions"),
            color: parse_color(m),
        }
    }
}

impl From<VarsParams> for VarsArgs {
    fn from(p: VarsParams) -> Self {
        Self {
            input: p.input.into(),
            instructions: p.instructions,
            color: p.color.should_colorize(),
        }
    }
}

pub struct RenderParams {
    pub input: InputParams,
    pub data_path: Option<PathBuf>,
    pub shape_path: Option<PathBuf>,
    pub trace: bool,
    pub compact: bool,
    pub color: ColorChoice,
}

impl RenderParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: InputParams::from_matches(m),
            data_path: m.get_one::<PathBuf>("data").cloned(),
            shape_path: m.get_one::<PathBuf>("shape").cloned(),
            trace: m.get_flag("trace"),
            compact: m.get_flag("compact"),
            color: parse_color(m),
        }
    }
}

impl From<RenderParams> for RenderArgs {
    fn from(p: RenderParams) -> Self {
        Self {
            input: p.input.into(),
            data_path: p.data_path,
            shape_path: p.shape_path,
            trace: p.trace,
            compact: p.compact,
            color: p.color.should_colorize(),
        }
    }
}

fn get_many(m: &ArgMatches, id: &str) -> Vec<String> {
    m.get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
