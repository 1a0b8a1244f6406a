mod cli;
mod commands;

use cli::{AstParams, CheckParams, InferParams, RenderParams, VarsParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("ast", m)) => {
            let params = AstParams::from_matches(m);
            commands::ast::run(params.into());
        }
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into());
        }
        Some(("infer", m)) => {
            let params = InferParams::from_matches(m);
            commands::infer::run(params.into());
        }
        Some(("vars", m)) => {
            let params = VarsParams::from_matches(m);
            commands::vars::run(params.into());
        }
        Some(("render", m)) => {
            let params = RenderParams::from_matches(m);
            commands::render::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
