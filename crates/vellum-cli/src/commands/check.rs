use super::template_loader::{TemplateInput, build_template};

pub struct CheckArgs {
    pub input: TemplateInput,
    pub strict: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let template = build_template(&args.input, args.color);
    let diagnostics = template.diagnostics();

    if diagnostics.has_warnings() {
        eprint!(
            "{}",
            diagnostics.render_colored(template.source_map(), args.color)
        );
        if args.strict {
            std::process::exit(1);
        }
    }

    // Silent on success (like cargo check)
}
