//! Print the data shape a template reads.

use vellum_lib::SerializedShape;

use super::template_loader::{TemplateInput, build_template};

pub struct InferArgs {
    pub input: TemplateInput,
    pub json: bool,
    pub depths: bool,
    pub compact: bool,
    pub color: bool,
}

pub fn run(args: InferArgs) {
    let template = build_template(&args.input, args.color);

    if template.diagnostics().has_warnings() {
        eprint!(
            "{}",
            template
                .diagnostics()
                .render_colored(template.source_map(), args.color)
        );
    }

    if !args.json {
        let output = template
            .shape()
            .printer()
            .colored(args.color)
            .with_depths(args.depths)
            .dump();
        print!("{}", output);
        return;
    }

    let shape = SerializedShape::from_tree(template.shape(), template.shape().root());
    let output = if args.compact {
        serde_json::to_string(&shape)
    } else {
        serde_json::to_string_pretty(&shape)
    };

    match output {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("error: JSON serialization failed: {}", e);
            std::process::exit(1);
        }
    }
}
