//! List the data paths (or loop headers) of a template.

use super::template_loader::{TemplateInput, build_template};

pub struct VarsArgs {
    pub input: TemplateInput,
    pub instructions: bool,
    pub color: bool,
}

pub fn run(args: VarsArgs) {
    let template = build_template(&args.input, args.color);

    let lines = if args.instructions {
        template.instructions().to_vec()
    } else {
        template.user_variables()
    };

    for line in lines {
        println!("{}", line);
    }
}
