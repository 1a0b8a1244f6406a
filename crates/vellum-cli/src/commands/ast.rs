//! Show the syntax tree of every fragment.

use vellum_lib::Diagnostics;
use vellum_lib::parser::{SyntaxPrinter, parse};

use super::template_loader::{TemplateInput, load_or_exit};

pub struct AstArgs {
    pub input: TemplateInput,
    pub raw: bool,
    pub color: bool,
}

pub fn run(args: AstArgs) {
    let sources = load_or_exit(&args.input);

    if sources.is_empty() {
        eprintln!("error: template cannot be empty");
        std::process::exit(1);
    }

    let show_headers = sources.len() > 1;
    let mut diagnostics = Diagnostics::new();

    for (i, source) in sources.iter().enumerate() {
        let parsed = match parse(source.as_str(), source.id) {
            Ok(parsed) => parsed,
            Err(e) => {
                eprintln!("error: {}: {}", source.kind.display_name(), e);
                std::process::exit(1);
            }
        };

        if show_headers {
            if i > 0 {
                println!();
            }
            println!("# {}", source.kind.display_name());
        }

        // Print AST (or CST if --raw)
        let printer = SyntaxPrinter::new(&parsed.root)
            .raw(args.raw)
            .with_trivia(args.raw);
        print!("{}", printer.dump());

        diagnostics.extend(parsed.diagnostics);
    }

    // Trees of broken fragments are still printed; their errors follow
    if !diagnostics.is_empty() {
        eprint!("{}", diagnostics.render_colored(&sources, args.color));
    }
}
