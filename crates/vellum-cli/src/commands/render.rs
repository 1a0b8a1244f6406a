//! Render a JSON payload against a template's shape.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use vellum_lib::{Colors, PrintTracer, Renderer, SerializedShape, ShapeTree};

use super::template_loader::{TemplateInput, build_template};

pub struct RenderArgs {
    pub input: TemplateInput,
    pub data_path: Option<PathBuf>,
    pub shape_path: Option<PathBuf>,
    pub trace: bool,
    pub compact: bool,
    pub color: bool,
}

pub fn run(args: RenderArgs) {
    if let Err(msg) = validate(&args) {
        eprintln!("error: {}", msg);
        std::process::exit(1);
    }

    let shape = match &args.shape_path {
        Some(path) => load_shape(path).unwrap_or_else(|msg| {
            eprintln!("error: {}", msg);
            std::process::exit(1);
        }),
        None => build_template(&args.input, args.color).shape().clone(),
    };

    let Some(data_path) = args.data_path.as_deref() else {
        unreachable!("validation ensures data input exists")
    };
    let data = load_data(data_path).unwrap_or_else(|msg| {
        eprintln!("error: {}", msg);
        std::process::exit(1);
    });

    let result = if args.trace {
        let mut renderer =
            Renderer::new(&shape).with_tracer(PrintTracer::new(Colors::new(args.color)));
        let result = renderer.render(&data);
        renderer.tracer().print();
        result
    } else {
        Renderer::new(&shape).render(&data)
    };

    let value = result.unwrap_or_else(|e| {
        eprintln!("error: {}", e);
        std::process::exit(1);
    });

    let output = if args.compact {
        serde_json::to_string(&value)
    } else {
        serde_json::to_string_pretty(&value)
    };

    match output {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("error: JSON serialization failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn validate(args: &RenderArgs) -> Result<(), &'static str> {
    let Some(data_path) = &args.data_path else {
        return Err("data is required: use -d/--data");
    };

    let has_template = args.input.path.is_some() || !args.input.fragments.is_empty();
    if args.shape_path.is_none() && !has_template {
        return Err("template is required: use a positional argument, -q/--fragment, or --shape");
    }

    let template_from_stdin = args.shape_path.is_none()
        && args.input.fragments.is_empty()
        && args.input.path.as_deref().is_some_and(is_stdin);
    let shape_from_stdin = args.shape_path.as_deref().is_some_and(is_stdin);
    if is_stdin(data_path) && (template_from_stdin || shape_from_stdin) {
        return Err("cannot read both the template and the data from stdin");
    }

    Ok(())
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

fn read_input(path: &Path) -> Result<String, String> {
    if is_stdin(path) {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| format!("failed to read stdin: {}", e))?;
        return Ok(buf);
    }
    fs::read_to_string(path).map_err(|e| format!("failed to read '{}': {}", path.display(), e))
}

fn load_data(path: &Path) -> Result<serde_json::Value, String> {
    let text = read_input(path)?;
    serde_json::from_str(&text)
        .map_err(|e| format!("invalid JSON in '{}': {}", path.display(), e))
}

fn load_shape(path: &Path) -> Result<ShapeTree, String> {
    let text = read_input(path)?;
    let shape: SerializedShape = serde_json::from_str(&text)
        .map_err(|e| format!("invalid shape in '{}': {}", path.display(), e))?;
    shape
        .to_tree()
        .ok_or_else(|| format!("shape in '{}' must have a module at the top", path.display()))
}
