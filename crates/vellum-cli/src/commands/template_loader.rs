use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use vellum_core::utils::is_identifier;
use vellum_lib::{SourceMap, Template};

/// Template inputs shared by every command.
pub struct TemplateInput {
    pub path: Option<PathBuf>,
    pub fragments: Vec<String>,
    pub declare: Vec<String>,
    pub exec_fuel: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("template is required: use a positional argument or -q/--fragment")]
    Missing,

    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("no .vel files found in directory '{}'", .0.display())]
    EmptyDirectory(PathBuf),

    #[error("`{0}` is not a valid variable name")]
    BadDeclaredName(String),
}

pub fn load_template_sources(
    path: Option<&Path>,
    fragments: &[String],
) -> Result<SourceMap, LoadError> {
    if !fragments.is_empty() {
        let mut map = SourceMap::new();
        for fragment in fragments {
            map.add_inline(fragment);
        }
        return Ok(map);
    }

    let Some(path) = path else {
        return Err(LoadError::Missing);
    };

    if path.as_os_str() == "-" {
        return load_stdin();
    }
    if path.is_dir() {
        return load_directory(path);
    }
    load_file(path)
}

fn load_stdin() -> Result<SourceMap, LoadError> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(LoadError::Stdin)?;
    let mut map = SourceMap::new();
    map.add_stdin(&buf);
    Ok(map)
}

fn read(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn load_file(path: &Path) -> Result<SourceMap, LoadError> {
    let content = read(path)?;
    let mut map = SourceMap::new();
    map.add_file(&path.to_string_lossy(), &content);
    Ok(map)
}

fn load_directory(dir: &Path) -> Result<SourceMap, LoadError> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|source| LoadError::Read {
            path: dir.to_path_buf(),
            source,
        })?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "vel"))
        .collect();

    if paths.is_empty() {
        return Err(LoadError::EmptyDirectory(dir.to_path_buf()));
    }

    // Sort for deterministic ordering
    paths.sort();

    let mut map = SourceMap::new();
    for path in paths {
        let content = read(&path)?;
        map.add_file(&path.to_string_lossy(), &content);
    }
    Ok(map)
}

/// Checks `--declare` names before they reach the builder.
pub fn validate_declared(names: &[String]) -> Result<(), LoadError> {
    match names.iter().find(|name| !is_identifier(name)) {
        Some(bad) => Err(LoadError::BadDeclaredName(bad.clone())),
        None => Ok(()),
    }
}

/// Loads sources, or prints the failure and exits.
pub fn load_or_exit(input: &TemplateInput) -> SourceMap {
    let loaded = validate_declared(&input.declare)
        .and_then(|()| load_template_sources(input.path.as_deref(), &input.fragments));
    match loaded {
        Ok(map) => map,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Builds the template, printing diagnostics and exiting on failure.
pub fn build_template(input: &TemplateInput, color: bool) -> Template {
    let sources = load_or_exit(input);

    let mut builder = Template::builder(sources.clone()).with_exec_fuel(Some(input.exec_fuel));
    if !input.declare.is_empty() {
        builder = builder.declare(input.declare.iter().cloned());
    }

    match builder.build() {
        Ok(template) => template,
        Err(e) => {
            match e.diagnostics() {
                Some(diagnostics) => eprint!("{}", diagnostics.render_colored(&sources, color)),
                None => eprintln!("error: {}", e),
            }
            std::process::exit(1);
        }
    }
}
