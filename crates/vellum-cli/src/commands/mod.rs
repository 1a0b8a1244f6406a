pub mod ast;
pub mod check;
pub mod infer;
pub mod render;
pub mod template_loader;
pub mod vars;
