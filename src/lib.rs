//! Logic-less mustache-style templates for Rust
//!
//! Tags are looked up in a chain of [`View`]s, innermost first:
//!
//! * `{{name}}` prints a value, or calls a callable member with no argument
//! * `{{#name}}..{{/name}}` renders its body once per list element, once with
//!   an object pushed as the new scope, once for any other truthy value, or
//!   hands the rendered body to a callable member
//! * `{{^name}}..{{/name}}` renders its body only for absent, `false` or empty
//!   values
//! * `{{this}}` is the current scope, `{{parent}}` the one below it
//! * `{{a.b}}` looks up `b` only; the leading segments are ignored
//!
//! ## Example
//! ```rust
//! use stache::View;
//!
//! let view = View::from_serialize(&serde_json::json!({ "list": ["One", "Two"] })).unwrap();
//! let output = stache::render("{{#list}}<{{this}}>{{/list}}", view);
//! assert_eq!(&output.unwrap(), "<One><Two>");
//! ```
mod exec;
mod lexer;
mod parse;
mod scope;
mod utils;
pub mod error;
pub mod template;
pub mod value;

pub use error::TemplateError;
pub use template::Template;
pub use value::{Func, Function, Object, View};

/// Renders `template_str` once against `view`.
pub fn render<T: Into<View>>(template_str: &str, view: T) -> Result<String, TemplateError> {
    Template::new(template_str).render(&view.into())
}
