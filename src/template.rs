use tracing::instrument;

use crate::error::TemplateError;
use crate::exec::{Origin, State};
use crate::scope::Scope;
use crate::value::View;

static DEFAULT_NAME: &str = "template";

/// A template ready to be rendered any number of times.
///
/// Nothing is cached between renders: every call scans the text again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: String,
    text: String,
}

impl Template {
    pub fn new(text: impl Into<String>) -> Template {
        Template {
            name: DEFAULT_NAME.to_owned(),
            text: text.into(),
        }
    }

    /// Sets the name reported in tracing spans.
    pub fn with_name(mut self, name: impl Into<String>) -> Template {
        self.name = name.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Renders the template with `view` as its outermost scope.
    #[instrument(level = "debug", skip_all, fields(name = %self.name))]
    pub fn render(&self, view: &View) -> Result<String, TemplateError> {
        let state = State::new(&self.text);
        state.expand(&self.text, Origin::Template(0), &Scope::root(view))
    }
}

impl From<&str> for Template {
    fn from(text: &str) -> Template {
        Template::new(text)
    }
}
