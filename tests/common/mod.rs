#![allow(dead_code)]
use std::collections::HashMap;

use stache::{Object, Template, TemplateError, View};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}

pub fn render(template: &str, view: &View) -> Result<String, TemplateError> {
    init_tracing();
    Template::new(template).render(view)
}

/// Object with settable fields plus the methods `myMethod` and `exclaim`.
#[derive(Debug)]
pub struct TestView {
    pub fields: HashMap<String, View>,
    pub return_value: String,
    pub exclaim_adds: String,
}

impl Default for TestView {
    fn default() -> TestView {
        TestView {
            fields: HashMap::new(),
            return_value: "Derp".to_owned(),
            exclaim_adds: "?".to_owned(),
        }
    }
}

impl TestView {
    pub fn with(mut self, name: &str, value: impl Into<View>) -> TestView {
        self.fields.insert(name.to_owned(), value.into());
        self
    }

    pub fn returning(mut self, value: &str) -> TestView {
        self.return_value = value.to_owned();
        self
    }

    pub fn exclaiming(mut self, adds: &str) -> TestView {
        self.exclaim_adds = adds.to_owned();
        self
    }

    pub fn into_view(self) -> View {
        View::object(self)
    }
}

impl Object for TestView {
    fn field(&self, name: &str) -> Option<View> {
        self.fields.get(name).cloned()
    }

    fn has_method(&self, name: &str) -> bool {
        matches!(name, "myMethod" | "exclaim")
    }

    fn call_method(&self, name: &str, arg: Option<&str>) -> View {
        match name {
            "myMethod" => View::from(self.return_value.as_str()),
            "exclaim" => View::from(format!("{}{}", arg.unwrap_or_default(), self.exclaim_adds)),
            _ => View::NoValue,
        }
    }
}

pub fn upper() -> View {
    View::func(|arg| View::from(arg.unwrap_or_default().to_uppercase()))
}

pub fn lower() -> View {
    View::func(|arg| View::from(arg.unwrap_or_default().to_lowercase()))
}

pub fn map(pairs: Vec<(&str, View)>) -> View {
    View::Map(pairs.into_iter().map(|(k, v)| (k.to_owned(), v)).collect())
}
