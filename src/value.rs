//! The data a template is rendered against.
//!
//! A [`View`] is either a leaf value (`Bool`, `Number`, `String`), a container
//! (`Array`, `Map`), an application [`Object`] exposing fields and methods, or a
//! [`Function`] that templates can call.
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use itertools::Itertools;
use serde::Serialize;
use serde_json::Number;

/// Signature of callables stored in a [`View`].
///
/// Plain tags (`{{name}}`) call with `None`, sections (`{{#name}}..{{/name}}`)
/// call with the rendered section body.
pub type Func = dyn Fn(Option<&str>) -> View + Send + Sync;

/// A shareable callable.
#[derive(Clone)]
pub struct Function {
    f: Arc<Func>,
}

impl Function {
    pub fn new<F>(f: F) -> Function
    where
        F: Fn(Option<&str>) -> View + Send + Sync + 'static,
    {
        Function { f: Arc::new(f) }
    }

    pub fn call(&self, arg: Option<&str>) -> View {
        (self.f)(arg)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Function")
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Function) -> bool {
        Arc::ptr_eq(&self.f, &other.f)
    }
}

/// An application object usable as a scope.
///
/// Only `field` is required. Methods shadow callable fields of the same name.
pub trait Object: fmt::Debug + Send + Sync {
    /// Returns the field called `name`, if any.
    fn field(&self, name: &str) -> Option<View>;

    fn has_method(&self, _name: &str) -> bool {
        false
    }

    /// Invokes the method `name`. Only called when `has_method(name)` is true.
    fn call_method(&self, _name: &str, _arg: Option<&str>) -> View {
        View::NoValue
    }

    /// String conversion used when the object itself is printed by a tag.
    fn to_text(&self) -> Option<String> {
        None
    }
}

#[derive(Clone, Debug)]
pub enum View {
    NoValue,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<View>),
    Map(HashMap<String, View>),
    Object(Arc<dyn Object>),
    Function(Function),
}

impl View {
    pub fn object<O: Object + 'static>(o: O) -> View {
        View::Object(Arc::new(o))
    }

    pub fn func<F>(f: F) -> View
    where
        F: Fn(Option<&str>) -> View + Send + Sync + 'static,
    {
        View::Function(Function::new(f))
    }

    /// Builds a view from anything serde can serialize.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<View> {
        serde_json::to_value(value).map(View::from)
    }

    pub fn is_no_value(&self) -> bool {
        matches!(*self, View::NoValue)
    }
}

impl Default for View {
    fn default() -> View {
        View::NoValue
    }
}

impl PartialEq for View {
    fn eq(&self, other: &View) -> bool {
        match (self, other) {
            (View::NoValue, View::NoValue) => true,
            (View::Bool(a), View::Bool(b)) => a == b,
            (View::Number(a), View::Number(b)) => a == b,
            (View::String(a), View::String(b)) => a == b,
            (View::Array(a), View::Array(b)) => a == b,
            (View::Map(a), View::Map(b)) => a == b,
            (View::Object(a), View::Object(b)) => Arc::ptr_eq(a, b),
            (View::Function(a), View::Function(b)) => a == b,
            _ => false,
        }
    }
}

/// Text a value contributes to the output when printed by a plain tag.
impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            View::NoValue | View::Bool(false) | View::Map(_) | View::Function(_) => Ok(()),
            View::Bool(true) => write!(f, "true"),
            View::Number(ref n) => write!(f, "{}", n),
            View::String(ref s) => write!(f, "{}", s),
            View::Array(ref a) => write!(f, "{}", a.iter().join(",")),
            View::Object(ref o) => match o.to_text() {
                Some(text) => write!(f, "{}", text),
                None => Ok(()),
            },
        }
    }
}

macro_rules! from_number {
    ($($typ:ty),*) => {
        $(
            impl From<$typ> for View {
                fn from(n: $typ) -> Self {
                    View::Number(Number::from(n))
                }
            }
        )*
    }
}

from_number!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl From<f64> for View {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map_or(View::NoValue, View::Number)
    }
}

impl From<f32> for View {
    fn from(n: f32) -> Self {
        View::from(f64::from(n))
    }
}

impl From<bool> for View {
    fn from(b: bool) -> Self {
        View::Bool(b)
    }
}

impl From<String> for View {
    fn from(s: String) -> Self {
        View::String(s)
    }
}

impl From<&str> for View {
    fn from(s: &str) -> Self {
        View::String(s.to_owned())
    }
}

impl From<Function> for View {
    fn from(f: Function) -> Self {
        View::Function(f)
    }
}

impl From<Arc<dyn Object>> for View {
    fn from(o: Arc<dyn Object>) -> Self {
        View::Object(o)
    }
}

impl<T: Into<View>> From<Option<T>> for View {
    fn from(o: Option<T>) -> Self {
        o.map_or(View::NoValue, Into::into)
    }
}

impl<T: Into<View>> From<Vec<T>> for View {
    fn from(v: Vec<T>) -> Self {
        View::Array(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<View>> From<HashMap<String, T>> for View {
    fn from(m: HashMap<String, T>) -> Self {
        View::Map(m.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl<T: Into<View>> From<BTreeMap<String, T>> for View {
    fn from(m: BTreeMap<String, T>) -> Self {
        View::Map(m.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl From<serde_json::Value> for View {
    fn from(v: serde_json::Value) -> Self {
        use serde_json::Value;
        match v {
            Value::Null => View::NoValue,
            Value::Bool(b) => View::Bool(b),
            Value::Number(n) => View::Number(n),
            Value::String(s) => View::String(s),
            Value::Array(a) => View::Array(a.into_iter().map(View::from).collect()),
            Value::Object(o) => View::Map(o.into_iter().map(|(k, v)| (k, View::from(v))).collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[test]
    fn test_display() {
        assert_eq!(View::NoValue.to_string(), "");
        assert_eq!(View::from(false).to_string(), "");
        assert_eq!(View::from(true).to_string(), "true");
        assert_eq!(View::from(0).to_string(), "0");
        assert_eq!(View::from(2.5).to_string(), "2.5");
        assert_eq!(View::from("foo").to_string(), "foo");
        assert_eq!(View::from(vec![1, 2, 3]).to_string(), "1,2,3");
        assert_eq!(View::func(|_| View::from("x")).to_string(), "");
    }

    #[test]
    fn test_from_option() {
        assert_eq!(View::from(None::<u8>), View::NoValue);
        assert_eq!(View::from(Some("a")), View::from("a"));
    }

    #[test]
    fn test_non_finite_float() {
        assert!(View::from(f64::NAN).is_no_value());
    }

    #[test]
    fn test_from_serialize() {
        #[derive(Serialize)]
        struct Foo {
            foo: u8,
            bar: Vec<&'static str>,
            baz: Option<bool>,
        }
        let view = View::from_serialize(&Foo {
            foo: 1,
            bar: vec!["a"],
            baz: None,
        })
        .unwrap();
        let mut map = HashMap::new();
        map.insert("foo".to_owned(), View::from(1u8));
        map.insert("bar".to_owned(), View::from(vec!["a"]));
        map.insert("baz".to_owned(), View::NoValue);
        assert_eq!(view, View::Map(map));
    }

    #[test]
    fn test_function_eq() {
        let f = Function::new(|arg| View::from(arg.unwrap_or_default()));
        let g = f.clone();
        assert_eq!(f, g);
        assert_eq!(f.call(Some("hi")), View::from("hi"));
        assert_ne!(f, Function::new(|_| View::NoValue));
    }
}
