use crate::value::View;

/// How a resolved value behaves when it opens a section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Truth<'v> {
    /// Absent, `false` or an empty container: the section is skipped.
    Falsy,
    /// Any other leaf value, `0` and `""` included.
    Scalar,
    /// A non-empty sequence, rendered once per element.
    Sequence(&'v [View]),
    /// A map or object, pushed as the innermost scope.
    Scope,
}

pub fn classify(val: &View) -> Truth<'_> {
    match *val {
        View::NoValue | View::Bool(false) => Truth::Falsy,
        View::Array(ref a) if a.is_empty() => Truth::Falsy,
        View::Map(ref m) if m.is_empty() => Truth::Falsy,
        View::Array(ref a) => Truth::Sequence(a),
        View::Map(_) | View::Object(_) => Truth::Scope,
        View::Bool(true) | View::Number(_) | View::String(_) | View::Function(_) => Truth::Scalar,
    }
}

pub fn is_true(val: &View) -> bool {
    classify(val) != Truth::Falsy
}
