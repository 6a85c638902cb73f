use std::borrow::Cow;

use tracing::trace;

use crate::value::View;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reserved {
    This,
    Parent,
}

fn reserved(key: &str) -> Option<Reserved> {
    match key {
        "this" => Some(Reserved::This),
        "parent" => Some(Reserved::Parent),
        _ => None,
    }
}

/// Chain of views used for name lookups, innermost first.
///
/// Every level borrows the level below it, so a pushed scope only exists for
/// the duration of the call that pushed it and siblings never see it.
#[derive(Debug, Clone, Copy)]
pub struct Scope<'a> {
    view: &'a View,
    parent: Option<&'a Scope<'a>>,
}

impl<'a> Scope<'a> {
    pub fn root(view: &'a View) -> Scope<'a> {
        Scope { view, parent: None }
    }

    pub fn push<'b>(&'b self, view: &'b View) -> Scope<'b> {
        Scope {
            view,
            parent: Some(self),
        }
    }

    /// The innermost view.
    pub fn view(&self) -> &'a View {
        self.view
    }

    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut scope = self;
        while let Some(parent) = scope.parent {
            depth += 1;
            scope = parent;
        }
        depth
    }
}

/// Outcome of a lookup.
#[derive(Debug)]
pub struct Resolved<'a> {
    pub value: Cow<'a, View>,
    /// Scope a section opened by this name renders against before the value
    /// itself is pushed. Differs from the lookup scope only for `parent`.
    pub scope: &'a Scope<'a>,
}

/// Lookup key of a possibly dotted path: its last segment.
pub fn lookup_key(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

/// Resolves `key` against the innermost scope only.
///
/// `this` is the innermost view, `parent` drops one level and yields the view
/// below. Unknown names are `NoValue`.
pub fn resolve<'a>(key: &str, scope: &'a Scope<'a>) -> Resolved<'a> {
    let resolved = match reserved(key) {
        Some(Reserved::This) => Resolved {
            value: Cow::Borrowed(scope.view),
            scope,
        },
        Some(Reserved::Parent) => match scope.parent {
            Some(parent) => Resolved {
                value: Cow::Borrowed(parent.view),
                scope: parent,
            },
            None => Resolved {
                value: Cow::Owned(View::NoValue),
                scope,
            },
        },
        None => Resolved {
            value: field(scope.view, key).unwrap_or(Cow::Owned(View::NoValue)),
            scope,
        },
    };
    trace!(key, depth = scope.depth(), found = !resolved.value.is_no_value(), "resolved");
    resolved
}

fn field<'a>(view: &'a View, key: &str) -> Option<Cow<'a, View>> {
    match *view {
        View::Map(ref m) => m.get(key).map(Cow::Borrowed),
        View::Array(ref a) => key
            .parse::<usize>()
            .ok()
            .and_then(|i| a.get(i))
            .map(Cow::Borrowed),
        View::Object(ref o) => o.field(key).map(Cow::Owned),
        _ => None,
    }
}

/// Whether `view` has a method or a callable field called `key`.
pub fn is_callable(view: &View, key: &str) -> bool {
    match *view {
        View::Map(ref m) => matches!(m.get(key), Some(View::Function(_))),
        View::Object(ref o) => {
            o.has_method(key) || matches!(o.field(key), Some(View::Function(_)))
        }
        _ => false,
    }
}

/// Calls the member `key` of `view`, preferring methods over callable fields.
pub fn invoke(view: &View, key: &str, arg: Option<&str>) -> View {
    match *view {
        View::Map(ref m) => match m.get(key) {
            Some(View::Function(f)) => f.call(arg),
            _ => View::NoValue,
        },
        View::Object(ref o) if o.has_method(key) => o.call_method(key, arg),
        View::Object(ref o) => match o.field(key) {
            Some(View::Function(f)) => f.call(arg),
            _ => View::NoValue,
        },
        _ => View::NoValue,
    }
}
