use std::borrow::Cow;

use tracing::{debug, trace};

use crate::error::TemplateError;
use crate::lexer::{next_tag, Sigil, Tag};
use crate::parse::{closing_tag_len, find_closing_tag};
use crate::scope::{invoke, is_callable, lookup_key, resolve, Scope};
use crate::utils::{classify, is_true, Truth};
use crate::value::View;

pub(crate) struct State<'t> {
    template: &'t str,
}

/// Where the text being expanded came from, for error positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Origin {
    /// A slice of the template starting at this byte.
    Template(usize),
    /// Text produced by substituting the tag at this template byte.
    Substituted(usize),
}

impl Origin {
    fn at(self, offset: usize) -> usize {
        match self {
            Origin::Template(base) => base + offset,
            Origin::Substituted(pos) => pos,
        }
    }

    fn shift(self, offset: usize) -> Origin {
        match self {
            Origin::Template(base) => Origin::Template(base + offset),
            substituted => substituted,
        }
    }
}

impl<'t> State<'t> {
    pub fn new(template: &'t str) -> State<'t> {
        State { template }
    }

    /// Renders `content` until no tag is left.
    ///
    /// Each step splices `before + replacement + expand(after)` and scans the
    /// result again, so tags produced by values or callables are rendered too.
    /// A value that reproduces its own tag never terminates.
    pub fn expand(
        &self,
        content: &str,
        origin: Origin,
        scope: &Scope<'_>,
    ) -> Result<String, TemplateError> {
        let mut content = Cow::Borrowed(content);
        let mut origin = origin;
        loop {
            let tag = match next_tag(&content) {
                Some(tag) => tag,
                None => return Ok(content.into_owned()),
            };
            trace!(tag = tag.text, pos = origin.at(tag.start), "tag");
            let (replacement, consumed) = match tag.sigil() {
                Sigil::None => (self.print(tag.path(), scope), tag.end),
                Sigil::Close => {
                    trace!(tag = tag.text, "closing tag without opener");
                    (String::new(), tag.end)
                }
                Sigil::Section | Sigil::Inverted => {
                    let body = self.body(&tag, &content, origin)?;
                    let body_origin = origin.shift(tag.end);
                    let replacement = if tag.sigil() == Sigil::Section {
                        self.section(tag.path(), body, body_origin, scope)?
                    } else {
                        self.inverted(tag.path(), body, body_origin, scope)?
                    };
                    (replacement, tag.end + body.len() + closing_tag_len(tag.path()))
                }
            };
            let after = self.expand(&content[consumed..], origin.shift(consumed), scope)?;
            let mut spliced = String::with_capacity(tag.start + replacement.len() + after.len());
            spliced.push_str(&content[..tag.start]);
            spliced.push_str(&replacement);
            spliced.push_str(&after);
            origin = Origin::Substituted(origin.at(tag.start));
            content = Cow::Owned(spliced);
        }
    }

    fn body<'c>(&self, tag: &Tag<'c>, content: &'c str, origin: Origin) -> Result<&'c str, TemplateError> {
        let after = &content[tag.end..];
        let end = find_closing_tag(tag.path(), after).ok_or_else(|| {
            debug!(tag = tag.text, pos = origin.at(tag.start), "unclosed section");
            TemplateError::unclosed_section(tag.text, origin.at(tag.start), self.template)
        })?;
        Ok(&after[..end])
    }

    fn print(&self, path: &str, scope: &Scope<'_>) -> String {
        let key = lookup_key(path);
        let resolved = resolve(key, scope);
        if let View::Object(ref o) = *resolved.value {
            if let Some(text) = o.to_text() {
                return text;
            }
        }
        if is_callable(scope.view(), key) {
            return invoke(scope.view(), key, None).to_string();
        }
        resolved.value.to_string()
    }

    fn section(
        &self,
        path: &str,
        body: &str,
        origin: Origin,
        scope: &Scope<'_>,
    ) -> Result<String, TemplateError> {
        let key = lookup_key(path);
        let resolved = resolve(key, scope);
        if is_callable(scope.view(), key) {
            let inner = self.expand(body, origin, resolved.scope)?;
            debug!(section = path, "calling section");
            return Ok(invoke(scope.view(), key, Some(&inner)).to_string());
        }
        match classify(&resolved.value) {
            Truth::Falsy => Ok(String::new()),
            Truth::Sequence(items) => {
                debug!(section = path, len = items.len(), "iterating section");
                let mut out = String::new();
                for item in items {
                    let inner = resolved.scope.push(item);
                    out.push_str(&self.expand(body, origin, &inner)?);
                }
                Ok(out)
            }
            Truth::Scope => {
                debug!(section = path, depth = resolved.scope.depth() + 1, "entering scope");
                let inner = resolved.scope.push(&resolved.value);
                self.expand(body, origin, &inner)
            }
            Truth::Scalar => self.expand(body, origin, scope),
        }
    }

    fn inverted(
        &self,
        path: &str,
        body: &str,
        origin: Origin,
        scope: &Scope<'_>,
    ) -> Result<String, TemplateError> {
        let resolved = resolve(lookup_key(path), scope);
        if is_true(&resolved.value) {
            return Ok(String::new());
        }
        self.expand(body, origin, scope)
    }
}
