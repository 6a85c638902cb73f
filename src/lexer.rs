use std::fmt;

type Pos = usize;

pub static LEFT_DELIM: &str = "{{";
pub static RIGHT_DELIM: &str = "}}";
static RIGHT_BRACE: char = '}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sigil {
    None,     // {{name}}
    Section,  // {{#name}}
    Inverted, // {{^name}}
    Close,    // {{/name}}
}

/// A `{{...}}` marker found in a piece of content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag<'t> {
    pub text: &'t str, // the whole marker, delimiters included
    pub name: &'t str, // raw text between the delimiters
    pub start: Pos,
    pub end: Pos,
}

impl<'t> Tag<'t> {
    pub fn sigil(&self) -> Sigil {
        match self.name.bytes().next() {
            Some(b'#') => Sigil::Section,
            Some(b'^') => Sigil::Inverted,
            Some(b'/') => Sigil::Close,
            _ => Sigil::None,
        }
    }

    /// The tag name with its sigil stripped, dots still attached.
    pub fn path(&self) -> &'t str {
        match self.sigil() {
            Sigil::None => self.name,
            _ => &self.name[1..],
        }
    }
}

impl fmt::Display for Tag<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Finds the first `{{name}}` in `content` whose name is non-empty and holds
/// no `}`.
pub fn next_tag(content: &str) -> Option<Tag<'_>> {
    let mut from = 0;
    while let Some(i) = content[from..].find(LEFT_DELIM) {
        let start = from + i;
        let inner = start + LEFT_DELIM.len();
        let close = inner + content[inner..].find(RIGHT_BRACE)?;
        if close > inner && content[close..].starts_with(RIGHT_DELIM) {
            let end = close + RIGHT_DELIM.len();
            return Some(Tag {
                text: &content[start..end],
                name: &content[inner..close],
                start,
                end,
            });
        }
        from = start + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(mut content: &str) -> Vec<&str> {
        let mut found = vec![];
        while let Some(tag) = next_tag(content) {
            found.push(tag.name);
            content = &content[tag.end..];
        }
        found
    }

    #[test]
    fn test_next_tag() {
        let tag = next_tag("Hello {{myTag}}!").unwrap();
        assert_eq!(tag.name, "myTag");
        assert_eq!(tag.text, "{{myTag}}");
        assert_eq!((tag.start, tag.end), (6, 15));
        assert_eq!(tag.sigil(), Sigil::None);
    }

    #[test]
    fn test_no_tag() {
        assert_eq!(next_tag("no tags here"), None);
        assert_eq!(next_tag("{{}}"), None);
        assert_eq!(next_tag("{{a}b}}"), None);
        assert_eq!(next_tag("{{ unterminated"), None);
        assert_eq!(next_tag("{single}"), None);
    }

    #[test]
    fn test_skips_bad_opener() {
        assert_eq!(names("{{}} {{a}}"), vec!["a"]);
        assert_eq!(names("{{{a}}"), vec!["{a"]);
        assert_eq!(names("{{x\ny}}"), vec!["x\ny"]);
        assert_eq!(names("{{a}}{{b}}c{{d}}"), vec!["a", "b", "d"]);
    }

    #[test]
    fn test_sigils() {
        let tag = next_tag("{{#list}}").unwrap();
        assert_eq!(tag.sigil(), Sigil::Section);
        assert_eq!(tag.path(), "list");
        let tag = next_tag("{{^a.b}}").unwrap();
        assert_eq!(tag.sigil(), Sigil::Inverted);
        assert_eq!(tag.path(), "a.b");
        let tag = next_tag("{{/list}}").unwrap();
        assert_eq!(tag.sigil(), Sigil::Close);
        assert_eq!(tag.path(), "list");
    }

    #[test]
    fn test_multibyte() {
        let tag = next_tag("→ {{ä}} ←").unwrap();
        assert_eq!(tag.name, "ä");
        assert_eq!(tag.start, "→ ".len());
    }
}
