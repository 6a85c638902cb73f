use crate::lexer::{LEFT_DELIM, RIGHT_DELIM};

fn marker(sigil: char, name: &str) -> String {
    format!("{}{}{}{}", LEFT_DELIM, sigil, name, RIGHT_DELIM)
}

/// Length of the `{{/name}}` closer.
pub fn closing_tag_len(name: &str) -> usize {
    LEFT_DELIM.len() + 1 + name.len() + RIGHT_DELIM.len()
}

/// Finds where the body of an already consumed `{{#name}}` or `{{^name}}`
/// ends in `text`, i.e. the offset of its matching `{{/name}}`.
///
/// Only `{{#name}}` and `{{/name}}` with exactly this name are counted, so
/// sections of other names never affect nesting. Returns `None` when the
/// opener is never closed.
pub fn find_closing_tag(name: &str, text: &str) -> Option<usize> {
    let open = marker('#', name);
    let close = marker('/', name);
    let mut depth = 1usize;
    let mut pos = 0;
    loop {
        let rest = &text[pos..];
        let next_close = rest.find(&close)?;
        match rest.find(&open) {
            Some(next_open) if next_open < next_close => {
                depth += 1;
                pos += next_open + open.len();
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some(pos + next_close);
                }
                pos += next_close + close.len();
            }
        }
    }
}
