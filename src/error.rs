use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    #[error("no closing tag found for tag {tag} at pos {pos} (line {line}) in template {template:?}")]
    UnclosedSection {
        tag: String,
        pos: usize,
        line: usize,
        template: String,
    },
}

impl TemplateError {
    pub fn unclosed_section(tag: impl ToString, pos: usize, template: impl ToString) -> Self {
        let template = template.to_string();
        let line = line_of(&template, pos);
        Self::UnclosedSection {
            tag: tag.to_string(),
            pos,
            line,
            template,
        }
    }
}

/// 1-based line number of byte offset `pos` in `text`.
fn line_of(text: &str, pos: usize) -> usize {
    let end = pos.min(text.len());
    1 + text.as_bytes()[..end].iter().filter(|b| **b == b'\n').count()
}
