use crate::error::Error;
use crate::params::ParameterSet;
use serde::{Deserialize, Serialize};

/// One piece of a parsed template: literal text or a named placeholder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A template parsed into typed segments.
///
/// Placeholders are `{name}`; `{{` and `}}` escape literal braces. Keeping
/// the structure typed makes unresolved-placeholder detection a walk over
/// segments instead of a marker scan on rendered text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(text: &str) -> Result<Self, Error> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = text.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' => {
                    if chars.peek() == Some(&'{') {
                        chars.next();
                        literal.push('{');
                        continue;
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(nc) if nc.is_alphanumeric() || nc == '_' => name.push(nc),
                            Some(nc) => {
                                return Err(Error::TemplateSyntax {
                                    message: format!("invalid character '{nc}' in placeholder"),
                                });
                            }
                            None => {
                                return Err(Error::TemplateSyntax {
                                    message: format!("unterminated placeholder '{{{name}'"),
                                });
                            }
                        }
                    }
                    if name.is_empty() {
                        return Err(Error::TemplateSyntax {
                            message: "empty placeholder name".to_string(),
                        });
                    }
                    segments.push(Segment::Placeholder(name));
                }
                '}' => {
                    if chars.peek() == Some(&'}') {
                        chars.next();
                        literal.push('}');
                    } else {
                        return Err(Error::TemplateSyntax {
                            message: "stray '}' outside placeholder".to_string(),
                        });
                    }
                }
                _ => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    /// Placeholder names in order of first appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for seg in &self.segments {
            if let Segment::Placeholder(name) = seg {
                if !names.contains(&name.as_str()) {
                    names.push(name);
                }
            }
        }
        names
    }

    pub fn render(&self, params: &ParameterSet) -> Result<String, Error> {
        let mut out = String::new();
        for seg in &self.segments {
            match seg {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => match params.get(name) {
                    Some(value) => out.push_str(&value.to_string()),
                    None => {
                        return Err(Error::UnresolvedPlaceholder { name: name.clone() });
                    }
                },
            }
        }
        Ok(out)
    }
}
