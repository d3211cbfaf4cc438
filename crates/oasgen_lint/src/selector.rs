//! JSONPath-style node selection.
//!
//! Supported syntax: `$` root, `.key` and `['key']` children, `[n]` array
//! index, `[*]` and `.*` wildcards, and `..key` recursive descent.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::{LintError, LintResult};
use crate::source_map::push_pointer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Child(String),
    Index(usize),
    Wildcard,
    Descendant(String),
}

/// A compiled selector expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    source: String,
    segments: Vec<Segment>,
}

/// A selected value and its JSON pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct Selected<'v> {
    pub pointer: String,
    pub value: &'v Value,
}

impl Selector {
    pub fn parse(source: &str) -> LintResult<Self> {
        let invalid = |message: &str| LintError::InvalidSelector {
            selector: source.to_string(),
            message: message.to_string(),
        };

        let chars: Vec<char> = source.trim().chars().collect();
        if chars.first() != Some(&'$') {
            return Err(invalid("must start with '$'"));
        }

        let mut segments = Vec::new();
        let mut pos = 1;
        while pos < chars.len() {
            match chars[pos] {
                '.' if chars.get(pos + 1) == Some(&'.') => {
                    let (name, next) = read_name(&chars, pos + 2);
                    if name.is_empty() {
                        return Err(invalid("expected a name after '..'"));
                    }
                    segments.push(Segment::Descendant(name));
                    pos = next;
                }
                '.' if chars.get(pos + 1) == Some(&'*') => {
                    segments.push(Segment::Wildcard);
                    pos += 2;
                }
                '.' => {
                    let (name, next) = read_name(&chars, pos + 1);
                    if name.is_empty() {
                        return Err(invalid("expected a name after '.'"));
                    }
                    segments.push(Segment::Child(name));
                    pos = next;
                }
                '[' => {
                    let close = chars[pos..]
                        .iter()
                        .position(|&c| c == ']')
                        .map(|i| pos + i)
                        .ok_or_else(|| invalid("unclosed '['"))?;
                    let inner: String = chars[pos + 1..close].iter().collect();
                    segments.push(parse_bracket(inner.trim()).ok_or_else(|| invalid("bad bracket expression"))?);
                    pos = close + 1;
                }
                _ => return Err(invalid("unexpected character")),
            }
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Resolve against a document, returning matches in document order.
    pub fn select<'v>(&self, root: &'v Value) -> Vec<Selected<'v>> {
        let mut current = vec![Selected {
            pointer: String::new(),
            value: root,
        }];

        for segment in &self.segments {
            let mut next = Vec::new();
            for node in &current {
                match segment {
                    Segment::Child(name) => {
                        if let Some(child) = node.value.as_object().and_then(|map| map.get(name)) {
                            next.push(Selected {
                                pointer: push_pointer(&node.pointer, name),
                                value: child,
                            });
                        }
                    }
                    Segment::Index(index) => {
                        if let Some(child) = node.value.as_array().and_then(|items| items.get(*index)) {
                            next.push(Selected {
                                pointer: push_pointer(&node.pointer, &index.to_string()),
                                value: child,
                            });
                        }
                    }
                    Segment::Wildcard => children(node, &mut next),
                    Segment::Descendant(name) => descend(node, name, &mut next),
                }
            }
            current = next;
        }

        current
    }
}

impl FromStr for Selector {
    type Err = LintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn read_name(chars: &[char], start: usize) -> (String, usize) {
    let mut end = start;
    while end < chars.len() && !matches!(chars[end], '.' | '[') {
        end += 1;
    }
    (chars[start..end].iter().collect(), end)
}

fn parse_bracket(inner: &str) -> Option<Segment> {
    if inner == "*" {
        return Some(Segment::Wildcard);
    }
    if let Ok(index) = inner.parse::<usize>() {
        return Some(Segment::Index(index));
    }
    let quoted = inner
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .or_else(|| inner.strip_prefix('"').and_then(|s| s.strip_suffix('"')))?;
    Some(Segment::Child(quoted.to_string()))
}

fn children<'v>(node: &Selected<'v>, out: &mut Vec<Selected<'v>>) {
    match node.value {
        Value::Object(map) => {
            for (key, value) in map {
                out.push(Selected {
                    pointer: push_pointer(&node.pointer, key),
                    value,
                });
            }
        }
        Value::Array(items) => {
            for (index, value) in items.iter().enumerate() {
                out.push(Selected {
                    pointer: push_pointer(&node.pointer, &index.to_string()),
                    value,
                });
            }
        }
        _ => {}
    }
}

fn descend<'v>(node: &Selected<'v>, name: &str, out: &mut Vec<Selected<'v>>) {
    if let Some(child) = node.value.as_object().and_then(|map| map.get(name)) {
        out.push(Selected {
            pointer: push_pointer(&node.pointer, name),
            value: child,
        });
    }

    let mut nested = Vec::new();
    children(node, &mut nested);
    for child in &nested {
        descend(child, name, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pointers(selector: &str, doc: &Value) -> Vec<String> {
        Selector::parse(selector)
            .unwrap()
            .select(doc)
            .into_iter()
            .map(|n| n.pointer)
            .collect()
    }

    #[test]
    fn test_root_and_children() {
        let doc = json!({"contact": {"email": "a@b.nl"}});
        assert_eq!(pointers("$", &doc), vec![""]);
        assert_eq!(pointers("$.contact", &doc), vec!["/contact"]);
        assert_eq!(pointers("$.contact.email", &doc), vec!["/contact/email"]);
        assert_eq!(pointers("$['contact']", &doc), vec!["/contact"]);
        assert!(pointers("$.contact.name", &doc).is_empty());
    }

    #[test]
    fn test_array_wildcard_and_index() {
        let doc = json!({"resources": [{"name": "a"}, {"plural": "bs"}, {"name": "c"}]});
        assert_eq!(
            pointers("$.resources[*]", &doc),
            vec!["/resources/0", "/resources/1", "/resources/2"]
        );
        assert_eq!(
            pointers("$.resources[*].name", &doc),
            vec!["/resources/0/name", "/resources/2/name"]
        );
        assert_eq!(pointers("$.resources[1]", &doc), vec!["/resources/1"]);
    }

    #[test]
    fn test_wildcard_on_object_keeps_document_order() {
        let doc: Value = serde_json::from_str(r#"{"z": 1, "a": 2}"#).unwrap();
        assert_eq!(pointers("$.*", &doc), vec!["/z", "/a"]);
    }

    #[test]
    fn test_recursive_descent() {
        let doc = json!({"name": "root", "resources": [{"name": "a"}]});
        assert_eq!(pointers("$..name", &doc), vec!["/name", "/resources/0/name"]);
    }

    #[test]
    fn test_wildcard_on_scalar_is_empty() {
        let doc = json!({"resources": "nope"});
        assert!(pointers("$.resources[*]", &doc).is_empty());
    }

    #[test]
    fn test_invalid_selectors() {
        assert!(Selector::parse("contact").is_err());
        assert!(Selector::parse("$.").is_err());
        assert!(Selector::parse("$[").is_err());
        assert!(Selector::parse("$[foo]").is_err());
    }
}
