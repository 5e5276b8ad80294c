//! Path pattern compilation.
//!
//! # Responsibilities
//! - Compile a Django-style regex with full-match anchoring
//! - Extract named and positional captures from a path
//! - Derive a reverse template for URL generation
//!
//! # Design Decisions
//! - The source is wrapped as `\A(?:...)\z`, so `^`/`$` in the source are
//!   harmless and a pattern never matches a substring of the path
//! - Named groups win: when a pattern has any named group, unnamed groups
//!   are not reported as positional arguments
//! - A pattern is reversible only if every regex construct lives inside a
//!   named group; anything else is reported, not guessed

use std::collections::HashMap;

use regex::Regex;

use crate::routing::error::RoutingError;

/// A compiled route pattern.
#[derive(Debug, Clone)]
pub struct RoutePattern {
    source: String,
    regex: Regex,
    template: Result<Vec<Segment>, String>,
}

/// Captures extracted from a successful match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathCaptures {
    /// Named groups that participated in the match, in group order.
    pub named: Vec<(String, String)>,
    /// Unnamed groups, only populated when the pattern has no named groups.
    pub positional: Vec<String>,
}

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Slot { name: String, check: Regex, source: String },
}

impl RoutePattern {
    /// Compile a pattern source.
    pub fn new(source: impl Into<String>) -> Result<Self, regex::Error> {
        let source = source.into();
        let regex = Regex::new(&format!(r"\A(?:{})\z", source))?;
        let template = parse_template(&source);

        Ok(Self {
            source,
            regex,
            template,
        })
    }

    /// The pattern as written.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns true if the whole path matches.
    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Names of the named capture groups, in declaration order.
    pub fn group_names(&self) -> impl Iterator<Item = &str> {
        self.regex.capture_names().flatten()
    }

    /// Whether `reverse` can produce a URL for this pattern.
    pub fn is_reversible(&self) -> bool {
        self.template.is_ok()
    }

    /// Match the path and extract captures.
    pub fn captures(&self, path: &str) -> Option<PathCaptures> {
        let caps = self.regex.captures(path)?;
        let mut result = PathCaptures::default();

        for name in self.group_names() {
            if let Some(m) = caps.name(name) {
                result.named.push((name.to_string(), m.as_str().to_string()));
            }
        }

        if self.group_names().next().is_none() {
            // Group 0 is the whole match.
            result.positional = caps
                .iter()
                .skip(1)
                .flatten()
                .map(|m| m.as_str().to_string())
                .collect();
        }

        Some(result)
    }

    /// Build the path for this pattern from named values.
    ///
    /// `route` is only used to label errors.
    pub fn reverse(
        &self,
        route: &str,
        kwargs: &HashMap<String, String>,
    ) -> Result<String, RoutingError> {
        let segments = self
            .template
            .as_ref()
            .map_err(|reason| RoutingError::NotReversible {
                route: route.to_string(),
                reason: reason.clone(),
            })?;

        for key in kwargs.keys() {
            let known = segments
                .iter()
                .any(|s| matches!(s, Segment::Slot { name, .. } if name == key));
            if !known {
                return Err(RoutingError::UnexpectedParam {
                    route: route.to_string(),
                    param: key.clone(),
                });
            }
        }

        let mut path = String::new();
        for segment in segments {
            match segment {
                Segment::Literal(text) => path.push_str(text),
                Segment::Slot { name, check, source } => {
                    let value = kwargs.get(name).ok_or_else(|| RoutingError::MissingParam {
                        route: route.to_string(),
                        param: name.clone(),
                    })?;
                    if !check.is_match(value) {
                        return Err(RoutingError::InvalidParam {
                            route: route.to_string(),
                            param: name.clone(),
                            value: value.clone(),
                            pattern: source.clone(),
                        });
                    }
                    path.push_str(value);
                }
            }
        }

        Ok(path)
    }
}

/// Split a pattern source into literal text and named slots.
fn parse_template(source: &str) -> Result<Vec<Segment>, String> {
    let mut chars: Vec<char> = source.chars().collect();
    if chars.first() == Some(&'^') {
        chars.remove(0);
    }
    if chars.last() == Some(&'$') && !is_escaped(&chars, chars.len() - 1) {
        chars.pop();
    }

    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '\\' => {
                let next = chars
                    .get(i + 1)
                    .copied()
                    .ok_or_else(|| "trailing backslash".to_string())?;
                if next.is_ascii_alphanumeric() {
                    return Err(format!("escape '\\{}' outside a named group", next));
                }
                literal.push(next);
                i += 2;
            }
            '(' => {
                let (name, body_start) = group_name(&chars, i)
                    .ok_or_else(|| "unnamed group".to_string())?;
                let close = closing_paren(&chars, i)
                    .ok_or_else(|| "unbalanced parentheses".to_string())?;
                let body: String = chars[body_start..close].iter().collect();
                let check = Regex::new(&format!(r"\A(?:{})\z", body))
                    .map_err(|e| format!("group '{}': {}", name, e))?;

                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Slot {
                    name,
                    check,
                    source: body,
                });
                i = close + 1;
            }
            c @ ('.' | '*' | '+' | '?' | '[' | ']' | '{' | '}' | '|' | ')' | '^' | '$') => {
                return Err(format!("'{}' outside a named group", c));
            }
            c => {
                literal.push(c);
                i += 1;
            }
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}

fn is_escaped(chars: &[char], index: usize) -> bool {
    let backslashes = chars[..index].iter().rev().take_while(|c| **c == '\\').count();
    backslashes % 2 == 1
}

/// Parse `(?P<name>` or `(?<name>` at `open`. Returns the name and body start.
fn group_name(chars: &[char], open: usize) -> Option<(String, usize)> {
    let rest = &chars[open + 1..];
    let prefix_len = if rest.starts_with(&['?', 'P', '<']) {
        3
    } else if rest.starts_with(&['?', '<']) {
        2
    } else {
        return None;
    };

    let name_start = open + 1 + prefix_len;
    let name_len = chars[name_start..].iter().position(|c| *c == '>')?;
    let name: String = chars[name_start..name_start + name_len].iter().collect();
    if name.is_empty() {
        return None;
    }
    Some((name, name_start + name_len + 1))
}

fn closing_paren(chars: &[char], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_class = false;
    let mut i = open;

    while i < chars.len() {
        match chars[i] {
            '\\' => i += 1,
            '[' if !in_class => in_class = true,
            ']' if in_class => in_class = false,
            '(' if !in_class => depth += 1,
            ')' if !in_class => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}
