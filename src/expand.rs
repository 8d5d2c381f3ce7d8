//! `${name}` template expansion over resolved resources
//!
//! Values come from an explicit [`Variables`] table rather than from any
//! object's fields, so a template can only reference what the caller chose
//! to expose.
//!
//! ```rust
//! use locus::expand::{Variables, expand};
//!
//! let vars = Variables::new().with("name", "world");
//! assert_eq!(expand("hello ${name}", &vars).unwrap(), "hello world");
//! ```

use crate::error::ExpandError;
use crate::resolve::{LookupContext, Resolver};
use std::collections::BTreeMap;

const START: &str = "${";
const END: char = '}';

/// Name → value table used to expand templates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variables {
    values: BTreeMap<String, String>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parse `KEY=VALUE` pairs; the value may itself contain `=`
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut vars = Self::new();
        for pair in pairs {
            let pair = pair.as_ref();
            match pair.split_once('=') {
                Some((name, value)) if !name.is_empty() => vars.insert(name, value),
                _ => return Err(format!("expected KEY=VALUE, got '{}'", pair)),
            }
        }
        Ok(vars)
    }
}

/// Whether the text holds at least one `${` marker
pub fn contains_variable(text: &str) -> bool {
    text.contains(START)
}

/// Variable names in order of appearance, duplicates kept
///
/// An unterminated `${` ends the scan.
pub fn extract_variables(text: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find(START) {
        let after = &rest[start + START.len()..];
        let Some(end) = after.find(END) else {
            break;
        };
        names.push(after[..end].to_string());
        rest = &after[end + 1..];
    }

    names
}

/// Replace every `${name}` with its value from the table
///
/// # Errors
///
/// `UnknownVariable` for the first name missing from the table.
pub fn expand(text: &str, vars: &Variables) -> Result<String, ExpandError> {
    if !contains_variable(text) {
        return Ok(text.to_string());
    }

    let mut result = text.to_string();
    for name in extract_variables(text) {
        let value = vars
            .get(&name)
            .ok_or_else(|| ExpandError::UnknownVariable(name.clone()))?;
        result = result.replace(&format!("{}{}{}", START, name, END), value);
    }
    Ok(result)
}

/// Read a resource as text and expand it
pub fn expand_resource(
    resolver: &Resolver,
    name: &str,
    ctx: &dyn LookupContext,
    vars: &Variables,
) -> Result<String, ExpandError> {
    let template = resolver.read_as_text(name, ctx)?;
    expand(&template, vars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResolveError;
    use crate::resolve::EmbeddedContext;

    #[test]
    fn test_extract_variables() {
        assert_eq!(
            extract_variables("${a} and ${b}, again ${a}"),
            vec!["a", "b", "a"]
        );
        assert_eq!(extract_variables("no markers"), Vec::<String>::new());
        assert_eq!(extract_variables("${open"), Vec::<String>::new());
        assert_eq!(extract_variables("${}"), vec![""]);
    }

    #[test]
    fn test_contains_variable() {
        assert!(contains_variable("x ${y}"));
        assert!(contains_variable("${"));
        assert!(!contains_variable("$ {y}"));
    }

    #[test]
    fn test_expand_replaces_every_occurrence() {
        let vars = Variables::new().with("who", "Ada").with("what", "engine");
        let out = expand("${who} built the ${what}; ${who} again", &vars).unwrap();
        assert_eq!(out, "Ada built the engine; Ada again");
    }

    #[test]
    fn test_expand_unknown_variable() {
        let err = expand("${missing}", &Variables::new()).unwrap_err();
        assert!(matches!(err, ExpandError::UnknownVariable(ref n) if n == "missing"));
    }

    #[test]
    fn test_from_pairs() {
        let vars = Variables::from_pairs(["a=1", "url=http://x?y=z"]).unwrap();
        assert_eq!(vars.get("a"), Some("1"));
        assert_eq!(vars.get("url"), Some("http://x?y=z"));
        assert!(Variables::from_pairs(["novalue"]).is_err());
        assert!(Variables::from_pairs(["=v"]).is_err());
    }

    #[test]
    fn test_expand_bundled_template() {
        let vars = Variables::new().with("name", "locus");
        let out = expand_resource(
            &Resolver::new(),
            "templates/greeting.txt",
            &EmbeddedContext::bundled(),
            &vars,
        )
        .unwrap();
        assert_eq!(out, "Hello, locus!\n");
    }

    #[test]
    fn test_expand_resource_propagates_resolve_errors() {
        let err = expand_resource(
            &Resolver::new(),
            "",
            &EmbeddedContext::bundled(),
            &Variables::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ExpandError::Resolve(ResolveError::InvalidResourceName { .. })
        ));
    }
}
