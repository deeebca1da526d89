use std::any::Any;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::loader::Dictionary;
use crate::parser::{Parser, Segment};
use crate::plural;

/// Opaque rich-content value carried through interpolation without being
/// stringified. The host decides what lives behind the handle (a renderable
/// element, a widget, ...); the engine only preserves it and its position.
pub type ContentHandle = Arc<dyn Any + Send + Sync>;

/// An interpolation parameter value.
///
/// An explicit tagged union instead of runtime type inspection: the engine
/// branches on the tag to decide between plain text substitution and
/// opaque content preservation.
#[derive(Clone)]
pub enum Arg {
    Text(String),
    Int(i64),
    Content(ContentHandle),
}

impl std::fmt::Debug for Arg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arg::Text(value) => write!(f, "Text({:?})", value),
            Arg::Int(value) => write!(f, "Int({})", value),
            Arg::Content(_) => write!(f, "Content(..)"),
        }
    }
}

/// Named parameters for a translation lookup.
///
/// A numeric `count` parameter doubles as the pluralization input.
#[derive(Debug, Clone, Default)]
pub struct Params {
    args: BTreeMap<String, Arg>,
}

impl Params {
    pub fn new() -> Self {
        Params::default()
    }

    pub fn with_text(mut self, name: &str, value: &str) -> Self {
        self.args.insert(name.to_owned(), Arg::Text(value.to_owned()));
        self
    }

    pub fn with_int(mut self, name: &str, value: i64) -> Self {
        self.args.insert(name.to_owned(), Arg::Int(value));
        self
    }

    pub fn with_count(self, count: i64) -> Self {
        self.with_int("count", count)
    }

    pub fn with_content(mut self, name: &str, handle: ContentHandle) -> Self {
        self.args.insert(name.to_owned(), Arg::Content(handle));
        self
    }

    fn get(&self, name: &str) -> Option<&Arg> {
        self.args.get(name)
    }

    fn count(&self) -> Option<i64> {
        match self.args.get("count") {
            Some(Arg::Int(count)) => Some(*count),
            _ => None,
        }
    }
}

/// One element of an interpolated node sequence.
#[derive(Clone)]
pub enum Node {
    Text(String),
    /// Opaque content with a stable identity derived from the parameter
    /// name and its segment position in the template.
    Content { id: String, handle: ContentHandle },
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Text(text) => write!(f, "Text({:?})", text),
            Node::Content { id, .. } => write!(f, "Content({:?})", id),
        }
    }
}

/// Result of a translation: a plain string when every part is text, or the
/// ordered node sequence when opaque content was interpolated.
#[derive(Debug, Clone)]
pub enum Rendered {
    Text(String),
    Nodes(Vec<Node>),
}

impl Rendered {
    /// The string form, when the result is all text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Rendered::Text(text) => Some(text),
            Rendered::Nodes(_) => None,
        }
    }

    pub fn nodes(&self) -> Option<&[Node]> {
        match self {
            Rendered::Text(_) => None,
            Rendered::Nodes(nodes) => Some(nodes),
        }
    }
}

/// A translation function bound to one locale's dictionary and an optional
/// scope.
#[derive(Debug)]
pub struct Translator {
    locale: String,
    dictionary: Arc<Dictionary>,
    scope: Option<String>,
}

impl Translator {
    pub(crate) fn new(locale: String, dictionary: Arc<Dictionary>, scope: Option<&str>) -> Self {
        Translator {
            locale,
            dictionary,
            scope: scope.map(str::to_owned),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn t(&self, key: &str, params: Option<&Params>) -> Rendered {
        translate(
            &self.locale,
            &self.dictionary,
            self.scope.as_deref(),
            key,
            params,
        )
    }
}

/// Resolve `key` (under `scope`, if any) in `dictionary` and interpolate
/// `params` into the template.
///
/// Lookup policy: a `count` parameter on a pluralizable base key appends
/// the locale-selected `#<category>` suffix (literal 0 is always `zero`).
/// A missing plural form cascades to the `#other` form, then to the
/// caller's literal key; a missing plain key degrades to the literal key.
/// Lookup misses never error.
pub fn translate(
    locale: &str,
    dictionary: &Dictionary,
    scope: Option<&str>,
    key: &str,
    params: Option<&Params>,
) -> Rendered {
    let scoped_key = match scope {
        Some(scope) => format!("{}.{}", scope, key),
        None => key.to_owned(),
    };

    let mut lookup_key = scoped_key.clone();
    let mut plural_applied = false;
    if let Some(params) = params
        && let Some(count) = params.count()
        && dictionary.is_plural_base(&scoped_key)
    {
        let category = plural::select_category(locale, count);
        lookup_key = format!("{}#{}", scoped_key, plural::category_suffix(category));
        plural_applied = true;
    }

    let template = match dictionary.get(&lookup_key) {
        Some(template) => template,
        None if plural_applied => dictionary
            .get(&format!("{}#other", scoped_key))
            .unwrap_or(key),
        None => key,
    };

    // Without parameters the template passes through uninterpolated.
    let Some(params) = params else {
        return Rendered::Text(template.to_owned());
    };

    let mut nodes = Vec::new();
    let mut all_text = true;
    for (index, segment) in Parser::new(template).parse().iter().enumerate() {
        match segment {
            Segment::Text(text) => nodes.push(Node::Text((*text).to_owned())),
            Segment::Placeholder(name) => match params.get(name) {
                Some(Arg::Text(value)) => nodes.push(Node::Text(value.clone())),
                Some(Arg::Int(value)) => nodes.push(Node::Text(value.to_string())),
                Some(Arg::Content(handle)) => {
                    all_text = false;
                    nodes.push(Node::Content {
                        id: format!("{}-{}", name, index),
                        handle: handle.clone(),
                    });
                }
                // Missing parameters substitute as empty text.
                None => nodes.push(Node::Text(String::new())),
            },
        }
    }

    if all_text {
        let mut text = String::new();
        for node in nodes {
            if let Node::Text(part) = node {
                text.push_str(&part);
            }
        }
        Rendered::Text(text)
    } else {
        Rendered::Nodes(nodes)
    }
}
