use std::collections::HashMap;
use std::sync::LazyLock;

use quick_xml::Reader;
use quick_xml::encoding::EncodingError;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesStart, Event};
use regex::Regex;
use thiserror::Error;

/// Internal general entities: `<!ENTITY name "value">` or with single quotes.
/// Parameter and external entities are not matched and stay unresolved.
static ENTITY_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<!ENTITY\s+([^\s%"']+)\s+(?:"([^"]*)"|'([^']*)')\s*>"#)
        .expect("entity declaration pattern")
});

#[derive(Debug, Error)]
pub enum TreeError {
    #[error("document does not match its declared encoding: {0}")]
    Encoding(#[from] EncodingError),
    #[error("malformed markup near byte {position}: {source}")]
    Syntax {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },
    #[error("closing tag near byte {0} has no matching opening tag")]
    UnexpectedEnd(u64),
    #[error("element <{0}> is never closed")]
    Unclosed(String),
    #[error("text outside the root element near byte {0}")]
    StrayText(u64),
    #[error("second root element <{0}>")]
    MultipleRoots(String),
    #[error("document has no root element")]
    NoRoot,
}

impl TreeError {
    fn at(position: u64) -> impl Fn(quick_xml::Error) -> TreeError {
        move |source| match source {
            quick_xml::Error::Encoding(err) => TreeError::Encoding(err),
            source => TreeError::Syntax { position, source },
        }
    }
}

/// A node of a parsed document.
///
/// `text` holds the text that precedes the first child element. Text found
/// after a child belongs to no element and is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// First direct child named `tag`.
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == tag)
    }

    /// Every direct child named `tag`, in document order.
    pub fn children_by_tag<'a, 't>(&'a self, tag: &'t str) -> impl Iterator<Item = &'a Element> + 't
    where
        'a: 't,
    {
        self.children.iter().filter(move |c| c.name == tag)
    }

    /// First direct child named `tag` whose attribute `key` equals `value`.
    pub fn child_with_attr(&self, tag: &str, key: &str, value: &str) -> Option<&Element> {
        self.children
            .iter()
            .find(|c| c.name == tag && c.attr(key) == Some(value))
    }

    pub fn into_children(self) -> Vec<Element> {
        self.children
    }
}

/// A fully parsed, well-formed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTree {
    root: Element,
}

impl ParseTree {
    /// Builds the tree, decoding the input with the encoding named in the
    /// XML declaration (UTF-8 when there is none).
    pub fn parse(bytes: &[u8]) -> Result<Self, TreeError> {
        let mut reader = Reader::from_reader(bytes);
        let mut buf = Vec::new();

        let mut entities: HashMap<String, String> = HashMap::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            let position = reader.buffer_position() as u64;
            let event = reader
                .read_event_into(&mut buf)
                .map_err(TreeError::at(position))?;
            let resolve = |name: &str| resolve_entity(&entities, name);

            match event {
                Event::Start(start) => {
                    let element = open_element(&reader, &start, position, resolve)?;
                    stack.push(element);
                }
                Event::Empty(start) => {
                    let element = open_element(&reader, &start, position, resolve)?;
                    attach(element, &mut stack, &mut root)?;
                }
                Event::End(_) => {
                    let element = stack.pop().ok_or(TreeError::UnexpectedEnd(position))?;
                    attach(element, &mut stack, &mut root)?;
                }
                Event::Text(text) => {
                    let text = text.unescape_with(resolve).map_err(TreeError::at(position))?;
                    push_text(&mut stack, &text, position)?;
                }
                Event::CData(cdata) => {
                    let text = cdata.decode()?;
                    push_text(&mut stack, &text, position)?;
                }
                Event::DocType(doctype) => {
                    let declarations = reader.decoder().decode(&doctype)?.into_owned();
                    collect_entities(&declarations, &mut entities);
                }
                Event::Eof => break,
                // Declarations, comments and processing instructions carry no data.
                _ => {}
            }
            buf.clear();
        }

        if let Some(open) = stack.pop() {
            return Err(TreeError::Unclosed(open.name));
        }

        root.map(|root| Self { root }).ok_or(TreeError::NoRoot)
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn into_root(self) -> Element {
        self.root
    }
}

fn resolve_entity<'m>(entities: &'m HashMap<String, String>, name: &str) -> Option<&'m str> {
    entities
        .get(name)
        .map(String::as_str)
        .or_else(|| resolve_predefined_entity(name))
}

fn collect_entities(declarations: &str, entities: &mut HashMap<String, String>) {
    for caps in ENTITY_DECL.captures_iter(declarations) {
        let value = caps.get(2).or_else(|| caps.get(3)).map_or("", |m| m.as_str());
        // The first declaration of a name is binding.
        entities
            .entry(caps[1].to_string())
            .or_insert_with(|| value.to_string());
    }
}

fn open_element<'e>(
    reader: &Reader<&[u8]>,
    start: &BytesStart<'_>,
    position: u64,
    mut resolve: impl FnMut(&str) -> Option<&'e str>,
) -> Result<Element, TreeError> {
    let decoder = reader.decoder();
    let mut element = Element::new(decoder.decode(start.name().as_ref())?);
    for attr in start.attributes() {
        let attr = attr.map_err(|err| TreeError::Syntax {
            position,
            source: err.into(),
        })?;
        let key = decoder.decode(attr.key.as_ref())?.into_owned();
        let value = attr
            .decode_and_unescape_value_with(decoder, &mut resolve)
            .map_err(TreeError::at(position))?;
        element.attributes.push((key, value.into_owned()));
    }
    Ok(element)
}

fn attach(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), TreeError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(TreeError::MultipleRoots(element.name));
    }
    *root = Some(element);
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str, position: u64) -> Result<(), TreeError> {
    match stack.last_mut() {
        Some(parent) if parent.children.is_empty() => {
            parent.text.push_str(text);
            Ok(())
        }
        Some(_) => Ok(()),
        None if text.trim().is_empty() => Ok(()),
        None => Err(TreeError::StrayText(position)),
    }
}
