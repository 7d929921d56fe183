//! Owned XML element tree.
//!
//! The RAMON export is small enough to hold in memory, and the mapper needs
//! random access to children (`Label/LabelText[@language=..]`), so the
//! `quick-xml` event stream is folded into a tree once and walked afterwards.

use quick_xml::events::{BytesStart, Event};

use crate::error::{Error, Result};

// ─── Tree ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
  pub name:       String,
  pub attributes: Vec<(String, String)>,
  /// Character data before the first child element, untrimmed. Text after
  /// a child (its tail) is not kept.
  pub text:       String,
  pub children:   Vec<Element>,
}

/// One step of a child path: a tag name plus an optional `[@attr="value"]`
/// predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathStep {
  pub tag:       &'static str,
  pub predicate: Option<(&'static str, &'static str)>,
}

impl PathStep {
  pub const fn tag(tag: &'static str) -> Self { Self { tag, predicate: None } }

  pub const fn with_attr(
    tag: &'static str,
    attr: &'static str,
    value: &'static str,
  ) -> Self {
    Self { tag, predicate: Some((attr, value)) }
  }

  fn matches(&self, el: &Element) -> bool {
    el.name == self.tag
      && self
        .predicate
        .is_none_or(|(attr, value)| el.attr(attr) == Some(value))
  }
}

impl Element {
  pub fn attr(&self, key: &str) -> Option<&str> {
    self
      .attributes
      .iter()
      .find(|(k, _)| k == key)
      .map(|(_, v)| v.as_str())
  }

  /// First element reached by following `path` from this one, depth-first in
  /// document order. An empty path resolves to `self`.
  pub fn find(&self, path: &[PathStep]) -> Option<&Element> {
    let Some((step, rest)) = path.split_first() else {
      return Some(self);
    };
    self
      .children
      .iter()
      .filter(|c| step.matches(c))
      .find_map(|c| c.find(rest))
  }

  /// Every element named `name` in this subtree, including `self`, in
  /// document order.
  pub fn descendants_named<'a>(&'a self, name: &'a str) -> Descendants<'a> {
    Descendants { stack: vec![self], name }
  }
}

/// Pre-order iterator returned by [`Element::descendants_named`].
pub struct Descendants<'a> {
  stack: Vec<&'a Element>,
  name:  &'a str,
}

impl<'a> Iterator for Descendants<'a> {
  type Item = &'a Element;

  fn next(&mut self) -> Option<Self::Item> {
    while let Some(el) = self.stack.pop() {
      self.stack.extend(el.children.iter().rev());
      if el.name == self.name {
        return Some(el);
      }
    }
    None
  }
}

// ─── Parsing ─────────────────────────────────────────────────────────────────

/// Parse a complete document and return its root element.
pub fn parse_document(xml: &str) -> Result<Element> {
  let mut reader = quick_xml::Reader::from_str(xml);

  let mut stack: Vec<Element> = Vec::new();
  let mut root: Option<Element> = None;

  loop {
    match reader.read_event() {
      Ok(Event::Start(ref e)) => {
        stack.push(open_element(e)?);
      }
      Ok(Event::Empty(ref e)) => {
        let el = open_element(e)?;
        attach(&mut stack, &mut root, el)?;
      }
      Ok(Event::End(_)) => {
        let el = stack
          .pop()
          .ok_or_else(|| Error::Xml("unexpected closing tag".into()))?;
        attach(&mut stack, &mut root, el)?;
      }
      Ok(Event::Text(ref e)) => {
        if let Some(top) = leading_text_target(&mut stack) {
          let text = e.unescape().map_err(|e| Error::Xml(e.to_string()))?;
          top.text.push_str(&text);
        }
      }
      Ok(Event::CData(ref e)) => {
        if let Some(top) = leading_text_target(&mut stack) {
          top.text.push_str(&String::from_utf8_lossy(e));
        }
      }
      Ok(Event::Eof) => break,
      Err(e) => return Err(Error::Xml(e.to_string())),
      _ => {}
    }
  }

  if let Some(open) = stack.last() {
    return Err(Error::Xml(format!("unclosed element <{}>", open.name)));
  }
  root.ok_or_else(|| Error::Xml("document has no root element".into()))
}

fn open_element(e: &BytesStart<'_>) -> Result<Element> {
  let name_buf = e.name();
  let mut el = Element {
    name: String::from_utf8_lossy(local_name(name_buf.as_ref())).into_owned(),
    ..Default::default()
  };

  for attr in e.attributes() {
    let attr = attr.map_err(|e| Error::Xml(e.to_string()))?;
    let key = String::from_utf8_lossy(local_name(attr.key.as_ref())).into_owned();
    let value = attr
      .unescape_value()
      .map_err(|e| Error::Xml(e.to_string()))?
      .into_owned();
    el.attributes.push((key, value));
  }

  Ok(el)
}

/// The open element, as long as it has no child yet.
fn leading_text_target(stack: &mut [Element]) -> Option<&mut Element> {
  stack.last_mut().filter(|top| top.children.is_empty())
}

/// Append a finished element to its parent, or make it the document root.
fn attach(
  stack: &mut [Element],
  root: &mut Option<Element>,
  el: Element,
) -> Result<()> {
  match stack.last_mut() {
    Some(parent) => parent.children.push(el),
    None if root.is_none() => *root = Some(el),
    None => return Err(Error::Xml("multiple root elements".into())),
  }
  Ok(())
}

fn local_name(name: &[u8]) -> &[u8] {
  // strip "prefix:" if present
  if let Some(pos) = name.iter().rposition(|&b| b == b':') {
    &name[pos + 1..]
  } else {
    name
  }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  const DOC: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
  <Classification id="NUTS_2013">
    <Item id="FR" idLevel="1">
      <Label>
        <LabelText language="ALL">FR</LabelText>
        <LabelText language="EN">France</LabelText>
      </Label>
      <Item id="FR1" idLevel="2">
        <Label>
          <LabelText language="ALL">FR1</LabelText>
          <LabelText language="EN">&#206;le de France</LabelText>
        </Label>
      </Item>
    </Item>
    <Item id="DE" idLevel="1"/>
  </Classification>"#;

  #[test]
  fn parses_nested_tree() {
    let root = parse_document(DOC).unwrap();
    assert_eq!(root.name, "Classification");
    assert_eq!(root.attr("id"), Some("NUTS_2013"));
    assert_eq!(root.children.len(), 2);
    assert_eq!(root.children[0].children.len(), 2);
  }

  #[test]
  fn descendants_follow_document_order() {
    let root = parse_document(DOC).unwrap();
    let ids: Vec<&str> = root
      .descendants_named("Item")
      .filter_map(|e| e.attr("id"))
      .collect();
    assert_eq!(ids, ["FR", "FR1", "DE"]);
  }

  #[test]
  fn find_applies_attribute_predicate() {
    let root = parse_document(DOC).unwrap();
    let fr1 = root.descendants_named("Item").nth(1).unwrap();

    let en = fr1
      .find(&[
        PathStep::tag("Label"),
        PathStep::with_attr("LabelText", "language", "EN"),
      ])
      .unwrap();
    assert_eq!(en.text, "Île de France");

    let missing = fr1.find(&[
      PathStep::tag("Label"),
      PathStep::with_attr("LabelText", "language", "DE"),
    ]);
    assert!(missing.is_none());
  }

  #[test]
  fn text_is_leading_character_data_only() {
    let root = parse_document("<a>  head &amp; more <b>inner</b> tail</a>").unwrap();
    assert_eq!(root.text, "  head & more ");
    assert_eq!(root.children[0].text, "inner");
  }

  #[test]
  fn whitespace_only_text_is_kept() {
    let root = parse_document("<a>   </a>").unwrap();
    assert_eq!(root.text, "   ");
  }

  #[test]
  fn empty_path_is_self() {
    let root = parse_document(DOC).unwrap();
    assert_eq!(root.find(&[]), Some(&root));
  }

  #[test]
  fn mismatched_tags_are_rejected() {
    let err = parse_document("<?xml version=\"1.0\"?><a><b></a>").unwrap_err();
    assert!(matches!(err, Error::Xml(_)));
  }

  #[test]
  fn missing_root_is_rejected() {
    let err = parse_document("<?xml version=\"1.0\"?>").unwrap_err();
    assert!(matches!(err, Error::Xml(_)));
  }
}
