//! Minimal XML-to-tree reader used for plugin descriptors

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use std::io::BufRead;

use crate::error::{Error, Result};
use crate::types::ConfigNode;

/// Parse a whole XML document into a [`ConfigNode`] tree rooted at the document element
pub fn parse_document<R: BufRead>(input: R) -> Result<ConfigNode> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<ConfigNode> = Vec::new();
    let mut root: Option<ConfigNode> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(start) => stack.push(element(&start)?),
            Event::Empty(start) => {
                let node = element(&start)?;
                attach(&mut stack, &mut root, node)?;
            }
            Event::End(_) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| Error::InvalidDescriptor("unbalanced end tag".to_string()))?;
                attach(&mut stack, &mut root, node)?;
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    append_text(current, &text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    append_text(current, &String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(Error::InvalidDescriptor(format!(
            "element <{}> is never closed",
            open.name
        )));
    }
    root.ok_or_else(|| Error::InvalidDescriptor("document has no root element".to_string()))
}

fn element(start: &BytesStart<'_>) -> Result<ConfigNode> {
    let mut node = ConfigNode::new(String::from_utf8_lossy(start.name().as_ref()));
    for attribute in start.attributes() {
        let attribute = attribute.map_err(quick_xml::Error::from)?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute.unescape_value()?.into_owned();
        node.attributes.insert(key, value);
    }
    Ok(node)
}

fn attach(stack: &mut [ConfigNode], root: &mut Option<ConfigNode>, node: ConfigNode) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        return Ok(());
    }
    if root.is_some() {
        return Err(Error::InvalidDescriptor(
            "document has more than one root element".to_string(),
        ));
    }
    *root = Some(node);
    Ok(())
}

fn append_text(node: &mut ConfigNode, text: &str) {
    match node.value.as_mut() {
        Some(existing) => existing.push_str(text),
        None => node.value = Some(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_nested_elements_and_attributes() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
            <!-- comment -->
            <configuration>
              <directory implementation="java.io.File">${project.build.directory}</directory>
              <verbose/>
              <filesets>
                <fileset><directory>out</directory></fileset>
              </filesets>
            </configuration>"#;

        let root = parse_document(xml.as_bytes()).unwrap();
        assert_eq!(root.name, "configuration");
        assert_eq!(root.children.len(), 3);

        let directory = root.child("directory").unwrap();
        assert_eq!(directory.value.as_deref(), Some("${project.build.directory}"));
        assert_eq!(directory.attributes["implementation"], "java.io.File");

        assert!(root.child("verbose").unwrap().value.is_none());
        let nested = root.child("filesets").unwrap().child("fileset").unwrap();
        assert_eq!(nested.child_value("directory"), Some("out"));
    }

    #[test]
    fn test_unescapes_entities_and_cdata() {
        let xml = "<a><b>x &amp; y</b><c><![CDATA[<raw>]]></c></a>";
        let root = parse_document(xml.as_bytes()).unwrap();
        assert_eq!(root.child_value("b"), Some("x & y"));
        assert_eq!(root.child_value("c"), Some("<raw>"));
    }

    #[test]
    fn test_rejects_truncated_document() {
        assert!(parse_document("<plugin><mojos>".as_bytes()).is_err());
    }

    #[test]
    fn test_rejects_empty_document() {
        let err = parse_document("   ".as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidDescriptor(_)));
    }
}
