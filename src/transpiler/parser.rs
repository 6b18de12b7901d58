/// Parser for Android XML layouts
///
/// Reads quick-xml events and assembles an owned `LayoutNode` tree with an
/// explicit stack, so deeply nested input cannot overflow the call stack here.
/// Depth and element-count limits are enforced while reading.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::transpiler::ast::{LayoutDocument, LayoutNode};
use crate::transpiler::error::ConvertError;

/// Hard limits checked during parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseLimits {
    pub max_depth: usize,
    pub max_nodes: usize,
}

impl Default for ParseLimits {
    fn default() -> Self {
        ParseLimits {
            max_depth: 500,
            max_nodes: 10_000,
        }
    }
}

pub fn parse_layout(source: &str, limits: &ParseLimits) -> Result<LayoutDocument, ConvertError> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<LayoutNode> = Vec::new();
    let mut root: Option<LayoutNode> = None;
    let mut depth = 0;
    let mut node_count = 0;

    loop {
        let position = reader.buffer_position() as usize;
        let event = reader
            .read_event()
            .map_err(|e| ConvertError::syntax(e.to_string(), source, reader.error_position() as usize))?;

        match event {
            Event::Start(e) => {
                let node = open_element(&e, source, position)?;
                check_new_element(&root, &stack, source, position)?;
                node_count += 1;
                if node_count > limits.max_nodes {
                    return Err(ConvertError::TooLarge { limit: limits.max_nodes });
                }
                stack.push(node);
                if stack.len() > limits.max_depth {
                    return Err(ConvertError::TooDeep { limit: limits.max_depth });
                }
                depth = depth.max(stack.len());
            }
            Event::Empty(e) => {
                let node = open_element(&e, source, position)?;
                check_new_element(&root, &stack, source, position)?;
                node_count += 1;
                if node_count > limits.max_nodes {
                    return Err(ConvertError::TooLarge { limit: limits.max_nodes });
                }
                if stack.len() + 1 > limits.max_depth {
                    return Err(ConvertError::TooDeep { limit: limits.max_depth });
                }
                depth = depth.max(stack.len() + 1);
                attach(node, &mut stack, &mut root);
            }
            Event::End(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
                let node = stack.pop().ok_or_else(|| {
                    ConvertError::syntax(format!("unexpected closing tag </{}>", name), source, position)
                })?;
                if node.tag != name {
                    return Err(ConvertError::syntax(
                        format!("expected </{}>, found </{}>", node.tag, name),
                        source,
                        position,
                    ));
                }
                attach(node, &mut stack, &mut root);
            }
            Event::Eof => break,
            // Text, comments, CDATA, declarations and processing instructions
            // carry nothing a layout conversion uses
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ConvertError::syntax(
            format!("element <{}> is never closed", open.tag),
            source,
            source.len(),
        ));
    }

    let root = root.ok_or(ConvertError::Empty)?;
    log::debug!("parsed <{}>: {} elements, depth {}", root.tag, node_count, depth);

    Ok(LayoutDocument {
        root,
        depth,
        node_count,
    })
}

fn open_element(e: &BytesStart, source: &str, position: usize) -> Result<LayoutNode, ConvertError> {
    let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
    let mut node = LayoutNode::new(&tag);

    // Duplicate attribute names are resolved last-wins by `set_attribute`
    // instead of being rejected
    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|err| ConvertError::syntax(err.to_string(), source, position))?;
        let name = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|err| ConvertError::syntax(err.to_string(), source, position))?;
        node.set_attribute(&name, &value);
    }

    Ok(node)
}

fn check_new_element(
    root: &Option<LayoutNode>,
    stack: &[LayoutNode],
    source: &str,
    position: usize,
) -> Result<(), ConvertError> {
    if stack.is_empty() && root.is_some() {
        return Err(ConvertError::syntax(
            "document has more than one root element",
            source,
            position,
        ));
    }
    Ok(())
}

fn attach(node: LayoutNode, stack: &mut [LayoutNode], root: &mut Option<LayoutNode>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => *root = Some(node),
    }
}
