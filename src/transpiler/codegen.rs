/// Code emitter: walks the layout tree and writes Compose call expressions
///
/// Each element becomes `Name(params, modifier = Modifier...)`, followed by a
/// trailing block when it has children or required content. `include`,
/// `merge` and `fragment` are handled before mapping.

use crate::transpiler::ast::{canonical_tag, LayoutNode};
use crate::transpiler::attributes::{single_line, ResolvedAttributes};
use crate::transpiler::error::ConvertError;
use crate::transpiler::mapper::map_tag;
use crate::transpiler::modifiers::build_modifiers;

const INDENT: &str = "    ";

pub struct ComposeEmitter {
    max_depth: usize,
}

impl ComposeEmitter {
    pub fn new(max_depth: usize) -> Self {
        ComposeEmitter { max_depth }
    }

    /// Emit `node` and its subtree starting at `indent_level`
    pub fn emit(&self, node: &LayoutNode, indent_level: usize) -> Result<String, ConvertError> {
        let mut output = String::new();
        self.emit_node(node, indent_level, 1, &mut output)?;
        Ok(output)
    }

    fn emit_node(
        &self,
        node: &LayoutNode,
        indent: usize,
        depth: usize,
        output: &mut String,
    ) -> Result<(), ConvertError> {
        if depth > self.max_depth {
            return Err(ConvertError::TooDeep { limit: self.max_depth });
        }
        let indent_str = INDENT.repeat(indent);

        match canonical_tag(&node.tag) {
            "include" => {
                output.push_str(&indent_str);
                output.push_str(&include_comment(node));
                output.push('\n');
                return Ok(());
            }
            "merge" => {
                output.push_str(&format!(
                    "{}// <merge>: these children belong to the layout that includes this one\n",
                    indent_str
                ));
                for child in &node.children {
                    self.emit_node(child, indent, depth + 1, output)?;
                }
                return Ok(());
            }
            "fragment" => {
                output.push_str(&indent_str);
                output.push_str(&fragment_comment(node));
                output.push('\n');
                return Ok(());
            }
            _ => {}
        }

        let attrs = ResolvedAttributes::from_node(node);
        let mapping = map_tag(&node.tag, &attrs);
        let chain = build_modifiers(&attrs, &mapping);

        let comments = attrs
            .preview_comments()
            .map(str::to_string)
            .chain(mapping.leading_comment.clone());
        for comment in comments {
            output.push_str(&format!("{}// {}\n", indent_str, single_line(&comment)));
        }

        let mut args: Vec<String> = mapping
            .params
            .iter()
            .map(|(key, value)| format!("{} = {}", key, value))
            .collect();
        if !chain.is_empty() {
            if chain.is_inline() {
                args.push(format!("modifier = Modifier{}", chain.render()));
            } else {
                let continuation = INDENT.repeat(indent + 2);
                let mut modifier = String::from("modifier = Modifier");
                for segment in chain.segments() {
                    modifier.push('\n');
                    modifier.push_str(&continuation);
                    modifier.push_str(segment);
                }
                args.push(modifier);
            }
        }

        let has_block = !node.children.is_empty() || mapping.content.is_some() || mapping.requires_content;
        let block_is_empty = node.children.is_empty() && mapping.content.is_none();

        // Opening line(s)
        if args.is_empty() {
            output.push_str(&indent_str);
            output.push_str(&mapping.name);
            if !has_block {
                output.push_str("()\n");
                return Ok(());
            }
            output.push(' ');
        } else {
            output.push_str(&format!("{}{}(\n", indent_str, mapping.name));
            let last = args.len() - 1;
            for (i, arg) in args.iter().enumerate() {
                output.push_str(&indent_str);
                output.push_str(INDENT);
                output.push_str(arg);
                if i < last {
                    output.push(',');
                }
                output.push('\n');
            }
            output.push_str(&indent_str);
            if !has_block {
                output.push_str(")\n");
                return Ok(());
            }
            output.push_str(") ");
        }

        if block_is_empty {
            output.push_str("{}\n");
            return Ok(());
        }
        output.push_str("{\n");

        let child_indent = INDENT.repeat(indent + 1);
        if let Some(content) = &mapping.content {
            for line in content.lines() {
                output.push_str(&format!("{}{}\n", child_indent, line));
            }
        }

        for child in &node.children {
            if mapping.wraps_children_in_items {
                output.push_str(&format!("{}item {{\n", child_indent));
                self.emit_node(child, indent + 2, depth + 1, output)?;
                output.push_str(&format!("{}}}\n", child_indent));
            } else {
                self.emit_node(child, indent + 1, depth + 1, output)?;
            }
        }

        output.push_str(&format!("{}}}\n", indent_str));
        Ok(())
    }
}

fn include_comment(node: &LayoutNode) -> String {
    match node.attr("layout") {
        Some(layout) => {
            let name = layout.strip_prefix("@layout/").unwrap_or(layout);
            format!(
                "// TODO: <include layout=\"{}\"/> - call the composable converted from that layout, e.g. {}()",
                single_line(layout),
                pascal_case(name)
            )
        }
        None => "// TODO: <include> without a layout attribute".to_string(),
    }
}

fn fragment_comment(node: &LayoutNode) -> String {
    let class = node
        .find_attr("name")
        .map(|name| format!(" {}", single_line(name)))
        .unwrap_or_default();
    format!(
        "// TODO: fragment{} - port its UI to a composable or host it with AndroidView",
        class
    )
}

/// `activity_main` -> `ActivityMain`
pub fn pascal_case(name: &str) -> String {
    name.split(|c: char| c == '_' || c == '-' || c == '.' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect()
}
