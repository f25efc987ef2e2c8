//! HTML serialization of a [`Document`] subtree.

use crate::document::{Document, NodeData};
use std::collections::BTreeMap;
use trellis_core::{HostNode, HostResult};

/// Options for HTML output
#[derive(Debug, Clone)]
pub struct HtmlOptions {
    /// Put element children on their own indented lines
    pub pretty: bool,
    /// Indentation string
    pub indent: String,
}

impl HtmlOptions {
    pub fn compact() -> Self {
        Self {
            pretty: false,
            ..Self::default()
        }
    }
}

impl Default for HtmlOptions {
    fn default() -> Self {
        Self {
            pretty: true,
            indent: "  ".to_string(),
        }
    }
}

struct Context<'a> {
    options: &'a HtmlOptions,
    depth: usize,
    buffer: String,
}

impl<'a> Context<'a> {
    fn new(options: &'a HtmlOptions) -> Self {
        Self {
            options,
            depth: 0,
            buffer: String::new(),
        }
    }

    fn add(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    fn add_line_break(&mut self) {
        self.add("\n");
        for _ in 0..self.depth {
            self.buffer.push_str(&self.options.indent);
        }
    }

    fn indent(&mut self) {
        self.depth += 1;
    }

    fn dedent(&mut self) {
        if self.depth > 0 {
            self.depth -= 1;
        }
    }

    fn get_output(self) -> String {
        self.buffer
    }
}

impl Document {
    /// Markup for `node` itself and everything below it
    pub fn outer_html(&self, node: HostNode, options: &HtmlOptions) -> HostResult<String> {
        let mut ctx = Context::new(options);
        self.write_node(node, &mut ctx)?;
        Ok(ctx.get_output())
    }

    /// Markup for the children of `node`
    pub fn inner_html(&self, node: HostNode, options: &HtmlOptions) -> HostResult<String> {
        let mut ctx = Context::new(options);
        for (i, child) in self.children(node).iter().enumerate() {
            if i > 0 && options.pretty {
                ctx.add("\n");
            }
            self.write_node(*child, &mut ctx)?;
        }
        Ok(ctx.get_output())
    }

    fn write_node(&self, node: HostNode, ctx: &mut Context<'_>) -> HostResult<()> {
        match self.data(node)? {
            NodeData::Text(text) => {
                ctx.add(&escape_html(text));
                Ok(())
            }
            NodeData::Element {
                tag, attributes, ..
            } => self.write_element(node, tag, attributes, ctx),
        }
    }

    fn write_element(
        &self,
        node: HostNode,
        tag: &str,
        attributes: &BTreeMap<String, String>,
        ctx: &mut Context<'_>,
    ) -> HostResult<()> {
        ctx.add(&format!("<{}", tag));
        for (name, value) in attributes {
            ctx.add(&format!(" {}=\"{}\"", name, escape_html(value)));
        }

        let children = self.children(node);
        if children.is_empty() && is_self_closing(tag) {
            ctx.add(" />");
            return Ok(());
        }
        ctx.add(">");

        if ctx.options.pretty && self.has_element_children(children) {
            ctx.indent();
            for child in children {
                if self.is_blank_text(*child) {
                    continue;
                }
                ctx.add_line_break();
                self.write_node(*child, ctx)?;
            }
            ctx.dedent();
            ctx.add_line_break();
        } else {
            for child in children {
                self.write_node(*child, ctx)?;
            }
        }

        ctx.add(&format!("</{}>", tag));
        Ok(())
    }

    fn has_element_children(&self, children: &[HostNode]) -> bool {
        children.iter().any(|child| self.tag(*child).is_some())
    }

    fn is_blank_text(&self, node: HostNode) -> bool {
        matches!(self.data(node), Ok(NodeData::Text(text)) if text.trim().is_empty())
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn is_self_closing(tag: &str) -> bool {
    matches!(
        tag,
        "img"
            | "input"
            | "br"
            | "hr"
            | "meta"
            | "link"
            | "area"
            | "base"
            | "col"
            | "embed"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}
