//! Markup re-serialization and visible-text extraction

use super::{Element, Node};

pub(crate) fn write_nodes(nodes: &[Node], output: &mut String) {
    for node in nodes {
        write_node(node, output);
    }
}

fn write_node(node: &Node, output: &mut String) {
    match node {
        Node::Text(text) => escape_text(text, output),
        Node::Comment(body) => {
            output.push_str("<!--");
            output.push_str(body);
            output.push_str("-->");
        }
        Node::Declaration(body) => {
            output.push_str("<!");
            output.push_str(body);
            output.push('>');
        }
        Node::ProcessingInstruction(body) => {
            output.push_str("<?");
            output.push_str(body);
            output.push('>');
        }
        Node::Element(element) => write_element(element, output),
    }
}

fn write_element(element: &Element, output: &mut String) {
    output.push('<');
    output.push_str(&element.name);
    for attr in &element.attrs {
        output.push(' ');
        output.push_str(&attr.name);
        output.push('=');
        write_attr_value(&attr.value, output);
    }

    if element.is_void() {
        output.push_str("/>");
        return;
    }
    output.push('>');

    if element.is_raw_text() {
        for child in &element.children {
            if let Node::Text(text) = child {
                output.push_str(text);
            }
        }
    } else {
        write_nodes(&element.children, output);
    }

    output.push_str("</");
    output.push_str(&element.name);
    output.push('>');
}

/// Quote an attribute value: double quotes unless the value holds `"` but no `'`
fn write_attr_value(value: &str, output: &mut String) {
    let has_double = value.contains('"');
    let quote = if has_double && !value.contains('\'') {
        '\''
    } else {
        '"'
    };

    output.push(quote);
    for ch in value.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            '"' if quote == '"' => output.push_str("&quot;"),
            _ => output.push(ch),
        }
    }
    output.push(quote);
}

fn escape_text(text: &str, output: &mut String) {
    for ch in text.chars() {
        match ch {
            '&' => output.push_str("&amp;"),
            '<' => output.push_str("&lt;"),
            '>' => output.push_str("&gt;"),
            _ => output.push(ch),
        }
    }
}

/// Concatenate text nodes in document order, skipping raw-text element bodies
pub(crate) fn collect_text(nodes: &[Node], output: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => output.push_str(text),
            Node::Element(element) if !element.is_raw_text() => {
                collect_text(&element.children, output);
            }
            _ => {}
        }
    }
}
