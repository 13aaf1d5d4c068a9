//! Human-readable dump of the tree, one node per line, root first.

use std::fmt::Display;

use super::ast::{Bound, ForBounds, Node};

impl Display for Bound {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bound::Literal(value) => write!(f, "{}", value),
            Bound::Value(node) => write!(f, "{}", node.content.as_deref().unwrap_or("...")),
            Bound::Offset(node, delta) => write!(
                f,
                "{}{:+}",
                node.content.as_deref().unwrap_or("..."),
                delta
            ),
            Bound::Negated(node) => write!(f, "-{}", node.content.as_deref().unwrap_or("...")),
        }
    }
}

impl Display for ForBounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} in [{}, {}) step {}",
            self.variable, self.start, self.stop, self.step
        )
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut annotations = Vec::new();
        if let Some(data_type) = self.annotations.data_type {
            annotations.push(format!("tipo: {}", data_type));
        }
        if let Some(range) = &self.annotations.range {
            annotations.push(format!("rango: {}", range));
        }

        let children = self
            .children
            .iter()
            .map(|child| format!("<{}>", child.kind))
            .collect::<Vec<String>>()
            .join(" ");

        write!(
            f,
            "{:30}\t{:10}\t{:38}{}",
            self.kind.to_string(),
            self.content.as_deref().unwrap_or(""),
            format!("{{{}}}", annotations.join(", ")),
            children
        )
    }
}

/// Collects the preorder listing of the tree rooted at `node`.
pub fn preorder(node: &Node) -> Vec<String> {
    let mut lines = vec![node.to_string()];
    for child in &node.children {
        lines.extend(preorder(child));
    }
    lines
}

pub fn print_preorder(node: &Node) {
    for line in preorder(node) {
        println!("{}", line);
    }
}
