use serde_json::Value;

use crate::dom::node::DomNode;

pub type NodeId = usize;

/// One element with its tree links resolved.
#[derive(Debug, Clone)]
pub struct Node {
    pub tag: String,
    pub id: Option<String>,
    pub name: Option<String>,
    pub input_type: Option<String>,
    pub value: Option<String>,
    pub for_target: Option<String>,
    pub action: Option<String>,
    pub method: Option<String>,
    pub text: Option<String>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl Node {
    /// Matching identifier: name attribute, falling back to id, then empty.
    pub fn resolved_name(&self) -> String {
        self.name
            .clone()
            .or_else(|| self.id.clone())
            .unwrap_or_default()
    }

    /// Control type: the type attribute, falling back to the tag name.
    pub fn resolved_type(&self) -> String {
        self.input_type.clone().unwrap_or_else(|| self.tag.clone())
    }

    pub fn is_control(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "textarea" | "select")
    }
}

/// An extracted page held as a flat arena in document (preorder) order.
///
/// The root is the page body. The arena is append-only apart from value
/// assignment, so NodeIds stay valid for the life of the document.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Document {
    pub fn from_tree(root: DomNode) -> Self {
        let mut nodes = Vec::new();
        let root_id = add_subtree(&mut nodes, root, None);
        Document { nodes, root: root_id }
    }

    /// Deserialize the page host's extract payload into a document.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let tree: DomNode = serde_json::from_value(value)?;
        Ok(Document::from_tree(tree))
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in document order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        0..self.nodes.len()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    /// Element siblings before `id`, nearest first.
    pub fn prev_siblings(&self, id: NodeId) -> Vec<NodeId> {
        let Some(parent) = self.nodes[id].parent else {
            return Vec::new();
        };
        let siblings = &self.nodes[parent].children;
        let pos = siblings.iter().position(|&c| c == id).unwrap_or(0);
        siblings[..pos].iter().rev().copied().collect()
    }

    /// Element siblings after `id`, nearest first.
    pub fn next_siblings(&self, id: NodeId) -> Vec<NodeId> {
        let Some(parent) = self.nodes[id].parent else {
            return Vec::new();
        };
        let siblings = &self.nodes[parent].children;
        let pos = siblings
            .iter()
            .position(|&c| c == id)
            .unwrap_or(siblings.len());
        siblings[pos + 1..].to_vec()
    }

    /// Descendants of `id` in document order, excluding `id` itself.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[id].children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.nodes[next].children.iter().rev().copied());
        }
        out
    }

    /// The node's rendered text, trimmed; None when empty or absent.
    pub fn rendered_text(&self, id: NodeId) -> Option<&str> {
        let text = self.nodes[id].text.as_deref()?.trim();
        if text.is_empty() { None } else { Some(text) }
    }

    /// The node's rendered text, trimmed; empty string when absent.
    pub fn text(&self, id: NodeId) -> &str {
        self.nodes[id].text.as_deref().unwrap_or("").trim()
    }

    /// First `label` element whose `for` attribute equals `target_id`.
    pub fn label_for(&self, target_id: &str) -> Option<NodeId> {
        self.ids().find(|&id| {
            let node = &self.nodes[id];
            node.tag == "label" && node.for_target.as_deref() == Some(target_id)
        })
    }

    /// Assign `value` to the first control whose name attribute matches.
    /// Mirrors the live lookup the reconciler performs: name attribute only,
    /// no id fallback. Returns false when no such control exists.
    pub fn set_value_by_name(&mut self, name: &str, value: &str) -> bool {
        if name.is_empty() {
            return false;
        }
        for id in 0..self.nodes.len() {
            let node = &self.nodes[id];
            if node.is_control() && node.name.as_deref() == Some(name) {
                self.nodes[id].value = Some(value.to_string());
                return true;
            }
        }
        false
    }
}

fn add_subtree(nodes: &mut Vec<Node>, tree: DomNode, parent: Option<NodeId>) -> NodeId {
    let id = nodes.len();
    nodes.push(Node {
        tag: tree.tag,
        id: tree.id,
        name: tree.name,
        input_type: tree.input_type,
        value: tree.value,
        for_target: tree.for_target,
        action: tree.action,
        method: tree.method,
        text: tree.text,
        parent,
        children: Vec::new(),
    });
    for child in tree.children {
        let child_id = add_subtree(nodes, child, Some(id));
        nodes[id].children.push(child_id);
    }
    id
}
