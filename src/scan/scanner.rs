use crate::dom::document::{Document, NodeId};
use crate::scan::describe::describe_input;
use crate::scan::snapshot::{FormDescriptor, PageSnapshot};

/// Enumerate every form on the page, in document order, into a fresh
/// snapshot. Pure read of the current document; scanning an unchanged
/// document twice yields structurally identical snapshots.
pub fn scan_page(doc: &Document) -> PageSnapshot {
    let forms = doc
        .ids()
        .filter(|&id| doc.node(id).tag == "form")
        .map(|id| scan_form(doc, id))
        .collect();

    PageSnapshot { forms }
}

fn scan_form(doc: &Document, form: NodeId) -> FormDescriptor {
    let node = doc.node(form);

    let inputs = doc
        .descendants(form)
        .into_iter()
        .filter(|&id| {
            let control = doc.node(id);
            // Hidden controls are never included.
            control.is_control() && control.resolved_type() != "hidden"
        })
        .map(|id| describe_input(doc, id))
        .collect();

    FormDescriptor {
        action: node.action.clone().unwrap_or_default(),
        method: node.method.clone().unwrap_or_default(),
        inputs,
    }
}
