use serde::Deserialize;

/// One element in the page tree emitted by the page host's `extract` command.
///
/// `text` is the trimmed rendered text of the element's subtree (what the
/// browser reports as innerText), not just the element's own text nodes.
#[derive(Debug, Clone, Deserialize)]
pub struct DomNode {
    pub tag: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub input_type: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(rename = "for", default)]
    pub for_target: Option<String>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub children: Vec<DomNode>,
}
