use serde::{Deserialize, Serialize};

/// One form control captured at scan time. `value` is the value at scan
/// time and may be stale once the user edits the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputDescriptor {
    /// Matching identifier: element name, falling back to id, then empty.
    /// Not guaranteed unique across the page.
    pub name: String,
    #[serde(rename = "type")]
    pub input_type: String,
    pub value: String,
    /// Best-effort caption; empty when none was found.
    pub label: String,
    /// Best-effort nearby free text, used as a fallback matching signal.
    #[serde(rename = "surroundingText")]
    pub surrounding_text: String,
}

/// One form element with its controls in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDescriptor {
    pub action: String,
    pub method: String,
    pub inputs: Vec<InputDescriptor>,
}

/// Every form on the page at one point in time, decoupled from subsequent
/// DOM mutation. Replaced wholesale by the next scan, never edited in place.
///
/// Serializes transparently as the array of forms the assistant service
/// expects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageSnapshot {
    pub forms: Vec<FormDescriptor>,
}

impl PageSnapshot {
    pub fn form_count(&self) -> usize {
        self.forms.len()
    }

    pub fn input_count(&self) -> usize {
        self.forms.iter().map(|f| f.inputs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    /// Stable hex digest of the serialized snapshot. Two scans of an
    /// unchanged page produce the same fingerprint.
    pub fn fingerprint(&self) -> String {
        use sha1::{Digest, Sha1};

        let json = serde_json::to_string(self).unwrap_or_default();
        let mut hasher = Sha1::new();
        hasher.update(json.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}
