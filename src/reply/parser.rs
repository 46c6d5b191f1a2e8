/// An assistant reply parsed as `field: value` per line.
///
/// Iteration order is the order fields first appeared; a later line with an
/// already-seen field overwrites the earlier value (last write wins).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedReply {
    entries: Vec<(String, String)>,
}

impl ParsedReply {
    pub fn parse(text: &str) -> Self {
        let mut reply = ParsedReply::default();
        for line in text.split('\n') {
            if let Some((field, answer)) = split_field_line(line) {
                reply.insert(field, answer);
            }
        }
        reply
    }

    fn insert(&mut self, field: &str, answer: &str) {
        match self.entries.iter_mut().find(|(f, _)| f == field) {
            Some(entry) => entry.1 = answer.to_string(),
            None => self.entries.push((field.to_string(), answer.to_string())),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| f == field)
            .map(|(_, a)| a.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(f, a)| (f.as_str(), a.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split a line on the first colon that is followed by whitespace.
///
/// Both sides are trimmed; the line contributes an entry only when both are
/// non-empty. Any further colons stay in the answer verbatim. Lines without
/// the separator yield None, which is not an error condition.
fn split_field_line(line: &str) -> Option<(&str, &str)> {
    let mut chars = line.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if c != ':' {
            continue;
        }
        match chars.peek() {
            Some((_, next)) if next.is_whitespace() => {
                let field = line[..i].trim();
                let answer = line[i + 1..].trim();
                if field.is_empty() || answer.is_empty() {
                    return None;
                }
                return Some((field, answer));
            }
            _ => {}
        }
    }

    None
}
