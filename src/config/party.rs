use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One side of the invoice: the issuer or the recipient.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Party {
    /// Display name. A literal `\n` in the string starts a new line.
    pub name: String,
    #[serde(default)]
    pub address: Vec<String>,
    /// Free-form `label: value` rows (tax id, phone, ...). Rendered in key order.
    #[serde(default)]
    pub details: HashMap<String, String>,
}

impl Party {
    pub fn new(name: impl Into<String>, address: &[&str]) -> Self {
        Self {
            name: name.into(),
            address: address.iter().map(|line| line.to_string()).collect(),
            details: HashMap::new(),
        }
    }

    /// Detail rows as `key: value`, sorted by key.
    pub fn detail_lines(&self) -> Vec<String> {
        let mut keys: Vec<&String> = self.details.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|k| format!("{}: {}", k, self.details[k]))
            .collect()
    }
}

/// Split a multi-line field on real newlines or the literal `\n` escape.
pub fn split_lines(text: &str) -> Vec<String> {
    text.replace("\\n", "\n")
        .split('\n')
        .map(str::to_string)
        .collect()
}
