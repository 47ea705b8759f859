use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// An ordered list of text fragments stored as a JSON array column.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct TextList(pub Vec<String>);

impl TextList {
    /// Non-blank fragments, trimmed and joined with single spaces.
    pub fn joined(&self) -> String {
        self.0
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<String>> for TextList {
    fn from(items: Vec<String>) -> Self {
        Self(items)
    }
}
