//! Categorical columns backed by an insertion-ordered level dictionary.
//!
//! In explicit mode the levels are fixed at construction and unseen labels
//! become NA with a warning. In implicit mode levels are appended in the
//! order they are first seen. A label's index never changes once assigned.

use super::column::{ColumnClass, ColumnData, ColumnMetadata, TypedColumn, resize_values};
use super::Collect;
use super::text::transcode_token;
use crate::constants::{actual, expected};
use crate::encoding::Transcoder;
use crate::token::{Token, TokenType};
use crate::warnings::WarningSink;
use std::collections::HashMap;
use tracing::debug;

/// Ordered labels plus a label to index map. `None` is the NA label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LevelDictionary {
    levels: Vec<Option<String>>,
    index: HashMap<Option<String>, u32>,
}

impl LevelDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dictionary seeded with `levels`; duplicates keep their first position
    pub fn from_levels(levels: impl IntoIterator<Item = Option<String>>) -> Self {
        let mut dict = Self::new();
        for level in levels {
            dict.insert(level);
        }
        dict
    }

    pub fn get(&self, label: &Option<String>) -> Option<u32> {
        self.index.get(label).copied()
    }

    /// Index of `label`, appending it if unseen
    pub fn insert(&mut self, label: Option<String>) -> u32 {
        if let Some(&idx) = self.index.get(&label) {
            return idx;
        }
        let idx = self.levels.len() as u32;
        self.levels.push(label.clone());
        self.index.insert(label, idx);
        idx
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn levels(&self) -> &[Option<String>] {
        &self.levels
    }
}

#[derive(Debug, Clone)]
pub struct FactorCollector {
    transcoder: Transcoder,
    dictionary: LevelDictionary,
    implicit_levels: bool,
    ordered: bool,
    include_na: bool,
    values: Vec<Option<u32>>,
}

impl FactorCollector {
    /// `levels = None` discovers levels from the data
    pub fn new(
        transcoder: Transcoder,
        levels: Option<Vec<Option<String>>>,
        ordered: bool,
        include_na: bool,
    ) -> Self {
        let implicit_levels = levels.is_none();
        Self {
            transcoder,
            dictionary: levels.map(LevelDictionary::from_levels).unwrap_or_default(),
            implicit_levels,
            ordered,
            include_na,
            values: Vec::new(),
        }
    }

    pub fn dictionary(&self) -> &LevelDictionary {
        &self.dictionary
    }

    fn insert(&mut self, i: usize, label: Option<String>, token: &Token<'_>, sink: &WarningSink) {
        if let Some(idx) = self.dictionary.get(&label) {
            self.values[i] = Some(idx);
            return;
        }

        if self.implicit_levels || (self.include_na && label.is_none()) {
            debug!("New factor level {:?} at row {}", label, token.row());
            self.values[i] = Some(self.dictionary.insert(label));
        } else {
            let shown = label.as_deref().unwrap_or(actual::NA);
            sink.warn(token.row(), token.col(), expected::LEVEL_SET, shown);
            self.values[i] = None;
        }
    }
}

impl Collect for FactorCollector {
    fn set_value(&mut self, i: usize, token: &Token<'_>, sink: &WarningSink) {
        match token.token_type() {
            TokenType::String => {
                let label = transcode_token(&self.transcoder, token, sink);
                self.insert(i, Some(label), token, sink);
            }
            TokenType::Empty => self.insert(i, Some(String::new()), token, sink),
            TokenType::Missing if self.include_na => self.insert(i, None, token, sink),
            TokenType::Missing | TokenType::Eof => self.values[i] = None,
        }
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn resize(&mut self, n: usize) {
        resize_values(&mut self.values, n);
    }

    fn vector(&self) -> TypedColumn {
        TypedColumn {
            data: ColumnData::Factor(self.values.clone()),
            metadata: ColumnMetadata {
                levels: Some(self.dictionary.levels().to_vec()),
                ..ColumnMetadata::with_class(ColumnClass::Factor {
                    ordered: self.ordered,
                })
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dictionary_first_seen_order() {
        let mut dict = LevelDictionary::new();
        assert_eq!(dict.insert(Some("b".into())), 0);
        assert_eq!(dict.insert(Some("a".into())), 1);
        assert_eq!(dict.insert(Some("b".into())), 0);
        assert_eq!(dict.insert(None), 2);
        assert_eq!(dict.len(), 3);
        assert_eq!(dict.get(&Some("a".into())), Some(1));
        assert_eq!(dict.get(&Some("z".into())), None);
    }

    #[test]
    fn test_dictionary_from_levels_dedupes() {
        let dict = LevelDictionary::from_levels(vec![
            Some("x".to_string()),
            Some("y".to_string()),
            Some("x".to_string()),
        ]);
        assert_eq!(dict.levels(), &[Some("x".to_string()), Some("y".to_string())]);
    }
}
