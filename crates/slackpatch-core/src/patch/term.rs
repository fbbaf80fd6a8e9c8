use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// A configured (search, replacement) pair.
///
/// Both sides are ASCII with no embedded nulls and at least one byte long;
/// `validate` enforces this before a table is used for scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermPair {
    pub search: String,
    pub replacement: String,
}

impl TermPair {
    pub fn new(search: &str, replacement: &str) -> Result<Self> {
        let pair = Self {
            search: search.to_string(),
            replacement: replacement.to_string(),
        };
        pair.validate()?;
        Ok(pair)
    }

    pub fn validate(&self) -> Result<()> {
        validate_term(&self.search)?;
        validate_term(&self.replacement)?;
        Ok(())
    }

    pub fn search_bytes(&self) -> &[u8] {
        self.search.as_bytes()
    }

    pub fn replacement_bytes(&self) -> &[u8] {
        self.replacement.as_bytes()
    }

    /// Length change a replacement causes, in bytes.
    pub fn delta(&self) -> isize {
        self.replacement.len() as isize - self.search.len() as isize
    }
}

fn validate_term(term: &str) -> Result<()> {
    let reason = if term.is_empty() {
        Some("term is empty")
    } else if !term.is_ascii() {
        Some("term contains non-ASCII characters")
    } else if term.bytes().any(|b| b == 0) {
        Some("term contains an embedded null byte")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(Error::InvalidTerm {
            term: term.escape_default().to_string(),
            reason: reason.to_string(),
        }),
        None => Ok(()),
    }
}

/// An ordered list of term pairs, processed in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermTable {
    pub terms: Vec<TermPair>,
}

impl TermTable {
    pub fn new(terms: Vec<TermPair>) -> Self {
        Self { terms }
    }

    /// Build a table from parallel search/replacement lists.
    ///
    /// The lists must have equal length; a mismatch is a configuration error
    /// reported before any pair is constructed.
    pub fn from_lists(searches: &[&str], replacements: &[&str]) -> Result<Self> {
        if searches.len() != replacements.len() {
            return Err(Error::TermCountMismatch {
                searches: searches.len(),
                replacements: replacements.len(),
            });
        }

        let terms = searches
            .iter()
            .zip(replacements)
            .map(|(s, r)| TermPair::new(s, r))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { terms })
    }

    pub fn validate(&self) -> Result<()> {
        for pair in &self.terms {
            pair.validate()?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TermPair> {
        self.terms.iter()
    }
}

/// The default table shipped with the tool: downgrade TLS URLs so the image
/// talks to a plain-HTTP replacement server.
pub fn builtin_terms() -> TermTable {
    TermTable {
        terms: vec![TermPair {
            search: "https://".to_string(),
            replacement: "http://".to_string(),
        }],
    }
}

pub fn load_terms<P: AsRef<Path>>(path: P) -> Result<TermTable> {
    let content = fs::read_to_string(&path)?;
    let table: TermTable = serde_json::from_str(&content)?;
    table.validate()?;
    Ok(table)
}

pub fn save_terms<P: AsRef<Path>>(path: P, table: &TermTable) -> Result<()> {
    let content = serde_json::to_string_pretty(table)?;
    fs::write(path, content)?;
    Ok(())
}
