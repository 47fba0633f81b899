//! Piece catalog - loads piece templates from a text resource
//!
//! Resource format: records separated by a line containing exactly `---`.
//! Anything before the first delimiter is ignored. Each record is
//! `<key>:<color>:<shape block>`, where the shape block is a run of lines of
//! `0`/`1` digits. The fragment after the second `:` on the header line and
//! the empty fragment after the final newline are structural and dropped.
//!
//! ```text
//! ---
//! T:#A000F0:
//! 0100
//! 1100
//! 0100
//! 0000
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use log::debug;

use crate::error::{CatalogError, ParseError};
use crate::pieces::{PieceTemplate, ShapeMatrix};
use crate::rng::Randomizer;
use crate::types::PieceColor;

/// Line separating two records
pub const RECORD_DELIMITER: &str = "---";

/// Immutable, ordered mapping from piece key to template.
#[derive(Debug, Clone)]
pub struct PieceCatalog {
    templates: Vec<Arc<PieceTemplate>>,
    index: HashMap<Arc<str>, usize>,
}

impl PieceCatalog {
    /// Parse a piece resource.
    ///
    /// # Examples
    ///
    /// ```
    /// use simple_tetris_core::PieceCatalog;
    ///
    /// let text = "---\nO:#FFFF00:\n11\n11\n";
    /// let catalog = PieceCatalog::parse(text).unwrap();
    /// assert_eq!(catalog.len(), 1);
    /// assert_eq!(catalog.get("O").unwrap().offsets(), &[(0, 0), (0, 1), (1, 0), (1, 1)]);
    /// ```
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut templates = Vec::new();
        let mut index = HashMap::new();

        for (i, record) in split_records(text).iter().enumerate() {
            let number = i + 1;
            let template = parse_record(number, record)?;
            let key: Arc<str> = Arc::from(template.key());
            if index.contains_key(&key) {
                return Err(ParseError::DuplicateKey {
                    record: number,
                    key: key.to_string(),
                });
            }
            index.insert(key, templates.len());
            templates.push(Arc::new(template));
        }

        if templates.is_empty() {
            return Err(ParseError::Empty);
        }

        debug!("loaded {} piece templates", templates.len());
        Ok(Self { templates, index })
    }

    /// Read and parse a piece resource from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text)?)
    }

    pub fn get(&self, key: &str) -> Option<&Arc<PieceTemplate>> {
        self.index.get(key).map(|&i| &self.templates[i])
    }

    /// Keys in resource order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|t| t.key())
    }

    pub fn templates(&self) -> &[Arc<PieceTemplate>] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Pick a template uniformly at random.
    pub fn choose(&self, rng: &mut impl Randomizer) -> Arc<PieceTemplate> {
        let n = self.templates.len();
        let i = rng.next_range(n as u32) as usize % n;
        Arc::clone(&self.templates[i])
    }
}

/// Split the resource into record bodies, each ending with a newline.
fn split_records(text: &str) -> Vec<String> {
    let mut records = Vec::new();
    let mut current: Option<String> = None;

    for line in text.lines() {
        if line.trim_end() == RECORD_DELIMITER {
            if let Some(done) = current.take() {
                records.push(done);
            }
            current = Some(String::new());
            continue;
        }
        if let Some(body) = current.as_mut() {
            body.push_str(line);
            body.push('\n');
        }
    }

    if let Some(done) = current {
        // A delimiter at the very end of the file opens no record.
        if !done.trim().is_empty() {
            records.push(done);
        }
    }
    records
}

fn parse_record(number: usize, record: &str) -> Result<PieceTemplate, ParseError> {
    let mut fields = record.splitn(3, ':');
    let key = fields.next().map(str::trim).unwrap_or_default();
    if key.is_empty() {
        return Err(ParseError::MissingField {
            record: number,
            field: "key",
        });
    }
    let color = fields.next().map(str::trim).unwrap_or_default();
    if color.is_empty() {
        return Err(ParseError::MissingField {
            record: number,
            field: "color",
        });
    }
    let Some(block) = fields.next() else {
        return Err(ParseError::MissingField {
            record: number,
            field: "shape",
        });
    };

    let fragments: Vec<&str> = block.split('\n').collect();
    let mut rows: Vec<&str> = if fragments.len() > 2 {
        fragments[1..fragments.len() - 1]
            .iter()
            .map(|row| row.trim())
            .collect()
    } else {
        Vec::new()
    };
    while rows.last().is_some_and(|row| row.is_empty()) {
        rows.pop();
    }
    if rows.is_empty() {
        return Err(ParseError::MissingField {
            record: number,
            field: "shape",
        });
    }

    let shape = ShapeMatrix::parse_rows(&rows).map_err(|source| ParseError::Shape {
        record: number,
        key: key.to_string(),
        source,
    })?;

    Ok(PieceTemplate::new(key, PieceColor::new(color), shape))
}
