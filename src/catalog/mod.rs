use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

const MOCK_SOURCE_BASE: &str = "https://picsum.photos/600/400";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoRecord {
    pub id: u64,
    pub source_url: String,
}

impl PhotoRecord {
    pub fn new(id: u64, source_url: impl Into<String>) -> Self {
        Self {
            id,
            source_url: source_url.into(),
        }
    }
}

pub type CatalogResult<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("duplicate photo id {id} at position {position}")]
    DuplicateId { id: u64, position: usize },
}

/// Ordered, read-only photo list. Order defines navigation and filmstrip order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    photos: Vec<PhotoRecord>,
}

impl Catalog {
    pub fn new(photos: Vec<PhotoRecord>) -> CatalogResult<Self> {
        let mut seen = HashSet::with_capacity(photos.len());
        for (position, photo) in photos.iter().enumerate() {
            if !seen.insert(photo.id) {
                return Err(CatalogError::DuplicateId {
                    id: photo.id,
                    position,
                });
            }
        }
        Ok(Self { photos })
    }

    /// Placeholder catalog backed by a random-image service.
    pub fn mock(count: usize) -> Self {
        let photos = (0..count as u64)
            .map(|id| PhotoRecord::new(id, format!("{MOCK_SOURCE_BASE}?random={id}")))
            .collect();
        Self { photos }
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PhotoRecord> {
        self.photos.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PhotoRecord> {
        self.photos.iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a PhotoRecord;
    type IntoIter = std::slice::Iter<'a, PhotoRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
