//! In-memory implementation of the URL registry.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::json;

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

#[derive(Debug, Default)]
struct Indices {
    by_id: HashMap<String, UrlRecord>,
    id_by_code: HashMap<String, String>,
    id_by_url: HashMap<String, String>,
}

impl Indices {
    fn resolve(&self, id: Option<&String>) -> Result<Option<UrlRecord>, AppError> {
        let Some(id) = id else {
            return Ok(None);
        };

        match self.by_id.get(id) {
            Some(record) => Ok(Some(record.clone())),
            None => Err(AppError::internal(
                "URL registry index out of sync",
                json!({ "id": id }),
            )),
        }
    }
}

/// URL registry holding its id, code and normalized-URL indices behind one
/// reader/writer lock, so every write updates all three atomically.
#[derive(Debug, Default)]
pub struct MemoryUrlRepository {
    inner: RwLock<Indices>,
}

impl MemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UrlRepository for MemoryUrlRepository {
    async fn save(&self, record: UrlRecord) -> Result<UrlRecord, AppError> {
        let mut indices = self.inner.write();

        if indices.by_id.contains_key(&record.id) {
            return Err(AppError::conflict(
                "Record id already exists",
                json!({ "id": record.id }),
            ));
        }
        if indices.id_by_code.contains_key(&record.code) {
            return Err(AppError::conflict(
                "Short code already exists",
                json!({ "code": record.code }),
            ));
        }
        if let Some(existing) = indices.id_by_url.get(&record.original_url) {
            return Err(AppError::conflict(
                "URL already registered",
                json!({ "url": record.original_url, "id": existing }),
            ));
        }

        indices
            .id_by_code
            .insert(record.code.clone(), record.id.clone());
        indices
            .id_by_url
            .insert(record.original_url.clone(), record.id.clone());
        indices.by_id.insert(record.id.clone(), record.clone());

        Ok(record)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        let indices = self.inner.read();
        indices.resolve(indices.id_by_code.get(code))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<UrlRecord>, AppError> {
        Ok(self.inner.read().by_id.get(id).cloned())
    }

    async fn find_by_normalized_url(&self, url: &str) -> Result<Option<UrlRecord>, AppError> {
        let indices = self.inner.read();
        indices.resolve(indices.id_by_url.get(url))
    }

    async fn delete(&self, id: &str) -> Result<UrlRecord, AppError> {
        let mut indices = self.inner.write();

        let record = indices
            .by_id
            .remove(id)
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "id": id })))?;
        indices.id_by_code.remove(&record.code);
        indices.id_by_url.remove(&record.original_url);

        Ok(record)
    }

    async fn count(&self) -> Result<usize, AppError> {
        Ok(self.inner.read().by_id.len())
    }
}
