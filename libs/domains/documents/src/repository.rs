use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{DocumentError, DocumentResult};
use crate::models::{Document, DocumentChanges, NewDocument};

/// Repository trait for Document persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Insert a document, creating any missing categories. Fails with
    /// `Duplicate` when the external id is taken.
    async fn create(&self, input: NewDocument) -> DocumentResult<Document>;

    /// Overwrite fields of an existing document; `None` if it does not exist
    async fn update(
        &self,
        document_id: &str,
        changes: DocumentChanges,
    ) -> DocumentResult<Option<Document>>;

    async fn get_by_document_id(&self, document_id: &str) -> DocumentResult<Option<Document>>;

    /// Documents whose external id is in `document_ids`, in creation order
    async fn list_by_document_ids(&self, document_ids: &[String]) -> DocumentResult<Vec<Document>>;
}

/// In-memory implementation of DocumentRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryDocumentRepository {
    documents: Arc<RwLock<Vec<Document>>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn create(&self, input: NewDocument) -> DocumentResult<Document> {
        let mut documents = self.documents.write().await;

        if documents.iter().any(|d| d.document_id == input.document_id) {
            return Err(DocumentError::Duplicate(input.document_id));
        }

        let document = Document::new(input);
        documents.push(document.clone());

        tracing::info!(document_id = %document.document_id, "Created document");
        Ok(document)
    }

    async fn update(
        &self,
        document_id: &str,
        changes: DocumentChanges,
    ) -> DocumentResult<Option<Document>> {
        let mut documents = self.documents.write().await;
        let Some(document) = documents.iter_mut().find(|d| d.document_id == document_id) else {
            return Ok(None);
        };

        document.apply_changes(changes);

        tracing::info!(document_id = %document_id, "Updated document");
        Ok(Some(document.clone()))
    }

    async fn get_by_document_id(&self, document_id: &str) -> DocumentResult<Option<Document>> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .find(|d| d.document_id == document_id)
            .cloned())
    }

    async fn list_by_document_ids(&self, document_ids: &[String]) -> DocumentResult<Vec<Document>> {
        let documents = self.documents.read().await;
        Ok(documents
            .iter()
            .filter(|d| document_ids.contains(&d.document_id))
            .cloned()
            .collect())
    }
}
