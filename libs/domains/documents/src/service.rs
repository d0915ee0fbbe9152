use std::sync::Arc;
use validator::{Validate, ValidationErrors};

use crate::error::{DocumentError, DocumentResult};
use crate::models::{
    Document, DocumentChanges, NewDocument, SaveDocument, SaveOutcome, UpdateDocument,
    normalize_categories, parse_document_ids,
};
use crate::repository::DocumentRepository;

/// Service layer for Document business logic
pub struct DocumentService<R: DocumentRepository> {
    repository: Arc<R>,
}

impl<R: DocumentRepository> Clone for DocumentService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: DocumentRepository> DocumentService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Shared handle to the underlying store, for lookups from other domains
    pub fn repository(&self) -> Arc<R> {
        Arc::clone(&self.repository)
    }

    /// Create a document; a taken `document_id` is a validation error
    pub async fn create_document(&self, input: SaveDocument) -> DocumentResult<Document> {
        let new_document = prepare_new(input)?;
        self.repository.create(new_document).await
    }

    /// Create the document, or update it in place when the external id exists
    pub async fn save_document(
        &self,
        input: SaveDocument,
    ) -> DocumentResult<(Document, SaveOutcome)> {
        let replace_categories = input.category_names.is_some();
        let new_document = prepare_new(input)?;

        if self
            .repository
            .get_by_document_id(&new_document.document_id)
            .await?
            .is_some()
        {
            return self.overwrite(new_document, replace_categories).await;
        }

        match self.repository.create(new_document.clone()).await {
            Ok(document) => Ok((document, SaveOutcome::Created)),
            // Lost a race with a concurrent insert of the same id
            Err(DocumentError::Duplicate(_)) => {
                self.overwrite(new_document, replace_categories).await
            }
            Err(e) => Err(e),
        }
    }

    /// Overwrite supplied fields. `category_names`, when present, replaces
    /// the whole category set.
    pub async fn update_document(
        &self,
        document_id: &str,
        input: UpdateDocument,
    ) -> DocumentResult<Document> {
        input.validate().map_err(first_field_error)?;

        let changes = DocumentChanges {
            name: input.name,
            version: input.version,
            public_link: input.public_link,
            internal_link: input.internal_link,
            categories: input.category_names.map(normalize_categories).transpose()?,
        };

        self.repository
            .update(document_id, changes)
            .await?
            .ok_or_else(|| DocumentError::NotFound(document_id.to_string()))
    }

    /// Documents named in a comma-separated id list, in creation order.
    /// An absent or empty list yields no documents.
    pub async fn list_documents(&self, document_ids: Option<&str>) -> DocumentResult<Vec<Document>> {
        let ids = document_ids.map(parse_document_ids).unwrap_or_default();
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.repository.list_by_document_ids(&ids).await
    }

    /// Categories are only touched when the request named them
    async fn overwrite(
        &self,
        input: NewDocument,
        replace_categories: bool,
    ) -> DocumentResult<(Document, SaveOutcome)> {
        let document_id = input.document_id.clone();
        let changes = DocumentChanges {
            name: Some(input.name),
            version: Some(input.version),
            public_link: input.public_link,
            internal_link: input.internal_link,
            categories: replace_categories.then_some(input.categories),
        };

        let document = self
            .repository
            .update(&document_id, changes)
            .await?
            .ok_or(DocumentError::NotFound(document_id))?;

        Ok((document, SaveOutcome::Updated))
    }
}

fn prepare_new(input: SaveDocument) -> DocumentResult<NewDocument> {
    input.validate().map_err(first_field_error)?;

    Ok(NewDocument {
        document_id: input.document_id.trim().to_string(),
        name: input.name,
        version: input.version,
        public_link: input.public_link,
        internal_link: input.internal_link,
        categories: normalize_categories(input.category_names.unwrap_or_default())?,
    })
}

fn first_field_error(errors: ValidationErrors) -> DocumentError {
    let field_errors = errors.field_errors();
    let Some((field, errs)) = field_errors.iter().next() else {
        return DocumentError::Validation {
            field: "non_field_errors",
            message: errors.to_string(),
        };
    };

    let field = match field.as_ref() {
        "document_id" => "document_id",
        "name" => "name",
        "version" => "version",
        "public_link" => "public_link",
        "internal_link" => "internal_link",
        _ => "non_field_errors",
    };
    let message = errs
        .first()
        .and_then(|e| e.message.as_ref())
        .map(|m| m.to_string())
        .unwrap_or_else(|| "Invalid value.".to_string());

    DocumentError::Validation { field, message }
}
