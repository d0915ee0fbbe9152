//! Sea-ORM entities for documents, categories and their junction table

pub mod category;
pub mod document;
pub mod document_category;

use crate::models::Document;

/// Assemble the domain document from a row and its attached categories.
pub fn into_document(model: document::Model, categories: Vec<category::Model>) -> Document {
    let mut categories: Vec<String> = categories.into_iter().map(|c| c.name).collect();
    categories.sort();

    Document {
        id: model.id,
        document_id: model.document_id,
        name: model.name,
        version: model.version,
        public_link: model.public_link,
        internal_link: model.internal_link,
        categories,
        last_modified: model.last_modified.into(),
    }
}
