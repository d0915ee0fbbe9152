use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::error::{DocumentError, DocumentResult};

/// HR document with its category tags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Document {
    pub id: Uuid,
    /// External identifier, unique across documents
    pub document_id: String,
    pub name: String,
    pub version: String,
    pub public_link: Option<String>,
    pub internal_link: Option<String>,
    /// Category names, sorted
    pub categories: Vec<String>,
    pub last_modified: DateTime<Utc>,
}

impl Document {
    pub fn new(input: NewDocument) -> Self {
        Self {
            id: Uuid::now_v7(),
            document_id: input.document_id,
            name: input.name,
            version: input.version,
            public_link: input.public_link,
            internal_link: input.internal_link,
            categories: input.categories,
            last_modified: Utc::now(),
        }
    }

    /// Overwrite supplied fields and bump `last_modified`
    pub fn apply_changes(&mut self, changes: DocumentChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(version) = changes.version {
            self.version = version;
        }
        if let Some(public_link) = changes.public_link {
            self.public_link = Some(public_link);
        }
        if let Some(internal_link) = changes.internal_link {
            self.internal_link = Some(internal_link);
        }
        if let Some(categories) = changes.categories {
            self.categories = categories;
        }
        self.last_modified = Utc::now();
    }
}

/// Body of `POST /create_document`. Creates the document, or updates it in
/// place when `document_id` already exists.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SaveDocument {
    #[validate(length(min = 1, max = 255, message = "This field may not be blank."))]
    pub document_id: String,

    #[validate(length(min = 1, max = 255, message = "This field may not be blank."))]
    pub name: String,

    #[validate(length(min = 1, max = 50, message = "This field may not be blank."))]
    pub version: String,

    #[validate(length(max = 2048))]
    pub public_link: Option<String>,

    #[validate(length(max = 2048))]
    pub internal_link: Option<String>,

    /// Replaces the category set when present, even if empty
    #[serde(default)]
    pub category_names: Option<Vec<String>>,
}

/// Body of `PUT /documents/{document_id}`; omitted fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateDocument {
    #[validate(length(min = 1, max = 255, message = "This field may not be blank."))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 50, message = "This field may not be blank."))]
    pub version: Option<String>,

    #[validate(length(max = 2048))]
    pub public_link: Option<String>,

    #[validate(length(max = 2048))]
    pub internal_link: Option<String>,

    #[serde(default)]
    pub category_names: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct DocumentQuery {
    /// Comma-separated external document ids
    pub document_ids: Option<String>,
    /// Serve the list as a `documents.json` attachment
    #[serde(default)]
    pub download: bool,
}

/// Document ready to be persisted; categories are already normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument {
    pub document_id: String,
    pub name: String,
    pub version: String,
    pub public_link: Option<String>,
    pub internal_link: Option<String>,
    pub categories: Vec<String>,
}

/// Field overwrites for an existing document. `categories: Some(..)`
/// replaces the whole set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentChanges {
    pub name: Option<String>,
    pub version: Option<String>,
    pub public_link: Option<String>,
    pub internal_link: Option<String>,
    pub categories: Option<Vec<String>>,
}

/// Whether an upsert inserted or overwrote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
}

/// Trim, reject blanks, collapse duplicates and sort.
pub fn normalize_categories(names: Vec<String>) -> DocumentResult<Vec<String>> {
    let mut set = BTreeSet::new();
    for name in names {
        let name = name.trim();
        if name.is_empty() {
            return Err(DocumentError::Validation {
                field: "category_names",
                message: "Category names may not be blank.".to_string(),
            });
        }
        if name.chars().count() > 255 {
            return Err(DocumentError::Validation {
                field: "category_names",
                message: "Ensure category names have no more than 255 characters.".to_string(),
            });
        }
        set.insert(name.to_string());
    }
    Ok(set.into_iter().collect())
}

/// Split a comma-separated id list, dropping blanks and repeats.
pub fn parse_document_ids(raw: &str) -> Vec<String> {
    let mut seen = BTreeSet::new();
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .filter(|id| seen.insert(id.to_string()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_categories_trims_dedups_and_sorts() {
        let names = vec![" Policy".to_string(), "HR".to_string(), "Policy ".to_string()];
        assert_eq!(normalize_categories(names).unwrap(), vec!["HR", "Policy"]);
    }

    #[test]
    fn test_normalize_categories_rejects_blank() {
        let result = normalize_categories(vec!["HR".to_string(), "  ".to_string()]);
        assert!(matches!(
            result,
            Err(DocumentError::Validation { field: "category_names", .. })
        ));
    }

    #[test]
    fn test_parse_document_ids() {
        assert_eq!(parse_document_ids("D1, D2,,D1 ,D3"), vec!["D1", "D2", "D3"]);
        assert!(parse_document_ids(" , ").is_empty());
        assert!(parse_document_ids("").is_empty());
    }

    #[test]
    fn test_apply_changes_keeps_omitted_fields() {
        let mut doc = Document::new(NewDocument {
            document_id: "D1".to_string(),
            name: "Handbook".to_string(),
            version: "1.0".to_string(),
            public_link: Some("https://example.com/p".to_string()),
            internal_link: None,
            categories: vec!["HR".to_string()],
        });
        let before = doc.last_modified;

        doc.apply_changes(DocumentChanges {
            version: Some("1.1".to_string()),
            ..Default::default()
        });

        assert_eq!(doc.name, "Handbook");
        assert_eq!(doc.version, "1.1");
        assert_eq!(doc.public_link.as_deref(), Some("https://example.com/p"));
        assert_eq!(doc.categories, vec!["HR"]);
        assert!(doc.last_modified >= before);
    }

    #[test]
    fn test_document_query_download_defaults_false() {
        let query: DocumentQuery = serde_json::from_str(r#"{"document_ids": "D1"}"#).unwrap();
        assert!(!query.download);
    }
}
