//! Documents Domain
//!
//! HR documents identified by an external `document_id`, tagged with a
//! many-to-many set of categories that are created on demand by name.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (bearer token required)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Upsert, category normalization, id parsing
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← In-memory or PostgreSQL (documents, categories, links)
//! └─────────────┘
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{DocumentError, DocumentResult};
pub use models::{Document, DocumentQuery, SaveDocument, SaveOutcome, UpdateDocument};
pub use postgres::PgDocumentRepository;
pub use repository::{DocumentRepository, InMemoryDocumentRepository};
pub use service::DocumentService;
