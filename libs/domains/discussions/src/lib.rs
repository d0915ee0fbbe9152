//! Discussions Domain
//!
//! Comments and feedback attached to documents. A post may reply to another
//! post on the same document; threads are returned flat in creation order and
//! rebuilt by clients from `parent_id`.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{PostError, PostResult};
pub use models::{CreatePost, Post, PostResponse, PostType};
pub use postgres::PgPostRepository;
pub use repository::{InMemoryPostRepository, PostRepository};
pub use service::PostService;
