use axum::Router;
use axum_helpers::JwtAuth;
use domain_discussions::{PgPostRepository, PostRepository, PostService};
use domain_documents::{DocumentRepository, DocumentService, PgDocumentRepository};
use domain_users::{PgUserRepository, UserRepository, UserService};

pub mod health;

/// Creates the API routes without the `/api` prefix.
/// The `/api` prefix will be added by the `create_router` helper.
///
/// Every domain is backed by PostgreSQL; sub-routers carry their own state.
pub fn routes(state: &crate::state::AppState) -> Router {
    let users = UserService::new(PgUserRepository::new(state.db.clone()));
    let documents = DocumentService::new(PgDocumentRepository::new(state.db.clone()));
    let posts = PostService::new(
        PgPostRepository::new(state.db.clone()),
        documents.repository(),
    );

    compose(users, documents, posts, state.jwt.clone())
}

/// Flat route table shared by production and tests.
///
/// `/register`, `/login` and `/refresh` are public; every other route checks
/// the bearer token inside its own domain router.
pub fn compose<U, D, P>(
    users: UserService<U>,
    documents: DocumentService<D>,
    posts: PostService<P, D>,
    jwt: JwtAuth,
) -> Router
where
    U: UserRepository + 'static,
    D: DocumentRepository + 'static,
    P: PostRepository + 'static,
{
    Router::new()
        .merge(domain_users::auth_handlers::auth_router(users.clone(), jwt.clone()))
        .merge(domain_users::handlers::router(users, jwt.clone()))
        .merge(domain_documents::handlers::router(documents, jwt.clone()))
        .merge(domain_discussions::handlers::router(posts, jwt))
}

/// Creates a router with the /ready endpoint that performs actual health checks.
///
/// This router has state applied and can be merged with the stateless app router
/// from `create_router`.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
