use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers the `bearer_auth` scheme referenced by protected handlers.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token issued by POST /api/login"))
                    .build(),
            ),
        );
    }
}

/// Domain routes are mounted flat under `/api`, so their documents are
/// merged rather than nested.
struct DomainApis;

impl Modify for DomainApis {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.merge(domain_users::auth_handlers::AuthApiDoc::openapi());
        openapi.merge(domain_users::handlers::ApiDoc::openapi());
        openapi.merge(domain_documents::handlers::ApiDoc::openapi());
        openapi.merge(domain_discussions::handlers::ApiDoc::openapi());
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&DomainApis, &SecurityAddon),
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "HR Documents API",
        version = "0.1.0",
        description = "Employee registration and approval, HR documents with categories, and document discussions"
    ),
    servers(
        (url = "/api", description = "API base path")
    )
)]
pub struct ApiDoc;
