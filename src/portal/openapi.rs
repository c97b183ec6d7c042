use super::handlers::{health, login, register, view};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        login::login,
        login::validate_login,
        register::register,
        register::validate_register,
    ),
    components(schemas(view::FormResponse, view::FieldEntry)),
    tags(
        (name = "health", description = "Liveness"),
        (name = "auth", description = "Login and registration forms"),
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}
