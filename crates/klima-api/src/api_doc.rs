//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use klima_core::models;

pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Klima Pass API",
        version = "0.1.0",
        description = "Issues signed wallet passes (.pkpass) from submitted card data. The issuance endpoint is also served at / for existing clients."
    ),
    paths(
        handlers::pass_create::create_pass,
    ),
    components(
        schemas(
            models::PassRequestBody,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "passes", description = "Pass issuance")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_pass_endpoint() {
        let spec = get_openapi_spec();
        assert!(spec.paths.paths.contains_key(crate::constants::PASSES_PATH));
    }
}
