use utoipa::OpenApi;

use crate::presentation::handlers::account_handler::{
    AccountResponse, CreateUserBody, FieldViolation, ValidationErrorResponse,
};

/// OpenAPI document for the registration API. The field documentation and
/// example values on the request body double as the public schema.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "registration-api",
        description = "Account registration endpoints"
    ),
    components(schemas(
        CreateUserBody,
        AccountResponse,
        FieldViolation,
        ValidationErrorResponse
    ))
)]
pub struct ApiDoc;
