use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{OpenApi, ToSchema};

use crate::{
    domain::{
        error::{DomainError, RepositoryError, ValidationError, ValidationErrors},
        models::account::Account,
        repositories::account_repository::AccountRepository,
        services::social_linkage_service::SocialLinkageResolver,
    },
    presentation::doc::ApiDoc,
    usecase::register_account_usecase::RegisterAccountUsecase,
};

// Request

/// json for the create-user request
#[derive(Serialize, Deserialize, ToSchema)]
pub struct CreateUserBody {
    /// Shown anywhere (profile, home page, ...) that displays information
    /// about the connected person.
    #[schema(example = "Paulo Salvatore")]
    pub name: String,

    /// Login identifier. It does not have to match the email of whichever
    /// social network is connected.
    #[schema(example = "email@email.com")]
    pub email: String,

    /// Connecting through a social network works without a password, but
    /// logging in with the email directly requires one.
    #[schema(example = "123@abc")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Opaque credential from a linked social identity provider, when the
    /// account is created through one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_token: Option<String>,
}

// Response

/// json for the created account
#[derive(Serialize, Deserialize, ToSchema)]
pub struct AccountResponse {
    #[schema(example = "00000000-0000-0000-0000-000000000001")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub created_at: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id().as_uuid().to_string(),
            name: account.name().to_string(),
            email: account.email().to_string(),
            created_at: account.created_at().to_rfc3339(),
        }
    }
}

/// One violated registration rule.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct FieldViolation {
    #[schema(example = "email")]
    pub field: String,
    #[schema(example = "invalid_format")]
    pub code: String,
    #[schema(example = "field `email` is not in a valid format")]
    pub message: String,
}

impl From<&ValidationError> for FieldViolation {
    fn from(error: &ValidationError) -> Self {
        Self {
            field: error.field().to_string(),
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

/// json body returned when a payload violates registration rules. Lists
/// every violation so the client can fix them all in one pass.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldViolation>,
}

impl From<&ValidationErrors> for ValidationErrorResponse {
    fn from(errors: &ValidationErrors) -> Self {
        Self {
            errors: errors.iter().map(FieldViolation::from).collect(),
        }
    }
}

/* Router Function and Handler Function */

// Account Router

/// function return Router object
/// Suppose to be nested by main router

pub fn create_account_router<
    R: AccountRepository + Send + Sync + 'static + Clone,
    S: SocialLinkageResolver + Send + Sync + 'static,
>(
    register_service: RegisterAccountUsecase<R, S>,
) -> Router {
    let state = AppState {
        register_service: Arc::new(register_service),
    };

    Router::new()
        .route("/users", post(create_user::<R, S>))
        .route("/docs/openapi.json", get(openapi_document))
        .with_state(state)
}

#[derive(Clone)]
pub struct AppState<R: AccountRepository, S: SocialLinkageResolver> {
    pub register_service: Arc<RegisterAccountUsecase<R, S>>,
}

// handler function

/// handler function for create-user
async fn create_user<R: AccountRepository + Send + Sync, S: SocialLinkageResolver + Send + Sync>(
    State(state): State<AppState<R, S>>,
    Json(payload): Json<Value>,
) -> impl IntoResponse {
    let Value::Object(payload) = payload else {
        return (
            StatusCode::BAD_REQUEST,
            Json("Request body must be a JSON object"),
        )
            .into_response();
    };

    match state.register_service.register(payload).await {
        Ok(account) => {
            tracing::info!(account_id = %account.id(), "account registered");
            (StatusCode::CREATED, Json(AccountResponse::from(account))).into_response()
        }
        Err(DomainError::Validation(errors)) => {
            tracing::debug!(violations = errors.len(), "registration payload rejected");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationErrorResponse::from(&errors)),
            )
                .into_response()
        }
        Err(DomainError::Repository(RepositoryError::AlreadyExists(_))) => {
            (StatusCode::CONFLICT, Json("Email already registered")).into_response()
        }
        Err(error) => {
            tracing::error!(%error, "registration failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json("Registration failed")).into_response()
        }
    }
}

/// handler serving the generated OpenAPI document
async fn openapi_document() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}
