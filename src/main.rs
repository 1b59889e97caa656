mod domain;
mod infrastructure;
mod presentation;
mod usecase;

use axum::{Router, routing::get};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::info;

use crate::{
    infrastructure::{
        in_memory_account_repository::InMemoryAccountRepository,
        social_token_linkage_resolver::SocialTokenLinkageResolver,
    },
    presentation::handlers::account_handler::create_account_router,
    usecase::register_account_usecase::RegisterAccountUsecase,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env is optional; the environment itself may carry the settings
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "registration_api=debug".into()),
        )
        .init();

    let account_repository = InMemoryAccountRepository::new();
    let linkage_resolver = SocialTokenLinkageResolver::new();
    let register_service = RegisterAccountUsecase::new(account_repository, linkage_resolver);

    let app = Router::new()
        .route("/", get(|| async { "registration-api" }))
        .nest("/api", create_account_router(register_service));

    let port = dotenvy::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("listening on {addr}");
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode, header},
        response::Response,
    };
    use http_body_util::BodyExt;
    use rstest::*;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::{
        domain::{
            error::RepositoryError,
            models::{
                account::{Account, AccountId},
                registration::RegistrationRequest,
            },
            repositories::account_repository::AccountRepository,
        },
        infrastructure::{
            in_memory_account_repository::InMemoryAccountRepository,
            social_token_linkage_resolver::SocialTokenLinkageResolver,
        },
        presentation::handlers::account_handler::{
            AccountResponse, CreateUserBody, ValidationErrorResponse, create_account_router,
        },
        usecase::register_account_usecase::RegisterAccountUsecase,
    };

    const TEST_ID: &str = "00000000-0000-0000-0000-000000000001";

    // mock repository interface
    #[derive(Clone)]
    struct MockAccountRepository;

    #[async_trait]
    impl AccountRepository for MockAccountRepository {
        async fn create_account(
            &self,
            request: &RegistrationRequest,
        ) -> Result<Account, RepositoryError> {
            if request.email().contains("duplicated") {
                return Err(RepositoryError::AlreadyExists(request.email().to_string()));
            }
            if request.email().contains("unreachable") {
                return Err(RepositoryError::DatabaseError(
                    "connection refused".to_string(),
                ));
            }
            let id = AccountId::from_uuid(Uuid::parse_str(TEST_ID).unwrap());
            Ok(Account::new(
                id,
                request.name().to_string(),
                request.email().to_string(),
            ))
        }
    }

    #[fixture]
    fn test_app() -> Router {
        // setup router: sync settings of main.app
        let register_service =
            RegisterAccountUsecase::new(MockAccountRepository, SocialTokenLinkageResolver::new());
        Router::new().nest("/api", create_account_router(register_service))
    }

    /// # Description
    ///
    /// This function is general create-user handler
    /// Call this function from test case for registration
    async fn create_user(app: Router, body: String) -> Response {
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/users")
                .header(header::CONTENT_TYPE, mime::APPLICATION_JSON.as_ref())
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn response_json<T: serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn body_with(
        name: &str,
        email: &str,
        password: Option<&str>,
        social_token: Option<&str>,
    ) -> String {
        serde_json::to_string(&CreateUserBody {
            name: name.to_string(),
            email: email.to_string(),
            password: password.map(str::to_string),
            social_token: social_token.map(str::to_string),
        })
        .unwrap()
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_user_positive(test_app: Router) {
        let body = body_with("Paulo Salvatore", "email@email.com", Some("123@abc"), None);

        let response = create_user(test_app, body).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let account: AccountResponse = response_json(response).await;
        assert_eq!(TEST_ID, account.id);
        assert_eq!("Paulo Salvatore", account.name);
        assert_eq!("email@email.com", account.email);
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_user_social_without_password_positive(test_app: Router) {
        let body = body_with("Ana", "ana@example.com", None, Some("provider-grant-token"));

        let response = create_user(test_app, body).await;

        assert_eq!(response.status(), StatusCode::CREATED);
        let account: AccountResponse = response_json(response).await;
        assert_eq!("ana@example.com", account.email);
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_user_missing_password_negative(test_app: Router) {
        let body = body_with("Ana", "ana@example.com", None, None);

        let response = create_user(test_app, body).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let rejection: ValidationErrorResponse = response_json(response).await;
        assert_eq!(rejection.errors.len(), 1);
        assert_eq!(rejection.errors[0].field, "password");
        assert_eq!(rejection.errors[0].code, "missing_field");
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_user_empty_name_negative(test_app: Router) {
        let body = body_with("", "email@email.com", Some("123@abc"), None);

        let response = create_user(test_app, body).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let rejection: ValidationErrorResponse = response_json(response).await;
        assert_eq!(rejection.errors.len(), 1);
        assert_eq!(rejection.errors[0].field, "name");
        assert_eq!(rejection.errors[0].code, "empty_field");
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_user_reports_all_violations_negative(test_app: Router) {
        let body = r#"{"email":"not-an-email"}"#.to_string();

        let response = create_user(test_app, body).await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let rejection: ValidationErrorResponse = response_json(response).await;
        let fields: Vec<&str> = rejection
            .errors
            .iter()
            .map(|violation| violation.field.as_str())
            .collect();
        assert_eq!(fields, vec!["name", "email", "password"]);
        assert_eq!(rejection.errors[1].code, "invalid_format");
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_user_duplicated_email_negative(test_app: Router) {
        let body = body_with("Ana", "duplicated@example.com", Some("123@abc"), None);

        let response = create_user(test_app, body).await;

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_user_repository_failure_negative(test_app: Router) {
        let body = body_with("Ana", "unreachable@example.com", Some("123@abc"), None);

        let response = create_user(test_app, body).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[rstest]
    #[tokio::test]
    async fn test_create_user_non_object_body_negative(test_app: Router) {
        let response = create_user(test_app, "[1,2,3]".to_string()).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_user_in_memory_rejects_reused_email() {
        // the real wiring, same as main
        let register_service = RegisterAccountUsecase::new(
            InMemoryAccountRepository::new(),
            SocialTokenLinkageResolver::new(),
        );
        let app = Router::new().nest("/api", create_account_router(register_service));

        let body = body_with("Ana", "ana@example.com", Some("123@abc"), None);
        let response = create_user(app.clone(), body.clone()).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = create_user(app, body).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[rstest]
    #[tokio::test]
    async fn test_openapi_document_exposes_field_examples(test_app: Router) {
        let response = test_app
            .oneshot(
                Request::builder()
                    .uri("/api/docs/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let document: serde_json::Value = response_json(response).await;
        assert!(
            document["components"]["schemas"]
                .get("CreateUserBody")
                .is_some()
        );
        let rendered = serde_json::to_string(&document).unwrap();
        assert!(rendered.contains("Paulo Salvatore"));
        assert!(rendered.contains("email@email.com"));
        assert!(rendered.contains("123@abc"));
    }
}
