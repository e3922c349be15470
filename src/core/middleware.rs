use crate::core::error::AppError;
use crate::features::auth::TokenService;
use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::Response,
};
use base64::prelude::*;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestId, RequestId};
use tracing::Span;
use uuid::Uuid;

/// Request ID generator using UUID v7 (time-ordered)
#[derive(Clone, Copy)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string();
        Some(RequestId::new(HeaderValue::from_str(&id).unwrap()))
    }
}

/// Custom MakeSpan that includes request_id in the tracing span
#[derive(Clone, Debug)]
pub struct MakeSpanWithRequestId;

impl<B> tower_http::trace::MakeSpan<B> for MakeSpanWithRequestId {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

pub fn cors_layer(allowed_origins: Vec<String>) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    // If origins list contains "*", allow any origin
    if allowed_origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        // Parse origins into HeaderValue
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}

pub fn basic_auth_middleware(
    valid_credentials: Arc<String>,
) -> impl Fn(
    Request,
    Next,
)
    -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, Response>> + Send>>
       + Clone {
    move |req: Request, next: Next| {
        let credentials = valid_credentials.clone();
        Box::pin(async move {
            let auth_header = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|header| header.to_str().ok());

            if let Some(auth_header) = auth_header {
                if let Some(encoded) = auth_header.strip_prefix("Basic ") {
                    if let Ok(decoded) = BASE64_STANDARD.decode(encoded) {
                        if let Ok(creds) = String::from_utf8(decoded) {
                            if creds == *credentials {
                                return Ok(next.run(req).await);
                            }
                        }
                    }
                }
            }

            let response = Response::builder()
                .status(StatusCode::UNAUTHORIZED)
                .header(header::WWW_AUTHENTICATE, "Basic realm=\"Swagger UI\"")
                .body(Body::from("Unauthorized"))
                .unwrap();

            Err(response)
        })
    }
}

/// Bearer-token gate for the admin surface. Validates the token and inserts
/// the resulting [`crate::features::auth::model::AdminSession`] into request
/// extensions.
pub async fn admin_auth_middleware(
    State(token_service): State<Arc<TokenService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extract Authorization header
    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        AppError::Unauthorized("Invalid authorization header format".to_string())
    })?;

    let session = token_service.verify(token)?;

    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware::from_fn_with_state, routing::get, Router};
    use axum_test::TestServer;

    use crate::core::config::AdminConfig;
    use crate::features::auth::model::AdminSession;

    async fn whoami(session: AdminSession) -> String {
        session.sub
    }

    fn protected_server() -> (TestServer, Arc<TokenService>) {
        let config = AdminConfig {
            password: "hunter2".to_string(),
            token_secret: "test-secret".to_string(),
            token_expiry_secs: 3600,
        };
        let token_service = Arc::new(TokenService::new(&config));

        let router = Router::new()
            .route("/protected", get(whoami))
            .route_layer(from_fn_with_state(
                Arc::clone(&token_service),
                admin_auth_middleware,
            ));

        (TestServer::new(router).unwrap(), token_service)
    }

    #[tokio::test]
    async fn valid_token_passes_through() {
        let (server, token_service) = protected_server();
        let (token, _) = token_service.issue().unwrap();

        let response = server
            .get("/protected")
            .authorization_bearer(&token)
            .await;

        response.assert_status_ok();
        response.assert_text("admin");
    }

    #[tokio::test]
    async fn missing_header_is_401() {
        let (server, _) = protected_server();
        server.get("/protected").await.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn malformed_header_is_401() {
        let (server, token_service) = protected_server();
        let (token, _) = token_service.issue().unwrap();

        let response = server
            .get("/protected")
            .authorization(&format!("Token {}", token))
            .await;

        response.assert_status_unauthorized();
    }
}
