//! Secret store access. The database password lives in AWS Secrets Manager and is read once at startup.

use async_trait::async_trait;
use aws_sdk_secretsmanager::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_secretsmanager::operation::get_secret_value::GetSecretValueError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SecretError {
    #[error("authentication failed: {0}")]
    Authentication(String),
    #[error("secret '{0}' not found")]
    NotFound(String),
    #[error("secret '{0}' has no string value")]
    Empty(String),
    #[error("secret store unavailable: {0}")]
    Unavailable(String),
}

/// Error codes the service returns when the caller's credentials are rejected.
const AUTH_ERROR_CODES: &[&str] = &[
    "AccessDeniedException",
    "UnrecognizedClientException",
    "InvalidSignatureException",
    "ExpiredTokenException",
    "InvalidClientTokenId",
];

#[async_trait]
pub trait SecretSource: Send + Sync {
    /// Current value of the named secret.
    async fn get_secret(&self, name: &str) -> Result<String, SecretError>;
}

pub struct AwsSecretSource {
    client: aws_sdk_secretsmanager::Client,
}

impl AwsSecretSource {
    /// Build a client from the default credential chain. `endpoint` overrides the region endpoint.
    pub async fn connect(endpoint: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(url) = endpoint {
            loader = loader.endpoint_url(url);
        }
        let sdk_config = loader.load().await;
        Self {
            client: aws_sdk_secretsmanager::Client::new(&sdk_config),
        }
    }
}

#[async_trait]
impl SecretSource for AwsSecretSource {
    async fn get_secret(&self, name: &str) -> Result<String, SecretError> {
        tracing::debug!(secret = %name, "fetching secret");
        let output = self
            .client
            .get_secret_value()
            .secret_id(name)
            .send()
            .await
            .map_err(|e| classify(name, e))?;
        output
            .secret_string()
            .map(str::to_owned)
            .ok_or_else(|| SecretError::Empty(name.to_string()))
    }
}

fn classify(name: &str, err: SdkError<GetSecretValueError>) -> SecretError {
    if let SdkError::ServiceError(ctx) = &err {
        let service_err = ctx.err();
        if service_err.is_resource_not_found_exception() {
            return SecretError::NotFound(name.to_string());
        }
        if let Some(code) = service_err.code() {
            if AUTH_ERROR_CODES.contains(&code) {
                return SecretError::Authentication(
                    service_err.message().unwrap_or(code).to_string(),
                );
            }
        }
    }
    SecretError::Unavailable(DisplayErrorContext(&err).to_string())
}
