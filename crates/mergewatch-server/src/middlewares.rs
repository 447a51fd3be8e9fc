//! Server middlewares.

#![allow(clippy::type_complexity)]

use std::{pin::Pin, rc::Rc, sync::Arc};

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    web::BytesMut,
    Error, HttpMessage,
};
use futures::{
    future::{ok, Ready},
    stream::StreamExt,
    Future,
};
use mergewatch_config::Config;
use mergewatch_crypto::Signature;
use mergewatch_secrets_interface::SecretsService;
use tracing::{error, warn};

use super::constants::{GITHUB_SIGNATURE_HEADER, SIGNATURE_PREFIX};
use crate::ServerError;

/// Signature verification configuration.
pub struct VerifySignature {
    enabled: bool,
    secret_id: Option<String>,
    secrets_service: Arc<dyn SecretsService>,
}

impl VerifySignature {
    /// Create a new configuration.
    pub fn new(config: &Config, secrets_service: Arc<dyn SecretsService>) -> Self {
        let mut enabled = !config.server.disable_webhook_signature;
        let secret_id = if enabled {
            if config.secrets.webhook_secret_id.is_empty() {
                // Disable signature verification on empty secret identifier
                warn!("Environment variable 'MERGEWATCH_WEBHOOK_SECRET_ID' is invalid or not set. Disabling signature verification.");
                enabled = false;
                None
            } else {
                Some(config.secrets.webhook_secret_id.clone())
            }
        } else {
            warn!("Signature verification is disabled. This can be a security concern.");
            None
        };

        Self {
            enabled,
            secret_id,
            secrets_service,
        }
    }
}

// Middleware factory is `Transform` trait from actix-service crate
// `S` - type of the next service
// `B` - type of response's body
impl<S, B> Transform<S, ServiceRequest> for VerifySignature
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    type InitError = ();
    type Response = ServiceResponse<B>;
    type Transform = VerifySignatureMiddleware<S>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(VerifySignatureMiddleware {
            enabled: self.enabled,
            secret_id: self.secret_id.clone(),
            secrets_service: self.secrets_service.clone(),
            service: Rc::new(service),
        })
    }
}

/// Signature verification middleware.
pub struct VerifySignatureMiddleware<S> {
    enabled: bool,
    secret_id: Option<String>,
    secrets_service: Arc<dyn SecretsService>,
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for VerifySignatureMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;
    type Response = ServiceResponse<B>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let svc = self.service.clone();
        let enabled = self.enabled;
        let secret_id = self.secret_id.clone();
        let secrets_service = self.secrets_service.clone();

        Box::pin(async move {
            if enabled && req.method() == Method::POST {
                if let Some(secret_id) = secret_id {
                    let headers = req.headers().clone();
                    let signature = headers
                        .get(GITHUB_SIGNATURE_HEADER)
                        .ok_or(ServerError::MissingWebhookSignature)?
                        .to_str()
                        .map_err(|_| {
                            actix_web::Error::from(ServerError::InvalidWebhookSignature)
                        })?;

                    // Strip signature prefix. The stripping is textual: an
                    // unprefixed value is compared as a bare hex digest.
                    let sig = signature.strip_prefix(SIGNATURE_PREFIX).unwrap_or(signature);

                    let mut body = BytesMut::new();
                    let mut stream = req.take_payload();

                    while let Some(chunk) = stream.next().await {
                        body.extend_from_slice(&chunk.map_err(|_| {
                            actix_web::Error::from(ServerError::InvalidPayload)
                        })?);
                    }

                    let secret =
                        secrets_service
                            .secret_get(&secret_id)
                            .await
                            .map_err(|e| {
                                error!(
                                    secret_id = %secret_id,
                                    error = %e,
                                    message = "Could not resolve webhook signing secret"
                                );
                                actix_web::Error::from(ServerError::SecretResolution {
                                    id: secret_id.clone(),
                                })
                            })?;

                    match Signature(sig).is_valid(&body, &secret) {
                        Ok(true) => (),
                        Ok(false) | Err(_) => {
                            warn!("Unauthorized attempt");
                            return Err(ServerError::InvalidWebhookSignature.into());
                        }
                    }

                    // Thanks https://github.com/actix/actix-web/issues/1457#issuecomment-617342438
                    let (_, mut payload) = actix_http::h1::Payload::create(true);
                    payload.unread_data(body.freeze());
                    req.set_payload(payload.into());
                }
            }

            svc.call(req).await
        })
    }
}
