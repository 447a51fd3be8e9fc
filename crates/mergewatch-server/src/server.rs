//! Server module.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web::{self, Data},
    App, HttpResponse, HttpServer,
};
use mergewatch_config::Config;
use mergewatch_ghapi_interface::ApiService;
use mergewatch_secrets_interface::SecretsService;
use sentry_actix::Sentry;
use tracing::info;

use crate::{
    health::health_check_route, metrics::build_metrics_handler, middlewares::VerifySignature,
    webhook::configure_webhook_handlers, Result, ServerError,
};

/// App context.
pub struct AppContext {
    /// Config.
    pub config: Config,
    /// Secrets adapter.
    pub secrets_service: Arc<dyn SecretsService>,
    /// API adapter.
    pub api_service: Box<dyn ApiService>,
}

impl AppContext {
    /// Create new app context using adapters.
    pub fn new_with_adapters(
        config: Config,
        secrets_service: Arc<dyn SecretsService>,
        api_service: Box<dyn ApiService + Send + Sync>,
    ) -> Self {
        Self {
            config,
            secrets_service,
            api_service,
        }
    }
}

/// Build Actix app.
pub fn build_actix_app(
    context: Data<AppContext>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let prometheus = build_metrics_handler();

    App::new()
        .app_data(context.clone())
        .wrap(prometheus)
        .wrap(Sentry::new())
        .wrap(Logger::default())
        .service(
            web::scope("/webhook")
                .wrap(VerifySignature::new(
                    &context.config,
                    context.secrets_service.clone(),
                ))
                .configure(configure_webhook_handlers),
        )
        .route("/health", web::get().to(health_check_route))
        .route(
            "/",
            web::get().to(|| async {
                HttpResponse::Ok().json(serde_json::json!({"message": "Welcome on mergewatch!" }))
            }),
        )
}

/// Run webhook server.
pub async fn run_server(context: AppContext) -> Result<()> {
    let address = get_bind_address(&context.config);

    info!(
        version = context.config.version,
        address = %address,
        message = "Starting webhook server",
    );

    run_server_internal(address, context).await
}

fn get_bind_address(config: &Config) -> String {
    format!("{}:{}", config.server.bind_ip, config.server.bind_port)
}

async fn run_server_internal(ip_with_port: String, context: AppContext) -> Result<()> {
    let context = Data::new(context);
    let cloned_context = context.clone();

    let mut server = HttpServer::new(move || build_actix_app(context.clone()));

    if let Some(workers) = cloned_context.config.server.workers_count {
        server = server.workers(workers as usize);
    }

    server
        .bind(ip_with_port)
        .map_err(|e| ServerError::IoError { source: e })?
        .run()
        .await
        .map_err(|e| ServerError::IoError { source: e })
}

#[cfg(test)]
mod tests {
    use mergewatch_config::Config;

    use super::get_bind_address;

    #[test]
    fn test_get_bind_address() {
        let mut config = Config::from_env_no_version();
        config.server.bind_ip = "0.0.0.0".into();
        config.server.bind_port = 8008;

        assert_eq!(get_bind_address(&config), "0.0.0.0:8008");
    }
}
