use std::sync::Arc;

use clap::Parser;
use mergewatch_config::{ApiDriver, Config, SecretsDriver};
use mergewatch_ghapi_github::GithubApiService;
use mergewatch_ghapi_interface::ApiService;
use mergewatch_ghapi_null::NullApiService;
use mergewatch_secrets_env::EnvSecretsService;
use mergewatch_secrets_interface::SecretsService;
use mergewatch_secrets_vault::VaultSecretsService;
use mergewatch_sentry::with_sentry_configuration;
use mergewatch_server::{ghapi::MetricsApiService, secrets::MetricsSecretsService};
use tracing::info;

use crate::{
    commands::{Command, CommandContext, SubCommand},
    Result,
};

#[derive(Parser)]
#[command(about = None, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    cmd: SubCommand,
}

pub struct CommandExecutor;

impl CommandExecutor {
    pub fn parse_args(config: Config, args: Args) -> Result<()> {
        let sync = |config: Config, args: Args| async move {
            let secrets_service: Arc<dyn SecretsService> = {
                if config.secrets.driver == SecretsDriver::Vault {
                    info!("Using VaultSecretsService secrets driver");
                    Arc::new(MetricsSecretsService::new(Box::new(
                        VaultSecretsService::new(config.clone()),
                    )))
                } else {
                    info!("Using EnvSecretsService secrets driver");
                    Arc::new(MetricsSecretsService::new(Box::new(
                        EnvSecretsService::new(),
                    )))
                }
            };

            let api_service: Box<dyn ApiService + Send + Sync + 'static> = {
                if config.api.driver == ApiDriver::GitHub {
                    info!("Using GithubApiService API driver");
                    Box::new(MetricsApiService::new(Box::new(GithubApiService::new(
                        config.clone(),
                        secrets_service.clone(),
                    ))))
                } else {
                    info!("Using NullApiService API driver");
                    Box::new(NullApiService::new())
                }
            };

            let ctx = CommandContext {
                config: config.clone(),
                secrets_service,
                api_service,
            };

            with_sentry_configuration(&config.clone(), || async {
                Self::parse_args_async(args, ctx).await
            })
            .await
        };

        actix_rt::System::with_tokio_rt(|| {
            tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .unwrap()
        })
        .block_on(sync(config, args))?;

        Ok(())
    }

    pub(crate) async fn parse_args_async(args: Args, ctx: CommandContext) -> Result<()> {
        args.cmd.execute(ctx).await
    }
}
