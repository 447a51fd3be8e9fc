//! Commands.

use std::sync::Arc;

use async_trait::async_trait;
use clap::Subcommand;
use mergewatch_config::Config;
use mergewatch_ghapi_interface::ApiService;
use mergewatch_secrets_interface::SecretsService;

use self::server::ServerCommand;
use crate::Result;

mod server;

pub(crate) struct CommandContext {
    pub config: Config,
    pub secrets_service: Arc<dyn SecretsService>,
    pub api_service: Box<dyn ApiService + Send + Sync>,
}

#[async_trait]
pub(crate) trait Command {
    async fn execute(self, ctx: CommandContext) -> Result<()>;
}

/// Command
#[derive(Subcommand)]
pub(crate) enum SubCommand {
    Server(ServerCommand),
}

#[async_trait]
impl Command for SubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Server(sub) => sub.execute(ctx).await,
        }
    }
}
