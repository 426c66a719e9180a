//! Application state wiring the services together.
//!
//! Services are generic over repository traits; AppState pins them to the
//! SQLite implementations. Used by both the CLI commands and HTTP handlers.

use std::sync::Arc;

use anyhow::Context;
use lobby_core::service::message::MessageService;
use lobby_core::service::presence::PresenceService;
use lobby_core::service::sweep::SweepScheduler;
use lobby_infra::sqlite::message::SqliteMessageRepository;
use lobby_infra::sqlite::participant::SqliteParticipantRepository;
use lobby_infra::sqlite::pool::DatabasePool;
use lobby_types::config::LobbyConfig;

/// Concrete type aliases for the service generics pinned to infra implementations.
pub type ConcretePresenceService =
    PresenceService<SqliteParticipantRepository, SqliteMessageRepository>;

pub type ConcreteMessageService =
    MessageService<SqliteParticipantRepository, SqliteMessageRepository>;

pub type ConcreteSweepScheduler =
    SweepScheduler<SqliteParticipantRepository, SqliteMessageRepository>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub presence_service: Arc<ConcretePresenceService>,
    pub message_service: Arc<ConcreteMessageService>,
    pub config: Arc<LobbyConfig>,
}

impl AppState {
    /// Connect to the database named in `config` and wire services.
    pub async fn init(config: LobbyConfig) -> anyhow::Result<Self> {
        config
            .presence
            .validate()
            .map_err(anyhow::Error::msg)
            .context("invalid presence configuration")?;

        let db_pool = DatabasePool::new(&config.database.url)
            .await
            .with_context(|| format!("failed to open database {}", config.database.url))?;

        Ok(Self::with_pool(db_pool, config))
    }

    /// Wire services over an already-open pool.
    pub fn with_pool(db_pool: DatabasePool, config: LobbyConfig) -> Self {
        let participants = SqliteParticipantRepository::new(db_pool.clone());
        let messages = SqliteMessageRepository::new(db_pool);

        let presence_service = PresenceService::new(
            participants.clone(),
            messages.clone(),
            config.presence.stale_after(),
        );
        let message_service = MessageService::new(participants, messages);

        Self {
            presence_service: Arc::new(presence_service),
            message_service: Arc::new(message_service),
            config: Arc::new(config),
        }
    }

    /// Build the background sweep over this state's presence service.
    pub fn sweep_scheduler(&self) -> ConcreteSweepScheduler {
        SweepScheduler::new(
            self.presence_service.clone(),
            self.config.presence.sweep_interval(),
        )
    }
}
