//! Long-lived context holding every trust-core component.

use std::sync::Arc;

use tracing::info;

use gatekeep_auth::email::{EmailSender, TracingEmailSender};
use gatekeep_auth::password::{Argon2PasswordHasher, PasswordHasher};
use gatekeep_auth::verification::{JwtTokenSigner, TokenSigner, VerificationTokenManager};
use gatekeep_cache::SessionStore;
use gatekeep_core::config::{AppConfig, SessionConfig};
use gatekeep_core::env::{EnvSnapshot, EnvSource, EnvStore, ProcessEnv, keys};
use gatekeep_core::result::AppResult;
use gatekeep_database::env_sync::EnvSync;
use gatekeep_database::migration::run_migrations;
use gatekeep_database::repositories::{
    EnvRepository, PgEnvRepository, PgVerificationRepository, VerificationRepository,
};
use gatekeep_database::DatabasePool;

/// Collaborators a [`TrustCore`] is assembled from.
pub struct TrustCoreParts {
    pub env_repo: Arc<dyn EnvRepository>,
    pub verification_repo: Arc<dyn VerificationRepository>,
    pub source: Arc<dyn EnvSource>,
    pub session: SessionConfig,
    pub email_sender: Arc<dyn EmailSender>,
}

/// The bootstrapped trust core.
///
/// Cloning is cheap; every component is shared.
#[derive(Debug, Clone)]
pub struct TrustCore {
    pub env: Arc<EnvStore>,
    pub env_sync: EnvSync,
    pub sessions: Arc<SessionStore>,
    pub verification: Arc<VerificationTokenManager>,
    pub password_hasher: Arc<dyn PasswordHasher>,
    db: Option<DatabasePool>,
}

impl TrustCore {
    /// Connect to PostgreSQL, migrate, and assemble the trust core from the
    /// process environment.
    pub async fn bootstrap(config: &AppConfig) -> AppResult<Self> {
        let source: Arc<dyn EnvSource> = Arc::new(ProcessEnv);
        let db_url = source.string(keys::DATABASE_URL);

        let db = DatabasePool::connect(&config.database, db_url.as_deref()).await?;
        run_migrations(&db).await?;

        let parts = TrustCoreParts {
            env_repo: Arc::new(PgEnvRepository::new(db.pool().clone())),
            verification_repo: Arc::new(PgVerificationRepository::new(db.pool().clone())),
            source,
            session: config.session.clone(),
            email_sender: Arc::new(TracingEmailSender),
        };

        let mut core = Self::from_parts(parts).await?;
        core.db = Some(db);
        Ok(core)
    }

    /// Assemble the trust core from explicit collaborators.
    ///
    /// Order matters: the env register is seeded and reconciled with its
    /// durable record first, because it decides the session backend and
    /// holds the token signing secret.
    pub async fn from_parts(parts: TrustCoreParts) -> AppResult<Self> {
        let mut defaults = EnvSnapshot::defaults();
        defaults.set_string(keys::VERSION, env!("CARGO_PKG_VERSION"));

        let env = Arc::new(EnvStore::from_env(defaults, parts.source.as_ref()));
        let env_sync = EnvSync::new(parts.env_repo, Arc::clone(&env), parts.source);
        env_sync.bootstrap().await?;

        let sessions = Arc::new(SessionStore::new(&env, &parts.session).await?);

        let signer: Arc<dyn TokenSigner> = Arc::new(JwtTokenSigner::new(Arc::clone(&env)));
        let verification = Arc::new(VerificationTokenManager::new(
            parts.verification_repo,
            signer,
            Arc::clone(&env),
            parts.email_sender,
        ));

        info!(
            session_backend = sessions.backend(),
            email_verification = !env.get_bool(keys::DISABLE_EMAIL_VERIFICATION),
            magic_link_login = !env.get_bool(keys::DISABLE_MAGIC_LINK_LOGIN),
            "Trust core ready"
        );

        Ok(Self {
            env,
            env_sync,
            sessions,
            verification,
            password_hasher: Arc::new(Argon2PasswordHasher::new()),
            db: None,
        })
    }

    /// Close database connections, if any.
    pub async fn shutdown(&self) {
        if let Some(db) = &self.db {
            db.close().await;
        }
    }
}
