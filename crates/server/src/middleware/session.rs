//! Session middleware configuration.
//!
//! Sets up `PostgreSQL`-backed sessions using tower-sessions. The cookie only
//! carries the session id; the applicant record stays server-side.

use sqlx::PgPool;
use tower_sessions::{Expiry, SessionManagerLayer, SessionStore};
use tower_sessions_sqlx_store::PostgresStore;

use crate::config::IntakeConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "intake_session";

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Create the session layer with `PostgreSQL` store.
///
/// The `tower_sessions.session` table must exist (see `crates/server/migrations`).
#[must_use]
pub fn create_session_layer(
    pool: &PgPool,
    config: &IntakeConfig,
) -> SessionManagerLayer<PostgresStore> {
    session_layer(PostgresStore::new(pool.clone()), config)
}

/// Create the session layer over any store, with the cookie settings taken
/// from `config`.
#[must_use]
pub fn session_layer<Store>(store: Store, config: &IntakeConfig) -> SessionManagerLayer<Store>
where
    Store: SessionStore,
{
    let expiry_seconds = i64::from(config.session_expiry_days) * SECONDS_PER_DAY;

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(expiry_seconds),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
