//! Session maintenance commands.
//!
//! These operate on the `tower_sessions.session` table the server writes
//! through `PostgresStore`.

use std::str::FromStr;

use applicant_intake_core::StoredApplicant;
use applicant_intake_server::{IntakeConfig, db, models::session_keys};
use thiserror::Error;
use tower_sessions::{ExpiredDeletion, SessionStore, session::Id, session_store};
use tower_sessions_sqlx_store::PostgresStore;

/// Session command failures.
#[derive(Debug, Error)]
pub enum SessionCommandError {
    #[error("Invalid session id: {0}")]
    InvalidId(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Session store error: {0}")]
    Store(#[from] session_store::Error),

    #[error("Could not format applicant: {0}")]
    Format(#[from] serde_json::Error),
}

async fn open_store(config: &IntakeConfig) -> Result<PostgresStore, SessionCommandError> {
    let pool = db::create_pool(&config.database_url).await?;
    Ok(PostgresStore::new(pool))
}

fn parse_id(raw: &str) -> Result<Id, SessionCommandError> {
    Id::from_str(raw.trim()).map_err(|e| SessionCommandError::InvalidId(e.to_string()))
}

/// Print the applicant entry of one session, or why it does not decode.
///
/// # Errors
///
/// Returns an error if the id is invalid or the store is unreachable. An
/// undecodable entry is reported, not returned as an error.
#[allow(clippy::print_stdout)]
pub async fn show(config: &IntakeConfig, session_id: &str) -> Result<(), SessionCommandError> {
    let id = parse_id(session_id)?;
    let store = open_store(config).await?;

    let Some(record) = store.load(&id).await? else {
        println!("Session {id} not found (or expired)");
        return Ok(());
    };
    println!("Session {id} expires {}", record.expiry_date);

    let Some(value) = record.data.get(session_keys::APPLICANT) else {
        println!("No applicant stored");
        return Ok(());
    };

    match StoredApplicant::decode(value.clone()) {
        Ok(stored) => {
            println!("Updated {}", stored.updated_at.to_rfc3339());
            let public = stored.into_record().public_values();
            println!("{}", serde_json::to_string_pretty(&public)?);
        }
        Err(e) => {
            tracing::warn!(error = %e, "Applicant entry does not decode");
            println!("Applicant entry does not decode: {e}");
            println!("Raw entry: {}", serde_json::to_string_pretty(value)?);
        }
    }

    Ok(())
}

/// Delete one session.
///
/// # Errors
///
/// Returns an error if the id is invalid or the store fails.
pub async fn clear(config: &IntakeConfig, session_id: &str) -> Result<(), SessionCommandError> {
    let id = parse_id(session_id)?;
    let store = open_store(config).await?;

    store.delete(&id).await?;
    tracing::info!(session_id = %id, "Session deleted");
    Ok(())
}

/// Delete every expired session.
///
/// # Errors
///
/// Returns an error if the store fails.
pub async fn purge_expired(config: &IntakeConfig) -> Result<(), SessionCommandError> {
    let store = open_store(config).await?;

    store.delete_expired().await?;
    tracing::info!("Expired sessions deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_rejects_garbage() {
        assert!(matches!(
            parse_id("not a session id"),
            Err(SessionCommandError::InvalidId(_))
        ));
    }

    #[test]
    fn test_parse_id_accepts_issued_ids() {
        let id = Id::default();
        let parsed = parse_id(&format!(" {id} ")).ok();
        assert_eq!(parsed, Some(id));
    }
}
