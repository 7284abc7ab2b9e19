//! Migrate command - Database migration management.

use sea_orm::DbErr;

use crate::cli::args::{MigrateAction, MigrateArgs};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::Database;

/// Execute the migrate command
pub async fn execute(args: MigrateArgs, config: Config) -> AppResult<()> {
    let db = super::connect(&config, false).await?;
    let before = db.migration_status().await.map_err(migration_failed)?;

    match args.action {
        MigrateAction::Up => apply_pending(&db, &before).await,
        MigrateAction::Down => roll_back_last(&db, &before).await,
        MigrateAction::Status => {
            print_status(&before);
            Ok(())
        }
        MigrateAction::Fresh => {
            tracing::warn!(tables = before.len(), "Dropping every table before re-applying");
            db.fresh_migrations().await.map_err(migration_failed)?;
            tracing::info!(applied = before.len(), "Schema rebuilt");
            Ok(())
        }
    }
}

async fn apply_pending(db: &Database, status: &[(String, bool)]) -> AppResult<()> {
    let pending = pending_names(status);
    if pending.is_empty() {
        tracing::info!("Schema is up to date");
        return Ok(());
    }

    db.run_migrations().await.map_err(migration_failed)?;
    for name in &pending {
        tracing::info!(migration = %name, "Applied");
    }
    Ok(())
}

async fn roll_back_last(db: &Database, status: &[(String, bool)]) -> AppResult<()> {
    let Some(last) = last_applied(status) else {
        tracing::warn!("No applied migration to roll back");
        return Ok(());
    };

    db.rollback_migration().await.map_err(migration_failed)?;
    tracing::info!(migration = %last, "Rolled back");
    Ok(())
}

fn print_status(status: &[(String, bool)]) {
    let width = status.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    for (name, applied) in status {
        let state = if *applied { "applied" } else { "pending" };
        println!("{:<width$}  {}", name, state, width = width);
    }
    let pending = pending_names(status).len();
    println!("{} applied, {} pending", status.len() - pending, pending);
}

fn pending_names(status: &[(String, bool)]) -> Vec<&str> {
    status
        .iter()
        .filter(|(_, applied)| !applied)
        .map(|(name, _)| name.as_str())
        .collect()
}

fn last_applied(status: &[(String, bool)]) -> Option<&str> {
    status
        .iter()
        .rev()
        .find(|(_, applied)| *applied)
        .map(|(name, _)| name.as_str())
}

fn migration_failed(err: DbErr) -> AppError {
    AppError::internal(format!("Migration failed: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status() -> Vec<(String, bool)> {
        vec![
            ("m1_bookings".to_string(), true),
            ("m2_clients".to_string(), true),
            ("m3_users".to_string(), false),
        ]
    }

    #[test]
    fn test_pending_and_last_applied() {
        let status = status();
        assert_eq!(pending_names(&status), vec!["m3_users"]);
        assert_eq!(last_applied(&status), Some("m2_clients"));
    }

    #[test]
    fn test_nothing_applied() {
        let status = vec![("m1_bookings".to_string(), false)];
        assert_eq!(last_applied(&status), None);
        assert!(last_applied(&[]).is_none());
    }
}
