//! Bootstrap-admin command - seeds the first super_admin.
//!
//! Staff accounts can only be created by a super_admin, so the very first
//! one has to come from the operator's shell.

use std::sync::Arc;

use crate::cli::args::BootstrapAdminArgs;
use crate::config::Config;
use crate::domain::{StaffRole, StaffUserDraft};
use crate::errors::AppResult;
use crate::infra::NoopNotifier;
use crate::services::{ServiceContainer, Services};

/// Execute the bootstrap-admin command
pub async fn execute(args: BootstrapAdminArgs, config: Config) -> AppResult<()> {
    let db = super::connect(&config, true).await?;
    let services = Services::from_connection(db.get_connection(), config, Arc::new(NoopNotifier));

    let draft = StaffUserDraft {
        full_name: args.full_name,
        phone: args.phone,
        role: StaffRole::SuperAdmin.to_string(),
        login: args.login,
        password: args.password,
    };

    let user = services
        .staff()
        .create(Some(StaffRole::SuperAdmin), draft)
        .await?;

    tracing::info!(user_id = user.id, "Super admin created");
    println!("Created super_admin '{}' (id {})", user.login.unwrap_or_default(), user.id);
    Ok(())
}
