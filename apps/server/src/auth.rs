//! Staff authentication.

use cafe_core::credentials::verify_credentials;
use cafe_core::CoreError;
use cafe_db::Database;
use tracing::{info, warn};

use crate::error::AppError;
use crate::session::SessionUser;

/// Checks a name/password pair against the stored hash.
///
/// Unknown names and wrong passwords both yield the same
/// `InvalidCredentials` error after exactly one Argon2 verification.
pub async fn authenticate(db: &Database, name: &str, password: &str) -> Result<SessionUser, AppError> {
    let name = name.trim();
    let user = db.users().get_by_name(name).await?;

    // Argon2 is deliberately slow; keep it off the async workers.
    let password = password.to_string();
    let stored = user.as_ref().map(|u| u.password_hash.clone());
    let verified = tokio::task::spawn_blocking(move || verify_credentials(&password, stored.as_deref()))
        .await
        .map_err(|e| AppError::internal(format!("Password check aborted: {}", e)))?;

    match user {
        Some(user) if verified => {
            info!(user_id = user.id, "User signed in");
            Ok(SessionUser {
                user_id: user.id,
                name: user.name,
            })
        }
        Some(user) => {
            warn!(user_id = user.id, "Login failed: wrong password");
            Err(CoreError::InvalidCredentials.into())
        }
        None => {
            warn!(name = %name, "Login failed: unknown user");
            Err(CoreError::InvalidCredentials.into())
        }
    }
}
