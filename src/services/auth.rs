//! Staff sign-in for the back office.
//!
//! Staff accounts are provisioned by the seed tool, never through the API.
//! Signing in yields one short-lived HS256 bearer token; there is no refresh
//! flow, an expired session simply signs in again.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::user::{User, UserResponse, UserRole};

/// Wrong passwords in a row before the account is locked.
const MAX_FAILED_ATTEMPTS: i32 = 3;

const LOCKOUT_MINUTES: i32 = 30;

/// What a staff bearer token asserts about its holder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffClaims {
    /// Staff account id.
    pub sub: Uuid,
    pub name: String,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
}

/// Body returned by a successful sign-in.
#[derive(Debug, Serialize)]
pub struct StaffSession {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Hash a plaintext password with argon2id.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {e}")))
}

fn password_matches(password: &str, stored_hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AppError::Internal(format!("Stored password hash is malformed: {e}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Sign a bearer token for `staff` valid for `ttl_secs` from `now`.
pub fn issue_token(
    staff: &User,
    secret: &str,
    ttl_secs: i64,
    now: DateTime<Utc>,
) -> Result<String, AppError> {
    let claims = StaffClaims {
        sub: staff.id,
        name: staff.username.clone(),
        role: staff.role,
        iat: now.timestamp(),
        exp: (now + Duration::seconds(ttl_secs)).timestamp(),
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token signing failed: {e}")))
}

/// Check signature and expiry of a bearer token.
///
/// Every failure, including an unknown role, is reported as `Unauthorized`.
pub fn verify_token(token: &str, secret: &str) -> Result<StaffClaims, AppError> {
    jsonwebtoken::decode::<StaffClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "Rejected bearer token");
        AppError::Unauthorized
    })
}

fn is_locked(staff: &User, now: DateTime<Utc>) -> bool {
    staff.locked_until.is_some_and(|until| until > now)
}

/// Check credentials and open a session.
///
/// Unknown usernames, inactive or locked accounts and wrong passwords all
/// answer `Unauthorized` so callers cannot tell them apart.
pub async fn sign_in(
    pool: &PgPool,
    config: &AppConfig,
    username: &str,
    password: &str,
) -> Result<StaffSession, AppError> {
    let staff = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
        .bind(username)
        .fetch_optional(pool)
        .await?
        .filter(|u| u.is_active)
        .ok_or(AppError::Unauthorized)?;

    let now = Utc::now();
    if is_locked(&staff, now) {
        tracing::info!(username, "Sign-in refused, account locked");
        return Err(AppError::Unauthorized);
    }

    if !password_matches(password, &staff.password_hash)? {
        record_failed_password(pool, &staff).await?;
        return Err(AppError::Unauthorized);
    }

    let staff = sqlx::query_as::<_, User>(
        "UPDATE users SET failed_login_attempts = 0, locked_until = NULL, last_login = NOW()
         WHERE id = $1 RETURNING *",
    )
    .bind(staff.id)
    .fetch_one(pool)
    .await?;

    let access_token = issue_token(&staff, &config.jwt_secret, config.jwt_expiry_secs, now)?;
    tracing::info!(user_id = %staff.id, role = staff.role.as_str(), "Staff signed in");

    Ok(StaffSession {
        access_token,
        token_type: "Bearer",
        expires_in: config.jwt_expiry_secs,
        user: UserResponse::from(staff),
    })
}

/// Count one wrong password and lock the account once the limit is reached.
async fn record_failed_password(pool: &PgPool, staff: &User) -> Result<(), AppError> {
    let attempts: i32 = sqlx::query_scalar(
        "UPDATE users
         SET failed_login_attempts = failed_login_attempts + 1,
             locked_until = CASE
                 WHEN failed_login_attempts + 1 >= $2 THEN NOW() + make_interval(mins => $3)
                 ELSE locked_until
             END
         WHERE id = $1
         RETURNING failed_login_attempts",
    )
    .bind(staff.id)
    .bind(MAX_FAILED_ATTEMPTS)
    .bind(LOCKOUT_MINUTES)
    .fetch_one(pool)
    .await?;

    if attempts >= MAX_FAILED_ATTEMPTS {
        tracing::warn!(username = %staff.username, attempts, "Account locked after repeated wrong passwords");
    }
    Ok(())
}

/// Load the signed-in staff account. A deactivated account no longer counts as signed in.
pub async fn load_staff(pool: &PgPool, id: Uuid) -> Result<User, AppError> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1 AND is_active")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff(role: UserRole) -> User {
        User {
            id: Uuid::new_v4(),
            username: "kennel-staff".to_string(),
            email: "staff@kennel.test".to_string(),
            password_hash: String::new(),
            display_name: "Staff".to_string(),
            role,
            is_active: true,
            failed_login_attempts: 0,
            locked_until: None,
            last_login: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn hashed_password_only_matches_itself() {
        let hash = hash_password("Kennel-Admin-2026!").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(password_matches("Kennel-Admin-2026!", &hash).unwrap());
        assert!(!password_matches("kennel-admin-2026!", &hash).unwrap());
    }

    #[test]
    fn malformed_stored_hash_is_internal_error() {
        let err = password_matches("anything", "plaintext").unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn token_carries_staff_identity() {
        let editor = staff(UserRole::Editor);
        let now = Utc::now();
        let token = issue_token(&editor, "secret", 3600, now).unwrap();

        let claims = verify_token(&token, "secret").unwrap();
        assert_eq!(claims.sub, editor.id);
        assert_eq!(claims.name, "kennel-staff");
        assert_eq!(claims.role, UserRole::Editor);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn token_from_other_secret_is_unauthorized() {
        let token = issue_token(&staff(UserRole::Admin), "secret-a", 3600, Utc::now()).unwrap();
        assert!(matches!(
            verify_token(&token, "secret-b"),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn expired_token_is_unauthorized() {
        // Issued two hours ago with a one hour lifetime, well past the default leeway.
        let issued = Utc::now() - Duration::hours(2);
        let token = issue_token(&staff(UserRole::Viewer), "secret", 3600, issued).unwrap();
        assert!(matches!(
            verify_token(&token, "secret"),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn garbage_token_is_unauthorized() {
        assert!(matches!(
            verify_token("not.a.jwt", "secret"),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn lock_lapses_after_its_deadline() {
        let now = Utc::now();
        let mut viewer = staff(UserRole::Viewer);
        assert!(!is_locked(&viewer, now));

        viewer.locked_until = Some(now + Duration::minutes(5));
        assert!(is_locked(&viewer, now));

        viewer.locked_until = Some(now - Duration::seconds(1));
        assert!(!is_locked(&viewer, now));
    }

    #[test]
    fn session_body_hides_password_hash() {
        let mut admin = staff(UserRole::Admin);
        admin.password_hash = hash_password("Kennel123!").unwrap();
        let session = StaffSession {
            access_token: "t".to_string(),
            token_type: "Bearer",
            expires_in: 3600,
            user: UserResponse::from(admin),
        };

        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(json["token_type"], "Bearer");
        assert_eq!(json["user"]["role"], "Admin");
        assert!(!json.to_string().contains("argon2"));
    }
}
