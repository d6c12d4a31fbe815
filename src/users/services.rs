use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument};

use crate::error::AppError;
use crate::users::dto::{EditRequest, PublicUser};
use crate::users::password::{hash_password, verify_password};
use crate::users::repo::{RepoError, UserStore};

const MIN_PASSWORD_LEN: usize = 8;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::DuplicateEmail => AppError::conflict("email already registered"),
            RepoError::NotFound => AppError::bad_request("user not found"),
            RepoError::Database(detail) => AppError::internal(detail),
        }
    }
}

/// Business rules for the account lifecycle. Owns validation and hashing;
/// never talks to storage except through the store trait.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    hash_cost: u32,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>, hash_cost: u32) -> Self {
        Self { store, hash_cost }
    }

    #[instrument(skip(self, password))]
    pub async fn register(&self, email: &str, password: &str) -> Result<PublicUser, AppError> {
        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(AppError::bad_request("invalid email"));
        }
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AppError::bad_request("password too short"));
        }

        let hash = hash_password(password, self.hash_cost)
            .map_err(|e| AppError::internal(e.to_string()))?;
        let user = self.store.insert(&email, &hash).await?;

        info!(user_id = user.id, email = %user.email, "user registered");
        Ok(user.into())
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<PublicUser, AppError> {
        let email = normalize_email(email);
        let user = self
            .store
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::bad_request("user not found"))?;

        let ok = verify_password(password, &user.password_hash)
            .map_err(|e| AppError::internal(e.to_string()))?;
        if !ok {
            return Err(AppError::bad_request("invalid password"));
        }

        info!(user_id = user.id, email = %user.email, "user logged in");
        Ok(user.into())
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<PublicUser>, AppError> {
        let users = self.store.list_active().await?;
        Ok(users.into_iter().map(PublicUser::from).collect())
    }

    /// Absent or empty fields keep the stored value; a provided password is
    /// re-hashed before the merged record is written.
    #[instrument(skip(self, payload))]
    pub async fn edit(&self, id: i64, payload: EditRequest) -> Result<PublicUser, AppError> {
        let existing = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::bad_request("user not found"))?;

        let email = match payload.email.as_deref() {
            Some(e) if !e.is_empty() => {
                let email = normalize_email(e);
                if !is_valid_email(&email) {
                    return Err(AppError::bad_request("invalid email"));
                }
                email
            }
            _ => existing.email,
        };

        let password_hash = match payload.password.as_deref() {
            Some(p) if !p.is_empty() => {
                if p.len() < MIN_PASSWORD_LEN {
                    return Err(AppError::bad_request("password too short"));
                }
                hash_password(p, self.hash_cost).map_err(|e| AppError::internal(e.to_string()))?
            }
            _ => existing.password_hash,
        };

        let updated = self.store.update(id, &email, &password_hash).await?;
        info!(user_id = updated.id, "user edited");
        Ok(updated.into())
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        self.store.soft_delete(id).await?;
        info!(user_id = id, "user soft-deleted");
        Ok(())
    }
}
