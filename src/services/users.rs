//! User management service

use chrono::Utc;

use crate::{
    error::{AppError, AppResult, Entity},
    models::user::{CreateUser, UpdateUser, User},
    repository::SharedRepository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: SharedRepository,
}

impl UsersService {
    pub fn new(repository: SharedRepository) -> Self {
        Self { repository }
    }

    /// Register a new user
    pub async fn create_user(&self, user: CreateUser) -> AppResult<User> {
        let mut repository = self.repository.write().await;
        match repository.users.register(user, Utc::now()) {
            Ok(created) => {
                tracing::info!(
                    "User {} registered ({}, {})",
                    created.id,
                    created.registration_number,
                    created.role
                );
                Ok(created)
            }
            Err(e) => {
                tracing::debug!("User registration refused: {}", e);
                Err(e)
            }
        }
    }

    pub async fn list_users(&self) -> Vec<User> {
        self.repository.read().await.users.list()
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.read().await.users.get_by_id(id).cloned()
    }

    pub async fn get_by_registration_number(&self, registration_number: &str) -> AppResult<User> {
        self.repository
            .read()
            .await
            .users
            .find_by_registration_number(registration_number)
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(
                    Entity::User,
                    format!("User with registration number {} not found", registration_number),
                )
            })
    }

    pub async fn update_user(&self, id: i32, changes: UpdateUser) -> AppResult<User> {
        let updated = self.repository.write().await.users.update(id, changes)?;
        tracing::info!("User {} updated (status {})", updated.id, updated.status);
        Ok(updated)
    }

    /// Delete a user. Its loans stay in the ledger for reporting.
    pub async fn delete_user(&self, id: i32) -> AppResult<()> {
        if !self.repository.write().await.users.remove(id) {
            return Err(AppError::user_not_found(id));
        }
        tracing::info!("User {} removed", id);
        Ok(())
    }

    pub async fn count(&self) -> usize {
        self.repository.read().await.users.len()
    }
}
