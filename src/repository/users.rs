//! User registry

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{is_valid_email, CreateUser, UpdateUser, User},
};

/// Users keyed by id, plus the reserved registration numbers and emails.
#[derive(Debug)]
pub struct UsersRepository {
    users: IndexMap<i32, User>,
    registration_numbers: HashSet<String>,
    emails: HashSet<String>,
    next_id: i32,
}

impl Default for UsersRepository {
    fn default() -> Self {
        Self {
            users: IndexMap::new(),
            registration_numbers: HashSet::new(),
            emails: HashSet::new(),
            next_id: 1,
        }
    }
}

/// Treat an empty email as no email at all.
fn normalize_email(email: Option<String>) -> Option<String> {
    email.filter(|e| !e.is_empty())
}

impl UsersRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new user, stamping it with `at`.
    pub fn register(&mut self, mut user: CreateUser, at: DateTime<Utc>) -> AppResult<User> {
        user.email = normalize_email(user.email);
        user.validate()?;

        if self.registration_numbers.contains(&user.registration_number) {
            return Err(AppError::Validation(format!(
                "Registration number {} is already registered",
                user.registration_number
            )));
        }
        if let Some(email) = &user.email {
            if self.emails.contains(email) {
                return Err(AppError::Validation(format!("Email {} is already registered", email)));
            }
        }

        let id = self.next_id;
        self.next_id += 1;

        let created = User {
            id,
            name: user.name,
            registration_number: user.registration_number,
            role: user.role,
            email: user.email,
            registration_timestamp: at,
            status: Default::default(),
        };

        self.registration_numbers.insert(created.registration_number.clone());
        if let Some(email) = &created.email {
            self.emails.insert(email.clone());
        }
        self.users.insert(id, created.clone());

        Ok(created)
    }

    pub fn list(&self) -> Vec<User> {
        self.users.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn find_by_id(&self, id: i32) -> Option<&User> {
        self.users.get(&id)
    }

    pub fn get_by_id(&self, id: i32) -> AppResult<&User> {
        self.find_by_id(id).ok_or_else(|| AppError::user_not_found(id))
    }

    pub fn find_by_registration_number(&self, registration_number: &str) -> Option<&User> {
        self.users
            .values()
            .find(|u| u.registration_number == registration_number)
    }

    /// Apply the given fields. Nothing changes unless every field is valid.
    pub fn update(&mut self, id: i32, changes: UpdateUser) -> AppResult<User> {
        let current = self.get_by_id(id)?;
        changes.validate()?;

        let new_email = match changes.email {
            Some(email) => {
                let email = normalize_email(Some(email));
                if let Some(address) = &email {
                    if !is_valid_email(address) {
                        return Err(AppError::Validation(format!("Invalid email format: {}", address)));
                    }
                    let own = current.email.as_deref() == Some(address.as_str());
                    if !own && self.emails.contains(address) {
                        return Err(AppError::Validation(format!("Email {} is already registered", address)));
                    }
                }
                Some(email)
            }
            None => None,
        };

        let user = self
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::user_not_found(id))?;

        if let Some(name) = changes.name {
            user.name = name;
        }
        if let Some(email) = new_email {
            if let Some(old) = user.email.take() {
                self.emails.remove(&old);
            }
            if let Some(address) = &email {
                self.emails.insert(address.clone());
            }
            user.email = email;
        }
        if let Some(status) = changes.status {
            user.status = status;
        }

        Ok(user.clone())
    }

    /// Delete a user and release its registration number and email.
    pub fn remove(&mut self, id: i32) -> bool {
        match self.users.shift_remove(&id) {
            Some(user) => {
                self.registration_numbers.remove(&user.registration_number);
                if let Some(email) = &user.email {
                    self.emails.remove(email);
                }
                true
            }
            None => false,
        }
    }

    #[cfg(test)]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
