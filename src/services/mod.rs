//! Business logic services

pub mod catalog;
pub mod loans;
pub mod reports;
pub mod users;

use crate::repository::Repository;

/// Container for all services. They share one repository behind one lock.
#[derive(Clone)]
pub struct Services {
    pub catalog: catalog::CatalogService,
    pub users: users::UsersService,
    pub loans: loans::LoansService,
    pub reports: reports::ReportsService,
}

impl Services {
    /// Create all services over the given repository
    pub fn new(repository: Repository) -> Self {
        let repository = repository.into_shared();
        Self {
            catalog: catalog::CatalogService::new(repository.clone()),
            users: users::UsersService::new(repository.clone()),
            loans: loans::LoansService::new(repository.clone()),
            reports: reports::ReportsService::new(repository),
        }
    }
}
