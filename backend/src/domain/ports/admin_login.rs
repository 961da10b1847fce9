//! Driving port for administrator login.

use async_trait::async_trait;

use crate::domain::{AdminCredentials, AdminUser, Error};

/// Domain use-case port for admin authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminLoginService: Send + Sync {
    /// The seeded admin matching both email and password, if any.
    async fn admin_login(
        &self,
        credentials: &AdminCredentials,
    ) -> Result<Option<AdminUser>, Error>;
}
