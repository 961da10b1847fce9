//! Port for looking up administrator accounts by credentials.

use async_trait::async_trait;

use crate::domain::{AdminCredentials, AdminUser};

use super::define_port_error;

define_port_error! {
    /// Errors raised by admin directory adapters.
    pub enum AdminDirectoryError {
        /// Directory could not be reached.
        Connection { message: String } => "admin directory connection failed: {message}",
    }
}

/// Read-only administrator account source.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminDirectory: Send + Sync {
    /// The account whose email and password both match, if any.
    async fn find_by_credentials(
        &self,
        credentials: &AdminCredentials,
    ) -> Result<Option<AdminUser>, AdminDirectoryError>;
}
