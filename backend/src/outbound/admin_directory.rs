//! Fixed administrator accounts.

use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{AdminDirectory, AdminDirectoryError};
use crate::domain::{AdminCredentials, AdminId, AdminRole, AdminUser};

struct AdminAccount {
    user: AdminUser,
    password: Zeroizing<String>,
}

/// [`AdminDirectory`] over an in-process account list.
pub struct SeededAdminDirectory {
    accounts: Vec<AdminAccount>,
}

impl SeededAdminDirectory {
    /// Directory holding the demo administrator and support accounts.
    pub fn demo() -> Result<Self, AdminDirectoryError> {
        let account = |id: &str, name: &str, email: &str, role: AdminRole, password: &str| {
            AdminId::new(id)
                .map(|id| AdminAccount {
                    user: AdminUser::new(id, name, email, role),
                    password: Zeroizing::new(password.to_owned()),
                })
                .map_err(|error| AdminDirectoryError::connection(error.to_string()))
        };
        Ok(Self {
            accounts: vec![
                account("1", "Admin User", "admin@migii.com", AdminRole::Admin, "admin123")?,
                account(
                    "2",
                    "Support Staff",
                    "support@migii.com",
                    AdminRole::Support,
                    "support123",
                )?,
            ],
        })
    }
}

impl std::fmt::Debug for SeededAdminDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeededAdminDirectory")
            .field("accounts", &self.accounts.len())
            .finish()
    }
}

#[async_trait]
impl AdminDirectory for SeededAdminDirectory {
    async fn find_by_credentials(
        &self,
        credentials: &AdminCredentials,
    ) -> Result<Option<AdminUser>, AdminDirectoryError> {
        Ok(self
            .accounts
            .iter()
            .find(|account| {
                account.user.email() == credentials.email()
                    && account.password.as_str() == credentials.password()
            })
            .map(|account| account.user.clone()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("admin@migii.com", "admin123", Some(AdminRole::Admin))]
    #[case("SUPPORT@migii.com ", "support123", Some(AdminRole::Support))]
    #[case("admin@migii.com", "support123", None)]
    #[case("nobody@migii.com", "admin123", None)]
    #[case("admin@migii.com", "wrong", None)]
    #[tokio::test]
    async fn matches_demo_pairs_only(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: Option<AdminRole>,
    ) {
        let directory = SeededAdminDirectory::demo().expect("directory");
        let credentials = AdminCredentials::try_from_parts(email, password).expect("credentials");
        let found = directory
            .find_by_credentials(&credentials)
            .await
            .expect("lookup");
        assert_eq!(found.map(|user| user.role()), expected);
    }
}
