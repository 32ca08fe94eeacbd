//! Users service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::PgPool;
use tracing::info;

use crate::{
    domain::users::{
        data::NewUser,
        errors::UsersServiceError,
        records::{UserRecord, UserUuid},
        repository::PgUsersRepository,
    },
    pagination::{Page, PageRequest},
};

#[derive(Debug, Clone)]
pub struct PgUsersService {
    repository: PgUsersRepository,
}

impl PgUsersService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: PgUsersRepository::new(pool),
        }
    }
}

#[async_trait]
impl UsersService for PgUsersService {
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError> {
        let user = normalise_new_user(user)?;

        self.repository
            .create_user(user)
            .await
            .map_err(Into::into)
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError> {
        self.repository.get_user(user).await.map_err(Into::into)
    }

    async fn list_users(&self, page: PageRequest) -> Result<Page<UserRecord>, UsersServiceError> {
        let page = page
            .validate()
            .map_err(|_| UsersServiceError::InvalidData("invalid page request"))?;

        let (users, total) = self.repository.list_users(page).await?;

        Ok(Page::new(users, page, total))
    }

    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError> {
        let rows_affected = self.repository.delete_user(user).await?;

        if rows_affected == 0 {
            return Err(UsersServiceError::NotFound);
        }

        info!(user_uuid = %user, "deleted user");

        Ok(())
    }
}

/// User account operations.
#[automock]
#[async_trait]
pub trait UsersService: Send + Sync {
    /// Creates a new user.
    async fn create_user(&self, user: NewUser) -> Result<UserRecord, UsersServiceError>;

    /// Retrieves a single, non-deleted user.
    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, UsersServiceError>;

    /// Lists live users, newest first.
    async fn list_users(&self, page: PageRequest) -> Result<Page<UserRecord>, UsersServiceError>;

    /// Soft-deletes a user. Their API tokens stop authenticating immediately.
    async fn delete_user(&self, user: UserUuid) -> Result<(), UsersServiceError>;
}

fn normalise_new_user(user: NewUser) -> Result<NewUser, UsersServiceError> {
    let email = user.email.trim().to_string();
    let name = user.name.trim().to_string();

    if name.is_empty() {
        return Err(UsersServiceError::InvalidData("name cannot be empty"));
    }

    let well_formed = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));

    if !well_formed {
        return Err(UsersServiceError::InvalidData("email is not well formed"));
    }

    Ok(NewUser {
        uuid: user.uuid,
        email,
        name,
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn new_user(email: &str, name: &str) -> NewUser {
        NewUser {
            uuid: UserUuid::new(),
            email: email.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn normalise_trims_whitespace() -> TestResult {
        let user = normalise_new_user(new_user("  ada@example.com ", " Ada "))?;

        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.name, "Ada");

        Ok(())
    }

    #[test]
    fn normalise_rejects_malformed_email() {
        for email in ["", "ada", "@example.com", "ada@localhost"] {
            let result = normalise_new_user(new_user(email, "Ada"));

            assert!(
                matches!(result, Err(UsersServiceError::InvalidData(_))),
                "expected InvalidData for {email:?}, got {result:?}"
            );
        }
    }

    #[test]
    fn normalise_rejects_blank_name() {
        let result = normalise_new_user(new_user("ada@example.com", "   "));

        assert!(
            matches!(result, Err(UsersServiceError::InvalidData(_))),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn create_user_returns_correct_uuid_and_email() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = UserUuid::new();

        let user = ctx
            .users
            .create_user(NewUser {
                uuid,
                email: "grace@example.com".to_string(),
                name: "Grace".to_string(),
            })
            .await?;

        assert_eq!(user.uuid, uuid);
        assert_eq!(user.email, "grace@example.com");
        assert!(user.deleted_at.is_none());

        let fetched = ctx.users.get_user(uuid).await?;

        assert_eq!(fetched.uuid, uuid);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn create_user_duplicate_email_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.users
            .create_user(new_user("dup@example.com", "First"))
            .await?;

        let result = ctx
            .users
            .create_user(new_user("DUP@example.com", "Second"))
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn list_users_skips_deleted_users() -> TestResult {
        let ctx = TestContext::new().await;

        let kept = ctx
            .users
            .create_user(new_user("kept@example.com", "Kept"))
            .await?;
        let gone = ctx
            .users
            .create_user(new_user("gone@example.com", "Gone"))
            .await?;

        ctx.users.delete_user(gone.uuid).await?;

        let page = ctx.users.list_users(PageRequest::default()).await?;
        let uuids: Vec<_> = page.items.iter().map(|user| user.uuid).collect();

        assert_eq!(uuids, vec![kept.uuid]);
        assert_eq!(page.total, 1);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn delete_user_twice_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx
            .users
            .create_user(new_user("twice@example.com", "Twice"))
            .await?;

        ctx.users.delete_user(user.uuid).await?;

        let result = ctx.users.delete_user(user.uuid).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        let fetched = ctx.users.get_user(user.uuid).await;

        assert!(
            matches!(fetched, Err(UsersServiceError::NotFound)),
            "deleted user should not be fetchable, got {fetched:?}"
        );

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn list_users_rejects_oversized_page() {
        let ctx = TestContext::new().await;

        let result = ctx
            .users
            .list_users(PageRequest {
                page: 1,
                page_size: 1_000,
            })
            .await;

        assert!(
            matches!(result, Err(UsersServiceError::InvalidData(_))),
            "expected InvalidData, got {result:?}"
        );
    }

    #[tokio::test]
    #[ignore = "requires a Docker daemon for testcontainers"]
    async fn get_user_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.users.get_user(UserUuid::new()).await;

        assert!(
            matches!(result, Err(UsersServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
