use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;

use crate::domain::user::errors::UserError;
use crate::domain::user::models::CreateUserCommand;
use crate::domain::user::models::NewUser;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;
use crate::domain::user::ports::UserServicePort;

/// Domain service implementation for user operations.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Passwords are hashed with the same hasher `authenticator` verifies with.
    pub fn new(repository: Arc<UR>, authenticator: Arc<Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn create_user(&self, command: CreateUserCommand) -> Result<User, UserError> {
        // Uniqueness is only checked here, not enforced by the store.
        if self
            .repository
            .find_by_email(&command.email)
            .await?
            .is_some()
        {
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let password_hash = self
            .authenticator
            .hash_password(command.password.as_str())
            .map_err(|e| UserError::PasswordHashing(e.to_string()))?;

        let user = self
            .repository
            .insert(NewUser {
                first_name: command.first_name,
                last_name: command.last_name,
                email: command.email,
                password_hash,
                is_admin: command.is_admin,
            })
            .await?;

        tracing::info!(user_id = %user.id, is_admin = user.is_admin, "User created");
        Ok(user)
    }

    async fn get_user(&self, id: &UserId) -> Result<User, UserError> {
        Ok(self.repository.find_by_id(id).await?)
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        Ok(self.repository.find_all().await?)
    }

    async fn update_user(&self, id: &UserId, command: UpdateUserCommand) -> Result<(), UserError> {
        if command.is_empty() {
            // Nothing to write, but a missing user is still reported.
            self.repository.find_by_id(id).await?;
            return Ok(());
        }

        self.repository.update_by_id(id, &command).await?;
        Ok(())
    }

    async fn delete_user(&self, id: &UserId) -> Result<(), UserError> {
        self.repository.delete_by_id(id).await?;
        tracing::info!(user_id = %id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use auth::PasswordError;
    use auth::PasswordHasher;
    use bson::oid::ObjectId;
    use mockall::mock;

    use super::*;
    use crate::domain::errors::StoreError;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::PersonName;
    use crate::domain::user::models::PlainPassword;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn insert(&self, user: NewUser) -> Result<User, StoreError>;
            async fn find_by_id(&self, id: &UserId) -> Result<User, StoreError>;
            async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, StoreError>;
            async fn find_all(&self) -> Result<Vec<User>, StoreError>;
            async fn update_by_id(&self, id: &UserId, changes: &UpdateUserCommand) -> Result<(), StoreError>;
            async fn delete_by_id(&self, id: &UserId) -> Result<(), StoreError>;
            async fn drop_all(&self) -> Result<(), StoreError>;
        }
    }

    fn name(value: &str) -> PersonName {
        PersonName::new(value.to_string()).unwrap()
    }

    fn sample_user(id: UserId) -> User {
        User {
            id,
            first_name: name("James"),
            last_name: name("Foo"),
            email: EmailAddress::new("james@foo.com".to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            is_admin: false,
        }
    }

    fn authenticator() -> Arc<Authenticator> {
        Arc::new(Authenticator::new(
            b"user_service_test_secret_32_bytes!!",
            chrono::Duration::hours(3),
        ))
    }

    fn create_command() -> CreateUserCommand {
        CreateUserCommand::guest(
            name("James"),
            name("Foo"),
            EmailAddress::new("james@foo.com".to_string()).unwrap(),
            PlainPassword::new("supersecurepassword".to_string()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_create_user_success() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_insert()
            .withf(|user| {
                user.first_name.as_str() == "James"
                    && user.email.as_str() == "james@foo.com"
                    && user.password_hash.starts_with("$argon2")
                    && !user.is_admin
            })
            .times(1)
            .returning(|user| Ok(user.with_id(UserId(ObjectId::new()))));

        let service = UserService::new(Arc::new(repository), authenticator());

        let user = service.create_user(create_command()).await.unwrap();
        assert_eq!(user.last_name.as_str(), "Foo");
        // Password is hashed with real Argon2
        assert!(user.password_hash.starts_with("$argon2"));
        assert_ne!(user.password_hash, "supersecurepassword");
    }

    struct ReversingHasher;

    impl PasswordHasher for ReversingHasher {
        fn hash(&self, password: &str) -> Result<String, PasswordError> {
            Ok(format!("rev${}", password.chars().rev().collect::<String>()))
        }

        fn verify(&self, digest: &str, password: &str) -> Result<bool, PasswordError> {
            Ok(digest == self.hash(password)?)
        }
    }

    #[tokio::test]
    async fn test_create_user_hashes_with_authenticator_hasher() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_find_by_email().returning(|_| Ok(None));
        repository
            .expect_insert()
            .withf(|user| user.password_hash == "rev$drowssaperucesrepus")
            .times(1)
            .returning(|user| Ok(user.with_id(UserId(ObjectId::new()))));

        let authenticator = Arc::new(Authenticator::with_hasher(
            b"user_service_test_secret_32_bytes!!",
            chrono::Duration::hours(3),
            ReversingHasher,
        ));
        let service = UserService::new(Arc::new(repository), authenticator.clone());

        let user = service.create_user(create_command()).await.unwrap();

        // The digest written at registration is accepted at login
        let issued = authenticator
            .authenticate("supersecurepassword", &user.password_hash, user.id, None)
            .unwrap();
        assert_eq!(issued.claims.id, user.id.to_string());
    }

    #[tokio::test]
    async fn test_create_admin_keeps_flag() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_find_by_email().returning(|_| Ok(None));
        repository
            .expect_insert()
            .withf(|user| user.is_admin)
            .times(1)
            .returning(|user| Ok(user.with_id(UserId(ObjectId::new()))));

        let service = UserService::new(Arc::new(repository), authenticator());

        let user = service.create_user(create_command().admin()).await.unwrap();
        assert!(user.is_admin);
    }

    #[tokio::test]
    async fn test_create_user_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(sample_user(UserId(ObjectId::new())))));
        repository.expect_insert().times(0);

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service.create_user(create_command()).await;
        assert_eq!(
            result.unwrap_err(),
            UserError::EmailAlreadyExists("james@foo.com".to_string())
        );
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|id| Err(StoreError::not_found("users", id)));

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service.get_user(&UserId(ObjectId::new())).await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_get_user_timeout_is_store_error() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .returning(|_| Err(StoreError::Timeout(std::time::Duration::from_secs(5))));

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service.get_user(&UserId(ObjectId::new())).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::Store(StoreError::Timeout(_))
        ));
    }

    #[tokio::test]
    async fn test_update_user_passes_changes() {
        let mut repository = MockTestUserRepository::new();
        let user_id = UserId(ObjectId::new());

        repository
            .expect_update_by_id()
            .withf(move |id, changes| {
                *id == user_id
                    && changes.first_name.as_ref().map(|n| n.as_str()) == Some("Jimmy")
                    && changes.last_name.is_none()
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = UserService::new(Arc::new(repository), authenticator());

        let command = UpdateUserCommand {
            first_name: Some(name("Jimmy")),
            last_name: None,
        };
        assert!(service.update_user(&user_id, command).await.is_ok());
    }

    #[tokio::test]
    async fn test_update_user_without_changes_checks_existence() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_update_by_id().times(0);
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|id| Err(StoreError::not_found("users", id)));

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service
            .update_user(&UserId(ObjectId::new()), UpdateUserCommand::default())
            .await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_delete_by_id()
            .times(1)
            .returning(|id| Err(StoreError::not_found("users", id)));

        let service = UserService::new(Arc::new(repository), authenticator());

        let result = service.delete_user(&UserId(ObjectId::new())).await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_users() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_find_all().times(1).returning(|| {
            Ok(vec![
                sample_user(UserId(ObjectId::new())),
                sample_user(UserId(ObjectId::new())),
            ])
        });

        let service = UserService::new(Arc::new(repository), authenticator());

        assert_eq!(service.list_users().await.unwrap().len(), 2);
    }
}
