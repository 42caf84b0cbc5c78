use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::user::models::NewUser;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::Role;
use crate::domain::user::models::UpdateUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserChanges;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for user operations.
///
/// Concrete implementation of UserServicePort with dependency injection.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    password_hasher: auth::PasswordHasher,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service backed by `repository`.
    pub fn new(repository: Arc<UR>) -> Self {
        Self {
            repository,
            password_hasher: auth::PasswordHasher::new(),
        }
    }

    fn hash_password(&self, password: &str) -> Result<String, UserError> {
        self.password_hasher
            .hash(password)
            .map_err(|e| UserError::HashingFailed(e.to_string()))
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        let password_hash = self.hash_password(command.password.expose())?;

        let new_user = NewUser {
            email: command.email,
            name: command.name,
            password_hash,
            role: Role::User,
        };

        let user = self.repository.create(new_user).await?;
        tracing::info!(user_id = %user.id, "User registered");

        Ok(user)
    }

    async fn get_user(&self, id: UserId) -> Result<User, UserError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        self.repository.find_by_email(email).await
    }

    async fn update_user(
        &self,
        id: UserId,
        command: UpdateUserCommand,
    ) -> Result<User, UserError> {
        let password_hash = command
            .password
            .map(|password| self.hash_password(password.expose()))
            .transpose()?;

        let changes = UserChanges {
            name: command.name.map(|name| name.into_inner()),
            password_hash,
        };

        let user = self.repository.update(id, changes).await?;
        tracing::info!(user_id = %user.id, "User updated");

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::user::models::DisplayName;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::Password;

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: NewUser) -> Result<User, UserError>;
            async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError>;
            async fn update(&self, id: UserId, changes: UserChanges) -> Result<User, UserError>;
        }
    }

    fn stored_user(id: i64, new_user: &NewUser) -> User {
        User {
            id: UserId(id),
            email: new_user.email.clone(),
            name: new_user.name.clone(),
            password_hash: new_user.password_hash.clone(),
            role: new_user.role,
            verified: false,
            verification: None,
        }
    }

    fn existing_user(id: i64) -> User {
        User {
            id: UserId(id),
            email: EmailAddress::new("a@b.com".to_string()).unwrap(),
            name: DisplayName::new("Al".to_string()).unwrap(),
            password_hash: "$argon2id$old_hash".to_string(),
            role: Role::User,
            verified: false,
            verification: None,
        }
    }

    fn register_command() -> RegisterUserCommand {
        RegisterUserCommand::new(
            EmailAddress::new("a@b.com".to_string()).unwrap(),
            DisplayName::new("Al".to_string()).unwrap(),
            Password::new("longenough1".to_string()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_register_hashes_password_and_defaults_role() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_create()
            .withf(|user| {
                user.email.as_str() == "a@b.com"
                    && user.name.as_str() == "Al"
                    && user.role == Role::User
                    && user.password_hash.starts_with("$argon2")
                    && user.password_hash != "longenough1"
            })
            .times(1)
            .returning(|user| Ok(stored_user(1, &user)));

        let service = UserService::new(Arc::new(repository));

        let user = service.register(register_command()).await.unwrap();
        assert_eq!(user.id, UserId(1));
        assert!(!user.verified);
        assert!(auth::PasswordHasher::new().verify("longenough1", &user.password_hash));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repository = MockTestUserRepository::new();

        repository.expect_create().times(1).returning(|user| {
            Err(UserError::EmailAlreadyExists(
                user.email.as_str().to_string(),
            ))
        });

        let service = UserService::new(Arc::new(repository));

        let result = service.register(register_command()).await;
        assert!(matches!(
            result.unwrap_err(),
            UserError::EmailAlreadyExists(_)
        ));
    }

    #[tokio::test]
    async fn test_get_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let result = service.get_user(UserId(99)).await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(UserId(99))));
    }

    #[tokio::test]
    async fn test_find_user_by_email_absent_is_not_an_error() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_find_by_email()
            .withf(|email| email == "nobody@example.com")
            .times(1)
            .returning(|_| Ok(None));

        let service = UserService::new(Arc::new(repository));

        let result = service.find_user_by_email("nobody@example.com").await;
        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_update_user_hashes_new_password() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_update()
            .withf(|id, changes| {
                *id == UserId(5)
                    && changes.name.as_deref() == Some("NewName")
                    && changes
                        .password_hash
                        .as_deref()
                        .is_some_and(|hash| hash.starts_with("$argon2"))
            })
            .times(1)
            .returning(|id, changes| {
                let mut user = existing_user(id.0);
                user.name = DisplayName::new(changes.name.unwrap()).unwrap();
                user.password_hash = changes.password_hash.unwrap();
                Ok(user)
            });

        let service = UserService::new(Arc::new(repository));

        let command = UpdateUserCommand {
            name: Some(DisplayName::new("NewName".to_string()).unwrap()),
            password: Some(Password::new("newpassword".to_string()).unwrap()),
        };

        let user = service.update_user(UserId(5), command).await.unwrap();
        assert_eq!(user.name.as_str(), "NewName");
        assert!(auth::PasswordHasher::new().verify("newpassword", &user.password_hash));
    }

    #[tokio::test]
    async fn test_update_user_without_changes() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_update()
            .withf(|_, changes| *changes == UserChanges::default())
            .times(1)
            .returning(|id, _| Ok(existing_user(id.0)));

        let service = UserService::new(Arc::new(repository));

        let user = service
            .update_user(UserId(5), UpdateUserCommand::default())
            .await
            .unwrap();
        assert_eq!(user.password_hash, "$argon2id$old_hash");
    }

    #[tokio::test]
    async fn test_update_user_not_found() {
        let mut repository = MockTestUserRepository::new();

        repository
            .expect_update()
            .times(1)
            .returning(|id, _| Err(UserError::NotFound(id)));

        let service = UserService::new(Arc::new(repository));

        let result = service
            .update_user(UserId(5), UpdateUserCommand::default())
            .await;
        assert!(matches!(result.unwrap_err(), UserError::NotFound(_)));
    }
}
