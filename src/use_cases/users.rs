use crate::domain::{User, UserError, UserStore};

const MAX_NAME_LEN: usize = 64;

// Account creation use case with an injected store.
pub struct CreateUserUseCase<'a, S: ?Sized> {
    pub store: &'a S,
}

impl<S> CreateUserUseCase<'_, S>
where
    S: UserStore + ?Sized,
{
    pub async fn execute(&self, name: &str) -> Result<User, UserError> {
        let name = validate_name(name)?;
        self.store
            .create_user(name)
            .await
            .map_err(UserError::StorageFailure)
    }
}

// Account listing use case with an injected store.
pub struct ListUsersUseCase<'a, S: ?Sized> {
    pub store: &'a S,
}

impl<S> ListUsersUseCase<'_, S>
where
    S: UserStore + ?Sized,
{
    pub async fn execute(&self) -> Result<Vec<User>, UserError> {
        self.store
            .list_users()
            .await
            .map_err(UserError::StorageFailure)
    }
}

fn validate_name(value: &str) -> Result<String, UserError> {
    let name = value.trim();
    let len = name.chars().count();
    if len == 0 || len > MAX_NAME_LEN {
        return Err(UserError::InvalidName);
    }
    if name.chars().any(char::is_control) {
        return Err(UserError::InvalidName);
    }
    Ok(name.to_string())
}
