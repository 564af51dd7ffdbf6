use async_trait::async_trait;

use crate::domain::entities::User;

// Port for account persistence used by the user use cases.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn list_users(&self) -> Result<Vec<User>, String>;
    // Stores a new account and returns it with its generated id.
    async fn create_user(&self, name: String) -> Result<User, String>;
}

// Port for minting new game session ids.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}
