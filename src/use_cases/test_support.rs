use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{User, UserStore};

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub list: bool,
    pub create: bool,
}

// User store double with predictable ids and switchable failures.
#[derive(Clone)]
pub(crate) struct RecordingUserStore {
    users: Arc<Mutex<Vec<User>>>,
    failures: FailureFlags,
}

impl RecordingUserStore {
    pub(crate) fn new() -> Self {
        Self {
            users: Arc::new(Mutex::new(Vec::new())),
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn stored_users(&self) -> Vec<User> {
        self.users.lock().expect("users mutex poisoned").clone()
    }
}

#[async_trait]
impl UserStore for RecordingUserStore {
    async fn list_users(&self) -> Result<Vec<User>, String> {
        if self.failures.list {
            return Err("list failed".to_string());
        }
        Ok(self.stored_users())
    }

    async fn create_user(&self, name: String) -> Result<User, String> {
        if self.failures.create {
            return Err("create failed".to_string());
        }

        let mut guard = self.users.lock().expect("users mutex poisoned");
        let user = User {
            id: format!("user-{}", guard.len() + 1),
            name,
        };
        guard.push(user.clone());
        Ok(user)
    }
}
