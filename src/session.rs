use serde::{Deserialize, Serialize};

use crate::common::types::User;

/// Authenticated session context. Created by a successful login, owned by
/// the backend worker, cloned to the UI, dropped on logout. There is no
/// ambient global session state anywhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: User,
    pub token: Option<String>,
}

impl Session {
    pub fn new(user: User, token: Option<String>) -> Self {
        Self { user, token }
    }

    pub fn user_id(&self) -> i64 {
        self.user.id
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }
}
