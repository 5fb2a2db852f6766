use study_models::{Role, User, UserId};

/// The authenticated caller behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Option<Role>,
    pub is_staff: bool,
}

impl Identity {
    pub fn has_role(&self, role: Role) -> bool {
        self.role == Some(role)
    }
}

impl From<&User> for Identity {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id,
            role: user.role,
            is_staff: user.is_staff,
        }
    }
}
