//! Login route state.

use crate::common::TextField;

/// Focusable elements of the login form, in tab order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginFocus {
    #[default]
    Email,
    Password,
    SignIn,
    SignUp,
}

impl LoginFocus {
    const ORDER: [LoginFocus; 4] = [
        LoginFocus::Email,
        LoginFocus::Password,
        LoginFocus::SignIn,
        LoginFocus::SignUp,
    ];

    fn index(self) -> usize {
        Self::ORDER
            .iter()
            .position(|f| *f == self)
            .unwrap_or_default()
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn is_field(self) -> bool {
        matches!(self, LoginFocus::Email | LoginFocus::Password)
    }
}

/// Email/password form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginState {
    pub email: TextField,
    pub password: TextField,
    pub focus: LoginFocus,
}

impl LoginState {
    /// The field under focus, if the focus is on a field.
    pub fn focused_field_mut(&mut self) -> Option<&mut TextField> {
        match self.focus {
            LoginFocus::Email => Some(&mut self.email),
            LoginFocus::Password => Some(&mut self.password),
            LoginFocus::SignIn | LoginFocus::SignUp => None,
        }
    }
}
