use std::collections::HashSet;
use thiserror::Error;

pub const UNLOCK_KEY_PREFIX: &str = "portfolio-unlocked:";

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GateError {
    #[error("Enter the password to continue.")]
    Empty,
    #[error("That password is incorrect.")]
    IncorrectPassword,
    #[error("This case study is not available right now.")]
    NotConfigured,
}

impl GateError {
    /// Stable name for log fields.
    pub fn code(self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::IncorrectPassword => "incorrect_password",
            Self::NotConfigured => "not_configured",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AccessGate {
    secret: Option<String>,
}

impl AccessGate {
    pub fn new(secret: Option<String>) -> Self {
        Self { secret }
    }

    pub fn check(&self, attempt: &str) -> Result<(), GateError> {
        let Some(secret) = self.secret.as_deref() else {
            return Err(GateError::NotConfigured);
        };
        let attempt = attempt.trim();
        if attempt.is_empty() {
            return Err(GateError::Empty);
        }
        if attempt != secret {
            return Err(GateError::IncorrectPassword);
        }
        Ok(())
    }
}

pub fn unlock_key(slug: &str) -> String {
    format!("{UNLOCK_KEY_PREFIX}{slug}")
}

pub trait UnlockStore {
    fn is_unlocked(&self, slug: &str) -> bool;
    fn mark_unlocked(&mut self, slug: &str);
}

#[derive(Clone, Debug, Default)]
pub struct MemoryUnlockStore {
    unlocked: HashSet<String>,
}

impl UnlockStore for MemoryUnlockStore {
    fn is_unlocked(&self, slug: &str) -> bool {
        self.unlocked.contains(slug)
    }

    fn mark_unlocked(&mut self, slug: &str) {
        self.unlocked.insert(slug.to_string());
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GateForm {
    input: String,
    error: Option<GateError>,
}

impl GateForm {
    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn message(&self) -> Option<String> {
        self.error.map(|error| error.to_string())
    }

    pub fn set_input(&mut self, value: &str) {
        self.input = value.to_string();
        self.error = None;
    }

    pub fn submit<S: UnlockStore>(&mut self, gate: &AccessGate, store: &mut S, slug: &str) -> Result<(), GateError> {
        match gate.check(&self.input) {
            Ok(()) => {
                store.mark_unlocked(slug);
                self.input.clear();
                self.error = None;
                Ok(())
            }
            Err(error) => {
                self.error = Some(error);
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> AccessGate {
        AccessGate::new(Some("open-sesame".to_string()))
    }

    #[test]
    fn check_distinguishes_empty_wrong_and_right() {
        assert_eq!(gate().check("   "), Err(GateError::Empty));
        assert_eq!(gate().check("guess"), Err(GateError::IncorrectPassword));
        assert_eq!(gate().check(" open-sesame "), Ok(()));
        assert_eq!(AccessGate::default().check("open-sesame"), Err(GateError::NotConfigured));
        assert_eq!(GateError::IncorrectPassword.code(), "incorrect_password");
    }

    #[test]
    fn wrong_attempts_show_message_without_lockout() {
        let mut store = MemoryUnlockStore::default();
        let mut form = GateForm::default();

        for _ in 0..10 {
            form.set_input("nope");
            assert_eq!(form.submit(&gate(), &mut store, "atlas"), Err(GateError::IncorrectPassword));
            assert_eq!(form.message().as_deref(), Some("That password is incorrect."));
        }

        form.set_input("open-sesame");
        assert_eq!(form.message(), None);
        assert_eq!(form.submit(&gate(), &mut store, "atlas"), Ok(()));
        assert!(store.is_unlocked("atlas"));
        assert!(!store.is_unlocked("harbor"));
        assert_eq!(form.input(), "");
    }

    #[test]
    fn unlock_keys_are_namespaced_per_slug() {
        assert_eq!(unlock_key("atlas"), "portfolio-unlocked:atlas");
    }
}
