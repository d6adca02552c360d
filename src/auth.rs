use std::sync::{Arc, RwLock};
use std::time::Duration;

use log::info;

const MOCK_USERNAME: &str = "admin";
const MOCK_PASSWORD: &str = "password";

/// Mock sign-in against fixed demo credentials, with the same artificial
/// delay a real auth round-trip would have. A rejected login is a normal
/// `false`, not an error.
#[derive(Clone)]
pub struct AuthService {
    latency: Duration,
    user: Arc<RwLock<Option<String>>>,
}

impl AuthService {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            user: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn login(&self, username: &str, password: &str) -> bool {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let accepted = username == MOCK_USERNAME && password == MOCK_PASSWORD;
        if accepted {
            *self.user.write().unwrap() = Some(username.to_string());
            info!("user {username} signed in");
        }
        accepted
    }

    pub fn current_user(&self) -> Option<String> {
        self.user.read().unwrap().clone()
    }

    pub fn logout(&self) {
        *self.user.write().unwrap() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn accepts_only_the_demo_credentials() {
        let auth = AuthService::new(Duration::ZERO);

        assert!(!auth.login("admin", "wrong").await);
        assert!(auth.current_user().is_none());

        assert!(auth.login("admin", "password").await);
        assert_eq!(auth.current_user().as_deref(), Some("admin"));

        auth.logout();
        assert!(auth.current_user().is_none());
    }
}
