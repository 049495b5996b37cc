use std::time::Duration;
use tubely_api::auth::JwtService;
use uuid::Uuid;

use super::{TEST_JWT_ISSUER, TEST_JWT_SECRET};

/// A caller with a valid bearer token.
pub struct TestUser {
    pub user_id: Uuid,
    pub token: String,
}

impl TestUser {
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

pub fn test_user(jwt: &JwtService) -> TestUser {
    let user_id = Uuid::new_v4();
    let token = jwt
        .issue_token(user_id, Duration::from_secs(3600))
        .expect("Failed to sign test token");
    TestUser { user_id, token }
}

/// Token signed with the right secret but for a different issuer.
pub fn foreign_issuer_token(user_id: Uuid) -> String {
    JwtService::new(TEST_JWT_SECRET, format!("not-{}", TEST_JWT_ISSUER))
        .issue_token(user_id, Duration::from_secs(3600))
        .expect("Failed to sign test token")
}
