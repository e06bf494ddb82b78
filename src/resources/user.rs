use crate::client::BuildkiteClient;
use crate::error::Result;
use crate::types::User;

/// Read-only lookup of an organization member by email.
pub struct UserDataSource<'c> {
    client: &'c BuildkiteClient,
}

impl<'c> UserDataSource<'c> {
    pub const TYPE_NAME: &'static str = "buildkite_user";

    pub fn new(client: &'c BuildkiteClient) -> Self {
        Self { client }
    }

    /// Fails with a cardinality error unless exactly one member has `email`.
    pub async fn read(&self, email: &str) -> Result<User> {
        self.client.get_user(email).await
    }
}
