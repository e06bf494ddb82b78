use serde::Deserialize;
use serde_json::json;

use super::core::BuildkiteClient;
use super::documents;
use super::graphql::Connection;
use crate::error::{BuildkiteError, Result};
use crate::types::User;

// Two results are enough to tell "exactly one" from "more than one".
impl BuildkiteClient {
    /// Find the organization member with the given email.
    ///
    /// # Errors
    ///
    /// Returns [`BuildkiteError::Cardinality`] unless exactly one member
    /// matches.
    pub async fn get_user(&self, email: &str) -> Result<User> {
        #[derive(Deserialize)]
        struct Data {
            organization: Option<Org>,
        }
        #[derive(Deserialize)]
        struct Org {
            members: Option<Connection<Member>>,
        }
        #[derive(Deserialize)]
        struct Member {
            user: Option<User>,
        }

        let data: Data = self
            .graphql
            .execute(
                "UserByEmail",
                documents::USER,
                json!({ "slug": self.org.slug(), "email": email }),
            )
            .await?;

        let org = data.organization.ok_or_else(|| BuildkiteError::NotFound {
            kind: "Organization",
            id: self.org.slug().to_string(),
        })?;
        let mut users: Vec<User> = org
            .members
            .map(Connection::into_nodes)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|member| member.user)
            .collect();

        if users.len() != 1 {
            return Err(BuildkiteError::Cardinality {
                what: format!("users with email {email}"),
                expected: 1,
                found: users.len(),
            });
        }
        Ok(users.remove(0))
    }
}
