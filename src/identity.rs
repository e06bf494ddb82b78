//! Identifiers for the two Buildkite backends.
//!
//! REST addresses pipelines by organization-scoped slug and hands out its
//! own opaque ids; GraphQL uses global node ids for everything. The types
//! here keep those spaces apart so a slug can never be passed where a node
//! id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// GraphQL global node id (e.g., `UGlwZWxpbmUtLS0wMTg...`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Organization-unique, human-chosen identifier used in REST paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    pub fn new(slug: impl Into<String>) -> Self {
        Self(slug.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The `org/slug` form GraphQL lookups take as their `slug` argument.
    pub fn qualified(&self, org: &Slug) -> String {
        format!("{}/{}", org.0, self.0)
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Slug {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Opaque REST identifier assigned on create.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestId(String);

impl RestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The organization a client is bound to.
///
/// `id` is resolved once while the client is constructed and is never
/// reassigned afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    slug: Slug,
    id: NodeId,
}

impl Organization {
    pub(crate) fn new(slug: Slug, id: NodeId) -> Self {
        Self { slug, id }
    }

    pub fn slug(&self) -> &Slug {
        &self.slug
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }
}

/// Identifier bundle for a pipeline.
///
/// The slug is the primary key and the only one guaranteed to exist right
/// after a REST create. Secondary keys carry their backend in their type:
/// the [`RestId`] is recorded when the server returns it, and the
/// [`NodeId`] is never stored here but resolved from the slug through
/// [`crate::client::PipelineScope::node_id`] whenever a GraphQL-only
/// operation needs it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineIdentity {
    pub slug: Slug,
    pub rest_id: Option<RestId>,
}

impl PipelineIdentity {
    pub fn from_slug(slug: impl Into<Slug>) -> Self {
        Self {
            slug: slug.into(),
            rest_id: None,
        }
    }
}
