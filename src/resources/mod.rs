//! Resource lifecycle adapters for a declarative engine.
//!
//! Each adapter maps an engine-facing state record onto client calls. The
//! engine decides *when* to create, read, update, delete or import; the
//! adapters only decide *how*. Every operation awaits its calls one after
//! another and leaves retries to the caller.

mod pipeline;
mod schedule;
mod team;
mod team_member;
mod team_pipeline;
mod user;


use async_trait::async_trait;

use crate::error::Result;

pub use pipeline::{PipelineResource, PipelineState};
pub use schedule::{PipelineScheduleResource, PipelineScheduleState};
pub use team::{TeamResource, TeamState};
pub use team_member::{TeamMemberResource, TeamMemberState};
pub use team_pipeline::{TeamPipelineResource, TeamPipelineState};
pub use user::UserDataSource;

/// Type names of the managed resources, in dependency order.
pub const RESOURCE_TYPES: [&str; 5] = [
    PipelineResource::TYPE_NAME,
    PipelineScheduleResource::TYPE_NAME,
    TeamResource::TYPE_NAME,
    TeamPipelineResource::TYPE_NAME,
    TeamMemberResource::TYPE_NAME,
];

/// Type names of the read-only data sources.
pub const DATA_SOURCE_TYPES: [&str; 1] = [UserDataSource::TYPE_NAME];

/// Create, read, update, delete and import for one resource kind.
///
/// `create` attaches the server identifier to `state` and then reads the
/// resource back. `read` overwrites every field of `state`. `update` resets
/// `state` from what the server returns. `delete` leaves `state` as it was.
/// Not-found errors pass through unchanged; see
/// [`crate::error::BuildkiteError::is_not_found`].
#[async_trait]
pub trait Lifecycle: Send + Sync {
    type State: Send + Sync;

    fn type_name(&self) -> &'static str;

    async fn create(&self, state: &mut Self::State) -> Result<()>;

    async fn read(&self, state: &mut Self::State) -> Result<()>;

    async fn update(&self, state: &mut Self::State) -> Result<()>;

    async fn delete(&self, state: &Self::State) -> Result<()>;

    /// Build full state from a human-facing key.
    async fn import(&self, key: &str) -> Result<Self::State>;
}
