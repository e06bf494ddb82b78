mod core;
mod documents;
mod graphql;
mod pipeline;
mod rest;
mod schedule;
mod scope;
mod team;
mod team_member;
mod team_pipeline;
mod user;

#[cfg(test)]
pub(crate) mod tests;

pub use self::core::BuildkiteClient;
pub use schedule::SCHEDULES_PAGE_SIZE;
pub use scope::PipelineScope;
pub use team_pipeline::TEAM_PIPELINES_PAGE_SIZE;
