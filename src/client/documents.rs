//! GraphQL documents, one file per resource kind under `graphql/`.
//!
//! Each document holds several operations; requests pick one through
//! `operationName`.

pub(crate) const ORGANIZATION: &str = include_str!("../../graphql/organization.graphql");
pub(crate) const PIPELINE: &str = include_str!("../../graphql/pipeline.graphql");
pub(crate) const PIPELINE_SCHEDULE: &str = include_str!("../../graphql/schedule.graphql");
pub(crate) const TEAM: &str = include_str!("../../graphql/team.graphql");
pub(crate) const TEAM_MEMBER: &str = include_str!("../../graphql/team_member.graphql");
pub(crate) const TEAM_PIPELINE: &str = include_str!("../../graphql/team_pipeline.graphql");
pub(crate) const USER: &str = include_str!("../../graphql/user.graphql");

#[cfg(test)]
mod tests {
    use super::*;

    fn declares(document: &str, operation: &str) -> bool {
        document.lines().any(|line| {
            ["query ", "mutation "].iter().any(|kind| {
                line.strip_prefix(kind)
                    .and_then(|rest| rest.strip_prefix(operation))
                    .is_some_and(|rest| rest.starts_with('(') || rest.starts_with(" {"))
            })
        })
    }

    #[test]
    fn test_documents_declare_their_operations() {
        let expected: [(&str, &[&str]); 7] = [
            (ORGANIZATION, &["OrganizationId"]),
            (PIPELINE, &["PipelineId"]),
            (
                PIPELINE_SCHEDULE,
                &[
                    "PipelineSchedules",
                    "PipelineSchedule",
                    "PipelineScheduleCreate",
                    "PipelineScheduleUpdate",
                    "PipelineScheduleDelete",
                ],
            ),
            (
                TEAM,
                &["Team", "TeamBySlug", "TeamCreate", "TeamUpdate", "TeamDelete"],
            ),
            (
                TEAM_MEMBER,
                &["TeamMember", "TeamMemberCreate", "TeamMemberDelete"],
            ),
            (
                TEAM_PIPELINE,
                &[
                    "TeamPipelines",
                    "TeamPipeline",
                    "TeamPipelineCreate",
                    "TeamPipelineUpdate",
                    "TeamPipelineDelete",
                ],
            ),
            (USER, &["UserByEmail"]),
        ];

        for (document, operations) in expected {
            for operation in operations {
                assert!(declares(document, operation), "{operation} is not declared");
            }
        }
    }

    #[test]
    fn test_operation_names_are_exact() {
        assert!(declares(TEAM, "TeamBySlug"));
        assert!(!declares(TEAM, "TeamBy"));
    }
}
