use mockito::{Matcher, Mock, ServerGuard};
use serde_json::{json, Value};

use super::BuildkiteClient;
use crate::auth::Token;
use crate::error::BuildkiteError;
use crate::identity::{NodeId, RestId, Slug};
use crate::types::{
    AccessLevel, MemberRole, Pipeline, PipelineSchedule, Privacy, Team, TeamMember, TeamPipeline,
};

pub(crate) const ORG_ID: &str = "T3JnYW5pemF0aW9uLS0tYWNtZQ==";
pub(crate) const PIPELINE_ID: &str = "UGlwZWxpbmUtLS13ZWI=";

pub(crate) fn graphql_mock(server: &mut ServerGuard, operation: &str, data: Value) -> Mock {
    server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({ "operationName": operation })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "data": data }).to_string())
}

pub(crate) async fn connect(server: &mut ServerGuard) -> BuildkiteClient {
    let _ = env_logger::builder().is_test(true).try_init();
    server
        .mock("GET", "/v2/access-token")
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_body(r#"{"uuid":"b1d6","scopes":["read_pipelines","write_pipelines"]}"#)
        .create_async()
        .await;
    graphql_mock(server, "OrganizationId", json!({ "organization": { "id": ORG_ID } }))
        .create_async()
        .await;

    BuildkiteClient::new(
        "acme",
        Token::from("test-token"),
        &format!("{}/v2", server.url()),
        &format!("{}/graphql", server.url()),
    )
    .await
    .unwrap()
}

pub(crate) fn pipeline_body(name: &str, description: Option<&str>) -> Value {
    json!({
        "id": "0184-abcd",
        "graphql_id": PIPELINE_ID,
        "slug": "web",
        "name": name,
        "repository": "git@github.com:acme/web.git",
        "configuration": "steps:\n  - command: make test\n",
        "default_branch": "main",
        "description": description,
        "skip_queued_branch_builds": false,
        "provider": { "id": "github", "settings": { "build_tags": false } }
    })
}

#[tokio::test]
async fn test_connect_resolves_organization() {
    let mut server = mockito::Server::new_async().await;
    let client = connect(&mut server).await;

    assert_eq!(client.organization().slug(), &Slug::from("acme"));
    assert_eq!(client.organization().id(), &NodeId::from(ORG_ID));
}

#[tokio::test]
async fn test_connect_fails_fast_on_rejected_token() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v2/access-token")
        .with_status(401)
        .create_async()
        .await;
    let org = graphql_mock(&mut server, "OrganizationId", json!({ "organization": { "id": ORG_ID } }))
        .expect(0)
        .create_async()
        .await;

    let err = BuildkiteClient::new(
        "acme",
        Token::from("revoked"),
        &format!("{}/v2", server.url()),
        &format!("{}/graphql", server.url()),
    )
    .await
    .err()
    .unwrap();

    assert!(matches!(err, BuildkiteError::Authentication(_)));
    org.assert_async().await;
}

#[tokio::test]
async fn test_connect_unknown_organization() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v2/access-token")
        .with_status(200)
        .create_async()
        .await;
    graphql_mock(&mut server, "OrganizationId", json!({ "organization": null }))
        .create_async()
        .await;

    let err = BuildkiteClient::new(
        "nope",
        Token::from("test-token"),
        &format!("{}/v2", server.url()),
        &format!("{}/graphql", server.url()),
    )
    .await
    .err()
    .unwrap();

    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_pipeline_create_then_read() {
    let mut server = mockito::Server::new_async().await;
    let client = connect(&mut server).await;

    let create = server
        .mock("POST", "/v2/organizations/acme/pipelines")
        .match_body(Matcher::PartialJson(json!({
            "name": "web",
            "provider_settings": { "build_tags": false }
        })))
        .with_status(201)
        .with_body(pipeline_body("web", None).to_string())
        .create_async()
        .await;
    let read = server
        .mock("GET", "/v2/organizations/acme/pipelines/web")
        .with_status(200)
        .with_body(pipeline_body("web", None).to_string())
        .create_async()
        .await;

    let mut pipeline = Pipeline {
        name: "web".to_string(),
        repository: "git@github.com:acme/web.git".to_string(),
        configuration: "steps:\n  - command: make test\n".to_string(),
        provider: Some(crate::codec::ProviderSettings::GitHub(
            crate::codec::GitHubSettings {
                build_tags: Some(false),
                ..Default::default()
            },
        )),
        ..Pipeline::default()
    };
    client.create_pipeline(&mut pipeline).await.unwrap();
    assert_eq!(pipeline.identity.slug, Slug::from("web"));
    assert_eq!(pipeline.identity.rest_id, Some(RestId::new("0184-abcd")));

    let fetched = client.read_pipeline(&pipeline.identity.slug).await.unwrap();
    assert_eq!(fetched.identity, pipeline.identity);
    assert_eq!(fetched.name, pipeline.name);
    assert_eq!(fetched.repository, pipeline.repository);
    assert_eq!(fetched.configuration, pipeline.configuration);
    assert_eq!(fetched.provider, pipeline.provider);

    create.assert_async().await;
    read.assert_async().await;
}

#[tokio::test]
async fn test_pipeline_create_without_id_leaves_value_untouched() {
    let mut server = mockito::Server::new_async().await;
    let client = connect(&mut server).await;

    server
        .mock("POST", "/v2/organizations/acme/pipelines")
        .with_status(201)
        .with_body(r#"{"id":"","slug":"web","name":"web"}"#)
        .create_async()
        .await;

    let mut pipeline = Pipeline {
        name: "web".to_string(),
        ..Pipeline::default()
    };
    let before = pipeline.clone();
    let err = client.create_pipeline(&mut pipeline).await.unwrap_err();

    assert!(matches!(err, BuildkiteError::Contract(_)));
    assert!(err.to_string().contains("web"));
    assert_eq!(pipeline, before);
}

#[tokio::test]
async fn test_pipeline_update_then_read() {
    let mut server = mockito::Server::new_async().await;
    let client = connect(&mut server).await;

    let update = server
        .mock("PATCH", "/v2/organizations/acme/pipelines/web")
        .match_body(Matcher::PartialJson(json!({ "description": "Front end" })))
        .with_status(200)
        .with_body(pipeline_body("web", Some("Front end")).to_string())
        .create_async()
        .await;
    server
        .mock("GET", "/v2/organizations/acme/pipelines/web")
        .with_status(200)
        .with_body(pipeline_body("web", Some("Front end")).to_string())
        .create_async()
        .await;

    let mut pipeline = client_side_pipeline();
    pipeline.description = Some("Front end".to_string());
    client.update_pipeline(&mut pipeline).await.unwrap();

    // Replaced by the server's representation.
    assert_eq!(pipeline.default_branch.as_deref(), Some("main"));
    assert_eq!(pipeline.skip_queued_branch_builds, Some(false));

    let fetched = client.read_pipeline(&Slug::from("web")).await.unwrap();
    assert_eq!(fetched, pipeline);
    update.assert_async().await;
}

fn client_side_pipeline() -> Pipeline {
    Pipeline {
        identity: crate::identity::PipelineIdentity::from_slug("web"),
        name: "web".to_string(),
        repository: "git@github.com:acme/web.git".to_string(),
        configuration: "steps:\n  - command: make test\n".to_string(),
        ..Pipeline::default()
    }
}

#[tokio::test]
async fn test_pipeline_read_missing_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    let client = connect(&mut server).await;

    server
        .mock("GET", "/v2/organizations/acme/pipelines/gone")
        .with_status(404)
        .with_body(r#"{"message":"No pipeline found"}"#)
        .create_async()
        .await;

    let err = client.read_pipeline(&Slug::from("gone")).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_pipeline_delete() {
    let mut server = mockito::Server::new_async().await;
    let client = connect(&mut server).await;

    let delete = server
        .mock("DELETE", "/v2/organizations/acme/pipelines/web")
        .with_status(204)
        .create_async()
        .await;

    client.delete_pipeline(&client_side_pipeline()).await.unwrap();
    delete.assert_async().await;
}

#[tokio::test]
async fn test_pipeline_scope_resolves_once() {
    let mut server = mockito::Server::new_async().await;
    let client = connect(&mut server).await;

    let lookup = graphql_mock(&mut server, "PipelineId", json!({ "pipeline": { "id": PIPELINE_ID } }))
        .match_body(Matcher::PartialJson(json!({
            "operationName": "PipelineId",
            "variables": { "slug": "acme/web" }
        })))
        .expect(1)
        .create_async()
        .await;

    let mut scope = client.pipeline_scope(Slug::from("web"));
    assert_eq!(scope.node_id().await.unwrap(), NodeId::from(PIPELINE_ID));
    assert_eq!(scope.node_id().await.unwrap(), NodeId::from(PIPELINE_ID));
    lookup.assert_async().await;
}

#[tokio::test]
async fn test_pipeline_scope_unknown_slug() {
    let mut server = mockito::Server::new_async().await;
    let client = connect(&mut server).await;
    graphql_mock(&mut server, "PipelineId", json!({ "pipeline": null }))
        .create_async()
        .await;

    let mut scope = client.pipeline_scope(Slug::from("ghost"));
    assert!(scope.node_id().await.unwrap_err().is_not_found());
}

fn schedule_node(id: &str, label: &str, env: &str) -> Value {
    json!({
        "__typename": "PipelineSchedule",
        "id": id,
        "cronline": "0 0 * * *",
        "env": env,
        "enabled": true,
        "message": null,
        "branch": "main",
        "commit": "HEAD",
        "label": label,
        "pipeline": { "id": PIPELINE_ID }
    })
}

#[tokio::test]
async fn test_schedule_create_then_read() {
    let mut server = mockito::Server::new_async().await;
    let client = connect(&mut server).await;

    let create = graphql_mock(
        &mut server,
        "PipelineScheduleCreate",
        json!({ "pipelineScheduleCreate": { "pipelineScheduleEdge": { "node": { "id": "U2NoZWR1bGUtMQ==" } } } }),
    )
    .match_body(Matcher::PartialJson(json!({
        "operationName": "PipelineScheduleCreate",
        "variables": { "input": { "pipelineID": PIPELINE_ID, "env": "FOO=bar\nBAZ=qux" } }
    })))
    .create_async()
    .await;
    graphql_mock(
        &mut server,
        "PipelineSchedule",
        json!({ "node": schedule_node("U2NoZWR1bGUtMQ==", "nightly", "FOO=bar\nBAZ=qux") }),
    )
    .create_async()
    .await;

    let mut schedule = PipelineSchedule {
        pipeline_id: NodeId::from(PIPELINE_ID),
        cronline: "0 0 * * *".to_string(),
        env: vec!["FOO=bar".to_string(), "BAZ=qux".to_string()],
        enabled: true,
        branch: "main".to_string(),
        commit: "HEAD".to_string(),
        label: "nightly".to_string(),
        ..PipelineSchedule::default()
    };
    client.create_pipeline_schedule(&mut schedule).await.unwrap();
    assert_eq!(schedule.id, NodeId::from("U2NoZWR1bGUtMQ=="));

    let fetched = client.read_pipeline_schedule(&schedule.id).await.unwrap();
    assert_eq!(fetched, schedule);
    create.assert_async().await;
}

#[tokio::test]
async fn test_schedule_create_with_empty_id_is_contract_violation() {
    let mut server = mockito::Server::new_async().await;
    let client = connect(&mut server).await;
    graphql_mock(
        &mut server,
        "PipelineScheduleCreate",
        json!({ "pipelineScheduleCreate": { "pipelineScheduleEdge": { "node": { "id": "" } } } }),
    )
    .create_async()
    .await;

    let mut schedule = PipelineSchedule {
        label: "nightly".to_string(),
        ..PipelineSchedule::default()
    };
    let err = client.create_pipeline_schedule(&mut schedule).await.unwrap_err();

    assert!(matches!(err, BuildkiteError::Contract(_)));
    assert!(schedule.id.is_empty());
}

#[tokio::test]
async fn test_schedules_listed_in_order() {
    let mut server = mockito::Server::new_async().await;
    let client = connect(&mut server).await;
    graphql_mock(
        &mut server,
        "PipelineSchedules",
        json!({
            "node": {
                "__typename": "Pipeline",
                "schedules": { "edges": [
                    { "node": schedule_node("c2-2", "weekly", "") },
                    { "node": schedule_node("c2-1", "nightly", "A=1") }
                ] }
            }
        }),
    )
    .create_async()
    .await;

    let schedules = client
        .read_pipeline_schedules(&NodeId::from(PIPELINE_ID))
        .await
        .unwrap();

    let labels: Vec<_> = schedules.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, ["weekly", "nightly"]);
    assert!(schedules[0].env.is_empty());
    assert_eq!(schedules[1].env, ["A=1"]);
    // Null message comes back as the empty default.
    assert_eq!(schedules[1].message, "");
}

fn team_node(name: &str, privacy: &str) -> Value {
    json!({
        "__typename": "Team",
        "id": "VGVhbS0tLW9wcw==",
        "name": name,
        "privacy": privacy,
        "isDefaultTeam": false,
        "defaultMemberRole": "MEMBER"
    })
}

#[tokio::test]
async fn test_team_lifecycle() {
    let mut server = mockito::Server::new_async().await;
    let client = connect(&mut server).await;

    let create = graphql_mock(
        &mut server,
        "TeamCreate",
        json!({ "teamCreate": { "teamEdge": { "node": team_node("ops", "SECRET") } } }),
    )
    .match_body(Matcher::PartialJson(json!({
        "operationName": "TeamCreate",
        "variables": { "input": { "organizationID": ORG_ID, "name": "ops", "privacy": "SECRET" } }
    })))
    .create_async()
    .await;
    let read = graphql_mock(&mut server, "Team", json!({ "node": team_node("ops", "SECRET") }))
        .create_async()
        .await;

    let mut team = Team {
        name: "ops".to_string(),
        privacy: Privacy::Secret,
        default_member_role: MemberRole::Member,
        ..Team::default()
    };
    client.create_team(&mut team).await.unwrap();
    assert_eq!(team.id, NodeId::from("VGVhbS0tLW9wcw=="));

    let fetched = client.read_team(&team.id).await.unwrap();
    assert_eq!(fetched, team);
    create.assert_async().await;

    let delete = graphql_mock(
        &mut server,
        "TeamDelete",
        json!({ "teamDelete": { "deletedTeamID": "VGVhbS0tLW9wcw==" } }),
    )
    .create_async()
    .await;
    client.delete_team(&team).await.unwrap();
    delete.assert_async().await;

    read.remove_async().await;
    graphql_mock(&mut server, "Team", json!({ "node": null }))
        .create_async()
        .await;

    let err = client.read_team(&team.id).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_team_update_then_read() {
    let mut server = mockito::Server::new_async().await;
    let client = connect(&mut server).await;

    graphql_mock(
        &mut server,
        "TeamUpdate",
        json!({ "teamUpdate": { "team": team_node("platform", "VISIBLE") } }),
    )
    .create_async()
    .await;
    graphql_mock(&mut server, "Team", json!({ "node": team_node("platform", "VISIBLE") }))
        .create_async()
        .await;

    let mut team = Team {
        id: NodeId::from("VGVhbS0tLW9wcw=="),
        name: "platform".to_string(),
        ..Team::default()
    };
    client.update_team(&mut team).await.unwrap();

    let fetched = client.read_team(&team.id).await.unwrap();
    assert_eq!(fetched, team);
}

#[tokio::test]
async fn test_team_read_by_name() {
    let mut server = mockito::Server::new_async().await;
    let client = connect(&mut server).await;

    let mut node = team_node("ops", "VISIBLE");
    node.as_object_mut().unwrap().remove("__typename");
    graphql_mock(&mut server, "TeamBySlug", json!({ "team": node }))
        .match_body(Matcher::PartialJson(json!({
            "operationName": "TeamBySlug",
            "variables": { "slug": "acme/ops" }
        })))
        .create_async()
        .await;

    let team = client.read_team_by_name("ops").await.unwrap();
    assert_eq!(team.name, "ops");
    assert_eq!(team.privacy, Privacy::Visible);
}

#[tokio::test]
async fn test_node_of_other_type_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    let client = connect(&mut server).await;
    graphql_mock(
        &mut server,
        "Team",
        json!({ "node": { "__typename": "Pipeline" } }),
    )
    .create_async()
    .await;

    let err = client.read_team(&NodeId::from(PIPELINE_ID)).await.unwrap_err();
    assert!(err.is_not_found());
}

fn team_pipeline_node(id: &str, team: &str, level: &str) -> Value {
    json!({
        "id": id,
        "accessLevel": level,
        "team": { "id": team },
        "pipeline": { "id": PIPELINE_ID }
    })
}

#[tokio::test]
async fn test_team_pipelines_match_created_set() {
    let mut server = mockito::Server::new_async().await;
    let client = connect(&mut server).await;

    graphql_mock(
        &mut server,
        "TeamPipelineCreate",
        json!({ "teamPipelineCreate": { "teamPipelineEdge": { "node": { "id": "VFAtMQ==" } } } }),
    )
    .create_async()
    .await;
    graphql_mock(
        &mut server,
        "TeamPipelines",
        json!({
            "node": {
                "__typename": "Pipeline",
                "teams": { "edges": [
                    { "node": team_pipeline_node("VFAtMQ==", "VGVhbS0x", "BUILD_AND_READ") }
                ] }
            }
        }),
    )
    .create_async()
    .await;

    let mut tp = TeamPipeline {
        team_id: NodeId::from("VGVhbS0x"),
        pipeline_id: NodeId::from(PIPELINE_ID),
        access_level: AccessLevel::BuildAndRead,
        ..TeamPipeline::default()
    };
    client.create_team_pipeline(&mut tp).await.unwrap();

    let listed = client
        .read_team_pipelines(&NodeId::from(PIPELINE_ID))
        .await
        .unwrap();
    assert_eq!(listed, vec![tp]);
}

#[tokio::test]
async fn test_team_pipelines_empty() {
    let mut server = mockito::Server::new_async().await;
    let client = connect(&mut server).await;
    graphql_mock(
        &mut server,
        "TeamPipelines",
        json!({ "node": { "__typename": "Pipeline", "teams": { "edges": [] } } }),
    )
    .create_async()
    .await;

    let listed = client
        .read_team_pipelines(&NodeId::from(PIPELINE_ID))
        .await
        .unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn test_team_pipeline_update_and_unforced_delete() {
    let mut server = mockito::Server::new_async().await;
    let client = connect(&mut server).await;

    graphql_mock(
        &mut server,
        "TeamPipelineUpdate",
        json!({ "teamPipelineUpdate": { "teamPipeline": team_pipeline_node("VFAtMQ==", "VGVhbS0x", "READ_ONLY") } }),
    )
    .create_async()
    .await;
    let delete = graphql_mock(
        &mut server,
        "TeamPipelineDelete",
        json!({ "teamPipelineDelete": { "deletedTeamPipelineID": "VFAtMQ==" } }),
    )
    .match_body(Matcher::PartialJson(json!({
        "operationName": "TeamPipelineDelete",
        "variables": { "input": { "id": "VFAtMQ==", "force": false } }
    })))
    .create_async()
    .await;

    let mut tp = TeamPipeline {
        id: NodeId::from("VFAtMQ=="),
        access_level: AccessLevel::ReadOnly,
        ..TeamPipeline::default()
    };
    client.update_team_pipeline(&mut tp).await.unwrap();
    assert_eq!(tp.team_id, NodeId::from("VGVhbS0x"));
    assert_eq!(tp.pipeline_id, NodeId::from(PIPELINE_ID));

    client.delete_team_pipeline(&tp).await.unwrap();
    delete.assert_async().await;
}

#[tokio::test]
async fn test_team_member_create_then_read() {
    let mut server = mockito::Server::new_async().await;
    let client = connect(&mut server).await;

    graphql_mock(
        &mut server,
        "TeamMemberCreate",
        json!({ "teamMemberCreate": { "teamMemberEdge": { "node": { "id": "VE0tMQ==" } } } }),
    )
    .match_body(Matcher::PartialJson(json!({
        "operationName": "TeamMemberCreate",
        "variables": { "input": { "userID": "VXNlci0x", "teamID": "VGVhbS0x" } }
    })))
    .create_async()
    .await;
    graphql_mock(
        &mut server,
        "TeamMember",
        json!({ "node": {
            "__typename": "TeamMember",
            "id": "VE0tMQ==",
            "user": { "id": "VXNlci0x" },
            "team": { "id": "VGVhbS0x" }
        } }),
    )
    .create_async()
    .await;

    let mut member = TeamMember {
        team_id: NodeId::from("VGVhbS0x"),
        user_id: NodeId::from("VXNlci0x"),
        ..TeamMember::default()
    };
    client.create_team_member(&mut member).await.unwrap();

    let fetched = client.read_team_member(&member.id).await.unwrap();
    assert_eq!(fetched, member);
}

fn member_edges(count: usize) -> Value {
    let edges: Vec<Value> = (0..count)
        .map(|i| {
            json!({ "node": { "user": {
                "id": format!("VXNlci0{i}"),
                "name": "Sam",
                "email": "sam@acme.test",
                "uuid": format!("0184-{i}")
            } } })
        })
        .collect();
    json!({ "organization": { "members": { "edges": edges } } })
}

#[tokio::test]
async fn test_get_user_exactly_one() {
    let mut server = mockito::Server::new_async().await;
    let client = connect(&mut server).await;
    graphql_mock(&mut server, "UserByEmail", member_edges(1))
        .match_body(Matcher::PartialJson(json!({
            "operationName": "UserByEmail",
            "variables": { "slug": "acme", "email": "sam@acme.test" }
        })))
        .create_async()
        .await;

    let user = client.get_user("sam@acme.test").await.unwrap();
    assert_eq!(user.id, NodeId::from("VXNlci00"));
    assert_eq!(user.uuid, "0184-0");
}

#[tokio::test]
async fn test_get_user_cardinality() {
    for count in [0, 2] {
        let mut server = mockito::Server::new_async().await;
        let client = connect(&mut server).await;
        graphql_mock(&mut server, "UserByEmail", member_edges(count))
        .create_async()
        .await;

        let err = client.get_user("sam@acme.test").await.unwrap_err();
        match err {
            BuildkiteError::Cardinality {
                expected, found, ..
            } => {
                assert_eq!(expected, 1);
                assert_eq!(found, count);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[tokio::test]
async fn test_graphql_errors_fail_the_operation() {
    let mut server = mockito::Server::new_async().await;
    let client = connect(&mut server).await;

    server
        .mock("POST", "/graphql")
        .match_body(Matcher::PartialJson(json!({ "operationName": "Team" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "data": null,
                "errors": [{ "message": "Not authorized to access Team" }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let err = client.read_team(&NodeId::from("VGVhbS0x")).await.unwrap_err();
    match err {
        BuildkiteError::GraphQL { operation, errors } => {
            assert_eq!(operation, "Team");
            assert!(errors.contains("Not authorized"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_connect_from_config() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v2/access-token")
        .match_header("authorization", "Bearer env-token")
        .with_status(200)
        .create_async()
        .await;
    graphql_mock(&mut server, "OrganizationId", json!({ "organization": { "id": ORG_ID } }))
        .create_async()
        .await;

    let mut config = crate::config::Config::default();
    config.buildkite.rest_base_url = format!("{}/v2", server.url());
    config.buildkite.graphql_base_url = format!("{}/graphql", server.url());
    config.apply_env(|name| match name {
        crate::config::ORG_ENV_VAR => Some("acme".to_string()),
        crate::config::TOKEN_ENV_VAR => Some("env-token".to_string()),
        _ => None,
    });

    let client = BuildkiteClient::connect(&config.buildkite).await.unwrap();
    assert_eq!(client.organization().id(), &NodeId::from(ORG_ID));
}

#[tokio::test]
async fn test_connect_requires_credentials() {
    let config = crate::config::BuildkiteConfig {
        organization_slug: Some("acme".to_string()),
        ..Default::default()
    };

    let err = BuildkiteClient::connect(&config).await.err().unwrap();
    assert!(matches!(err, BuildkiteError::Config(_)));
}
