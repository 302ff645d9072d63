use super::engine_harness::{ScriptedModel, engine};
use rewoo::Task;
use rewoo::config::ToolsConfig;
use rewoo::error::TOOL_ERROR_MARKER;
use rewoo::tools::default_registry;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn tools_config(workspace: &TempDir) -> ToolsConfig {
    ToolsConfig {
        workspace_dir: workspace.path().to_path_buf(),
        http_timeout_secs: 5,
    }
}

#[tokio::test]
async fn file_read_output_feeds_the_next_step() {
    let workspace = TempDir::new().unwrap();
    std::fs::create_dir(workspace.path().join("notes")).unwrap();
    std::fs::write(workspace.path().join("notes/pointer.txt"), "notes/order.txt").unwrap();
    std::fs::write(workspace.path().join("notes/order.txt"), "Order 12345: Blue Jeans").unwrap();

    let model = ScriptedModel::new(&["The order contains Blue Jeans."]);
    let result = engine(model.clone(), default_registry(&tools_config(&workspace)))
        .execute_plan(
            &Task::new("What is in order 12345?"),
            "Plan: Find which file holds the order. #E1 = FileRead[notes/pointer.txt]\n\
             Plan: Read that file. #E2 = FileRead[#E1]",
        )
        .await
        .unwrap();

    assert_eq!(result.evidence.get("#E2"), Some("Order 12345: Blue Jeans"));
    assert!(model.prompts()[0].contains("#E2 = FileRead[notes/order.txt]"));
}

#[tokio::test]
async fn sandbox_violations_are_captured_as_evidence() {
    let workspace = TempDir::new().unwrap();
    let model = ScriptedModel::new(&["I cannot read that file."]);

    let result = engine(model, default_registry(&tools_config(&workspace)))
        .execute_plan(&Task::new("t"), "Plan: escape #E1 = FileRead[../../etc/passwd]")
        .await
        .unwrap();

    let evidence = result.evidence.get("#E1").unwrap();
    assert!(evidence.starts_with(TOOL_ERROR_MARKER));
    assert!(evidence.contains("inside the workspace"));
    assert_eq!(result.answer, "I cannot read that file.");
}

#[tokio::test]
async fn http_get_fetches_and_reports_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/orders/12345"))
        .respond_with(ResponseTemplate::new(200).set_body_string("shipped"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/orders/404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("no such order"))
        .mount(&server)
        .await;

    let workspace = TempDir::new().unwrap();
    let plan = format!(
        "Plan: a #E1 = HttpGet[{0}/orders/12345]\nPlan: b #E2 = HttpGet[{0}/orders/404]",
        server.uri()
    );
    let model = ScriptedModel::new(&["One order shipped, the other was not found."]);
    let result = engine(model, default_registry(&tools_config(&workspace)))
        .execute_plan(&Task::new("t"), &plan)
        .await
        .unwrap();

    let first = result.evidence.get("#E1").unwrap();
    assert!(first.starts_with("HTTP 200"));
    assert!(first.ends_with("shipped"));

    let second = result.evidence.get("#E2").unwrap();
    assert!(second.starts_with(TOOL_ERROR_MARKER));
    assert!(second.contains("404"));
}
