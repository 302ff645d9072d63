use super::engine_harness::{RecordingTool, ScriptedModel, engine, support_registry};
use rewoo::error::{Stage, TOOL_ERROR_MARKER};
use rewoo::{EngineError, Task};

#[tokio::test]
async fn unknown_tool_aborts_before_later_steps_and_solve() {
    let later = RecordingTool::new("Later", &["x"], |_| Ok("ran".into()));
    let later_calls = later.calls();
    let model = ScriptedModel::new(&[
        "Plan: a #E1 = OrderStatus[12345]\n\
         Plan: b #E2 = Teleport[#E1]\n\
         Plan: c #E3 = Later[#E2]",
        "never used",
    ]);

    let err = engine(model.clone(), support_registry().with(later))
        .run(&Task::new("t"))
        .await
        .unwrap_err();

    match err {
        EngineError::UnknownTool { variable, tool } => {
            assert_eq!(variable, "#E2");
            assert_eq!(tool, "Teleport");
        }
        other => panic!("expected unknown tool, got {other:?}"),
    }
    assert!(later_calls.lock().unwrap().is_empty());
    assert_eq!(model.calls(), 1, "solver must not be called");
}

#[tokio::test]
async fn tool_errors_are_captured_and_reach_the_solver() {
    let model = ScriptedModel::new(&[
        "Plan: Look up the order. #E1 = OrderStatus[99999]\n\
         Plan: Look up another. #E2 = OrderStatus[777]",
        "I could not find order 99999, but order 777 was delivered.",
    ]);

    let result = engine(model.clone(), support_registry())
        .run(&Task::new("Where are my orders?"))
        .await
        .unwrap();

    let failed = result.evidence.get("#E1").unwrap();
    assert!(failed.starts_with(TOOL_ERROR_MARKER));
    assert!(failed.contains("OrderStatus"));
    assert!(failed.contains("order 99999 not found"));
    assert_eq!(result.evidence.get("#E2"), Some("Delivered"));
    assert_eq!(result.steps_executed, 2);

    let solver_prompt = &model.prompts()[1];
    assert!(solver_prompt.contains("order 99999 not found"));
}

#[tokio::test]
async fn failed_evidence_is_substituted_like_any_other() {
    let model = ScriptedModel::new(&[
        "Plan: a #E1 = OrderStatus[404]\nPlan: b #E2 = CheckInventory[#E1, blue]",
        "done",
    ]);
    let result = engine(model, support_registry())
        .run(&Task::new("t"))
        .await
        .unwrap();

    let second = result.evidence.get("#E2").unwrap();
    assert!(second.starts_with("item from [tool error] OrderStatus failed"));
}

#[tokio::test]
async fn planner_failure_surfaces_as_language_model_error() {
    let model = ScriptedModel::with_failures(&[None]);
    let err = engine(model, support_registry())
        .run(&Task::new("t"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::LanguageModel {
            stage: Stage::Plan,
            ..
        }
    ));
    assert!(err.to_string().contains("model unavailable"));
}

#[tokio::test]
async fn reasoning_failure_is_fatal() {
    let model = ScriptedModel::with_failures(&[
        Some("Plan: a #E1 = OrderStatus[777]\nPlan: b #E2 = LLM[Summarize #E1]"),
        None,
        Some("never used"),
    ]);
    let err = engine(model.clone(), support_registry())
        .run(&Task::new("t"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::LanguageModel {
            stage: Stage::Execute,
            ..
        }
    ));
    assert_eq!(model.calls(), 2);
}

#[tokio::test]
async fn solver_failure_surfaces_as_language_model_error() {
    let model = ScriptedModel::with_failures(&[Some("Plan: a #E1 = OrderStatus[777]"), None]);
    let err = engine(model, support_registry())
        .run(&Task::new("t"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        EngineError::LanguageModel {
            stage: Stage::Solve,
            ..
        }
    ));
    assert!(err.partial_evidence().is_none());
}
