use super::engine_harness::{RecordingTool, ScriptedModel, engine, support_registry};
use rewoo::engine::{EvidenceStore, Step, Worker};
use rewoo::prompt::PromptTemplates;
use rewoo::{Task, ToolRegistry};
use std::sync::Arc;

#[tokio::test]
async fn evidence_flows_into_later_steps() {
    let lookup = RecordingTool::new("Lookup", &["order_id"], |_| Ok("Blue Jeans".into()));
    let check = RecordingTool::new("Check", &["item", "color"], |args| {
        Ok(format!("{} available in {}", args["item"], args["color"]))
    });
    let lookup_calls = lookup.calls();
    let check_calls = check.calls();
    let registry = ToolRegistry::new().with(lookup).with(check);

    let model = ScriptedModel::new(&[
        "Plan: Find the ordered item. #E1 = Lookup[12345]\n\
         Plan: Check the blue variant. #E2 = Check[item from #E1, blue]",
        "Yes, the Blue Jeans come in blue.",
    ]);
    let result = engine(model.clone(), registry)
        .run(&Task::new("Do you have my item in blue?"))
        .await
        .unwrap();

    assert_eq!(lookup_calls.lock().unwrap()[0]["order_id"], "12345");
    let check_args = check_calls.lock().unwrap()[0].clone();
    assert_eq!(check_args["item"], "item from Blue Jeans");
    assert_eq!(check_args["color"], "blue");

    assert_eq!(result.evidence.get("#E1"), Some("Blue Jeans"));
    assert_eq!(
        result.evidence.get("#E2"),
        Some("item from Blue Jeans available in blue")
    );
    assert_eq!(result.answer, "Yes, the Blue Jeans come in blue.");

    let solver_prompt = &model.prompts()[1];
    assert!(solver_prompt.contains("#E2 = Check[item from Blue Jeans, blue]"));
    assert!(!solver_prompt.contains("[item from #E1"));
}

#[tokio::test]
async fn worker_resolves_full_argument_string() {
    let worker = Worker::new(
        Arc::new(support_registry()),
        ScriptedModel::new(&[]),
        "LLM",
    );
    let mut evidence = EvidenceStore::new();
    evidence.record("#E1", "Blue Jeans");

    let step = Step {
        description: "Check the blue variant.".into(),
        variable: "#E2".into(),
        index: 2,
        tool: "CheckInventory".into(),
        raw_params: "item from #E1, blue".into(),
    };
    let output = worker.execute(&step, &evidence).await.unwrap();

    assert_eq!(output.resolved_params, "item from Blue Jeans, blue");
    assert_eq!(output.value, "item from item from Blue Jeans, blue");
}

#[tokio::test]
async fn every_step_runs_exactly_once_before_solving() {
    let tool = RecordingTool::new("Count", &["n"], |args| Ok(format!("n={}", args["n"])));
    let calls = tool.calls();
    let plan = super::engine_harness::numbered_plan(7, "Count");
    let model = ScriptedModel::new(&[plan.as_str(), "done"]);

    let result = engine(model.clone(), ToolRegistry::new().with(tool))
        .run(&Task::new("count to seven"))
        .await
        .unwrap();

    assert_eq!(result.steps_executed, 7);
    assert_eq!(result.plan.len(), 7);
    assert_eq!(result.evidence.len(), 7);
    let seen: Vec<String> = calls
        .lock()
        .unwrap()
        .iter()
        .map(|args| args["n"].clone())
        .collect();
    assert_eq!(seen, vec!["1", "2", "3", "4", "5", "6", "7"]);
    assert_eq!(model.calls(), 2);
}

#[tokio::test]
async fn reasoning_steps_call_the_model_with_resolved_text() {
    let model = ScriptedModel::new(&[
        "Plan: Get the status. #E1 = OrderStatus[777]\n\
         Plan: Decide on returns. #E2 = LLM[Can a Delivered order be returned? Status: #E1]",
        "Yes, within 30 days.",
        "Your order was delivered and can be returned within 30 days.",
    ]);
    let result = engine(model.clone(), support_registry())
        .run(&Task::new("Can I return order 777?"))
        .await
        .unwrap();

    let prompts = model.prompts();
    assert_eq!(prompts.len(), 3);
    assert_eq!(
        prompts[1],
        "Can a Delivered order be returned? Status: Delivered"
    );
    assert_eq!(result.evidence.get("#E2"), Some("Yes, within 30 days."));
    assert!(prompts[2].contains("#E2 = Yes, within 30 days."));
}

#[tokio::test]
async fn planner_prompt_carries_task_and_catalog() {
    let model = ScriptedModel::new(&["Plan: look #E1 = OrderStatus[12345]", "ok"]);
    engine(model.clone(), support_registry())
        .run(&Task::new("Where is order 12345?"))
        .await
        .unwrap();

    let planner_prompt = &model.prompts()[0];
    assert!(planner_prompt.contains("(1) CheckInventory[product_name, color]"));
    assert!(planner_prompt.contains("(2) OrderStatus[order_id]"));
    assert!(planner_prompt.contains("(3) LLM[input]"));
    assert!(planner_prompt.contains("Task: Where is order 12345?"));
}

#[tokio::test]
async fn noise_around_plan_lines_is_ignored() {
    let model = ScriptedModel::new(&[
        "Sure! Here is my plan:\n\n\
         Plan: Look up the order. #E1 = OrderStatus[12345]\n\
         This line is commentary.\n\
         Plan: Check the variant. #E2 = CheckInventory[#E1, blue]\n\
         Let me know if you need anything else.",
        "answer",
    ]);
    let result = engine(model, support_registry())
        .run(&Task::new("t"))
        .await
        .unwrap();

    assert_eq!(result.steps_executed, 2);
    assert_eq!(result.evidence.get("#E2"), Some("item from Blue Jeans, blue"));
}

#[tokio::test]
async fn replayed_plan_skips_the_planner() {
    let model = ScriptedModel::new(&["Blue Jeans are in stock."]);
    let result = engine(model.clone(), support_registry())
        .execute_plan(
            &Task::new("Is my item in stock in blue?"),
            "Plan: a #E1 = OrderStatus[12345]\nPlan: b #E2 = CheckInventory[#E1, blue]",
        )
        .await
        .unwrap();

    assert_eq!(model.calls(), 1);
    assert_eq!(result.steps_executed, 2);
    assert_eq!(result.answer, "Blue Jeans are in stock.");
}

#[tokio::test]
async fn run_result_serializes_evidence_in_order() {
    let model = ScriptedModel::new(&[
        "Plan: a #E1 = OrderStatus[12345]\nPlan: b #E2 = CheckInventory[#E1, red]",
        "done",
    ]);
    let result = engine(model, support_registry())
        .run(&Task::new("t"))
        .await
        .unwrap();

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["task"], "t");
    assert_eq!(json["steps_executed"], 2);
    assert_eq!(json["evidence"]["#E1"], "Blue Jeans");
    let keys: Vec<&String> = json["evidence"].as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["#E1", "#E2"]);
}

#[tokio::test]
async fn custom_templates_shape_both_prompts() {
    let model = ScriptedModel::new(&["Plan: a #E1 = OrderStatus[12345]", "Blue Jeans"]);
    let templates = PromptTemplates::new()
        .with_planner("Tools:\n{{ tools }}\nQ: {{ task }}")
        .with_solver("Q: {{ task }}\n{{ transcript }}A:");

    let result = engine(model.clone(), support_registry())
        .with_templates(templates)
        .run(&Task::new("What did I order?"))
        .await
        .unwrap();
    assert_eq!(result.answer, "Blue Jeans");

    let prompts = model.prompts();
    assert!(prompts[0].starts_with("Tools:\n(1) CheckInventory[product_name, color]"));
    assert!(prompts[0].ends_with("Q: What did I order?"));
    assert!(prompts[1].starts_with("Q: What did I order?\nPlan: a\n#E1 = OrderStatus[12345]"));
    assert!(prompts[1].ends_with("#E1 = Blue Jeans\nA:"));
}
