//! Customer-support desk backed by in-memory mock tools.
//!
//! Talks to a local Ollama by default:
//!
//! ```text
//! cargo run --example support_desk -- "Is my order 12345 delivered, and do you have the jeans in blue?"
//! REWOO_MODEL=qwen2.5 cargo run --example support_desk
//! ```

use anyhow::Result;
use rewoo::llm::{OllamaModel, ReliableModel};
use rewoo::prompt::PromptTemplates;
use rewoo::tools::BoundArgs;
use rewoo::{Engine, EngineOptions, FnTool, Task, ToolRegistry};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Answers in the voice of a support agent instead of the default terse reply.
const SUPPORT_SOLVER: &str = "You are a friendly customer-support agent. Using only the \
plan and evidence below, answer the customer in two or three sentences. If a lookup \
failed, apologize and say what you could not find.

{{ transcript }}
Customer question: {{ task }}
Reply:";

fn order_status(args: BoundArgs) -> Result<String> {
    match args["order_id"].trim_start_matches('#') {
        "12345" => Ok("Order #12345: Delivered on 2025-11-08. Items: Slim Fit Jeans \
                       (dark wash, 32x32), Classic Cotton T-Shirt (navy, M)."
            .to_string()),
        "67890" => Ok("Order #67890: In transit, estimated delivery 2025-11-20.".to_string()),
        other => anyhow::bail!("order {other} not found"),
    }
}

fn check_inventory(args: BoundArgs) -> Result<String> {
    let product = args["product_name"].to_lowercase();
    let color = args["color"].to_lowercase();
    let size = &args["size"];
    if !product.contains("jeans") {
        return Ok(format!("{} is not stocked.", args["product_name"]));
    }
    let stock = match color.as_str() {
        "blue" | "" => 14,
        "black" => 3,
        _ => 0,
    };
    let size_note = if size.is_empty() {
        String::new()
    } else {
        format!(" in size {size}")
    };
    Ok(format!(
        "{} ({}){size_note}: {stock} units in stock.",
        args["product_name"],
        if color.is_empty() { "any color" } else { color.as_str() }
    ))
}

fn search_faq(args: BoundArgs) -> Result<String> {
    let query = args["query"].to_lowercase();
    let answer = if query.contains("return") {
        "Items can be returned within 30 days of delivery if unworn, with tags attached."
    } else if query.contains("shipping") {
        "Standard shipping takes 5-7 business days; expedited takes 2."
    } else {
        "No FAQ entry matched."
    };
    Ok(answer.to_string())
}

fn registry() -> ToolRegistry {
    ToolRegistry::new()
        .with(FnTool::new(
            "OrderStatus",
            "Check the status and items of an order by order ID.",
            &["order_id"],
            order_status,
        ))
        .with(FnTool::new(
            "CheckInventory",
            "Check product availability (color and size optional).",
            &["product_name", "color", "size"],
            check_inventory,
        ))
        .with(FnTool::new(
            "SearchFAQ",
            "Search the FAQ knowledge base for policies.",
            &["query"],
            search_faq,
        ))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let task = std::env::args().nth(1).unwrap_or_else(|| {
        "My order 12345 arrived but the jeans don't fit. Can I return them, \
         and do you have the same jeans in blue, size 34?"
            .to_string()
    });
    let model_name = std::env::var("REWOO_MODEL").unwrap_or_else(|_| "llama3.1".to_string());
    let base_url = std::env::var("REWOO_OLLAMA_URL").ok();

    let model = Arc::new(ReliableModel::new(
        OllamaModel::new(base_url.as_deref(), &model_name, 0.0),
        2,
        500,
    ));
    let engine = Engine::new(
        model,
        Arc::new(registry()),
        EngineOptions {
            max_steps: 10,
            run_timeout: Some(Duration::from_secs(180)),
            ..EngineOptions::default()
        },
    )
    .with_templates(PromptTemplates::new().with_solver(SUPPORT_SOLVER));

    let result = engine.run(&Task::new(task)).await?;

    println!("Plan:");
    print!("{}", rewoo::cli::render_plan(&result.plan));
    println!("\nEvidence:");
    for (variable, value) in result.evidence.iter() {
        println!("  {variable} = {value}");
    }
    println!("\nAnswer:\n{}", result.answer);
    Ok(())
}
