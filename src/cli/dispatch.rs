use super::{Cli, Commands};
use crate::config::Config;
use crate::engine::{Engine, EngineOptions, Plan, PlanParser, Task, tool_catalog};
use crate::llm::create_model;
use crate::tools::default_registry;
use anyhow::{Context, Result, bail};
use std::fmt::Write;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Run {
            task,
            plan_file,
            json,
            max_steps,
            timeout,
        } => {
            let options = engine_options(&config, max_steps, timeout)?;
            run_task(&config, options, &Task::new(task), plan_file.as_deref(), json).await
        }
        Commands::Parse {
            file,
            max_steps,
            json,
        } => {
            let options = engine_options(&config, max_steps, None)?;
            parse_file(&file, options.max_steps, json)
        }
        Commands::Tools => {
            let registry = default_registry(&config.tools);
            println!(
                "{}",
                tool_catalog(&registry, &config.engine.reasoning_tool_name)
            );
            Ok(())
        }
    }
}

fn engine_options(
    config: &Config,
    max_steps: Option<usize>,
    timeout_secs: Option<u64>,
) -> Result<EngineOptions> {
    let mut options = config.engine_options();
    if let Some(max_steps) = max_steps {
        if max_steps == 0 {
            bail!("--max-steps must be at least 1");
        }
        options.max_steps = max_steps;
    }
    if let Some(secs) = timeout_secs {
        if secs == 0 {
            bail!("--timeout must be at least 1 second");
        }
        options.run_timeout = Some(Duration::from_secs(secs));
    }
    Ok(options)
}

async fn run_task(
    config: &Config,
    options: EngineOptions,
    task: &Task,
    plan_file: Option<&Path>,
    json: bool,
) -> Result<()> {
    let registry = Arc::new(default_registry(&config.tools));
    let planner = create_model(&config.planner, &config.providers, &config.reliability);
    let solver = create_model(&config.solver, &config.providers, &config.reliability);
    let engine = Engine::new(planner, registry, options).with_solver_model(solver);

    tracing::info!(
        planner = %config.planner.model,
        solver = %config.solver.model,
        tools = engine.registry().len(),
        "Engine ready"
    );

    let outcome = match plan_file {
        Some(path) => {
            let plan_text = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read plan file {}", path.display()))?;
            engine.execute_plan(task, &plan_text).await
        }
        None => engine.run(task).await,
    };

    let result = match outcome {
        Ok(result) => result,
        Err(err) => {
            if let Some(evidence) = err.partial_evidence()
                && !evidence.is_empty()
            {
                eprintln!("Evidence gathered before the run stopped:");
                for (variable, value) in evidence.iter() {
                    eprintln!("  {variable} = {value}");
                }
            }
            return Err(err.into());
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", result.answer);
    }
    Ok(())
}

fn parse_file(path: &Path, max_steps: usize, json: bool) -> Result<()> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read plan file {}", path.display()))?;
    let plan = PlanParser::parse(&text, max_steps)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan.steps)?);
    } else {
        print!("{}", render_plan(&plan));
    }
    Ok(())
}

/// One block per step: the assignment line, then its description indented.
pub fn render_plan(plan: &Plan) -> String {
    let mut out = String::new();
    for step in &plan.steps {
        let _ = writeln!(out, "{} = {}[{}]", step.variable, step.tool, step.raw_params);
        if !step.description.is_empty() {
            let _ = writeln!(out, "    {}", step.description);
        }
    }
    out
}
