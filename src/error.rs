use crate::engine::EvidenceStore;
use std::time::Duration;
use thiserror::Error;

// ─── Engine errors ───────────────────────────────────────────────────────────

/// Structured error hierarchy for a single `Engine::run`.
///
/// Every variant is terminal for the run that produced it. Tool failures never
/// appear here: a failing tool is captured as evidence text (see
/// [`ToolExecutionError`]) and explained by the solver instead.
#[derive(Debug, Error)]
pub enum EngineError {
    // ── Planning ────────────────────────────────────────────────────────
    #[error("plan parse failed: {0}")]
    PlanParse(#[from] PlanParseError),

    #[error("plan has {steps} steps, exceeding the limit of {max_steps}")]
    StepLimitExceeded { steps: usize, max_steps: usize },

    // ── Execution ───────────────────────────────────────────────────────
    #[error("step {variable} names unknown tool {tool}")]
    UnknownTool { variable: String, tool: String },

    // ── Language model ──────────────────────────────────────────────────
    #[error("language model call failed during {stage}: {message}")]
    LanguageModel { stage: Stage, message: String },

    // ── Budget ──────────────────────────────────────────────────────────
    #[error(
        "run deadline of {}ms exceeded during {stage} after {completed_steps} completed steps",
        .timeout.as_millis()
    )]
    DeadlineExceeded {
        stage: Stage,
        timeout: Duration,
        completed_steps: usize,
        evidence: EvidenceStore,
    },

    // ── Prompt rendering ────────────────────────────────────────────────
    #[error("prompt: {0}")]
    Prompt(String),
}

impl EngineError {
    /// Evidence gathered before the run aborted, when the error carries any.
    pub fn partial_evidence(&self) -> Option<&EvidenceStore> {
        match self {
            Self::DeadlineExceeded { evidence, .. } => Some(evidence),
            _ => None,
        }
    }
}

/// Run phase an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    Plan,
    Execute,
    Solve,
}

// ─── Plan parse errors ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanParseError {
    #[error("no plan steps found in planner output")]
    Empty,

    #[error("evidence variable {0} is declared more than once")]
    DuplicateVariable(String),

    #[error("evidence variable {current} does not follow {previous}")]
    NonIncreasingVariable { previous: String, current: String },
}

// ─── Tool execution errors ───────────────────────────────────────────────────

/// Prefix that marks an evidence value as a captured tool failure.
pub const TOOL_ERROR_MARKER: &str = "[tool error]";

/// A bound tool call that failed. Never propagated; rendered into evidence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{tool} failed: {message}")]
pub struct ToolExecutionError {
    pub tool: String,
    pub message: String,
}

impl ToolExecutionError {
    pub fn new(tool: impl Into<String>, err: &anyhow::Error) -> Self {
        Self {
            tool: tool.into(),
            message: format!("{err:#}"),
        }
    }

    /// Evidence text recorded in place of a tool result.
    pub fn to_evidence(&self) -> String {
        format!("{TOOL_ERROR_MARKER} {self}")
    }
}

// ─── Config errors ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

// ─── LLM / Provider errors ──────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{provider} API error ({status}): {body}")]
    Status {
        provider: String,
        status: u16,
        body: String,
    },

    #[error("{provider} API key not set")]
    MissingApiKey { provider: String },

    #[error("{provider} returned an empty response")]
    EmptyResponse { provider: String },
}

// ─── Convenience re-exports ─────────────────────────────────────────────────

/// Shorthand result type for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
