use crate::engine::{Plan, Step};
use crate::error::{EngineError, PlanParseError, Result};
use std::collections::HashSet;

/// Marker that opens every plan line.
pub const PLAN_MARKER: &str = "Plan:";

/// Prefix of an evidence variable token (`#E<digits>`).
pub const VARIABLE_PREFIX: &str = "#E";

/// Line-grammar parser for planner output:
///
/// ```text
/// Plan: <description> #E<N> = <Tool>[<arg1>, <arg2>, ...]
/// ```
///
/// Lines without a complete assignment are ignored. When a line holds more
/// than one well-formed assignment, the last one is the step and everything
/// before it is description.
pub struct PlanParser;

impl PlanParser {
    /// Parse planner text into a [`Plan`], enforcing `max_steps` before any
    /// step can run.
    pub fn parse(text: &str, max_steps: usize) -> Result<Plan> {
        let steps: Vec<Step> = text.lines().filter_map(Self::parse_line).collect();

        if steps.is_empty() {
            return Err(PlanParseError::Empty.into());
        }

        if steps.len() > max_steps {
            return Err(EngineError::StepLimitExceeded {
                steps: steps.len(),
                max_steps,
            });
        }

        validate_variables(&steps)?;

        Ok(Plan {
            raw_text: text.to_string(),
            steps,
        })
    }

    /// Parse a single line, returning `None` when it is not a plan step.
    pub fn parse_line(line: &str) -> Option<Step> {
        let body_start = line.find(PLAN_MARKER)? + PLAN_MARKER.len();
        let body = &line[body_start..];

        let (offset, assignment) = body
            .match_indices(VARIABLE_PREFIX)
            .filter_map(|(offset, _)| Assignment::parse(&body[offset..]).map(|a| (offset, a)))
            .last()?;

        Some(Step {
            description: body[..offset].trim().to_string(),
            variable: assignment.variable.to_string(),
            index: assignment.index,
            tool: assignment.tool.to_string(),
            raw_params: assignment.params.trim().to_string(),
        })
    }
}

/// `#E<N> = <Tool>[<params>]`, borrowed from the source line.
struct Assignment<'a> {
    variable: &'a str,
    index: u64,
    tool: &'a str,
    params: &'a str,
}

impl<'a> Assignment<'a> {
    fn parse(input: &'a str) -> Option<Self> {
        let mut cursor = Cursor::new(input);

        cursor.expect(VARIABLE_PREFIX)?;
        let digits = cursor.take_while(|c| c.is_ascii_digit());
        if digits.is_empty() {
            return None;
        }
        let index = digits.parse().ok()?;
        let variable = &input[..VARIABLE_PREFIX.len() + digits.len()];

        cursor.skip_whitespace();
        cursor.expect("=")?;
        cursor.skip_whitespace();

        let tool = cursor.take_while(|c| c.is_alphanumeric() || c == '_');
        if tool.is_empty() {
            return None;
        }

        cursor.skip_whitespace();
        cursor.expect("[")?;
        let params = cursor.take_until(']')?;

        Some(Self {
            variable,
            index,
            tool,
            params,
        })
    }
}

struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    fn expect(&mut self, token: &str) -> Option<()> {
        self.rest = self.rest.strip_prefix(token)?;
        Some(())
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let end = self
            .rest
            .char_indices()
            .find(|(_, c)| !pred(*c))
            .map_or(self.rest.len(), |(i, _)| i);
        let (taken, rest) = self.rest.split_at(end);
        self.rest = rest;
        taken
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    /// Consume through `close`, returning the text before it.
    fn take_until(&mut self, close: char) -> Option<&'a str> {
        let end = self.rest.find(close)?;
        let taken = &self.rest[..end];
        self.rest = &self.rest[end + close.len_utf8()..];
        Some(taken)
    }
}

fn validate_variables(steps: &[Step]) -> Result<()> {
    let mut seen = HashSet::new();
    let mut previous: Option<&Step> = None;

    for step in steps {
        if !seen.insert(step.variable.as_str()) {
            return Err(PlanParseError::DuplicateVariable(step.variable.clone()).into());
        }
        if let Some(prev) = previous
            && step.index <= prev.index
        {
            return Err(PlanParseError::NonIncreasingVariable {
                previous: prev.variable.clone(),
                current: step.variable.clone(),
            }
            .into());
        }
        previous = Some(step);
    }

    Ok(())
}
