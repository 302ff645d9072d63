use super::traits::{GenerateFuture, LanguageModel};
use crate::error::LlmError;
use std::time::Duration;

const MAX_BACKOFF_MS: u64 = 10_000;

/// Check if an error is non-retryable (client errors that won't resolve with retries).
fn is_non_retryable(err: &anyhow::Error) -> bool {
    let msg = err.to_string();
    if is_quota_exhausted(&msg) {
        return true;
    }

    match err.downcast_ref::<LlmError>() {
        // 4xx client errors are non-retryable, except:
        // - 429 Too Many Requests (rate limiting, transient)
        // - 408 Request Timeout (transient)
        Some(LlmError::Status { status, .. }) => {
            (400..500).contains(status) && *status != 429 && *status != 408
        }
        Some(LlmError::MissingApiKey { .. }) => true,
        Some(LlmError::EmptyResponse { .. }) | None => false,
    }
}

fn is_quota_exhausted(message: &str) -> bool {
    let lower = message.to_ascii_lowercase();
    lower.contains("insufficient_quota") || lower.contains("exceeded your current quota")
}

/// Model wrapper with retry + exponential backoff.
pub struct ReliableModel<M> {
    inner: M,
    max_retries: u32,
    base_backoff_ms: u64,
}

impl<M: LanguageModel> ReliableModel<M> {
    pub fn new(inner: M, max_retries: u32, base_backoff_ms: u64) -> Self {
        Self {
            inner,
            max_retries,
            base_backoff_ms,
        }
    }

    async fn generate_with_retries(&self, prompt: &str) -> anyhow::Result<String> {
        let mut failures = Vec::new();
        let mut backoff_ms = self.base_backoff_ms;

        for attempt in 0..=self.max_retries {
            match self.inner.generate(prompt).await {
                Ok(text) => {
                    if attempt > 0 {
                        tracing::info!(
                            provider = self.inner.name(),
                            attempt,
                            "Provider recovered after retries"
                        );
                    }
                    return Ok(text);
                }
                Err(e) => {
                    let non_retryable = is_non_retryable(&e);
                    failures.push(format!(
                        "attempt {}/{}: {e:#}",
                        attempt + 1,
                        self.max_retries + 1
                    ));

                    if non_retryable {
                        tracing::warn!(provider = self.inner.name(), "Non-retryable error");
                        break;
                    }

                    if attempt < self.max_retries {
                        tracing::warn!(
                            provider = self.inner.name(),
                            attempt = attempt + 1,
                            max_retries = self.max_retries,
                            "Provider call failed, retrying"
                        );
                        tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                        backoff_ms = backoff_ms.saturating_mul(2).min(MAX_BACKOFF_MS);
                    }
                }
            }
        }

        anyhow::bail!(
            "{} failed. Attempts:\n{}",
            self.inner.name(),
            failures.join("\n")
        )
    }
}

impl<M: LanguageModel> LanguageModel for ReliableModel<M> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a> {
        Box::pin(self.generate_with_retries(prompt))
    }
}
