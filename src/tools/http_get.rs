use super::traits::{BoundArgs, Tool, ToolFuture};
use anyhow::{Context, bail};
use reqwest::Client;
use std::time::Duration;

const MAX_BODY_CHARS: usize = 64 * 1024;

/// Fetch a URL and return its status line and (truncated) body.
pub struct HttpGetTool {
    client: Client,
}

impl HttpGetTool {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .connect_timeout(Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    async fn fetch(&self, raw_url: &str) -> anyhow::Result<String> {
        if raw_url.is_empty() {
            bail!("Missing 'url' parameter");
        }

        let url = url::Url::parse(raw_url).with_context(|| format!("Invalid URL: {raw_url}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("Unsupported URL scheme: {}", url.scheme());
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("HTTP request failed")?;
        let status = response.status();
        let body = response.text().await.context("Failed to read body")?;

        if !status.is_success() {
            bail!("HTTP {status}: {}", truncate_chars(&body, 200));
        }

        Ok(format!("HTTP {status}\n{}", truncate_chars(&body, MAX_BODY_CHARS)))
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

impl Tool for HttpGetTool {
    fn name(&self) -> &str {
        "HttpGet"
    }

    fn description(&self) -> &str {
        "Fetch a web page or JSON document over HTTP(S) and return its body"
    }

    fn parameters(&self) -> Vec<&str> {
        vec!["url"]
    }

    fn execute<'a>(&'a self, args: BoundArgs) -> ToolFuture<'a> {
        Box::pin(async move {
            let url = args.get("url").map_or("", String::as_str);
            self.fetch(url).await
        })
    }
}
