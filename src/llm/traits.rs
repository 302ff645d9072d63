use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future returned by [`LanguageModel::generate`].
pub type GenerateFuture<'a> = Pin<Box<dyn Future<Output = anyhow::Result<String>> + Send + 'a>>;

/// Text-in, text-out language model client.
///
/// Shared read-only between planner, solver and the reasoning pseudo-tool,
/// and across concurrent runs.
pub trait LanguageModel: Send + Sync {
    /// Provider identifier (e.g. "ollama", "openai").
    fn name(&self) -> &str;

    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a>;
}

impl<T: LanguageModel + ?Sized> LanguageModel for Arc<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a> {
        (**self).generate(prompt)
    }
}

impl<T: LanguageModel + ?Sized> LanguageModel for Box<T> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn generate<'a>(&'a self, prompt: &'a str) -> GenerateFuture<'a> {
        (**self).generate(prompt)
    }
}
