pub mod compatible;
pub mod factory;
pub mod http_client;
pub mod ollama;
pub mod reliable;
pub mod traits;

pub use compatible::CompatibleModel;
pub use factory::create_model;
pub use ollama::OllamaModel;
pub use reliable::ReliableModel;
pub use traits::{GenerateFuture, LanguageModel};
