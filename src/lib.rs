// Prompt Scribe - turns uploaded documents into reusable task prompts with Gemini

pub mod config;
pub mod extraction;
pub mod llm;
pub mod middleware;
pub mod models;
pub mod prompts;
pub mod routes;
pub mod types;
pub mod utils;

// Re-exports for convenience
pub use config::Config;
pub use models::AppState;

pub fn create_router(state: AppState) -> axum::Router {
    routes::create_router(state)
}
