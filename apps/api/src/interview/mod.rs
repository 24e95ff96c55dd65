// Interview relay: persona prompt, message assembly and the answer endpoint
// (single JSON payload or server-sent events).
// All upstream calls go through llm_client.

pub mod handlers;
pub mod messages;
pub mod prompts;
pub mod relay;
pub mod resume;
