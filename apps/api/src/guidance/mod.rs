// Guidance: emotion + question → generative text → structured verse record.
// All LLM calls go through llm_client; the normalizer is pure.

pub mod corpus;
pub mod handlers;
pub mod history;
pub mod normalizer;
pub mod prompts;
pub mod service;
