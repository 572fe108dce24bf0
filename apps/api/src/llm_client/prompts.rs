// Shared prompt fragments. Each service that needs LLM calls defines its own
// prompts.rs alongside it; this file holds the cross-cutting pieces.

/// Appended to every system prompt that talks to a user about their feelings.
pub const CARE_INSTRUCTION: &str = "\
    Be warm, calm and non-judgmental. \
    Do NOT diagnose, prescribe medication, or claim to replace professional care. \
    If the user mentions self-harm, gently encourage contacting a trusted person \
    or local emergency services.";

/// Instruction that keeps the reply in the fixed line template the
/// guidance normalizer understands.
pub const TEMPLATE_ONLY_INSTRUCTION: &str = "\
    Respond ONLY in the requested line template. \
    Do NOT use markdown headings, bullet points or code fences. \
    Do NOT add text before or after the template.";
