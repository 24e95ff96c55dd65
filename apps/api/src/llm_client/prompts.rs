// Shared prompt fragments.
// Each relay that needs LLM calls defines its own prompts.rs alongside it.
// This file contains cross-cutting fragments.

/// Instruction that keeps answers inside the facts the résumé states.
pub const GROUNDING_INSTRUCTION: &str = "\
    NEVER invent experiences, employers, dates, technologies or numbers that are not \
    in the résumé. If the résumé does not cover what is asked, say so honestly and \
    relate the closest real experience instead.";

/// Four-part narrative structure for behavioral questions.
pub const STAR_INSTRUCTION: &str = "\
    For behavioral questions use the STAR method: \
    Situation (the context), Task (the objective), \
    Action (what you personally did) and Result (the outcome, quantified whenever \
    the résumé gives a number).";
