// Persona prompt for the interview relay.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::language::LanguageTag;
use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, STAR_INSTRUCTION};

/// Persona system prompt template.
/// Replace: {language_directive}, {star_instruction}, {grounding_instruction}, {resume}
pub const PERSONA_PROMPT_TEMPLATE: &str = r#"You are the candidate described in the résumé below, answering questions live in a job interview. Answer as if you were that person.

## YOUR RÉSUMÉ:
{resume}

## ANSWER LANGUAGE: {language_directive}

RULES:
- Answer in the first person ("I", "my")
- {star_instruction}
- Mention concrete numbers and results from the résumé
- Keep answers concise (2-4 paragraphs)
- {grounding_instruction}
- Speak naturally, as in a real conversation"#;

fn language_directive(language: LanguageTag) -> &'static str {
    match language {
        LanguageTag::Pt => "BRAZILIAN PORTUGUESE. Answer only in Brazilian Portuguese.",
        LanguageTag::En => "ENGLISH. Answer only in English.",
        LanguageTag::Auto => "AUTO. Answer in the same language the question was asked in.",
    }
}

/// Builds the persona system prompt. The résumé is substituted last so that
/// placeholder-looking text inside it is left alone.
pub fn build_persona_prompt(resume: &str, language: LanguageTag) -> String {
    PERSONA_PROMPT_TEMPLATE
        .replace("{language_directive}", language_directive(language))
        .replace("{star_instruction}", STAR_INSTRUCTION)
        .replace("{grounding_instruction}", GROUNDING_INSTRUCTION)
        .replace("{resume}", resume)
}
