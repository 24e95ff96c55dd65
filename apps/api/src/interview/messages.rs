use crate::models::chat::ChatMessage;
use crate::models::conversation::Turn;

/// Assembles the message list for the completion call:
/// system prompt, then each prior turn as user + assistant, then the new question.
///
/// Blank halves of a turn are dropped, so a turn with neither side filled in
/// contributes nothing.
pub fn build_messages(system_prompt: String, history: &[Turn], question: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(history.len() * 2 + 2);
    messages.push(ChatMessage::system(system_prompt));

    for turn in history {
        if !turn.question.trim().is_empty() {
            messages.push(ChatMessage::user(turn.question.as_str()));
        }
        if !turn.answer.trim().is_empty() {
            messages.push(ChatMessage::assistant(turn.answer.as_str()));
        }
    }

    messages.push(ChatMessage::user(question));
    messages
}
