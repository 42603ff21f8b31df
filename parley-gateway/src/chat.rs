//! Chat exchange orchestration: knowledge match first, model fallback
//! second, session append last.

use tracing::{error, info};

use parley_core::ConversationTurn;
use parley_knowledge::best_match;

use crate::state::AppState;

/// Wrap a user utterance in the instruction template the model was tuned
/// for.
fn instruction_prompt(message: &str) -> String {
    format!("[INST] {} [/INST]", message)
}

/// Handle one chat exchange. Always produces a reply.
///
/// The utterance is matched against the knowledge corpus; on a qualifying
/// match the stored sentence is the reply, otherwise the completion
/// provider is asked. Provider failures are folded into the reply text
/// rather than failing the exchange, and a session-write failure is logged
/// without losing the reply.
pub async fn chat_exchange(state: &AppState, message: &str) -> String {
    let corpus = match state.knowledge.load().await {
        Ok(corpus) => corpus,
        Err(e) => {
            error!(error = %e, "failed to load knowledge corpus");
            Vec::new()
        }
    };

    let reply = match best_match(message, &corpus) {
        Some(sentence) => {
            info!("answering from knowledge corpus");
            sentence.to_string()
        }
        None => {
            let inference = &state.settings.inference;
            match state
                .provider
                .complete(
                    &instruction_prompt(message),
                    inference.max_tokens,
                    inference.temperature,
                )
                .await
            {
                Ok(completion) => completion,
                Err(e) => {
                    error!(provider = state.provider.name(), error = %e, "completion failed");
                    format!("Model error: {}", e)
                }
            }
        }
    };

    if let Err(e) = state
        .sessions
        .append_turn(ConversationTurn::now(message, reply.clone()))
        .await
    {
        error!(error = %e, "failed to persist session turn");
    }

    reply
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instruction_prompt_template() {
        assert_eq!(
            instruction_prompt("what is rust"),
            "[INST] what is rust [/INST]"
        );
    }
}
