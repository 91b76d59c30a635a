//! Prompt assembly for grounded answer generation

use crate::providers::index::ScoredContext;
use crate::types::{ChatRole, ChatTurn};

/// Fixed system instruction prepended to every grounded prompt
pub const SYSTEM_PROMPT: &str = "\
You are an expert AI educator. Answer the user's question using ONLY the \
reference passages provided below.

Rules for your response:
1. Structure the answer with short paragraphs; use bullet points for lists.
2. If the passages do not contain enough information to answer, reply \
exactly: \"I don't have enough information in my sources to answer that.\"
3. Close the answer with the line: \"Feel free to ask more!\"
4. After the answer, append a section that begins with the exact text \
\"Follow up questions:\" followed by exactly 3 numbered questions the user \
could ask next, each ending with a question mark.";

/// Assembles the augmented prompt sent to the selected model
pub struct PromptBuilder;

impl PromptBuilder {
    /// Build the full prompt: system instruction, then prior turns, then
    /// retrieved passages, then the question. The order is fixed.
    pub fn build_prompt(
        question: &str,
        history: &[ChatTurn],
        contexts: &[ScoredContext],
    ) -> String {
        let mut prompt = String::new();

        prompt.push_str(SYSTEM_PROMPT);
        prompt.push_str("\n\n");

        if !history.is_empty() {
            prompt.push_str("## Conversation so far\n\n");
            for turn in history {
                let speaker = match turn.role {
                    ChatRole::User => "User",
                    ChatRole::Assistant => "Assistant",
                };
                prompt.push_str(&format!("{}: {}\n", speaker, turn.content));
            }
            prompt.push('\n');
        }

        prompt.push_str("## Reference passages\n\n");
        for (i, context) in contexts.iter().enumerate() {
            prompt.push_str(&format!(
                "[{}] ({}, page {})\n{}\n\n",
                i + 1,
                context.title,
                context.chapter_page_no,
                context.content
            ));
        }

        prompt.push_str("## Question\n\n");
        prompt.push_str(question);
        prompt.push('\n');

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(content: &str, score: f32) -> ScoredContext {
        ScoredContext {
            content: content.to_string(),
            score,
            title: "AIMA".to_string(),
            chapter_page_no: 42,
        }
    }

    #[test]
    fn sections_appear_in_fixed_order() {
        let history = vec![
            ChatTurn::user("What is search?"),
            ChatTurn::assistant("Search explores state spaces."),
        ];
        let contexts = vec![context("An agent perceives its environment.", 0.9)];
        let prompt = PromptBuilder::build_prompt("What is an agent?", &history, &contexts);

        let system = prompt.find("expert AI educator").unwrap();
        let turns = prompt.find("Conversation so far").unwrap();
        let passages = prompt.find("Reference passages").unwrap();
        let question = prompt.find("## Question").unwrap();
        assert!(system < turns && turns < passages && passages < question);
        assert!(prompt.ends_with("What is an agent?\n"));
    }

    #[test]
    fn empty_history_omits_conversation_section() {
        let contexts = vec![context("Some passage.", 0.5)];
        let prompt = PromptBuilder::build_prompt("Q?", &[], &contexts);
        assert!(!prompt.contains("Conversation so far"));
        assert!(prompt.contains("Some passage."));
    }

    #[test]
    fn passages_carry_provenance() {
        let contexts = vec![context("First.", 0.9), context("Second.", 0.8)];
        let prompt = PromptBuilder::build_prompt("Q?", &[], &contexts);
        assert!(prompt.contains("[1] (AIMA, page 42)"));
        assert!(prompt.contains("[2] (AIMA, page 42)"));
    }
}
