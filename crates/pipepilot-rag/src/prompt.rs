use pipepilot_core::types::RankedResult;

pub const SYSTEM_PROMPT: &str = "You are an assistant for a plumbing company.
Use the provided CONTEXT snippets only. If the answer is not in the context, say you don't have that info. Be concise and helpful.";

/// Numbered passages, `[1] ...`, separated by a blank line so answers can cite them.
pub fn build_context(ranked: &[RankedResult]) -> String {
    ranked
        .iter()
        .enumerate()
        .map(|(i, r)| format!("[{}] {}", i + 1, r.text))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn build_user_prompt(context: &str, question: &str) -> String {
    format!("CONTEXT:\n{context}\n\nQUESTION: {question}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_is_numbered_from_one() {
        let ranked = vec![
            RankedResult { id: "a".into(), text: "Open 24/7.".into(), score: 0.9 },
            RankedResult { id: "b".into(), text: "Licensed in CA.".into(), score: 0.8 },
        ];
        assert_eq!(build_context(&ranked), "[1] Open 24/7.\n\n[2] Licensed in CA.");
        assert_eq!(build_context(&[]), "");
    }
}
