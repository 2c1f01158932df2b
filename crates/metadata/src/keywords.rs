//! Search keyword extraction.

use crate::tags::{tokenize, TECHNOLOGY};
use std::collections::BTreeSet;
use taptik_core::limits::MAX_SEARCH_KEYWORDS;
use taptik_core::ConfigurationContext;

/// Tokens that carry no search value.
const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "with", "this", "that", "from", "are", "you", "your", "all", "any",
    "can", "has", "have", "not", "use", "using", "will", "when", "where", "which", "should",
    "always", "never", "into", "each",
];

fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(&token)
}

/// Extract search keywords from agent, command, instruction, and steering
/// text: lowercase, deduplicated, sorted, capped at [`MAX_SEARCH_KEYWORDS`].
pub fn collect_keywords(ctx: &ConfigurationContext) -> Vec<String> {
    let mut keywords = BTreeSet::new();

    let mut push_text = |text: &str, keywords: &mut BTreeSet<String>| {
        for token in tokenize(text) {
            if token.len() <= 2 || is_stop_word(&token) {
                continue;
            }
            // Recognized technology tokens map to their canonical form.
            match TECHNOLOGY.get(token.as_str()) {
                Some(canonical) => keywords.insert((*canonical).to_string()),
                None => keywords.insert(token),
            };
        }
    };

    for (_, scope) in ctx.scopes() {
        for agent in &scope.agents {
            push_text(&agent.name, &mut keywords);
            if let Some(description) = &agent.description {
                push_text(description, &mut keywords);
            }
            if let Some(instructions) = &agent.instructions {
                push_text(instructions, &mut keywords);
            }
        }
        for command in &scope.commands {
            push_text(&command.name, &mut keywords);
            push_text(&command.command, &mut keywords);
        }
        for rule in &scope.steering_rules {
            push_text(&rule.rule, &mut keywords);
        }
        if let Some(instructions) = &scope.instructions {
            if let Some(global) = &instructions.global {
                push_text(global, &mut keywords);
            }
            if let Some(local) = &instructions.local {
                push_text(local, &mut keywords);
            }
        }
    }

    keywords.into_iter().take(MAX_SEARCH_KEYWORDS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use taptik_core::{AgentDef, CommandDef, ScopeConfig};

    fn context_with_scope(scope: ScopeConfig) -> ConfigurationContext {
        let mut ctx = ConfigurationContext::new("1.0.0", "claude-code");
        ctx.data.insert("local".into(), scope);
        ctx
    }

    #[test]
    fn short_tokens_and_stop_words_are_dropped() {
        let scope = ScopeConfig {
            commands: vec![CommandDef {
                name: "run the CI".into(),
                command: "do it now and always".into(),
                args: Vec::new(),
            }],
            ..Default::default()
        };
        let keywords = collect_keywords(&context_with_scope(scope));
        assert!(!keywords.iter().any(|k| k == "the" || k == "and" || k == "always"));
        assert!(!keywords.iter().any(|k| k.len() <= 2));
        assert!(keywords.contains(&"run".to_string()));
    }

    #[test]
    fn technology_tokens_are_canonicalized() {
        let scope = ScopeConfig {
            agents: vec![AgentDef {
                name: "K8s helper".into(),
                description: Some("Manages kubectl contexts".into()),
                instructions: None,
                tools: Vec::new(),
            }],
            ..Default::default()
        };
        let keywords = collect_keywords(&context_with_scope(scope));
        assert!(keywords.contains(&"kubernetes".to_string()));
        assert!(!keywords.contains(&"k8s".to_string()));
    }

    #[test]
    fn keywords_are_capped_sorted_and_unique() {
        let long_text: String = (0..200).map(|i| format!("keyword{i} ")).collect();
        let scope = ScopeConfig {
            steering_rules: vec![taptik_core::SteeringRule {
                pattern: "**".into(),
                rule: long_text,
            }],
            ..Default::default()
        };
        let keywords = collect_keywords(&context_with_scope(scope));
        assert_eq!(keywords.len(), MAX_SEARCH_KEYWORDS);
        let mut sorted = keywords.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(keywords, sorted);
    }

    #[test]
    fn empty_context_has_no_keywords() {
        let ctx = ConfigurationContext::new("1.0.0", "kiro");
        assert!(collect_keywords(&ctx).is_empty());
    }
}
