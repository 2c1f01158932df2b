//! claude-code ↔ kiro conversion.
//!
//! Kiro has no subagent concept and no slash commands, but its steering
//! documents and instruction files are a superset of what claude-code
//! carries, so the reverse direction maps everything directly.

use crate::converter::{
    reheaded, Approximation, Confidence, ConvertedContext, FeatureAnalysis, PlatformConverter,
};
use taptik_core::{ConfigurationContext, Instructions, Platform, SteeringRule};

pub struct ClaudeToKiro;

impl PlatformConverter for ClaudeToKiro {
    fn source(&self) -> Platform {
        Platform::ClaudeCode
    }

    fn target(&self) -> Platform {
        Platform::Kiro
    }

    fn analyze(&self, ctx: &ConfigurationContext) -> FeatureAnalysis {
        let mut analysis = FeatureAnalysis::default();
        let has_agents = ctx.scopes().any(|(_, s)| !s.agents.is_empty());
        let has_commands = ctx.scopes().any(|(_, s)| !s.commands.is_empty());

        if has_agents {
            analysis.approximations.push(Approximation {
                source_feature: "agents".into(),
                target_approximation: "steering-rules".into(),
                confidence: Confidence::Low,
                note: Some("agent instructions become always-on steering documents".into()),
            });
        }
        if has_commands {
            analysis.approximations.push(Approximation {
                source_feature: "commands".into(),
                target_approximation: "instructions".into(),
                confidence: Confidence::Medium,
                note: Some("slash commands become instruction snippets".into()),
            });
        }
        analysis
    }

    fn convert(&self, ctx: &ConfigurationContext) -> ConvertedContext {
        let mut out = reheaded(ctx, Platform::Kiro);
        let mut warnings = Vec::new();
        let mut moved_agents = 0usize;
        let mut moved_commands = 0usize;

        for scope in out.data.values_mut() {
            for agent in scope.agents.drain(..) {
                let body = agent
                    .instructions
                    .or(agent.description)
                    .unwrap_or_default();
                scope.steering_rules.push(SteeringRule {
                    pattern: "**/*".into(),
                    rule: format!("Agent '{}': {}", agent.name, body),
                });
                moved_agents += 1;
            }

            if !scope.commands.is_empty() {
                let mut snippet = String::new();
                for command in scope.commands.drain(..) {
                    let args = command.args.join(" ");
                    snippet.push_str(&format!(
                        "## Command: /{}\nRun: `{} {}`\n",
                        command.name,
                        command.command,
                        args.trim()
                    ));
                    moved_commands += 1;
                }
                let instructions = scope.instructions.get_or_insert_with(Instructions::default);
                let local = instructions.local.get_or_insert_with(String::new);
                if !local.is_empty() {
                    local.push('\n');
                }
                local.push_str(snippet.trim_end());
            }
        }

        if moved_agents > 0 {
            warnings.push(format!(
                "converted {moved_agents} agent(s) into kiro steering rules"
            ));
        }
        if moved_commands > 0 {
            warnings.push(format!(
                "embedded {moved_commands} command(s) into kiro instructions"
            ));
        }

        ConvertedContext {
            context: out,
            warnings,
        }
    }
}

pub struct KiroToClaude;

impl PlatformConverter for KiroToClaude {
    fn source(&self) -> Platform {
        Platform::Kiro
    }

    fn target(&self) -> Platform {
        Platform::ClaudeCode
    }

    fn analyze(&self, _ctx: &ConfigurationContext) -> FeatureAnalysis {
        // claude-code supports every kiro component kind directly.
        FeatureAnalysis::default()
    }

    fn convert(&self, ctx: &ConfigurationContext) -> ConvertedContext {
        let out = reheaded(ctx, Platform::ClaudeCode);
        let mut warnings = Vec::new();

        for (_, scope) in out.scopes() {
            for rule in &scope.steering_rules {
                if rule.pattern.contains('{') || rule.pattern.contains('!') {
                    warnings.push(format!(
                        "steering pattern '{}' uses kiro-specific glob syntax; verify it on claude-code",
                        rule.pattern
                    ));
                }
            }
        }

        ConvertedContext {
            context: out,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taptik_core::{AgentDef, CommandDef, ScopeConfig};

    fn claude_context() -> ConfigurationContext {
        let mut ctx = ConfigurationContext::new("1.0.0", "claude-code");
        ctx.data.insert(
            "local".into(),
            ScopeConfig {
                agents: vec![AgentDef {
                    name: "reviewer".into(),
                    description: None,
                    instructions: Some("Review diffs carefully".into()),
                    tools: Vec::new(),
                }],
                commands: vec![CommandDef {
                    name: "lint".into(),
                    command: "cargo clippy".into(),
                    args: vec!["--all-targets".into()],
                }],
                ..Default::default()
            },
        );
        ctx
    }

    #[test]
    fn agents_become_steering_rules() {
        let converted = ClaudeToKiro.convert(&claude_context());
        let scope = converted.context.scope("local").unwrap();

        assert!(scope.agents.is_empty());
        assert_eq!(scope.steering_rules.len(), 1);
        assert!(scope.steering_rules[0].rule.contains("reviewer"));
        assert!(scope.steering_rules[0].rule.contains("Review diffs carefully"));
    }

    #[test]
    fn commands_land_in_instructions() {
        let converted = ClaudeToKiro.convert(&claude_context());
        let scope = converted.context.scope("local").unwrap();

        assert!(scope.commands.is_empty());
        let local = scope.instructions.as_ref().unwrap().local.as_ref().unwrap();
        assert!(local.contains("/lint"));
        assert!(local.contains("cargo clippy --all-targets"));
        assert_eq!(converted.warnings.len(), 2);
    }

    #[test]
    fn analysis_lists_both_approximations() {
        let analysis = ClaudeToKiro.analyze(&claude_context());
        assert!(analysis.unsupported.is_empty());
        let features: Vec<&str> = analysis
            .approximations
            .iter()
            .map(|a| a.source_feature.as_str())
            .collect();
        assert_eq!(features, ["agents", "commands"]);
    }

    #[test]
    fn source_context_is_not_mutated() {
        let ctx = claude_context();
        let _ = ClaudeToKiro.convert(&ctx);
        assert_eq!(ctx.scope("local").unwrap().agents.len(), 1);
        assert_eq!(ctx.source_platform, "claude-code");
    }

    #[test]
    fn kiro_to_claude_is_direct() {
        let mut ctx = ConfigurationContext::new("1.0.0", "kiro");
        ctx.data.insert(
            "local".into(),
            ScopeConfig {
                steering_rules: vec![SteeringRule {
                    pattern: "src/**/*.rs".into(),
                    rule: "Prefer explicit error types".into(),
                }],
                ..Default::default()
            },
        );
        let analysis = KiroToClaude.analyze(&ctx);
        assert!(analysis.approximations.is_empty() && analysis.unsupported.is_empty());

        let converted = KiroToClaude.convert(&ctx);
        assert_eq!(converted.context.source_platform, "claude-code");
        assert!(converted.warnings.is_empty());
        assert_eq!(
            converted.context.scope("local").unwrap().steering_rules,
            ctx.scope("local").unwrap().steering_rules
        );
    }

    #[test]
    fn kiro_specific_globs_warn() {
        let mut ctx = ConfigurationContext::new("1.0.0", "kiro");
        ctx.data.insert(
            "local".into(),
            ScopeConfig {
                steering_rules: vec![SteeringRule {
                    pattern: "src/{a,b}/**".into(),
                    rule: "x".into(),
                }],
                ..Default::default()
            },
        );
        let converted = KiroToClaude.convert(&ctx);
        assert_eq!(converted.warnings.len(), 1);
        assert!(converted.warnings[0].contains("kiro-specific"));
    }
}
