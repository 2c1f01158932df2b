//! claude-code ↔ cursor conversion.
//!
//! Cursor rules absorb both steering rules and (approximately) slash
//! commands; subagents have no Cursor equivalent and are dropped.

use crate::converter::{
    reheaded, Approximation, Confidence, ConvertedContext, FeatureAnalysis, PlatformConverter,
};
use taptik_core::{ConfigurationContext, Platform, SteeringRule};

pub struct ClaudeToCursor;

impl PlatformConverter for ClaudeToCursor {
    fn source(&self) -> Platform {
        Platform::ClaudeCode
    }

    fn target(&self) -> Platform {
        Platform::Cursor
    }

    fn analyze(&self, ctx: &ConfigurationContext) -> FeatureAnalysis {
        let mut analysis = FeatureAnalysis::default();
        if ctx.scopes().any(|(_, s)| !s.agents.is_empty()) {
            analysis.unsupported.push("agents".into());
        }
        if ctx.scopes().any(|(_, s)| !s.commands.is_empty()) {
            analysis.approximations.push(Approximation {
                source_feature: "commands".into(),
                target_approximation: "rules".into(),
                confidence: Confidence::Medium,
                note: Some("slash commands become cursor rules describing the workflow".into()),
            });
        }
        analysis
    }

    fn convert(&self, ctx: &ConfigurationContext) -> ConvertedContext {
        let mut out = reheaded(ctx, Platform::Cursor);
        let mut warnings = Vec::new();
        let mut dropped_agents = 0usize;
        let mut moved_commands = 0usize;

        for scope in out.data.values_mut() {
            dropped_agents += scope.agents.len();
            scope.agents.clear();

            for command in scope.commands.drain(..) {
                let args = command.args.join(" ");
                scope.steering_rules.push(SteeringRule {
                    pattern: "**/*".into(),
                    rule: format!(
                        "When asked to '{}', run: {} {}",
                        command.name,
                        command.command,
                        args.trim()
                    ),
                });
                moved_commands += 1;
            }
        }

        if dropped_agents > 0 {
            warnings.push(format!(
                "dropped {dropped_agents} agent(s); cursor has no subagent equivalent"
            ));
        }
        if moved_commands > 0 {
            warnings.push(format!("converted {moved_commands} command(s) into cursor rules"));
        }

        ConvertedContext {
            context: out,
            warnings,
        }
    }
}

pub struct CursorToClaude;

impl PlatformConverter for CursorToClaude {
    fn source(&self) -> Platform {
        Platform::Cursor
    }

    fn target(&self) -> Platform {
        Platform::ClaudeCode
    }

    fn analyze(&self, _ctx: &ConfigurationContext) -> FeatureAnalysis {
        FeatureAnalysis::default()
    }

    fn convert(&self, ctx: &ConfigurationContext) -> ConvertedContext {
        ConvertedContext {
            context: reheaded(ctx, Platform::ClaudeCode),
            warnings: Vec::new(),
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
            "global".into(),
            ScopeConfig {
                agents: vec![AgentDef {
                    name: "tester".into(),
                    ..Default::default()
                }],
                commands: vec![CommandDef {
                    name: "coverage".into(),
                    command: "cargo tarpaulin".into(),
                    args: Vec::new(),
                }],
                ..Default::default()
            },
        );
        ctx
    }

    #[test]
    fn agents_are_unsupported_and_dropped() {
        let ctx = claude_context();
        let analysis = ClaudeToCursor.analyze(&ctx);
        assert_eq!(analysis.unsupported, vec!["agents".to_string()]);

        let converted = ClaudeToCursor.convert(&ctx);
        let scope = converted.context.scope("global").unwrap();
        assert!(scope.agents.is_empty());
        assert!(converted
            .warnings
            .iter()
            .any(|w| w.contains("no subagent equivalent")));
    }

    #[test]
    fn commands_become_rules() {
        let converted = ClaudeToCursor.convert(&claude_context());
        let scope = converted.context.scope("global").unwrap();
        assert!(scope.commands.is_empty());
        assert_eq!(scope.steering_rules.len(), 1);
        assert!(scope.steering_rules[0].rule.contains("cargo tarpaulin"));
    }

    #[test]
    fn cursor_to_claude_round_trips_rules() {
        let mut ctx = ConfigurationContext::new("1.0.0", "cursor");
        ctx.data.insert(
            "local".into(),
            ScopeConfig {
                steering_rules: vec![SteeringRule {
                    pattern: "**/*.ts".into(),
                    rule: "Use strict mode".into(),
                }],
                ..Default::default()
            },
        );
        let converted = CursorToClaude.convert(&ctx);
        assert_eq!(converted.context.source_platform, "claude-code");
        assert_eq!(
            converted.context.scope("local").unwrap().steering_rules,
            ctx.scope("local").unwrap().steering_rules
        );
    }
}
