//! Production converters for the claude-code ↔ kiro and claude-code ↔ cursor
//! pairs.

mod cursor;
mod kiro;

pub use cursor::{ClaudeToCursor, CursorToClaude};
pub use kiro::{ClaudeToKiro, KiroToClaude};
