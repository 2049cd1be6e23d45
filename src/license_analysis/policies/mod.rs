mod compatibility_ruleset;
mod source_priority;

pub use compatibility_ruleset::{CompatibilityRule, CompatibilityRuleset};
pub use source_priority::SourcePriority;
