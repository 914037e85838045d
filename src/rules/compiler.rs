use crate::config::types::{RuleOrigin, RuleSpec, RuleWithOrigin};
use crate::error::{PatchError, Result};
use regex::Regex;

/// A compiled rule ready for application.
#[derive(Debug, Clone)]
pub struct CompiledRule {
	/// The original rule.
	pub spec: RuleSpec,

	/// Compiled pattern.
	pub regex: Regex,

	/// Where the rule was defined (for debugging).
	pub origin: RuleOrigin,
}

/// Compiled rules in application order.
pub type RuleSet = Vec<CompiledRule>;

impl CompiledRule {
	/// Compile a rule. `index` is 1-based and only used in error messages.
	pub fn from_rule_with_origin(index: usize, rwo: &RuleWithOrigin) -> Result<Self> {
		if rwo.rule.pattern.is_empty() {
			return Err(PatchError::EmptyPattern { index });
		}

		Ok(CompiledRule {
			spec: rwo.rule.clone(),
			regex: compile_regex(&rwo.rule.pattern)?,
			origin: rwo.origin.clone(),
		})
	}

	/// Number of non-overlapping matches in `haystack`.
	pub fn count_matches(&self, haystack: &str) -> usize {
		self.regex.find_iter(haystack).count()
	}
}

/// Compile a regex pattern string.
fn compile_regex(pattern: &str) -> Result<Regex> {
	Regex::new(pattern).map_err(|source| PatchError::InvalidRegex {
		pattern: pattern.to_string(),
		source,
	})
}

/// Compile all rules, preserving order.
pub fn compile_rules(rules: &[RuleWithOrigin]) -> Result<RuleSet> {
	rules
		.iter()
		.enumerate()
		.map(|(i, rwo)| CompiledRule::from_rule_with_origin(i + 1, rwo))
		.collect()
}
