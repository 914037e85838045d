use crate::config::types::RuleSpec;
use crate::error::{PatchError, Result};
use crate::rules::compiler::CompiledRule;
use regex::NoExpand;
use std::borrow::Cow;

/// Parsed sed-like substitution expression, as given with `--expr`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
	/// The pattern to match.
	pub pattern: String,

	/// The replacement string.
	pub replacement: String,
}

impl Substitution {
	/// Parse a substitution string in sed-like format: "s/pattern/replacement/" or
	/// "s/pattern/replacement/g". Any delimiter works; `\<delim>` escapes it.
	///
	/// Every rule replaces all matches, so `g` is accepted but changes nothing.
	pub fn parse(input: &str) -> Result<Self> {
		let invalid = |reason: &str| PatchError::InvalidSubstitution {
			expr: input.to_string(),
			reason: reason.to_string(),
		};

		let mut chars = input.chars();
		if chars.next() != Some('s') {
			return Err(invalid("must start with 's'"));
		}

		let delimiter = chars.next().ok_or_else(|| invalid("too short"))?;
		if delimiter.is_alphanumeric() || delimiter == '\\' || delimiter.is_whitespace() {
			return Err(invalid("delimiter must be a punctuation character"));
		}

		let parts = split_by_delimiter(chars.as_str(), delimiter);

		if parts.len() < 2 {
			return Err(invalid("must have pattern and replacement"));
		}
		if parts.len() > 3 {
			return Err(invalid("unescaped delimiter in replacement"));
		}

		let flags = parts.get(2).map(String::as_str).unwrap_or("");
		if let Some(flag) = flags.chars().find(|c| *c != 'g') {
			return Err(invalid(&format!("unsupported flag '{flag}'")));
		}

		if parts[0].is_empty() {
			return Err(invalid("empty pattern"));
		}

		Ok(Substitution {
			pattern: parts[0].clone(),
			replacement: parts[1].clone(),
		})
	}

	/// Convert into a rule for the rule set.
	pub fn into_rule_spec(self) -> RuleSpec {
		RuleSpec::new(self.pattern, self.replacement)
	}
}

/// Split a string by a delimiter, respecting backslash escapes.
fn split_by_delimiter(input: &str, delimiter: char) -> Vec<String> {
	let mut parts = Vec::new();
	let mut current = String::new();
	let mut chars = input.chars().peekable();
	let mut escape_next = false;

	while let Some(c) = chars.next() {
		if escape_next {
			current.push(c);
			escape_next = false;
		} else if c == '\\' {
			// Only an escaped delimiter loses its backslash; regex escapes pass through
			if chars.peek() == Some(&delimiter) {
				escape_next = true;
			} else {
				current.push(c);
			}
		} else if c == delimiter {
			parts.push(current);
			current = String::new();
		} else {
			current.push(c);
		}
	}

	parts.push(current);

	parts
}

/// Result of running a rule set over one piece of content.
#[derive(Debug)]
pub struct Rewrite<'a> {
	/// Content after all rules. Borrowed if no rule matched.
	pub content: Cow<'a, str>,

	/// Total number of matches replaced across all rules.
	pub replacements: usize,
}

impl Rewrite<'_> {
	/// Whether the content differs from the input.
	///
	/// A rule can match and still produce identical text, so this compares
	/// content rather than counting replacements.
	pub fn is_changed(&self, original: &str) -> bool {
		self.content != original
	}
}

/// Apply every rule in order. Each rule replaces all non-overlapping
/// matches in the output of the previous one.
pub fn apply_rules<'a>(content: &'a str, rules: &[CompiledRule]) -> Rewrite<'a> {
	let mut current: Cow<'a, str> = Cow::Borrowed(content);
	let mut replacements = 0;

	for rule in rules {
		let count = rule.count_matches(&current);
		if count == 0 {
			continue;
		}
		log::debug!("rule `{}` matched {} time(s)", rule.spec.pattern, count);

		let next = rule
			.regex
			.replace_all(&current, NoExpand(rule.spec.replacement.as_str()))
			.into_owned();
		current = Cow::Owned(next);
		replacements += count;
	}

	Rewrite {
		content: current,
		replacements,
	}
}

/// Total matches that applying `rules` in order would replace.
pub fn count_matches(content: &str, rules: &[CompiledRule]) -> usize {
	apply_rules(content, rules).replacements
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::builtin_rules;
	use crate::config::types::{RuleOrigin, RuleWithOrigin};
	use crate::rules::compiler::compile_rules;

	fn compile(specs: Vec<RuleSpec>) -> Vec<CompiledRule> {
		let rules: Vec<_> = specs
			.into_iter()
			.map(|rule| RuleWithOrigin {
				rule,
				origin: RuleOrigin::Builtin,
			})
			.collect();
		compile_rules(&rules).unwrap()
	}

	fn builtin() -> Vec<CompiledRule> {
		compile(builtin_rules())
	}

	#[test]
	fn test_parse_simple_substitution() {
		let sub = Substitution::parse("s/foo/bar/").unwrap();
		assert_eq!(sub.pattern, "foo");
		assert_eq!(sub.replacement, "bar");
	}

	#[test]
	fn test_parse_global_flag_and_missing_trailing_delimiter() {
		assert_eq!(
			Substitution::parse("s/foo/bar/g").unwrap(),
			Substitution::parse("s/foo/bar").unwrap()
		);
	}

	#[test]
	fn test_parse_different_delimiter() {
		let sub = Substitution::parse(r"s#document\.name#document.fileName#").unwrap();
		assert_eq!(sub.pattern, r"document\.name");
		assert_eq!(sub.replacement, "document.fileName");
	}

	#[test]
	fn test_parse_escaped_delimiter() {
		let sub = Substitution::parse(r"s/foo\/bar/baz/").unwrap();
		assert_eq!(sub.pattern, "foo/bar");
		assert_eq!(sub.replacement, "baz");
	}

	#[test]
	fn test_parse_keeps_regex_escapes() {
		let sub = Substitution::parse(r"s/\bfoo\b//").unwrap();
		assert_eq!(sub.pattern, r"\bfoo\b");
		assert_eq!(sub.replacement, "");
	}

	#[test]
	fn test_invalid_substitution_no_s() {
		assert!(Substitution::parse("foo/bar/").is_err());
	}

	#[test]
	fn test_invalid_substitution_too_short() {
		assert!(Substitution::parse("s").is_err());
		assert!(Substitution::parse("s/foo").is_err());
	}

	#[test]
	fn test_invalid_substitution_flags() {
		match Substitution::parse("s/foo/bar/i").unwrap_err() {
			PatchError::InvalidSubstitution { reason, .. } => {
				assert!(reason.contains("'i'"));
			}
			other => panic!("Expected InvalidSubstitution, got {other:?}"),
		}
		assert!(Substitution::parse("s/a/b/c/d").is_err());
	}

	#[test]
	fn test_invalid_substitution_empty_pattern() {
		assert!(Substitution::parse("s//bar/").is_err());
	}

	#[test]
	fn test_apply_replaces_all_matches() {
		let rules = compile(vec![RuleSpec::new("foo", "bar")]);
		let rewrite = apply_rules("foo foo foo", &rules);
		assert_eq!(rewrite.content, "bar bar bar");
		assert_eq!(rewrite.replacements, 3);
	}

	#[test]
	fn test_apply_no_match_borrows() {
		let rules = builtin();
		let input = "const x = 1;\n";
		let rewrite = apply_rules(input, &rules);
		assert!(matches!(rewrite.content, Cow::Borrowed(_)));
		assert_eq!(rewrite.replacements, 0);
		assert!(!rewrite.is_changed(input));
	}

	#[test]
	fn test_replacement_is_literal() {
		let rules = compile(vec![RuleSpec::new(r"(\w+)", "$1!")]);
		let rewrite = apply_rules("hi", &rules);
		assert_eq!(rewrite.content, "$1!");
	}

	#[test]
	fn test_later_rules_see_earlier_output() {
		let rules = compile(vec![RuleSpec::new("a", "b"), RuleSpec::new("b", "c")]);
		assert_eq!(apply_rules("ab", &rules).content, "cc");

		let reversed = compile(vec![RuleSpec::new("b", "c"), RuleSpec::new("a", "b")]);
		assert_eq!(apply_rules("ab", &reversed).content, "bc");
	}

	#[test]
	fn test_identical_replacement_is_not_a_change() {
		let rules = compile(vec![RuleSpec::new("same", "same")]);
		let input = "same";
		let rewrite = apply_rules(input, &rules);
		assert_eq!(rewrite.replacements, 1);
		assert!(!rewrite.is_changed(input));
	}

	#[test]
	fn test_builtin_match_date_renamed() {
		let input = "orderBy: { matchDate: 'asc' },\nconst d = m.matchDate;\nmatchDates\n";
		let rewrite = apply_rules(input, &builtin());
		assert_eq!(
			rewrite.content,
			"orderBy: { date: 'asc' },\nconst d = m.date;\nmatchDates\n"
		);
	}

	#[test]
	fn test_builtin_is_persistent_removed() {
		let input = "data: {\n  isPersistent: false\n  title,\n}";
		let rewrite = apply_rules(input, &builtin());
		assert_eq!(rewrite.content, "data: {\n  \n  title,\n}");
	}

	#[test]
	fn test_builtin_priority_line_deleted_with_newline() {
		let input = "data: {\n  priority: 'high',\n  title,\n}";
		let rewrite = apply_rules(input, &builtin());
		// Indentation before the deleted text stays, so the lines merge
		assert_eq!(rewrite.content, "data: {\n    title,\n}");
	}

	#[test]
	fn test_builtin_priority_swallows_blank_lines() {
		let input = "priority: HIGH\n\n\nnext";
		let rewrite = apply_rules(input, &builtin());
		assert_eq!(rewrite.content, "next");
	}

	#[test]
	fn test_builtin_document_organization_id() {
		let input = "if (document.organizationId !== orgId) {}";
		let rewrite = apply_rules(input, &builtin());
		assert_eq!(
			rewrite.content,
			"if (document.athlete.organizationId !== orgId) {}"
		);
	}

	#[test]
	fn test_builtin_transport_include_spans_newlines() {
		let input = "include: {\n    transport: true\n}";
		let rewrite = apply_rules(input, &builtin());
		assert_eq!(rewrite.content, "include: { transportZone: true\n}");
	}

	#[test]
	fn test_builtin_expiry_null_narrowed() {
		let input = "where: { expiryDate: {not: null} }";
		let rewrite = apply_rules(input, &builtin());
		assert_eq!(
			rewrite.content,
			"where: { expiryDate: { not: undefined } }"
		);
	}

	#[test]
	fn test_builtin_matches_inside_strings_and_comments() {
		let input = "// uses matchEvent\nconst s = \"matchAthlete\";";
		let rewrite = apply_rules(input, &builtin());
		assert_eq!(rewrite.content, "// uses matchStat\nconst s = \"matchRoster\";");
	}

	#[test]
	fn test_each_builtin_rule_replaces_every_match() {
		// One input per built-in rule, in rule order, matched by that rule only
		let cases: [(&str, &str); 17] = [
			("a.matchDate", "a.date"),
			("a.matchTime", "a.time"),
			("prisma.athleteTransport", "prisma.busAthlete"),
			("x.transport.id", "x.transportZone.id"),
			("include: {transport: true}", "include: { transportZone: true}"),
			("isPersistent: false,", ","),
			("isPersistent: true,", ","),
			("priority: \"low\"\nnext", "next"),
			("document.name", "document.fileName"),
			("matchAthlete", "matchRoster"),
			("matchEvent", "matchStat"),
			("where: { zones: { has: id } }", "where: { id }"),
			("busRoutes: true", "// busRoutes: true"),
			("_count.transports", "_count.busAthletes"),
			("route.transports", "route.busAthletes"),
			("document.organizationId", "document.athlete.organizationId"),
			("expiryDate: { not: null }", "expiryDate: { not: undefined }"),
		];
		let rules = builtin();
		assert_eq!(rules.len(), cases.len());

		for (k, (input, expected)) in cases.iter().enumerate() {
			let doubled = format!("{input} | {input}");
			for (i, rule) in rules.iter().enumerate() {
				let expected_count = if i == k { 2 } else { 0 };
				assert_eq!(
					rule.count_matches(&doubled),
					expected_count,
					"rule {} on input for rule {}",
					i + 1,
					k + 1
				);
			}

			let rewrite = apply_rules(&doubled, &rules);
			assert_eq!(rewrite.replacements, 2, "rule {}", k + 1);
			assert_eq!(
				rewrite.content,
				format!("{expected} | {expected}"),
				"rule {}",
				k + 1
			);
		}
	}

	#[test]
	fn test_bus_routes_comment_is_not_idempotent() {
		let rules = builtin();
		let once = apply_rules("busRoutes: true", &rules).content.into_owned();
		assert_eq!(once, "// busRoutes: true");

		let twice = apply_rules(&once, &rules).content.into_owned();
		assert_eq!(twice, "// // busRoutes: true");
	}

	#[test]
	fn test_builtin_is_idempotent() {
		let input = "const a = m.matchDate + m.matchTime;\n\
			await prisma.athleteTransport.findMany({ include: { transport: true } });\n\
			x.transport.name;\n\
			document.name; document.organizationId;\n\
			where: { expiryDate: { not: null } }\n\
			route.transports; _count.transports;\n";
		let rules = builtin();
		let once = apply_rules(input, &rules).content.into_owned();
		assert_ne!(once, input);

		let twice = apply_rules(&once, &rules);
		assert_eq!(twice.replacements, 0);
		assert_eq!(twice.content, once);
	}

	#[test]
	fn test_count_matches_follows_application_order() {
		let rules = compile(vec![RuleSpec::new("a", "b"), RuleSpec::new("b", "c")]);
		// "a" matches once, then "b" matches twice in "bb"
		assert_eq!(count_matches("ab", &rules), 3);
	}
}
