//! The rule set shipped with tsfix.
//!
//! These patch up code written against the pre-migration schema: renamed
//! match, transport and document fields, and notification options that no
//! longer exist.

use crate::config::types::RuleSpec;

/// Directory patched when neither the command line nor a config file names one.
pub const DEFAULT_ROOT: &str = "backend/src";

/// Suffix of files patched by default.
pub const DEFAULT_SUFFIX: &str = ".ts";

/// (pattern, replacement, description), in application order.
const BUILTIN_RULES: &[(&str, &str, &str)] = &[
	(r"\bmatchDate\b", "date", "Match.matchDate renamed to date"),
	(r"\bmatchTime\b", "time", "Match.matchTime renamed to time"),
	(
		r"\bathleteTransport\b",
		"busAthlete",
		"athleteTransport model renamed to busAthlete",
	),
	(
		r"\.transport\.",
		".transportZone.",
		"transport relation renamed to transportZone",
	),
	(
		r"include:\s*\{\s*transport:",
		"include: { transportZone:",
		"transport include renamed to transportZone",
	),
	(
		r"\bisPersistent:\s*false\b",
		"",
		"Notification.isPersistent removed",
	),
	(
		r"\bisPersistent:\s*true\b",
		"",
		"Notification.isPersistent removed",
	),
	(
		r#"\bpriority:\s*['"]?\w+['"]?,?\s*\n"#,
		"",
		"Notification.priority removed, line included",
	),
	(
		r"document\.name",
		"document.fileName",
		"Document.name renamed to fileName",
	),
	(
		r"\bmatchAthlete\b",
		"matchRoster",
		"matchAthlete model renamed to matchRoster",
	),
	(
		r"\bmatchEvent\b",
		"matchStat",
		"matchEvent model renamed to matchStat",
	),
	(
		r"zones:\s*\{\s*has:\s*id\s*\}",
		"id",
		"zones filter collapsed to id",
	),
	(
		r"busRoutes:",
		"// busRoutes:",
		"busRoutes relation no longer exists",
	),
	(
		r"_count\.transports",
		"_count.busAthletes",
		"transports count renamed to busAthletes",
	),
	(
		r"route\.transports",
		"route.busAthletes",
		"route.transports renamed to busAthletes",
	),
	(
		r"document\.organizationId",
		"document.athlete.organizationId",
		"Document.organizationId moved under athlete",
	),
	// Narrows a null check to an undefined check.
	(
		r"expiryDate:\s*\{\s*not:\s*null\s*\}",
		"expiryDate: { not: undefined }",
		"expiryDate null filter rewritten",
	),
];

/// The built-in rules, in application order.
pub fn builtin_rules() -> Vec<RuleSpec> {
	BUILTIN_RULES
		.iter()
		.map(|(pattern, replacement, description)| RuleSpec {
			pattern: (*pattern).to_string(),
			replacement: (*replacement).to_string(),
			description: Some((*description).to_string()),
		})
		.collect()
}
