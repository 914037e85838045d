//! Rule compilation and application for tsfix.
//!
//! This module handles:
//! - Compiling rule patterns into regexes
//! - Parsing sed-like `--expr` substitutions
//! - Applying a rule set to file content in order

pub mod compiler;
pub mod rewriter;

pub use compiler::{CompiledRule, RuleSet, compile_rules};
pub use rewriter::{Rewrite, Substitution, apply_rules, count_matches};
