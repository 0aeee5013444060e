use crate::db::models::{Feedback, Rule};
use std::fmt::Write;

pub const RULES_HEADER: &str = "Dodatkowe zasady, których należy przestrzegać:\n";
pub const FEEDBACKS_HEADER: &str = "Noted Feedbacks:";

/// Build the completion payload.
///
/// Layout: `template`, `input` (both verbatim, no separator), the rules
/// section and the feedback section. Each section numbers its lines from 1
/// independently of stored ids, in the order the rows are given.
pub fn assemble(template: &str, input: &str, rules: &[Rule], feedbacks: &[Feedback]) -> String {
    let mut out = String::with_capacity(
        template.len() + input.len() + RULES_HEADER.len() + FEEDBACKS_HEADER.len(),
    );
    out.push_str(template);
    out.push_str(input);

    out.push_str(RULES_HEADER);
    for (idx, rule) in rules.iter().enumerate() {
        // writing into a String cannot fail
        let _ = writeln!(out, "Sprawa {}: {} -> {}", idx + 1, rule.case, rule.instruction);
    }

    out.push_str(FEEDBACKS_HEADER);
    for (idx, entry) in feedbacks.iter().enumerate() {
        let _ = writeln!(out, "Sprawa {}: {}", idx + 1, entry.feedback);
    }
    out
}
