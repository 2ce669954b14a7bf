//! Rendering of scenario contents into failure diagnostics.
//!
//! Reports are assembled from the `Debug` renderings captured when each
//! argument was recorded, so building and displaying one is pure string
//! work and cannot fail: a report must never crash the failing test it is
//! trying to explain.

use std::{
    collections::HashMap,
    fmt::{self, Formatter},
    sync::Arc,
};

use crate::{invocation::Invocation, scenario::Expected};

/// Argument renderings longer than this (in characters, not bytes) are
/// moved out of the invocation line and into the report's legend,
/// replaced inline by a generated name such as `string1`.
pub const MAX_INLINE_VALUE_LENGTH: usize = 20;

/// A snapshot of a [`Scenario`](crate::Scenario) rendered for humans.
///
/// The `Display` output has up to four sections:
///
/// * the observed invocations, numbered in call order, each with its call
///   site;
/// * a legend expanding the generated names of oversized values;
/// * the registered expectations no observed call satisfied;
/// * the observed calls no registered expectation accepts.
pub struct ScenarioReport {
    observed: Vec<String>,
    legend: Vec<(String, String)>,
    missing: Vec<String>,
    unexpected: Vec<usize>,
}

impl ScenarioReport {
    pub(crate) fn new(invocations: &[Arc<Invocation>], expected: &[Expected]) -> Self {
        let mut namer = ValueNamer::default();
        let index_width = invocations.len().to_string().len() + 2;

        let observed = invocations
            .iter()
            .enumerate()
            .map(|(index, invocation)| {
                let args = invocation
                    .args()
                    .iter()
                    .map(|arg| namer.render(arg))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "{:<index_width$}{}.{}({})  .....  at {}",
                    format!("{}.", index + 1),
                    invocation.target(),
                    invocation.method(),
                    args,
                    invocation.location(),
                )
            })
            .collect();

        let missing = expected
            .iter()
            .filter(|expected| {
                !invocations.iter().any(|invocation| {
                    invocation.target() == expected.target
                        && expected.matcher.matches(invocation)
                })
            })
            .map(|expected| {
                let cardinality = if expected.one_time { "  [once]" } else { "" };
                format!("{}.{}{}", expected.target, expected.matcher, cardinality)
            })
            .collect();

        let unexpected = invocations
            .iter()
            .enumerate()
            .filter(|(_, invocation)| {
                !expected.iter().any(|expected| {
                    expected.target == invocation.target()
                        && expected.matcher.matches(invocation)
                })
            })
            .map(|(index, _)| index)
            .collect();

        ScenarioReport {
            observed,
            legend: namer.legend,
            missing,
            unexpected,
        }
    }
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("Observed scenario:\n\n")?;
        if self.observed.is_empty() {
            f.write_str("  <none>\n")?;
        }
        self.observed
            .iter()
            .try_for_each(|line| writeln!(f, "{}", line))?;

        if !self.legend.is_empty() {
            f.write_str("\n")?;
            self.legend
                .iter()
                .try_for_each(|(name, representation)| {
                    writeln!(f, "{} : {}", name, representation)
                })?;
        }

        if !self.missing.is_empty() {
            f.write_str("\nExpected, but not invoked:\n\n")?;
            self.missing
                .iter()
                .try_for_each(|line| writeln!(f, "{}", line))?;
        }

        if !self.unexpected.is_empty() {
            f.write_str("\nUnexpected invocations:\n\n")?;
            self.unexpected
                .iter()
                .filter_map(|&index| self.observed.get(index))
                .try_for_each(|line| writeln!(f, "{}", line))?;
        }

        Ok(())
    }
}

/// Replaces oversized value renderings with short generated names.
///
/// Names are derived from the value's type (`string1`, `vec2`, ...);
/// equal renderings of the same type reuse the name they were first
/// assigned so a repeated large value reads as the same thing throughout
/// the report.
#[derive(Default)]
struct ValueNamer {
    assigned: HashMap<(&'static str, String), String>,
    counters: HashMap<String, usize>,
    legend: Vec<(String, String)>,
}

impl ValueNamer {
    fn render(&mut self, arg: &crate::invocation::Arg) -> String {
        let repr = arg.repr();
        if repr.chars().count() <= MAX_INLINE_VALUE_LENGTH {
            return repr.to_string();
        }

        let key = (arg.type_name(), repr.to_string());
        if let Some(name) = self.assigned.get(&key) {
            return name.clone();
        }

        let base = short_type_name(arg.type_name());
        let counter = self.counters.entry(base.clone()).or_insert(0);
        *counter += 1;
        let name = format!("{}{}", base, counter);

        self.legend.push((name.clone(), repr.to_string()));
        self.assigned.insert(key, name.clone());
        name
    }
}

// "alloc::string::String" => "string", "Vec<i32>" => "vec", "&str" => "str"
fn short_type_name(full: &str) -> String {
    let base = full.split('<').next().unwrap_or(full);
    let base = base.rsplit("::").next().unwrap_or(base);
    let base = base.trim_start_matches(|c| c == '&' || c == '[' || c == '(');
    let mut chars = base.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => "value".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_drop_paths_and_generics() {
        assert_eq!(short_type_name("alloc::string::String"), "string");
        assert_eq!(short_type_name("alloc::vec::Vec<i32>"), "vec");
        assert_eq!(short_type_name("&str"), "str");
        assert_eq!(short_type_name("i32"), "i32");
        assert_eq!(short_type_name(""), "value");
    }

    #[test]
    fn namer_keeps_small_values_inline() {
        let mut namer = ValueNamer::default();
        // 18 characters renders inline untouched
        let value = "x".repeat(16); // plus 2 quote characters in Debug form
        let arg = crate::Arg::of(value.clone());
        assert_eq!(arg.repr().len(), 18);
        assert_eq!(namer.render(&arg), format!("{:?}", value));
        assert!(namer.legend.is_empty());
    }

    #[test]
    fn namer_replaces_large_values_and_reuses_names() {
        let mut namer = ValueNamer::default();
        let value = "y".repeat(23);
        let arg = crate::Arg::of(value.clone());
        assert_eq!(arg.repr().len(), 25);

        assert_eq!(namer.render(&arg), "string1");
        // same rendering, same name; no duplicate legend entry
        assert_eq!(namer.render(&crate::Arg::of(value.clone())), "string1");
        assert_eq!(namer.legend.len(), 1);
        assert_eq!(namer.legend[0], ("string1".to_string(), format!("{:?}", value)));

        // a different large value of the same type gets the next index
        let other = "z".repeat(30);
        assert_eq!(namer.render(&crate::Arg::of(other)), "string2");
    }
}
