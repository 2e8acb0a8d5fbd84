//! Version range constraints.
//!
//! # Grammar
//! ```text
//! constraint  := alternative ( "||" alternative )*
//! alternative := comparator ( [","] comparator )*     AND
//! comparator  := [op] version | version " - " version | wildcard
//! op          := "=" | ">" | ">=" | "<" | "<=" | "~" | "^"
//! ```
//!
//! # Design Decisions
//! - A bare version is an equality on the components given: `2` is any
//!   `2.x.y`, `1.2` is any `1.2.x`, `1.2.3` is exact
//! - Comparator evaluation is delegated to `semver::VersionReq`
//! - The bound (highest version a constraint names) drives evaluation order

use std::fmt;

use semver::VersionReq;

use crate::versioning::error::SetupError;
use crate::versioning::version::ApiVersion;

const OPERATOR_CHARS: &[char] = &['=', '>', '<', '~', '^'];

/// A compiled, immutable version range predicate.
#[derive(Debug, Clone)]
pub struct Constraint {
    expression: String,
    alternatives: Vec<VersionReq>,
    bound: ApiVersion,
}

impl Constraint {
    /// Compile a textual constraint expression.
    pub fn compile(expression: &str) -> Result<Self, SetupError> {
        let invalid = |reason: String| SetupError::InvalidConstraintExpression {
            expression: expression.to_string(),
            reason,
        };

        let mut alternatives = Vec::new();
        for alternative in expression.split("||") {
            let normalized = normalize(alternative).map_err(invalid)?;
            let req = VersionReq::parse(&normalized).map_err(|e| invalid(e.to_string()))?;
            alternatives.push(req);
        }

        let bound = alternatives
            .iter()
            .flat_map(|req| req.comparators.iter())
            .map(|c| ApiVersion::new(c.major, c.minor.unwrap_or(0), c.patch.unwrap_or(0)))
            .max()
            .unwrap_or_else(|| ApiVersion::new(0, 0, 0));

        Ok(Self {
            expression: expression.to_string(),
            alternatives,
            bound,
        })
    }

    /// Returns true if the version satisfies any alternative.
    pub fn matches(&self, version: &ApiVersion) -> bool {
        self.alternatives
            .iter()
            .any(|req| req.matches(version.as_semver()))
    }

    /// Highest version named by any comparator. `*` has bound `0.0.0`.
    pub fn bound(&self) -> &ApiVersion {
        &self.bound
    }

    /// Expression as originally written.
    pub fn expression(&self) -> &str {
        &self.expression
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, req) in self.alternatives.iter().enumerate() {
            if i > 0 {
                f.write_str(" || ")?;
            }
            write!(f, "{}", req)?;
        }
        Ok(())
    }
}

impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        self.alternatives == other.alternatives
    }
}

impl Eq for Constraint {}

/// Rewrite one alternative into the comma-separated form `VersionReq` reads.
fn normalize(alternative: &str) -> Result<String, String> {
    let raw = alternative.replace(',', " ");
    let mut tokens: Vec<String> = Vec::new();
    let mut pending_op = String::new();

    for token in raw.split_whitespace() {
        if token.chars().all(|c| OPERATOR_CHARS.contains(&c)) {
            pending_op.push_str(token);
            continue;
        }
        tokens.push(format!("{}{}", std::mem::take(&mut pending_op), token));
    }
    if !pending_op.is_empty() {
        return Err(format!("dangling operator {pending_op:?}"));
    }
    if tokens.is_empty() {
        return Err("empty constraint".to_string());
    }

    let mut comparators = Vec::with_capacity(tokens.len());
    let mut i = 0;
    while i < tokens.len() {
        if tokens.get(i + 1).map(String::as_str) == Some("-") {
            let upper = tokens
                .get(i + 2)
                .ok_or_else(|| "hyphen range without upper bound".to_string())?;
            comparators.push(format!(">={}", strip_v(&tokens[i])));
            comparators.push(format!("<={}", strip_v(upper)));
            i += 3;
            continue;
        }
        comparators.push(bare_to_exact(&tokens[i]));
        i += 1;
    }

    Ok(comparators.join(", "))
}

fn strip_v(token: &str) -> &str {
    match token.strip_prefix(&['v', 'V'][..]) {
        Some(rest) if rest.starts_with(|c: char| c.is_ascii_digit()) => rest,
        _ => token,
    }
}

/// `2` → `=2`; operators and wildcards are left alone.
fn bare_to_exact(token: &str) -> String {
    let token = strip_v(token);
    let is_bare = token.starts_with(|c: char| c.is_ascii_digit())
        && !token.contains(&['*', 'x', 'X'][..]);
    if is_bare {
        format!("={token}")
    } else {
        token.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> ApiVersion {
        ApiVersion::parse(s).unwrap()
    }

    #[test]
    fn test_bare_major_matches_whole_major() {
        let c = Constraint::compile("2").unwrap();
        assert!(c.matches(&v("2")));
        assert!(c.matches(&v("2.9.1")));
        assert!(!c.matches(&v("1.9")));
        assert!(!c.matches(&v("3")));
    }

    #[test]
    fn test_bare_full_version_is_exact() {
        let c = Constraint::compile("1.2.3").unwrap();
        assert!(c.matches(&v("1.2.3")));
        assert!(!c.matches(&v("1.2.4")));

        let c = Constraint::compile("1.2").unwrap();
        assert!(c.matches(&v("1.2.7")));
        assert!(!c.matches(&v("1.3")));
    }

    #[test]
    fn test_comparison_operators() {
        let c = Constraint::compile(">=1").unwrap();
        assert!(c.matches(&v("1")));
        assert!(c.matches(&v("1.2")));
        assert!(c.matches(&v("7")));
        assert!(!c.matches(&v("0.9")));

        let c = Constraint::compile("> 1.2").unwrap();
        assert!(c.matches(&v("1.3")));
        assert!(!c.matches(&v("1.2.5")));

        let c = Constraint::compile("<2").unwrap();
        assert!(c.matches(&v("1.99")));
        assert!(!c.matches(&v("2")));

        let c = Constraint::compile("^1").unwrap();
        assert!(c.matches(&v("1.4")));
        assert!(!c.matches(&v("2")));
    }

    #[test]
    fn test_combinations() {
        for expr in [">=1, <3", ">=1 <3", ">= 1 , < 3"] {
            let c = Constraint::compile(expr).unwrap();
            assert!(c.matches(&v("2.5")), "{expr}");
            assert!(!c.matches(&v("3")), "{expr}");
            assert!(!c.matches(&v("0.1")), "{expr}");
        }

        let c = Constraint::compile("1 || 3").unwrap();
        assert!(c.matches(&v("1.1")));
        assert!(c.matches(&v("3")));
        assert!(!c.matches(&v("2")));

        let c = Constraint::compile("1 - 2").unwrap();
        assert!(c.matches(&v("1")));
        assert!(c.matches(&v("2.4")));
        assert!(!c.matches(&v("3")));
    }

    #[test]
    fn test_canonical_form() {
        assert_eq!(Constraint::compile("2").unwrap().to_string(), "=2");
        assert_eq!(Constraint::compile(">= 1").unwrap().to_string(), ">=1");
        assert_eq!(Constraint::compile(">=1 <3").unwrap().to_string(), ">=1, <3");
        assert_eq!(Constraint::compile("1 || 3").unwrap().to_string(), "=1 || =3");
        assert_eq!(Constraint::compile("v1 - v2").unwrap().to_string(), ">=1, <=2");
        assert_eq!(Constraint::compile("2").unwrap(), Constraint::compile("=2").unwrap());
    }

    #[test]
    fn test_bound() {
        assert_eq!(Constraint::compile("3").unwrap().bound(), &v("3"));
        assert_eq!(Constraint::compile(">=1").unwrap().bound(), &v("1"));
        assert_eq!(Constraint::compile(">=1, <3").unwrap().bound(), &v("3"));
        assert_eq!(Constraint::compile("1.4 || 1.10").unwrap().bound(), &v("1.10"));
        assert_eq!(Constraint::compile("*").unwrap().bound(), &v("0"));
    }

    #[test]
    fn test_invalid_expressions() {
        for expr in ["", "   ", ">=", "abc", "1 -", ">=1 ||", "1.2.3.4"] {
            assert!(
                matches!(
                    Constraint::compile(expr),
                    Err(SetupError::InvalidConstraintExpression { .. })
                ),
                "{expr:?} should fail"
            );
        }
    }
}
