//! The CSS `An+B` micro-grammar (`:nth-child(An+B)` and friends),
//! implemented in full rather than special-casing `odd`/`even`/plain
//! integers only.

use crate::error::DomError;

/// A parsed `An+B` expression: matches 1-based index `i` when
/// `i == a*n + b` for some non-negative integer `n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnB {
    /// The step coefficient.
    pub a: i32,
    /// The offset.
    pub b: i32,
}

impl AnB {
    /// Whether 1-based position `index` matches this formula.
    #[must_use]
    pub fn matches(self, index: i32) -> bool {
        if self.a == 0 {
            return index == self.b;
        }
        let n = (index - self.b) as f64 / self.a as f64;
        n >= 0.0 && n.fract() == 0.0
    }
}

/// Parses an `An+B` expression per the CSS Syntax grammar: `odd`, `even`,
/// a bare integer, or `<n>n`/`-n`/`+n` optionally followed by
/// whitespace-surrounded `+`/`-` and an integer, e.g. `2n+1`, `-n+6`,
/// `n`, `3n`.
pub fn parse_an_b(input: &str) -> Result<AnB, DomError> {
    let s = input.trim();
    match s {
        "odd" => return Ok(AnB { a: 2, b: 1 }),
        "even" => return Ok(AnB { a: 2, b: 0 }),
        _ => {}
    }
    if let Ok(b) = s.parse::<i32>() {
        return Ok(AnB { a: 0, b });
    }

    let lower = s.to_ascii_lowercase();
    let n_pos = lower.find('n').ok_or(DomError::InvalidCharacterError)?;
    let (a_part, rest) = lower.split_at(n_pos);
    let rest = &rest[1..]; // drop the 'n'

    let a = match a_part {
        "" | "+" => 1,
        "-" => -1,
        other => other.parse::<i32>().map_err(|_| DomError::InvalidCharacterError)?,
    };

    let b_part = rest.trim();
    let b = if b_part.is_empty() {
        0
    } else {
        let b_part: String = b_part.chars().filter(|c| !c.is_whitespace()).collect();
        b_part.parse::<i32>().map_err(|_| DomError::InvalidCharacterError)?
    };

    Ok(AnB { a, b })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keywords() {
        assert_eq!(parse_an_b("odd").unwrap(), AnB { a: 2, b: 1 });
        assert_eq!(parse_an_b("even").unwrap(), AnB { a: 2, b: 0 });
    }

    #[test]
    fn parses_plain_integer() {
        assert_eq!(parse_an_b("3").unwrap(), AnB { a: 0, b: 3 });
    }

    #[test]
    fn parses_an_plus_b_forms() {
        assert_eq!(parse_an_b("2n+1").unwrap(), AnB { a: 2, b: 1 });
        assert_eq!(parse_an_b("-n+6").unwrap(), AnB { a: -1, b: 6 });
        assert_eq!(parse_an_b("n").unwrap(), AnB { a: 1, b: 0 });
        assert_eq!(parse_an_b("3n").unwrap(), AnB { a: 3, b: 0 });
        assert_eq!(parse_an_b("2n - 1").unwrap(), AnB { a: 2, b: -1 });
    }

    #[test]
    fn matches_formula_correctly() {
        let odd = AnB { a: 2, b: 1 };
        assert!(odd.matches(1));
        assert!(!odd.matches(2));
        assert!(odd.matches(5));
    }
}
