use std::{collections::BTreeMap, fmt};

use serde::{Deserialize, Serialize};

/// A stored answer value.
///
/// The shape depends on the question type: scalars for simple questions, a
/// list for multi-select questions and a keyed mapping for matrix and ranking
/// questions. Analyses never look at the raw value directly; they go through
/// [`Answer::as_number`] or [`Answer::as_category`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(untagged)]
pub enum Answer {
    Null,
    Flag(bool),
    Number(f64),
    Text(String),
    List(Vec<Answer>),
    Map(BTreeMap<String, Answer>),
}

impl Answer {
    /// Numeric projection.
    ///
    /// Numbers are returned as is. Text is converted with the same rules as
    /// JavaScript's `Number()` (see [`coerce_number`]). Every other shape has
    /// no numeric value.
    ///
    /// # Examples
    ///
    /// ```
    /// # use canvass_model::Answer;
    /// assert_eq!(Answer::Number(4.0).as_number(), Some(4.0));
    /// assert_eq!(Answer::Text(" 12 ".into()).as_number(), Some(12.0));
    /// assert_eq!(Answer::Text("twelve".into()).as_number(), None);
    /// assert_eq!(Answer::Flag(true).as_number(), None);
    /// ```
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(text) => coerce_number(text),
            Self::Null | Self::Flag(_) | Self::List(_) | Self::Map(_) => None,
        }
    }

    /// Categorical projection: a non-empty text answer.
    #[must_use]
    pub fn as_category(&self) -> Option<&str> {
        match self {
            Self::Text(text) if !text.is_empty() => Some(text),
            _ => None,
        }
    }

    /// Whether the answer counts as "given" when tallying answers.
    ///
    /// `null`, `false`, `0`, `NaN` and the empty string are not.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Flag(flag) => *flag,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(text) => !text.is_empty(),
            Self::List(_) | Self::Map(_) => true,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Flag(flag) => write!(f, "{flag}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(text) => f.write_str(text),
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
            Self::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<f64> for Answer {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for Answer {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<&str> for Answer {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Answer {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Converts text to a number following JavaScript's `Number()` rules.
///
/// - surrounding whitespace is ignored and blank text is `0`
/// - `0x`, `0o` and `0b` prefixes denote unsigned integer literals
/// - `Infinity` is accepted with an optional sign
/// - otherwise the text must be a decimal literal with an optional exponent
///
/// Returns `None` where `Number()` would produce `NaN`.
///
/// # Examples
///
/// ```
/// # use canvass_model::answer::coerce_number;
/// assert_eq!(coerce_number("3.5"), Some(3.5));
/// assert_eq!(coerce_number(""), Some(0.0));
/// assert_eq!(coerce_number("0x1A"), Some(26.0));
/// assert_eq!(coerce_number("1e3"), Some(1000.0));
/// assert_eq!(coerce_number("inf"), None);
/// assert_eq!(coerce_number("12px"), None);
/// ```
#[must_use]
pub fn coerce_number(text: &str) -> Option<f64> {
    let text = text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if text.is_empty() {
        return Some(0.0);
    }
    if let Some(value) = parse_prefixed_integer(text) {
        return value;
    }
    match text {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    // `f64::from_str` also accepts "inf" and "nan", which are not numbers here
    let is_decimal = text
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'));
    if !is_decimal {
        return None;
    }
    text.parse().ok()
}

/// Returns `None` if `text` has no radix prefix, `Some(None)` if the digits are invalid.
fn parse_prefixed_integer(text: &str) -> Option<Option<f64>> {
    let radix = match text.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &text[2..];
    if digits.is_empty() {
        return Some(None);
    }
    Some(digits.chars().try_fold(0.0, |acc: f64, c| {
        c.to_digit(radix)
            .map(|d| acc * f64::from(radix) + f64::from(d))
    }))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_deserialize_shapes() {
        let answers: Vec<Answer> = serde_json::from_value(json!([
            null,
            true,
            4,
            "Yes",
            ["Red", "Blue"],
            { "Speed": 1, "Price": 2 }
        ]))
        .unwrap();
        assert!(answers[0].is_null());
        assert_eq!(answers[1], Answer::Flag(true));
        assert_eq!(answers[2], Answer::Number(4.0));
        assert_eq!(answers[3], Answer::from("Yes"));
        assert!(answers[4].is_list());
        let Answer::Map(ranking) = &answers[5] else {
            panic!("expected a map, got {:?}", answers[5]);
        };
        assert_eq!(ranking["Price"], Answer::Number(2.0));
    }

    #[test]
    fn test_coerce_number_decimal_forms() {
        assert_eq!(coerce_number("42"), Some(42.0));
        assert_eq!(coerce_number("-7"), Some(-7.0));
        assert_eq!(coerce_number("+7"), Some(7.0));
        assert_eq!(coerce_number(".5"), Some(0.5));
        assert_eq!(coerce_number("5."), Some(5.0));
        assert_eq!(coerce_number("2.5E-1"), Some(0.25));
        assert_eq!(coerce_number("\t 8 \n"), Some(8.0));
        assert_eq!(coerce_number("   "), Some(0.0));
    }

    #[test]
    fn test_coerce_number_special_forms() {
        assert_eq!(coerce_number("0b101"), Some(5.0));
        assert_eq!(coerce_number("0o17"), Some(15.0));
        assert_eq!(coerce_number("0XfF"), Some(255.0));
        assert_eq!(coerce_number("0x"), None);
        assert_eq!(coerce_number("0b102"), None);
        assert_eq!(coerce_number("-0x10"), None);
        assert_eq!(coerce_number("Infinity"), Some(f64::INFINITY));
        assert_eq!(coerce_number("-Infinity"), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn test_coerce_number_rejections() {
        for text in ["abc", "NaN", "nan", "inf", "infinity", ".", "e5", "1e", "1_000", "1,5", "--1"] {
            assert_eq!(coerce_number(text), None, "{text:?} should not be a number");
        }
    }

    #[test]
    fn test_as_category() {
        assert_eq!(Answer::from("Sales").as_category(), Some("Sales"));
        assert_eq!(Answer::from("").as_category(), None);
        assert_eq!(Answer::Number(1.0).as_category(), None);
        assert_eq!(Answer::List(vec![Answer::from("A")]).as_category(), None);
    }

    #[test]
    fn test_truthiness() {
        assert!(!Answer::Null.is_truthy());
        assert!(!Answer::Flag(false).is_truthy());
        assert!(!Answer::Number(0.0).is_truthy());
        assert!(!Answer::from("").is_truthy());
        assert!(Answer::Number(3.0).is_truthy());
        assert!(Answer::from("0").is_truthy());
        assert!(Answer::List(vec![]).is_truthy());
    }

    #[test]
    fn test_display_matches_tally_keys() {
        assert_eq!(Answer::Number(4.0).to_string(), "4");
        assert_eq!(Answer::Number(4.5).to_string(), "4.5");
        assert_eq!(Answer::Flag(true).to_string(), "true");
        assert_eq!(
            Answer::List(vec![Answer::from("A"), Answer::Number(2.0)]).to_string(),
            "A,2"
        );
    }
}
