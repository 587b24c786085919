//! String helpers: property-name casing and class token handling

use super::flat_map;

/// `font-size` -> `fontSize`
///
/// A hyphen followed by a word character (`[A-Za-z0-9_]`) is dropped and the
/// character uppercased; any other hyphen is kept.
pub fn camelize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut chars = name.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '-' {
            if let Some(&next) = chars.peek() {
                if next.is_ascii_alphanumeric() || next == '_' {
                    out.push(next.to_ascii_uppercase());
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }
    out
}

pub fn trim(s: &str) -> &str {
    s.trim()
}

/// Space-separated class string to its non-empty tokens
pub fn split_class(s: &str) -> Vec<&str> {
    s.split(' ').map(trim).filter(|t| !t.is_empty()).collect()
}

/// One class argument: a (possibly multi-token) string or a list of them
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassArg {
    Names(String),
    List(Vec<String>),
}

impl From<&str> for ClassArg {
    fn from(s: &str) -> Self {
        Self::Names(s.to_string())
    }
}

impl From<String> for ClassArg {
    fn from(s: String) -> Self {
        Self::Names(s)
    }
}

impl From<&String> for ClassArg {
    fn from(s: &String) -> Self {
        Self::Names(s.clone())
    }
}

impl From<Vec<&str>> for ClassArg {
    fn from(list: Vec<&str>) -> Self {
        Self::List(list.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for ClassArg {
    fn from(list: Vec<String>) -> Self {
        Self::List(list)
    }
}

impl From<&[&str]> for ClassArg {
    fn from(list: &[&str]) -> Self {
        Self::List(list.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ClassArg {
    fn from(list: [&str; N]) -> Self {
        Self::List(list.iter().map(|s| s.to_string()).collect())
    }
}

/// Flatten class arguments into an ordered token sequence
pub fn merge_class(args: &[ClassArg]) -> Vec<String> {
    flat_map(args, |arg, _| match arg {
        ClassArg::Names(names) => split_class(names).into_iter().map(str::to_string).collect::<Vec<_>>(),
        ClassArg::List(list) => list
            .iter()
            .flat_map(|names| split_class(names))
            .map(str::to_string)
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camelize() {
        assert_eq!(camelize("font-size"), "fontSize");
        assert_eq!(camelize("background-color"), "backgroundColor");
        assert_eq!(camelize("fontSize"), "fontSize");
        assert_eq!(camelize("-webkit-transition"), "WebkitTransition");
        assert_eq!(camelize("--custom-color"), "-CustomColor");
        assert_eq!(camelize("trailing-"), "trailing-");
    }

    #[test]
    fn test_camelize_round_trips_through_hyphenate() {
        for name in ["font-size", "border-top-left-radius", "--custom-color", "-webkit-transition"] {
            assert_eq!(zedom_dom::hyphenate(&camelize(name)), name);
        }
    }

    #[test]
    fn test_split_class() {
        assert_eq!(split_class("  a  b "), vec!["a", "b"]);
        assert!(split_class("").is_empty());
        assert!(split_class("   ").is_empty());
    }

    #[test]
    fn test_merge_class() {
        let args = [ClassArg::from("a b"), ClassArg::from(["c", " d  e "]), ClassArg::from("")];
        assert_eq!(merge_class(&args), vec!["a", "b", "c", "d", "e"]);
    }
}
