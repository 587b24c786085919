//! ClassList (DOMTokenList over the `class` attribute)
//!
//! Tokens are ASCII-whitespace separated. The list is a set: adding an
//! existing token is a no-op and new tokens go to the end.

/// Token list backing `Element.classList`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    /// Create empty token list
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a class attribute value; duplicate tokens collapse
    pub fn from_string(s: &str) -> Self {
        let mut list = Self::new();
        for token in s.split_ascii_whitespace() {
            list.push_unique(token);
        }
        list
    }

    fn push_unique(&mut self, token: &str) {
        if !token.is_empty() && !self.contains(token) {
            self.tokens.push(token.to_string());
        }
    }

    /// Get number of tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Get token at index
    pub fn item(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(|s| s.as_str())
    }

    /// Check if token exists
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Add token(s)
    pub fn add<S: AsRef<str>>(&mut self, tokens: &[S]) {
        for token in tokens {
            self.push_unique(token.as_ref());
        }
    }

    /// Remove token(s); survivors keep their order
    pub fn remove<S: AsRef<str>>(&mut self, tokens: &[S]) {
        self.tokens
            .retain(|t| !tokens.iter().any(|r| r.as_ref() == t.as_str()));
    }

    /// Get value as string
    pub fn value(&self) -> String {
        self.tokens.join(" ")
    }

    /// Iterate over tokens
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(|s| s.as_str())
    }
}

impl std::fmt::Display for ClassList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value())
    }
}
