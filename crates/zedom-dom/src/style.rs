//! Inline style declaration (`Element.style`)
//!
//! Declarations are kept in source order under their hyphenated property
//! name. Scripted access uses camelCase names (`backgroundColor`), which
//! map back onto the hyphenated form.

/// Single inline declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleDeclaration {
    pub property: String,
    pub value: String,
    pub important: bool,
}

/// Live inline style of an element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssStyleDeclaration {
    declarations: Vec<StyleDeclaration>,
}

impl CssStyleDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the text of a `style` attribute. Malformed entries are skipped.
    pub fn parse(css_text: &str) -> Self {
        let mut style = Self::new();
        for entry in split_declarations(css_text) {
            let Some((name, value)) = entry.split_once(':') else {
                continue;
            };
            let name = normalize_property(name.trim());
            let mut value = value.trim();
            let mut important = false;
            if let Some(stripped) = strip_important(value) {
                value = stripped;
                important = true;
            }
            if name.is_empty() || value.is_empty() {
                continue;
            }
            style.set(name, value.to_string(), important);
        }
        style
    }

    fn set(&mut self, property: String, value: String, important: bool) {
        if let Some(decl) = self.declarations.iter_mut().find(|d| d.property == property) {
            decl.value = value;
            decl.important = important;
        } else {
            self.declarations.push(StyleDeclaration { property, value, important });
        }
    }

    /// Number of declarations
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StyleDeclaration> {
        self.declarations.iter()
    }

    /// Value of a hyphenated property, empty string when unset
    pub fn get_property_value(&self, property: &str) -> &str {
        let property = normalize_property(property);
        self.declarations
            .iter()
            .find(|d| d.property == property)
            .map(|d| d.value.as_str())
            .unwrap_or("")
    }

    /// `"important"` when the property carries `!important`
    pub fn get_property_priority(&self, property: &str) -> &str {
        let property = normalize_property(property);
        match self.declarations.iter().find(|d| d.property == property) {
            Some(d) if d.important => "important",
            _ => "",
        }
    }

    /// Set a hyphenated property; an empty value removes it
    pub fn set_property(&mut self, property: &str, value: &str) {
        let property = normalize_property(property);
        let value = value.trim();
        if value.is_empty() {
            self.declarations.retain(|d| d.property != property);
            return;
        }
        match strip_important(value) {
            Some(stripped) => self.set(property, stripped.to_string(), true),
            None => self.set(property, value.to_string(), false),
        }
    }

    /// Remove a property, returning its old value (empty when unset)
    pub fn remove_property(&mut self, property: &str) -> String {
        let property = normalize_property(property);
        match self.declarations.iter().position(|d| d.property == property) {
            Some(pos) => self.declarations.remove(pos).value,
            None => String::new(),
        }
    }

    /// Read through a camelCase name (`style.backgroundColor`)
    pub fn get(&self, camel_name: &str) -> &str {
        self.get_property_value(&hyphenate(camel_name))
    }

    /// Write through a camelCase name (`style.backgroundColor = value`)
    pub fn set_camel(&mut self, camel_name: &str, value: &str) {
        self.set_property(&hyphenate(camel_name), value);
    }

    /// Serialized form, as stored in the `style` attribute
    pub fn css_text(&self) -> String {
        self.declarations
            .iter()
            .map(|d| {
                if d.important {
                    format!("{}: {} !important;", d.property, d.value)
                } else {
                    format!("{}: {};", d.property, d.value)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// camelCase scripted name to hyphenated CSS property name
///
/// `backgroundColor` -> `background-color`, `WebkitTransition` ->
/// `-webkit-transition`, `cssFloat` -> `float`. Names already containing a
/// hyphen pass through lowercased.
pub fn hyphenate(name: &str) -> String {
    if name == "cssFloat" {
        return "float".to_string();
    }
    if name.starts_with("--") {
        return name.to_string();
    }
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

fn normalize_property(name: &str) -> String {
    // Custom properties are case-sensitive
    if name.starts_with("--") {
        name.to_string()
    } else {
        name.to_ascii_lowercase()
    }
}

fn strip_important(value: &str) -> Option<&str> {
    let lower = value.to_ascii_lowercase();
    let idx = lower.rfind("!important")?;
    if !lower[idx + "!important".len()..].trim().is_empty() {
        return None;
    }
    Some(value[..idx].trim_end())
}

/// Split on `;` outside of parentheses and quotes
fn split_declarations(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    for (i, c) in text.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(') => depth += 1,
            (None, ')') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                parts.push(&text[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&text[start..]);
    parts
}
