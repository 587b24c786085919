//! CSS Selectors
//!
//! Parsing and right-to-left matching of selector lists against the arena
//! tree. Supports compound selectors, the four combinators, attribute
//! selectors and the structural/logical pseudo-classes.

use zedom_dom::{DomTree, ElementData, NodeData, NodeId};

use crate::Specificity;

/// Selector syntax error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{selector}' is not a valid selector: {reason}")]
pub struct SelectorError {
    pub selector: String,
    pub reason: String,
}

/// An+B expression for :nth-* selectors
#[derive(Debug, Clone, PartialEq)]
pub struct NthExpression {
    /// Coefficient (A in An+B)
    pub a: i32,
    /// Offset (B in An+B)
    pub b: i32,
}

impl NthExpression {
    /// Create "odd" expression (2n+1)
    pub fn odd() -> Self {
        Self { a: 2, b: 1 }
    }

    /// Create "even" expression (2n)
    pub fn even() -> Self {
        Self { a: 2, b: 0 }
    }

    /// Create a simple index (0n+b)
    pub fn index(n: i32) -> Self {
        Self { a: 0, b: n }
    }

    /// Create An+B expression
    pub fn new(a: i32, b: i32) -> Self {
        Self { a, b }
    }

    /// Parse from string like "2n+1", "odd", "even", "3"
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();

        match s.as_str() {
            "odd" => return Some(Self::odd()),
            "even" => return Some(Self::even()),
            _ => {}
        }

        // Try to parse as simple number
        if let Ok(n) = s.parse::<i32>() {
            return Some(Self::index(n));
        }

        // Parse An+B format
        let s = s.replace(' ', "");
        let n_pos = s.find('n')?;
        let a_str = &s[..n_pos];
        let a = match a_str {
            "" | "+" => 1,
            "-" => -1,
            _ => a_str.parse().ok()?,
        };

        let rest = &s[n_pos + 1..];
        let b = if rest.is_empty() {
            0
        } else {
            rest.strip_prefix('+').unwrap_or(rest).parse().ok()?
        };

        Some(Self::new(a, b))
    }

    /// Check if index n (1-based) matches this expression
    pub fn matches(&self, n: i32) -> bool {
        if self.a == 0 {
            return n == self.b;
        }

        let diff = n - self.b;
        if self.a > 0 {
            diff >= 0 && diff % self.a == 0
        } else {
            diff <= 0 && diff % self.a == 0
        }
    }
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSelector {
    pub name: String,
    pub matcher: Option<AttributeMatcher>,
    pub case_insensitive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeMatcher {
    /// [attr=value] - exact match
    Exact(String),
    /// [attr~=value] - whitespace-separated list contains
    Contains(String),
    /// [attr|=value] - exact or prefix with hyphen
    DashMatch(String),
    /// [attr^=value] - starts with
    Prefix(String),
    /// [attr$=value] - ends with
    Suffix(String),
    /// [attr*=value] - contains substring
    Substring(String),
}

impl AttributeSelector {
    /// Check if an attribute value matches
    pub fn matches(&self, value: Option<&str>) -> bool {
        let (Some(matcher), Some(val)) = (&self.matcher, value) else {
            // [attr] - just check existence
            return self.matcher.is_none() && value.is_some();
        };
        let fold = |s: &str| {
            if self.case_insensitive {
                s.to_lowercase()
            } else {
                s.to_string()
            }
        };
        let val = fold(val);

        match matcher {
            AttributeMatcher::Exact(expected) => val == fold(expected),
            AttributeMatcher::Contains(expected) => {
                let expected = fold(expected);
                !expected.is_empty() && val.split_ascii_whitespace().any(|w| w == expected)
            }
            AttributeMatcher::DashMatch(expected) => {
                let expected = fold(expected);
                val == expected || val.starts_with(&format!("{}-", expected))
            }
            AttributeMatcher::Prefix(expected) => !expected.is_empty() && val.starts_with(&fold(expected)),
            AttributeMatcher::Suffix(expected) => !expected.is_empty() && val.ends_with(&fold(expected)),
            AttributeMatcher::Substring(expected) => !expected.is_empty() && val.contains(&fold(expected)),
        }
    }
}

/// Pseudo-class type
#[derive(Debug, Clone, PartialEq)]
pub enum PseudoClass {
    // Tree-structural pseudo-classes
    Root,
    Empty,
    FirstChild,
    LastChild,
    OnlyChild,
    FirstOfType,
    LastOfType,
    OnlyOfType,
    NthChild(NthExpression),
    NthLastChild(NthExpression),
    NthOfType(NthExpression),
    NthLastOfType(NthExpression),

    // Logical pseudo-classes
    Not(SelectorList),
    Is(SelectorList),
    Where(SelectorList),

    // Input pseudo-classes, derived from attributes
    Checked,
    Disabled,
    Enabled,

    /// User-action state (`:hover`, `:focus`, ...); never set in this DOM
    Interaction(String),
}

/// A simple selector inside a compound
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorComponent {
    /// Universal selector *
    Universal,
    /// Type selector (tag name)
    Type(String),
    /// ID selector #id
    Id(String),
    /// Class selector .class
    Class(String),
    /// Attribute selector [attr], [attr=value], etc.
    Attribute(AttributeSelector),
    /// Pseudo-class :first-child, :not(), etc.
    PseudoClass(PseudoClass),
    /// Pseudo-element ::before; elements themselves never match these
    PseudoElement(String),
}

/// Relationship between two compounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
    /// `a + b`
    NextSibling,
    /// `a ~ b`
    SubsequentSibling,
}

/// Sequence of simple selectors with no combinator between them
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundSelector {
    pub components: Vec<SelectorComponent>,
}

/// Compounds joined by combinators; `combinators[i]` sits between
/// `compounds[i]` and `compounds[i + 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSelector {
    pub compounds: Vec<CompoundSelector>,
    pub combinators: Vec<Combinator>,
}

/// Comma-separated selector list
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList {
    pub selectors: Vec<ComplexSelector>,
}

impl SelectorList {
    /// Parse a selector list
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut parser = Parser { src: input, chars: input.char_indices().collect(), pos: 0 };
        let list = parser.selector_list().map_err(|reason| SelectorError {
            selector: input.to_string(),
            reason,
        })?;
        parser.skip_ws();
        if !parser.at_end() {
            return Err(SelectorError {
                selector: input.to_string(),
                reason: format!("unexpected '{}'", parser.rest()),
            });
        }
        Ok(list)
    }

    /// Whether any selector in the list matches `element`
    pub fn matches(&self, tree: &DomTree, element: NodeId) -> bool {
        self.selectors.iter().any(|s| s.matches(tree, element))
    }

    /// Highest specificity among selectors matching `element`
    pub fn matching_specificity(&self, tree: &DomTree, element: NodeId) -> Option<Specificity> {
        self.selectors
            .iter()
            .filter(|s| s.matches(tree, element))
            .map(ComplexSelector::specificity)
            .max()
    }

    /// Largest specificity in the list (used by :is / :not)
    fn max_specificity(&self) -> Specificity {
        self.selectors
            .iter()
            .map(ComplexSelector::specificity)
            .max()
            .unwrap_or_default()
    }
}

impl ComplexSelector {
    /// Selector specificity (ids, classes, types)
    pub fn specificity(&self) -> Specificity {
        let mut spec = Specificity::default();
        for component in self.compounds.iter().flat_map(|c| &c.components) {
            let add = match component {
                SelectorComponent::Universal => Specificity::default(),
                SelectorComponent::Id(_) => Specificity(1, 0, 0),
                SelectorComponent::Class(_) | SelectorComponent::Attribute(_) => Specificity(0, 1, 0),
                SelectorComponent::Type(_) | SelectorComponent::PseudoElement(_) => Specificity(0, 0, 1),
                SelectorComponent::PseudoClass(PseudoClass::Where(_)) => Specificity::default(),
                SelectorComponent::PseudoClass(PseudoClass::Not(list) | PseudoClass::Is(list)) => {
                    list.max_specificity()
                }
                SelectorComponent::PseudoClass(_) => Specificity(0, 1, 0),
            };
            spec = Specificity(spec.0 + add.0, spec.1 + add.1, spec.2 + add.2);
        }
        spec
    }

    /// Match right-to-left from `element`
    pub fn matches(&self, tree: &DomTree, element: NodeId) -> bool {
        match self.compounds.len() {
            0 => false,
            n => self.match_from(tree, element, n - 1),
        }
    }

    fn match_from(&self, tree: &DomTree, element: NodeId, idx: usize) -> bool {
        if !match_compound(tree, element, &self.compounds[idx]) {
            return false;
        }
        if idx == 0 {
            return true;
        }
        match self.combinators[idx - 1] {
            Combinator::Descendant => element_ancestors(tree, element).any(|a| self.match_from(tree, a, idx - 1)),
            Combinator::Child => {
                parent_element(tree, element).is_some_and(|p| self.match_from(tree, p, idx - 1))
            }
            Combinator::NextSibling => {
                previous_element(tree, element).is_some_and(|s| self.match_from(tree, s, idx - 1))
            }
            Combinator::SubsequentSibling => {
                std::iter::successors(previous_element(tree, element), |&s| previous_element(tree, s))
                    .any(|s| self.match_from(tree, s, idx - 1))
            }
        }
    }
}

fn parent_element(tree: &DomTree, node: NodeId) -> Option<NodeId> {
    tree.parent(node).filter(|&p| tree.get(p).is_some_and(|n| n.is_element()))
}

fn element_ancestors(tree: &DomTree, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
    std::iter::successors(parent_element(tree, node), move |&p| parent_element(tree, p))
}

fn previous_element(tree: &DomTree, node: NodeId) -> Option<NodeId> {
    std::iter::successors(tree.previous_sibling(node), |&s| tree.previous_sibling(s))
        .find(|&s| tree.get(s).is_some_and(|n| n.is_element()))
}

fn match_compound(tree: &DomTree, element: NodeId, compound: &CompoundSelector) -> bool {
    let Some(elem) = tree.get(element).and_then(|n| n.as_element()) else {
        return false;
    };
    compound
        .components
        .iter()
        .all(|c| match_component(tree, element, elem, c))
}

/// Match a selector component against an element
fn match_component(tree: &DomTree, id: NodeId, elem: &ElementData, component: &SelectorComponent) -> bool {
    match component {
        SelectorComponent::Universal => true,
        SelectorComponent::Type(tag) => elem.local_name().eq_ignore_ascii_case(tag),
        SelectorComponent::Id(expected) => elem.id() == Some(expected.as_str()),
        SelectorComponent::Class(class) => elem.class_list().contains(class),
        SelectorComponent::Attribute(attr) => attr.matches(elem.get_attr(&attr.name)),
        SelectorComponent::PseudoClass(pseudo) => match_pseudo_class(tree, id, elem, pseudo),
        SelectorComponent::PseudoElement(_) => false,
    }
}

/// Position among element siblings: (1-based index, total, 1-based type index, type total)
fn sibling_position(tree: &DomTree, id: NodeId, elem: &ElementData) -> (usize, usize, usize, usize) {
    let Some(parent) = tree.parent(id) else {
        return (1, 1, 1, 1);
    };
    let (mut index, mut count, mut type_index, mut type_count) = (0, 0, 0, 0);
    for sibling in tree.element_children(parent) {
        count += 1;
        let same_type = tree
            .get(sibling)
            .and_then(|n| n.as_element())
            .is_some_and(|e| e.name == elem.name);
        if same_type {
            type_count += 1;
        }
        if sibling == id {
            index = count;
            type_index = type_count;
        }
    }
    (index, count, type_index, type_count)
}

fn match_pseudo_class(tree: &DomTree, id: NodeId, elem: &ElementData, pseudo: &PseudoClass) -> bool {
    let position = || sibling_position(tree, id, elem);
    match pseudo {
        PseudoClass::Root => tree
            .parent(id)
            .and_then(|p| tree.get(p))
            .is_some_and(|p| matches!(p.data, NodeData::Document)),
        PseudoClass::Empty => tree
            .children(id)
            .all(|(_, child)| !child.is_element() && child.as_text().is_none_or(str::is_empty)),
        PseudoClass::FirstChild => position().0 == 1,
        PseudoClass::LastChild => {
            let (index, count, ..) = position();
            index == count
        }
        PseudoClass::OnlyChild => position().1 == 1,
        PseudoClass::FirstOfType => position().2 == 1,
        PseudoClass::LastOfType => {
            let (.., type_index, type_count) = position();
            type_index == type_count
        }
        PseudoClass::OnlyOfType => position().3 == 1,
        PseudoClass::NthChild(expr) => expr.matches(position().0 as i32),
        PseudoClass::NthLastChild(expr) => {
            let (index, count, ..) = position();
            expr.matches((count - index + 1) as i32)
        }
        PseudoClass::NthOfType(expr) => expr.matches(position().2 as i32),
        PseudoClass::NthLastOfType(expr) => {
            let (.., type_index, type_count) = position();
            expr.matches((type_count - type_index + 1) as i32)
        }
        PseudoClass::Not(list) => !list.matches(tree, id),
        PseudoClass::Is(list) | PseudoClass::Where(list) => list.matches(tree, id),
        PseudoClass::Checked => elem.has_attr("checked") || elem.has_attr("selected"),
        PseudoClass::Disabled => elem.has_attr("disabled"),
        PseudoClass::Enabled => {
            matches!(
                elem.local_name(),
                "button" | "input" | "select" | "textarea" | "option" | "fieldset"
            ) && !elem.has_attr("disabled")
        }
        PseudoClass::Interaction(_) => false,
    }
}

// ----------------------------------------------------------------------
// Parser
// ----------------------------------------------------------------------

struct Parser<'a> {
    src: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|&(_, c)| c)
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).map(|&(_, c)| c)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.chars.len()
    }

    fn rest(&self) -> &str {
        match self.chars.get(self.pos) {
            Some(&(offset, _)) => &self.src[offset..],
            None => "",
        }
    }

    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn expect(&mut self, expected: char) -> Result<(), String> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(format!("expected '{}', found '{}'", expected, c)),
            None => Err(format!("expected '{}', found end of input", expected)),
        }
    }

    fn selector_list(&mut self) -> Result<SelectorList, String> {
        let mut selectors = Vec::new();
        loop {
            self.skip_ws();
            selectors.push(self.complex()?);
            self.skip_ws();
            if self.peek() == Some(',') {
                self.pos += 1;
            } else {
                break;
            }
        }
        Ok(SelectorList { selectors })
    }

    fn complex(&mut self) -> Result<ComplexSelector, String> {
        let mut compounds = vec![self.compound()?];
        let mut combinators = Vec::new();
        loop {
            let had_ws = self.skip_ws();
            let combinator = match self.peek() {
                Some('>') => Combinator::Child,
                Some('+') => Combinator::NextSibling,
                Some('~') => Combinator::SubsequentSibling,
                Some(',') | Some(')') | None => break,
                Some(_) if had_ws => {
                    combinators.push(Combinator::Descendant);
                    compounds.push(self.compound()?);
                    continue;
                }
                Some(c) => return Err(format!("unexpected '{}'", c)),
            };
            self.pos += 1;
            self.skip_ws();
            combinators.push(combinator);
            compounds.push(self.compound()?);
        }
        Ok(ComplexSelector { compounds, combinators })
    }

    fn compound(&mut self) -> Result<CompoundSelector, String> {
        let mut components = Vec::new();
        match self.peek() {
            Some('*') => {
                self.pos += 1;
                components.push(SelectorComponent::Universal);
            }
            Some(c) if is_ident_start(c) || c == '\\' => {
                components.push(SelectorComponent::Type(self.ident()?.to_ascii_lowercase()));
            }
            _ => {}
        }
        loop {
            match self.peek() {
                Some('#') => {
                    self.pos += 1;
                    components.push(SelectorComponent::Id(self.ident()?));
                }
                Some('.') => {
                    self.pos += 1;
                    components.push(SelectorComponent::Class(self.ident()?));
                }
                Some('[') => {
                    self.pos += 1;
                    components.push(SelectorComponent::Attribute(self.attribute()?));
                }
                Some(':') => {
                    self.pos += 1;
                    if self.peek() == Some(':') {
                        self.pos += 1;
                        components.push(SelectorComponent::PseudoElement(self.ident()?.to_ascii_lowercase()));
                    } else {
                        components.push(SelectorComponent::PseudoClass(self.pseudo_class()?));
                    }
                }
                _ => break,
            }
        }
        if components.is_empty() {
            return Err(match self.peek() {
                Some(c) => format!("unexpected '{}'", c),
                None => "empty selector".to_string(),
            });
        }
        Ok(CompoundSelector { components })
    }

    fn ident(&mut self) -> Result<String, String> {
        let mut out = String::new();
        if self.peek() == Some('-') {
            out.push('-');
            self.pos += 1;
        }
        match self.peek() {
            Some('-') if out == "-" => {}
            Some('\\') => {}
            Some(c) if is_ident_start(c) => {}
            Some(c) => return Err(format!("expected identifier, found '{}'", c)),
            None => return Err("expected identifier".to_string()),
        }
        while let Some(c) = self.peek() {
            if c == '\\' {
                self.pos += 1;
                let escaped = self.bump().ok_or("dangling escape")?;
                out.push(escaped);
            } else if is_ident_char(c) {
                out.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        Ok(out)
    }

    fn attribute(&mut self) -> Result<AttributeSelector, String> {
        self.skip_ws();
        let name = self.ident()?.to_ascii_lowercase();
        self.skip_ws();
        let op = match (self.peek(), self.peek_at(1)) {
            (Some(']'), _) => {
                self.pos += 1;
                return Ok(AttributeSelector { name, matcher: None, case_insensitive: false });
            }
            (Some('='), _) => {
                self.pos += 1;
                '='
            }
            (Some(c @ ('~' | '|' | '^' | '$' | '*')), Some('=')) => {
                self.pos += 2;
                c
            }
            (Some(c), _) => return Err(format!("unexpected '{}' in attribute selector", c)),
            (None, _) => return Err("unterminated attribute selector".to_string()),
        };
        self.skip_ws();
        let value = match self.peek() {
            Some(q @ ('"' | '\'')) => self.string(q)?,
            _ => self.ident()?,
        };
        self.skip_ws();
        let mut case_insensitive = false;
        if let Some(flag @ ('i' | 'I' | 's' | 'S')) = self.peek() {
            self.pos += 1;
            case_insensitive = flag.eq_ignore_ascii_case(&'i');
            self.skip_ws();
        }
        self.expect(']')?;
        let matcher = match op {
            '=' => AttributeMatcher::Exact(value),
            '~' => AttributeMatcher::Contains(value),
            '|' => AttributeMatcher::DashMatch(value),
            '^' => AttributeMatcher::Prefix(value),
            '$' => AttributeMatcher::Suffix(value),
            _ => AttributeMatcher::Substring(value),
        };
        Ok(AttributeSelector { name, matcher: Some(matcher), case_insensitive })
    }

    fn string(&mut self, quote: char) -> Result<String, String> {
        self.pos += 1;
        let mut out = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(out),
                Some('\\') => out.push(self.bump().ok_or("dangling escape")?),
                Some(c) => out.push(c),
                None => return Err("unterminated string".to_string()),
            }
        }
    }

    fn pseudo_class(&mut self) -> Result<PseudoClass, String> {
        let name = self.ident()?.to_ascii_lowercase();
        if self.peek() == Some('(') {
            self.pos += 1;
            self.skip_ws();
            let pseudo = match name.as_str() {
                "not" => PseudoClass::Not(self.selector_list()?),
                "is" | "matches" => PseudoClass::Is(self.selector_list()?),
                "where" => PseudoClass::Where(self.selector_list()?),
                "nth-child" | "nth-last-child" | "nth-of-type" | "nth-last-of-type" => {
                    let start = self.pos;
                    while self.peek().is_some_and(|c| c != ')') {
                        self.pos += 1;
                    }
                    let arg: String = self.chars[start..self.pos].iter().map(|&(_, c)| c).collect();
                    let expr = NthExpression::parse(&arg)
                        .ok_or_else(|| format!("invalid An+B expression '{}'", arg.trim()))?;
                    match name.as_str() {
                        "nth-child" => PseudoClass::NthChild(expr),
                        "nth-last-child" => PseudoClass::NthLastChild(expr),
                        "nth-of-type" => PseudoClass::NthOfType(expr),
                        _ => PseudoClass::NthLastOfType(expr),
                    }
                }
                other => return Err(format!("unknown functional pseudo-class ':{}()'", other)),
            };
            self.skip_ws();
            self.expect(')')?;
            return Ok(pseudo);
        }
        Ok(match name.as_str() {
            "root" => PseudoClass::Root,
            "empty" => PseudoClass::Empty,
            "first-child" => PseudoClass::FirstChild,
            "last-child" => PseudoClass::LastChild,
            "only-child" => PseudoClass::OnlyChild,
            "first-of-type" => PseudoClass::FirstOfType,
            "last-of-type" => PseudoClass::LastOfType,
            "only-of-type" => PseudoClass::OnlyOfType,
            "checked" => PseudoClass::Checked,
            "disabled" => PseudoClass::Disabled,
            "enabled" => PseudoClass::Enabled,
            "hover" | "active" | "focus" | "focus-visible" | "focus-within" | "visited" | "link"
            | "target" => PseudoClass::Interaction(name),
            other => return Err(format!("unknown pseudo-class ':{}'", other)),
        })
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_ident_char(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit() || c == '-'
}
