//! Abstract Syntax Tree types for the scene description language

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// Valid identifier (alphanumeric + underscore, starts with letter/_)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(pub String);

impl Identifier {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Root AST node - a complete scene description
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub elements: Vec<Spanned<ElementDecl>>,
}

/// Keyword that introduces an element declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKeyword {
    /// `rect` - a plain positioned element
    Rect,
    /// `frame` - free-form container
    Frame,
    /// `section` - padded grouping container
    Section,
    /// `row` - horizontal auto layout
    Row,
    /// `col` - vertical auto layout
    Col,
}

impl ElementKeyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKeyword::Rect => "rect",
            ElementKeyword::Frame => "frame",
            ElementKeyword::Section => "section",
            ElementKeyword::Row => "row",
            ElementKeyword::Col => "col",
        }
    }

    /// Whether the element may declare a `{ ... }` child block
    pub fn is_container(&self) -> bool {
        !matches!(self, ElementKeyword::Rect)
    }
}

/// Element declaration: `section name [modifiers] { children }`
#[derive(Debug, Clone, PartialEq)]
pub struct ElementDecl {
    pub keyword: Spanned<ElementKeyword>,
    pub name: Option<Spanned<Identifier>>,
    pub modifiers: Vec<Spanned<Modifier>>,
    pub children: Vec<Spanned<ElementDecl>>,
}

/// A single `key: value` pair inside `[...]`
#[derive(Debug, Clone, PartialEq)]
pub struct Modifier {
    pub key: Spanned<ModifierKey>,
    pub value: Spanned<ModifierValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModifierKey {
    X,
    Y,
    Width,
    Height,
    Size,
    Locked,
    Fill,
    Spacing,
    Padding,
    Custom(String),
}

impl ModifierKey {
    pub fn from_name(name: &str) -> Self {
        match name {
            "x" => ModifierKey::X,
            "y" => ModifierKey::Y,
            "width" => ModifierKey::Width,
            "height" => ModifierKey::Height,
            "size" => ModifierKey::Size,
            "locked" => ModifierKey::Locked,
            "fill" => ModifierKey::Fill,
            "spacing" => ModifierKey::Spacing,
            "padding" => ModifierKey::Padding,
            other => ModifierKey::Custom(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ModifierKey::X => "x",
            ModifierKey::Y => "y",
            ModifierKey::Width => "width",
            ModifierKey::Height => "height",
            ModifierKey::Size => "size",
            ModifierKey::Locked => "locked",
            ModifierKey::Fill => "fill",
            ModifierKey::Spacing => "spacing",
            ModifierKey::Padding => "padding",
            ModifierKey::Custom(s) => s.as_str(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ModifierValue {
    Number(f64),
    Bool(bool),
    /// Hex color like `#ff0000`
    Color(String),
    /// Bare identifier, e.g. a named color
    Identifier(Identifier),
}

impl ModifierValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            ModifierValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ModifierValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Short description used in error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            ModifierValue::Number(_) => "number",
            ModifierValue::Bool(_) => "boolean",
            ModifierValue::Color(_) => "color",
            ModifierValue::Identifier(_) => "identifier",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_key_round_trip_names() {
        for name in ["x", "y", "width", "height", "size", "locked", "fill", "spacing", "padding"] {
            assert_eq!(ModifierKey::from_name(name).as_str(), name);
        }
        assert_eq!(
            ModifierKey::from_name("opacity"),
            ModifierKey::Custom("opacity".to_string())
        );
    }

    #[test]
    fn test_only_rect_rejects_children() {
        assert!(!ElementKeyword::Rect.is_container());
        assert!(ElementKeyword::Section.is_container());
        assert!(ElementKeyword::Row.is_container());
    }
}
