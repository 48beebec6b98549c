//! Options for the SVG preview

/// How a scene is turned into SVG
#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// Space around the scene content inside the viewBox
    pub viewbox_padding: f64,

    /// Emit an XML declaration before the `<svg>` element
    pub standalone: bool,

    /// Indent nested groups and put each element on its own line
    pub pretty_print: bool,

    /// Prefix for CSS class names (`sd-` gives `sd-shape`, `sd-section`, ...)
    pub class_prefix: Option<String>,

    /// Mark the copies a duplicate command created
    pub highlight_duplicates: bool,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            viewbox_padding: 20.0,
            standalone: true,
            pretty_print: true,
            class_prefix: Some("sd-".to_string()),
            highlight_duplicates: true,
        }
    }
}

impl SvgConfig {
    /// Default preview options
    pub fn new() -> Self {
        Self::default()
    }

    /// Space left around the content
    pub fn with_viewbox_padding(mut self, padding: f64) -> Self {
        self.viewbox_padding = padding;
        self
    }

    /// Toggle the XML declaration
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Toggle indentation and line breaks
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Prefix every CSS class with `prefix`
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Use bare class names
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }

    /// Toggle the `duplicate` class on fresh copies
    pub fn with_highlight_duplicates(mut self, highlight: bool) -> Self {
        self.highlight_duplicates = highlight;
        self
    }
}
