//! Defaults applied when building a scene from a description

/// Configuration options for scene construction
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Size of a `rect` without explicit width/height
    pub default_rect_size: (f64, f64),

    /// Size of a `frame` or `section` without explicit width/height
    pub default_container_size: (f64, f64),

    /// Spacing between children of `row`/`col` containers
    pub auto_layout_spacing: f64,

    /// Inset of `row`/`col` containers
    pub auto_layout_padding: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            default_rect_size: (100.0, 100.0),
            default_container_size: (400.0, 300.0),
            auto_layout_spacing: 10.0,
            auto_layout_padding: 0.0,
        }
    }
}

impl SceneConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default rectangle size
    pub fn with_rect_size(mut self, width: f64, height: f64) -> Self {
        self.default_rect_size = (width, height);
        self
    }

    /// Set the default container size
    pub fn with_container_size(mut self, width: f64, height: f64) -> Self {
        self.default_container_size = (width, height);
        self
    }

    /// Set the default auto layout spacing
    pub fn with_auto_layout_spacing(mut self, spacing: f64) -> Self {
        self.auto_layout_spacing = spacing;
        self
    }

    /// Set the default auto layout padding
    pub fn with_auto_layout_padding(mut self, padding: f64) -> Self {
        self.auto_layout_padding = padding;
        self
    }
}
