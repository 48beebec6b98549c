//! Smart Duplicate - directional duplication with collision-aware placement
//!
//! This library loads a scene from a small declarative description, copies
//! selected elements in one of eight directions, pushes overlapping siblings
//! out of the way and grows enclosing sections to fit.
//!
//! # Example
//!
//! ```rust
//! use smart_duplicate::{run, Direction, RunConfig};
//!
//! let output = run("rect a [size: 100]", &["a"], Direction::Right, &RunConfig::default()).unwrap();
//! let copy = output.outcome.created[0];
//! assert_eq!(output.scene.bounds(copy).unwrap().x, 140.0);
//! ```

pub mod duplicate;
pub mod error;
pub mod lint;
pub mod parser;
pub mod renderer;
pub mod scene;
pub mod settings;
mod suggest;

pub use duplicate::{
    duplicate, Direction, DuplicateError, DuplicateOutcome, DuplicateRequest, Gap, Notification,
    Severity,
};
pub use error::ParseError;
pub use lint::{LintCategory, LintWarning};
pub use parser::{parse, Document};
pub use renderer::{render_svg, render_svg_highlighting, SvgConfig};
pub use scene::{format_scene, ElementId, Scene, SceneConfig, SceneError};
pub use settings::{DuplicateSettings, SettingsError};

use thiserror::Error;

/// Errors that can occur during the duplicate pipeline
#[derive(Debug, Error)]
pub enum RunError {
    /// Error during parsing
    #[error("parse errors: {}", format_parse_errors(.0))]
    Parse(Vec<ParseError>),

    /// Scene could not be built from the description
    #[error("scene error: {0}")]
    Scene(#[from] SceneError),

    /// A selected name does not exist in the scene
    #[error("unknown element '{name}'{}", format_suggestions(.suggestions))]
    UnknownSelection {
        name: String,
        suggestions: Vec<String>,
    },

    #[error(transparent)]
    Duplicate(#[from] DuplicateError),
}

impl From<Vec<ParseError>> for RunError {
    fn from(errors: Vec<ParseError>) -> Self {
        RunError::Parse(errors)
    }
}

fn format_parse_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", suggestions.join(", "))
    }
}

/// Configuration for the complete duplicate pipeline
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Defaults used while loading the scene
    pub scene: SceneConfig,
    /// Stored preferences
    pub settings: DuplicateSettings,
    /// Overrides the stored gap preference
    pub gap: Option<Gap>,
    /// Overrides the stored push preference
    pub push_enabled: Option<bool>,
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scene(mut self, config: SceneConfig) -> Self {
        self.scene = config;
        self
    }

    pub fn with_settings(mut self, settings: DuplicateSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_gap(mut self, gap: Gap) -> Self {
        self.gap = Some(gap);
        self
    }

    pub fn with_push(mut self, enabled: bool) -> Self {
        self.push_enabled = Some(enabled);
        self
    }

    /// Stored settings with this run's overrides applied
    pub fn request(&self, direction: Direction) -> DuplicateRequest {
        let mut request = self.settings.request(direction);
        if let Some(gap) = self.gap {
            request = request.with_gap(gap);
        }
        if let Some(push) = self.push_enabled {
            request = request.with_push(push);
        }
        request
    }
}

/// The scene after a duplicate command, plus what the command did
#[derive(Debug)]
pub struct RunOutput {
    pub scene: Scene,
    pub outcome: DuplicateOutcome,
}

impl RunOutput {
    /// The resulting scene in the description language
    pub fn format(&self) -> String {
        format_scene(&self.scene)
    }

    /// SVG preview, with fresh copies marked when the config asks for it
    pub fn to_svg(&self, config: &SvgConfig) -> String {
        if config.highlight_duplicates {
            render_svg_highlighting(&self.scene, config, &self.outcome.created)
        } else {
            render_svg(&self.scene, config)
        }
    }

    pub fn lint(&self) -> Vec<LintWarning> {
        lint::check(&self.scene)
    }
}

/// Parse a scene description and build the scene
pub fn load_scene(source: &str, config: &SceneConfig) -> Result<Scene, RunError> {
    let doc = parse(source)?;
    Ok(Scene::from_document(&doc, config)?)
}

/// Look up selected names in the scene
pub fn resolve_selection(scene: &Scene, names: &[&str]) -> Result<Vec<ElementId>, RunError> {
    names
        .iter()
        .map(|&name| {
            scene.find_by_name(name).ok_or_else(|| RunError::UnknownSelection {
                name: name.to_string(),
                suggestions: suggest::similar_names(
                    scene.iter().filter_map(|e| e.name.as_deref()),
                    name,
                    2,
                ),
            })
        })
        .collect()
}

/// Load `source`, duplicate the named elements in `direction` and return the
/// updated scene.
///
/// An empty `selection` is reported as [`DuplicateError::EmptySelection`];
/// per-element failures do not fail the run and are listed in the outcome.
///
/// # Example
///
/// ```rust
/// use smart_duplicate::{run, Direction, Gap, RunConfig};
///
/// let source = r#"
///     section board [width: 600, height: 400] {
///         rect a [x: 100, y: 100]
///         rect b [x: 250, y: 100]
///     }
/// "#;
/// let config = RunConfig::new().with_gap(Gap::Fixed(20.0));
/// let output = run(source, &["a"], Direction::Right, &config).unwrap();
///
/// let b = output.scene.find_by_name("b").unwrap();
/// assert_eq!(output.scene.bounds(b).unwrap().x, 370.0);
/// ```
pub fn run(
    source: &str,
    selection: &[&str],
    direction: Direction,
    config: &RunConfig,
) -> Result<RunOutput, RunError> {
    let mut scene = load_scene(source, &config.scene)?;
    let ids = resolve_selection(&scene, selection)?;
    let outcome = duplicate(&mut scene, &ids, &config.request(direction))?;
    Ok(RunOutput { scene, outcome })
}
