//! SVG generation from a scene

use std::collections::HashSet;

use crate::scene::{Element, ElementId, ElementKind, Rect, Scene};

use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    styles: Vec<String>,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            styles: vec![],
            elements: vec![],
            indent: 1,
        }
    }

    /// Add the default look for each element kind
    pub fn add_default_styles(&mut self) {
        let p = self.prefix();
        self.styles.push(format!(
            ".{p}shape {{ fill: #e3f2fd; stroke: #1565c0; stroke-width: 1; }}"
        ));
        self.styles.push(format!(
            ".{p}frame {{ fill: #ffffff; stroke: #999999; stroke-width: 1; }}"
        ));
        self.styles.push(format!(
            ".{p}section {{ fill: #f5f5f5; stroke: #666666; stroke-dasharray: 6 4; }}"
        ));
        self.styles.push(format!(
            ".{p}auto-layout {{ fill: none; stroke: #ff9800; stroke-dasharray: 2 2; }}"
        ));
        self.styles.push(format!(
            ".{p}duplicate {{ stroke: #4caf50; stroke-width: 2; }}"
        ));
    }

    pub(crate) fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add a rectangle element
    pub fn add_rect(
        &mut self,
        id: Option<&str>,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        classes: &[String],
        styles: &str,
    ) {
        let id_attr = id
            .map(|i| format!(r#" id="{}""#, escape_xml(i)))
            .unwrap_or_default();
        self.elements.push(format!(
            r#"{}<rect{} class="{}" x="{}" y="{}" width="{}" height="{}"{}/>"#,
            self.indent_str(),
            id_attr,
            classes.join(" "),
            x,
            y,
            w,
            h,
            styles
        ));
    }

    /// Open a group translated to `(x, y)`
    pub fn start_group(&mut self, id: Option<&str>, classes: &[String], x: f64, y: f64) {
        let id_attr = id
            .map(|i| format!(r#" id="{}""#, escape_xml(i)))
            .unwrap_or_default();
        let class_attr = if classes.is_empty() {
            String::new()
        } else {
            format!(r#" class="{}""#, classes.join(" "))
        };

        self.elements.push(format!(
            r#"{}<g{}{} transform="translate({} {})">"#,
            self.indent_str(),
            id_attr,
            class_attr,
            x,
            y
        ));
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Build the final SVG string
    pub fn build(self, viewbox: Rect) -> String {
        let padding = self.config.viewbox_padding;
        let vb_x = viewbox.x - padding;
        let vb_y = viewbox.y - padding;
        let vb_w = viewbox.width + 2.0 * padding;
        let vb_h = viewbox.height + 2.0 * padding;

        let nl = self.newline();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}">"#,
            vb_x, vb_y, vb_w, vb_h
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str("  <style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str("    ");
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str("  </style>");
            svg.push_str(nl);
        }

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render a scene to an SVG string
pub fn render_svg(scene: &Scene, config: &SvgConfig) -> String {
    render_svg_highlighting(scene, config, &[])
}

/// Render a scene, marking `highlight` (typically fresh duplicates) with the
/// `duplicate` class
pub fn render_svg_highlighting(scene: &Scene, config: &SvgConfig, highlight: &[ElementId]) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    builder.add_default_styles();

    let highlight: HashSet<ElementId> = highlight.iter().copied().collect();
    for &child in scene.children(scene.root()) {
        render_element(scene, child, &highlight, &mut builder);
    }

    builder.build(content_bounds(scene))
}

/// Union of the absolute bounds of every top-level element
fn content_bounds(scene: &Scene) -> Rect {
    scene
        .children(scene.root())
        .iter()
        .filter_map(|&id| scene.absolute_bounds(id).ok())
        .reduce(|acc, b| acc.union(&b))
        .unwrap_or_default()
}

fn element_classes(element: &Element, prefix: &str, highlighted: bool) -> Vec<String> {
    let kind = match element.kind {
        ElementKind::Shape => "shape",
        ElementKind::Frame => "frame",
        ElementKind::Section => "section",
        ElementKind::AutoLayout(_) => "auto-layout",
    };
    let mut classes = vec![format!("{prefix}{kind}")];
    if element.locked {
        classes.push(format!("{prefix}locked"));
    }
    if highlighted {
        classes.push(format!("{prefix}duplicate"));
    }
    classes
}

fn render_element(
    scene: &Scene,
    id: ElementId,
    highlight: &HashSet<ElementId>,
    builder: &mut SvgBuilder,
) {
    let Ok(element) = scene.get(id) else {
        return;
    };
    let prefix = builder.prefix();
    let classes = element_classes(element, &prefix, highlight.contains(&id));
    let name = element.name.as_deref();
    let styles = element
        .fill
        .as_ref()
        .map(|f| format!(r#" fill="{}""#, escape_xml(f)))
        .unwrap_or_default();
    let b = element.bounds;

    if !element.kind.is_container() {
        builder.add_rect(name, b.x, b.y, b.width, b.height, &classes, &styles);
        return;
    }

    // Children use the container's coordinate space
    builder.start_group(name, &[format!("{prefix}container")], b.x, b.y);
    builder.add_rect(None, 0.0, 0.0, b.width, b.height, &classes, &styles);
    for &child in &element.children {
        render_element(scene, child, highlight, builder);
    }
    builder.end_group();
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
