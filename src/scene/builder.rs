//! Build a [`Scene`] from a parsed scene description

use std::collections::HashMap;

use crate::parser::ast::*;

use super::config::SceneConfig;
use super::error::SceneError;
use super::tree::Scene;
use super::types::{AutoLayout, ElementId, ElementKind, LayoutAxis, Rect};

/// Geometry and flags collected from one declaration's modifiers
#[derive(Debug, Default)]
struct DeclProperties {
    x: Option<f64>,
    y: Option<f64>,
    width: Option<f64>,
    height: Option<f64>,
    locked: bool,
    fill: Option<String>,
    spacing: Option<f64>,
    padding: Option<f64>,
}

impl Scene {
    /// Build a scene from a parsed document. Top-level declarations become
    /// children of the root frame; auto layouts are reflowed once built.
    pub fn from_document(doc: &Document, config: &SceneConfig) -> Result<Scene, SceneError> {
        let mut scene = Scene::new();
        let mut names: HashMap<String, Span> = HashMap::new();
        let root = scene.root();
        for decl in &doc.elements {
            build_element(&mut scene, root, decl, config, &mut names)?;
        }
        tracing::debug!(elements = scene.element_count(), "scene built");
        Ok(scene)
    }
}

fn build_element(
    scene: &mut Scene,
    parent: ElementId,
    decl: &Spanned<ElementDecl>,
    config: &SceneConfig,
    names: &mut HashMap<String, Span>,
) -> Result<ElementId, SceneError> {
    let node = &decl.node;
    let display = match &node.name {
        Some(name) => format!("\"{}\"", name.node),
        None => format!("<anonymous {}>", node.keyword.node.as_str()),
    };

    if let Some(name) = &node.name {
        if names.contains_key(name.node.as_str()) {
            return Err(SceneError::DuplicateName {
                name: name.node.0.clone(),
                span: name.span.clone(),
            });
        }
        names.insert(name.node.0.clone(), name.span.clone());
    }

    let props = collect_properties(&node.modifiers, &display)?;
    let kind = element_kind(node.keyword.node, &props, config);

    let (default_width, default_height) = match node.keyword.node {
        ElementKeyword::Rect => config.default_rect_size,
        ElementKeyword::Frame | ElementKeyword::Section => config.default_container_size,
        // Auto layouts hug their content; reflow computes the real size
        ElementKeyword::Row | ElementKeyword::Col => (0.0, 0.0),
    };
    let bounds = Rect::new(
        props.x.unwrap_or(0.0),
        props.y.unwrap_or(0.0),
        props.width.unwrap_or(default_width),
        props.height.unwrap_or(default_height),
    );
    if bounds.width < 0.0 || bounds.height < 0.0 {
        return Err(SceneError::negative_size(display, bounds.width, bounds.height));
    }

    let id = scene.add(parent, node.name.as_ref().map(|n| n.node.0.clone()), kind, bounds)?;
    scene.set_locked(id, props.locked)?;
    scene.set_fill(id, props.fill)?;

    for child in &node.children {
        build_element(scene, id, child, config, names)?;
    }
    if kind.is_auto_layout() {
        scene.reflow(id)?;
    }
    Ok(id)
}

fn element_kind(keyword: ElementKeyword, props: &DeclProperties, config: &SceneConfig) -> ElementKind {
    let auto_layout = |axis| {
        ElementKind::AutoLayout(AutoLayout {
            axis,
            spacing: props.spacing.unwrap_or(config.auto_layout_spacing),
            padding: props.padding.unwrap_or(config.auto_layout_padding),
        })
    };
    match keyword {
        ElementKeyword::Rect => ElementKind::Shape,
        ElementKeyword::Frame => ElementKind::Frame,
        ElementKeyword::Section => ElementKind::Section,
        ElementKeyword::Row => auto_layout(LayoutAxis::Horizontal),
        ElementKeyword::Col => auto_layout(LayoutAxis::Vertical),
    }
}

fn collect_properties(
    modifiers: &[Spanned<Modifier>],
    owner: &str,
) -> Result<DeclProperties, SceneError> {
    let mut props = DeclProperties::default();

    for modifier in modifiers {
        let key = &modifier.node.key.node;
        let value = &modifier.node.value;
        let number = || {
            value.node.as_number().ok_or_else(|| {
                SceneError::invalid_modifier(
                    owner,
                    key.as_str(),
                    format!("expected number, found {}", value.node.kind_name()),
                    value.span.clone(),
                )
            })
        };

        match key {
            ModifierKey::X => props.x = Some(number()?),
            ModifierKey::Y => props.y = Some(number()?),
            ModifierKey::Width => props.width = Some(number()?),
            ModifierKey::Height => props.height = Some(number()?),
            ModifierKey::Size => {
                let size = number()?;
                props.width = Some(size);
                props.height = Some(size);
            }
            ModifierKey::Spacing => props.spacing = Some(number()?),
            ModifierKey::Padding => props.padding = Some(number()?),
            ModifierKey::Locked => {
                props.locked = value.node.as_bool().ok_or_else(|| {
                    SceneError::invalid_modifier(
                        owner,
                        "locked",
                        format!("expected boolean, found {}", value.node.kind_name()),
                        value.span.clone(),
                    )
                })?;
            }
            ModifierKey::Fill => {
                props.fill = match &value.node {
                    ModifierValue::Color(c) => Some(c.clone()),
                    ModifierValue::Identifier(id) => Some(id.0.clone()),
                    other => {
                        return Err(SceneError::invalid_modifier(
                            owner,
                            "fill",
                            format!("expected color, found {}", other.kind_name()),
                            value.span.clone(),
                        ))
                    }
                };
            }
            ModifierKey::Custom(name) => {
                tracing::debug!(element = %owner, modifier = %name, "ignoring unknown modifier");
            }
        }
    }

    Ok(props)
}
