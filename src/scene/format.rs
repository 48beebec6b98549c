//! Write a scene back out in the description language

use super::tree::Scene;
use super::types::{Element, ElementId, ElementKind};

/// Format every element under the root as scene source text.
///
/// The output parses back into an equivalent scene (auto layouts are
/// reflowed on load, so their stored geometry is reproduced as well).
pub fn format_scene(scene: &Scene) -> String {
    let mut out = String::new();
    for &child in scene.children(scene.root()) {
        write_element(scene, child, 0, &mut out);
    }
    out
}

fn write_element(scene: &Scene, id: ElementId, depth: usize, out: &mut String) {
    let Ok(element) = scene.get(id) else {
        return;
    };
    let indent = "    ".repeat(depth);
    out.push_str(&indent);
    out.push_str(element.kind.keyword());
    if let Some(name) = &element.name {
        out.push(' ');
        out.push_str(name);
    }
    out.push_str(" [");
    out.push_str(&modifiers(element).join(", "));
    out.push(']');

    if element.children.is_empty() {
        out.push('\n');
        return;
    }
    out.push_str(" {\n");
    for &child in &element.children {
        write_element(scene, child, depth + 1, out);
    }
    out.push_str(&indent);
    out.push_str("}\n");
}

fn modifiers(element: &Element) -> Vec<String> {
    let b = &element.bounds;
    let mut mods = vec![
        format!("x: {}", b.x),
        format!("y: {}", b.y),
        format!("width: {}", b.width),
        format!("height: {}", b.height),
    ];
    if let ElementKind::AutoLayout(layout) = &element.kind {
        mods.push(format!("spacing: {}", layout.spacing));
        mods.push(format!("padding: {}", layout.padding));
    }
    if element.locked {
        mods.push("locked: true".to_string());
    }
    if let Some(fill) = &element.fill {
        mods.push(format!("fill: {}", fill));
    }
    mods
}
