//! Grow an enclosing section so a new duplicate stays inside it

use crate::scene::{ElementId, Scene, SceneError};

/// Space kept between a section's edge and the duplicate that triggered growth
pub const SECTION_PADDING: f64 = 80.0;

/// Extend `element`'s parent section when the element sits closer than
/// [`SECTION_PADDING`] to (or beyond) one of its edges.
///
/// Only unlocked sections are adapted. Growing past the left or top edge moves
/// the section's origin and shifts its unlocked children the opposite way, so
/// everything keeps its position on the canvas. Locked children are left at
/// their relative position. A section inside an auto layout keeps the
/// position the layout assigns it. Returns whether the section changed.
pub fn adapt_container(scene: &mut Scene, element: ElementId) -> Result<bool, SceneError> {
    let Some(parent) = scene.get(element)?.parent else {
        return Ok(false);
    };
    let section = scene.get(parent)?;
    if !section.kind.is_section() || section.locked {
        return Ok(false);
    }

    let mut changed = false;

    let (bounds, container) = (scene.bounds(element)?, scene.bounds(parent)?);
    if bounds.right() > container.width - SECTION_PADDING {
        scene.set_size(parent, bounds.right() + SECTION_PADDING, container.height)?;
        changed = true;
    }

    let (bounds, container) = (scene.bounds(element)?, scene.bounds(parent)?);
    if bounds.bottom() > container.height - SECTION_PADDING {
        scene.set_size(parent, container.width, bounds.bottom() + SECTION_PADDING)?;
        changed = true;
    }

    let (bounds, container) = (scene.bounds(element)?, scene.bounds(parent)?);
    if bounds.x < SECTION_PADDING {
        let shift = bounds.x - SECTION_PADDING;
        scene.set_size(parent, container.width - shift, container.height)?;
        move_origin(scene, parent, container.x + shift, container.y)?;
        shift_unlocked_children(scene, parent, -shift, 0.0)?;
        changed = true;
    }

    let (bounds, container) = (scene.bounds(element)?, scene.bounds(parent)?);
    if bounds.y < SECTION_PADDING {
        let shift = bounds.y - SECTION_PADDING;
        scene.set_size(parent, container.width, container.height - shift)?;
        move_origin(scene, parent, container.x, container.y + shift)?;
        shift_unlocked_children(scene, parent, 0.0, -shift)?;
        changed = true;
    }

    if changed {
        tracing::debug!(section = %parent, bounds = ?scene.bounds(parent)?, "section grown");
    }
    Ok(changed)
}

/// Move a section's origin, then let an enclosing auto layout place it again
fn move_origin(scene: &mut Scene, section: ElementId, x: f64, y: f64) -> Result<(), SceneError> {
    scene.set_position(section, x, y)?;
    if let Some(parent) = scene.get(section)?.parent {
        scene.reflow(parent)?;
    }
    Ok(())
}

fn shift_unlocked_children(
    scene: &mut Scene,
    parent: ElementId,
    dx: f64,
    dy: f64,
) -> Result<(), SceneError> {
    let children = scene.children(parent).to_vec();
    for child in children {
        let element = scene.get(child)?;
        if element.locked {
            continue;
        }
        let moved = element.bounds.translate(dx, dy);
        scene.set_position(child, moved.x, moved.y)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{AutoLayout, ElementKind, LayoutAxis, Rect};
    use pretty_assertions::assert_eq;

    fn section_with_child(child: Rect) -> (Scene, ElementId, ElementId) {
        let mut scene = Scene::new();
        let root = scene.root();
        let section = scene
            .add(root, None, ElementKind::Section, Rect::new(0.0, 0.0, 500.0, 300.0))
            .unwrap();
        let child = scene.add(section, None, ElementKind::Shape, child).unwrap();
        (scene, section, child)
    }

    #[test]
    fn test_right_overflow_grows_width() {
        let (mut scene, section, child) = section_with_child(Rect::new(400.0, 100.0, 100.0, 100.0));
        assert!(adapt_container(&mut scene, child).unwrap());
        assert_eq!(scene.bounds(section).unwrap(), Rect::new(0.0, 0.0, 580.0, 300.0));
    }

    #[test]
    fn test_bottom_overflow_grows_height() {
        let (mut scene, section, child) = section_with_child(Rect::new(100.0, 250.0, 100.0, 100.0));
        assert!(adapt_container(&mut scene, child).unwrap());
        assert_eq!(scene.bounds(section).unwrap(), Rect::new(0.0, 0.0, 500.0, 430.0));
    }

    #[test]
    fn test_left_overflow_moves_origin_and_children() {
        let mut scene = Scene::new();
        let root = scene.root();
        let section = scene
            .add(root, None, ElementKind::Section, Rect::new(0.0, 0.0, 500.0, 300.0))
            .unwrap();
        let pinned = scene
            .add(section, None, ElementKind::Shape, Rect::new(200.0, 100.0, 50.0, 50.0))
            .unwrap();
        scene.set_locked(pinned, true).unwrap();
        let copy = scene
            .add(section, None, ElementKind::Shape, Rect::new(-10.0, 100.0, 50.0, 50.0))
            .unwrap();

        assert!(adapt_container(&mut scene, copy).unwrap());

        assert_eq!(scene.bounds(section).unwrap(), Rect::new(-90.0, 0.0, 590.0, 300.0));
        assert_eq!(scene.bounds(copy).unwrap().x, 80.0);
        assert_eq!(scene.bounds(pinned).unwrap().x, 200.0);
    }

    #[test]
    fn test_top_overflow_moves_origin() {
        let (mut scene, section, child) = section_with_child(Rect::new(100.0, 30.0, 100.0, 100.0));
        assert!(adapt_container(&mut scene, child).unwrap());
        assert_eq!(scene.bounds(section).unwrap(), Rect::new(0.0, -50.0, 500.0, 350.0));
        assert_eq!(scene.bounds(child).unwrap().y, 80.0);
    }

    #[test]
    fn test_comfortable_child_leaves_section_alone() {
        let (mut scene, section, child) = section_with_child(Rect::new(100.0, 100.0, 100.0, 100.0));
        assert!(!adapt_container(&mut scene, child).unwrap());
        assert_eq!(scene.bounds(section).unwrap(), Rect::new(0.0, 0.0, 500.0, 300.0));
    }

    #[test]
    fn test_locked_section_is_untouched() {
        let (mut scene, section, child) = section_with_child(Rect::new(450.0, 100.0, 100.0, 100.0));
        scene.set_locked(section, true).unwrap();
        assert!(!adapt_container(&mut scene, child).unwrap());
        assert_eq!(scene.bounds(section).unwrap().width, 500.0);
    }

    #[test]
    fn test_section_in_auto_layout_keeps_layout_position() {
        let mut scene = Scene::new();
        let root = scene.root();
        let row = scene
            .add(
                root,
                None,
                ElementKind::AutoLayout(AutoLayout {
                    axis: LayoutAxis::Horizontal,
                    spacing: 10.0,
                    padding: 0.0,
                }),
                Rect::default(),
            )
            .unwrap();
        scene
            .add(row, None, ElementKind::Shape, Rect::new(0.0, 0.0, 50.0, 50.0))
            .unwrap();
        let section = scene
            .add(row, None, ElementKind::Section, Rect::new(0.0, 0.0, 300.0, 300.0))
            .unwrap();
        scene.reflow(row).unwrap();
        let copy = scene
            .add(section, None, ElementKind::Shape, Rect::new(-130.0, 100.0, 100.0, 100.0))
            .unwrap();

        assert!(adapt_container(&mut scene, copy).unwrap());

        assert_eq!(scene.bounds(section).unwrap(), Rect::new(60.0, 0.0, 510.0, 300.0));
        assert_eq!(scene.bounds(copy).unwrap().x, 80.0);
        assert_eq!(scene.bounds(row).unwrap().width, 570.0);
    }

    #[test]
    fn test_frames_are_not_adapted() {
        let mut scene = Scene::new();
        let root = scene.root();
        let frame = scene
            .add(root, None, ElementKind::Frame, Rect::new(0.0, 0.0, 200.0, 200.0))
            .unwrap();
        let child = scene
            .add(frame, None, ElementKind::Shape, Rect::new(180.0, 180.0, 100.0, 100.0))
            .unwrap();
        assert!(!adapt_container(&mut scene, child).unwrap());
        assert_eq!(scene.bounds(frame).unwrap(), Rect::new(0.0, 0.0, 200.0, 200.0));
    }
}
