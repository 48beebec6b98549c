//! Push siblings out of the way of an incoming duplicate
//!
//! The duplicate's target rectangle displaces every overlapping sibling by the
//! same shift, and each displaced sibling's new rectangle displaces further
//! siblings in turn. Positions are computed against the pre-push layout and
//! written back only once the whole chain is known.

use std::collections::{HashSet, VecDeque};

use crate::scene::{ElementId, Rect, Scene, SceneError, OVERLAP_MARGIN};

use super::direction::Direction;

/// Shift siblings of `original` that would collide with its duplicate.
///
/// `excluded` holds elements that must never move (the batch's originals and
/// the copies created so far). The original itself is never displaced.
/// Returns the displaced siblings in discovery order; an element without a
/// parent has no siblings, so nothing moves.
pub fn resolve_collisions(
    scene: &mut Scene,
    original: ElementId,
    direction: Direction,
    shift_x: f64,
    shift_y: f64,
    excluded: &HashSet<ElementId>,
) -> Result<Vec<ElementId>, SceneError> {
    let element = scene.get(original)?;
    let Some(parent) = element.parent else {
        return Ok(Vec::new());
    };
    let target = direction.offset(element.bounds, shift_x, shift_y);

    let siblings = scene
        .children(parent)
        .iter()
        .map(|&id| scene.bounds(id).map(|bounds| (id, bounds)))
        .collect::<Result<Vec<(ElementId, Rect)>, SceneError>>()?;

    let mut processed = HashSet::from([original]);
    let mut displaced = Vec::new();
    let mut frontier = VecDeque::from([target]);

    while let Some(occupied) = frontier.pop_front() {
        for &(id, bounds) in &siblings {
            if processed.contains(&id) || excluded.contains(&id) {
                continue;
            }
            if occupied.overlaps(&bounds, OVERLAP_MARGIN) {
                processed.insert(id);
                displaced.push((id, bounds));
                frontier.push_back(direction.offset(bounds, shift_x, shift_y));
            }
        }
    }

    for &(id, bounds) in &displaced {
        let moved = direction.offset(bounds, shift_x, shift_y);
        scene.set_position(id, moved.x, moved.y)?;
    }

    if !displaced.is_empty() {
        tracing::debug!(
            original = %original,
            direction = %direction,
            count = displaced.len(),
            "pushed siblings"
        );
    }
    Ok(displaced.into_iter().map(|(id, _)| id).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::ElementKind;
    use pretty_assertions::assert_eq;

    fn shape(scene: &mut Scene, x: f64, y: f64, w: f64, h: f64) -> ElementId {
        let root = scene.root();
        scene
            .add(root, None, ElementKind::Shape, Rect::new(x, y, w, h))
            .unwrap()
    }

    fn x_of(scene: &Scene, id: ElementId) -> f64 {
        scene.bounds(id).unwrap().x
    }

    #[test]
    fn test_chain_is_pushed_transitively() {
        let mut scene = Scene::new();
        let a = shape(&mut scene, 0.0, 0.0, 100.0, 100.0);
        let b = shape(&mut scene, 150.0, 0.0, 100.0, 100.0);
        let c = shape(&mut scene, 300.0, 0.0, 100.0, 100.0);
        let excluded = HashSet::from([a]);

        let moved = resolve_collisions(&mut scene, a, Direction::Right, 140.0, 140.0, &excluded)
            .unwrap();

        assert_eq!(moved, vec![b, c]);
        assert_eq!(x_of(&scene, a), 0.0);
        assert_eq!(x_of(&scene, b), 290.0);
        assert_eq!(x_of(&scene, c), 440.0);
    }

    #[test]
    fn test_unrelated_sibling_stays() {
        let mut scene = Scene::new();
        let a = shape(&mut scene, 0.0, 0.0, 100.0, 100.0);
        let below = shape(&mut scene, 150.0, 300.0, 100.0, 100.0);

        let moved =
            resolve_collisions(&mut scene, a, Direction::Right, 140.0, 140.0, &HashSet::new())
                .unwrap();

        assert!(moved.is_empty());
        assert_eq!(scene.bounds(below).unwrap(), Rect::new(150.0, 300.0, 100.0, 100.0));
    }

    #[test]
    fn test_excluded_sibling_never_moves() {
        let mut scene = Scene::new();
        let a = shape(&mut scene, 0.0, 0.0, 100.0, 100.0);
        let b = shape(&mut scene, 150.0, 0.0, 100.0, 100.0);
        let excluded = HashSet::from([a, b]);

        let moved = resolve_collisions(&mut scene, a, Direction::Right, 140.0, 140.0, &excluded)
            .unwrap();

        assert!(moved.is_empty());
        assert_eq!(x_of(&scene, b), 150.0);
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let mut scene = Scene::new();
        let a = shape(&mut scene, 0.0, 0.0, 100.0, 100.0);
        // Target spans 140..240; a neighbor starting at 240 only touches it
        let b = shape(&mut scene, 240.0, 0.0, 100.0, 100.0);

        resolve_collisions(&mut scene, a, Direction::Right, 140.0, 140.0, &HashSet::new())
            .unwrap();

        assert_eq!(x_of(&scene, b), 240.0);
    }

    #[test]
    fn test_only_shared_parent_is_considered() {
        let mut scene = Scene::new();
        let root = scene.root();
        let frame = scene
            .add(root, None, ElementKind::Frame, Rect::new(0.0, 0.0, 500.0, 500.0))
            .unwrap();
        let a = scene
            .add(frame, None, ElementKind::Shape, Rect::new(0.0, 0.0, 100.0, 100.0))
            .unwrap();
        let outside = shape(&mut scene, 150.0, 0.0, 100.0, 100.0);

        let moved =
            resolve_collisions(&mut scene, a, Direction::Right, 140.0, 140.0, &HashSet::new())
                .unwrap();

        assert!(moved.is_empty());
        assert_eq!(x_of(&scene, outside), 150.0);
    }

    #[test]
    fn test_parentless_element_is_noop() {
        let mut scene = Scene::new();
        let root = scene.root();
        let moved =
            resolve_collisions(&mut scene, root, Direction::Bottom, 10.0, 10.0, &HashSet::new())
                .unwrap();
        assert!(moved.is_empty());
    }

    #[test]
    fn test_diagonal_push_moves_both_axes() {
        let mut scene = Scene::new();
        let a = shape(&mut scene, 0.0, 0.0, 100.0, 100.0);
        let b = shape(&mut scene, 160.0, 160.0, 50.0, 50.0);

        resolve_collisions(&mut scene, a, Direction::BottomRight, 140.0, 140.0, &HashSet::new())
            .unwrap();

        assert_eq!(scene.bounds(b).unwrap(), Rect::new(300.0, 300.0, 50.0, 50.0));
    }

    #[test]
    fn test_unknown_original_is_error() {
        let mut scene = Scene::new();
        let err = resolve_collisions(
            &mut scene,
            ElementId(99),
            Direction::Right,
            1.0,
            1.0,
            &HashSet::new(),
        )
        .unwrap_err();
        assert!(matches!(err, SceneError::UnknownElement(ElementId(99))));
    }
}
