//! Run a duplicate command over a whole selection

use std::cmp::Ordering;
use std::collections::HashSet;

use crate::scene::{ElementId, InsertPosition, Scene, SceneError};

use super::collision::resolve_collisions;
use super::container::adapt_container;
use super::direction::{Direction, Horizontal, Vertical};
use super::error::DuplicateError;
use super::gap::Gap;
use super::outcome::DuplicateOutcome;

/// Parameters of one duplicate command
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DuplicateRequest {
    pub direction: Direction,
    pub gap: Gap,
    pub push_enabled: bool,
}

impl DuplicateRequest {
    /// Auto gap with pushing enabled
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            gap: Gap::Auto,
            push_enabled: true,
        }
    }

    pub fn with_gap(mut self, gap: Gap) -> Self {
        self.gap = gap;
        self
    }

    pub fn with_push(mut self, enabled: bool) -> Self {
        self.push_enabled = enabled;
        self
    }
}

/// Where one copy ended up
struct Placed {
    copy: ElementId,
    gap: f64,
    container_managed: bool,
}

/// Duplicate every selected element in `request.direction`.
///
/// Elements are processed farthest-first along the direction so that earlier
/// copies never land on later originals. Originals and the copies made so far
/// are excluded from pushing for the whole batch. A failure on one element is
/// recorded in the outcome's warnings and the batch carries on.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(direction = %request.direction, gap = %request.gap, selected = selection.len())
)]
pub fn duplicate(
    scene: &mut Scene,
    selection: &[ElementId],
    request: &DuplicateRequest,
) -> Result<DuplicateOutcome, DuplicateError> {
    if selection.is_empty() {
        tracing::warn!("empty selection");
        return Err(DuplicateError::EmptySelection);
    }

    let ordered = order_selection(scene, selection, request.direction);
    let mut excluded: HashSet<ElementId> = ordered.iter().copied().collect();
    let mut outcome = DuplicateOutcome::new(request.direction, request.push_enabled);

    for id in ordered {
        match duplicate_one(scene, id, request, &mut excluded) {
            Ok(Some(placed)) => {
                outcome.created.push(placed.copy);
                if placed.container_managed {
                    outcome.container_managed = true;
                } else {
                    outcome.last_gap = Some(placed.gap);
                }
            }
            Ok(None) => tracing::debug!(element = %id, "skipping element without a parent"),
            Err(source) => {
                let element = scene
                    .get(id)
                    .map(|e| e.display_name())
                    .unwrap_or_else(|_| id.to_string());
                tracing::warn!(element = %element, error = %source, "duplicate failed");
                outcome
                    .warnings
                    .push(DuplicateError::ElementOperationFailed { id, element, source });
            }
        }
    }

    tracing::debug!(
        created = outcome.created.len(),
        failed = outcome.warnings.len(),
        "duplicate finished"
    );
    Ok(outcome)
}

/// Drop repeated ids, then sort farthest-first along each component of the
/// direction. The sort is stable, so ties keep selection order.
fn order_selection(scene: &Scene, selection: &[ElementId], direction: Direction) -> Vec<ElementId> {
    let mut seen = HashSet::new();
    let mut ordered: Vec<ElementId> = selection
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect();

    let position = |id: ElementId| scene.bounds(id).unwrap_or_default();
    ordered.sort_by(|&a, &b| {
        let (a, b) = (position(a), position(b));
        let horizontal = match direction.horizontal() {
            Some(Horizontal::Right) => b.x.total_cmp(&a.x),
            Some(Horizontal::Left) => a.x.total_cmp(&b.x),
            None => Ordering::Equal,
        };
        let vertical = match direction.vertical() {
            Some(Vertical::Bottom) => b.y.total_cmp(&a.y),
            Some(Vertical::Top) => a.y.total_cmp(&b.y),
            None => Ordering::Equal,
        };
        horizontal.then(vertical)
    });
    ordered
}

fn duplicate_one(
    scene: &mut Scene,
    id: ElementId,
    request: &DuplicateRequest,
    excluded: &mut HashSet<ElementId>,
) -> Result<Option<Placed>, SceneError> {
    let element = scene.get(id)?;
    let Some(parent) = element.parent else {
        return Ok(None);
    };
    let bounds = element.bounds;
    let gap = request.gap.resolve(element);
    let direction = request.direction;

    if scene.get(parent)?.kind.is_auto_layout() {
        let index = scene
            .child_index(id)
            .ok_or(SceneError::UnknownElement(id))?;
        let index = if direction.inserts_after() { index + 1 } else { index };
        let copy = scene.clone_subtree_into(id, parent, InsertPosition::At(index))?;
        excluded.insert(copy);
        tracing::debug!(original = %id, copy = %copy, index, "inserted into auto layout");
        return Ok(Some(Placed {
            copy,
            gap,
            container_managed: true,
        }));
    }

    let shift_x = bounds.width + gap;
    let shift_y = bounds.height + gap;
    if request.push_enabled {
        resolve_collisions(scene, id, direction, shift_x, shift_y, excluded)?;
    }

    let copy = scene.clone_subtree_into(id, parent, InsertPosition::Append)?;
    let target = direction.offset(bounds, shift_x, shift_y);
    scene.set_position(copy, target.x, target.y)?;
    excluded.insert(copy);
    adapt_container(scene, copy)?;

    tracing::debug!(original = %id, copy = %copy, x = target.x, y = target.y, gap, "placed copy");
    Ok(Some(Placed {
        copy,
        gap,
        container_managed: false,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{AutoLayout, ElementKind, LayoutAxis, Rect};
    use pretty_assertions::assert_eq;

    fn shape(scene: &mut Scene, parent: ElementId, x: f64, y: f64, w: f64, h: f64) -> ElementId {
        scene
            .add(parent, None, ElementKind::Shape, Rect::new(x, y, w, h))
            .unwrap()
    }

    #[test]
    fn test_single_element_right() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = shape(&mut scene, root, 0.0, 0.0, 100.0, 100.0);

        let outcome = duplicate(&mut scene, &[a], &DuplicateRequest::new(Direction::Right)).unwrap();

        assert_eq!(outcome.created.len(), 1);
        assert_eq!(
            scene.bounds(outcome.created[0]).unwrap(),
            Rect::new(140.0, 0.0, 100.0, 100.0)
        );
        assert_eq!(outcome.last_gap, Some(40.0));
        assert!(!outcome.container_managed);
    }

    #[test]
    fn test_empty_selection() {
        let mut scene = Scene::new();
        let before = scene.element_count();
        let err = duplicate(&mut scene, &[], &DuplicateRequest::new(Direction::Top)).unwrap_err();
        assert!(matches!(err, DuplicateError::EmptySelection));
        assert_eq!(scene.element_count(), before);
    }

    #[test]
    fn test_ordering_right_is_descending_x() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = shape(&mut scene, root, 0.0, 0.0, 10.0, 10.0);
        let b = shape(&mut scene, root, 300.0, 0.0, 10.0, 10.0);
        let c = shape(&mut scene, root, 150.0, 0.0, 10.0, 10.0);
        assert_eq!(order_selection(&scene, &[a, b, c], Direction::Right), vec![b, c, a]);
        assert_eq!(order_selection(&scene, &[a, b, c], Direction::Left), vec![a, c, b]);
        // No horizontal component: ties keep selection order
        assert_eq!(order_selection(&scene, &[c, a, b], Direction::Bottom), vec![c, a, b]);
    }

    #[test]
    fn test_ordering_diagonal_uses_both_keys() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = shape(&mut scene, root, 0.0, 0.0, 10.0, 10.0);
        let b = shape(&mut scene, root, 0.0, 200.0, 10.0, 10.0);
        let c = shape(&mut scene, root, 100.0, 50.0, 10.0, 10.0);
        assert_eq!(
            order_selection(&scene, &[a, b, c], Direction::BottomRight),
            vec![c, b, a]
        );
        assert_eq!(order_selection(&scene, &[a, b, c], Direction::TopLeft), vec![a, b, c]);
    }

    #[test]
    fn test_repeated_selection_duplicated_once() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = shape(&mut scene, root, 0.0, 0.0, 100.0, 100.0);
        let outcome =
            duplicate(&mut scene, &[a, a, a], &DuplicateRequest::new(Direction::Right)).unwrap();
        assert_eq!(outcome.created.len(), 1);
    }

    #[test]
    fn test_parentless_element_skipped() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = shape(&mut scene, root, 0.0, 0.0, 100.0, 100.0);
        let outcome =
            duplicate(&mut scene, &[root, a], &DuplicateRequest::new(Direction::Right)).unwrap();
        assert_eq!(outcome.created.len(), 1);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_failure_does_not_abort_batch() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = shape(&mut scene, root, 0.0, 0.0, 100.0, 100.0);
        let missing = ElementId(42);

        let outcome =
            duplicate(&mut scene, &[missing, a], &DuplicateRequest::new(Direction::Right)).unwrap();

        assert_eq!(outcome.created.len(), 1);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(matches!(
            outcome.warnings[0],
            DuplicateError::ElementOperationFailed { id, .. } if id == missing
        ));
    }

    #[test]
    fn test_auto_layout_insertion_index() {
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
                Rect::zero(),
            )
            .unwrap();
        let a = shape(&mut scene, row, 0.0, 0.0, 20.0, 20.0);
        let b = shape(&mut scene, row, 0.0, 0.0, 20.0, 20.0);
        scene.reflow(row).unwrap();

        let after = duplicate(&mut scene, &[a], &DuplicateRequest::new(Direction::Right)).unwrap();
        assert!(after.container_managed);
        assert_eq!(scene.children(row), &[a, after.created[0], b]);

        let before = duplicate(&mut scene, &[b], &DuplicateRequest::new(Direction::Left)).unwrap();
        assert_eq!(scene.children(row)[2], before.created[0]);
        assert_eq!(scene.children(row)[3], b);
    }

    #[test]
    fn test_fixed_gap_without_push() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = shape(&mut scene, root, 0.0, 0.0, 100.0, 50.0);
        let b = shape(&mut scene, root, 0.0, 60.0, 100.0, 50.0);

        let request = DuplicateRequest::new(Direction::Bottom)
            .with_gap(Gap::Fixed(5.0))
            .with_push(false);
        let outcome = duplicate(&mut scene, &[a], &request).unwrap();

        assert_eq!(scene.bounds(outcome.created[0]).unwrap(), Rect::new(0.0, 55.0, 100.0, 50.0));
        assert_eq!(scene.bounds(b).unwrap().y, 60.0);
    }
}
