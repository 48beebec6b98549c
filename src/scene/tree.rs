//! Arena-backed scene tree
//!
//! Elements live in a single `Vec` and refer to each other by [`ElementId`].
//! Parent links are plain ids, so walking up and down the tree is O(1) per step
//! without shared ownership. Every scene has an implicit root frame holding the
//! top-level elements; the root itself has no parent.

use std::collections::VecDeque;

use super::error::SceneError;
use super::types::{Element, ElementId, ElementKind, LayoutAxis, Rect};

/// Where a new child goes in its parent's child list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// After the last existing child
    Append,
    /// At the given index, shifting later children back
    At(usize),
}

/// A mutable tree of positioned elements
#[derive(Debug, Clone)]
pub struct Scene {
    elements: Vec<Element>,
    root: ElementId,
}

impl Scene {
    /// Create a scene holding only the root frame
    pub fn new() -> Self {
        let root = ElementId(0);
        Self {
            elements: vec![Element {
                id: root,
                name: None,
                kind: ElementKind::Frame,
                bounds: Rect::zero(),
                locked: false,
                fill: None,
                parent: None,
                children: vec![],
            }],
            root,
        }
    }

    /// The implicit root frame
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Number of elements in the arena, root included
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// All elements in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    pub fn get(&self, id: ElementId) -> Result<&Element, SceneError> {
        self.elements
            .get(id.0)
            .ok_or(SceneError::UnknownElement(id))
    }

    fn get_mut(&mut self, id: ElementId) -> Result<&mut Element, SceneError> {
        self.elements
            .get_mut(id.0)
            .ok_or(SceneError::UnknownElement(id))
    }

    pub fn contains(&self, id: ElementId) -> bool {
        id.0 < self.elements.len()
    }

    /// Parent of an element; `None` for the root and for unknown ids
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.elements.get(id.0).and_then(|e| e.parent)
    }

    /// Children in order; empty for leaves and unknown ids
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.elements
            .get(id.0)
            .map(|e| e.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn bounds(&self, id: ElementId) -> Result<Rect, SceneError> {
        Ok(self.get(id)?.bounds)
    }

    /// Position of an element within its parent's child list
    pub fn child_index(&self, id: ElementId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&c| c == id)
    }

    /// First element with the given name, in creation order
    pub fn find_by_name(&self, name: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .find(|e| e.name.as_deref() == Some(name))
            .map(|e| e.id)
    }

    /// Bounds in scene coordinates (accumulating every ancestor's offset)
    pub fn absolute_bounds(&self, id: ElementId) -> Result<Rect, SceneError> {
        let element = self.get(id)?;
        let mut bounds = element.bounds;
        let mut current = element.parent;
        while let Some(ancestor) = current {
            let ancestor = self.get(ancestor)?;
            bounds = bounds.translate(ancestor.bounds.x, ancestor.bounds.y);
            current = ancestor.parent;
        }
        Ok(bounds)
    }

    /// Create a new element as the last child of `parent`
    pub fn add(
        &mut self,
        parent: ElementId,
        name: Option<String>,
        kind: ElementKind,
        bounds: Rect,
    ) -> Result<ElementId, SceneError> {
        let parent_element = self.get(parent)?;
        if !parent_element.kind.is_container() {
            return Err(SceneError::NotAContainer {
                element: parent_element.display_name(),
            });
        }
        let id = ElementId(self.elements.len());
        let element = Element {
            id,
            name,
            kind,
            bounds,
            locked: false,
            fill: None,
            parent: Some(parent),
            children: vec![],
        };
        if bounds.width < 0.0 || bounds.height < 0.0 {
            return Err(SceneError::negative_size(
                element.display_name(),
                bounds.width,
                bounds.height,
            ));
        }
        self.elements.push(element);
        self.get_mut(parent)?.children.push(id);
        Ok(id)
    }

    pub fn set_position(&mut self, id: ElementId, x: f64, y: f64) -> Result<(), SceneError> {
        let element = self.get_mut(id)?;
        element.bounds.x = x;
        element.bounds.y = y;
        Ok(())
    }

    /// Resize an element. A parent auto layout is reflowed to account for it.
    pub fn set_size(&mut self, id: ElementId, width: f64, height: f64) -> Result<(), SceneError> {
        let element = self.get_mut(id)?;
        if width < 0.0 || height < 0.0 {
            return Err(SceneError::negative_size(
                element.display_name(),
                width,
                height,
            ));
        }
        element.bounds.width = width;
        element.bounds.height = height;
        if let Some(parent) = element.parent {
            self.reflow(parent)?;
        }
        Ok(())
    }

    pub fn set_locked(&mut self, id: ElementId, locked: bool) -> Result<(), SceneError> {
        self.get_mut(id)?.locked = locked;
        Ok(())
    }

    pub fn set_fill(&mut self, id: ElementId, fill: Option<String>) -> Result<(), SceneError> {
        self.get_mut(id)?.fill = fill;
        Ok(())
    }

    /// Deep-copy `source` and its descendants under `parent`.
    ///
    /// The copy keeps geometry, kind, fill and the locked flag; every copied
    /// node receives a fresh id. Named nodes get the first free
    /// `<name>_copy`, `<name>_copy2`, ... so names stay unique. Inserting
    /// into an auto layout reflows it.
    pub fn clone_subtree_into(
        &mut self,
        source: ElementId,
        parent: ElementId,
        position: InsertPosition,
    ) -> Result<ElementId, SceneError> {
        self.get(source)?;
        let parent_element = self.get(parent)?;
        if !parent_element.kind.is_container() {
            return Err(SceneError::NotAContainer {
                element: parent_element.display_name(),
            });
        }
        let len = parent_element.children.len();
        let index = match position {
            InsertPosition::Append => len,
            InsertPosition::At(index) if index <= len => index,
            InsertPosition::At(index) => {
                return Err(SceneError::IndexOutOfRange {
                    element: parent_element.display_name(),
                    index,
                    len,
                })
            }
        };

        let copy = self.copy_subtree(source, parent)?;
        self.get_mut(parent)?.children.insert(index, copy);
        self.reflow(parent)?;
        Ok(copy)
    }

    /// Copy a subtree breadth-first so each parent sees its children in order.
    /// The copied root is returned detached from `parent`'s child list.
    fn copy_subtree(
        &mut self,
        source: ElementId,
        parent: ElementId,
    ) -> Result<ElementId, SceneError> {
        let mut pending = VecDeque::from([(source, parent, true)]);
        let mut copied_root = None;

        while let Some((original_id, new_parent, is_root)) = pending.pop_front() {
            let original = self.get(original_id)?.clone();
            let id = ElementId(self.elements.len());
            for &child in &original.children {
                pending.push_back((child, id, false));
            }
            let name = original.name.as_deref().map(|n| self.copy_name(n));
            self.elements.push(Element {
                id,
                name,
                parent: Some(new_parent),
                children: vec![],
                ..original
            });
            if is_root {
                copied_root = Some(id);
            } else {
                self.get_mut(new_parent)?.children.push(id);
            }
        }

        copied_root.ok_or(SceneError::UnknownElement(source))
    }

    fn copy_name(&self, name: &str) -> String {
        let base = format!("{name}_copy");
        let taken = |candidate: &str| {
            self.elements
                .iter()
                .any(|e| e.name.as_deref() == Some(candidate))
        };
        if !taken(&base) {
            return base;
        }
        (2..)
            .map(|n| format!("{base}{n}"))
            .find(|candidate| !taken(candidate))
            .unwrap_or(base)
    }

    /// Re-apply auto layout rules to `container` and to every auto layout
    /// ancestor whose content size may have changed. No-op for other kinds.
    ///
    /// Children are placed one after another along the primary axis starting at
    /// `padding`, separated by `spacing`; the cross axis is pinned to `padding`.
    /// The container hugs its content.
    pub fn reflow(&mut self, container: ElementId) -> Result<(), SceneError> {
        let mut current = Some(container);
        while let Some(id) = current {
            let element = self.get(id)?;
            let layout = match element.kind {
                ElementKind::AutoLayout(layout) => layout,
                _ => break,
            };
            let children = element.children.clone();

            let mut cursor = layout.padding;
            let mut cross: f64 = 0.0;
            for (i, &child) in children.iter().enumerate() {
                if i > 0 {
                    cursor += layout.spacing;
                }
                let child = self.get_mut(child)?;
                match layout.axis {
                    LayoutAxis::Horizontal => {
                        child.bounds.x = cursor;
                        child.bounds.y = layout.padding;
                        cursor += child.bounds.width;
                        cross = cross.max(child.bounds.height);
                    }
                    LayoutAxis::Vertical => {
                        child.bounds.x = layout.padding;
                        child.bounds.y = cursor;
                        cursor += child.bounds.height;
                        cross = cross.max(child.bounds.width);
                    }
                }
            }

            let primary = cursor + layout.padding;
            let cross = cross + 2.0 * layout.padding;
            let element = self.get_mut(id)?;
            match layout.axis {
                LayoutAxis::Horizontal => {
                    element.bounds.width = primary;
                    element.bounds.height = cross;
                }
                LayoutAxis::Vertical => {
                    element.bounds.width = cross;
                    element.bounds.height = primary;
                }
            }
            current = element.parent;
        }
        Ok(())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::types::AutoLayout;

    fn row(spacing: f64, padding: f64) -> ElementKind {
        ElementKind::AutoLayout(AutoLayout {
            axis: LayoutAxis::Horizontal,
            spacing,
            padding,
        })
    }

    #[test]
    fn test_add_links_parent_and_children() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene
            .add(root, Some("a".into()), ElementKind::Shape, Rect::new(0.0, 0.0, 10.0, 10.0))
            .unwrap();
        assert_eq!(scene.parent(a), Some(root));
        assert_eq!(scene.children(root), &[a]);
        assert_eq!(scene.find_by_name("a"), Some(a));
        assert_eq!(scene.child_index(a), Some(0));
    }

    #[test]
    fn test_add_under_shape_fails() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene
            .add(root, None, ElementKind::Shape, Rect::new(0.0, 0.0, 10.0, 10.0))
            .unwrap();
        let err = scene
            .add(a, None, ElementKind::Shape, Rect::zero())
            .unwrap_err();
        assert!(matches!(err, SceneError::NotAContainer { .. }));
    }

    #[test]
    fn test_negative_size_rejected() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene
            .add(root, None, ElementKind::Shape, Rect::new(0.0, 0.0, 10.0, 10.0))
            .unwrap();
        assert!(scene.set_size(a, -1.0, 5.0).is_err());
        assert_eq!(scene.bounds(a).unwrap().width, 10.0);
    }

    #[test]
    fn test_clone_subtree_into_copies_subtree_with_fresh_ids() {
        let mut scene = Scene::new();
        let root = scene.root();
        let frame = scene
            .add(root, Some("f".into()), ElementKind::Frame, Rect::new(5.0, 5.0, 200.0, 200.0))
            .unwrap();
        let a = scene
            .add(frame, Some("a".into()), ElementKind::Shape, Rect::new(1.0, 2.0, 3.0, 4.0))
            .unwrap();
        let b = scene
            .add(frame, Some("b".into()), ElementKind::Shape, Rect::new(10.0, 2.0, 3.0, 4.0))
            .unwrap();
        scene.set_locked(frame, true).unwrap();

        let copy = scene.clone_subtree_into(frame, root, InsertPosition::Append).unwrap();

        assert_ne!(copy, frame);
        assert_eq!(scene.children(root), &[frame, copy]);
        let copy_element = scene.get(copy).unwrap();
        assert!(copy_element.locked);
        assert_eq!(copy_element.bounds, scene.bounds(frame).unwrap());

        let copied_children = scene.children(copy).to_vec();
        assert_eq!(copied_children.len(), 2);
        assert!(!copied_children.contains(&a));
        assert!(!copied_children.contains(&b));
        assert_eq!(scene.get(copy).unwrap().name.as_deref(), Some("f_copy"));
        assert_eq!(scene.get(copied_children[0]).unwrap().name.as_deref(), Some("a_copy"));
        assert_eq!(scene.get(copied_children[1]).unwrap().name.as_deref(), Some("b_copy"));
        assert_eq!(scene.parent(copied_children[0]), Some(copy));
        // Originals are untouched
        assert_eq!(scene.children(frame), &[a, b]);

        let again = scene.clone_subtree_into(frame, root, InsertPosition::Append).unwrap();
        assert_eq!(scene.get(again).unwrap().name.as_deref(), Some("f_copy2"));
    }

    #[test]
    fn test_clone_subtree_into_index_out_of_range() {
        let mut scene = Scene::new();
        let root = scene.root();
        let a = scene
            .add(root, None, ElementKind::Shape, Rect::new(0.0, 0.0, 10.0, 10.0))
            .unwrap();
        let before = scene.element_count();
        let err = scene
            .clone_subtree_into(a, root, InsertPosition::At(5))
            .unwrap_err();
        assert!(matches!(err, SceneError::IndexOutOfRange { index: 5, len: 1, .. }));
        assert_eq!(scene.element_count(), before);
    }

    #[test]
    fn test_clone_container_into_itself_terminates() {
        let mut scene = Scene::new();
        let root = scene.root();
        let frame = scene
            .add(root, None, ElementKind::Frame, Rect::new(0.0, 0.0, 100.0, 100.0))
            .unwrap();
        scene
            .add(frame, None, ElementKind::Shape, Rect::new(0.0, 0.0, 10.0, 10.0))
            .unwrap();
        let copy = scene.clone_subtree_into(frame, frame, InsertPosition::Append).unwrap();
        assert_eq!(scene.children(frame).len(), 2);
        assert_eq!(scene.children(copy).len(), 1);
    }

    #[test]
    fn test_reflow_row_hugs_content() {
        let mut scene = Scene::new();
        let root = scene.root();
        let list = scene
            .add(root, None, row(10.0, 5.0), Rect::new(50.0, 50.0, 0.0, 0.0))
            .unwrap();
        let a = scene
            .add(list, None, ElementKind::Shape, Rect::new(0.0, 0.0, 40.0, 20.0))
            .unwrap();
        let b = scene
            .add(list, None, ElementKind::Shape, Rect::new(0.0, 0.0, 60.0, 30.0))
            .unwrap();
        scene.reflow(list).unwrap();

        assert_eq!(scene.bounds(a).unwrap(), Rect::new(5.0, 5.0, 40.0, 20.0));
        assert_eq!(scene.bounds(b).unwrap(), Rect::new(55.0, 5.0, 60.0, 30.0));
        assert_eq!(scene.bounds(list).unwrap(), Rect::new(50.0, 50.0, 120.0, 40.0));
    }

    #[test]
    fn test_clone_subtree_into_auto_layout_reflows() {
        let mut scene = Scene::new();
        let root = scene.root();
        let list = scene
            .add(root, None, row(10.0, 0.0), Rect::zero())
            .unwrap();
        let a = scene
            .add(list, None, ElementKind::Shape, Rect::new(0.0, 0.0, 40.0, 20.0))
            .unwrap();
        let b = scene
            .add(list, None, ElementKind::Shape, Rect::new(0.0, 0.0, 40.0, 20.0))
            .unwrap();
        scene.reflow(list).unwrap();

        let copy = scene.clone_subtree_into(a, list, InsertPosition::At(1)).unwrap();

        assert_eq!(scene.children(list), &[a, copy, b]);
        assert_eq!(scene.bounds(copy).unwrap().x, 50.0);
        assert_eq!(scene.bounds(b).unwrap().x, 100.0);
        assert_eq!(scene.bounds(list).unwrap().width, 140.0);
    }

    #[test]
    fn test_absolute_bounds_accumulates_offsets() {
        let mut scene = Scene::new();
        let root = scene.root();
        let outer = scene
            .add(root, None, ElementKind::Frame, Rect::new(100.0, 50.0, 500.0, 500.0))
            .unwrap();
        let inner = scene
            .add(outer, None, ElementKind::Section, Rect::new(10.0, 20.0, 300.0, 300.0))
            .unwrap();
        let a = scene
            .add(inner, None, ElementKind::Shape, Rect::new(1.0, 2.0, 10.0, 10.0))
            .unwrap();
        assert_eq!(
            scene.absolute_bounds(a).unwrap(),
            Rect::new(111.0, 72.0, 10.0, 10.0)
        );
    }
}
