//! Core types for the scene arena

/// Tolerance used when comparing rectangle edges, absorbs sub-pixel noise
pub const OVERLAP_MARGIN: f64 = 0.5;

/// An axis-aligned rectangle in its parent's coordinate space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a zero-sized rectangle at the origin
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0, 0.0)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Same size, moved by `(dx, dy)`
    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Intersection test with both rectangles shrunk inward by `margin`.
    ///
    /// Edges closer than the margin do not count, so neighbors that merely touch
    /// are not reported as overlapping.
    pub fn overlaps(&self, other: &Rect, margin: f64) -> bool {
        other.x < self.right() - margin
            && other.right() > self.x + margin
            && other.y < self.bottom() - margin
            && other.bottom() > self.y + margin
    }

    /// Compute the union of two rectangles (smallest rectangle containing both)
    pub fn union(&self, other: &Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(x, y, right - x, bottom - y)
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::zero()
    }
}

/// Stable identity of an element: its slot in the scene arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub usize);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Primary axis of an auto layout container
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutAxis {
    Horizontal,
    Vertical,
}

/// Settings of an auto layout container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoLayout {
    pub axis: LayoutAxis,
    /// Space between consecutive children
    pub spacing: f64,
    /// Inset applied on every side
    pub padding: f64,
}

/// Kind of element in the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementKind {
    /// Plain positioned element
    Shape,
    /// Free-form container; children keep their stored coordinates
    Frame,
    /// Padded grouping container that grows to keep its children inside
    Section,
    /// Container whose children are positioned by layout rules and child order
    AutoLayout(AutoLayout),
}

impl ElementKind {
    pub fn is_container(&self) -> bool {
        !matches!(self, ElementKind::Shape)
    }

    pub fn is_auto_layout(&self) -> bool {
        matches!(self, ElementKind::AutoLayout(_))
    }

    pub fn is_section(&self) -> bool {
        matches!(self, ElementKind::Section)
    }

    /// Keyword used for this kind in scene descriptions
    pub fn keyword(&self) -> &'static str {
        match self {
            ElementKind::Shape => "rect",
            ElementKind::Frame => "frame",
            ElementKind::Section => "section",
            ElementKind::AutoLayout(layout) => match layout.axis {
                LayoutAxis::Horizontal => "row",
                LayoutAxis::Vertical => "col",
            },
        }
    }
}

/// A node of the scene tree
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub id: ElementId,
    pub name: Option<String>,
    pub kind: ElementKind,
    pub bounds: Rect,
    pub locked: bool,
    pub fill: Option<String>,
    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,
}

impl Element {
    /// Name for log and error messages: the element name, or its id
    pub fn display_name(&self) -> String {
        match &self.name {
            Some(name) => format!("\"{}\"", name),
            None => format!("<{} {}>", self.kind.keyword(), self.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.bottom(), 70.0);
    }

    #[test]
    fn test_overlaps_intersecting() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 50.0, 100.0, 100.0);
        assert!(a.overlaps(&b, OVERLAP_MARGIN));
        assert!(b.overlaps(&a, OVERLAP_MARGIN));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let right = Rect::new(100.0, 0.0, 50.0, 100.0);
        let below = Rect::new(0.0, 100.0, 100.0, 50.0);
        assert!(!a.overlaps(&right, OVERLAP_MARGIN));
        assert!(!a.overlaps(&below, OVERLAP_MARGIN));
    }

    #[test]
    fn test_sub_margin_overlap_is_ignored() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(99.6, 0.0, 50.0, 100.0);
        assert!(!a.overlaps(&b, OVERLAP_MARGIN));
        let c = Rect::new(99.0, 0.0, 50.0, 100.0);
        assert!(a.overlaps(&c, OVERLAP_MARGIN));
    }

    #[test]
    fn test_disjoint_on_one_axis() {
        let a = Rect::new(0.0, 0.0, 100.0, 100.0);
        let b = Rect::new(50.0, 200.0, 100.0, 100.0);
        assert!(!a.overlaps(&b, OVERLAP_MARGIN));
    }

    #[test]
    fn test_union() {
        let a = Rect::new(0.0, 0.0, 50.0, 50.0);
        let b = Rect::new(100.0, 100.0, 50.0, 50.0);
        assert_eq!(a.union(&b), Rect::new(0.0, 0.0, 150.0, 150.0));
    }

    #[test]
    fn test_kind_keywords() {
        let row = ElementKind::AutoLayout(AutoLayout {
            axis: LayoutAxis::Horizontal,
            spacing: 0.0,
            padding: 0.0,
        });
        assert_eq!(row.keyword(), "row");
        assert!(row.is_auto_layout());
        assert!(!ElementKind::Shape.is_container());
        assert!(ElementKind::Section.is_section());
    }
}
