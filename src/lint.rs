//! Lint checks for scene defects
//!
//! Reports what a duplicate batch can leave behind: siblings that overlap and
//! children that stick out of their section.

use std::fmt;

use crate::scene::{ElementId, ElementKind, Scene, OVERLAP_MARGIN};

/// A lint warning about a scene defect
#[derive(Debug, Clone, PartialEq)]
pub struct LintWarning {
    pub category: LintCategory,
    pub message: String,
    /// Elements involved, in scene order
    pub elements: Vec<ElementId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    Overlap,
    Containment,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::Overlap => write!(f, "overlap"),
            LintCategory::Containment => write!(f, "containment"),
        }
    }
}

impl fmt::Display for LintWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category, self.message)
    }
}

/// Run all lint checks on a scene.
pub fn check(scene: &Scene) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    check_overlaps(scene, &mut warnings);
    check_containment(scene, &mut warnings);
    warnings
}

// ── Sibling overlap ───────────────────────────────────────────────

fn check_overlaps(scene: &Scene, warnings: &mut Vec<LintWarning>) {
    for parent in scene.iter() {
        // Auto layouts place their children themselves
        if !parent.kind.is_container() || parent.kind.is_auto_layout() {
            continue;
        }
        let children = &parent.children;
        for (i, &a) in children.iter().enumerate() {
            for &b in &children[i + 1..] {
                let (Ok(ea), Ok(eb)) = (scene.get(a), scene.get(b)) else {
                    continue;
                };
                if ea.bounds.overlaps(&eb.bounds, OVERLAP_MARGIN) {
                    warnings.push(LintWarning {
                        category: LintCategory::Overlap,
                        message: format!(
                            "{} overlaps {}",
                            ea.display_name(),
                            eb.display_name()
                        ),
                        elements: vec![a, b],
                    });
                }
            }
        }
    }
}

// ── Section containment ───────────────────────────────────────────

fn check_containment(scene: &Scene, warnings: &mut Vec<LintWarning>) {
    for section in scene.iter().filter(|e| e.kind == ElementKind::Section) {
        let (width, height) = (section.bounds.width, section.bounds.height);
        for &child in &section.children {
            let Ok(element) = scene.get(child) else {
                continue;
            };
            let b = element.bounds;
            if b.x < 0.0 || b.y < 0.0 || b.right() > width || b.bottom() > height {
                warnings.push(LintWarning {
                    category: LintCategory::Containment,
                    message: format!(
                        "{} extends outside section {}",
                        element.display_name(),
                        section.display_name()
                    ),
                    elements: vec![section.id, child],
                });
            }
        }
    }
}
