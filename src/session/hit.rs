use crate::foundation::core::{IPoint, PixelRect};

/// Index of the box under `p`, or of the box whose center is nearest to `p`.
///
/// Containment is checked first, in order, with inclusive edges. Otherwise the nearest center
/// wins; ties go to the lower index. `None` only for an empty slice.
pub fn hit_test(boxes: &[PixelRect], p: IPoint) -> Option<usize> {
    if let Some(i) = boxes.iter().position(|b| b.contains(p)) {
        return Some(i);
    }

    let mut best: Option<(usize, f64)> = None;
    for (i, b) in boxes.iter().enumerate() {
        let (cx, cy) = b.center();
        let dx = cx - f64::from(p.x);
        let dy = cy - f64::from(p.y);
        let d = dx * dx + dy * dy;
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// An in-progress drag: which block, and where the pointer grabbed it relative to its anchor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Drag {
    pub index: usize,
    pub grab: IPoint,
}

impl Drag {
    pub fn start(index: usize, pointer: IPoint, anchor: IPoint) -> Self {
        Self {
            index,
            grab: IPoint::new(
                pointer.x.saturating_sub(anchor.x),
                pointer.y.saturating_sub(anchor.y),
            ),
        }
    }

    /// New anchor that keeps the grab offset under `pointer`.
    pub fn anchor_for(&self, pointer: IPoint) -> IPoint {
        IPoint::new(
            pointer.x.saturating_sub(self.grab.x),
            pointer.y.saturating_sub(self.grab.y),
        )
    }
}
