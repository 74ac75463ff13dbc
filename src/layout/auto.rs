use crate::{
    foundation::core::IPoint, schedule::labels::WEEK_DAYS, transform::viewport::ViewportTransform,
};

/// Default inset of auto-placed telops from the cell/image corner, in preview pixels.
pub const DEFAULT_MARGIN: u32 = 24;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Direction in which the seven day cells are laid out.
pub enum Orientation {
    /// Seven columns side by side; anchors share one `y`.
    #[default]
    Row,
    /// Seven rows stacked vertically; anchors share one `x`.
    Column,
}

/// Evenly partition the scaled image footprint into seven cells and anchor one telop per cell.
///
/// Positions are preview space. Text size is not considered and overlap is not avoided.
/// Coordinates saturate at the `i32` range, so any margin is accepted.
pub fn auto_layout(
    orientation: Orientation,
    margin: u32,
    view: &ViewportTransform,
) -> [IPoint; WEEK_DAYS] {
    let margin = i32::try_from(margin).unwrap_or(i32::MAX);
    let origin = view.offset.offset(margin, margin);
    match orientation {
        Orientation::Row => {
            let cell = f64::from(view.scaled.width) / WEEK_DAYS as f64;
            std::array::from_fn(|i| origin.offset((i as f64 * cell).floor() as i32, 0))
        }
        Orientation::Column => {
            let cell = f64::from(view.scaled.height) / WEEK_DAYS as f64;
            std::array::from_fn(|i| origin.offset(0, (i as f64 * cell).floor() as i32))
        }
    }
}

/// Default anchor for the single free telop: image top-left inset by the default margin.
pub fn single_anchor(view: &ViewportTransform) -> IPoint {
    let m = DEFAULT_MARGIN as i32;
    view.offset.offset(m, m)
}
