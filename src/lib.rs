//! Telop composition for weekly schedule graphics.
//!
//! A base image gets up to seven text overlays ("telops"), one per weekday, labelled with the
//! date and weekday name plus optional body text, or a single free telop. Layouts persist as
//! scale-independent presets that a non-interactive generator fills in for the current week.
//!
//! # Pipeline overview
//!
//! 1. **Label**: `week start + bodies -> [String; 7]` ([`week_labels`])
//! 2. **Place**: auto-layout in preview space ([`auto_layout`]) or manual drags ([`Session`])
//! 3. **Transform**: preview space <-> image space ([`ViewportTransform`])
//! 4. **Render**: text layout and CPU rasterization onto a [`Surface`] ([`Renderer`]); the same
//!    path serves preview tiles and full-resolution export
//!
//! # Design constraints
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **One layout for measure and draw**: hit-test boxes come from the glyph layout that paints.
//! - **Explicit state**: the interactive shell owns a [`Session`] and threads events through it.
//! - **Premultiplied RGBA8** surfaces end to end; straight alpha only at encode/decode.
#![forbid(unsafe_code)]

mod assets;
mod export;
mod foundation;
mod layout;
mod preset;
mod render;
mod schedule;
mod session;
mod text;
mod transform;

pub use assets::decode::{decode_image, load_base_image, save_surface};
pub use assets::fonts::{FontCatalog, FontResolver};
pub use export::pipeline::{
    export_session, generate_weekly, render_blocks, render_preset, render_session,
};
pub use foundation::config::Settings;
pub use foundation::core::{IPoint, PixelRect, Rgb8, Size};
pub use foundation::error::{TelopError, TelopResult};
pub use layout::auto::{DEFAULT_MARGIN, Orientation, auto_layout, single_anchor};
pub use preset::io::{load_preset, save_preset};
pub use preset::model::{Preset, Style};
pub use render::composite::{over, over_at};
pub use render::cpu::{RenderStyle, Renderer};
pub use render::surface::Surface;
pub use schedule::labels::{
    WEEK_DAYS, WEEKDAY_NAMES_JA, auto_label, monday_of, split_week_bodies, today_in, week_labels,
};
pub use session::editor::{DEFAULT_SINGLE_TEXT, MIN_VIEWPORT_EDGE, Mode, Session, TextBlock};
pub use session::hit::{Drag, hit_test};
pub use text::layout::{PlacedGlyph, TextLayout, TextLayoutEngine, TextMetricsParams};
pub use transform::viewport::{MAX_PREVIEW_SCALE, MIN_PREVIEW_SCALE, ViewportTransform};

#[cfg(test)]
#[path = "../tests/unit/support.rs"]
mod test_support;
