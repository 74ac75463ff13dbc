use super::*;
use crate::{foundation::core::Size, test_support::system_font};

fn style_with(font: Option<PathBuf>) -> Style {
    Style {
        family: None,
        font_path: font,
        font_size: 40,
        fill: Rgb8::WHITE,
        stroke_fill: Rgb8::new(255, 0, 0),
        stroke_width: 3,
        line_spacing: 8,
    }
}

/// Bounding box of all pixels whose alpha differs from the background.
fn painted_bounds(surface: &Surface, background: [u8; 4]) -> Option<PixelRect> {
    let mut out: Option<PixelRect> = None;
    for y in 0..surface.height() {
        for x in 0..surface.width() {
            if surface.pixel(x, y) == Some(background) {
                continue;
            }
            let (x, y) = (x as i32, y as i32);
            out = Some(match out {
                None => PixelRect {
                    x0: x,
                    y0: y,
                    x1: x + 1,
                    y1: y + 1,
                },
                Some(r) => PixelRect {
                    x0: r.x0.min(x),
                    y0: r.y0.min(y),
                    x1: r.x1.max(x + 1),
                    y1: r.y1.max(y + 1),
                },
            });
        }
    }
    out
}

#[test]
fn missing_font_path_is_font_unavailable() {
    let err = RenderStyle::full(&style_with(None)).unwrap_err();
    assert!(matches!(err, TelopError::FontUnavailable(_)));
}

#[test]
fn preview_style_scales_and_floors() {
    let style = style_with(Some(PathBuf::from("/f.ttf")));
    let view = ViewportTransform::fit(Size::new(400, 400), Size::new(1000, 1000)).unwrap();
    let preview = RenderStyle::preview(&style, &view, 8).unwrap();
    assert_eq!(preview.metrics.font_size, 16);
    assert_eq!(preview.metrics.line_spacing, 3);
    assert_eq!(preview.metrics.stroke_width, 1);
    assert_eq!(preview.fill, style.fill);

    let tiny = ViewportTransform::fit(Size::new(50, 50), Size::new(1000, 1000)).unwrap();
    assert_eq!(
        RenderStyle::preview(&style, &tiny, 8)
            .unwrap()
            .metrics
            .font_size,
        8
    );
}

#[test]
fn draw_with_unloadable_font_leaves_surface_untouched() {
    let style = RenderStyle::full(&style_with(Some(PathBuf::from("/no/such/font.ttf")))).unwrap();
    let mut surface = Surface::filled(32, 32, [0, 0, 0, 255]);
    let before = surface.clone();
    let mut renderer = Renderer::new();
    let err = renderer
        .draw(&mut surface, IPoint::new(0, 0), "x", &style)
        .unwrap_err();
    assert!(matches!(err, TelopError::FontUnavailable(_)));
    assert_eq!(surface, before);
}

#[test]
fn paint_stays_within_measured_box() {
    let Some(font) = system_font() else {
        return;
    };
    let style = RenderStyle::full(&style_with(Some(font))).unwrap();
    let mut renderer = Renderer::new();
    let bg = [0, 0, 0, 255];
    for text in ["Hello", "Hello\nWorld", ""] {
        let mut surface = Surface::filled(400, 300, bg);
        let anchor = IPoint::new(30, 40);
        let rect = renderer.draw(&mut surface, anchor, text, &style).unwrap();
        let (w, h) = renderer.measure(text, &style).unwrap();
        assert_eq!((rect.width(), rect.height()), (w, h));
        assert_eq!((rect.x0, rect.y0), (anchor.x, anchor.y));

        let Some(painted) = painted_bounds(&surface, bg) else {
            // A lone space paints nothing.
            assert!(text.is_empty());
            continue;
        };
        let tol = 2;
        assert!(painted.x0 >= rect.x0 - tol, "{text:?}: {painted:?} vs {rect:?}");
        assert!(painted.y0 >= rect.y0 - tol, "{text:?}: {painted:?} vs {rect:?}");
        assert!(painted.x1 <= rect.x1 + tol, "{text:?}: {painted:?} vs {rect:?}");
        assert!(painted.y1 <= rect.y1 + tol, "{text:?}: {painted:?} vs {rect:?}");
    }
}

#[test]
fn stroke_and_fill_colors_both_appear() {
    let Some(font) = system_font() else {
        return;
    };
    let style = RenderStyle::full(&style_with(Some(font))).unwrap();
    let mut renderer = Renderer::new();
    let tile = renderer.render_tile("HH", &style).unwrap();
    let pixels: Vec<[u8; 4]> = tile.data().chunks_exact(4).map(|p| [p[0], p[1], p[2], p[3]]).collect();
    assert!(pixels.iter().any(|p| *p == [255, 255, 255, 255]));
    assert!(pixels.iter().any(|p| *p == [255, 0, 0, 255]));
}

#[test]
fn tile_matches_measure() {
    let Some(font) = system_font() else {
        return;
    };
    let style = RenderStyle::full(&style_with(Some(font))).unwrap();
    let mut renderer = Renderer::new();
    let tile = renderer.render_tile("Mon\nTue", &style).unwrap();
    assert_eq!(
        (tile.width(), tile.height()),
        renderer.measure("Mon\nTue", &style).unwrap()
    );
}

#[test]
fn drawing_is_deterministic() {
    let Some(font) = system_font() else {
        return;
    };
    let style = RenderStyle::full(&style_with(Some(font))).unwrap();
    let mut renderer = Renderer::new();
    let mut a = Surface::filled(200, 120, [20, 40, 60, 255]);
    let mut b = a.clone();
    renderer.draw(&mut a, IPoint::new(5, 5), "1/1\nX", &style).unwrap();
    renderer.draw(&mut b, IPoint::new(5, 5), "1/1\nX", &style).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, Surface::filled(200, 120, [20, 40, 60, 255]));
}

#[test]
fn anchor_outside_surface_clips_without_error() {
    let Some(font) = system_font() else {
        return;
    };
    let style = RenderStyle::full(&style_with(Some(font))).unwrap();
    let mut renderer = Renderer::new();
    let mut surface = Surface::filled(50, 50, [0, 0, 0, 255]);
    renderer
        .draw(&mut surface, IPoint::new(-500, -500), "Hello", &style)
        .unwrap();
    assert_eq!(surface, Surface::filled(50, 50, [0, 0, 0, 255]));
}
