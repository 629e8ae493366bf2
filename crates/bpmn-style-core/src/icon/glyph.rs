//! Shared glyph templates in the unit square.
//!
//! Each glyph is built once on first use and shared for the lifetime of the
//! process. Leaf icons reference them by `&'static UnitPath`, so identity
//! comparisons with [`LeafIcon::is_glyph`](super::LeafIcon::is_glyph) are cheap.

use std::{f64::consts::PI, sync::LazyLock};

use crate::path::UnitPath;

/// Closing flap of a message envelope, drawn over a rectangle.
pub static ENVELOPE_FLAP: LazyLock<UnitPath> =
    LazyLock::new(|| UnitPath::new().polyline(&[(0.0, 0.0), (0.5, 0.5), (1.0, 0.0)]));

/// Eight-tooth gear with a hub (service task).
pub static GEAR: LazyLock<UnitPath> = LazyLock::new(|| {
    const STEPS: usize = 32;
    let points: Vec<(f64, f64)> = (0..STEPS)
        .map(|step| {
            let angle = step as f64 * 2.0 * PI / STEPS as f64;
            // two points on the tooth, two in the gap
            let radius = if (step / 2) % 2 == 0 { 0.5 } else { 0.38 };
            (0.5 + radius * angle.cos(), 0.5 + radius * angle.sin())
        })
        .collect();
    UnitPath::new()
        .polygon(&points)
        .ellipse(0.5, 0.5, 0.15, 0.15)
});

/// Zig-zag lightning bolt (error).
pub static LIGHTNING: LazyLock<UnitPath> = LazyLock::new(|| {
    UnitPath::new().polygon(&[
        (0.0, 1.0),
        (0.28, 0.22),
        (0.56, 0.62),
        (1.0, 0.0),
        (0.72, 0.78),
        (0.44, 0.38),
    ])
});

/// Clock face with tick marks and two hands (timer).
pub static CLOCK: LazyLock<UnitPath> = LazyLock::new(|| {
    let mut clock = UnitPath::new().ellipse(0.5, 0.5, 0.5, 0.5);
    for tick in 0..12 {
        let angle = tick as f64 * PI / 6.0;
        let (sin, cos) = angle.sin_cos();
        clock = clock
            .move_to(0.5 + 0.4 * cos, 0.5 + 0.4 * sin)
            .line_to(0.5 + 0.5 * cos, 0.5 + 0.5 * sin);
    }
    clock
        .polyline(&[(0.5, 0.18), (0.5, 0.5), (0.76, 0.42)])
});

/// Circular arrow (standard loop marker).
pub static LOOP: LazyLock<UnitPath> = LazyLock::new(|| {
    const SEGMENTS: usize = 24;
    const RADIUS: f64 = 0.42;
    let start = 120.0_f64.to_radians();
    let sweep = 300.0_f64.to_radians();
    let point_at = |angle: f64| (0.5 + RADIUS * angle.cos(), 0.5 + RADIUS * angle.sin());

    let arc: Vec<(f64, f64)> = (0..=SEGMENTS)
        .map(|segment| point_at(start + sweep * segment as f64 / SEGMENTS as f64))
        .collect();

    let end = start + sweep;
    let tip = point_at(end);
    let tangent = (-end.sin(), end.cos());
    let radial = (end.cos(), end.sin());
    let wing = |side: f64| {
        (
            tip.0 - tangent.0 * 0.22 + radial.0 * 0.14 * side,
            tip.1 - tangent.1 * 0.22 + radial.1 * 0.14 * side,
        )
    };
    UnitPath::new()
        .polyline(&arc)
        .polyline(&[wing(1.0), tip, wing(-1.0)])
});

/// Plus sign made of two strokes.
pub static PLUS: LazyLock<UnitPath> = LazyLock::new(|| {
    UnitPath::new()
        .polyline(&[(0.5, 0.0), (0.5, 1.0)])
        .polyline(&[(0.0, 0.5), (1.0, 0.5)])
});

/// Minus sign.
pub static MINUS: LazyLock<UnitPath> =
    LazyLock::new(|| UnitPath::new().polyline(&[(0.0, 0.5), (1.0, 0.5)]));

/// Three vertical bars (parallel multi-instance, collection).
pub static PARALLEL_BARS: LazyLock<UnitPath> = LazyLock::new(|| {
    UnitPath::new()
        .rect(0.1, 0.0, 0.16, 1.0)
        .rect(0.42, 0.0, 0.16, 1.0)
        .rect(0.74, 0.0, 0.16, 1.0)
});

/// Three horizontal bars (sequential multi-instance).
pub static SEQUENTIAL_BARS: LazyLock<UnitPath> = LazyLock::new(|| {
    UnitPath::new()
        .rect(0.0, 0.1, 1.0, 0.16)
        .rect(0.0, 0.42, 1.0, 0.16)
        .rect(0.0, 0.74, 1.0, 0.16)
});

/// Tilde (ad-hoc marker).
pub static TILDE: LazyLock<UnitPath> = LazyLock::new(|| {
    UnitPath::new()
        .move_to(0.0, 0.6)
        .cubic_to(0.15, 0.25, 0.35, 0.25, 0.5, 0.5)
        .cubic_to(0.65, 0.75, 0.85, 0.75, 1.0, 0.4)
});

/// Two rewind triangles (compensation).
pub static COMPENSATION: LazyLock<UnitPath> = LazyLock::new(|| {
    UnitPath::new()
        .polygon(&[(0.5, 0.0), (0.0, 0.5), (0.5, 1.0)])
        .polygon(&[(1.0, 0.0), (0.5, 0.5), (1.0, 1.0)])
});

/// Upward arrow head with a notch (escalation).
pub static ESCALATION: LazyLock<UnitPath> = LazyLock::new(|| {
    UnitPath::new().polygon(&[(0.5, 0.0), (1.0, 1.0), (0.5, 0.55), (0.0, 1.0)])
});

/// Ruled sheet (conditional).
pub static CONDITIONAL: LazyLock<UnitPath> = LazyLock::new(|| {
    let mut sheet = UnitPath::new().rect(0.15, 0.0, 0.7, 1.0);
    for y in [0.2, 0.4, 0.6, 0.8] {
        sheet = sheet.polyline(&[(0.27, y), (0.73, y)]);
    }
    sheet
});

/// Block arrow pointing right (link, data input/output).
pub static ARROW: LazyLock<UnitPath> = LazyLock::new(|| {
    UnitPath::new().polygon(&[
        (0.0, 0.3),
        (0.55, 0.3),
        (0.55, 0.0),
        (1.0, 0.5),
        (0.55, 1.0),
        (0.55, 0.7),
        (0.0, 0.7),
    ])
});

/// Thick diagonal cross (cancel, exclusive gateway).
pub static X_CROSS: LazyLock<UnitPath> = LazyLock::new(|| {
    UnitPath::new().polygon(&[
        (0.0, 0.15),
        (0.15, 0.0),
        (0.5, 0.35),
        (0.85, 0.0),
        (1.0, 0.15),
        (0.65, 0.5),
        (1.0, 0.85),
        (0.85, 1.0),
        (0.5, 0.65),
        (0.15, 1.0),
        (0.0, 0.85),
        (0.35, 0.5),
    ])
});

/// Thick upright cross (parallel gateway, parallel multiple event).
pub static CROSS: LazyLock<UnitPath> = LazyLock::new(|| {
    UnitPath::new().polygon(&[
        (0.38, 0.0),
        (0.62, 0.0),
        (0.62, 0.38),
        (1.0, 0.38),
        (1.0, 0.62),
        (0.62, 0.62),
        (0.62, 1.0),
        (0.38, 1.0),
        (0.38, 0.62),
        (0.0, 0.62),
        (0.0, 0.38),
        (0.38, 0.38),
    ])
});

/// Triangle (signal).
pub static TRIANGLE: LazyLock<UnitPath> =
    LazyLock::new(|| UnitPath::new().polygon(&[(0.5, 0.0), (1.0, 0.9), (0.0, 0.9)]));

/// Regular pentagon standing on its base (multiple, event-based gateway).
pub static PENTAGON: LazyLock<UnitPath> = LazyLock::new(|| {
    let points: Vec<(f64, f64)> = (0..5)
        .map(|corner| {
            let angle = -PI / 2.0 + corner as f64 * 2.0 * PI / 5.0;
            (0.5 + 0.5 * angle.cos(), 0.5 + 0.5 * angle.sin())
        })
        .collect();
    UnitPath::new().polygon(&points)
});

/// Eight-armed star of strokes (complex gateway).
pub static ASTERISK: LazyLock<UnitPath> = LazyLock::new(|| {
    UnitPath::new()
        .polyline(&[(0.5, 0.0), (0.5, 1.0)])
        .polyline(&[(0.0, 0.5), (1.0, 0.5)])
        .polyline(&[(0.15, 0.15), (0.85, 0.85)])
        .polyline(&[(0.85, 0.15), (0.15, 0.85)])
});

/// Head and shoulders (user task).
pub static USER: LazyLock<UnitPath> = LazyLock::new(|| {
    UnitPath::new()
        .ellipse(0.5, 0.25, 0.2, 0.2)
        .move_to(0.1, 1.0)
        .cubic_to(0.1, 0.55, 0.9, 0.55, 0.9, 1.0)
        .close()
});

/// Flat hand with fingers (manual task).
pub static HAND: LazyLock<UnitPath> = LazyLock::new(|| {
    UnitPath::new().polygon(&[
        (0.0, 0.4),
        (0.3, 0.15),
        (0.9, 0.15),
        (0.9, 0.3),
        (0.55, 0.3),
        (1.0, 0.3),
        (1.0, 0.45),
        (0.55, 0.45),
        (0.95, 0.45),
        (0.95, 0.6),
        (0.55, 0.6),
        (0.85, 0.6),
        (0.85, 0.75),
        (0.3, 0.75),
        (0.0, 0.6),
    ])
});

/// Table with a header row (business rule task).
pub static TABLE: LazyLock<UnitPath> = LazyLock::new(|| {
    UnitPath::new()
        .rect(0.0, 0.0, 1.0, 1.0)
        .polyline(&[(0.0, 0.25), (1.0, 0.25)])
        .polyline(&[(0.0, 0.5), (1.0, 0.5)])
        .polyline(&[(0.0, 0.75), (1.0, 0.75)])
        .polyline(&[(0.3, 0.25), (0.3, 1.0)])
});

/// Header row of [`TABLE`], filled separately.
pub static TABLE_HEADER: LazyLock<UnitPath> =
    LazyLock::new(|| UnitPath::new().rect(0.0, 0.0, 1.0, 0.25));

/// Curled scroll with text lines (script task).
pub static SCROLL: LazyLock<UnitPath> = LazyLock::new(|| {
    UnitPath::new()
        .move_to(0.2, 0.0)
        .line_to(0.95, 0.0)
        .cubic_to(0.7, 0.3, 1.0, 0.7, 0.8, 1.0)
        .line_to(0.05, 1.0)
        .cubic_to(0.3, 0.7, 0.0, 0.3, 0.2, 0.0)
        .close()
        .polyline(&[(0.25, 0.25), (0.7, 0.25)])
        .polyline(&[(0.3, 0.5), (0.75, 0.5)])
        .polyline(&[(0.3, 0.75), (0.75, 0.75)])
});
