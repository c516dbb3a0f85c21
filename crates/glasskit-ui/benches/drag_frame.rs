use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use glasskit_foundation::{rubber_band_clamp, TouchEvent};
use glasskit_testing::ControlTestRule;
use glasskit_ui::prelude::*;
use glasskit_ui_graphics::{Point, Rect};
use web_time::Duration;

fn rubber_band(c: &mut Criterion) {
    c.bench_function("rubber_band_clamp", |b| {
        let mut x = -200.0f32;
        b.iter(|| {
            x = if x > 400.0 { -200.0 } else { x + 0.7 };
            black_box(rubber_band_clamp(black_box(x), 0.0, 200.0))
        });
    });
}

fn slider_drag_frame(c: &mut Criterion) {
    let rule = ControlTestRule::new();
    let slider = GlassSlider::new(rule.env(), Rect::new(0.0, 0.0, 237.0, 40.0));
    let start = slider.thumb().center();
    slider.handle_touch(&TouchEvent::began(start, rule.now()));
    rule.advance_time(Duration::from_millis(200));

    let mut offset = 0.0f32;
    c.bench_function("slider_drag_frame", |b| {
        b.iter(|| {
            offset = (offset + 3.0) % 320.0;
            rule.advance_frame();
            slider.handle_touch(&TouchEvent::moved(
                Point::new(start.x + offset - 40.0, start.y),
                rule.now(),
            ));
        });
    });
}

criterion_group!(benches, rubber_band, slider_drag_frame);
criterion_main!(benches);
