use glasskit_testing::ControlTestRule;
use glasskit_ui::prelude::*;
use glasskit_ui::{ControlPreference, ControlStyle, PlatformCapabilities, SliderControl};
use glasskit_ui_graphics::{Point, Rect};

fn factory(rule: &ControlTestRule, native_glass: bool, preference: ControlPreference) -> ControlFactory {
    ControlFactory::new(
        rule.env(),
        PlatformCapabilities {
            native_glass_controls: native_glass,
        },
        preference,
    )
}

#[test]
fn native_glass_platforms_get_system_controls() {
    let rule = ControlTestRule::new();
    let factory = factory(&rule, true, ControlPreference::PreferGlass);

    assert_eq!(factory.resolved_style(), ControlStyle::System);
    assert_eq!(
        factory.make_slider(Rect::new(0.0, 0.0, 200.0, 40.0)).style(),
        ControlStyle::System
    );
    assert_eq!(factory.make_switch(Point::ZERO).style(), ControlStyle::System);
    assert_eq!(rule.scene().borrow().layer_count(), 0);
}

#[test]
fn preference_decides_on_older_platforms() {
    let rule = ControlTestRule::new();

    let glass = factory(&rule, false, ControlPreference::PreferGlass);
    assert_eq!(glass.make_switch(Point::ZERO).style(), ControlStyle::Glass);

    let system = factory(&rule, false, ControlPreference::PreferSystem);
    assert_eq!(system.make_switch(Point::ZERO).style(), ControlStyle::System);
}

#[test]
fn both_styles_share_value_semantics() {
    let rule = ControlTestRule::new();
    let sliders: Vec<Box<dyn SliderControl>> = [ControlPreference::PreferGlass, ControlPreference::PreferSystem]
        .into_iter()
        .map(|preference| factory(&rule, false, preference).make_slider(Rect::new(0.0, 0.0, 200.0, 40.0)))
        .collect();

    for slider in &sliders {
        slider.set_maximum_value(10.0);
        slider.set_value(42.0, false);
        assert_eq!(slider.value(), 10.0, "{:?}", slider.style());
        slider.accessibility_decrement();
        assert_eq!(slider.value(), 9.0, "{:?}", slider.style());
    }
    rule.wait_for_idle();
}
