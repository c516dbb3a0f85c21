mod script;

use std::rc::Rc;

use anyhow::{ensure, Result};
use glasskit_animation::Animator;
use glasskit_core::FrameClock;
use glasskit_foundation::MemoryScene;
use glasskit_ui::prelude::*;
use glasskit_ui::{ControlPreference, PlatformCapabilities};
use glasskit_ui_graphics::{Point, Rect};
use web_time::Duration;

use script::{log_scene, LoggingHaptics, Player};

fn main() -> Result<()> {
    #[cfg(feature = "logging")]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let clock = FrameClock::new();
    let scene = MemoryScene::shared();
    let haptics = Rc::new(LoggingHaptics::default());
    let env = ControlEnvironment::new(
        Rc::new(Animator::new(clock.clone())),
        scene.clone(),
        haptics.clone(),
    );
    let factory = ControlFactory::new(
        env,
        PlatformCapabilities::default(),
        ControlPreference::PreferGlass,
    );
    let player = Player::new(&clock);

    let slider = factory.make_slider(Rect::new(20.0, 40.0, 237.0, 40.0));
    slider.set_maximum_value(100.0);
    slider.add_listener(
        ControlEvents::ALL,
        Box::new(|event| log::info!("slider event: {event:?}")),
    );
    log::info!("slider style: {:?}", slider.style());

    // Thumb travel is 200 pt starting at x = 38.5.
    player.tap(&*slider, Point::new(118.5, 60.0));
    log::info!("after tap: value {:.1}", slider.value());
    log_scene("slider mid-tap", &scene);
    player.settle();
    log_scene("slider settled", &scene);
    ensure!((slider.value() - 40.0).abs() < 0.01, "tap landed at {}", slider.value());

    player.drag(
        &*slider,
        Point::new(118.5, 60.0),
        Point::new(320.0, 60.0),
        Duration::from_millis(400),
    );
    player.settle();
    log::info!("after drag: value {:.1}", slider.value());
    ensure!(slider.value() == 100.0, "drag past the end should pin the maximum");

    let switch = factory.make_switch(Point::new(20.0, 120.0));
    switch.add_listener(
        ControlEvents::VALUE_CHANGED,
        Box::new(|_| log::info!("switch changed")),
    );
    player.tap(&*switch, Point::new(40.0, 134.0));
    player.settle();
    log::info!("after tap: switch on = {}", switch.is_on());
    ensure!(switch.is_on(), "tap should turn the switch on");

    player.drag(
        &*switch,
        Point::new(62.5, 134.0),
        Point::new(30.0, 134.0),
        Duration::from_millis(300),
    );
    player.settle();
    log_scene("all settled", &scene);
    log::info!(
        "after drag: switch on = {}, haptics fired: {}",
        switch.is_on(),
        haptics.fired()
    );
    ensure!(!switch.is_on(), "drag to the off edge should turn the switch off");
    Ok(())
}
