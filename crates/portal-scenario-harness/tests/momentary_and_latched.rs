use portal_scenario_harness::ScenarioHarness;
use portal_ui::{ButtonId, TouchPoint};

#[test]
fn cut_is_momentary() {
    let mut harness = ScenarioHarness::with_defaults();
    let cut = Some(TouchPoint::at(80, 60));

    harness.run_samples(&[None, cut]);
    assert!(harness.is_selected(ButtonId::Cut));

    harness.release();
    assert!(!harness.is_selected(ButtonId::Cut));
    assert!(harness.selected().is_empty());
}

#[test]
fn cross_clears_even_while_still_held() {
    let mut harness = ScenarioHarness::with_defaults();
    harness.release();
    harness.tap(ButtonId::Cross);
    assert!(harness.is_selected(ButtonId::Cross));

    harness.tap(ButtonId::Cross);
    assert!(!harness.is_selected(ButtonId::Cross));
}

#[test]
fn camera_is_latched() {
    let mut harness = ScenarioHarness::with_defaults();
    let cam = Some(TouchPoint::at(150, 200));

    harness.run_samples(&[None, cam, None, None, None]);
    assert_eq!(harness.selected(), [ButtonId::Camera2]);
}

#[test]
fn latched_selection_moves_on_next_press_elsewhere() {
    let mut harness = ScenarioHarness::with_defaults();
    harness.tap(ButtonId::Graphics);
    harness.release();
    assert_eq!(harness.selected(), [ButtonId::Graphics]);

    harness.tap(ButtonId::Camera4);
    assert_eq!(harness.selected(), [ButtonId::Camera4]);
}

#[test]
fn pressing_cut_clears_latched_camera() {
    let mut harness = ScenarioHarness::with_defaults();
    harness.tap(ButtonId::Camera1);
    harness.release();

    harness.tap(ButtonId::Cut);
    assert_eq!(harness.selected(), [ButtonId::Cut]);

    harness.release();
    assert!(harness.selected().is_empty());
}

#[test]
fn touch_outside_every_button_clears_latch() {
    let mut harness = ScenarioHarness::with_defaults();
    harness.tap(ButtonId::Camera3);
    harness.release();

    let cycle = harness.touch(-5, 100);
    assert!(cycle.edge.is_rising());
    assert_eq!(cycle.pressed, None);
    assert!(harness.selected().is_empty());
}
