//! Render tests using RenderHarness
//!
//! Each test renders the root view for one state and checks the visible text.

use dog_saga::components::{
    Component, DogDisplay, DogDisplayProps, ERROR_TEXT, FETCHING_LABEL, REQUEST_LABEL,
};
use dog_saga::state::AppState;
use dog_saga_core::testing::*;

const PHOTO: &str = "https://images.dog.ceo/breeds/hound-afghan/n02088094_1003.jpg";

fn render_state(state: &AppState) -> String {
    let mut render = RenderHarness::new(80, 24);
    let mut component = DogDisplay::new();

    render.render_to_string_plain(|frame| {
        component.render(frame, frame.area(), DogDisplayProps { state });
    })
}

#[test]
fn test_render_initial_state() {
    let output = render_state(&AppState::default());

    assert!(output.contains("The Dog Saga"));
    assert!(output.contains("Replace the placeholder with a dog!"));
    assert!(output.contains(REQUEST_LABEL));
    assert!(output.contains("(_____/"), "placeholder art expected");
    assert!(!output.contains(FETCHING_LABEL));
    assert!(!output.contains(ERROR_TEXT));
}

#[test]
fn test_render_fetching_state() {
    let state = AppState {
        fetching: true,
        ..Default::default()
    };
    let output = render_state(&state);

    assert!(output.contains(FETCHING_LABEL));
    assert!(!output.contains(REQUEST_LABEL));
}

#[test]
fn test_render_photo() {
    let state = AppState {
        photo: Some(PHOTO.into()),
        ..Default::default()
    };
    let output = render_state(&state);

    assert!(output.contains(PHOTO));
    assert!(output.contains("Keep pressing for new dogs"));
    assert!(output.contains("afghan hound"));
    assert!(!output.contains("Replace the placeholder with a dog!"));
    assert!(!output.contains("(_____/"));
}

#[test]
fn test_render_error_without_photo() {
    let state = AppState {
        error: Some("unexpected HTTP status 500 Internal Server Error".into()),
        ..Default::default()
    };
    let output = render_state(&state);

    assert!(output.contains(ERROR_TEXT));
    assert!(output.contains(REQUEST_LABEL));
    assert!(output.contains("(_____/"));
    // The banner is static; the message itself only goes to the log
    assert!(!output.contains("Internal Server Error"));
}

#[test]
fn test_render_error_keeps_previous_photo() {
    let state = AppState {
        fetching: false,
        photo: Some(PHOTO.into()),
        error: Some("boom".into()),
    };
    let output = render_state(&state);

    assert!(output.contains(ERROR_TEXT));
    assert!(output.contains(PHOTO));
    assert!(output.contains("Keep pressing for new dogs"));
}

#[test]
fn test_render_fetching_keeps_previous_photo() {
    let state = AppState {
        fetching: true,
        photo: Some(PHOTO.into()),
        error: None,
    };
    let output = render_state(&state);

    assert!(output.contains(FETCHING_LABEL));
    assert!(output.contains(PHOTO));
}

#[test]
fn test_render_help_and_credits() {
    let output = render_state(&AppState::default());

    assert!(output.contains("request"));
    assert!(output.contains("quit"));
    assert!(output.contains("Dog CEO API"));
}

#[test]
fn test_render_small_terminal_does_not_panic() {
    let mut render = RenderHarness::new(20, 8);
    let mut component = DogDisplay::new();
    let state = AppState {
        photo: Some(PHOTO.into()),
        error: Some("boom".into()),
        ..Default::default()
    };

    render.render(|frame| {
        component.render(frame, frame.area(), DogDisplayProps { state: &state });
    });
}
