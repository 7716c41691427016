//! Text rendering of controller state for the terminal.

use client_core::RequestState;
use shared::domain::{Product, Season};
use tokio::sync::watch;

pub fn render_line(state: &RequestState) -> Option<String> {
    match state {
        RequestState::Idle => None,
        RequestState::Validating | RequestState::InFlight => Some("Predicting...".to_string()),
        RequestState::Succeeded(prediction) => {
            Some(format!("Predicted yield: {prediction:.2} tons"))
        }
        RequestState::Failed(message) => Some(format!("Error: {message}")),
    }
}

/// Prints each distinct line until the attempt reaches a terminal state.
pub async fn follow(mut states: watch::Receiver<RequestState>) -> RequestState {
    let mut last_line: Option<String> = None;
    loop {
        let state = states.borrow_and_update().clone();
        let line = render_line(&state);
        if line != last_line {
            match &line {
                Some(text) if state.is_terminal() => println!("{text}"),
                Some(text) => eprintln!("{text}"),
                None => {}
            }
            last_line = line;
        }
        if state.is_terminal() || states.changed().await.is_err() {
            return state;
        }
    }
}

pub fn options_listing() -> String {
    let products: Vec<&str> = Product::ALL.iter().map(|p| p.as_str()).collect();
    let seasons: Vec<&str> = Season::ALL.iter().map(|s| s.as_str()).collect();
    format!(
        "products: {}\nseasons: {}",
        products.join(", "),
        seasons.join(", ")
    )
}
