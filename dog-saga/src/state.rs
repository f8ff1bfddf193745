//! Application state - single source of truth
//!
//! Components receive `&AppState` as props; only the reducer produces new
//! values, and the store swaps them in whole.

/// Coarse phase of the fetch cycle, derived from the state fields
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Fetching,
    Error,
}

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    /// True between a fetch request and its result
    pub fetching: bool,

    /// URL of the last successfully fetched photo
    pub photo: Option<String>,

    /// Message from the last failed fetch; cleared when a new fetch starts
    pub error: Option<String>,
}

impl AppState {
    pub fn phase(&self) -> Phase {
        if self.fetching {
            Phase::Fetching
        } else if self.error.is_some() {
            Phase::Error
        } else {
            Phase::Idle
        }
    }

    pub fn has_photo(&self) -> bool {
        self.photo.is_some()
    }

    /// Breed name encoded in a Dog CEO image URL
    ///
    /// `https://images.dog.ceo/breeds/hound-afghan/n02088094_1003.jpg` yields
    /// `"afghan hound"`.
    pub fn breed(&self) -> Option<String> {
        let url = self.photo.as_deref()?;
        let (_, rest) = url.split_once("/breeds/")?;
        let segment = rest.split('/').next().filter(|s| !s.is_empty())?;

        Some(match segment.split_once('-') {
            Some((breed, sub)) => format!("{} {}", sub, breed),
            None => segment.to_string(),
        })
    }
}
