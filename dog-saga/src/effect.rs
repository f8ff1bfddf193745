//! Effects - side effects declared for dispatched actions
//!
//! `watch` looks at each action after the reducer ran and declares what
//! should happen; `EffectRunner` does it. This keeps the reducer pure while
//! making async operations explicit.

use dog_saga_core::{TaskKey, TaskManager};

use crate::action::Action;
use crate::api::DogApi;
use crate::state::AppState;

const FETCH_TASK: &str = "dog_fetch";

/// Side effects that can be triggered by actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch one random dog photo
    FetchDog,
}

/// Declare one fetch per fetch request
pub fn watch(_state: &AppState, action: &Action) -> Vec<Effect> {
    match action {
        Action::DogFetch => vec![Effect::FetchDog],
        _ => vec![],
    }
}

/// What happens to an in-flight fetch when a new one is requested
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Every request runs to completion; the last one to finish wins
    #[default]
    Concurrent,
    /// A new request aborts the one in flight
    LatestOnly,
}

/// Performs effects by spawning tasks that resolve to result actions
#[derive(Clone, Debug)]
pub struct EffectRunner {
    api: DogApi,
    policy: FetchPolicy,
}

impl EffectRunner {
    pub fn new(api: DogApi, policy: FetchPolicy) -> Self {
        Self { api, policy }
    }

    pub fn policy(&self) -> FetchPolicy {
        self.policy
    }

    pub fn handle(&self, effect: Effect, tasks: &mut TaskManager<Action>) {
        match effect {
            Effect::FetchDog => {
                let api = self.api.clone();
                let fetch = async move {
                    match api.fetch_random().await {
                        Ok(url) => {
                            tracing::info!(%url, "Fetched dog photo");
                            Action::DogDidLoad(url)
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Dog fetch failed");
                            Action::DogDidError(e.to_string())
                        }
                    }
                };

                match self.policy {
                    FetchPolicy::Concurrent => {
                        tasks.spawn_detached(fetch);
                    }
                    FetchPolicy::LatestOnly => {
                        tasks.spawn(TaskKey::new(FETCH_TASK), fetch);
                    }
                }
            }
        }
    }
}
