//! Actions
//!
//! Naming convention: the prefix names the area (`Dog`, `Ui`), a `Did` infix
//! marks the result of async work.

/// Application actions
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Intent: request a new random dog photo (triggers an HTTP fetch)
    DogFetch,

    /// Result: photo URL fetched successfully
    DogDidLoad(String),

    /// Result: fetch failed (transport, status or decode error)
    DogDidError(String),

    /// Terminal was resized
    UiTerminalResize(u16, u16),

    /// Exit the application
    Quit,
}

impl dog_saga_core::Action for Action {
    fn name(&self) -> &'static str {
        match self {
            Action::DogFetch => "DogFetch",
            Action::DogDidLoad(_) => "DogDidLoad",
            Action::DogDidError(_) => "DogDidError",
            Action::UiTerminalResize(..) => "UiTerminalResize",
            Action::Quit => "Quit",
        }
    }

    fn summary(&self) -> String {
        match self {
            // Truncate long error messages
            Action::DogDidError(e) => {
                let msg = if e.chars().count() > 40 {
                    format!("{}...", e.chars().take(37).collect::<String>())
                } else {
                    e.clone()
                };
                format!("DogDidError({:?})", msg)
            }
            _ => format!("{:?}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dog_saga_core::Action as _;

    #[test]
    fn test_names() {
        assert_eq!(Action::DogFetch.name(), "DogFetch");
        assert_eq!(Action::DogDidLoad("u".into()).name(), "DogDidLoad");
        assert_eq!(Action::UiTerminalResize(1, 2).name(), "UiTerminalResize");
    }

    #[test]
    fn test_error_summary_is_truncated() {
        let action = Action::DogDidError("x".repeat(100));
        let summary = action.summary();
        assert!(summary.starts_with("DogDidError(\""));
        assert!(summary.contains("..."));
        assert!(summary.len() < 60);
    }
}
