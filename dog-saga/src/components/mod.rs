pub mod dog_display;
pub mod error_banner;
pub mod help_bar;
pub mod photo_panel;
pub mod request_button;

// Re-export core Component trait
pub use dog_saga_core::Component;

pub use dog_display::{DogDisplay, DogDisplayProps};
pub use error_banner::{ERROR_TEXT, ErrorBanner, ErrorBannerProps};
pub use help_bar::{HelpBar, HelpBarProps};
pub use photo_panel::{PLACEHOLDER, PhotoPanel, PhotoPanelProps};
pub use request_button::{FETCHING_LABEL, REQUEST_LABEL, RequestButton, RequestButtonProps};
