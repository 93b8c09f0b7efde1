pub mod classifier_app;
pub mod views;

pub use classifier_app::{ClassifierApp, UiUpdate};
pub use views::View;
