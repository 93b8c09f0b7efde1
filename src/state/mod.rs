pub mod core;

pub use self::core::{init, transition, Effect, Model, Msg, RequestId, RequestState, SelectedImage};
