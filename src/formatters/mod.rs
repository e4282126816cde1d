pub mod components;
pub mod dot;
pub mod json;

pub use components::ComponentsFormatter;
pub use dot::{ClusterMode, DotFormatter};
pub use json::JsonFormatter;
