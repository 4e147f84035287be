mod adaptive;
mod reactive;

pub use adaptive::{AdaptiveRule, AdaptiveState};
pub use reactive::ReactiveRule;
