pub mod matcher;
pub mod reconciler;
