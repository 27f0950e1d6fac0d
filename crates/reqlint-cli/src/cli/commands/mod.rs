pub mod dispatch;
pub(crate) mod review;
pub(crate) mod rules;
pub(crate) mod segment;

pub use dispatch::dispatch;
