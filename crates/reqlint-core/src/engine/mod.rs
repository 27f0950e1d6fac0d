pub mod runner;

pub use runner::{ChapterSummary, ReviewRun, ReviewRunner};
