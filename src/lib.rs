pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod product;
pub mod scoring;

pub use error::{RankError, RankResult};
pub use pipeline::Pipeline;
pub use product::Product;
