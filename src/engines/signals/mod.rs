pub mod bias;
pub mod confluence;
pub mod deviation;
pub mod session;

pub use bias::{BiasClassifier, BiasLevels};
pub use confluence::{Confluence, ConfluenceAggregator, TimeframeDeviations};
pub use deviation::{EmaDeviationCalculator, EmaReading};
pub use session::SessionResolver;
