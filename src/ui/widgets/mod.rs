mod value_box;

pub use value_box::{MetricBox, ValueBox};
