pub mod bounded;
pub mod viewport;

pub use bounded::bounded_dimensions;
pub use viewport::{SourceRegion, Viewport};
