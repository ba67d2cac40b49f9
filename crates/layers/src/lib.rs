pub mod layer;
pub mod markers;
pub mod popup;
pub mod symbology;

pub use layer::*;
pub use markers::*;
pub use popup::*;
pub use symbology::*;
