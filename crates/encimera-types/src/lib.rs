pub mod addon;
pub mod layout;
pub mod material;
pub mod piece;
pub mod pricing;

pub use addon::*;
pub use layout::*;
pub use material::*;
pub use piece::*;
pub use pricing::*;
