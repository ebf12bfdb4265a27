pub mod classifier;
pub mod entities;
pub mod lead;
pub mod personalizer;
pub mod quota;
pub mod variant;

pub use classifier::*;
pub use entities::*;
pub use lead::*;
pub use personalizer::*;
pub use quota::*;
pub use variant::*;
