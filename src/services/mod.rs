pub mod behavior;
pub mod crawler;
pub mod driver;
pub mod droid;
pub mod navigator;
pub mod outreach;
pub mod pacer;
pub mod retrainer;
pub mod selectors;
pub mod session;

pub use behavior::*;
pub use crawler::*;
pub use driver::*;
pub use droid::*;
pub use navigator::*;
pub use outreach::*;
pub use pacer::*;
pub use retrainer::*;
pub use session::*;
