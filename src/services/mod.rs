pub mod browser;
pub mod delay;
pub mod droid;
pub mod page_extractor;
pub mod paginator;
pub mod reporter;

pub use browser::*;
pub use delay::*;
pub use droid::*;
pub use page_extractor::*;
pub use paginator::*;
pub use reporter::*;
