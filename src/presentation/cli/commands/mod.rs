pub mod get;
pub mod list;
pub mod root;

pub use get::*;
pub use list::*;
pub use root::*;
