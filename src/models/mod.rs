pub mod booking;
pub mod company;
pub mod event;
pub mod offer;
pub mod profile;
pub mod slot;

// Re-export commonly used types
pub use booking::*;
pub use company::*;
pub use event::*;
pub use offer::*;
pub use profile::*;
pub use slot::*;
