//! Top-level facade crate for syncline.
//!
//! Re-exports the core protocol types and the client runtime so embedders
//! can depend on a single crate.

pub mod core {
    pub use syncline_core::*;
}

pub mod client {
    pub use syncline_client::*;
}
