// inspector_core/src/lib.rs
extern crate self as inspector_core;

pub mod error;
pub mod inspector;
pub mod logging;
pub mod reflect;
pub mod storage;

pub use inventory;

#[doc(hidden)]
pub mod __private {
    pub use once_cell::sync::Lazy;
    pub use strum::VariantNames;
}
