//! Render surface implementations.
//!
//! - `ChromiumSurface` - a real browser tab over the DevTools protocol
//!   (feature `chromium`)
//!
//! Tests use [`crate::testing::MockSurface`] instead.

#[cfg(feature = "chromium")]
pub mod chromium;

#[cfg(feature = "chromium")]
pub use chromium::ChromiumSurface;
