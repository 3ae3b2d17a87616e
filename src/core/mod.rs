//! Pager Core Module
//!
//! Platform-independent pager state:
//! - Input buffer holding every byte received
//! - Page index of discovered page boundaries
//! - Viewport geometry and display options
//!
//! Nothing here touches the terminal; given the same bytes and the same
//! navigation, the core always produces the same pages.

mod buffer;
mod pages;
mod viewport;

pub use buffer::{InputBuffer, BASE_CAPACITY, CHUNK_SIZE};
pub use pages::PageIndex;
pub use viewport::{DisplayOptions, Viewport};
