//! Layout Module
//!
//! Flexbox layout of the page using [Taffy](https://github.com/DioxusLabs/taffy).
//!
//! # Architecture
//!
//! 1. Converts element sizing → Taffy styles
//! 2. Builds the Taffy tree from parent relationships
//! 3. Writes document-space bounds back to the page
//!
//! Bounds feed the viewport observer; relayout after every viewport resize.
//!
//! # Example
//!
//! ```ignore
//! use spark_showcase::layout::compute_layout;
//!
//! compute_layout(&mut page)?;
//! let hero_height = page.bounds(hero).height;
//! ```

mod taffy_bridge;

pub use taffy_bridge::compute_layout;
