//! Engines shipped with the lab.

mod layout;
mod placeholder;

pub use layout::PlaceholderLayout;
pub use placeholder::{PlaceholderOptions, SvgPlaceholder, DEFAULT_LABEL};
