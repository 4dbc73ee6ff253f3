//! Tessera Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Tessera parser
//! and renderer. It includes:
//!
//! - **Borders**: Edge line styles and four-edge connector patterns ([`border`] module)
//! - **Arrows**: The 8-bit arrow overlay value ([`arrow::ArrowSpec`])
//! - **Cells**: Grid cells, their decorations and the compiled framework ([`cell`] module)
//! - **Styles**: Whitelisted block style keys and resolved parameters ([`style`] module)
//! - **Content**: Opaque content nodes captured for abbreviation blocks ([`content`] module)

pub mod arrow;
pub mod border;
pub mod cell;
pub mod content;
pub mod style;
