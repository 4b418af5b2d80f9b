//! Query and visualize protein-protein interaction networks.
//!
//! The dataset is loaded once per process ([`ppi::load`]); every query then
//! runs through [`pipeline::handle_query`]: filter, graph build, seeded spring
//! layout and visual encoding. [`render`] turns the result into PNG bytes and
//! [`app`] is the desktop viewer around it.

pub mod app;
pub mod encode;
pub mod headless;
pub mod layout;
pub mod pipeline;
pub mod ppi;
pub mod render;
