pub mod config;
pub mod consts;
pub mod crop;
pub mod error;
pub mod header;
pub mod image;
pub mod io;
pub mod metadata;
pub mod normalize;
pub mod render;
pub mod roi;
pub mod viewer;
