pub mod config;
pub mod consts;
pub mod discovery;
pub mod error;
pub mod geometry;
pub mod io;
pub mod payload;
pub mod photo;
pub mod raster;
pub mod session;
pub mod store;
