pub mod collection;
pub mod config;
pub mod consts;
pub mod error;
pub mod ids;
pub mod layout;
pub mod photo;
pub mod rotation;
pub mod scroll;
pub mod upload;
pub mod viewer;
