pub mod asset;
pub mod presentation;
pub mod slide;
