//! Album artwork lookup from the Last.fm catalog

pub mod lastfm;

pub use lastfm::*;
