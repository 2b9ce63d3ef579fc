//! External encoding pipeline: subprocess helpers and the ffmpeg + gifsicle GIF chain.

pub mod gif;
pub mod tools;
