/// Image handling module
///
/// This module handles:
/// - Downloading thumbnail bytes through the API client
/// - Decoding and cover-resizing them for the grid

pub mod thumbnail;
