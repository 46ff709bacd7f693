/// View building blocks
///
/// - `controls.rs` - limit/offset inputs and the filter form
/// - `grid.rs` - three-column thumbnail grid
/// - `detail.rs` - detail panel for the selected photo

pub mod controls;
pub mod detail;
pub mod grid;
