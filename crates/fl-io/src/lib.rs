pub mod error;
pub mod life105;
pub mod render;

pub use error::{IoError, Result};
pub use life105::{read_life105, read_life105_file, write_life105, write_life105_file};
pub use render::{Camera, Canvas, GRID_COLOR, GifRecorder, color_of, render_dense, write_gif};
