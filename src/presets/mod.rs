pub mod storage;
pub mod types;

pub use storage::{get_presets_path, load_presets, save_presets};
pub use types::{Preset, PresetStore};
