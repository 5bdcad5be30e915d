pub mod scene_presets;
