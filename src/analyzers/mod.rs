pub mod volume_analyzer;

pub use volume_analyzer::VolumeAnalyzer;
