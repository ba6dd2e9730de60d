use serde::{Deserialize, Serialize};
use tubeprep_av::ToolPaths;
use tubeprep_common::CategoryTable;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub conversion: ConversionConfig,

    /// File-name suffixes recognised for each file category.
    #[serde(default)]
    pub extensions: CategoryTable,

    #[serde(default)]
    pub tools: ToolPaths,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConversionConfig {
    /// Container extension every media file is normalized to, without the dot.
    #[serde(default = "default_normalized_extension")]
    pub normalized_extension: String,

    /// Remove the original media file once the normalized copy is in place.
    #[serde(default = "default_delete_original")]
    pub delete_original: bool,
}

fn default_normalized_extension() -> String {
    "mp4".to_string()
}

fn default_delete_original() -> bool {
    true
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            normalized_extension: default_normalized_extension(),
            delete_original: default_delete_original(),
        }
    }
}
