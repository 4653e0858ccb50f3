use std::path::{Path, PathBuf};

/// Run-level configuration.
///
/// Every path the mapper reads from or writes to is derived from this value,
/// so independent runs can target independent directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapperConfig {
    /// Directory holding `<profile>.yaml` policy documents.
    pub profiles_dir: PathBuf,

    /// Directory receiving the report and, when permitted, `task.yaml`.
    pub output_dir: PathBuf,

    pub report_file: String,
    pub task_file: String,
    pub summary_file: String,

    /// Maximum number of identifiers echoed in `resolution.item_ids_preview`.
    pub preview_limit: usize,

    /// Maximum number of characters kept in a stream preview.
    pub stream_preview_chars: usize,
}

impl Default for MapperConfig {
    fn default() -> Self {
        Self {
            profiles_dir: PathBuf::from("profiles"),
            output_dir: PathBuf::from("output"),
            report_file: "mapper_report.json".to_string(),
            task_file: "task.yaml".to_string(),
            summary_file: "summary.md".to_string(),
            preview_limit: 10,
            stream_preview_chars: 500,
        }
    }
}

impl MapperConfig {
    pub fn new(profiles_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            profiles_dir: profiles_dir.into(),
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join(&self.report_file)
    }

    pub fn task_path(&self) -> PathBuf {
        self.output_dir.join(&self.task_file)
    }

    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join(&self.summary_file)
    }

    /// Location of the policy document for `profile_name`.
    pub fn profile_path(&self, profile_name: &str) -> PathBuf {
        profile_path(&self.profiles_dir, profile_name)
    }
}

pub fn profile_path(profiles_dir: &Path, profile_name: &str) -> PathBuf {
    profiles_dir.join(format!("{profile_name}.yaml"))
}
