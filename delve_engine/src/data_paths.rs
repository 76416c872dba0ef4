use std::env;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// Cached path to the directory holding `world.dat`, `engine.toml` and `intro.txt`.
static DATA_ROOT: LazyLock<PathBuf> = LazyLock::new(detect_data_root);

/// Construct a data path relative to the resolved data root.
pub fn data_path(relative: impl AsRef<Path>) -> PathBuf {
    DATA_ROOT.join(relative)
}

/// Resolve the most likely location of the runtime data directory.
///
/// `DELVE_DATA_DIR` wins when set. Otherwise the workspace layout and a flattened `data/` are
/// tried relative to the working directory, then relative to the executable.
fn detect_data_root() -> PathBuf {
    if let Some(dir) = env::var_os("DELVE_DATA_DIR") {
        return PathBuf::from(dir);
    }
    candidates()
        .into_iter()
        .find(|candidate| candidate.is_dir())
        .unwrap_or_else(|| PathBuf::from("delve_engine/data"))
}

fn candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from("delve_engine/data"), PathBuf::from("data")];

    if let Ok(exe_path) = env::current_exe()
        && let Some(dir) = exe_path.parent()
    {
        candidates.push(dir.join("delve_engine/data"));
        candidates.push(dir.join("data"));

        if let Some(parent) = dir.parent() {
            candidates.push(parent.join("delve_engine/data"));
            candidates.push(parent.join("data"));
        }
    }
    candidates
}
