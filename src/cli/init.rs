//! Init command implementation

use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

use starmap::config::Config;

/// Default configuration content for starmap init
pub const DEFAULT_CONFIG: &str = r#"# starmap configuration
# =====================
#
# Progress, stars and leaderboards for the village learning map.

# ============================================================================
# FEED - How many rows each dashboard feed shows
# ============================================================================
#
#   student_recent      - Achievements on a student's dashboard (default: 5)
#   teacher_recent      - School-wide achievements on the teacher dashboard (default: 10)
#   recent_completions  - Rows in the teacher's recent progress tab (default: 10)
#
# A limit of 0 or less yields an empty feed.

[feed]
student_recent = 5
teacher_recent = 10
recent_completions = 10

# ============================================================================
# CACHE - Assembled views are reused while the snapshot is unchanged
# ============================================================================
#
#   max_age_secs - Rebuild views older than this even if no rows changed.
#                  Set to 0 to disable caching. (default: 30)

[cache]
max_age_secs = 30

# ============================================================================
# SOURCE - Where snapshots are fetched from
# ============================================================================
#
#   kind         - "json" (exported snapshot file) or "sqlite" (read-only database)
#   path         - File to read; relative paths resolve against the working directory
#   timeout_secs - Give up on a fetch after this long (default: 10)

[source]
kind = "json"
path = "snapshot.json"
timeout_secs = 10
"#;

/// Write the default config to `config_path`, or `.starmap/config.toml` in the working directory
pub async fn init_command(work_dir: &Path, config_path: Option<PathBuf>, force: bool) -> Result<()> {
    let config_path = config_path.unwrap_or_else(|| Config::project_config_path(work_dir));

    if config_path.exists() && !force {
        bail!(
            "Configuration already exists: {}\nUse --force to overwrite.",
            config_path.display()
        );
    }

    if let Some(parent) = config_path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)?;
    println!("Created: {}", config_path.display());

    Ok(())
}
