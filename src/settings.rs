use std::path::Path;

use config::{Config, ConfigError, Environment, File, FileFormat};
use pathfix_kinematics::HeadingPolicy;
use pathfix_navigation::Connectivity;
use serde::Deserialize;
use tracing::{debug, info};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
const ENV_PREFIX: &str = "PATHFIX";

/// Run settings for one pipeline invocation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Grid rows.
    pub rows: usize,
    /// Grid columns.
    pub cols: usize,
    /// Edge length of one grid cell (m).
    pub cell_size_m: f64,
    pub wheel_radius_m: f64,
    pub wheel_rpm: f64,
    pub connectivity: Connectivity,
    pub heading_policy: HeadingPolicy,
    /// Retry a line without checksum comparison if the strict decode fails.
    pub checksum_fallback: bool,
    /// Blocked cells as `[row, col]`.
    pub obstacles: Vec<[usize; 2]>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            cell_size_m: 1.0,
            wheel_radius_m: 0.05,
            wheel_rpm: 120.0,
            connectivity: Connectivity::default(),
            heading_policy: HeadingPolicy::default(),
            checksum_fallback: false,
            obstacles: Vec::new(),
        }
    }
}

/// Loads settings from defaults, a TOML file and `PATHFIX_*` environment variables.
///
/// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_PATH`] is
/// read if present.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    load_settings_with_env(path, Environment::with_prefix(ENV_PREFIX))
}

fn load_settings_with_env(path: Option<&Path>, env: Environment) -> Result<Settings, ConfigError> {
    let (file, required) = match path {
        Some(path) => (path.to_string_lossy().into_owned(), true),
        None => (DEFAULT_CONFIG_PATH.to_string(), false),
    };
    info!("Loading configuration from {} (required: {})", file, required);

    let defaults = Settings::default();
    let settings = Config::builder()
        .set_default("rows", defaults.rows as i64)?
        .set_default("cols", defaults.cols as i64)?
        .set_default("cell_size_m", defaults.cell_size_m)?
        .set_default("wheel_radius_m", defaults.wheel_radius_m)?
        .set_default("wheel_rpm", defaults.wheel_rpm)?
        .set_default("connectivity", "eight_connected")?
        .set_default("heading_policy", "absolute_bearing")?
        .set_default("checksum_fallback", defaults.checksum_fallback)?
        .set_default("obstacles", Vec::<String>::new())?
        .add_source(File::new(&file, FileFormat::Toml).required(required))
        .add_source(env.try_parsing(true))
        .build()?
        .try_deserialize::<Settings>()?;

    debug!("Resolved settings: {:?}", settings);
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn no_env() -> Environment {
        Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::new()))
    }

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");
        // Missing explicit file is an error
        assert!(load_settings_with_env(Some(&missing), no_env()).is_err());

        let settings = load_settings_with_env(None, no_env()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_file_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
rows = 6
cols = 8
cell_size_m = 0.5
connectivity = "four_connected"
heading_policy = "turn_delta"
checksum_fallback = true
obstacles = [[1, 1], [2, 3]]
"#
        )
        .unwrap();

        let settings = load_settings_with_env(Some(file.path()), no_env()).unwrap();
        assert_eq!(settings.rows, 6);
        assert_eq!(settings.cols, 8);
        assert_eq!(settings.cell_size_m, 0.5);
        assert_eq!(settings.connectivity, Connectivity::FourConnected);
        assert_eq!(settings.heading_policy, HeadingPolicy::TurnDelta);
        assert!(settings.checksum_fallback);
        assert_eq!(settings.obstacles, vec![[1, 1], [2, 3]]);
        // Untouched keys keep their defaults
        assert_eq!(settings.wheel_radius_m, 0.05);
        assert_eq!(settings.wheel_rpm, 120.0);
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rows = 6\nwheel_rpm = 60.0").unwrap();

        let vars = HashMap::from([
            ("PATHFIX_ROWS".to_string(), "12".to_string()),
            ("PATHFIX_CHECKSUM_FALLBACK".to_string(), "true".to_string()),
        ]);
        let env = Environment::with_prefix(ENV_PREFIX).source(Some(vars));

        let settings = load_settings_with_env(Some(file.path()), env).unwrap();
        assert_eq!(settings.rows, 12);
        assert_eq!(settings.wheel_rpm, 60.0);
        assert!(settings.checksum_fallback);
    }

    #[test]
    fn test_unknown_enum_value() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "connectivity = \"six_connected\"").unwrap();
        assert!(load_settings_with_env(Some(file.path()), no_env()).is_err());
    }
}
