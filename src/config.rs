//! Settings read from the environment.
//!
//! | Variable      | Default | Meaning                               |
//! |---------------|---------|---------------------------------------|
//! | `MAZE_WIDTH`  | 21      | grid width, odd and at least 3        |
//! | `MAZE_HEIGHT` | 21      | grid height, odd and at least 3       |
//! | `MAZE_SEED`   | random  | seed for a reproducible maze          |
//! | `MAZE_FPS`    | 30      | render frames per second              |
//! | `MAZE_PRINT`  | off     | print the maze and exit               |

pub const DEFAULT_WIDTH: usize = 21;
pub const DEFAULT_HEIGHT: usize = 21;
pub const DEFAULT_FPS: u64 = 30;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    pub width: usize,
    pub height: usize,
    pub seed: Option<u64>,
    pub fps: u64,
    pub print_only: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            seed: None,
            fps: DEFAULT_FPS,
            print_only: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. Unparseable values fall back to
    /// their defaults; dimensions are not validated here.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parsed = |key: &str| lookup(key).and_then(|v| v.trim().parse::<u64>().ok());
        let size = |key: &str| lookup(key).and_then(|v| v.trim().parse::<usize>().ok());

        Self {
            width: size("MAZE_WIDTH").unwrap_or(defaults.width),
            height: size("MAZE_HEIGHT").unwrap_or(defaults.height),
            seed: parsed("MAZE_SEED"),
            fps: parsed("MAZE_FPS")
                .filter(|v| *v > 0)
                .unwrap_or(defaults.fps),
            print_only: lookup("MAZE_PRINT")
                .map(|v| !v.is_empty() && v != "0")
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(config_from(&[]), Config::default());
    }

    #[test]
    fn reads_every_setting() {
        let config = config_from(&[
            ("MAZE_WIDTH", "31"),
            ("MAZE_HEIGHT", "15"),
            ("MAZE_SEED", "42"),
            ("MAZE_FPS", "60"),
            ("MAZE_PRINT", "1"),
        ]);
        assert_eq!(
            config,
            Config {
                width: 31,
                height: 15,
                seed: Some(42),
                fps: 60,
                print_only: true,
            }
        );
    }

    #[test]
    fn garbage_falls_back_but_even_sizes_are_kept() {
        let config = config_from(&[
            ("MAZE_WIDTH", "wide"),
            ("MAZE_HEIGHT", "20"),
            ("MAZE_SEED", "-3"),
            ("MAZE_FPS", "0"),
            ("MAZE_PRINT", "0"),
        ]);
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.height, 20);
        assert_eq!(config.seed, None);
        assert_eq!(config.fps, DEFAULT_FPS);
        assert!(!config.print_only);
    }

    #[test]
    fn sizes_beyond_usize_fall_back() {
        let too_big = format!("{}0", usize::MAX);
        let config = config_from(&[("MAZE_WIDTH", &too_big), ("MAZE_HEIGHT", "-21")]);
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.height, DEFAULT_HEIGHT);
    }

    #[test]
    fn largest_usize_size_is_kept_for_generate_to_reject() {
        let max = usize::MAX.to_string();
        let config = config_from(&[("MAZE_WIDTH", &max)]);
        assert_eq!(config.width, usize::MAX);
        assert!(crate::generate(config.width, config.height, Some(1)).is_err());
    }
}
