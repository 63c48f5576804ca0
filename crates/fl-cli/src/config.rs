use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use fl_core::SimConfig;

/// Environment variable naming a default TOML config file.
pub const CONFIG_ENV: &str = "FUZZY_LIFE_CONFIG";

/// Simulation parameters that may override the config file.
#[derive(Args, Debug, Default, Clone)]
pub struct SimArgs {
    /// Steepness of the smooth rule (higher is closer to classic Life)
    #[arg(long)]
    pub sharpness: Option<f64>,

    /// Cells closer than this to the vacuum value are dropped
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Viewport hysteresis margin, in cells
    #[arg(long)]
    pub margin: Option<f64>,

    /// Fixed-point iterations for the vacuum estimate
    #[arg(long)]
    pub vacuum_iterations: Option<usize>,

    /// Stop the vacuum estimate early once successive values differ by less than this
    #[arg(long)]
    pub vacuum_tolerance: Option<f64>,
}

impl SimArgs {
    pub fn apply(&self, config: &mut SimConfig) {
        if let Some(s) = self.sharpness {
            config.sharpness = s;
        }
        if let Some(e) = self.epsilon {
            config.epsilon = e;
        }
        if let Some(m) = self.margin {
            config.margin = m;
        }
        if let Some(n) = self.vacuum_iterations {
            config.vacuum_iterations = n;
        }
        if let Some(t) = self.vacuum_tolerance {
            config.vacuum_tolerance = Some(t);
        }
    }
}

fn config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    explicit.map(Path::to_path_buf).or_else(|| {
        std::env::var(CONFIG_ENV)
            .ok()
            .filter(|s| !s.is_empty())
            .map(PathBuf::from)
    })
}

/// Parse a TOML document into a config; missing keys keep their defaults.
pub fn parse_config(text: &str) -> Result<SimConfig> {
    toml::from_str(text).context("invalid config file")
}

/// Defaults, then the config file (flag or env), then command-line flags.
pub fn resolve(explicit: Option<&Path>, overrides: &SimArgs) -> Result<SimConfig> {
    let mut config = match config_path(explicit) {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            let config = parse_config(&text)
                .with_context(|| format!("failed to load config {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => SimConfig::default(),
    };
    overrides.apply(&mut config);
    config.validate()?;
    Ok(config)
}

/// `WIDTHxHEIGHT`, e.g. `800x450`.
pub fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let w: u32 = w.trim().parse().map_err(|_| format!("bad width in {s:?}"))?;
    let h: u32 = h.trim().parse().map_err(|_| format!("bad height in {s:?}"))?;
    if w == 0 || h == 0 {
        return Err(format!("size must be non-zero, got {s:?}"));
    }
    Ok((w, h))
}

/// `X,Y`, e.g. `-10,4`.
pub fn parse_offset(s: &str) -> Result<(i64, i64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x = x.trim().parse().map_err(|_| format!("bad x in {s:?}"))?;
    let y = y.trim().parse().map_err(|_| format!("bad y in {s:?}"))?;
    Ok((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_partial() {
        let cfg = parse_config("sharpness = 8.0\nvacuum_tolerance = 1e-12\n").unwrap();
        assert_eq!(cfg.sharpness, 8.0);
        assert_eq!(cfg.vacuum_tolerance, Some(1e-12));
        assert_eq!(cfg.margin, fl_core::MARGIN);
    }

    #[test]
    fn test_parse_config_rejects_unknown_types() {
        assert!(parse_config("sharpness = \"sharp\"").is_err());
    }

    #[test]
    fn test_flags_override_file_values() {
        let mut cfg = parse_config("sharpness = 8.0\nmargin = 4.0\n").unwrap();
        let args = SimArgs {
            sharpness: Some(20.0),
            ..SimArgs::default()
        };
        args.apply(&mut cfg);
        assert_eq!(cfg.sharpness, 20.0);
        assert_eq!(cfg.margin, 4.0);
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("800x450"), Ok((800, 450)));
        assert_eq!(parse_size("20X10"), Ok((20, 10)));
        assert!(parse_size("800").is_err());
        assert!(parse_size("0x10").is_err());
    }

    #[test]
    fn test_parse_offset() {
        assert_eq!(parse_offset("-10,4"), Ok((-10, 4)));
        assert_eq!(parse_offset(" 3 , 5 "), Ok((3, 5)));
        assert!(parse_offset("3;5").is_err());
    }
}
