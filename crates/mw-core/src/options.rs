//! Connector options and configuration file loading
//!
//! Options can be written either as JSON or in an rc-style format:
//!
//! ```text
//! # comment
//! OPTIONS=seed:1234,door_weights:6 3 1
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::OptionsError;
use crate::rng::{GameRng, RandomSource};

/// User-configurable connector options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectorOptions {
    /// Fixed RNG seed; a fresh random seed is drawn when absent
    pub seed: Option<u64>,

    /// Relative weight of a room getting 1, 2, 3, ... doors
    pub door_weights: Vec<u32>,
}

impl ConnectorOptions {
    /// Load options from a file, JSON if it starts with `{`, rc-style otherwise
    pub fn load_from_file(path: &Path) -> Result<Self, OptionsError> {
        let contents = std::fs::read_to_string(path)?;
        if contents.trim_start().starts_with('{') {
            Self::from_json(&contents)
        } else {
            Self::parse_config(&contents)
        }
    }

    pub fn from_json(contents: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn to_json(&self) -> Result<String, OptionsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse options from an rc-style config string
    pub fn parse_config(contents: &str) -> Result<Self, OptionsError> {
        let mut options = Self::default();

        for line in contents.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(opts) = line.strip_prefix("OPTIONS=") {
                for opt in opts.split(',') {
                    options.parse_option(opt.trim())?;
                }
            }
        }

        Ok(options)
    }

    fn parse_option(&mut self, opt: &str) -> Result<(), OptionsError> {
        if opt.is_empty() {
            return Ok(());
        }
        let (name, value) = match opt.split_once(':').or_else(|| opt.split_once('=')) {
            Some((name, value)) => (name.trim(), Some(value.trim())),
            None => (opt, None),
        };
        self.set_option(name, value)
    }

    fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), OptionsError> {
        let invalid = |v: &str| OptionsError::InvalidValue(name.to_string(), v.to_string());

        match name {
            "seed" => {
                let value = value.ok_or_else(|| OptionsError::MissingValue(name.to_string()))?;
                self.seed = match value {
                    "random" => None,
                    _ => Some(value.parse().map_err(|_| invalid(value))?),
                };
            }
            "door_weights" | "doors" => {
                let value = value.ok_or_else(|| OptionsError::MissingValue(name.to_string()))?;
                self.door_weights = value
                    .split_whitespace()
                    .map(|w| w.parse().map_err(|_| invalid(w)))
                    .collect::<Result<_, _>>()?;
            }
            _ => return Err(OptionsError::UnknownOption(name.to_string())),
        }
        Ok(())
    }

    /// Render these options in rc-style format
    pub fn to_config_string(&self) -> String {
        let mut opts = Vec::new();
        if let Some(seed) = self.seed {
            opts.push(format!("seed:{seed}"));
        }
        if !self.door_weights.is_empty() {
            let weights: Vec<String> = self.door_weights.iter().map(u32::to_string).collect();
            opts.push(format!("door_weights:{}", weights.join(" ")));
        }
        if opts.is_empty() {
            String::new()
        } else {
            format!("OPTIONS={}\n", opts.join(","))
        }
    }

    /// RNG for a connect run, seeded from `seed` when set
    pub fn rng(&self) -> GameRng {
        match self.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        }
    }

    /// Number of doors a room should get, drawn from `door_weights`.
    ///
    /// Returns 1 when there are no usable weights. The merge loop opens one
    /// door per room and does not consult this.
    pub fn door_count(&self, rng: &mut impl RandomSource) -> u32 {
        let total: u64 = self.door_weights.iter().map(|&w| u64::from(w)).sum();
        let Ok(total) = i32::try_from(total) else {
            return 1;
        };
        if total <= 0 {
            return 1;
        }

        let mut roll = rng.range_int(0, total);
        for (i, &weight) in self.door_weights.iter().enumerate() {
            let weight = weight as i32;
            if roll < weight {
                return i as u32 + 1;
            }
            roll -= weight;
        }
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = ConnectorOptions::default();
        assert_eq!(opts.seed, None);
        assert!(opts.door_weights.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let config = "# connector\nOPTIONS=seed:42, door_weights:5 3 1\n";
        let opts = ConnectorOptions::parse_config(config).unwrap();
        assert_eq!(opts.seed, Some(42));
        assert_eq!(opts.door_weights, vec![5, 3, 1]);
    }

    #[test]
    fn test_parse_random_seed() {
        let opts = ConnectorOptions::parse_config("OPTIONS=seed=random").unwrap();
        assert_eq!(opts.seed, None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            ConnectorOptions::parse_config("OPTIONS=colour"),
            Err(OptionsError::UnknownOption(name)) if name == "colour"
        ));
        assert!(matches!(
            ConnectorOptions::parse_config("OPTIONS=seed"),
            Err(OptionsError::MissingValue(_))
        ));
        assert!(matches!(
            ConnectorOptions::parse_config("OPTIONS=door_weights:1 x"),
            Err(OptionsError::InvalidValue(_, v)) if v == "x"
        ));
    }

    #[test]
    fn test_config_roundtrip() {
        let opts = ConnectorOptions {
            seed: Some(7),
            door_weights: vec![2, 1],
        };
        let parsed = ConnectorOptions::parse_config(&opts.to_config_string()).unwrap();
        assert_eq!(parsed, opts);
    }

    #[test]
    fn test_json() {
        let opts = ConnectorOptions::from_json(r#"{"door_weights": [1, 4]}"#).unwrap();
        assert_eq!(opts.seed, None);
        assert_eq!(opts.door_weights, vec![1, 4]);
        let back = ConnectorOptions::from_json(&opts.to_json().unwrap()).unwrap();
        assert_eq!(back, opts);
    }

    #[test]
    fn test_door_count_without_weights() {
        let mut rng = GameRng::new(1);
        assert_eq!(ConnectorOptions::default().door_count(&mut rng), 1);
        let zero = ConnectorOptions {
            door_weights: vec![0, 0],
            ..Default::default()
        };
        assert_eq!(zero.door_count(&mut rng), 1);
    }

    #[test]
    fn test_door_count_follows_weights() {
        let mut rng = GameRng::new(5);
        let opts = ConnectorOptions {
            door_weights: vec![0, 0, 3],
            ..Default::default()
        };
        for _ in 0..50 {
            assert_eq!(opts.door_count(&mut rng), 3);
        }

        let opts = ConnectorOptions {
            door_weights: vec![1, 1],
            ..Default::default()
        };
        for _ in 0..50 {
            assert!((1..=2).contains(&opts.door_count(&mut rng)));
        }
    }

    #[test]
    fn test_seeded_rng() {
        let opts = ConnectorOptions {
            seed: Some(123),
            ..Default::default()
        };
        assert_eq!(opts.rng().seed(), 123);
    }
}
