//! Numeric tolerance and its configuration sources
//!
//! Every [`Vector`](crate::Vector) and [`Matrix`](crate::Matrix) carries the
//! [`Tolerance`] it was built with, and every result inherits it. A process
//! default can be bound once at startup with [`Tolerance::install_global`];
//! constructors that take no explicit tolerance read that default.
//!
//! ## Configuration
//!
//! [`LinalgConfig::from_env`] reads, in order:
//!
//! - `COMPLEX_LINALG_CONFIG`: path to a TOML file with a `[tolerance]` table
//! - `COMPLEX_LINALG_EPSILON`: overrides `epsilon`
//!
//! ```toml
//! [tolerance]
//! epsilon = 1e-9
//! max_sweeps = 100
//! ```

use std::env;
use std::fs;
use std::path::Path;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::error::{LinalgError, LinalgResult};
use crate::scalar::C64;

pub const CONFIG_PATH_VAR: &str = "COMPLEX_LINALG_CONFIG";
pub const EPSILON_VAR: &str = "COMPLEX_LINALG_EPSILON";

static GLOBAL_TOLERANCE: OnceCell<Tolerance> = OnceCell::new();

/// Comparison tolerance shared by every zero test, equality and pivot choice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    epsilon: f64,
    max_sweeps: usize,
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            epsilon: Self::DEFAULT_EPSILON,
            max_sweeps: Self::DEFAULT_MAX_SWEEPS,
        }
    }
}

impl Tolerance {
    pub const DEFAULT_EPSILON: f64 = 1e-9;
    /// QR sweeps allowed on one eigenvalue window before giving up
    pub const DEFAULT_MAX_SWEEPS: usize = 100;

    pub fn new(epsilon: f64, max_sweeps: usize) -> LinalgResult<Self> {
        let tol = Self {
            epsilon,
            max_sweeps,
        };
        tol.validate()?;
        Ok(tol)
    }

    /// Default sweep budget with a custom epsilon
    pub fn with_epsilon(epsilon: f64) -> LinalgResult<Self> {
        Self::new(epsilon, Self::DEFAULT_MAX_SWEEPS)
    }

    fn validate(&self) -> LinalgResult<()> {
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(LinalgError::config(format!(
                "epsilon must be finite and positive, got {}",
                self.epsilon
            )));
        }
        if self.max_sweeps == 0 {
            return Err(LinalgError::config("max_sweeps must be at least 1"));
        }
        Ok(())
    }

    pub fn epsilon(self) -> f64 {
        self.epsilon
    }

    pub fn max_sweeps(self) -> usize {
        self.max_sweeps
    }

    /// The installed process default, or [`Tolerance::default`] when none was installed.
    pub fn global() -> Tolerance {
        GLOBAL_TOLERANCE.get().copied().unwrap_or_default()
    }

    /// Bind the process default. Succeeds again only with an identical value.
    pub fn install_global(self) -> LinalgResult<()> {
        self.validate()?;
        let installed = GLOBAL_TOLERANCE.get_or_init(|| self);
        if *installed != self {
            return Err(LinalgError::config(format!(
                "a global tolerance (epsilon = {}) is already installed",
                installed.epsilon
            )));
        }
        Ok(())
    }

    /// `|z| < ε`
    pub fn is_zero(self, z: C64) -> bool {
        z.norm() < self.epsilon
    }

    /// `|z| < ε·max(scale, 1)`, the deflation and rank criterion
    pub fn is_negligible(self, z: C64, scale: f64) -> bool {
        self.is_negligible_norm(z.norm(), scale)
    }

    pub(crate) fn is_negligible_norm(self, modulus: f64, scale: f64) -> bool {
        modulus < self.epsilon * scale.max(1.0)
    }

    /// Component-wise equality: `|re1-re2| < ε` and `|im1-im2| < ε`
    pub fn approx_eq(self, a: C64, b: C64) -> bool {
        (a.re - b.re).abs() < self.epsilon && (a.im - b.im).abs() < self.epsilon
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    tolerance: Tolerance,
}

/// Startup configuration for the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LinalgConfig {
    pub tolerance: Tolerance,
}

impl LinalgConfig {
    /// Parse a TOML document with an optional `[tolerance]` table.
    pub fn from_toml_str(source: &str) -> LinalgResult<Self> {
        let parsed: ConfigFile = toml::from_str(source)
            .map_err(|e| LinalgError::config(format!("invalid configuration: {}", e)))?;
        parsed.tolerance.validate()?;
        Ok(Self {
            tolerance: parsed.tolerance,
        })
    }

    pub fn from_file(path: &Path) -> LinalgResult<Self> {
        let source = fs::read_to_string(path).map_err(|e| {
            LinalgError::config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&source)
    }

    /// Build from `COMPLEX_LINALG_CONFIG` and `COMPLEX_LINALG_EPSILON`.
    pub fn from_env() -> LinalgResult<Self> {
        let mut config = match config_path_from_env() {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        if let Some(epsilon) = epsilon_from_env()? {
            config.tolerance = Tolerance::new(epsilon, config.tolerance.max_sweeps)?;
        }
        Ok(config)
    }

    /// Install the tolerance as the process default.
    pub fn install(&self) -> LinalgResult<()> {
        self.tolerance.install_global()
    }
}

fn config_path_from_env() -> Option<String> {
    env::var(CONFIG_PATH_VAR)
        .ok()
        .filter(|val| !val.trim().is_empty())
}

fn epsilon_from_env() -> LinalgResult<Option<f64>> {
    let Ok(raw) = env::var(EPSILON_VAR) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<f64>()
        .map(Some)
        .map_err(|e| LinalgError::config(format!("{}={:?}: {}", EPSILON_VAR, raw, e)))
}
