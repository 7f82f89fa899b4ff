//! Timing policy for the frame controller.

use std::str::FromStr;

use anyhow::{ensure, Context, Result};

use crate::types::{
    BASE_GRAVITY_MS, DEFAULT_ARR_MS, DEFAULT_DAS_MS, GRAVITY_FLOOR_MS, LOCK_DELAY_MS,
    LOCK_RESET_LIMIT, SOFT_DROP_ARR_MS, SOFT_DROP_DAS_MS, SPEED_UP_INTERVAL_MS, SPEED_UP_STEP_MS,
};

/// Tunable timings. Defaults come from `blockfall-types`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameConfig {
    pub das_ms: u32,
    pub arr_ms: u32,
    pub soft_drop_das_ms: u32,
    pub soft_drop_arr_ms: u32,
    pub lock_delay_ms: u32,
    /// Lock-delay resets allowed per piece.
    pub lock_reset_limit: u8,
    /// Gravity interval at level 0.
    pub gravity_ms: u32,
    pub gravity_floor_ms: u32,
    pub speed_up_interval_ms: u32,
    pub speed_up_step_ms: u32,
    /// `None` when the input source reports key releases.
    pub key_release_timeout_ms: Option<u32>,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            das_ms: DEFAULT_DAS_MS,
            arr_ms: DEFAULT_ARR_MS,
            soft_drop_das_ms: SOFT_DROP_DAS_MS,
            soft_drop_arr_ms: SOFT_DROP_ARR_MS,
            lock_delay_ms: LOCK_DELAY_MS,
            lock_reset_limit: LOCK_RESET_LIMIT,
            gravity_ms: BASE_GRAVITY_MS,
            gravity_floor_ms: GRAVITY_FLOOR_MS,
            speed_up_interval_ms: SPEED_UP_INTERVAL_MS,
            speed_up_step_ms: SPEED_UP_STEP_MS,
            key_release_timeout_ms: None,
        }
    }
}

impl FrameConfig {
    /// Defaults overridden by `BLOCKFALL_*` environment variables.
    ///
    /// - `BLOCKFALL_DAS_MS`, `BLOCKFALL_ARR_MS`
    /// - `BLOCKFALL_LOCK_DELAY_MS`, `BLOCKFALL_LOCK_RESET_LIMIT`
    /// - `BLOCKFALL_GRAVITY_MS`
    /// - `BLOCKFALL_KEY_RELEASE_TIMEOUT_MS` (0 disables)
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(v) = parse_var(&lookup, "BLOCKFALL_DAS_MS")? {
            config.das_ms = v;
        }
        if let Some(v) = parse_var(&lookup, "BLOCKFALL_ARR_MS")? {
            config.arr_ms = v;
        }
        if let Some(v) = parse_var(&lookup, "BLOCKFALL_LOCK_DELAY_MS")? {
            config.lock_delay_ms = v;
        }
        if let Some(v) = parse_var(&lookup, "BLOCKFALL_LOCK_RESET_LIMIT")? {
            config.lock_reset_limit = v;
        }
        if let Some(v) = parse_var(&lookup, "BLOCKFALL_GRAVITY_MS")? {
            config.gravity_ms = v;
        }
        if let Some(v) = parse_var::<u32>(&lookup, "BLOCKFALL_KEY_RELEASE_TIMEOUT_MS")? {
            config.key_release_timeout_ms = (v > 0).then_some(v);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.gravity_ms > 0, "gravity interval must be positive");
        ensure!(
            self.speed_up_interval_ms > 0,
            "speed-up interval must be positive"
        );
        Ok(())
    }

    /// Gravity interval after `level` speed-ups.
    ///
    /// Never drops below the floor, or below the base interval when the base
    /// is already faster than the floor.
    pub fn gravity_for_level(&self, level: u32) -> u32 {
        let floor = self.gravity_floor_ms.min(self.gravity_ms).max(1);
        self.gravity_ms
            .saturating_sub(level.saturating_mul(self.speed_up_step_ms))
            .max(floor)
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse()
        .map(Some)
        .with_context(|| format!("invalid value for {name}: {raw:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_without_overrides() {
        let config = FrameConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, FrameConfig::default());
        assert_eq!(config.das_ms, 150);
        assert_eq!(config.lock_delay_ms, 250);
        assert_eq!(config.lock_reset_limit, 30);
        assert_eq!(config.gravity_ms, 800);
    }

    #[test]
    fn test_overrides_apply() {
        let config = FrameConfig::from_lookup(lookup(&[
            ("BLOCKFALL_DAS_MS", "120"),
            ("BLOCKFALL_ARR_MS", " 30 "),
            ("BLOCKFALL_LOCK_RESET_LIMIT", "15"),
            ("BLOCKFALL_GRAVITY_MS", "500"),
            ("BLOCKFALL_KEY_RELEASE_TIMEOUT_MS", "150"),
        ]))
        .unwrap();
        assert_eq!(config.das_ms, 120);
        assert_eq!(config.arr_ms, 30);
        assert_eq!(config.lock_reset_limit, 15);
        assert_eq!(config.gravity_ms, 500);
        assert_eq!(config.key_release_timeout_ms, Some(150));
    }

    #[test]
    fn test_zero_timeout_disables_auto_release() {
        let config =
            FrameConfig::from_lookup(lookup(&[("BLOCKFALL_KEY_RELEASE_TIMEOUT_MS", "0")])).unwrap();
        assert_eq!(config.key_release_timeout_ms, None);
    }

    #[test]
    fn test_bad_values_name_the_variable() {
        let err = FrameConfig::from_lookup(lookup(&[("BLOCKFALL_DAS_MS", "fast")])).unwrap_err();
        assert!(err.to_string().contains("BLOCKFALL_DAS_MS"));

        let err =
            FrameConfig::from_lookup(lookup(&[("BLOCKFALL_LOCK_RESET_LIMIT", "300")])).unwrap_err();
        assert!(err.to_string().contains("BLOCKFALL_LOCK_RESET_LIMIT"));
    }

    #[test]
    fn test_zero_gravity_is_rejected() {
        assert!(FrameConfig::from_lookup(lookup(&[("BLOCKFALL_GRAVITY_MS", "0")])).is_err());
    }

    #[test]
    fn test_gravity_speeds_up_to_floor() {
        let config = FrameConfig::default();
        assert_eq!(config.gravity_for_level(0), 800);
        assert_eq!(config.gravity_for_level(3), 500);
        assert_eq!(config.gravity_for_level(7), 100);
        assert_eq!(config.gravity_for_level(50), 100);

        let fast = FrameConfig {
            gravity_ms: 50,
            ..FrameConfig::default()
        };
        assert_eq!(fast.gravity_for_level(0), 50);
        assert_eq!(fast.gravity_for_level(10), 50);
    }
}
