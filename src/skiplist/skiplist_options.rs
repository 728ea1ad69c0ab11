use anyhow::{bail, Result};

pub const DEFAULT_MAX_LEVELS: usize = 32;
pub const DEFAULT_PROMOTION_PROBABILITY: f64 = 0.5;
// towers beyond this would never fill up with a u64 worth of keys anyway
pub const LEVELS_LIMIT: usize = 64;

#[derive(Debug, Clone)]
pub struct SkipListOptions {
    pub max_levels: usize,
    pub promotion_probability: f64,
    // fixed seed for reproducible tower heights, entropy when unset
    pub seed: Option<u64>,
}

impl SkipListOptions {
    pub fn new_with_defaults() -> Result<Self> {
        let options = Self {
            max_levels: DEFAULT_MAX_LEVELS,
            promotion_probability: DEFAULT_PROMOTION_PROBABILITY,
            seed: None,
        };
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_levels == 0 {
            bail!("max_levels must be at least 1");
        }
        if self.max_levels > LEVELS_LIMIT {
            bail!(
                "max_levels must be at most {}, got {}",
                LEVELS_LIMIT,
                self.max_levels
            );
        }
        let p = self.promotion_probability;
        if !(p > 0.0 && p < 1.0) {
            bail!("promotion_probability must be in (0, 1), got {}", p);
        }
        Ok(())
    }
}
