//! Construction-time configuration for schemes and their element pools.

use serde::{Deserialize, Serialize};

/// Settings applied to every scheme a registry instantiates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemeConfig {
    /// Number of records the pool grows by when it runs out of reserved slots.
    pub pool_block_size: usize,
    /// Hard limit on the records a pool may hold; `None` means unbounded.
    pub pool_capacity: Option<usize>,
}

impl Default for SchemeConfig {
    fn default() -> Self {
        Self {
            pool_block_size: 64,
            pool_capacity: None,
        }
    }
}

impl SchemeConfig {
    /// A pool limited to `capacity` records.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            pool_capacity: Some(capacity),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: SchemeConfig = serde_json::from_str(r#"{ "pool_capacity": 128 }"#).unwrap();
        assert_eq!(cfg.pool_block_size, 64);
        assert_eq!(cfg.pool_capacity, Some(128));
    }
}
