//! Fallback strategies for instance selection

use std::str::FromStr;

/// Fallback strategy determines how an instance is picked when the router
/// has no opinion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackStrategy {
    /// Rotate through instances in round-robin fashion
    #[default]
    RoundRobin,

    /// Randomly select from available instances
    Random,

    /// Always select the instance with lowest priority number
    PriorityOnly,
}

impl FallbackStrategy {
    /// Pick an index into a pool of `len` instances.
    ///
    /// `priorities` must yield one priority per instance, in pool order.
    /// Returns `None` for an empty pool.
    pub(crate) fn pick(
        &self,
        len: usize,
        counter: u64,
        priorities: impl Iterator<Item = i32>,
    ) -> Option<usize> {
        if len == 0 {
            return None;
        }

        match self {
            FallbackStrategy::RoundRobin => Some((counter as usize) % len),
            FallbackStrategy::Random => {
                use std::collections::hash_map::RandomState;
                use std::hash::BuildHasher;

                let random_value = RandomState::new().hash_one(std::time::SystemTime::now());
                Some((random_value as usize) % len)
            }
            // Ties go to the earliest instance
            FallbackStrategy::PriorityOnly => priorities
                .enumerate()
                .min_by_key(|(_, priority)| *priority)
                .map(|(index, _)| index),
        }
    }
}

impl FromStr for FallbackStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "round_robin" => Ok(FallbackStrategy::RoundRobin),
            "random" => Ok(FallbackStrategy::Random),
            "priority_only" => Ok(FallbackStrategy::PriorityOnly),
            _ => Err(format!("Unknown fallback strategy: {}", s)),
        }
    }
}

impl std::fmt::Display for FallbackStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FallbackStrategy::RoundRobin => write!(f, "round_robin"),
            FallbackStrategy::Random => write!(f, "random"),
            FallbackStrategy::PriorityOnly => write!(f, "priority_only"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_strategy_default_is_round_robin() {
        assert_eq!(FallbackStrategy::default(), FallbackStrategy::RoundRobin);
    }

    #[test]
    fn fallback_strategy_from_str() {
        assert_eq!(
            "round_robin".parse::<FallbackStrategy>().unwrap(),
            FallbackStrategy::RoundRobin
        );
        assert_eq!(
            "random".parse::<FallbackStrategy>().unwrap(),
            FallbackStrategy::Random
        );
        assert_eq!(
            "priority_only".parse::<FallbackStrategy>().unwrap(),
            FallbackStrategy::PriorityOnly
        );
    }

    #[test]
    fn fallback_strategy_from_str_case_insensitive() {
        assert_eq!(
            "ROUND_ROBIN".parse::<FallbackStrategy>().unwrap(),
            FallbackStrategy::RoundRobin
        );
        assert_eq!(
            "Priority_Only".parse::<FallbackStrategy>().unwrap(),
            FallbackStrategy::PriorityOnly
        );
    }

    #[test]
    fn fallback_strategy_from_str_invalid() {
        assert!("least_connections".parse::<FallbackStrategy>().is_err());
    }

    #[test]
    fn fallback_strategy_display_roundtrips() {
        for strategy in [
            FallbackStrategy::RoundRobin,
            FallbackStrategy::Random,
            FallbackStrategy::PriorityOnly,
        ] {
            assert_eq!(strategy.to_string().parse::<FallbackStrategy>(), Ok(strategy));
        }
    }

    #[test]
    fn pick_on_empty_pool_is_none() {
        for strategy in [
            FallbackStrategy::RoundRobin,
            FallbackStrategy::Random,
            FallbackStrategy::PriorityOnly,
        ] {
            assert_eq!(strategy.pick(0, 7, std::iter::empty()), None);
        }
    }

    #[test]
    fn pick_round_robin_wraps() {
        let strategy = FallbackStrategy::RoundRobin;
        assert_eq!(strategy.pick(3, 0, std::iter::empty()), Some(0));
        assert_eq!(strategy.pick(3, 4, std::iter::empty()), Some(1));
    }

    #[test]
    fn pick_random_stays_in_bounds() {
        for _ in 0..100 {
            let index = FallbackStrategy::Random
                .pick(5, 0, std::iter::empty())
                .unwrap();
            assert!(index < 5);
        }
    }

    #[test]
    fn pick_priority_prefers_lowest_then_first() {
        let strategy = FallbackStrategy::PriorityOnly;
        assert_eq!(strategy.pick(4, 0, [3, 1, 2, 1].into_iter()), Some(1));
        assert_eq!(strategy.pick(2, 0, [5, 5].into_iter()), Some(0));
    }
}
