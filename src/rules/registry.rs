//! Region lookup for rule sets.

use std::sync::Arc;

use tracing::warn;

use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};

use super::{CaliforniaRules, NewYorkRules, RuleSet};

/// Resolves region codes and names to rule sets.
///
/// Lookup is case-insensitive and matches either the short code or the full
/// name, so "CA", "ca" and "California" all find the California rules.
///
/// # Example
///
/// ```
/// use break_compliance::rules::RuleRegistry;
///
/// let registry = RuleRegistry::standard();
/// assert_eq!(registry.resolve("california").unwrap().code(), "CA");
/// assert_eq!(registry.resolve("New York").unwrap().code(), "NY");
/// assert!(registry.resolve("TX").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rule_sets: Vec<Arc<dyn RuleSet>>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the California and New York reference rules.
    pub fn standard() -> Self {
        Self::from_config(&EngineConfig::default())
    }

    /// Creates the reference registry using configured rule parameters.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new()
            .with(CaliforniaRules::new(config.california().clone()))
            .with(NewYorkRules::new(config.new_york().clone()))
    }

    /// Adds a rule set, returning the registry for chaining.
    pub fn with<R: RuleSet + 'static>(mut self, rules: R) -> Self {
        self.register(Arc::new(rules));
        self
    }

    /// Adds a rule set. Earlier registrations win on conflicting codes.
    pub fn register(&mut self, rules: Arc<dyn RuleSet>) {
        self.rule_sets.push(rules);
    }

    /// Finds the rule set for a region code or name.
    pub fn resolve(&self, region: &str) -> EngineResult<&dyn RuleSet> {
        let wanted = region.trim();

        self.rule_sets
            .iter()
            .find(|r| {
                r.code().eq_ignore_ascii_case(wanted) || r.name().eq_ignore_ascii_case(wanted)
            })
            .map(|r| &**r)
            .ok_or_else(|| {
                warn!(region = %region, "No rule set registered for region");
                EngineError::UnsupportedRegion {
                    region: region.to_string(),
                }
            })
    }

    /// Returns `(code, name)` for every registered region.
    pub fn regions(&self) -> Vec<(&'static str, &'static str)> {
        self.rule_sets.iter().map(|r| (r.code(), r.name())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CaliforniaConfig;
    use crate::rules::{BreakRequirements, CategoryRequirement};

    #[derive(Debug)]
    struct NoBreaks;

    impl RuleSet for NoBreaks {
        fn code(&self) -> &'static str {
            "WA"
        }

        fn name(&self) -> &'static str {
            "Washington"
        }

        fn requirements(&self, _shift_hours: i64) -> BreakRequirements {
            let none = CategoryRequirement {
                count: 0,
                duration: 0,
                is_paid: false,
            };
            BreakRequirements {
                meal: none,
                rest: none,
            }
        }
    }

    #[test]
    fn test_resolves_codes_and_names_case_insensitively() {
        let registry = RuleRegistry::standard();
        for region in ["ca", "CA", "California", "CALIFORNIA", " ca "] {
            assert_eq!(registry.resolve(region).unwrap().code(), "CA", "{}", region);
        }
        for region in ["ny", "NY", "new york", "New York"] {
            assert_eq!(registry.resolve(region).unwrap().code(), "NY", "{}", region);
        }
    }

    #[test]
    fn test_unknown_region_is_unsupported() {
        let registry = RuleRegistry::standard();
        match registry.resolve("TX") {
            Err(EngineError::UnsupportedRegion { region }) => assert_eq!(region, "TX"),
            other => panic!("Expected UnsupportedRegion, got {:?}", other.map(|r| r.code())),
        }
    }

    #[test]
    fn test_empty_registry_resolves_nothing() {
        assert!(RuleRegistry::new().resolve("CA").is_err());
    }

    #[test]
    fn test_new_region_can_be_registered() {
        let registry = RuleRegistry::standard().with(NoBreaks);
        assert_eq!(registry.resolve("washington").unwrap().code(), "WA");
        assert_eq!(
            registry.regions(),
            vec![("CA", "California"), ("NY", "New York"), ("WA", "Washington")]
        );
    }

    #[test]
    fn test_from_config_passes_parameters_through() {
        let config = EngineConfig::new(
            Default::default(),
            CaliforniaConfig {
                rest_break_duration_minutes: 12,
                ..CaliforniaConfig::default()
            },
            Default::default(),
        );
        let registry = RuleRegistry::from_config(&config);
        let requirements = registry.resolve("CA").unwrap().requirements(8);
        assert_eq!(requirements.rest.duration, 12);
    }
}
