//! Easing registry
//!
//! Maps kebab-case names to timing functions. The registry is seeded with
//! every built-in [`Easing`] and can be extended with custom curves; a custom
//! curve registered under a built-in name replaces it.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use tracing::debug;

use crate::easing::{Easing, TimingFunction};

/// A timing function that can be shared across threads
pub type SharedTimingFunction = Arc<dyn TimingFunction>;

/// Ordered name → timing function lookup
#[derive(Clone)]
pub struct EasingRegistry {
    functions: IndexMap<String, SharedTimingFunction>,
}

impl EasingRegistry {
    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            functions: IndexMap::new(),
        }
    }

    /// Create a registry holding every built-in easing
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        for easing in Easing::ALL {
            registry
                .functions
                .insert(easing.name().to_string(), Arc::new(easing));
        }
        registry
    }

    /// Register a timing function
    ///
    /// `name` may be camelCase (`easeInBack`) or kebab-case (`ease-in-back`);
    /// it is stored kebab-case.
    pub fn register<F>(&mut self, name: &str, function: F)
    where
        F: TimingFunction + 'static,
    {
        self.register_shared(name, Arc::new(function));
    }

    /// Register an already shared timing function
    pub fn register_shared(&mut self, name: &str, function: SharedTimingFunction) {
        let key = to_kebab_case(name);
        if self.functions.insert(key.clone(), function).is_some() {
            debug!("easing '{}' overridden by custom function", key);
        }
    }

    /// Builder form of [`register`](Self::register)
    pub fn with<F>(mut self, name: &str, function: F) -> Self
    where
        F: TimingFunction + 'static,
    {
        self.register(name, function);
        self
    }

    /// Look up a timing function by name (camelCase or kebab-case)
    pub fn get(&self, name: &str) -> Option<SharedTimingFunction> {
        self.functions
            .get(name)
            .or_else(|| self.functions.get(&to_kebab_case(name)))
            .cloned()
    }

    /// Check if a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Registered names, in registration order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    /// Names joined with `|`, for embedding in a rule pattern
    pub fn pattern(&self) -> String {
        self.names().collect::<Vec<_>>().join("|")
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl Default for EasingRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl fmt::Debug for EasingRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EasingRegistry")
            .field("names", &self.functions.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// `easeInOutCubic` / `ease_in out` → `ease-in-out-cubic`
pub fn to_kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for c in name.chars() {
        if c == '_' || c.is_whitespace() {
            if !out.ends_with('-') {
                out.push('-');
            }
            prev_lower = false;
        } else if c.is_ascii_uppercase() {
            if prev_lower {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else {
            out.push(c);
            prev_lower = c.is_ascii_lowercase();
        }
    }
    out
}

/// `ease-in-out-cubic` → `easeInOutCubic`
pub fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '-' || c == '_' {
            upper_next = true;
        } else if upper_next {
            out.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bezier::CubicBezier;

    #[test]
    fn test_defaults_registered_in_order() {
        let registry = EasingRegistry::with_defaults();
        assert_eq!(registry.len(), Easing::ALL.len());
        let names: Vec<_> = registry.names().collect();
        assert_eq!(names[0], "linear");
        assert_eq!(names[4], "ease-in-out");
        assert_eq!(names[22], "ease-in-out-circ");
    }

    #[test]
    fn test_lookup_accepts_camel_case() {
        let registry = EasingRegistry::default();
        let f = registry.get("easeInOutCubic").unwrap();
        assert!((f.apply(0.25) - Easing::EaseInOutCubic.apply(0.25)).abs() < 1e-12);
        assert!(registry.contains("ease-in-out-cubic"));
        assert!(!registry.contains("bounce"));
    }

    #[test]
    fn test_custom_function_overrides_default() {
        let registry = EasingRegistry::with_defaults()
            .with("linear", |t: f64| t * 0.5)
            .with("snappy", CubicBezier::new(0.2, 0.9, 0.1, 1.0));

        assert_eq!(registry.len(), Easing::ALL.len() + 1);
        assert_eq!(registry.get("linear").unwrap().apply(1.0), 0.5);
        assert!(registry.pattern().ends_with("|snappy"));
    }

    #[test]
    fn test_case_conversions() {
        assert_eq!(to_kebab_case("easeInOutCubic"), "ease-in-out-cubic");
        assert_eq!(to_kebab_case("linear"), "linear");
        assert_eq!(to_kebab_case("my_custom curve"), "my-custom-curve");
        assert_eq!(to_camel_case("ease-in-out-cubic"), "easeInOutCubic");
        assert_eq!(to_camel_case(&to_kebab_case("easeOutExpo")), "easeOutExpo");
    }
}
