//! Named strategy registry
//!
//! A [`Registry`] maps names to interchangeable implementations of one
//! pipeline stage and records which of them is the default. Registries are
//! filled once at startup and only read afterwards.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Named collection of strategies for one stage, with a single default
pub struct Registry<S: ?Sized> {
    label: &'static str,
    strategies: BTreeMap<String, Box<S>>,
    default: Option<String>,
}

impl<S: ?Sized> Registry<S> {
    /// Create an empty registry; `label` names the stage in error messages
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            strategies: BTreeMap::new(),
            default: None,
        }
    }

    /// Stage label, e.g. `"input"`
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Register `strategy` under `name`, optionally marking it as the default.
    ///
    /// Registering an existing name replaces the earlier strategy.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        strategy: Box<S>,
        is_default: bool,
    ) -> Result<()> {
        let name = name.into();
        if self.strategies.insert(name.clone(), strategy).is_some() {
            tracing::debug!(registry = self.label, %name, "replacing registered strategy");
        }
        if is_default {
            self.set_default(&name)?;
        }
        Ok(())
    }

    /// Record `name` as the default. Fails if a default is already set.
    pub fn set_default(&mut self, name: &str) -> Result<()> {
        if let Some(existing) = &self.default {
            return Err(Error::Configuration {
                registry: self.label.to_string(),
                message: format!(
                    "default already set to '{}', cannot set it to '{}'",
                    existing, name
                ),
            });
        }
        self.default = Some(name.to_string());
        Ok(())
    }

    /// Look up the strategy registered under `name`
    pub fn get(&self, name: &str) -> Result<&S> {
        self.strategies
            .get(name)
            .map(|s| s.as_ref())
            .ok_or_else(|| Error::UnknownStrategy {
                registry: self.label.to_string(),
                name: name.to_string(),
            })
    }

    /// All registered names in sorted order
    pub fn names(&self) -> Vec<&str> {
        self.strategies.keys().map(String::as_str).collect()
    }

    /// The default strategy name. Fails if no default was ever set.
    pub fn default_name(&self) -> Result<&str> {
        self.default.as_deref().ok_or_else(|| Error::Configuration {
            registry: self.label.to_string(),
            message: "default is not set".to_string(),
        })
    }

    /// Resolve `name`, falling back to the default when `None`
    pub fn resolve<'a>(&'a self, name: Option<&'a str>) -> Result<(&'a str, &'a S)> {
        let name = match name {
            Some(name) => name,
            None => self.default_name()?,
        };
        Ok((name, self.get(name)?))
    }

    /// Registered `(name, strategy)` pairs in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &S)> {
        self.strategies
            .iter()
            .map(|(name, strategy)| (name.as_str(), strategy.as_ref()))
    }

    /// Whether a strategy is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.strategies.contains_key(name)
    }

    /// Number of registered strategies
    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    /// Whether nothing has been registered
    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }
}

impl<S: ?Sized> std::fmt::Debug for Registry<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("label", &self.label)
            .field("names", &self.names())
            .field("default", &self.default)
            .finish()
    }
}
