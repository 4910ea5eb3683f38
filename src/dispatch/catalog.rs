//! Names the `*` target expands to.

use crate::common::config::SaiConfig;

pub trait SoftwareCatalog {
    fn names(&self) -> Vec<String>;
}

/// Built-in list used when the config does not name any software.
pub const DEFAULT_SOFTWARE: &[&str] = &["nginx", "docker", "mysql", "redis", "kubernetes"];

#[derive(Debug, Default, Clone, Copy)]
pub struct StaticCatalog;

impl SoftwareCatalog for StaticCatalog {
    fn names(&self) -> Vec<String> {
        DEFAULT_SOFTWARE.iter().map(|s| s.to_string()).collect()
    }
}

/// `managed_software` from the config file, in file order, duplicates
/// dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListCatalog {
    names: Vec<String>,
}

impl ListCatalog {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for name in names.into_iter().map(Into::into) {
            let name = name.trim().to_string();
            if !name.is_empty() && !unique.contains(&name) {
                unique.push(name);
            }
        }
        Self { names: unique }
    }
}

impl SoftwareCatalog for ListCatalog {
    fn names(&self) -> Vec<String> {
        self.names.clone()
    }
}

/// The catalog for a loaded config.
pub fn from_config(config: &SaiConfig) -> Box<dyn SoftwareCatalog> {
    if config.managed_software.is_empty() {
        Box::new(StaticCatalog)
    } else {
        Box::new(ListCatalog::new(config.managed_software.iter().cloned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_catalog() {
        assert_eq!(StaticCatalog.names(), DEFAULT_SOFTWARE);
    }

    #[test]
    fn test_list_catalog_dedups_and_trims() {
        let catalog = ListCatalog::new(["redis", " nginx ", "redis", ""]);
        assert_eq!(catalog.names(), vec!["redis", "nginx"]);
    }

    #[test]
    fn test_from_config() {
        let config = SaiConfig::default();
        assert_eq!(from_config(&config).names().len(), DEFAULT_SOFTWARE.len());

        let config = SaiConfig {
            managed_software: vec!["postgresql".into()],
            ..Default::default()
        };
        assert_eq!(from_config(&config).names(), vec!["postgresql"]);
    }
}
