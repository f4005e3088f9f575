//! Optional TOML configuration: extra languages and markup overrides.
//!
//! ```toml
//! [markup]
//! comment = "em"
//!
//! [languages.ruby]
//! keywords = ["def", "end", "class", "module"]
//! ```

use std::collections::BTreeMap;
use std::error;
use std::fmt::{self, Display};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::keywords::{KeywordRegistry, KeywordSet};
use crate::markup::Markup;

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
pub struct LanguageDesc {
    pub keywords: Vec<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub markup: Markup,
    pub languages: BTreeMap<String, LanguageDesc>,
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Toml(basic_toml::Error),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ConfigError::Io {
                ref path,
                ref source,
            } => write!(f, "unable to read {}: {}", path.display(), source),
            ConfigError::Toml(ref err) => write!(f, "invalid config: {}", err),
        }
    }
}

impl error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            ConfigError::Io { ref source, .. } => Some(source),
            ConfigError::Toml(ref err) => Some(err),
        }
    }
}

impl From<basic_toml::Error> for ConfigError {
    fn from(err: basic_toml::Error) -> ConfigError {
        ConfigError::Toml(err)
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Config, ConfigError> {
        Ok(basic_toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        let config = Config::from_toml_str(&data)?;
        log::debug!(
            "loaded {} language(s) from {}",
            config.languages.len(),
            path.display()
        );
        Ok(config)
    }

    /// The builtin languages plus the ones declared here. A declared language
    /// replaces a builtin of the same name.
    pub fn registry(&self) -> KeywordRegistry {
        let mut registry = KeywordRegistry::shared().clone();
        for (name, desc) in &self.languages {
            registry.register(name, KeywordSet::new(&desc.keywords));
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.markup, Markup::default());
        assert!(config.languages.is_empty());
        let names: Vec<String> = config.registry().names().map(str::to_owned).collect();
        assert_eq!(names, vec!["python2", "python3"]);
    }

    #[test]
    fn languages_and_markup() {
        let config = Config::from_toml_str(
            r#"
            [markup]
            comment = "em"

            [languages.ruby]
            keywords = ["def", "end"]

            [languages.python3]
            keywords = ["async"]
            "#,
        )
        .unwrap();

        assert_eq!(config.markup.comment, "em");
        assert_eq!(config.markup.bold, "b");

        let registry = config.registry();
        assert!(registry.get("ruby").unwrap().contains("end"));
        let python3 = registry.get("python3").unwrap();
        assert!(python3.contains("async"));
        assert!(!python3.contains("for"));
    }

    #[test]
    fn unknown_key() {
        let err = Config::from_toml_str("[markup]\nunderline = \"u\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)), "{}", err);
    }

    #[test]
    fn missing_file() {
        let err = Config::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }), "{}", err);
    }
}
