use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::AuthorId;

/// Configuration for the demonstration scenario.
///
/// Describes the author and document to create, the comments to leave on the
/// original, and how many times to clone it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// The id of the author that writes the original document.
    pub author_id: AuthorId,

    /// The username of that author.
    pub username: String,

    /// Title of the original document.
    pub title: String,

    /// Content of the original document.
    pub content: String,

    /// Messages of the comments added to the original before cloning.
    pub comments: Vec<String>,

    /// How many times the original is cloned.
    pub clones: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            author_id: default_author_id(),
            username: default_username(),
            title: default_title(),
            content: default_content(),
            comments: default_comments(),
            clones: default_clones(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }
}

const fn default_author_id() -> AuthorId {
    AuthorId::new(1)
}

fn default_username() -> String {
    "GabrielEduardo".to_string()
}

fn default_title() -> String {
    "My Prototype Doc".to_string()
}

fn default_content() -> String {
    "Hello Prototype!".to_string()
}

fn default_comments() -> Vec<String> {
    vec!["Nice doc!".to_string()]
}

const fn default_clones() -> usize {
    1
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_author_id")]
        author_id: AuthorId,

        #[serde(default = "default_username")]
        username: String,

        #[serde(default = "default_title")]
        title: String,

        #[serde(default = "default_content")]
        content: String,

        /// An explicit empty list means "no comments", not the default.
        #[serde(default = "default_comments")]
        comments: Vec<String>,

        #[serde(default = "default_clones")]
        clones: usize,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                author_id,
                username,
                title,
                content,
                comments,
                clones,
            } => Self {
                author_id,
                username,
                title,
                content,
                comments,
                clones,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            author_id: config.author_id,
            username: config.username,
            title: config.title,
            content: config.content,
            comments: config.comments,
            clones: config.clones,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn load_reads_valid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"_version = \"1\"\nauthor_id = 7\nusername = \"ada\"\ntitle = \"Notes\"\ncontent = \"body\"\ncomments = [\"one\", \"two\"]\nclones = 3\n",
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.author_id, AuthorId::new(7));
        assert_eq!(config.username, "ada");
        assert_eq!(config.title, "Notes");
        assert_eq!(config.content, "body");
        assert_eq!(config.comments, ["one", "two"]);
        assert_eq!(config.clones, 3);
    }

    #[test]
    fn load_missing_file_returns_error() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("missing.toml");

        let error = Config::load(&missing).unwrap_err();
        assert!(error.starts_with("Failed to read config file:"));
    }

    #[test]
    fn load_invalid_toml_returns_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"_version = \"1\"\nclones = \"three\"\n")
            .unwrap();

        let error = Config::load(file.path()).unwrap_err();
        assert!(error.starts_with("Failed to parse config file:"));
    }

    #[test]
    fn empty_file_returns_default() {
        let expected = Config::default();
        let actual: Config = toml::from_str(r#"_version = "1""#).unwrap();
        assert_eq!(actual, expected);
    }

    #[test]
    fn explicit_empty_comment_list_is_kept() {
        let actual: Config = toml::from_str("_version = \"1\"\ncomments = []\n").unwrap();
        assert!(actual.comments.is_empty());
    }

    #[test]
    fn save_then_load_preserves_config() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("folio.toml");
        let config = Config {
            clones: 4,
            ..Config::default()
        };

        config.save(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), config);
    }
}
