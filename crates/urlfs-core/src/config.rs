//! Transcoder and application configuration.
//!
//! The transcoder settings live in the `[transcoder]` section of
//! `~/.config/urlfs/config.toml`; every field is optional and falls back to
//! the defaults below.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::transcode::TranscodeError;

/// Default path separator.
pub const DEFAULT_SEPARATOR: char = '/';

/// Default maximum component length in bytes. One less than the common
/// `NAME_MAX` of 255.
pub const DEFAULT_MAX_COMPONENT_LENGTH: usize = 254;

/// Default disambiguation marker, prefixed to the final component.
pub const DEFAULT_MARKER: char = '_';

/// Printable characters escaped by default: the structural delimiters, the
/// marker, and characters rejected by FAT/NTFS.
const DEFAULT_RESERVED: &str = "%/?&=#:\"*<>\\|_";

/// Smallest budget that fits a 4-byte character or an escaped `..`.
const MIN_COMPONENT_LENGTH: usize = 6;

/// Characters that must be percent-encoded inside a component.
///
/// Serialized as a plain string holding every member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ReservedSet(BTreeSet<char>);

impl ReservedSet {
    pub fn contains(&self, c: char) -> bool {
        self.0.contains(&c)
    }

    pub fn insert(&mut self, c: char) -> bool {
        self.0.insert(c)
    }

    pub fn remove(&mut self, c: char) -> bool {
        self.0.remove(&c)
    }

}

impl Default for ReservedSet {
    /// Structural delimiters, the default marker, FAT/NTFS-illegal
    /// characters and every ASCII control character.
    fn default() -> Self {
        let controls = (0u8..0x20).chain([0x7f]).map(char::from);
        Self(DEFAULT_RESERVED.chars().chain(controls).collect())
    }
}

impl FromStr for ReservedSet {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.chars().collect()))
    }
}

impl From<String> for ReservedSet {
    fn from(s: String) -> Self {
        Self(s.chars().collect())
    }
}

impl From<ReservedSet> for String {
    fn from(set: ReservedSet) -> Self {
        set.0.into_iter().collect()
    }
}

impl fmt::Display for ReservedSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.0 {
            write!(f, "{}", c.escape_debug())?;
        }
        Ok(())
    }
}

/// Settings shared by every stage of the transcoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscoderConfig {
    /// Character joining components into a path.
    pub path_separator: char,
    /// Maximum length of one component in bytes, marker included.
    pub max_component_length: usize,
    /// Characters escaped as `%XX`.
    pub reserved_characters: ReservedSet,
    /// Prefix of the final component.
    pub marker: char,
}

impl Default for TranscoderConfig {
    fn default() -> Self {
        Self {
            path_separator: DEFAULT_SEPARATOR,
            max_component_length: DEFAULT_MAX_COMPONENT_LENGTH,
            reserved_characters: ReservedSet::default(),
            marker: DEFAULT_MARKER,
        }
    }
}

impl TranscoderConfig {
    /// Smallest `max_component_length` accepted with this marker.
    pub fn min_component_length(&self) -> usize {
        MIN_COMPONENT_LENGTH.max(4 + self.marker.len_utf8())
    }

    /// Checks that encoded output can be split and decoded unambiguously.
    pub fn validate(&self) -> Result<(), TranscodeError> {
        let minimum = self.min_component_length();
        if self.max_component_length < minimum {
            return Err(TranscodeError::LengthConfig {
                configured: self.max_component_length,
                minimum,
            });
        }
        let invalid = |reason: String| -> Result<(), TranscodeError> {
            Err(TranscodeError::InvalidConfig { reason })
        };
        if !self.reserved_characters.contains('%') {
            return invalid("'%' must be reserved".into());
        }
        for (name, c) in [("path separator", self.path_separator), ("marker", self.marker)] {
            if c == '%' || c.is_ascii_hexdigit() {
                return invalid(format!("{name} {c:?} can appear inside an escape"));
            }
            if !self.reserved_characters.contains(c) {
                return invalid(format!("{name} {c:?} must be reserved"));
            }
        }
        if self.path_separator == self.marker {
            return invalid("path separator and marker must differ".into());
        }
        Ok(())
    }
}

/// Global configuration loaded from `~/.config/urlfs/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UrlfsConfig {
    /// Root directory of the URL store (None = XDG data dir).
    #[serde(default)]
    pub store_root: Option<PathBuf>,
    #[serde(default)]
    pub transcoder: TranscoderConfig,
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("urlfs")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Default store root: `~/.local/share/urlfs/store`.
pub fn default_store_root() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("urlfs")?;
    Ok(xdg_dirs.get_data_home().join("store"))
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<UrlfsConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = UrlfsConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(&path)
}

/// Load configuration from an explicit file.
pub fn load_from(path: &Path) -> Result<UrlfsConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: UrlfsConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    tracing::debug!(
        "loaded config from {}: separator={:?} max_component_length={} marker={:?}",
        path.display(),
        cfg.transcoder.path_separator,
        cfg.transcoder.max_component_length,
        cfg.transcoder.marker
    );
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = TranscoderConfig::default();
        assert_eq!(cfg.path_separator, '/');
        assert_eq!(cfg.max_component_length, 254);
        assert_eq!(cfg.marker, '_');
        for c in ['%', '/', '?', '&', '=', '#', ':', '_', '\0', '\t', '\n', '\r', '\x7f'] {
            assert!(cfg.reserved_characters.contains(c), "{c:?} not reserved");
        }
        for c in ['a', '.', '-', ' ', '~', 'é'] {
            assert!(!cfg.reserved_characters.contains(c), "{c:?} reserved");
        }
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = UrlfsConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: UrlfsConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.transcoder, cfg.transcoder);
        assert!(parsed.store_root.is_none());
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            store_root = "/srv/urls"

            [transcoder]
            max_component_length = 100
            marker = "!"
            reserved_characters = "%/!?&=#"
        "#;
        let cfg: UrlfsConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.store_root.as_deref(), Some(Path::new("/srv/urls")));
        assert_eq!(cfg.transcoder.max_component_length, 100);
        assert_eq!(cfg.transcoder.marker, '!');
        assert_eq!(cfg.transcoder.path_separator, '/');
        assert_eq!(
            String::from(cfg.transcoder.reserved_characters.clone()),
            "!#%&/=?"
        );
        assert!(cfg.transcoder.validate().is_ok());
    }

    #[test]
    fn config_toml_empty_uses_defaults() {
        let cfg: UrlfsConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.transcoder, TranscoderConfig::default());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[transcoder]\nmax_component_length = 64\n").unwrap();
        let cfg = load_from(&path).unwrap();
        assert_eq!(cfg.transcoder.max_component_length, 64);
    }

    #[test]
    fn default_store_root_has_single_prefix() {
        let root = default_store_root().unwrap();
        assert!(root.ends_with("urlfs/store"), "{}", root.display());
        assert!(!root.ends_with("urlfs/urlfs/store"), "{}", root.display());
    }

    #[test]
    fn rejects_tiny_length() {
        let cfg = TranscoderConfig {
            max_component_length: 2,
            ..Default::default()
        };
        assert_eq!(
            cfg.validate(),
            Err(TranscodeError::LengthConfig {
                configured: 2,
                minimum: 6
            })
        );
    }

    #[test]
    fn wide_marker_raises_minimum() {
        let mut cfg = TranscoderConfig {
            marker: '§',
            max_component_length: 6,
            ..Default::default()
        };
        cfg.reserved_characters.insert('§');
        assert_eq!(cfg.min_component_length(), 6);
        cfg.marker = '€';
        cfg.reserved_characters.insert('€');
        assert_eq!(cfg.min_component_length(), 7);
        assert!(matches!(
            cfg.validate(),
            Err(TranscodeError::LengthConfig { minimum: 7, .. })
        ));
    }

    #[test]
    fn rejects_unreserved_marker() {
        let mut cfg = TranscoderConfig::default();
        cfg.reserved_characters.remove('_');
        assert!(matches!(
            cfg.validate(),
            Err(TranscodeError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn rejects_hex_digit_marker_and_unreserved_percent() {
        let mut cfg = TranscoderConfig {
            marker: 'A',
            ..Default::default()
        };
        cfg.reserved_characters.insert('A');
        assert!(matches!(
            cfg.validate(),
            Err(TranscodeError::InvalidConfig { .. })
        ));

        let mut cfg = TranscoderConfig::default();
        cfg.reserved_characters.remove('%');
        assert!(matches!(
            cfg.validate(),
            Err(TranscodeError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn rejects_marker_equal_to_separator() {
        let cfg = TranscoderConfig {
            marker: '/',
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(TranscodeError::InvalidConfig { .. })
        ));
    }
}
