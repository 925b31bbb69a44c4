//! URL-keyed file storage on top of the transcoder.
//!
//! Each URL's content lives at `root/<encoded components>`. Writes go to a
//! temporary file in the target directory and are renamed into place, so a
//! reader never sees a partial file.

use anyhow::{bail, Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::transcode::Transcoder;

/// A directory tree holding one file per stored URL.
#[derive(Debug, Clone)]
pub struct UrlStore {
    root: PathBuf,
    transcoder: Transcoder,
}

impl UrlStore {
    /// Opens (creating if needed) a store rooted at `root`.
    ///
    /// Fails if the transcoder could emit a component containing a
    /// platform path separator.
    pub fn open(root: impl Into<PathBuf>, transcoder: Transcoder) -> Result<Self> {
        let root = root.into();
        let reserved = &transcoder.config().reserved_characters;
        for sep in ['/', std::path::MAIN_SEPARATOR] {
            if !reserved.contains(sep) {
                bail!("store needs {sep:?} in the reserved characters");
            }
        }
        fs::create_dir_all(&root)
            .with_context(|| format!("create store root {}", root.display()))?;
        tracing::debug!("opened url store at {}", root.display());
        Ok(Self { root, transcoder })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn transcoder(&self) -> &Transcoder {
        &self.transcoder
    }

    /// Filesystem path of `url`'s file; nothing is created.
    pub fn path_for(&self, url: &str) -> PathBuf {
        let mut path = self.root.clone();
        for component in self.transcoder.path_components(url) {
            path.push(component);
        }
        path
    }

    /// Stores `contents` for `url`, replacing any previous content.
    pub fn write(&self, url: &str, contents: &[u8]) -> Result<PathBuf> {
        let path = self.path_for(url);
        let dir = path.parent().unwrap_or(&self.root);
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("create temp file in {}", dir.display()))?;
        tmp.write_all(contents)
            .with_context(|| format!("write temp file for {url}"))?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path)
            .map_err(|e| e.error)
            .with_context(|| format!("rename into {}", path.display()))?;

        tracing::debug!("stored {} bytes for {} at {}", contents.len(), url, path.display());
        Ok(path)
    }

    /// Content stored for `url`.
    pub fn read(&self, url: &str) -> Result<Vec<u8>> {
        let path = self.path_for(url);
        fs::read(&path).with_context(|| format!("read {} ({})", url, path.display()))
    }

    pub fn contains(&self, url: &str) -> bool {
        self.path_for(url).is_file()
    }

    /// Deletes `url`'s file and any directories left empty, up to the root.
    pub fn remove(&self, url: &str) -> Result<()> {
        let path = self.path_for(url);
        fs::remove_file(&path).with_context(|| format!("remove {} ({})", url, path.display()))?;

        let mut dir = path.parent();
        while let Some(d) = dir {
            if d == self.root.as_path() || !is_empty_dir(d)? {
                break;
            }
            fs::remove_dir(d).with_context(|| format!("remove {}", d.display()))?;
            dir = d.parent();
        }
        tracing::debug!("removed {}", url);
        Ok(())
    }

    /// Every stored URL, sorted. Files whose names do not decode (temp files,
    /// foreign files) are skipped with a warning.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut sep = [0u8; 4];
        let sep: &str = self.transcoder.config().path_separator.encode_utf8(&mut sep);

        let mut urls = Vec::new();
        let mut pending = vec![self.root.clone()];
        while let Some(dir) = pending.pop() {
            let entries =
                fs::read_dir(&dir).with_context(|| format!("list {}", dir.display()))?;
            for entry in entries {
                let entry = entry?;
                let path = entry.path();
                if entry.file_type()?.is_dir() {
                    pending.push(path);
                    continue;
                }
                match self.decode_relative(&path, sep) {
                    Some(url) => urls.push(url),
                    None => tracing::warn!("skipping undecodable file {}", path.display()),
                }
            }
        }
        urls.sort();
        Ok(urls)
    }

    fn decode_relative(&self, path: &Path, sep: &str) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;
        let components = relative
            .components()
            .map(|c| c.as_os_str().to_str())
            .collect::<Option<Vec<_>>>()?;
        self.transcoder.decode(&components.join(sep)).ok()
    }
}

fn is_empty_dir(dir: &Path) -> Result<bool> {
    let mut entries = fs::read_dir(dir).with_context(|| format!("list {}", dir.display()))?;
    Ok(entries.next().is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranscoderConfig;

    fn store(root: &Path) -> UrlStore {
        let transcoder = Transcoder::new(TranscoderConfig::default()).unwrap();
        UrlStore::open(root, transcoder).unwrap()
    }

    #[test]
    fn path_for_joins_components_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(dir.path());
        assert_eq!(
            s.path_for("http://example.com/a"),
            dir.path().join("http%3A%2F%2F").join("example.com%2F").join("_a")
        );
        assert!(!s.contains("http://example.com/a"));
    }

    #[test]
    fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(dir.path());
        let url = "http://example.com/toto?param=value";
        let path = s.write(url, b"hello").unwrap();
        assert!(path.is_file());
        assert!(s.contains(url));
        assert_eq!(s.read(url).unwrap(), b"hello");

        s.write(url, b"replaced").unwrap();
        assert_eq!(s.read(url).unwrap(), b"replaced");
    }

    #[test]
    fn file_and_directory_urls_coexist() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(dir.path());
        s.write("http://example.com/dir", b"file").unwrap();
        s.write("http://example.com/dir/file", b"nested").unwrap();
        assert_eq!(s.read("http://example.com/dir").unwrap(), b"file");
        assert_eq!(s.read("http://example.com/dir/file").unwrap(), b"nested");
    }

    #[test]
    fn list_decodes_every_file() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(dir.path());
        let urls = ["http://b.com/", "http://a.com/x?y=z", "http://a.com/x"];
        for url in urls {
            s.write(url, url.as_bytes()).unwrap();
        }
        fs::write(dir.path().join("stray"), b"?").unwrap();

        let mut expected: Vec<String> = urls.iter().map(|u| u.to_string()).collect();
        expected.sort();
        assert_eq!(s.list().unwrap(), expected);
    }

    #[test]
    fn remove_prunes_empty_directories() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(dir.path());
        s.write("http://example.com/a/b/c", b"1").unwrap();
        s.write("http://example.com/x", b"2").unwrap();

        s.remove("http://example.com/a/b/c").unwrap();
        assert!(!s.contains("http://example.com/a/b/c"));
        assert!(!dir.path().join("http%3A%2F%2F").join("example.com%2F").join("a%2F").exists());
        assert!(s.contains("http://example.com/x"));
        assert_eq!(s.list().unwrap(), vec!["http://example.com/x".to_string()]);

        s.remove("http://example.com/x").unwrap();
        assert!(dir.path().exists());
        assert!(s.list().unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn list_does_not_follow_symlinked_directories() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(dir.path());
        s.write("http://example.com/a/b", b"1").unwrap();
        let nested = dir.path().join("http%3A%2F%2F").join("example.com%2F");
        std::os::unix::fs::symlink(dir.path(), nested.join("loop")).unwrap();

        assert_eq!(s.list().unwrap(), vec!["http://example.com/a/b".to_string()]);
    }

    #[test]
    fn remove_missing_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let s = store(dir.path());
        assert!(s.remove("http://nope").is_err());
    }

    #[test]
    fn open_rejects_unreserved_slash() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = TranscoderConfig {
            path_separator: '|',
            ..Default::default()
        };
        config.reserved_characters.remove('/');
        let transcoder = Transcoder::new(config).unwrap();
        assert!(UrlStore::open(dir.path(), transcoder).is_err());
    }
}
