//! Cookie jars: the persistence port the ledger store writes through.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::cookie::{cookie_from_header, Cookie};
use crate::StoreError;

/// Named-cookie persistence. No validation of values happens here.
///
/// In the browser this is `document.cookie`; natively it is a map or a file.
pub trait CookieJar {
    /// Get a cookie value. Expired cookies read as absent.
    fn get(&self, name: &str) -> Result<Option<String>, StoreError>;

    /// Set (or replace) a cookie.
    fn set(&mut self, cookie: Cookie) -> Result<(), StoreError>;

    /// Delete a cookie.
    fn delete(&mut self, name: &str) -> Result<(), StoreError>;

    /// Check if a cookie is present.
    fn exists(&self, name: &str) -> Result<bool, StoreError> {
        Ok(self.get(name)?.is_some())
    }
}

impl<J: CookieJar + ?Sized> CookieJar for &mut J {
    fn get(&self, name: &str) -> Result<Option<String>, StoreError> {
        (**self).get(name)
    }

    fn set(&mut self, cookie: Cookie) -> Result<(), StoreError> {
        (**self).set(cookie)
    }

    fn delete(&mut self, name: &str) -> Result<(), StoreError> {
        (**self).delete(name)
    }
}

/// In-memory jar for tests and native hosts.
#[derive(Debug, Clone, Default)]
pub struct MemoryJar {
    cookies: BTreeMap<String, Cookie>,
}

impl MemoryJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from a `document.cookie` style string; entries get a 31-day expiry.
    pub fn from_header(header: &str) -> Self {
        let mut jar = Self::new();
        for (name, value) in crate::cookie::parse_cookie_header(header) {
            jar.cookies
                .insert(name.clone(), Cookie::with_ttl_days(name, value, 31));
        }
        jar
    }

    /// Stored cookie including its expiry.
    pub fn cookie(&self, name: &str) -> Option<&Cookie> {
        self.cookies.get(name)
    }

    /// Render unexpired cookies as a `document.cookie` string.
    pub fn to_header(&self) -> String {
        let now = Utc::now();
        self.cookies
            .values()
            .filter(|c| !c.is_expired(now))
            .map(|c| format!("{}={}", c.name, crate::cookie::encode_value(&c.value)))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl CookieJar for MemoryJar {
    fn get(&self, name: &str) -> Result<Option<String>, StoreError> {
        let now = Utc::now();
        Ok(self
            .cookies
            .get(name)
            .filter(|c| !c.is_expired(now))
            .map(|c| c.value.clone()))
    }

    fn set(&mut self, cookie: Cookie) -> Result<(), StoreError> {
        // validates the name the same way a browser write would
        cookie.to_header()?;
        self.cookies.insert(cookie.name.clone(), cookie);
        Ok(())
    }

    fn delete(&mut self, name: &str) -> Result<(), StoreError> {
        self.cookies.remove(name);
        Ok(())
    }
}

/// Jar persisted as a JSON file, for the CLI.
///
/// The file holds a map of cookie name to [`Cookie`]; it is rewritten on
/// every change.
#[derive(Debug)]
pub struct FileJar {
    path: PathBuf,
    inner: MemoryJar,
}

impl FileJar {
    /// Open a jar file, starting empty if it does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let cookies = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .map_err(|e| StoreError::OpenError(format!("{}: {}", path.display(), e)))?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)?
            }
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path,
            inner: MemoryJar { cookies },
        })
    }

    /// Import cookies from a `document.cookie` string, replacing same names.
    pub fn import_header(&mut self, header: &str) -> Result<usize, StoreError> {
        let imported = MemoryJar::from_header(header);
        let count = imported.cookies.len();
        self.inner.cookies.extend(imported.cookies);
        self.flush()?;
        Ok(count)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn to_header(&self) -> String {
        self.inner.to_header()
    }

    fn flush(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(&self.inner.cookies)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl CookieJar for FileJar {
    fn get(&self, name: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(name)
    }

    fn set(&mut self, cookie: Cookie) -> Result<(), StoreError> {
        self.inner.set(cookie)?;
        self.flush()
    }

    fn delete(&mut self, name: &str) -> Result<(), StoreError> {
        self.inner.delete(name)?;
        self.flush()
    }
}

/// Read-only view over a raw header string; writes are rejected.
///
/// Useful for rendering from a request's `Cookie:` header.
#[derive(Debug, Clone)]
pub struct HeaderJar {
    header: String,
}

impl HeaderJar {
    pub fn new(header: impl Into<String>) -> Self {
        Self { header: header.into() }
    }
}

impl CookieJar for HeaderJar {
    fn get(&self, name: &str) -> Result<Option<String>, StoreError> {
        Ok(cookie_from_header(&self.header, name))
    }

    fn set(&mut self, cookie: Cookie) -> Result<(), StoreError> {
        Err(StoreError::JarError(format!(
            "header jar is read-only (tried to set '{}')",
            cookie.name
        )))
    }

    fn delete(&mut self, name: &str) -> Result<(), StoreError> {
        Err(StoreError::JarError(format!(
            "header jar is read-only (tried to delete '{}')",
            name
        )))
    }
}
