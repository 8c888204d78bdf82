//! Browser-to-HTTP cookie bridge
//!
//! Enumerates the cookies held by the browser session and inserts each one
//! into a freshly constructed `reqwest` client's cookie store. A straight
//! copy: no filtering and no expiry handling. The resulting session has no
//! back-reference to the browser; an empty cookie set yields an
//! empty-but-valid session.

use crate::error::Result;
use chromiumoxide::Page;
use reqwest::cookie::Jar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument};
use url::Url;

/// A cookie copied by value out of the browser.
///
/// Name, value, domain, path, and the secure/http-only flags are preserved;
/// expiry is not carried over (login sessions ride on session cookies and
/// the bridge performs no expiry handling by contract).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookieRecord {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// Domain the cookie is scoped to
    pub domain: String,
    /// Path the cookie is scoped to
    pub path: String,
    /// Secure flag
    pub secure: bool,
    /// HttpOnly flag
    pub http_only: bool,
}

impl CookieRecord {
    /// Render as a `Set-Cookie` compatible string for jar insertion
    fn to_set_cookie(&self) -> String {
        let mut s = format!("{}={}", self.name, self.value);
        if !self.domain.is_empty() {
            s.push_str("; Domain=");
            s.push_str(&self.domain);
        }
        if !self.path.is_empty() {
            s.push_str("; Path=");
            s.push_str(&self.path);
        }
        if self.secure {
            s.push_str("; Secure");
        }
        if self.http_only {
            s.push_str("; HttpOnly");
        }
        s
    }

    /// URL the cookie should be registered against in the jar
    fn origin_url(&self) -> Option<Url> {
        let host = self.domain.trim_start_matches('.');
        if host.is_empty() {
            return None;
        }
        Url::parse(&format!("https://{}/", host)).ok()
    }
}

/// Independent credential-bearing HTTP client state.
///
/// Seeded from a [`CookieRecord`] set at construction; has no further
/// relationship to the browser session it came from.
pub struct HttpSession {
    client: reqwest::Client,
    jar: Arc<Jar>,
    cookie_count: usize,
}

impl HttpSession {
    /// The HTTP client carrying the bridged cookies
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// The underlying cookie store
    pub fn jar(&self) -> &Arc<Jar> {
        &self.jar
    }

    /// Number of cookies inserted at bridge time
    pub fn cookie_count(&self) -> usize {
        self.cookie_count
    }
}

/// Copies the browser cookie jar into a fresh HTTP client session
pub struct SessionBridge;

impl SessionBridge {
    /// Enumerate all cookies currently held by the browser session
    #[instrument(skip(page))]
    pub async fn export(page: &Page) -> Result<Vec<CookieRecord>> {
        let cookies = page
            .get_cookies()
            .await
            .map_err(|e| crate::error::Error::cdp(e.to_string()))?;

        let records: Vec<CookieRecord> = cookies
            .into_iter()
            .map(|c| CookieRecord {
                name: c.name,
                value: c.value,
                domain: c.domain,
                path: c.path,
                secure: c.secure,
                http_only: c.http_only,
            })
            .collect();

        debug!("Exported {} browser cookies", records.len());
        Ok(records)
    }

    /// Build an HTTP session seeded with the given cookies.
    ///
    /// `base_url` scopes cookies whose domain attribute is empty. One jar
    /// entry per record; an empty slice yields a valid empty session.
    pub fn build_session(records: &[CookieRecord], base_url: &Url) -> Result<HttpSession> {
        let jar = Arc::new(Jar::default());

        for record in records {
            let url = record.origin_url().unwrap_or_else(|| base_url.clone());
            jar.add_cookie_str(&record.to_set_cookie(), &url);
        }

        let client = reqwest::Client::builder()
            .cookie_provider(Arc::clone(&jar))
            .build()?;

        Ok(HttpSession {
            client,
            jar,
            cookie_count: records.len(),
        })
    }

    /// Export the browser cookies and build the HTTP session in one step
    #[instrument(skip(page))]
    pub async fn bridge(page: &Page, base_url: &Url) -> Result<HttpSession> {
        let records = Self::export(page).await?;
        let session = Self::build_session(&records, base_url)?;
        info!("Bridged {} cookies into HTTP session", session.cookie_count());
        Ok(session)
    }
}
