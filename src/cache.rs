//! Offline asset cache: a fixed list of assets is fetched once at install
//! time, and afterwards every request is answered from the cache when
//! possible and from the network otherwise.
use std::collections::HashMap;
use thiserror::Error;

/// Something that can retrieve an asset by URL
pub(crate) trait Fetch {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Where a response came from
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Source {
    Cache,
    Network,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Response {
    pub(crate) body: Vec<u8>,
    pub(crate) source: Source,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(crate) struct AssetCache {
    name: String,
    entries: HashMap<String, Vec<u8>>,
}

impl AssetCache {
    pub(crate) fn new<S: Into<String>>(name: S) -> AssetCache {
        AssetCache {
            name: name.into(),
            entries: HashMap::new(),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, url: &str) -> bool {
        self.entries.contains_key(url)
    }

    /// Fetch every asset in `urls` and store them in the cache.  Either all of
    /// the assets are stored or, if any fetch fails, none are.
    pub(crate) fn install<F: Fetch>(&mut self, urls: &[&str], fetcher: &F) -> Result<(), InstallError> {
        let mut staged = Vec::with_capacity(urls.len());
        for &url in urls {
            let body = fetcher.fetch(url).map_err(|source| InstallError {
                cache: self.name.clone(),
                url: url.to_owned(),
                source,
            })?;
            staged.push((url.to_owned(), body));
        }
        self.entries.extend(staged);
        tracing::debug!(cache = %self.name, assets = urls.len(), "Installed asset cache");
        Ok(())
    }

    /// Answer a request for `url` from the cache if it's there, otherwise pass
    /// the request through to `fetcher`.  Network responses are not stored.
    pub(crate) fn respond<F: Fetch>(&self, url: &str, fetcher: &F) -> Result<Response, FetchError> {
        if let Some(body) = self.entries.get(url) {
            return Ok(Response {
                body: body.clone(),
                source: Source::Cache,
            });
        }
        fetcher.fetch(url).map(|body| Response {
            body,
            source: Source::Network,
        })
    }
}

/// Assets compiled into the binary
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct BundledAssets;

static INDEX: &str = include_str!("../assets/index.txt");
static LOGO: &str = include_str!("../assets/logo.txt");

impl Fetch for BundledAssets {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        match url {
            "./" | "./index.txt" => Ok(INDEX.as_bytes().to_vec()),
            "./logo.txt" => Ok(LOGO.as_bytes().to_vec()),
            _ => Err(FetchError::NotFound(url.to_owned())),
        }
    }
}

/// A network that never answers.  Once the cache is installed, the game runs
/// against this so that every asset has to come from the cache.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Offline;

impl Fetch for Offline {
    fn fetch(&self, _url: &str) -> Result<Vec<u8>, FetchError> {
        Err(FetchError::Unavailable)
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum FetchError {
    #[error("no such asset: {0:?}")]
    NotFound(String),
    #[error("asset source unavailable")]
    Unavailable,
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("failed to install asset {url:?} into cache {cache:?}")]
pub(crate) struct InstallError {
    cache: String,
    url: String,
    #[source]
    source: FetchError,
}
