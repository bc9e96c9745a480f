//! HTTP page fetching with rotating client identity and per-page timeout
//!
//! One GET per URL, no retries. Every failure is mapped onto [`FetchError`].

use async_trait::async_trait;
use hyper::client::connect::dns::Name;
use reqwest::dns::{Addrs, Resolve, Resolving};
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::redirect::Policy;
use reqwest::Client;
use std::error::Error as StdError;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};
use url::{Host, Url};

use super::config::FetchConfig;
use super::extractor::is_non_text_content_type;
use super::identity::{IdentitySource, UserAgentPool};
use super::types::{FetchError, FetchedPage};
use crate::utils::describe_error;

/// Fetches the raw body of one page
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// reqwest-backed page fetcher
pub struct HttpPageFetcher {
    client: Client,
    identities: Arc<dyn IdentitySource>,
    max_body_bytes: usize,
    block_private_hosts: bool,
}

impl HttpPageFetcher {
    /// Create a fetcher that picks User-Agents at random from the configured pool
    pub fn new(config: &FetchConfig) -> anyhow::Result<Self> {
        let identities = Arc::new(UserAgentPool::new(config.user_agents.clone()));
        Self::with_identities(config, identities)
    }

    /// Create a fetcher with an explicit identity source
    pub fn with_identities(
        config: &FetchConfig,
        identities: Arc<dyn IdentitySource>,
    ) -> anyhow::Result<Self> {
        let mut builder = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .redirect(redirect_policy(config.block_private_hosts));
        if config.block_private_hosts {
            builder = builder.dns_resolver(Arc::new(PublicAddrResolver));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            identities,
            max_body_bytes: config.max_body_bytes,
            block_private_hosts: config.block_private_hosts,
        })
    }

    /// Check that a URL is http(s) and, when blocking is on, not a
    /// loopback, private or link-local host
    pub fn check_url(url: &str, block_private_hosts: bool) -> Result<Url, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::UnsafeUrl(format!("{}: {}", url, e)))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchError::UnsafeUrl(url.to_string()));
        }

        let host = parsed
            .host()
            .ok_or_else(|| FetchError::UnsafeUrl(url.to_string()))?;

        if block_private_hosts {
            let blocked = match host {
                Host::Domain(domain) => {
                    let domain = domain.trim_end_matches('.').to_ascii_lowercase();
                    domain == "localhost" || domain.ends_with(".localhost")
                }
                Host::Ipv4(ip) => is_private_ip(IpAddr::V4(ip)),
                Host::Ipv6(ip) => is_private_ip(IpAddr::V6(ip)),
            };
            if blocked {
                return Err(FetchError::UnsafeUrl(url.to_string()));
            }
        }

        Ok(parsed)
    }
}

/// Redirect hops followed per fetch
const MAX_REDIRECTS: usize = 5;

/// Follow up to [`MAX_REDIRECTS`] hops, re-running [`HttpPageFetcher::check_url`]
/// on every target
fn redirect_policy(block_private_hosts: bool) -> Policy {
    Policy::custom(move |attempt| {
        if attempt.previous().len() > MAX_REDIRECTS {
            return attempt.error("too many redirects");
        }
        let verdict = HttpPageFetcher::check_url(attempt.url().as_str(), block_private_hosts);
        match verdict {
            Ok(_) => attempt.follow(),
            Err(e) => {
                warn!("Refusing redirect to {}", attempt.url());
                attempt.error(e)
            }
        }
    })
}

/// DNS resolver that drops loopback, private and link-local addresses
///
/// Covers names that only look public, on the first request and on every
/// redirect hop.
struct PublicAddrResolver;

impl Resolve for PublicAddrResolver {
    fn resolve(&self, name: Name) -> Resolving {
        let host = name.as_str().to_string();
        Box::pin(async move {
            match resolve_public(&host).await {
                Ok(addrs) => Ok(Box::new(addrs.into_iter()) as Addrs),
                Err(e) => Err(Box::new(e) as Box<dyn StdError + Send + Sync>),
            }
        })
    }
}

async fn resolve_public(host: &str) -> Result<Vec<SocketAddr>, FetchError> {
    let resolved = tokio::net::lookup_host((host, 0))
        .await
        .map_err(|e| FetchError::Network(format!("failed to resolve {}: {}", host, e)))?;
    public_addrs(host, resolved)
}

fn public_addrs(
    host: &str,
    addrs: impl IntoIterator<Item = SocketAddr>,
) -> Result<Vec<SocketAddr>, FetchError> {
    let public: Vec<SocketAddr> = addrs
        .into_iter()
        .filter(|addr| !is_private_ip(addr.ip()))
        .collect();
    if public.is_empty() {
        return Err(FetchError::UnsafeUrl(format!(
            "{} resolves only to private addresses",
            host
        )));
    }
    Ok(public)
}

fn is_private_ip(ip: IpAddr) -> bool {
    match ip {
        IpAddr::V4(v4) => {
            v4.is_loopback()
                || v4.is_private()
                || v4.is_link_local()
                || v4.is_unspecified()
                || v4.is_broadcast()
        }
        IpAddr::V6(v6) => {
            v6.is_loopback()
                || v6.is_unspecified()
                // fc00::/7 unique local, fe80::/10 link-local
                || (v6.segments()[0] & 0xfe00) == 0xfc00
                || (v6.segments()[0] & 0xffc0) == 0xfe80
                || v6.to_ipv4_mapped().is_some_and(|v4| is_private_ip(IpAddr::V4(v4)))
        }
    }
}

/// A guard rejection raised inside reqwest (redirect policy or resolver)
fn guard_rejection(e: &reqwest::Error) -> Option<FetchError> {
    let mut source = e.source();
    while let Some(cause) = source {
        if let Some(FetchError::UnsafeUrl(reason)) = cause.downcast_ref::<FetchError>() {
            return Some(FetchError::UnsafeUrl(reason.clone()));
        }
        source = cause.source();
    }
    None
}

fn map_transport_error(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if let Some(rejection) = guard_rejection(&e) {
        warn!("Blocked fetch of {}: {}", url, rejection);
        rejection
    } else {
        let cause = describe_error(&e);
        error!("Error during fetching {}: {}", url, cause);
        FetchError::Network(cause)
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let target = Self::check_url(url, self.block_private_hosts)?;

        let mut request = self.client.get(target);
        let identity = self.identities.next_identity();
        if !identity.is_empty() {
            request = request.header(USER_AGENT, identity);
        }

        debug!("Fetching content from: {}", url);
        let mut response = request
            .send()
            .await
            .map_err(|e| map_transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        if content_type.as_deref().is_some_and(is_non_text_content_type) {
            debug!("Skipping body of {}: {:?}", url, content_type);
            return Err(FetchError::NoExtractableContent);
        }

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| map_transport_error(url, e))?
        {
            let room = self.max_body_bytes - body.len();
            if chunk.len() >= room {
                body.extend_from_slice(&chunk[..room]);
                debug!("Body of {} capped at {} bytes", url, self.max_body_bytes);
                break;
            }
            body.extend_from_slice(&chunk);
        }

        Ok(FetchedPage {
            url: url.to_string(),
            status: status.as_u16(),
            content_type,
            body,
        })
    }
}
