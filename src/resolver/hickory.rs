//! `hickory-resolver` backed implementation.

use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::TokioAsyncResolver;

use super::BlacklistResolver;
use crate::error_handling::LookupError;

/// Resolver querying the configured upstream name servers.
#[derive(Clone)]
pub struct HickoryResolver {
    inner: Arc<TokioAsyncResolver>,
}

impl HickoryResolver {
    /// Wraps an initialized hickory resolver.
    pub fn new(inner: Arc<TokioAsyncResolver>) -> Self {
        Self { inner }
    }
}

/// Makes a query name absolute so no search domain is ever appended.
fn absolute(name: &str) -> String {
    if name.ends_with('.') {
        name.to_string()
    } else {
        format!("{name}.")
    }
}

fn classify(name: &str, e: ResolveError) -> LookupError {
    match e.kind() {
        ResolveErrorKind::NoRecordsFound { .. } => LookupError::NotFound(name.to_string()),
        ResolveErrorKind::Timeout => LookupError::Timeout(name.to_string()),
        _ => LookupError::Failed {
            name: name.to_string(),
            reason: e.to_string(),
        },
    }
}

#[async_trait]
impl BlacklistResolver for HickoryResolver {
    async fn lookup_address(&self, name: &str) -> Result<Vec<String>, LookupError> {
        let response = self
            .inner
            .ipv4_lookup(absolute(name))
            .await
            .map_err(|e| classify(name, e))?;
        Ok(response.iter().map(|a| a.0.to_string()).collect())
    }

    async fn lookup_text(&self, name: &str) -> Result<Vec<String>, LookupError> {
        let response = self
            .inner
            .txt_lookup(absolute(name))
            .await
            .map_err(|e| classify(name, e))?;
        // TXT records can contain multiple strings - join them
        Ok(response
            .iter()
            .map(|txt| {
                txt.iter()
                    .map(|bytes| String::from_utf8_lossy(bytes).to_string())
                    .collect::<Vec<String>>()
                    .join("")
            })
            .collect())
    }

    async fn reverse_lookup(&self, address: &str) -> Result<String, LookupError> {
        let ip: IpAddr = address.parse().map_err(|e: std::net::AddrParseError| {
            LookupError::Failed {
                name: address.to_string(),
                reason: e.to_string(),
            }
        })?;
        let response = self
            .inner
            .reverse_lookup(ip)
            .await
            .map_err(|e| classify(address, e))?;
        response
            .iter()
            .next()
            .map(|name| name.to_utf8())
            .ok_or_else(|| LookupError::NotFound(address.to_string()))
    }
}
