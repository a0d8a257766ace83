//! Provider list parsing.
//!
//! A provider list is line oriented. Every line that is not blank and does not
//! start with `#` describes one provider:
//!
//! ```text
//! <zone>[=<filter-regex>][#<TYPE>]
//! ```
//!
//! `TYPE` is one of `DNSBL` (default), `DNSWL` or `URIBL`. Without an explicit
//! filter, any answer inside `127.0.0.0/8` is matched by the default filter.
//!
//! Malformed lines do not raise errors. They produce a descriptor with an empty
//! zone, which callers drop via [`ProviderDescriptor::is_valid`].

use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use log::warn;
use regex::Regex;
use strum_macros::{AsRefStr, Display, EnumString};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Filter applied when a line carries no (or an empty) `=<filter>` part.
pub const DEFAULT_FILTER_PATTERN: &str = r"127\.([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})";

// Constant pattern, covered by tests.
static DEFAULT_FILTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEFAULT_FILTER_PATTERN).expect("default filter pattern is valid"));

/// Kind of list a provider zone represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr)]
pub enum ProviderKind {
    /// DNS-based blacklist, queried with the octet-reversed address
    #[default]
    #[strum(serialize = "DNSBL")]
    DnsBlacklist,
    /// DNS-based whitelist, queried with the octet-reversed address
    #[strum(serialize = "DNSWL")]
    DnsWhitelist,
    /// URI-based blacklist, queried with the hostname
    #[strum(serialize = "URIBL")]
    UriBlacklist,
}

/// One provider of the provider list.
#[derive(Debug, Clone)]
pub struct ProviderDescriptor {
    /// Zone suffix queried for this provider; empty for an unparseable line
    pub url: String,
    /// List kind
    pub kind: ProviderKind,
    /// Pattern matched against a returned address; a match means "not listed"
    pub result_filter: Regex,
    /// Inactive providers are counted as disabled and never queried
    pub active: bool,
}

impl ProviderDescriptor {
    /// Creates an active provider with the default filter.
    pub fn new(url: impl Into<String>, kind: ProviderKind) -> Self {
        Self {
            url: url.into(),
            kind,
            result_filter: default_filter(),
            active: true,
        }
    }

    /// Replaces the result filter.
    pub fn with_filter(mut self, filter: Regex) -> Self {
        self.result_filter = filter;
        self
    }

    /// Returns `false` for descriptors produced from unparseable lines.
    pub fn is_valid(&self) -> bool {
        !self.url.is_empty()
    }

    fn invalid() -> Self {
        Self::new(String::new(), ProviderKind::default())
    }
}

/// Returns a copy of the default `127.x.x.x` result filter.
pub fn default_filter() -> Regex {
    DEFAULT_FILTER.clone()
}

/// Parses provider list lines in order.
///
/// Comment lines (leading `#`) and blank lines are skipped. Every other line
/// yields exactly one descriptor, which is invalid (empty `url`) when the line
/// cannot be parsed.
pub fn parse_providers<I, S>(lines: I) -> Vec<ProviderDescriptor>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .filter_map(|line| {
            let line = line.as_ref();
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                None
            } else {
                Some(parse_provider_line(line))
            }
        })
        .collect()
}

/// Parses a single `<zone>[=<filter>][#<TYPE>]` line.
///
/// The zone ends at the first `=` or `#`. A filter, if introduced by `=`,
/// ends at the next `#`. The type tag must follow `#` directly. An unknown
/// type tag or an uncompilable filter makes the whole line invalid.
pub fn parse_provider_line(line: &str) -> ProviderDescriptor {
    let line = line.trim();

    let (head, type_tag) = match line.find('#') {
        Some(idx) => (&line[..idx], Some(line[idx + 1..].trim_end())),
        None => (line, None),
    };
    let (url, filter) = match head.find('=') {
        Some(idx) => (head[..idx].trim(), Some(head[idx + 1..].trim())),
        None => (head.trim(), None),
    };

    if url.is_empty() {
        return ProviderDescriptor::invalid();
    }

    let kind = match type_tag {
        None | Some("") => ProviderKind::default(),
        Some(tag) => match tag.parse::<ProviderKind>() {
            Ok(kind) => kind,
            Err(_) => {
                warn!("Ignoring provider line with unknown type tag '{tag}': {line}");
                return ProviderDescriptor::invalid();
            }
        },
    };

    let result_filter = match filter {
        None | Some("") => default_filter(),
        Some(pattern) => match Regex::new(pattern) {
            Ok(re) => re,
            Err(e) => {
                warn!("Ignoring provider line with invalid filter '{pattern}': {e}");
                return ProviderDescriptor::invalid();
            }
        },
    };

    ProviderDescriptor {
        url: url.to_string(),
        kind,
        result_filter,
        active: true,
    }
}

/// Reads and parses a provider list file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read. Unparseable lines
/// are not errors; they are returned as invalid descriptors.
pub async fn load_providers(path: &Path) -> Result<Vec<ProviderDescriptor>> {
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to open provider list {}", path.display()))?;
    let mut lines = BufReader::new(file).lines();

    let mut raw = Vec::new();
    while let Some(line) = lines
        .next_line()
        .await
        .with_context(|| format!("Failed to read provider list {}", path.display()))?
    {
        raw.push(line);
    }

    Ok(parse_providers(raw))
}

#[cfg(test)]
mod tests;
