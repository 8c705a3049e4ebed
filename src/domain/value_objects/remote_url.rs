use percent_encoding::percent_decode_str;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;
use url::Url;

/// リモートURLの解析エラー
#[derive(Debug, Error, PartialEq)]
pub enum RemoteUrlError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),

    #[error("Missing repository path in URL: {0}")]
    MissingRepoPath(String),

    #[error("Relative path segment in URL: {0}")]
    RelativeSegment(String),

    #[error("Invalid path segment in URL: {0}")]
    InvalidSegment(String),
}

/// リモートリポジトリの所在
///
/// `scheme://host/path` 形式に加えて、ssh系ツールが解釈する
/// `user@host:path` 形式を受け付け、`ssh://user@host/path` に正規化する。
/// スキームのない `github.com/owner/repo` は `https://` として扱う。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RemoteUrl {
    url: Url,
    host: String,
    /// パーセントデコード済みのパス
    path: String,
}

fn scp_like_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:([^@/]+)@)?([^:/]+):(.+)$").expect("scp-like pattern is valid")
    })
}

impl RemoteUrl {
    /// リモートURLを解析
    pub fn parse(input: &str) -> Result<Self, RemoteUrlError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(RemoteUrlError::InvalidFormat("empty URL".to_string()));
        }

        let normalized = Self::normalize(trimmed);
        // Url::parse は `..` を畳み込むので、解析前の文字列で検査する
        if has_relative_segment(&normalized) {
            return Err(RemoteUrlError::RelativeSegment(trimmed.to_string()));
        }

        let url = Url::parse(&normalized)
            .map_err(|e| RemoteUrlError::InvalidFormat(format!("{trimmed}: {e}")))?;

        let host = match url.host_str() {
            Some(host) if !host.is_empty() => host.to_string(),
            _ => return Err(RemoteUrlError::MissingHost(trimmed.to_string())),
        };

        let path = decode_path(url.path(), trimmed)?;
        if path.trim_matches('/').is_empty() {
            return Err(RemoteUrlError::MissingRepoPath(trimmed.to_string()));
        }

        Ok(Self { url, host, path })
    }

    /// 省略形を `Url::parse` が受け付ける形に書き換える
    fn normalize(input: &str) -> String {
        if input.contains("://") {
            return input.to_string();
        }

        if let Some(captures) = scp_like_pattern().captures(input) {
            // 1文字のホストはWindowsのドライブレター
            let host = &captures[2];
            if host.len() > 1 {
                let path = captures[3].trim_start_matches('/');
                return match captures.get(1) {
                    Some(user) => format!("ssh://{}@{}/{}", user.as_str(), host, path),
                    None => format!("ssh://{}/{}", host, path),
                };
            }
        }

        format!("https://{input}")
    }

    /// URL全体の文字列
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// スキーム（`https`、`ssh`、`svn+ssh` など）
    pub fn scheme(&self) -> &str {
        self.url.scheme()
    }

    /// ホスト名（ユーザー情報とポートを除く）
    pub fn host(&self) -> &str {
        &self.host
    }

    /// デコード済みのパス（先頭のスラッシュを含む）
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

/// 正規化済み入力のパス部分に `.` または `..` のセグメントがあるか
fn has_relative_segment(normalized: &str) -> bool {
    let Some((_, rest)) = normalized.split_once("://") else {
        return false;
    };
    let rest = rest.split(['?', '#']).next().unwrap_or_default();

    rest.split(['/', '\\']).skip(1).any(|segment| {
        let decoded = percent_decode_str(segment).decode_utf8_lossy();
        decoded == "." || decoded == ".."
    })
}

/// パスをセグメントごとにデコードし、ディレクトリ名として使えない値を拒否する
fn decode_path(raw: &str, input: &str) -> Result<String, RemoteUrlError> {
    let mut decoded = Vec::new();
    for segment in raw.split('/') {
        let segment = percent_decode_str(segment)
            .decode_utf8()
            .map_err(|_| RemoteUrlError::InvalidSegment(input.to_string()))?;

        if segment == "." || segment == ".." {
            return Err(RemoteUrlError::RelativeSegment(input.to_string()));
        }
        if segment.contains(['/', '\\', '\0']) {
            return Err(RemoteUrlError::InvalidSegment(input.to_string()));
        }
        decoded.push(segment.into_owned());
    }
    Ok(decoded.join("/"))
}

impl fmt::Display for RemoteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

impl TryFrom<&str> for RemoteUrl {
    type Error = RemoteUrlError;

    fn try_from(url: &str) -> Result<Self, Self::Error> {
        RemoteUrl::parse(url)
    }
}

impl TryFrom<String> for RemoteUrl {
    type Error = RemoteUrlError;

    fn try_from(url: String) -> Result<Self, Self::Error> {
        RemoteUrl::parse(&url)
    }
}

impl From<RemoteUrl> for String {
    fn from(url: RemoteUrl) -> Self {
        url.url.into()
    }
}

impl std::str::FromStr for RemoteUrl {
    type Err = RemoteUrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RemoteUrl::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ssh_url() {
        let url = RemoteUrl::parse("ssh://git@github.com/motemen/ghq.git").unwrap();
        assert_eq!(url.scheme(), "ssh");
        assert_eq!(url.host(), "github.com");
        assert_eq!(url.path(), "/motemen/ghq.git");
    }

    #[test]
    fn test_parse_https_url_with_port() {
        let url = RemoteUrl::parse("https://git.example.com:8443/team/tool").unwrap();
        assert_eq!(url.host(), "git.example.com");
        assert_eq!(url.path(), "/team/tool");
    }

    #[test]
    fn test_parse_scp_like() {
        let url = RemoteUrl::parse("git@github.com:motemen/ghq.git").unwrap();
        assert_eq!(url.scheme(), "ssh");
        assert_eq!(url.host(), "github.com");
        assert_eq!(url.path(), "/motemen/ghq.git");
        assert_eq!(url.as_str(), "ssh://git@github.com/motemen/ghq.git");
    }

    #[test]
    fn test_parse_host_path_shorthand() {
        let url = RemoteUrl::parse("github.com/motemen/ghq").unwrap();
        assert_eq!(url.scheme(), "https");
        assert_eq!(url.host(), "github.com");
        assert_eq!(url.path(), "/motemen/ghq");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            RemoteUrl::parse(""),
            Err(RemoteUrlError::InvalidFormat(_))
        ));
        assert!(matches!(
            RemoteUrl::parse("https://github.com/"),
            Err(RemoteUrlError::MissingRepoPath(_))
        ));
        assert!(matches!(
            RemoteUrl::parse("file:///tmp/repo"),
            Err(RemoteUrlError::MissingHost(_))
        ));
    }

    #[test]
    fn test_path_is_percent_decoded() {
        let url = RemoteUrl::parse("https://example.com/foo%20bar/%E6%97%A5%E6%9C%AC").unwrap();
        assert_eq!(url.path(), "/foo bar/日本");
        assert_eq!(url.as_str(), "https://example.com/foo%20bar/%E6%97%A5%E6%9C%AC");

        let spaced = RemoteUrl::parse("https://example.com/foo bar/baz").unwrap();
        assert_eq!(spaced.path(), "/foo bar/baz");
    }

    #[test]
    fn test_encoded_separators_and_dots_are_rejected() {
        assert!(matches!(
            RemoteUrl::parse("https://example.com/owner%2F..%2Fescape/repo"),
            Err(RemoteUrlError::InvalidSegment(_))
        ));
        assert!(matches!(
            RemoteUrl::parse("https://example.com/owner/%2e%2e/repo"),
            Err(RemoteUrlError::RelativeSegment(_))
        ));
        assert!(matches!(
            RemoteUrl::parse("https://example.com/a/../b"),
            Err(RemoteUrlError::RelativeSegment(_))
        ));
        assert!(matches!(
            RemoteUrl::parse("git@example.com:a/./b"),
            Err(RemoteUrlError::RelativeSegment(_))
        ));
        assert!(matches!(
            RemoteUrl::parse("https://example.com/%FF/repo"),
            Err(RemoteUrlError::InvalidSegment(_))
        ));
    }

    #[test]
    fn test_serde_round_trip_through_string() {
        let url = RemoteUrl::parse("https://git.assembla.com/ghq.git").unwrap();
        let json = serde_json::to_string(&url).unwrap();
        assert_eq!(json, "\"https://git.assembla.com/ghq.git\"");
        assert_eq!(serde_json::from_str::<RemoteUrl>(&json).unwrap(), url);
    }
}
