//! Referral codes and the links users share them with.

use std::fmt;
use std::str::FromStr;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::{AmigosError, Result};

/// Query parameter carrying the sponsor's code.
pub const REF_PARAM: &str = "ref";

/// Numeric code the contract assigns to every registered account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferralCode(u64);

impl ReferralCode {
    /// Zero is never assigned by the contract and is rejected.
    pub fn new(code: u64) -> Option<Self> {
        (code > 0).then_some(Self(code))
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ReferralCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ReferralCode {
    type Err = AmigosError;

    fn from_str(s: &str) -> Result<Self> {
        s.trim()
            .parse::<u64>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| AmigosError::InvalidReferralCode(s.to_string()))
    }
}

/// Builds `{origin}/?ref={code}` from the site base URL. Any path, query or
/// fragment on the base is dropped.
pub fn referral_link(base_url: &str, code: ReferralCode) -> Result<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|e| AmigosError::config(format!("invalid base url '{base_url}': {e}")))?;
    if url.cannot_be_a_base() {
        return Err(AmigosError::config(format!(
            "base url '{base_url}' cannot carry a path"
        )));
    }
    url.set_path("/");
    url.set_query(None);
    url.set_fragment(None);
    url.query_pairs_mut()
        .append_pair(REF_PARAM, &code.to_string());
    Ok(url)
}

/// Extracts the sponsor code from a full URL or a site-relative path such as
/// `/?ref=1001`. Returns `None` when absent or malformed.
pub fn parse_referral_code(input: &str) -> Option<ReferralCode> {
    let url = match Url::parse(input) {
        Ok(url) => url,
        Err(_) => Url::parse("http://localhost/").ok()?.join(input).ok()?,
    };
    url.query_pairs()
        .find(|(key, _)| key == REF_PARAM)
        .and_then(|(_, value)| value.parse().ok())
}

/// Social networks a referral link can be shared on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ShareTarget {
    Twitter,
    Facebook,
    Telegram,
    WhatsApp,
}

impl ShareTarget {
    /// Share URL for `link`, with `message` prepended where the network
    /// accepts text.
    pub fn share_url(self, link: &Url, message: &str) -> Result<Url> {
        let text = format!("{message} {link}");
        let (base, pairs): (&str, Vec<(&str, &str)>) = match self {
            ShareTarget::Twitter => (
                "https://twitter.com/intent/tweet",
                vec![("text", text.as_str())],
            ),
            ShareTarget::Facebook => (
                "https://www.facebook.com/sharer/sharer.php",
                vec![("u", link.as_str())],
            ),
            ShareTarget::Telegram => (
                "https://t.me/share/url",
                vec![("url", link.as_str()), ("text", text.as_str())],
            ),
            ShareTarget::WhatsApp => ("https://wa.me/", vec![("text", text.as_str())]),
        };
        Url::parse_with_params(base, &pairs)
            .map_err(|e| AmigosError::internal(format!("share url for {self}: {e}")))
    }

    pub fn label_key(self) -> &'static str {
        match self {
            ShareTarget::Twitter => "shareOnTwitter",
            ShareTarget::Facebook => "shareOnFacebook",
            ShareTarget::Telegram => "shareOnTelegram",
            ShareTarget::WhatsApp => "shareOnWhatsApp",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(n: u64) -> ReferralCode {
        ReferralCode::new(n).unwrap()
    }

    #[test]
    fn test_referral_link_uses_origin() {
        let link = referral_link("https://amigosdetron.io/dashboard?x=1#top", code(1001)).unwrap();
        assert_eq!(link.as_str(), "https://amigosdetron.io/?ref=1001");
    }

    #[test]
    fn test_referral_link_rejects_bad_base() {
        assert!(referral_link("not a url", code(1)).unwrap_err().is_config());
        assert!(referral_link("mailto:someone@example.com", code(1)).is_err());
    }

    #[test]
    fn test_parse_referral_code() {
        assert_eq!(
            parse_referral_code("https://amigosdetron.io/?ref=1001"),
            Some(code(1001))
        );
        assert_eq!(parse_referral_code("/?ref=42"), Some(code(42)));
        assert_eq!(parse_referral_code("/?lang=en&ref=7"), Some(code(7)));
        assert_eq!(parse_referral_code("/?ref=abc"), None);
        assert_eq!(parse_referral_code("/?ref=0"), None);
        assert_eq!(parse_referral_code("/dashboard"), None);
    }

    #[test]
    fn test_link_round_trip() {
        let link = referral_link("https://amigosdetron.io", code(555)).unwrap();
        assert_eq!(parse_referral_code(link.as_str()), Some(code(555)));
    }

    #[test]
    fn test_referral_code_from_str() {
        assert_eq!(" 12 ".parse::<ReferralCode>().unwrap(), code(12));
        assert!("0".parse::<ReferralCode>().is_err());
        assert_eq!(
            "-1".parse::<ReferralCode>().unwrap_err(),
            AmigosError::InvalidReferralCode("-1".to_string())
        );
    }

    #[test]
    fn test_share_urls() {
        let link = referral_link("https://amigosdetron.io", code(9)).unwrap();

        let facebook = ShareTarget::Facebook.share_url(&link, "Join").unwrap();
        assert!(facebook.as_str().starts_with("https://www.facebook.com/sharer/sharer.php?u="));
        assert_eq!(
            facebook.query_pairs().next().map(|(_, v)| v.into_owned()),
            Some(link.to_string())
        );

        let twitter = ShareTarget::Twitter.share_url(&link, "Join").unwrap();
        let text = twitter.query_pairs().find(|(k, _)| k == "text").map(|(_, v)| v.into_owned());
        assert_eq!(text, Some(format!("Join {link}")));

        assert_eq!("whatsapp".parse::<ShareTarget>().unwrap(), ShareTarget::WhatsApp);
    }
}
