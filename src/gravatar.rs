//! Gravatar picture URLs derived from email addresses.

use std::fmt;
use std::str::FromStr;

use md5::{Digest, Md5};

use crate::error::ClientError;

/// Host serving avatar images.
pub const GRAVATAR_HOST: &str = "www.gravatar.com";
/// Pixel size requested for every avatar.
pub const AVATAR_SIZE: u32 = 40;

/// Fallback image style used when the address has no avatar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GravatarDefault {
    Mm,
    #[default]
    Identicon,
    Monsterid,
    Wavatar,
    Retro,
}

impl GravatarDefault {
    pub fn as_str(self) -> &'static str {
        match self {
            GravatarDefault::Mm => "mm",
            GravatarDefault::Identicon => "identicon",
            GravatarDefault::Monsterid => "monsterid",
            GravatarDefault::Wavatar => "wavatar",
            GravatarDefault::Retro => "retro",
        }
    }
}

impl fmt::Display for GravatarDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GravatarDefault {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mm" => Ok(Self::Mm),
            "identicon" => Ok(Self::Identicon),
            "monsterid" => Ok(Self::Monsterid),
            "wavatar" => Ok(Self::Wavatar),
            "retro" => Ok(Self::Retro),
            _ => Err(ClientError::invalid(format!(
                "default must be one of \"mm\", \"identicon\", \"monsterid\", \"wavatar\", \"retro\", got {s:?}"
            ))),
        }
    }
}

/// Hex encoded MD5 digest of the trimmed, lowercased address.
pub fn email_hash(email: &str) -> String {
    let normalised = email.trim().to_lowercase();
    hex::encode(Md5::digest(normalised.as_bytes()))
}

/// Avatar URL for `email` using the given fallback style.
pub fn gravatar_url(email: &str, default: GravatarDefault) -> String {
    format!(
        "http://{GRAVATAR_HOST}/avatar/{}?s={AVATAR_SIZE}&d={default}",
        email_hash(email)
    )
}
