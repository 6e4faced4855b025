//! Supported locales and resolution

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of supported locales.
///
/// `En` is both the default (what unknown codes resolve to) and the baseline
/// (the bundle used when another locale's bundle cannot be loaded).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    De,
    Fr,
    Es,
}

/// Error returned when parsing a locale code outside the supported set.
///
/// Most callers want [`Locale::resolve`] instead, which folds unknown codes
/// to the default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsupportedLocale(pub String);

impl fmt::Display for UnsupportedLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unsupported locale: {}", self.0)
    }
}

impl std::error::Error for UnsupportedLocale {}

impl Locale {
    /// All supported locales, default first
    pub const ALL: [Locale; 4] = [Locale::En, Locale::De, Locale::Fr, Locale::Es];

    /// The default locale, used when a requested code is unsupported
    pub const DEFAULT: Locale = Locale::En;

    /// The baseline locale whose bundle backs all fallbacks
    pub const BASELINE: Locale = Locale::En;

    /// Two-letter code for URLs and bundle file names
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::De => "de",
            Locale::Fr => "fr",
            Locale::Es => "es",
        }
    }

    /// Resolve a requested code to a supported locale, falling back to the
    /// default. Regional variants resolve by primary subtag ("de-AT" → `De`).
    pub fn resolve(code: &str) -> Locale {
        code.parse().unwrap_or(Self::DEFAULT)
    }

    /// Pick a locale from an `Accept-Language` header value.
    ///
    /// Walks the listed ranges in order and returns the first supported one;
    /// an empty or unparseable header yields the default.
    pub fn from_accept_language(header: &str) -> Locale {
        for range in header.split(',') {
            let tag = range.split(';').next().unwrap_or("").trim();
            if tag.is_empty() || tag == "*" {
                continue;
            }
            if let Ok(locale) = tag.parse() {
                return locale;
            }
        }
        Self::DEFAULT
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = UnsupportedLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Primary subtag only: "de-AT" and "de" both map to De
        let primary = s.split(['-', '_']).next().unwrap_or(s);
        match primary.to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "de" => Ok(Locale::De),
            "fr" => Ok(Locale::Fr),
            "es" => Ok(Locale::Es),
            _ => Err(UnsupportedLocale(s.to_string())),
        }
    }
}
