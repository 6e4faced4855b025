//! Locale resolution and message bundles
//!
//! The supported locales form a fixed closed set with a designated default.
//! Resolution never fails: unknown codes fold to the default, and a missing
//! or malformed message bundle falls back to the baseline locale's bundle.
//! The fallback is observable (not exception-driven) so callers can log it.

mod bundle;
mod locale;

pub use bundle::{load_bundle, Bundle, BundleLookup, BundleOutcome};
pub use locale::{Locale, UnsupportedLocale};
