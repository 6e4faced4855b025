//! Message bundle loading with baseline fallback

use rust_embed::Embed;
use serde_json::Value;
use tracing::warn;

use crate::locale::Locale;

/// Translation bundles compiled into the binary
#[derive(Embed)]
#[folder = "locales/"]
struct LocaleAssets;

/// The translated strings for one locale.
///
/// Messages are nested JSON objects addressed by dotted keys, e.g.
/// `"booking.confirmed"`.
#[derive(Debug, Clone)]
pub struct Bundle {
    locale: Locale,
    messages: Value,
}

impl Bundle {
    fn empty(locale: Locale) -> Self {
        Self {
            locale,
            messages: Value::Object(serde_json::Map::new()),
        }
    }

    /// The locale whose strings this bundle holds (the baseline when a
    /// fallback occurred)
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// All messages as the raw JSON object, for handing to clients
    pub fn messages(&self) -> &Value {
        &self.messages
    }

    /// Look up a message by dotted key
    pub fn message(&self, key: &str) -> Option<&str> {
        let mut node = &self.messages;
        for part in key.split('.') {
            node = node.get(part)?;
        }
        node.as_str()
    }
}

/// How a bundle lookup was satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleOutcome {
    /// The requested locale's own bundle was loaded
    Found,
    /// The requested bundle was missing or malformed; the baseline bundle
    /// was substituted
    FellBack { requested: Locale },
}

/// A loaded bundle together with how it was obtained.
///
/// Locale failures never surface to the request; callers observe the
/// fallback here and log it instead.
#[derive(Debug, Clone)]
pub struct BundleLookup {
    pub bundle: Bundle,
    pub outcome: BundleOutcome,
}

impl BundleLookup {
    /// True when the baseline bundle was substituted
    pub fn fell_back(&self) -> bool {
        matches!(self.outcome, BundleOutcome::FellBack { .. })
    }
}

/// Load the message bundle for a locale, falling back to the baseline.
pub fn load_bundle(locale: Locale) -> BundleLookup {
    load_bundle_from(
        |name| <LocaleAssets as Embed>::get(name).map(|f| f.data.into_owned()),
        locale,
    )
}

/// Bundle loading against an arbitrary asset source; split out so the
/// fallback path is testable without removing embedded files.
fn load_bundle_from<F>(source: F, locale: Locale) -> BundleLookup
where
    F: Fn(&str) -> Option<Vec<u8>>,
{
    if let Some(bundle) = read_bundle(&source, locale) {
        return BundleLookup {
            bundle,
            outcome: BundleOutcome::Found,
        };
    }

    let baseline = read_bundle(&source, Locale::BASELINE).unwrap_or_else(|| {
        // Both bundles unreadable: serve an empty bundle rather than fail
        // the request.
        warn!(locale = %Locale::BASELINE, "Baseline message bundle unavailable");
        Bundle::empty(Locale::BASELINE)
    });

    BundleLookup {
        bundle: baseline,
        outcome: BundleOutcome::FellBack { requested: locale },
    }
}

fn read_bundle<F>(source: &F, locale: Locale) -> Option<Bundle>
where
    F: Fn(&str) -> Option<Vec<u8>>,
{
    let name = format!("{}.json", locale);
    let bytes = source(&name)?;
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(messages) if messages.is_object() => Some(Bundle { locale, messages }),
        Ok(_) => {
            warn!(%locale, "Message bundle is not a JSON object");
            None
        }
        Err(e) => {
            warn!(%locale, error = %e, "Failed to parse message bundle");
            None
        }
    }
}
