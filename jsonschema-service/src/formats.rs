//! Built-in `format` keyword validators
//!
//! A meta-schema carries a registry of named formats; the `format` keyword
//! looks its value up there and checks string instances against the match
//! function. Unknown format names are ignored, as are non-string instances.
//! Custom formats implement [`Format`] and are registered through the
//! meta-schema builder.

use chrono::{DateTime, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;
use url::Url;

/// A named string format
pub trait Format: Send + Sync {
    /// The name the `format` keyword refers to, e.g. `"date-time"`
    fn name(&self) -> &str;

    /// Whether `value` conforms to the format
    fn matches(&self, value: &str) -> bool;
}

struct BuiltinFormat {
    name: &'static str,
    check: fn(&str) -> bool,
}

impl Format for BuiltinFormat {
    fn name(&self) -> &str {
        self.name
    }

    fn matches(&self, value: &str) -> bool {
        (self.check)(value)
    }
}

/// The formats registered by the Draft 4 meta-schema
#[must_use]
pub fn builtin_formats() -> Vec<Arc<dyn Format>> {
    vec![
        Arc::new(BuiltinFormat { name: "date-time", check: is_date_time }),
        Arc::new(BuiltinFormat { name: "date", check: is_date }),
        Arc::new(BuiltinFormat { name: "email", check: is_email }),
        Arc::new(BuiltinFormat { name: "hostname", check: is_hostname }),
        Arc::new(BuiltinFormat { name: "ipv4", check: is_ipv4 }),
        Arc::new(BuiltinFormat { name: "ipv6", check: is_ipv6 }),
        Arc::new(BuiltinFormat { name: "uri", check: is_uri }),
    ]
}

fn is_date_time(value: &str) -> bool {
    DateTime::parse_from_rfc3339(value).is_ok()
}

static DATE_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date shape regex is valid")
});

fn is_date(value: &str) -> bool {
    // The shape check pins the field widths; chrono then rejects
    // out-of-range dates like 2024-02-31.
    DATE_SHAPE.is_match(value) && NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
}

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

fn is_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

static HOSTNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("hostname regex is valid")
});

fn is_hostname(value: &str) -> bool {
    value.len() <= 253 && HOSTNAME.is_match(value)
}

fn is_ipv4(value: &str) -> bool {
    value.parse::<Ipv4Addr>().is_ok()
}

fn is_ipv6(value: &str) -> bool {
    value.parse::<Ipv6Addr>().is_ok()
}

fn is_uri(value: &str) -> bool {
    Url::parse(value).is_ok()
}
