//! Record identifiers
//!
//! Every record kind has its own UUID newtype, so a security id can never be
//! passed where a currency id is expected. Listings print a short form
//! (`txn-1a2b3c4d`) that the CLI accepts back in place of the full UUID.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Number of UUID hex characters shown in the short form
const SHORT_LEN: usize = 8;

macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident => $tag:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// A fresh random id
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Short tag used in listings, e.g. "txn"
            pub const TAG: &'static str = $tag;

            /// The `tag-xxxxxxxx` form shown to users
            pub fn short(&self) -> String {
                let hex = self.0.simple().to_string();
                format!("{}-{}", Self::TAG, &hex[..SHORT_LEN])
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.pad(&self.short())
            }
        }

        /// Accepts a bare UUID or one prefixed with the tag
        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                let bare = s
                    .strip_prefix(Self::TAG)
                    .and_then(|rest| rest.strip_prefix('-'))
                    .unwrap_or(s);
                Uuid::parse_str(bare).map(Self)
            }
        }
    };
}

record_id!(
    /// Identifies a [`Security`](super::Security)
    SecurityId => "sec"
);
record_id!(TransactionId => "txn");
record_id!(PriceId => "prc");
record_id!(DividendId => "div");
record_id!(CurrencyId => "cur");
record_id!(
    /// Identifies one exchange rate observation
    RateId => "fx"
);
record_id!(CashEntryId => "csh");
