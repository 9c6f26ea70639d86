use alloy_primitives::{Address, hex};
use chrono::{DateTime, Utc};

/// Timestamp layout expected by the transaction history endpoint.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Optional filters for `GET api/token/{id}/tx`.
///
/// Unset fields are left out of the query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenTxFilter {
    pub from: Option<Address>,
    pub to: Option<Address>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl TokenTxFilter {
    pub fn from_address(mut self, address: Address) -> Self {
        self.from = Some(address);
        self
    }

    pub fn to_address(mut self, address: Address) -> Self {
        self.to = Some(address);
        self
    }

    pub fn since(mut self, at: DateTime<Utc>) -> Self {
        self.start = Some(at);
        self
    }

    pub fn until(mut self, at: DateTime<Utc>) -> Self {
        self.end = Some(at);
        self
    }

    /// Query pairs in `from`, `to`, `start`, `end` order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(from) = self.from {
            pairs.push(("from", hex::encode_prefixed(from)));
        }
        if let Some(to) = self.to {
            pairs.push(("to", hex::encode_prefixed(to)));
        }
        if let Some(start) = self.start {
            pairs.push(("start", start.format(DATE_FORMAT).to_string()));
        }
        if let Some(end) = self.end {
            pairs.push(("end", end.format(DATE_FORMAT).to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::address;
    use chrono::TimeZone;

    #[test]
    fn test_empty_filter_has_no_pairs() {
        assert!(TokenTxFilter::default().query_pairs().is_empty());
    }

    #[test]
    fn test_dates_are_formatted_in_utc() {
        let start = Utc.with_ymd_and_hms(2019, 10, 3, 7, 5, 9).unwrap();
        let filter = TokenTxFilter::default()
            .from_address(address!("0xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"))
            .since(start);
        assert_eq!(
            filter.query_pairs(),
            vec![
                ("from", "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa".to_string()),
                ("start", "2019-10-03 07:05:09".to_string()),
            ]
        );
    }
}
