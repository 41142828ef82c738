use crate::error::{Error, Result};
use std::{collections::HashMap, fmt, str::FromStr};

/// Kind of listing being created. Auctions live on the eth side of the backoffice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EditionKind {
    #[default]
    Eth,
    Btc,
    Auction,
}

impl EditionKind {
    /// Path segment used by the backoffice and the public site.
    pub fn path(&self) -> &'static str {
        match self {
            EditionKind::Eth | EditionKind::Auction => "eth",
            EditionKind::Btc => "btc",
        }
    }

    /// Eth and auction editions belong to authors, everything else to sellers.
    pub fn is_author_listing(&self) -> bool {
        matches!(self, EditionKind::Eth | EditionKind::Auction)
    }

    pub fn is_auction(&self) -> bool {
        matches!(self, EditionKind::Auction)
    }

    pub fn default_identity(&self) -> u64 {
        if self.is_author_listing() {
            100
        } else {
            200
        }
    }
}

impl FromStr for EditionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "eth" => Ok(EditionKind::Eth),
            "btc" => Ok(EditionKind::Btc),
            "auction" => Ok(EditionKind::Auction),
            other => Err(Error::UnknownEdition(other.to_string())),
        }
    }
}

impl fmt::Display for EditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EditionKind::Eth => "eth",
            EditionKind::Btc => "btc",
            EditionKind::Auction => "auction",
        };
        write!(f, "{name}")
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Toggles {
    /// Also embed a stock video
    pub video: bool,
    /// Prefer the in-app-only airdrop link
    pub intalk_only: bool,
    pub offline: bool,
}

/// `key=value` options plus the standalone toggles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParameterSet {
    values: HashMap<String, String>,
    edition: EditionKind,
    toggles: Toggles,
}

impl ParameterSet {
    pub fn parse<I, S>(tokens: I, toggles: Toggles) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut values = HashMap::new();
        for token in tokens {
            let token = token.as_ref();
            let mut parts = token.split('=');
            match (parts.next(), parts.next(), parts.next()) {
                (Some(key), Some(value), None) if !key.is_empty() => {
                    values.insert(key.to_string(), value.to_string());
                }
                _ => return Err(Error::MalformedParameter(token.to_string())),
            }
        }
        let edition = match values.get("edition").filter(|v| !v.is_empty()) {
            Some(value) => value.parse()?,
            None => EditionKind::default(),
        };
        Ok(ParameterSet {
            values,
            edition,
            toggles,
        })
    }

    /// Empty values count as not supplied.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn integer(&self, key: &str) -> Result<Option<u64>> {
        self.get(key)
            .map(|value| {
                value.parse::<u64>().map_err(|_| Error::InvalidValue {
                    key: key.to_string(),
                    value: value.to_string(),
                })
            })
            .transpose()
    }

    pub fn edition(&self) -> EditionKind {
        self.edition
    }

    /// Author or seller the edition is created for.
    pub fn identity(&self) -> Result<u64> {
        Ok(self
            .integer("id")?
            .unwrap_or_else(|| self.edition.default_identity()))
    }

    pub fn toggles(&self) -> Toggles {
        self.toggles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_pairs_and_edition() {
        let params =
            ParameterSet::parse(["edition=btc", "coin=5", "title=hello"], Toggles::default())
                .unwrap();
        assert_eq!(params.edition(), EditionKind::Btc);
        assert_eq!(params.get("title"), Some("hello"));
        assert_eq!(params.integer("coin").unwrap(), Some(5));
        assert_eq!(params.integer("krw").unwrap(), None);
    }

    #[test]
    fn token_without_separator_is_rejected() {
        let err = ParameterSet::parse(["coin5"], Toggles::default()).unwrap_err();
        assert!(matches!(err, Error::MalformedParameter(token) if token == "coin5"));
    }

    #[test]
    fn token_with_two_separators_is_rejected() {
        let err = ParameterSet::parse(["title=a=b"], Toggles::default()).unwrap_err();
        assert!(matches!(err, Error::MalformedParameter(_)));
    }

    #[test]
    fn unknown_edition_is_rejected() {
        let err = ParameterSet::parse(["edition=sol"], Toggles::default()).unwrap_err();
        assert!(matches!(err, Error::UnknownEdition(kind) if kind == "sol"));
    }

    #[test]
    fn negative_amount_is_not_an_integer() {
        let params = ParameterSet::parse(["coin=-3"], Toggles::default()).unwrap();
        assert!(matches!(
            params.integer("coin"),
            Err(Error::InvalidValue { .. })
        ));
    }

    #[test]
    fn identity_defaults_per_edition() {
        let eth = ParameterSet::parse(Vec::<String>::new(), Toggles::default()).unwrap();
        assert_eq!(eth.identity().unwrap(), 100);
        let auction = ParameterSet::parse(["edition=auction"], Toggles::default()).unwrap();
        assert_eq!(auction.identity().unwrap(), 100);
        let btc = ParameterSet::parse(["edition=btc"], Toggles::default()).unwrap();
        assert_eq!(btc.identity().unwrap(), 200);
        let given = ParameterSet::parse(["edition=btc", "id=7"], Toggles::default()).unwrap();
        assert_eq!(given.identity().unwrap(), 7);
    }

    #[test]
    fn auction_shares_the_eth_path() {
        assert_eq!(EditionKind::Auction.path(), "eth");
        assert!(EditionKind::Auction.is_author_listing());
        assert!(!EditionKind::Btc.is_author_listing());
    }
}
