use crate::{error::Result, params::ParameterSet};

/// Fixed price in coin and in won. Missing inputs are zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Price {
    pub coin: u64,
    pub krw: u64,
}

impl Price {
    pub fn from_params(params: &ParameterSet) -> Result<Self> {
        Ok(Price {
            coin: params.integer("coin")?.unwrap_or(0),
            krw: params.integer("krw")?.unwrap_or(0),
        })
    }

    pub fn is_free(&self) -> bool {
        self.coin == 0 && self.krw == 0
    }

    /// Compact JSON string stored in `fixedPrice`.
    pub fn fragment(&self) -> String {
        match (self.coin, self.krw) {
            (0, krw) => format!(r#"{{"krw":{krw}}}"#),
            (coin, 0) => format!(r#"{{"coin":{coin}}}"#),
            (coin, krw) => format!(r#"{{"coin":{coin}, "krw":{krw}}}"#),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferAgreement {
    Airdrop,
    IntegratedPrimaryMarket,
}

impl TransferAgreement {
    /// Free non-auction editions are airdrops.
    pub fn classify(price: &Price, auction: bool) -> Self {
        if price.is_free() && !auction {
            TransferAgreement::Airdrop
        } else {
            TransferAgreement::IntegratedPrimaryMarket
        }
    }

    pub fn version(&self) -> &'static str {
        match self {
            TransferAgreement::Airdrop => "contract_v2_airdrop",
            TransferAgreement::IntegratedPrimaryMarket => "contract_v2_integrated_primary_market",
        }
    }

    pub fn is_airdrop(&self) -> bool {
        matches!(self, TransferAgreement::Airdrop)
    }
}
