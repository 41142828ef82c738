use crate::error::{Error, Result};
use std::str::FromStr;

/// Named payment method combinations accepted through `pay=`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaymentPreset {
    CoinMobile,
    CoinBank,
    Mobile,
    Bank,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaymentFlags {
    pub card: bool,
    pub bank_transfer: bool,
    pub coin: bool,
    pub mobile: bool,
}

impl PaymentPreset {
    pub fn flags(&self) -> PaymentFlags {
        let (bank_transfer, coin, mobile) = match self {
            PaymentPreset::CoinMobile => (false, true, true),
            PaymentPreset::CoinBank => (true, true, false),
            PaymentPreset::Mobile => (false, false, true),
            PaymentPreset::Bank => (true, false, false),
        };
        PaymentFlags {
            card: false,
            bank_transfer,
            coin,
            mobile,
        }
    }
}

impl FromStr for PaymentPreset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "coinmobile" => Ok(PaymentPreset::CoinMobile),
            "coinbank" => Ok(PaymentPreset::CoinBank),
            "mobile" => Ok(PaymentPreset::Mobile),
            "bank" => Ok(PaymentPreset::Bank),
            other => Err(Error::UnknownPaymentPreset(other.to_string())),
        }
    }
}

impl PaymentFlags {
    /// Field name and 0/1 value for each flag.
    pub fn fields(&self) -> [(&'static str, u8); 4] {
        [
            ("allowPaymentCard", self.card as u8),
            ("allowPaymentBankTransfer", self.bank_transfer as u8),
            ("allowPaymentCoin", self.coin as u8),
            ("allowPaymentMobile", self.mobile as u8),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coinbank_enables_coin_and_bank() {
        let flags: PaymentFlags = "coinbank".parse::<PaymentPreset>().unwrap().flags();
        assert_eq!(
            flags.fields(),
            [
                ("allowPaymentCard", 0),
                ("allowPaymentBankTransfer", 1),
                ("allowPaymentCoin", 1),
                ("allowPaymentMobile", 0),
            ]
        );
    }

    #[test]
    fn card_is_never_enabled() {
        for preset in ["coinmobile", "coinbank", "mobile", "bank"] {
            let flags = preset.parse::<PaymentPreset>().unwrap().flags();
            assert!(!flags.card);
        }
    }

    #[test]
    fn unknown_preset_is_rejected() {
        let err = "foo".parse::<PaymentPreset>().unwrap_err();
        assert!(matches!(err, Error::UnknownPaymentPreset(p) if p == "foo"));
    }
}
