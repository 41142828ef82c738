use crate::{
    error::{Error, Result},
    media::{EncodedMedia, MediaSource},
    params::{EditionKind, ParameterSet},
};
use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};
use std::{fs, path::Path};
use tracing::info;

pub mod payment;
pub mod price;
pub mod schedule;
#[cfg(test)]
mod tests;

use payment::PaymentPreset;
use price::{Price, TransferAgreement};
use schedule::Schedule;

/// Parameters copied through as integers when present.
pub const OPTIONAL_INTEGER_FIELDS: [&str; 3] = ["accessCode", "partnerID", "groupID"];

/// Creation payload under construction. Later writes to a key replace earlier ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetadataRecord {
    fields: Map<String, Value>,
}

impl MetadataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set<V: Into<Value>>(&mut self, key: &str, value: V) {
        self.fields.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }

    /// Merges every top-level key of the template object.
    pub fn merge(&mut self, template: Map<String, Value>) {
        self.fields.extend(template);
    }
}

/// Fills a [`MetadataRecord`] from the parameters, one field group per setter.
pub struct MetadataAssembler<'a> {
    params: &'a ParameterSet,
    schedule: Schedule,
    run_window: Schedule,
}

impl<'a> MetadataAssembler<'a> {
    /// Fails on a malformed `future` date.
    pub fn new(params: &'a ParameterSet, now: DateTime<Utc>) -> Result<Self> {
        Ok(MetadataAssembler {
            params,
            schedule: Schedule::resolve(now, params.get("future"))?,
            run_window: Schedule::resolve(now, None)?,
        })
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Static template first so every setter after it can override its defaults.
    pub async fn assemble<M: MediaSource>(
        &self,
        static_path: &Path,
        nft_id: u64,
        media: &M,
    ) -> Result<MetadataRecord> {
        let mut record = MetadataRecord::new();
        self.load_static(&mut record, static_path)?;
        self.set_title(&mut record);
        self.set_nft_id(&mut record, nft_id);
        self.set_dates(&mut record);
        self.set_sell_type(&mut record);
        self.set_price(&mut record)?;
        self.set_total_supply(&mut record)?;
        self.set_quantity_per_user(&mut record)?;
        self.set_transfer_agreement(&mut record)?;
        self.set_author_seller_id(&mut record)?;
        self.set_offline(&mut record);
        self.set_optional(&mut record)?;
        self.set_pay_method(&mut record)?;
        self.set_media(&mut record, media).await?;
        Ok(record)
    }

    pub fn load_static(&self, record: &mut MetadataRecord, path: &Path) -> Result<()> {
        let text = fs::read_to_string(path)?;
        match serde_json::from_str(&text)? {
            Value::Object(template) => {
                record.merge(template);
                Ok(())
            }
            _ => Err(Error::StaticTemplate(path.to_path_buf())),
        }
    }

    pub fn set_title(&self, record: &mut MetadataRecord) {
        let title = match self.params.get("title") {
            Some(title) => title.to_string(),
            None => {
                let tag = match self.params.edition() {
                    EditionKind::Btc => "[btc]",
                    EditionKind::Eth | EditionKind::Auction => "[eth]",
                };
                // Always the day of the run, even for a `future` opening
                format!(
                    "{tag} {} {}",
                    self.run_window.open_at(),
                    self.run_window.end_at()
                )
            }
        };
        record.set("title", title.clone());
        record.set("titleEn", title);
    }

    pub fn set_nft_id(&self, record: &mut MetadataRecord, nft_id: u64) {
        record.set("id", nft_id);
    }

    pub fn set_dates(&self, record: &mut MetadataRecord) {
        record.set("openAt", self.schedule.open_at());
        record.set("startAt", self.schedule.open_at());
        record.set("endAt", self.schedule.end_at());
        record.set("deadline", self.schedule.deadline());
    }

    pub fn set_sell_type(&self, record: &mut MetadataRecord) {
        let sell_type = if self.params.edition().is_auction() {
            1
        } else {
            2
        };
        record.set("sellType", sell_type);
    }

    pub fn set_price(&self, record: &mut MetadataRecord) -> Result<()> {
        let price = Price::from_params(self.params)?;
        record.set("fixedPriceCOIN", price.coin);
        record.set("fixedPriceWON", price.krw);
        record.set("fixedPrice", price.fragment());
        Ok(())
    }

    pub fn set_total_supply(&self, record: &mut MetadataRecord) -> Result<()> {
        let total_supply = self.params.integer("totalSupply")?.unwrap_or(1);
        record.set("fixedTotalSupply", total_supply);
        Ok(())
    }

    pub fn set_quantity_per_user(&self, record: &mut MetadataRecord) -> Result<()> {
        let quantity = self.params.integer("quantityPerUser")?.unwrap_or(1);
        record.set("quantityPerUser", quantity);
        Ok(())
    }

    pub fn transfer_agreement(&self) -> Result<TransferAgreement> {
        let price = Price::from_params(self.params)?;
        Ok(TransferAgreement::classify(
            &price,
            self.params.edition().is_auction(),
        ))
    }

    pub fn set_transfer_agreement(&self, record: &mut MetadataRecord) -> Result<()> {
        let agreement = self.transfer_agreement()?;
        info!(version = agreement.version(), "Transfer agreement");
        record.set("transferAgreementVersion", agreement.version());
        Ok(())
    }

    pub fn set_author_seller_id(&self, record: &mut MetadataRecord) -> Result<()> {
        let key = if self.params.edition().is_author_listing() {
            "authorID"
        } else {
            "sellerID"
        };
        record.set(key, self.params.identity()?);
        Ok(())
    }

    pub fn set_offline(&self, record: &mut MetadataRecord) {
        if self.params.toggles().offline {
            record.set("isOffline", 1);
        }
    }

    pub fn set_optional(&self, record: &mut MetadataRecord) -> Result<()> {
        for key in OPTIONAL_INTEGER_FIELDS {
            if let Some(value) = self.params.integer(key)? {
                record.set(key, value);
            }
        }
        Ok(())
    }

    /// Without a preset the backoffice derives payment methods from the price fields.
    pub fn set_pay_method(&self, record: &mut MetadataRecord) -> Result<()> {
        match self.params.get("pay") {
            Some(preset) => {
                let flags = preset.parse::<PaymentPreset>()?.flags();
                for (key, value) in flags.fields() {
                    record.set(key, value);
                }
            }
            None => info!("No payment preset given, methods follow the price"),
        }
        Ok(())
    }

    pub async fn set_media<M: MediaSource>(
        &self,
        record: &mut MetadataRecord,
        media: &M,
    ) -> Result<()> {
        let image = media.fetch_image().await?;
        record.set("mainImage", media_field(&image.low_res));
        record.set("mainImageHiRes", media_field(&image.high_res));
        record.set("bannerImage", media_field(&image.high_res));
        if self.params.toggles().video {
            let video = media.fetch_video().await?;
            record.set("mainVideo", media_field(&video.low_res));
            record.set("mainVideoHiRes", media_field(&video.high_res));
        }
        Ok(())
    }
}

fn media_field(media: &EncodedMedia) -> Value {
    json!({
        "file": media.file,
        "name": media.name,
        "size": {
            "width": media.size.width,
            "height": media.size.height,
        },
    })
}
