use super::*;
use crate::{media::fake_media::FakeMedia, params::Toggles};
use chrono::{TimeZone, Utc};
use std::path::PathBuf;
use tempfile::TempDir;

fn params(tokens: &[&str]) -> ParameterSet {
    ParameterSet::parse(tokens.iter().copied(), Toggles::default()).unwrap()
}

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap()
}

fn assembler(params: &ParameterSet) -> MetadataAssembler<'_> {
    MetadataAssembler::new(params, noon()).unwrap()
}

fn static_file(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("static.json");
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn synthesized_title_uses_tag_and_window() {
    let params = params(&["edition=btc"]);
    let assembler = assembler(&params);
    let mut record = MetadataRecord::new();
    assembler.set_title(&mut record);
    let expected = "[btc] 2026-10-16 12:00:00 2026-10-17 12:00:00";
    assert_eq!(record.get("title"), Some(&json!(expected)));
    assert_eq!(record.get("titleEn"), Some(&json!(expected)));
}

#[test]
fn future_date_moves_the_sale_window_but_not_the_title() {
    let params = params(&["future=2030-01-01"]);
    let assembler = assembler(&params);
    let mut record = MetadataRecord::new();
    assembler.set_title(&mut record);
    assembler.set_dates(&mut record);
    assert_eq!(
        record.get("title"),
        Some(&json!("[eth] 2026-10-16 12:00:00 2026-10-17 12:00:00"))
    );
    assert_eq!(record.get("openAt"), Some(&json!("2030-01-01 12:00:00")));
    assert_eq!(record.get("endAt"), Some(&json!("2030-01-02 12:00:00")));
}

#[test]
fn malformed_future_date_fails_construction() {
    let params = params(&["future=2030/01/01"]);
    let err = MetadataAssembler::new(&params, noon()).err().unwrap();
    assert!(matches!(err, Error::InvalidDate(_)));
}

#[test]
fn supplied_title_is_kept_verbatim() {
    let params = params(&["edition=auction", "title=Spring Drop"]);
    let assembler = assembler(&params);
    let mut record = MetadataRecord::new();
    assembler.set_title(&mut record);
    assert_eq!(record.get("title"), Some(&json!("Spring Drop")));
}

#[test]
fn dates_share_open_and_start() {
    let params = params(&[]);
    let assembler = assembler(&params);
    let mut record = MetadataRecord::new();
    assembler.set_dates(&mut record);
    assert_eq!(record.get("openAt"), record.get("startAt"));
    assert_eq!(record.get("deadline"), Some(&json!("2026-10-17 13:00:00")));
}

#[test]
fn auction_has_its_own_sell_type() {
    let mut record = MetadataRecord::new();
    let auction = params(&["edition=auction"]);
    assembler(&auction).set_sell_type(&mut record);
    assert_eq!(record.get("sellType"), Some(&json!(1)));
    let btc = params(&["edition=btc"]);
    assembler(&btc).set_sell_type(&mut record);
    assert_eq!(record.get("sellType"), Some(&json!(2)));
}

#[test]
fn price_fields_and_fragment() {
    let params = params(&["coin=5"]);
    let assembler = assembler(&params);
    let mut record = MetadataRecord::new();
    assembler.set_price(&mut record).unwrap();
    assert_eq!(record.get("fixedPriceCOIN"), Some(&json!(5)));
    assert_eq!(record.get("fixedPriceWON"), Some(&json!(0)));
    assert_eq!(record.get("fixedPrice"), Some(&json!(r#"{"coin":5}"#)));
}

#[test]
fn supply_and_quantity_default_to_one() {
    let params = params(&["totalSupply=50"]);
    let assembler = assembler(&params);
    let mut record = MetadataRecord::new();
    assembler.set_total_supply(&mut record).unwrap();
    assembler.set_quantity_per_user(&mut record).unwrap();
    assert_eq!(record.get("fixedTotalSupply"), Some(&json!(50)));
    assert_eq!(record.get("quantityPerUser"), Some(&json!(1)));
}

#[test]
fn transfer_agreement_follows_price_and_kind() {
    let mut record = MetadataRecord::new();
    let free = params(&["coin=0", "krw=0"]);
    assembler(&free)
        .set_transfer_agreement(&mut record)
        .unwrap();
    assert_eq!(
        record.get("transferAgreementVersion"),
        Some(&json!("contract_v2_airdrop"))
    );
    let auction = params(&["edition=auction"]);
    assembler(&auction)
        .set_transfer_agreement(&mut record)
        .unwrap();
    assert_eq!(
        record.get("transferAgreementVersion"),
        Some(&json!("contract_v2_integrated_primary_market"))
    );
}

#[test]
fn identity_key_depends_on_kind() {
    let btc = params(&["edition=btc"]);
    let mut record = MetadataRecord::new();
    assembler(&btc)
        .set_author_seller_id(&mut record)
        .unwrap();
    assert_eq!(record.get("sellerID"), Some(&json!(200)));
    assert!(!record.contains("authorID"));

    let eth = params(&["id=101"]);
    let mut record = MetadataRecord::new();
    assembler(&eth)
        .set_author_seller_id(&mut record)
        .unwrap();
    assert_eq!(record.get("authorID"), Some(&json!(101)));
}

#[test]
fn offline_toggle_sets_flag() {
    let toggles = Toggles {
        offline: true,
        ..Toggles::default()
    };
    let params = ParameterSet::parse(Vec::<String>::new(), toggles).unwrap();
    let mut record = MetadataRecord::new();
    assembler(&params).set_offline(&mut record);
    assert_eq!(record.get("isOffline"), Some(&json!(1)));
}

#[test]
fn optional_fields_pass_through_as_integers() {
    let params = params(&["accessCode=1234", "groupID=9"]);
    let mut record = MetadataRecord::new();
    assembler(&params)
        .set_optional(&mut record)
        .unwrap();
    assert_eq!(record.get("accessCode"), Some(&json!(1234)));
    assert_eq!(record.get("groupID"), Some(&json!(9)));
    assert!(!record.contains("partnerID"));
}

#[test]
fn payment_preset_sets_all_four_flags() {
    let params = params(&["pay=mobile"]);
    let mut record = MetadataRecord::new();
    assembler(&params)
        .set_pay_method(&mut record)
        .unwrap();
    assert_eq!(record.get("allowPaymentMobile"), Some(&json!(1)));
    assert_eq!(record.get("allowPaymentCoin"), Some(&json!(0)));
    assert_eq!(record.len(), 4);
}

#[test]
fn unknown_payment_preset_leaves_record_untouched() {
    let params = params(&["pay=foo"]);
    let mut record = MetadataRecord::new();
    let err = assembler(&params)
        .set_pay_method(&mut record)
        .unwrap_err();
    assert!(matches!(err, Error::UnknownPaymentPreset(_)));
    assert!(record.is_empty());
}

#[test]
fn missing_payment_preset_adds_nothing() {
    let params = params(&[]);
    let mut record = MetadataRecord::new();
    assembler(&params)
        .set_pay_method(&mut record)
        .unwrap();
    assert!(record.is_empty());
}

#[test]
fn static_template_must_be_an_object() {
    let dir = TempDir::new().unwrap();
    let path = static_file(&dir, "[1, 2]");
    let params = params(&[]);
    let mut record = MetadataRecord::new();
    let err = assembler(&params)
        .load_static(&mut record, &path)
        .unwrap_err();
    assert!(matches!(err, Error::StaticTemplate(_)));
}

#[tokio::test]
async fn assemble_lets_setters_override_static_defaults() {
    let dir = TempDir::new().unwrap();
    let path = static_file(
        &dir,
        r#"{"title": "template", "description": "설명", "sellType": 9}"#,
    );
    let params = params(&["coin=5", "krw=1000"]);
    let media = FakeMedia::default();
    let record = assembler(&params)
        .assemble(&path, 4512, &media)
        .await
        .unwrap();
    assert_eq!(record.get("description"), Some(&json!("설명")));
    assert_eq!(record.get("sellType"), Some(&json!(2)));
    assert_eq!(record.get("id"), Some(&json!(4512)));
    assert_eq!(
        record.get("fixedPrice"),
        Some(&json!(r#"{"coin":5, "krw":1000}"#))
    );
    assert_ne!(record.get("title"), Some(&json!("template")));
    assert_eq!(media.image_fetches(), 1);
    assert_eq!(media.video_fetches(), 0);
    assert!(!record.contains("mainVideo"));
}

#[tokio::test]
async fn media_fields_embed_image_and_optional_video() {
    let toggles = Toggles {
        video: true,
        ..Toggles::default()
    };
    let params = ParameterSet::parse(Vec::<String>::new(), toggles).unwrap();
    let media = FakeMedia::default();
    let mut record = MetadataRecord::new();
    assembler(&params)
        .set_media(&mut record, &media)
        .await
        .unwrap();
    assert_eq!(
        record.get("mainImage").unwrap()["size"],
        json!({"width": 1280, "height": 720})
    );
    assert_eq!(record.get("bannerImage"), record.get("mainImageHiRes"));
    assert_eq!(
        record.get("mainVideoHiRes").unwrap()["name"],
        json!("rain.mp4")
    );
    assert_eq!(
        record.get("mainVideo").unwrap()["size"]["width"],
        json!(1920)
    );
    assert_eq!(media.video_fetches(), 1);
}
