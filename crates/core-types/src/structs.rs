use crate::error::CoreError;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// The interchange format for sale dates.
pub const SALE_DATE_FORMAT: &str = "%Y-%m-%d";

/// A single observed sale that passed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleObservation {
    pub price: Decimal,
    pub date: NaiveDate,
}

impl SaleObservation {
    /// Creates a new observation, rejecting non-positive prices.
    pub fn try_new(price: Decimal, date: NaiveDate) -> Result<Self, CoreError> {
        if price <= Decimal::ZERO {
            return Err(CoreError::InvalidInput(
                "price".to_string(),
                format!("must be positive, got {price}"),
            ));
        }
        Ok(Self { price, date })
    }
}

/// A sale as supplied by a data source, before validation.
///
/// Either field may be missing, and the date is kept as text until parsed.
/// A field of the wrong JSON type, or a price outside `Decimal`'s range,
/// deserializes as missing so one bad record cannot reject a whole feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSale {
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_date")]
    pub date: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PriceField {
    Number(Decimal),
    Other(IgnoredAny),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DateField {
    Text(String),
    Other(IgnoredAny),
}

fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Decimal>, D::Error> {
    Ok(match Option::<PriceField>::deserialize(deserializer)? {
        Some(PriceField::Number(price)) => Some(price),
        Some(PriceField::Other(_)) | None => None,
    })
}

fn lenient_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Option::<DateField>::deserialize(deserializer)? {
        Some(DateField::Text(date)) => Some(date),
        Some(DateField::Other(_)) | None => None,
    })
}

impl RawSale {
    pub fn new(price: Decimal, date: impl Into<String>) -> Self {
        Self {
            price: Some(price),
            date: Some(date.into()),
        }
    }

    /// Validates the record and converts it into a `SaleObservation`.
    ///
    /// The date must be exactly `YYYY-MM-DD`; surrounding or embedded
    /// whitespace is rejected rather than skipped.
    pub fn parse(&self) -> Result<SaleObservation, CoreError> {
        let price = self
            .price
            .ok_or_else(|| CoreError::InvalidInput("price".to_string(), "missing".to_string()))?;
        let date_str = self
            .date
            .as_deref()
            .ok_or_else(|| CoreError::InvalidInput("date".to_string(), "missing".to_string()))?;
        if date_str.chars().any(char::is_whitespace) {
            return Err(CoreError::InvalidInput(
                "date".to_string(),
                format!("'{date_str}': contains whitespace"),
            ));
        }
        let date = NaiveDate::parse_from_str(date_str, SALE_DATE_FORMAT).map_err(|e| {
            CoreError::InvalidInput("date".to_string(), format!("'{date_str}': {e}"))
        })?;
        SaleObservation::try_new(price, date)
    }
}

/// Anything the analytics engine can read a sale from.
///
/// The engine accepts both already-parsed observations and raw interchange
/// records. `None` means the record is malformed and must be skipped.
pub trait SaleRecord {
    fn to_observation(&self) -> Option<SaleObservation>;
}

impl SaleRecord for SaleObservation {
    fn to_observation(&self) -> Option<SaleObservation> {
        (self.price > Decimal::ZERO).then_some(*self)
    }
}

impl SaleRecord for RawSale {
    fn to_observation(&self) -> Option<SaleObservation> {
        self.parse().ok()
    }
}

impl<T: SaleRecord + ?Sized> SaleRecord for &T {
    fn to_observation(&self) -> Option<SaleObservation> {
        (**self).to_observation()
    }
}

/// Identifies the card a set of sales belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardQuery {
    pub player_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_set: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_number: Option<String>,
    /// Grading condition, e.g. "raw" or "PSA 9".
    #[serde(default = "default_condition")]
    pub condition: String,
}

fn default_condition() -> String {
    "raw".to_string()
}

impl CardQuery {
    pub fn new(player_name: impl Into<String>) -> Self {
        Self {
            player_name: player_name.into(),
            year: None,
            card_set: None,
            variation: None,
            card_number: None,
            condition: default_condition(),
        }
    }

    /// A short human-readable label, e.g. "2018 Topps Chrome Shohei Ohtani #150 (PSA 9)".
    pub fn label(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(year) = &self.year {
            parts.push(year.clone());
        }
        if let Some(set) = &self.card_set {
            parts.push(set.clone());
        }
        parts.push(self.player_name.clone());
        if let Some(variation) = &self.variation {
            parts.push(variation.clone());
        }
        if let Some(number) = &self.card_number {
            parts.push(format!("#{number}"));
        }
        format!("{} ({})", parts.join(" "), self.condition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn raw_sale_parses_iso_dates() {
        let sale = RawSale::new(dec!(100.0), "2024-01-15");
        let parsed = sale.parse().unwrap();
        assert_eq!(parsed.price, dec!(100.0));
        assert_eq!(parsed.date, NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
    }

    #[test]
    fn raw_sale_rejects_impossible_dates() {
        let sale = RawSale::new(dec!(100.0), "2024-13-40");
        assert!(matches!(sale.parse(), Err(CoreError::InvalidInput(field, _)) if field == "date"));
        assert!(sale.to_observation().is_none());
    }

    #[test]
    fn raw_sale_rejects_dates_with_whitespace() {
        for date in [" 2024-01-01", "2024-01-02 ", "2024- 01-03", "\t2024-01-04"] {
            let sale = RawSale::new(dec!(100.0), date);
            assert!(
                matches!(sale.parse(), Err(CoreError::InvalidInput(field, _)) if field == "date"),
                "{date:?} should be rejected"
            );
        }
    }

    #[test]
    fn raw_sale_rejects_missing_and_non_positive_prices() {
        let missing = RawSale {
            price: None,
            date: Some("2024-01-01".to_string()),
        };
        assert!(missing.to_observation().is_none());
        assert!(RawSale::new(Decimal::ZERO, "2024-01-01").to_observation().is_none());
        assert!(RawSale::new(dec!(-5), "2024-01-01").to_observation().is_none());
    }

    #[test]
    fn raw_sale_deserializes_with_nulls_and_missing_fields() {
        let sales: Vec<RawSale> = serde_json::from_str(
            r#"[{"price": 100.0, "date": "2024-01-01"}, {"price": null, "date": "2024-01-02"}, {"date": "2024-01-03"}]"#,
        )
        .unwrap();
        assert_eq!(sales.len(), 3);
        assert!(sales[0].to_observation().is_some());
        assert!(sales[1].to_observation().is_none());
        assert!(sales[2].to_observation().is_none());
    }

    #[test]
    fn raw_sale_treats_wrongly_typed_fields_as_missing() {
        let sales: Vec<RawSale> = serde_json::from_str(
            r#"[
                {"price": "n/a", "date": "2024-01-01"},
                {"price": 1e40, "date": "2024-01-02"},
                {"price": true, "date": "2024-01-03"},
                {"price": 100.0, "date": 20240104},
                {"price": 100.0, "date": ["2024-01-05"]},
                {"price": 100.0, "date": "2024-01-06"}
            ]"#,
        )
        .unwrap();

        assert_eq!(sales.len(), 6);
        for sale in &sales[..3] {
            assert_eq!(sale.price, None);
            assert!(sale.date.is_some());
        }
        for sale in &sales[3..5] {
            assert_eq!(sale.date, None);
            assert!(sale.price.is_some());
        }
        let valid: Vec<_> = sales.iter().filter_map(|s| s.to_observation()).collect();
        assert_eq!(valid.len(), 1);
        assert_eq!(valid[0].date, NaiveDate::from_ymd_opt(2024, 1, 6).unwrap());
    }

    #[test]
    fn card_query_label_includes_present_fields_only() {
        let mut query = CardQuery::new("Shohei Ohtani");
        query.year = Some("2018".to_string());
        query.card_number = Some("150".to_string());
        assert_eq!(query.label(), "2018 Shohei Ohtani #150 (raw)");
    }
}
