// src/domain/pricing.rs
//
// Tour-company price sheets. Reference data only: nothing here is applied to a
// reservation's `ucret`.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::dates;
use crate::domain::summary::parse_locale_amount;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourPriceDefinition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub hotel: String,
    pub tour_name: String,
    #[serde(with = "dates::serde_day")]
    pub start_date: NaiveDate,
    /// Inclusive.
    #[serde(with = "dates::serde_day")]
    pub end_date: NaiveDate,
    #[serde(deserialize_with = "amount_or_number")]
    pub adult_price: f64,
    /// Fraction of the adult price charged per child, e.g. 0.7.
    pub child_discount: f64,
}

impl TourPriceDefinition {
    pub fn covers(&self, day: NaiveDate) -> bool {
        self.start_date <= day && day <= self.end_date
    }

    pub fn child_price(&self) -> f64 {
        self.adult_price * self.child_discount
    }
}

// Price sheets were entered both as numbers and as "1.250,00" strings.
fn amount_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    Ok(match Raw::deserialize(d)? {
        Raw::Number(n) => n,
        Raw::Text(s) => parse_locale_amount(&s),
    })
}

/// The price sheet of `tour` at `hotel` whose validity includes `day`.
/// Tour and hotel names are compared case-insensitively.
pub fn price_for<'a>(
    defs: &'a [TourPriceDefinition],
    hotel: &str,
    tour: &str,
    day: NaiveDate,
) -> Option<&'a TourPriceDefinition> {
    let hotel = hotel.trim().to_lowercase();
    let tour = tour.trim().to_lowercase();
    defs.iter().find(|def| {
        def.hotel.trim().to_lowercase() == hotel
            && def.tour_name.trim().to_lowercase() == tour
            && def.covers(day)
    })
}

/// Sheets starting in `year` (all when `None`), ordered by tour name then start date.
pub fn price_sheets_for_year(
    mut defs: Vec<TourPriceDefinition>,
    year: Option<i32>,
) -> Vec<TourPriceDefinition> {
    if let Some(year) = year {
        defs.retain(|def| def.start_date.year() == year);
    }
    defs.sort_by(|a, b| {
        a.tour_name
            .cmp(&b.tour_name)
            .then(a.start_date.cmp(&b.start_date))
    });
    defs
}
