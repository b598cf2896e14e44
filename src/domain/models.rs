// src/domain/models.rs

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::dates::{self, DateRange};
use crate::domain::occupancy::GuestMix;
use crate::errors::BookingError;

/// Category label used when a reservation carries no `tur`.
pub const DEFAULT_CATEGORY: &str = "Normal";

/// A physical room. `no` is unique within a hotel; `code` is the room type
/// (AİLE, SETLİ, DOUBLE, ...), not the number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub no: u32,
    pub floor: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// A booking as stored in the `reservations` collection.
/// Field names on the wire are the ones existing documents already use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,

    #[serde(rename = "isim", default)]
    pub guest_name: String,

    /// Informational only; never used for availability.
    #[serde(
        rename = "giris_tarihi",
        default,
        with = "dates::serde_day_opt",
        skip_serializing_if = "Option::is_none"
    )]
    pub lead_in: Option<NaiveDate>,

    #[serde(rename = "baslangic_tarihi", with = "dates::serde_day")]
    pub start: NaiveDate,

    /// Checkout day, exclusive.
    #[serde(rename = "bitis_tarihi", with = "dates::serde_day")]
    pub end: NaiveDate,

    #[serde(rename = "pax", default)]
    pub adults: u32,
    #[serde(rename = "cocuk_sayisi", default)]
    pub children: u32,
    #[serde(rename = "bebek_sayisi", default)]
    pub infants: u32,

    /// Booking channel. Blank when the document has none; see [`Reservation::category_or`].
    #[serde(rename = "tur", default, deserialize_with = "trimmed_category")]
    pub category: String,

    /// Locale formatted amount, e.g. `"1.234,56"`. Kept verbatim.
    #[serde(rename = "ucret", default)]
    pub amount: String,

    #[serde(
        default,
        deserialize_with = "opt_string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub room_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel: Option<String>,

    #[serde(default)]
    pub checked_in: bool,
    #[serde(default)]
    pub checked_out: bool,
}

impl Reservation {
    /// The stay as a validated range.
    pub fn range(&self) -> Result<DateRange, BookingError> {
        DateRange::new(self.start, self.end)
    }

    pub fn guests(&self) -> GuestMix {
        GuestMix {
            adults: self.adults,
            children: self.children,
            infants: self.infants,
        }
    }

    /// The assigned room number, if `room_code` holds one.
    pub fn room_no(&self) -> Option<u32> {
        self.room_code
            .as_deref()
            .and_then(|code| code.trim().parse().ok())
    }

    pub fn holds_room(&self, room_no: u32) -> bool {
        self.room_no() == Some(room_no)
    }

    /// The channel label, or `fallback` when none was recorded.
    pub fn category_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self.category.trim() {
            "" => fallback,
            label => label,
        }
    }
}

fn trimmed_category<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    let raw = Option::<String>::deserialize(d)?;
    Ok(raw.map(|s| s.trim().to_string()).unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    Str(String),
    Int(i64),
    Float(f64),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            StringOrNumber::Str(s) => s.trim().to_string(),
            StringOrNumber::Int(n) => n.to_string(),
            StringOrNumber::Float(f) => f.to_string(),
        }
    }
}

// Older documents store ids and room codes as numbers.
fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(StringOrNumber::deserialize(d)?.into_string())
}

fn opt_string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<StringOrNumber>::deserialize(d)?
        .map(StringOrNumber::into_string)
        .filter(|s| !s.is_empty()))
}
