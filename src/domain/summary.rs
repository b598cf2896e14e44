// src/domain/summary.rs

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::models::{Reservation, DEFAULT_CATEGORY};
use crate::errors::BookingError;

/// Parses a Turkish-formatted amount such as `"1.234,56"`.
///
/// Dots are thousands separators and are dropped; the first comma is the decimal mark.
/// Like a browser's `parseFloat`, the longest numeric prefix is used, so `"450,00 ₺"`
/// reads as 450. Anything without a leading number is 0. This never fails: stored
/// amounts are free-form and a summary must still be produced for them.
pub fn parse_locale_amount(raw: &str) -> f64 {
    let normalized = raw.replace('.', "").replacen(',', ".", 1);
    let text = normalized.trim_start();

    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let digits_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut has_digits = end > digits_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        if frac_end > frac_start || has_digits {
            has_digits = has_digits || frac_end > frac_start;
            end = frac_end;
        }
    }

    if !has_digits {
        return 0.0;
    }
    text[..end].parse::<f64>().unwrap_or(0.0)
}

/// Totals for one booking channel ("tur").
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub category: String,
    pub reservations: usize,
    pub total_stay_units: f64,
    pub total_amount: f64,
    pub color: &'static str,
}

#[derive(Default)]
struct Accumulator {
    reservations: usize,
    half_units: i64,
    cents: i64,
}

/// Groups reservations by category, defaulting blank labels to `"Normal"`.
pub fn summarize_by_category(
    reservations: &[Reservation],
) -> Result<Vec<CategorySummary>, BookingError> {
    summarize_by_category_with(reservations, DEFAULT_CATEGORY)
}

/// Same as [`summarize_by_category`] with a caller-chosen label for blank categories
/// (the dashboard uses "Diğer").
///
/// Totals are accumulated in half stay-units and whole cents, so the result is identical
/// for any ordering of `reservations`. Groups come back sorted by category name.
pub fn summarize_by_category_with(
    reservations: &[Reservation],
    default_label: &str,
) -> Result<Vec<CategorySummary>, BookingError> {
    let mut groups: BTreeMap<String, Accumulator> = BTreeMap::new();

    for res in reservations {
        let nights = res.range()?.nights();
        let label = res.category_or(default_label).to_string();

        let half_units_per_night = 2 * res.adults as i64 + res.children as i64;
        let acc = groups.entry(label).or_default();
        acc.reservations += 1;
        acc.half_units += half_units_per_night * nights;
        acc.cents += (parse_locale_amount(&res.amount) * 100.0).round() as i64;
    }

    Ok(groups
        .into_iter()
        .map(|(category, acc)| CategorySummary {
            color: category_color(&category),
            category,
            reservations: acc.reservations,
            total_stay_units: acc.half_units as f64 / 2.0,
            total_amount: acc.cents as f64 / 100.0,
        })
        .collect())
}

const KNOWN_CATEGORY_COLORS: &[(&str, &str)] = &[
    ("ETS", "green"),
    ("Otelz", "blue"),
    ("Jolly", "red"),
    ("TatilBudur", "orange"),
    ("Setur", "purple"),
    ("Booking", "cyan"),
    ("Expedia", "yellow"),
    ("HotelRunner", "pink"),
    ("Kapı", "teal"),
    ("Telefon", "indigo"),
];

const PALETTE: &[&str] = &[
    "red", "orange", "yellow", "green", "teal", "blue", "cyan", "purple", "pink", "gray",
];

/// Badge colour for a category: well-known channels have fixed colours, anything else
/// is hashed onto the palette so the same name always gets the same colour.
pub fn category_color(name: &str) -> &'static str {
    if let Some((_, color)) = KNOWN_CATEGORY_COLORS.iter().find(|(known, _)| *known == name) {
        return color;
    }

    // hash = code_unit + (hash << 5) - hash, with the shift done on the low 32 bits
    // and the running value kept unbounded, over UTF-16 code units.
    let mut hash: i64 = 0;
    for unit in name.encode_utf16() {
        let shifted = ((hash as i32) << 5) as i64;
        hash = unit as i64 + (shifted - hash);
    }

    PALETTE[(hash.unsigned_abs() % PALETTE.len() as u64) as usize]
}
