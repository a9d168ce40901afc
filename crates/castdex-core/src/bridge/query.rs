//! Minimal query-pair representation of `(CatalogFilter, page)`.
//!
//! Encoding omits every field equal to the canonical empty value and omits
//! `page` when it is 1, so an unconstrained first page round-trips to zero
//! pairs. Decoding is total: unknown keys are ignored and unparsable values
//! are dropped rather than failing.

use time::Date;
use time::macros::format_description;

use castdex_model::{CatalogFilter, PageNumber};

const KEY_NAME: &str = "name";
const KEY_STATUS: &str = "status";
const KEY_SPECIES: &str = "species";
const KEY_GENDER: &str = "gender";
const KEY_CREATED_START: &str = "createdStart";
const KEY_CREATED_END: &str = "createdEnd";
const KEY_PAGE: &str = "page";

pub fn encode(filter: &CatalogFilter, page: PageNumber) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    if let Some(name) = &filter.name {
        pairs.push((KEY_NAME.to_string(), name.clone()));
    }
    if let Some(status) = filter.status {
        pairs.push((KEY_STATUS.to_string(), status.as_token().to_string()));
    }
    if let Some(species) = &filter.species {
        pairs.push((KEY_SPECIES.to_string(), species.clone()));
    }
    if let Some(gender) = filter.gender {
        pairs.push((KEY_GENDER.to_string(), gender.as_token().to_string()));
    }
    if let Some(start) = filter.created_start
        && let Some(value) = format_date(start)
    {
        pairs.push((KEY_CREATED_START.to_string(), value));
    }
    if let Some(end) = filter.created_end
        && let Some(value) = format_date(end)
    {
        pairs.push((KEY_CREATED_END.to_string(), value));
    }
    if page > 1 {
        pairs.push((KEY_PAGE.to_string(), page.to_string()));
    }

    pairs
}

pub fn decode(pairs: &[(String, String)]) -> (CatalogFilter, PageNumber) {
    let mut filter = CatalogFilter::empty();
    let mut page: PageNumber = 1;

    for (key, value) in pairs {
        match key.as_str() {
            KEY_NAME => filter.name = Some(value.clone()),
            KEY_STATUS => filter.status = value.parse().ok(),
            KEY_SPECIES => filter.species = Some(value.clone()),
            KEY_GENDER => filter.gender = value.parse().ok(),
            KEY_CREATED_START => filter.created_start = parse_date(value),
            KEY_CREATED_END => filter.created_end = parse_date(value),
            KEY_PAGE => {
                if let Ok(parsed) = value.parse::<PageNumber>() {
                    page = parsed.max(1);
                }
            }
            _ => {}
        }
    }

    (filter.normalized(), page)
}

fn format_date(date: Date) -> Option<String> {
    date.format(format_description!("[year]-[month]-[day]")).ok()
}

fn parse_date(value: &str) -> Option<Date> {
    Date::parse(value, format_description!("[year]-[month]-[day]")).ok()
}
