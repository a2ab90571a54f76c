//! Projects a Crunchbase organization response onto a [`CompanyRecord`].
//!
//! The response is walked along `cards.fields`. Every projected value is
//! optional; only a value of the wrong JSON type aborts extraction, and a
//! `null` where an object or array belongs counts as the wrong type.

use orgfetch_core::CompanyRecord;
use serde_json::Value;

use crate::error::ExtractError;
use crate::json_path::JsonPath;

/// Extracts the company record from a raw organization response.
///
/// `location_identifiers` is scanned in order and each of `city`, `region`
/// and `country` takes the value of the FIRST entry with a matching
/// `location_type`. Later duplicates are ignored. A `location_type` that is
/// not a string matches nothing.
///
/// # Errors
///
/// Returns [`ExtractError::ShapeMismatch`] when the response, `cards`,
/// `fields`, `identifier` or `linkedin` is present but not an object, a
/// projected leaf is not a string or `null`, `location_identifiers` is present
/// but not an array of objects, or a
/// scanned location entry lacks `location_type` (or `value` on a match).
pub fn extract_company_record(response: &Value) -> Result<CompanyRecord, ExtractError> {
    let root = JsonPath::root(response);
    root.require_object()?;

    let fields = root.descend(&["cards", "fields"])?;
    let locations = fields.field("location_identifiers")?.elements()?;

    let record = CompanyRecord {
        permalink: fields.string_at(&["identifier", "permalink"])?,
        website_url: fields.string_at(&["website_url"])?,
        updated_at: fields.string_at(&["updated_at"])?,
        linkedin: fields.string_at(&["linkedin", "value"])?,
        city: first_location_value(&locations, "city")?,
        region: first_location_value(&locations, "region")?,
        country: first_location_value(&locations, "country")?,
    };

    tracing::debug!(
        permalink = record.permalink.as_deref().unwrap_or("-"),
        location_entries = locations.len(),
        "extracted company record"
    );
    Ok(record)
}

/// Value of the first entry tagged `location_type`, or `None` if no entry matches.
///
/// Entries after the first match are not inspected.
fn first_location_value(
    entries: &[JsonPath<'_>],
    location_type: &str,
) -> Result<Option<String>, ExtractError> {
    for entry in entries {
        entry.require_object()?;
        let tag = entry.field("location_type")?;
        if tag.is_missing() {
            return Err(ExtractError::ShapeMismatch {
                path: tag.path().to_owned(),
                expected: "string",
                found: "missing",
            });
        }
        if tag.eq_str(location_type) {
            let value = entry.field("value")?;
            if value.is_missing() {
                return Err(ExtractError::ShapeMismatch {
                    path: value.path().to_owned(),
                    expected: "string",
                    found: "missing",
                });
            }
            return Ok(value.as_str()?.map(str::to_owned));
        }
    }
    Ok(None)
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
