/// The flat organization record written to disk.
///
/// Every field is independently optional: an absent upstream value is an
/// expected state, not an error. Field order here is the output column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyRecord {
    pub permalink: Option<String>,
    pub website_url: Option<String>,
    /// Raw ISO-8601 string as returned by the API; never parsed.
    pub updated_at: Option<String>,
    pub linkedin: Option<String>,
    pub city: Option<String>,
    pub region: Option<String>,
    pub country: Option<String>,
}

impl CompanyRecord {
    /// Output column names, in storage order.
    pub const COLUMNS: [&'static str; 7] = [
        "permalink",
        "website_url",
        "updated_at",
        "linkedin",
        "city",
        "region",
        "country",
    ];

    /// Field values in [`Self::COLUMNS`] order.
    #[must_use]
    pub fn values(&self) -> [Option<&str>; 7] {
        [
            self.permalink.as_deref(),
            self.website_url.as_deref(),
            self.updated_at.as_deref(),
            self.linkedin.as_deref(),
            self.city.as_deref(),
            self.region.as_deref(),
            self.country.as_deref(),
        ]
    }

    /// Rebuilds a record from values in [`Self::COLUMNS`] order.
    #[must_use]
    pub fn from_values(values: [Option<String>; 7]) -> Self {
        let [permalink, website_url, updated_at, linkedin, city, region, country] = values;
        Self {
            permalink,
            website_url,
            updated_at,
            linkedin,
            city,
            region,
            country,
        }
    }

    /// Returns `true` when no field resolved to a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values().iter().all(Option::is_none)
    }
}
