/// Query sent to a points-of-interest provider.
#[derive(Debug, Clone)]
pub struct PlaceQuery {
    pub city: String,
    pub limit: u32,
}

impl PlaceQuery {
    /// Result count requested from each provider unless overridden.
    pub const DEFAULT_LIMIT: u32 = 8;

    pub fn new(city: impl Into<String>) -> Self {
        Self {
            city: city.into(),
            limit: Self::DEFAULT_LIMIT,
        }
    }

    /// Override the result limit. Values below 1 are clamped to 1
    /// so the provider layer stays total.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.max(1);
        self
    }
}
