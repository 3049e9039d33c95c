//! User query model for the catalog pipeline.
//!
//! A [`QuerySpec`] is rebuilt on every user interaction. None of its
//! constructors fail: bad input is normalized to something safe and the
//! normalization is logged.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Everything the user chose on the listing page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerySpec {
    /// Free text matched against title and category (may be empty)
    pub search: String,
    pub category: CategorySelection,
    pub price: PriceRange,
    pub sort: SortKey,
}

impl QuerySpec {
    /// A query that matches everything in snapshot order.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_category(mut self, category: CategorySelection) -> Self {
        self.category = category;
        self
    }

    pub fn with_price_range(mut self, price: PriceRange) -> Self {
        self.price = price;
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }
}

// =============================================================================
// Category Selection
// =============================================================================

/// Which category the listing is restricted to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategorySelection {
    #[default]
    Any,
    /// Exact, case-sensitive category label
    Exactly(String),
}

impl CategorySelection {
    /// Parse a user-supplied category.
    ///
    /// The empty string, `"any"` and `"all"` (any case) select every category.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("any")
            || trimmed.eq_ignore_ascii_case("all")
        {
            CategorySelection::Any
        } else {
            CategorySelection::Exactly(trimmed.to_string())
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, CategorySelection::Any)
    }
}

impl FromStr for CategorySelection {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for CategorySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategorySelection::Any => write!(f, "any"),
            CategorySelection::Exactly(category) => write!(f, "{}", category),
        }
    }
}

// =============================================================================
// Price Range
// =============================================================================

/// Inclusive price bounds, always with `0 <= min <= max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    min: f64,
    max: f64,
}

impl PriceRange {
    /// Build a range from optional user bounds.
    ///
    /// ## Normalization
    /// - missing, NaN or negative `min` becomes 0
    /// - missing or NaN `max` becomes unbounded, negative `max` becomes 0
    /// - reversed bounds are swapped
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        let lower = match min {
            Some(v) if v.is_nan() || v < 0.0 => {
                warn!("Ignoring invalid minimum price {}", v);
                0.0
            }
            Some(v) => v,
            None => 0.0,
        };
        let upper = match max {
            Some(v) if v.is_nan() => {
                warn!("Ignoring invalid maximum price {}", v);
                f64::INFINITY
            }
            Some(v) if v < 0.0 => {
                warn!("Clamping negative maximum price {} to 0", v);
                0.0
            }
            Some(v) => v,
            None => f64::INFINITY,
        };

        if lower > upper {
            warn!("Swapping reversed price bounds [{}, {}]", lower, upper);
            Self { min: upper, max: lower }
        } else {
            Self { min: lower, max: upper }
        }
    }

    /// The range matching every price.
    pub fn unbounded() -> Self {
        Self {
            min: 0.0,
            max: f64::INFINITY,
        }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn is_unbounded(&self) -> bool {
        self.min <= 0.0 && self.max == f64::INFINITY
    }

    /// Inclusive membership: `min <= price <= max`.
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

// =============================================================================
// Sort Key
// =============================================================================

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Keep snapshot order
    #[default]
    None,
    PriceAsc,
    PriceDesc,
    /// Rating score, highest first
    RatingDesc,
    /// Rating count, highest first
    PopularityDesc,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::None,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::RatingDesc,
        SortKey::PopularityDesc,
    ];

    /// Parse a sort key, falling back to [`SortKey::None`] for anything
    /// unrecognized.
    pub fn parse(input: &str) -> Self {
        match input.trim().to_ascii_lowercase().as_str() {
            "" | "none" | "default" => SortKey::None,
            "price-asc" | "price_asc" | "price" => SortKey::PriceAsc,
            "price-desc" | "price_desc" => SortKey::PriceDesc,
            "rating-desc" | "rating_desc" | "rating" => SortKey::RatingDesc,
            "popularity-desc" | "popularity_desc" | "popularity" => SortKey::PopularityDesc,
            other => {
                warn!("Unknown sort key '{}', keeping snapshot order", other);
                SortKey::None
            }
        }
    }

    /// Canonical key, the inverse of [`SortKey::parse`].
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::None => "none",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::RatingDesc => "rating-desc",
            SortKey::PopularityDesc => "popularity-desc",
        }
    }

    /// Human-readable label for menus.
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::None => "Featured",
            SortKey::PriceAsc => "Price: Low to High",
            SortKey::PriceDesc => "Price: High to Low",
            SortKey::RatingDesc => "Rating: High to Low",
            SortKey::PopularityDesc => "Most Reviewed",
        }
    }
}

impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
