//! Transport products (modes) and product sets.

use std::collections::BTreeSet;
use std::fmt;

/// Error returned when parsing a product list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductError {
    /// A name in the list is not a known product
    #[error("unknown product \"{0}\" (expected one of: {list})", list = Product::NAMES.join(", "))]
    Unknown(String),

    /// The list contained no products
    #[error("product list is empty")]
    Empty,
}

/// A transport mode category.
///
/// The variants and their names match the product filters of the VBB API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Product {
    Suburban,
    Subway,
    Tram,
    Bus,
    Ferry,
    Express,
    Regional,
}

impl Product {
    /// Every known product, in display order.
    pub const ALL: [Product; 7] = [
        Product::Suburban,
        Product::Subway,
        Product::Tram,
        Product::Bus,
        Product::Ferry,
        Product::Express,
        Product::Regional,
    ];

    const NAMES: [&'static str; 7] = [
        "suburban", "subway", "tram", "bus", "ferry", "express", "regional",
    ];

    /// Parse a single product name (case-insensitive).
    ///
    /// # Examples
    ///
    /// ```
    /// use vbb_departures::domain::Product;
    ///
    /// assert_eq!(Product::parse("Tram"), Ok(Product::Tram));
    /// assert!(Product::parse("zeppelin").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ProductError> {
        let lower = s.trim().to_ascii_lowercase();
        Product::ALL
            .iter()
            .copied()
            .find(|p| p.as_str() == lower)
            .ok_or_else(|| ProductError::Unknown(s.trim().to_string()))
    }

    /// The API name of this product.
    pub fn as_str(&self) -> &'static str {
        Self::NAMES[*self as usize]
    }

    /// One-letter glyph shown in the departure table.
    pub fn glyph(&self) -> &'static str {
        match self {
            Product::Suburban => "S",
            Product::Subway => "U",
            Product::Tram => "T",
            Product::Bus => "B",
            Product::Ferry => "F",
            Product::Express => "E",
            Product::Regional => "R",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-empty set of allowed products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSet(BTreeSet<Product>);

impl ProductSet {
    /// The set of every known product.
    pub fn all() -> Self {
        Self(Product::ALL.into_iter().collect())
    }

    /// Parse a comma-separated product list, or `all`.
    ///
    /// Names are case-insensitive and duplicates collapse.
    ///
    /// # Examples
    ///
    /// ```
    /// use vbb_departures::domain::{Product, ProductSet};
    ///
    /// let set = ProductSet::parse("bus, tram,bus").unwrap();
    /// assert_eq!(set.len(), 2);
    /// assert!(set.contains(Product::Tram));
    ///
    /// assert_eq!(ProductSet::parse("all").unwrap(), ProductSet::all());
    /// assert!(ProductSet::parse("").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, ProductError> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("all") {
            return Ok(Self::all());
        }

        let products = s
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(Product::parse)
            .collect::<Result<BTreeSet<_>, _>>()?;

        if products.is_empty() {
            return Err(ProductError::Empty);
        }

        Ok(Self(products))
    }

    pub fn contains(&self, product: Product) -> bool {
        self.0.contains(&product)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Product> + '_ {
        self.0.iter().copied()
    }
}

impl Default for ProductSet {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Display for ProductSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.iter().map(|p| p.as_str()).collect();
        f.write_str(&names.join(","))
    }
}
