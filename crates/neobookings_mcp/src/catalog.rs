//! The tool catalog.
//!
//! Every tool is a [`ToolSpec`]: a name, an endpoint, a parameter list and
//! the upstream result fields it surfaces. Tools are grouped by category,
//! one submodule per category.

use neobookings_core::validate::RangeRule;
use neobookings_core::Result;
use serde_json::{Map, Value};

use crate::param::Param;

mod authentication;
mod basket;
mod budget;
mod geo;
mod hotel;
mod orders;
mod packages;
mod product;
mod users;

/// Post-processing applied to the wire body after parameter conversion,
/// for payloads whose shape does not follow the arguments one to one.
pub type Shaper = fn(&mut Map<String, Value>) -> Result<()>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Authentication,
    Basket,
    Budget,
    HotelInventory,
    GenericProducts,
    Orders,
    Packages,
    Users,
    GeoSearch,
}

impl Category {
    pub const ALL: [Category; 9] = [
        Category::Authentication,
        Category::Basket,
        Category::Budget,
        Category::HotelInventory,
        Category::GenericProducts,
        Category::Orders,
        Category::Packages,
        Category::Users,
        Category::GeoSearch,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Authentication => "Authentication",
            Category::Basket => "Basket Management",
            Category::Budget => "Budget Management",
            Category::HotelInventory => "Hotel & Inventory",
            Category::GenericProducts => "Generic Products",
            Category::Orders => "Order Management",
            Category::Packages => "Packages",
            Category::Users => "Users & Rewards",
            Category::GeoSearch => "Geographic Search",
        }
    }

    /// Short identifier used on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            Category::Authentication => "authentication",
            Category::Basket => "basket",
            Category::Budget => "budget",
            Category::HotelInventory => "hotel",
            Category::GenericProducts => "product",
            Category::Orders => "orders",
            Category::Packages => "packages",
            Category::Users => "users",
            Category::GeoSearch => "geo",
        }
    }

    pub fn tools(self) -> &'static [ToolSpec] {
        match self {
            Category::Authentication => authentication::TOOLS,
            Category::Basket => basket::TOOLS,
            Category::Budget => budget::TOOLS,
            Category::HotelInventory => hotel::TOOLS,
            Category::GenericProducts => product::TOOLS,
            Category::Orders => orders::TOOLS,
            Category::Packages => packages::TOOLS,
            Category::Users => users::TOOLS,
            Category::GeoSearch => geo::TOOLS,
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = value.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|category| category.slug() == wanted || category.label().to_ascii_lowercase() == wanted)
            .ok_or_else(|| {
                let known: Vec<&str> = Category::ALL.iter().map(|category| category.slug()).collect();
                format!("Unknown category '{}'. Known: {}", value, known.join(", "))
            })
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Static description of one tool.
#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub name: &'static str,
    pub endpoint: &'static str,
    pub category: Category,
    pub title: &'static str,
    pub description: &'static str,
    pub params: &'static [Param],
    /// Upstream top-level fields copied into `data`. Empty means every
    /// field except the `Response` block.
    pub results: &'static [&'static str],
    /// Relation enforced between top-level `date_from` and `date_to`.
    pub dates: Option<RangeRule>,
    pub shaper: Option<Shaper>,
    /// Alternate argument name accepted for the request language.
    pub language_alias: Option<&'static str>,
}

impl ToolSpec {
    pub const fn new(
        name: &'static str,
        endpoint: &'static str,
        category: Category,
        params: &'static [Param],
    ) -> Self {
        Self {
            name,
            endpoint,
            category,
            title: name,
            description: "",
            params,
            results: &[],
            dates: None,
            shaper: None,
            language_alias: None,
        }
    }

    pub const fn title(mut self, title: &'static str) -> Self {
        self.title = title;
        self
    }

    pub const fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub const fn results(mut self, results: &'static [&'static str]) -> Self {
        self.results = results;
        self
    }

    pub const fn dates(mut self, rule: RangeRule) -> Self {
        self.dates = Some(rule);
        self
    }

    pub const fn shaper(mut self, shaper: Shaper) -> Self {
        self.shaper = Some(shaper);
        self
    }

    pub const fn language_alias(mut self, alias: &'static str) -> Self {
        self.language_alias = Some(alias);
        self
    }
}

/// Every tool, in category order.
pub fn all() -> impl Iterator<Item = &'static ToolSpec> {
    Category::ALL.into_iter().flat_map(|category| category.tools().iter())
}

pub fn find(name: &str) -> Option<&'static ToolSpec> {
    all().find(|tool| tool.name == name)
}

/// Closest tool name to `name`, if any is reasonably close.
pub fn suggest(name: &str) -> Option<&'static str> {
    let wanted = name.trim().to_ascii_lowercase();
    all()
        .map(|tool| (tool.name, distance(&wanted, tool.name)))
        .filter(|(candidate, score)| *score <= 3 || (!wanted.is_empty() && candidate.contains(wanted.as_str())))
        .min_by_key(|(_, score)| *score)
        .map(|(candidate, _)| candidate)
}

/// Levenshtein distance over chars.
fn distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    for (i, ca) in a.chars().enumerate() {
        let mut current = vec![i + 1; b.len() + 1];
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != *cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        previous = current;
    }
    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_51_unique_tools() {
        let names: HashSet<&str> = all().map(|tool| tool.name).collect();
        assert_eq!(all().count(), 51);
        assert_eq!(names.len(), 51);
    }

    #[test]
    fn category_sizes() {
        let sizes: Vec<(Category, usize)> = Category::ALL
            .into_iter()
            .map(|category| (category, category.tools().len()))
            .collect();
        assert_eq!(
            sizes,
            vec![
                (Category::Authentication, 1),
                (Category::Basket, 9),
                (Category::Budget, 4),
                (Category::HotelInventory, 15),
                (Category::GenericProducts, 3),
                (Category::Orders, 13),
                (Category::Packages, 4),
                (Category::Users, 1),
                (Category::GeoSearch, 1),
            ]
        );
    }

    #[test]
    fn tools_know_their_category() {
        for category in Category::ALL {
            for tool in category.tools() {
                assert_eq!(tool.category, category, "{}", tool.name);
            }
        }
    }

    #[test]
    fn endpoints_follow_tool_names() {
        for tool in all() {
            assert!(tool.endpoint.starts_with('/') && tool.endpoint.ends_with("RQ"), "{}", tool.name);
            assert!(tool.name.ends_with("_rq"));
            assert!(!tool.description.is_empty(), "{}", tool.name);
        }
        assert_eq!(find("basket_unlock_rq").unwrap().endpoint, "/BasketUnLockRQ");
        assert_eq!(find("authenticator_rq").unwrap().endpoint, "/AuthenticatorRQ");
    }

    #[test]
    fn parameter_names_are_unique_per_tool() {
        for tool in all() {
            let names: HashSet<&str> = tool.params.iter().map(|param| param.name).collect();
            assert_eq!(names.len(), tool.params.len(), "{}", tool.name);
            assert!(!names.contains("language"), "{}", tool.name);
        }
    }

    #[test]
    fn suggestions() {
        assert_eq!(suggest("basket_sumary_rq"), Some("basket_summary_rq"));
        assert_eq!(suggest("zone_search"), Some("zone_search_rq"));
        assert_eq!(suggest("completely_unrelated_thing"), None);
    }

    #[test]
    fn categories_parse_from_slugs_and_labels() {
        assert_eq!("hotel".parse::<Category>().unwrap(), Category::HotelInventory);
        assert_eq!("Order Management".parse::<Category>().unwrap(), Category::Orders);
        assert!("spaceships".parse::<Category>().is_err());
    }
}
