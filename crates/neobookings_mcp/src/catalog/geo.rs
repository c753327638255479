//! Geographic search.

use crate::catalog::{Category, ToolSpec};
use crate::param::Param;

pub static TOOLS: &[ToolSpec] = &[
    ToolSpec::new("zone_search_rq", "/ZoneSearchRQ", Category::GeoSearch, ZONE_SEARCH)
        .title("Zone Search")
        .describe("Search and retrieve geographic zones available in the Neobookings system.")
        .results(&["ZoneDetail"]),
];

const ZONE_SEARCH: &[Param] = &[
    Param::string("order_by", "Sort order for the results")
        .choices(&["order", "alphabetical"])
        .default_str("order"),
    Param::string("order_type", "Sort direction").choices(&["asc", "desc"]).default_str("asc"),
];
