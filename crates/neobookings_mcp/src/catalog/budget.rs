//! Budget tools.

use neobookings_core::validate::RangeRule;

use crate::catalog::{Category, ToolSpec};
use crate::param::{Format, Item, Param};

pub static TOOLS: &[ToolSpec] = &[
    ToolSpec::new("budget_delete_rq", "/BudgetDeleteRQ", Category::Budget, BUDGET_DELETE)
        .title("Budget Deletion")
        .describe("Delete one or more budgets from the Neobookings system."),
    ToolSpec::new("budget_details_rq", "/BudgetDetailsRQ", Category::Budget, BUDGET_DETAILS)
        .title("Budget Details")
        .describe(
            "Retrieve detailed information about one or more budgets from the Neobookings system.",
        )
        .results(&["BudgetDetails"]),
    ToolSpec::new(
        "budget_properties_update_rq",
        "/BudgetPropertiesUpdateRQ",
        Category::Budget,
        BUDGET_PROPERTIES_UPDATE,
    )
    .title("Budget Properties Update")
    .describe("Update properties of a budget in the Neobookings system.")
    .results(&["BudgetDetails"]),
    ToolSpec::new("budget_search_rq", "/BudgetSearchRQ", Category::Budget, BUDGET_SEARCH)
        .title("Budget Search")
        .describe(
            "Search for budgets in the Neobookings system with various filters and sorting options.",
        )
        .results(&["BudgetBasicDetail", "CurrentPage", "TotalPages", "TotalRecords"])
        .dates(RangeRule::NotBefore),
];

const SORT_FIELDS: &[&str] = &[
    "id", "hotelid", "name", "price", "creationdate", "lastupdate", "arrivaldate", "departuredate",
    "status", "user",
];

const BUDGET_DELETE: &[Param] = &[
    Param::list(
        "budget_ids",
        "List of budget identifiers to delete",
        Item::string("Budget identifier"),
    )
    .required()
    .wire("BudgetId")
    .min_items(1)
    .max_items(50),
];

const BUDGET_DETAILS: &[Param] = &[
    Param::list(
        "budget_ids",
        "List of budget identifiers to retrieve details for",
        Item::string("Budget identifier"),
    )
    .required()
    .wire("BudgetId")
    .min_items(1)
    .max_items(20),
];

const BUDGET_PROPERTIES_UPDATE: &[Param] = &[
    Param::string("budget_id", "Budget identifier to update").required(),
    Param::string("sent_date", "Date when budget was sent (YYYY-MM-DDThh:mm:ss format)")
        .format(Format::DateTime),
    Param::string("copied_date", "Date when budget was copied (YYYY-MM-DDThh:mm:ss format)")
        .format(Format::DateTime),
    Param::boolean("clear_sent_date", "Clear the sent date").default_bool(false),
    Param::boolean("clear_copied_date", "Clear the copied date").default_bool(false),
];

const PHONE: &[Param] = &[
    Param::string("prefix", "Phone prefix").required(),
    Param::string("number", "Phone number").required(),
];

const CLIENT: &[Param] = &[
    Param::string("email", "Customer email filter"),
    Param::object("phone", "Phone number filter", PHONE),
];

const FILTER_BY: &[Param] = &[
    Param::string("name", "Filter by customer name"),
    Param::string("surname", "Filter by customer surname"),
    Param::string("country", "Filter by customer country"),
    Param::string("document", "Filter by customer document/passport"),
    Param::string("address", "Filter by customer address"),
    Param::object("client", "Client contact information filter", CLIENT),
    Param::string("user", "Filter by user who created the budget"),
    Param::list(
        "status",
        "Filter by budget status",
        Item::string("").choices(&["deleted", "expired", "booked", "pending"]),
    ),
];

const BUDGET_SEARCH: &[Param] = &[
    Param::list(
        "budget_ids",
        "List of specific budget IDs to search for",
        Item::string("Budget identifier"),
    )
    .wire("BudgetId")
    .max_items(50),
    Param::list("hotel_ids", "List of hotel IDs to filter by", Item::string("Hotel identifier"))
        .wire("HotelId")
        .max_items(20),
    Param::string("date_from", "Start date for filtering (YYYY-MM-DD format)").format(Format::Date),
    Param::string("date_to", "End date for filtering (YYYY-MM-DD format)").format(Format::Date),
    Param::string("date_by", "Date field to filter by")
        .choices(&["creationdate", "lastupdate"])
        .default_str("creationdate"),
    Param::object("filter_by", "Additional filters for budget search", FILTER_BY),
    Param::integer("page", "Page number for pagination").min(1.0).default_int(1),
    Param::integer("num_results", "Number of results per page").min(1.0).max(100.0).default_int(10),
    Param::string("order_by", "Field to order results by").required().choices(SORT_FIELDS),
    Param::string("order_type", "Sort order for results").required().choices(&["asc", "desc"]),
];
