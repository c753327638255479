//! Hotel and inventory tools.
//!
//! Read tools cover hotels, rooms, boards, rates, offers and extras; write
//! tools update inventory and prices.

use neobookings_core::validate::RangeRule;

use crate::catalog::{Category, ToolSpec};
use crate::param::{Format, Item, Param};
use crate::shape;

pub static TOOLS: &[ToolSpec] = &[
    ToolSpec::new(
        "chain_info_list_details_rq",
        "/ChainInfoListDetailsRQ",
        Category::HotelInventory,
        CHAIN_INFO_LIST_DETAILS,
    )
    .title("Hotel Chain Information")
    .describe("Retrieve detailed information about hotel chains and their associated hotels.")
    .results(&["ChainInfoListDetail", "HotelChainInfoListDetail"]),
    ToolSpec::new(
        "hotel_board_details_rq",
        "/HotelBoardDetailsRQ",
        Category::HotelInventory,
        HOTEL_BOARD_DETAILS,
    )
    .title("Hotel Board Details")
    .describe(
        "Retrieve detailed information about hotel board types (meal plans) from specific hotels.",
    )
    .results(&["HotelBoardDetail"]),
    ToolSpec::new(
        "hotel_calendar_avail_rq",
        "/HotelCalendarAvailRQ",
        Category::HotelInventory,
        HOTEL_CALENDAR_AVAIL,
    )
    .title("Hotel Calendar Availability")
    .describe("Retrieve hotel room availability calendar for a specified date range.")
    .results(&["HotelCalendarAvail"])
    .dates(RangeRule::NotBefore)
    .shaper(shape::visible_only),
    ToolSpec::new("hotel_details_rq", "/HotelDetailsRQ", Category::HotelInventory, HOTEL_DETAILS)
        .title("Hotel Details")
        .describe("Retrieve comprehensive detailed information about specific hotels.")
        .results(&["HotelDetail"]),
    ToolSpec::new(
        "hotel_info_list_details_rq",
        "/HotelInfoListDetailsRQ",
        Category::HotelInventory,
        HOTEL_INFO_LIST_DETAILS,
    )
    .title("Hotel Information Lists")
    .describe("Retrieve comprehensive lists of hotels and all their associated components.")
    .results(&[
        "HotelInfoListDetail",
        "RoomInfoListDetail",
        "PackageInfoListDetail",
        "GenericProductInfoListDetail",
        "RateInfoListDetail",
        "BoardInfoListDetail",
        "OfferInfoListDetail",
        "ExtraInfoListDetail",
    ]),
    ToolSpec::new(
        "hotel_inventory_read_rq",
        "/HotelInventoryReadRQ",
        Category::HotelInventory,
        HOTEL_INVENTORY_READ,
    )
    .title("Hotel Inventory")
    .describe("Retrieve comprehensive inventory information for hotel rooms within a date range.")
    .results(&["HotelInventory"])
    .dates(RangeRule::NotBefore),
    ToolSpec::new(
        "hotel_inventory_update_rq",
        "/HotelInventoryUpdateRQ",
        Category::HotelInventory,
        HOTEL_INVENTORY_UPDATE,
    )
    .title("Hotel Inventory Update")
    .describe(
        "Update hotel room inventory information including availability, quotas, and restrictions.",
    )
    .results(&["Success"]),
    ToolSpec::new(
        "hotel_offer_details_rq",
        "/HotelOfferDetailsRQ",
        Category::HotelInventory,
        HOTEL_OFFER_DETAILS,
    )
    .title("Hotel Offer Details")
    .describe(
        "Retrieve comprehensive information about hotel offers, promotions, and special deals.",
    )
    .results(&["HotelOfferDetail"]),
    ToolSpec::new(
        "hotel_price_update_rq",
        "/HotelPriceUpdateRQ",
        Category::HotelInventory,
        HOTEL_PRICE_UPDATE,
    )
    .title("Hotel Price Update")
    .describe(
        "Update hotel room pricing information for specific date ranges and occupancy scenarios.",
    )
    .results(&["Success"])
    .shaper(shape::pricing_modes),
    ToolSpec::new(
        "hotel_rate_details_rq",
        "/HotelRateDetailsRQ",
        Category::HotelInventory,
        HOTEL_RATE_DETAILS,
    )
    .title("Hotel Rate Details")
    .describe("Retrieve comprehensive information about hotel rates and pricing structures.")
    .results(&["HotelRateDetail"]),
    ToolSpec::new(
        "hotel_room_avail_rq",
        "/HotelRoomAvailRQ",
        Category::HotelInventory,
        HOTEL_ROOM_AVAIL,
    )
    .title("Hotel Room Availability")
    .describe("Search for hotel room availability based on dates, guests, and criteria.")
    .results(&[
        "CurrentPage",
        "TotalPages",
        "TotalRecords",
        "TotalGroups",
        "HotelRoomDistribution",
        "HotelBasicDetail",
        "HotelRoomBasicDetail",
        "HotelRoomAvail",
        "HotelRoomNotAvail",
    ])
    .dates(RangeRule::StrictlyAfter)
    .shaper(shape::room_distribution),
    ToolSpec::new(
        "hotel_room_details_rq",
        "/HotelRoomDetailsRQ",
        Category::HotelInventory,
        HOTEL_ROOM_DETAILS,
    )
    .title("Hotel Room Details")
    .describe("Retrieve comprehensive detailed information about specific hotel rooms.")
    .results(&["HotelRoomDetail"]),
    ToolSpec::new(
        "hotel_room_extra_avail_rq",
        "/HotelRoomExtraAvailRQ",
        Category::HotelInventory,
        HOTEL_ROOM_EXTRA_AVAIL,
    )
    .title("Hotel Room Extra Availability")
    .describe("Retrieve availability information for hotel room extras and supplements.")
    .results(&["HotelRoomExtraAvail", "HotelRoomExtraNotAvail"]),
    ToolSpec::new(
        "hotel_room_extra_details_rq",
        "/HotelRoomExtraDetailsRQ",
        Category::HotelInventory,
        HOTEL_ROOM_EXTRA_DETAILS,
    )
    .title("Hotel Room Extra Details")
    .describe("Retrieve comprehensive detailed information about specific hotel room extras.")
    .results(&["HotelRoomExtraDetail"]),
    ToolSpec::new("hotel_search_rq", "/HotelSearchRQ", Category::HotelInventory, HOTEL_SEARCH)
        .title("Hotel Search")
        .describe("Search for hotels based on various criteria and filters.")
        .results(&["HotelBasicDetail", "CurrentPage", "TotalPages", "TotalRecords"]),
];

const SORT_FIELDS: &[&str] = &["id", "hotelid", "roomid", "price", "quantity", "location", "order"];

const CHAIN_INFO_LIST_DETAILS: &[Param] = &[];

const HOTEL_BOARD_DETAILS: &[Param] = &[
    Param::list(
        "hotel_ids",
        "List of hotel identifiers to filter by",
        Item::string("Hotel identifier"),
    )
    .wire("HotelId")
    .max_items(50),
    Param::list(
        "board_ids",
        "List of board identifiers to filter by",
        Item::string("Board identifier"),
    )
    .wire("BoardId")
    .max_items(50),
];

const HOTEL_CALENDAR_AVAIL: &[Param] = &[
    Param::string("date_from", "Start date in YYYY-MM-DD format").required().format(Format::Date),
    Param::string("date_to", "End date in YYYY-MM-DD format").required().format(Format::Date),
    Param::integer("adults", "Number of adults for the search").required().min(1.0).max(20.0),
    Param::list(
        "hotel_ids",
        "List of hotel identifiers to filter by",
        Item::string("Hotel identifier"),
    )
    .wire("HotelId")
    .max_items(50),
    Param::list(
        "room_ids",
        "List of room identifiers to filter by",
        Item::string("Room identifier"),
    )
    .wire("HotelRoomId")
    .max_items(50),
    Param::string("calendar_type", "Type of calendar view")
        .choices(&["normal", "merge"])
        .default_str("normal"),
];

const HOTEL_DETAILS: &[Param] = &[
    Param::list(
        "hotel_ids",
        "List of hotel identifiers to get details for",
        Item::string("Hotel identifier"),
    )
    .required()
    .wire("HotelId")
    .min_items(1)
    .max_items(20),
];

const HOTEL_INFO_LIST_DETAILS: &[Param] = &[
    Param::list(
        "hotel_ids",
        "List of hotel identifiers to filter by",
        Item::string("Hotel identifier"),
    )
    .wire("HotelId")
    .max_items(100),
    Param::boolean("show_hidden", "Include hidden items in the results").default_bool(false),
    Param::boolean("show_disabled", "Include disabled items in the results").default_bool(false),
];

const HOTEL_INVENTORY_READ: &[Param] = &[
    Param::list(
        "hotel_ids",
        "List of hotel identifiers to get inventory for (optional - if not provided, returns for all accessible hotels)",
        Item::string("Hotel identifier"),
    )
    .wire("HotelId")
    .max_items(50),
    Param::string("date_from", "Start date for inventory period in YYYY-MM-DD format")
        .required()
        .format(Format::Date),
    Param::string("date_to", "End date for inventory period in YYYY-MM-DD format")
        .required()
        .format(Format::Date),
];

const PARTNER: &[Param] = &[
    Param::boolean("use_partner_mapping", "Whether to use partner ID mapping").required(),
    Param::string("partner_mapping_name", "Name of the partner mapping to use"),
];

const RESTRICTIONS: &[Param] = &[
    Param::integer("release", "Maximum release days (advance booking requirement)")
        .min(0.0)
        .max(365.0),
    Param::integer("min_stay", "Minimum stay requirement in nights").min(1.0).max(90.0),
    Param::integer("max_stay", "Maximum stay limit in nights").min(1.0).max(365.0),
    Param::boolean("closed", "Whether sales are closed (stop sale)"),
    Param::boolean("closed_on_arrival", "Whether arrivals are closed"),
    Param::boolean("closed_on_departure", "Whether departures are closed"),
];

const INVENTORY_UPDATES: &[Param] = &[
    Param::string("hotel_id", "Hotel identifier").required(),
    Param::string("room_id", "Room identifier").required(),
    Param::string("date_from", "Start date for update period in YYYY-MM-DD format")
        .required()
        .format(Format::Date),
    Param::string("date_to", "End date for update period in YYYY-MM-DD format")
        .required()
        .format(Format::Date),
    Param::object("partner", "Partner mapping configuration", PARTNER).required(),
    Param::integer("availability", "Room availability count").wire("Avail").min(0.0).max(999.0),
    Param::object("restrictions", "Stay and booking restrictions", RESTRICTIONS)
        .wire("Restriction"),
    Param::string("rate_id", "Specific rate identifier (optional)"),
    Param::string("board_id", "Specific board identifier (optional)"),
];

const HOTEL_INVENTORY_UPDATE: &[Param] = &[
    Param::records(
        "inventory_updates",
        "List of inventory update operations to perform",
        INVENTORY_UPDATES,
    )
    .required()
    .wire("InventoryUpdate")
    .min_items(1)
    .max_items(100),
];

const CLIENT_LOCATION: &[Param] = &[
    Param::string("country", "Client country code"),
    Param::string("ip", "Client IP address"),
];

const FILTERS: &[Param] = &[
    Param::list("promo_codes", "Filter by promotional codes", Item::string("")).wire("PromoCode"),
    Param::list(
        "exclude_offer_types",
        "Exclude specific offer types",
        Item::string("").choices(&["promocode", "callout", "notice", "supplement", "discount"]),
    )
    .wire("ExcludeOfferType"),
    Param::object("client_location", "Client location filtering", CLIENT_LOCATION),
    Param::string("client_device", "Client device type").choices(&["desktop", "mobile", "tablet"]),
];

const HOTEL_OFFER_DETAILS: &[Param] = &[
    Param::list(
        "hotel_ids",
        "List of hotel identifiers to get offers for (optional)",
        Item::string("Hotel identifier"),
    )
    .wire("HotelId")
    .max_items(50),
    Param::list(
        "offer_ids",
        "List of specific offer identifiers to retrieve (optional)",
        Item::string("Offer identifier"),
    )
    .wire("OfferId")
    .max_items(100),
    Param::object("filters", "Additional filtering options", FILTERS).wire("FilterBy"),
];

const PRICE_UPDATES: &[Param] = &[
    Param::string("hotel_id", "Hotel identifier").required(),
    Param::string("room_id", "Room identifier").required(),
    Param::string("date_from", "Start date for update period in YYYY-MM-DD format")
        .required()
        .format(Format::Date),
    Param::string("date_to", "End date for update period in YYYY-MM-DD format")
        .required()
        .format(Format::Date),
    Param::string("mode", "Pricing mode")
        .required()
        .choices(&["pax", "occupancy", "accommodation"]),
    Param::object("partner", "Partner mapping configuration", PARTNER).required(),
    Param::map("pricing_data", "Pricing information based on the selected mode").required(),
    Param::string("rate_id", "Specific rate identifier (optional)"),
    Param::string("board_id", "Specific board identifier (optional)"),
];

const HOTEL_PRICE_UPDATE: &[Param] = &[
    Param::records("price_updates", "List of price update operations to perform", PRICE_UPDATES)
        .required()
        .wire("PriceUpdate")
        .min_items(1)
        .max_items(100),
];

const RATE_FILTERS: &[Param] = &[
    Param::list("promo_codes", "Filter by promotional codes", Item::string("")).wire("PromoCode"),
];

const HOTEL_RATE_DETAILS: &[Param] = &[
    Param::list(
        "hotel_ids",
        "List of hotel identifiers to get rates for (optional)",
        Item::string("Hotel identifier"),
    )
    .wire("HotelId")
    .max_items(50),
    Param::list(
        "rate_ids",
        "List of specific rate identifiers to retrieve (optional)",
        Item::string("Rate identifier"),
    )
    .wire("RateId")
    .max_items(100),
    Param::object("filters", "Additional filtering options", RATE_FILTERS)
        .wire("FilterBy"),
];

const GUEST_AGES: &[Param] = &[
    Param::integer("age", "Guest age").required().min(0.0).max(120.0),
    Param::integer("amount", "Number of guests of this age").required().min(1.0).max(10.0),
];

const ROOM_DISTRIBUTION: &[Param] = &[
    Param::integer("room_number", "Room reference number").required().wire("HotelRoomRPH").min(1.0),
    Param::records("guests", "Guests in this room", GUEST_AGES).required().wire("Guest"),
];

const HOTEL_ROOM_AVAIL: &[Param] = &[
    Param::string("date_from", "Check-in date in YYYY-MM-DD format")
        .required()
        .format(Format::Date),
    Param::string("date_to", "Check-out date in YYYY-MM-DD format").required().format(Format::Date),
    Param::records("guests", "Guest distribution per room", ROOM_DISTRIBUTION)
        .required()
        .wire("HotelRoomDistribution")
        .min_items(1)
        .max_items(10),
    Param::list("hotel_ids", "Specific hotel IDs to search", Item::string(""))
        .wire("HotelId")
        .max_items(50),
    Param::list("room_ids", "Specific room IDs to search", Item::string(""))
        .wire("HotelRoomId")
        .max_items(100),
    Param::list(
        "countries",
        "Country codes to filter (ISO 3166-1)",
        Item::string("").min_len(2).max_len(2),
    )
    .wire("Country")
    .max_items(20),
    Param::list("zones", "Zone codes to filter", Item::string("")).wire("Zone").max_items(50),
    Param::boolean("show_details", "Include detailed hotel and room information")
        .wire("ShowHotelBasicDetail")
        .default_bool(true),
    Param::string("result_type", "Type of results to return")
        .choices(&["besthotelprice", "liveprice"])
        .default_str("liveprice"),
    Param::string("order_by", "Sort results by criteria").choices(SORT_FIELDS).default_str("price"),
    Param::string("order_type", "Sort order").choices(&["asc", "desc"]).default_str("asc"),
    Param::integer("page", "Page number for pagination").min(1.0).default_int(1),
    Param::integer("num_results", "Number of results per page").min(1.0).max(100.0).default_int(20),
    Param::string("promo_code", "Promotional code to apply"),
    Param::boolean("rewards", "Apply loyalty rewards").default_bool(false),
];

const HOTEL_ROOM_DETAILS: &[Param] = &[
    Param::list(
        "hotel_ids",
        "List of hotel identifiers to get room details for",
        Item::string("Hotel identifier"),
    )
    .wire("HotelId")
    .max_items(20),
    Param::list(
        "room_ids",
        "List of room identifiers to get details for",
        Item::string("Room identifier"),
    )
    .wire("HotelRoomId")
    .max_items(50),
];

const HOTEL_ROOM_EXTRA_AVAIL: &[Param] = &[
    Param::list(
        "room_availability_ids",
        "List of room availability IDs to get extras for",
        Item::string("Room availability identifier"),
    )
    .required()
    .wire("HotelRoomAvailabilityId")
    .min_items(1)
    .max_items(50),
    Param::string("basket_id", "Basket ID for context"),
    Param::string("origin", "Origin of the request"),
    Param::object("client_location", "Client location information", CLIENT_LOCATION),
    Param::string("client_device", "Client device type")
        .choices(&["desktop", "mobile", "tablet"])
        .default_str("desktop"),
];

const HOTEL_ROOM_EXTRA_DETAILS: &[Param] = &[
    Param::list(
        "hotel_ids",
        "List of hotel identifiers to get room extras for",
        Item::string("Hotel identifier"),
    )
    .wire("HotelId")
    .max_items(20),
    Param::list(
        "room_ids",
        "List of room identifiers to get extras for",
        Item::string("Room identifier"),
    )
    .wire("HotelRoomId")
    .max_items(50),
    Param::list(
        "extra_ids",
        "List of extra identifiers to get details for",
        Item::string("Extra identifier"),
    )
    .wire("HotelRoomExtraId")
    .max_items(100),
];

const HOTEL_SEARCH: &[Param] = &[
    Param::list(
        "hotel_names",
        "List of hotel names to search for (partial matches allowed)",
        Item::string("Hotel name or partial name"),
    )
    .wire("HotelName")
    .max_items(10),
    Param::list(
        "countries",
        "List of country codes (ISO 3166-1) to filter by",
        Item::string("Country code (e.g., 'ES' for Spain, 'FR' for France)"),
    )
    .wire("Country")
    .max_items(10),
    Param::list(
        "zones",
        "List of zone codes defined by Neobookings to filter by",
        Item::string("Zone code (e.g., 'MAD' for Madrid, 'BCN' for Barcelona)"),
    )
    .wire("Zone")
    .max_items(20),
    Param::list(
        "hotel_categories",
        "List of minimum hotel category levels to filter by",
        Item::string("Hotel category (e.g., '3', '4', '5')"),
    )
    .wire("HotelCategory")
    .max_items(5),
    Param::integer("page", "Page number for pagination (starts at 1)")
        .min(1.0)
        .max(1000.0)
        .default_int(1),
    Param::integer("num_results", "Number of results per page").min(1.0).max(100.0).default_int(25),
];
