//! Package tools.

use neobookings_core::validate::RangeRule;

use crate::catalog::{Category, ToolSpec};
use crate::param::{Format, Item, Param};

pub static TOOLS: &[ToolSpec] = &[
    ToolSpec::new("package_avail_rq", "/PackageAvailRQ", Category::Packages, PACKAGE_AVAIL)
        .title("Package Availability")
        .describe("Search and retrieve availability information for tourism packages.")
        .results(&[
            "CurrentPage",
            "TotalPages",
            "TotalRecords",
            "PackageDistribution",
            "HotelBasicDetail",
            "HotelRoomBasicDetail",
            "PackageDetail",
            "HotelRoomExtraDetail",
            "PackageAvail",
            "PackageNotAvail",
        ]),
    ToolSpec::new(
        "package_calendar_avail_rq",
        "/PackageCalendarAvailRQ",
        Category::Packages,
        PACKAGE_CALENDAR_AVAIL,
    )
    .title("Package Calendar Availability")
    .describe("Retrieve calendar availability information for tourism packages.")
    .results(&["PackageCalendarAvail"])
    .dates(RangeRule::NotBefore),
    ToolSpec::new("package_details_rq", "/PackageDetailsRQ", Category::Packages, PACKAGE_DETAILS)
        .title("Package Details")
        .describe("Retrieve detailed information about tourism packages.")
        .results(&["PackageDetail"]),
    ToolSpec::new(
        "package_extra_avail_rq",
        "/PackageExtraAvailRQ",
        Category::Packages,
        PACKAGE_EXTRA_AVAIL,
    )
    .title("Package Extra Availability")
    .describe(
        "Retrieve availability information for extra services associated with tourism packages.",
    )
    .results(&["PackageExtraAvail", "PackageExtraNotAvail"]),
];

const SORT_FIELDS: &[&str] = &["id", "hotelid", "roomid", "price", "quantity", "location", "order"];

const GUEST: &[Param] = &[
    Param::integer("age", "").required().min(0.0).max(120.0),
    Param::integer("amount", "").required().min(1.0).max(10.0),
];

const HOTEL_ROOM_DISTRIBUTION: &[Param] = &[
    Param::integer("hotel_room_rph", "Room reference number").required(),
    Param::string("date_from", "Check-in date (YYYY-MM-DD)").required().format(Format::Date),
    Param::string("date_to", "Check-out date (YYYY-MM-DD)").required().format(Format::Date),
    Param::records("guest", "Guest distribution by age", GUEST).required(),
];

const LOCATION_DATA: &[Param] = &[
    Param::string("latitude", ""),
    Param::string("longitude", ""),
    Param::string("response_unit", "").choices(&["km", "mt", "ml"]),
    Param::number("radio", "").min(0.0),
];

const FILTERS: &[Param] = &[
    Param::list(
        "reservation_mode",
        "Reservation modes to include",
        Item::string("").choices(&["room", "package", "product"]),
    ),
    Param::list("hotel_room_amenity_ids", "Required room amenities", Item::string(""))
        .wire("HotelRoomAmenityId"),
    Param::list("hotel_amenity_ids", "Required hotel amenities", Item::string(""))
        .wire("HotelAmenityId"),
    Param::object("location_data", "Geographic location filtering", LOCATION_DATA),
];

const CLIENT_LOCATION: &[Param] = &[
    Param::string("country", "").format(Format::Country),
    Param::string("ip", ""),
];

const PACKAGE_AVAIL: &[Param] = &[
    Param::records(
        "hotel_room_distribution",
        "Room and guest distribution details",
        HOTEL_ROOM_DISTRIBUTION,
    )
    .required()
    .min_items(1)
    .max_items(10),
    Param::list(
        "country",
        "Country codes to filter by (ISO 3166-1)",
        Item::string("").format(Format::Country),
    )
    .max_items(50),
    Param::list("zone", "Zone codes defined by Neobookings", Item::string("")).max_items(100),
    Param::list("hotel_ids", "Specific hotel IDs to search", Item::string(""))
        .wire("HotelId")
        .max_items(100),
    Param::list("hotel_room_ids", "Specific room IDs to include", Item::string(""))
        .wire("HotelRoomId")
        .max_items(100),
    Param::list("hotel_types", "Hotel types to filter by", Item::string(""))
        .wire("HotelType")
        .max_items(20),
    Param::list("hotel_categories", "Hotel categories to filter by", Item::string(""))
        .wire("HotelCategory")
        .max_items(20),
    Param::string("result_type", "Type of pricing result")
        .choices(&["besthotelprice", "liveprice"])
        .default_str("liveprice"),
    Param::string("order_by", "Sort results by").choices(SORT_FIELDS).default_str("price"),
    Param::string("order_type", "Sort direction").choices(&["asc", "desc"]).default_str("asc"),
    Param::integer("page", "Page number for pagination").min(1.0).default_int(1),
    Param::integer("num_results", "Number of results per page").min(1.0).max(100.0).default_int(20),
    Param::boolean("show_hotel_basic_detail", "Include basic hotel information").default_bool(true),
    Param::boolean("show_hotel_room_basic_detail", "Include basic room information")
        .default_bool(true),
    Param::boolean("show_hotel_room_extra_basic_detail", "Include room extra information")
        .default_bool(false),
    Param::boolean("show_package_not_availability", "Include packages not available")
        .default_bool(false),
    Param::boolean("show_package_detail", "Include detailed package information")
        .default_bool(true),
    Param::object("filters", "Additional filtering criteria", FILTERS),
    Param::string("promo_code", "Promotional code to apply").max_len(50),
    Param::boolean("rewards", "Include loyalty rewards").default_bool(false),
    Param::string("origin", "Booking origin identifier").max_len(100),
    Param::object("client_location", "Client location information", CLIENT_LOCATION),
    Param::string("client_device", "Client device type")
        .choices(&["desktop", "mobile", "tablet"])
        .default_str("desktop"),
];

const PACKAGE_CALENDAR_AVAIL: &[Param] = &[
    Param::string("date_from", "Start date for calendar range (YYYY-MM-DD)")
        .required()
        .format(Format::Date),
    Param::string("date_to", "End date for calendar range (YYYY-MM-DD)")
        .required()
        .format(Format::Date),
    Param::integer("adults", "Number of adults for pricing").required().min(1.0).max(20.0),
    Param::list("hotel_ids", "Specific hotel IDs to check", Item::string(""))
        .wire("HotelId")
        .max_items(100),
    Param::list("package_ids", "Specific package IDs to check", Item::string(""))
        .wire("PackageId")
        .max_items(100),
    Param::list("hotel_room_ids", "Specific room IDs to check", Item::string(""))
        .wire("HotelRoomId")
        .max_items(100),
];

const PACKAGE_DETAILS: &[Param] = &[
    Param::list("package_ids", "Specific package IDs to retrieve details for", Item::string(""))
        .wire("PackageId")
        .max_items(100),
    Param::list("hotel_ids", "Hotel IDs to get packages for", Item::string(""))
        .wire("HotelId")
        .max_items(100),
    Param::list("hotel_room_ids", "Room IDs to get packages for", Item::string(""))
        .wire("HotelRoomId")
        .max_items(100),
    Param::string("status", "Package status filter")
        .choices(&["enabled", "disabled", "all"])
        .default_str("enabled"),
];

const TRACKING: &[Param] = &[
    Param::string("origin", "Tracking origin")
        .required()
        .choices(&["googlehpa", "trivago", "trivagocpa", "tripadvisor"]),
    Param::string("code", "Tracking code").required(),
    Param::string("locale", "Tracking locale"),
];

const EXTRA_CLIENT_LOCATION: &[Param] = &[
    Param::string("country", "Country code (ISO 3166-1)").format(Format::Country),
    Param::string("ip", "Client IP address"),
];

const PACKAGE_EXTRA_AVAIL: &[Param] = &[
    Param::list(
        "package_availability_ids",
        "List of package availability IDs to check extras for",
        Item::string("").min_len(1).max_len(100),
    )
    .required()
    .wire("PackageAvailabilityId")
    .min_items(1)
    .max_items(50),
    Param::string("basket_id", "Basket ID for context if working with a booking session")
        .min_len(1)
        .max_len(100),
    Param::string("origin", "Booking origin identifier").max_len(100),
    Param::object("tracking", "Tracking information for the booking origin", TRACKING),
    Param::object(
        "client_location",
        "Client location information",
        EXTRA_CLIENT_LOCATION,
    ),
    Param::string("client_device", "Client device type")
        .choices(&["desktop", "mobile", "tablet"])
        .default_str("desktop"),
];
