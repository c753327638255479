//! Generic product tools: availability, details and extras.

use crate::catalog::{Category, ToolSpec};
use crate::param::{Format, Item, Param};

pub static TOOLS: &[ToolSpec] = &[
    ToolSpec::new(
        "generic_product_avail_rq",
        "/GenericProductAvailRQ",
        Category::GenericProducts,
        GENERIC_PRODUCT_AVAIL,
    )
    .title("Generic Product Availability")
    .describe("Search for availability of generic products with comprehensive filtering options.")
    .results(&[
        "CurrentPage",
        "TotalPages",
        "TotalRecords",
        "GenericProductDistribution",
        "HotelBasicDetail",
        "HotelRoomBasicDetail",
        "GenericProductDetail",
        "HotelRoomExtraDetail",
        "GenericProductAvail",
        "GenericProductNotAvail",
    ]),
    ToolSpec::new(
        "generic_product_details_rq",
        "/GenericProductDetailsRQ",
        Category::GenericProducts,
        GENERIC_PRODUCT_DETAILS,
    )
    .title("Generic Product Details")
    .describe("Retrieve detailed information about generic products in the system.")
    .results(&["GenericProductDetail"]),
    ToolSpec::new(
        "generic_product_extra_avail_rq",
        "/GenericProductExtraAvailRQ",
        Category::GenericProducts,
        GENERIC_PRODUCT_EXTRA_AVAIL,
    )
    .title("Generic Product Extra Availability")
    .describe("Search for availability of extras/supplements for generic products.")
    .results(&["GenericProductExtraAvail", "GenericProductExtraNotAvail"]),
];

const PRODUCT_TYPES: &[&str] = &[
    "accommodation", "simpleproduct", "extraproduct", "combinedproduct",
];

const SORT_FIELDS: &[&str] = &["id", "hotelid", "roomid", "price", "quantity", "location", "order"];

const GUEST_AGES: &[Param] = &[
    Param::integer("age", "Age of the guest").required().min(0.0).max(120.0),
    Param::integer("amount", "Number of guests of this age").required().min(1.0).max(20.0),
];

const PRODUCT_DISTRIBUTIONS: &[Param] = &[
    Param::integer("product_rph", "Reference number for the product")
        .required()
        .wire("GenericProductRPH")
        .min(1.0),
    Param::string("date_from", "Start date in YYYY-MM-DD format").format(Format::Date),
    Param::string("date_to", "End date in YYYY-MM-DD format").format(Format::Date),
    Param::string("specific_day", "Specific day in YYYY-MM-DD format (ignores date_from/date_to)")
        .format(Format::Date),
    Param::records("guests", "Guest specifications by age and quantity", GUEST_AGES)
        .required()
        .wire("Guest")
        .min_items(1)
        .max_items(10),
];

const GENERIC_PRODUCT_AVAIL: &[Param] = &[
    Param::list(
        "countries",
        "List of country codes (ISO 3166-1) to filter by",
        Item::string("Country code (e.g., 'ES', 'FR', 'IT')"),
    )
    .wire("Country")
    .max_items(10),
    Param::list(
        "zones",
        "List of zone codes defined by Neobookings",
        Item::string("Zone code (e.g., 'MAD', 'BCN', 'NYC')"),
    )
    .wire("Zone")
    .max_items(20),
    Param::list(
        "hotel_ids",
        "List of specific hotel IDs to search in",
        Item::string("Hotel identifier"),
    )
    .wire("HotelId")
    .max_items(50),
    Param::list(
        "hotel_room_ids",
        "List of specific hotel room IDs to search in",
        Item::string("Hotel room identifier"),
    )
    .wire("HotelRoomId")
    .max_items(100),
    Param::list(
        "hotel_types",
        "List of hotel types to filter by",
        Item::string("Hotel type identifier"),
    )
    .wire("HotelType")
    .max_items(10),
    Param::list(
        "hotel_categories",
        "List of hotel categories to filter by",
        Item::string("Hotel category (e.g., '3', '4', '5')"),
    )
    .wire("HotelCategory")
    .max_items(5),
    Param::records(
        "product_distributions",
        "Product distribution criteria with dates and guests",
        PRODUCT_DISTRIBUTIONS,
    )
    .required()
    .wire("GenericProductDistribution")
    .min_items(1)
    .max_items(10),
    Param::list(
        "product_types",
        "Filter by generic product types",
        Item::string("").choices(PRODUCT_TYPES),
    )
    .wire("GenericProductFilterBy.GenericProductType")
    .max_items(4),
    Param::list(
        "product_methods",
        "Filter by reservation methods",
        Item::string("").choices(&["withdates", "undated"]),
    )
    .wire("GenericProductFilterBy.GenericProductMethod")
    .max_items(2),
    Param::list(
        "reservation_modes",
        "Filter by reservation modes",
        Item::string("").choices(&["room", "package", "product"]),
    )
    .wire("GenericProductFilterBy.ReservationMode")
    .max_items(3),
    Param::string("result_type", "Type of pricing result to return")
        .choices(&["besthotelprice", "liveprice"])
        .default_str("liveprice"),
    Param::string("order_by", "Field to sort results by").choices(SORT_FIELDS).default_str("price"),
    Param::string("order_type", "Sort direction").choices(&["asc", "desc"]).default_str("asc"),
    Param::integer("page", "Page number for pagination (starts at 1)")
        .min(1.0)
        .max(1000.0)
        .default_int(1),
    Param::integer("num_results", "Number of results per page").min(1.0).max(100.0).default_int(25),
    Param::boolean("show_hotel_details", "Include hotel basic information in results")
        .wire("ShowHotelBasicDetail")
        .default_bool(true),
    Param::boolean("show_room_details", "Include room basic information in results")
        .wire("ShowHotelRoomBasicDetail")
        .default_bool(true),
    Param::boolean("show_extra_details", "Include extra basic information in results")
        .wire("ShowHotelRoomExtraBasicDetail")
        .default_bool(false),
    Param::boolean("show_not_available", "Include products that are not available")
        .wire("ShowGenericProductNotAvailability")
        .default_bool(false),
    Param::boolean("show_product_details", "Include detailed product information")
        .wire("ShowGenericProductDetail")
        .default_bool(true),
    Param::string("promo_code", "Promotional code to apply for special pricing").max_len(50),
    Param::boolean("rewards", "Include rewards/loyalty program pricing").default_bool(false),
    Param::string("origin", "Origin of the reservation for tracking").max_len(100),
    Param::string("client_country", "Country code of the client")
        .wire("ClientLocation.Country")
        .max_len(2),
    Param::string("client_ip", "IP address of the client").wire("ClientLocation.Ip").max_len(45),
    Param::string("client_device", "Type of client device")
        .choices(&["desktop", "mobile", "tablet"]),
];

const GENERIC_PRODUCT_DETAILS: &[Param] = &[
    Param::list(
        "product_ids",
        "List of specific generic product IDs to retrieve details for",
        Item::string("Generic product identifier"),
    )
    .wire("GenericProductId")
    .max_items(50),
    Param::list(
        "hotel_ids",
        "List of hotel IDs to filter products by",
        Item::string("Hotel identifier"),
    )
    .wire("HotelId")
    .max_items(20),
    Param::list(
        "hotel_room_ids",
        "List of hotel room IDs to filter products by",
        Item::string("Hotel room identifier"),
    )
    .wire("HotelRoomId")
    .max_items(100),
    Param::string("status", "Filter products by their status")
        .choices(&["enabled", "disabled", "all"])
        .default_str("enabled"),
];

const GENERIC_PRODUCT_EXTRA_AVAIL: &[Param] = &[
    Param::list(
        "product_availability_ids",
        "List of generic product availability IDs to search extras for",
        Item::string("Generic product availability identifier"),
    )
    .required()
    .wire("GenericProductAvailabilityId")
    .min_items(1)
    .max_items(50),
    Param::string("basket_id", "Basket ID for context and pricing calculations").max_len(100),
    Param::string("origin", "Origin of the reservation for tracking purposes").max_len(100),
    Param::string("client_country", "Country code of the client")
        .wire("ClientLocation.Country")
        .max_len(2),
    Param::string("client_ip", "IP address of the client").wire("ClientLocation.Ip").max_len(45),
    Param::string("client_device", "Type of client device")
        .choices(&["desktop", "mobile", "tablet"]),
];
