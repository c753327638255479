//! Basket tools: create, fill, price, lock and confirm shopping baskets.

use crate::catalog::{Category, ToolSpec};
use crate::param::{Format, Item, Param};

pub static TOOLS: &[ToolSpec] = &[
    ToolSpec::new(
        "basket_add_product_rq",
        "/BasketAddProductRQ",
        Category::Basket,
        BASKET_ADD_PRODUCT,
    )
    .title("Add Products to Basket")
    .describe("Add products to an existing shopping basket in the Neobookings system.")
    .results(&["BasketDetail"]),
    ToolSpec::new("basket_confirm_rq", "/BasketConfirmRQ", Category::Basket, BASKET_CONFIRM)
        .title("Basket Confirmation")
        .describe("Confirm a shopping basket and create a reservation in the Neobookings system.")
        .results(&["OrderId", "BudgetId", "RequestorId"]),
    ToolSpec::new("basket_create_rq", "/BasketCreateRQ", Category::Basket, BASKET_CREATE)
        .title("Basket Creation")
        .describe("Create a new shopping basket in the Neobookings system.")
        .results(&["BasketInfo"]),
    ToolSpec::new(
        "basket_del_product_rq",
        "/BasketDelProductRQ",
        Category::Basket,
        BASKET_DEL_PRODUCT,
    )
    .title("Remove Products from Basket")
    .describe("Remove products from an existing shopping basket in the Neobookings system.")
    .results(&["BasketDetail"]),
    ToolSpec::new("basket_delete_rq", "/BasketDeleteRQ", Category::Basket, BASKET_DELETE)
        .title("Basket Deletion")
        .describe("Delete a shopping basket completely from the Neobookings system.")
        .results(&["BasketDetail"]),
    ToolSpec::new("basket_lock_rq", "/BasketLockRQ", Category::Basket, BASKET_LOCK)
        .title("Basket Lock")
        .describe("Lock a shopping basket in the Neobookings system to prevent modifications.")
        .results(&["BasketDetail", "HotelRoomConfirmInfo"]),
    ToolSpec::new(
        "basket_properties_update_rq",
        "/BasketPropertiesUpdateRQ",
        Category::Basket,
        BASKET_PROPERTIES_UPDATE,
    )
    .title("Basket Properties Update")
    .describe("Update properties of a shopping basket in the Neobookings system."),
    ToolSpec::new("basket_summary_rq", "/BasketSummaryRQ", Category::Basket, BASKET_SUMMARY)
        .title("Basket Summary")
        .describe("Retrieve a detailed summary of a shopping basket from the Neobookings system.")
        .results(&[
            "BasketDetail",
            "AmountsDetail",
            "HotelRoomSummaryDetail",
            "HotelGuestSummaryDetail",
            "HotelBoardSummaryDetail",
            "HotelRateSummaryDetail",
            "HotelOfferSummaryDetail",
            "HotelExtraSummaryDetail",
            "BookingCancelPenalty",
            "ScheduledPayment",
            "PackageSummaryDetail",
            "GenericProductSummaryDetail",
        ]),
    ToolSpec::new("basket_unlock_rq", "/BasketUnLockRQ", Category::Basket, BASKET_UNLOCK)
        .title("Basket Unlock")
        .describe("Unlock a previously locked shopping basket in the Neobookings system.")
        .results(&["BasketDetail"]),
];

const PRODUCTS_TO_ADD: &[Param] = &[
    Param::string("availability_id", "Availability identifier").required().min_len(1),
    Param::number("quantity", "Quantity of products to add").required().min(1.0),
];

const BASKET_ADD_PRODUCT: &[Param] = &[
    Param::string("basket_id", "Identifier of the basket to add products to").required().min_len(1),
    Param::list(
        "hotel_room_availability_ids",
        "List of hotel room availability identifiers",
        Item::string("").min_len(1),
    )
    .wire("HotelRoomAvailabilityId"),
    Param::list(
        "hotel_room_extra_availability_ids",
        "List of hotel room extra availability identifiers",
        Item::string("").min_len(1),
    )
    .wire("HotelRoomExtraAvailabilityId"),
    Param::list(
        "package_availability_ids",
        "List of package availability identifiers",
        Item::string("").min_len(1),
    )
    .wire("PackageAvailabilityId"),
    Param::list(
        "package_extra_availability_ids",
        "List of package extra availability identifiers",
        Item::string("").min_len(1),
    )
    .wire("PackageExtraAvailabilityId"),
    Param::records(
        "generic_product_availabilities",
        "List of generic product availability objects",
        PRODUCTS_TO_ADD,
    )
    .wire("GenericProductAvailability"),
    Param::records(
        "generic_product_extra_availabilities",
        "List of generic product extra availability objects",
        PRODUCTS_TO_ADD,
    )
    .wire("GenericProductExtraAvailability"),
];

const CUSTOMER_DATA: &[Param] = &[
    Param::string("firstname", ""),
    Param::string("lastname", ""),
    Param::string("passport", ""),
    Param::string("email", "").format(Format::Email),
    Param::string("address", ""),
    Param::string("city", ""),
    Param::string("postcode", ""),
    Param::string("country", ""),
    Param::string("state", ""),
    Param::string("phone", ""),
    Param::string("arrival_time", ""),
    Param::string("special_requests", ""),
];

const BILLING_DATA: &[Param] = &[
    Param::string("fiscal_name", ""),
    Param::string("fiscal_id", ""),
    Param::string("fiscal_address", ""),
    Param::string("postal_code", ""),
    Param::string("city", ""),
    Param::string("country", ""),
];

const GUEST_DATA: &[Param] = &[
    Param::number("guest_rph", "").required(),
    Param::string("firstname", ""),
    Param::string("lastname", ""),
    Param::string("birthdate", "").format(Format::Date),
    Param::string("passport", ""),
    Param::string("email", "").format(Format::Email),
];

const AUTHORIZATION_DATA: &[Param] = &[
    Param::boolean("rewards", ""),
    Param::boolean("offers", ""),
];

const CARD: &[Param] = &[
    Param::string("holder_name", ""),
    Param::string("number", "").required(),
    Param::string("code", ""),
    Param::number("expire_date_month", "").required(),
    Param::number("expire_date_year", "").required(),
];

const PAYMENT_METHOD: &[Param] = &[
    Param::boolean("pos", ""),
    Param::boolean("transfer", ""),
    Param::boolean("paypal", ""),
    Param::boolean("financed", ""),
    Param::boolean("open_to_buy", ""),
    Param::boolean("credit_card", ""),
    Param::object("card", "", CARD),
];

const PAYMENT_TYPE: &[Param] = &[
    Param::boolean("deposit", "").required(),
    Param::boolean("establishment", ""),
];

const PAYMENT_PLAN: &[Param] = &[
    Param::string("payment_plan_id", "").required(),
];

const HOTEL_ROOM_CONFIRM_DATA: &[Param] = &[
    Param::number("hotel_room_rph", "Room reference number").required(),
    Param::object("customer_data", "Customer/holder information", CUSTOMER_DATA),
    Param::object("billing_data", "Billing information", BILLING_DATA),
    Param::records("guest_data", "Guest information for the room", GUEST_DATA).required(),
    Param::object("authorization_data", "Authorization preferences", AUTHORIZATION_DATA),
    Param::object("payment_method", "Payment method information", PAYMENT_METHOD),
    Param::object("payment_type", "Payment type configuration", PAYMENT_TYPE),
    Param::object("payment_plan", "Payment plan information", PAYMENT_PLAN),
];

const GIFT_DATA: &[Param] = &[
    Param::string("firstname", ""),
    Param::string("surname", ""),
    Param::string("email", "").format(Format::Email),
    Param::string("message", ""),
    Param::boolean("anonymous", ""),
    Param::string("gift_notification_date", "").format(Format::DateTime),
];

const BASKET_CONFIRM: &[Param] = &[
    Param::string("basket_id", "Identifier of the basket to confirm").required().min_len(1),
    Param::string("customer_language", "Customer's preferred language code")
        .choices(&["es", "en", "fr", "de", "it", "pt"]),
    Param::string("order_id", "Order identifier for modification operations"),
    Param::boolean("room_upgrade", "Indicates if the confirmation is a room upgrade")
        .default_bool(false),
    Param::boolean("avoid_send_client_email", "Avoid sending confirmation email to client")
        .default_bool(false),
    Param::boolean("avoid_send_establishment_email", "Avoid sending notification email to hotel")
        .default_bool(false),
    Param::records(
        "hotel_room_confirm_data",
        "Room confirmation data with customer and guest information",
        HOTEL_ROOM_CONFIRM_DATA,
    ),
    Param::string("gtm", "Google Tag Manager information"),
    Param::string("origin_ads", "Advertisement origin information"),
    Param::object("gift_data", "Gift/voucher information", GIFT_DATA),
    Param::string("metadata", "Additional metadata for the reservation").wire("MetaData"),
    Param::boolean("budget", "Budget indicator").default_bool(false),
];

const TRACKING: &[Param] = &[
    Param::string("origin", "Tracking origin")
        .required()
        .choices(&["googlehpa", "trivago", "trivagocpa", "tripadvisor"]),
    Param::string("code", "Tracking code").required(),
    Param::string("locale", "Tracking locale"),
];

const CLIENT_LOCATION: &[Param] = &[
    Param::string("country", "Country where the client is located"),
    Param::string("ip", "Client IP address"),
];

const CALL_CENTER_PROPERTIES: &[Param] = &[
    Param::boolean("ignore_release", ""),
    Param::boolean("ignore_min_stay", ""),
    Param::boolean("ignore_availability", ""),
    Param::number("override_price", ""),
    Param::number("override_deposit", ""),
    Param::number("override_discount", ""),
    Param::boolean("ignore_required_extra", ""),
    Param::boolean("ignore_required_fields", ""),
    Param::string("override_country", ""),
    Param::string("override_inbound_method", "")
        .choices(&["inbound", "outbound", "email", "whatsapp", "walkin"]),
];

const BASKET_CREATE: &[Param] = &[
    Param::string("client_device", "Type of client device")
        .choices(&["desktop", "mobile", "tablet"]),
    Param::string("origin", "Origin of the reservation"),
    Param::object("tracking", "Tracking information for analytics", TRACKING),
    Param::object("client_location", "Client location information", CLIENT_LOCATION),
    Param::string("budget_id", "Budget identifier to create basket from"),
    Param::string("order_id", "Order identifier to create basket from"),
    Param::boolean("empty_basket", "Create empty basket from order ID").default_bool(false),
    Param::object(
        "call_center_properties",
        "Call center specific properties",
        CALL_CENTER_PROPERTIES,
    ),
];

const PRODUCTS_TO_REMOVE: &[Param] = &[
    Param::string("availability_id", "Availability identifier").required().min_len(1),
    Param::number("quantity", "Quantity of products to remove").required().min(1.0),
];

const BASKET_DEL_PRODUCT: &[Param] = &[
    Param::string("basket_id", "Identifier of the basket to remove products from")
        .required()
        .min_len(1),
    Param::list(
        "hotel_room_availability_ids",
        "List of hotel room availability identifiers to remove",
        Item::string("").min_len(1),
    )
    .wire("HotelRoomAvailabilityId"),
    Param::list(
        "hotel_room_extra_availability_ids",
        "List of hotel room extra availability identifiers to remove",
        Item::string("").min_len(1),
    )
    .wire("HotelRoomExtraAvailabilityId"),
    Param::list(
        "package_availability_ids",
        "List of package availability identifiers to remove",
        Item::string("").min_len(1),
    )
    .wire("PackageAvailabilityId"),
    Param::list(
        "package_extra_availability_ids",
        "List of package extra availability identifiers to remove",
        Item::string("").min_len(1),
    )
    .wire("PackageExtraAvailabilityId"),
    Param::records(
        "generic_product_availabilities",
        "List of generic product availability objects to remove",
        PRODUCTS_TO_REMOVE,
    )
    .wire("GenericProductAvailability"),
    Param::records(
        "generic_product_extra_availabilities",
        "List of generic product extra availability objects to remove",
        PRODUCTS_TO_REMOVE,
    )
    .wire("GenericProductExtraAvailability"),
];

const BASKET_DELETE: &[Param] = &[
    Param::string("basket_id", "Identifier of the basket to delete").required().min_len(1),
];

const BASKET_LOCK: &[Param] = &[
    Param::string("basket_id", "Identifier of the basket to lock").required().min_len(1),
    Param::object(
        "call_center_properties",
        "Call center specific properties",
        CALL_CENTER_PROPERTIES,
    ),
];

const REWARDS_UPDATE: &[Param] = &[
    Param::boolean("enable", "Enable or disable rewards for this basket"),
];

const PROMO_CODE_UPDATE: &[Param] = &[
    Param::boolean("use_promo_code", "Whether to add or remove promotional code").required(),
    Param::string("promo_code", "Promotional code to apply (required when use_promo_code is true)")
        .min_len(1),
];

const BASKET_PROPERTIES_UPDATE: &[Param] = &[
    Param::string("basket_id", "Identifier of the basket to update").required().min_len(1),
    Param::object("rewards_update", "Rewards/loyalty program update settings", REWARDS_UPDATE)
        .wire("Rewards"),
    Param::object("promo_code_update", "Promotional code update settings", PROMO_CODE_UPDATE)
        .wire("PromoCode"),
];

const BASKET_SUMMARY: &[Param] = &[
    Param::string("basket_id", "Identifier of the basket to summarize").required().min_len(1),
    Param::object(
        "call_center_properties",
        "Call center specific properties",
        CALL_CENTER_PROPERTIES,
    ),
];

const BASKET_UNLOCK: &[Param] = &[
    Param::string("basket_id", "Identifier of the basket to unlock").required().min_len(1),
];
