//! Order tools: search, read, modify, cancel, pay and notify reservations.

use neobookings_core::validate::RangeRule;

use crate::catalog::{Category, ToolSpec};
use crate::param::{Format, Item, Param};
use crate::shape;

pub static TOOLS: &[ToolSpec] = &[
    ToolSpec::new("order_cancel_rq", "/OrderCancelRQ", Category::Orders, ORDER_CANCEL)
        .title("Order Cancellation")
        .describe("Cancel one or more confirmed reservations in the Neobookings system.")
        .results(&["OrdersCancelled"]),
    ToolSpec::new("order_credit_card_rq", "/OrderCreditCardRQ", Category::Orders, ORDER_CREDIT_CARD)
        .title("Order Credit Card")
        .describe("Retrieve credit card information associated with confirmed reservations.")
        .results(&["OrderCreditCard"]),
    ToolSpec::new("order_data_modify_rq", "/OrderDataModifyRQ", Category::Orders, ORDER_DATA_MODIFY)
        .title("Order Data Modification")
        .describe("Modify various data fields of existing confirmed reservations.")
        .language_alias("request_language"),
    ToolSpec::new("order_details_rq", "/OrderDetailsRQ", Category::Orders, ORDER_DETAILS)
        .title("Order Details")
        .describe("Retrieve comprehensive details of confirmed reservations.")
        .results(&["OrderDetails"]),
    ToolSpec::new(
        "order_event_notify_rq",
        "/OrderEventNotifyRQ",
        Category::Orders,
        ORDER_EVENT_NOTIFY,
    )
    .title("Order Event Notification")
    .describe("Notify specific events that occurred for confirmed reservations."),
    ToolSpec::new("order_event_read_rq", "/OrderEventReadRQ", Category::Orders, ORDER_EVENT_READ)
        .title("Order Event History")
        .describe("Retrieve event history for confirmed reservations.")
        .results(&["ReservationEvent"]),
    ToolSpec::new(
        "order_event_search_rq",
        "/OrderEventSearchRQ",
        Category::Orders,
        ORDER_EVENT_SEARCH,
    )
    .title("Order Event Search")
    .describe("Search for orders that have specific events within date ranges.")
    .results(&["ReservationIds"])
    .dates(RangeRule::NotBefore),
    ToolSpec::new(
        "order_notification_read_rq",
        "/OrderNotificationReadRQ",
        Category::Orders,
        ORDER_NOTIFICATION_READ,
    )
    .title("Order Notification Status")
    .describe("Read the notification status of one or more reservations in the Neobookings system.")
    .results(&["Notification"]),
    ToolSpec::new(
        "order_notification_remove_rq",
        "/OrderNotificationRemoveRQ",
        Category::Orders,
        ORDER_NOTIFICATION_REMOVE,
    )
    .title("Order Notification Removal")
    .describe("Remove notifications for one or more reservations in the Neobookings system."),
    ToolSpec::new(
        "order_notification_rq",
        "/OrderNotificationRQ",
        Category::Orders,
        ORDER_NOTIFICATION,
    )
    .title("Order Notification")
    .describe("Create notifications for reservations to specific systems or users."),
    ToolSpec::new(
        "order_payment_create_rq",
        "/OrderPaymentCreateRQ",
        Category::Orders,
        ORDER_PAYMENT_CREATE,
    )
    .title("Order Payment")
    .describe("Create payment records for reservations in the Neobookings system.")
    .results(&["Payment", "TokenTpv"])
    .shaper(shape::payment_date),
    ToolSpec::new("order_put_rq", "/OrderPutRQ", Category::Orders, ORDER_PUT)
        .title("Order Put")
        .describe("Create or update order information in the Neobookings system.")
        .results(&["OrderId"])
        .shaper(shape::order_put_details),
    ToolSpec::new("order_search_rq", "/OrderSearchRQ", Category::Orders, ORDER_SEARCH)
        .title("Order Search")
        .describe("Search for orders in the Neobookings system based on various criteria.")
        .results(&["CurrentPage", "TotalPages", "TotalRecords", "OrderBasicDetail"])
        .dates(RangeRule::NotBefore),
];

const EVENT_TYPES: &[&str] = &[
    "CONFIRM", "SEND_EMAIL_USER", "SEND_EMAIL_HOTEL", "SEND_EMAIL_USER_INVALID_CARD",
    "TOKENIZE_AUTO_OK", "TOKENIZE_AUTO_INVALID", "TOKENIZE_MANUAL_OK", "TOKENIZE_MANUAL_INVALID",
    "PAYMENT_AUTO_OK", "PAYMENT_AUTO_INVALID", "PAYMENT_MANUAL_OK", "PAYMENT_MANUAL_INVALID",
    "PAYMENT_PAYBYLINK_CREATE", "PAYMENT_REFUND_OK", "PAYMENT_REFUND_INVALID",
    "BOOKINGCOM_AUTO_CANCEL_OK", "BOOKINGCOM_AUTO_CANCEL_DENIED", "BOOKINGCOM_MARK_CARD_INVALID_OK",
    "BOOKINGCOM_MARK_CARD_INVALID_DENIED", "BOOKING_MODIFY_CREDITCARD", "BOOKING_UPGRADE",
    "AUTO_CANCEL_TPV", "AUTO_CANCEL_CARD", "AUTO_CANCEL_PAYPAL", "AUTO_CANCEL_FINANCED",
    "AUTO_CANCEL_TRANSFER", "AUTO_CANCEL_NOSHOW", "CANCEL_MANUAL", "AUTO_CANCEL_VERIFYTOKEN",
    "VERIFYTOKEN_OK", "VERIFYTOKEN_KO",
];

const PAYMENT_METHODS: &[&str] = &[
    "tpv", "tpvmanual", "card", "credit", "transference", "moneyorder", "paypal", "cash",
    "financed", "otb", "other", "nil",
];

const TPV_SYSTEMS: &[&str] = &[
    "paytpv", "addonpayments", "conexflow", "redsys", "paylands", "stripe", "openpay", "placetopay",
    "adyen", "payu", "wompi", "unknown",
];

const DATE_FIELDS: &[&str] = &[
    "creationdate", "lastupdate", "arrivaldate", "departuredate", "stay",
];

const SORT_FIELDS: &[&str] = &[
    "id", "name", "price", "creationdate", "lastupdate", "arrivaldate", "departuredate",
];

const ORDER_CANCEL: &[Param] = &[
    Param::list(
        "order_ids",
        "List of order IDs to cancel",
        Item::string("Order identifier (e.g., 'ORD123456')"),
    )
    .required()
    .wire("OrderId")
    .min_items(1)
    .max_items(100),
    Param::string("reason", "Reason for the cancellation").required().min_len(1).max_len(500),
    Param::boolean(
        "avoid_send_client_email",
        "If true, prevents sending cancellation email to the client",
    )
    .default_bool(false),
    Param::boolean(
        "avoid_send_establishment_email",
        "If true, prevents sending cancellation email to the establishment",
    )
    .default_bool(false),
];

const ORDER_CREDIT_CARD: &[Param] = &[
    Param::list(
        "order_ids",
        "List of order IDs to retrieve credit card information for",
        Item::string("Order identifier (e.g., 'ORD123456')"),
    )
    .required()
    .wire("OrderId")
    .min_items(1)
    .max_items(100),
];

const CARD_DETAILS: &[Param] = &[
    Param::string("holder_name", "Card holder name").max_len(100),
    Param::string("number", "Card number").max_len(20),
    Param::string("code", "Security code (CVV)").max_len(4),
    Param::integer("expire_month", "Expiration month (1-12)")
        .wire("ExpireDateMonth")
        .min(1.0)
        .max(12.0),
    Param::integer("expire_year", "Expiration year").wire("ExpireDateYear").min(2024.0).max(2040.0),
];

const PAYMENT_METHOD: &[Param] = &[
    Param::boolean("credit_card", "Use credit card payment method"),
    Param::object("card_details", "Credit card details", CARD_DETAILS).wire("Card"),
];

const GIFT_DATA: &[Param] = &[
    Param::string("firstname", "Gift recipient first name").max_len(100),
    Param::string("surname", "Gift recipient surname").max_len(100),
    Param::string("email", "Gift recipient email").max_len(255).format(Format::Email),
    Param::string("message", "Gift message").max_len(500),
    Param::boolean("anonymous", "Whether the gift is anonymous"),
    Param::string("notification_date", "Gift notification date (YYYY-MM-DD)")
        .wire("GiftNotificationDate")
        .format(Format::Date),
    Param::boolean("delete_gift", "Remove gift data (default: false)"),
];

const BILLING_DATA: &[Param] = &[
    Param::string("name", "Billing name").max_len(200),
    Param::string("cif", "Tax identification number").max_len(50),
    Param::string("address", "Billing address").max_len(300),
    Param::string("zip", "Postal code").max_len(20),
    Param::string("city", "City").max_len(100),
    Param::string("country", "Country code").max_len(10),
    Param::boolean("delete_billing", "Remove billing data (default: false)"),
];

const CUSTOMER_DATA: &[Param] = &[
    Param::string("firstname", "Customer first name").max_len(100),
    Param::string("surname", "Customer surname").max_len(100),
    Param::string("date_of_birthday", "Date of birth (YYYY-MM-DD)").format(Format::Date),
    Param::string("passport", "Passport number").max_len(50),
    Param::string("address", "Address").max_len(300),
    Param::string("city", "City").max_len(100),
    Param::string("zip", "Postal code").max_len(20),
    Param::string("country", "Country code").max_len(10),
    Param::string("state", "State or province").max_len(100),
    Param::string("phone", "Phone number").max_len(50),
    Param::string("fax", "Fax number").max_len(50),
    Param::string("mobile", "Mobile phone number").max_len(50),
    Param::string("email", "Email address").max_len(255).format(Format::Email),
    Param::string("arrival_time", "Arrival time").max_len(10),
];

const GUEST_DATA: &[Param] = &[
    Param::string("id", "Guest ID (required if no RPH provided)").max_len(50),
    Param::integer("hotel_guest_rph", "Guest RPH").min(1.0),
    Param::integer("reference_rph_value", "Room RPH of the guest").min(1.0),
    Param::string("firstname", "Guest first name").max_len(100),
    Param::string("surname", "Guest surname").max_len(100),
    Param::string("passport", "Guest passport number").max_len(50),
    Param::string("email", "Guest email").max_len(255).format(Format::Email),
    Param::string("date_of_birthday", "Guest date of birth (YYYY-MM-DD)").format(Format::Date),
];

const EXTERNAL_SYSTEM: &[Param] = &[
    Param::string("code", "External system code").max_len(50),
    Param::string("locator", "External system locator").max_len(100),
];

const ORDER_DATA_MODIFY: &[Param] = &[
    Param::list(
        "order_ids",
        "List of order IDs to modify",
        Item::string("Order identifier (e.g., 'ORD123456')"),
    )
    .required()
    .wire("OrderId")
    .min_items(1)
    .max_items(50),
    Param::boolean(
        "avoid_send_client_email",
        "If true, prevents sending modification email to the client",
    )
    .default_bool(false),
    Param::boolean(
        "avoid_send_establishment_email",
        "If true, prevents sending modification email to the establishment",
    )
    .default_bool(false),
    Param::object("payment_method", "New payment method details", PAYMENT_METHOD),
    Param::string("reservation_language", "New language for the reservation")
        .wire("Language")
        .choices(&["es", "en", "fr", "de", "it", "pt"]),
    Param::string("special_requests", "Updated special requests or comments").max_len(1000),
    Param::string("info_client", "Additional client information").max_len(1000),
    Param::string("info_hotel", "Additional hotel information").max_len(1000),
    Param::object("gift_data", "Gift-related information", GIFT_DATA),
    Param::object("billing_data", "Billing information updates", BILLING_DATA),
    Param::object("customer_data", "Customer data modifications", CUSTOMER_DATA)
        .wire("DataModifyCustomer"),
    Param::records("guest_data", "Guest data modifications", GUEST_DATA)
        .wire("DataModifyGuests")
        .max_items(50),
    Param::object("external_system", "External system reference", EXTERNAL_SYSTEM),
];

const ORDER_DETAILS: &[Param] = &[
    Param::list(
        "order_ids",
        "List of internal order IDs to retrieve details for",
        Item::string("Order identifier (e.g., 'ORD123456')"),
    )
    .wire("OrderId")
    .max_items(100),
    Param::list(
        "order_ids_origin",
        "List of origin order IDs to retrieve details for",
        Item::string("Origin order identifier (e.g., 'ORIG789')"),
    )
    .wire("OrderIdOrigin")
    .max_items(100),
];

const ORDER_EVENT_NOTIFY: &[Param] = &[
    Param::string("order_id", "Order ID for which the event occurred")
        .required()
        .min_len(1)
        .max_len(100),
    Param::string("event_type", "Type of event that occurred").required().choices(EVENT_TYPES),
    Param::string(
        "event_date",
        "Date and time when the event occurred (YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS)",
    )
    .required()
    .format(Format::DateOrDateTime),
    Param::string("event_info", "Additional information or description about the event")
        .max_len(1000),
];

const ORDER_EVENT_READ: &[Param] = &[
    Param::list(
        "order_ids",
        "List of order IDs to retrieve event history for",
        Item::string("Order identifier (e.g., 'ORD123456')"),
    )
    .required()
    .wire("OrderId")
    .min_items(1)
    .max_items(100),
];

const ORDER_EVENT_SEARCH: &[Param] = &[
    Param::list(
        "hotel_ids",
        "List of hotel IDs to search within",
        Item::string("Hotel identifier (e.g., 'H123')"),
    )
    .required()
    .wire("HotelId")
    .min_items(1)
    .max_items(100),
    Param::list(
        "event_types",
        "List of event types to search for",
        Item::string("").choices(EVENT_TYPES),
    )
    .required()
    .wire("EventType")
    .min_items(1)
    .max_items(20),
    Param::string("date_from", "Start date for event search (YYYY-MM-DD)").format(Format::Date),
    Param::string("date_to", "End date for event search (YYYY-MM-DD)").format(Format::Date),
    Param::string("date_type", "Type of date filter to apply")
        .choices(&["dateEvent", "dateArrival", "dateDeparture", "dateCreation"])
        .default_str("dateEvent"),
];

const ORDER_NOTIFICATION_READ: &[Param] = &[
    Param::list(
        "order_ids",
        "List of order IDs to check notification status",
        Item::string("Order identifier (e.g., 'ORD123456')"),
    )
    .required()
    .wire("OrderId")
    .min_items(1)
    .max_items(100),
];

const ORDER_NOTIFICATION_REMOVE: &[Param] = &[
    Param::list(
        "order_ids",
        "List of order IDs to remove notifications",
        Item::string("Order identifier (e.g., 'ORD123456')"),
    )
    .required()
    .wire("OrderId")
    .min_items(1)
    .max_items(100),
    Param::string("destination_system", "Specific system to remove notification from").max_len(100),
    Param::string("destination_user", "Specific user to remove notification from").max_len(100),
];

const ORDER_NOTIFICATION: &[Param] = &[
    Param::list(
        "order_ids",
        "List of order IDs to create notifications for",
        Item::string("Order identifier (e.g., 'ORD123456')"),
    )
    .required()
    .wire("OrderId")
    .min_items(1)
    .max_items(100),
    Param::string("destination_system", "Specific system to notify").max_len(100),
    Param::string("destination_user", "Specific user to notify").max_len(100),
];

const TPV_TOKEN: &[Param] = &[
    Param::string("tpv_system", "").wire("Tpv").choices(TPV_SYSTEMS),
    Param::string("payer_token", "").wire("NeoToken.PayerToken").max_len(200),
    Param::string("operation_token", "").wire("NeoToken.OperationToken").max_len(200),
    Param::string("operation_schema", "").wire("NeoToken.OperationSchema").max_len(200),
    Param::string("pan", "").wire("NeoToken.Pan").max_len(20),
];

const ORDER_PAYMENT_CREATE: &[Param] = &[
    Param::string("order_id", "Order identifier for payment creation")
        .required()
        .min_len(1)
        .max_len(50),
    Param::string("payment_method", "Payment method used")
        .required()
        .wire("Payment.Method")
        .choices(PAYMENT_METHODS),
    Param::number("amount", "Payment amount")
        .required()
        .wire("Payment.Quantity")
        .min(0.0)
        .max(999999.99),
    Param::string("currency", "Payment currency (ISO 4217 code)")
        .required()
        .wire("Payment.Currency")
        .max_len(3)
        .format(Format::Currency),
    Param::string("description", "Payment description")
        .required()
        .wire("Payment.Description")
        .min_len(1)
        .max_len(500),
    Param::string("payment_date", "Date when payment was made (YYYY-MM-DDTHH:MM:SS format)")
        .wire("Payment.DateCreated")
        .format(Format::DateTime),
    Param::boolean("removed", "Whether payment is marked as removed")
        .wire("Payment.Removed")
        .default_bool(false),
    Param::object("tpv_token", "TPV token information for card payments", TPV_TOKEN)
        .wire("TokenTpv"),
];

const ORDER_STATUS: &[Param] = &[
    Param::string("order_state", "").required().choices(&["confirm", "cancel", "invalid"]),
    Param::string("payment_state", "").choices(&["entire", "partial", "pending"]),
    Param::string("payment_method", "").choices(PAYMENT_METHODS),
    Param::boolean("no_show", "").default_bool(false),
    Param::string("payment_type", "").choices(&["full", "deposit"]),
    Param::string("when_pay", "").choices(&["now", "establishment", "scheduled"]),
];

const ORDER_CUSTOMER: &[Param] = &[
    Param::string("title", "").max_len(10),
    Param::string("firstname", "").max_len(100),
    Param::string("surname", "").max_len(100),
    Param::string("date_of_birthday", "").format(Format::Date),
    Param::string("address", "").max_len(200),
    Param::string("zip", "").max_len(20),
    Param::string("city", "").max_len(100),
    Param::string("country", "").max_len(2),
    Param::string("phone", "").max_len(20),
    Param::string("email", "").max_len(100),
    Param::string("passport", "").wire("Passaport").max_len(50),
    Param::string("state", "").max_len(100),
];

const AMOUNTS_DATA: &[Param] = &[
    Param::string("currency", "").format(Format::Currency),
    Param::number("amount_final", "").min(0.0),
    Param::number("amount_total", "").min(0.0),
    Param::number("amount_base", "").min(0.0),
    Param::number("amount_taxes", "").min(0.0),
    Param::number("amount_tourist_tax", "").min(0.0),
];

const HOTEL_ROOM_DETAIL: &[Param] = &[
    Param::string("hotel_id", ""),
    Param::string("hotel_room_id", ""),
    Param::string("hotel_room_name", ""),
    Param::string("hotel_room_description", ""),
];

const ROOM_DATA: &[Param] = &[
    Param::string("arrival_date", "").format(Format::Date),
    Param::string("departure_date", "").format(Format::Date),
    Param::object("hotel_room_detail", "", HOTEL_ROOM_DETAIL),
];

const ORDER_BILLING: &[Param] = &[
    Param::string("name", "").max_len(200),
    Param::string("cif", "").max_len(50),
    Param::string("address", "").max_len(200),
    Param::string("zip", "").max_len(20),
    Param::string("city", "").max_len(100),
    Param::string("country", "").max_len(2),
];

const ORDER_PUT: &[Param] = &[
    Param::string("order_id", "Order identifier").required().min_len(1).max_len(50),
    Param::string("origin", "Origin of the order").required().min_len(1).max_len(100),
    Param::string("provider", "Provider mapping/client mapping").required().min_len(1).max_len(100),
    Param::object("order_status", "Order status details", ORDER_STATUS)
        .required()
        .wire("OrderStatusDetail"),
    Param::object("customer_data", "Customer information", ORDER_CUSTOMER)
        .wire("OrderCustomerDetail"),
    Param::object("amounts_data", "Amount details", AMOUNTS_DATA).wire("OrderAmountsDetail"),
    Param::records("room_data", "Hotel room details", ROOM_DATA).wire("OrderHotelRoomDetail"),
    Param::object("billing_data", "Billing information", ORDER_BILLING)
        .wire("OrderCustomerBillingDetail"),
    Param::string("petitions", "Customer petitions/special requests").max_len(1000),
    Param::number("first_payment", "First payment amount").min(0.0),
    Param::number("second_payment", "Second payment amount").min(0.0),
    Param::number("issue_costs", "Issue costs").min(0.0),
    Param::string("info_hotel", "Hotel information").max_len(1000),
    Param::string("info_client", "Client information").max_len(1000),
    Param::boolean("ignore_send_mail", "Ignore sending email").default_bool(false),
];

const FILTERS: &[Param] = &[
    Param::list(
        "order_states",
        "Order states to filter by",
        Item::string("").choices(&["confirm", "cancel", "invalid"]),
    )
    .wire("OrderState"),
    Param::list(
        "payment_states",
        "Payment states to filter by",
        Item::string("").choices(&["entire", "partial", "pending"]),
    )
    .wire("PaymentState"),
    Param::list(
        "payment_methods",
        "Payment methods to filter by",
        Item::string("").choices(PAYMENT_METHODS),
    )
    .wire("PaymentMethod"),
    Param::list(
        "reservation_modes",
        "Reservation modes to filter by",
        Item::string("").choices(&["room", "package", "product"]),
    )
    .wire("ReservationMode"),
    Param::boolean("reviewed", "Filter by reviewed status"),
    Param::boolean("from_professional", "Filter professional reservations"),
    Param::string("notification_status", "Notification status filter")
        .wire("Notified")
        .choices(&["ever", "never", "pending", "all"]),
    Param::list("channels", "Sales channels to filter by", Item::string("")).wire("Channel"),
    Param::list("customers", "Customer identifiers to filter by", Item::string(""))
        .wire("Customer"),
];

const ORDER_SEARCH: &[Param] = &[
    Param::list("hotel_ids", "List of hotel IDs to filter by", Item::string("Hotel identifier"))
        .wire("HotelId")
        .max_items(50),
    Param::list(
        "order_ids",
        "List of specific order IDs to search",
        Item::string("Order identifier"),
    )
    .wire("OrderId")
    .max_items(100),
    Param::string("date_from", "Start date for date range filter (YYYY-MM-DD)")
        .format(Format::Date),
    Param::string("date_to", "End date for date range filter (YYYY-MM-DD)").format(Format::Date),
    Param::string("date_by", "Type of date filter to apply")
        .choices(DATE_FIELDS)
        .default_str("creationdate"),
    Param::string("order_by", "Field to sort results by")
        .required()
        .choices(SORT_FIELDS)
        .default_str("creationdate"),
    Param::string("order_type", "Sort direction")
        .required()
        .choices(&["asc", "desc"])
        .default_str("desc"),
    Param::integer("page", "Page number for pagination (1-based)")
        .min(1.0)
        .max(1000.0)
        .default_int(1),
    Param::integer("num_results", "Number of results per page").min(1.0).max(100.0).default_int(10),
    Param::object("filters", "Additional search filters", FILTERS).wire("FilterBy"),
];
