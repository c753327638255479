//! Payload shapers for tools whose upstream body does not mirror their
//! arguments.
//!
//! Each shaper runs after parameter conversion, so it sees PascalCase keys
//! and already-validated scalars.

use chrono::Utc;
use neobookings_core::{GatewayError, Result};
use serde_json::{Map, Value, json};

/// Room availability: stay dates travel inside every distribution entry and
/// unavailable rooms are always requested.
pub fn room_distribution(body: &mut Map<String, Value>) -> Result<()> {
    let date_from = body.remove("DateFrom");
    let date_to = body.remove("DateTo");

    if let Some(Value::Array(rooms)) = body.get_mut("HotelRoomDistribution") {
        for room in rooms.iter_mut().filter_map(Value::as_object_mut) {
            if let Some(date_from) = &date_from {
                room.insert("DateFrom".into(), date_from.clone());
            }
            if let Some(date_to) = &date_to {
                room.insert("DateTo".into(), date_to.clone());
            }
        }
    }

    let show_details = body.get("ShowHotelBasicDetail").cloned().unwrap_or(Value::Bool(true));
    body.insert("ShowHotelRoomBasicDetail".into(), show_details);
    body.insert("ShowHotelRoomNotAvailability".into(), Value::Bool(true));
    Ok(())
}

/// Calendar availability only ever reports visible rooms.
pub fn visible_only(body: &mut Map<String, Value>) -> Result<()> {
    body.insert("FilterBy".into(), json!({ "Visibility": ["visible"] }));
    Ok(())
}

/// Order put: the whole order travels as the single element of
/// `OrderPutDetails`; every room carries (empty) board and guest lists.
pub fn order_put_details(body: &mut Map<String, Value>) -> Result<()> {
    let mut order = std::mem::take(body);
    if let Some(Value::Array(rooms)) = order.get_mut("OrderHotelRoomDetail") {
        for room in rooms.iter_mut().filter_map(Value::as_object_mut) {
            room.entry("OrderHotelBoardDetail").or_insert_with(|| json!([]));
            room.entry("OrderHotelGuestDetail").or_insert_with(|| json!([]));
        }
    }
    body.insert("OrderPutDetails".into(), json!([order]));
    Ok(())
}

/// Payments default to "now" when no creation date is given.
pub fn payment_date(body: &mut Map<String, Value>) -> Result<()> {
    if let Some(Value::Object(payment)) = body.get_mut("Payment") {
        payment
            .entry("DateCreated")
            .or_insert_with(|| json!(Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()));
    }
    Ok(())
}

/// Price updates: the free-form `pricing_data` becomes `Pax`, `Occupancy`
/// or `Accommodation` depending on `mode`.
pub fn pricing_modes(body: &mut Map<String, Value>) -> Result<()> {
    let Some(Value::Array(updates)) = body.get_mut("PriceUpdate") else {
        return Ok(());
    };

    for update in updates.iter_mut().filter_map(Value::as_object_mut) {
        let pricing = match update.remove("PricingData") {
            Some(Value::Object(pricing)) => pricing,
            _ => Map::new(),
        };
        let target = PriceTarget::of(update);
        let mode = update.get("Mode").and_then(Value::as_str).unwrap_or_default().to_string();

        match mode.as_str() {
            "pax" => {
                update.insert("Pax".into(), pax_prices(&pricing, &target)?);
            }
            "occupancy" => {
                update.insert("Occupancy".into(), occupancy_prices(&pricing, &target)?);
            }
            "accommodation" => {
                let price = non_negative(pricing.get("AccommodationPrice"), "accommodation_price", &target)?
                    .ok_or_else(|| target.error("accommodation_price is required for accommodation mode"))?;
                update.insert("Accommodation".into(), json!({ "Price": price }));
            }
            other => {
                return Err(GatewayError::validation(format!(
                    "Invalid mode: {}. Must be 'pax', 'occupancy', or 'accommodation'",
                    other
                )));
            }
        }
    }
    Ok(())
}

/// Hotel and room named in price errors.
struct PriceTarget {
    hotel: String,
    room: String,
}

impl PriceTarget {
    fn of(update: &Map<String, Value>) -> Self {
        let text = |key: &str| update.get(key).and_then(Value::as_str).unwrap_or_default().to_string();
        Self {
            hotel: text("HotelId"),
            room: text("RoomId"),
        }
    }

    fn error(&self, message: impl std::fmt::Display) -> GatewayError {
        GatewayError::validation_with(
            format!("{} for hotel {} room {}", message, self.hotel, self.room),
            "INVALID_PRICING_DATA",
            json!({ "hotel_id": self.hotel, "room_id": self.room }),
        )
    }
}

fn non_negative(value: Option<&Value>, field: &str, target: &PriceTarget) -> Result<Option<Value>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) if number.as_f64().is_some_and(|n| n >= 0.0) => {
            Ok(Some(Value::Number(number.clone())))
        }
        Some(_) => Err(target.error(format!("{} must be a non-negative number", field))),
    }
}

fn count(value: Option<&Value>, field: &str, minimum: u64, target: &PriceTarget) -> Result<u64> {
    match value {
        None | Some(Value::Null) if minimum == 0 => Ok(0),
        Some(Value::Number(number)) if number.as_u64().is_some_and(|n| n >= minimum) => {
            Ok(number.as_u64().unwrap_or_default())
        }
        _ if minimum == 0 => Err(target.error(format!("{} must be a non-negative integer", field))),
        _ => Err(target.error(format!("{} must be a positive integer", field))),
    }
}

fn pax_prices(pricing: &Map<String, Value>, target: &PriceTarget) -> Result<Value> {
    let configurations = match pricing.get("PaxConfigurations") {
        None => return Err(target.error("pax_configurations is required for pax mode")),
        Some(Value::Array(items)) if !items.is_empty() => items,
        Some(_) => return Err(target.error("pax_configurations must be a non-empty list")),
    };

    configurations
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let field = |name: &str| format!("pax_configurations[{}].{}", index, name);
            let Value::Object(entry) = entry else {
                return Err(target.error(format!("pax_configurations[{}] must be an object", index)));
            };
            if !entry.contains_key("Adults") || !entry.contains_key("Price") {
                return Err(target.error(format!(
                    "pax_configurations[{}] must contain 'adults' and 'price'",
                    index
                )));
            }

            let adults = count(entry.get("Adults"), &field("adults"), 1, target)?;
            let children = count(entry.get("Children"), &field("children"), 0, target)?;
            let babies = count(entry.get("Babies"), &field("babies"), 0, target)?;
            let price = non_negative(entry.get("Price"), &field("price"), target)?;

            let mut pax = Map::new();
            pax.insert("Adult".into(), json!(adults));
            pax.insert("Price".into(), price.unwrap_or(Value::Null));
            if children > 0 {
                pax.insert("Child".into(), json!(children));
            }
            if babies > 0 {
                pax.insert("Baby".into(), json!(babies));
            }
            Ok(Value::Object(pax))
        })
        .collect::<Result<Vec<_>>>()
        .map(Value::Array)
}

fn occupancy_prices(pricing: &Map<String, Value>, target: &PriceTarget) -> Result<Value> {
    let base = non_negative(pricing.get("BasePrice"), "base_price", target)?
        .ok_or_else(|| target.error("base_price is required for occupancy mode"))?;

    let mut occupancy = Map::new();
    occupancy.insert("BasePrice".into(), base);
    for (key, field) in [
        ("ExtraAdultsPrice", "extra_adults_price"),
        ("ExtraChildPrice", "extra_child_price"),
    ] {
        let prices = match pricing.get(key) {
            None | Some(Value::Null) => continue,
            Some(Value::Array(prices)) => prices,
            Some(_) => return Err(target.error(format!("{} must be a list", field))),
        };
        let checked = prices
            .iter()
            .enumerate()
            .map(|(index, price)| {
                non_negative(Some(price), &format!("{}[{}]", field, index), target)
                    .map(|price| price.unwrap_or(Value::Null))
            })
            .collect::<Result<Vec<_>>>()?;
        if !checked.is_empty() {
            occupancy.insert(key.into(), Value::Array(checked));
        }
    }
    Ok(Value::Object(occupancy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use neobookings_core::ErrorKind;
    use pretty_assertions::assert_eq;

    fn body(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn room_dates_move_into_each_distribution() {
        let mut wire = body(json!({
            "DateFrom": "2025-07-01",
            "DateTo": "2025-07-05",
            "HotelRoomDistribution": [
                {"HotelRoomRPH": 1, "Guest": [{"Age": 30, "Amount": 2}]},
                {"HotelRoomRPH": 2, "Guest": [{"Age": 8, "Amount": 1}]}
            ],
            "ShowHotelBasicDetail": false
        }));
        room_distribution(&mut wire).unwrap();

        assert!(!wire.contains_key("DateFrom"));
        assert_eq!(wire["HotelRoomDistribution"][1]["DateFrom"], "2025-07-01");
        assert_eq!(wire["HotelRoomDistribution"][0]["DateTo"], "2025-07-05");
        assert_eq!(wire["ShowHotelRoomBasicDetail"], false);
        assert_eq!(wire["ShowHotelRoomNotAvailability"], true);
    }

    #[test]
    fn order_put_wraps_a_single_order() {
        let mut wire = body(json!({
            "OrderId": "ORD-1",
            "OrderHotelRoomDetail": [{"ArrivalDate": "2025-07-01"}]
        }));
        order_put_details(&mut wire).unwrap();

        assert_eq!(
            Value::Object(wire),
            json!({"OrderPutDetails": [{
                "OrderId": "ORD-1",
                "OrderHotelRoomDetail": [{
                    "ArrivalDate": "2025-07-01",
                    "OrderHotelBoardDetail": [],
                    "OrderHotelGuestDetail": []
                }]
            }]})
        );
    }

    #[test]
    fn payment_date_is_filled_only_when_missing() {
        let mut given = body(json!({"Payment": {"DateCreated": "2025-01-01T10:00:00"}}));
        payment_date(&mut given).unwrap();
        assert_eq!(given["Payment"]["DateCreated"], "2025-01-01T10:00:00");

        let mut missing = body(json!({"Payment": {"Method": "card"}}));
        payment_date(&mut missing).unwrap();
        let stamp = missing["Payment"]["DateCreated"].as_str().unwrap();
        assert!(stamp.ends_with('Z') && stamp.len() == 20, "{}", stamp);
    }

    #[test]
    fn pricing_modes_build_their_blocks() {
        let mut wire = body(json!({"PriceUpdate": [
            {"HotelId": "H1", "RoomId": "R1", "Mode": "pax",
             "PricingData": {"PaxConfigurations": [{"Adults": 2, "Price": 120, "Children": 1}]}},
            {"HotelId": "H1", "RoomId": "R2", "Mode": "occupancy",
             "PricingData": {"BasePrice": 90, "ExtraAdultsPrice": [20, 15], "ExtraChildPrice": []}},
            {"HotelId": "H1", "RoomId": "R3", "Mode": "accommodation",
             "PricingData": {"AccommodationPrice": 300.5}}
        ]}));
        pricing_modes(&mut wire).unwrap();

        let updates = wire["PriceUpdate"].as_array().unwrap();
        assert_eq!(updates[0]["Pax"], json!([{"Adult": 2, "Price": 120, "Child": 1}]));
        assert_eq!(updates[1]["Occupancy"], json!({"BasePrice": 90, "ExtraAdultsPrice": [20, 15]}));
        assert_eq!(updates[2]["Accommodation"], json!({"Price": 300.5}));
        assert!(updates.iter().all(|update| update.get("PricingData").is_none()));
    }

    #[test]
    fn pricing_errors_name_hotel_and_room() {
        let cases = [
            (json!({"Mode": "occupancy", "PricingData": {}}), "base_price is required for occupancy mode"),
            (json!({"Mode": "pax", "PricingData": {"PaxConfigurations": []}}), "pax_configurations must be a non-empty list"),
            (
                json!({"Mode": "pax", "PricingData": {"PaxConfigurations": [{"Adults": 0, "Price": 10}]}}),
                "pax_configurations[0].adults must be a positive integer",
            ),
            (
                json!({"Mode": "accommodation", "PricingData": {"AccommodationPrice": -1}}),
                "accommodation_price must be a non-negative number",
            ),
        ];
        for (update, expected) in cases {
            let mut update = update.as_object().cloned().unwrap();
            update.insert("HotelId".into(), json!("H9"));
            update.insert("RoomId".into(), json!("R9"));
            let mut wire = body(json!({ "PriceUpdate": [update] }));

            let error = pricing_modes(&mut wire).unwrap_err();
            assert_eq!(error.kind(), ErrorKind::Validation);
            assert_eq!(error.message(), format!("{} for hotel H9 room R9", expected));
        }
    }
}
