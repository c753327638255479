//! Key conversion between tool arguments and the upstream wire format.

use serde_json::{Map, Value};

/// Words the upstream spells as acronyms.
const ACRONYMS: &[(&str, &str)] = &[("rph", "RPH"), ("gtm", "GTM")];

/// `hotel_room_rph` -> `HotelRoomRPH`
pub fn pascal_case(name: &str) -> String {
    name.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            if let Some((_, acronym)) = ACRONYMS.iter().find(|(plain, _)| *plain == word) {
                return acronym.to_string();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect()
}

/// `HotelRoomDetail` -> `hotel_room_detail`
pub fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let chars: Vec<char> = name.chars().collect();
    for (index, ch) in chars.iter().enumerate() {
        if ch.is_uppercase() {
            let prev_lower = index > 0 && chars[index - 1].is_lowercase();
            let next_lower = chars.get(index + 1).is_some_and(|next| next.is_lowercase());
            let prev_upper = index > 0 && chars[index - 1].is_uppercase();
            if index > 0 && (prev_lower || (prev_upper && next_lower)) {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(*ch);
        }
    }
    out
}

/// Recursively convert the keys of a free-form value to PascalCase.
pub fn pascalize(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, inner)| (pascal_case(&key), pascalize(inner)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(pascalize).collect()),
        other => other,
    }
}

/// Insert `value` at a dotted path such as `Payment.Method`, creating
/// intermediate objects as needed. An existing non-object in the way is
/// replaced.
pub fn insert_path(target: &mut Map<String, Value>, path: &str, value: Value) {
    match path.split_once('.') {
        None => {
            target.insert(path.to_string(), value);
        }
        Some((head, rest)) => {
            let slot = target
                .entry(head.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            if let Value::Object(inner) = slot {
                insert_path(inner, rest, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn pascal_case_handles_acronyms() {
        assert_eq!(pascal_case("hotel_room_rph"), "HotelRoomRPH");
        assert_eq!(pascal_case("basket_id"), "BasketId");
        assert_eq!(pascal_case("gtm"), "GTM");
        assert_eq!(pascal_case("ip"), "Ip");
    }

    #[test]
    fn snake_case_splits_words_and_acronyms() {
        assert_eq!(snake_case("HotelRoomBasicDetail"), "hotel_room_basic_detail");
        assert_eq!(snake_case("TokenTpv"), "token_tpv");
        assert_eq!(snake_case("HotelRoomRPHValue"), "hotel_room_rph_value");
        assert_eq!(snake_case("Success"), "success");
    }

    #[test]
    fn nested_paths_share_parents() {
        let mut body = Map::new();
        insert_path(&mut body, "Payment.Method", json!("card"));
        insert_path(&mut body, "Payment.Quantity", json!(120.5));
        insert_path(&mut body, "OrderId", json!("ORD-1"));
        assert_eq!(
            Value::Object(body),
            json!({"Payment": {"Method": "card", "Quantity": 120.5}, "OrderId": "ORD-1"})
        );
    }

    #[test]
    fn pascalize_walks_arrays() {
        assert_eq!(
            pascalize(json!({"pax": [{"adults": 2, "extra_child_price": [10]}]})),
            json!({"Pax": [{"Adults": 2, "ExtraChildPrice": [10]}]})
        );
    }
}
