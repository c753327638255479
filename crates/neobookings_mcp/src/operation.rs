//! Catalog entries as pipeline operations.

use neobookings_core::validate::{self, check_date_range};
use neobookings_core::{AUTHENTICATION_ENDPOINT, Invocation, Language, Operation, Prepared, Result};
use serde_json::{Map, Value, json};

use crate::catalog::ToolSpec;
use crate::param;
use crate::wire::snake_case;

impl ToolSpec {
    /// Language for the call, taken from `language` or the tool's alias.
    fn language(&self, arguments: &Map<String, Value>, default: Language) -> Result<Language> {
        let given = |key: &str| arguments.get(key).is_some_and(|value| !value.is_null());
        match self.language_alias {
            Some(alias) if !given("language") && given(alias) => {
                let mut aliased = Map::new();
                aliased.insert("language".into(), arguments[alias].clone());
                validate::language(&aliased, default)
            }
            _ => validate::language(arguments, default),
        }
    }

    fn check_dates(&self, arguments: &Map<String, Value>) -> Result<()> {
        let Some(rule) = self.dates else {
            return Ok(());
        };
        let text = |key: &str| arguments.get(key).and_then(Value::as_str).map(str::trim);
        match (text("date_from"), text("date_to")) {
            (Some(from), Some(to)) => check_date_range(from, to, rule),
            _ => Ok(()),
        }
    }

    /// The `data` block of the authentication tool. The password never
    /// leaves the process.
    fn session_data(invocation: &Invocation<'_>) -> Map<String, Value> {
        let token = invocation.auth.token.as_str();
        let config = invocation.config;
        let mut data = Map::new();
        data.insert("token".into(), json!(token));
        data.insert("language".into(), json!(invocation.language));
        data.insert(
            "session_info".into(),
            json!({
                "base_url": config.api.base_url,
                "client_code": config.credentials.client_code,
                "system_code": config.credentials.system_code,
                "username": config.credentials.username,
            }),
        );
        data
    }
}

impl Operation for ToolSpec {
    fn name(&self) -> &str {
        self.name
    }

    fn endpoint(&self) -> &str {
        self.endpoint
    }

    fn prepare(&self, arguments: &Map<String, Value>, default_language: Language) -> Result<Prepared> {
        let reserved: Vec<&str> = std::iter::once("language").chain(self.language_alias).collect();
        let mut body = param::build(self.params, "", arguments, &reserved)?;
        let language = self.language(arguments, default_language)?;
        self.check_dates(arguments)?;

        if let Some(shaper) = self.shaper {
            shaper(&mut body)?;
        }
        Ok(Prepared { language, body })
    }

    fn normalize(&self, raw: &Value, invocation: &Invocation<'_>) -> Result<Map<String, Value>> {
        if self.endpoint == AUTHENTICATION_ENDPOINT {
            return Ok(Self::session_data(invocation));
        }

        let mut data = Map::new();
        if self.results.is_empty() {
            if let Some(fields) = raw.as_object() {
                for (key, value) in fields.iter().filter(|(key, _)| key.as_str() != "Response") {
                    data.insert(snake_case(key), value.clone());
                }
            }
        } else {
            for key in self.results {
                if let Some(value) = raw.get(*key) {
                    data.insert(snake_case(key), value.clone());
                }
            }
        }
        Ok(data)
    }

    fn success_message(&self) -> String {
        format!("{} completed successfully", self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::find;
    use neobookings_core::{AuthOutcome, ErrorKind, NeobookingsConfig, RequestMetadata, Token};
    use pretty_assertions::assert_eq;

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    fn prepare(tool: &str, arguments: Value) -> Result<Prepared> {
        find(tool).unwrap().prepare(&args(arguments), Language::Es)
    }

    #[test]
    fn room_availability_payload() {
        let prepared = prepare(
            "hotel_room_avail_rq",
            json!({
                "date_from": "2025-07-01",
                "date_to": "2025-07-05",
                "guests": [{"room_number": 1, "guests": [{"age": 30, "amount": 2}]}],
                "hotel_ids": ["H1"],
                "language": "en"
            }),
        )
        .unwrap();

        assert_eq!(prepared.language, Language::En);
        let body = Value::Object(prepared.body);
        assert_eq!(
            body["HotelRoomDistribution"],
            json!([{
                "HotelRoomRPH": 1,
                "Guest": [{"Age": 30, "Amount": 2}],
                "DateFrom": "2025-07-01",
                "DateTo": "2025-07-05"
            }])
        );
        assert_eq!(body["HotelId"], json!(["H1"]));
        assert_eq!(body["ShowHotelRoomNotAvailability"], true);
        assert_eq!(body["ShowHotelRoomBasicDetail"], true);
        assert_eq!(body["OrderBy"], "price");
        assert!(body.get("DateFrom").is_none());
    }

    #[test]
    fn stays_need_at_least_one_night() {
        let error = prepare(
            "hotel_room_avail_rq",
            json!({
                "date_from": "2025-07-05",
                "date_to": "2025-07-05",
                "guests": [{"room_number": 1, "guests": [{"age": 30, "amount": 2}]}]
            }),
        )
        .unwrap_err();
        assert_eq!(error.error_code(), Some("INVALID_DATE_RANGE"));

        let search = prepare(
            "order_search_rq",
            json!({"order_by": "id", "order_type": "asc", "date_from": "2025-03-01", "date_to": "2025-02-01"}),
        )
        .unwrap_err();
        assert_eq!(search.message(), "date_from cannot be later than date_to");
    }

    #[test]
    fn payment_fields_nest_under_payment() {
        let body = Value::Object(
            prepare(
                "order_payment_create_rq",
                json!({
                    "order_id": "ORD-1",
                    "payment_method": "card",
                    "amount": 120.5,
                    "currency": "EUR",
                    "description": "Deposit",
                    "payment_date": "2025-01-01T10:00:00",
                    "tpv_token": {"tpv_system": "redsys", "pan": "4111"}
                }),
            )
            .unwrap()
            .body,
        );
        assert_eq!(
            body,
            json!({
                "OrderId": "ORD-1",
                "Payment": {
                    "Method": "card",
                    "Quantity": 120.5,
                    "Currency": "EUR",
                    "Description": "Deposit",
                    "DateCreated": "2025-01-01T10:00:00",
                    "Removed": false
                },
                "TokenTpv": {"Tpv": "redsys", "NeoToken": {"Pan": "4111"}}
            })
        );
    }

    #[test]
    fn order_put_is_wrapped() {
        let body = prepare(
            "order_put_rq",
            json!({
                "order_id": "ORD-1",
                "origin": "web",
                "provider": "acme",
                "order_status": {"order_state": "confirm"},
                "customer_data": {"passport": "X123"}
            }),
        )
        .unwrap()
        .body;

        let order = &body["OrderPutDetails"][0];
        assert_eq!(order["OrderStatusDetail"]["OrderState"], "confirm");
        assert_eq!(order["OrderCustomerDetail"]["Passaport"], "X123");
        assert_eq!(body.len(), 1);
    }

    #[test]
    fn request_language_is_an_alias() {
        let prepared = prepare(
            "order_data_modify_rq",
            json!({"order_ids": ["ORD-1"], "request_language": "fr", "reservation_language": "de"}),
        )
        .unwrap();
        assert_eq!(prepared.language, Language::Fr);
        assert_eq!(prepared.body["Language"], "de");
        assert!(prepared.body.get("RequestLanguage").is_none());
    }

    #[test]
    fn unknown_languages_are_rejected() {
        let error = prepare("zone_search_rq", json!({"language": "xx"})).unwrap_err();
        assert_eq!(error.kind(), ErrorKind::Validation);
    }

    #[test]
    fn normalize_picks_declared_fields() {
        let tool = find("basket_summary_rq").unwrap();
        let config = NeobookingsConfig::default();
        let metadata = RequestMetadata::new(Language::Es);
        let auth = AuthOutcome {
            token: Token::new("abc123"),
            metadata: None,
            raw: json!({"Token": "abc123"}),
            cached: false,
        };
        let invocation = Invocation {
            language: Language::Es,
            metadata: &metadata,
            auth: &auth,
            config: &config,
        };

        let data = tool
            .normalize(
                &json!({
                    "Response": {"StatusCode": 200},
                    "BasketDetail": {"BasketId": "B-1"},
                    "AmountsDetail": {"AmountFinal": 90},
                    "Unlisted": true
                }),
                &invocation,
            )
            .unwrap();
        assert_eq!(
            Value::Object(data),
            json!({"basket_detail": {"BasketId": "B-1"}, "amounts_detail": {"AmountFinal": 90}})
        );

        let session = find("authenticator_rq").unwrap().normalize(&json!({}), &invocation).unwrap();
        assert_eq!(session["token"], "abc123");
        assert_eq!(session["session_info"]["username"], config.credentials.username);
        assert!(session["session_info"].get("password").is_none());
    }
}
