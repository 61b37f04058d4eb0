#![allow(dead_code)]

use chrono::{DateTime, Duration, Utc};
use serde_json::{Map, Value, json};
use tokenizer_auth::{EncodedSecret, encode_secret};

pub const SECRET: &str = "LeeJaehyeok637637123231231231123";

pub fn test_secret() -> EncodedSecret {
    encode_secret(SECRET)
}

/// Claims carried by the member access token used throughout the tests
pub fn member_claims() -> Map<String, Value> {
    let mut claims = Map::new();
    claims.insert("memberId".to_string(), json!(1));
    claims.insert("roles".to_string(), json!(["USER"]));
    claims
}

pub fn expires_in(duration: Duration) -> DateTime<Utc> {
    Utc::now() + duration
}

pub fn decode_payload(token: &str) -> Value {
    let payload = token.split('.').nth(1).expect("token has a payload part");
    let bytes = data_encoding::BASE64URL_NOPAD
        .decode(payload.as_bytes())
        .expect("payload is base64url");
    serde_json::from_slice(&bytes).expect("payload is JSON")
}
