use std::collections::BTreeMap;

use crate::auth::Credentials;
use crate::hash::{hmac_sha256, sha256_hex};
use crate::utils;

use super::headers::*;

// AWS Signature Version '4' constants.
pub const SIGN_V4_ALGORITHM: &str = "AWS4-HMAC-SHA256";
pub const ISO_8601_FORMAT: &str = "%Y%m%dT%H%M%SZ";
pub const YYYYMMDD: &str = "%Y%m%d";
pub const SERVICE_S3: &str = "s3";

/// Percent-encodes everything but RFC 3986 unreserved characters (and `/`
/// unless `encode_slash` is set), the way SigV4 canonicalization expects.
pub fn uri_encode(input: &str, encode_slash: bool) -> String {
    let mut encoded = String::with_capacity(input.len());
    for b in input.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                encoded.push(b as char)
            }
            b'/' if !encode_slash => encoded.push('/'),
            _ => encoded.push_str(&format!("%{:02X}", b)),
        }
    }
    encoded
}

pub fn get_scope(date: &utils::DateTime, region: &str, service: &str) -> String {
    format!(
        "{}/{}/{}/aws4_request",
        date.format(YYYYMMDD),
        region,
        service
    )
}

pub fn get_signing_key(
    secret_key: &str,
    date: &utils::DateTime,
    region: &str,
    service: &str,
) -> Vec<u8> {
    let date = hmac_sha256(
        format!("AWS4{}", secret_key).as_bytes(),
        date.format(YYYYMMDD).to_string().as_bytes(),
    );
    let region = hmac_sha256(&date, region.as_bytes());
    let service = hmac_sha256(&region, service.as_bytes());
    hmac_sha256(&service, b"aws4_request")
}

// Query must already be uri-encoded; pairs are sorted here.
fn get_canonical_query(query: &str) -> String {
    let mut pairs: Vec<&str> = query.split('&').filter(|p| !p.is_empty()).collect();
    pairs.sort_unstable();
    pairs.join("&")
}

/// Lower-cased header names mapped to trimmed values.
pub type SignedHeaders = BTreeMap<String, String>;

pub fn get_canonical_request(
    method: &str,
    canonical_uri: &str,
    query: &str,
    headers: &SignedHeaders,
    payload_hash: &str,
) -> String {
    let mut canonical_headers = String::new();
    for (k, v) in headers {
        canonical_headers.push_str(k);
        canonical_headers.push(':');
        canonical_headers.push_str(v);
        canonical_headers.push('\n');
    }
    let signed_headers: Vec<&str> = headers.keys().map(|k| k.as_str()).collect();
    [
        method,
        canonical_uri,
        &get_canonical_query(query),
        &canonical_headers,
        &signed_headers.join(";"),
        payload_hash,
    ]
    .join("\n")
}

pub fn get_string_to_sign(canonical_request: &str, date: &utils::DateTime, scope: &str) -> String {
    [
        SIGN_V4_ALGORITHM,
        &date.format(ISO_8601_FORMAT).to_string(),
        scope,
        &sha256_hex(canonical_request.as_bytes()),
    ]
    .join("\n")
}

pub fn get_signature(signing_key: &[u8], string_to_sign: &str) -> String {
    hex::encode(hmac_sha256(signing_key, string_to_sign.as_bytes()))
}

/// Signs a request for `service` and returns the complete set of headers
/// (including `Authorization`) the request must carry.
pub fn sign_v4(
    method: &str,
    url: &url::Url,
    payload: &[u8],
    credentials: &Credentials,
    region: &str,
    service: &str,
    date: utils::DateTime,
) -> Vec<(&'static str, String)> {
    let payload_hash = sha256_hex(payload);
    let amz_date = date.format(ISO_8601_FORMAT).to_string();
    let host = match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{}:{}", host, port),
        (Some(host), None) => host.to_owned(),
        (None, _) => String::new(),
    };

    let mut headers = SignedHeaders::new();
    headers.insert(HOST.to_lowercase(), host.clone());
    headers.insert(AMZ_CONTENT_SHA256.to_lowercase(), payload_hash.clone());
    headers.insert(AMZ_DATE.to_lowercase(), amz_date.clone());

    let canonical_request = get_canonical_request(
        method,
        url.path(),
        url.query().unwrap_or(""),
        &headers,
        &payload_hash,
    );
    let scope = get_scope(&date, region, service);
    let string_to_sign = get_string_to_sign(&canonical_request, &date, &scope);
    let signing_key = get_signing_key(&credentials.secret_key, &date, region, service);
    let signature = get_signature(&signing_key, &string_to_sign);
    let signed_headers: Vec<&str> = headers.keys().map(|k| k.as_str()).collect();

    let authorization = format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        SIGN_V4_ALGORITHM,
        credentials.access_key,
        scope,
        signed_headers.join(";"),
        signature
    );

    vec![
        (HOST, host),
        (AMZ_CONTENT_SHA256, payload_hash),
        (AMZ_DATE, amz_date),
        (AUTHORIZATION, authorization),
    ]
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    const EXAMPLE_SECRET: &str = "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY";

    #[test]
    fn test_uri_encode() {
        assert_eq!(uri_encode("photos/2021 cat.png", false), "photos/2021%20cat.png");
        assert_eq!(uri_encode("a/b", true), "a%2Fb");
        assert_eq!(uri_encode("~-_.AZaz09", true), "~-_.AZaz09");
        assert_eq!(uri_encode("é", true), "%C3%A9");
    }

    #[test]
    fn test_signing_key() {
        let date = chrono::Utc.ymd(2012, 2, 15).and_hms(0, 0, 0);
        let key = get_signing_key(EXAMPLE_SECRET, &date, "us-east-1", "iam");
        assert_eq!(
            hex::encode(key),
            "f4780e2d9f65fa895f9c67b32ce1baf0b0d8a43505a000a1a9e090d414db404d"
        );
    }

    #[test]
    fn test_signature_get_vanilla() {
        let date = chrono::Utc.ymd(2015, 8, 30).and_hms(12, 36, 0);
        let mut headers = SignedHeaders::new();
        headers.insert("host".to_owned(), "example.amazonaws.com".to_owned());
        headers.insert("x-amz-date".to_owned(), "20150830T123600Z".to_owned());
        let canonical_request =
            get_canonical_request("GET", "/", "", &headers, &sha256_hex(b""));
        let scope = get_scope(&date, "us-east-1", "service");
        assert_eq!(scope, "20150830/us-east-1/service/aws4_request");
        let string_to_sign = get_string_to_sign(&canonical_request, &date, &scope);
        let signing_key = get_signing_key(EXAMPLE_SECRET, &date, "us-east-1", "service");
        assert_eq!(
            get_signature(&signing_key, &string_to_sign),
            "5fa00fa31553b73ebf1942676e86291e8372ff2a2260956d9b8aae1d763fbf31"
        );
    }

    #[test]
    fn test_canonical_query_sorted() {
        assert_eq!(
            get_canonical_query("forceStart=true&clientToken=abc"),
            "clientToken=abc&forceStart=true"
        );
        assert_eq!(get_canonical_query(""), "");
    }

    #[test]
    fn test_sign_v4_headers() {
        let date = chrono::Utc.ymd(2021, 7, 1).and_hms(10, 0, 0);
        let url = url::Url::parse("http://127.0.0.1:9000/minio/admin/v3/heal/photos").unwrap();
        let cred = Credentials::new("admin", "password").unwrap();
        let headers = sign_v4("POST", &url, b"{}", &cred, "us-east-1", SERVICE_S3, date);
        let get = |name: &str| {
            headers
                .iter()
                .find(|(k, _)| *k == name)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(get(HOST), "127.0.0.1:9000");
        assert_eq!(get(AMZ_DATE), "20210701T100000Z");
        assert_eq!(get(AMZ_CONTENT_SHA256), sha256_hex(b"{}"));
        let authorization = get(AUTHORIZATION);
        assert!(authorization.starts_with(
            "AWS4-HMAC-SHA256 Credential=admin/20210701/us-east-1/s3/aws4_request, \
             SignedHeaders=host;x-amz-content-sha256;x-amz-date, Signature="
        ));
        let signature = authorization.rsplit('=').next().unwrap();
        assert_eq!(signature.len(), 64);
    }
}
