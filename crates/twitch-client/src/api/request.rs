use reqwest::Method;
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use super::*;

const JSON: &str = "application/json";
const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";

/// A request against the Twitch API before defaults are applied.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// Path relative to the API host, or an absolute URL.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub method: Method,
    /// Caller headers; these win over the defaults.
    pub headers: HeaderMap,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
            method,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        self.query.push((key.to_owned(), value.to_string()));
        self
    }

    /// Append a query pair only when a value is present.
    pub fn query_opt(self, key: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.query(key, v),
            None => self,
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Result<Self, TwitchError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| TwitchError::InvalidHeader(e.to_string()))?;
        let value =
            HeaderValue::from_str(value).map_err(|e| TwitchError::InvalidHeader(e.to_string()))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Request body after encoding for its content type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Json(String),
    Form(String),
    /// Non-object payloads are sent as they are.
    Raw(String),
}

impl Body {
    pub fn encode(content_type: &str, body: &Value) -> Result<Self, TwitchError> {
        match body {
            Value::Object(map) if content_type.starts_with(FORM_URLENCODED) => {
                Ok(Self::Form(encode_form(map)))
            }
            Value::Object(_) if content_type.starts_with(JSON) => {
                Ok(Self::Json(serde_json::to_string(body)?))
            }
            Value::String(s) => Ok(Self::Raw(s.clone())),
            other => Ok(Self::Raw(other.to_string())),
        }
    }

    pub fn into_string(self) -> String {
        match self {
            Self::Json(s) | Self::Form(s) | Self::Raw(s) => s,
        }
    }
}

/// Form-encode an object. `null` entries are skipped and arrays expand
/// into one pair per element.
pub fn encode_form(map: &serde_json::Map<String, Value>) -> String {
    fn scalar(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    let mut form = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in map {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items.iter().filter(|v| !v.is_null()) {
                    form.append_pair(key, &scalar(item));
                }
            }
            other => {
                form.append_pair(key, &scalar(other));
            }
        }
    }
    form.finish()
}

/// Decode a response body by status and content type.
///
/// Status >= 400 becomes [`TwitchError::ApiError`] carrying the parsed body,
/// 204 yields `null`, JSON is parsed (a JSON string holding JSON is
/// unwrapped once), and anything else is returned as a JSON string.
pub fn decode_body(status: u16, content_type: &str, text: &str) -> Result<Value, TwitchError> {
    let is_json = content_type.contains("json");

    if status >= 400 {
        let body = if is_json {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()))
        } else {
            Value::String(text.to_owned())
        };
        return Err(TwitchError::ApiError { status, body });
    }

    if status == 204 {
        return Ok(Value::Null);
    }

    if !is_json {
        return Ok(Value::String(text.to_owned()));
    }

    match serde_json::from_str::<Value>(text)? {
        Value::String(inner) => Ok(serde_json::from_str(&inner).unwrap_or(Value::String(inner))),
        data => Ok(data),
    }
}

/// The base with a trailing slash, so relative joins keep its path prefix.
fn base_dir(base: &Url) -> Url {
    let mut dir = base.clone();
    if !dir.path().ends_with('/') {
        let with_slash = format!("{}/", dir.path());
        dir.set_path(&with_slash);
    }
    dir
}

/// Append path segments under a base URL. Each segment is percent-encoded
/// on its own, so `/` or `?` inside an id cannot change the route.
pub(super) fn endpoint_url(base: &Url, segments: &[&str]) -> Result<Url, TwitchError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| TwitchError::UrlParse(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

impl TwitchApiClient {
    /// Resolve a request path against the API host.
    pub(super) fn api_url(&self, path: &str, query: &[(String, String)]) -> Result<Url, TwitchError> {
        let mut url = match Url::parse(path) {
            Ok(absolute) => absolute,
            Err(url::ParseError::RelativeUrlWithoutBase) => {
                base_dir(&self.config.api_base).join(path.trim_start_matches('/'))?
            }
            Err(e) => return Err(e.into()),
        };

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Default headers merged with the caller's, plus `Client-ID`.
    pub(super) fn request_headers(&self, overrides: &HeaderMap) -> Result<HeaderMap, TwitchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_V5));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON));
        for (name, value) in overrides {
            headers.insert(name.clone(), value.clone());
        }
        if let Some(client_id) = &self.config.client_id {
            let value = HeaderValue::from_str(client_id)
                .map_err(|e| TwitchError::InvalidHeader(e.to_string()))?;
            headers.insert("client-id", value);
        }
        Ok(headers)
    }

    /// Send a request and decode the response.
    pub async fn request(&self, req: ApiRequest) -> Result<Value, TwitchError> {
        let url = self.api_url(&req.path, &req.query)?;
        let headers = self.request_headers(&req.headers)?;
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or(JSON)
            .to_owned();

        tracing::debug!(method = %req.method, url = %url, "Twitch API request");

        let mut builder = self.http.request(req.method, url.clone()).headers(headers);
        if let Some(body) = &req.body {
            builder = builder.body(Body::encode(&content_type, body)?.into_string());
        }

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let resp_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("text")
            .to_owned();
        let text = resp.text().await?;

        let decoded = decode_body(status, &resp_type, &text);
        if let Err(TwitchError::ApiError { status, body }) = &decoded {
            tracing::warn!(url = %url, status, %body, "Twitch API error");
        }
        decoded
    }

    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value, TwitchError> {
        self.request(with_query(ApiRequest::new(Method::GET, path), query))
            .await
    }

    pub async fn post(
        &self,
        path: &str,
        body: Value,
        query: &[(&str, String)],
    ) -> Result<Value, TwitchError> {
        self.request(with_query(ApiRequest::new(Method::POST, path), query).body(body))
            .await
    }

    pub async fn put(
        &self,
        path: &str,
        body: Value,
        query: &[(&str, String)],
    ) -> Result<Value, TwitchError> {
        self.request(with_query(ApiRequest::new(Method::PUT, path), query).body(body))
            .await
    }

    pub async fn delete(&self, path: &str, query: &[(&str, String)]) -> Result<Value, TwitchError> {
        self.request(with_query(ApiRequest::new(Method::DELETE, path), query))
            .await
    }

    /// GET and deserialize into an upstream record type.
    pub(super) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, TwitchError> {
        let value = self.get(path, query).await?;
        Ok(serde_json::from_value(value)?)
    }
}

fn with_query(req: ApiRequest, query: &[(&str, String)]) -> ApiRequest {
    query
        .iter()
        .fold(req, |req, (key, value)| req.query(key, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(client_id: Option<&str>) -> TwitchApiClient {
        TwitchApiClient::new(ClientConfig::new(client_id.map(String::from)))
    }

    #[test]
    fn relative_path_is_joined_onto_api_host() {
        let url = client(None)
            .api_url(
                "kraken/streams",
                &[("limit".into(), "25".into()), ("offset".into(), "0".into())],
            )
            .unwrap();
        assert_eq!(url.as_str(), "https://api.twitch.tv/kraken/streams?limit=25&offset=0");
    }

    #[test]
    fn absolute_url_overrides_api_host() {
        let url = client(None)
            .api_url("https://usher.ttvnw.net/api/channel/hls/x.m3u8", &[])
            .unwrap();
        assert_eq!(url.host_str(), Some("usher.ttvnw.net"));
        assert_eq!(url.path(), "/api/channel/hls/x.m3u8");
        assert!(url.query().is_none());
    }

    #[test]
    fn api_base_with_path_keeps_its_prefix() {
        let config = ClientConfig::new(None).with_bases(
            Url::parse("http://proxy.local/twitch").unwrap(),
            Url::parse("http://proxy.local/usher").unwrap(),
        );
        let url = TwitchApiClient::new(config)
            .api_url("/helix/games", &[("id".into(), "1".into())])
            .unwrap();
        assert_eq!(url.as_str(), "http://proxy.local/twitch/helix/games?id=1");
    }

    #[test]
    fn endpoint_segments_keep_base_prefix() {
        let base = Url::parse("http://proxy.local/usher").unwrap();
        let url = endpoint_url(&base, &["api", "channel", "hls", "x.m3u8"]).unwrap();
        assert_eq!(url.as_str(), "http://proxy.local/usher/api/channel/hls/x.m3u8");

        let base = Url::parse("https://api.twitch.tv").unwrap();
        let url = endpoint_url(&base, &["kraken", "channels", "1"]).unwrap();
        assert_eq!(url.as_str(), "https://api.twitch.tv/kraken/channels/1");
    }

    #[test]
    fn endpoint_segments_are_encoded() {
        let base = Url::parse("https://api.twitch.tv/").unwrap();
        let url = endpoint_url(&base, &["kraken", "channels", "a/b?x=y"]).unwrap();
        assert_eq!(url.path(), "/kraken/channels/a%2Fb%3Fx=y");
        assert_eq!(url.query(), None);
    }

    #[test]
    fn absent_query_values_are_omitted() {
        let req = ApiRequest::new(Method::GET, "kraken/streams")
            .query("limit", 25)
            .query_opt("game", None::<&str>)
            .query_opt("language", Some("en"));
        assert_eq!(
            req.query,
            vec![
                ("limit".to_string(), "25".to_string()),
                ("language".to_string(), "en".to_string()),
            ]
        );
    }

    #[test]
    fn default_headers_pin_v5_and_inject_client_id() {
        let headers = client(Some("abc")).request_headers(&HeaderMap::new()).unwrap();
        assert_eq!(headers[ACCEPT], ACCEPT_V5);
        assert_eq!(headers[CONTENT_TYPE], "application/json");
        assert_eq!(headers["client-id"], "abc");
    }

    #[test]
    fn client_id_header_is_omitted_without_credential() {
        let headers = client(None).request_headers(&HeaderMap::new()).unwrap();
        assert!(headers.get("client-id").is_none());
    }

    #[test]
    fn caller_headers_override_defaults() {
        let req = ApiRequest::new(Method::POST, "x")
            .header("Content-Type", FORM_URLENCODED)
            .unwrap();
        let headers = client(None).request_headers(&req.headers).unwrap();
        assert_eq!(headers[CONTENT_TYPE], FORM_URLENCODED);
        assert_eq!(headers[ACCEPT], ACCEPT_V5);
    }

    #[test]
    fn body_encoding_follows_content_type() {
        let body = json!({ "a": 1, "b": "x y" });
        assert_eq!(
            Body::encode("application/json", &body).unwrap(),
            Body::Json(r#"{"a":1,"b":"x y"}"#.into())
        );
        assert_eq!(
            Body::encode(FORM_URLENCODED, &body).unwrap(),
            Body::Form("a=1&b=x+y".into())
        );
        assert_eq!(
            Body::encode("application/json", &json!("raw")).unwrap(),
            Body::Raw("raw".into())
        );
    }

    #[test]
    fn form_encoding_skips_null_and_repeats_arrays() {
        let body = json!({ "id": ["1", "2"], "skip": null, "q": "a&b" });
        let encoded = encode_form(body.as_object().unwrap());
        assert_eq!(encoded, "id=1&id=2&q=a%26b");
    }

    #[test]
    fn no_content_is_null_for_any_content_type() {
        assert_eq!(decode_body(204, "application/json", "").unwrap(), Value::Null);
        assert_eq!(decode_body(204, "text/plain", "").unwrap(), Value::Null);
    }

    #[test]
    fn json_body_is_parsed_and_string_json_unwrapped_once() {
        assert_eq!(
            decode_body(200, "application/json; charset=utf-8", r#"{"a":1}"#).unwrap(),
            json!({ "a": 1 })
        );
        assert_eq!(
            decode_body(200, "application/json", r#""{\"a\":1}""#).unwrap(),
            json!({ "a": 1 })
        );
        assert_eq!(
            decode_body(200, "application/json", r#""plain""#).unwrap(),
            json!("plain")
        );
    }

    #[test]
    fn text_body_is_returned_raw() {
        assert_eq!(
            decode_body(200, "text/html", "<p>hi</p>").unwrap(),
            json!("<p>hi</p>")
        );
    }

    #[test]
    fn error_status_carries_parsed_or_raw_body() {
        match decode_body(404, "application/json", r#"{"error":"Not Found"}"#) {
            Err(TwitchError::ApiError { status, body }) => {
                assert_eq!(status, 404);
                assert_eq!(body, json!({ "error": "Not Found" }));
            }
            other => panic!("unexpected: {other:?}"),
        }
        match decode_body(500, "text/plain", "boom") {
            Err(TwitchError::ApiError { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, json!("boom"));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn malformed_json_success_body_is_a_parse_error() {
        assert!(matches!(
            decode_body(200, "application/json", "{not json"),
            Err(TwitchError::Json(_))
        ));
    }
}
