// Copyright (c) 2026 Billbook. All Rights Reserved.

//! The HTTP request gateway: every API call goes through `Gateway::call`.

use std::sync::Arc;

use futures::*;

use hyper;
use hyper::client::{Client, HttpConnector};
use hyper::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use hyper::{Method, StatusCode};
use hyper_tls::HttpsConnector;

use serde;
use serde_json;

use url::Url;

use bb;
use bb::api::envelope::NormalizedResult;
use bb::error::{Error, ErrorKind};
use bb::session::SessionStore;
use bb::util::futures::into_future_trait;

pub use bb::types::RequestParam;

/// The status and raw body of an HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new<B: Into<Vec<u8>>>(status: StatusCode, body: B) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Something that can carry a request to the API and bring back a response.
///
/// Implementations resolve to `TransportError` when no response could be
/// obtained at all; any HTTP status, including errors, is a response.
pub trait Transport: Send + Sync {
    fn send(&self, request: hyper::Request<hyper::Body>) -> bb::Future<RawResponse>;
}

/// The production transport: HTTPS via hyper.
pub struct HttpsTransport {
    http_client: Client<HttpsConnector<HttpConnector>>,
}

impl HttpsTransport {
    pub fn new() -> bb::Result<Self> {
        let connector = HttpsConnector::new(4)
            .map_err(|e| Error::with_chain(e, ErrorKind::TransportError("tls setup".into())))?;
        Ok(Self {
            http_client: Client::builder().build(connector),
        })
    }
}

impl Transport for HttpsTransport {
    fn send(&self, request: hyper::Request<hyper::Body>) -> bb::Future<RawResponse> {
        let what = format!("{} {}", request.method(), request.uri());
        let what_clone = what.clone();

        let f = self
            .http_client
            .request(request)
            .map_err(move |e| {
                Error::with_chain(e, ErrorKind::TransportError(format!("{} :: execute", what)))
            })
            .and_then(move |resp| {
                let status = resp.status();
                resp.into_body()
                    .concat2()
                    .map_err(move |e| {
                        Error::with_chain(
                            e,
                            ErrorKind::TransportError(format!("{} :: response", what_clone)),
                        )
                    })
                    .map(move |body: hyper::Chunk| RawResponse::new(status, body.to_vec()))
            });

        into_future_trait(f)
    }
}

/// Builds authenticated requests, dispatches them over a `Transport` and
/// normalizes the responses.
///
/// A 401 from any endpoint clears the stored session and resolves to
/// `ErrorKind::SessionExpired`.
#[derive(Clone)]
pub struct Gateway {
    base_url: Url,
    transport: Arc<dyn Transport>,
    session: SessionStore,
}

impl Gateway {
    pub fn new(base_url: Url, transport: Arc<dyn Transport>, session: SessionStore) -> Self {
        Self {
            base_url,
            transport,
            session,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn set_base_url(&mut self, base_url: Url) {
        self.base_url = base_url;
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Issues `method route` with an optional JSON body.
    pub fn call<I, P>(
        &self,
        route: &str,
        method: Method,
        params: I,
        payload: Option<&P>,
    ) -> bb::Future<NormalizedResult>
    where
        I: IntoIterator<Item = RequestParam>,
        P: serde::Serialize,
    {
        self.dispatch(route, method, params, payload, true)
    }

    /// Like `call`, but a 401 is reported as an ordinary failed result and
    /// leaves the stored session alone. Used for the credential check itself,
    /// where 401 means "wrong password", not "session expired".
    pub fn call_unguarded<I, P>(
        &self,
        route: &str,
        method: Method,
        params: I,
        payload: Option<&P>,
    ) -> bb::Future<NormalizedResult>
    where
        I: IntoIterator<Item = RequestParam>,
        P: serde::Serialize,
    {
        self.dispatch(route, method, params, payload, false)
    }

    /// The full request URL: base URL path + route, plus query parameters.
    pub fn url_for<I>(&self, route: &str, params: I) -> Url
    where
        I: IntoIterator<Item = RequestParam>,
    {
        let mut url = self.base_url.clone();
        let path = format!(
            "{}/{}",
            self.base_url.path().trim_end_matches('/'),
            route.trim_start_matches('/')
        );
        url.set_path(&path);
        url.set_query(None);

        let params: Vec<RequestParam> = params.into_iter().collect();
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k.as_str(), v.as_str());
            }
        }
        url
    }

    fn build_request<I, P>(
        &self,
        route: &str,
        method: Method,
        params: I,
        payload: Option<&P>,
    ) -> bb::Result<hyper::Request<hyper::Body>>
    where
        I: IntoIterator<Item = RequestParam>,
        P: serde::Serialize,
    {
        let url = self.url_for(route, params);
        let uri = url
            .as_str()
            .parse::<hyper::Uri>()
            .map_err(|e| Error::with_chain(e, format!("bb:request<{}>:url", url)))?;

        let body = match payload {
            Some(p) => hyper::Body::from(serde_json::to_string(p)?),
            None => hyper::Body::empty(),
        };

        let mut req = hyper::Request::builder()
            .method(method)
            .uri(uri)
            .body(body)
            .map_err(|e| Error::with_chain(e, format!("bb:request<{}>:build", url)))?;

        req.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        // Only authenticated sessions carry a bearer token:
        if let Some(token) = self.session.token() {
            let value = HeaderValue::from_str(&format!("Bearer {}", token.as_ref()))
                .map_err(|e| Error::with_chain(e, ErrorKind::InvalidSession("bad token".into())))?;
            req.headers_mut().insert(AUTHORIZATION, value);
        }

        Ok(req)
    }

    fn dispatch<I, P>(
        &self,
        route: &str,
        method: Method,
        params: I,
        payload: Option<&P>,
        expire_on_unauthorized: bool,
    ) -> bb::Future<NormalizedResult>
    where
        I: IntoIterator<Item = RequestParam>,
        P: serde::Serialize,
    {
        let req = match self.build_request(route, method, params, payload) {
            Ok(req) => req,
            Err(e) => return into_future_trait(future::err(e)),
        };

        let what = format!("{} {}", req.method(), req.uri().path());
        debug!(request = %what, "bb:gateway:send");

        let session = self.session.clone();
        let f = self
            .transport
            .send(req)
            .and_then(move |raw: RawResponse| -> bb::Result<NormalizedResult> {
                debug!(
                    request = %what,
                    status = raw.status.as_u16(),
                    bytes = raw.body.len(),
                    "bb:gateway:response"
                );
                if raw.status == StatusCode::UNAUTHORIZED && expire_on_unauthorized {
                    warn!(request = %what, "bb:gateway:session expired; clearing session");
                    session.clear();
                    return Err(ErrorKind::SessionExpired.into());
                }
                Ok(NormalizedResult::from_body(raw.status, &raw.body))
            });

        into_future_trait(f)
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use bb::model::FeatureSet;
    use bb::session;
    use bb::storage::{self, MemoryStorage, Storage};
    use bb::util::futures::block_on;

    /// A request as seen by a `ScriptedTransport`.
    #[derive(Debug, Clone)]
    pub struct Recorded {
        pub method: Method,
        pub path: String,
        pub query: Option<String>,
        pub content_type: Option<String>,
        pub authorization: Option<String>,
        pub body: Option<serde_json::Value>,
    }

    /// Answers requests from a queue of canned responses and records what
    /// it was sent. An exhausted queue behaves like a dropped connection.
    #[derive(Default)]
    pub struct ScriptedTransport {
        responses: Mutex<VecDeque<RawResponse>>,
        recorded: Mutex<Vec<Recorded>>,
    }

    impl ScriptedTransport {
        pub fn new() -> Self {
            Default::default()
        }

        pub fn respond(&self, status: StatusCode, body: &str) -> &Self {
            self.responses
                .lock()
                .unwrap()
                .push_back(RawResponse::new(status, body.as_bytes().to_vec()));
            self
        }

        pub fn recorded(&self) -> Vec<Recorded> {
            self.recorded.lock().unwrap().clone()
        }

        pub fn last(&self) -> Recorded {
            self.recorded().pop().expect("no request was sent")
        }
    }

    impl Transport for ScriptedTransport {
        fn send(&self, request: hyper::Request<hyper::Body>) -> bb::Future<RawResponse> {
            let (parts, body) = request.into_parts();
            let header = |name: hyper::header::HeaderName| {
                parts
                    .headers
                    .get(name)
                    .and_then(|v: &HeaderValue| v.to_str().ok())
                    .map(String::from)
            };
            let mut recorded = Recorded {
                method: parts.method.clone(),
                path: parts.uri.path().to_string(),
                query: parts.uri.query().map(String::from),
                content_type: header(CONTENT_TYPE),
                authorization: header(AUTHORIZATION),
                body: None,
            };
            let bytes = body.concat2().wait().unwrap().to_vec();
            if !bytes.is_empty() {
                recorded.body = Some(serde_json::from_slice(&bytes).unwrap());
            }
            self.recorded.lock().unwrap().push(recorded);

            match self.responses.lock().unwrap().pop_front() {
                Some(response) => into_future_trait(future::ok(response)),
                None => into_future_trait(future::err(
                    ErrorKind::TransportError("connection refused".into()).into(),
                )),
            }
        }
    }

    pub fn gateway_with(transport: Arc<ScriptedTransport>) -> (Arc<MemoryStorage>, Gateway) {
        let backing = Arc::new(MemoryStorage::new());
        let session = SessionStore::new(backing.clone());
        let gateway = Gateway::new(
            "https://billbook.test/api".parse().unwrap(),
            transport,
            session,
        );
        (backing, gateway)
    }

    fn no_body() -> Option<&'static serde_json::Value> {
        None
    }

    #[test]
    fn anonymous_requests_carry_no_authorization() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(StatusCode::OK, r#"{"status": true, "body": []}"#);
        let (_, gateway) = gateway_with(transport.clone());

        let result = block_on(gateway.call("/customers", Method::GET, vec![], no_body())).unwrap();

        assert!(result.is_ok());
        let sent = transport.last();
        assert_eq!(sent.method, Method::GET);
        assert_eq!(sent.path, "/api/customers");
        assert_eq!(sent.content_type, Some("application/json".to_string()));
        assert!(sent.authorization.is_none());
        assert!(sent.body.is_none());
    }

    #[test]
    fn logged_in_requests_carry_bearer_token_and_json_body() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(StatusCode::OK, r#"{"status": true, "body": {"id": 9}}"#);
        let (_, gateway) = gateway_with(transport.clone());
        gateway.session().save(&session::tests::session(), None);

        let body = json!({"name": "Acme"});
        let result = block_on(gateway.call(
            "/customers",
            Method::POST,
            vec![("notify".to_string(), "true".to_string())],
            Some(&body),
        ))
        .unwrap();

        assert_eq!(result.data(), &json!({"id": 9}));
        let sent = transport.last();
        assert_eq!(sent.authorization, Some("Bearer tok-1".to_string()));
        assert_eq!(sent.query, Some("notify=true".to_string()));
        assert_eq!(sent.body, Some(body));
    }

    #[test]
    fn business_failure_is_a_result_not_an_error() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(StatusCode::OK, r#"{"status": false, "message": "bad"}"#);
        let (_, gateway) = gateway_with(transport);

        let result = block_on(gateway.call("/bills", Method::GET, vec![], no_body())).unwrap();
        assert!(!result.is_ok());
        assert_eq!(result.failure_message(), "bad");
    }

    #[test]
    fn transport_failure_is_reported() {
        let transport = Arc::new(ScriptedTransport::new());
        let (_, gateway) = gateway_with(transport);

        let err = block_on(gateway.call("/bills", Method::GET, vec![], no_body())).unwrap_err();
        match *err.kind() {
            ErrorKind::TransportError(_) => {}
            ref other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn unauthorized_clears_the_session() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(StatusCode::UNAUTHORIZED, "");
        let (backing, gateway) = gateway_with(transport);
        gateway
            .session()
            .save(&session::tests::session(), Some(&FeatureSet::basic()));

        let err = block_on(gateway.call("/customers", Method::GET, vec![], no_body())).unwrap_err();

        assert!(err.is_session_expired());
        assert!(backing.is_empty());
        assert!(gateway.session().session().is_none());
    }

    #[test]
    fn concurrent_unauthorized_responses_clear_once_and_agree() {
        let transport = Arc::new(ScriptedTransport::new());
        transport
            .respond(StatusCode::UNAUTHORIZED, "")
            .respond(StatusCode::UNAUTHORIZED, r#"{"status": false}"#);
        let (backing, gateway) = gateway_with(transport);
        gateway.session().save(&session::tests::session(), None);
        backing.set("language", "en");

        let first = gateway
            .call("/customers", Method::GET, vec![], no_body())
            .then(|r| Ok::<_, Error>(r));
        let second = gateway
            .call("/bills", Method::GET, vec![], no_body())
            .then(|r| Ok::<_, Error>(r));
        let (a, b): (bb::Result<NormalizedResult>, bb::Result<NormalizedResult>) =
            block_on(into_future_trait(first.join(second))).unwrap();

        assert!(a.unwrap_err().is_session_expired());
        assert!(b.unwrap_err().is_session_expired());
        assert_eq!(backing.len(), 1);
        for key in storage::SESSION_KEYS.iter() {
            assert!(backing.get(key).is_none());
        }
    }

    #[test]
    fn unguarded_calls_leave_the_session_alone_on_401() {
        let transport = Arc::new(ScriptedTransport::new());
        transport.respond(
            StatusCode::UNAUTHORIZED,
            r#"{"status": false, "message": "Invalid credentials"}"#,
        );
        let (_, gateway) = gateway_with(transport);
        gateway.session().save(&session::tests::session(), None);

        let result =
            block_on(gateway.call_unguarded("/auth/login", Method::POST, vec![], no_body())).unwrap();

        assert!(!result.is_ok());
        assert_eq!(result.status(), StatusCode::UNAUTHORIZED);
        assert!(gateway.session().is_logged_in());
    }

    #[test]
    fn urls_join_base_path_and_route() {
        let transport = Arc::new(ScriptedTransport::new());
        let (_, gateway) = gateway_with(transport);
        let url = gateway.url_for(
            "reports/payments",
            vec![("from".to_string(), "2026-01-01".to_string())],
        );
        assert_eq!(
            url.as_str(),
            "https://billbook.test/api/reports/payments?from=2026-01-01"
        );
    }
}
