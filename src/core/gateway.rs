//! HTTP gateway face.
//!
//! Each interest becomes `GET {gateway}{name_uri}`. The gateway answers with
//! the data content as the body and may name the data packet in a response
//! header; without it the data is assumed to carry the interest name.

use ndnfs_core::{Data, Face, Interest, Name, Response};

use crate::core::error::FetchError;
use crate::utils::fetch::{self, FetchedData};

/// [`Face`] that forwards interests to an HTTP gateway.
#[derive(Debug, Clone)]
pub struct GatewayFace {
    base_url: String,
}

impl GatewayFace {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Face for GatewayFace {
    async fn express_interest(&self, interest: Interest) -> Response {
        let url = gateway_url(&self.base_url, &interest.name);
        let timeout_ms = i32::try_from(interest.lifetime.as_millis()).unwrap_or(i32::MAX);

        match fetch::fetch_bytes(&url, timeout_ms).await {
            Ok(fetched) => Response::Data(into_data(&interest.name, fetched)),
            Err(err) => into_failure(err),
        }
    }
}

/// URL the gateway serves `name` at.
pub fn gateway_url(base_url: &str, name: &Name) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), name.to_uri())
}

/// Name of the data packet behind a gateway response.
///
/// A header that does not parse, or names something other than an extension
/// of the interest, is ignored.
fn resolve_data_name(interest_name: &Name, header: Option<&str>) -> Name {
    header
        .and_then(|value| value.parse::<Name>().ok())
        .filter(|name| name.starts_with(interest_name))
        .unwrap_or_else(|| interest_name.clone())
}

fn into_data(interest_name: &Name, fetched: FetchedData) -> Data {
    Data::new(
        resolve_data_name(interest_name, fetched.data_name.as_deref()),
        fetched.bytes,
    )
}

fn into_failure(err: FetchError) -> Response {
    if err.is_no_data() {
        Response::Timeout
    } else {
        Response::TransportError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndnfs_core::client::ContentKind;

    fn name(uri: &str) -> Name {
        uri.parse().unwrap()
    }

    #[test]
    fn test_gateway_url() {
        assert_eq!(
            gateway_url("http://gw/ndn/", &name("/ndnfs/my%20docs")),
            "http://gw/ndn/ndnfs/my%20docs"
        );
        assert_eq!(gateway_url("http://gw", &Name::new()), "http://gw/");
    }

    #[test]
    fn test_data_name_from_header() {
        let interest = name("/ndnfs/readme.txt");
        let resolved = resolve_data_name(
            &interest,
            Some("/ndnfs/readme.txt/%C1.FS.file/%FD%05"),
        );
        let data = Data::new(resolved, Vec::new());
        assert_eq!(
            data.content_kind(),
            ContentKind::FileInfo { version: Some(5) }
        );
    }

    #[test]
    fn test_bad_header_falls_back_to_interest_name() {
        let interest = name("/ndnfs/photos");
        assert_eq!(resolve_data_name(&interest, None), interest);
        assert_eq!(resolve_data_name(&interest, Some("/other/x")), interest);
        assert_eq!(resolve_data_name(&interest, Some("/bad%")), interest);
    }

    #[test]
    fn test_failures_map_to_responses() {
        assert_eq!(into_failure(FetchError::Timeout), Response::Timeout);
        assert_eq!(into_failure(FetchError::HttpError(404)), Response::Timeout);
        assert_eq!(
            into_failure(FetchError::HttpError(500)),
            Response::TransportError("HTTP error: 500".into())
        );
    }
}
