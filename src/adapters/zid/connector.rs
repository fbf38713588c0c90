//! Zid implementation of the platform connector.
//!
//! Wraps the Zid OAuth endpoints and the v1 REST API. Category and product
//! creates carry bilingual objects with `ar`/`en` keys; product variants map
//! to the platform's `options` array.

use async_trait::async_trait;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::config::ZidConfig;
use crate::domain::foundation::UserId;
use crate::ports::{
    ConnectorError, OAuthTokens, PlatformConnector, RemoteCategoryPayload, RemoteProductPayload,
    StoreIdentity,
};

/// Store name used when the platform reports none.
const DEFAULT_STORE_NAME: &str = "My Store";

/// Zid REST connector.
pub struct ZidConnector {
    config: ZidConfig,
    client: Client,
}

impl ZidConnector {
    /// Creates a new connector.
    ///
    /// # Errors
    ///
    /// - `InvalidResponse` if the HTTP client cannot be constructed
    pub fn new(config: ZidConfig) -> Result<Self, ConnectorError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ConnectorError::InvalidResponse(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn oauth_url(&self, path: &str) -> String {
        format!("{}{}", self.config.oauth_base_url, path)
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base_url, path)
    }

    fn credentials(&self) -> Result<(&str, &str, &str), ConnectorError> {
        match (
            self.config.client_id.as_deref(),
            self.config.client_secret.as_deref(),
            self.config.redirect_uri.as_deref(),
        ) {
            (Some(id), Some(secret), Some(uri))
                if !id.is_empty() && !secret.is_empty() && !uri.is_empty() =>
            {
                Ok((id, secret, uri))
            }
            _ => Err(ConnectorError::NotConfigured(
                "Zid OAuth client credentials are not set".to_string(),
            )),
        }
    }

    async fn post_create(
        &self,
        url: String,
        access_token: &Secret<String>,
        body: &impl Serialize,
    ) -> Result<String, ConnectorError> {
        let response = self
            .client
            .post(url)
            .bearer_auth(access_token.expose_secret())
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConnectorError::Http {
                status: status.as_u16(),
            });
        }

        let created: CreatedResource = response
            .json()
            .await
            .map_err(|e| ConnectorError::InvalidResponse(e.to_string()))?;

        created.id_string().ok_or_else(|| {
            ConnectorError::InvalidResponse("create response carried no id".to_string())
        })
    }
}

#[async_trait]
impl PlatformConnector for ZidConnector {
    fn authorize_url(&self, state: &UserId) -> Result<String, ConnectorError> {
        let (client_id, _, redirect_uri) = self.credentials()?;

        let mut url = Url::parse(&self.oauth_url("/oauth/authorize"))
            .map_err(|e| ConnectorError::InvalidResponse(e.to_string()))?;
        url.query_pairs_mut()
            .append_pair("client_id", client_id)
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("state", state.as_str())
            .append_pair("scope", "read");

        Ok(url.to_string())
    }

    async fn exchange_code(&self, code: &str) -> Result<OAuthTokens, ConnectorError> {
        let (client_id, client_secret, redirect_uri) = self.credentials()?;

        let response = self
            .client
            .post(self.oauth_url("/oauth/token"))
            .header("Content-Type", "application/json")
            .json(&TokenRequest {
                client_id,
                client_secret,
                code,
                redirect_uri,
                grant_type: "authorization_code",
            })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Zid token exchange failed");
            return Err(ConnectorError::Http {
                status: status.as_u16(),
            });
        }

        let tokens: TokenResponse = response
            .json()
            .await
            .map_err(|e| ConnectorError::InvalidResponse(e.to_string()))?;

        Ok(OAuthTokens {
            access_token: Secret::new(tokens.access_token),
            refresh_token: tokens.refresh_token.map(Secret::new),
        })
    }

    async fn fetch_store_identity(
        &self,
        access_token: &Secret<String>,
    ) -> Result<StoreIdentity, ConnectorError> {
        let response = self
            .client
            .get(self.api_url("/stores/me"))
            .bearer_auth(access_token.expose_secret())
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConnectorError::Http {
                status: status.as_u16(),
            });
        }

        let identity: StoreResponse = response
            .json()
            .await
            .map_err(|e| ConnectorError::InvalidResponse(e.to_string()))?;

        Ok(StoreIdentity {
            name: identity
                .name
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| DEFAULT_STORE_NAME.to_string()),
            domain: identity.domain,
        })
    }

    async fn create_category(
        &self,
        access_token: &Secret<String>,
        payload: &RemoteCategoryPayload,
    ) -> Result<String, ConnectorError> {
        let body = CategoryBody {
            name: Localized {
                ar: &payload.name_ar,
                en: &payload.name_en,
            },
            description: Localized {
                ar: &payload.description_ar,
                en: &payload.description_en,
            },
        };
        self.post_create(self.api_url("/categories"), access_token, &body)
            .await
    }

    async fn create_product(
        &self,
        access_token: &Secret<String>,
        payload: &RemoteProductPayload,
    ) -> Result<String, ConnectorError> {
        let body = ProductBody {
            name: Localized {
                ar: &payload.name_ar,
                en: &payload.name_en,
            },
            description: Localized {
                ar: &payload.description_ar,
                en: &payload.description_en,
            },
            price: payload.price,
            compare_at_price: payload.compare_at_price,
            sku: payload.sku.as_deref(),
            options: payload
                .variants
                .iter()
                .map(|v| OptionBody {
                    name: &v.name,
                    values: &v.options,
                })
                .collect(),
        };
        self.post_create(self.api_url("/products"), access_token, &body)
            .await
    }
}

fn map_transport_error(e: reqwest::Error) -> ConnectorError {
    if e.is_timeout() {
        ConnectorError::Network("request timed out".to_string())
    } else {
        ConnectorError::Network(e.to_string())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════════

#[derive(Serialize)]
struct TokenRequest<'a> {
    client_id: &'a str,
    client_secret: &'a str,
    code: &'a str,
    redirect_uri: &'a str,
    grant_type: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
}

#[derive(Deserialize)]
struct StoreResponse {
    name: Option<String>,
    domain: Option<String>,
}

#[derive(Serialize)]
struct Localized<'a> {
    ar: &'a str,
    en: &'a str,
}

#[derive(Serialize)]
struct CategoryBody<'a> {
    name: Localized<'a>,
    description: Localized<'a>,
}

#[derive(Serialize)]
struct OptionBody<'a> {
    name: &'a str,
    values: &'a [String],
}

#[derive(Serialize)]
struct ProductBody<'a> {
    name: Localized<'a>,
    description: Localized<'a>,
    price: f64,
    compare_at_price: Option<f64>,
    sku: Option<&'a str>,
    options: Vec<OptionBody<'a>>,
}

/// Created-resource envelope; the platform reports ids as strings or
/// numbers depending on the resource.
#[derive(Deserialize)]
struct CreatedResource {
    id: serde_json::Value,
}

impl CreatedResource {
    fn id_string(&self) -> Option<String> {
        match &self.id {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> ZidConnector {
        ZidConnector::new(ZidConfig {
            client_id: Some("client-1".to_string()),
            client_secret: Some("secret-1".to_string()),
            redirect_uri: Some("https://app.example.com/api/auth/zid/callback".to_string()),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn authorize_url_carries_state_and_scope() {
        let connector = configured();
        let url = connector
            .authorize_url(&UserId::new("merchant-1").unwrap())
            .unwrap();

        assert!(url.starts_with("https://oauth.zid.sa/oauth/authorize?"));
        assert!(url.contains("client_id=client-1"));
        assert!(url.contains("state=merchant-1"));
        assert!(url.contains("scope=read"));
        assert!(url.contains("response_type=code"));
    }

    #[test]
    fn authorize_url_without_credentials_is_not_configured() {
        let connector = ZidConnector::new(ZidConfig::default()).unwrap();
        let result = connector.authorize_url(&UserId::new("merchant-1").unwrap());
        assert!(matches!(result, Err(ConnectorError::NotConfigured(_))));
    }

    #[test]
    fn category_body_serializes_bilingual_objects() {
        let body = CategoryBody {
            name: Localized {
                ar: "أزياء",
                en: "Fashion",
            },
            description: Localized { ar: "", en: "" },
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["name"]["ar"], "أزياء");
        assert_eq!(json["name"]["en"], "Fashion");
        assert_eq!(json["description"]["ar"], "");
    }

    #[test]
    fn product_body_maps_variants_to_options() {
        let options = vec!["S".to_string(), "M".to_string(), "L".to_string()];
        let body = ProductBody {
            name: Localized {
                ar: "قميص",
                en: "Shirt",
            },
            description: Localized { ar: "", en: "" },
            price: 49.0,
            compare_at_price: None,
            sku: Some("SHIRT-001"),
            options: vec![OptionBody {
                name: "Size",
                values: &options,
            }],
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["options"][0]["name"], "Size");
        assert_eq!(json["options"][0]["values"][2], "L");
        assert_eq!(json["price"], 49.0);
    }

    #[test]
    fn created_resource_accepts_string_and_numeric_ids() {
        let s: CreatedResource = serde_json::from_str(r#"{"id": "cat-1"}"#).unwrap();
        assert_eq!(s.id_string().as_deref(), Some("cat-1"));

        let n: CreatedResource = serde_json::from_str(r#"{"id": 42}"#).unwrap();
        assert_eq!(n.id_string().as_deref(), Some("42"));
    }
}
