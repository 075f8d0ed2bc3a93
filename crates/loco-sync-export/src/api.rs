//! Typed access to the Loco REST API.

use bytes::Bytes;
use loco_sync_config::SyncConfig;
use loco_sync_http::{parse_json, read_bytes, HttpClient, HttpConfig, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::models::{Asset, AssetPrintf, Locale, Translation};

/// Query parameters of an export request.
#[derive(Debug, Clone, Default)]
pub struct ExportQuery {
    pairs: Vec<(&'static str, String)>,
}

impl ExportQuery {
    /// Start a query with the vendor `fallback` locale.
    pub fn new(fallback: &str) -> Self {
        Self {
            pairs: vec![("fallback", fallback.to_string())],
        }
    }

    /// `index=id|name`: what keys the export uses.
    pub fn index(self, index: &str) -> Self {
        self.with("index", index)
    }

    /// `filter=<tag>`; an empty tag adds nothing.
    pub fn filter(self, tag: &str) -> Self {
        if tag.is_empty() {
            self
        } else {
            self.with("filter", tag)
        }
    }

    /// `format=<vendor format>`.
    pub fn format(self, format: &str) -> Self {
        self.with("format", format)
    }

    /// `printf=<style>`: placeholder syntax the vendor converts to.
    pub fn printf(self, printf: &str) -> Self {
        self.with("printf", printf)
    }

    fn with(mut self, key: &'static str, value: &str) -> Self {
        self.pairs.push((key, value.to_string()));
        self
    }

    pub fn pairs(&self) -> Vec<(&str, &str)> {
        self.pairs.iter().map(|(k, v)| (*k, v.as_str())).collect()
    }
}

/// Authenticated Loco client plus the project settings exports need.
#[derive(Debug, Clone)]
pub struct LocoApi {
    client: HttpClient,
    config: SyncConfig,
}

impl LocoApi {
    /// Build a client for `config.api.base_url` authenticated with `api_key`.
    pub fn new(config: SyncConfig, api_key: &str) -> Result<Self> {
        let http = HttpConfig {
            connect_timeout: config.api.connect_timeout(),
            request_timeout: config.api.timeout(),
            ..HttpConfig::default()
        };
        let defaults = RequestBuilder::new()
            .base_url(config.api.base_url.clone())
            .loco_auth(api_key);
        let client = HttpClient::with_config(http, defaults)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// A query pre-filled with the configured fallback locale.
    pub fn query(&self) -> ExportQuery {
        ExportQuery::new(&self.config.fallback_locale)
    }

    /// `GET /export/archive/{kind}.zip`
    pub async fn archive(&self, kind: &str, query: &ExportQuery) -> Result<Bytes> {
        let file = format!("{kind}.zip");
        let url = self.client.endpoint(&["export", "archive", &file])?;
        let response = self.client.get(url, &query.pairs()).await?;
        Ok(read_bytes(response).await?)
    }

    /// `GET /export/all.{ext}`, decoded as JSON.
    pub async fn export_all<T: DeserializeOwned>(&self, ext: &str, query: &ExportQuery) -> Result<T> {
        let file = format!("all.{ext}");
        let url = self.client.endpoint(&["export", &file])?;
        let response = self.client.get(url, &query.pairs()).await?;
        Ok(parse_json(response).await?)
    }

    /// `GET /locales`
    pub async fn locales(&self) -> Result<Vec<Locale>> {
        let url = self.client.endpoint(&["locales"])?;
        let response = self.client.get(url, &[]).await?;
        Ok(parse_json(response).await?)
    }

    /// `GET /assets`
    pub async fn assets(&self) -> Result<Vec<Asset>> {
        let url = self.client.endpoint(&["assets"])?;
        let response = self.client.get(url, &[]).await?;
        Ok(parse_json(response).await?)
    }

    /// `GET /translations/{asset}.json`
    pub async fn translations(&self, asset_id: &str) -> Result<Vec<Translation>> {
        let file = format!("{asset_id}.json");
        let url = self.client.endpoint(&["translations", &file])?;
        let response = self.client.get(url, &[]).await?;
        Ok(parse_json(response).await?)
    }

    /// `POST /translations/{asset}/{locale}` with the raw text as body.
    pub async fn post_translation(&self, asset_id: &str, locale: &str, text: &str) -> Result<()> {
        let url = self.client.endpoint(&["translations", asset_id, locale])?;
        self.client.post_text(url, text.to_string()).await?;
        Ok(())
    }

    /// `PATCH /assets/{asset}.json` setting the placeholder style.
    pub async fn set_asset_printf(&self, asset_id: &str, printf: &str) -> Result<()> {
        let file = format!("{asset_id}.json");
        let url = self.client.endpoint(&["assets", &file])?;
        self.client.patch_json(url, &AssetPrintf { printf }).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_pairs_in_order() {
        let query = ExportQuery::new("en-US").index("id").filter("mobile-apps").format("android");
        assert_eq!(
            query.pairs(),
            vec![
                ("fallback", "en-US"),
                ("index", "id"),
                ("filter", "mobile-apps"),
                ("format", "android"),
            ]
        );
    }

    #[test]
    fn test_empty_filter_is_omitted() {
        let query = ExportQuery::new("en-US").filter("");
        assert_eq!(query.pairs(), vec![("fallback", "en-US")]);
    }

    #[test]
    fn test_api_uses_config() {
        let mut config = SyncConfig::default();
        config.fallback_locale = "en-GB".to_string();
        let api = LocoApi::new(config, "key").unwrap();
        assert_eq!(api.query().pairs(), vec![("fallback", "en-GB")]);
        assert_eq!(api.config().project, "hourglass");
    }
}
