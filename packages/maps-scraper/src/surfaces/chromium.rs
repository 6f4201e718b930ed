//! Chromium-backed render surface using `chromiumoxide`.
//!
//! Listing handles are the result anchors; sub-element queries are scoped to
//! the anchor's parent card, which is where Maps renders connector details.

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::error::CdpError;
use chromiumoxide::page::Page;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::{SurfaceError, SurfaceResult};
use crate::traits::surface::RenderSurface;
use crate::types::config::Selectors;

/// Pixels scrolled per [`RenderSurface::reveal_more`] call.
const SCROLL_DELTA: u32 = 10_000;

impl From<CdpError> for SurfaceError {
    fn from(e: CdpError) -> Self {
        SurfaceError::Browser(Box::new(e))
    }
}

/// A single Chromium tab driven over the DevTools protocol.
pub struct ChromiumSurface {
    browser: Browser,
    page: Page,
    selectors: Selectors,
    handler: JoinHandle<()>,
}

impl ChromiumSurface {
    /// Launch a browser and open a blank tab.
    pub async fn launch(headless: bool, selectors: Selectors) -> SurfaceResult<Self> {
        let mut builder = BrowserConfig::builder();
        if !headless {
            builder = builder.with_head();
        }
        let config = builder.build().map_err(SurfaceError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| SurfaceError::Launch(e.to_string()))?;

        // The handler stream must be polled for the browser to make progress
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler stopped: {}", e);
                    break;
                }
            }
        });

        let page = browser.new_page("about:blank").await?;
        info!("Browser launched (headless: {})", headless);

        Ok(Self {
            browser,
            page,
            selectors,
            handler,
        })
    }

    /// Close the browser and stop the handler task.
    pub async fn close(mut self) -> SurfaceResult<()> {
        self.browser.close().await?;
        self.handler.abort();
        Ok(())
    }

    /// Evaluate an expression in the page and decode its JSON-encoded result.
    async fn eval_json<T: DeserializeOwned>(&self, expression: &str) -> SurfaceResult<T> {
        let encoded: String = self
            .page
            .evaluate(format!("JSON.stringify({expression})"))
            .await?
            .into_value()
            .map_err(|e| SurfaceError::Script(e.to_string()))?;
        serde_json::from_str(&encoded).map_err(|e| SurfaceError::Script(e.to_string()))
    }

    async fn search_input(&self) -> SurfaceResult<Element> {
        self.page
            .find_element(self.selectors.search_input.as_str())
            .await
            .map_err(|_| SurfaceError::ElementNotFound {
                query: self.selectors.search_input.clone(),
            })
    }
}

/// Quote a selector as a JS string literal.
fn js_string(s: &str) -> String {
    Value::from(s).to_string()
}

#[async_trait]
impl RenderSurface for ChromiumSurface {
    type Item = Element;

    async fn navigate(&self, url: &str) -> SurfaceResult<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| SurfaceError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    async fn fill_search(&self, term: &str) -> SurfaceResult<()> {
        let input = self.search_input().await?;
        input.call_js_fn("function() { this.value = ''; }", false).await?;
        input.click().await?;
        input.type_str(term).await?;
        Ok(())
    }

    async fn submit_search(&self) -> SurfaceResult<()> {
        self.search_input().await?.press_key("Enter").await?;
        Ok(())
    }

    async fn reveal_more(&self) -> SurfaceResult<()> {
        let expression = format!(
            "(() => {{ const feed = document.querySelector({feed}); \
             (feed || document.scrollingElement).scrollBy(0, {SCROLL_DELTA}); \
             return feed !== null; }})()",
            feed = js_string(&self.selectors.results_feed),
        );
        let scrolled_feed: bool = self.eval_json(&expression).await?;
        if !scrolled_feed {
            debug!("Results feed not found, scrolled the document instead");
        }
        Ok(())
    }

    async fn count(&self, query: &str) -> SurfaceResult<usize> {
        self.eval_json(&format!("document.querySelectorAll({}).length", js_string(query)))
            .await
    }

    async fn query_all(&self, query: &str) -> SurfaceResult<Vec<Element>> {
        Ok(self.page.find_elements(query).await?)
    }

    async fn scoped_texts(&self, item: &Element, query: &str) -> SurfaceResult<Vec<String>> {
        let function = format!(
            "function() {{ const root = this.parentElement || this; \
             return JSON.stringify(Array.from(root.querySelectorAll({})).map(e => e.innerText)); }}",
            js_string(query)
        );
        let returned = item.call_js_fn(function, false).await?;

        match returned.result.value {
            Some(Value::String(encoded)) => {
                serde_json::from_str(&encoded).map_err(|e| SurfaceError::Script(e.to_string()))
            }
            other => Err(SurfaceError::Script(format!(
                "unexpected result for scoped query {query}: {other:?}"
            ))),
        }
    }

    async fn first_text(&self, query: &str) -> SurfaceResult<Option<String>> {
        self.eval_json(&format!(
            "(() => {{ const e = document.querySelector({}); return e ? e.innerText : null; }})()",
            js_string(query)
        ))
        .await
    }

    async fn activate(&self, item: &Element) -> SurfaceResult<()> {
        item.click().await?;
        Ok(())
    }
}
