//! Eventbrite v3 endpoints used by the command line tool.
//!
//! ```no_run
//! use eventbrite_rq::prelude::*;
//!
//! async fn run() -> Result<()> {
//!     let config = Config::from_env()?;
//!     let org_id = config.org_id.clone().unwrap_or_default();
//!     let rs = Eventbrite::new(&config)
//!         .organization_events(&org_id)?
//!         .apply()
//!         .await;
//!     process_response(&rs);
//!     Ok(())
//! }
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use url::Url;

use crate::{
    Result,
    api::{Method, Rq},
    config::Config,
};

pub static URL: &str = "https://www.eventbriteapi.com/v3";

pub struct Eventbrite {
    base_url: Url,
    api_key: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
struct Html {
    html: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Moment {
    pub timezone: String,
    #[serde(serialize_with = "utc_seconds")]
    pub utc: DateTime<Utc>,
}

fn utc_seconds<S>(value: &DateTime<Utc>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Secs, true))
}

/// Body of a "create event" call, wrapped as `{"event": {...}}` on the wire.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct EventDraft {
    name: Html,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<Html>,
    start: Moment,
    end: Moment,
    currency: String,
    capacity: u32,
}

#[derive(Serialize)]
struct Envelope<'a> {
    event: &'a EventDraft,
}

impl EventDraft {
    pub fn new<S>(name: S, start: Moment, end: Moment) -> Self
    where
        S: Into<String>,
    {
        EventDraft {
            name: Html { html: name.into() },
            description: None,
            start,
            end,
            currency: "USD".into(),
            capacity: 100,
        }
    }

    pub fn description<S>(mut self, text: S) -> Self
    where
        S: Into<String>,
    {
        self.description = Some(Html { html: text.into() });
        self
    }

    pub fn currency<S>(mut self, currency: S) -> Self
    where
        S: Into<String>,
    {
        self.currency = currency.into();
        self
    }

    pub fn capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn to_payload(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(Envelope { event: self })?)
    }
}

impl Moment {
    pub fn new<S>(timezone: S, utc: DateTime<Utc>) -> Self
    where
        S: Into<String>,
    {
        Moment {
            timezone: timezone.into(),
            utc,
        }
    }
}

impl Eventbrite {
    pub fn new(config: &Config) -> Self {
        Eventbrite {
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        }
    }

    fn rq(&self, uri: String) -> Result<Rq> {
        Ok(Rq::new(self.base_url.as_str())?
            .uri(uri)
            .with_json()
            .bearer(self.api_key.as_str()))
    }

    pub fn organization_events(&self, org_id: &str) -> Result<Rq> {
        let org_id = non_empty(org_id)?;
        self.rq(format!("/organizations/{org_id}/events/"))
    }

    pub fn create_event(&self, org_id: &str, draft: &EventDraft) -> Result<Rq> {
        let org_id = non_empty(org_id)?;
        Ok(self
            .rq(format!("/organizations/{org_id}/events/"))?
            .with_method(Method::Post)
            .load_payload(draft.to_payload()?))
    }
}

fn non_empty(org_id: &str) -> Result<&str> {
    let org_id = org_id.trim();
    if org_id.is_empty() {
        anyhow::bail!("organization id is empty");
    }
    Ok(org_id)
}
