//! Søknad event as published on the sykepengesøknad topic, and the snapshot row
//! derived from it.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Søknader whose period ended this many months ago or earlier are stale
pub const RELEVANCE_WINDOW_MONTHS: u32 = 4;

/// Lifecycle status of a søknad. Wire values are the topic's Norwegian names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoknadStatus {
    #[serde(rename = "NY")]
    New,
    #[serde(rename = "FREMTIDIG")]
    Future,
    #[serde(rename = "SENDT")]
    Sent,
    #[serde(rename = "KORRIGERT")]
    Corrected,
    #[serde(rename = "AVBRUTT")]
    Cancelled,
    #[serde(rename = "SLETTET")]
    Deleted,
    #[serde(rename = "UTGAATT")]
    Expired,
}

impl SoknadStatus {
    pub const ALL: [SoknadStatus; 7] = [
        SoknadStatus::New,
        SoknadStatus::Future,
        SoknadStatus::Sent,
        SoknadStatus::Corrected,
        SoknadStatus::Cancelled,
        SoknadStatus::Deleted,
        SoknadStatus::Expired,
    ];

    /// Store operation for a relevant søknad in this status.
    ///
    /// `sent_to_employer` only matters for SENDT and KORRIGERT: a submitted søknad is
    /// kept only when it actually went to the employer.
    pub fn store_action(self, sent_to_employer: bool) -> StoreAction {
        match self {
            SoknadStatus::New | SoknadStatus::Future => StoreAction::Upsert,
            SoknadStatus::Sent | SoknadStatus::Corrected => {
                if sent_to_employer {
                    StoreAction::Upsert
                } else {
                    StoreAction::Delete
                }
            }
            SoknadStatus::Cancelled | SoknadStatus::Deleted | SoknadStatus::Expired => {
                StoreAction::Delete
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SoknadStatus::New => "NY",
            SoknadStatus::Future => "FREMTIDIG",
            SoknadStatus::Sent => "SENDT",
            SoknadStatus::Corrected => "KORRIGERT",
            SoknadStatus::Cancelled => "AVBRUTT",
            SoknadStatus::Deleted => "SLETTET",
            SoknadStatus::Expired => "UTGAATT",
        }
    }
}

impl std::fmt::Display for SoknadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreAction {
    Upsert,
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arbeidsgiver {
    #[serde(default)]
    pub navn: Option<String>,
    #[serde(default)]
    pub orgnummer: Option<String>,
}

/// One sykepengesøknad event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SykepengesoknadEvent {
    pub id: String,
    pub status: SoknadStatus,
    pub fnr: String,
    #[serde(default)]
    pub sykmelding_id: Option<String>,
    #[serde(default)]
    pub arbeidsgiver: Option<Arbeidsgiver>,
    #[serde(default)]
    pub fom: Option<NaiveDate>,
    #[serde(default)]
    pub tom: Option<NaiveDate>,
    /// Kept as raw JSON: only presence is inspected, and producers disagree on the
    /// timestamp format (local, `Z` or offset suffixed)
    #[serde(default)]
    pub sendt_arbeidsgiver: Option<Value>,
    /// Remaining topic fields, kept so the stored snapshot is the whole søknad
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

/// Proof that an event passed the relevance check, carrying the fields it was
/// checked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Relevance<'a> {
    pub orgnummer: &'a str,
    pub tom: NaiveDate,
}

impl SykepengesoknadEvent {
    pub fn orgnummer(&self) -> Option<&str> {
        self.arbeidsgiver
            .as_ref()
            .and_then(|arbeidsgiver| arbeidsgiver.orgnummer.as_deref())
    }

    /// Presence is all that counts, the timestamp itself is not inspected
    pub fn is_sent_to_employer(&self) -> bool {
        self.sendt_arbeidsgiver.is_some()
    }

    /// Calendar date the søknad was sent to the employer, read from the leading
    /// `YYYY-MM-DD` of the marker. `None` when absent or not date-like.
    pub fn sendt_arbeidsgiver_dato(&self) -> Option<NaiveDate> {
        let sendt = self.sendt_arbeidsgiver.as_ref()?.as_str()?;
        let date = sendt.get(..10)?;
        NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
    }

    /// Returns `Some` when the søknad has an employer and its period ended strictly
    /// after `today` minus [`RELEVANCE_WINDOW_MONTHS`].
    pub fn relevance(&self, today: NaiveDate) -> Option<Relevance<'_>> {
        let orgnummer = self.orgnummer()?;
        let tom = self.tom?;
        let cutoff = relevance_cutoff(today)?;

        (tom > cutoff).then_some(Relevance { orgnummer, tom })
    }

    pub fn store_action(&self) -> StoreAction {
        self.status.store_action(self.is_sent_to_employer())
    }
}

/// Last period end that is too old to be stored
pub fn relevance_cutoff(today: NaiveDate) -> Option<NaiveDate> {
    today.checked_sub_months(Months::new(RELEVANCE_WINDOW_MONTHS))
}

/// Snapshot row for one employer-relevant søknad
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct SoknadRecord {
    pub soknad_id: String,
    pub sykmelding_id: Option<String>,
    pub pasient_fnr: String,
    pub orgnummer: String,
    pub tom: NaiveDate,
    pub sendt_dato: Option<NaiveDate>,
    pub soknad: Value,
}

impl SoknadRecord {
    pub fn from_event(
        event: &SykepengesoknadEvent,
        relevance: Relevance<'_>,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            soknad_id: event.id.clone(),
            sykmelding_id: event.sykmelding_id.clone(),
            pasient_fnr: event.fnr.clone(),
            orgnummer: relevance.orgnummer.to_string(),
            tom: relevance.tom,
            sendt_dato: event.sendt_arbeidsgiver_dato(),
            soknad: serde_json::to_value(event)?,
        })
    }
}
