//! SMS list retrieval, decoding, and content-addressed change detection.

use crate::codec;
use crate::error::RouterError;
use crate::store::FingerprintStore;
use crate::transport::{RouterTransport, unix_millis};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Name of the persisted fingerprint slot.
pub const FINGERPRINT_SLOT: &str = "SmsListHash";

const SMS_LIST_QUERY: &str = "isTest=false&cmd=sms_data_total&page=0&data_per_page=500\
&mem_store=1&tags=10&order_by=order+by+id+desc";

/// One message as reported by `sms_data_total`.
///
/// All fields arrive as strings. `content` is the firmware's hex-wrapped
/// UTF-16 encoding until decoded by [`present`]. The concatenated-SMS
/// bookkeeping fields are passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SmsMessage {
    #[serde(default, alias = "Id", alias = "ID")]
    pub id: String,
    #[serde(default, alias = "Number")]
    pub number: String,
    #[serde(default, alias = "Content")]
    pub content: String,
    #[serde(default, alias = "Tag")]
    pub tag: String,
    #[serde(default, alias = "Date")]
    pub date: String,
    #[serde(default, alias = "Draft_group_id")]
    pub draft_group_id: String,
    #[serde(default, alias = "Received_all_concat_sms")]
    pub received_all_concat_sms: String,
    #[serde(default, alias = "Concat_sms_total")]
    pub concat_sms_total: String,
    #[serde(default, alias = "Concat_sms_received")]
    pub concat_sms_received: String,
    #[serde(default, alias = "Sms_class")]
    pub sms_class: String,
}

#[derive(Deserialize)]
struct SmsListResponse {
    #[serde(alias = "Messages")]
    messages: Option<Vec<SmsMessage>>,
}

/// Outcome of a message-list fetch.
///
/// Some firmware states return a body without the `messages` array after a
/// perfectly good login; that is an expected outcome, not an error, so it is
/// modeled as a variant rather than an `Err`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmsList {
    Available(Vec<SmsMessage>),
    Unavailable,
}

/// Result of comparing the current fingerprint against the persisted one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeResult {
    Unchanged,
    New,
}

/// Retrieves and fingerprints the device's SMS store. Requires a transport
/// whose cookie jar already holds an authenticated session.
pub struct SmsSync<'a, T: RouterTransport + ?Sized> {
    transport: &'a T,
}

impl<'a, T: RouterTransport + ?Sized> SmsSync<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Raw `sms_capacity_info` body, for diagnostic display. Not parsed.
    pub fn fetch_capacity_info(&self) -> Result<String, RouterError> {
        let query = format!("isTest=false&cmd=sms_capacity_info&_={}", unix_millis());
        self.transport.get_cmd(&query)
    }

    /// Fetches the inbox snapshot, newest first per the query's `order_by`.
    pub fn fetch_messages(&self) -> Result<SmsList, RouterError> {
        let body = self.transport.get_cmd(SMS_LIST_QUERY)?;
        match serde_json::from_str::<SmsListResponse>(&body) {
            Ok(SmsListResponse {
                messages: Some(messages),
            }) => {
                debug!(count = messages.len(), "sms list fetched");
                Ok(SmsList::Available(messages))
            }
            Ok(SmsListResponse { messages: None }) => Ok(SmsList::Unavailable),
            Err(err) => {
                warn!(%err, "sms list body did not match the expected shape");
                Ok(SmsList::Unavailable)
            }
        }
    }
}

/// Prepares messages for display: ascending numeric id, `content` decoded.
///
/// Ids that fail to parse sort after every numeric id, in their received
/// order (the sort is stable).
pub fn present(mut messages: Vec<SmsMessage>) -> Vec<SmsMessage> {
    messages.sort_by_key(|m| m.id.parse::<u64>().unwrap_or(u64::MAX));
    for message in &mut messages {
        message.content = codec::decode_hex_utf16(&message.content);
    }
    messages
}

/// MD5 over `content + date` of the messages in inbox slots `"0"` and `"1"`,
/// in received order.
///
/// A deliberately narrow window: the two most recent slots change whenever a
/// message arrives, while pagination noise and reordering further down the
/// list leave the fingerprint alone. Raw (undecoded) content goes in.
pub fn compute_fingerprint(messages: &[SmsMessage]) -> String {
    let mut window = String::new();
    for message in messages.iter().filter(|m| m.id == "0" || m.id == "1") {
        window.push_str(&message.content);
        window.push_str(&message.date);
    }
    codec::md5_hex(&window)
}

/// Compares `fingerprint` to the persisted slot and records it when it
/// differs. A missing persisted value counts as a change, so the first run
/// against a store always reports [`ChangeResult::New`].
pub fn detect_and_record_change(
    fingerprint: &str,
    store: &mut dyn FingerprintStore,
) -> Result<ChangeResult, RouterError> {
    let previous = store.get(FINGERPRINT_SLOT)?;
    if previous.as_deref() == Some(fingerprint) {
        return Ok(ChangeResult::Unchanged);
    }
    store.set(FINGERPRINT_SLOT, fingerprint)?;
    Ok(ChangeResult::New)
}
