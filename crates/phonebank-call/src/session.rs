use crate::device::DeviceController;
use crate::error::{CallError, Result};
use chrono::{DateTime, FixedOffset, Utc};
use phonebank_core::time::{call_stamp, format_duration, parse_utc_instant};
use phonebank_core::{normalize_phone, Contact, ContactId, ContactPatch};
use phonebank_store::Store;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

pub const KEY_END_CALL: &str = "KEYCODE_ENDCALL";
pub const KEY_POWER: &str = "KEYCODE_POWER";

/// The off-hook marker in the telephony registry dump (state 2).
const OFFHOOK_MARKER: &str = "mCallState=2";
const STATE_FIELD: &str = "mCallState";

/// Orchestrates call start, end and hang-up against the device bridge,
/// writing call bookkeeping through the contact store. No session object
/// survives between operations beyond the contact id and the start instant
/// carried on the contact itself.
pub struct CallSessionTracker<D> {
    device: D,
    store: Arc<Store>,
    display_offset: FixedOffset,
}

#[derive(Debug, Clone, Serialize)]
pub struct CallStarted {
    pub phone_number: String,
    /// Server UTC instant of the dial, for later correlation.
    pub call_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<ContactId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CallEnded {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<ContactId>,
    pub call_end_time: String,
    pub duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HangUpOutcome {
    pub hang_up_time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CallStatus {
    pub in_progress: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_state: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub call_state_raw: Option<String>,
}

impl<D: DeviceController> CallSessionTracker<D> {
    pub fn new(device: D, store: Arc<Store>, display_offset: FixedOffset) -> Self {
        Self {
            device,
            store,
            display_offset,
        }
    }

    /// Dials the number and returns the call-start instant. With a contact
    /// id, the instant is also stamped onto the contact so a later hang-up
    /// can derive the duration; that bookkeeping write is tolerated when it
    /// fails.
    pub async fn start_call(
        &self,
        raw_number: &str,
        contact_id: Option<ContactId>,
    ) -> Result<CallStarted> {
        let number = normalize_phone(raw_number)
            .ok_or_else(|| CallError::InvalidNumber(raw_number.to_string()))?;

        self.device.dial(&number).await?;
        let started_at = Utc::now();
        info!(number = %number, "call initiated");

        if let Some(id) = contact_id {
            let patch = ContactPatch {
                call_start_time: Some(Some(started_at.to_rfc3339())),
                ..Default::default()
            };
            if let Err(err) = self.store.update(id, patch) {
                warn!(contact = %id, error = %err, "failed to stamp call start on contact");
            }
        }

        Ok(CallStarted {
            phone_number: number,
            call_time: started_at.to_rfc3339(),
            contact_id,
        })
    }

    /// Records the end of a call. A non-negative client-measured duration is
    /// authoritative (the client clock saw the whole call; the server clock
    /// may be skewed); otherwise the duration falls back to the server
    /// receive instant minus the reported start, clamped to zero on parse
    /// failure or negative delta.
    pub async fn end_call(
        &self,
        contact_id: Option<ContactId>,
        call_start_time: Option<&str>,
        measured_duration_seconds: Option<i64>,
    ) -> Result<CallEnded> {
        if let Err(err) = self.device.send_key(KEY_END_CALL).await {
            warn!(error = %err, "end-call key event failed, recording duration anyway");
        }
        let ended_at = Utc::now();

        let seconds = match measured_duration_seconds {
            Some(measured) if measured >= 0 => measured,
            _ => call_start_time
                .and_then(|raw| match parse_utc_instant(raw) {
                    Ok(start) => Some(ended_at.signed_duration_since(start).num_seconds()),
                    Err(err) => {
                        warn!(error = %err, "unparseable call start time, clamping duration to zero");
                        None
                    }
                })
                .unwrap_or(0),
        };
        let duration = format_duration(seconds);

        let contact = match contact_id {
            Some(id) => self.write_duration(id, &duration),
            None => None,
        };

        Ok(CallEnded {
            contact_id,
            call_end_time: ended_at.to_rfc3339(),
            duration,
            contact,
        })
    }

    /// Sends the end-call key, verifies the device actually went on-hook
    /// (retrying once with the alternate key sequence) and writes the call
    /// date, time and duration onto the contact. Verification and
    /// bookkeeping failures never abort the hang-up: by then the command is
    /// already on the device.
    pub async fn hang_up(&self, contact_id: Option<ContactId>) -> Result<HangUpOutcome> {
        let hang_up_time = Utc::now();
        self.device.send_key(KEY_END_CALL).await?;

        if let Err(err) = self.verify_hang_up().await {
            warn!(error = %err, "hang-up verification failed, continuing");
        }

        let contact = match contact_id {
            Some(id) => self.write_call_history(id, hang_up_time),
            None => None,
        };

        Ok(HangUpOutcome {
            hang_up_time: hang_up_time.to_rfc3339(),
            contact,
        })
    }

    /// Parses the call-state indicator out of the device diagnostic dump.
    pub async fn call_status(&self) -> Result<CallStatus> {
        let raw = self.device.query_state().await?;

        if let Some((line, state)) = find_call_state(&raw) {
            return Ok(CallStatus {
                in_progress: state > 0,
                call_state: Some(state),
                call_state_raw: Some(line),
            });
        }

        // No indicator in the dump; re-query and look for the coarser
        // ongoing-call markers instead.
        let in_progress = match self.device.query_state().await {
            Ok(raw) => {
                let lower = raw.to_lowercase();
                lower.contains("ongoing call") || lower.contains("active connections")
            }
            Err(err) => {
                warn!(error = %err, "call-state fallback query failed");
                false
            }
        };

        Ok(CallStatus {
            in_progress,
            call_state: None,
            call_state_raw: None,
        })
    }

    async fn verify_hang_up(&self) -> std::result::Result<(), crate::error::DeviceError> {
        let state = self.device.query_state().await?;
        if !state.contains(OFFHOOK_MARKER) {
            return Ok(());
        }

        warn!("call still active after end-call key, retrying with alternate sequence");
        self.device.send_key(KEY_POWER).await?;
        self.device.send_key(KEY_END_CALL).await?;

        let state = self.device.query_state().await?;
        if state.contains(OFFHOOK_MARKER) {
            warn!("call still active after second hang-up attempt");
        }
        Ok(())
    }

    fn write_duration(&self, id: ContactId, duration: &str) -> Option<Contact> {
        let patch = ContactPatch {
            duree_appel: Some(Some(duration.to_string())),
            ..Default::default()
        };
        match self.store.update(id, patch) {
            Ok(contact) => Some(contact),
            Err(err) => {
                warn!(contact = %id, error = %err, "failed to record call duration");
                None
            }
        }
    }

    fn write_call_history(&self, id: ContactId, hang_up_time: DateTime<Utc>) -> Option<Contact> {
        let Some(existing) = self.store.get(id) else {
            info!(contact = %id, "hang-up for unknown contact, skipping bookkeeping");
            return None;
        };

        let (date_appel, heure_appel) = call_stamp(hang_up_time, self.display_offset);
        let duree_appel = existing.call_start_time.as_deref().and_then(|raw| {
            match parse_utc_instant(raw) {
                Ok(start) => {
                    let seconds = hang_up_time.signed_duration_since(start).num_seconds();
                    Some(format_duration(seconds))
                }
                Err(err) => {
                    warn!(contact = %id, error = %err, "unparseable call start on contact");
                    None
                }
            }
        });

        let patch = ContactPatch {
            date_appel: Some(Some(date_appel)),
            heure_appel: Some(Some(heure_appel)),
            duree_appel: duree_appel.map(Some),
            ..Default::default()
        };
        match self.store.update(id, patch) {
            Ok(contact) => Some(contact),
            Err(err) => {
                warn!(contact = %id, error = %err, "failed to record call history");
                None
            }
        }
    }
}

fn find_call_state(raw: &str) -> Option<(String, i32)> {
    for line in raw.lines() {
        let line = line.trim();
        if !line.contains(STATE_FIELD) {
            continue;
        }
        let Some((_, value)) = line.split_once('=') else {
            continue;
        };
        if let Ok(state) = value.trim().parse::<i32>() {
            return Some((line.to_string(), state));
        }
    }
    None
}
