use crate::domain::model::{ContactChannel, ContactMessage, MessageReply, MessageStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

pub const DEFAULT_SUBJECT: &str = "Messenger conversation";
pub const FALLBACK_CREW_NAME: &str = "Repair Crew";

/// What a client submits; empty subject/channel fall back to the chat
/// surface defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageDraft {
    #[serde(default)]
    pub subject: Option<String>,
    pub body: String,
    #[serde(default)]
    pub preferred_contact: Option<String>,
}

impl MessageDraft {
    pub fn subject(&self) -> String {
        match self.subject.as_deref().map(str::trim) {
            Some(subject) if !subject.is_empty() => subject.to_string(),
            _ => DEFAULT_SUBJECT.to_string(),
        }
    }

    pub fn channel(&self) -> ContactChannel {
        self.preferred_contact
            .as_deref()
            .and_then(ContactChannel::from_code)
            .unwrap_or_default()
    }
}

pub fn compose(draft: &MessageDraft, client_id: u64, now: DateTime<Utc>) -> ContactMessage {
    ContactMessage {
        id: 0, // assigned by the store
        client_id,
        subject: draft.subject(),
        body: draft.body.trim().to_string(),
        preferred_contact: draft.channel(),
        status: MessageStatus::Open,
        admin_reply: String::new(),
        replies: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

/// Append a staff reply and mirror its body into `admin_reply` so list views
/// can show the latest answer without walking the thread.
pub fn apply_reply(
    message: &mut ContactMessage,
    admin_id: Option<u64>,
    admin_name: Option<String>,
    body: impl Into<String>,
    now: DateTime<Utc>,
) {
    let body = body.into();
    message.replies.push(MessageReply {
        admin_id,
        admin_name,
        body: body.clone(),
        created_at: now,
    });
    message.admin_reply = body;
    message.updated_at = now;
}

pub fn display_crew_name(reply: &MessageReply) -> &str {
    match reply.admin_name.as_deref() {
        Some(name) if !name.trim().is_empty() => name,
        _ => FALLBACK_CREW_NAME,
    }
}

/// First letters of the first two name words, uppercased; `RC` otherwise.
pub fn initials(name: Option<&str>) -> String {
    let letters: String = name
        .unwrap_or_default()
        .split_whitespace()
        .take(2)
        .filter_map(|part| part.chars().next())
        .collect::<String>()
        .to_uppercase();
    if letters.is_empty() {
        "RC".to_string()
    } else {
        letters
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConversationFilter {
    pub search: Option<String>,
    pub status: Option<MessageStatus>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusTally {
    pub status: MessageStatus,
    pub label: &'static str,
    pub count: usize,
}

/// Newest-first by `updated_at`, one conversation per client, filtered by
/// subject substring and/or status. `client_names` feeds the search filter.
pub fn conversations<'a>(
    messages: &'a [ContactMessage],
    filter: &ConversationFilter,
    client_name: impl Fn(u64) -> Option<String>,
) -> Vec<&'a ContactMessage> {
    let needle = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);

    let mut sorted: Vec<&ContactMessage> = messages
        .iter()
        .filter(|m| match filter.status {
            Some(status) => m.status == status,
            None => true,
        })
        .filter(|m| match &needle {
            Some(needle) => {
                m.subject.to_lowercase().contains(needle)
                    || client_name(m.client_id)
                        .map(|name| name.to_lowercase().contains(needle))
                        .unwrap_or(false)
            }
            None => true,
        })
        .collect();
    sorted.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));

    let mut seen_clients = HashSet::new();
    sorted
        .into_iter()
        .filter(|m| seen_clients.insert(m.client_id))
        .collect()
}

pub fn status_tallies(messages: &[ContactMessage]) -> Vec<StatusTally> {
    MessageStatus::ALL
        .into_iter()
        .map(|status| StatusTally {
            status,
            label: status.label(),
            count: messages.iter().filter(|m| m.status == status).count(),
        })
        .collect()
}
