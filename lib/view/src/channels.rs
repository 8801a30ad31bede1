//! Support-channel scoping.
//!
//! Every signed-in principal sees the general and admin channels; the
//! rest of the list follows role, class membership, and form-teacher
//! scope. Admins see every channel for oversight.

use flemzin_core::{ClassLevel, Role, Stage};
use flemzin_directory::UserRecord;
use serde::Serialize;

/// One entry in the support directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SupportChannel {
    id: u8,
    name: &'static str,
    /// Two-letter avatar code shown beside the channel name.
    code: &'static str,
}

impl SupportChannel {
    const fn new(id: u8, name: &'static str, code: &'static str) -> Self {
        Self { id, name, code }
    }

    #[must_use]
    pub fn id(&self) -> u8 {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub fn code(&self) -> &'static str {
        self.code
    }
}

const JS1: ClassLevel = ClassLevel::new(Stage::Junior, 1);
const JS2: ClassLevel = ClassLevel::new(Stage::Junior, 2);

const GENERAL_CHAT: SupportChannel = SupportChannel::new(1, "General School Chat", "GC");
const ADMIN_SUPPORT: SupportChannel = SupportChannel::new(2, "Admin Support", "AS");
const JS2_TEACHER: SupportChannel = SupportChannel::new(3, "Mr. Adekunle (JS2 Teacher)", "MA");
const JS1_TEACHER: SupportChannel = SupportChannel::new(4, "Mrs. Davis (JS1 Teacher)", "MD");
const JS2_CLASS_CHAT: SupportChannel = SupportChannel::new(5, "JS2 Class Chat", "J2");
const JS1_CLASS_CHAT: SupportChannel = SupportChannel::new(6, "JS1 Class Chat", "J1");
const STAFF_ROOM: SupportChannel = SupportChannel::new(7, "Staff Room", "SR");

/// The full support directory, in listing order.
const ALL_CHANNELS: [SupportChannel; 7] = [
    GENERAL_CHAT,
    ADMIN_SUPPORT,
    JS2_TEACHER,
    JS1_TEACHER,
    JS2_CLASS_CHAT,
    JS1_CLASS_CHAT,
    STAFF_ROOM,
];

/// Class chats keyed by cohort. Cohorts without a chat get none.
const CLASS_CHATS: [(ClassLevel, SupportChannel); 2] =
    [(JS2, JS2_CLASS_CHAT), (JS1, JS1_CLASS_CHAT)];

fn class_chat(level: ClassLevel) -> Option<SupportChannel> {
    CLASS_CHATS
        .iter()
        .find(|(chat_level, _)| *chat_level == level)
        .map(|(_, channel)| *channel)
}

/// Computes the support channels visible to one directory record.
///
/// The teacher direct chats (ids 3 and 4) are offered to admins only;
/// students and parents reach their teachers through the class chats.
#[must_use]
pub fn visible_channels(record: &UserRecord) -> Vec<SupportChannel> {
    if record.role() == Role::Admin {
        return ALL_CHANNELS.to_vec();
    }

    let mut channels = vec![GENERAL_CHAT, ADMIN_SUPPORT];
    match record.role() {
        Role::Student => {
            if let Some(channel) = record.class_level().and_then(class_chat) {
                channels.push(channel);
            }
        }
        Role::Staff => {
            channels.push(STAFF_ROOM);
            if let Some(channel) = record.form_teacher_of().and_then(class_chat) {
                channels.push(channel);
            }
        }
        Role::Parent | Role::Admin => {}
    }
    channels
}
