pub mod contact;
pub mod ids;
pub mod merge;
pub mod phone;

pub use contact::{Contact, ContactDraft, ContactPatch};
pub use ids::ContactId;
pub use merge::dedupe_last_wins;
pub use phone::normalize_phone;
