//! Built-in topic handlers.
//!
//! Each service owns its slice of decoded workspace state behind a
//! clone-able view handle and feeds continuation parameters (`last_evt_*`
//! ids) back into the subscription state for the next cycle. Registration
//! order matters: register `PermsService` first so handlers later in the
//! same cycle observe the fresh snapshot.

pub mod chat;
pub mod members;
pub mod perms;
pub mod workspace;

pub use chat::{ChatMessage, ChatService, ChatView};
pub use members::{Member, MemberDirectory, MembersService};
pub use perms::PermsService;
pub use workspace::{WorkspaceInfo, WorkspaceService, WorkspaceView};
