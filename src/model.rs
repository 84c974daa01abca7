pub mod store;
pub mod workspace;

pub use store::{WORKSPACE_COUNT, WorkspaceStore};
pub use workspace::{
    MAX_TITLE_LEN, MAX_WINDOWS_PER_WORKSPACE, TitleTooLong, Window, WindowHandle, WindowTitle,
    Workspace,
};
