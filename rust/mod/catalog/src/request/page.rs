//! List page requests, addressed as `{scope}/{action}`.
//!
//! Payload-free actions (`reload`, `create`, `cancel`, `mount`, `unmount`)
//! carry `()`.

use crate::state::CategoryFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    Mount,
    Unmount,
    Reload,
    Create,
    Edit,
    Cancel,
    Draft,
    Submit,
    Delete,
}

impl PageAction {
    pub const ALL: [PageAction; 9] = [
        PageAction::Mount,
        PageAction::Unmount,
        PageAction::Reload,
        PageAction::Create,
        PageAction::Edit,
        PageAction::Cancel,
        PageAction::Draft,
        PageAction::Submit,
        PageAction::Delete,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PageAction::Mount => "mount",
            PageAction::Unmount => "unmount",
            PageAction::Reload => "reload",
            PageAction::Create => "create",
            PageAction::Edit => "edit",
            PageAction::Cancel => "cancel",
            PageAction::Draft => "draft",
            PageAction::Submit => "submit",
            PageAction::Delete => "delete",
        }
    }

    /// Request path under a page scope, e.g. `categories/reload`.
    pub fn path(self, scope: &str) -> String {
        format!("{}/{}", scope, self.name())
    }
}

/// Open the modal on an existing row.
pub struct BeginEditReq {
    pub id: i64,
}

/// Form fields changed.
pub struct UpdateDraftReq<D>(pub D);

/// Modal submitted.
pub struct SubmitReq<D>(pub D);

/// Delete a row (asks for confirmation first).
pub struct DeleteReq {
    pub id: i64,
}

/// Insert the built-in category list.
pub struct ImportDefaultsReq;

impl ImportDefaultsReq {
    pub const PATH: &'static str = "categories/import";
}

pub struct SetCategoryFilterReq(pub CategoryFilter);

impl SetCategoryFilterReq {
    pub const PATH: &'static str = "resources/set-filter";
}
