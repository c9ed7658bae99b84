//! Row and view types for the gift registry.

use crate::normalize::normalize;
use serde::Serialize;
use sqlx::FromRow;

/// Fixed marker written to `escolhido_por` when an item is claimed.
///
/// The source registry never tracked visitor identity — only that an item is
/// taken — and this service preserves that.
pub const CLAIMED_SENTINEL: &str = "escolhido";

/// One gift item as stored in the `presentes` table.
///
/// `link1`/`link2` hold the raw suggestion text from the sheet; the view
/// types below normalize them into navigable links.
#[derive(Debug, Clone, FromRow)]
pub struct GiftItem {
    pub id: i64,
    pub presente: String,
    pub link1: String,
    pub link2: String,
    pub cores: String,
    pub escolhido_por: Option<String>,
    pub criado_em: String,
}

impl GiftItem {
    pub fn is_claimed(&self) -> bool {
        self.escolhido_por.is_some()
    }
}

/// Public API view — normalized links, claim state reduced to a flag.
#[derive(Debug, Clone, Serialize)]
pub struct GiftView {
    pub id: i64,
    pub presente: String,
    pub link1: String,
    pub link2: String,
    pub cores: String,
    pub escolhido: bool,
}

impl From<GiftItem> for GiftView {
    fn from(item: GiftItem) -> Self {
        Self {
            id: item.id,
            escolhido: item.is_claimed(),
            link1: normalize(&item.link1),
            link2: normalize(&item.link2),
            presente: item.presente,
            cores: item.cores,
        }
    }
}

/// Admin view — includes the raw claim marker and creation timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct GiftAdminView {
    pub id: i64,
    pub presente: String,
    pub link1: String,
    pub link2: String,
    pub cores: String,
    pub escolhido_por: Option<String>,
    pub criado_em: String,
}

impl From<GiftItem> for GiftAdminView {
    fn from(item: GiftItem) -> Self {
        Self {
            id: item.id,
            link1: normalize(&item.link1),
            link2: normalize(&item.link2),
            presente: item.presente,
            cores: item.cores,
            escolhido_por: item.escolhido_por,
            criado_em: item.criado_em,
        }
    }
}

/// Result of a claim attempt. `AlreadyClaimed` and `NotFound` are ordinary
/// outcomes, not faults — callers branch on them, tests assert on them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The conditional update won; the item is now claimed.
    Claimed { name: String },
    /// The item exists but was already claimed by someone else.
    AlreadyClaimed,
    /// No item with that id.
    NotFound,
}

/// Result of an admin unclaim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UnclaimOutcome {
    /// The item exists and is now unclaimed (whether or not it was before).
    Cleared,
    /// No item with that id.
    NotFound,
}
