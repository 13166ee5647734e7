//! `ticket.*` facade.
//!
//! Covers the ticket calls with plain scalar or list replies; ticket bodies,
//! change logs and attachments are not wrapped.

use chrono::{DateTime, Utc};

use super::Rpc;
use crate::error::Result;
use crate::protocol::{param, Param};

/// Remote method names of the ticket service.
pub mod methods {
    /// `ticket.query`
    pub const QUERY: &str = "ticket.query";
    /// `ticket.getRecentChanges`
    pub const GET_RECENT_CHANGES: &str = "ticket.getRecentChanges";
    /// `ticket.getAvailableActions`
    pub const GET_AVAILABLE_ACTIONS: &str = "ticket.getAvailableActions";
    /// `ticket.delete`
    pub const DELETE: &str = "ticket.delete";
    /// `ticket.component.getAll`
    pub const COMPONENT_GET_ALL: &str = "ticket.component.getAll";

    /// Every method of this service.
    pub const ALL: &[&str] = &[
        QUERY,
        GET_RECENT_CHANGES,
        GET_AVAILABLE_ACTIONS,
        DELETE,
        COMPONENT_GET_ALL,
    ];
}

/// Ticket API service.
#[derive(Debug, Clone)]
pub struct TicketService {
    rpc: Rpc,
    component: TicketComponentService,
}

impl TicketService {
    pub(crate) fn new(rpc: Rpc) -> Self {
        Self {
            component: TicketComponentService::new(rpc.clone()),
            rpc,
        }
    }

    /// `ticket.component.*` calls.
    pub fn component(&self) -> &TicketComponentService {
        &self.component
    }

    /// Call `ticket.query`, returning matching ticket ids.
    ///
    /// Without `query` the server applies its default (`status!=closed`).
    pub fn query(&self, query: Option<&str>) -> Result<Vec<i32>> {
        let args = self.rpc.pack([Param::from(query)])?;
        self.rpc.call(methods::QUERY, Some(args))
    }

    /// Call `ticket.getRecentChanges`, returning ids changed since `since`.
    pub fn get_recent_changes(&self, since: DateTime<Utc>) -> Result<Vec<i32>> {
        let args = self.rpc.pack([param::time(since)])?;
        self.rpc.call(methods::GET_RECENT_CHANGES, Some(args))
    }

    /// Call `ticket.getAvailableActions`.
    pub fn get_available_actions(&self, id: i32) -> Result<Vec<String>> {
        let args = self.rpc.pack([param::int(id)])?;
        self.rpc.call(methods::GET_AVAILABLE_ACTIONS, Some(args))
    }

    /// Call `ticket.delete`.
    pub fn delete(&self, id: i32) -> Result<i32> {
        let args = self.rpc.pack([param::int(id)])?;
        self.rpc.call(methods::DELETE, Some(args))
    }
}

/// Ticket component API service.
#[derive(Debug, Clone)]
pub struct TicketComponentService {
    rpc: Rpc,
}

impl TicketComponentService {
    pub(crate) fn new(rpc: Rpc) -> Self {
        Self { rpc }
    }

    /// Call `ticket.component.getAll`.
    pub fn get_all(&self) -> Result<Vec<String>> {
        self.rpc.call(methods::COMPONENT_GET_ALL, None)
    }
}
