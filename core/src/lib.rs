// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Resolve the events of iCalendar files to the concrete occurrences that
//! touch a range of days.

mod agenda;
mod config;
mod error;
mod event;
pub mod io;
mod occurrence;
mod recurrence;
mod sync;

pub use crate::agenda::{Agenda, AgendaItem, Status};
pub use crate::config::{APP_NAME, CalendarSource, Config, expand_path, get_config_dir};
pub use crate::error::{ResolveError, SourceError};
pub use crate::event::{Event, extract_events};
pub use crate::occurrence::{Occurrence, occurrences};
pub use crate::recurrence::Recurrence;
pub use crate::sync::{CalendarSync, FileSync, NoSync, SyncError};
