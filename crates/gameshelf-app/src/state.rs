// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{
    Catalog, CatalogLoad, DerivedView, SortMode, TagFilter, ViewState, compute, derive,
    parse_address,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadPhase {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed {
        message: String,
    },
}

impl LoadPhase {
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Catalog plus view state; the single source of truth for what is displayed.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AppState {
    pub phase: LoadPhase,
    pub catalog: Catalog,
    pub view: ViewState,
    pub status_line: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    BeginLoad,
    Retry,
    CatalogLoaded { load: CatalogLoad, address: String },
    LoadFailed(String),
    SetQuery(String),
    SetTag(TagFilter),
    NextTag,
    PrevTag,
    SetSort(SortMode),
    NextSort,
    PrevSort,
    NextPage,
    PrevPage,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    LoadStarted,
    CatalogReady { entries: usize, dropped: usize },
    LoadFailed(String),
    ViewRestored(ViewState),
    QueryChanged(String),
    TagChanged(TagFilter),
    SortChanged(SortMode),
    PageChanged(usize),
    PageClamped { requested: usize, page: usize },
    StatusUpdated(String),
    StatusCleared,
}

impl AppEvent {
    /// Whether the event means the grid must be repainted and the address
    /// rewritten.
    pub const fn changes_view(&self) -> bool {
        matches!(
            self,
            Self::ViewRestored(_)
                | Self::QueryChanged(_)
                | Self::TagChanged(_)
                | Self::SortChanged(_)
                | Self::PageChanged(_)
                | Self::PageClamped { .. }
        )
    }
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::BeginLoad => {
                if self.phase != LoadPhase::Idle {
                    return Vec::new();
                }
                self.start_loading()
            }
            AppCommand::Retry => {
                if !self.phase.is_failed() {
                    return Vec::new();
                }
                self.start_loading()
            }
            AppCommand::CatalogLoaded { load, address } => self.finish_loading(load, &address),
            AppCommand::LoadFailed(message) => {
                if self.phase != LoadPhase::Loading {
                    return Vec::new();
                }
                tracing::warn!(error = %message, "catalog load failed");
                self.phase = LoadPhase::Failed {
                    message: message.clone(),
                };
                vec![
                    AppEvent::LoadFailed(message),
                    self.set_status("catalog unavailable; press r to retry"),
                ]
            }
            AppCommand::SetQuery(query) => self.update_view(|view| {
                view.query = query.trim().to_owned();
                view.page = 1;
                AppEvent::QueryChanged(view.query.clone())
            }),
            AppCommand::SetTag(tag) => {
                let tag = self.catalog.tags().normalize(tag);
                self.update_view(|view| {
                    view.tag = tag;
                    view.page = 1;
                    AppEvent::TagChanged(view.tag.clone())
                })
            }
            AppCommand::NextTag => self.rotate_tag(1),
            AppCommand::PrevTag => self.rotate_tag(-1),
            AppCommand::SetSort(sort) => self.update_view(|view| {
                view.sort = sort;
                view.page = 1;
                AppEvent::SortChanged(sort)
            }),
            AppCommand::NextSort => {
                let sort = self.view.sort.rotate(1);
                self.dispatch(AppCommand::SetSort(sort))
            }
            AppCommand::PrevSort => {
                let sort = self.view.sort.rotate(-1);
                self.dispatch(AppCommand::SetSort(sort))
            }
            AppCommand::NextPage => self.turn_page(1),
            AppCommand::PrevPage => self.turn_page(-1),
            AppCommand::SetStatus(message) => vec![self.set_status(&message)],
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    /// Current projection of the catalog. Assumes the page has already been
    /// settled by `dispatch`.
    pub fn derived(&self) -> DerivedView<'_> {
        derive(self.catalog.entries(), &self.view)
    }

    pub const fn is_ready(&self) -> bool {
        matches!(self.phase, LoadPhase::Ready)
    }

    fn start_loading(&mut self) -> Vec<AppEvent> {
        self.phase = LoadPhase::Loading;
        vec![AppEvent::LoadStarted, self.set_status("loading catalog")]
    }

    fn finish_loading(&mut self, load: CatalogLoad, address: &str) -> Vec<AppEvent> {
        if self.phase != LoadPhase::Loading {
            return Vec::new();
        }

        let CatalogLoad { catalog, dropped } = load;
        let mut view = parse_address(address);
        view.tag = catalog.tags().normalize(view.tag);
        self.catalog = catalog;
        self.view = view;
        self.phase = LoadPhase::Ready;

        let entries = self.catalog.len();
        tracing::info!(entries, dropped = dropped.len(), "catalog ready");

        let mut events = vec![
            AppEvent::CatalogReady {
                entries,
                dropped: dropped.len(),
            },
            AppEvent::ViewRestored(self.view.clone()),
        ];
        events.extend(self.settle_page());

        let status = if dropped.is_empty() {
            format!("{entries} games loaded")
        } else {
            format!("{entries} games loaded; {} invalid skipped", dropped.len())
        };
        events.push(self.set_status(&status));
        events
    }

    fn update_view(&mut self, apply: impl FnOnce(&mut ViewState) -> AppEvent) -> Vec<AppEvent> {
        if !self.is_ready() {
            return Vec::new();
        }
        let mut events = vec![apply(&mut self.view)];
        events.extend(self.settle_page());
        events
    }

    fn rotate_tag(&mut self, delta: isize) -> Vec<AppEvent> {
        let tag = self.catalog.tags().rotate(&self.view.tag, delta);
        self.dispatch(AppCommand::SetTag(tag))
    }

    /// Moves by `delta` pages without resetting; the upper bound comes from
    /// the clamp in `settle_page`.
    fn turn_page(&mut self, delta: isize) -> Vec<AppEvent> {
        if !self.is_ready() {
            return Vec::new();
        }
        self.view.page = self.view.page.saturating_add_signed(delta).max(1);
        let clamped = self.settle_page();
        let mut events = vec![AppEvent::PageChanged(self.view.page)];
        events.extend(clamped);
        events
    }

    fn settle_page(&mut self) -> Option<AppEvent> {
        let requested = self.view.page;
        let page = compute(self.catalog.entries(), &mut self.view).page();
        (page != requested).then_some(AppEvent::PageClamped { requested, page })
    }

    fn set_status(&mut self, message: &str) -> AppEvent {
        self.status_line = Some(message.to_owned());
        AppEvent::StatusUpdated(message.to_owned())
    }
}
