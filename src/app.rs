use crate::{
    chat::{ChatSession, Delivery},
    errors::PlatformResult,
    log_view::LogView,
    models::{Analytics, ApiCallLog, Solution},
    status_indicator::StatusIndicator,
};
use tracing::error;

pub const ANALYTICS_ERROR: &str = "Failed to fetch analytics data.";
pub const ALBUM_ERROR: &str = "Failed to load the solutions album.";

/// The screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Home,
    Chat,
    Album,
    Analytics,
    QuitConfirm,
    Quit,
}

/// Tab order in the header.
pub const PAGES: [AppState; 4] = [
    AppState::Home,
    AppState::Chat,
    AppState::Album,
    AppState::Analytics,
];

impl AppState {
    pub fn title(&self) -> &'static str {
        match self {
            AppState::Home => "Home",
            AppState::Chat => "Chat",
            AppState::Album => "Album",
            AppState::Analytics => "Analytics",
            AppState::QuitConfirm => "Quit?",
            AppState::Quit => "",
        }
    }

    pub fn page_index(&self) -> Option<usize> {
        PAGES.iter().position(|page| page == self)
    }
}

/// Data a page fetches once at startup.
#[derive(Debug, Clone, PartialEq)]
pub enum PageData<T> {
    Loading,
    Ready(T),
    Failed(String),
}

pub struct App {
    pub state: AppState,
    /// Page to return to when a quit is cancelled.
    pub last_page: AppState,
    pub home_selected: usize,
    pub chat: ChatSession,
    /// Messages scrolled up from the newest one.
    pub chat_scroll: usize,
    pub album: PageData<Vec<Solution>>,
    pub album_selected: usize,
    pub analytics: PageData<Analytics>,
    pub status_indicator: StatusIndicator,
    pub logs: LogView,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> App {
        Self::with_session(ChatSession::new())
    }

    pub fn with_session(chat: ChatSession) -> App {
        App {
            state: AppState::Home,
            last_page: AppState::Home,
            home_selected: 0,
            chat,
            chat_scroll: 0,
            album: PageData::Loading,
            album_selected: 0,
            analytics: PageData::Loading,
            status_indicator: StatusIndicator::new(),
            logs: LogView::new(),
        }
    }

    pub fn go_to(&mut self, page: AppState) {
        if page.page_index().is_some() {
            self.last_page = page;
        }
        self.state = page;
    }

    pub fn next_page(&mut self) {
        self.step_page(1);
    }

    pub fn previous_page(&mut self) {
        self.step_page(PAGES.len() - 1);
    }

    fn step_page(&mut self, step: usize) {
        if let Some(idx) = self.state.page_index() {
            self.go_to(PAGES[(idx + step) % PAGES.len()]);
        }
    }

    pub fn request_quit(&mut self) {
        if self.state.page_index().is_some() {
            self.last_page = self.state;
        }
        self.state = AppState::QuitConfirm;
    }

    pub fn cancel_quit(&mut self) {
        self.state = self.last_page;
    }

    pub fn should_quit(&self) -> bool {
        self.state == AppState::Quit
    }

    pub fn on_reply(&mut self, reply: Delivery) {
        if !reply.delivered {
            self.status_indicator.set_status("Last send failed, see log");
            self.logs.add("Send failed");
        } else {
            self.status_indicator.clear_status();
            self.logs.add("Reply received");
        }
        self.chat.complete(reply.message);
        self.chat_scroll = 0;
        self.status_indicator.set_waiting(self.chat.pending());
    }

    pub fn on_sent(&mut self) {
        self.chat_scroll = 0;
        self.status_indicator.clear_status();
        self.status_indicator.set_waiting(self.chat.pending());
    }

    pub fn on_album_loaded(&mut self, result: PlatformResult<Vec<Solution>>) {
        self.album = match result {
            Ok(solutions) => {
                self.logs.add(format!("Album loaded ({} solutions)", solutions.len()));
                PageData::Ready(solutions)
            }
            Err(e) => {
                error!("album load failed: {}", e);
                self.logs.add(format!("Album load failed: {}", e));
                PageData::Failed(ALBUM_ERROR.to_string())
            }
        };
        self.album_selected = 0;
    }

    pub fn on_analytics_loaded(&mut self, result: PlatformResult<Analytics>) {
        self.analytics = match result {
            Ok(analytics) => PageData::Ready(analytics),
            Err(e) => {
                error!("analytics fetch failed: {}", e);
                self.logs.add(format!("Analytics fetch failed: {}", e));
                PageData::Failed(ANALYTICS_ERROR.to_string())
            }
        };
    }

    pub fn on_api_call(&mut self, call: &ApiCallLog) {
        self.logs.add_api_call(call);
    }

    pub fn tick(&mut self) {
        self.status_indicator.tick();
    }

    pub fn scroll_up(&mut self) {
        let max = self.chat.transcript().len().saturating_sub(1);
        if self.chat_scroll < max {
            self.chat_scroll += 1;
        }
    }

    pub fn scroll_down(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_sub(1);
    }

    pub fn album_len(&self) -> usize {
        match &self.album {
            PageData::Ready(solutions) => solutions.len(),
            _ => 0,
        }
    }

    pub fn album_next(&mut self) {
        let len = self.album_len();
        if len > 0 {
            self.album_selected = (self.album_selected + 1) % len;
        }
    }

    pub fn album_previous(&mut self) {
        let len = self.album_len();
        if len > 0 {
            self.album_selected = (self.album_selected + len - 1) % len;
        }
    }
}
