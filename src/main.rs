use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Color, Element, Length, Task, Theme};
use thiserror::Error;
use tracing::{debug, info};

mod api;
mod config;
mod logging;
mod media;
mod state;
mod ui;

use api::{ApiError, PhotoClient};
use config::{Config, ConfigError};
use media::thumbnail::{self, ThumbnailError};
use state::browser::{Action, BrowserState, FetchRequest, Ticket};
use state::data::EnrichedPhoto;
use ui::controls::{FilterDraft, PaginationInput};
use ui::grid::Thumbnails;

/// Anything that stops the application from starting
#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("photo API client: {0}")]
    Client(#[from] ApiError),

    #[error(transparent)]
    Ui(#[from] iced::Error),
}

/// Main application state
struct PhotoBrowser {
    client: PhotoClient,
    thumbnail_size: u32,
    thumbnail_concurrency: usize,
    /// Query, results, selection and error state
    state: BrowserState,
    /// Limit/offset text as typed
    pagination: PaginationInput,
    /// Filter text not yet applied
    draft: FilterDraft,
    thumbnails: Thumbnails,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    LimitChanged(String),
    OffsetChanged(String),
    EmailDraftChanged(String),
    TitleDraftChanged(String),
    AlbumTitleDraftChanged(String),
    /// Commit the filter draft
    ApplyFilters,
    PhotoClicked(Option<f64>),
    Retry,
    PhotosLoaded {
        ticket: Ticket,
        result: Result<Vec<EnrichedPhoto>, ApiError>,
    },
    ThumbnailLoaded {
        ticket: Ticket,
        index: usize,
        result: Result<Handle, ThumbnailError>,
    },
}

impl PhotoBrowser {
    /// Create the application and issue the first request
    fn new(config: Config, client: PhotoClient) -> (Self, Task<Message>) {
        let (state, request) = BrowserState::new();

        let app = PhotoBrowser {
            client,
            thumbnail_size: config.thumbnail_size,
            thumbnail_concurrency: config.thumbnail_concurrency,
            pagination: PaginationInput::from_query(state.query()),
            state,
            draft: FilterDraft::default(),
            thumbnails: Thumbnails::default(),
        };
        let task = app.fetch(request);

        (app, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            // Pagination edits go straight to the query
            Message::LimitChanged(value) => {
                let limit = self.pagination.set_limit(value);
                self.dispatch(Action::SetLimit(limit))
            }
            Message::OffsetChanged(value) => {
                let offset = self.pagination.set_offset(value);
                self.dispatch(Action::SetOffset(offset))
            }
            // Filter edits stay in the draft until applied
            Message::EmailDraftChanged(value) => {
                self.draft.user_email = value;
                Task::none()
            }
            Message::TitleDraftChanged(value) => {
                self.draft.title = value;
                Task::none()
            }
            Message::AlbumTitleDraftChanged(value) => {
                self.draft.album_title = value;
                Task::none()
            }
            Message::ApplyFilters => {
                let filters = self.draft.submit();
                self.dispatch(Action::SetFilters(filters))
            }
            Message::PhotoClicked(id) => self.dispatch(Action::Select(id)),
            Message::Retry => self.dispatch(Action::Retry),
            Message::PhotosLoaded { ticket, result } => {
                // Only a result set that was actually applied gets thumbnails
                let task = self.dispatch(Action::Loaded { ticket, result });
                if self.state.results_ticket() == Some(ticket) {
                    return Task::batch([task, self.load_thumbnails(ticket)]);
                }
                task
            }
            Message::ThumbnailLoaded { ticket, index, result } => {
                // Failed thumbnails keep their title placeholder
                match result {
                    Ok(handle) => {
                        if self.thumbnails.insert(ticket, index, handle) {
                            debug!(ticket, index, loaded = self.thumbnails.len(), "thumbnail ready");
                        } else {
                            debug!(ticket, index, "dropping thumbnail for replaced results");
                        }
                    }
                    Err(err) => debug!(ticket, index, error = %err, "thumbnail failed"),
                }
                Task::none()
            }
        }
    }

    /// Run an action through the state machine, sending any request it yields
    fn dispatch(&mut self, action: Action) -> Task<Message> {
        match self.state.apply(action) {
            Some(request) => self.fetch(request),
            None => Task::none(),
        }
    }

    fn fetch(&self, request: FetchRequest) -> Task<Message> {
        let client = self.client.clone();
        let FetchRequest { ticket, query } = request;

        Task::perform(
            async move { client.fetch_photos(&query).await },
            move |result| Message::PhotosLoaded { ticket, result },
        )
    }

    /// Download thumbnails for every photo in the current set that has a URL.
    /// The batch is abortable; a newer result set cancels it.
    fn load_thumbnails(&mut self, ticket: Ticket) -> Task<Message> {
        self.thumbnails.reset(ticket);

        let jobs: Vec<(usize, String)> = self
            .state
            .photos()
            .iter()
            .enumerate()
            .filter_map(|(index, photo)| Some((index, photo.thumbnail_url.clone()?)))
            .collect();
        if jobs.is_empty() {
            return Task::none();
        }
        debug!(ticket, count = jobs.len(), "loading thumbnails");

        let downloads = thumbnail::load_all(
            self.client.clone(),
            jobs,
            self.thumbnail_size,
            self.thumbnail_concurrency,
        );
        let (task, handle) = Task::run(downloads, move |(index, result)| Message::ThumbnailLoaded {
            ticket,
            index,
            result: result.map(|t| Handle::from_rgba(t.width, t.height, t.pixels)),
        })
        .abortable();

        self.thumbnails.track(handle);
        task
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        // Controls, then status, then the grid
        let mut browser = column![
            ui::controls::pagination(&self.pagination),
            ui::controls::filter_form(&self.draft),
        ]
        .spacing(16);

        if let Some(error) = self.state.error() {
            browser = browser.push(
                row![
                    text(error).color(Color::from_rgb(0.9, 0.35, 0.35)),
                    button("Retry").on_press(Message::Retry).padding([4, 12]),
                ]
                .spacing(12)
                .align_y(Alignment::Center),
            );
        }

        let status = if self.state.is_loading() {
            "Loading...".to_string()
        } else {
            format!("{} photos", self.state.photos().len())
        };
        browser = browser
            .push(text(status).size(12))
            .push(ui::grid::grid(self.state.photos(), &self.thumbnails));

        // Detail panel only while something is selected
        let mut content = row![browser].spacing(32);
        if let Some(photo) = self.state.selection() {
            content = content.push(ui::detail::detail_panel(photo));
        }

        container(content)
            .padding(32)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> Result<(), StartupError> {
    let dotenv = dotenvy::dotenv();
    logging::init();
    if let Ok(path) = dotenv {
        debug!("loaded environment from {}", path.display());
    }

    let config = Config::from_env()?;
    let client = PhotoClient::new(&config)?;
    info!(endpoint = %client.photos_url(), "starting photo browser");

    iced::application("Photo Browser", PhotoBrowser::update, PhotoBrowser::view)
        .theme(PhotoBrowser::theme)
        .centered()
        .run_with(move || PhotoBrowser::new(config, client))?;

    Ok(())
}
