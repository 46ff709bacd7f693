use std::collections::HashMap;

use iced::task;
use iced::widget::image::Handle;
use iced::widget::{column, container, image, mouse_area, row, scrollable, text, Row, Space};
use iced::{ContentFit, Element, Length};

use crate::state::browser::Ticket;
use crate::state::data::EnrichedPhoto;
use crate::Message;

pub const COLUMNS: usize = 3;
/// Fixed cell height in pixels
pub const ROW_HEIGHT: f32 = 164.0;
const GAP: f32 = 4.0;
const MAX_WIDTH: f32 = 500.0;
const MAX_HEIGHT: f32 = 450.0;

/// Decoded thumbnails for one result set, keyed by position in that set
#[derive(Debug, Default)]
pub struct Thumbnails {
    ticket: Option<Ticket>,
    handles: HashMap<usize, Handle>,
    /// Download batch feeding the current set
    downloads: Option<task::Handle>,
}

impl Thumbnails {
    /// Forget everything and start collecting for a new result set.
    /// Downloads still running for the previous set are aborted.
    pub fn reset(&mut self, ticket: Ticket) {
        if let Some(downloads) = self.downloads.take() {
            downloads.abort();
        }
        self.ticket = Some(ticket);
        self.handles.clear();
    }

    /// Keep the abort handle of the batch loading the current set
    pub fn track(&mut self, downloads: task::Handle) {
        if let Some(previous) = self.downloads.replace(downloads) {
            previous.abort();
        }
    }

    /// Store a thumbnail. Returns false (and drops it) if it belongs to an
    /// older result set.
    pub fn insert(&mut self, ticket: Ticket, index: usize, handle: Handle) -> bool {
        if self.ticket != Some(ticket) {
            return false;
        }
        self.handles.insert(index, handle);
        true
    }

    pub fn get(&self, index: usize) -> Option<&Handle> {
        self.handles.get(&index)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

/// The result set as rows of three clickable cells, in server order
pub fn grid<'a>(photos: &'a [EnrichedPhoto], thumbnails: &Thumbnails) -> Element<'a, Message> {
    let rows = photos
        .chunks(COLUMNS)
        .enumerate()
        .fold(column![].spacing(GAP), |rows, (row_index, chunk)| {
            let mut cells: Row<'a, Message> = row![].spacing(GAP);
            for (i, photo) in chunk.iter().enumerate() {
                cells = cells.push(cell(photo, thumbnails.get(row_index * COLUMNS + i)));
            }
            // Pad a short last row so cells keep their width
            for _ in chunk.len()..COLUMNS {
                cells = cells.push(Space::new(Length::Fill, Length::Fixed(ROW_HEIGHT)));
            }
            rows.push(cells)
        });

    // Short result sets shrink to fit; long ones scroll past MAX_HEIGHT
    container(scrollable(rows).height(Length::Shrink))
        .max_width(MAX_WIDTH)
        .max_height(MAX_HEIGHT)
        .into()
}

fn cell<'a>(photo: &'a EnrichedPhoto, handle: Option<&Handle>) -> Element<'a, Message> {
    let content: Element<'a, Message> = match handle {
        Some(handle) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fill)
            .content_fit(ContentFit::Cover)
            .into(),
        // Title stands in until the thumbnail arrives (or if it never does)
        None => container(text(photo.title.as_deref().unwrap_or_default()).size(12))
            .padding(6)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(container::rounded_box)
            .into(),
    };

    mouse_area(
        container(content)
            .width(Length::Fill)
            .height(Length::Fixed(ROW_HEIGHT)),
    )
    .on_press(Message::PhotoClicked(photo.id))
    .into()
}
