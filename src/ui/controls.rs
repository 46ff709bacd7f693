use iced::widget::{button, column, row, text, text_input, Column, TextInput};
use iced::{Alignment, Element, Length};

use crate::state::query::{coerce_number, format_number, Filters, QueryState};
use crate::Message;

/// Text typed into the pagination boxes, kept exactly as entered.
/// The coerced numbers live in `QueryState`.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationInput {
    pub limit: String,
    pub offset: String,
}

impl PaginationInput {
    pub fn from_query(query: &QueryState) -> Self {
        Self {
            limit: format_number(query.limit),
            offset: format_number(query.offset),
        }
    }

    /// Store the typed limit and return its numeric value
    pub fn set_limit(&mut self, value: String) -> f64 {
        let limit = coerce_number(&value);
        self.limit = value;
        limit
    }

    /// Store the typed offset and return its numeric value
    pub fn set_offset(&mut self, value: String) -> f64 {
        let offset = coerce_number(&value);
        self.offset = value;
        offset
    }
}

/// Uncommitted filter text. Nothing reaches the query until `submit`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterDraft {
    pub user_email: String,
    pub title: String,
    pub album_title: String,
}

impl FilterDraft {
    /// The filter triple to commit, cleared fields included
    pub fn submit(&self) -> Filters {
        Filters {
            title: self.title.clone(),
            album_title: self.album_title.clone(),
            user_email: self.user_email.clone(),
        }
    }
}

pub fn pagination(input: &PaginationInput) -> Element<'_, Message> {
    row![
        labeled(
            "Offset",
            text_input("Offset", &input.offset).on_input(Message::OffsetChanged)
        ),
        labeled(
            "Limit",
            text_input("Limit", &input.limit).on_input(Message::LimitChanged)
        ),
    ]
    .spacing(16)
    .into()
}

/// Enter in any field submits, same as the Apply button
pub fn filter_form(draft: &FilterDraft) -> Element<'_, Message> {
    row![
        labeled(
            "User Email",
            text_input("User Email", &draft.user_email)
                .on_input(Message::EmailDraftChanged)
                .on_submit(Message::ApplyFilters)
        ),
        labeled(
            "Photo Title",
            text_input("Photo Title", &draft.title)
                .on_input(Message::TitleDraftChanged)
                .on_submit(Message::ApplyFilters)
        ),
        labeled(
            "Album Title",
            text_input("Album Title", &draft.album_title)
                .on_input(Message::AlbumTitleDraftChanged)
                .on_submit(Message::ApplyFilters)
        ),
        button("Apply").on_press(Message::ApplyFilters).padding([8, 20]),
    ]
    .spacing(16)
    .align_y(Alignment::End)
    .into()
}

fn labeled<'a>(label: &'a str, input: TextInput<'a, Message>) -> Column<'a, Message> {
    column![text(label).size(12), input.padding(8).width(Length::Fixed(180.0))].spacing(4)
}
