use iced::widget::{column, container, text, Column};
use iced::{Color, Element};

use crate::state::data::EnrichedPhoto;
use crate::Message;

/// Shown for user fields missing anywhere along album → user → address → company
pub const PLACEHOLDER: &str = "--";

/// Display values for the detail panel, already resolved through the
/// optional nesting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailFields<'a> {
    pub photo_title: &'a str,
    pub album_title: &'a str,
    pub user_name: &'a str,
    pub user_email: &'a str,
    pub city: &'a str,
    pub company: &'a str,
}

impl<'a> DetailFields<'a> {
    pub fn from_photo(photo: &'a EnrichedPhoto) -> Self {
        let album = photo.album.as_ref();
        let user = photo.user();
        let address = user.and_then(|u| u.address.as_ref());

        Self {
            photo_title: photo.title.as_deref().unwrap_or_default(),
            album_title: album.and_then(|a| a.title.as_deref()).unwrap_or_default(),
            user_name: user.and_then(|u| u.name.as_deref()).unwrap_or(PLACEHOLDER),
            user_email: user.and_then(|u| u.email.as_deref()).unwrap_or(PLACEHOLDER),
            city: address.and_then(|a| a.city.as_deref()).unwrap_or(PLACEHOLDER),
            company: photo
                .company()
                .and_then(|c| c.name.as_deref())
                .unwrap_or(PLACEHOLDER),
        }
    }
}

pub fn detail_panel(photo: &EnrichedPhoto) -> Element<'_, Message> {
    let fields = DetailFields::from_photo(photo);

    let content: Column<'_, Message> = column![
        heading("Photo"),
        text(format!("Title: {}", fields.photo_title)).size(14),
        heading("Album"),
        text(format!("Title: {}", fields.album_title)).size(14),
        heading("User"),
        text(format!("Name: {}", fields.user_name)).size(14),
        text(format!("Email: {}", fields.user_email)).size(14),
        text(format!("City: {}", fields.city)).size(14),
        text(format!("Company: {}", fields.company)).size(14),
    ]
    .spacing(6);

    container(content)
        .padding(16)
        .max_width(500.0)
        .style(container::rounded_box)
        .into()
}

fn heading(label: &str) -> iced::widget::Text<'_> {
    text(label).size(13).color(Color::from_rgb(0.6, 0.6, 0.65))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::{Address, Company, EnrichedAlbum, User};

    fn full_photo() -> EnrichedPhoto {
        EnrichedPhoto {
            id: Some(1.0),
            title: Some("sunset".into()),
            album: Some(EnrichedAlbum {
                id: Some(10.0),
                title: Some("holidays".into()),
                user: Some(User {
                    name: Some("Leanne Graham".into()),
                    email: Some("Sincere@april.biz".into()),
                    address: Some(Address {
                        city: Some("Gwenborough".into()),
                        company: Some(Company {
                            name: Some("Romaguera-Crona".into()),
                            ..Company::default()
                        }),
                        ..Address::default()
                    }),
                    ..User::default()
                }),
                ..EnrichedAlbum::default()
            }),
            ..EnrichedPhoto::default()
        }
    }

    #[test]
    fn test_full_chain() {
        let photo = full_photo();
        assert_eq!(
            DetailFields::from_photo(&photo),
            DetailFields {
                photo_title: "sunset",
                album_title: "holidays",
                user_name: "Leanne Graham",
                user_email: "Sincere@april.biz",
                city: "Gwenborough",
                company: "Romaguera-Crona",
            }
        );
    }

    #[test]
    fn test_missing_user() {
        let mut photo = full_photo();
        photo.album.as_mut().unwrap().user = None;
        let fields = DetailFields::from_photo(&photo);

        assert_eq!(fields.album_title, "holidays");
        for value in [fields.user_name, fields.user_email, fields.city, fields.company] {
            assert_eq!(value, PLACEHOLDER);
        }
    }

    #[test]
    fn test_missing_album() {
        let photo = EnrichedPhoto {
            id: Some(3.0),
            ..EnrichedPhoto::default()
        };
        let fields = DetailFields::from_photo(&photo);

        assert_eq!(fields.photo_title, "");
        assert_eq!(fields.album_title, "");
        assert_eq!(fields.user_name, PLACEHOLDER);
        assert_eq!(fields.company, PLACEHOLDER);
    }

    #[test]
    fn test_each_level_falls_back_independently() {
        let mut photo = full_photo();
        let user = photo.album.as_mut().unwrap().user.as_mut().unwrap();
        user.address.as_mut().unwrap().company = None;
        user.email = None;
        let fields = DetailFields::from_photo(&photo);

        assert_eq!(fields.user_name, "Leanne Graham");
        assert_eq!(fields.user_email, PLACEHOLDER);
        assert_eq!(fields.city, "Gwenborough");
        assert_eq!(fields.company, PLACEHOLDER);

        let mut photo = full_photo();
        photo.album.as_mut().unwrap().user.as_mut().unwrap().address = None;
        let fields = DetailFields::from_photo(&photo);
        assert_eq!(fields.user_name, "Leanne Graham");
        assert_eq!(fields.city, PLACEHOLDER);
        assert_eq!(fields.company, PLACEHOLDER);
    }
}
