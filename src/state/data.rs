/// Shared data structures for the application state
///
/// These structs mirror the JSON returned by the photo API. The server may
/// return partially joined data, so every field is optional and the view
/// never assumes a nested value is present. Ids are plain JSON numbers, so
/// `2` and `2.0` are the same id.

use serde::Deserialize;

/// A photo as returned by `GET /photos`, optionally joined with its album
/// and the album's owner
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedPhoto {
    pub album_id: Option<f64>,
    /// Identity of the photo (used for selection lookup)
    pub id: Option<f64>,
    pub title: Option<String>,
    /// Full-size image URL
    pub url: Option<String>,
    /// Small preview URL shown in the grid
    pub thumbnail_url: Option<String>,
    pub album: Option<EnrichedAlbum>,
}

/// Album fields embedded in an [`EnrichedPhoto`]
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedAlbum {
    pub user_id: Option<f64>,
    pub id: Option<f64>,
    pub title: Option<String>,
    pub user: Option<User>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct User {
    pub id: Option<f64>,
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Address {
    pub street: Option<String>,
    pub suite: Option<String>,
    pub city: Option<String>,
    pub zipcode: Option<String>,
    pub geo: Option<Geo>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub company: Option<Company>,
}

/// Coordinates are strings on the wire
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Geo {
    pub lat: Option<String>,
    pub lng: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: Option<String>,
    pub catch_phrase: Option<String>,
    pub bs: Option<String>,
}

impl EnrichedPhoto {
    /// The album owner, if the server joined it
    pub fn user(&self) -> Option<&User> {
        self.album.as_ref().and_then(|album| album.user.as_ref())
    }

    /// The owner's company, reached through the address
    pub fn company(&self) -> Option<&Company> {
        self.user()
            .and_then(|user| user.address.as_ref())
            .and_then(|address| address.company.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_chain_deserializes() {
        let json = r#"{
            "albumId": 3,
            "id": 101,
            "title": "accusamus beatae",
            "url": "https://example.test/600/92c952",
            "thumbnailUrl": "https://example.test/150/92c952",
            "album": {
                "userId": 1,
                "id": 3,
                "title": "omnis laborum",
                "user": {
                    "id": 1,
                    "name": "Leanne Graham",
                    "username": "Bret",
                    "email": "Sincere@april.biz",
                    "address": {
                        "street": "Kulas Light",
                        "suite": "Apt. 556",
                        "city": "Gwenborough",
                        "zipcode": "92998-3874",
                        "geo": { "lat": "-37.3159", "lng": "81.1496" },
                        "phone": "1-770-736-8031",
                        "website": "hildegard.org",
                        "company": {
                            "name": "Romaguera-Crona",
                            "catchPhrase": "Multi-layered client-server neural-net",
                            "bs": "harness real-time e-markets"
                        }
                    }
                }
            }
        }"#;

        let photo: EnrichedPhoto = serde_json::from_str(json).unwrap();

        assert_eq!(photo.id, Some(101.0));
        assert_eq!(photo.album_id, Some(3.0));
        assert_eq!(photo.thumbnail_url.as_deref(), Some("https://example.test/150/92c952"));
        assert_eq!(photo.user().and_then(|u| u.email.as_deref()), Some("Sincere@april.biz"));
        let company = photo.company().unwrap();
        assert_eq!(company.name.as_deref(), Some("Romaguera-Crona"));
        assert_eq!(company.catch_phrase.as_deref(), Some("Multi-layered client-server neural-net"));
        let geo = photo.user().unwrap().address.as_ref().unwrap().geo.as_ref().unwrap();
        assert_eq!(geo.lat.as_deref(), Some("-37.3159"));
    }

    #[test]
    fn test_partial_records_deserialize() {
        let json = r#"[
            {},
            { "id": 7, "album": {} },
            { "id": 8, "album": { "title": "x", "user": { "name": "Ervin" } } },
            { "id": 9, "unexpected": true }
        ]"#;

        let photos: Vec<EnrichedPhoto> = serde_json::from_str(json).unwrap();

        assert_eq!(photos.len(), 4);
        assert_eq!(photos[0], EnrichedPhoto::default());
        assert!(photos[1].user().is_none());
        assert_eq!(photos[2].user().and_then(|u| u.name.as_deref()), Some("Ervin"));
        assert!(photos[2].company().is_none());
        assert_eq!(photos[3].id, Some(9.0));
    }

    #[test]
    fn test_float_ids_deserialize() {
        let json = r#"[
            { "id": 2.0, "albumId": 1e0, "album": { "id": 1.0, "userId": 3 } },
            { "id": 2.5 },
            { "id": 2 }
        ]"#;

        let photos: Vec<EnrichedPhoto> = serde_json::from_str(json).unwrap();

        assert_eq!(photos[0].id, Some(2.0));
        assert_eq!(photos[0].album_id, Some(1.0));
        assert_eq!(photos[0].album.as_ref().and_then(|a| a.user_id), Some(3.0));
        assert_eq!(photos[1].id, Some(2.5));
        assert_eq!(photos[0].id, photos[2].id);
    }
}
