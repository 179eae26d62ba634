//! Posts API resources.
//!
//! Shapes follow the public JSONPlaceholder API (`/posts`, `/users/{id}`).

use serde::{Deserialize, Serialize};

/// A post as listed by the posts API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub user_id: u64,
    pub id: u64,
    pub title: String,
    pub body: String,
}

impl Post {
    /// Body shortened for list cards: at most `max_chars` characters,
    /// with an ellipsis when something was cut.
    pub fn preview(&self, max_chars: usize) -> String {
        let flat = self.body.replace('\n', " ");
        if flat.chars().count() <= max_chars {
            return flat;
        }
        let cut: String = flat.chars().take(max_chars).collect();
        format!("{}…", cut.trim_end())
    }
}

/// Post author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub name: String,
    pub username: String,
    pub email: String,
    pub address: Address,
    pub phone: String,
    pub website: String,
    pub company: Company,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub suite: String,
    pub city: String,
    pub zipcode: String,
    pub geo: Geo,
}

impl Address {
    /// `street, suite, city, zipcode`
    pub fn one_line(&self) -> String {
        format!("{}, {}, {}, {}", self.street, self.suite, self.city, self.zipcode)
    }
}

/// Coordinates are strings on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    pub lat: String,
    pub lng: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub name: String,
    pub catch_phrase: String,
    pub bs: String,
}

/// A post together with its author, as shown on the detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostWithAuthor {
    pub post: Post,
    pub author: User,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{json, Value};

    pub fn post_json() -> Value {
        json!({
            "userId": 1,
            "id": 1,
            "title": "sunt aut facere repellat provident occaecati excepturi optio reprehenderit",
            "body": "quia et suscipit\nsuscipit recusandae consequuntur expedita et cum\nreprehenderit molestiae ut ut quas totam"
        })
    }

    pub fn user_json() -> Value {
        json!({
            "id": 1,
            "name": "Leanne Graham",
            "username": "Bret",
            "email": "Sincere@april.biz",
            "address": {
                "street": "Kulas Light",
                "suite": "Apt. 556",
                "city": "Gwenborough",
                "zipcode": "92998-3874",
                "geo": { "lat": "-37.3159", "lng": "81.1496" }
            },
            "phone": "1-770-736-8031 x56442",
            "website": "hildegard.org",
            "company": {
                "name": "Romaguera-Crona",
                "catchPhrase": "Multi-layered client-server neural-net",
                "bs": "harness real-time e-markets"
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{post_json, user_json};
    use super::*;

    #[test]
    fn test_post_deserialize() {
        let post: Post = serde_json::from_value(post_json()).unwrap();
        assert_eq!(post.user_id, 1);
        assert_eq!(post.id, 1);
        assert!(post.title.starts_with("sunt aut facere"));
    }

    #[test]
    fn test_post_serializes_camel_case() {
        let post: Post = serde_json::from_value(post_json()).unwrap();
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["userId"], 1);
        assert!(json.get("user_id").is_none());
    }

    #[test]
    fn test_user_nested_structures() {
        let user: User = serde_json::from_value(user_json()).unwrap();
        assert_eq!(user.username, "Bret");
        assert_eq!(user.address.geo.lat, "-37.3159");
        assert_eq!(user.company.catch_phrase, "Multi-layered client-server neural-net");
        assert_eq!(
            user.address.one_line(),
            "Kulas Light, Apt. 556, Gwenborough, 92998-3874"
        );
    }

    #[test]
    fn test_preview_truncates_long_body() {
        let post: Post = serde_json::from_value(post_json()).unwrap();
        let preview = post.preview(20);
        assert!(preview.ends_with('…'));
        assert!(!preview.contains('\n'));
        assert!(preview.chars().count() <= 21);
    }

    #[test]
    fn test_preview_keeps_short_body() {
        let post = Post {
            user_id: 2,
            id: 11,
            title: "t".into(),
            body: "short".into(),
        };
        assert_eq!(post.preview(20), "short");
    }
}
