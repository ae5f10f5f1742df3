use serde::{Deserialize, Serialize};

/// Row of the `users` table. `id` is the caller-supplied account id
/// (e.g. the streaming account id); every other column is overwritten on upsert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub country: Option<String>,
    pub followers: Option<i64>,
    pub profile_image_url: Option<String>,
    pub product: Option<String>,
}
