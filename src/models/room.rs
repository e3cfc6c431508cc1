use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: i64,
    #[serde(default)]
    pub roomname: String,
    #[serde(default)]
    pub floor: i64,
    #[serde(default)]
    pub capacity: i64,
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl Room {
    pub fn has_feature(&self, feature_id: i64) -> bool {
        self.features.iter().any(|f| f.id == feature_id)
    }

    pub fn feature_titles(&self) -> String {
        self.features
            .iter()
            .map(|f| f.title.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Search filters for the admin room table. Kept as strings so empty inputs
/// round-trip through the query string untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomFilter {
    #[serde(default)]
    pub roomname: String,
    #[serde(default)]
    pub floor: String,
    #[serde(default, rename = "minCapacity")]
    pub min_capacity: String,
    #[serde(default, rename = "maxCapacity")]
    pub max_capacity: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureFilter {
    #[serde(default)]
    pub title: String,
}

/// Payload for `POST /Room` and `PUT /Room/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct RoomInput {
    pub roomname: String,
    pub floor: i64,
    pub capacity: i64,
    pub features: Vec<i64>,
}

/// Payload for `POST /Feature` and `PUT /Feature/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureInput {
    pub title: String,
    pub description: String,
}

/// Raw room form. `features` arrives as repeated keys, so handlers decode the
/// body with `parse_room_form` instead of `web::Form`.
#[derive(Debug, Clone, Default)]
pub struct RoomForm {
    pub roomname: String,
    pub floor: String,
    pub capacity: String,
    pub features: Vec<i64>,
    pub csrf_token: String,
}

/// Decode an urlencoded room form, collecting every `features` value.
pub fn parse_room_form(body: &[u8]) -> RoomForm {
    let mut form = RoomForm::default();
    let pairs: Vec<(String, String)> = serde_urlencoded::from_bytes(body).unwrap_or_default();
    for (key, value) in pairs {
        match key.as_str() {
            "roomname" => form.roomname = value,
            "floor" => form.floor = value,
            "capacity" => form.capacity = value,
            "features" => {
                if let Ok(id) = value.trim().parse() {
                    form.features.push(id);
                }
            }
            "csrf_token" => form.csrf_token = value,
            _ => {}
        }
    }
    form
}

#[derive(Debug, Deserialize)]
pub struct FeatureForm {
    pub title: String,
    pub description: String,
    pub csrf_token: String,
}
