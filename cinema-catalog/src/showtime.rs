use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cinema_shared::time::deserialize_optional_instant;

/// A screening of a movie in a room
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Showtime {
    pub id: i64,
    pub movie_id: i64,
    #[serde(default)]
    pub cinema_name: Option<String>,
    #[serde(default)]
    pub room_name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_optional_instant")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_optional_instant")]
    pub end_time: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_showtime_from_backend() {
        let showtime: Showtime = serde_json::from_value(serde_json::json!({
            "id": 5,
            "movieId": 2,
            "roomName": "Room 3",
            "startTime": "2024-05-01T19:30:00"
        }))
        .unwrap();

        let start = showtime.start_time.unwrap();
        assert_eq!((start.day(), start.hour(), start.minute()), (1, 19, 30));
        assert!(showtime.end_time.is_none());
    }
}
