use chrono::{DateTime, NaiveDate, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: Uuid,
    pub title: String,
    pub release_date: NaiveDate,
    pub genre: String,
    pub actors: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovie {
    pub title: String,
    pub release_date: NaiveDate,
    pub genre: String,
    pub actors: Vec<String>,
}

impl NewMovie {
    pub(crate) fn into_movie(self, id: Uuid) -> Movie {
        Movie {
            id,
            title: self.title,
            release_date: self.release_date,
            genre: self.genre,
            actors: self.actors,
        }
    }
}

/// Reads `YYYY-MM-DD` or an RFC 3339 timestamp, keeping only the UTC date.
pub fn parse_release_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|dt| dt.with_timezone(&Utc).date_naive())
    })
}

/// Serde adapter for optional `releaseDate` fields. An empty string is absent.
pub(crate) fn deserialize_release_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.is_empty() => Ok(None),
        Some(raw) => parse_release_date(&raw)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid releaseDate: {}", raw))),
    }
}

/// Partial update: `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoviePatch {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "deserialize_release_date")]
    pub release_date: Option<NaiveDate>,
    pub genre: Option<String>,
    pub actors: Option<Vec<String>>,
}

impl MoviePatch {
    /// Drops empty strings so they count as "not supplied".
    pub fn normalized(self) -> Self {
        Self {
            title: self.title.filter(|t| !t.is_empty()),
            release_date: self.release_date,
            genre: self.genre.filter(|g| !g.is_empty()),
            actors: self.actors,
        }
    }

    pub fn apply_to(&self, movie: &mut Movie) {
        if let Some(title) = &self.title {
            movie.title = title.clone();
        }
        if let Some(release_date) = self.release_date {
            movie.release_date = release_date;
        }
        if let Some(genre) = &self.genre {
            movie.genre = genre.clone();
        }
        if let Some(actors) = &self.actors {
            movie.actors = actors.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Movie {
        Movie {
            id: Uuid::new_v4(),
            title: "Heat".to_string(),
            release_date: NaiveDate::from_ymd_opt(1995, 12, 15).unwrap(),
            genre: "Crime".to_string(),
            actors: vec!["Al Pacino".to_string(), "Robert De Niro".to_string()],
        }
    }

    #[test]
    fn patch_only_touches_supplied_fields() {
        let mut movie = sample();
        let before = movie.clone();
        let patch = MoviePatch {
            genre: Some("Thriller".to_string()),
            ..Default::default()
        };

        patch.apply_to(&mut movie);

        assert_eq!(movie.genre, "Thriller");
        assert_eq!(movie.title, before.title);
        assert_eq!(movie.release_date, before.release_date);
        assert_eq!(movie.actors, before.actors);
    }

    #[test]
    fn empty_strings_are_not_supplied() {
        let patch = MoviePatch {
            title: Some(String::new()),
            genre: Some(String::new()),
            ..Default::default()
        }
        .normalized();
        assert_eq!(patch, MoviePatch::default());
    }

    #[test]
    fn movie_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["releaseDate"], "1995-12-15");
        assert!(value.get("release_date").is_none());
    }

    #[test]
    fn release_date_accepts_timestamps() {
        let expected = NaiveDate::from_ymd_opt(1995, 12, 15);
        assert_eq!(parse_release_date("1995-12-15"), expected);
        assert_eq!(parse_release_date("1995-12-15T00:00:00Z"), expected);
        assert_eq!(parse_release_date("1995-12-15T23:30:00-01:00"), NaiveDate::from_ymd_opt(1995, 12, 16));
        assert_eq!(parse_release_date("15/12/1995"), None);

        let patch: MoviePatch =
            serde_json::from_str(r#"{"releaseDate":"1995-12-15T10:00:00.000Z"}"#).unwrap();
        assert_eq!(patch.release_date, expected);
        assert!(serde_json::from_str::<MoviePatch>(r#"{"releaseDate":"soon"}"#).is_err());
    }

    #[test]
    fn patch_deserializes_partial_body() {
        let patch: MoviePatch = serde_json::from_str(r#"{"genre":"Comedy"}"#).unwrap();
        assert_eq!(patch.genre.as_deref(), Some("Comedy"));
        assert!(patch.title.is_none());
        assert!(patch.release_date.is_none());
        assert!(patch.actors.is_none());
    }
}
