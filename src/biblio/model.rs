use chrono::{DateTime, SubsecRound, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Reading status of a book.
///
/// Stored lowercase in Spanish, as the rest of the record keys are.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(rename = "pendiente")]
    Pending,
    #[serde(rename = "leyendo")]
    Reading,
    #[serde(rename = "terminado")]
    Finished,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Pending, Status::Reading, Status::Finished];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pendiente",
            Status::Reading => "leyendo",
            Status::Finished => "terminado",
        }
    }

    /// Comma separated list of accepted values, for messages and prompts.
    pub fn allowed() -> String {
        Self::ALL
            .iter()
            .map(Status::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses case-insensitively, ignoring surrounding whitespace.
impl FromStr for Status {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or(())
    }
}

/// A book record, exactly as persisted under `<prefix>:<id>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "autor")]
    pub author: String,
    #[serde(rename = "genero")]
    pub genre: String,
    #[serde(rename = "estado")]
    pub status: Status,
    #[serde(rename = "creado_en", with = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "actualizado_en", with = "timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Book {
    pub fn new(title: String, author: String, genre: String, status: Status) -> Self {
        let now = now();
        Self {
            id: Uuid::new_v4(),
            title,
            author,
            genre,
            status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Refreshes `updated_at`, guaranteeing it moves forward even when the
    /// clock has not ticked since the last write.
    pub fn touch(&mut self) {
        let now = now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + TimeDelta::microseconds(1)
        };
    }
}

/// A set of book fields where each one may be absent.
///
/// Used both as the input of a create (all fields expected) and as a
/// partial update (only the supplied fields change).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFields {
    pub title: Option<String>,
    pub author: Option<String>,
    pub genre: Option<String>,
    pub status: Option<String>,
}

impl BookFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, value: impl Into<String>) -> Self {
        self.title = Some(value.into());
        self
    }

    pub fn author(mut self, value: impl Into<String>) -> Self {
        self.author = Some(value.into());
        self
    }

    pub fn genre(mut self, value: impl Into<String>) -> Self {
        self.genre = Some(value.into());
        self
    }

    pub fn status(mut self, value: impl Into<String>) -> Self {
        self.status = Some(value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author.is_none()
            && self.genre.is_none()
            && self.status.is_none()
    }
}

/// Current UTC time at the precision timestamps are stored with.
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// RFC 3339 timestamps with microseconds.
///
/// Records written by older tooling carry naive ISO-8601 timestamps with no
/// offset; those are read as UTC.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Micros, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw)))
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Pendiente".parse::<Status>(), Ok(Status::Pending));
        assert_eq!("  LEYENDO ".parse::<Status>(), Ok(Status::Reading));
        assert_eq!("terminado".parse::<Status>(), Ok(Status::Finished));
        assert!("abandonado".parse::<Status>().is_err());
    }

    #[test]
    fn book_serializes_with_record_keys() {
        let mut book = Book::new(
            "Dune".into(),
            "Herbert".into(),
            "scifi".into(),
            Status::Pending,
        );
        book.created_at = Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap();
        book.updated_at = book.created_at;

        let json: serde_json::Value = serde_json::to_value(&book).unwrap();
        assert_eq!(json["titulo"], "Dune");
        assert_eq!(json["autor"], "Herbert");
        assert_eq!(json["genero"], "scifi");
        assert_eq!(json["estado"], "pendiente");
        assert_eq!(json["creado_en"], "2024-03-01T10:00:00.000000Z");
        assert_eq!(json["id"], book.id.to_string());
    }

    #[test]
    fn reads_naive_timestamps_as_utc() {
        let raw = r#"{
            "id": "6f1c1d1e-0000-4000-8000-000000000001",
            "titulo": "Rayuela",
            "autor": "Cortázar",
            "genero": "novela",
            "estado": "leyendo",
            "creado_en": "2024-05-02T18:04:11.532190",
            "actualizado_en": "2024-05-02T18:04:11.532201"
        }"#;
        let book: Book = serde_json::from_str(raw).unwrap();
        assert_eq!(book.status, Status::Reading);
        assert_eq!(
            book.created_at,
            timestamp::parse("2024-05-02T18:04:11.532190Z").unwrap()
        );
        assert!(book.created_at <= book.updated_at);
    }

    #[test]
    fn touch_always_moves_forward() {
        let mut book = Book::new("A".into(), "B".into(), "C".into(), Status::Pending);
        let future = now() + TimeDelta::hours(1);
        book.updated_at = future;
        book.touch();
        assert!(book.updated_at > future);
        assert!(book.created_at <= book.updated_at);
    }
}
