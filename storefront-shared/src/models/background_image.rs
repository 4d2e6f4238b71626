/// Background-image setting
///
/// A single `{url}` record stored in the `settings` table under a fixed key
/// and replaced wholesale on every update.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

/// Settings key the background image is stored under
const BACKGROUND_IMAGE_KEY: &str = "background_image";

/// The singleton background-image setting
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct BackgroundImage {
    /// Image URL
    pub url: String,
}

impl BackgroundImage {
    /// Fetches the current background image, if one has been set
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn get(pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        let image = sqlx::query_as::<_, BackgroundImage>(
            r#"
            SELECT url
            FROM settings
            WHERE key = $1
            "#,
        )
        .bind(BACKGROUND_IMAGE_KEY)
        .fetch_optional(pool)
        .await?;

        Ok(image)
    }

    /// Sets the background image, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if database connection fails
    pub async fn set(pool: &PgPool, url: &str) -> Result<Self, sqlx::Error> {
        let image = sqlx::query_as::<_, BackgroundImage>(
            r#"
            INSERT INTO settings (key, url)
            VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE
            SET url = EXCLUDED.url, updated_at = NOW()
            RETURNING url
            "#,
        )
        .bind(BACKGROUND_IMAGE_KEY)
        .bind(url)
        .fetch_one(pool)
        .await?;

        Ok(image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let image = BackgroundImage {
            url: "https://cdn.example.com/bg.png".to_string(),
        };

        let json = serde_json::to_string(&image).unwrap();
        assert_eq!(json, r#"{"url":"https://cdn.example.com/bg.png"}"#);
    }
}
