//! Read access to the movie dataset table.
//!
//! Every call checks one connection out of the pool, runs a single read-only
//! statement, and hands the connection back when the guard drops, whether the
//! query succeeded or not.

use bigdecimal::{BigDecimal, ToPrimitive};
use serde::Serialize;
use sqlx::mysql::MySqlRow;
use sqlx::Row;
use tracing::{debug, instrument};

use crate::util::db::Db;

const COLUMNS: &str = "id, title, url, genres, region, rating";

/// One row of the dataset, nullable columns kept as `Option`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Movie {
    pub id: i64,
    pub title: Option<String>,
    pub url: Option<String>,
    pub genres: Option<String>,
    pub region: Option<String>,
    pub rating: Option<f64>,
}

impl Movie {
    fn from_row(row: &MySqlRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: decode_id(row)?,
            title: row.try_get("title")?,
            url: row.try_get("url")?,
            genres: row.try_get("genres")?,
            region: row.try_get("region")?,
            rating: decode_rating(row)?,
        })
    }
}

/// Signed or unsigned integer key.
fn decode_id(row: &MySqlRow) -> Result<i64, sqlx::Error> {
    match row.try_get::<i64, _>("id") {
        Err(sqlx::Error::ColumnDecode { .. }) => {
            let raw: u64 = row.try_get("id")?;
            i64::try_from(raw).map_err(|e| sqlx::Error::ColumnDecode {
                index: "id".to_string(),
                source: Box::new(e),
            })
        }
        other => other,
    }
}

/// `rating` may be DOUBLE, FLOAT or DECIMAL depending on how the table was loaded.
fn decode_rating(row: &MySqlRow) -> Result<Option<f64>, sqlx::Error> {
    if let Ok(v) = row.try_get::<Option<f64>, _>("rating") {
        return Ok(v);
    }
    if let Ok(v) = row.try_get::<Option<f32>, _>("rating") {
        return Ok(v.map(f64::from));
    }
    let v: Option<BigDecimal> = row.try_get("rating")?;
    Ok(v.and_then(|d| d.to_f64()))
}

/// Which rows a caller needs; each variant adds `IS NOT NULL` guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovieFilter {
    All,
    WithGenres,
    RatedGenres,
    RatedGenresWithRegion,
}

impl MovieFilter {
    fn required_columns(self) -> &'static [&'static str] {
        match self {
            MovieFilter::All => &[],
            MovieFilter::WithGenres => &["genres"],
            MovieFilter::RatedGenres => &["genres", "rating"],
            MovieFilter::RatedGenresWithRegion => &["genres", "region", "rating"],
        }
    }

    /// Full statement for `table`. The caller guarantees `table` is a bare identifier.
    pub fn sql(self, table: &str) -> String {
        let mut sql = format!("SELECT {COLUMNS} FROM `{table}`");
        let guards: Vec<String> = self
            .required_columns()
            .iter()
            .map(|c| format!("{c} IS NOT NULL"))
            .collect();
        if !guards.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&guards.join(" AND "));
        }
        sql.push_str(" ORDER BY id");
        sql
    }
}

#[instrument(skip(db), fields(table = db.table()))]
pub async fn fetch_movies(db: &Db, filter: MovieFilter) -> Result<Vec<Movie>, sqlx::Error> {
    let sql = filter.sql(db.table());
    let rows = {
        let mut conn = db.pool.acquire().await?;
        sqlx::query(&sql).fetch_all(&mut *conn).await?
    };
    debug!(rows = rows.len(), "fetched movie rows");
    rows.iter().map(Movie::from_row).collect()
}
