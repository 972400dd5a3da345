use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Pool, QueryBuilder, Sqlite};
use tracing::debug;

use models::{split_verses, Filter, Song, VerseResponse};

mod error;
mod filter;

pub use error::{DbError, Result};

pub type SqlitePool = Pool<Sqlite>;

pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Applies pending migrations. Already-applied scripts are skipped.
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    fill_folded_columns(pool).await
}

/// Rows inserted before the folded columns existed still have an empty
/// `group_name_folded`; a stored group name is never empty.
async fn fill_folded_columns(pool: &SqlitePool) -> Result<()> {
    let rows: Vec<(String, String, String, String)> = sqlx::query_as(
        "SELECT group_name, song_name, lyrics, link FROM music_library WHERE group_name_folded = ''",
    )
    .fetch_all(pool)
    .await?;
    if rows.is_empty() {
        return Ok(());
    }

    let mut tx = pool.begin().await?;
    for (group, song, lyrics, link) in &rows {
        sqlx::query(
            r#"
UPDATE music_library SET
  group_name_folded = ?3,
  song_name_folded = ?4,
  lyrics_folded = ?5,
  link_folded = ?6
WHERE group_name = ?1 AND song_name = ?2
"#,
        )
        .bind(group)
        .bind(song)
        .bind(fold(group))
        .bind(fold(song))
        .bind(fold(lyrics))
        .bind(fold(link))
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    debug!(rows = rows.len(), "filled folded search columns");
    Ok(())
}

pub async fn ping(pool: &SqlitePool) -> Result<()> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await?;
    Ok(())
}

pub async fn close(pool: &SqlitePool) {
    pool.close().await;
}

pub async fn add_song(pool: &SqlitePool, song: &Song) -> Result<()> {
    let result = sqlx::query(
        r#"
INSERT INTO music_library (
  group_name, song_name, release_date, lyrics, link,
  group_name_folded, song_name_folded, lyrics_folded, link_folded
)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
ON CONFLICT(group_name, song_name) DO NOTHING
"#,
    )
    .bind(&song.group)
    .bind(&song.song)
    .bind(song.detail.release_date)
    .bind(&song.detail.text)
    .bind(&song.detail.link)
    .bind(fold(&song.group))
    .bind(fold(&song.song))
    .bind(fold(&song.detail.text))
    .bind(fold(&song.detail.link))
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        debug!(group = %song.group, song = %song.song, "song not added");
        return Err(DbError::NotAdded);
    }
    Ok(())
}

pub async fn delete_song(pool: &SqlitePool, group: &str, song: &str) -> Result<()> {
    let result = sqlx::query("DELETE FROM music_library WHERE group_name = ?1 AND song_name = ?2")
        .bind(group)
        .bind(song)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        debug!(group, song, "song not deleted");
        return Err(DbError::NotDeleted);
    }
    Ok(())
}

/// Partial update keyed on `(group, song)`.
///
/// A `None` release date and blank lyrics/link leave the stored column as is.
pub async fn update_song(pool: &SqlitePool, song: &Song) -> Result<()> {
    let text = non_blank(&song.detail.text);
    let link = non_blank(&song.detail.link);

    let result = sqlx::query(
        r#"
UPDATE music_library SET
  release_date = COALESCE(?3, release_date),
  lyrics = COALESCE(?4, lyrics),
  link = COALESCE(?5, link),
  lyrics_folded = COALESCE(?6, lyrics_folded),
  link_folded = COALESCE(?7, link_folded)
WHERE group_name = ?1 AND song_name = ?2
"#,
    )
    .bind(&song.group)
    .bind(&song.song)
    .bind(song.detail.release_date)
    .bind(text)
    .bind(link)
    .bind(text.map(fold))
    .bind(link.map(fold))
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        debug!(
            group = %song.group,
            song = %song.song,
            release_date = ?song.detail.release_date,
            lyrics = %song.detail.text,
            link = %song.detail.link,
            "song not updated"
        );
        return Err(DbError::NotUpdated);
    }
    Ok(())
}

/// Songs matching every predicate in `filter`, oldest release first.
pub async fn get_songs(pool: &SqlitePool, filter: &Filter) -> Result<Vec<Song>> {
    let mut query = QueryBuilder::<Sqlite>::new(
        "SELECT group_name, song_name, release_date, lyrics, link FROM music_library",
    );
    filter::push_filter(&mut query, filter);

    let songs = query.build_query_as::<Song>().fetch_all(pool).await?;
    Ok(songs)
}

/// Returns verse `verse_num` (1-based) of the song's lyrics.
pub async fn get_lyrics(
    pool: &SqlitePool,
    group: &str,
    song: &str,
    verse_num: usize,
) -> Result<VerseResponse> {
    let lyrics: Option<String> = sqlx::query_scalar(
        "SELECT lyrics FROM music_library WHERE group_name = ?1 AND song_name = ?2",
    )
    .bind(group)
    .bind(song)
    .fetch_optional(pool)
    .await?;

    let Some(lyrics) = lyrics else {
        debug!(group, song, "song not found");
        return Err(DbError::NotFound);
    };

    let mut verses = split_verses(&lyrics);
    let total_verses = verses.len();

    if verse_num == 0 || verse_num > total_verses {
        debug!(group, song, verse_num, total_verses, "verse number out of range");
        return Err(DbError::OutOfRange { total_verses });
    }

    Ok(VerseResponse {
        song: song.to_string(),
        group: group.to_string(),
        verse: verses.swap_remove(verse_num - 1),
        verse_num,
        total_verses,
    })
}

/// Case folding shared by stored search columns and filter needles.
pub(crate) fn fold(value: &str) -> String {
    value.to_lowercase()
}

fn non_blank(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
