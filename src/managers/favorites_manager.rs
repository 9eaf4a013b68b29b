//! Favorites Manager.
//!
//! Games, apps and movies the user pinned for quick access, backed by SQLite
//! via `rusqlite`. At most [`MAX_FAVORITES`] are kept across all kinds; adding
//! past the limit evicts the oldest.

use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::errors::FavoriteError;
use crate::types::favorite::{AddOutcome, Favorite, FavoriteItem, FavoriteKind};

/// Total favorites kept across all kinds.
pub const MAX_FAVORITES: usize = 6;

const COLUMNS: &str = "kind, id, name, img, url, added_at, seq";

/// Trait defining favorites operations.
pub trait FavoritesManagerTrait {
    fn add(&mut self, kind: FavoriteKind, item: &FavoriteItem) -> Result<AddOutcome, FavoriteError>;
    fn remove(&mut self, kind: FavoriteKind, id_or_name: &str) -> Result<Option<Favorite>, FavoriteError>;
    fn toggle(&mut self, kind: FavoriteKind, item: &FavoriteItem) -> Result<bool, FavoriteError>;
    fn is_favorite(&self, kind: FavoriteKind, id_or_name: &str) -> Result<bool, FavoriteError>;
    fn list(&self, kind: FavoriteKind) -> Result<Vec<Favorite>, FavoriteError>;
    /// Newest first across all kinds; `limit == 0` means no limit.
    fn list_all(&self, limit: usize) -> Result<Vec<Favorite>, FavoriteError>;
    fn count(&self) -> Result<usize, FavoriteError>;
    fn clear(&mut self) -> Result<(), FavoriteError>;
}

/// Favorites manager backed by a SQLite connection.
pub struct FavoritesManager<'a> {
    conn: &'a Connection,
}

impl<'a> FavoritesManager<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn now_ms() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }

    /// Reads a row selected with [`COLUMNS`]; the trailing `seq` is returned alongside.
    fn row_to_favorite(row: &rusqlite::Row) -> rusqlite::Result<(Favorite, i64)> {
        let kind: String = row.get(0)?;
        let kind = kind
            .parse::<FavoriteKind>()
            .map_err(|k| rusqlite::Error::InvalidColumnType(0, k, Type::Text))?;
        Ok((
            Favorite {
                kind,
                id: row.get(1)?,
                name: row.get(2)?,
                img: row.get(3)?,
                url: row.get(4)?,
                added_at: row.get(5)?,
            },
            row.get(6)?,
        ))
    }

    fn find(&self, kind: FavoriteKind, id_or_name: &str) -> Result<Option<(Favorite, i64)>, FavoriteError> {
        let sql = format!(
            "SELECT {} FROM favorites WHERE kind = ?1 AND (id = ?2 OR name = ?2) ORDER BY seq LIMIT 1",
            COLUMNS
        );
        Ok(self
            .conn
            .query_row(&sql, params![kind.as_str(), id_or_name], Self::row_to_favorite)
            .optional()?)
    }

    fn oldest(&self) -> Result<Option<(Favorite, i64)>, FavoriteError> {
        let sql = format!(
            "SELECT {} FROM favorites ORDER BY added_at ASC, seq ASC LIMIT 1",
            COLUMNS
        );
        Ok(self.conn.query_row(&sql, [], Self::row_to_favorite).optional()?)
    }

    fn query(&self, sql: &str, args: &[&dyn rusqlite::ToSql]) -> Result<Vec<Favorite>, FavoriteError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map(args, Self::row_to_favorite)?;
        let mut favorites = Vec::new();
        for row in rows {
            favorites.push(row?.0);
        }
        Ok(favorites)
    }
}

impl<'a> FavoritesManagerTrait for FavoritesManager<'a> {
    /// Adds `item` to `kind` unless an item with the same id or name is
    /// already there.
    fn add(&mut self, kind: FavoriteKind, item: &FavoriteItem) -> Result<AddOutcome, FavoriteError> {
        let duplicate: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM favorites WHERE kind = ?1 AND (id = ?2 OR name = ?3))",
            params![kind.as_str(), item.id, item.name],
            |row| row.get(0),
        )?;
        if duplicate {
            return Ok(AddOutcome {
                added: false,
                evicted: None,
            });
        }

        let mut evicted = None;
        if self.count()? >= MAX_FAVORITES {
            if let Some((oldest, seq)) = self.oldest()? {
                self.conn
                    .execute("DELETE FROM favorites WHERE seq = ?1", params![seq])?;
                log::info!("[FAV] evicted {} '{}'", oldest.kind, oldest.name);
                evicted = Some(oldest);
            }
        }

        self.conn.execute(
            "INSERT INTO favorites (kind, id, name, img, url, added_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![kind.as_str(), item.id, item.name, item.img, item.url, Self::now_ms()],
        )?;

        Ok(AddOutcome {
            added: true,
            evicted,
        })
    }

    fn remove(&mut self, kind: FavoriteKind, id_or_name: &str) -> Result<Option<Favorite>, FavoriteError> {
        let Some((favorite, seq)) = self.find(kind, id_or_name)? else {
            return Ok(None);
        };
        self.conn
            .execute("DELETE FROM favorites WHERE seq = ?1", params![seq])?;
        Ok(Some(favorite))
    }

    /// Flips favorite status and returns the new one. Items are matched by id,
    /// or by name when the id is empty.
    fn toggle(&mut self, kind: FavoriteKind, item: &FavoriteItem) -> Result<bool, FavoriteError> {
        let key = if item.id.is_empty() { &item.name } else { &item.id };
        if self.is_favorite(kind, key)? {
            self.remove(kind, key)?;
            Ok(false)
        } else {
            self.add(kind, item)?;
            Ok(true)
        }
    }

    fn is_favorite(&self, kind: FavoriteKind, id_or_name: &str) -> Result<bool, FavoriteError> {
        Ok(self.find(kind, id_or_name)?.is_some())
    }

    fn list(&self, kind: FavoriteKind) -> Result<Vec<Favorite>, FavoriteError> {
        let sql = format!(
            "SELECT {} FROM favorites WHERE kind = ?1 ORDER BY added_at DESC, seq DESC",
            COLUMNS
        );
        self.query(&sql, &[&kind.as_str()])
    }

    fn list_all(&self, limit: usize) -> Result<Vec<Favorite>, FavoriteError> {
        let sql = format!(
            "SELECT {} FROM favorites ORDER BY added_at DESC, seq DESC LIMIT ?1",
            COLUMNS
        );
        // SQLite treats a negative LIMIT as unbounded.
        let limit: i64 = if limit == 0 { -1 } else { limit as i64 };
        self.query(&sql, &[&limit])
    }

    fn count(&self) -> Result<usize, FavoriteError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM favorites", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn clear(&mut self) -> Result<(), FavoriteError> {
        self.conn.execute("DELETE FROM favorites", [])?;
        Ok(())
    }
}
