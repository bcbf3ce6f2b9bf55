use std::path::Path;

use log::debug;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};

use crate::error::{AppError, Result};
use crate::model::{Holding, Symbol, UserHolding};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE
    );
    CREATE TABLE IF NOT EXISTS cryptos (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        symbol TEXT NOT NULL UNIQUE
    );
    CREATE TABLE IF NOT EXISTS holdings (
        user_id INTEGER NOT NULL REFERENCES users(id),
        crypto_id INTEGER NOT NULL REFERENCES cryptos(id),
        amount REAL NOT NULL,
        UNIQUE (user_id, crypto_id)
    );
";

/// SQLite-backed store of users, known crypto symbols and their holdings.
pub struct Records {
    conn: Connection,
}

impl Records {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Opening holdings database {}", path.display());
        Self::with_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    pub fn add_user(&self, name: &str) -> Result<()> {
        if self.user_id(name)?.is_some() {
            return Err(AppError::message(format!(
                "Couldn't add {name}: user already exists"
            )));
        }
        self.conn
            .execute("INSERT INTO users (name) VALUES (?1)", params![name])?;
        Ok(())
    }

    pub fn user_id(&self, name: &str) -> Result<Option<i64>> {
        let id = self
            .conn
            .query_row(
                "SELECT id FROM users WHERE name = ?1",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    /// Id of an existing user; a missing user aborts the command.
    pub fn find_user_id(&self, name: &str) -> Result<i64> {
        self.user_id(name)?
            .ok_or_else(|| AppError::message(format!("User {name} doesn't exist")))
    }

    pub fn find_or_create_crypto(&self, symbol: &Symbol) -> Result<i64> {
        self.conn.execute(
            "INSERT OR IGNORE INTO cryptos (symbol) VALUES (?1)",
            params![symbol.as_str()],
        )?;
        let id = self.conn.query_row(
            "SELECT id FROM cryptos WHERE symbol = ?1",
            params![symbol.as_str()],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// Upsert a holding, or delete it when `amount` is not positive.
    pub fn set_holding(&self, user: &str, symbol: &Symbol, amount: f64) -> Result<()> {
        let user_id = self.find_user_id(user)?;
        let crypto_id = self.find_or_create_crypto(symbol)?;

        if amount > 0.0 {
            self.conn.execute(
                "INSERT INTO holdings (user_id, crypto_id, amount) VALUES (?1, ?2, ?3)
                 ON CONFLICT (user_id, crypto_id) DO UPDATE SET amount = excluded.amount",
                params![user_id, crypto_id, amount],
            )?;
        } else {
            self.conn.execute(
                "DELETE FROM holdings WHERE user_id = ?1 AND crypto_id = ?2",
                params![user_id, crypto_id],
            )?;
        }
        Ok(())
    }

    pub fn holdings_for_user(&self, user_id: i64) -> Result<Vec<Holding>> {
        let mut stmt = self.conn.prepare(
            "SELECT c.symbol, h.amount
             FROM holdings h
             JOIN cryptos c ON c.id = h.crypto_id
             WHERE h.user_id = ?1 AND h.amount > 0
             ORDER BY h.rowid",
        )?;

        let rows = stmt.query_map(params![user_id], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
        })?;

        let mut holdings = Vec::new();
        for row in rows {
            let (symbol, amount) = row?;
            holdings.push(Holding::new(Symbol::parse(&symbol)?, amount));
        }
        Ok(holdings)
    }

    pub fn user_count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Every symbol ever recorded, in registration order.
    pub fn all_symbols(&self) -> Result<Vec<Symbol>> {
        let mut stmt = self
            .conn
            .prepare("SELECT symbol FROM cryptos ORDER BY id")?;
        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut symbols = Vec::new();
        for row in rows {
            symbols.push(Symbol::parse(&row?)?);
        }
        Ok(symbols)
    }

    /// Positive holdings of every user, restricted to `symbols`, ordered by
    /// user registration.
    pub fn holdings_for_symbols(&self, symbols: &[Symbol]) -> Result<Vec<UserHolding>> {
        if symbols.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = (1..=symbols.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT u.name, c.symbol, h.amount
             FROM holdings h
             JOIN cryptos c ON c.id = h.crypto_id
             JOIN users u ON u.id = h.user_id
             WHERE h.amount > 0 AND c.symbol IN ({placeholders})
             ORDER BY u.id, h.rowid"
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(symbols.iter().map(Symbol::as_str)), |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
            ))
        })?;

        let mut holdings = Vec::new();
        for row in rows {
            let (user, symbol, amount) = row?;
            holdings.push(UserHolding {
                user,
                holding: Holding::new(Symbol::parse(&symbol)?, amount),
            });
        }
        Ok(holdings)
    }
}
