//! Relational schema.
//!
//! Parents are created before children so every `REFERENCES` target exists.
//! There is no `ON DELETE CASCADE`: dependent rows are removed explicitly by
//! the cascading delete use case.

/// `CREATE TABLE` statements in creation order.
pub const SCHEMA: [&str; 5] = [
    r"
    CREATE TABLE IF NOT EXISTS restaurants (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        is_kosher INTEGER NOT NULL DEFAULT 0,
        cuisines TEXT NOT NULL DEFAULT '[]'
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS dishes (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        restaurant_id INTEGER NOT NULL REFERENCES restaurants (id),
        name TEXT NOT NULL,
        description TEXT NOT NULL,
        price TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS orders (
        id TEXT PRIMARY KEY,
        restaurant_id INTEGER NOT NULL REFERENCES restaurants (id),
        created_at TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS ratings (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        restaurant_id INTEGER NOT NULL REFERENCES restaurants (id),
        rating TEXT NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS order_items (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        order_id TEXT NOT NULL REFERENCES orders (id),
        dish_id INTEGER NOT NULL REFERENCES dishes (id),
        amount INTEGER NOT NULL CHECK (amount > 0)
    )
    ",
];
