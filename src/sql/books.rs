pub const TABLE: &str = "books";

pub const SELECT_LIVE: &str = r#"
    SELECT id, book_name, author, price, created_at, updated_at, deleted_at
    FROM books
    WHERE deleted_at IS NULL
    ORDER BY id
"#;

pub const SELECT_BY_ID: &str = r#"
    SELECT id, book_name, author, price, created_at, updated_at, deleted_at
    FROM books
    WHERE id = $1 AND deleted_at IS NULL
"#;

pub const INSERT: &str = r#"
    INSERT INTO books (book_name, author, price)
    VALUES ($1, $2, $3)
    RETURNING id, book_name, author, price, created_at, updated_at, deleted_at
"#;

/// Full replace of the writable columns. `created_at` is untouched.
pub const UPDATE: &str = r#"
    UPDATE books
    SET book_name = $2, author = $3, price = $4, updated_at = NOW()
    WHERE id = $1 AND deleted_at IS NULL
    RETURNING id, book_name, author, price, created_at, updated_at, deleted_at
"#;

pub const SOFT_DELETE: &str = r#"
    UPDATE books
    SET deleted_at = NOW(), updated_at = NOW()
    WHERE id = $1 AND deleted_at IS NULL
    RETURNING id
"#;

pub const PING: &str = "SELECT 1";
