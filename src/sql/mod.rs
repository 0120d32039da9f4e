//! SQL text for the books table. All statements take positional parameters; nothing is interpolated at runtime.

pub mod books;
